use crate::assert_tokenizes_as;
use crate::lexer::{symbols, tokenize};
use crate::tests::mock::TokenMock;
use crate::token::{LexerErrorKind, TokenKind};


#[test]
pub fn single_symbol() {
    assert_tokenizes_as!("NET", TokenMock::symbol("NET"));
    assert_tokenizes_as!("  64BIT_ONLY ", TokenMock::symbol("64BIT_ONLY"));
}

#[test]
pub fn empty_input() {
    assert!(tokenize("").is_empty());
    assert!(tokenize(" \t\n").is_empty());
}

#[test]
pub fn operators() {
    assert_tokenizes_as!(
        "A&&B||!C",
        TokenMock::symbol("A"),
        TokenKind::And,
        TokenMock::symbol("B"),
        TokenKind::Or,
        TokenKind::Not,
        TokenMock::symbol("C")
    );
}

#[test]
pub fn equality_is_single_equals() {
    assert_tokenizes_as!(
        "ARCH = x86 && ARCH != um",
        TokenMock::symbol("ARCH"),
        TokenKind::Equals,
        TokenMock::symbol("x86"),
        TokenKind::And,
        TokenMock::symbol("ARCH"),
        TokenKind::NotEquals,
        TokenMock::symbol("um")
    );

    // "==" is just two equality operators
    assert_tokenizes_as!(
        "A==B",
        TokenMock::symbol("A"),
        TokenKind::Equals,
        TokenKind::Equals,
        TokenMock::symbol("B")
    );
}

#[test]
pub fn parentheses() {
    assert_tokenizes_as!(
        "!(A || B)",
        TokenKind::Not,
        TokenKind::OpenParenthesis,
        TokenMock::symbol("A"),
        TokenKind::Or,
        TokenMock::symbol("B"),
        TokenKind::CloseParenthesis
    );
}

#[test]
pub fn quoted_strings() {
    assert_tokenizes_as!("\"hello world\"", TokenMock::string("hello world"));
    assert_tokenizes_as!("'single'", TokenMock::string("single"));
    assert_tokenizes_as!(
        "CMDLINE = \"a 'b' c\"",
        TokenMock::symbol("CMDLINE"),
        TokenKind::Equals,
        TokenMock::string("a 'b' c")
    );
}

#[test]
pub fn escapes_pass_through() {
    assert_tokenizes_as!(r#""say \"hi\"""#, TokenMock::string(r#"say \"hi\""#));
    assert_tokenizes_as!(r#"'a\\'"#, TokenMock::string(r#"a\\"#));
}

#[test]
pub fn unterminated_string() {
    let tokens = tokenize("A = \"oops");
    let last = tokens.last().unwrap();
    assert_eq!(
        last.error().map(|e| e.kind),
        Some(LexerErrorKind::UnterminatedString)
    );
}

#[test]
pub fn unexpected_characters() {
    for (input, bad, position) in [("A & B", '&', 2), ("A | B", '|', 2), ("A < B", '<', 2), ("$", '$', 0)] {
        let tokens = tokenize(input);
        let error = tokens.last().and_then(|t| t.error()).unwrap();
        assert_eq!(error.kind, LexerErrorKind::UnexpectedCharacter(bad), "{input}");
        assert_eq!(error.position, position, "{input}");
    }
}

#[test]
pub fn lexing_stops_at_first_error() {
    let tokens = tokenize("A # B C");
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].kind, TokenKind::Symbol);
    assert!(tokens[1].error().is_some());
}

#[test]
pub fn symbol_extraction() {
    assert_eq!(
        symbols("NET && (INET || NET) && ARCH != \"um\""),
        vec!["NET", "INET", "NET", "ARCH"]
    );
    assert!(symbols("\"only a string\"").is_empty());
}
