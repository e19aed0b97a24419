use muncher::Muncher;
use phf::{self, phf_map};

use crate::token::{LexerError, LexerErrorKind, Token, TokenKind};

static OPERATORS: phf::Map<&'static str, TokenKind> = phf_map! {
    "=" => TokenKind::Equals,
    "!=" => TokenKind::NotEquals,
    "!" => TokenKind::Not,
    "&&" => TokenKind::And,
    "||" => TokenKind::Or,
    "(" => TokenKind::OpenParenthesis,
    ")" => TokenKind::CloseParenthesis,
};

// Muncher keeps a separate peek cursor; always start from (and return to) the eat position.
#[inline]
fn peek_char(m: &mut Muncher) -> Option<char> {
    m.reset_peek();
    let c = m.peek().copied();
    m.reset_peek();
    c
}

pub fn is_symbol_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub fn is_expr_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

#[inline]
fn scan_symbol(first_char: char, m: &mut Muncher) -> Token {
    let mut text = String::from(first_char);
    while let Some(c) = peek_char(m) {
        if !is_symbol_char(c) {
            break;
        }
        m.eat();
        text.push(c);
    }

    Token::new(TokenKind::Symbol, text)
}

/// Scan a quoted string. A backslash escapes the following character (including the quote
/// character); both are passed through verbatim.
#[inline]
fn scan_quoted_value(start: usize, m: &mut Muncher, quote_char: char) -> Token {
    let mut text = String::new();

    while let Some(c) = m.eat() {
        match c {
            c if c == quote_char => return Token::new(TokenKind::String, text),
            '\\' => {
                text.push(c);
                match m.eat() {
                    Some(escaped) => text.push(escaped),
                    None => break,
                }
            }
            _ => text.push(c),
        }
    }

    Token::new(
        TokenKind::Error(LexerError {
            kind: LexerErrorKind::UnterminatedString,
            position: start,
        }),
        text,
    )
}

#[inline]
fn scan_operator(start: usize, first_char: char, m: &mut Muncher) -> Token {
    if let Some(second_char) = peek_char(m) {
        let pair: String = [first_char, second_char].iter().collect();
        if let Some(kind) = OPERATORS.get(pair.as_str()) {
            m.eat();
            return Token::new(*kind, pair);
        }
    }

    let single = first_char.to_string();
    match OPERATORS.get(single.as_str()) {
        Some(kind) => Token::new(*kind, single),
        None => Token::new(
            TokenKind::Error(LexerError {
                kind: LexerErrorKind::UnexpectedCharacter(first_char),
                position: start,
            }),
            single,
        ),
    }
}

pub struct ExprLexer<'input> {
    muncher: Muncher<'input>,
    pub(crate) token: Token,
}

impl<'input> ExprLexer<'input> {
    pub fn new(input: &'input str) -> ExprLexer<'input> {
        let mut ret = ExprLexer {
            muncher: Muncher::new(input),
            token: Token::new(TokenKind::EndOfInput, ""),
        };
        ret.advance();
        ret
    }

    pub fn token(&self) -> Token {
        self.token.clone()
    }

    pub fn advance(&mut self) {
        let m = &mut self.muncher;

        // Whitespace is insignificant everywhere in an expression
        while let Some(c) = peek_char(m) {
            if !is_expr_whitespace(c) {
                break;
            }
            m.eat();
        }

        let start = m.position();
        self.token = match m.eat() {
            None => Token::new(TokenKind::EndOfInput, ""),
            Some(c) if is_symbol_char(c) => scan_symbol(c, m),
            Some(c @ ('\'' | '"')) => scan_quoted_value(start, m, c),
            Some(c) => scan_operator(start, c, m),
        };
    }
}

impl Iterator for ExprLexer<'_> {
    type Item = Token;

    /// Yields tokens up to (not including) end of input. Lexing stops after the first error
    /// token.
    fn next(&mut self) -> Option<Self::Item> {
        if self.token.is_end_of_input() {
            return None;
        }

        let ret = self.token();
        if ret.error().is_some() {
            self.token = Token::new(TokenKind::EndOfInput, "");
        } else {
            self.advance();
        }
        Some(ret)
    }
}

pub fn tokenize(data: &str) -> Vec<Token> {
    ExprLexer::new(data).collect()
}

/// Names of every symbol token in `data`, in order of appearance (duplicates kept).
pub fn symbols(data: &str) -> Vec<String> {
    ExprLexer::new(data)
        .filter(|token| token.kind == TokenKind::Symbol)
        .map(|token| token.text)
        .collect()
}
