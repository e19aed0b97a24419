use thiserror::Error;

#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Token {
    pub kind: TokenKind,
    /// Token text. For quoted strings this excludes the surrounding quotes; escape sequences are
    /// kept as written.
    pub text: String,
}

impl Token {
    pub(crate) fn new<S: Into<String>>(kind: TokenKind, text: S) -> Self {
        Token {
            kind,
            text: text.into(),
        }
    }

    pub fn is_end_of_input(&self) -> bool {
        self.kind.is_end_of_input()
    }

    pub fn error(&self) -> Option<LexerError> {
        match self.kind {
            TokenKind::Error(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Error(LexerError),

    And,
    CloseParenthesis,
    EndOfInput,
    Equals,
    Not,
    NotEquals,
    OpenParenthesis,
    Or,
    String,
    Symbol,
}

#[derive(Error, Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[error("{kind} at offset {position}")]
pub struct LexerError {
    pub kind: LexerErrorKind,
    /// Character offset of the offending input
    pub position: usize,
}

#[derive(Error, Debug, Eq, PartialEq, Copy, Clone, Hash)]
pub enum LexerErrorKind {
    #[error("unexpected character '{0}'")]
    UnexpectedCharacter(char),
    #[error("unterminated quoted string")]
    UnterminatedString,
}

impl TokenKind {
    pub fn is_end_of_input(&self) -> bool {
        matches!(self, TokenKind::EndOfInput)
    }

    pub fn get_fixed_str(&self) -> Option<&'static str> {
        let ret = match self {
            TokenKind::And => "&&",
            TokenKind::CloseParenthesis => ")",
            TokenKind::Equals => "=",
            TokenKind::Not => "!",
            TokenKind::NotEquals => "!=",
            TokenKind::OpenParenthesis => "(",
            TokenKind::Or => "||",
            _ => return None,
        };

        Some(ret)
    }
}
