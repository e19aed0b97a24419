//! Lexer for the dependency and value expressions attached to configuration entries, e.g.
//!
//! ```text
//! depends on NET && (INET || IPV6) && ARCH != "um"
//! ```
//!
//! The token set is deliberately small: symbols, quoted strings, `=`, `!=`, `!`, `&&`, `||` and
//! parentheses. Anything else is reported as an [`TokenKind::Error`] token rather than panicking,
//! so callers decide how fatal it is.
pub mod lexer;
pub mod token;

#[cfg(test)]
mod tests;

pub use lexer::{symbols, tokenize, ExprLexer};
pub use token::{LexerError, LexerErrorKind, Token, TokenKind};
