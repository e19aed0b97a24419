use kconf_lexer::LexerError;
use thiserror::Error;

use crate::description::NodeKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unable to parse expression '{expression}': {kind}")]
pub struct ParseError {
    pub expression: String,
    pub kind: ParseErrorKind,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("{0}")]
    Lexer(#[from] LexerError),
    #[error("unmatched ')'")]
    UnmatchedCloseParenthesis,
    #[error("'(' is never closed")]
    UnclosedOpenParenthesis,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unable to evaluate expression '{expression}': {kind}")]
pub struct EvaluationError {
    pub expression: String,
    pub kind: EvaluationErrorKind,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationErrorKind {
    #[error("operator '{0}' is missing an operand")]
    MissingOperand(&'static str),
    #[error("{0} operands left over after reduction")]
    LeftoverOperands(usize),
    #[error("expression is empty")]
    Empty,
    #[error("unexpected token '{0}'")]
    UnexpectedToken(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line_no}: cannot import CONFIG_{symbol}: {kind}")]
pub struct ImportError {
    pub line_no: usize,
    pub symbol: String,
    pub kind: ImportErrorKind,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ImportErrorKind {
    #[error("symbol has no type")]
    MissingType,
    #[error("unknown type '{0}'")]
    UnknownType(String),
    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid value '{value}' for {symbol}: {kind}")]
pub struct TypeValidationError {
    pub symbol: String,
    pub value: String,
    pub kind: TypeValidationErrorKind,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TypeValidationErrorKind {
    #[error("not a decimal integer")]
    NotInteger,
    #[error("not a hexadecimal integer")]
    NotHex,
    #[error("outside of range [{low}, {high}]")]
    OutOfRange { low: i64, high: i64 },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("the top-level node must be a menu, found {0:?}")]
    RootNotMenu(NodeKind),
    #[error("unknown node kind '{0}'")]
    UnknownNodeKind(String),
}

pub type ModelResult<T> = anyhow::Result<T>;
