//! Operator-precedence evaluation of dependency and value expressions.
//!
//! Expressions are evaluated directly from the token stream with two stacks (operands and
//! operators). Ranks, lower binds tighter:
//!
//! | operator | rank | arity | associativity | result |
//! |----------|------|-------|---------------|--------|
//! | `=`      | 1    | 2     | left          | `y` if equal, else `n` |
//! | `!=`     | 2    | 2     | left          | `y` if different, else `n` |
//! | `!`      | 3    | 1     | right         | `2 - a` |
//! | `&&`     | 4    | 2     | left          | `min(a, b)` |
//! | `\|\|`   | 5    | 2     | left          | `max(a, b)` |
//!
//! Note that equality binds tighter than negation, so `!A = B` means `!(A = B)`. Existing
//! descriptions rely on this, so it is kept as is.
use kconf_lexer::{ExprLexer, TokenKind};

use crate::entry::EntryId;
use crate::errors::{
    EvaluationError, EvaluationErrorKind, ModelResult, ParseError, ParseErrorKind,
};
use crate::value::Value;

/// How a non-truth string operand is treated.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum EvalMode {
    /// Strings other than `"y"`/`"m"` become `0`. Used for conditions and dependencies.
    #[default]
    Truth,
    /// Strings survive. Used for default value expressions, whose result may be a string, int or
    /// hex literal.
    PreserveStrings,
}

/// Symbol lookups needed while evaluating.
pub trait Resolve {
    fn resolve_symbol(&self, name: &str) -> Option<EntryId>;

    /// Current value of an entry: explicit value, else first applicable default, else the zero
    /// value of its type.
    fn entry_value(&self, id: EntryId) -> ModelResult<Option<Value>>;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operator {
    Equals,
    NotEquals,
    Not,
    And,
    Or,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Associativity {
    Left,
    Right,
}

impl Operator {
    fn from_token(kind: TokenKind) -> Option<Operator> {
        Some(match kind {
            TokenKind::Equals => Operator::Equals,
            TokenKind::NotEquals => Operator::NotEquals,
            TokenKind::Not => Operator::Not,
            TokenKind::And => Operator::And,
            TokenKind::Or => Operator::Or,
            _ => return None,
        })
    }

    pub fn rank(&self) -> u8 {
        match self {
            Operator::Equals => 1,
            Operator::NotEquals => 2,
            Operator::Not => 3,
            Operator::And => 4,
            Operator::Or => 5,
        }
    }

    pub fn arity(&self) -> usize {
        match self {
            Operator::Not => 1,
            _ => 2,
        }
    }

    fn associativity(&self) -> Associativity {
        match self {
            Operator::Not => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::Equals => "=",
            Operator::NotEquals => "!=",
            Operator::Not => "!",
            Operator::And => "&&",
            Operator::Or => "||",
        }
    }

    /// Whether this operator, already on the stack, must be reduced before `incoming` is pushed.
    fn reduces_before(&self, incoming: Operator) -> bool {
        self.rank() < incoming.rank()
            || (self.rank() == incoming.rank()
                && incoming.associativity() == Associativity::Left)
    }

    /// `args` are in source order.
    fn reduce(&self, args: &[Value]) -> Value {
        let truth = |b: bool| Value::Number(if b { 2 } else { 0 });
        match (self, args) {
            (Operator::Equals, [a, b]) => truth(a == b),
            (Operator::NotEquals, [a, b]) => truth(a != b),
            (Operator::Not, [a]) => Value::Number(2 - a.as_number()),
            (Operator::And, [a, b]) => Value::Number(a.as_number().min(b.as_number())),
            (Operator::Or, [a, b]) => Value::Number(a.as_number().max(b.as_number())),
            _ => unreachable!("operator {:?} applied to {} operands", self, args.len()),
        }
    }
}

#[derive(Debug)]
enum Operand {
    Entry(EntryId),
    Literal(String),
    Value(Value),
}

#[derive(Copy, Clone, Debug)]
enum StackItem {
    Operator(Operator),
    OpenParenthesis,
}

struct Evaluator<'a, R: Resolve + ?Sized> {
    resolver: &'a R,
    expression: &'a str,
    mode: EvalMode,
    operands: Vec<Operand>,
    operators: Vec<StackItem>,
}

impl<'a, R: Resolve + ?Sized> Evaluator<'a, R> {
    fn parse_error(&self, kind: ParseErrorKind) -> anyhow::Error {
        ParseError {
            expression: self.expression.to_string(),
            kind,
        }
        .into()
    }

    fn evaluation_error(&self, kind: EvaluationErrorKind) -> anyhow::Error {
        EvaluationError {
            expression: self.expression.to_string(),
            kind,
        }
        .into()
    }

    fn valueize(&self, operand: Operand) -> ModelResult<Value> {
        let value = match operand {
            Operand::Entry(id) => self.resolver.entry_value(id)?,
            Operand::Literal(s) => Some(Value::String(s)),
            Operand::Value(v) => Some(v),
        };

        Ok(match value {
            None => Value::Number(0),
            Some(Value::String(s)) => match s.as_str() {
                "y" => Value::Number(2),
                "m" => Value::Number(1),
                _ if self.mode == EvalMode::PreserveStrings => Value::String(s),
                _ => Value::Number(0),
            },
            Some(number) => number,
        })
    }

    fn apply(&mut self, op: Operator) -> ModelResult<()> {
        if self.operands.len() < op.arity() {
            return Err(self.evaluation_error(EvaluationErrorKind::MissingOperand(op.as_str())));
        }

        let start = self.operands.len() - op.arity();
        let operands: Vec<Operand> = self.operands.drain(start..).collect();
        let args = operands
            .into_iter()
            .map(|operand| self.valueize(operand))
            .collect::<ModelResult<Vec<_>>>()?;

        self.operands.push(Operand::Value(op.reduce(&args)));
        Ok(())
    }

    fn push_operator(&mut self, op: Operator) -> ModelResult<()> {
        // A prefix operator has no left operand, so nothing before it can be reduced yet
        if op.arity() == 2 {
            while let Some(&StackItem::Operator(top)) = self.operators.last() {
                if !top.reduces_before(op) {
                    break;
                }
                self.operators.pop();
                self.apply(top)?;
            }
        }

        self.operators.push(StackItem::Operator(op));
        Ok(())
    }

    fn close_parenthesis(&mut self) -> ModelResult<()> {
        loop {
            match self.operators.pop() {
                Some(StackItem::Operator(op)) => self.apply(op)?,
                Some(StackItem::OpenParenthesis) => return Ok(()),
                None => {
                    return Err(self.parse_error(ParseErrorKind::UnmatchedCloseParenthesis));
                }
            }
        }
    }

    fn run(mut self) -> ModelResult<Value> {
        let mut lexer = ExprLexer::new(self.expression);

        loop {
            let token = lexer.token();
            match token.kind {
                TokenKind::EndOfInput => break,
                TokenKind::Error(e) => return Err(self.parse_error(ParseErrorKind::Lexer(e))),
                TokenKind::Symbol => {
                    let operand = match self.resolver.resolve_symbol(&token.text) {
                        Some(id) => Operand::Entry(id),
                        None => Operand::Literal(token.text),
                    };
                    self.operands.push(operand);
                }
                TokenKind::String => self.operands.push(Operand::Literal(token.text)),
                TokenKind::OpenParenthesis => self.operators.push(StackItem::OpenParenthesis),
                TokenKind::CloseParenthesis => self.close_parenthesis()?,
                kind => match Operator::from_token(kind) {
                    Some(op) => self.push_operator(op)?,
                    None => {
                        return Err(
                            self.evaluation_error(EvaluationErrorKind::UnexpectedToken(token.text))
                        );
                    }
                },
            }
            lexer.advance();
        }

        while let Some(item) = self.operators.pop() {
            match item {
                StackItem::Operator(op) => self.apply(op)?,
                StackItem::OpenParenthesis => {
                    return Err(self.parse_error(ParseErrorKind::UnclosedOpenParenthesis));
                }
            }
        }

        match self.operands.len() {
            0 => Err(self.evaluation_error(EvaluationErrorKind::Empty)),
            1 => match self.operands.pop() {
                Some(operand) => self.valueize(operand),
                None => unreachable!(),
            },
            n => Err(self.evaluation_error(EvaluationErrorKind::LeftoverOperands(n))),
        }
    }
}

/// Evaluate `expression` against the symbols known to `resolver`.
///
/// Symbols that `resolver` does not know are treated as literal strings, so `ARCH = x86` compares
/// the value of `ARCH` with the text `x86`.
pub fn evaluate<R: Resolve + ?Sized>(
    resolver: &R,
    expression: &str,
    mode: EvalMode,
) -> ModelResult<Value> {
    Evaluator {
        resolver,
        expression,
        mode,
        operands: vec![],
        operators: vec![],
    }
    .run()
}

/// Whether an optional condition holds. An absent condition always holds.
pub fn condition_holds<R: Resolve + ?Sized>(
    resolver: &R,
    condition: Option<&str>,
) -> ModelResult<bool> {
    match condition {
        None => Ok(true),
        Some(condition) => Ok(evaluate(resolver, condition, EvalMode::Truth)?.as_number() > 0),
    }
}
