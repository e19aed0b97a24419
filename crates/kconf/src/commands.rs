use std::str::FromStr;

use anyhow::Context;
use kconf_lexer::{tokenize, TokenKind};
use kconf_model::description::NodeDescription;
use kconf_model::{ConfigModel, EvalMode, ModelOptions, Value};
use thiserror::Error;
use tracing::debug;

use crate::KconfResult;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    #[error("expected NAME[:TYPE]=VALUE, got '{0}'")]
    MissingValue(String),
    #[error("'{0}' is not a valid symbol name")]
    InvalidSymbol(String),
}

/// A symbol given on the command line as `NAME[:TYPE]=VALUE`. The type defaults to `tristate`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Definition {
    pub symbol: String,
    pub symbol_type: String,
    pub value: String,
}

impl FromStr for Definition {
    type Err = DefinitionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, value) = s
            .split_once('=')
            .ok_or_else(|| DefinitionError::MissingValue(s.to_string()))?;

        let (symbol, symbol_type) = match name.split_once(':') {
            Some((symbol, symbol_type)) => (symbol, symbol_type),
            None => (name, "tristate"),
        };

        if symbol.is_empty()
            || !symbol
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
        {
            return Err(DefinitionError::InvalidSymbol(symbol.to_string()));
        }

        Ok(Definition {
            symbol: symbol.to_string(),
            symbol_type: symbol_type.to_string(),
            value: value.to_string(),
        })
    }
}

/// Build a flat model holding `definitions`, with their values applied the way a `.config` line
/// would be.
pub fn model_from_definitions(definitions: &[Definition]) -> KconfResult<ConfigModel> {
    let root = NodeDescription::menu("kconf-eval").entries(
        definitions
            .iter()
            .map(|d| NodeDescription::config(&d.symbol).typed(&d.symbol_type)),
    );
    let mut model = ConfigModel::from_description(&root, ModelOptions::from_process_env())?;

    let assignments: String = definitions
        .iter()
        .map(|d| format!("CONFIG_{}={}\n", d.symbol, d.value))
        .collect();
    model
        .import_assignments(&assignments)
        .context("applying definitions")?;

    debug!(symbols = definitions.len(), "model ready");
    Ok(model)
}

pub fn eval_expression(
    expression: &str,
    definitions: &[Definition],
    mode: EvalMode,
) -> KconfResult<Value> {
    let model = model_from_definitions(definitions)?;
    model.evaluate_with(expression, mode)
}

/// One `<kind> <text>` line per token.
pub fn describe_tokens(expression: &str) -> KconfResult<Vec<String>> {
    tokenize(expression)
        .into_iter()
        .map(|token| match token.kind {
            TokenKind::Error(e) => {
                Err(anyhow::Error::new(e).context(format!("unable to tokenize '{expression}'")))
            }
            kind => Ok(format!("{kind:?} {}", token.text)),
        })
        .collect()
}
