//! `CONFIG_<SYMBOL>=<value>` files: applying them to a model and rendering a model back out.
use std::fmt::Write;
use std::sync::LazyLock;

use kconf_util::split::strip_matching_quotes;
use regex::Regex;
use tracing::{debug, trace, warn};

use crate::entry::SymbolType;
use crate::errors::{ImportError, ImportErrorKind, ModelResult};
use crate::model::ConfigModel;
use crate::options::ImportPolicy;
use crate::value::{parse_hex, Tristate, Value};

static ASSIGNMENT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^CONFIG_(?P<symbol>[A-Za-z0-9_]+)=(?P<value>.*)$").unwrap()
});

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportFailure {
    pub line_no: usize,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ImportReport {
    /// Lines whose value was assigned
    pub applied: usize,
    /// Symbols assigned in the input that the model does not define
    pub unknown_symbols: Vec<String>,
    /// Lines that failed; only populated under [`ImportPolicy::SkipLine`]
    pub failures: Vec<ImportFailure>,
}

impl ConfigModel {
    /// Apply every `CONFIG_<SYMBOL>=<value>` line of `input` through
    /// [`set_value`](ConfigModel::set_value). Other lines are ignored.
    ///
    /// What happens when a line fails depends on the model's [`ImportPolicy`]. Lines before the
    /// failing one stay applied either way.
    pub fn import_assignments(&mut self, input: &str) -> ModelResult<ImportReport> {
        let mut report = ImportReport::default();

        for (i, line) in input.lines().enumerate() {
            let line_no = i + 1;
            let Some(captures) = ASSIGNMENT_REGEX.captures(line.trim_end()) else {
                continue;
            };
            let symbol = &captures["symbol"];
            let raw = &captures["value"];

            match self.import_line(line_no, symbol, raw) {
                Ok(true) => report.applied += 1,
                Ok(false) => report.unknown_symbols.push(symbol.to_string()),
                Err(e) => match self.options.import_policy {
                    ImportPolicy::Abort => return Err(e),
                    ImportPolicy::SkipLine => {
                        warn!(line_no, "skipping assignment: {e:#}");
                        report.failures.push(ImportFailure {
                            line_no,
                            message: format!("{e:#}"),
                        });
                    }
                },
            }
        }

        debug!(
            applied = report.applied,
            unknown = report.unknown_symbols.len(),
            failed = report.failures.len(),
            "imported assignments"
        );
        Ok(report)
    }

    /// Returns `false` when `symbol` is not defined.
    fn import_line(&mut self, line_no: usize, symbol: &str, raw: &str) -> ModelResult<bool> {
        let Some(id) = self.lookup(symbol) else {
            trace!(line_no, symbol, "ignoring unknown symbol");
            return Ok(false);
        };

        let error = |kind| ImportError {
            line_no,
            symbol: symbol.to_string(),
            kind,
        };

        let value = match &self.entry(id).symbol_type {
            None => return Err(error(ImportErrorKind::MissingType).into()),
            Some(SymbolType::Bool | SymbolType::Tristate) => Value::from(raw),
            Some(SymbolType::String) => Value::from(strip_matching_quotes(raw)),
            Some(SymbolType::Int) => match raw.trim().parse::<i64>() {
                Ok(n) => Value::Number(n),
                Err(_) => return Err(error(ImportErrorKind::InvalidNumber(raw.into())).into()),
            },
            Some(SymbolType::Hex) => match parse_hex(raw) {
                Some(n) => Value::Number(n),
                None => return Err(error(ImportErrorKind::InvalidNumber(raw.into())).into()),
            },
            Some(SymbolType::Other(other)) => {
                return Err(error(ImportErrorKind::UnknownType(other.clone())).into());
            }
        };

        self.set_value(id, value)?;
        Ok(true)
    }

    /// Render the current value of every typed symbol, one assignment per line, in definition
    /// order. `n` booleans and tristates are written as `CONFIG_<SYMBOL>=n` so that importing the
    /// output restores them.
    pub fn export_assignments(&self) -> ModelResult<String> {
        let mut out = String::new();

        for (id, entry) in self.entries() {
            let (Some(symbol), Some(symbol_type)) = (&entry.symbol, &entry.symbol_type) else {
                continue;
            };
            let Some(value) = self.value(id)? else {
                continue;
            };
            let Some(rendered) = render_value(symbol_type, &value) else {
                trace!(symbol = %symbol, "not exporting symbol of unknown type");
                continue;
            };

            writeln!(out, "CONFIG_{symbol}={rendered}")?;
        }

        Ok(out)
    }
}

/// Right-hand side of an exported assignment, or `None` for types the importer cannot read.
fn render_value(symbol_type: &SymbolType, value: &Value) -> Option<String> {
    let rendered = match symbol_type {
        SymbolType::Bool | SymbolType::Tristate => {
            Tristate::from_value(Some(value)).as_char().to_string()
        }
        SymbolType::String => format!("\"{value}\""),
        SymbolType::Int => match value.to_int() {
            Some(n) => n.to_string(),
            None => value.to_string(),
        },
        SymbolType::Hex => match value.to_hex() {
            Some(n) => format!("0x{n:x}"),
            None => value.to_string(),
        },
        SymbolType::Other(_) => return None,
    };
    Some(rendered)
}
