//! Command line helpers for evaluating configuration expressions outside of a full description.
pub mod commands;

pub type KconfResult<T> = anyhow::Result<T>;
