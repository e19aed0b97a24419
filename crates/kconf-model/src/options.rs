use derive_builder::Builder;
use fxhash::FxHashMap;

/// What to do when one line of an assignment import fails.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ImportPolicy {
    /// Stop at the failing line and return its error. Lines before it stay applied.
    #[default]
    Abort,
    /// Record the failure in the [`ImportReport`](crate::assignments::ImportReport) and carry on
    /// with the next line.
    SkipLine,
}

/// Knobs for a [`ConfigModel`](crate::ConfigModel).
///
/// ```
/// use kconf_model::options::{ImportPolicy, ModelOptionsBuilder};
///
/// let options = ModelOptionsBuilder::default()
///     .import_policy(ImportPolicy::SkipLine)
///     .build()
///     .unwrap();
/// assert!(options.validate_types);
/// ```
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), default)]
pub struct ModelOptions {
    /// Environment snapshot used to seed entries that declare an `env` binding
    pub env: FxHashMap<String, String>,
    pub import_policy: ImportPolicy,
    /// Check `int`/`hex` values (and ranges) whenever a value is committed
    pub validate_types: bool,
}

impl Default for ModelOptions {
    fn default() -> Self {
        ModelOptions {
            env: FxHashMap::default(),
            import_policy: ImportPolicy::default(),
            validate_types: true,
        }
    }
}

impl ModelOptions {
    /// Default options with a snapshot of the current process environment.
    pub fn from_process_env() -> Self {
        ModelOptions {
            env: std::env::vars().collect(),
            ..Default::default()
        }
    }
}
