//! Evaluation engine for kernel-style configuration descriptions.
//!
//! ## Overview
//! A description is a tree of menus, `menuconfig`s, `config`s, comments and choices (see
//! [`description`]). [`ConfigModel::from_description`] flattens it into a set of [`Entry`]s,
//! one per symbol, and builds the tree the user sees:
//!
//! * Definitions of the same symbol are **merged**. Prompt, help, type and environment binding
//!   keep the first value seen; `select`, `imply`, `default` and `range` lists are unioned; and
//!   `depends on` clauses are conjoined.
//! * A `menuconfig` **absorbs** the siblings that follow it as long as one of their
//!   `depends on` clauses is exactly its symbol.
//!
//! Values are computed lazily. An entry's value is its explicit value if it has one, else the
//! first `default` whose condition holds, else the zero value of its type.
//!
//! ```
//! use kconf_model::description::NodeDescription;
//! use kconf_model::{ConfigModel, ModelOptions, Tristate};
//!
//! let root = NodeDescription::menu("Main menu").entries([
//!     NodeDescription::menuconfig("NET").typed("bool").prompt("Networking support"),
//!     NodeDescription::config("INET")
//!         .typed("bool")
//!         .prompt("TCP/IP networking")
//!         .depends_on("NET")
//!         .default_value("y"),
//! ]);
//!
//! let mut model = ConfigModel::from_description(&root, ModelOptions::default()).unwrap();
//! let net = model.lookup("NET").unwrap();
//! let inet = model.lookup("INET").unwrap();
//! assert_eq!(model.children(net), &[inet]);
//! assert!(!model.is_visible(inet).unwrap());
//!
//! model.set_value(net, Tristate::Yes).unwrap();
//! assert!(model.is_visible(inet).unwrap());
//! assert_eq!(model.tristate(inet).unwrap(), Tristate::Yes);
//! ```
//!
//! ## Expressions
//! Conditions are evaluated by [`evaluate`] over the tri-state domain `n` = 0, `m` = 1, `y` = 2.
//! Symbols the model does not define evaluate as literal text.
//!
//! ## Edits
//! [`ConfigModel::set_value`] forces the targets of the entry's `select`s to the same value,
//! validates `int`/`hex` values and tells every [`ModelObserver`] what changed. An `imply` is
//! never stored: [`ConfigModel::value`] raises a bool/tristate symbol without an explicit value
//! to the highest value among the entries implying it.
pub mod assignments;
pub mod dependency;
pub mod description;
pub mod entry;
pub mod errors;
pub mod evaluate;
pub mod model;
pub mod options;
pub mod propagate;
pub mod registry;
mod tree;
pub mod value;

#[cfg(test)]
mod tests;

pub use assignments::{ImportFailure, ImportReport};
pub use entry::{Conditional, Entry, EntryId, EntryKind, Location, Prompt, SymbolType};
pub use errors::ModelResult;
pub use evaluate::EvalMode;
pub use model::ConfigModel;
pub use options::{ImportPolicy, ModelOptions};
pub use propagate::ModelObserver;
pub use value::{Tristate, Value};
