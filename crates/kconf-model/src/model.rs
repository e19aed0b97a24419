use std::cell::RefCell;
use std::fmt::{Debug, Formatter};

use anyhow::{anyhow, bail};
use fxhash::FxHashMap;
use itertools::Itertools;

use crate::dependency::DependencyIndex;
use crate::description::NodeDescription;
use crate::entry::{Entry, EntryId, EntryKind, SymbolType};
use crate::errors::{ModelResult, TypeValidationError, TypeValidationErrorKind};
use crate::evaluate::{self, EvalMode, Resolve};
use crate::options::ModelOptions;
use crate::propagate::ModelObserver;
use crate::registry::SymbolRegistry;
use crate::tree::TreeBuilder;
use crate::value::{Tristate, Value};

/// An evaluated configuration: every entry of a description, its symbol values and the
/// dependency index used to keep visibility current while values are edited.
pub struct ConfigModel {
    pub(crate) registry: SymbolRegistry,
    pub(crate) dependencies: DependencyIndex,
    pub(crate) root: EntryId,
    pub(crate) options: ModelOptions,
    /// Symbol name → entries with an `imply` naming it
    pub(crate) implied_by: FxHashMap<String, Vec<EntryId>>,
    observers: RefCell<Vec<Box<dyn ModelObserver>>>,
}

impl Debug for ConfigModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigModel")
            .field("registry", &self.registry)
            .field("dependencies", &self.dependencies)
            .field("root", &self.root)
            .field("options", &self.options)
            .field("implied_by", &self.implied_by)
            .field("observers", &self.observers.borrow().len())
            .finish()
    }
}

impl ConfigModel {
    /// A model holding only an empty root menu.
    pub fn new(options: ModelOptions) -> Self {
        let mut registry = SymbolRegistry::new();
        let root = registry.register(Entry::new(EntryKind::Menu));
        ConfigModel {
            registry,
            dependencies: DependencyIndex::new(),
            root,
            options,
            implied_by: FxHashMap::default(),
            observers: RefCell::new(vec![]),
        }
    }

    /// Build a model from a description whose top-level node is a menu.
    pub fn from_description(root: &NodeDescription, options: ModelOptions) -> ModelResult<Self> {
        let mut model = ConfigModel::new(options);
        TreeBuilder::new(&mut model).build(root)?;
        Ok(model)
    }

    pub fn options(&self) -> &ModelOptions {
        &self.options
    }

    pub fn root(&self) -> EntryId {
        self.root
    }

    pub fn entry(&self, id: EntryId) -> &Entry {
        self.registry.get(id)
    }

    pub fn lookup(&self, symbol: &str) -> Option<EntryId> {
        self.registry.lookup(symbol)
    }

    pub fn entries(&self) -> impl Iterator<Item = (EntryId, &Entry)> {
        self.registry.iter()
    }

    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    pub fn children(&self, id: EntryId) -> &[EntryId] {
        &self.entry(id).entries
    }

    pub fn parent(&self, id: EntryId) -> Option<EntryId> {
        self.entry(id).parent
    }

    /// Entries whose conditions mention `symbol`.
    pub fn dependents(&self, symbol: &str) -> Vec<EntryId> {
        self.dependencies.dependents(symbol)
    }

    /// Register an observer for value and visibility changes.
    ///
    /// Observers must not subscribe further observers from inside a notification.
    pub fn subscribe(&self, observer: Box<dyn ModelObserver>) {
        self.observers.borrow_mut().push(observer);
    }

    pub(crate) fn notify<F>(&self, mut f: F)
    where
        F: FnMut(&mut dyn ModelObserver, &ConfigModel),
    {
        for observer in self.observers.borrow_mut().iter_mut() {
            f(observer.as_mut(), self);
        }
    }

    /// Current value: the explicit value if one is set, else the first default whose condition
    /// holds, else the zero value of the entry's type.
    ///
    /// A computed bool/tristate value is raised to the highest value among the entries that
    /// `imply` it. An explicit value is never overridden by an imply.
    pub fn value(&self, id: EntryId) -> ModelResult<Option<Value>> {
        let entry = self.entry(id);
        if let Some(value) = &entry.value {
            return Ok(Some(value.clone()));
        }

        let mut computed = entry.symbol_type.as_ref().and_then(SymbolType::zero_value);
        for default in &entry.defaults {
            if self.condition_holds(default.condition.as_deref())? {
                computed = Some(self.evaluate_with(&default.value, EvalMode::PreserveStrings)?);
                break;
            }
        }

        if entry
            .symbol_type
            .as_ref()
            .is_some_and(SymbolType::is_tristate_like)
        {
            let implied = self.implied_level(id)?;
            if implied > Tristate::from_value(computed.as_ref()) {
                return Ok(Some(implied.into()));
            }
        }

        Ok(computed)
    }

    /// Highest value among the entries whose active `imply` names `id`.
    fn implied_level(&self, id: EntryId) -> ModelResult<Tristate> {
        let Some(symbol) = self.entry(id).symbol.as_deref() else {
            return Ok(Tristate::No);
        };
        let Some(sources) = self.implied_by.get(symbol) else {
            return Ok(Tristate::No);
        };

        let mut level = Tristate::No;
        for &source in sources {
            for imply in &self.entry(source).implies {
                if imply.value == symbol && self.condition_holds(imply.condition.as_deref())? {
                    level = level.max(self.tristate(source)?);
                }
            }
        }
        Ok(level)
    }

    pub fn tristate(&self, id: EntryId) -> ModelResult<Tristate> {
        Ok(Tristate::from_value(self.value(id)?.as_ref()))
    }

    pub fn is_visible(&self, id: EntryId) -> ModelResult<bool> {
        let entry = self.entry(id);
        let Some(prompt) = &entry.prompt else {
            return Ok(false);
        };

        if let Some(depends) = entry.depends() {
            if self.evaluate(&depends)?.as_number() <= 0 {
                return Ok(false);
            }
        }

        self.condition_holds(prompt.condition.as_deref())
    }

    /// Evaluate a condition against the current values.
    pub fn evaluate(&self, expression: &str) -> ModelResult<Value> {
        self.evaluate_with(expression, EvalMode::Truth)
    }

    pub fn evaluate_with(&self, expression: &str, mode: EvalMode) -> ModelResult<Value> {
        evaluate::evaluate(self, expression, mode)
    }

    pub fn condition_holds(&self, condition: Option<&str>) -> ModelResult<bool> {
        evaluate::condition_holds(self, condition)
    }

    /// Bounds of the first range whose condition holds.
    pub fn active_range(&self, id: EntryId) -> ModelResult<Option<(i64, i64)>> {
        let entry = self.entry(id);
        let hex = entry.symbol_type == Some(SymbolType::Hex);

        for range in &entry.ranges {
            if !self.condition_holds(range.condition.as_deref())? {
                continue;
            }

            let Some((low, high)) = range.value.split_whitespace().collect_tuple() else {
                bail!(
                    "malformed range '{}' on {}",
                    range.value,
                    entry.symbol.as_deref().unwrap_or("<none>")
                );
            };

            let bound = |text: &str| -> ModelResult<i64> {
                let value = self.evaluate_with(text, EvalMode::PreserveStrings)?;
                let number = if hex { value.to_hex() } else { value.to_int() };
                number.ok_or_else(|| anyhow!("range bound '{text}' is not a number"))
            };

            return Ok(Some((bound(low)?, bound(high)?)));
        }

        Ok(None)
    }

    /// Check that an `int`/`hex` value parses and lies within the active range. Other types
    /// always pass.
    pub fn validate(&self, id: EntryId) -> ModelResult<()> {
        let entry = self.entry(id);
        let Some(value) = self.value(id)? else {
            return Ok(());
        };

        let (number, kind) = match entry.symbol_type {
            Some(SymbolType::Int) => (value.to_int(), TypeValidationErrorKind::NotInteger),
            Some(SymbolType::Hex) => (value.to_hex(), TypeValidationErrorKind::NotHex),
            _ => return Ok(()),
        };

        let error = |kind| TypeValidationError {
            symbol: entry.symbol.clone().unwrap_or_default(),
            value: value.to_string(),
            kind,
        };

        let Some(number) = number else {
            return Err(error(kind).into());
        };

        if let Some((low, high)) = self.active_range(id)? {
            if number < low || number > high {
                return Err(error(TypeValidationErrorKind::OutOfRange { low, high }).into());
            }
        }

        Ok(())
    }
}

impl Resolve for ConfigModel {
    fn resolve_symbol(&self, name: &str) -> Option<EntryId> {
        self.lookup(name)
    }

    fn entry_value(&self, id: EntryId) -> ModelResult<Option<Value>> {
        self.value(id)
    }
}
