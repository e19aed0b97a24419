//! Value edits and their consequences: `select` cascades, type validation and observer
//! notification.
//!
//! Cascades are not transactional. If a step fails part-way, every value committed before the
//! failure stays committed. There is no guard against `select` cycles.
use tracing::{debug, trace};

use crate::entry::EntryId;
use crate::errors::ModelResult;
use crate::model::ConfigModel;
use crate::value::Value;

/// Receives change notifications from a [`ConfigModel`]. Both methods default to doing nothing.
pub trait ModelObserver {
    /// `id` was assigned a value (or had its value cleared).
    fn on_value_changed(&mut self, _model: &ConfigModel, _id: EntryId) {}

    /// `id` depends on a symbol whose value changed; `visible` is its recomputed visibility.
    fn on_visibility_changed(&mut self, _model: &ConfigModel, _id: EntryId, _visible: bool) {}
}

impl ConfigModel {
    /// Assign `value` to `id`, then force the entry's active `select` targets to the same value.
    ///
    /// `imply` targets are not assigned. Their computed value follows the implying entry (see
    /// [`ConfigModel::value`]), so they are only re-announced to observers.
    pub fn set_value<V: Into<Value>>(&mut self, id: EntryId, value: V) -> ModelResult<()> {
        let value = value.into();
        debug!(entry = %id, symbol = ?self.entry(id).symbol, %value, "set value");

        let entry = self.registry.get_mut(id);
        entry.value = Some(value.clone());
        let selects = entry.selects.clone();

        for select in &selects {
            if !self.condition_holds(select.condition.as_deref())? {
                continue;
            }
            match self.lookup(&select.value) {
                Some(target) => self.set_value(target, value.clone())?,
                None => trace!(target = %select.value, "select target is not defined"),
            }
        }

        self.refresh(id)?;
        self.refresh_implied(id)
    }

    /// Drop the explicit value of `id` so that it falls back to its defaults.
    pub fn clear_value(&mut self, id: EntryId) -> ModelResult<()> {
        debug!(entry = %id, symbol = ?self.entry(id).symbol, "clear value");
        self.registry.get_mut(id).value = None;
        self.refresh(id)?;
        self.refresh_implied(id)
    }

    fn refresh(&mut self, id: EntryId) -> ModelResult<()> {
        if self.options.validate_types {
            self.validate(id)?;
        }

        self.notify(|observer, model| observer.on_value_changed(model, id));

        let Some(symbol) = self.entry(id).symbol.clone() else {
            return Ok(());
        };

        for dependent in self.dependencies.dependents(&symbol) {
            let visible = self.is_visible(dependent)?;
            trace!(entry = %dependent, visible, "visibility recomputed");
            self.notify(|observer, model| {
                observer.on_visibility_changed(model, dependent, visible)
            });
        }

        Ok(())
    }

    /// Refresh the `imply` targets of `id` that have no explicit value. Their own implies are not
    /// followed.
    fn refresh_implied(&mut self, id: EntryId) -> ModelResult<()> {
        let implies = self.entry(id).implies.clone();
        for imply in &implies {
            match self.lookup(&imply.value) {
                Some(target) if target != id && self.entry(target).value.is_none() => {
                    self.refresh(target)?
                }
                Some(_) => trace!(target = %imply.value, "implied symbol has an explicit value"),
                None => trace!(target = %imply.value, "imply target is not defined"),
            }
        }
        Ok(())
    }
}
