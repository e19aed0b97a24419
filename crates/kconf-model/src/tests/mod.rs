mod merge;
mod tree;

use std::cell::RefCell;
use std::rc::Rc;

use crate::description::NodeDescription;
use crate::entry::EntryId;
use crate::model::ConfigModel;
use crate::options::ModelOptions;
use crate::propagate::ModelObserver;

pub(crate) fn build(entries: Vec<NodeDescription>) -> ConfigModel {
    build_with(entries, ModelOptions::default())
}

pub(crate) fn build_with(entries: Vec<NodeDescription>, options: ModelOptions) -> ConfigModel {
    ConfigModel::from_description(&NodeDescription::menu("Main menu").entries(entries), options)
        .unwrap()
}

pub(crate) fn id(model: &ConfigModel, symbol: &str) -> EntryId {
    model
        .lookup(symbol)
        .unwrap_or_else(|| panic!("{symbol} is not defined"))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Event {
    Value(String),
    Visibility(String, bool),
}

/// Records notifications by symbol name (or prompt text for symbol-less entries).
#[derive(Clone, Default)]
pub(crate) struct Recorder(Rc<RefCell<Vec<Event>>>);

impl Recorder {
    pub(crate) fn take(&self) -> Vec<Event> {
        std::mem::take(&mut *self.0.borrow_mut())
    }
}

fn name(model: &ConfigModel, id: EntryId) -> String {
    let entry = model.entry(id);
    entry
        .symbol
        .clone()
        .or_else(|| entry.prompt.as_ref().map(|p| p.text.clone()))
        .unwrap_or_else(|| id.to_string())
}

impl ModelObserver for Recorder {
    fn on_value_changed(&mut self, model: &ConfigModel, id: EntryId) {
        self.0.borrow_mut().push(Event::Value(name(model, id)));
    }

    fn on_visibility_changed(&mut self, model: &ConfigModel, id: EntryId, visible: bool) {
        self.0
            .borrow_mut()
            .push(Event::Visibility(name(model, id), visible));
    }
}
