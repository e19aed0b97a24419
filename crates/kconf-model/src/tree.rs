//! Turns a [`NodeDescription`] into the entry tree of a [`ConfigModel`].
//!
//! Children of a `menu` are given explicitly. Children of a `menuconfig` are not; they are the
//! siblings directly after it that have a dependency clause consisting of just its symbol
//! (`depends on M`). Grouping stops at the first sibling that does not.
use tracing::{debug, trace};

use crate::description::{NodeDescription, NodeKind};
use crate::entry::{Entry, EntryId};
use crate::errors::{BuildError, ModelResult};
use crate::model::ConfigModel;
use crate::value::Value;

pub(crate) struct TreeBuilder<'m> {
    model: &'m mut ConfigModel,
}

impl<'m> TreeBuilder<'m> {
    pub(crate) fn new(model: &'m mut ConfigModel) -> Self {
        TreeBuilder { model }
    }

    pub(crate) fn build(mut self, root: &NodeDescription) -> ModelResult<EntryId> {
        if root.kind != NodeKind::Menu {
            return Err(BuildError::RootNotMenu(root.kind).into());
        }

        let root_id = self.model.root;
        *self.model.registry.get_mut(root_id) = Entry::from_description(root, None);
        self.record_conditions(root, root_id);

        self.walk_container(root_id, &root.entries)?;

        debug!(
            entries = self.model.registry.len(),
            symbols = self.model.registry.symbol_count(),
            "built configuration tree"
        );
        Ok(root_id)
    }

    fn walk_container(&mut self, scope: EntryId, nodes: &[NodeDescription]) -> ModelResult<()> {
        let mut i = 0;
        while i < nodes.len() {
            let (id, consumed) = self.build_node(scope, &nodes[i..])?;
            self.attach(scope, id);
            i += consumed;
        }
        Ok(())
    }

    /// Build `nodes[0]` under `parent`. Returns the new entry and how many nodes of `nodes` it
    /// took up (more than one for a menuconfig that absorbed siblings).
    fn build_node(
        &mut self,
        parent: EntryId,
        nodes: &[NodeDescription],
    ) -> ModelResult<(EntryId, usize)> {
        let node = &nodes[0];
        match node.kind {
            NodeKind::Menu => {
                let id = self.add_entry(node, parent);
                self.walk_container(id, &node.entries)?;
                Ok((id, 1))
            }
            NodeKind::MenuConfig => self.build_menuconfig(parent, nodes),
            NodeKind::Config | NodeKind::Comment | NodeKind::Choice => {
                Ok((self.add_entry(node, parent), 1))
            }
        }
    }

    fn build_menuconfig(
        &mut self,
        parent: EntryId,
        nodes: &[NodeDescription],
    ) -> ModelResult<(EntryId, usize)> {
        let node = &nodes[0];
        let id = self.add_entry(node, parent);

        let mut consumed = 1;
        if let Some(symbol) = node.symbol.as_deref() {
            while consumed < nodes.len() && nodes[consumed].depends_on_symbol(symbol) {
                let (child, n) = self.build_node(id, &nodes[consumed..])?;
                self.attach(id, child);
                consumed += n;
            }
            trace!(symbol, children = consumed - 1, "menuconfig absorbed siblings");
        }

        Ok((id, consumed))
    }

    fn add_entry(&mut self, node: &NodeDescription, parent: EntryId) -> EntryId {
        let id = self
            .model
            .registry
            .register(Entry::from_description(node, Some(parent)));
        self.record_conditions(node, id);

        for imply in &node.implies {
            let sources = self
                .model
                .implied_by
                .entry(imply.value.clone())
                .or_default();
            if !sources.contains(&id) {
                sources.push(id);
            }
        }

        if let Some(var) = &node.env {
            match self.model.options.env.get(var) {
                Some(env_value) => {
                    let entry = self.model.registry.get_mut(id);
                    if entry.value.is_none() {
                        trace!(entry = %id, var = %var, "seeding value from environment");
                        entry.value = Some(Value::String(env_value.clone()));
                    }
                }
                None => trace!(entry = %id, var = %var, "environment variable not set"),
            }
        }

        id
    }

    fn record_conditions(&mut self, node: &NodeDescription, id: EntryId) {
        for clause in &node.depends {
            self.model.dependencies.record_expression(clause, id);
        }
        if let Some(condition) = node.prompt.as_ref().and_then(|p| p.condition.as_deref()) {
            self.model.dependencies.record_expression(condition, id);
        }
    }

    fn attach(&mut self, scope: EntryId, child: EntryId) {
        // A redefinition of the scope's own symbol merges into the scope itself
        if scope == child {
            return;
        }

        let entries = &mut self.model.registry.get_mut(scope).entries;
        if !entries.contains(&child) {
            entries.push(child);
        }
    }
}
