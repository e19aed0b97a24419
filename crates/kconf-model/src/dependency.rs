use fxhash::FxHashMap;
use indexmap::IndexSet;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::entry::EntryId;

#[derive(Clone, Debug, PartialEq, Eq)]
enum DependencyNode {
    Symbol(String),
    Entry(EntryId),
}

/// Reverse dependency index: which entries mention a symbol in one of their conditions.
///
/// Edges run from the referenced symbol to the dependent entry.
#[derive(Debug, Default)]
pub struct DependencyIndex {
    graph: DiGraph<DependencyNode, ()>,
    symbols: FxHashMap<String, NodeIndex>,
    entries: FxHashMap<EntryId, NodeIndex>,
}

impl DependencyIndex {
    pub fn new() -> Self {
        DependencyIndex::default()
    }

    fn symbol_node(&mut self, name: &str) -> NodeIndex {
        if let Some(&node) = self.symbols.get(name) {
            return node;
        }
        let node = self.graph.add_node(DependencyNode::Symbol(name.to_string()));
        self.symbols.insert(name.to_string(), node);
        node
    }

    fn entry_node(&mut self, id: EntryId) -> NodeIndex {
        if let Some(&node) = self.entries.get(&id) {
            return node;
        }
        let node = self.graph.add_node(DependencyNode::Entry(id));
        self.entries.insert(id, node);
        node
    }

    /// Record that `dependent` references `symbol`. Repeated records collapse into one edge.
    pub fn record(&mut self, symbol: &str, dependent: EntryId) {
        let from = self.symbol_node(symbol);
        let to = self.entry_node(dependent);
        self.graph.update_edge(from, to, ());
    }

    /// Record every symbol mentioned in `expression`.
    pub fn record_expression(&mut self, expression: &str, dependent: EntryId) {
        let symbols: IndexSet<String> = kconf_lexer::symbols(expression).into_iter().collect();
        for symbol in &symbols {
            self.record(symbol, dependent);
        }
    }

    /// Entries that reference `symbol`, in the order they were recorded.
    pub fn dependents(&self, symbol: &str) -> Vec<EntryId> {
        let Some(&node) = self.symbols.get(symbol) else {
            return vec![];
        };

        // petgraph walks adjacency lists newest first
        let mut ret: Vec<EntryId> = self
            .graph
            .neighbors_directed(node, Direction::Outgoing)
            .filter_map(|n| match &self.graph[n] {
                DependencyNode::Entry(id) => Some(*id),
                DependencyNode::Symbol(_) => None,
            })
            .collect();
        ret.reverse();
        ret
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn dependents_in_recording_order() {
        let mut index = DependencyIndex::new();
        index.record_expression("NET && !S390", EntryId(3));
        index.record_expression("NET", EntryId(1));
        index.record_expression("NET || NET", EntryId(7));
        index.record_expression("NET", EntryId(3));

        assert_eq!(index.dependents("NET"), vec![EntryId(3), EntryId(1), EntryId(7)]);
        assert_eq!(index.dependents("S390"), vec![EntryId(3)]);
        assert_eq!(index.dependents("PCI"), vec![]);
    }
}
