//! The hierarchical description consumed by the [tree builder](crate::tree). Loading it from
//! storage is up to the caller; this module only defines its shape plus a few constructors that
//! keep hand-written descriptions (tests, tools) readable.
use std::str::FromStr;

use crate::entry::{Conditional, Prompt};
use crate::errors::BuildError;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    Menu,
    /// A menu whose children are not nested in the description; they are inferred from the
    /// siblings that follow it.
    MenuConfig,
    #[default]
    Config,
    Comment,
    Choice,
}

impl FromStr for NodeKind {
    type Err = BuildError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "menu" => Ok(NodeKind::Menu),
            "menuconfig" => Ok(NodeKind::MenuConfig),
            "config" => Ok(NodeKind::Config),
            "comment" => Ok(NodeKind::Comment),
            "choice" => Ok(NodeKind::Choice),
            other => Err(BuildError::UnknownNodeKind(other.to_string())),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NodeDescription {
    pub kind: NodeKind,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub symbol: Option<String>,
    pub symbol_type: Option<String>,
    pub prompt: Option<Prompt>,
    pub help: Option<String>,
    pub env: Option<String>,
    /// One expression per `depends on` clause
    pub depends: Vec<String>,
    pub selects: Vec<Conditional>,
    pub implies: Vec<Conditional>,
    pub defaults: Vec<Conditional>,
    pub ranges: Vec<Conditional>,
    /// Explicit children. Only meaningful for [`NodeKind::Menu`].
    pub entries: Vec<NodeDescription>,
}

impl NodeDescription {
    pub fn new(kind: NodeKind) -> Self {
        NodeDescription {
            kind,
            ..Default::default()
        }
    }

    pub fn menu<P: Into<String>>(prompt: P) -> Self {
        NodeDescription::new(NodeKind::Menu).prompt(prompt)
    }

    pub fn menuconfig<S: Into<String>>(symbol: S) -> Self {
        NodeDescription::new(NodeKind::MenuConfig).symbol(symbol)
    }

    pub fn config<S: Into<String>>(symbol: S) -> Self {
        NodeDescription::new(NodeKind::Config).symbol(symbol)
    }

    pub fn comment<P: Into<String>>(prompt: P) -> Self {
        NodeDescription::new(NodeKind::Comment).prompt(prompt)
    }

    pub fn choice() -> Self {
        NodeDescription::new(NodeKind::Choice)
    }

    pub fn symbol<S: Into<String>>(mut self, symbol: S) -> Self {
        self.symbol = Some(symbol.into());
        self
    }

    pub fn typed<T: Into<String>>(mut self, symbol_type: T) -> Self {
        self.symbol_type = Some(symbol_type.into());
        self
    }

    pub fn prompt<P: Into<String>>(mut self, text: P) -> Self {
        self.prompt = Some(Prompt {
            text: text.into(),
            condition: None,
        });
        self
    }

    pub fn prompt_if<P: Into<String>, C: Into<String>>(mut self, text: P, condition: C) -> Self {
        self.prompt = Some(Prompt {
            text: text.into(),
            condition: Some(condition.into()),
        });
        self
    }

    pub fn help<H: Into<String>>(mut self, help: H) -> Self {
        self.help = Some(help.into());
        self
    }

    pub fn env<E: Into<String>>(mut self, env: E) -> Self {
        self.env = Some(env.into());
        self
    }

    pub fn at<F: Into<String>>(mut self, file: F, line: u32) -> Self {
        self.file = Some(file.into());
        self.line = Some(line);
        self
    }

    pub fn depends_on<C: Into<String>>(mut self, clause: C) -> Self {
        self.depends.push(clause.into());
        self
    }

    pub fn select<S: Into<String>>(mut self, target: S) -> Self {
        self.selects.push(Conditional::new(target));
        self
    }

    pub fn select_if<S: Into<String>, C: Into<String>>(mut self, target: S, condition: C) -> Self {
        self.selects.push(Conditional::new_if(target, condition));
        self
    }

    pub fn imply<S: Into<String>>(mut self, target: S) -> Self {
        self.implies.push(Conditional::new(target));
        self
    }

    pub fn imply_if<S: Into<String>, C: Into<String>>(mut self, target: S, condition: C) -> Self {
        self.implies.push(Conditional::new_if(target, condition));
        self
    }

    pub fn default_value<V: Into<String>>(mut self, value: V) -> Self {
        self.defaults.push(Conditional::new(value));
        self
    }

    pub fn default_if<V: Into<String>, C: Into<String>>(mut self, value: V, condition: C) -> Self {
        self.defaults.push(Conditional::new_if(value, condition));
        self
    }

    pub fn range<L: Into<String>, H: Into<String>>(mut self, low: L, high: H) -> Self {
        self.ranges
            .push(Conditional::new(format!("{} {}", low.into(), high.into())));
        self
    }

    pub fn range_if<L: Into<String>, H: Into<String>, C: Into<String>>(
        mut self,
        low: L,
        high: H,
        condition: C,
    ) -> Self {
        self.ranges.push(Conditional::new_if(
            format!("{} {}", low.into(), high.into()),
            condition,
        ));
        self
    }

    pub fn entry(mut self, child: NodeDescription) -> Self {
        self.entries.push(child);
        self
    }

    pub fn entries<I: IntoIterator<Item = NodeDescription>>(mut self, children: I) -> Self {
        self.entries.extend(children);
        self
    }

    /// Whether one of the dependency clauses is exactly `symbol`. Clauses that merely mention it,
    /// like `!M` or `M && X`, do not count.
    pub fn depends_on_symbol(&self, symbol: &str) -> bool {
        self.depends.iter().any(|clause| clause.trim() == symbol)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn node_kind_from_str() {
        assert_eq!("menuconfig".parse::<NodeKind>(), Ok(NodeKind::MenuConfig));
        assert_eq!(
            "if".parse::<NodeKind>(),
            Err(BuildError::UnknownNodeKind("if".into()))
        );
    }

    #[test]
    fn depends_on_symbol_matches_whole_clauses() {
        let node = NodeDescription::config("A")
            .depends_on("NETDEVICES && !S390")
            .depends_on(" PCI ");
        assert!(node.depends_on_symbol("PCI"));
        assert!(!node.depends_on_symbol("NETDEVICES"));
        assert!(!node.depends_on_symbol("S390"));
        assert!(!NodeDescription::config("B").depends_on_symbol("A"));
    }

    #[test]
    fn ranges_are_stored_as_bound_pairs() {
        let node = NodeDescription::config("NR_CPUS").range("2", "512");
        assert_eq!(node.ranges, vec![Conditional::new("2 512")]);
    }
}
