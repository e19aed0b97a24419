use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

use kconf_util::split::join_conjunction;

use crate::description::{NodeDescription, NodeKind};
use crate::value::Value;

/// Handle to an [`Entry`] owned by a [`ConfigModel`](crate::ConfigModel).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntryId(pub(crate) usize);

impl Display for EntryId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Config,
    Comment,
    Choice,
    Menu,
    MenuConfig,
}

impl EntryKind {
    /// Menu-like entries own an ordered list of children.
    pub fn is_scope(&self) -> bool {
        matches!(self, EntryKind::Menu | EntryKind::MenuConfig)
    }
}

impl From<NodeKind> for EntryKind {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Config => EntryKind::Config,
            NodeKind::Comment => EntryKind::Comment,
            NodeKind::Choice => EntryKind::Choice,
            NodeKind::Menu => EntryKind::Menu,
            NodeKind::MenuConfig => EntryKind::MenuConfig,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolType {
    Bool,
    Tristate,
    String,
    Int,
    Hex,
    /// Anything else the description declared. Kept so that consumers can report it.
    Other(String),
}

impl FromStr for SymbolType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SymbolType::from(s))
    }
}

impl From<&str> for SymbolType {
    fn from(s: &str) -> Self {
        match s {
            "bool" | "boolean" => SymbolType::Bool,
            "tristate" => SymbolType::Tristate,
            "string" => SymbolType::String,
            "int" => SymbolType::Int,
            "hex" => SymbolType::Hex,
            other => SymbolType::Other(other.to_string()),
        }
    }
}

impl Display for SymbolType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SymbolType::Bool => f.write_str("bool"),
            SymbolType::Tristate => f.write_str("tristate"),
            SymbolType::String => f.write_str("string"),
            SymbolType::Int => f.write_str("int"),
            SymbolType::Hex => f.write_str("hex"),
            SymbolType::Other(other) => f.write_str(other),
        }
    }
}

impl SymbolType {
    pub fn is_tristate_like(&self) -> bool {
        matches!(self, SymbolType::Bool | SymbolType::Tristate)
    }

    /// Value of a symbol of this type that has neither an override nor an applicable default.
    pub fn zero_value(&self) -> Option<Value> {
        match self {
            SymbolType::Bool | SymbolType::Tristate | SymbolType::Int | SymbolType::Hex => {
                Some(Value::Number(0))
            }
            SymbolType::String => Some(Value::String(String::new())),
            SymbolType::Other(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Prompt {
    pub text: String,
    /// The prompt is only shown when this evaluates to something other than `n`
    pub condition: Option<String>,
}

/// An expression guarded by an optional `if` condition. Used for defaults (value expression),
/// selects and implies (target symbol name) and ranges (`"<low> <high>"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Conditional {
    pub value: String,
    pub condition: Option<String>,
}

impl Conditional {
    pub fn new<V: Into<String>>(value: V) -> Self {
        Conditional {
            value: value.into(),
            condition: None,
        }
    }

    pub fn new_if<V: Into<String>, C: Into<String>>(value: V, condition: C) -> Self {
        Conditional {
            value: value.into(),
            condition: Some(condition.into()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub file: Option<String>,
    pub line: Option<u32>,
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (&self.file, self.line) {
            (Some(file), Some(line)) => write!(f, "{file}:{line}"),
            (Some(file), None) => f.write_str(file),
            (None, Some(line)) => write!(f, "<unknown>:{line}"),
            (None, None) => f.write_str("<unknown>"),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Entry {
    pub kind: EntryKind,
    pub symbol: Option<String>,
    pub symbol_type: Option<SymbolType>,
    pub prompt: Option<Prompt>,
    pub help: Option<String>,
    pub env: Option<String>,
    pub location: Location,
    /// Dependency clauses in order of discovery; see [`Entry::depends`]
    pub depends_clauses: Vec<String>,
    pub defaults: Vec<Conditional>,
    pub selects: Vec<Conditional>,
    pub implies: Vec<Conditional>,
    pub ranges: Vec<Conditional>,
    /// Explicit value; `None` means the value is computed from `defaults`
    pub value: Option<Value>,
    pub parent: Option<EntryId>,
    pub entries: Vec<EntryId>,
}

impl Entry {
    pub fn new(kind: EntryKind) -> Self {
        Entry {
            kind,
            symbol: None,
            symbol_type: None,
            prompt: None,
            help: None,
            env: None,
            location: Location::default(),
            depends_clauses: vec![],
            defaults: vec![],
            selects: vec![],
            implies: vec![],
            ranges: vec![],
            value: None,
            parent: None,
            entries: vec![],
        }
    }

    pub(crate) fn from_description(node: &NodeDescription, parent: Option<EntryId>) -> Self {
        Entry {
            kind: node.kind.into(),
            symbol: node.symbol.clone(),
            symbol_type: node.symbol_type.as_deref().map(SymbolType::from),
            prompt: node.prompt.clone(),
            help: node.help.clone(),
            env: node.env.clone(),
            location: Location {
                file: node.file.clone(),
                line: node.line,
            },
            depends_clauses: node.depends.clone(),
            defaults: node.defaults.clone(),
            selects: node.selects.clone(),
            implies: node.implies.clone(),
            ranges: node.ranges.clone(),
            value: None,
            parent,
            entries: vec![],
        }
    }

    /// The conjunction of every dependency clause, or `None` when there are none.
    pub fn depends(&self) -> Option<String> {
        let joined = join_conjunction(self.depends_clauses.iter().map(String::as_str));
        (!joined.is_empty()).then_some(joined)
    }

    pub fn has_prompt(&self) -> bool {
        self.prompt.is_some()
    }

    /// Merge a later definition of the same symbol into this one.
    ///
    /// Scalars are first-write-wins, list fields are unioned (skipping identical items) and
    /// dependency clauses accumulate. Children and values are not touched; the tree builder
    /// attaches children to the canonical entry itself.
    pub fn merge(&mut self, other: Entry) {
        fn first_wins<T>(slot: &mut Option<T>, other: Option<T>) {
            if slot.is_none() {
                *slot = other;
            }
        }

        fn union(list: &mut Vec<Conditional>, other: Vec<Conditional>) {
            for item in other {
                if !list.contains(&item) {
                    list.push(item);
                }
            }
        }

        first_wins(&mut self.symbol, other.symbol);
        first_wins(&mut self.symbol_type, other.symbol_type);
        first_wins(&mut self.prompt, other.prompt);
        first_wins(&mut self.help, other.help);
        first_wins(&mut self.env, other.env);
        first_wins(&mut self.location.file, other.location.file);
        first_wins(&mut self.location.line, other.location.line);
        first_wins(&mut self.parent, other.parent);

        self.depends_clauses.extend(other.depends_clauses);
        union(&mut self.defaults, other.defaults);
        union(&mut self.selects, other.selects);
        union(&mut self.implies, other.implies);
        union(&mut self.ranges, other.ranges);
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if let Some(prompt) = &self.prompt {
            write!(f, "\"{}\" ", prompt.text)?;
        }

        let symbol = self.symbol.as_deref().unwrap_or("<none>");
        match &self.symbol_type {
            Some(t) => write!(f, "({symbol}: {t})")?,
            None => write!(f, "({symbol})")?,
        }

        if self.kind == EntryKind::MenuConfig {
            f.write_str(" -->")?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(symbol: &str) -> Entry {
        let mut entry = Entry::new(EntryKind::Config);
        entry.symbol = Some(symbol.into());
        entry
    }

    #[test]
    fn merge_scalars_first_write_wins() {
        let mut first = config("A");
        first.prompt = Some(Prompt {
            text: "first".into(),
            condition: None,
        });

        let mut second = config("A");
        second.prompt = Some(Prompt {
            text: "second".into(),
            condition: None,
        });
        second.help = Some("help from second".into());
        second.symbol_type = Some(SymbolType::Bool);

        first.merge(second);
        assert_eq!(first.prompt.unwrap().text, "first");
        assert_eq!(first.help.as_deref(), Some("help from second"));
        assert_eq!(first.symbol_type, Some(SymbolType::Bool));
    }

    #[test]
    fn merge_lists_skip_duplicates() {
        let mut first = config("A");
        first.selects = vec![Conditional::new("B"), Conditional::new_if("C", "X")];
        first.defaults = vec![Conditional::new("y")];

        let mut second = config("A");
        second.selects = vec![Conditional::new_if("C", "X"), Conditional::new("D")];
        second.defaults = vec![Conditional::new("y"), Conditional::new_if("m", "MODULES")];

        first.merge(second);
        assert_eq!(
            first.selects,
            vec![
                Conditional::new("B"),
                Conditional::new_if("C", "X"),
                Conditional::new("D")
            ]
        );
        assert_eq!(
            first.defaults,
            vec![Conditional::new("y"), Conditional::new_if("m", "MODULES")]
        );
    }

    #[test]
    fn merge_conjoins_depends() {
        let mut first = config("A");
        first.depends_clauses = vec!["X".into()];
        let mut second = config("A");
        second.depends_clauses = vec!["Y".into()];

        first.merge(second);
        assert_eq!(first.depends().as_deref(), Some("X&&Y"));
    }

    #[test]
    fn no_depends() {
        assert_eq!(config("A").depends(), None);
    }

    #[test]
    fn unknown_type_is_kept() {
        assert_eq!(
            "float".parse::<SymbolType>(),
            Ok(SymbolType::Other("float".into()))
        );
        assert_eq!("hex".parse::<SymbolType>(), Ok(SymbolType::Hex));
    }

    #[test]
    fn display() {
        let mut entry = config("NET");
        entry.kind = EntryKind::MenuConfig;
        entry.symbol_type = Some(SymbolType::Bool);
        entry.prompt = Some(Prompt {
            text: "Networking support".into(),
            condition: None,
        });
        assert_eq!(entry.to_string(), "\"Networking support\" (NET: bool) -->");
    }
}
