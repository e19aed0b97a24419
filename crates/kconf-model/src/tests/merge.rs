use pretty_assertions::assert_eq;

use crate::description::NodeDescription;
use crate::entry::{Conditional, SymbolType};
use crate::tests::{build, id};

#[test]
fn redefinitions_conjoin_depends() {
    let d = build(vec![
        NodeDescription::config("A").typed("bool").depends_on("X"),
        NodeDescription::config("A").depends_on("Y"),
    ]);
    let a = id(&d, "A");

    assert_eq!(d.entry(a).depends().as_deref(), Some("X&&Y"));
    assert_eq!(d.children(d.root()), &[a]);
}

#[test]
fn disjunctive_clauses_keep_their_meaning() {
    let mut d = build(vec![
        NodeDescription::config("X").typed("bool"),
        NodeDescription::config("Y").typed("bool"),
        NodeDescription::config("Z").typed("bool"),
        NodeDescription::config("A")
            .typed("bool")
            .prompt("A")
            .depends_on("X || Y"),
        NodeDescription::config("A").depends_on("Z"),
    ]);
    let a = id(&d, "A");
    assert_eq!(d.entry(a).depends().as_deref(), Some("(X || Y)&&Z"));

    d.set_value(id(&d, "X"), "y").unwrap();
    assert!(!d.is_visible(a).unwrap());
    d.set_value(id(&d, "Z"), "y").unwrap();
    assert!(d.is_visible(a).unwrap());
}

#[test]
fn first_definition_wins_for_scalars() {
    let d = build(vec![
        NodeDescription::config("A")
            .prompt("First prompt")
            .at("Kconfig", 3),
        NodeDescription::config("A")
            .typed("tristate")
            .prompt("Second prompt")
            .help("Only the second one has help")
            .at("drivers/Kconfig", 40),
    ]);
    let entry = d.entry(id(&d, "A"));

    assert_eq!(entry.prompt.as_ref().unwrap().text, "First prompt");
    assert_eq!(entry.symbol_type, Some(SymbolType::Tristate));
    assert_eq!(entry.help.as_deref(), Some("Only the second one has help"));
    assert_eq!(entry.location.to_string(), "Kconfig:3");
}

#[test]
fn lists_are_unioned() {
    let d = build(vec![
        NodeDescription::config("B").typed("bool"),
        NodeDescription::config("C").typed("bool"),
        NodeDescription::config("A").typed("bool").select("B").default_value("y"),
        NodeDescription::config("A").select("B").select("C").default_value("y"),
    ]);
    let entry = d.entry(id(&d, "A"));

    assert_eq!(entry.selects, vec![Conditional::new("B"), Conditional::new("C")]);
    assert_eq!(entry.defaults, vec![Conditional::new("y")]);
}

#[test]
fn merged_symbol_is_listed_in_each_scope() {
    let d = build(vec![
        NodeDescription::menu("First").entry(NodeDescription::config("SHARED").typed("bool")),
        NodeDescription::menu("Second").entry(NodeDescription::config("SHARED")),
    ]);
    let root_children = d.children(d.root()).to_vec();
    let [first, second] = root_children.as_slice() else {
        panic!("expected two menus, got {root_children:?}");
    };
    let shared = id(&d, "SHARED");

    assert_eq!(d.children(*first), &[shared]);
    assert_eq!(d.children(*second), &[shared]);
    assert_eq!(d.parent(shared), Some(*first));
}
