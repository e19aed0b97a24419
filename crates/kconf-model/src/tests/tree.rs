use fxhash::FxHashMap;
use pretty_assertions::assert_eq;

use crate::description::{NodeDescription, NodeKind};
use crate::entry::EntryKind;
use crate::errors::BuildError;
use crate::model::ConfigModel;
use crate::options::ModelOptionsBuilder;
use crate::tests::{build, build_with, id};
use crate::value::Value;

#[test_log::test]
fn menuconfig_absorbs_dependent_siblings() {
    let d = build(vec![
        NodeDescription::menuconfig("M").typed("bool").prompt("M"),
        NodeDescription::config("A").typed("bool").depends_on("M"),
        NodeDescription::config("B")
            .typed("bool")
            .depends_on("A")
            .depends_on("M"),
        NodeDescription::config("C").typed("bool"),
    ]);
    let m = id(&d, "M");

    assert_eq!(d.children(m), &[id(&d, "A"), id(&d, "B")]);
    assert_eq!(d.children(d.root()), &[m, id(&d, "C")]);
    assert_eq!(d.parent(id(&d, "A")), Some(m));
    assert_eq!(d.parent(m), Some(d.root()));
}

#[test_log::test]
fn grouping_stops_at_first_unrelated_sibling() {
    let d = build(vec![
        NodeDescription::menuconfig("M").typed("bool"),
        NodeDescription::config("A").depends_on("M"),
        NodeDescription::config("B"),
        NodeDescription::config("C").depends_on("M"),
    ]);
    let m = id(&d, "M");

    assert_eq!(d.children(m), &[id(&d, "A")]);
    assert_eq!(
        d.children(d.root()),
        &[m, id(&d, "B"), id(&d, "C")]
    );
}

#[test_log::test]
fn token_match_not_substring() {
    let d = build(vec![
        NodeDescription::menuconfig("NET").typed("bool"),
        NodeDescription::config("NETDEVICES").depends_on("NETDEVICES_MULTIQUEUE"),
    ]);
    assert!(d.children(id(&d, "NET")).is_empty());
}

#[test_log::test]
fn negated_dependency_is_not_absorbed() {
    let d = build(vec![
        NodeDescription::menuconfig("M").typed("bool"),
        NodeDescription::config("LEGACY").depends_on("!M"),
    ]);
    let m = id(&d, "M");

    assert!(d.children(m).is_empty());
    assert_eq!(d.children(d.root()), &[m, id(&d, "LEGACY")]);
}

#[test_log::test]
fn compound_clause_is_not_absorbed() {
    let d = build(vec![
        NodeDescription::menuconfig("M").typed("bool"),
        NodeDescription::config("A").depends_on("M"),
        NodeDescription::config("B").depends_on("M && X"),
        NodeDescription::config("C").depends_on(" M "),
    ]);
    let m = id(&d, "M");

    assert_eq!(d.children(m), &[id(&d, "A")]);
    assert_eq!(
        d.children(d.root()),
        &[m, id(&d, "B"), id(&d, "C")]
    );
    // B still depends on M for visibility purposes
    assert_eq!(d.dependents("M"), vec![id(&d, "A"), id(&d, "B"), id(&d, "C")]);
}

#[test_log::test]
fn nested_menuconfig_is_absorbed_as_a_unit() {
    let d = build(vec![
        NodeDescription::menuconfig("NET").typed("bool"),
        NodeDescription::menuconfig("WLAN").typed("bool").depends_on("NET"),
        NodeDescription::config("WLAN_VENDOR").depends_on("WLAN"),
        NodeDescription::config("ATH").depends_on("NET").depends_on("WLAN"),
        NodeDescription::config("INET").depends_on("NET"),
        NodeDescription::config("CRYPTO"),
    ]);
    let net = id(&d, "NET");
    let wlan = id(&d, "WLAN");

    assert_eq!(d.children(wlan), &[id(&d, "WLAN_VENDOR"), id(&d, "ATH")]);
    assert_eq!(d.children(net), &[wlan, id(&d, "INET")]);
    assert_eq!(d.children(d.root()), &[net, id(&d, "CRYPTO")]);
}

#[test_log::test]
fn menus_use_explicit_entries() {
    let d = build(vec![
        NodeDescription::menu("Drivers").entries([
            NodeDescription::menuconfig("USB").typed("tristate"),
            NodeDescription::config("USB_STORAGE").depends_on("USB"),
            NodeDescription::comment("End of USB"),
        ]),
        NodeDescription::choice().prompt("Compression"),
    ]);
    let root_children = d.children(d.root()).to_vec();
    assert_eq!(root_children.len(), 2);
    let drivers = root_children[0];
    let usb = id(&d, "USB");

    assert_eq!(d.entry(drivers).kind, EntryKind::Menu);
    assert_eq!(d.entry(root_children[1]).kind, EntryKind::Choice);
    assert_eq!(d.children(drivers).len(), 2);
    assert_eq!(d.children(drivers)[0], usb);
    assert_eq!(d.entry(d.children(drivers)[1]).kind, EntryKind::Comment);
    assert_eq!(d.children(usb), &[id(&d, "USB_STORAGE")]);
}

#[test_log::test]
fn redefining_own_symbol_does_not_self_attach() {
    let d = build(vec![
        NodeDescription::menuconfig("M").typed("bool"),
        NodeDescription::config("M").depends_on("M"),
    ]);
    let m = id(&d, "M");
    assert!(d.children(m).is_empty());
    assert_eq!(d.children(d.root()), &[m]);
}

#[test]
fn root_must_be_a_menu() {
    let err = ConfigModel::from_description(
        &NodeDescription::config("A"),
        Default::default(),
    )
    .unwrap_err();
    assert_eq!(
        err.downcast_ref::<BuildError>(),
        Some(&BuildError::RootNotMenu(NodeKind::Config))
    );
}

#[test_log::test]
fn env_seeds_value() {
    let mut env = FxHashMap::default();
    env.insert("ARCH".to_string(), "riscv".to_string());
    let options = ModelOptionsBuilder::default().env(env).build().unwrap();
    let d = build_with(
        vec![
            NodeDescription::config("SRCARCH").typed("string").env("ARCH"),
            NodeDescription::config("KERNELVERSION").typed("string").env("KERNELVERSION"),
        ],
        options,
    );

    assert_eq!(d.value(id(&d, "SRCARCH")).unwrap(), Some(Value::from("riscv")));
    assert_eq!(d.value(id(&d, "KERNELVERSION")).unwrap(), Some(Value::from("")));
}
