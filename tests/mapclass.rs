use std::collections::HashMap;

use sdt::prelude::*;

fn species_definition() -> MapClassDefinition {
    let mut defn = MapClassDefinition::new("species");
    defn.add_item("common", "Common Name", Some("Common"));
    defn.add_item("genus", "Genus", None);
    defn.add_item("species", "Species", None);
    defn
}

#[test]
fn basic_map_class() {
    let defn = species_definition();

    // A few different ways to populate a record:
    let mut atlas = defn.instance();
    atlas.set("common", Sdt::from("Atlas moth")).unwrap();
    atlas.set("genus", Sdt::from("Attacus")).unwrap();
    atlas.set("species", Sdt::from("atlas")).unwrap();

    let mut gypsy = defn.instance();
    gypsy
        .update(vec![
            ("common".to_string(), Sdt::from("Gypsy moth")),
            ("species".to_string(), Sdt::from("dispar")),
            ("genus".to_string(), Sdt::from("Lymantria")),
        ])
        .unwrap();

    // Make a definition from a record and use it again:
    let defn2 = atlas.definition();
    assert_eq!(defn.keys(), defn2.keys());

    let mut peppered = defn2.instance();
    peppered.set("common", Sdt::from("Peppered moth")).unwrap();
    peppered.set("genus", Sdt::from("Biston")).unwrap();
    peppered.set("species", Sdt::from("betularia")).unwrap();

    // Invalid modifications:
    assert_eq!(
        atlas.set("name", Sdt::from("Mothra")),
        Err(MapClassError::UnknownKey {
            key: "name".to_string(),
            class: "species".to_string(),
        })
    );
    assert_eq!(
        atlas.update(vec![("name".to_string(), Sdt::from("Mothra"))]),
        Err(MapClassError::UnknownKey {
            key: "name".to_string(),
            class: "species".to_string(),
        })
    );
    assert_eq!(
        atlas.remove("common"),
        Err(MapClassError::UnsupportedOperation("remove"))
    );
    assert_eq!(
        atlas.pop("common"),
        Err(MapClassError::UnsupportedOperation("pop"))
    );
    assert_eq!(
        atlas.clear(),
        Err(MapClassError::UnsupportedOperation("clear"))
    );
    // A failed mutation leaves the record intact.
    assert_eq!(atlas.get("common"), Some(&Sdt::from("Atlas moth")));
    assert_eq!(atlas.len(), 3);

    // Key ordering is the definition's, stable across repeated calls:
    let keys = ["common", "genus", "species"];
    for moth in &[&atlas, &gypsy, &peppered] {
        let got: Vec<&str> = moth.keys().map(|k| k.as_str()).collect();
        assert_eq!(got, keys);
        let again: Vec<&str> = moth.keys().map(|k| k.as_str()).collect();
        assert_eq!(again, keys);
    }

    // Value ordering follows key ordering:
    let values: Vec<&Sdt> = gypsy.values().collect();
    assert_eq!(
        values,
        [
            &Sdt::from("Gypsy moth"),
            &Sdt::from("Lymantria"),
            &Sdt::from("dispar"),
        ]
    );

    // Item ordering, via borrowing and consuming iteration:
    let items: Vec<(&String, &Sdt)> = gypsy.iter().collect();
    assert_eq!(items[0].0, "common");
    assert_eq!(items[2].1, &Sdt::from("dispar"));

    let consumed: Vec<(String, Sdt)> = gypsy.clone().into_iter().collect();
    assert_eq!(consumed[0], ("common".to_string(), Sdt::from("Gypsy moth")));
    assert_eq!(consumed[1], ("genus".to_string(), Sdt::from("Lymantria")));
    assert_eq!(consumed[2], ("species".to_string(), Sdt::from("dispar")));

    // Long and short display names:
    for moth in &[&atlas, &gypsy, &peppered] {
        assert_eq!(moth.display_name("common"), "Common Name");
        assert_eq!(moth.display_name("genus"), "Genus");
        assert_eq!(moth.display_name("species"), "Species");

        assert_eq!(moth.display_short_name("common"), Some("Common"));
        assert_eq!(moth.display_short_name("genus"), None);
        assert_eq!(moth.display_short_name("species"), None);
    }
}

#[test]
fn instances_snapshot_the_definition() {
    let mut defn = MapClassDefinition::new("definition");
    defn.add_item("key1", "Display Name", Some("Short Name"));
    defn.add_item("key2", "Display Name 2", None);

    let mc1 = defn.instance();

    defn.add_item("key3", "Display Name 3", None);

    let mc2 = defn.instance();

    // Records keep the keys their definition had when they were stamped:
    let keys1: Vec<&str> = mc1.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys1, ["key1", "key2"]);
    let keys2: Vec<&str> = mc2.keys().map(|k| k.as_str()).collect();
    assert_eq!(keys2, ["key1", "key2", "key3"]);

    // Definitions rebuilt from records reflect the same snapshots:
    let def1 = mc1.definition();
    assert_eq!(def1.name(), "definition");
    assert_eq!(def1.keys(), ["key1", "key2"]);
    assert_eq!(def1.display_name("key1"), "Display Name");
    assert_eq!(def1.display_name("key2"), "Display Name 2");
    assert_eq!(def1.display_short_name("key1"), Some("Short Name"));
    assert_eq!(def1.display_short_name("key2"), None);

    let def2 = mc2.definition();
    assert_eq!(def2.keys(), ["key1", "key2", "key3"]);
    assert_eq!(def2.display_name("key3"), "Display Name 3");
    assert_eq!(def2.display_short_name("key3"), None);
}

#[test]
fn records_seed_null() {
    let record = species_definition().instance();
    assert_eq!(record.get("common"), Some(&Sdt::Null));
    assert_eq!(record.get("nope"), None);
    assert!(record.contains_key("genus"));
    assert!(!record.contains_key("nope"));
}

#[test]
fn equality_ignores_class_and_order() {
    let mut a = species_definition().instance();
    a.set("common", Sdt::from("Atlas moth")).unwrap();

    // Same values under a differently named and ordered definition:
    let mut other_defn = MapClassDefinition::new("something else");
    other_defn.add_item("species", "S", None);
    other_defn.add_item("genus", "G", None);
    other_defn.add_item("common", "C", None);
    let mut b = other_defn.instance();
    b.set("common", Sdt::from("Atlas moth")).unwrap();

    assert_eq!(a, b);

    // And equal to the plain map with the same contents:
    let mut plain = HashMap::new();
    plain.insert("common".to_string(), Sdt::from("Atlas moth"));
    plain.insert("genus".to_string(), Sdt::Null);
    plain.insert("species".to_string(), Sdt::Null);
    assert_eq!(a, plain);

    b.set("genus", Sdt::from("Attacus")).unwrap();
    assert_ne!(a, b);
}

#[test]
fn display_follows_definition_order() {
    let mut record = species_definition().instance();
    record.set("common", Sdt::from("Atlas moth")).unwrap();

    assert_eq!(
        format!("{}", record),
        "{\"common\": \"Atlas moth\", \"genus\": NULL, \"species\": NULL}"
    );
}

#[test]
#[should_panic(expected = "is not in map class")]
fn display_name_for_unknown_key_panics() {
    let record = species_definition().instance();
    record.display_name("wingspan");
}

#[test]
fn registry_lookup() {
    let mut registry = ClassRegistry::new();
    assert!(registry.is_empty());

    registry.insert(species_definition());
    assert_eq!(registry.len(), 1);
    assert!(registry.get("species").is_some());
    assert!(registry.get("genus").is_none());

    // Reinserting a name replaces the definition.
    let mut newer = MapClassDefinition::new("species");
    newer.add_item("only", "Only", None);
    registry.insert(newer);
    assert_eq!(registry.len(), 1);
    assert_eq!(registry.get("species").unwrap().keys(), ["only"]);
}
