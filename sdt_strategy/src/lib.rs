//! Proptest strategies for exercising the SDT unmarshaller.
//!
//! Wire samples are generated here, alongside the trees they decode to, so
//! the property suites can check the decoder against inputs no one wrote by
//! hand. The library itself stays decode-only; this crate is test support.

use proptest::prelude::*;
use sdt::{prelude::*, unmarshal::MARKER};

/// arbitrary text that can never be mistaken for marshalled data
pub fn arb_plain_text() -> impl Strategy<Value = String> {
    ".*".prop_filter("text must not start with the marker", |s| {
        !s.starts_with(MARKER)
    })
}

/// arbitrary SDT tree of scalars, lists, and maps
///
/// Leaf text is kept marker-free so the tree survives recursive
/// unmarshalling unchanged. Map class records are left out: they only
/// decode inside a context block, which the unit suites cover with
/// hand-written wire data.
pub fn arb_sdt() -> impl Strategy<Value = Sdt> {
    let leaf = prop_oneof![
        Just(Sdt::Null),
        arb_plain_text().prop_map(Sdt::from),
    ];
    leaf.prop_recursive(
        6,  // max depth
        64, // max nodes
        8,  // max items per collection
        |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..8).prop_map(Sdt::from),
                prop::collection::hash_map(".*", inner, 0..8).prop_map(Sdt::Map),
            ]
        },
    )
}

/// arbitrary (tree, wire encoding) pairs for decode properties
pub fn arb_marshalled() -> impl Strategy<Value = (Sdt, String)> {
    arb_sdt().prop_map(|value| {
        let wire = marshal(&value);
        (value, wire)
    })
}

/// Writes the wire encoding of `value`.
///
/// A map class record encodes like the real format does (framed class name,
/// then the field values in definition order), but decoding one back needs
/// an enclosing context block declaring the class.
pub fn marshal(value: &Sdt) -> String {
    match value {
        Sdt::Null => format!("{}$0:0:", MARKER),
        Sdt::Text(text) => format!("{}$S{}", MARKER, framed(text)),
        Sdt::List(items) => {
            let content: String = items.iter().map(marshal).collect();
            format!("{}[{}{}", MARKER, items.len(), framed(&content))
        }
        Sdt::Map(entries) => {
            let mut content = String::new();
            for (key, value) in entries {
                content.push_str(&framed(key));
                content.push_str(&marshal(value));
            }
            format!("{}{{{}", MARKER, framed(&content))
        }
        Sdt::Class(record) => {
            let mut content = framed(record.class_name());
            for (_, value) in record.iter() {
                content.push_str(&marshal(value));
            }
            format!("{}%{}", MARKER, framed(&content))
        }
    }
}

/// Wraps `content` in colon-length-colon framing. The length counts
/// characters, not bytes.
pub fn framed(content: &str) -> String {
    format!(":{}:{}", content.chars().count(), content)
}
