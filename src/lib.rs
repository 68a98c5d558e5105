//! # SDT
//!
//! SDT (Structured Data Text) is the self-describing, length-prefixed text
//! marshalling format that test-automation services use to hand structured
//! results back to their callers as a single string. This crate is the
//! receiving half: it decodes marshalled text into an [`Sdt`] value tree and
//! leaves anything that was never marshalled alone.
//!
//! # Usage
//!
//! The entry point is [`unmarshal`](unmarshal::unmarshal); it never fails,
//! because input without the `@SDT/` marker is simply plain text and comes
//! back unchanged.
//!
//! ```
//! use sdt::prelude::*;
//!
//! let value = unmarshal("@SDT/[3:32:@SDT/$S:1:a@SDT/$S:1:b@SDT/$0:0:", UnmarshalMode::default());
//!
//! assert_eq!(
//!     value,
//!     Sdt::from(vec![Sdt::from("a"), Sdt::from("b"), Sdt::Null]),
//! );
//!
//! let passthrough = unmarshal("ordinary result text", UnmarshalMode::default());
//! assert_eq!(passthrough, Sdt::from("ordinary result text"));
//! ```
//!
//! Callers that must distinguish corrupt marshalled data from text use
//! [`unmarshal_strict`](unmarshal::unmarshal_strict), which reports a typed
//! [`UnmarshalError`](errors::UnmarshalError) instead of falling back.
//!
//! # An overview of SDT values
//!
//! A decoded value is one of five kinds:
//!
//! * [`Sdt::Null`] — the none value;
//! * [`Sdt::Text`] — a string scalar;
//! * [`Sdt::List`] — an ordered sequence of values;
//! * [`Sdt::Map`] — a string-keyed mapping with no meaningful order;
//! * [`Sdt::Class`] — a [`MapClass`] record: a mapping whose key set and
//!   iteration order come from a named [map class
//!   definition](mapclass::MapClassDefinition) declared in the enclosing
//!   context block.
//!
//! # Specification
//!
//! This section describes the wire format. Lengths throughout count
//! **characters** of the decoded text, not bytes.
//!
//! ## Marker and type symbols
//!
//! Every marshalled value starts with the five characters `@SDT/` followed
//! by one type symbol:
//!
//! | Symbol | Kind                |
//! | ---    | ---                 |
//! | `$`    | scalar (none, text) |
//! | `{`    | map                 |
//! | `[`    | list                |
//! | `%`    | map class instance  |
//! | `*`    | context             |
//!
//! ## Framing
//!
//! The universal framing primitive is the colon-length-colon object:
//! `:<decimal length>:<exactly that many characters>`. Composite values
//! frame their whole payload first, so every sub-parse knows exactly where
//! it must end; both leftover and missing characters are errors.
//!
//! ## Scalars
//!
//! `$0<framed empty>` is the none value. `$S<framed text>` is a text
//! scalar; in recursive mode the text itself is re-unmarshalled, since
//! services sometimes nest marshalled data inside string fields.
//!
//! ## Maps
//!
//! `{<framed items>` where the items are a run of framed key / marshalled
//! value pairs, repeated until the frame is exhausted. There is no declared
//! pair count and duplicate keys overwrite.
//!
//! ## Lists
//!
//! `[<decimal count><framed items>` with no separator between the count and
//! the frame's colon. Exactly `count` marshalled values are read from the
//! frame, which must then be exhausted.
//!
//! ## Map class instances
//!
//! `%<framed content>` where the content is a framed class name followed by
//! one marshalled value per key of the named class, in definition order —
//! position implies identity, so the wire carries no per-field keys. The
//! class must have been declared by the enclosing context block.
//!
//! ## Contexts
//!
//! `*<framed content>` where the content is a marshalled map followed by
//! the marshalled root value. The map's reserved `map-class-map` key holds
//! a map from class name to definition; each definition's `keys` entry
//! lists field descriptors (`key`, `display-name`, optional
//! `display-short-name`) in definition order. The definitions are visible
//! only while the root value is decoded, and the context evaluates to the
//! root value itself.

#![warn(
//    missing_docs,
    deprecated_in_future,
    unsafe_code,
    unused_labels,
    keyword_idents,
    missing_copy_implementations,
    missing_debug_implementations,
    macro_use_extern_crate,
    unreachable_pub,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]

pub mod errors;
pub mod mapclass;
pub mod prelude;
pub mod retcode;
pub mod unmarshal;

use std::collections::HashMap;

use failure::*;

use crate::mapclass::MapClass;

#[derive(Clone, Debug)]
/// [`Sdt`] and its variants: the tree a marshalled string decodes to.
///
/// # Example
///
/// ```
/// use sdt::prelude::*;
///
/// let greeting = Sdt::from("hello");
///
/// let text = match greeting {
///     Sdt::Text(t) => t,
///     _ => panic!(),
/// };
///
/// assert_eq!(text, "hello");
/// ```
pub enum Sdt {
    /// The none value.
    ///
    /// # Example
    ///
    /// ```
    /// use sdt::prelude::*;
    ///
    /// let nothing = Sdt::Null;
    ///
    /// assert!(nothing.is_null());
    /// ```
    Null,
    /// A text scalar.
    ///
    /// # Example
    ///
    /// ```
    /// use sdt::prelude::*;
    ///
    /// let text = Sdt::Text("a result".to_string());
    /// ```
    Text(String),
    /// A list of values.
    ///
    /// # Example
    ///
    /// ```
    /// use sdt::prelude::*;
    ///
    /// let list = Sdt::List(vec![Sdt::Null, Sdt::from("x")]);
    /// ```
    List(Vec<Sdt>),
    /// A mapping from text keys to values. Entry order carries no meaning.
    ///
    /// # Example
    ///
    /// ```
    /// use std::collections::HashMap;
    /// use sdt::prelude::*;
    ///
    /// let mut entries = HashMap::new();
    /// entries.insert("rc".to_string(), Sdt::from("0"));
    ///
    /// let map = Sdt::Map(entries);
    /// ```
    Map(HashMap<String, Sdt>),
    /// A map class record, ordered and keyed by its definition.
    Class(MapClass),
}

use Sdt::*;

impl Sdt {
    /// Indicates whether the value is [`Null`].
    ///
    /// # Example
    ///
    /// ```
    /// use sdt::Sdt::Null;
    ///
    /// assert!(Null.is_null());
    /// ```
    pub fn is_null(&self) -> bool {
        match self {
            Null => true,
            _ => false,
        }
    }

    /// Borrows the value as text.
    /// This will return an [`Error`] if the value is not [`Sdt::Text`].
    ///
    /// # Example
    ///
    /// ```
    /// use sdt::prelude::*;
    ///
    /// let value = Sdt::from("foo");
    ///
    /// assert_eq!(value.to_text().unwrap(), "foo");
    /// ```
    pub fn to_text(&self) -> Result<&str, Error> {
        match self {
            Text(t) => Ok(t),
            _ => bail!("This value is not `Text`"),
        }
    }

    /// Consumes the value, converting it into a [`String`].
    /// This will return an [`Error`] if the value is not [`Sdt::Text`].
    pub fn into_text(self) -> Result<String, Error> {
        match self {
            Text(t) => Ok(t),
            _ => bail!("This value is not `Text`"),
        }
    }

    /// Borrows the value as a vector of values.
    /// This will return an [`Error`] if the value is not an [`Sdt::List`].
    ///
    /// # Example
    ///
    /// ```
    /// use sdt::prelude::*;
    ///
    /// let value = Sdt::from(vec!["a", "b"]);
    ///
    /// assert_eq!(value.to_list().unwrap().len(), 2);
    /// ```
    pub fn to_list(&self) -> Result<&Vec<Sdt>, Error> {
        match self {
            List(l) => Ok(l),
            _ => bail!("This value is not a `List`"),
        }
    }

    /// Consumes the value, converting it into a vector of values.
    /// This will return an [`Error`] if the value is not an [`Sdt::List`].
    pub fn into_list(self) -> Result<Vec<Sdt>, Error> {
        match self {
            List(l) => Ok(l),
            _ => bail!("This value is not a `List`"),
        }
    }

    /// Borrows the value as a map.
    /// This will return an [`Error`] if the value is not an [`Sdt::Map`].
    pub fn to_map(&self) -> Result<&HashMap<String, Sdt>, Error> {
        match self {
            Map(m) => Ok(m),
            _ => bail!("This value is not a `Map`"),
        }
    }

    /// Consumes the value, converting it into a [`HashMap`].
    /// This will return an [`Error`] if the value is not an [`Sdt::Map`].
    pub fn into_map(self) -> Result<HashMap<String, Sdt>, Error> {
        match self {
            Map(m) => Ok(m),
            _ => bail!("This value is not a `Map`"),
        }
    }

    /// Borrows the value as a map class record.
    /// This will return an [`Error`] if the value is not an [`Sdt::Class`].
    pub fn to_class(&self) -> Result<&MapClass, Error> {
        match self {
            Class(c) => Ok(c),
            _ => bail!("This value is not a `Class`"),
        }
    }

    /// Consumes the value, converting it into a [`MapClass`].
    /// This will return an [`Error`] if the value is not an [`Sdt::Class`].
    ///
    /// # Example
    ///
    /// ```
    /// use sdt::prelude::*;
    ///
    /// let mut defn = MapClassDefinition::new("pair");
    /// defn.add_item("left", "Left", None);
    ///
    /// let value = Sdt::from(defn.instance());
    ///
    /// let record = value.into_class().unwrap();
    /// assert_eq!(record.class_name(), "pair");
    /// ```
    pub fn into_class(self) -> Result<MapClass, Error> {
        match self {
            Class(c) => Ok(c),
            _ => bail!("This value is not a `Class`"),
        }
    }
}

/// Values compare structurally, with one deliberate exception: a
/// [`Class`] compares as the plain key-to-value mapping it holds, both
/// against other records and against [`Map`] values. Decoded records are
/// meant to be checked against ordinary maps without ceremony.
impl PartialEq for Sdt {
    fn eq(&self, other: &Sdt) -> bool {
        match (self, other) {
            (Null, Null) => true,
            (Text(a), Text(b)) => a == b,
            (List(a), List(b)) => a == b,
            (Map(a), Map(b)) => a == b,
            (Class(a), Class(b)) => a == b,
            (Map(a), Class(b)) | (Class(b), Map(a)) => b == a,
            _ => false,
        }
    }
}

impl Eq for Sdt {}

// TODO make the display nicer for deeply nested structures
impl std::fmt::Display for Sdt {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Null => write!(f, "NULL"),
            Text(t) => write!(f, "{:?}", t),
            List(l) => {
                write!(f, "[")?;
                for (i, value) in l.iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
            Map(m) => {
                // Sorted so the output is stable; entry order means nothing.
                let mut keys: Vec<&String> = m.keys().collect();
                keys.sort();
                write!(f, "{{")?;
                for (i, key) in keys.into_iter().enumerate() {
                    if i != 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{:?}: {}", key, m[key])?;
                }
                write!(f, "}}")
            }
            Class(c) => write!(f, "{}", c),
        }
    }
}

impl From<&str> for Sdt {
    fn from(s: &str) -> Sdt { Text(s.to_string()) }
}

impl From<String> for Sdt {
    fn from(s: String) -> Sdt { Text(s) }
}

impl From<()> for Sdt {
    fn from(_: ()) -> Sdt { Null }
}

impl<T: Into<Sdt>> From<Option<T>> for Sdt {
    fn from(opt: Option<T>) -> Sdt {
        match opt {
            Some(value) => value.into(),
            None => Null,
        }
    }
}

impl<T: Into<Sdt>> From<Vec<T>> for Sdt {
    fn from(v: Vec<T>) -> Sdt { List(v.into_iter().map(T::into).collect()) }
}

impl<V: Into<Sdt>> From<HashMap<String, V>> for Sdt {
    fn from(m: HashMap<String, V>) -> Sdt {
        Map(m.into_iter().map(|(k, v)| (k, v.into())).collect())
    }
}

impl From<MapClass> for Sdt {
    fn from(c: MapClass) -> Sdt { Class(c) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trivial_tests() {
        assert!(Null.is_null());
        assert!(!Sdt::from("").is_null());

        assert_eq!(Sdt::from("word").to_text().unwrap(), "word");
        assert!(Sdt::from("word").to_list().is_err());
        assert!(Null.to_text().is_err());
    }

    #[test]
    fn from_vec() {
        let value = Sdt::from(vec!["a", "b"]);
        assert_eq!(
            value.into_list().unwrap(),
            vec![Sdt::from("a"), Sdt::from("b")]
        );
    }

    #[test]
    fn from_option() {
        assert_eq!(Sdt::from(None::<String>), Null);
        assert_eq!(Sdt::from(Some("x")), Sdt::from("x"));
    }

    #[test]
    fn class_compares_as_plain_map() {
        use crate::mapclass::MapClassDefinition;

        let mut defn = MapClassDefinition::new("pair");
        defn.add_item("left", "Left", None);
        defn.add_item("right", "Right", None);

        let mut record = defn.instance();
        record.set("left", Sdt::from("a")).unwrap();
        record.set("right", Sdt::from("b")).unwrap();

        let mut plain = HashMap::new();
        plain.insert("left".to_string(), Sdt::from("a"));
        plain.insert("right".to_string(), Sdt::from("b"));

        assert_eq!(Sdt::Class(record.clone()), Sdt::Map(plain.clone()));
        assert_eq!(Sdt::Map(plain), Sdt::Class(record));
    }

    #[test]
    fn display_is_ordered() {
        let value = Sdt::from(vec![Sdt::Null, Sdt::from("x")]);
        assert_eq!(format!("{}", value), "[NULL, \"x\"]");
    }
}
