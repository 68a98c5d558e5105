//! Map classes: named record schemas and the ordered records bound to them.
//!
//! A [`MapClassDefinition`] names an ordered list of keys and carries a
//! display name (and optionally a short display name) for each key. A
//! [`MapClass`] is a record built from such a definition: it can be read
//! like a map, but its key set is fixed to the definition's keys and it
//! always iterates in definition order. A [`ClassRegistry`] collects the
//! definitions declared by one context block while it is being decoded.
//!
//! # Example
//!
//! ```
//! use sdt::prelude::*;
//!
//! let mut defn = MapClassDefinition::new("species");
//! defn.add_item("common", "Common Name", Some("Common"));
//! defn.add_item("genus", "Genus", None);
//! defn.add_item("species", "Species", None);
//!
//! let mut moth = defn.instance();
//! moth.set("common", Sdt::from("Atlas moth")).unwrap();
//! moth.set("genus", Sdt::from("Attacus")).unwrap();
//! moth.set("species", Sdt::from("atlas")).unwrap();
//!
//! // Reads like a map, iterates in definition order.
//! let keys: Vec<&str> = moth.keys().map(|k| k.as_str()).collect();
//! assert_eq!(keys, ["common", "genus", "species"]);
//!
//! // The key set is fixed: nothing outside the definition goes in.
//! assert!(moth.set("wingspan", Sdt::Null).is_err());
//! ```

use std::{collections::HashMap, fmt, slice::Iter, sync::Arc};

use crate::{errors::MapClassError, Sdt};

static NULL: Sdt = Sdt::Null;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
/// A map class definition: the ordered key names of a record type, with a
/// display name and an optional short display name per key.
///
/// Definitions are built once with [`new`](MapClassDefinition::new) and
/// [`add_item`](MapClassDefinition::add_item), then stamped into records
/// with [`instance`](MapClassDefinition::instance). Each record snapshots
/// the definition as it was at that moment; items added afterwards only
/// show up in records created afterwards.
pub struct MapClassDefinition {
    name: String,
    keys: Vec<String>,
    names: HashMap<String, (String, Option<String>)>,
}

impl MapClassDefinition {
    /// Creates an empty definition for the class called `name`.
    ///
    /// # Example
    ///
    /// ```
    /// use sdt::prelude::*;
    ///
    /// let defn = MapClassDefinition::new("endpoint");
    ///
    /// assert_eq!(defn.name(), "endpoint");
    /// assert!(defn.keys().is_empty());
    /// ```
    pub fn new(name: &str) -> Self {
        MapClassDefinition {
            name: name.to_string(),
            keys: Vec::new(),
            names: HashMap::new(),
        }
    }

    /// Appends a key with its display name and, optionally, a short display
    /// name. Keys keep the order they were added in; that order becomes the
    /// iteration order of every record stamped from this definition.
    pub fn add_item(&mut self, key: &str, display_name: &str, display_short_name: Option<&str>) {
        self.keys.push(key.to_string());
        self.names.insert(
            key.to_string(),
            (
                display_name.to_string(),
                display_short_name.map(str::to_string),
            ),
        );
    }

    /// Returns the class name.
    pub fn name(&self) -> &str { &self.name }

    /// Returns the keys in definition order.
    pub fn keys(&self) -> &[String] { &self.keys }

    /// Returns the display name for `key`.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not part of the definition. Asking for the display
    /// name of a key that was never added is a bug in the caller, not a
    /// property of the data.
    pub fn display_name(&self, key: &str) -> &str {
        match self.names.get(key) {
            Some((name, _)) => name,
            None => panic!("key {:?} is not in map class {:?}", key, self.name),
        }
    }

    /// Returns the short display name for `key`, or `None` if the key has no
    /// short name.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not part of the definition, like
    /// [`display_name`](MapClassDefinition::display_name).
    pub fn display_short_name(&self, key: &str) -> Option<&str> {
        match self.names.get(key) {
            Some((_, short)) => short.as_ref().map(String::as_str),
            None => panic!("key {:?} is not in map class {:?}", key, self.name),
        }
    }

    /// Creates a [`MapClass`] record from a snapshot of this definition,
    /// with every key set to [`Sdt::Null`].
    ///
    /// # Example
    ///
    /// ```
    /// use sdt::prelude::*;
    ///
    /// let mut defn = MapClassDefinition::new("pair");
    /// defn.add_item("left", "Left", None);
    /// defn.add_item("right", "Right", None);
    ///
    /// let record = defn.instance();
    ///
    /// assert_eq!(record.len(), 2);
    /// assert_eq!(record.get("left"), Some(&Sdt::Null));
    /// ```
    pub fn instance(&self) -> MapClass { MapClass::new(Arc::new(self.clone())) }
}

#[derive(Clone, Debug)]
/// A map class record: a value per definition key, readable like a map.
///
/// Records deviate from a plain map in exactly two ways, both inherited
/// from their definition:
///
/// * the key set is fixed — [`set`](MapClass::set) refuses keys outside the
///   definition, and [`remove`](MapClass::remove), [`pop`](MapClass::pop)
///   and [`clear`](MapClass::clear) always fail;
/// * iteration follows definition order, never insertion order.
///
/// Equality ignores both deviations and compares records as plain
/// key-to-value mappings.
pub struct MapClass {
    definition: Arc<MapClassDefinition>,
    values: HashMap<String, Sdt>,
}

impl MapClass {
    /// Creates a record bound to `definition`, with every key set to
    /// [`Sdt::Null`].
    ///
    /// This is mostly for the decoder's benefit; build a definition and call
    /// [`MapClassDefinition::instance`] instead.
    pub fn new(definition: Arc<MapClassDefinition>) -> Self {
        let values = definition
            .keys
            .iter()
            .map(|k| (k.clone(), Sdt::Null))
            .collect();
        MapClass { definition, values }
    }

    /// Builds a record from values already known to be in definition key
    /// order, as produced by decoding a map class instance off the wire.
    pub(crate) fn with_values(definition: Arc<MapClassDefinition>, values: Vec<Sdt>) -> Self {
        let values = definition
            .keys
            .iter()
            .cloned()
            .zip(values.into_iter())
            .collect();
        MapClass { definition, values }
    }

    /// Returns the name of the class this record was stamped from.
    pub fn class_name(&self) -> &str { &self.definition.name }

    /// Returns a standalone copy of the definition this record was stamped
    /// from.
    pub fn definition(&self) -> MapClassDefinition { (*self.definition).clone() }

    /// Returns the number of keys. Always equal to the definition's key
    /// count.
    pub fn len(&self) -> usize { self.definition.keys.len() }

    /// Indicates whether the record has no keys, which happens exactly when
    /// its definition has none.
    pub fn is_empty(&self) -> bool { self.definition.keys.is_empty() }

    /// Indicates whether `key` is part of the record.
    pub fn contains_key(&self, key: &str) -> bool { self.values.contains_key(key) }

    /// Returns the value for `key`, or `None` if the key is not part of the
    /// definition.
    pub fn get(&self, key: &str) -> Option<&Sdt> { self.values.get(key) }

    /// Sets the value for `key`.
    ///
    /// # Errors
    ///
    /// Fails with [`MapClassError::UnknownKey`] if `key` is not part of the
    /// definition; the record is left unchanged.
    pub fn set(&mut self, key: &str, value: Sdt) -> Result<(), MapClassError> {
        match self.values.get_mut(key) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => {
                Err(MapClassError::UnknownKey {
                    key: key.to_string(),
                    class: self.definition.name.clone(),
                })
            }
        }
    }

    /// Sets several values at once. All keys are checked against the
    /// definition before anything is written, so a failed update leaves the
    /// record untouched.
    ///
    /// # Errors
    ///
    /// Fails with [`MapClassError::UnknownKey`] naming the first key that is
    /// not part of the definition.
    pub fn update<I>(&mut self, entries: I) -> Result<(), MapClassError>
    where
        I: IntoIterator<Item = (String, Sdt)>,
    {
        let entries: Vec<(String, Sdt)> = entries.into_iter().collect();
        for (key, _) in &entries {
            if !self.values.contains_key(key) {
                return Err(MapClassError::UnknownKey {
                    key: key.clone(),
                    class: self.definition.name.clone(),
                });
            }
        }
        for (key, value) in entries {
            self.values.insert(key, value);
        }
        Ok(())
    }

    /// Removing a key is never supported: the key set of a record is always
    /// exactly the key set of its definition.
    ///
    /// # Errors
    ///
    /// Always fails with [`MapClassError::UnsupportedOperation`].
    pub fn remove(&mut self, _key: &str) -> Result<Sdt, MapClassError> {
        Err(MapClassError::UnsupportedOperation("remove"))
    }

    /// Popping a key is never supported, like [`remove`](MapClass::remove).
    ///
    /// # Errors
    ///
    /// Always fails with [`MapClassError::UnsupportedOperation`].
    pub fn pop(&mut self, _key: &str) -> Result<Sdt, MapClassError> {
        Err(MapClassError::UnsupportedOperation("pop"))
    }

    /// Clearing a record is never supported, like [`remove`](MapClass::remove).
    ///
    /// # Errors
    ///
    /// Always fails with [`MapClassError::UnsupportedOperation`].
    pub fn clear(&mut self) -> Result<(), MapClassError> {
        Err(MapClassError::UnsupportedOperation("clear"))
    }

    /// Returns the keys in definition order.
    ///
    /// # Example
    ///
    /// ```
    /// use sdt::prelude::*;
    ///
    /// let mut defn = MapClassDefinition::new("pair");
    /// defn.add_item("left", "Left", None);
    /// defn.add_item("right", "Right", None);
    ///
    /// let record = defn.instance();
    /// let keys: Vec<&str> = record.keys().map(|k| k.as_str()).collect();
    ///
    /// assert_eq!(keys, ["left", "right"]);
    /// ```
    pub fn keys(&self) -> Iter<String> { self.definition.keys.iter() }

    /// Returns the values in definition key order.
    pub fn values(&self) -> impl Iterator<Item = &Sdt> {
        self.definition
            .keys
            .iter()
            .map(move |k| self.values.get(k).unwrap_or(&NULL))
    }

    /// Returns the key-value pairs in definition key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Sdt)> {
        self.definition
            .keys
            .iter()
            .map(move |k| (k, self.values.get(k).unwrap_or(&NULL)))
    }

    /// Returns the display name for `key`, as recorded in the definition.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not part of the definition.
    pub fn display_name(&self, key: &str) -> &str { self.definition.display_name(key) }

    /// Returns the short display name for `key`, or `None` if the key has no
    /// short name.
    ///
    /// # Panics
    ///
    /// Panics if `key` is not part of the definition.
    pub fn display_short_name(&self, key: &str) -> Option<&str> {
        self.definition.display_short_name(key)
    }
}

/// Records compare as plain key-to-value mappings: the class name, display
/// names, and key order all stay out of it.
impl PartialEq for MapClass {
    fn eq(&self, other: &MapClass) -> bool { self.values == other.values }
}

impl Eq for MapClass {}

impl PartialEq<HashMap<String, Sdt>> for MapClass {
    fn eq(&self, other: &HashMap<String, Sdt>) -> bool { &self.values == other }
}

impl IntoIterator for MapClass {
    type IntoIter = std::vec::IntoIter<(String, Sdt)>;
    type Item = (String, Sdt);

    /// Consumes the record, yielding key-value pairs in definition order.
    fn into_iter(mut self) -> Self::IntoIter {
        let mut entries = Vec::with_capacity(self.definition.keys.len());
        for key in &self.definition.keys {
            let value = self.values.remove(key).unwrap_or(Sdt::Null);
            entries.push((key.clone(), value));
        }
        entries.into_iter()
    }
}

// The derived formatting would be fine, except that the field order matters
// when a record is shown to a person.
impl fmt::Display for MapClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (key, value)) in self.iter().enumerate() {
            if i != 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:?}: {}", key, value)?;
        }
        write!(f, "}}")
    }
}

#[derive(Clone, Debug, Default)]
/// The map class definitions visible while decoding one context block.
///
/// A registry is built fresh from the `map-class-map` entry of each context
/// block and is visible only to the values nested inside that block. A
/// nested context block replaces the registry for its own subtree; it never
/// merges with the one outside.
pub struct ClassRegistry {
    classes: HashMap<String, Arc<MapClassDefinition>>,
}

impl ClassRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self { Self::default() }

    /// Adds a definition, replacing any previous definition of the same
    /// name.
    pub fn insert(&mut self, definition: MapClassDefinition) {
        self.classes
            .insert(definition.name.clone(), Arc::new(definition));
    }

    /// Looks up a definition by class name.
    pub fn get(&self, name: &str) -> Option<&Arc<MapClassDefinition>> { self.classes.get(name) }

    /// Returns the number of definitions.
    pub fn len(&self) -> usize { self.classes.len() }

    /// Indicates whether the registry holds no definitions.
    pub fn is_empty(&self) -> bool { self.classes.is_empty() }
}
