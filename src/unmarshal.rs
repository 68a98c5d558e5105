//! # SDT unmarshaller
//!
//! Turns marshalled `@SDT/` text back into [`Sdt`] values.
//!
//! # Example
//!
//! ```
//! use sdt::prelude::*;
//!
//! let value = unmarshal("@SDT/$S:3:foo", UnmarshalMode::default());
//! assert_eq!(value, Sdt::from("foo"));
//!
//! // Anything that is not marshalled data comes back unchanged.
//! let value = unmarshal("plain result text", UnmarshalMode::default());
//! assert_eq!(value, Sdt::from("plain result text"));
//!
//! // The strict entry point reports what went wrong instead.
//! let err = unmarshal_strict("@SDT/$S:9:foo", UnmarshalMode::default());
//! assert_eq!(err, Err(UnmarshalError::LengthExceedsData));
//! ```

use std::collections::HashMap;

use crate::{
    errors::UnmarshalError,
    mapclass::{ClassRegistry, MapClass, MapClassDefinition},
    Sdt,
};

/// Marker that opens every marshalled value.
pub const MARKER: &str = "@SDT/";

/// Type symbol for scalars (none and text).
pub const SYM_SCALAR: char = '$';
/// Type symbol for maps.
pub const SYM_MAP: char = '{';
/// Type symbol for lists.
pub const SYM_LIST: char = '[';
/// Type symbol for map class instances.
pub const SYM_CLASS: char = '%';
/// Type symbol for contexts.
pub const SYM_CONTEXT: char = '*';

/// Scalar indicator for the none value.
const SCALAR_NONE: char = '0';
/// Scalar indicator for text.
const SCALAR_TEXT: char = 'S';

/// Reserved key of a context's header map holding the class definitions.
pub const CLASS_MAP_KEY: &str = "map-class-map";

/// Key of a class definition entry listing its field descriptors in order.
const CLASS_KEYS: &str = "keys";
/// Field descriptor key naming the field itself.
const FIELD_KEY: &str = "key";
/// Field descriptor key holding the display name.
const FIELD_DISPLAY_NAME: &str = "display-name";
/// Field descriptor key holding the optional short display name.
const FIELD_DISPLAY_SHORT_NAME: &str = "display-short-name";

/// How deep values may nest before decoding gives up. Well-formed service
/// output stays in single digits; anything approaching this bound is either
/// corrupt or hostile, and failing beats overflowing the stack.
pub const MAX_DEPTH: usize = 64;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
/// Controls how text scalars are handled while unmarshalling.
pub enum UnmarshalMode {
    /// Re-attempt unmarshalling on the content of every text scalar,
    /// recursively. Services sometimes hand back marshalled data inside
    /// string fields; this mode unwraps it. The default.
    Recursive,
    /// Decode one level only, leaving the content of text scalars as-is.
    NonRecursive,
    /// Do no unmarshalling at all and return the input verbatim. A cheap
    /// pass-through for callers that already know the data is plain text.
    None,
}

impl Default for UnmarshalMode {
    fn default() -> Self { UnmarshalMode::Recursive }
}

/// The five value kinds a type symbol can select.
#[derive(Clone, Copy, Debug)]
enum Symbol {
    Scalar,
    Map,
    List,
    Class,
    Context,
}

fn read_symbol(c: char) -> Option<Symbol> {
    match c {
        SYM_SCALAR => Some(Symbol::Scalar),
        SYM_MAP => Some(Symbol::Map),
        SYM_LIST => Some(Symbol::List),
        SYM_CLASS => Some(Symbol::Class),
        SYM_CONTEXT => Some(Symbol::Context),
        _ => None,
    }
}

/// Unmarshals `data`, returning the input unchanged if it is not marshalled.
///
/// Any failure of the strict decode is taken as proof that `data` was plain
/// text all along, so this never fails. Callers that need to tell
/// "not marshalled" apart from "marshalled but corrupt" should use
/// [`unmarshal_strict`].
///
/// # Example
///
/// ```
/// use sdt::prelude::*;
///
/// assert_eq!(
///     unmarshal("@SDT/$0:0:", UnmarshalMode::default()),
///     Sdt::Null,
/// );
/// assert_eq!(
///     unmarshal("no marker here", UnmarshalMode::default()),
///     Sdt::from("no marker here"),
/// );
/// ```
pub fn unmarshal(data: &str, mode: UnmarshalMode) -> Sdt {
    match unmarshal_strict(data, mode) {
        Ok(value) => value,
        Err(_) => Sdt::Text(data.to_string()),
    }
}

/// Unmarshals `data`, failing on anything malformed.
///
/// With [`UnmarshalMode::None`] the input is returned verbatim as
/// [`Sdt::Text`] without being parsed. Otherwise exactly one value is
/// decoded and anything left over is an error.
///
/// # Errors
///
/// Fails with the [`UnmarshalError`] variant describing the first problem
/// found: a missing marker, truncated or misdeclared lengths, an unknown
/// type symbol, trailing characters, a reference to an undefined map class,
/// or nesting past [`MAX_DEPTH`].
pub fn unmarshal_strict(data: &str, mode: UnmarshalMode) -> Result<Sdt, UnmarshalError> {
    if mode == UnmarshalMode::None {
        return Ok(Sdt::Text(data.to_string()));
    }

    let chars: Vec<char> = data.chars().collect();
    let registry = ClassRegistry::new();
    let (value, remainder) = unmarshal_internal(&chars, mode, &registry, 0)?;

    if !remainder.is_empty() {
        return Err(UnmarshalError::TrailingData);
    }

    Ok(value)
}

/// Decodes one value off the front of `data`, returning it along with
/// whatever follows. Every nested decode goes through here, so this is
/// where the marker, the type symbol, and the depth bound are checked.
fn unmarshal_internal<'a>(
    data: &'a [char],
    mode: UnmarshalMode,
    registry: &ClassRegistry,
    depth: usize,
) -> Result<(Sdt, &'a [char]), UnmarshalError> {
    if depth > MAX_DEPTH {
        return Err(UnmarshalError::NestingTooDeep);
    }

    let rest = strip_marker(data)?;
    let (symbol, rest) = match rest.split_first() {
        Some((c, rest)) => (*c, rest),
        None => return Err(UnmarshalError::IncompleteData),
    };

    match read_symbol(symbol) {
        Some(Symbol::Scalar) => unmarshal_scalar(rest, mode, depth),
        Some(Symbol::Map) => unmarshal_map(rest, mode, registry, depth),
        Some(Symbol::List) => unmarshal_list(rest, mode, registry, depth),
        Some(Symbol::Class) => unmarshal_class(rest, mode, registry, depth),
        Some(Symbol::Context) => unmarshal_context(rest, mode, registry, depth),
        None => Err(UnmarshalError::UnknownTypeSymbol(symbol)),
    }
}

fn strip_marker(data: &[char]) -> Result<&[char], UnmarshalError> {
    if data.len() < MARKER.len() || !data[..MARKER.len()].iter().copied().eq(MARKER.chars()) {
        return Err(UnmarshalError::MissingMarker);
    }
    Ok(&data[MARKER.len()..])
}

/// Reads a colon-length-colon framed object: a colon, a decimal character
/// count, a colon, then exactly that many characters. Returns the framed
/// content and everything after it.
fn read_framed(data: &[char]) -> Result<(&[char], &[char]), UnmarshalError> {
    let rest = match data.split_first() {
        Some((&':', rest)) => rest,
        _ => return Err(UnmarshalError::BadLengthPrefix),
    };

    let digits = rest.iter().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return Err(UnmarshalError::BadLengthPrefix);
    }
    let length = parse_decimal(&rest[..digits]).ok_or(UnmarshalError::LengthExceedsData)?;

    let rest = match rest[digits..].split_first() {
        Some((&':', rest)) => rest,
        _ => return Err(UnmarshalError::BadLengthPrefix),
    };

    if length > rest.len() {
        return Err(UnmarshalError::LengthExceedsData);
    }

    Ok(rest.split_at(length))
}

/// Parses a run of ASCII digits, `None` on overflow.
fn parse_decimal(digits: &[char]) -> Option<usize> {
    let mut value: usize = 0;
    for c in digits {
        value = value
            .checked_mul(10)?
            .checked_add(c.to_digit(10)? as usize)?;
    }
    Some(value)
}

fn unmarshal_scalar(
    data: &[char],
    mode: UnmarshalMode,
    depth: usize,
) -> Result<(Sdt, &[char]), UnmarshalError> {
    let (indicator, rest) = match data.split_first() {
        Some((c, rest)) => (*c, rest),
        None => return Err(UnmarshalError::BadScalarFormat),
    };
    if indicator != SCALAR_NONE && indicator != SCALAR_TEXT {
        return Err(UnmarshalError::BadScalarFormat);
    }

    let (content, remainder) = read_framed(rest)?;

    if indicator == SCALAR_NONE {
        if !content.is_empty() {
            return Err(UnmarshalError::BadScalarFormat);
        }
        return Ok((Sdt::Null, remainder));
    }

    let text: String = content.iter().collect();
    let value = match mode {
        UnmarshalMode::Recursive => reunmarshal(text, mode, depth + 1),
        _ => Sdt::Text(text),
    };

    Ok((value, remainder))
}

/// Leniently re-unmarshals the content of a text scalar, keeping the depth
/// already accumulated so marshalled-inside-marshalled strings cannot
/// recurse without bound. The nested decode starts from an empty registry:
/// an embedded document never sees the class definitions of the document
/// it was carried in.
fn reunmarshal(text: String, mode: UnmarshalMode, depth: usize) -> Sdt {
    let chars: Vec<char> = text.chars().collect();
    let registry = ClassRegistry::new();
    match unmarshal_internal(&chars, mode, &registry, depth) {
        Ok((value, remainder)) if remainder.is_empty() => value,
        _ => Sdt::Text(text),
    }
}

fn unmarshal_map<'a>(
    data: &'a [char],
    mode: UnmarshalMode,
    registry: &ClassRegistry,
    depth: usize,
) -> Result<(Sdt, &'a [char]), UnmarshalError> {
    let (mut items, remainder) = read_framed(data)?;

    let mut result = HashMap::new();
    while !items.is_empty() {
        let (key, rest) = read_framed(items)?;
        let (value, rest) = unmarshal_internal(rest, mode, registry, depth + 1)?;
        // Duplicate keys overwrite, as in any mapping.
        result.insert(key.iter().collect::<String>(), value);
        items = rest;
    }

    Ok((Sdt::Map(result), remainder))
}

fn unmarshal_list<'a>(
    data: &'a [char],
    mode: UnmarshalMode,
    registry: &ClassRegistry,
    depth: usize,
) -> Result<(Sdt, &'a [char]), UnmarshalError> {
    let digits = data.iter().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return Err(UnmarshalError::BadListCount);
    }
    let count = parse_decimal(&data[..digits]).ok_or(UnmarshalError::BadListCount)?;

    let (mut items, remainder) = read_framed(&data[digits..])?;

    // A count can claim far more elements than the payload could hold.
    let mut result = Vec::with_capacity(count.min(items.len()));
    for _ in 0..count {
        let (value, rest) = unmarshal_internal(items, mode, registry, depth + 1)?;
        result.push(value);
        items = rest;
    }

    if !items.is_empty() {
        return Err(UnmarshalError::TrailingData);
    }

    Ok((Sdt::List(result), remainder))
}

fn unmarshal_class<'a>(
    data: &'a [char],
    mode: UnmarshalMode,
    registry: &ClassRegistry,
    depth: usize,
) -> Result<(Sdt, &'a [char]), UnmarshalError> {
    let (content, remainder) = read_framed(data)?;
    let (name, mut values) = read_framed(content)?;
    let name: String = name.iter().collect();

    let definition = match registry.get(&name) {
        Some(definition) => definition.clone(),
        None => return Err(UnmarshalError::MissingClassDefinition(name)),
    };

    // The wire carries no per-field keys: position implies identity, and the
    // ordering is given by the definition.
    let mut fields = Vec::with_capacity(definition.keys().len());
    for _ in definition.keys() {
        let (value, rest) = unmarshal_internal(values, mode, registry, depth + 1)?;
        fields.push(value);
        values = rest;
    }

    if !values.is_empty() {
        return Err(UnmarshalError::TrailingData);
    }

    Ok((Sdt::Class(MapClass::with_values(definition, fields)), remainder))
}

fn unmarshal_context<'a>(
    data: &'a [char],
    mode: UnmarshalMode,
    registry: &ClassRegistry,
    depth: usize,
) -> Result<(Sdt, &'a [char]), UnmarshalError> {
    let (content, remainder) = read_framed(data)?;

    // The header is decoded under the enclosing registry; only the root
    // value sees the definitions the header declares.
    let (header, root_data) = unmarshal_internal(content, mode, registry, depth + 1)?;
    let header = match header {
        Sdt::Map(map) => map,
        _ => return Err(UnmarshalError::BadClassMap),
    };

    let new_registry = match header.get(CLASS_MAP_KEY) {
        Some(class_map) => build_registry(class_map)?,
        None => ClassRegistry::new(),
    };

    // If this context is nested inside another, the outer definitions are
    // forsaken for the inner subtree rather than merged in. Nested contexts
    // should not occur in well-formed data, but they must not crash.
    let (root, trailing) = unmarshal_internal(root_data, mode, &new_registry, depth + 1)?;

    if !trailing.is_empty() {
        return Err(UnmarshalError::TrailingData);
    }

    Ok((root, remainder))
}

/// Builds a class registry from a decoded `map-class-map` value: a map from
/// class name to a map whose `keys` entry lists field descriptors in
/// definition order.
fn build_registry(class_map: &Sdt) -> Result<ClassRegistry, UnmarshalError> {
    let class_map = match class_map {
        Sdt::Map(map) => map,
        _ => return Err(UnmarshalError::BadClassMap),
    };

    let mut registry = ClassRegistry::new();
    for (name, info) in class_map {
        let info = match info {
            Sdt::Map(map) => map,
            _ => return Err(UnmarshalError::BadClassMap),
        };
        let items = match info.get(CLASS_KEYS) {
            Some(Sdt::List(items)) => items,
            _ => return Err(UnmarshalError::BadClassMap),
        };

        let mut definition = MapClassDefinition::new(name);
        for item in items {
            let item = match item {
                Sdt::Map(map) => map,
                _ => return Err(UnmarshalError::BadClassMap),
            };
            let key = match item.get(FIELD_KEY) {
                Some(Sdt::Text(key)) => key,
                _ => return Err(UnmarshalError::BadClassMap),
            };
            let display_name = match item.get(FIELD_DISPLAY_NAME) {
                Some(Sdt::Text(display_name)) => display_name,
                _ => return Err(UnmarshalError::BadClassMap),
            };
            let display_short_name = match item.get(FIELD_DISPLAY_SHORT_NAME) {
                Some(Sdt::Text(short)) => Some(short.as_str()),
                _ => None,
            };
            definition.add_item(key, display_name, display_short_name);
        }

        registry.insert(definition);
    }

    Ok(registry)
}
