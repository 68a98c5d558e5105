//! Convenience re-exports: `use sdt::prelude::*;` pulls in everything a
//! typical caller touches.

pub use crate::{
    errors::{MapClassError, UnmarshalError},
    mapclass::{ClassRegistry, MapClass, MapClassDefinition},
    unmarshal::{unmarshal, unmarshal_strict, UnmarshalMode},
    Sdt,
};
