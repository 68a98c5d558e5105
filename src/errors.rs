use failure::Fail;

#[derive(Clone, Debug, Eq, PartialEq, Fail)]
/// An error encountered when strict unmarshalling fails.
///
/// The lenient entry point, [`unmarshal`](crate::unmarshal::unmarshal),
/// treats every variant as evidence that the input was never marshalled data
/// and returns the input unchanged. Callers that need to distinguish
/// "not marshalled" from "marshalled but corrupt" should use
/// [`unmarshal_strict`](crate::unmarshal::unmarshal_strict) and match on
/// these variants.
pub enum UnmarshalError {
    /// The input does not begin with the `@SDT/` marker.
    #[fail(display = "missing marshalled data marker")]
    MissingMarker,
    /// The input ends where a type symbol was expected.
    #[fail(display = "incomplete marshalled data")]
    IncompleteData,
    /// A colon-length-colon prefix is not `:<decimal>:`.
    #[fail(display = "bad format for colon-length-colon object")]
    BadLengthPrefix,
    /// A colon-length-colon prefix declares more characters than remain.
    #[fail(display = "specified length exceeds available data")]
    LengthExceedsData,
    /// Characters were left over where a payload should have been exhausted.
    #[fail(display = "unexpected trailing data")]
    TrailingData,
    /// The character after the marker is not one of the five type symbols.
    #[fail(display = "unrecognized data type indicator {:?}", _0)]
    UnknownTypeSymbol(char),
    /// A scalar payload has a bad indicator character, or a none scalar
    /// carries content.
    #[fail(display = "bad format for scalar object")]
    BadScalarFormat,
    /// A list payload does not begin with a decimal element count.
    #[fail(display = "bad format for list object")]
    BadListCount,
    /// A context block's class definition map is not shaped like one.
    #[fail(display = "bad format for map class definition map")]
    BadClassMap,
    /// A map class instance references a class the current context never
    /// defined. This is a hard error even on the lenient path: the data was
    /// unquestionably marshalled, but cannot be interpreted.
    #[fail(display = "missing map class definition for {:?}", _0)]
    MissingClassDefinition(String),
    /// Values were nested beyond the decoder's depth bound.
    #[fail(display = "marshalled data is nested too deeply")]
    NestingTooDeep,
}

#[derive(Clone, Debug, Eq, PartialEq, Fail)]
/// An error encountered when modifying a [`MapClass`](crate::MapClass).
pub enum MapClassError {
    /// The key is not part of the map class definition.
    #[fail(display = "key {:?} is not in map class {:?}", key, class)]
    UnknownKey {
        /// The offending key.
        key: String,
        /// The name of the map class that rejected it.
        class: String,
    },
    /// The operation would add or remove keys, which a map class never
    /// allows once constructed.
    #[fail(display = "{} is not supported in a map class", _0)]
    UnsupportedOperation(&'static str),
}
