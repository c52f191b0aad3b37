//! Conversion of raw strings into typed field values

use crate::error::{BoxError, Error};
use crate::parsers::{self, parse_primitive, Kind, ParserFn, Parsers};
use crate::value::{TextDecoder, Value};

/// How values of one type are parsed, chosen once per field.
enum Strategy<'p, T> {
    Custom(&'p ParserFn),
    Text(TextDecoder<T>),
    Registered(&'static ParserFn),
    Primitive(Kind),
}

impl<'p, T: Value> Strategy<'p, T> {
    /// Custom parser for the exact type, then the type's own text decoder,
    /// then a registered value-object parser, then the primitive kind.
    ///
    /// The custom parser is checked before the text decoder, so a caller can
    /// override how a text-decodable type is read.
    fn select(parsers: &'p Parsers) -> Option<Self> {
        let key = T::parser_key();
        if let Some(parser) = parsers.get(key) {
            return Some(Self::Custom(parser));
        }
        if let Some(decode) = T::text_decoder() {
            return Some(Self::Text(decode));
        }
        if let Some(parser) = parsers::registered(key) {
            return Some(Self::Registered(parser));
        }
        T::kind().map(Self::Primitive)
    }

    fn apply(&self, raw: &str) -> Result<T, BoxError> {
        match self {
            Self::Custom(parser) => T::from_any(parser(raw)?).ok_or_else(wrong_type),
            Self::Registered(parser) => T::from_any(parser(raw)?).ok_or_else(wrong_type),
            Self::Text(decode) => decode(raw),
            Self::Primitive(kind) => T::from_primitive(parse_primitive(*kind, raw)?)
                .ok_or_else(wrong_type),
        }
    }
}

fn wrong_type() -> BoxError {
    "parser produced a value of another type".into()
}

/// Converts `raw` into a `T` for the field `field` of type `type_name`.
pub(crate) fn scalar<T: Value>(
    raw: &str,
    field: &str,
    type_name: &str,
    parsers: &Parsers,
) -> Result<T, Error> {
    let strategy =
        Strategy::<T>::select(parsers).ok_or_else(|| Error::no_parser(field, type_name))?;
    strategy
        .apply(raw)
        .map_err(|e| Error::parse_error(field, type_name, e))
}

/// Splits `raw` on `separator` and converts every part into a `T`.
///
/// Parts are not trimmed and empty parts are parsed like any other. The
/// first failing part fails the whole sequence.
pub(crate) fn sequence<T: Value>(
    raw: &str,
    separator: &str,
    field: &str,
    type_name: &str,
    parsers: &Parsers,
) -> Result<Vec<T>, Error> {
    let strategy =
        Strategy::<T>::select(parsers).ok_or_else(|| Error::no_parser(field, type_name))?;
    raw.split(separator)
        .map(|part| {
            strategy
                .apply(part)
                .map_err(|e| Error::parse_error(field, type_name, e))
        })
        .collect()
}
