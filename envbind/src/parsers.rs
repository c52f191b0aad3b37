//! Parser registry: built-in parsers by primitive kind, registered
//! value-object parsers and per-call custom parsers.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};
use std::time::Duration;

use url::Url;

use crate::duration::parse_duration;
use crate::error::BoxError;

/// Type-erased parser function stored in a registry.
pub type ParserFn = Arc<dyn Fn(&str) -> Result<Box<dyn Any>, BoxError> + Send + Sync>;

/// Primitive kinds handled by the built-in parsers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Bool,
    String,
    I8,
    I16,
    I32,
    I64,
    Isize,
    U8,
    U16,
    U32,
    U64,
    Usize,
    F32,
    F64,
}

/// Output of a built-in parser, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    Bool(bool),
    String(String),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Isize(isize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    Usize(usize),
    F32(f32),
    F64(f64),
}

/// Parses `raw` with the built-in parser for `kind`.
///
/// Numbers are base 10 and checked against the width of the kind.
pub fn parse_primitive(kind: Kind, raw: &str) -> Result<Primitive, BoxError> {
    Ok(match kind {
        Kind::Bool => Primitive::Bool(parse_bool(raw)?),
        Kind::String => Primitive::String(raw.to_string()),
        Kind::I8 => Primitive::I8(raw.parse()?),
        Kind::I16 => Primitive::I16(raw.parse()?),
        Kind::I32 => Primitive::I32(raw.parse()?),
        Kind::I64 => Primitive::I64(raw.parse()?),
        Kind::Isize => Primitive::Isize(raw.parse()?),
        Kind::U8 => Primitive::U8(raw.parse()?),
        Kind::U16 => Primitive::U16(raw.parse()?),
        Kind::U32 => Primitive::U32(raw.parse()?),
        Kind::U64 => Primitive::U64(raw.parse()?),
        Kind::Usize => Primitive::Usize(raw.parse()?),
        Kind::F32 => Primitive::F32(parse_float(raw)?),
        Kind::F64 => Primitive::F64(parse_float(raw)?),
    })
}

/// Error for a float literal that overflows its width.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("value out of range: {0:?}")]
pub struct OutOfRangeError(String);

/// Parses a float, rejecting finite literals that round to infinity.
fn parse_float<F>(raw: &str) -> Result<F, BoxError>
where
    F: FromStr<Err = ParseFloatError> + Into<f64> + Copy,
{
    let value: F = raw.parse()?;
    if Into::<f64>::into(value).is_infinite() && !is_infinity_token(raw) {
        return Err(OutOfRangeError(raw.to_string()).into());
    }
    Ok(value)
}

fn is_infinity_token(raw: &str) -> bool {
    let unsigned = raw
        .strip_prefix('+')
        .or_else(|| raw.strip_prefix('-'))
        .unwrap_or(raw);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

/// Error for a token that is not one of the accepted boolean spellings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid boolean {0:?}")]
pub struct ParseBoolError(String);

/// Accepts `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(raw: &str) -> Result<bool, ParseBoolError> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(ParseBoolError(raw.to_string())),
    }
}

fn erase<T, E, F>(parser: F) -> ParserFn
where
    T: 'static,
    E: Into<BoxError>,
    F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
{
    Arc::new(move |raw| {
        parser(raw)
            .map(|value| Box::new(value) as Box<dyn Any>)
            .map_err(Into::into)
    })
}

/// Value-object parsers available to every call. Never mutated.
static REGISTERED: LazyLock<HashMap<TypeId, ParserFn>> = LazyLock::new(|| {
    let mut parsers = HashMap::new();
    parsers.insert(
        TypeId::of::<Url>(),
        erase(|raw| Url::parse(raw).map_err(|e| format!("unable to parse URL: {e}"))),
    );
    parsers.insert(
        TypeId::of::<Duration>(),
        erase(|raw| parse_duration(raw).map_err(|e| format!("unable to parse duration: {e}"))),
    );
    parsers
});

pub(crate) fn registered(key: TypeId) -> Option<&'static ParserFn> {
    REGISTERED.get(&key)
}

/// Custom parsers for one call, keyed by the exact target type.
///
/// A custom parser takes precedence over every other way of parsing its
/// type, including the registered URL and duration parsers and the
/// primitive kinds.
///
/// ```rust
/// use envbind::Parsers;
///
/// #[derive(Debug, PartialEq)]
/// struct Level(u8);
///
/// impl envbind::Value for Level {}
///
/// let parsers = Parsers::new().with(|raw: &str| match raw {
///     "low" => Ok(Level(1)),
///     "high" => Ok(Level(9)),
///     other => Err(format!("unknown level {other}")),
/// });
/// assert_eq!(parsers.len(), 1);
/// ```
#[derive(Clone, Default)]
pub struct Parsers {
    custom: HashMap<TypeId, ParserFn>,
}

impl Parsers {
    /// Create an empty set of custom parsers
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parser for `T`, replacing any previous parser for `T`.
    pub fn with<T, E, F>(mut self, parser: F) -> Self
    where
        T: 'static,
        E: Into<BoxError>,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        self.insert(parser);
        self
    }

    /// Add a parser for `T`, replacing any previous parser for `T`.
    pub fn insert<T, E, F>(&mut self, parser: F) -> &mut Self
    where
        T: 'static,
        E: Into<BoxError>,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        self.custom.insert(TypeId::of::<T>(), erase(parser));
        self
    }

    /// Whether a custom parser for `T` is present
    pub fn contains<T: 'static>(&self) -> bool {
        self.custom.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.custom.len()
    }

    pub fn is_empty(&self) -> bool {
        self.custom.is_empty()
    }

    pub(crate) fn get(&self, key: TypeId) -> Option<&ParserFn> {
        self.custom.get(&key)
    }
}

impl fmt::Debug for Parsers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Parsers")
            .field("custom", &self.custom.len())
            .finish()
    }
}
