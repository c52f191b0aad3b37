//! Target types a raw value can be converted into

use std::any::{Any, TypeId};
use std::ops::{Deref, DerefMut};
use std::time::Duration;

use serde::de::DeserializeOwned;
use url::Url;

use crate::error::BoxError;
use crate::parsers::{Kind, Primitive};
use crate::record::Record;

/// Decoder for a text-decodable type.
pub type TextDecoder<T> = fn(&str) -> Result<T, BoxError>;

/// A type that fields can be bound to.
///
/// Every method has a default, so an empty `impl Value for MyType {}` makes
/// `MyType` usable with a custom parser registered in [`Parsers`].
/// Override the methods to make the type parse without one:
///
/// - [`Value::kind`] and [`Value::from_primitive`] reuse a built-in parser,
///   e.g. for a newtype over `u16`;
/// - [`Value::text_decoder`] makes the type decode itself from text.
///
/// `#[derive(Env)]` implements this trait for records.
///
/// ```rust
/// use envbind::{BoxError, TextDecoder, Value};
///
/// #[derive(Debug, PartialEq)]
/// enum Mode {
///     Fast,
///     Safe,
/// }
///
/// impl Value for Mode {
///     fn text_decoder() -> Option<TextDecoder<Self>> {
///         Some(|text| match text {
///             "fast" => Ok(Mode::Fast),
///             "safe" => Ok(Mode::Safe),
///             other => Err(BoxError::from(format!("unknown mode {other:?}"))),
///         })
///     }
/// }
///
/// let decode = Mode::text_decoder().unwrap();
/// assert_eq!(decode("safe").unwrap(), Mode::Safe);
/// ```
///
/// [`Parsers`]: crate::Parsers
pub trait Value: Sized + 'static {
    /// Primitive kind whose built-in parser produces this type.
    fn kind() -> Option<Kind> {
        None
    }

    /// Converts the output of the built-in parser for [`Value::kind`].
    fn from_primitive(_value: Primitive) -> Option<Self> {
        None
    }

    /// Decoder used when the type can decode itself from text.
    fn text_decoder() -> Option<TextDecoder<Self>> {
        None
    }

    /// View of this value as a nested record.
    fn as_record(&mut self) -> Option<&mut dyn Record> {
        None
    }

    /// A nested record behind a reference that always points somewhere.
    /// It is descended into without resolving a value of its own.
    fn referenced_record(&mut self) -> Option<&mut dyn Record> {
        None
    }

    /// Key under which parsers for this type are registered.
    fn parser_key() -> TypeId {
        TypeId::of::<Self>()
    }

    /// Recovers a value produced by a parser registered under
    /// [`Value::parser_key`].
    fn from_any(value: Box<dyn Any>) -> Option<Self> {
        value.downcast::<Self>().ok().map(|value| *value)
    }
}

macro_rules! primitive_value {
    ($($ty:ty => $kind:ident),* $(,)?) => {
        $(
            impl Value for $ty {
                fn kind() -> Option<Kind> {
                    Some(Kind::$kind)
                }

                fn from_primitive(value: Primitive) -> Option<Self> {
                    match value {
                        Primitive::$kind(value) => Some(value),
                        _ => None,
                    }
                }
            }
        )*
    };
}

primitive_value! {
    bool => Bool,
    String => String,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    isize => Isize,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    usize => Usize,
    f32 => F32,
    f64 => F64,
}

// Parsed by the registered value-object parsers.
impl Value for Url {}
impl Value for Duration {}

/// A value behind one level of indirection; parsed as `T`.
impl<T: Value> Value for Box<T> {
    fn kind() -> Option<Kind> {
        T::kind()
    }

    fn from_primitive(value: Primitive) -> Option<Self> {
        T::from_primitive(value).map(Box::new)
    }

    fn text_decoder() -> Option<TextDecoder<Self>> {
        T::text_decoder().map(|_| decode_boxed::<T> as TextDecoder<Self>)
    }

    fn as_record(&mut self) -> Option<&mut dyn Record> {
        (**self).as_record()
    }

    fn referenced_record(&mut self) -> Option<&mut dyn Record> {
        (**self).as_record()
    }

    fn parser_key() -> TypeId {
        T::parser_key()
    }

    fn from_any(value: Box<dyn Any>) -> Option<Self> {
        T::from_any(value).map(Box::new)
    }
}

fn decode_boxed<T: Value>(text: &str) -> Result<Box<T>, BoxError> {
    match T::text_decoder() {
        Some(decode) => decode(text).map(Box::new),
        None => Err("type is not text decodable".into()),
    }
}

/// A value decoded from JSON text.
///
/// ```rust
/// use envbind::{Json, Value};
///
/// let decode = <Json<Vec<u32>>>::text_decoder().unwrap();
/// assert_eq!(decode("[1, 2, 3]").unwrap().0, vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Json<T>(pub T);

impl<T> Json<T> {
    /// Unwrap the decoded value
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> Deref for Json<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.0
    }
}

impl<T> DerefMut for Json<T> {
    fn deref_mut(&mut self) -> &mut T {
        &mut self.0
    }
}

impl<T: DeserializeOwned + 'static> Value for Json<T> {
    fn text_decoder() -> Option<TextDecoder<Self>> {
        Some(|text| serde_json::from_str(text).map(Json).map_err(Into::into))
    }
}
