//! Field shapes: plain values, optional values and sequences

use std::any::type_name;

use crate::coerce;
use crate::error::Error;
use crate::parsers::Parsers;
use crate::record::{FieldMeta, Record};
use crate::value::Value;

/// A record field the walker can bind.
///
/// Implemented for every [`Value`] `T`, for `Option<T>` and for `Vec<T>`.
/// Use `Vec<Box<T>>` for a sequence of boxed elements.
///
/// A `Box<R>` or `Some(R)` holding a record `R` is descended into directly.
/// A plain record field is descended into only when its own value is empty.
pub trait Field {
    /// A nested record to descend into without resolving a value.
    fn present_record(&mut self) -> Option<&mut dyn Record> {
        None
    }

    /// A nested record to descend into when the resolved value is empty.
    fn record(&mut self) -> Option<&mut dyn Record> {
        None
    }

    /// Converts the non-empty raw value and stores it in the field.
    fn assign(&mut self, raw: &str, meta: &FieldMeta, parsers: &Parsers) -> Result<(), Error>;
}

impl<T: Value> Field for T {
    fn present_record(&mut self) -> Option<&mut dyn Record> {
        self.referenced_record()
    }

    fn record(&mut self) -> Option<&mut dyn Record> {
        self.as_record()
    }

    fn assign(&mut self, raw: &str, meta: &FieldMeta, parsers: &Parsers) -> Result<(), Error> {
        *self = coerce::scalar::<T>(raw, meta.name, type_name::<T>(), parsers)?;
        Ok(())
    }
}

/// Owned optional storage, filled only when a value is converted.
impl<T: Value> Field for Option<T> {
    fn present_record(&mut self) -> Option<&mut dyn Record> {
        match self {
            Some(value) => value.as_record(),
            None => None,
        }
    }

    fn assign(&mut self, raw: &str, meta: &FieldMeta, parsers: &Parsers) -> Result<(), Error> {
        let value = coerce::scalar::<T>(raw, meta.name, type_name::<Self>(), parsers)?;
        *self = Some(value);
        Ok(())
    }
}

/// Replaced as a whole; a failing element leaves the field as it was.
impl<T: Value> Field for Vec<T> {
    fn assign(&mut self, raw: &str, meta: &FieldMeta, parsers: &Parsers) -> Result<(), Error> {
        *self = coerce::sequence::<T>(
            raw,
            meta.separator(),
            meta.name,
            type_name::<Self>(),
            parsers,
        )?;
        Ok(())
    }
}
