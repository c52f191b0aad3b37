//! Record traversal: walking the bindable fields of a record

use crate::env::Environment;
use crate::error::Error;
use crate::field::Field;
use crate::parsers::Parsers;
use crate::resolve::resolve;

/// Annotations of one record field, as emitted by `#[derive(Env)]`.
///
/// Every annotation is kept verbatim; the `env` options and `env_expand`
/// flag are interpreted while binding.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldMeta {
    /// Field name, used in error messages
    pub name: &'static str,
    /// `#[env = "KEY[,file][,required]"]`
    pub env: Option<&'static str>,
    /// `#[env_default = "..."]`
    pub default: Option<&'static str>,
    /// `#[env_prefix = "..."]`
    pub prefix: Option<&'static str>,
    /// `#[env_expand = "true|false"]`
    pub expand: Option<&'static str>,
    /// `#[env_separator = "..."]`
    pub separator: Option<&'static str>,
}

impl FieldMeta {
    /// Whether `env_expand` is `true`, ignoring case
    pub fn expand(&self) -> bool {
        self.expand
            .is_some_and(|flag| flag.eq_ignore_ascii_case("true"))
    }

    /// Separator for sequence fields; a comma unless set
    pub fn separator(&self) -> &'static str {
        match self.separator {
            Some(separator) if !separator.is_empty() => separator,
            _ => ",",
        }
    }
}

/// A struct whose fields can be bound from the environment.
///
/// Implemented by `#[derive(Env)]`: [`Record::walk`] hands every bindable
/// field to the walker, in declaration order.
pub trait Record {
    fn walk(&mut self, walker: &mut Walker<'_>) -> Result<(), Error>;
}

/// Visits the fields of one record under an accumulated prefix.
pub struct Walker<'a> {
    environment: &'a dyn Environment,
    parsers: &'a Parsers,
    prefix: String,
}

impl<'a> Walker<'a> {
    pub(crate) fn new(
        environment: &'a dyn Environment,
        parsers: &'a Parsers,
        prefix: String,
    ) -> Self {
        Self {
            environment,
            parsers,
            prefix,
        }
    }

    /// Prefix prepended to the keys of this record's fields
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Binds one field.
    ///
    /// A present optional record is descended into without resolving a
    /// value. Otherwise the raw value is resolved; an empty value leaves the
    /// field untouched, except that a record field is then descended into.
    pub fn field<F: Field>(&mut self, meta: &FieldMeta, field: &mut F) -> Result<(), Error> {
        if let Some(record) = field.present_record() {
            return self.descend(meta, record);
        }

        let raw = resolve(self.environment, &self.prefix, meta)?;
        if raw.is_empty() {
            if let Some(record) = field.record() {
                return self.descend(meta, record);
            }
            return Ok(());
        }

        field.assign(&raw, meta, self.parsers)
    }

    fn descend(&self, meta: &FieldMeta, record: &mut dyn Record) -> Result<(), Error> {
        let prefix = format!("{}{}", self.prefix, meta.prefix.unwrap_or_default());
        tracing::trace!(field = meta.name, prefix = %prefix, "descending into nested record");
        let mut walker = Walker::new(self.environment, self.parsers, prefix);
        record.walk(&mut walker)
    }
}
