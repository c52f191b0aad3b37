//! Bind environment variables onto annotated structs
//!
//! `envbind` fills the fields of a struct from environment variables. Each
//! field is annotated with the variable it reads and how to read it:
//! defaults, required keys, values stored in files, `$VAR` expansion,
//! separators for lists and prefixes for nested structs.
//!
//! # Features
//!
//! - **Declarative**: `#[derive(Env)]` describes the bindable fields
//! - **Nested records**: `#[env_prefix]` namespaces the keys of a nested struct
//! - **File indirection**: `#[env = "KEY,file"]` reads the value from the file named by `KEY`
//! - **Sequences**: `Vec<T>` fields split on a configurable separator
//! - **Custom parsers**: per-call parsers take precedence over built-in ones
//!
//! # Example
//!
//! ```rust
//! use envbind::{Env, Loader, MapEnvironment};
//! use std::time::Duration;
//!
//! #[derive(Debug, Default, Env)]
//! struct Config {
//!     #[env = "HOST"]
//!     #[env_default = "127.0.0.1"]
//!     pub host: String,
//!
//!     #[env = "PORT,required"]
//!     pub port: u16,
//!
//!     #[env = "TIMEOUT"]
//!     #[env_default = "30s"]
//!     pub timeout: Duration,
//!
//!     #[env = "FEATURES"]
//!     #[env_separator = ":"]
//!     pub features: Vec<String>,
//! }
//!
//! # fn main() -> Result<(), envbind::Error> {
//! let env: MapEnvironment = [("PORT", "8080"), ("FEATURES", "a:b")].into_iter().collect();
//! let mut config = Config::default();
//! Loader::new(&env).load(&mut config)?;
//!
//! assert_eq!(config.host, "127.0.0.1");
//! assert_eq!(config.port, 8080);
//! assert_eq!(config.timeout, Duration::from_secs(30));
//! assert_eq!(config.features, ["a", "b"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Annotations
//!
//! | Attribute | Meaning |
//! |-----------|---------|
//! | `#[env = "KEY[,file][,required]"]` | Variable name, with options |
//! | `#[env_default = "..."]` | Raw value used when the variable is absent |
//! | `#[env_prefix = "..."]` | Prefix for the keys of a nested record |
//! | `#[env_expand = "true"]` | Expand `$VAR` / `${VAR}` in the value |
//! | `#[env_separator = "..."]` | Separator for `Vec<T>` fields (default `,`) |
//!
//! `required` fails when the variable is absent, even if a default exists;
//! a variable that is set but empty satisfies it. With `file`, a non-empty
//! value is a path and the field receives the file's contents. Private
//! fields are never bound.
//!
//! # Value Parsing
//!
//! For every field the parser is chosen in this order:
//! 1. a custom parser for the exact type, see [`Parsers`];
//! 2. the type's own text decoder, see [`Value::text_decoder`];
//! 3. the registered parsers for [`url::Url`] and [`std::time::Duration`];
//! 4. the built-in parser for the type's primitive kind (`bool`, `String`,
//!    integers, floats).
//!
//! An empty value leaves a field untouched. A nested record whose own
//! value is empty is bound field by field under its prefix.

mod coerce;
mod duration;
mod env;
mod error;
mod expand;
mod field;
mod parsers;
mod record;
mod resolve;
mod value;

pub use duration::{parse_duration, DurationError};
pub use env::{Environment, MapEnvironment, OsEnvironment};
pub use envbind_derive::Env;
pub use error::{BoxError, Error};
pub use field::Field;
pub use parsers::{
    parse_bool, Kind, OutOfRangeError, ParseBoolError, ParserFn, Parsers, Primitive,
};
pub use record::{FieldMeta, Record, Walker};
pub use value::{Json, TextDecoder, Value};

/// Binds a record from an [`Environment`].
///
/// ```rust
/// use envbind::{Env, Loader, MapEnvironment};
///
/// #[derive(Default, Env)]
/// struct Database {
///     #[env = "URL"]
///     pub url: String,
/// }
///
/// #[derive(Default, Env)]
/// struct Config {
///     #[env_prefix = "DB_"]
///     pub database: Database,
/// }
///
/// # fn main() -> Result<(), envbind::Error> {
/// let env: MapEnvironment = [("APP_DB_URL", "postgres://db")].into_iter().collect();
/// let mut config = Config::default();
/// Loader::new(&env).prefix("APP_").load(&mut config)?;
/// assert_eq!(config.database.url, "postgres://db");
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Loader<'a> {
    environment: &'a dyn Environment,
    prefix: String,
    parsers: Parsers,
}

impl<'a> Loader<'a> {
    /// Create a loader reading from `environment`
    pub fn new(environment: &'a dyn Environment) -> Self {
        Self {
            environment,
            prefix: String::new(),
            parsers: Parsers::new(),
        }
    }

    /// Prefix prepended to every key
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Replace the custom parsers
    pub fn parsers(mut self, parsers: Parsers) -> Self {
        self.parsers = parsers;
        self
    }

    /// Add a custom parser for `T`
    pub fn parser<T, E, F>(mut self, parser: F) -> Self
    where
        T: 'static,
        E: Into<BoxError>,
        F: Fn(&str) -> Result<T, E> + Send + Sync + 'static,
    {
        self.parsers.insert(parser);
        self
    }

    /// Binds `target` field by field.
    ///
    /// # Errors
    ///
    /// - [`Error::NotARecord`] if `target` is not a record
    /// - the first error raised by any field; fields bound before it keep
    ///   their new values
    pub fn load<T: Value>(&self, target: &mut T) -> Result<(), Error> {
        let record = target.as_record().ok_or(Error::NotARecord)?;
        tracing::debug!(
            prefix = %self.prefix,
            custom_parsers = self.parsers.len(),
            "binding record from environment"
        );
        let mut walker = Walker::new(self.environment, &self.parsers, self.prefix.clone());
        record.walk(&mut walker)
    }
}

/// Binds `target` from the process environment.
pub fn parse<T: Value>(target: &mut T) -> Result<(), Error> {
    Loader::new(&OsEnvironment).load(target)
}

/// Binds `target` from the process environment with custom parsers.
pub fn parse_with_parsers<T: Value>(target: &mut T, parsers: &Parsers) -> Result<(), Error> {
    Loader::new(&OsEnvironment)
        .parsers(parsers.clone())
        .load(target)
}

/// Binds `target` from the process environment, prefixing every key.
pub fn parse_with_prefix<T: Value>(prefix: &str, target: &mut T) -> Result<(), Error> {
    Loader::new(&OsEnvironment).prefix(prefix).load(target)
}

/// Binds `target` from the process environment, prefixing every key and
/// using custom parsers.
pub fn parse_with_prefix_and_parsers<T: Value>(
    prefix: &str,
    target: &mut T,
    parsers: &Parsers,
) -> Result<(), Error> {
    Loader::new(&OsEnvironment)
        .prefix(prefix)
        .parsers(parsers.clone())
        .load(target)
}

/// Builds a `T` from its `Default` and binds it from the process environment.
///
/// # Errors
///
/// See [`Loader::load`].
pub fn from_env<T: Value + Default>() -> Result<T, Error> {
    let mut target = T::default();
    parse(&mut target)?;
    Ok(target)
}
