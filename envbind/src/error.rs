//! Error types for binding environment variables onto records

/// Boxed error returned by parser functions and text decoders.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while binding environment variables onto a record.
///
/// There are two kinds of failure:
/// - configuration errors, raised by the structure of the target or its
///   annotations (everything except [`Error::Parse`]);
/// - field parse errors, raised when a raw value cannot be converted into the
///   field's type ([`Error::Parse`]).
///
/// The first error aborts the whole call. Fields bound before it stay bound.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The entry point was given a value that is not a record.
    #[error("env: expected a mutable reference to a record")]
    NotARecord,

    /// The `env` annotation carries an option other than `file` or `required`.
    #[error("env: tag option {option:?} not supported")]
    UnsupportedOption {
        /// The offending option, verbatim
        option: String,
    },

    /// A `required` variable is absent from the environment.
    ///
    /// An `env_default` does not satisfy `required`: only existence counts.
    #[error("env: required environment variable {key:?} is not set")]
    Missing {
        /// Effective (prefixed) name of the variable
        key: String,
    },

    /// The file named by a `file` variable could not be read.
    #[error("env: could not load content of file \"{path}\" from variable {key}: {source}")]
    FileRead {
        /// Effective (prefixed) name of the variable holding the path
        key: String,
        /// Path that failed to be read
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// No custom parser, text decoder, registered parser or primitive kind
    /// applies to the field's type.
    #[error("env: no parser found for field \"{field}\" of type \"{type_name}\"")]
    NoParser {
        /// Name of the field
        field: String,
        /// Fully qualified type name of the field
        type_name: String,
    },

    /// The raw value could not be converted into the field's type.
    #[error("env: parse error on field \"{field}\" of type \"{type_name}\": {source}")]
    Parse {
        /// Name of the field
        field: String,
        /// Fully qualified type name of the field
        type_name: String,
        /// Error from the parser or text decoder
        source: BoxError,
    },
}

impl Error {
    /// Returns `true` for conversion failures, `false` for configuration errors.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }

    pub(crate) fn parse_error(field: &str, type_name: &str, source: impl Into<BoxError>) -> Self {
        Self::Parse {
            field: field.to_string(),
            type_name: type_name.to_string(),
            source: source.into(),
        }
    }

    pub(crate) fn no_parser(field: &str, type_name: &str) -> Self {
        Self::NoParser {
            field: field.to_string(),
            type_name: type_name.to_string(),
        }
    }

    pub(crate) fn missing(key: impl Into<String>) -> Self {
        Self::Missing { key: key.into() }
    }
}
