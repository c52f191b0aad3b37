//! Resolution of one field's raw value from the environment

use crate::env::Environment;
use crate::error::Error;
use crate::record::FieldMeta;

/// The `env` annotation split into key and options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct EnvTag<'a> {
    pub key: &'a str,
    pub file: bool,
    pub required: bool,
}

impl<'a> EnvTag<'a> {
    /// Parses `KEY[,file][,required]`. Empty options are ignored.
    pub fn parse(tag: &'a str) -> Result<Self, Error> {
        let mut parts = tag.split(',');
        let mut parsed = Self {
            key: parts.next().unwrap_or_default(),
            ..Self::default()
        };

        for option in parts {
            match option {
                "" => {}
                "file" => parsed.file = true,
                "required" => parsed.required = true,
                other => {
                    return Err(Error::UnsupportedOption {
                        option: other.to_string(),
                    })
                }
            }
        }

        Ok(parsed)
    }
}

/// Resolves the raw value for `meta` under `prefix`.
///
/// Order of operations:
/// 1. look up `prefix + key`, falling back to `env_default` when absent;
/// 2. expand `$VAR` references when `env_expand` is `true`;
/// 3. fail if `required` and the key was absent (a default does not count);
/// 4. with `file`, replace a non-empty value by the contents of that file.
pub(crate) fn resolve(
    environment: &dyn Environment,
    prefix: &str,
    meta: &FieldMeta,
) -> Result<String, Error> {
    let tag = EnvTag::parse(meta.env.unwrap_or_default())?;
    let key = format!("{prefix}{}", tag.key);

    let (mut value, exists) = match environment.lookup(&key) {
        Some(value) => (value, true),
        None => (meta.default.unwrap_or_default().to_string(), false),
    };
    tracing::trace!(key = %key, exists, field = meta.name, "resolved environment key");

    if meta.expand() {
        value = environment.expand(&value);
    }

    if tag.required && !exists {
        return Err(Error::missing(key));
    }

    if tag.file && !value.is_empty() {
        tracing::trace!(key = %key, path = %value, "loading value from file");
        value = read_to_string(environment, &value).map_err(|source| Error::FileRead {
            key,
            path: value,
            source,
        })?;
    }

    Ok(value)
}

fn read_to_string(environment: &dyn Environment, path: &str) -> std::io::Result<String> {
    let bytes = environment.read_file(path)?;
    String::from_utf8(bytes).map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}
