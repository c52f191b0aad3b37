//! Attribute parsing for field annotations.
//!
//! This module extracts the `env*` helper attributes from struct fields
//! during macro expansion. Values are kept verbatim; their meaning is
//! interpreted by the runtime crate.

use syn::{Expr, ExprLit, Field, Lit, Meta};

/// Helper attribute names, in the order they are stored in `FieldAttrs`.
pub const ATTRIBUTES: [&str; 5] = [
    "env",
    "env_default",
    "env_prefix",
    "env_expand",
    "env_separator",
];

/// Parsed `env*` attributes from a struct field.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct FieldAttrs {
    /// `#[env = "KEY[,file][,required]"]`
    pub env: Option<String>,

    /// `#[env_default = "..."]`
    pub default: Option<String>,

    /// `#[env_prefix = "..."]`, for nested records.
    pub prefix: Option<String>,

    /// `#[env_expand = "true|false"]`
    pub expand: Option<String>,

    /// `#[env_separator = "..."]`, for sequences.
    pub separator: Option<String>,
}

impl FieldAttrs {
    /// Extract and validate the `env*` attributes of a struct field.
    ///
    /// Every attribute must have the form `#[name = "string literal"]` and
    /// appear at most once. Other attributes are ignored.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            let Some(name) = ATTRIBUTES
                .iter()
                .find(|name| attr.path().is_ident(name))
            else {
                continue;
            };

            let value = match &attr.meta {
                Meta::NameValue(meta) => match &meta.value {
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(s), ..
                    }) => s.value(),
                    other => {
                        return Err(syn::Error::new_spanned(
                            other,
                            format!("`{name}` expects a string literal"),
                        ))
                    }
                },
                _ => {
                    return Err(syn::Error::new_spanned(
                        attr,
                        format!("expected `#[{name} = \"...\"]`"),
                    ))
                }
            };

            let slot = match *name {
                "env" => &mut attrs.env,
                "env_default" => &mut attrs.default,
                "env_prefix" => &mut attrs.prefix,
                "env_expand" => &mut attrs.expand,
                _ => &mut attrs.separator,
            };
            if slot.is_some() {
                return Err(syn::Error::new_spanned(
                    attr,
                    format!("duplicate `{name}` attribute"),
                ));
            }
            *slot = Some(value);
        }

        Ok(attrs)
    }
}
