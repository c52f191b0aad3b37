//! Derive macro implementation for envbind

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::ext::IdentExt;
use syn::{parse_macro_input, parse_quote, Data, DeriveInput, Fields, Generics, Visibility};

mod attrs;

use attrs::FieldAttrs;

/// `Env` derive macro
///
/// Implements `envbind::Record` and `envbind::Value` for a struct with named
/// fields, so it can be passed to `envbind::parse` and nested in other
/// records.
///
/// # Supported Attributes
///
/// **Field-level**:
/// - `#[env = "KEY[,file][,required]"]`: variable name and options
/// - `#[env_default = "value"]`: raw value used when the variable is absent
/// - `#[env_prefix = "PREFIX_"]`: key prefix for a nested record
/// - `#[env_expand = "true"]`: expand `$VAR` references in the value
/// - `#[env_separator = ":"]`: separator for `Vec<T>` fields
///
/// Private fields are skipped.
///
/// # Example
///
/// See the `envbind` crate documentation for usage examples.
#[proc_macro_derive(
    Env,
    attributes(env, env_default, env_prefix, env_expand, env_separator)
)]
pub fn derive_env(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand(&input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    input,
                    "Env only supports structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(input, "Env only supports structs"));
        }
    };

    let mut visits = Vec::new();
    let mut field_types = Vec::new();
    for field in fields {
        let attrs = FieldAttrs::from_field(field)?;

        // Private fields cannot be set from outside the record.
        if matches!(field.vis, Visibility::Inherited) {
            continue;
        }

        let Some(field_name) = field.ident.as_ref() else {
            continue;
        };
        let name = field_name.unraw().to_string();
        let env = option_tokens(attrs.env);
        let default = option_tokens(attrs.default);
        let prefix = option_tokens(attrs.prefix);
        let expand = option_tokens(attrs.expand);
        let separator = option_tokens(attrs.separator);
        field_types.push(&field.ty);

        visits.push(quote! {
            walker.field(
                &::envbind::FieldMeta {
                    name: #name,
                    env: #env,
                    default: #default,
                    prefix: #prefix,
                    expand: #expand,
                    separator: #separator,
                },
                &mut self.#field_name,
            )?;
        });
    }

    let generics = bound_generics(&input.generics, &field_types);
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::envbind::Record for #struct_name #ty_generics #where_clause {
            fn walk(
                &mut self,
                walker: &mut ::envbind::Walker<'_>,
            ) -> ::core::result::Result<(), ::envbind::Error> {
                #(#visits)*
                ::core::result::Result::Ok(())
            }
        }

        impl #impl_generics ::envbind::Value for #struct_name #ty_generics #where_clause {
            fn as_record(&mut self) -> ::core::option::Option<&mut dyn ::envbind::Record> {
                ::core::option::Option::Some(self)
            }
        }
    })
}

/// Adds `'static` to every type parameter and `Field` to every bound field
/// type, so misuse is reported at the struct instead of inside `walk`.
fn bound_generics(generics: &Generics, field_types: &[&syn::Type]) -> Generics {
    let mut generics = generics.clone();
    if generics.type_params().next().is_none() {
        return generics;
    }

    let params: Vec<_> = generics
        .type_params()
        .map(|param| param.ident.clone())
        .collect();
    let where_clause = generics.make_where_clause();
    for param in params {
        where_clause.predicates.push(parse_quote!(#param: 'static));
    }
    for ty in field_types {
        where_clause
            .predicates
            .push(parse_quote!(#ty: ::envbind::Field));
    }
    generics
}

fn option_tokens(value: Option<String>) -> TokenStream2 {
    match value {
        Some(value) => quote! { ::core::option::Option::Some(#value) },
        None => quote! { ::core::option::Option::None },
    }
}
