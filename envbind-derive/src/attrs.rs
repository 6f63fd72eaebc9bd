//! Attribute extraction for `#[env("...")]` annotations.
//!
//! The derive passes the directive string through to the runtime tag parser
//! untouched; this module only extracts the literal from the field.

use syn::{Field, LitStr};

/// Parsed `#[env(...)]` attribute from a struct field.
#[derive(Debug, Default)]
pub struct FieldAttrs {
    /// The raw binding directive, e.g. `"TIMEOUT;default: 5;gte: 1"`.
    ///
    /// `None` when the field carries no `#[env]` attribute; such fields take
    /// no part in binding and their types need not implement `Bind`.
    pub directive: Option<String>,
}

impl FieldAttrs {
    /// Extract the `#[env("...")]` directive from a struct field.
    ///
    /// Ignores unrelated attributes so other macros can process them.
    pub fn from_field(field: &Field) -> syn::Result<Self> {
        let mut attrs = Self::default();

        for attr in &field.attrs {
            if !attr.path().is_ident("env") {
                continue;
            }

            let lit: LitStr = attr.parse_args()?;
            attrs.directive = Some(lit.value());
        }

        Ok(attrs)
    }
}
