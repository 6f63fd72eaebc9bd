//! Derive macro implementation for envbind

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields};

mod attrs;

use attrs::FieldAttrs;

/// `Bind` derive macro
///
/// Generates the struct arm of the recursive binder: one
/// `Context::bind_field` call per `#[env("...")]`-tagged field, in
/// declaration order, plus the zero-value check over the same fields. Fields
/// without an `#[env]` attribute are skipped entirely and their types need
/// not implement `Bind`.
///
/// # Example
///
/// See the `envbind` crate documentation for the directive grammar and usage
/// examples.
#[proc_macro_derive(Bind, attributes(env))]
pub fn derive_bind(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    let struct_name = &input.ident;

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return syn::Error::new_spanned(
                    &input,
                    "Bind only supports structs with named fields",
                )
                .to_compile_error()
                .into();
            }
        },
        _ => {
            return syn::Error::new_spanned(&input, "Bind only supports structs")
                .to_compile_error()
                .into();
        }
    };

    // Tagged fields, in declaration order.
    let mut bound_fields = Vec::new();
    for field in fields {
        let attrs = match FieldAttrs::from_field(field) {
            Ok(attrs) => attrs,
            Err(err) => return err.to_compile_error().into(),
        };
        if let Some(directive) = attrs.directive {
            let ident = field.ident.clone().expect("named field has an ident");
            bound_fields.push((ident, directive));
        }
    }

    let bind_calls = bound_fields.iter().map(|(ident, directive)| {
        quote! {
            cx.bind_field(&mut self.#ident, #directive)?;
        }
    });

    let unset_checks: Vec<_> = bound_fields
        .iter()
        .map(|(ident, _)| quote! { ::envbind::Bind::is_unset(&self.#ident) })
        .collect();
    let is_unset_body = quote! { true #(&& #unset_checks)* };

    // Underscore the context for structs with no tagged fields.
    let cx_pat = if bound_fields.is_empty() {
        quote! { _cx }
    } else {
        quote! { cx }
    };

    let expanded = quote! {
        impl ::envbind::Bind for #struct_name {
            fn bind(
                &mut self,
                #cx_pat: &::envbind::Context<'_>,
            ) -> ::std::result::Result<(), ::envbind::BindError> {
                #(#bind_calls)*
                Ok(())
            }

            fn is_unset(&self) -> bool {
                #is_unset_body
            }
        }
    };

    TokenStream::from(expanded)
}
