// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod trait_from_reflect;
mod trait_introspect;
mod trait_reflect;
mod trait_typed;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;
use syn::{DeriveInput, WherePredicate};

use crate::derive_data::ReflectMeta;

pub(crate) use auto_register::get_auto_register_impl;
pub(crate) use trait_from_reflect::impl_trait_from_reflect;
pub(crate) use trait_introspect::impl_trait_introspect;
pub(crate) use trait_reflect::impl_trait_reflect;
pub(crate) use trait_typed::impl_trait_typed;

/// Everything `#[derive(Reflect)]` generates.
pub(crate) fn reflect_impls(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let meta = ReflectMeta::new(ast)?;

    let typed_tokens = impl_trait_typed(&meta);
    let reflect_tokens = impl_trait_reflect(&meta);
    let from_reflect_tokens = impl_trait_from_reflect(&meta);
    let introspect_tokens = impl_trait_introspect(&meta);
    let auto_register_tokens = get_auto_register_impl(&meta);

    Ok(quote! {
        const _: () = {
            #typed_tokens

            #reflect_tokens

            #from_reflect_tokens

            #introspect_tokens

            #auto_register_tokens
        };
    })
}

/// Bounds the flags of `meta` place on `Self`.
///
/// Only generic types need them; for others the user's impls are checked
/// directly.
fn flag_predicates(meta: &ReflectMeta) -> Vec<WherePredicate> {
    let self_ty = meta.self_ty();
    let attrs = meta.attrs();
    let mut predicates = Vec::new();
    if attrs.clone.is_some() {
        predicates.push(syn::parse_quote!(#self_ty: ::core::clone::Clone));
    }
    if attrs.default.is_some() {
        predicates.push(syn::parse_quote!(#self_ty: ::core::default::Default));
    }
    if attrs.partial_eq.is_some() {
        predicates.push(syn::parse_quote!(#self_ty: ::core::cmp::PartialEq));
    }
    if attrs.debug.is_some() {
        predicates.push(syn::parse_quote!(#self_ty: ::core::fmt::Debug));
    }
    predicates
}
