//! Paths into `vc_accessor` used by the generated code.
//!
//! Keeping them in one place limits the changes needed when the engine's
//! module layout moves.

use proc_macro2::TokenStream;
use quote::quote;

// -----------------------------------------------------------------------------
// Crate Path

/// The path under which `vc_accessor` is reachable from the calling crate.
///
/// Scans the caller's `Cargo.toml`, which is costly, so the result is passed
/// around instead of being looked up again.
pub(crate) fn vc_accessor() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_accessor"))
}

// -----------------------------------------------------------------------------
// Items

#[inline(always)]
pub(crate) fn reflect_(vc: &syn::Path) -> TokenStream {
    quote! { #vc::Reflect }
}

#[inline(always)]
pub(crate) fn from_reflect_(vc: &syn::Path) -> TokenStream {
    quote! { #vc::FromReflect }
}

#[inline(always)]
pub(crate) fn typed_(vc: &syn::Path) -> TokenStream {
    quote! { #vc::info::Typed }
}

#[inline(always)]
pub(crate) fn info_(vc: &syn::Path) -> TokenStream {
    quote! { #vc::info }
}

#[inline(always)]
pub(crate) fn ops_(vc: &syn::Path) -> TokenStream {
    quote! { #vc::ops }
}

#[inline(always)]
pub(crate) fn member_(vc: &syn::Path) -> TokenStream {
    quote! { #vc::member }
}

#[inline(always)]
pub(crate) fn macro_exports_(vc: &syn::Path) -> TokenStream {
    quote! { #vc::__macro_exports }
}
