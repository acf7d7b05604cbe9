use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `Reflect`.
pub(crate) fn impl_trait_reflect(meta: &ReflectMeta) -> TokenStream {
    let vc = meta.vc_accessor_path();
    let reflect_ = crate::path::reflect_(vc);
    let typed_ = crate::path::typed_(vc);
    let info_ = crate::path::info_(vc);
    let ops_ = crate::path::ops_(vc);
    let macro_exports_ = crate::path::macro_exports_(vc);

    let clone_tokens = match meta.attrs().clone {
        Some(span) => quote_spanned! { span =>
            #[inline]
            fn reflect_clone(&self) -> ::core::option::Option<#macro_exports_::Box<dyn #reflect_>> {
                ::core::option::Option::Some(#macro_exports_::Box::new(::core::clone::Clone::clone(self)))
            }
        },
        None => quote! {
            #[inline]
            fn reflect_clone(&self) -> ::core::option::Option<#macro_exports_::Box<dyn #reflect_>> {
                ::core::option::Option::None
            }
        },
    };

    let partial_eq_tokens = match meta.attrs().partial_eq {
        Some(span) => quote_spanned! { span =>
            fn reflect_partial_eq(&self, other: &dyn #reflect_) -> ::core::option::Option<bool> {
                ::core::option::Option::Some(
                    other
                        .downcast_ref::<Self>()
                        .is_some_and(|other| ::core::cmp::PartialEq::eq(self, other)),
                )
            }
        },
        None => crate::utils::empty(),
    };

    let debug_tokens = match meta.attrs().debug {
        Some(span) => quote_spanned! { span =>
            #[inline]
            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }
        },
        None => crate::utils::empty(),
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(&super::flag_predicates(meta));

    quote! {
        impl #impl_generics #reflect_ for #ident #ty_generics #where_clause {
            #[inline]
            fn reflect_shape(&self) -> &'static #info_::TypeShape {
                <Self as #typed_>::type_shape()
            }

            #[inline]
            fn reflect_kind(&self) -> #ops_::ReflectKind {
                #ops_::ReflectKind::Opaque
            }

            #[inline]
            fn reflect_ref(&self) -> #ops_::ReflectRef<'_> {
                #ops_::ReflectRef::Opaque(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> #ops_::ReflectMut<'_> {
                #ops_::ReflectMut::Opaque(self)
            }

            fn replace(
                &mut self,
                value: #macro_exports_::Box<dyn #reflect_>,
            ) -> ::core::result::Result<#macro_exports_::Box<dyn #reflect_>, #macro_exports_::Box<dyn #reflect_>> {
                let value = value.take::<Self>()?;
                ::core::result::Result::Ok(#macro_exports_::Box::new(::core::mem::replace(self, value)))
            }

            #clone_tokens

            #partial_eq_tokens

            #debug_tokens
        }
    }
}
