use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `FromReflect`.
///
/// Without `clone` the value cannot be copied out of a `&dyn Reflect`, so
/// only `take_from_reflect` on a value of the exact type succeeds.
pub(crate) fn impl_trait_from_reflect(meta: &ReflectMeta) -> TokenStream {
    let vc = meta.vc_accessor_path();
    let reflect_ = crate::path::reflect_(vc);
    let from_reflect_ = crate::path::from_reflect_(vc);
    let macro_exports_ = crate::path::macro_exports_(vc);

    let body = match meta.attrs().clone {
        Some(span) => quote_spanned! { span =>
            value.downcast_ref::<Self>().map(::core::clone::Clone::clone)
        },
        None => quote! {
            let _ = value;
            ::core::option::Option::None
        },
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(&super::flag_predicates(meta));

    quote! {
        impl #impl_generics #from_reflect_ for #ident #ty_generics #where_clause {
            fn from_reflect(value: &dyn #reflect_) -> ::core::option::Option<Self> {
                #body
            }

            fn take_from_reflect(
                value: #macro_exports_::Box<dyn #reflect_>,
            ) -> ::core::result::Result<Self, #macro_exports_::Box<dyn #reflect_>> {
                value.take::<Self>()
            }
        }
    }
}
