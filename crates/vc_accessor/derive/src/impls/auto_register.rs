use proc_macro2::TokenStream;
use quote::quote_spanned;

use crate::derive_data::ReflectMeta;

/// Generate `auto_register` implementation
#[cfg(feature = "auto_register")]
pub(crate) fn get_auto_register_impl(meta: &ReflectMeta) -> TokenStream {
    let Some(span) = meta.attrs().auto_register else {
        return crate::utils::empty();
    };
    // Invalid for generic types.
    if meta.impl_with_generic() {
        return crate::utils::empty();
    }

    let vc = meta.vc_accessor_path();
    let macro_exports_ = crate::path::macro_exports_(vc);
    let ident = meta.ident();

    quote_spanned! { span =>
        #macro_exports_::inventory::submit! {
            #macro_exports_::AutoRegistration(#vc::descriptor::DescriptorCache::register::<#ident>)
        }
    }
}

/// Generate `auto_register` implementation
#[cfg(not(feature = "auto_register"))]
pub(crate) fn get_auto_register_impl(_: &ReflectMeta) -> TokenStream {
    crate::utils::empty()
}
