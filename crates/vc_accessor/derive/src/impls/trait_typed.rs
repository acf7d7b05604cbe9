use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::ReflectMeta;

/// Generate implementation code for `Typed`.
///
/// Reflected types are opaque to the container operations. `default` adds a
/// default constructor to the shape, `clone` a conversion.
pub(crate) fn impl_trait_typed(meta: &ReflectMeta) -> TokenStream {
    let vc = meta.vc_accessor_path();
    let typed_ = crate::path::typed_(vc);
    let info_ = crate::path::info_(vc);

    let with_default = match meta.attrs().default {
        Some(span) => quote_spanned! { span => .with_default_of::<Self>() },
        None => crate::utils::empty(),
    };
    let with_conversion = match meta.attrs().clone {
        Some(span) => quote_spanned! { span => .with_conversion::<Self>() },
        None => crate::utils::empty(),
    };
    let shape_tokens = quote! {
        #info_::TypeShape::new::<Self>(#info_::ShapeKind::Opaque)
            #with_default
            #with_conversion
    };

    let inner_cell_tokens = if meta.impl_with_generic() {
        quote! {
            static CELL: #info_::GenericShapeCell = #info_::GenericShapeCell::new();
            CELL.get_or_insert::<Self>(|| {
                #shape_tokens
            })
        }
    } else {
        quote! {
            static CELL: #info_::NonGenericShapeCell = #info_::NonGenericShapeCell::new();
            CELL.get_or_init(|| {
                #shape_tokens
            })
        }
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(&super::flag_predicates(meta));

    quote! {
        impl #impl_generics #typed_ for #ident #ty_generics #where_clause {
            fn type_shape() -> &'static #info_::TypeShape {
                #inner_cell_tokens
            }
        }
    }
}
