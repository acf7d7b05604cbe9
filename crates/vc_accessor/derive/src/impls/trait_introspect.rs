use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};

use crate::derive_data::{ReflectMeta, StructField};

/// Generate implementation code for `Introspect`.
///
/// Lists the fields in declaration order, followed by the methods of the
/// `#[properties]` block if `methods` is set.
pub(crate) fn impl_trait_introspect(meta: &ReflectMeta) -> TokenStream {
    let vc = meta.vc_accessor_path();
    let member_ = crate::path::member_(vc);
    let macro_exports_ = crate::path::macro_exports_(vc);

    let fields = meta.fields().iter().map(|field| field_member(meta, field));

    let methods_tokens = match meta.attrs().methods {
        Some(span) => quote_spanned! { span =>
            members.extend(<Self as #member_::ReflectMethods>::methods());
        },
        None => crate::utils::empty(),
    };

    let ident = meta.ident();
    let (impl_generics, ty_generics, where_clause) = meta.split_generics(&super::flag_predicates(meta));

    quote! {
        impl #impl_generics #member_::Introspect for #ident #ty_generics #where_clause {
            fn members() -> #macro_exports_::Vec<#member_::Member> {
                #[allow(unused_mut)]
                let mut members: #macro_exports_::Vec<#member_::Member> = #macro_exports_::vec![#(#fields),*];
                #methods_tokens
                members
            }
        }
    }
}

/// `Member::field(..)` for one field.
fn field_member(meta: &ReflectMeta, field: &StructField) -> TokenStream {
    let vc = meta.vc_accessor_path();
    let reflect_ = crate::path::reflect_(vc);
    let typed_ = crate::path::typed_(vc);
    let member_ = crate::path::member_(vc);

    let StructField {
        member,
        name,
        ty,
        visibility,
        read_only,
    } = field;

    let get = quote! {
        |target| {
            target.downcast_ref::<Self>().map(|this| &this.#member as &dyn #reflect_)
        }
    };
    let handle = if *read_only {
        quote! { #member_::FieldHandle::read_only(#get) }
    } else {
        quote! {
            #member_::FieldHandle::writable(
                #get,
                |target| {
                    target.downcast_mut::<Self>().map(|this| &mut this.#member as &mut dyn #reflect_)
                },
            )
        }
    };

    quote! {
        #member_::Member::field(
            #name,
            #visibility,
            <#ty as #typed_>::type_shape(),
            #handle,
        )
    }
}
