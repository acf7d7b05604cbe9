use proc_macro2::{Span, TokenStream};
use quote::{ToTokens, quote};
use syn::{Data, DeriveInput, Fields, Generics, Ident, Path, Type, WherePredicate};

use super::{FieldAttributes, TypeAttributes};

// -----------------------------------------------------------------------------
// StructField

/// A field that appears in the member table.
pub(crate) struct StructField<'a> {
    /// `tags` or `0`, used to reach the field.
    pub member: syn::Member,
    /// The property name: the field name unless renamed.
    pub name: String,
    pub ty: &'a Type,
    pub visibility: TokenStream,
    pub read_only: bool,
}

// -----------------------------------------------------------------------------
// ReflectMeta

/// Everything the impl generators need to know about the derive input.
pub(crate) struct ReflectMeta<'a> {
    vc_accessor_path: Path,
    attrs: TypeAttributes,
    ident: &'a Ident,
    generics: &'a Generics,
    fields: Vec<StructField<'a>>,
}

impl<'a> ReflectMeta<'a> {
    pub fn new(ast: &'a DeriveInput) -> syn::Result<Self> {
        if let Some(lifetime) = ast.generics.lifetimes().next() {
            return Err(syn::Error::new_spanned(
                lifetime,
                "reflected types cannot borrow: `Reflect` requires `'static`",
            ));
        }

        let vc_accessor_path = crate::path::vc_accessor();
        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;
        let fields = match &ast.data {
            Data::Struct(data) => collect_fields(&vc_accessor_path, &data.fields)?,
            Data::Enum(_) => Vec::new(),
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "`Reflect` cannot be derived for unions",
                ));
            }
        };

        Ok(Self {
            vc_accessor_path,
            attrs,
            ident: &ast.ident,
            generics: &ast.generics,
            fields,
        })
    }

    #[inline]
    pub fn vc_accessor_path(&self) -> &Path {
        &self.vc_accessor_path
    }

    #[inline]
    pub fn attrs(&self) -> &TypeAttributes {
        &self.attrs
    }

    #[inline]
    pub fn ident(&self) -> &Ident {
        self.ident
    }

    #[inline]
    pub fn fields(&self) -> &[StructField<'a>] {
        &self.fields
    }

    /// Whether the type has type or const parameters.
    #[inline]
    pub fn impl_with_generic(&self) -> bool {
        !self.generics.params.is_empty()
    }

    /// `(impl_generics, ty_generics, where_clause)` for one trait impl.
    ///
    /// Generic types get `Typed + FromReflect` on every type parameter,
    /// `Typed` on every field type and the `extra` predicates. Non-generic
    /// types need no bounds.
    pub fn split_generics(&self, extra: &[WherePredicate]) -> (TokenStream, TokenStream, TokenStream) {
        let (impl_generics, ty_generics, _) = self.generics.split_for_impl();
        let mut generics = self.generics.clone();

        if self.impl_with_generic() {
            let vc = &self.vc_accessor_path;
            let typed_ = crate::path::typed_(vc);
            let from_reflect_ = crate::path::from_reflect_(vc);
            let where_clause = generics.make_where_clause();

            for param in self.generics.type_params() {
                let ident = &param.ident;
                where_clause
                    .predicates
                    .push(syn::parse_quote!(#ident: #typed_ + #from_reflect_));
            }
            for field in &self.fields {
                let ty = field.ty;
                where_clause.predicates.push(syn::parse_quote!(#ty: #typed_));
            }
            where_clause.predicates.extend(extra.iter().cloned());
        }

        (
            impl_generics.to_token_stream(),
            ty_generics.to_token_stream(),
            generics.where_clause.to_token_stream(),
        )
    }

    /// `Self` spelled out with its generics, for use in where clauses.
    pub fn self_ty(&self) -> TokenStream {
        let ident = self.ident;
        let (_, ty_generics, _) = self.generics.split_for_impl();
        quote! { #ident #ty_generics }
    }
}

fn collect_fields<'a>(vc: &Path, fields: &'a Fields) -> syn::Result<Vec<StructField<'a>>> {
    let member_ = crate::path::member_(vc);
    let mut collected = Vec::new();

    for (index, field) in fields.iter().enumerate() {
        let attrs = FieldAttributes::parse_attrs(&field.attrs)?;
        if attrs.skip {
            continue;
        }
        let member = match &field.ident {
            Some(ident) => syn::Member::Named(ident.clone()),
            None => syn::Member::Unnamed(syn::Index {
                index: index as u32,
                span: Span::call_site(),
            }),
        };
        let name = match (&attrs.rename, &field.ident) {
            (Some(rename), _) => rename.value(),
            (None, Some(ident)) => ident.to_string().trim_start_matches("r#").to_string(),
            (None, None) => index.to_string(),
        };
        let visibility = match &field.vis {
            syn::Visibility::Public(_) => quote! { #member_::Visibility::Public },
            syn::Visibility::Restricted(_) => quote! { #member_::Visibility::Crate },
            syn::Visibility::Inherited => quote! { #member_::Visibility::Private },
        };
        collected.push(StructField {
            member,
            name,
            ty: &field.ty,
            visibility,
            read_only: attrs.read_only,
        });
    }

    Ok(collected)
}
