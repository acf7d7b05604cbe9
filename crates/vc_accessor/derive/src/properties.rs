//! `#[properties]`: exports the methods of an inherent impl block.

use proc_macro2::TokenStream;
use quote::{ToTokens, format_ident, quote};
use syn::spanned::Spanned;
use syn::{
    FnArg, GenericArgument, ImplItem, ImplItemFn, ItemImpl, Path, PathArguments, ReturnType,
    Type, WherePredicate,
};

use crate::PROPERTY_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// Signatures

/// How an argument is extracted from the `ArgList`.
enum Param {
    /// `T`: moved out and converted.
    Owned(Type),
    /// `&T`: borrowed, must be exactly a `T`.
    Borrowed(Type),
    /// `&str`: borrowed as `String`.
    Str,
    /// `&[T]`: converted into a `Vec<T>` that is then borrowed.
    Slice(Type),
}

impl Param {
    /// The type recorded in the member table.
    fn shape_ty(&self, exports: &TokenStream) -> TokenStream {
        match self {
            Self::Owned(ty) | Self::Borrowed(ty) => ty.to_token_stream(),
            Self::Str => quote! { #exports::String },
            Self::Slice(item) => quote! { #exports::Vec<#item> },
        }
    }

    fn is_taken(&self) -> bool {
        matches!(self, Self::Owned(_) | Self::Slice(_))
    }
}

/// What a method returns, before boxing.
enum Output {
    Unit,
    Owned(Type),
    /// `&T`, cloned.
    Borrowed(Type),
    /// `&str`, copied into a `String`.
    Str,
    /// `&[T]`, copied into a `Box<[T]>`.
    Slice(Type),
}

impl Output {
    fn shape_ty(&self, exports: &TokenStream) -> Option<TokenStream> {
        match self {
            Self::Unit => None,
            Self::Owned(ty) | Self::Borrowed(ty) => Some(ty.to_token_stream()),
            Self::Str => Some(quote! { #exports::String }),
            Self::Slice(item) => Some(quote! { #exports::Box<[#item]> }),
        }
    }

    /// Statements running `call` and returning its boxed value.
    fn finish(&self, call: TokenStream, exports: &TokenStream) -> TokenStream {
        let value = match self {
            Self::Unit => {
                return quote! {
                    #call;
                    ::core::result::Result::Ok(::core::option::Option::None)
                };
            }
            Self::Owned(_) => quote! { __value },
            Self::Borrowed(_) => quote! { ::core::clone::Clone::clone(__value) },
            Self::Str => quote! { <#exports::String as ::core::convert::From<&str>>::from(__value) },
            Self::Slice(item) => {
                quote! { <#exports::Box<[#item]> as ::core::convert::From<&[#item]>>::from(__value) }
            }
        };
        quote! {
            let __value = #call;
            ::core::result::Result::Ok(::core::option::Option::Some(#exports::Box::new(#value)))
        }
    }
}

/// A method the macro can export, with its decoded signature.
struct Exported<'a> {
    method: &'a ImplItemFn,
    exclusive: bool,
    params: Vec<Param>,
    output: Output,
    /// `Result<T, E>` return: `output` describes `T`.
    fallible: bool,
}

fn is_str(ty: &Type) -> bool {
    matches!(ty, Type::Path(path) if path.qself.is_none() && path.path.is_ident("str"))
}

fn is_unit(ty: &Type) -> bool {
    matches!(ty, Type::Tuple(tuple) if tuple.elems.is_empty())
}

/// `None` if the type cannot cross the `dyn Reflect` boundary.
fn decode_param(ty: &Type) -> Option<Param> {
    match ty {
        Type::Reference(reference) if reference.mutability.is_none() => match &*reference.elem {
            elem if is_str(elem) => Some(Param::Str),
            Type::Slice(slice) if !crate::utils::borrows(&slice.elem) => Some(Param::Slice((*slice.elem).clone())),
            elem if !crate::utils::borrows(elem) => Some(Param::Borrowed(elem.clone())),
            _ => None,
        },
        ty if !crate::utils::borrows(ty) => Some(Param::Owned(ty.clone())),
        _ => None,
    }
}

fn decode_output(ty: &Type) -> Option<Output> {
    match ty {
        ty if is_unit(ty) => Some(Output::Unit),
        Type::Reference(reference) if reference.mutability.is_none() => match &*reference.elem {
            elem if is_str(elem) => Some(Output::Str),
            Type::Slice(slice) if !crate::utils::borrows(&slice.elem) => Some(Output::Slice((*slice.elem).clone())),
            elem if !crate::utils::borrows(elem) => Some(Output::Borrowed(elem.clone())),
            _ => None,
        },
        ty if !crate::utils::borrows(ty) => Some(Output::Owned(ty.clone())),
        _ => None,
    }
}

/// How a return type reports failure.
enum Fallibility<'a> {
    Infallible,
    /// `Result<T, E>` or an alias such as `io::Result<T>`; holds `T`.
    Fallible(&'a Type),
    /// A `Result` alias without arguments, such as `fmt::Result`. Its
    /// success type cannot be seen from the signature.
    Hidden,
}

fn fallibility(ty: &Type) -> Fallibility<'_> {
    let Type::Path(path) = ty else {
        return Fallibility::Infallible;
    };
    let Some(segment) = path.path.segments.last() else {
        return Fallibility::Infallible;
    };
    if segment.ident != "Result" {
        return Fallibility::Infallible;
    }
    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return Fallibility::Hidden;
    };
    match args.args.first() {
        Some(GenericArgument::Type(ok)) => Fallibility::Fallible(ok),
        _ => Fallibility::Hidden,
    }
}

/// Decodes `method`, or `None` if it is not exported.
fn export(method: &ImplItemFn) -> syn::Result<Option<Exported<'_>>> {
    let sig = &method.sig;
    if has_skip_attr(method)?
        || !sig.generics.params.iter().all(|param| matches!(param, syn::GenericParam::Lifetime(_)))
        || sig.asyncness.is_some()
        || sig.unsafety.is_some()
        || sig.variadic.is_some()
    {
        return Ok(None);
    }

    let mut inputs = sig.inputs.iter();
    let exclusive = match inputs.next() {
        Some(FnArg::Receiver(receiver)) if receiver.reference.is_some() && receiver.colon_token.is_none() => {
            receiver.mutability.is_some()
        }
        _ => return Ok(None),
    };

    let mut params = Vec::new();
    for input in inputs {
        let FnArg::Typed(pat) = input else {
            return Ok(None);
        };
        match decode_param(&pat.ty) {
            Some(param) => params.push(param),
            None => return Ok(None),
        }
    }

    let (output, fallible) = match &sig.output {
        ReturnType::Default => (Output::Unit, false),
        ReturnType::Type(_, ty) => match fallibility(ty) {
            Fallibility::Fallible(ok) => match decode_output(ok) {
                Some(output) => (output, true),
                None => return Ok(None),
            },
            Fallibility::Infallible => match decode_output(ty) {
                Some(output) => (output, false),
                None => return Ok(None),
            },
            Fallibility::Hidden => return Ok(None),
        },
    };

    Ok(Some(Exported {
        method,
        exclusive,
        params,
        output,
        fallible,
    }))
}

fn has_skip_attr(method: &ImplItemFn) -> syn::Result<bool> {
    let mut skip = false;
    for attr in method.attrs.iter().filter(|attr| attr.path().is_ident(PROPERTY_ATTRIBUTE_NAME)) {
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}

// -----------------------------------------------------------------------------
// Code generation

/// `Member::method(..)` for one exported method.
fn method_member(vc: &Path, exported: &Exported) -> TokenStream {
    let typed_ = crate::path::typed_(vc);
    let member_ = crate::path::member_(vc);
    let exports = crate::path::macro_exports_(vc);

    let method = exported.method;
    let ident = &method.sig.ident;
    let name = ident.to_string();
    let name = name.trim_start_matches("r#");
    let visibility = match &method.vis {
        syn::Visibility::Public(_) => quote! { #member_::Visibility::Public },
        syn::Visibility::Restricted(_) => quote! { #member_::Visibility::Crate },
        syn::Visibility::Inherited => quote! { #member_::Visibility::Private },
    };

    let param_shapes = exported.params.iter().map(|param| {
        let ty = param.shape_ty(&exports);
        quote! { <#ty as #typed_>::type_shape() }
    });
    let output_shape = match exported.output.shape_ty(&exports) {
        Some(ty) => quote! { ::core::option::Option::Some(<#ty as #typed_>::type_shape()) },
        None => quote! { ::core::option::Option::None },
    };

    // Arguments are moved out first, then borrowed.
    let locals: Vec<_> = (0..exported.params.len()).map(|index| format_ident!("__arg{index}")).collect();
    let extract = |taken: bool| {
        exported
            .params
            .iter()
            .enumerate()
            .filter(move |(_, param)| param.is_taken() == taken)
            .map(|(index, param)| {
                let local = &locals[index];
                let ty = param.shape_ty(&exports);
                let how = if taken { quote! { take } } else { quote! { borrow } };
                quote! { let #local = __args.#how::<#ty>(#index)?; }
            })
            .collect::<Vec<_>>()
    };
    let takes = extract(true);
    let borrows = extract(false);
    let call_args = exported.params.iter().zip(&locals).map(|(param, local)| match param {
        Param::Owned(_) | Param::Borrowed(_) => quote! { #local },
        Param::Str => quote! { #local.as_str() },
        Param::Slice(_) => quote! { #local.as_slice() },
    });

    let args_pat = if exported.params.is_empty() {
        quote! { _ }
    } else if takes.is_empty() {
        quote! { __args }
    } else {
        quote! { mut __args }
    };

    let mut call = quote! { Self::#ident(this, #(#call_args),*) };
    if exported.fallible {
        call = quote! { #call.map_err(#member_::InvokeError::failed)? };
    }
    let body = exported.output.finish(call, &exports);

    let (variant, downcast) = if exported.exclusive {
        (quote! { Exclusive }, quote! { downcast_mut })
    } else {
        (quote! { Shared }, quote! { downcast_ref })
    };

    quote! {
        #member_::Member::method(
            #name,
            #visibility,
            #exports::vec![#(#param_shapes),*],
            #output_shape,
            #member_::MethodHandle::#variant(|target, #args_pat| {
                let this = target
                    .#downcast::<Self>()
                    .ok_or_else(#member_::InvokeError::target::<Self>)?;
                #(#takes)*
                #(#borrows)*
                #body
            }),
        )
    }
}

/// Expands `#[properties]` on `item`.
pub(crate) fn expand(mut item: ItemImpl) -> syn::Result<TokenStream> {
    if let Some((_, path, _)) = &item.trait_ {
        return Err(syn::Error::new(
            path.span(),
            "`#[properties]` only applies to inherent impl blocks",
        ));
    }

    let vc = crate::path::vc_accessor();
    let typed_ = crate::path::typed_(&vc);
    let reflect_ = crate::path::reflect_(&vc);
    let from_reflect_ = crate::path::from_reflect_(&vc);
    let member_ = crate::path::member_(&vc);
    let macro_exports_ = crate::path::macro_exports_(&vc);

    let mut members = Vec::new();
    let mut predicates: Vec<WherePredicate> = Vec::new();
    for impl_item in &item.items {
        let ImplItem::Fn(method) = impl_item else {
            continue;
        };
        let Some(exported) = export(method)? else {
            continue;
        };
        if !item.generics.params.is_empty() {
            for param in &exported.params {
                let ty = param.shape_ty(&macro_exports_);
                predicates.push(syn::parse_quote!(#ty: #typed_ + #from_reflect_));
            }
            if let Some(ty) = exported.output.shape_ty(&macro_exports_) {
                predicates.push(syn::parse_quote!(#ty: #typed_));
            }
        }
        members.push(method_member(&vc, &exported));
    }

    let self_ty = item.self_ty.clone();
    let mut generics = item.generics.clone();
    if !generics.params.is_empty() {
        let where_clause = generics.make_where_clause();
        where_clause.predicates.push(syn::parse_quote!(#self_ty: #reflect_));
        where_clause.predicates.extend(predicates);
    }
    let (impl_generics, _, where_clause) = generics.split_for_impl();

    strip_property_attrs(&mut item);

    Ok(quote! {
        #item

        impl #impl_generics #member_::ReflectMethods for #self_ty #where_clause {
            fn methods() -> #macro_exports_::Vec<#member_::Member> {
                #macro_exports_::vec![#(#members),*]
            }
        }
    })
}

/// Removes `#[property(..)]`, which only this macro understands.
fn strip_property_attrs(item: &mut ItemImpl) {
    for impl_item in &mut item.items {
        if let ImplItem::Fn(method) = impl_item {
            method.attrs.retain(|attr| !attr.path().is_ident(PROPERTY_ATTRIBUTE_NAME));
        }
    }
}
