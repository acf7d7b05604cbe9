use proc_macro2::Span;
use syn::spanned::Spanned;
use syn::{Attribute, LitStr};

use crate::REFLECT_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// TypeAttributes

/// Flags from `#[reflect(...)]` on the type.
///
/// Each flag keeps the span it was written at, so generated code that fails
/// to compile points back at the attribute.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    pub clone: Option<Span>,
    pub default: Option<Span>,
    pub partial_eq: Option<Span>,
    pub debug: Option<Span>,
    pub methods: Option<Span>,
    pub auto_register: Option<Span>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident(REFLECT_ATTRIBUTE_NAME)) {
            attr.parse_nested_meta(|meta| {
                let span = meta.path.span();
                let flag = match meta.path.get_ident().map(ToString::to_string).as_deref() {
                    Some("clone") => &mut parsed.clone,
                    Some("default") => &mut parsed.default,
                    Some("partial_eq") => &mut parsed.partial_eq,
                    Some("debug") => &mut parsed.debug,
                    Some("methods") => &mut parsed.methods,
                    Some("auto_register") => &mut parsed.auto_register,
                    _ => {
                        return Err(meta.error(
                            "expected one of `clone`, `default`, `partial_eq`, `debug`, `methods`, `auto_register`",
                        ));
                    }
                };
                if flag.is_some() {
                    return Err(meta.error("duplicate flag"));
                }
                *flag = Some(span);
                Ok(())
            })?;
        }
        Ok(parsed)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// `#[reflect(...)]` on a field.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    pub skip: bool,
    pub read_only: bool,
    pub rename: Option<LitStr>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut parsed = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident(REFLECT_ATTRIBUTE_NAME)) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    parsed.skip = true;
                } else if meta.path.is_ident("read_only") {
                    parsed.read_only = true;
                } else if meta.path.is_ident("rename") {
                    let name: LitStr = meta.value()?.parse()?;
                    if name.value().is_empty() {
                        return Err(syn::Error::new(name.span(), "property names cannot be empty"));
                    }
                    parsed.rename = Some(name);
                } else {
                    return Err(meta.error("expected one of `skip`, `read_only`, `rename = \"..\"`"));
                }
                Ok(())
            })?;
        }
        Ok(parsed)
    }
}
