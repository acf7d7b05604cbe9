use crate::access::{AccessError, Accessor, AccessorMode, PropertyName};
use crate::builder::naming::{self, GET, IS, PUT, SET};
use crate::builder::{BuildContext, Claim, Decline};
use crate::info::{IntegerKind, TypeShape};
use crate::member::{Member, MethodHandle};

// -----------------------------------------------------------------------------
// Helpers

fn method_handle(member: &Member) -> Result<MethodHandle, Decline> {
    member.method_handle().ok_or(Decline::MemberKind)
}

fn arity(member: &Member, expected: usize) -> Result<(), Decline> {
    match member.arity() {
        found if found == expected => Ok(()),
        found => Err(Decline::Arity { expected, found }),
    }
}

fn output_shape(member: &Member) -> Result<&'static TypeShape, Decline> {
    member.output().ok_or(Decline::UnsupportedConversion {
        expected: "a return value",
        found: "()",
    })
}

/// The stem of a getter name: `get` prefix, or the whole name for bare getters.
fn getter_stem<'a>(cx: &BuildContext<'_>, name: &'a str) -> Option<&'a str> {
    match naming::strip_prefix(name, GET) {
        Some(stem) => Some(stem),
        None if cx.config.naming.bare_getters && !naming::has_verb_prefix(name) => Some(name),
        None => None,
    }
}

fn integer_param(member: &Member) -> Result<(), Decline> {
    let param = member.params()[0];
    if param.is_integer() {
        return Ok(());
    }
    Err(Decline::UnsupportedConversion {
        expected: "an integer index",
        found: param.type_name(),
    })
}

fn named(stem: &str) -> Result<PropertyName, Decline> {
    naming::property_name(stem).ok_or(Decline::NamePattern)
}

fn claim(
    cx: &BuildContext<'_>,
    member: &Member,
    handle: MethodHandle,
    property: PropertyName,
    mode: AccessorMode,
    property_type: &'static TypeShape,
) -> Claim {
    Claim::Built(Accessor::method(
        cx.target,
        property,
        mode,
        property_type,
        member.name(),
        handle,
    ))
}

/// Public builders wrapping private bodies that decline through `Err`.
macro_rules! method_builders {
    ($($(#[$doc:meta])* $name:ident => $body:ident;)*) => {$(
        $(#[$doc])*
        pub fn $name(cx: &BuildContext<'_>, member: &Member) -> Result<Claim, AccessError> {
            Ok($body(cx, member).unwrap_or_else(Claim::Declined))
        }
    )*};
}

// -----------------------------------------------------------------------------
// Builders

method_builders! {
    /// `GET_SIZE`: a zero-argument getter whose name ends in `Size`, `Count`,
    /// `Length` or `Len` and which returns an integer at least as wide as `i32`.
    ///
    /// `getSize` names the property `size`; `getTagsCount` names `tags`.
    size => build_size;

    /// `GET`: a zero-argument method returning a value, named `getX`, `isX`
    /// (returning `bool`) or, with bare getters, `x`.
    get => build_get;

    /// `SET`: a one-argument method named `setX`.
    set => build_set;

    /// `ADD`: a one-argument method named `addX`.
    ///
    /// The property name is taken as is: `add_tag` adds to `tag`, not `tags`.
    add => build_add;

    /// `GET_INDEXED`: a getter taking one integer index.
    indexed_get => build_indexed_get;

    /// `SET_INDEXED`: `setX(index, element)` with an integer index.
    indexed_set => build_indexed_set;

    /// `GET_MAPPED`: a getter taking one non-integer key.
    mapped_get => build_mapped_get;

    /// `SET_MAPPED`: `setX(key, value)` with a non-integer key, or `putX(key, value)`.
    mapped_set => build_mapped_set;
}

fn build_size(cx: &BuildContext<'_>, member: &Member) -> Result<Claim, Decline> {
    let handle = method_handle(member)?;
    let stem = getter_stem(cx, member.name()).ok_or(Decline::NamePattern)?;
    let (stem, word) = naming::split_size_suffix(stem).ok_or(Decline::NamePattern)?;
    arity(member, 0)?;
    let output = output_shape(member)?;
    match output.integer() {
        Some(kind) if kind.exactness_difference(IntegerKind::I32) >= 0 => {}
        _ => {
            return Err(Decline::UnsupportedConversion {
                expected: "an integer of at least 32 bits",
                found: output.type_name(),
            });
        }
    }
    let property = if stem.is_empty() {
        PropertyName::new(word).ok_or(Decline::NamePattern)?
    } else {
        named(stem)?
    };
    Ok(claim(cx, member, handle, property, AccessorMode::GetSize, output))
}

fn build_get(cx: &BuildContext<'_>, member: &Member) -> Result<Claim, Decline> {
    let handle = method_handle(member)?;
    let name = member.name();
    let stem = match naming::strip_prefix(name, IS) {
        Some(stem) => {
            let output = output_shape(member)?;
            if !output.is::<bool>() {
                return Err(Decline::UnsupportedConversion {
                    expected: "bool",
                    found: output.type_name(),
                });
            }
            stem
        }
        None => getter_stem(cx, name).ok_or(Decline::NamePattern)?,
    };
    arity(member, 0)?;
    let output = output_shape(member)?;
    Ok(claim(cx, member, handle, named(stem)?, AccessorMode::Get, output))
}

fn build_set(cx: &BuildContext<'_>, member: &Member) -> Result<Claim, Decline> {
    let handle = method_handle(member)?;
    let stem = naming::strip_prefix(member.name(), SET).ok_or(Decline::NamePattern)?;
    arity(member, 1)?;
    let value = member.params()[0];
    Ok(claim(cx, member, handle, named(stem)?, AccessorMode::Set, value))
}

fn build_add(cx: &BuildContext<'_>, member: &Member) -> Result<Claim, Decline> {
    let handle = method_handle(member)?;
    let stem = naming::strip_prefix(member.name(), naming::ADD).ok_or(Decline::NamePattern)?;
    arity(member, 1)?;
    let element = member.params()[0];
    Ok(claim(cx, member, handle, named(stem)?, AccessorMode::Add, element))
}

fn build_indexed_get(cx: &BuildContext<'_>, member: &Member) -> Result<Claim, Decline> {
    let handle = method_handle(member)?;
    let stem = getter_stem(cx, member.name()).ok_or(Decline::NamePattern)?;
    arity(member, 1)?;
    integer_param(member)?;
    let element = output_shape(member)?;
    Ok(claim(cx, member, handle, named(stem)?, AccessorMode::GetIndexed, element))
}

fn build_indexed_set(cx: &BuildContext<'_>, member: &Member) -> Result<Claim, Decline> {
    let handle = method_handle(member)?;
    let stem = naming::strip_prefix(member.name(), SET).ok_or(Decline::NamePattern)?;
    arity(member, 2)?;
    integer_param(member)?;
    let element = member.params()[1];
    Ok(claim(cx, member, handle, named(stem)?, AccessorMode::SetIndexed, element))
}

fn build_mapped_get(cx: &BuildContext<'_>, member: &Member) -> Result<Claim, Decline> {
    let handle = method_handle(member)?;
    let stem = getter_stem(cx, member.name()).ok_or(Decline::NamePattern)?;
    arity(member, 1)?;
    let key = member.params()[0];
    if key.is_integer() {
        return Err(Decline::UnsupportedConversion {
            expected: "a non-integer key",
            found: key.type_name(),
        });
    }
    let value = output_shape(member)?;
    Ok(claim(cx, member, handle, named(stem)?, AccessorMode::GetMapped, value))
}

fn build_mapped_set(cx: &BuildContext<'_>, member: &Member) -> Result<Claim, Decline> {
    let handle = method_handle(member)?;
    let name = member.name();
    let stem = match naming::strip_prefix(name, PUT) {
        Some(stem) => stem,
        None => naming::strip_prefix(name, SET).ok_or(Decline::NamePattern)?,
    };
    arity(member, 2)?;
    let key = member.params()[0];
    if key.is_integer() && naming::strip_prefix(name, PUT).is_none() {
        return Err(Decline::UnsupportedConversion {
            expected: "a non-integer key",
            found: key.type_name(),
        });
    }
    let value = member.params()[1];
    Ok(claim(cx, member, handle, named(stem)?, AccessorMode::SetMapped, value))
}
