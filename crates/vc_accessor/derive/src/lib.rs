//! See following macros:
//!
//! - [`Reflect`]
//! - [`properties`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemImpl, parse_macro_input};

static REFLECT_ATTRIBUTE_NAME: &str = "reflect";
static PROPERTY_ATTRIBUTE_NAME: &str = "property";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod properties;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Reflection and field table
///
/// `#[derive(Reflect)]` implements the following traits:
///
/// - `Typed`
/// - `Reflect`
/// - `FromReflect`
/// - `Introspect`
///
/// Structs with named fields, tuple structs and unit structs list their
/// fields as members. Enums are reflected without fields. Every reflected
/// type is an opaque value to the container operations.
///
/// ## Standard traits
///
/// The macro cannot see which standard traits the type implements, so it
/// assumes none. Declare them to unlock the matching behavior:
///
/// ```rust, ignore
/// #[derive(Reflect, Clone, Default, PartialEq, Debug)]
/// #[reflect(clone, default, partial_eq, debug)]
/// struct Tag { /* ... */ }
/// ```
///
/// - `clone`: `reflect_clone` and `FromReflect` work, so the type can be read
///   through accessors and stored in containers.
/// - `default`: containers of this type can be padded when they grow.
/// - `partial_eq`: `REMOVE` can find values of this type.
/// - `debug`: `reflect_debug` uses `Debug`.
///
/// ## Methods
///
/// `#[reflect(methods)]` appends the methods exported by a
/// [`#[properties]`](macro@properties) impl block to the member table.
/// The impl block is required once the flag is set.
///
/// ## Auto registration
///
/// `#[reflect(auto_register)]` lets `DescriptorCache::auto_register` find the
/// type. It has no effect on generic types, or when the `auto_register`
/// feature is disabled.
///
/// ## Field attributes
///
/// - `#[reflect(skip)]`: leave the field out of the member table.
/// - `#[reflect(read_only)]`: the field gets a `GET` accessor but no `SET`.
/// - `#[reflect(rename = "name")]`: the property name of the field.
///
/// ## Example
///
/// ```rust, ignore
/// #[derive(Reflect, Clone)]
/// #[reflect(clone, auto_register)]
/// pub struct Bag {
///     pub tags: Vec<String>,
///     #[reflect(read_only)]
///     pub owner: String,
///     #[reflect(skip)]
///     cache: Vec<u8>,
/// }
/// ```
///
/// Field visibility is recorded: `pub` fields are `Public`, `pub(crate)`
/// and other restricted fields are `Crate`, the rest `Private`.
#[proc_macro_derive(Reflect, attributes(reflect))]
pub fn derive_reflect(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::reflect_impls(&ast)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}

/// # Method table
///
/// Placed on an inherent impl block, exports its methods to the accessor
/// builders by implementing `ReflectMethods`. Combine it with
/// `#[reflect(methods)]` on the type.
///
/// Every method taking `&self` or `&mut self` is exported, except:
///
/// - methods marked `#[property(skip)]`,
/// - generic, `async` or `unsafe` methods,
/// - methods with `&mut` parameters or returning references other than
///   `&T`, `&str` and `&[T]`,
/// - associated functions and methods taking `self` by value,
/// - methods returning a `Result` alias without arguments (`fmt::Result`).
///
/// Parameters may be owned (`T`, converted through `FromReflect`), `&T`
/// (the argument must be a `T`), `&str` (a `String`) or `&[T]` (any sequence
/// of `T`).
///
/// Return values are boxed: `&T` is cloned, `&str` becomes `String`, `&[T]`
/// becomes `Box<[T]>`. A `Result<T, E>` return fails the call with the error
/// as cause when it is `Err`.
///
/// ## Example
///
/// ```rust, ignore
/// #[derive(Reflect)]
/// #[reflect(methods)]
/// struct Bag { tags: Vec<String> }
///
/// #[properties]
/// impl Bag {
///     pub fn get_tags(&self) -> &[String] { &self.tags }
///     pub fn set_tags(&mut self, tags: Vec<String>) { self.tags = tags; }
///
///     #[property(skip)]
///     pub fn get_internal(&self) -> u32 { 0 }
/// }
/// ```
#[proc_macro_attribute]
pub fn properties(attr: TokenStream, item: TokenStream) -> TokenStream {
    if !attr.is_empty() {
        return syn::Error::new(
            proc_macro2::Span::call_site(),
            "`#[properties]` takes no arguments",
        )
        .into_compile_error()
        .into();
    }
    let item = parse_macro_input!(item as ItemImpl);

    properties::expand(item)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
