//! The member table a type exposes to the accessor builders.
//!
//! A [`Member`] is either a field or a method of the target type, together
//! with a type-erased handle that reaches it. `#[derive(Reflect)]` lists the
//! fields, `#[properties]` lists the methods of an impl block.

mod args;
mod error;
mod handle;
mod decl;

pub use args::ArgList;
pub use error::InvokeError;
pub use handle::{ExclusiveFn, FieldHandle, FieldMutFn, FieldRefFn, Handle, MethodHandle, SharedFn};
pub use decl::{Member, MemberKind, Visibility};

use alloc::vec::Vec;

use crate::Reflect;

// -----------------------------------------------------------------------------
// Traits

/// A type with a member table.
///
/// Implemented by `#[derive(Reflect)]`, which lists the non-skipped fields
/// and, with `#[reflect(methods)]`, appends [`ReflectMethods::methods`].
pub trait Introspect: Reflect {
    /// Members in declaration order.
    fn members() -> Vec<Member>;
}

/// The methods of a type, implemented by `#[properties]` on an impl block.
pub trait ReflectMethods: Reflect {
    fn methods() -> Vec<Member>;
}
