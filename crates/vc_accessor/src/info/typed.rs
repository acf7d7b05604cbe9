use crate::Reflect;
use crate::info::TypeShape;

/// A type with a static [`TypeShape`].
///
/// Implemented by `#[derive(Reflect)]` and for every built-in reflected type.
/// The shape is created once and lives for the rest of the program.
///
/// # Examples
///
/// ```
/// use vc_accessor::info::{ShapeKind, Typed};
///
/// let shape = <Vec<u8>>::type_shape();
/// assert!(matches!(shape.kind(), ShapeKind::List { .. }));
/// assert!(core::ptr::eq(shape, <Vec<u8>>::type_shape()));
/// ```
pub trait Typed: Reflect {
    fn type_shape() -> &'static TypeShape;
}
