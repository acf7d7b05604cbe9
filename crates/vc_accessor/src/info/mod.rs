//! Static type descriptions used to classify properties and pad containers.

mod cell;
mod type_shape;
mod typed;

pub use cell::{GenericShapeCell, NonGenericShapeCell};
pub use type_shape::{FloatKind, IntegerKind, ShapeKind, TypeShape};
pub use typed::Typed;
