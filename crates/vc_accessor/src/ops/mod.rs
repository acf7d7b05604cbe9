//! Container traits and the operations accessors perform on them.

mod array;
mod kind;
mod list;
mod map;

pub mod container;

pub use array::Array;
pub use kind::{ReflectKind, ReflectMut, ReflectRef};
pub use list::List;
pub use map::Map;
