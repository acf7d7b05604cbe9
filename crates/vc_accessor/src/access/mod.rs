//! Accessors: invocable handles for one `(property, mode)` pair.

mod accessor;
mod error;
mod mode;
mod name;
mod proxy;

pub use accessor::{Accessor, AccessorSource};
pub(crate) use accessor::clone_value;
pub use error::AccessError;
pub use mode::{AccessorMode, Direction};
pub use name::PropertyName;
pub use proxy::{ProxyAccessor, ProxyOp};
