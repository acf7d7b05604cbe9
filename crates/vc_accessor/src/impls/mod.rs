//! Reflection for primitives, strings, `Option` and the standard collections.

mod array;
mod list;
mod map;
mod option;
mod primitives;
mod utils;

pub use primitives::integer_value;
pub use utils::{collect_items, sequence_items};
