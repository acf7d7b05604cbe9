//! Per-type accessor tables and the cache that builds them.

mod build;
mod cache;
mod table;

pub use cache::DescriptorCache;
pub use table::Descriptor;
