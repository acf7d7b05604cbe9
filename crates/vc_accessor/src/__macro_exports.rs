//! Items used by the code `vc_accessor_derive` generates. Not public API.

pub use alloc::boxed::Box;
pub use alloc::string::String;
pub use alloc::vec;
pub use alloc::vec::Vec;

#[cfg(feature = "auto_register")]
pub use inventory;

/// Registers one type into a cache; returns whether it was new.
#[cfg(feature = "auto_register")]
pub struct AutoRegistration(pub fn(&crate::descriptor::DescriptorCache) -> bool);

#[cfg(feature = "auto_register")]
inventory::collect!(AutoRegistration);
