//! Runtime property accessors for reflected types.
//!
//! A type opts in with `#[derive(Reflect)]` (and optionally `#[properties]` on an
//! impl block). The [`DescriptorCache`](descriptor::DescriptorCache) then turns the
//! type's member table into a [`Descriptor`](descriptor::Descriptor): a
//! `(property, mode) -> Accessor` table that can read, write, append to, remove from,
//! index into and measure the properties of any instance of that type.
//!
//! ```
//! use vc_accessor::access::AccessorMode;
//! use vc_accessor::derive::{Reflect, properties};
//! use vc_accessor::descriptor::DescriptorCache;
//! use vc_accessor::args;
//!
//! #[derive(Reflect, Default)]
//! #[reflect(methods)]
//! struct Bag {
//!     tags: Vec<String>,
//! }
//!
//! #[properties]
//! impl Bag {
//!     pub fn get_tags(&self) -> &[String] { &self.tags }
//!     pub fn set_tags(&mut self, tags: Vec<String>) { self.tags = tags; }
//! }
//!
//! let cache = DescriptorCache::default();
//! let descriptor = cache.get::<Bag>().unwrap();
//!
//! let mut bag = Bag::default();
//! let add = descriptor.require("tags", AccessorMode::Add).unwrap();
//! add.invoke(&mut bag, args!["a".to_string()]).unwrap();
//!
//! assert_eq!(bag.tags, ["a"]);
//! ```
#![no_std]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names the crate `vc_accessor`, also inside this crate's tests.
extern crate self as vc_accessor;

// -----------------------------------------------------------------------------
// no_std support

extern crate alloc;
extern crate std;

// -----------------------------------------------------------------------------
// Modules

mod reflection;

pub mod access;
pub mod builder;
pub mod config;
pub mod descriptor;
pub mod impls;
pub mod info;
pub mod member;
pub mod ops;
pub mod path;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use reflection::{FromReflect, Reflect};
pub use vc_accessor_derive as derive;
