//! Small shared utilities: fixed-seed hashing and a [`TypeId`]-keyed map.
//!
//! [`TypeId`]: core::any::TypeId
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
