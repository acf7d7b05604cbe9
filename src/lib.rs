#![doc = "Runtime property accessors for plain Rust types.\n\nRe-exports the workspace crates under short names."]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]

pub use vc_accessor as accessor;
pub use vc_utils as utils;
