use alloc::string::String;
use alloc::sync::Arc;
use core::error::Error;

use thiserror::Error;

use crate::access::{AccessorMode, PropertyName};

/// Everything that can go wrong while building or invoking accessors.
///
/// Builders that merely do not recognise a member never produce one of
/// these; only lookups, invocations and genuinely broken member tables do.
#[derive(Debug, Clone, Error)]
pub enum AccessError {
    /// The member exists but cannot be used the requested way.
    #[error("access to `{member}` of `{target}` denied: {reason}")]
    AccessDenied {
        target: &'static str,
        member: &'static str,
        reason: &'static str,
    },
    /// The member itself failed; `source` is its error.
    #[error("`{member}` of `{target}` failed")]
    InvocationFailed {
        target: &'static str,
        member: &'static str,
        #[source]
        source: Arc<dyn Error + Send + Sync>,
    },
    #[error("`{target}` has no {mode} accessor for property `{property}`")]
    PropertyNotFound {
        target: &'static str,
        property: String,
        mode: AccessorMode,
    },
    /// A detached copy of the container was modified but there is no
    /// setter to store it back.
    #[error("cannot write the container of `{property}` back into `{target}`: no setter")]
    ContainerWriteImpossible {
        target: &'static str,
        property: PropertyName,
    },
    #[error("expected a value of type `{expected}`, found `{found}`")]
    IncompatibleValue {
        expected: &'static str,
        found: &'static str,
    },
    #[error("{mode} accessor of `{property}` takes {expected} argument(s), got {found}")]
    ArityMismatch {
        property: PropertyName,
        mode: AccessorMode,
        expected: usize,
        found: usize,
    },
    #[error("index {index} is out of bounds for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },
    #[error("no entry for key {key}")]
    KeyNotFound { key: String },
    #[error("index {index} is beyond the growth limit {limit} of a container of length {len}")]
    GrowthLimitExceeded {
        index: usize,
        len: usize,
        limit: usize,
    },
    #[error("`{type_name}` has a fixed length of {len}")]
    FixedCapacity { type_name: &'static str, len: usize },
    #[error("`{type_name}` has no default value to pad a container with")]
    NoDefault { type_name: &'static str },
    #[error("`{type_name}` cannot be cloned through reflection")]
    NotCloneable { type_name: &'static str },
    #[error("accessor for `{expected}` invoked on `{found}`")]
    TargetMismatch {
        expected: &'static str,
        found: &'static str,
    },
    #[error("`{type_name}` is not an array, list or map")]
    UnsupportedContainer { type_name: &'static str },
    #[error("member `{member}` of `{target}` is malformed: {reason}")]
    MalformedMember {
        target: &'static str,
        member: &'static str,
        reason: &'static str,
    },
    #[error("type `{type_name}` is not registered")]
    UnregisteredType { type_name: String },
}
