//! Accessor builders: pure functions recognising accessor patterns in members.
//!
//! Each builder inspects one [`Member`] and either claims it, producing an
//! [`Accessor`], or declines with a [`Decline`] reason. Declining is the
//! normal outcome and is only logged at `trace` level; errors are reserved
//! for member tables that are broken.
//!
//! Methods are offered to [`METHOD_BUILDERS`] in order and the first claim
//! wins. Fields are offered to every entry of [`FIELD_BUILDERS`].

mod field;
mod method;

pub mod naming;

pub use field::{field_get, field_set};
pub use method::{add, get, indexed_get, indexed_set, mapped_get, mapped_set, set, size};

use core::fmt;

use crate::access::{AccessError, Accessor};
use crate::config::AccessorConfig;
use crate::member::Member;

// -----------------------------------------------------------------------------
// Claim

/// Outcome of offering a member to a builder.
#[derive(Debug)]
pub enum Claim {
    Built(Accessor),
    Declined(Decline),
}

/// Why a builder did not claim a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decline {
    /// The builder handles the other member kind.
    MemberKind,
    /// The name does not follow the builder's naming pattern.
    NamePattern,
    Arity { expected: usize, found: usize },
    /// A parameter or return type does not fit the accessor mode.
    UnsupportedConversion {
        expected: &'static str,
        found: &'static str,
    },
    /// The member cannot be used for this mode, such as a read-only field
    /// for `SET`.
    Inaccessible,
}

impl fmt::Display for Decline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MemberKind => f.write_str("wrong member kind"),
            Self::NamePattern => f.write_str("name does not match"),
            Self::Arity { expected, found } => {
                write!(f, "expected {expected} parameter(s), found {found}")
            }
            Self::UnsupportedConversion { expected, found } => {
                write!(f, "expected {expected}, found `{found}`")
            }
            Self::Inaccessible => f.write_str("member not usable for this mode"),
        }
    }
}

// -----------------------------------------------------------------------------
// Builder tables

/// Shared inputs of the builders for one target type.
#[derive(Debug, Clone, Copy)]
pub struct BuildContext<'a> {
    /// Name of the type whose members are inspected.
    pub target: &'static str,
    pub config: &'a AccessorConfig,
}

pub type BuildFn = fn(&BuildContext<'_>, &Member) -> Result<Claim, AccessError>;

/// Method builders in priority order.
///
/// `size` runs before `get` so that `get_size() -> u32` becomes `GET_SIZE`
/// of `size`, while `get_size() -> f64` falls through to `GET`.
pub const METHOD_BUILDERS: &[(&str, BuildFn)] = &[
    ("size", size),
    ("get", get),
    ("set", set),
    ("add", add),
    ("indexed_get", indexed_get),
    ("indexed_set", indexed_set),
    ("mapped_get", mapped_get),
    ("mapped_set", mapped_set),
];

/// Field builders; every field is offered to each of them.
pub const FIELD_BUILDERS: &[(&str, BuildFn)] = &[("field_get", field_get), ("field_set", field_set)];

#[inline]
pub(crate) fn declined(reason: Decline) -> Result<Claim, AccessError> {
    Ok(Claim::Declined(reason))
}
