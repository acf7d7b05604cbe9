use core::fmt;

use crate::Reflect;
use crate::ops::{Array, List, Map};

// -----------------------------------------------------------------------------
// ReflectKind

/// Coarse classification of a reflected value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    Array,
    List,
    Map,
    Opaque,
}

impl ReflectKind {
    #[inline]
    pub const fn is_container(self) -> bool {
        !matches!(self, Self::Opaque)
    }
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Array => "array",
            Self::List => "list",
            Self::Map => "map",
            Self::Opaque => "opaque",
        })
    }
}

// -----------------------------------------------------------------------------
// ReflectRef / ReflectMut

/// Immutable view of a value through its kind-specific trait.
pub enum ReflectRef<'a> {
    Array(&'a dyn Array),
    List(&'a dyn List),
    Map(&'a dyn Map),
    Opaque(&'a dyn Reflect),
}

/// Mutable view of a value through its kind-specific trait.
pub enum ReflectMut<'a> {
    Array(&'a mut dyn Array),
    List(&'a mut dyn List),
    Map(&'a mut dyn Map),
    Opaque(&'a mut dyn Reflect),
}

impl ReflectRef<'_> {
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Array(_) => ReflectKind::Array,
            Self::List(_) => ReflectKind::List,
            Self::Map(_) => ReflectKind::Map,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}

impl ReflectMut<'_> {
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Array(_) => ReflectKind::Array,
            Self::List(_) => ReflectKind::List,
            Self::Map(_) => ReflectKind::Map,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }
}
