use alloc::boxed::Box;
use core::fmt;

use crate::Reflect;
use crate::member::{ArgList, InvokeError};

/// Calls a method taking `&self`.
pub type SharedFn = fn(&dyn Reflect, ArgList) -> Result<Option<Box<dyn Reflect>>, InvokeError>;

/// Calls a method taking `&mut self`.
pub type ExclusiveFn =
    fn(&mut dyn Reflect, ArgList) -> Result<Option<Box<dyn Reflect>>, InvokeError>;

/// Borrows a field of the target. `None` if the target has the wrong type.
pub type FieldRefFn = fn(&dyn Reflect) -> Option<&dyn Reflect>;

/// Mutably borrows a field of the target. `None` if the target has the wrong type.
pub type FieldMutFn = fn(&mut dyn Reflect) -> Option<&mut dyn Reflect>;

// -----------------------------------------------------------------------------
// MethodHandle

/// A type-erased method. The receiver kind decides which call is possible.
///
/// Methods returning `()` yield `Ok(None)`.
#[derive(Clone, Copy)]
pub enum MethodHandle {
    Shared(SharedFn),
    Exclusive(ExclusiveFn),
}

impl MethodHandle {
    #[inline]
    pub fn is_shared(&self) -> bool {
        matches!(self, Self::Shared(_))
    }
}

impl fmt::Debug for MethodHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Shared(_) => "MethodHandle::Shared",
            Self::Exclusive(_) => "MethodHandle::Exclusive",
        })
    }
}

// -----------------------------------------------------------------------------
// FieldHandle

/// A type-erased field, optionally writable.
#[derive(Clone, Copy)]
pub struct FieldHandle {
    get: FieldRefFn,
    get_mut: Option<FieldMutFn>,
}

impl FieldHandle {
    #[inline]
    pub const fn read_only(get: FieldRefFn) -> Self {
        Self { get, get_mut: None }
    }

    #[inline]
    pub const fn writable(get: FieldRefFn, get_mut: FieldMutFn) -> Self {
        Self {
            get,
            get_mut: Some(get_mut),
        }
    }

    #[inline]
    pub fn is_writable(&self) -> bool {
        self.get_mut.is_some()
    }

    #[inline]
    pub fn get<'a>(&self, target: &'a dyn Reflect) -> Option<&'a dyn Reflect> {
        (self.get)(target)
    }

    /// `None` for read-only fields and targets of the wrong type.
    #[inline]
    pub fn get_mut<'a>(&self, target: &'a mut dyn Reflect) -> Option<&'a mut dyn Reflect> {
        self.get_mut.and_then(|get_mut| get_mut(target))
    }
}

impl fmt::Debug for FieldHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldHandle")
            .field("writable", &self.is_writable())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Handle

#[derive(Debug, Clone, Copy)]
pub enum Handle {
    Field(FieldHandle),
    Method(MethodHandle),
}
