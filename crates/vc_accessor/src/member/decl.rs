use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::info::TypeShape;
use crate::member::{FieldHandle, Handle, MethodHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Method,
}

/// How widely a member is visible, ordered from least to most visible.
///
/// `pub` maps to `Public`, any restricted `pub(...)` to `Crate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Visibility {
    Private,
    Crate,
    Public,
}

/// A field or method of a reflected type.
///
/// Fields have no parameters and their output is the field type. Methods
/// list their parameter types; `output` is `None` for methods returning `()`.
///
/// # Examples
///
/// ```
/// use vc_accessor::info::Typed;
/// use vc_accessor::member::{FieldHandle, Member, MemberKind, Visibility};
/// # use vc_accessor::derive::Reflect;
/// # #[derive(Reflect)]
/// # struct Counter { size: u32 }
///
/// let member = Member::field(
///     "size",
///     Visibility::Public,
///     u32::type_shape(),
///     FieldHandle::read_only(|target| {
///         target.downcast_ref::<Counter>().map(|this| &this.size as &dyn vc_accessor::Reflect)
///     }),
/// );
///
/// assert_eq!(member.kind(), MemberKind::Field);
/// assert_eq!(member.arity(), 0);
/// assert!(member.output().unwrap().is::<u32>());
/// ```
#[derive(Debug, Clone)]
pub struct Member {
    name: &'static str,
    visibility: Visibility,
    params: Box<[&'static TypeShape]>,
    output: Option<&'static TypeShape>,
    handle: Handle,
}

impl Member {
    pub fn field(
        name: &'static str,
        visibility: Visibility,
        shape: &'static TypeShape,
        handle: FieldHandle,
    ) -> Self {
        Self {
            name,
            visibility,
            params: Box::new([]),
            output: Some(shape),
            handle: Handle::Field(handle),
        }
    }

    pub fn method(
        name: &'static str,
        visibility: Visibility,
        params: Vec<&'static TypeShape>,
        output: Option<&'static TypeShape>,
        handle: MethodHandle,
    ) -> Self {
        Self {
            name,
            visibility,
            params: params.into_boxed_slice(),
            output: output.filter(|shape| !shape.is_unit()),
            handle: Handle::Method(handle),
        }
    }

    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub fn visibility(&self) -> Visibility {
        self.visibility
    }

    #[inline]
    pub fn kind(&self) -> MemberKind {
        match self.handle {
            Handle::Field(_) => MemberKind::Field,
            Handle::Method(_) => MemberKind::Method,
        }
    }

    #[inline]
    pub fn params(&self) -> &[&'static TypeShape] {
        &self.params
    }

    #[inline]
    pub fn arity(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn output(&self) -> Option<&'static TypeShape> {
        self.output
    }

    #[inline]
    pub fn handle(&self) -> Handle {
        self.handle
    }

    /// The method handle, `None` for fields.
    #[inline]
    pub fn method_handle(&self) -> Option<MethodHandle> {
        match self.handle {
            Handle::Method(handle) => Some(handle),
            Handle::Field(_) => None,
        }
    }

    /// The field handle, `None` for methods.
    #[inline]
    pub fn field_handle(&self) -> Option<FieldHandle> {
        match self.handle {
            Handle::Field(handle) => Some(handle),
            Handle::Method(_) => None,
        }
    }
}
