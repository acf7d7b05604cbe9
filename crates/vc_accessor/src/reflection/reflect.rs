use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::TypeShape;
use crate::ops::{ReflectKind, ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// A value whose type can be inspected and manipulated at runtime.
///
/// Every property value, every container and every target of an
/// [`Accessor`](crate::access::Accessor) is handled as `dyn Reflect`.
/// Implement it with `#[derive(Reflect)]`; the built-in implementations cover
/// primitives, `String`, `Option<T>` and the common collections.
///
/// # Type identification
///
/// [`Any::type_id`] on a `Box<dyn Reflect>` names the box itself. Use
/// [`Reflect::ty_id`] to get the type of the contained value:
///
/// ```
/// # use vc_accessor::Reflect;
/// # use core::any::{Any, TypeId};
/// let value: Box<dyn Reflect> = Box::new(7_i32);
///
/// assert_ne!(value.type_id(), TypeId::of::<i32>());
/// assert_eq!(value.ty_id(), TypeId::of::<i32>());
/// ```
///
/// # Downcasting
///
/// ```
/// # use vc_accessor::Reflect;
/// let mut value: Box<dyn Reflect> = Box::new(String::from("a"));
///
/// value.downcast_mut::<String>().unwrap().push('b');
/// assert_eq!(value.downcast_ref::<String>().unwrap(), "ab");
/// assert!(value.downcast_ref::<u32>().is_none());
///
/// let text: String = value.take().unwrap();
/// assert_eq!(text, "ab");
/// ```
///
/// # Kinds
///
/// [`reflect_ref`] and [`reflect_mut`] expose containers through the
/// [`Array`], [`List`] and [`Map`] traits; everything else is
/// [`Opaque`](ReflectRef::Opaque).
///
/// [`reflect_ref`]: Reflect::reflect_ref
/// [`reflect_mut`]: Reflect::reflect_mut
/// [`Array`]: crate::ops::Array
/// [`List`]: crate::ops::List
/// [`Map`]: crate::ops::Map
pub trait Reflect: Any + Send + Sync + 'static {
    #[inline(always)]
    fn as_reflect(&self) -> &dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn as_reflect_mut(&mut self) -> &mut dyn Reflect
    where
        Self: Sized,
    {
        self
    }

    #[inline(always)]
    fn into_boxed_reflect(self) -> Box<dyn Reflect>
    where
        Self: Sized,
    {
        Box::new(self)
    }

    /// The [`TypeId`] of the concrete value.
    #[inline(always)]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn reflect_shape(&self) -> &'static TypeShape;

    fn reflect_kind(&self) -> ReflectKind;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Replaces `self` with `value` and returns the previous value.
    ///
    /// `value` is returned unchanged if it has a different type.
    fn replace(&mut self, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, Box<dyn Reflect>>;

    /// A boxed copy of the value, if the type can be cloned.
    fn reflect_clone(&self) -> Option<Box<dyn Reflect>>;

    /// `None` when the type does not support comparison.
    #[inline]
    fn reflect_partial_eq(&self, _other: &dyn Reflect) -> Option<bool> {
        None
    }

    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reflect({})", self.reflect_shape().type_name())
    }
}

impl dyn Reflect {
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref::<T>()
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut::<T>()
    }

    /// Returns the box unchanged if the value is not a `T`.
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match any.downcast::<T>() {
            Ok(value) => Ok(value),
            Err(_) => unreachable!("type id checked above"),
        }
    }

    /// Returns the box unchanged if the value is not a `T`.
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}

// -----------------------------------------------------------------------------
// Macro

/// Implements `replace`, `reflect_kind`, `reflect_ref` and `reflect_mut`
/// for a type of the given [`ReflectKind`].
macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        fn replace(
            &mut self,
            value: ::alloc::boxed::Box<dyn $crate::Reflect>,
        ) -> ::core::result::Result<
            ::alloc::boxed::Box<dyn $crate::Reflect>,
            ::alloc::boxed::Box<dyn $crate::Reflect>,
        > {
            let value = value.take::<Self>()?;
            Ok(::alloc::boxed::Box::new(::core::mem::replace(self, value)))
        }

        #[inline]
        fn reflect_kind(&self) -> $crate::ops::ReflectKind {
            $crate::ops::ReflectKind::$kind
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }
    };
}

pub(crate) use impl_reflect_cast_fn;
