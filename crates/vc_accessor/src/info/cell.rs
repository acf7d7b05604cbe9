//! Static storage for [`TypeShape`]s, used inside [`Typed::type_shape`].
//!
//! A `static` declared inside a generic function is shared by every
//! instantiation, so generic types key their shapes by [`TypeId`].
//!
//! [`Typed::type_shape`]: crate::info::Typed::type_shape

use alloc::boxed::Box;
use core::any::{Any, TypeId};
use std::sync::{OnceLock, PoisonError, RwLock};

use vc_utils::TypeIdMap;

use crate::info::TypeShape;

// -----------------------------------------------------------------------------
// NonGenericShapeCell

/// Shape storage for a non-generic type.
///
/// ```
/// use vc_accessor::info::{NonGenericShapeCell, ShapeKind, TypeShape};
/// # use vc_accessor::derive::Reflect;
/// # #[derive(Reflect)]
/// # struct Marker;
///
/// fn marker_shape() -> &'static TypeShape {
///     static CELL: NonGenericShapeCell = NonGenericShapeCell::new();
///     CELL.get_or_init(|| TypeShape::new::<Marker>(ShapeKind::Opaque))
/// }
///
/// assert!(core::ptr::eq(marker_shape(), marker_shape()));
/// ```
pub struct NonGenericShapeCell(OnceLock<TypeShape>);

impl NonGenericShapeCell {
    #[inline]
    pub const fn new() -> Self {
        Self(OnceLock::new())
    }

    #[inline]
    pub fn get_or_init(&self, f: impl FnOnce() -> TypeShape) -> &TypeShape {
        self.0.get_or_init(f)
    }
}

impl Default for NonGenericShapeCell {
    fn default() -> Self {
        Self::new()
    }
}

// -----------------------------------------------------------------------------
// GenericShapeCell

/// Shape storage for a generic type, one entry per instantiation.
pub struct GenericShapeCell(RwLock<TypeIdMap<&'static TypeShape>>);

impl GenericShapeCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the shape stored for `G`, creating it with `f` on first use.
    ///
    /// `f` runs without the lock held, so it may request the shapes of
    /// other instantiations of the same generic type.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> TypeShape) -> &'static TypeShape {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(
        &self,
        type_id: TypeId,
        f: impl FnOnce() -> TypeShape,
    ) -> &'static TypeShape {
        match self.get_by_type_id(type_id) {
            Some(shape) => shape,
            None => self.insert_by_type_id(type_id, f()),
        }
    }

    #[inline(never)]
    fn get_by_type_id(&self, type_id: TypeId) -> Option<&'static TypeShape> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .copied()
    }

    #[inline(never)]
    fn insert_by_type_id(&self, type_id: TypeId, shape: TypeShape) -> &'static TypeShape {
        *self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || Box::leak(Box::new(shape)))
    }
}

impl Default for GenericShapeCell {
    fn default() -> Self {
        Self::new()
    }
}
