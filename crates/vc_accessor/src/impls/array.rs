use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;

use crate::impls::utils::{collect_items, sequence_debug, sequence_partial_eq};
use crate::info::{GenericShapeCell, ShapeKind, TypeShape, Typed};
use crate::ops::Array;
use crate::reflection::impl_reflect_cast_fn;
use crate::{FromReflect, Reflect};

/// `items` truncated or padded to `len` with the default of `T`.
fn resize_items<T: Typed + FromReflect + Clone>(items: &[T], len: usize) -> Option<Vec<T>> {
    let mut resized: Vec<T> = items.iter().take(len).cloned().collect();
    if resized.len() < len {
        let shape = T::type_shape();
        while resized.len() < len {
            let padding = T::take_from_reflect(shape.default_value()?).ok()?;
            resized.push(padding);
        }
    }
    Some(resized)
}

// -----------------------------------------------------------------------------
// Box<[T]>

impl<T: Typed + FromReflect + Clone> Typed for Box<[T]> {
    fn type_shape() -> &'static TypeShape {
        static CELL: GenericShapeCell = GenericShapeCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeShape::new::<Self>(ShapeKind::Array {
                item: T::type_shape(),
                resizable: true,
            })
            .with_default_of::<Self>()
            .with_conversion::<Self>()
        })
    }
}

impl<T: Typed + FromReflect + Clone> Reflect for Box<[T]> {
    impl_reflect_cast_fn!(Array);

    #[inline]
    fn reflect_shape(&self) -> &'static TypeShape {
        <Self as Typed>::type_shape()
    }

    fn reflect_clone(&self) -> Option<Box<dyn Reflect>> {
        Some(Box::new(self.clone()))
    }

    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        sequence_partial_eq(self, other)
    }

    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        sequence_debug(self, f)
    }
}

impl<T: Typed + FromReflect + Clone> Array for Box<[T]> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(|item| item as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        <[T]>::len(self)
    }

    #[inline]
    fn is_resizable(&self) -> bool {
        true
    }

    fn resized(&self, len: usize) -> Option<Box<dyn Reflect>> {
        let items = resize_items::<T>(self, len)?;
        Some(Box::new(items.into_boxed_slice()))
    }

    fn without(&self, index: usize) -> Option<Box<dyn Reflect>> {
        if index >= <[T]>::len(self) {
            return None;
        }
        let mut items = self.to_vec();
        items.remove(index);
        Some(Box::new(items.into_boxed_slice()))
    }
}

/// Accepts any array or list whose elements convert to `T`.
impl<T: Typed + FromReflect + Clone> FromReflect for Box<[T]> {
    fn from_reflect(value: &dyn Reflect) -> Option<Self> {
        match value.downcast_ref::<Self>() {
            Some(array) => Some(array.clone()),
            None => collect_items::<T>(value).map(Vec::into_boxed_slice),
        }
    }
}

// -----------------------------------------------------------------------------
// [T; N]

impl<T: Typed + FromReflect + Clone, const N: usize> Typed for [T; N] {
    fn type_shape() -> &'static TypeShape {
        static CELL: GenericShapeCell = GenericShapeCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeShape::new::<Self>(ShapeKind::Array {
                item: T::type_shape(),
                resizable: false,
            })
            .with_conversion::<Self>()
        })
    }
}

impl<T: Typed + FromReflect + Clone, const N: usize> Reflect for [T; N] {
    impl_reflect_cast_fn!(Array);

    #[inline]
    fn reflect_shape(&self) -> &'static TypeShape {
        <Self as Typed>::type_shape()
    }

    fn reflect_clone(&self) -> Option<Box<dyn Reflect>> {
        Some(Box::new(self.clone()))
    }

    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        sequence_partial_eq(self, other)
    }

    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        sequence_debug(self, f)
    }
}

impl<T: Typed + FromReflect + Clone, const N: usize> Array for [T; N] {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(|item| item as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        N
    }

    #[inline]
    fn is_resizable(&self) -> bool {
        false
    }

    fn resized(&self, len: usize) -> Option<Box<dyn Reflect>> {
        (len == N).then(|| Box::new(self.clone()) as Box<dyn Reflect>)
    }

    #[inline]
    fn without(&self, _index: usize) -> Option<Box<dyn Reflect>> {
        None
    }
}

/// Accepts any array or list of exactly `N` convertible elements.
impl<T: Typed + FromReflect + Clone, const N: usize> FromReflect for [T; N] {
    fn from_reflect(value: &dyn Reflect) -> Option<Self> {
        match value.downcast_ref::<Self>() {
            Some(array) => Some(array.clone()),
            None => <[T; N]>::try_from(collect_items::<T>(value)?).ok(),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::vec;

    use super::*;

    #[test]
    fn boxed_slices_resize_with_defaults() {
        let items: Box<[u32]> = vec![1, 2, 3].into();

        let shrunk = items.resized(1).unwrap().take::<Box<[u32]>>().unwrap();
        assert_eq!(&shrunk[..], [1]);

        let grown = items.resized(5).unwrap().take::<Box<[u32]>>().unwrap();
        assert_eq!(&grown[..], [1, 2, 3, 0, 0]);

        let removed = items.without(1).unwrap().take::<Box<[u32]>>().unwrap();
        assert_eq!(&removed[..], [1, 3]);
        assert!(items.without(3).is_none());
    }

    #[test]
    fn optional_items_pad_with_none() {
        let items: Box<[Option<String>]> = vec![Some("a".to_string())].into();
        let grown = items.resized(2).unwrap().take::<Box<[Option<String>]>>().unwrap();
        assert_eq!(&grown[..], [Some("a".to_string()), None]);
    }

    #[test]
    fn arrays_convert_from_lists_of_matching_length() {
        assert_eq!(<[u8; 2]>::from_reflect(&vec![1_i32, 2]), Some([1, 2]));
        assert_eq!(<[u8; 2]>::from_reflect(&vec![1_i32]), None);
    }
}
