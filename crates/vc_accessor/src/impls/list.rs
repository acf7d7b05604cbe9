use alloc::boxed::Box;
use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::fmt;

use crate::impls::utils::{collect_items, sequence_debug, sequence_partial_eq};
use crate::info::{GenericShapeCell, ShapeKind, TypeShape, Typed};
use crate::ops::List;
use crate::reflection::impl_reflect_cast_fn;
use crate::{FromReflect, Reflect};

fn default_item<T: Typed + FromReflect>() -> Option<T> {
    T::type_shape()
        .default_value()
        .and_then(|value| T::take_from_reflect(value).ok())
}

macro_rules! impl_reflect_list {
    ($ty:ident, $items:ty, $push:ident, $collect:expr) => {
        impl<T: Typed + FromReflect + Clone> Typed for $ty<T> {
            fn type_shape() -> &'static TypeShape {
                static CELL: GenericShapeCell = GenericShapeCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeShape::new::<Self>(ShapeKind::List {
                        item: T::type_shape(),
                    })
                    .with_default_of::<Self>()
                    .with_conversion::<Self>()
                })
            }
        }

        impl<T: Typed + FromReflect + Clone> Reflect for $ty<T> {
            impl_reflect_cast_fn!(List);

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

        impl<T: Typed + FromReflect + Clone> List for $ty<T> {
            #[inline]
            fn get(&self, index: usize) -> Option<&dyn Reflect> {
                <$items>::get(self, index).map(|item| item as &dyn Reflect)
            }

            #[inline]
            fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
                <$items>::get_mut(self, index).map(|item| item as &mut dyn Reflect)
            }

            #[inline]
            fn len(&self) -> usize {
                $ty::len(self)
            }

            fn try_push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>> {
                let value = T::take_from_reflect(value)?;
                $ty::$push(self, value);
                Ok(())
            }

            fn push_default(&mut self) -> bool {
                match default_item::<T>() {
                    Some(value) => {
                        $ty::$push(self, value);
                        true
                    }
                    None => false,
                }
            }

            fn remove(&mut self, index: usize) -> Option<Box<dyn Reflect>> {
                if index >= $ty::len(self) {
                    return None;
                }
                let removed: Option<T> = $ty::remove(self, index).into();
                removed.map(T::into_boxed_reflect)
            }
        }

        /// Accepts any array or list whose elements convert to `T`.
        impl<T: Typed + FromReflect + Clone> FromReflect for $ty<T> {
            fn from_reflect(value: &dyn Reflect) -> Option<Self> {
                match value.downcast_ref::<Self>() {
                    Some(list) => Some(list.clone()),
                    None => collect_items::<T>(value).map($collect),
                }
            }
        }
    };
}

impl_reflect_list!(Vec, [T], push, |items| items);
impl_reflect_list!(VecDeque, VecDeque<T>, push_back, VecDeque::from);
