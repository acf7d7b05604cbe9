use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use crate::info::{FloatKind, IntegerKind, NonGenericShapeCell, ShapeKind, TypeShape, Typed};
use crate::reflection::impl_reflect_cast_fn;
use crate::{FromReflect, Reflect};

// -----------------------------------------------------------------------------
// Scalars

macro_rules! impl_reflect_scalar {
    ($ty:ty, $kind:expr) => {
        impl Typed for $ty {
            fn type_shape() -> &'static TypeShape {
                static CELL: NonGenericShapeCell = NonGenericShapeCell::new();
                CELL.get_or_init(|| {
                    TypeShape::new::<$ty>($kind)
                        .with_default_of::<$ty>()
                        .with_conversion::<$ty>()
                })
            }
        }

        impl Reflect for $ty {
            impl_reflect_cast_fn!(Opaque);

            #[inline]
            fn reflect_shape(&self) -> &'static TypeShape {
                <Self as Typed>::type_shape()
            }

            #[inline]
            fn reflect_clone(&self) -> Option<Box<dyn Reflect>> {
                Some(Box::new(self.clone()))
            }

            fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
                Some(other.downcast_ref::<Self>().is_some_and(|other| self == other))
            }

            fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Debug::fmt(self, f)
            }
        }
    };
}

macro_rules! impl_reflect_integer {
    ($($ty:ty => $kind:ident),* $(,)?) => {$(
        impl_reflect_scalar!($ty, ShapeKind::Integer(IntegerKind::$kind));

        impl FromReflect for $ty {
            fn from_reflect(value: &dyn Reflect) -> Option<Self> {
                if let Some(value) = value.downcast_ref::<Self>() {
                    return Some(*value);
                }
                integer_value(value).and_then(|wide| <$ty>::try_from(wide).ok())
            }
        }
    )*};
}

impl_reflect_integer! {
    i8 => I8, i16 => I16, i32 => I32, i64 => I64, i128 => I128, isize => Isize,
    u8 => U8, u16 => U16, u32 => U32, u64 => U64, u128 => U128, usize => Usize,
}

impl_reflect_scalar!(f32, ShapeKind::Float(FloatKind::F32));
impl_reflect_scalar!(f64, ShapeKind::Float(FloatKind::F64));
impl_reflect_scalar!(bool, ShapeKind::Bool);
impl_reflect_scalar!(char, ShapeKind::Char);
impl_reflect_scalar!(String, ShapeKind::Text);
impl_reflect_scalar!((), ShapeKind::Unit);

impl FromReflect for f32 {
    fn from_reflect(value: &dyn Reflect) -> Option<Self> {
        value.downcast_ref::<f32>().copied()
    }
}

impl FromReflect for f64 {
    fn from_reflect(value: &dyn Reflect) -> Option<Self> {
        match value.downcast_ref::<f64>() {
            Some(value) => Some(*value),
            None => value.downcast_ref::<f32>().map(|value| f64::from(*value)),
        }
    }
}

macro_rules! impl_from_reflect_by_clone {
    ($($ty:ty),*) => {$(
        impl FromReflect for $ty {
            fn from_reflect(value: &dyn Reflect) -> Option<Self> {
                value.downcast_ref::<Self>().cloned()
            }
        }
    )*};
}

impl_from_reflect_by_clone!(bool, char, String, ());

// -----------------------------------------------------------------------------
// integer_value

/// Reads any primitive integer as an `i128`.
///
/// `None` for non-integers and for `u128` values above `i128::MAX`.
///
/// ```
/// use vc_accessor::impls::integer_value;
///
/// assert_eq!(integer_value(&7_u8), Some(7));
/// assert_eq!(integer_value(&-3_isize), Some(-3));
/// assert_eq!(integer_value(&u128::MAX), None);
/// assert_eq!(integer_value(&1.0_f32), None);
/// ```
pub fn integer_value(value: &dyn Reflect) -> Option<i128> {
    macro_rules! widen {
        ($($ty:ty),*) => {$(
            if let Some(value) = value.downcast_ref::<$ty>() {
                return i128::try_from(*value).ok();
            }
        )*};
    }

    value.reflect_shape().integer()?;
    widen!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
    None
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn integers_convert_when_the_value_fits() {
        assert_eq!(i32::from_reflect(&7_u64), Some(7));
        assert_eq!(u16::from_reflect(&-1_i8), None);
        assert_eq!(u64::from_reflect(&"7".to_string()), None);
        assert_eq!(usize::take_from_reflect(Box::new(3_i128)).ok(), Some(3));
    }

    #[test]
    fn scalars_compare_by_exact_type() {
        assert_eq!(1_u8.reflect_partial_eq(&1_u8), Some(true));
        assert_eq!(1_u8.reflect_partial_eq(&1_u16), Some(false));
        assert_eq!("a".to_string().reflect_partial_eq(&"a".to_string()), Some(true));
    }

    #[test]
    fn shapes_carry_defaults() {
        let zero = u32::type_shape().default_value().unwrap();
        assert_eq!(zero.downcast_ref::<u32>(), Some(&0));
        assert!(<()>::type_shape().is_unit());
        assert_eq!(i64::type_shape().integer(), Some(IntegerKind::I64));
    }
}
