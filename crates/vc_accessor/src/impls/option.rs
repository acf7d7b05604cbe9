use alloc::boxed::Box;
use core::fmt;

use crate::info::{GenericShapeCell, ShapeKind, TypeShape, Typed};
use crate::reflection::impl_reflect_cast_fn;
use crate::{FromReflect, Reflect};

fn none<T: Typed + FromReflect + Clone>() -> Box<dyn Reflect> {
    Box::new(Option::<T>::None)
}

impl<T: Typed + FromReflect + Clone> Typed for Option<T> {
    fn type_shape() -> &'static TypeShape {
        static CELL: GenericShapeCell = GenericShapeCell::new();
        CELL.get_or_insert::<Self>(|| {
            TypeShape::new::<Self>(ShapeKind::Optional(T::type_shape()))
                .with_default(none::<T>)
                .with_conversion::<Self>()
        })
    }
}

impl<T: Typed + FromReflect + Clone> Reflect for Option<T> {
    impl_reflect_cast_fn!(Opaque);

    #[inline]
    fn reflect_shape(&self) -> &'static TypeShape {
        <Self as Typed>::type_shape()
    }

    fn reflect_clone(&self) -> Option<Box<dyn Reflect>> {
        Some(Box::new(self.clone()))
    }

    fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
        let Some(other) = other.downcast_ref::<Self>() else {
            return Some(false);
        };
        match (self, other) {
            (None, None) => Some(true),
            (Some(a), Some(b)) => a.reflect_partial_eq(b),
            _ => Some(false),
        }
    }

    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Some(value) => f.debug_tuple("Some").field(&value.as_reflect()).finish(),
            None => f.write_str("None"),
        }
    }
}

/// Accepts an `Option<T>`, or a bare value convertible to `T`.
impl<T: Typed + FromReflect + Clone> FromReflect for Option<T> {
    fn from_reflect(value: &dyn Reflect) -> Option<Self> {
        match value.downcast_ref::<Self>() {
            Some(option) => Some(option.clone()),
            None => T::from_reflect(value).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use super::*;

    #[test]
    fn bare_values_convert_into_some() {
        let value = Option::<String>::from_reflect(&"x".to_string());
        assert_eq!(value, Some(Some("x".to_string())));

        let padding = Option::<u8>::type_shape().default_value().unwrap();
        assert_eq!(padding.downcast_ref::<Option<u8>>(), Some(&None));
    }
}
