use alloc::boxed::Box;

use crate::Reflect;

/// Builds a concrete value from a reflected one.
///
/// Besides an exact type match, implementations accept values that convert
/// without loss: any integer that fits, a `Vec<T>` for a `Box<[T]>`, a
/// plain `T` for an `Option<T>`.
///
/// # Examples
///
/// ```
/// use vc_accessor::FromReflect;
///
/// assert_eq!(u8::from_reflect(&300_u32), None);
/// assert_eq!(u8::from_reflect(&200_i64), Some(200));
///
/// let list = vec![1_u32, 2];
/// assert_eq!(<Box<[u64]>>::from_reflect(&list).as_deref(), Some(&[1_u64, 2][..]));
/// ```
pub trait FromReflect: Reflect + Sized {
    fn from_reflect(value: &dyn Reflect) -> Option<Self>;

    /// Moves the value out when the type matches, converts it otherwise.
    ///
    /// The box is returned unchanged when neither works.
    fn take_from_reflect(value: Box<dyn Reflect>) -> Result<Self, Box<dyn Reflect>> {
        match value.take::<Self>() {
            Ok(value) => Ok(value),
            Err(value) => Self::from_reflect(&*value).ok_or(value),
        }
    }
}
