use alloc::boxed::Box;

use crate::Reflect;

/// A sequence whose length can only change by building a new value.
///
/// Implemented for `Box<[T]>` (resizable) and `[T; N]` (fixed).
///
/// # Examples
///
/// ```
/// use vc_accessor::ops::Array;
///
/// let tags: Box<[String]> = vec!["a".to_string(), "b".to_string()].into();
///
/// let grown = tags.resized(3).unwrap();
/// let grown = grown.downcast_ref::<Box<[String]>>().unwrap();
/// assert_eq!(&grown[..], ["a", "b", ""]);
///
/// let fixed = [1_u8, 2, 3];
/// assert!(!fixed.is_resizable());
/// assert!(fixed.without(0).is_none());
/// ```
pub trait Array: Reflect {
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether [`resized`](Array::resized) and [`without`](Array::without)
    /// can produce a different length.
    fn is_resizable(&self) -> bool;

    /// A copy truncated or padded to `len` elements.
    ///
    /// Padding uses the element type's default value. `None` when the array
    /// cannot change length, or padding is needed and there is no default.
    fn resized(&self, len: usize) -> Option<Box<dyn Reflect>>;

    /// A copy with the element at `index` removed.
    fn without(&self, index: usize) -> Option<Box<dyn Reflect>>;
}
