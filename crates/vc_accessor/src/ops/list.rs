use alloc::boxed::Box;

use crate::Reflect;

/// A sequence that grows and shrinks in place.
///
/// Implemented for `Vec<T>` and `VecDeque<T>`.
///
/// # Examples
///
/// ```
/// use vc_accessor::ops::List;
///
/// let mut list: Vec<u32> = vec![1];
/// List::try_push(&mut list, Box::new(2_u8)).unwrap();
/// assert!(List::push_default(&mut list));
/// assert_eq!(list, [1, 2, 0]);
///
/// let removed = List::remove(&mut list, 0).unwrap();
/// assert_eq!(removed.downcast_ref::<u32>(), Some(&1));
/// ```
pub trait List: Reflect {
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends `value`, converting it to the element type when possible.
    ///
    /// The value is returned if it cannot be converted.
    fn try_push(&mut self, value: Box<dyn Reflect>) -> Result<(), Box<dyn Reflect>>;

    /// Appends the element type's default value.
    ///
    /// Returns `false`, leaving the list unchanged, if there is none.
    fn push_default(&mut self) -> bool;

    fn remove(&mut self, index: usize) -> Option<Box<dyn Reflect>>;
}
