use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::member::InvokeError;
use crate::{FromReflect, Reflect};

/// Positional arguments of an accessor or member call.
///
/// Arguments are moved out with [`take`](ArgList::take) or borrowed with
/// [`borrow`](ArgList::borrow). Build one with [`args!`](crate::args).
///
/// # Examples
///
/// ```
/// use vc_accessor::args;
///
/// let mut args = args![3_u8, String::from("d")];
/// assert_eq!(args.len(), 2);
///
/// assert_eq!(args.borrow::<String>(1).unwrap(), "d");
/// assert_eq!(args.take::<usize>(0).unwrap(), 3);
/// assert!(args.take::<usize>(0).is_err());
/// ```
#[derive(Debug, Default)]
pub struct ArgList(Vec<Option<Box<dyn Reflect>>>);

impl ArgList {
    #[inline]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends an argument.
    #[inline]
    pub fn with<T: Reflect>(mut self, value: T) -> Self {
        self.0.push(Some(Box::new(value)));
        self
    }

    /// Appends an already boxed argument.
    #[inline]
    pub fn with_boxed(mut self, value: Box<dyn Reflect>) -> Self {
        self.0.push(Some(value));
        self
    }

    #[inline]
    pub fn push(&mut self, value: Box<dyn Reflect>) {
        self.0.push(Some(value));
    }

    /// Number of arguments, including those already taken.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The argument at `index`, if it has not been taken.
    pub fn get(&self, index: usize) -> Option<&dyn Reflect> {
        self.0.get(index)?.as_deref()
    }

    /// Moves the argument at `index` out.
    pub fn take_boxed(&mut self, index: usize) -> Result<Box<dyn Reflect>, InvokeError> {
        self.0
            .get_mut(index)
            .and_then(Option::take)
            .ok_or(InvokeError::MissingArgument { index })
    }

    /// Moves the argument at `index` out as a `T`, converting it if needed.
    pub fn take<T: FromReflect>(&mut self, index: usize) -> Result<T, InvokeError> {
        T::take_from_reflect(self.take_boxed(index)?).map_err(|value| InvokeError::Argument {
            index,
            expected: core::any::type_name::<T>(),
            found: value.reflect_shape().type_name(),
        })
    }

    /// Borrows the argument at `index`, which must be exactly a `T`.
    pub fn borrow<T: Reflect>(&self, index: usize) -> Result<&T, InvokeError> {
        let value = self.get(index).ok_or(InvokeError::MissingArgument { index })?;
        value.downcast_ref::<T>().ok_or(InvokeError::Argument {
            index,
            expected: core::any::type_name::<T>(),
            found: value.reflect_shape().type_name(),
        })
    }
}

impl From<Vec<Box<dyn Reflect>>> for ArgList {
    fn from(values: Vec<Box<dyn Reflect>>) -> Self {
        Self(values.into_iter().map(Some).collect())
    }
}

/// Builds an [`ArgList`] from values.
///
/// ```
/// use vc_accessor::args;
///
/// assert!(args![].is_empty());
/// assert_eq!(args![1_u8, "a".to_string(),].len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::member::ArgList::new()
    };
    ($($value:expr),+ $(,)?) => {
        $crate::member::ArgList::new()$(.with($value))+
    };
}
