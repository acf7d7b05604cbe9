use alloc::vec::Vec;
use core::fmt;

use crate::ops::{Map, ReflectRef};
use crate::{FromReflect, Reflect};

/// The elements of an array or list, in order.
///
/// `None` for maps and opaque values.
pub fn sequence_items(value: &dyn Reflect) -> Option<Vec<&dyn Reflect>> {
    match value.reflect_ref() {
        ReflectRef::Array(array) => (0..array.len()).map(|i| array.get(i)).collect(),
        ReflectRef::List(list) => (0..list.len()).map(|i| list.get(i)).collect(),
        ReflectRef::Map(_) | ReflectRef::Opaque(_) => None,
    }
}

/// Converts every element of an array or list into `T`.
///
/// ```
/// use std::collections::VecDeque;
/// use vc_accessor::impls::collect_items;
///
/// let source = VecDeque::from([1_u8, 2]);
/// assert_eq!(collect_items::<i64>(&source), Some(vec![1, 2]));
/// assert_eq!(collect_items::<i64>(&7_u8), None);
/// ```
pub fn collect_items<T: FromReflect>(value: &dyn Reflect) -> Option<Vec<T>> {
    sequence_items(value)?
        .into_iter()
        .map(T::from_reflect)
        .collect()
}

pub(crate) fn sequence_partial_eq(this: &dyn Reflect, other: &dyn Reflect) -> Option<bool> {
    let (Some(lhs), Some(rhs)) = (sequence_items(this), sequence_items(other)) else {
        return Some(false);
    };
    if lhs.len() != rhs.len() {
        return Some(false);
    }
    for (a, b) in lhs.into_iter().zip(rhs) {
        match a.reflect_partial_eq(b) {
            Some(true) => {}
            result => return result,
        }
    }
    Some(true)
}

pub(crate) fn sequence_debug(this: &dyn Reflect, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_list()
        .entries(sequence_items(this).unwrap_or_default())
        .finish()
}

pub(crate) fn map_partial_eq<'a>(
    this: &dyn Map,
    entries: impl Iterator<Item = (&'a dyn Reflect, &'a dyn Reflect)>,
    other: &dyn Reflect,
) -> Option<bool> {
    let ReflectRef::Map(other) = other.reflect_ref() else {
        return Some(false);
    };
    if this.len() != other.len() {
        return Some(false);
    }
    for (key, value) in entries {
        let Some(found) = other.get(key) else {
            return Some(false);
        };
        match value.reflect_partial_eq(found) {
            Some(true) => {}
            result => return result,
        }
    }
    Some(true)
}
