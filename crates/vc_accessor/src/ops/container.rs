//! Uniform element operations over arrays, lists and maps.
//!
//! Arrays cannot change length in place: growing, appending to or removing
//! from a `Box<[T]>` produces a new container, reported as
//! [`Update::Reallocated`]. The caller decides where the new container goes.
//! Lists and maps are always updated in place.
//!
//! Array and list positions accept any integer type as index.
//!
//! # Examples
//!
//! ```
//! use vc_accessor::config::GrowthPolicy;
//! use vc_accessor::ops::container::{self, Update};
//!
//! let mut tags: Box<[String]> = vec!["a".to_string()].into();
//!
//! let update = container::add(&mut tags, Box::new("b".to_string()), &GrowthPolicy::DEFAULT).unwrap();
//! let Update::Reallocated { container, .. } = update else { unreachable!() };
//! let tags = container.take::<Box<[String]>>().unwrap();
//!
//! assert_eq!(&tags[..], ["a", "b"]);
//! assert_eq!(container::size(&tags).unwrap(), 2);
//! ```

use alloc::boxed::Box;
use alloc::format;

use crate::Reflect;
use crate::access::AccessError;
use crate::config::GrowthPolicy;
use crate::impls::integer_value;
use crate::info::TypeShape;
use crate::ops::{Array, ReflectKind, ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Update

/// Outcome of a mutating container operation.
#[derive(Debug)]
pub enum Update {
    /// Nothing changed.
    Unchanged,
    /// The container was modified in place.
    ///
    /// Carries the element that was overwritten or removed, if any.
    InPlace(Option<Box<dyn Reflect>>),
    /// The container could not change in place. `container` is the updated
    /// copy; the original is untouched.
    Reallocated {
        previous: Option<Box<dyn Reflect>>,
        container: Box<dyn Reflect>,
    },
}

// -----------------------------------------------------------------------------
// Helpers

/// Reads an integer of any primitive type as a container position.
///
/// ```
/// use vc_accessor::ops::container::index_of;
///
/// assert_eq!(index_of(&3_i16), Some(3));
/// assert_eq!(index_of(&-1_i32), None);
/// assert_eq!(index_of(&"3".to_string()), None);
/// ```
pub fn index_of(value: &dyn Reflect) -> Option<usize> {
    integer_value(value).and_then(|value| usize::try_from(value).ok())
}

fn require_index(key: &dyn Reflect) -> Result<usize, AccessError> {
    index_of(key).ok_or_else(|| AccessError::IncompatibleValue {
        expected: "usize",
        found: key.reflect_shape().type_name(),
    })
}

fn unsupported(container: &dyn Reflect) -> AccessError {
    AccessError::UnsupportedContainer {
        type_name: container.reflect_shape().type_name(),
    }
}

fn item_shape(container: &dyn Reflect) -> Result<&'static TypeShape, AccessError> {
    container
        .reflect_shape()
        .item()
        .ok_or_else(|| unsupported(container))
}

fn coerce(shape: &TypeShape, value: Box<dyn Reflect>) -> Result<Box<dyn Reflect>, AccessError> {
    shape
        .coerce(value)
        .map_err(|value| AccessError::IncompatibleValue {
            expected: shape.type_name(),
            found: value.reflect_shape().type_name(),
        })
}

fn incompatible(expected: &TypeShape, found: &dyn Reflect) -> AccessError {
    AccessError::IncompatibleValue {
        expected: expected.type_name(),
        found: found.reflect_shape().type_name(),
    }
}

/// `value` as an instance of `shape`, converted into `storage` if needed.
fn as_item<'a>(
    shape: &TypeShape,
    value: &'a dyn Reflect,
    storage: &'a mut Option<Box<dyn Reflect>>,
) -> Result<&'a dyn Reflect, AccessError> {
    if value.ty_id() == shape.type_id() {
        return Ok(value);
    }
    let converted = shape
        .convert(value)
        .ok_or_else(|| incompatible(shape, value))?;
    Ok(&**storage.insert(converted))
}

fn check_growth(policy: &GrowthPolicy, len: usize, index: usize) -> Result<(), AccessError> {
    if policy.allows(len, index) {
        Ok(())
    } else {
        Err(AccessError::GrowthLimitExceeded {
            index,
            len,
            limit: policy.limit(len),
        })
    }
}

fn fixed(array: &dyn Array) -> AccessError {
    AccessError::FixedCapacity {
        type_name: array.reflect_shape().type_name(),
        len: array.len(),
    }
}

fn position(len: usize, matches: impl Fn(usize) -> Option<bool>) -> Option<usize> {
    (0..len).find(|&index| matches(index) == Some(true))
}

// -----------------------------------------------------------------------------
// Read

/// Number of elements or entries.
pub fn size(container: &dyn Reflect) -> Result<usize, AccessError> {
    match container.reflect_ref() {
        ReflectRef::Array(array) => Ok(array.len()),
        ReflectRef::List(list) => Ok(list.len()),
        ReflectRef::Map(map) => Ok(map.len()),
        ReflectRef::Opaque(_) => Err(unsupported(container)),
    }
}

/// The element at an integer position, or the value stored under a key.
pub fn get<'a>(container: &'a dyn Reflect, key: &dyn Reflect) -> Result<&'a dyn Reflect, AccessError> {
    match container.reflect_ref() {
        ReflectRef::Array(array) => {
            let index = require_index(key)?;
            array.get(index).ok_or(AccessError::IndexOutOfBounds {
                index,
                len: array.len(),
            })
        }
        ReflectRef::List(list) => {
            let index = require_index(key)?;
            list.get(index).ok_or(AccessError::IndexOutOfBounds {
                index,
                len: list.len(),
            })
        }
        ReflectRef::Map(map) => map.get(key).ok_or_else(|| AccessError::KeyNotFound {
            key: format!("{key:?}"),
        }),
        ReflectRef::Opaque(_) => Err(unsupported(container)),
    }
}

// -----------------------------------------------------------------------------
// Write

/// Stores `value` at an integer position, or under a key.
///
/// Sequences grow when `key` is past the end, as far as `policy` allows.
/// The gap is padded with the element type's default value, so the new
/// length is exactly `index + 1`.
pub fn set(
    container: &mut dyn Reflect,
    key: Box<dyn Reflect>,
    value: Box<dyn Reflect>,
    policy: &GrowthPolicy,
) -> Result<Update, AccessError> {
    let item = item_shape(container)?;
    let key_shape = container.reflect_shape().key();
    match container.reflect_mut() {
        ReflectMut::Array(array) => {
            let index = require_index(&*key)?;
            let value = coerce(item, value)?;
            let len = array.len();
            if index < len {
                return replace_at(array.get_mut(index), index, len, value).map(Update::InPlace);
            }
            if !array.is_resizable() {
                return Err(fixed(array));
            }
            check_growth(policy, len, index)?;
            let mut grown = array.resized(index + 1).ok_or(AccessError::NoDefault {
                type_name: item.type_name(),
            })?;
            if let ReflectMut::Array(grown) = grown.reflect_mut() {
                replace_at(grown.get_mut(index), index, index + 1, value)?;
            }
            Ok(Update::Reallocated {
                previous: None,
                container: grown,
            })
        }
        ReflectMut::List(list) => {
            let index = require_index(&*key)?;
            let value = coerce(item, value)?;
            let len = list.len();
            if index < len {
                return replace_at(list.get_mut(index), index, len, value).map(Update::InPlace);
            }
            check_growth(policy, len, index)?;
            if index > len && !item.has_default() {
                return Err(AccessError::NoDefault {
                    type_name: item.type_name(),
                });
            }
            while list.len() < index {
                if !list.push_default() {
                    return Err(AccessError::NoDefault {
                        type_name: item.type_name(),
                    });
                }
            }
            list.try_push(value)
                .map_err(|value| incompatible(item, &*value))?;
            Ok(Update::InPlace(None))
        }
        ReflectMut::Map(map) => {
            let key = match key_shape {
                Some(shape) => coerce(shape, key)?,
                None => key,
            };
            let value = coerce(item, value)?;
            let previous = map
                .try_insert(key, value)
                .map_err(|rejected| incompatible(item, &*rejected))?;
            Ok(Update::InPlace(previous))
        }
        ReflectMut::Opaque(_) => unreachable!("containers report an item shape"),
    }
}

fn replace_at(
    slot: Option<&mut dyn Reflect>,
    index: usize,
    len: usize,
    value: Box<dyn Reflect>,
) -> Result<Option<Box<dyn Reflect>>, AccessError> {
    let slot = slot.ok_or(AccessError::IndexOutOfBounds { index, len })?;
    let expected = slot.reflect_shape();
    slot.replace(value)
        .map(Some)
        .map_err(|value| incompatible(expected, &*value))
}

/// Appends `value` at the end of a sequence.
pub fn add(
    container: &mut dyn Reflect,
    value: Box<dyn Reflect>,
    policy: &GrowthPolicy,
) -> Result<Update, AccessError> {
    let len = size(container)?;
    if container.reflect_kind() == ReflectKind::Map {
        return Err(unsupported(container));
    }
    set(container, Box::new(len), value, policy)
}

/// Removes the first element equal to `value`, or the entry keyed by `value`.
///
/// Returns [`Update::Unchanged`] when nothing matches. Sequence elements are
/// compared with [`Reflect::reflect_partial_eq`].
pub fn remove(container: &mut dyn Reflect, value: &dyn Reflect) -> Result<Update, AccessError> {
    let item = item_shape(container)?;
    match container.reflect_mut() {
        ReflectMut::Array(array) => {
            let mut storage = None;
            let needle = as_item(item, value, &mut storage)?;
            let Some(index) = position(array.len(), |i| {
                array.get(i).and_then(|element| element.reflect_partial_eq(needle))
            }) else {
                return Ok(Update::Unchanged);
            };
            if !array.is_resizable() {
                return Err(fixed(array));
            }
            let previous = array.get(index).and_then(Reflect::reflect_clone);
            let container = array.without(index).ok_or_else(|| fixed(array))?;
            Ok(Update::Reallocated {
                previous,
                container,
            })
        }
        ReflectMut::List(list) => {
            let mut storage = None;
            let needle = as_item(item, value, &mut storage)?;
            let found = position(list.len(), |i| {
                list.get(i).and_then(|element| element.reflect_partial_eq(needle))
            });
            Ok(match found {
                Some(index) => Update::InPlace(list.remove(index)),
                None => Update::Unchanged,
            })
        }
        ReflectMut::Map(map) => Ok(match map.remove(value) {
            Some(previous) => Update::InPlace(Some(previous)),
            None => Update::Unchanged,
        }),
        ReflectMut::Opaque(_) => unreachable!("containers report an item shape"),
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::collections::BTreeMap;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;

    use super::*;

    fn text(value: &str) -> Box<dyn Reflect> {
        Box::new(value.to_string())
    }

    fn tags(values: &[&str]) -> Box<[String]> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn unwrap_reallocated<T: Reflect>(update: Update) -> (Option<Box<dyn Reflect>>, T) {
        match update {
            Update::Reallocated {
                previous,
                container,
            } => (previous, container.take::<T>().unwrap()),
            other => panic!("expected reallocation, got {other:?}"),
        }
    }

    #[test]
    fn set_past_end_pads_array_to_index() {
        let mut array = tags(&["a", "b", "c"]);
        let update = set(&mut array, Box::new(5_u32), text("f"), &GrowthPolicy::DEFAULT).unwrap();
        let (previous, grown) = unwrap_reallocated::<Box<[String]>>(update);

        assert!(previous.is_none());
        assert_eq!(&grown[..], ["a", "b", "c", "", "", "f"]);
        assert_eq!(&array[..], ["a", "b", "c"]);
    }

    #[test]
    fn set_within_bounds_returns_previous() {
        let mut list = vec![1_u64, 2, 3];
        let update = set(&mut list, Box::new(1_usize), Box::new(20_u8), &GrowthPolicy::DEFAULT).unwrap();

        let Update::InPlace(Some(previous)) = update else {
            panic!("expected in-place update");
        };
        assert_eq!(previous.downcast_ref::<u64>(), Some(&2));
        assert_eq!(list, [1, 20, 3]);
    }

    #[test]
    fn growth_limit_is_enforced() {
        let mut list: Vec<u8> = Vec::new();
        let policy = GrowthPolicy::new(2, 4);

        assert!(set(&mut list, Box::new(3_i32), Box::new(9_u8), &policy).is_ok());
        assert_eq!(list, [0, 0, 0, 9]);

        let err = set(&mut list, Box::new(8_i32), Box::new(9_u8), &policy).unwrap_err();
        assert!(matches!(
            err,
            AccessError::GrowthLimitExceeded {
                index: 8,
                len: 4,
                limit: 8
            }
        ));
        assert_eq!(list.len(), 4);
    }

    #[test]
    fn fixed_arrays_do_not_grow_or_shrink() {
        let mut array = [1_i32, 2];
        assert!(matches!(
            add(&mut array, Box::new(3_i32), &GrowthPolicy::DEFAULT),
            Err(AccessError::FixedCapacity { len: 2, .. })
        ));
        assert!(matches!(
            remove(&mut array, &1_i32),
            Err(AccessError::FixedCapacity { .. })
        ));
        assert!(matches!(remove(&mut array, &7_i32), Ok(Update::Unchanged)));
    }

    #[test]
    fn remove_from_list_and_map() {
        let mut list = vec!["a".to_string(), "b".to_string()];
        let update = remove(&mut list, &"b".to_string()).unwrap();
        assert!(matches!(update, Update::InPlace(Some(_))));
        assert_eq!(list, ["a"]);
        assert!(matches!(remove(&mut list, &"z".to_string()), Ok(Update::Unchanged)));

        let mut map = BTreeMap::from([(1_u32, 'x'), (2, 'y')]);
        let Update::InPlace(Some(removed)) = remove(&mut map, &2_u32).unwrap() else {
            panic!("expected removal");
        };
        assert_eq!(removed.downcast_ref::<char>(), Some(&'y'));
        assert!(matches!(remove(&mut map, &2_u32), Ok(Update::Unchanged)));
    }

    #[test]
    fn set_on_map_names_the_rejected_part() {
        let mut map = BTreeMap::from([("en".to_string(), 1_u32)]);

        let err = set(&mut map, Box::new(3_u8), Box::new(2_u32), &GrowthPolicy::DEFAULT).unwrap_err();
        assert!(matches!(
            err,
            AccessError::IncompatibleValue { expected, found }
                if expected.ends_with("String") && found == "u8"
        ));

        let err = set(&mut map, text("de"), text("two"), &GrowthPolicy::DEFAULT).unwrap_err();
        assert!(matches!(
            err,
            AccessError::IncompatibleValue { expected: "u32", .. }
        ));
        assert_eq!(map, BTreeMap::from([("en".to_string(), 1)]));

        // Keys convert like values do.
        set(&mut map, text("de"), Box::new(2_u8), &GrowthPolicy::DEFAULT).unwrap();
        assert_eq!(map.get("de"), Some(&2));
    }

    #[test]
    fn get_reports_missing_positions_and_keys() {
        let list = vec![1_u8];
        assert!(matches!(
            get(&list, &4_u8),
            Err(AccessError::IndexOutOfBounds { index: 4, len: 1 })
        ));
        assert!(matches!(
            get(&list, &"0".to_string()),
            Err(AccessError::IncompatibleValue { .. })
        ));

        let map = BTreeMap::from([("k".to_string(), 1_u8)]);
        assert!(matches!(
            get(&map, &"missing".to_string()),
            Err(AccessError::KeyNotFound { .. })
        ));
        assert!(matches!(
            size(&7_u8),
            Err(AccessError::UnsupportedContainer { .. })
        ));
    }
}
