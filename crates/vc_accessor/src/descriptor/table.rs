use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;

use vc_utils::hash::HashMap;

use crate::access::{AccessError, Accessor, AccessorMode, PropertyName};

// -----------------------------------------------------------------------------
// PropertySlot

/// The accessors of one property, indexed by [`AccessorMode::index`].
pub(crate) struct PropertySlot {
    pub(crate) name: PropertyName,
    pub(crate) accessors: [Option<Accessor>; AccessorMode::COUNT],
}

impl PropertySlot {
    pub(crate) fn new(name: PropertyName) -> Self {
        Self {
            name,
            accessors: core::array::from_fn(|_| None),
        }
    }

    #[inline]
    pub(crate) fn get(&self, mode: AccessorMode) -> Option<&Accessor> {
        self.accessors[mode.index()].as_ref()
    }

    /// Stores `accessor` unless its mode is taken. Returns whether it was stored.
    pub(crate) fn insert(&mut self, accessor: Accessor) -> bool {
        let slot = &mut self.accessors[accessor.mode().index()];
        if slot.is_some() {
            return false;
        }
        *slot = Some(accessor);
        true
    }
}

// -----------------------------------------------------------------------------
// Descriptor

/// The accessor table of one type.
///
/// Maps `(property, mode)` to at most one [`Accessor`]. Descriptors are
/// immutable once built and shared through `Arc`.
///
/// # Examples
///
/// ```
/// use vc_accessor::access::AccessorMode;
/// use vc_accessor::derive::Reflect;
/// use vc_accessor::descriptor::DescriptorCache;
///
/// #[derive(Reflect)]
/// struct Bag {
///     pub tags: Vec<String>,
///     pub label: String,
/// }
///
/// let descriptor = DescriptorCache::default().get::<Bag>().unwrap();
///
/// assert!(descriptor.has_accessor("tags", AccessorMode::Add));
/// assert!(descriptor.has_accessor("label", AccessorMode::Set));
/// assert!(!descriptor.has_accessor("label", AccessorMode::Add));
///
/// let names: Vec<&str> = descriptor.properties().map(|name| name.as_str()).collect();
/// assert_eq!(names, ["tags", "label"]);
/// ```
pub struct Descriptor {
    type_id: TypeId,
    type_name: &'static str,
    properties: Vec<PropertySlot>,
    index: HashMap<PropertyName, usize>,
}

impl Descriptor {
    pub(crate) fn new(type_id: TypeId, type_name: &'static str, properties: Vec<PropertySlot>) -> Self {
        let index = properties
            .iter()
            .enumerate()
            .map(|(position, slot)| (slot.name.clone(), position))
            .collect();
        Self {
            type_id,
            type_name,
            properties,
            index,
        }
    }

    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    fn slot(&self, property: &str) -> Option<&PropertySlot> {
        self.index.get(property).map(|&position| &self.properties[position])
    }

    /// The accessor for `(property, mode)`, if any.
    pub fn accessor(&self, property: &str, mode: AccessorMode) -> Option<&Accessor> {
        self.slot(property)?.get(mode)
    }

    /// Like [`accessor`](Self::accessor), failing with
    /// [`AccessError::PropertyNotFound`].
    pub fn require(&self, property: &str, mode: AccessorMode) -> Result<&Accessor, AccessError> {
        self.accessor(property, mode)
            .ok_or_else(|| AccessError::PropertyNotFound {
                target: self.type_name,
                property: property.into(),
                mode,
            })
    }

    #[inline]
    pub fn has_accessor(&self, property: &str, mode: AccessorMode) -> bool {
        self.accessor(property, mode).is_some()
    }

    /// Every accessor of `mode`, in property order.
    pub fn accessors(&self, mode: AccessorMode) -> impl Iterator<Item = &Accessor> {
        self.properties.iter().filter_map(move |slot| slot.get(mode))
    }

    /// The modes available for `property`.
    pub fn modes(&self, property: &str) -> impl Iterator<Item = AccessorMode> + '_ {
        let slot = self.slot(property);
        AccessorMode::ALL
            .into_iter()
            .filter(move |&mode| slot.is_some_and(|slot| slot.get(mode).is_some()))
    }

    /// Property names in declaration order.
    pub fn properties(&self) -> impl ExactSizeIterator<Item = &PropertyName> {
        self.properties.iter().map(|slot| &slot.name)
    }

    /// A `GET` accessor for element `index` of `property`, built on its
    /// `GET_INDEXED` accessor.
    pub fn element_accessor(&self, property: &str, index: usize) -> Option<Accessor> {
        self.accessor(property, AccessorMode::GetIndexed)?
            .by_index(index)
    }

    /// Total number of accessors.
    pub fn len(&self) -> usize {
        self.properties
            .iter()
            .map(|slot| slot.accessors.iter().flatten().count())
            .sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Modes<'a>(&'a PropertySlot);

        impl fmt::Debug for Modes<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_list()
                    .entries(self.0.accessors.iter().flatten().map(Accessor::mode))
                    .finish()
            }
        }

        f.debug_struct("Descriptor")
            .field("type_name", &self.type_name)
            .field(
                "properties",
                &self
                    .properties
                    .iter()
                    .map(|slot| (&slot.name, Modes(slot)))
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}
