use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;
use core::fmt;
use std::sync::{OnceLock, PoisonError, RwLock};

use log::warn;
use vc_utils::TypeIdMap;
use vc_utils::hash::{HashMap, HashSet};

use crate::Reflect;
use crate::access::AccessError;
use crate::config::AccessorConfig;
use crate::descriptor::Descriptor;
use crate::descriptor::build::build;
use crate::member::{Introspect, Member};

// -----------------------------------------------------------------------------
// Slot

/// A registered type and its lazily built descriptor.
struct Slot {
    type_id: TypeId,
    type_name: &'static str,
    members: fn() -> Vec<Member>,
    descriptor: OnceLock<Result<Arc<Descriptor>, AccessError>>,
}

impl Slot {
    fn resolve(&self, config: &AccessorConfig) -> Result<Arc<Descriptor>, AccessError> {
        self.descriptor
            .get_or_init(|| {
                let members = (self.members)();
                build(self.type_id, self.type_name, &members, config)
                    .map(Arc::new)
                    .inspect_err(|err| warn!("no descriptor for `{}`: {err}", self.type_name))
            })
            .clone()
    }
}

// -----------------------------------------------------------------------------
// Registry

#[derive(Default)]
struct Registry {
    slots: TypeIdMap<Arc<Slot>>,
    by_path: HashMap<&'static str, TypeId>,
    by_name: HashMap<&'static str, TypeId>,
    /// Short names shared by more than one registered type.
    ambiguous: HashSet<&'static str>,
}

impl Registry {
    fn insert(&mut self, slot: Slot) {
        let (type_id, type_name) = (slot.type_id, slot.type_name);
        self.slots.insert(type_id, Arc::new(slot));
        self.by_path.insert(type_name, type_id);

        let name = short_name(type_name);
        if self.ambiguous.contains(name) {
            return;
        }
        if self.by_name.remove(name).is_some() {
            self.ambiguous.insert(name);
        } else {
            self.by_name.insert(name, type_id);
        }
    }

    fn find(&self, name: &str) -> Option<TypeId> {
        self.by_path
            .get(name)
            .or_else(|| self.by_name.get(name))
            .copied()
    }
}

/// `a::b::Foo<c::Bar>` -> `Foo`.
fn short_name(type_name: &str) -> &str {
    let path = type_name.split('<').next().unwrap_or(type_name);
    path.rsplit("::").next().unwrap_or(path)
}

// -----------------------------------------------------------------------------
// DescriptorCache

/// Builds and memoizes one [`Descriptor`] per registered type.
///
/// A type is registered with [`register`](Self::register) (or implicitly by
/// [`get`](Self::get)); its descriptor is built on first request and every
/// later request returns the same `Arc`. Concurrent first requests for the
/// same type block until the single build finishes. A failed build is
/// memoized as well.
///
/// The cache is `Send + Sync` and meant to be created once and shared.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vc_accessor::access::AccessorMode;
/// use vc_accessor::derive::{Reflect, properties};
/// use vc_accessor::descriptor::DescriptorCache;
///
/// #[derive(Reflect)]
/// #[reflect(methods)]
/// struct Counter {
///     size: i32,
/// }
///
/// #[properties]
/// impl Counter {
///     pub fn get_size(&self) -> i32 { self.size }
/// }
///
/// let cache = DescriptorCache::default();
/// let first = cache.get::<Counter>().unwrap();
/// let second = cache.get_by_name("Counter").unwrap();
/// assert!(Arc::ptr_eq(&first, &second));
///
/// assert!(first.has_accessor("size", AccessorMode::GetSize));
/// assert!(first.accessor("size", AccessorMode::Set).is_none());
/// ```
pub struct DescriptorCache {
    config: AccessorConfig,
    registry: RwLock<Registry>,
}

impl Default for DescriptorCache {
    /// A cache using [`AccessorConfig::DEFAULT`].
    #[inline]
    fn default() -> Self {
        Self::new(AccessorConfig::DEFAULT)
    }
}

impl DescriptorCache {
    pub fn new(config: AccessorConfig) -> Self {
        Self {
            config,
            registry: RwLock::new(Registry::default()),
        }
    }

    #[inline]
    pub fn config(&self) -> &AccessorConfig {
        &self.config
    }

    /// Registers `T`. Returns `false` if it was already registered.
    ///
    /// The descriptor is not built until it is first requested.
    pub fn register<T: Introspect>(&self) -> bool {
        let type_id = TypeId::of::<T>();
        if self.read_registry().slots.contains(&type_id) {
            return false;
        }
        let mut registry = self.registry.write().unwrap_or_else(PoisonError::into_inner);
        if registry.slots.contains(&type_id) {
            return false;
        }
        registry.insert(Slot {
            type_id,
            type_name: core::any::type_name::<T>(),
            members: T::members,
            descriptor: OnceLock::new(),
        });
        true
    }

    /// Returns the descriptor of `T`, registering `T` first if needed.
    pub fn get<T: Introspect>(&self) -> Result<Arc<Descriptor>, AccessError> {
        self.register::<T>();
        self.get_by_id(TypeId::of::<T>())
    }

    /// Returns the descriptor of a registered type.
    pub fn get_by_id(&self, type_id: TypeId) -> Result<Arc<Descriptor>, AccessError> {
        let slot = self.read_registry().slots.get(&type_id).cloned();
        match slot {
            Some(slot) => slot.resolve(&self.config),
            None => Err(AccessError::UnregisteredType {
                type_name: alloc::format!("{type_id:?}"),
            }),
        }
    }

    /// Returns the descriptor of a registered type by full type name
    /// (`my_crate::Bag`) or, if unambiguous, by short name (`Bag`).
    pub fn get_by_name(&self, name: &str) -> Result<Arc<Descriptor>, AccessError> {
        let type_id = self.read_registry().find(name);
        match type_id {
            Some(type_id) => self.get_by_id(type_id),
            None => Err(AccessError::UnregisteredType {
                type_name: name.to_string(),
            }),
        }
    }

    /// Returns the descriptor of the concrete type behind `value`.
    ///
    /// The type must be registered.
    pub fn descriptor_of(&self, value: &dyn Reflect) -> Result<Arc<Descriptor>, AccessError> {
        self.get_by_id(value.ty_id()).map_err(|err| match err {
            AccessError::UnregisteredType { .. } => AccessError::UnregisteredType {
                type_name: value.reflect_shape().type_name().to_string(),
            },
            err => err,
        })
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.read_registry().slots.contains(&type_id)
    }

    /// Number of registered types.
    #[inline]
    pub fn len(&self) -> usize {
        self.read_registry().slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read_registry().slots.is_empty()
    }

    /// Registers every type marked `#[reflect(auto_register)]`.
    ///
    /// Returns the number of newly registered types; repeated calls return 0.
    ///
    /// ```
    /// use vc_accessor::derive::Reflect;
    /// use vc_accessor::descriptor::DescriptorCache;
    ///
    /// #[derive(Reflect)]
    /// #[reflect(auto_register)]
    /// pub struct Point {
    ///     pub x: i32,
    ///     pub y: i32,
    /// }
    ///
    /// let cache = DescriptorCache::default();
    /// assert!(cache.auto_register() >= 1);
    /// assert!(cache.get_by_name("Point").is_ok());
    /// assert_eq!(cache.auto_register(), 0);
    /// ```
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&self) -> usize {
        inventory::iter::<crate::__macro_exports::AutoRegistration>
            .into_iter()
            .filter(|registration| (registration.0)(self))
            .count()
    }

    fn read_registry(&self) -> std::sync::RwLockReadGuard<'_, Registry> {
        self.registry.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for DescriptorCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let registry = self.read_registry();
        let mut names: Vec<&str> = registry.by_path.keys().copied().collect();
        names.sort_unstable();
        f.debug_struct("DescriptorCache")
            .field("config", &self.config)
            .field("types", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::short_name;

    #[test]
    fn short_names() {
        assert_eq!(short_name("app::model::Bag"), "Bag");
        assert_eq!(short_name("Bag"), "Bag");
        assert_eq!(short_name("app::Wrapper<alloc::string::String>"), "Wrapper");
    }
}
