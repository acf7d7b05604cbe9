//! Registration, lookup and sharing of descriptors.

use std::any::TypeId;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use vc_accessor::access::{AccessError, AccessorMode};
use vc_accessor::derive::Reflect;
use vc_accessor::descriptor::DescriptorCache;
use vc_accessor::member::{Member, MethodHandle, ReflectMethods, Visibility};

// -----------------------------------------------------------------------------
// Build once

static COUNTED_BUILDS: AtomicUsize = AtomicUsize::new(0);

#[derive(Reflect)]
#[reflect(methods)]
struct Counted {
    pub value: u32,
}

impl ReflectMethods for Counted {
    fn methods() -> Vec<Member> {
        COUNTED_BUILDS.fetch_add(1, Ordering::SeqCst);
        Vec::new()
    }
}

#[test]
fn concurrent_requests_share_one_descriptor() {
    let cache = DescriptorCache::default();

    let descriptors: Vec<_> = thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| cache.get::<Counted>().unwrap()))
            .collect();
        handles.into_iter().map(|handle| handle.join().unwrap()).collect()
    });

    assert_eq!(COUNTED_BUILDS.load(Ordering::SeqCst), 1);
    for descriptor in &descriptors[1..] {
        assert!(Arc::ptr_eq(&descriptors[0], descriptor));
    }
    assert!(descriptors[0].has_accessor("value", AccessorMode::Get));
    assert_eq!(cache.len(), 1);
}

// -----------------------------------------------------------------------------
// Lookup

#[derive(Reflect)]
struct Plain {
    pub id: u64,
}

mod first {
    #[derive(vc_accessor::derive::Reflect)]
    pub struct Item {
        pub id: u32,
    }
}

mod second {
    #[derive(vc_accessor::derive::Reflect)]
    pub struct Item {
        pub name: String,
    }
}

#[test]
fn lookup_by_id_and_name() {
    let cache = DescriptorCache::default();
    assert!(cache.is_empty());
    assert!(cache.register::<Plain>());
    assert!(!cache.register::<Plain>());
    assert!(cache.contains(TypeId::of::<Plain>()));

    let by_id = cache.get_by_id(TypeId::of::<Plain>()).unwrap();
    let by_name = cache.get_by_name("Plain").unwrap();
    let by_path = cache.get_by_name(std::any::type_name::<Plain>()).unwrap();
    let by_value = cache.descriptor_of(&Plain { id: 1 }).unwrap();

    assert!(Arc::ptr_eq(&by_id, &by_name));
    assert!(Arc::ptr_eq(&by_id, &by_path));
    assert!(Arc::ptr_eq(&by_id, &by_value));
    assert_eq!(by_id.type_id(), TypeId::of::<Plain>());
}

#[test]
fn ambiguous_short_names() {
    let cache = DescriptorCache::default();
    cache.register::<first::Item>();
    cache.register::<second::Item>();

    let err = cache.get_by_name("Item").unwrap_err();
    assert!(matches!(err, AccessError::UnregisteredType { .. }));

    let second = cache.get_by_name(std::any::type_name::<second::Item>()).unwrap();
    assert!(second.has_accessor("name", AccessorMode::Get));
}

#[test]
fn unregistered_types() {
    let cache = DescriptorCache::default();

    let err = cache.get_by_name("Plain").unwrap_err();
    assert!(matches!(err, AccessError::UnregisteredType { ref type_name } if type_name == "Plain"));

    let err = cache.descriptor_of(&Plain { id: 1 }).unwrap_err();
    assert!(matches!(
        err,
        AccessError::UnregisteredType { ref type_name } if type_name.ends_with("Plain")
    ));
    assert!(cache.get_by_id(TypeId::of::<Plain>()).is_err());
}

// -----------------------------------------------------------------------------
// Broken member tables

#[derive(Reflect)]
#[reflect(methods)]
struct Broken;

impl ReflectMethods for Broken {
    fn methods() -> Vec<Member> {
        vec![Member::method(
            "",
            Visibility::Public,
            Vec::new(),
            None,
            MethodHandle::Shared(|_, _| Ok(None)),
        )]
    }
}

#[test]
fn malformed_members_fail_every_lookup() {
    let cache = DescriptorCache::default();

    for _ in 0..2 {
        let err = cache.get::<Broken>().unwrap_err();
        assert!(matches!(err, AccessError::MalformedMember { .. }));
    }
    assert!(cache.contains(TypeId::of::<Broken>()));
}

// -----------------------------------------------------------------------------
// Auto registration

#[cfg(feature = "auto_register")]
mod auto {
    use super::*;

    #[derive(Reflect)]
    #[reflect(auto_register)]
    pub struct Tracked {
        pub hits: u32,
    }

    #[test]
    fn auto_register_collects_marked_types() {
        let cache = DescriptorCache::default();

        assert!(cache.auto_register() >= 1);
        assert!(cache.contains(TypeId::of::<Tracked>()));
        assert!(!cache.contains(TypeId::of::<Plain>()));
        assert_eq!(cache.auto_register(), 0);

        let descriptor = cache.get_by_name("Tracked").unwrap();
        assert!(descriptor.has_accessor("hits", AccessorMode::Get));
    }
}
