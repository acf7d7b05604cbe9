//! A type whose only property is reachable through methods.

use vc_accessor::access::{AccessError, AccessorMode, AccessorSource};
use vc_accessor::args;
use vc_accessor::derive::{Reflect, properties};
use vc_accessor::descriptor::DescriptorCache;

#[derive(Reflect, Default)]
#[reflect(methods)]
struct Bag {
    tags: Vec<String>,
    writes: usize,
}

#[properties]
impl Bag {
    pub fn get_tags(&self) -> &[String] {
        &self.tags
    }

    pub fn set_tags(&mut self, tags: Vec<String>) {
        self.tags = tags;
        self.writes += 1;
    }
}

fn bag(tags: &[&str]) -> Bag {
    Bag {
        tags: tags.iter().map(|tag| tag.to_string()).collect(),
        writes: 0,
    }
}

fn text(value: &str) -> String {
    value.to_string()
}

#[test]
fn synthesizes_container_modes() {
    let cache = DescriptorCache::default();
    let descriptor = cache.get::<Bag>().unwrap();

    let modes: Vec<_> = descriptor.modes("tags").collect();
    for mode in [
        AccessorMode::Get,
        AccessorMode::Set,
        AccessorMode::GetIndexed,
        AccessorMode::SetIndexed,
        AccessorMode::Add,
        AccessorMode::Remove,
        AccessorMode::GetSize,
    ] {
        assert!(modes.contains(&mode), "missing {mode}");
    }
    assert!(!descriptor.has_accessor("tags", AccessorMode::GetMapped));

    assert_eq!(descriptor.require("tags", AccessorMode::Get).unwrap().source(), AccessorSource::Method);
    assert_eq!(descriptor.require("tags", AccessorMode::Add).unwrap().source(), AccessorSource::Proxy);

    // Private fields are not properties.
    assert!(descriptor.accessor("writes", AccessorMode::Get).is_none());
    assert_eq!(descriptor.properties().count(), 1);
}

#[test]
fn indexed_read() {
    let cache = DescriptorCache::default();
    let descriptor = cache.get::<Bag>().unwrap();
    let bag = bag(&["a", "b", "c"]);

    let get = descriptor.require("tags", AccessorMode::GetIndexed).unwrap();
    assert_eq!(get.read_as::<String>(&bag, args![1_usize]).unwrap(), "b");

    let err = get.read(&bag, args![7_usize]).unwrap_err();
    assert!(matches!(err, AccessError::IndexOutOfBounds { index: 7, len: 3 }));

    let size = descriptor.require("tags", AccessorMode::GetSize).unwrap();
    assert_eq!(size.read_as::<usize>(&bag, args![]).unwrap(), 3);
}

#[test]
fn indexed_write_grows_through_setter() {
    let cache = DescriptorCache::default();
    let descriptor = cache.get::<Bag>().unwrap();
    let mut bag = bag(&["a", "b", "c"]);

    let set = descriptor.require("tags", AccessorMode::SetIndexed).unwrap();
    let previous = set.invoke(&mut bag, args![3_usize, text("d")]).unwrap();

    assert!(previous.is_none());
    assert_eq!(bag.tags, ["a", "b", "c", "d"]);
    assert_eq!(bag.writes, 1);

    let previous = set.invoke(&mut bag, args![0_usize, text("z")]).unwrap().unwrap();
    assert_eq!(previous.downcast_ref::<String>().unwrap(), "a");
    assert_eq!(bag.tags, ["z", "b", "c", "d"]);
    assert_eq!(bag.writes, 2);
}

#[test]
fn remove_by_value() {
    let cache = DescriptorCache::default();
    let descriptor = cache.get::<Bag>().unwrap();
    let mut bag = bag(&["a", "b", "c", "d"]);

    let remove = descriptor.require("tags", AccessorMode::Remove).unwrap();
    let removed = remove.invoke(&mut bag, args![text("b")]).unwrap().unwrap();

    assert_eq!(removed.downcast_ref::<String>().unwrap(), "b");
    assert_eq!(bag.tags, ["a", "c", "d"]);
    assert_eq!(bag.writes, 1);

    // Nothing to remove: the setter is not called.
    assert!(remove.invoke(&mut bag, args![text("x")]).unwrap().is_none());
    assert_eq!(bag.tags, ["a", "c", "d"]);
    assert_eq!(bag.writes, 1);
}

#[test]
fn add_appends() {
    let cache = DescriptorCache::default();
    let descriptor = cache.get::<Bag>().unwrap();
    let mut bag = Bag::default();

    let add = descriptor.require("tags", AccessorMode::Add).unwrap();
    add.invoke(&mut bag, args![text("a")]).unwrap();
    add.invoke(&mut bag, args![text("b")]).unwrap();

    assert_eq!(bag.tags, ["a", "b"]);
    assert_eq!(bag.writes, 2);
}

#[test]
fn argument_errors() {
    let cache = DescriptorCache::default();
    let descriptor = cache.get::<Bag>().unwrap();
    let mut bag = bag(&["a"]);

    let add = descriptor.require("tags", AccessorMode::Add).unwrap();
    let err = add.invoke(&mut bag, args![]).unwrap_err();
    assert!(matches!(err, AccessError::ArityMismatch { expected: 1, found: 0, .. }));

    let err = add.invoke(&mut bag, args![5_u32]).unwrap_err();
    assert!(matches!(err, AccessError::IncompatibleValue { .. }));
    assert_eq!(bag.tags, ["a"]);
    assert_eq!(bag.writes, 0);

    // Write accessors cannot be used for reading.
    let err = add.read(&bag, args![text("b")]).unwrap_err();
    assert!(matches!(err, AccessError::AccessDenied { .. }));
}

#[test]
fn missing_accessor() {
    let cache = DescriptorCache::default();
    let descriptor = cache.get::<Bag>().unwrap();

    let err = descriptor.require("labels", AccessorMode::GetMapped).unwrap_err();
    assert!(matches!(
        err,
        AccessError::PropertyNotFound { ref property, mode: AccessorMode::GetMapped, .. } if property == "labels"
    ));
}
