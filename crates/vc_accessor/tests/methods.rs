//! Which methods the builders turn into which accessors.

use vc_accessor::access::{AccessError, AccessorMode, AccessorSource};
use vc_accessor::args;
use vc_accessor::config::{AccessorConfig, NamingConvention};
use vc_accessor::derive::{Reflect, properties};
use vc_accessor::descriptor::DescriptorCache;
use std::collections::BTreeMap;

// -----------------------------------------------------------------------------
// Size getters

#[derive(Reflect)]
#[reflect(methods)]
struct Counter {
    size: i32,
    ratio: f64,
    short: i16,
}

#[properties]
impl Counter {
    pub fn get_size(&self) -> i32 {
        self.size
    }

    pub fn get_ratio(&self) -> f64 {
        self.ratio
    }

    pub fn get_short_count(&self) -> i16 {
        self.short
    }
}

fn counter() -> Counter {
    Counter {
        size: 4,
        ratio: 0.5,
        short: 2,
    }
}

#[test]
fn size_getter_is_not_a_plain_getter() {
    let descriptor = DescriptorCache::default().get::<Counter>().unwrap();

    assert!(descriptor.has_accessor("size", AccessorMode::GetSize));
    assert!(!descriptor.has_accessor("size", AccessorMode::Get));
    assert!(descriptor.accessor("size", AccessorMode::Set).is_none());

    let size = descriptor.require("size", AccessorMode::GetSize).unwrap();
    assert_eq!(size.source(), AccessorSource::Method);
    assert_eq!(size.read_as::<i32>(&counter(), args![]).unwrap(), 4);
}

#[test]
fn non_integer_size_is_a_getter() {
    let descriptor = DescriptorCache::default().get::<Counter>().unwrap();

    assert!(descriptor.has_accessor("ratio", AccessorMode::Get));
    assert!(!descriptor.has_accessor("ratio", AccessorMode::GetSize));
    let ratio = descriptor.require("ratio", AccessorMode::Get).unwrap();
    assert_eq!(ratio.read_as::<f64>(&counter(), args![]).unwrap(), 0.5);
}

#[test]
fn narrow_size_is_a_getter() {
    let descriptor = DescriptorCache::default().get::<Counter>().unwrap();

    assert!(!descriptor.has_accessor("short", AccessorMode::GetSize));
    assert!(descriptor.has_accessor("short_count", AccessorMode::Get));
}

// -----------------------------------------------------------------------------
// Verbs

#[derive(Reflect, Default)]
#[reflect(methods)]
struct Settings {
    enabled: bool,
    ids: Vec<u32>,
    labels: BTreeMap<String, String>,
    next: u32,
}

#[properties]
impl Settings {
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn get_id(&self, index: usize) -> u32 {
        self.ids[index]
    }

    pub fn set_id(&mut self, index: u64, id: u32) {
        self.ids[index as usize] = id;
    }

    pub fn add_id(&mut self, id: u32) {
        self.ids.push(id);
    }

    pub fn get_label(&self, key: &str) -> Result<String, LabelError> {
        self.labels.get(key).cloned().ok_or(LabelError)
    }

    pub fn put_label(&mut self, key: String, value: String) {
        self.labels.insert(key, value);
    }

    pub fn get_next(&mut self) -> u32 {
        self.next += 1;
        self.next
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    #[property(skip)]
    pub fn get_secret(&self) -> u32 {
        42
    }

    fn get_private(&self) -> u32 {
        0
    }
}

#[derive(Debug)]
struct LabelError;

impl std::fmt::Display for LabelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("no such label")
    }
}

impl std::error::Error for LabelError {}

#[test]
fn verbs_map_to_modes() {
    let descriptor = DescriptorCache::default().get::<Settings>().unwrap();

    for (property, mode) in [
        ("enabled", AccessorMode::Get),
        ("enabled", AccessorMode::Set),
        ("id", AccessorMode::GetIndexed),
        ("id", AccessorMode::SetIndexed),
        ("id", AccessorMode::Add),
        ("label", AccessorMode::GetMapped),
        ("label", AccessorMode::SetMapped),
        ("next", AccessorMode::Get),
        ("label", AccessorMode::GetSize),
    ] {
        let accessor = descriptor.require(property, mode).unwrap();
        assert_eq!(accessor.source(), AccessorSource::Method, "{property} {mode}");
    }

    assert!(descriptor.properties().all(|name| name != "secret" && name != "private"));
}

#[test]
fn indexed_and_mapped_methods() {
    let descriptor = DescriptorCache::default().get::<Settings>().unwrap();
    let mut settings = Settings {
        ids: vec![1, 2],
        ..Settings::default()
    };

    let add = descriptor.require("id", AccessorMode::Add).unwrap();
    add.invoke(&mut settings, args![3_u32]).unwrap();

    let set = descriptor.require("id", AccessorMode::SetIndexed).unwrap();
    set.invoke(&mut settings, args![0_usize, 9_u32]).unwrap();
    assert_eq!(settings.ids, [9, 2, 3]);

    let get = descriptor.require("id", AccessorMode::GetIndexed).unwrap();
    assert_eq!(get.read_as::<u32>(&settings, args![2_usize]).unwrap(), 3);

    let element = get.by_index(1).unwrap();
    assert_eq!(element.mode(), AccessorMode::Get);
    assert_eq!(element.read_as::<u32>(&settings, args![]).unwrap(), 2);

    let put = descriptor.require("label", AccessorMode::SetMapped).unwrap();
    put.invoke(&mut settings, args!["en".to_string(), "tag".to_string()]).unwrap();

    let label = descriptor.require("label", AccessorMode::GetMapped).unwrap();
    assert_eq!(label.read_as::<String>(&settings, args!["en".to_string()]).unwrap(), "tag");

    let count = descriptor.require("label", AccessorMode::GetSize).unwrap();
    assert_eq!(count.read_as::<usize>(&settings, args![]).unwrap(), 1);
}

#[test]
fn failing_method_reports_its_error() {
    let descriptor = DescriptorCache::default().get::<Settings>().unwrap();
    let label = descriptor.require("label", AccessorMode::GetMapped).unwrap();

    let err = label.read(&Settings::default(), args!["fr".to_string()]).unwrap_err();
    let AccessError::InvocationFailed { member, source, .. } = err else {
        panic!("unexpected error: {err}");
    };
    assert_eq!(member, "get_label");
    assert_eq!(source.to_string(), "no such label");
}

#[test]
fn exclusive_getter_needs_invoke() {
    let descriptor = DescriptorCache::default().get::<Settings>().unwrap();
    let next = descriptor.require("next", AccessorMode::Get).unwrap();
    let mut settings = Settings::default();

    let err = next.read(&settings, args![]).unwrap_err();
    assert!(matches!(err, AccessError::AccessDenied { member: "get_next", .. }));

    let value = next.invoke(&mut settings, args![]).unwrap().unwrap();
    assert_eq!(*value.downcast_ref::<u32>().unwrap(), 1);
    assert_eq!(settings.next, 1);
}

#[test]
fn setter_converts_arguments() {
    let descriptor = DescriptorCache::default().get::<Settings>().unwrap();
    let mut settings = Settings::default();

    let set = descriptor.require("enabled", AccessorMode::Set).unwrap();
    set.invoke(&mut settings, args![true]).unwrap();
    assert!(settings.enabled);

    let err = set.invoke(&mut settings, args!["yes".to_string()]).unwrap_err();
    assert!(matches!(err, AccessError::InvocationFailed { .. } | AccessError::IncompatibleValue { .. }));
    assert!(settings.enabled);
}

// -----------------------------------------------------------------------------
// Bare getters

#[derive(Reflect)]
#[reflect(methods)]
struct Point {
    x: i64,
}

#[properties]
impl Point {
    pub fn x(&self) -> i64 {
        self.x
    }
}

#[test]
fn bare_getters_follow_the_naming_convention() {
    let descriptor = DescriptorCache::default().get::<Point>().unwrap();
    assert!(descriptor.has_accessor("x", AccessorMode::Get));

    let strict = AccessorConfig::DEFAULT.with_naming(NamingConvention { bare_getters: false });
    let descriptor = DescriptorCache::new(strict).get::<Point>().unwrap();
    assert!(descriptor.is_empty());
}

// -----------------------------------------------------------------------------
// Result aliases

#[derive(Reflect)]
#[reflect(methods)]
struct Report {
    total: u64,
}

#[properties]
impl Report {
    pub fn get_total(&self) -> std::io::Result<u64> {
        Ok(self.total)
    }

    pub fn get_rendered(&self) -> std::fmt::Result {
        Ok(())
    }
}

#[test]
fn result_aliases() {
    let descriptor = DescriptorCache::default().get::<Report>().unwrap();

    let total = descriptor.require("total", AccessorMode::Get).unwrap();
    assert_eq!(total.read_as::<u64>(&Report { total: 12 }, args![]).unwrap(), 12);

    // The success type of `fmt::Result` is not visible, so it is not exported.
    assert!(!descriptor.has_accessor("rendered", AccessorMode::Get));
    assert_eq!(descriptor.properties().count(), 1);
}
