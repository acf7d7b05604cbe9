//! Field accessors and the proxies built on them.

use std::collections::BTreeMap;

use vc_accessor::access::{AccessError, AccessorMode, AccessorSource};
use vc_accessor::args;
use vc_accessor::config::{AccessorConfig, GrowthPolicy};
use vc_accessor::derive::{Reflect, properties};
use vc_accessor::descriptor::DescriptorCache;
use vc_accessor::member::Visibility;

#[derive(Reflect, Default)]
struct Inventory {
    pub items: Vec<u32>,
    pub labels: BTreeMap<String, u32>,
    pub slots: [u8; 3],
    #[reflect(read_only)]
    pub owner: String,
    #[reflect(rename = "title")]
    pub name: String,
    pub(crate) internal: u32,
    hidden: u32,
}

fn inventory() -> Inventory {
    Inventory {
        items: vec![1, 2],
        labels: BTreeMap::from([("en".to_string(), 1)]),
        slots: [7, 8, 9],
        owner: "ann".to_string(),
        name: "main".to_string(),
        internal: 5,
        hidden: 6,
    }
}

#[test]
fn field_modes() {
    let descriptor = DescriptorCache::default().get::<Inventory>().unwrap();

    let get = descriptor.require("items", AccessorMode::Get).unwrap();
    assert_eq!(get.source(), AccessorSource::Field);
    assert!(descriptor.has_accessor("items", AccessorMode::Set));

    assert!(descriptor.has_accessor("owner", AccessorMode::Get));
    assert!(!descriptor.has_accessor("owner", AccessorMode::Set));

    assert!(descriptor.has_accessor("title", AccessorMode::Get));
    assert!(!descriptor.has_accessor("name", AccessorMode::Get));

    assert!(!descriptor.has_accessor("internal", AccessorMode::Get));
    assert!(!descriptor.has_accessor("hidden", AccessorMode::Get));

    assert!(descriptor.has_accessor("labels", AccessorMode::GetMapped));
    assert!(!descriptor.has_accessor("labels", AccessorMode::GetIndexed));
    assert!(!descriptor.has_accessor("owner", AccessorMode::GetSize));

    let properties: Vec<_> = descriptor.properties().map(|name| name.to_string()).collect();
    assert_eq!(properties, ["items", "labels", "slots", "owner", "title"]);
}

#[test]
fn min_visibility_admits_crate_fields() {
    let config = AccessorConfig::DEFAULT.with_min_visibility(Visibility::Crate);
    let descriptor = DescriptorCache::new(config).get::<Inventory>().unwrap();

    assert!(descriptor.has_accessor("internal", AccessorMode::Get));
    assert!(!descriptor.has_accessor("hidden", AccessorMode::Get));
}

#[test]
fn set_returns_previous_value() {
    let descriptor = DescriptorCache::default().get::<Inventory>().unwrap();
    let mut inventory = inventory();

    let set = descriptor.require("title", AccessorMode::Set).unwrap();
    let previous = set.invoke(&mut inventory, args!["spare".to_string()]).unwrap().unwrap();

    assert_eq!(previous.downcast_ref::<String>().unwrap(), "main");
    assert_eq!(inventory.name, "spare");

    let err = set.invoke(&mut inventory, args![3_u8]).unwrap_err();
    assert!(matches!(err, AccessError::IncompatibleValue { .. }));
    assert_eq!(inventory.name, "spare");
}

#[test]
fn list_proxies_modify_in_place() {
    let descriptor = DescriptorCache::default().get::<Inventory>().unwrap();
    let mut inventory = inventory();

    let add = descriptor.require("items", AccessorMode::Add).unwrap();
    assert!(add.invoke(&mut inventory, args![3_u32]).unwrap().is_none());
    assert_eq!(inventory.items, [1, 2, 3]);

    // Padded with the default element.
    let set = descriptor.require("items", AccessorMode::SetIndexed).unwrap();
    assert!(set.invoke(&mut inventory, args![5_usize, 9_u32]).unwrap().is_none());
    assert_eq!(inventory.items, [1, 2, 3, 0, 0, 9]);

    let remove = descriptor.require("items", AccessorMode::Remove).unwrap();
    let removed = remove.invoke(&mut inventory, args![0_u32]).unwrap().unwrap();
    assert_eq!(*removed.downcast_ref::<u32>().unwrap(), 0);
    assert_eq!(inventory.items, [1, 2, 3, 0, 9]);

    let size = descriptor.require("items", AccessorMode::GetSize).unwrap();
    assert_eq!(size.read_as::<usize>(&inventory, args![]).unwrap(), 5);
}

#[test]
fn growth_limit() {
    let config = AccessorConfig::DEFAULT.with_growth(GrowthPolicy::new(2, 2));
    let descriptor = DescriptorCache::new(config).get::<Inventory>().unwrap();
    let mut inventory = inventory();

    let set = descriptor.require("items", AccessorMode::SetIndexed).unwrap();
    let err = set.invoke(&mut inventory, args![4_usize, 1_u32]).unwrap_err();
    assert!(matches!(
        err,
        AccessError::GrowthLimitExceeded { index: 4, len: 2, limit: 4 }
    ));
    assert_eq!(inventory.items, [1, 2]);

    set.invoke(&mut inventory, args![3_usize, 1_u32]).unwrap();
    assert_eq!(inventory.items, [1, 2, 0, 1]);
}

#[test]
fn fixed_arrays() {
    let descriptor = DescriptorCache::default().get::<Inventory>().unwrap();
    let mut inventory = inventory();

    let set = descriptor.require("slots", AccessorMode::SetIndexed).unwrap();
    let previous = set.invoke(&mut inventory, args![1_usize, 0_u8]).unwrap().unwrap();
    assert_eq!(*previous.downcast_ref::<u8>().unwrap(), 8);
    assert_eq!(inventory.slots, [7, 0, 9]);

    let err = set.invoke(&mut inventory, args![3_usize, 0_u8]).unwrap_err();
    assert!(matches!(err, AccessError::FixedCapacity { len: 3, .. }));

    let add = descriptor.require("slots", AccessorMode::Add).unwrap();
    let err = add.invoke(&mut inventory, args![1_u8]).unwrap_err();
    assert!(matches!(err, AccessError::FixedCapacity { .. }));
    assert_eq!(inventory.slots, [7, 0, 9]);
}

#[test]
fn map_proxies() {
    let descriptor = DescriptorCache::default().get::<Inventory>().unwrap();
    let mut inventory = inventory();

    let get = descriptor.require("labels", AccessorMode::GetMapped).unwrap();
    assert_eq!(get.read_as::<u32>(&inventory, args!["en".to_string()]).unwrap(), 1);
    let err = get.read(&inventory, args!["de".to_string()]).unwrap_err();
    assert!(matches!(err, AccessError::KeyNotFound { .. }));

    let set = descriptor.require("labels", AccessorMode::SetMapped).unwrap();
    assert!(set.invoke(&mut inventory, args!["de".to_string(), 2_u32]).unwrap().is_none());
    let previous = set.invoke(&mut inventory, args!["en".to_string(), 3_u32]).unwrap().unwrap();
    assert_eq!(*previous.downcast_ref::<u32>().unwrap(), 1);

    let remove = descriptor.require("labels", AccessorMode::Remove).unwrap();
    let removed = remove.invoke(&mut inventory, args!["de".to_string()]).unwrap().unwrap();
    assert_eq!(*removed.downcast_ref::<u32>().unwrap(), 2);
    assert!(remove.invoke(&mut inventory, args!["de".to_string()]).unwrap().is_none());

    assert_eq!(inventory.labels, BTreeMap::from([("en".to_string(), 3)]));
}

#[test]
fn target_mismatch() {
    let descriptor = DescriptorCache::default().get::<Inventory>().unwrap();
    let get = descriptor.require("items", AccessorMode::Get).unwrap();

    let err = get.read(&"not an inventory".to_string(), args![]).unwrap_err();
    assert!(matches!(err, AccessError::TargetMismatch { .. }));
}

// -----------------------------------------------------------------------------
// Getter without setter

#[derive(Reflect)]
#[reflect(methods)]
struct Snapshot {
    values: Vec<u32>,
}

#[properties]
impl Snapshot {
    pub fn get_values(&self) -> Vec<u32> {
        self.values.clone()
    }
}

#[test]
fn detached_container_without_setter() {
    let descriptor = DescriptorCache::default().get::<Snapshot>().unwrap();
    let mut snapshot = Snapshot { values: vec![1, 2] };

    let get = descriptor.require("values", AccessorMode::GetIndexed).unwrap();
    assert_eq!(get.read_as::<u32>(&snapshot, args![1_usize]).unwrap(), 2);

    let add = descriptor.require("values", AccessorMode::Add).unwrap();
    let err = add.invoke(&mut snapshot, args![3_u32]).unwrap_err();
    assert!(matches!(err, AccessError::ContainerWriteImpossible { ref property, .. } if property == "values"));
    assert_eq!(snapshot.values, [1, 2]);

    // Nothing changes, so nothing needs to be stored back.
    let remove = descriptor.require("values", AccessorMode::Remove).unwrap();
    assert!(remove.invoke(&mut snapshot, args![7_u32]).unwrap().is_none());
}
