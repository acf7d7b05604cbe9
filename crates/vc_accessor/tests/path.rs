use std::collections::BTreeMap;

use vc_accessor::access::{AccessError, AccessorMode};
use vc_accessor::derive::{Reflect, properties};
use vc_accessor::descriptor::DescriptorCache;
use vc_accessor::path::PropertyPath;

#[derive(Reflect, Clone, Default)]
#[reflect(clone)]
struct Owner {
    pub name: String,
    pub scores: BTreeMap<String, u32>,
}

#[derive(Reflect, Default)]
#[reflect(methods)]
struct Shelf {
    owner: Owner,
    pub rows: Vec<Vec<u8>>,
}

#[properties]
impl Shelf {
    pub fn get_owner(&self) -> &Owner {
        &self.owner
    }
}

fn setup() -> (DescriptorCache, Shelf) {
    let cache = DescriptorCache::default();
    cache.register::<Shelf>();
    cache.register::<Owner>();

    let shelf = Shelf {
        owner: Owner {
            name: "ann".to_string(),
            scores: BTreeMap::from([("en".to_string(), 7)]),
        },
        rows: vec![vec![1, 2], vec![3]],
    };
    (cache, shelf)
}

fn read<T: Clone + 'static>(cache: &DescriptorCache, shelf: &Shelf, path: &str) -> Result<T, AccessError> {
    let value = PropertyPath::parse(path).unwrap().read(cache, shelf)?;
    Ok(value.downcast_ref::<T>().unwrap().clone())
}

#[test]
fn nested_reads() {
    let (cache, shelf) = setup();

    assert_eq!(read::<String>(&cache, &shelf, "owner.name").unwrap(), "ann");
    assert_eq!(read::<u32>(&cache, &shelf, "owner.scores[\"en\"]").unwrap(), 7);
    assert_eq!(read::<u8>(&cache, &shelf, "rows[1][0]").unwrap(), 3);
    assert_eq!(read::<Vec<u8>>(&cache, &shelf, "rows[0]").unwrap(), [1, 2]);
}

#[test]
fn failed_reads() {
    let (cache, shelf) = setup();

    let err = read::<u8>(&cache, &shelf, "rows[4]").unwrap_err();
    assert!(matches!(err, AccessError::IndexOutOfBounds { index: 4, len: 2 }));

    let err = read::<u32>(&cache, &shelf, "owner.scores[\"de\"]").unwrap_err();
    assert!(matches!(err, AccessError::KeyNotFound { .. }));

    let err = read::<String>(&cache, &shelf, "owner.title").unwrap_err();
    assert!(matches!(err, AccessError::PropertyNotFound { .. }));

    // `String` is not registered.
    let err = read::<String>(&cache, &shelf, "owner.name.len").unwrap_err();
    assert!(matches!(err, AccessError::UnregisteredType { .. }));
}

// -----------------------------------------------------------------------------
// Values without `clone`

#[derive(Reflect)]
struct Engine {
    pub hits: u32,
}

#[derive(Reflect)]
struct Garage {
    pub engine: Engine,
}

#[test]
fn reads_through_values_without_clone() {
    let cache = DescriptorCache::default();
    cache.register::<Garage>();
    cache.register::<Engine>();
    let garage = Garage {
        engine: Engine { hits: 3 },
    };

    let hits = PropertyPath::parse("engine.hits").unwrap().read(&cache, &garage).unwrap();
    assert_eq!(hits.downcast_ref::<u32>(), Some(&3));

    let descriptor = cache.get::<Garage>().unwrap();
    let engine = descriptor.require("engine", AccessorMode::Get).unwrap();
    let hits = engine
        .with_value(&garage, |engine| Ok(engine.downcast_ref::<Engine>().map(|engine| engine.hits)))
        .unwrap();
    assert_eq!(hits, Some(3));

    // Only the value at the end of the path is copied.
    let err = PropertyPath::parse("engine").unwrap().read(&cache, &garage).unwrap_err();
    assert!(matches!(err, AccessError::NotCloneable { .. }));
}
