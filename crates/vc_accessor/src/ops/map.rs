use alloc::boxed::Box;

use crate::Reflect;

/// A key-value container.
///
/// Keys are matched by exact type first, then converted to the key type,
/// so a `u8` finds the entry stored under `1_u32`.
///
/// # Examples
///
/// ```
/// use std::collections::HashMap;
/// use vc_accessor::ops::Map;
///
/// let mut map: HashMap<u32, String> = HashMap::new();
/// Map::try_insert(&mut map, Box::new(1_u8), Box::new("one".to_string())).unwrap();
///
/// let one = Map::get(&map, &1_u32).unwrap();
/// assert_eq!(one.downcast_ref::<String>().unwrap(), "one");
/// assert!(Map::remove(&mut map, &1_u64).is_some());
/// assert!(Map::is_empty(&map));
/// ```
pub trait Map: Reflect {
    fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect>;

    fn get_mut(&mut self, key: &dyn Reflect) -> Option<&mut dyn Reflect>;

    fn len(&self) -> usize;

    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts an entry and returns the value it replaced.
    ///
    /// Whichever of key or value cannot be converted is handed back.
    fn try_insert(
        &mut self,
        key: Box<dyn Reflect>,
        value: Box<dyn Reflect>,
    ) -> Result<Option<Box<dyn Reflect>>, Box<dyn Reflect>>;

    fn remove(&mut self, key: &dyn Reflect) -> Option<Box<dyn Reflect>>;
}
