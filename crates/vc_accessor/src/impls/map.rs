use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use std::collections::HashMap;

use crate::impls::utils::map_partial_eq;
use crate::info::{GenericShapeCell, ShapeKind, TypeShape, Typed};
use crate::ops::Map;
use crate::reflection::impl_reflect_cast_fn;
use crate::{FromReflect, Reflect};

macro_rules! impl_reflect_map {
    (
        $ty:ident<K, V $(, $s:ident)?>,
        where K: $($key_bound:path),+
        $(; $sb:ident: $($s_bound:path),+)?
    ) => {
        impl<K, V $(, $s)?> Typed for $ty<K, V $(, $s)?>
        where
            K: Typed + FromReflect + Clone $(+ $key_bound)+,
            V: Typed + FromReflect + Clone,
            $($sb: $($s_bound +)+ Default + Clone + Send + Sync + 'static,)?
        {
            fn type_shape() -> &'static TypeShape {
                static CELL: GenericShapeCell = GenericShapeCell::new();
                CELL.get_or_insert::<Self>(|| {
                    TypeShape::new::<Self>(ShapeKind::Map {
                        key: K::type_shape(),
                        value: V::type_shape(),
                    })
                    .with_default_of::<Self>()
                    .with_conversion::<Self>()
                })
            }
        }

        impl<K, V $(, $s)?> Reflect for $ty<K, V $(, $s)?>
        where
            K: Typed + FromReflect + Clone $(+ $key_bound)+,
            V: Typed + FromReflect + Clone,
            $($sb: $($s_bound +)+ Default + Clone + Send + Sync + 'static,)?
        {
            impl_reflect_cast_fn!(Map);

            #[inline]
            fn reflect_shape(&self) -> &'static TypeShape {
                <Self as Typed>::type_shape()
            }

            fn reflect_clone(&self) -> Option<Box<dyn Reflect>> {
                Some(Box::new(self.clone()))
            }

            fn reflect_partial_eq(&self, other: &dyn Reflect) -> Option<bool> {
                let entries = self
                    .iter()
                    .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect));
                map_partial_eq(self, entries, other)
            }

            fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_map()
                    .entries(
                        self.iter()
                            .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect)),
                    )
                    .finish()
            }
        }

        impl<K, V $(, $s)?> Map for $ty<K, V $(, $s)?>
        where
            K: Typed + FromReflect + Clone $(+ $key_bound)+,
            V: Typed + FromReflect + Clone,
            $($sb: $($s_bound +)+ Default + Clone + Send + Sync + 'static,)?
        {
            fn get(&self, key: &dyn Reflect) -> Option<&dyn Reflect> {
                let value = match key.downcast_ref::<K>() {
                    Some(key) => $ty::get(self, key),
                    None => $ty::get(self, &K::from_reflect(key)?),
                };
                value.map(|value| value as &dyn Reflect)
            }

            fn get_mut(&mut self, key: &dyn Reflect) -> Option<&mut dyn Reflect> {
                let value = match key.downcast_ref::<K>() {
                    Some(key) => $ty::get_mut(self, key),
                    None => $ty::get_mut(self, &K::from_reflect(key)?),
                };
                value.map(|value| value as &mut dyn Reflect)
            }

            #[inline]
            fn len(&self) -> usize {
                $ty::len(self)
            }

            fn try_insert(
                &mut self,
                key: Box<dyn Reflect>,
                value: Box<dyn Reflect>,
            ) -> Result<Option<Box<dyn Reflect>>, Box<dyn Reflect>> {
                let key = K::take_from_reflect(key)?;
                let value = V::take_from_reflect(value)?;
                Ok($ty::insert(self, key, value).map(V::into_boxed_reflect))
            }

            fn remove(&mut self, key: &dyn Reflect) -> Option<Box<dyn Reflect>> {
                let removed = match key.downcast_ref::<K>() {
                    Some(key) => $ty::remove(self, key),
                    None => $ty::remove(self, &K::from_reflect(key)?),
                };
                removed.map(V::into_boxed_reflect)
            }
        }

        impl<K, V $(, $s)?> FromReflect for $ty<K, V $(, $s)?>
        where
            K: Typed + FromReflect + Clone $(+ $key_bound)+,
            V: Typed + FromReflect + Clone,
            $($sb: $($s_bound +)+ Default + Clone + Send + Sync + 'static,)?
        {
            fn from_reflect(value: &dyn Reflect) -> Option<Self> {
                value.downcast_ref::<Self>().cloned()
            }
        }
    };
}

impl_reflect_map!(HashMap<K, V, S>, where K: Eq, Hash; S: BuildHasher);
impl_reflect_map!(BTreeMap<K, V>, where K: Ord);

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};

    use super::*;

    #[test]
    fn lookups_convert_keys() {
        let mut map: HashMap<u64, String> = HashMap::new();
        map.insert(3, "c".to_string());

        let found = Map::get(&map, &3_u8).unwrap();
        assert_eq!(found.downcast_ref::<String>().unwrap(), "c");
        assert!(Map::get(&map, &"3".to_string()).is_none());
    }

    #[test]
    fn maps_compare_entry_by_entry() {
        let lhs = BTreeMap::from([(1_u8, 'a'), (2, 'b')]);
        let rhs = BTreeMap::from([(2_u8, 'b'), (1, 'a')]);
        let other = BTreeMap::from([(1_u8, 'a'), (2, 'z')]);

        assert_eq!(lhs.reflect_partial_eq(&rhs), Some(true));
        assert_eq!(lhs.reflect_partial_eq(&other), Some(false));
        assert_eq!(lhs.reflect_partial_eq(&1_u8), Some(false));
    }
}
