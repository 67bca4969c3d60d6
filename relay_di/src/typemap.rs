//! Heterogeneous map keyed by type, backing the provider build cache.
//!
//! Holds at most one value per type. Inserting a second value of the same
//! type replaces the first.

use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

#[derive(Debug, Default)]
pub struct TypeMap(HashMap<TypeId, Box<dyn Any>>);

impl TypeMap {
    pub fn get<T: 'static>(&self) -> Option<&T> {
        self.0
            .get(&TypeId::of::<T>())
            .and_then(|x| x.downcast_ref())
    }

    pub fn insert<T: 'static>(&mut self, x: T) {
        self.0.insert(TypeId::of::<T>(), Box::new(x));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_value_per_type() {
        let mut map = TypeMap::default();
        assert_eq!(map.get::<u32>(), None);

        map.insert(1u32);
        map.insert(2u32);
        map.insert("text");

        assert_eq!(map.get::<u32>(), Some(&2));
        assert_eq!(map.get::<&str>(), Some(&"text"));
        assert_eq!(map.get::<u64>(), None);
    }
}
