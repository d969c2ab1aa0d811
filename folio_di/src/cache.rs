use std::{
    any::{Any, TypeId},
    collections::HashMap,
};

/// Services already built by a provider, at most one per type.
#[derive(Debug, Default)]
pub struct ServiceCache(HashMap<TypeId, Box<dyn Any>>);

impl ServiceCache {
    /// Return a copy of the cached service of type `T`, if one was built.
    pub fn get<T: Clone + 'static>(&self) -> Option<T> {
        self.0.get(&TypeId::of::<T>())?.downcast_ref::<T>().cloned()
    }

    /// Cache `service`, replacing a previously cached service of the same type.
    pub fn insert<T: 'static>(&mut self, service: T) {
        self.0.insert(TypeId::of::<T>(), Box::new(service));
    }

    pub fn contains<T: 'static>(&self) -> bool {
        self.0.contains_key(&TypeId::of::<T>())
    }
}
