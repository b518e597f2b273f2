// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Utility types

use std::collections::hash_map::{Entry, HashMap};
use std::fmt;
use std::hash::Hash;
use std::sync::{PoisonError, RwLock};

/// A compute-if-absent map
///
/// The first requester computes a value; later requesters share it. Racing
/// first requesters may both compute, but only the first result is kept.
pub(crate) struct Cache<K, V> {
    map: RwLock<HashMap<K, V>>,
}

impl<K, V> Default for Cache<K, V> {
    fn default() -> Self {
        Cache {
            map: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> fmt::Debug for Cache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.map.read().map(|map| map.len()).unwrap_or(0);
        f.debug_struct("Cache").field("len", &len).finish()
    }
}

impl<K: Eq + Hash, V: Clone> Cache<K, V> {
    pub(crate) fn get(&self, key: &K) -> Option<V> {
        let map = self.map.read().unwrap_or_else(PoisonError::into_inner);
        map.get(key).cloned()
    }

    pub(crate) fn insert(&self, key: K, value: V) -> V {
        let mut map = self.map.write().unwrap_or_else(PoisonError::into_inner);
        match map.entry(key) {
            Entry::Occupied(entry) => entry.get().clone(),
            Entry::Vacant(entry) => entry.insert(value).clone(),
        }
    }

    pub(crate) fn get_or_insert(&self, key: K, f: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = f();
        self.insert(key, value)
    }

    pub(crate) fn get_or_try_insert<E>(
        &self,
        key: K,
        f: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let value = f()?;
        Ok(self.insert(key, value))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cache_keeps_first_value() {
        let cache = Cache::<u32, u32>::default();
        assert_eq!(cache.get_or_insert(1, || 10), 10);
        assert_eq!(cache.get_or_insert(1, || 20), 10);
        assert_eq!(cache.insert(1, 30), 10);
        let err: Result<u32, &str> = cache.get_or_try_insert(2, || Err("fail"));
        assert!(err.is_err());
        assert_eq!(cache.get(&2), None);
        assert_eq!(cache.get_or_try_insert::<()>(2, || Ok(5)), Ok(5));
    }
}
