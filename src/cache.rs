use std::collections::HashMap;
use std::hash::{BuildHasher, Hash};

use crate::error::LoadResult;

/// Per-request memo of load outcomes.
///
/// Entries are the full outcome of a load: a value, `Ok(None)` for keys the batch function did not
/// return, or the error recorded for the key. Once a key has an entry it is never fetched again
/// unless it is removed.
pub trait Cache {
    type K;
    type V;

    fn get(&self, key: &Self::K) -> Option<&LoadResult<Self::V>>;

    /// Returns the keys from `keys` that have no entry, in request order.
    fn missing(&self, keys: &[Self::K]) -> Vec<Self::K>;

    fn insert(&mut self, key: Self::K, entry: LoadResult<Self::V>);
    fn insert_many<I: IntoIterator<Item = (Self::K, LoadResult<Self::V>)>>(&mut self, entries: I);

    fn remove(&mut self, keys: &[Self::K]);
}

impl<K, V, S: BuildHasher> Cache for HashMap<K, LoadResult<V>, S>
where
    K: Eq + Hash + Clone,
{
    type K = K;
    type V = V;

    fn get(&self, key: &Self::K) -> Option<&LoadResult<Self::V>> {
        HashMap::get(self, key)
    }

    fn missing(&self, keys: &[Self::K]) -> Vec<Self::K> {
        keys.iter().filter(|k| !self.contains_key(k)).cloned().collect()
    }

    fn insert(&mut self, key: Self::K, entry: LoadResult<Self::V>) {
        HashMap::insert(self, key, entry);
    }

    fn insert_many<I: IntoIterator<Item = (Self::K, LoadResult<Self::V>)>>(&mut self, entries: I) {
        self.extend(entries);
    }

    fn remove(&mut self, keys: &[Self::K]) {
        for key in keys.iter() {
            HashMap::remove(self, key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LoadError;

    #[test]
    fn missing_keeps_request_order() {
        let mut cache: HashMap<i64, LoadResult<&str>> = HashMap::new();
        Cache::insert(&mut cache, 2, Ok(Some("two")));
        Cache::insert(&mut cache, 4, Err(LoadError::Cancelled));

        assert_eq!(cache.missing(&[5, 2, 1, 4]), vec![5, 1]);
    }

    #[test]
    fn errors_and_not_found_are_entries() {
        let mut cache: HashMap<i64, LoadResult<&str>> = HashMap::new();
        cache.insert_many(vec![(1, Ok(None)), (2, Err(LoadError::Query("boom".into())))]);

        assert_eq!(Cache::get(&cache, &1), Some(&Ok(None)));
        assert!(cache.missing(&[1, 2]).is_empty());

        Cache::remove(&mut cache, &[1]);
        assert_eq!(cache.missing(&[1, 2]), vec![1]);

        Cache::remove(&mut cache, &[2]);
        assert_eq!(cache.missing(&[1, 2]), vec![1, 2]);
    }
}
