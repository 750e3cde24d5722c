//! Hash map with an independently reorderable enumeration order.

use std::borrow::Borrow;
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;

use dashmap::DashMap;
use indexmap::IndexMap;
use parking_lot::RwLock;
use strata_core::CollectionError;

use crate::direction::ReorderDirection;

/// A concurrent map whose enumeration order is insertion order until
/// explicitly reordered.
///
/// Point lookups (`get`, `contains_key`, `len`) go to a sharded
/// [`DashMap`] and never touch the order lock. The enumeration order lives
/// in an [`IndexMap`] behind a [`parking_lot::RwLock`]; every mutation
/// holds its write guard for the whole operation, so the two structures
/// always hold the same keys.
///
/// Enumeration (`iter`, `entries`, `keys`, `values`) returns a snapshot
/// taken under the read guard.
///
/// # Examples
///
/// ```
/// use strata_map::{OrderedConcurrentMap, ReorderDirection};
///
/// let map = OrderedConcurrentMap::new();
/// map.insert(2, "two");
/// map.insert(3, "three");
/// map.insert(1, "one");
/// assert_eq!(map.keys(), vec![2, 3, 1]);
///
/// map.reorder_by_key(|k, _| *k, ReorderDirection::Ascending);
/// assert_eq!(map.keys(), vec![1, 2, 3]);
/// assert_eq!(map.get(&3), Some("three"));
/// ```
pub struct OrderedConcurrentMap<K, V> {
    lookup: DashMap<K, V>,
    order: RwLock<IndexMap<K, V>>,
}

// Compile-time assertion: the map must be shareable across threads.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<OrderedConcurrentMap<String, Vec<u8>>>();
};

impl<K, V> OrderedConcurrentMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create an empty map.
    pub fn new() -> Self {
        Self {
            lookup: DashMap::new(),
            order: RwLock::new(IndexMap::new()),
        }
    }

    /// Create an empty map with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lookup: DashMap::with_capacity(capacity),
            order: RwLock::new(IndexMap::with_capacity(capacity)),
        }
    }

    /// Build a map from `(key, value)` pairs, in the order given.
    ///
    /// A repeated key keeps its first position and its last value.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let map = Self::new();
        for (key, value) in pairs {
            map.insert(key, value);
        }
        map
    }

    /// Clone of the value stored for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup.get(key).map(|entry| entry.value().clone())
    }

    /// Like [`get`](Self::get), but fails when the key is absent.
    ///
    /// # Errors
    ///
    /// [`CollectionError::KeyNotFound`] if `key` is not in the map.
    pub fn try_get<Q>(&self, key: &Q) -> Result<V, CollectionError>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.get(key).ok_or(CollectionError::KeyNotFound)
    }

    /// Whether `key` is in the map.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.lookup.contains_key(key)
    }

    /// Whether `key` is in the map with a value equal to `value`.
    pub fn contains_entry<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: PartialEq,
    {
        self.lookup
            .get(key)
            .is_some_and(|entry| entry.value() == value)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.lookup.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.lookup.is_empty()
    }

    /// Store `value` for `key`, returning the previous value.
    ///
    /// A new key is appended to the end of the enumeration order. An
    /// existing key keeps its position and takes the new value.
    pub fn insert(&self, key: K, value: V) -> Option<V> {
        let mut order = self.order.write();
        let previous = order.insert(key.clone(), value.clone());
        self.lookup.insert(key, value);
        previous
    }

    /// Store `value` for `key`, returning `true` if the key was new.
    ///
    /// Same placement rules as [`insert`](Self::insert).
    pub fn add(&self, key: K, value: V) -> bool {
        self.insert(key, value).is_none()
    }

    /// Remove `key`, returning `true` if it was present.
    ///
    /// Later entries shift forward; relative order is preserved.
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let mut order = self.order.write();
        if order.shift_remove(key).is_none() {
            return false;
        }
        self.lookup.remove(key);
        true
    }

    /// Stably sort the enumeration order on `selector(key, value)`.
    ///
    /// Entries with equal selected values keep their relative order in
    /// either direction. Lookups are unaffected.
    pub fn reorder_by_key<S, F>(&self, selector: F, direction: ReorderDirection)
    where
        F: Fn(&K, &V) -> S,
        S: Ord,
    {
        self.reorder_by(selector, S::cmp, direction);
    }

    /// Stably sort the enumeration order on `selector(key, value)` using
    /// `comparer` to order the selected values.
    pub fn reorder_by<S, F, C>(&self, selector: F, comparer: C, direction: ReorderDirection)
    where
        F: Fn(&K, &V) -> S,
        C: Fn(&S, &S) -> Ordering,
    {
        let mut order = self.order.write();
        order.sort_by(|k1, v1, k2, v2| {
            direction.apply(comparer(&selector(k1, v1), &selector(k2, v2)))
        });
        log::debug!("reordered {} entries {direction:?}", order.len());
    }

    /// Snapshot of the entries in enumeration order.
    pub fn entries(&self) -> Vec<(K, V)> {
        self.order
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Iterator over a snapshot of the entries in enumeration order.
    ///
    /// Later mutations are not reflected.
    pub fn iter(&self) -> std::vec::IntoIter<(K, V)> {
        self.entries().into_iter()
    }

    /// Snapshot of the keys in enumeration order.
    pub fn keys(&self) -> Vec<K> {
        self.order.read().keys().cloned().collect()
    }

    /// Snapshot of the values in enumeration order.
    pub fn values(&self) -> Vec<V> {
        self.order.read().values().cloned().collect()
    }

    /// Remove every entry.
    pub fn clear(&self) {
        let mut order = self.order.write();
        log::debug!("clearing map of {} entries", order.len());
        *order = IndexMap::new();
        self.lookup.clear();
    }
}

impl<K, V> Default for OrderedConcurrentMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for OrderedConcurrentMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.order.read().iter()).finish()
    }
}

impl<K, V> FromIterator<(K, V)> for OrderedConcurrentMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl<K, V> Extend<(K, V)> for OrderedConcurrentMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
