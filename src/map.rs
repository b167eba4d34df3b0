//! U64HashMap: the open-addressing table engine.

use crate::bucket::{BucketArray, SlotState};
use crate::probe::{capacity_for, ProbeSeq, DEFAULT_CAPACITY};
use core::hash::BuildHasher;
use std::collections::hash_map::RandomState;

/// Hash map from `u64` keys to `V`, using open addressing with linear
/// probing and tombstone-based removal.
///
/// Lookup misses stop at the first `Empty` slot; tombstones are probed
/// past and never match. Insertion reclaims the first tombstone on its
/// probe path and grows the table inside the call that pushes
/// `live + tombstones` over 3/4 of capacity. Growth rehashes every live
/// entry into a fresh array and drops all tombstones.
pub struct U64HashMap<V, S = RandomState> {
    hasher: S,
    buckets: BucketArray<V>,
    live: usize,
    tombstones: usize,
}

impl<V> U64HashMap<V> {
    pub fn new() -> Self {
        Self::with_hasher(Default::default())
    }

    /// A map that holds at least `entries` entries without growing.
    pub fn with_capacity(entries: usize) -> Self {
        Self::with_capacity_and_hasher(entries, Default::default())
    }
}

impl<V> Default for U64HashMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V, S> U64HashMap<V, S>
where
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            hasher,
            buckets: BucketArray::new(DEFAULT_CAPACITY),
            live: 0,
            tombstones: 0,
        }
    }

    pub fn with_capacity_and_hasher(entries: usize, hasher: S) -> Self {
        Self {
            hasher,
            buckets: BucketArray::new(capacity_for(entries)),
            live: 0,
            tombstones: 0,
        }
    }

    fn make_hash(&self, key: u64) -> u64 {
        self.hasher.hash_one(key)
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Current slot count. Always a power of two; grows, never shrinks.
    pub fn capacity(&self) -> usize {
        self.buckets.capacity()
    }

    /// Probe for `key`, returning its slot index if present.
    ///
    /// `Empty` ends the probe as a miss; `Removed` and non-matching
    /// `Occupied` slots are stepped over.
    fn find_index(&self, key: u64) -> Option<usize> {
        for i in ProbeSeq::new(self.make_hash(key), self.buckets.capacity()) {
            match self.buckets.state(i) {
                SlotState::Empty => return None,
                SlotState::Occupied if self.buckets.key(i) == key => return Some(i),
                SlotState::Occupied | SlotState::Removed => {}
            }
        }
        None
    }

    pub fn get(&self, key: u64) -> Option<&V> {
        let i = self.find_index(key)?;
        Some(self.buckets.value(i))
    }

    pub fn get_mut(&mut self, key: u64) -> Option<&mut V> {
        let i = self.find_index(key)?;
        Some(self.buckets.value_mut(i))
    }

    pub fn contains_key(&self, key: u64) -> bool {
        self.find_index(key).is_some()
    }

    /// Insert `key -> value`, returning the previous value if the key was
    /// already present.
    ///
    /// A new entry lands in the first tombstone seen on the probe path if
    /// there was one, shortening future probes; otherwise in the `Empty`
    /// slot that ended the probe. The growth check runs after the entry
    /// is in place, so the resize cost lands on this call.
    pub fn insert(&mut self, key: u64, value: V) -> Option<V> {
        let mut first_tombstone = None;
        let mut empty = None;
        for i in ProbeSeq::new(self.make_hash(key), self.buckets.capacity()) {
            match self.buckets.state(i) {
                SlotState::Occupied if self.buckets.key(i) == key => {
                    return Some(self.buckets.replace_value(i, value));
                }
                SlotState::Occupied => {}
                SlotState::Removed => {
                    if first_tombstone.is_none() {
                        first_tombstone = Some(i);
                    }
                }
                SlotState::Empty => {
                    empty = Some(i);
                    break;
                }
            }
        }

        let slot = match first_tombstone {
            Some(i) => {
                self.tombstones -= 1;
                i
            }
            None => empty.expect("load factor below 3/4 leaves an empty slot on every probe path"),
        };
        self.buckets.occupy(slot, key, value);
        self.live += 1;

        if (self.live + self.tombstones) * 4 > self.buckets.capacity() * 3 {
            self.grow();
        }
        self.check_invariants();
        None
    }

    /// Remove `key`, returning its value if it was present.
    ///
    /// The slot is tombstoned, not emptied; a repeated remove is a miss
    /// and mutates nothing.
    pub fn remove(&mut self, key: u64) -> Option<V> {
        let i = self.find_index(key)?;
        let value = self.buckets.mark_removed(i);
        self.live -= 1;
        self.tombstones += 1;
        self.check_invariants();
        Some(value)
    }

    /// Drop every entry. Slots are reset to `Empty`, counts to zero;
    /// capacity is kept.
    pub fn clear(&mut self) {
        self.buckets.clear();
        self.live = 0;
        self.tombstones = 0;
    }

    /// Keep only the entries for which `f` returns true.
    ///
    /// Non-retained slots are tombstoned in place, so the scan cursor is
    /// never disturbed. This is the supported way to remove during
    /// iteration; `iter` itself only borrows.
    pub fn retain<F>(&mut self, mut f: F)
    where
        F: FnMut(u64, &mut V) -> bool,
    {
        for i in 0..self.buckets.capacity() {
            if self.buckets.state(i) == SlotState::Occupied {
                let key = self.buckets.key(i);
                if !f(key, self.buckets.value_mut(i)) {
                    let _ = self.buckets.mark_removed(i);
                    self.live -= 1;
                    self.tombstones += 1;
                }
            }
        }
        self.check_invariants();
    }

    /// Replace the bucket array with a fresh one and re-probe every live
    /// entry into it. Tombstones are not carried over.
    ///
    /// Live entries alone tripping the threshold double the capacity;
    /// tombstone pollution alone rehashes at the same capacity, which
    /// purges the tombstones without shrinking.
    fn grow(&mut self) {
        let capacity = self.buckets.capacity();
        let new_capacity = if self.live * 4 > capacity * 3 {
            capacity * 2
        } else {
            capacity
        };
        debug_assert!(self.live * 4 <= new_capacity * 3);

        let old = std::mem::replace(&mut self.buckets, BucketArray::new(new_capacity));
        self.tombstones = 0;
        for (key, value) in old.into_entries() {
            // Keys are already distinct; only an empty slot can end the probe.
            let slot = ProbeSeq::new(self.make_hash(key), new_capacity)
                .find(|&i| self.buckets.state(i) == SlotState::Empty)
                .expect("rehash probe finds an empty slot");
            self.buckets.occupy(slot, key, value);
        }
    }

    #[inline]
    fn check_invariants(&self) {
        debug_assert!(self.live + self.tombstones <= self.buckets.capacity());
        debug_assert!((self.live + self.tombstones) * 4 <= self.buckets.capacity() * 3);
    }

    /// Iterate over `(key, &value)` for every live entry, in slot order.
    pub fn iter(&self) -> Iter<'_, V> {
        let (states, keys, values) = self.buckets.parts();
        Iter {
            states: states.iter(),
            keys: keys.iter(),
            values: values.iter(),
            remaining: self.live,
        }
    }

    /// Iterate over `(key, &mut value)` for every live entry.
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        let remaining = self.live;
        let (states, keys, values) = self.buckets.parts_mut();
        IterMut {
            states: states.iter(),
            keys: keys.iter(),
            values: values.iter_mut(),
            remaining,
        }
    }
}

impl<V, S> Extend<(u64, V)> for U64HashMap<V, S>
where
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (u64, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl<V, S> FromIterator<(u64, V)> for U64HashMap<V, S>
where
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (u64, V)>>(iter: I) -> Self {
        let mut map = Self::with_capacity_and_hasher(0, Default::default());
        map.extend(iter);
        map
    }
}

/// Lazy scan over live slots in index order; skips `Empty` and `Removed`.
pub struct Iter<'a, V> {
    states: std::slice::Iter<'a, SlotState>,
    keys: std::slice::Iter<'a, u64>,
    values: std::slice::Iter<'a, Option<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (u64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let state = self.states.next()?;
            let key = self.keys.next()?;
            let value = self.values.next()?;
            if *state == SlotState::Occupied {
                self.remaining -= 1;
                return Some((*key, value.as_ref().expect("occupied slot holds a value")));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// Like [`Iter`], with mutable access to values.
pub struct IterMut<'a, V> {
    states: std::slice::Iter<'a, SlotState>,
    keys: std::slice::Iter<'a, u64>,
    values: std::slice::IterMut<'a, Option<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (u64, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let state = self.states.next()?;
            let key = self.keys.next()?;
            let value = self.values.next()?;
            if *state == SlotState::Occupied {
                self.remaining -= 1;
                return Some((*key, value.as_mut().expect("occupied slot holds a value")));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}

impl<'a, V, S> IntoIterator for &'a U64HashMap<V, S>
where
    S: BuildHasher,
{
    type Item = (u64, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V, S> IntoIterator for &'a mut U64HashMap<V, S>
where
    S: BuildHasher,
{
    type Item = (u64, &'a mut V);
    type IntoIter = IterMut<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}
