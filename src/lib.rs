//! u64-hashmap: a single-threaded, open-addressing hash map and set
//! specialized for unboxed u64 keys.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep per-entry overhead at a tag byte plus key and value, and
//!   make every operation a bounded walk over one flat array, so each
//!   layer can be reasoned about independently.
//! - Layers:
//!   - probe: maps a hash to a starting slot and defines the candidate
//!     sequence on collision (linear, mask-based, bounded by capacity).
//!   - BucketArray<V>: flat parallel arrays of slot tags, keys and
//!     values; stores and reports, never interprets.
//!   - U64HashMap<V, S>: the table engine. Owns the bucket array and the
//!     live/tombstone counts, drives probing for lookup, insertion,
//!     removal, growth and iteration.
//!   - U64HashSet<S>: public set variant over U64HashMap<(), S>.
//!
//! Constraints
//! - Single-threaded: a table is exclusively owned; `&`/`&mut` encode the
//!   single-writer discipline.
//! - Capacity is always a power of two (minimum 4), so indexing is a
//!   bitmask and the probe sequence visits every slot at most once.
//! - Load factor: `live + tombstones` never exceeds 3/4 of capacity after
//!   any mutating operation. Counting tombstones keeps probe chains from
//!   degrading toward full-table scans.
//! - Removal tombstones a slot (`Removed`) rather than emptying it, so
//!   probe chains for other keys that hashed through it stay intact.
//!   Insertion reclaims the first tombstone seen on its probe path.
//!
//! Why this split?
//! - Localize invariants: the bucket array has none beyond "stores what
//!   it was given"; all counting and threshold policy lives in the map.
//! - No hidden costs: growth happens inside the `insert` that tripped the
//!   threshold, never deferred, so benchmark attribution is exact.
//! - The set stays a thin wrapper; every structural behavior is tested
//!   once, on the map.
//!
//! Iterator validity
//! - Iterators borrow the table. A structural mutation (insert, remove,
//!   growth) requires `&mut`, so continued use of a stale iterator is a
//!   compile error rather than a runtime surprise. Removal during a scan
//!   is provided by `retain`, which tombstones in place without
//!   disturbing the forward cursor.
//!
//! Notes and non-goals
//! - Keys are `u64` only. There is no sentinel "empty" key; slot tags
//!   carry occupancy, so every u64 value is insertable.
//! - Absent keys are `None`, never a reserved value.
//! - No attempt to mirror the full `std::collections` interface; the
//!   specialized surface is the point.
//! - Thread-safety is left to an external wrapper.

mod bucket;
mod map;
mod map_proptest;
mod probe;
mod set;

// Public surface
pub use map::{Iter, IterMut, U64HashMap};
pub use set::{SetIter, U64HashSet};
