//! Standalone stress entry point: fill a set from a seeded generator,
//! then repeatedly sweep iterators and fold the members into a checksum.
//! Deterministic, so two builds can be compared by their printed value.

use u64_hashmap::U64HashSet;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn build_set() -> U64HashSet {
    let mut set = U64HashSet::new();
    for x in lcg(196188877885538304).take(1 << 20) {
        set.insert(x & 0x7FFF_FFFF);
    }
    set
}

fn spin(set: &U64HashSet) -> u64 {
    let mut product = 1u64;
    for x in set.iter() {
        product = product.wrapping_mul(x);
    }
    product
}

fn main() {
    let set = build_set();
    let mut checksum = 0u64;
    for _ in 0..255 {
        checksum = checksum.wrapping_add(spin(&set));
    }
    println!("{} members, checksum {}", set.len(), checksum);
}
