//! Hash table iteration order
//!
//! Pool build order in the reference application comes from iterating a
//! string-keyed hash map, so the bucket layout matters. This reproduces that
//! table: 31-multiplier string hash over UTF-16 code units, high-bit spread,
//! power-of-two buckets with tail insertion, and order-preserving lo/hi
//! splits on resize. Chains long enough to become tree bins keep list
//! order here, which the reference table does not guarantee.

/// Resize once `len > capacity * 3/4`.
const LOAD_FACTOR_NUM: usize = 3;
const LOAD_FACTOR_DEN: usize = 4;
/// Chain length at which the reference table stops using lists.
const TREEIFY_THRESHOLD: usize = 8;
/// Below this capacity a long chain forces a resize instead.
const MIN_TREEIFY_CAPACITY: usize = 64;
const MAX_CAPACITY: usize = 1 << 30;

/// Polynomial string hash, multiplier 31, wrapping 32-bit.
pub fn java_string_hash(s: &str) -> i32 {
    s.encode_utf16()
        .fold(0i32, |h, unit| h.wrapping_mul(31).wrapping_add(unit as i32))
}

/// Mix the high half into the low half: `h ^ (h >>> 16)`.
pub fn spread(h: i32) -> i32 {
    h ^ ((h as u32) >> 16) as i32
}

/// Smallest power of two `>= cap`, at least 1.
pub fn table_size_for(cap: u32) -> usize {
    (cap.max(1) as usize).next_power_of_two().min(MAX_CAPACITY)
}

#[derive(Debug, Clone)]
struct Entry {
    key: String,
    hash: i32,
}

/// Bucket array with insertion-ordered chains.
#[derive(Debug, Clone)]
pub struct HashOrderTable {
    buckets: Vec<Vec<Entry>>,
    len: usize,
    threshold: usize,
}

impl HashOrderTable {
    pub fn new(initial_capacity: u32) -> Self {
        let capacity = table_size_for(initial_capacity);
        Self {
            buckets: vec![Vec::new(); capacity],
            len: 0,
            threshold: capacity * LOAD_FACTOR_NUM / LOAD_FACTOR_DEN,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Bucket a key would land in at the current capacity.
    pub fn bucket_of(&self, key: &str) -> usize {
        Self::index(spread(java_string_hash(key)), self.capacity())
    }

    /// Insert `key`; returns `false` when it was already present, in which
    /// case its position is unchanged.
    pub fn insert(&mut self, key: &str) -> bool {
        let hash = spread(java_string_hash(key));
        let idx = Self::index(hash, self.capacity());
        let chain = &mut self.buckets[idx];
        if chain.iter().any(|e| e.hash == hash && e.key == key) {
            return false;
        }

        let chain_len = chain.len();
        chain.push(Entry {
            key: key.to_string(),
            hash,
        });
        if chain_len >= TREEIFY_THRESHOLD {
            if self.capacity() < MIN_TREEIFY_CAPACITY {
                self.resize();
            } else {
                log::warn!(
                    "bucket {idx} holds {} entries at capacity {}; tree bin ordering is not emulated",
                    chain_len + 1,
                    self.capacity()
                );
            }
        }

        self.len += 1;
        if self.len > self.threshold {
            self.resize();
        }
        true
    }

    /// Keys in iteration order: buckets ascending, each chain head to tail.
    ///
    /// Exact for every bucket that never reached the tree bin threshold.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.buckets
            .iter()
            .flat_map(|chain| chain.iter().map(|e| e.key.as_str()))
    }

    fn resize(&mut self) {
        let old_cap = self.capacity();
        if old_cap >= MAX_CAPACITY {
            self.threshold = usize::MAX;
            return;
        }
        let new_cap = old_cap * 2;
        let mut buckets: Vec<Vec<Entry>> = vec![Vec::new(); new_cap];
        for (idx, chain) in std::mem::take(&mut self.buckets).into_iter().enumerate() {
            for entry in chain {
                let target = if (entry.hash as u32 as usize) & old_cap == 0 {
                    idx
                } else {
                    idx + old_cap
                };
                buckets[target].push(entry);
            }
        }
        self.buckets = buckets;
        self.threshold = new_cap * LOAD_FACTOR_NUM / LOAD_FACTOR_DEN;
    }

    fn index(hash: i32, capacity: usize) -> usize {
        (hash as u32 as usize) & (capacity - 1)
    }
}

impl<S: AsRef<str>> Extend<S> for HashOrderTable {
    fn extend<I: IntoIterator<Item = S>>(&mut self, keys: I) {
        for key in keys {
            self.insert(key.as_ref());
        }
    }
}

/// Iteration order of `keys` inserted in order into a table created with
/// `initial_capacity`.
pub fn iteration_order<S: AsRef<str>>(keys: &[S], initial_capacity: u32) -> Vec<String> {
    let mut table = HashOrderTable::new(initial_capacity);
    table.extend(keys);
    table.iter().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_hash_known_values() {
        assert_eq!(java_string_hash(""), 0);
        assert_eq!(java_string_hash("hello"), 99162322);
        assert_eq!(java_string_hash("Aa"), java_string_hash("BB"));
        assert_eq!(spread(java_string_hash("hello")), 99163451);
    }

    #[test]
    fn test_hash_uses_utf16_units() {
        // One astral character is two code units.
        let expected = 0xD83Di32.wrapping_mul(31).wrapping_add(0xDE00);
        assert_eq!(java_string_hash("\u{1F600}"), expected);
    }

    #[test]
    fn test_table_size_for() {
        assert_eq!(table_size_for(0), 1);
        assert_eq!(table_size_for(1), 1);
        assert_eq!(table_size_for(16), 16);
        assert_eq!(table_size_for(17), 32);
        assert_eq!(table_size_for(600), 1024);
    }

    #[test]
    fn test_small_order() {
        let order = iteration_order(&["banana", "apple", "cherry", "date"], 16);
        assert_eq!(order, vec!["banana", "date", "apple", "cherry"]);
    }

    #[test]
    fn test_collisions_keep_insertion_order() {
        let order = iteration_order(&["BB", "Aa"], 16);
        assert_eq!(order, vec!["BB", "Aa"]);
        let order = iteration_order(&["Aa", "BB"], 16);
        assert_eq!(order, vec!["Aa", "BB"]);
    }

    #[test]
    fn test_duplicate_keeps_first_position() {
        let mut table = HashOrderTable::new(16);
        assert!(table.insert("x"));
        assert!(table.insert("y"));
        assert!(!table.insert("x"));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_resize_at_load_factor() {
        let keys: Vec<String> = (0..13).map(|i| format!("key{i}")).collect();
        let mut table = HashOrderTable::new(16);
        table.extend(&keys[..12]);
        assert_eq!(table.capacity(), 16);
        table.insert(&keys[12]);
        assert_eq!(table.capacity(), 32);
    }

    #[test]
    fn test_long_chain_forces_resize() {
        // Every "Aa"/"BB" string of the same length shares one hash.
        let colliders: Vec<String> = (0..11u32)
            .map(|bits| {
                (0..4)
                    .map(|i| if bits & (1 << i) == 0 { "Aa" } else { "BB" })
                    .collect()
            })
            .collect();
        let hash = java_string_hash(&colliders[0]);
        assert!(colliders.iter().all(|k| java_string_hash(k) == hash));

        let mut table = HashOrderTable::new(16);
        table.extend(&colliders[..8]);
        assert_eq!(table.capacity(), 16);
        table.insert(&colliders[8]);
        assert_eq!(table.capacity(), 32);
        table.insert(&colliders[9]);
        assert_eq!(table.capacity(), 64);
        // Resizes keep the chain in insertion order.
        let order: Vec<&str> = table.iter().collect();
        let expected: Vec<&str> = colliders[..10].iter().map(String::as_str).collect();
        assert_eq!(order, expected);

        // At 64 the chain becomes a tree bin; capacity stays put. Tree bin
        // order is not emulated, so only membership is checked.
        table.insert(&colliders[10]);
        assert_eq!(table.capacity(), 64);
        let mut order: Vec<&str> = table.iter().collect();
        order.sort_unstable();
        let mut expected: Vec<&str> = colliders.iter().map(String::as_str).collect();
        expected.sort_unstable();
        assert_eq!(order, expected);
    }
}
