use crate::common::bytes2hr;
use crate::config::{FilterConfig, FilterConfigBuilder, FilterParams};
use crate::error::{BloomError, BloomResult};
use crate::hash::{HashEngine, HashSeeds};
use crate::params::{
    MAX_HASH_FUNCTIONS, MIN_HASH_FUNCTIONS, bits_per_element,
    estimate_false_positive_rate,
};
use crate::storage::BitArray;
use crate::traits::{BloomFilterOps, BloomFilterStats, BulkBloomFilterOps};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, warn};

/// Fixed-capacity Bloom filter over byte sequences.
///
/// Answers "definitely not present" or "might be present". An item that was
/// inserted is always reported present until [`BloomFilter::clear`].
///
/// The filter is not synchronized. Share it behind a lock, or build one
/// filter per thread with the same parameters and combine them with
/// [`BloomFilter::union`].
#[derive(Clone)]
pub struct BloomFilter {
    capacity: usize,
    false_positive_rate: f64,
    params: FilterParams,
    bits: BitArray,
    hasher: HashEngine,
    inserted_count: usize,
}

impl BloomFilter {
    /// Creates a filter sized for `capacity` items at `false_positive_rate`.
    pub fn new(capacity: usize, false_positive_rate: f64) -> BloomResult<Self> {
        let config = FilterConfigBuilder::default()
            .capacity(capacity)
            .false_positive_rate(false_positive_rate)
            .build()?;
        Self::from_config(config)
    }

    pub fn from_config(config: FilterConfig) -> BloomResult<Self> {
        config.validate()?;

        let params = FilterParams::from(&config);
        debug!(
            capacity = config.capacity,
            false_positive_rate = config.false_positive_rate,
            bit_array_size = params.bit_array_size,
            hash_count = params.hash_count,
            "Creating bloom filter"
        );

        Ok(Self {
            capacity: config.capacity,
            false_positive_rate: config.false_positive_rate,
            params,
            bits: BitArray::new(params.bit_array_size),
            hasher: HashEngine::new(params.bit_array_size, config.seeds),
            inserted_count: 0,
        })
    }

    /// Creates a filter with an explicit bit array size and hash count.
    ///
    /// The reported false positive rate is the estimate for `capacity`
    /// insertions with these parameters.
    pub fn with_params(
        bit_array_size: usize,
        hash_count: usize,
        capacity: usize,
    ) -> BloomResult<Self> {
        Self::with_params_and_seeds(
            bit_array_size,
            hash_count,
            capacity,
            HashSeeds::default(),
        )
    }

    pub fn with_params_and_seeds(
        bit_array_size: usize,
        hash_count: usize,
        capacity: usize,
        seeds: HashSeeds,
    ) -> BloomResult<Self> {
        if bit_array_size == 0 {
            return Err(BloomError::InvalidParameter(
                "Bit array size must be > 0".into(),
            ));
        }
        if !(MIN_HASH_FUNCTIONS..=MAX_HASH_FUNCTIONS).contains(&hash_count) {
            return Err(BloomError::InvalidParameter(format!(
                "Hash count must be between {MIN_HASH_FUNCTIONS} and {MAX_HASH_FUNCTIONS}, got {hash_count}"
            )));
        }

        let false_positive_rate =
            estimate_false_positive_rate(bit_array_size, hash_count, capacity);
        debug!(
            bit_array_size,
            hash_count,
            capacity,
            false_positive_rate,
            "Creating bloom filter with explicit parameters"
        );

        Ok(Self {
            capacity,
            false_positive_rate,
            params: FilterParams {
                bit_array_size,
                hash_count,
            },
            bits: BitArray::new(bit_array_size),
            hasher: HashEngine::new(bit_array_size, seeds),
            inserted_count: 0,
        })
    }

    /// Adds `item` to the filter. Empty input is ignored.
    ///
    /// Every call with non-empty input counts towards [`size`](Self::size),
    /// including repeated insertion of the same item.
    pub fn insert(&mut self, item: impl AsRef<[u8]>) {
        let item = item.as_ref();
        if item.is_empty() {
            return;
        }

        let indices = self.hasher.indices(item, self.params.hash_count);
        self.set_all(indices);
        self.record_inserts(1);
    }

    /// Returns `false` if `item` was definitely never inserted, `true` if it
    /// might have been. Empty input is never present.
    pub fn contains(&self, item: impl AsRef<[u8]>) -> bool {
        let item = item.as_ref();
        if item.is_empty() {
            return false;
        }

        self.all_set(self.hasher.indices(item, self.params.hash_count))
    }

    fn set_all(&mut self, indices: impl IntoIterator<Item = usize>) {
        for idx in indices {
            self.bits.set_bit(idx);
        }
    }

    fn all_set(&self, mut indices: impl Iterator<Item = usize>) -> bool {
        indices.all(|idx| self.bits.get_bit(idx))
    }

    fn record_inserts(&mut self, count: usize) {
        let before = self.inserted_count;
        self.inserted_count = self.inserted_count.saturating_add(count);
        if before <= self.capacity && self.inserted_count > self.capacity {
            warn!(
                capacity = self.capacity,
                inserted = self.inserted_count,
                "Bloom filter is over capacity, false positive rate will exceed target"
            );
        }
    }

    /// Resets all bits and the insert counter. Sizing is kept.
    pub fn clear(&mut self) {
        self.bits.clear();
        self.inserted_count = 0;
        debug!(
            bit_array_size = self.params.bit_array_size,
            "Cleared bloom filter"
        );
    }

    /// Number of insert calls since construction or the last clear.
    pub fn size(&self) -> usize {
        self.inserted_count
    }

    pub fn is_empty(&self) -> bool {
        self.inserted_count == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Target rate for derived filters, computed rate for explicit ones.
    pub fn false_positive_rate(&self) -> f64 {
        self.false_positive_rate
    }

    /// Estimated false positive rate given the current insert count.
    pub fn estimated_false_positive_rate(&self) -> f64 {
        estimate_false_positive_rate(
            self.params.bit_array_size,
            self.params.hash_count,
            self.inserted_count,
        )
    }

    pub fn bit_array_size(&self) -> usize {
        self.params.bit_array_size
    }

    pub fn hash_count(&self) -> usize {
        self.params.hash_count
    }

    pub fn seeds(&self) -> HashSeeds {
        self.hasher.seeds()
    }

    /// Bytes used by the bit array plus the filter struct itself.
    pub fn memory_usage(&self) -> usize {
        self.bits.byte_len() + std::mem::size_of::<Self>()
    }

    pub fn count_set_bits(&self) -> usize {
        self.bits.count_set_bits()
    }

    /// Insert count relative to the configured capacity.
    pub fn load_factor(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        self.inserted_count as f64 / self.capacity as f64
    }

    /// Share of bits currently set.
    pub fn fill_ratio(&self) -> f64 {
        self.count_set_bits() as f64 / self.params.bit_array_size as f64
    }

    pub fn bits_per_item(&self) -> f64 {
        bits_per_element(self.params.bit_array_size, self.capacity)
    }

    /// Raw bit array contents, least significant bit first.
    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_bytes()
    }

    /// Two filters are compatible when an item maps to the same bits in both.
    pub fn is_compatible(&self, other: &BloomFilter) -> bool {
        self.params == other.params && self.seeds() == other.seeds()
    }

    /// Merges `other` into `self` with a bitwise OR.
    ///
    /// Afterwards `self` reports every item inserted into either filter. The
    /// insert count becomes the sum of both counts.
    pub fn union(&mut self, other: &BloomFilter) -> BloomResult<()> {
        if !self.is_compatible(other) {
            return Err(BloomError::IncompatibleFilters {
                left_bits: self.params.bit_array_size,
                right_bits: other.params.bit_array_size,
                left_hashes: self.params.hash_count,
                right_hashes: other.params.hash_count,
                seeds_match: self.seeds() == other.seeds(),
            });
        }

        self.bits.union_with(&other.bits);
        self.record_inserts(other.inserted_count);
        debug!(
            inserted = self.inserted_count,
            set_bits = self.count_set_bits(),
            "Merged bloom filters"
        );
        Ok(())
    }

    pub fn stats(&self) -> FilterStats {
        FilterStats {
            capacity: self.capacity,
            inserted: self.inserted_count,
            bit_array_size: self.params.bit_array_size,
            hash_count: self.params.hash_count,
            set_bits: self.count_set_bits(),
            target_false_positive_rate: self.false_positive_rate,
            estimated_false_positive_rate: self.estimated_false_positive_rate(),
            memory_usage: self.memory_usage(),
        }
    }
}

impl fmt::Debug for BloomFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "BloomFilter {{ capacity: {}, bit_array_size: {}, hash_count: {}, false_positive_rate: {}, inserted: {} }}",
            self.capacity,
            self.params.bit_array_size,
            self.params.hash_count,
            self.false_positive_rate,
            self.inserted_count
        )
    }
}

impl BloomFilterOps for BloomFilter {
    fn insert(&mut self, item: &[u8]) {
        BloomFilter::insert(self, item)
    }

    fn contains(&self, item: &[u8]) -> bool {
        BloomFilter::contains(self, item)
    }

    fn clear(&mut self) {
        BloomFilter::clear(self)
    }
}

impl BloomFilterStats for BloomFilter {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn false_positive_rate(&self) -> f64 {
        self.false_positive_rate
    }

    fn insert_count(&self) -> usize {
        self.inserted_count
    }

    fn estimated_false_positive_rate(&self) -> f64 {
        BloomFilter::estimated_false_positive_rate(self)
    }
}

impl BulkBloomFilterOps for BloomFilter {
    fn insert_bulk(&mut self, items: &[&[u8]]) {
        for item in items {
            BloomFilter::insert(self, item);
        }
    }

    fn contains_bulk(&self, items: &[&[u8]]) -> Vec<bool> {
        items
            .iter()
            .map(|item| BloomFilter::contains(self, item))
            .collect()
    }
}

/// Point-in-time snapshot of filter statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterStats {
    pub capacity: usize,
    pub inserted: usize,
    pub bit_array_size: usize,
    pub hash_count: usize,
    pub set_bits: usize,
    pub target_false_positive_rate: f64,
    pub estimated_false_positive_rate: f64,
    pub memory_usage: usize,
}

impl fmt::Display for FilterStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Capacity: {}", self.capacity)?;
        writeln!(f, "Inserted: {}", self.inserted)?;
        writeln!(f, "Bit array size: {} bits", self.bit_array_size)?;
        writeln!(f, "Hash functions: {}", self.hash_count)?;
        writeln!(f, "Set bits: {}", self.set_bits)?;
        writeln!(
            f,
            "Target FPR: {:.4}%",
            self.target_false_positive_rate * 100.0
        )?;
        writeln!(
            f,
            "Estimated FPR: {:.4}%",
            self.estimated_false_positive_rate * 100.0
        )?;
        write!(f, "Memory usage: {}", bytes2hr(self.memory_usage))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_construction() {
        let filter = BloomFilter::new(1000, 0.01).unwrap();
        assert_eq!(filter.capacity(), 1000);
        assert_eq!(filter.false_positive_rate(), 0.01);
        assert_eq!(filter.size(), 0);
        assert_eq!(filter.bit_array_size(), 9586);
        assert_eq!(filter.hash_count(), 7);
    }

    #[test]
    fn test_invalid_derived_construction() {
        let cases =
            [(0, 0.01), (1000, 0.0), (1000, 1.0), (1000, -0.1), (1000, 1.1)];
        for (capacity, fpr) in cases {
            assert!(matches!(
                BloomFilter::new(capacity, fpr),
                Err(BloomError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_invalid_explicit_construction() {
        assert!(BloomFilter::with_params(0, 3, 10).is_err());
        assert!(BloomFilter::with_params(100, 0, 10).is_err());
        assert!(BloomFilter::with_params(100, 33, 10).is_err());
        assert!(BloomFilter::with_params(100, 32, 10).is_ok());
        assert!(BloomFilter::with_params(1, 1, 0).is_ok());
    }

    #[test]
    fn test_worked_scenario() {
        // m = 10, k = 3; the first key sets {2, 5, 8}
        let mut filter = BloomFilter::with_params(10, 3, 1).unwrap();
        filter.set_all([2, 5, 8]);
        assert_eq!(filter.count_set_bits(), 3);

        // Probe {1, 5, 9}: bit 1 is unset, so definitely absent
        assert!(!filter.all_set([1, 5, 9].into_iter()));
        assert!(filter.all_set([8, 2, 5].into_iter()));
    }

    #[test]
    fn test_all_set_short_circuits() {
        let filter = BloomFilter::with_params(10, 3, 1).unwrap();
        let mut probed = 0;
        let result =
            filter.all_set([1, 2, 3].into_iter().inspect(|_| probed += 1));
        assert!(!result);
        assert_eq!(probed, 1);
    }

    #[test]
    fn test_repeated_probe_positions_are_harmless() {
        // A tiny array forces many repeated positions
        let mut filter = BloomFilter::with_params(1, 32, 1).unwrap();
        filter.insert(b"x");
        assert_eq!(filter.count_set_bits(), 1);
        assert!(filter.contains(b"x"));
        assert!(filter.contains(b"anything else"));
    }

    #[test]
    fn test_duplicates_count_every_call() {
        let mut filter = BloomFilter::new(100, 0.01).unwrap();
        filter.insert("dup");
        let bits = filter.count_set_bits();
        filter.insert("dup");
        filter.insert(b"dup".to_vec());
        assert_eq!(filter.size(), 3);
        assert_eq!(filter.count_set_bits(), bits);
    }

    #[test]
    fn test_explicit_mode_rate_is_computed() {
        let filter = BloomFilter::with_params(10_000, 5, 1_000).unwrap();
        let expected = estimate_false_positive_rate(10_000, 5, 1_000);
        assert_eq!(filter.false_positive_rate(), expected);
        assert_eq!(filter.capacity(), 1_000);
    }

    #[test]
    fn test_load_factor_and_fill_ratio() {
        let mut filter = BloomFilter::new(10, 0.01).unwrap();
        assert_eq!(filter.load_factor(), 0.0);
        assert_eq!(filter.fill_ratio(), 0.0);
        for i in 0..5 {
            filter.insert(format!("item_{i}"));
        }
        assert_eq!(filter.load_factor(), 0.5);
        assert!(filter.fill_ratio() > 0.0 && filter.fill_ratio() <= 1.0);

        let empty_capacity = BloomFilter::with_params(64, 2, 0).unwrap();
        assert_eq!(empty_capacity.load_factor(), 0.0);
    }

    #[test]
    fn test_trait_objects() {
        let mut filter = BloomFilter::new(100, 0.01).unwrap();
        {
            let ops: &mut dyn BloomFilterOps = &mut filter;
            ops.insert(b"alpha");
            assert!(ops.contains(b"alpha"));
        }
        let stats: &dyn BloomFilterStats = &filter;
        assert_eq!(stats.insert_count(), 1);
        assert_eq!(stats.capacity(), 100);

        let beta: &[u8] = b"beta";
        let gamma: &[u8] = b"gamma";
        filter.insert_bulk(&[beta, gamma]);
        assert_eq!(
            filter.contains_bulk(&[b"alpha".as_slice(), beta, gamma]),
            vec![true, true, true]
        );
        assert_eq!(filter.size(), 3);
    }

    #[test]
    fn test_stats_display() {
        let mut filter = BloomFilter::new(1000, 0.01).unwrap();
        filter.insert("a");
        let stats = filter.stats();
        assert_eq!(stats.inserted, 1);
        assert_eq!(stats.memory_usage, filter.memory_usage());
        let rendered = stats.to_string();
        assert!(rendered.contains("Capacity: 1000"));
        assert!(rendered.contains("Hash functions: 7"));
    }

    #[test]
    fn test_debug_omits_bits() {
        let filter = BloomFilter::new(10, 0.1).unwrap();
        let debug = format!("{filter:?}");
        assert!(debug.starts_with("BloomFilter {"));
        assert!(debug.contains("capacity: 10"));
    }
}
