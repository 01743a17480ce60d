//! Fixed-capacity Bloom filter.
//!
//! A Bloom filter answers set-membership queries with one-sided error:
//! "definitely not present" or "might be present". It never reports an
//! inserted item as absent, and it trades a tunable false positive rate for
//! memory that is a small, fixed number of bits per expected item.
//!
//! HowTo:
//!    * Sizing: from the expected number of items `n` and target rate `p` the
//!      filter derives a bit array of `m` bits and `k` hash probes
//!      (see [`optimal_bit_array_size`] and [`optimal_hash_count`]).
//!    * Hashing: every item is hashed once with Murmur3 and once with FNV-1a;
//!      the `k` probe positions are `h1 + i * h2 mod m` (double hashing).
//!
//! Insertion:
//!     * Set the bits at all `k` probe positions.
//! Query:
//!     * The item might be present only if all `k` bits are set.
//!
//! Limitations:
//!     * Capacity and sizing are fixed at construction; inserting past
//!       capacity keeps working but the false positive rate grows.
//!     * Items cannot be removed, only the whole filter can be cleared.
//!     * No internal synchronization. Per-thread filters with identical
//!       parameters can be merged with [`BloomFilter::union`].
//!
//! ```
//! use fixed_bloom_rs::BloomFilter;
//!
//! let mut filter = BloomFilter::new(1_000, 0.01)?;
//! filter.insert("apple");
//! assert!(filter.contains("apple"));
//! assert!(!filter.contains(""));
//! # Ok::<(), fixed_bloom_rs::BloomError>(())
//! ```

pub mod common;
mod config;
mod error;
mod filter;
mod hash;
mod params;
mod storage;
mod traits;

pub use config::{
    FilterConfig, FilterConfigBuilder, FilterConfigBuilderError, FilterParams,
};
pub use error::{BloomError, BloomResult};
pub use filter::{BloomFilter, FilterStats};
pub use hash::{HashEngine, HashSeeds, ProbeIter, hash_fnv64, hash_murmur64};
pub use params::{
    DEFAULT_FALSE_POSITIVE_RATE, MAX_BIT_ARRAY_SIZE, MAX_HASH_FUNCTIONS,
    MIN_BIT_ARRAY_SIZE, MIN_HASH_FUNCTIONS, bits_per_element,
    estimate_false_positive_rate, optimal_bit_array_size, optimal_hash_count,
};
pub use storage::BitArray;
pub use traits::{BloomFilterOps, BloomFilterStats, BulkBloomFilterOps};
