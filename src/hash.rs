use fnv::FnvHasher;
use murmur3::murmur3_x64_128;
use serde::{Deserialize, Serialize};
use std::hash::Hasher;
use std::io::Cursor;

const FNV_OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;

/// Seeds for the two base hash functions.
///
/// Filters can only be merged when they were built with the same seeds,
/// otherwise the same item lands on different bits in each of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HashSeeds {
    /// Seed of the Murmur3 (x64, 128 bit) primary hash
    pub murmur: u32,
    /// Seed mixed into the FNV-1a offset basis of the secondary hash
    pub fnv: u64,
}

impl Default for HashSeeds {
    fn default() -> Self {
        Self {
            murmur: 0,
            fnv: 0x1234_5678_90ab_cdef,
        }
    }
}

/// Murmur3 x64 128 bit, truncated to the low 64 bits.
pub fn hash_murmur64(key: &[u8], seed: u32) -> u64 {
    let mut cursor = Cursor::new(key);
    // Reading from an in-memory slice cannot fail.
    murmur3_x64_128(&mut cursor, seed).expect("Failed to compute Murmur3 hash")
        as u64
}

/// FNV-1a 64 bit with the seed folded into the offset basis.
pub fn hash_fnv64(key: &[u8], seed: u64) -> u64 {
    let mut hasher = FnvHasher::with_key(FNV_OFFSET_BASIS ^ seed);
    hasher.write(key);
    hasher.finish()
}

/// Expands two base hashes into `k` probe positions over `[0, m)` using
/// double hashing: `h_i(x) = (h1(x) + i * h2(x)) mod m`.
///
/// `h2` is forced odd so the probe sequence does not collapse onto a short
/// cycle when `m` is a power of two. Positions may repeat; callers treat a
/// repeated position as redundant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HashEngine {
    modulus: u64,
    seeds: HashSeeds,
}

impl HashEngine {
    pub fn new(modulus: usize, seeds: HashSeeds) -> Self {
        Self {
            modulus: modulus as u64,
            seeds,
        }
    }

    pub fn seeds(&self) -> HashSeeds {
        self.seeds
    }

    pub fn modulus(&self) -> usize {
        self.modulus as usize
    }

    fn base_hashes(&self, item: &[u8]) -> (u64, u64) {
        let h1 = hash_murmur64(item, self.seeds.murmur);
        let h2 = hash_fnv64(item, self.seeds.fnv) | 1;
        (h1, h2)
    }

    /// Returns an iterator over the `num_hashes` probe positions of `item`.
    pub fn indices(&self, item: &[u8], num_hashes: usize) -> ProbeIter {
        let (h1, h2) = self.base_hashes(item);
        ProbeIter {
            h1,
            h2,
            modulus: self.modulus,
            next: 0,
            end: num_hashes as u64,
        }
    }

    /// The `i`-th probe position of `item`.
    pub fn nth_index(&self, item: &[u8], i: usize) -> usize {
        let (h1, h2) = self.base_hashes(item);
        probe(h1, h2, i as u64, self.modulus)
    }
}

#[inline]
fn probe(h1: u64, h2: u64, i: u64, modulus: u64) -> usize {
    if modulus == 0 {
        return 0;
    }
    (h1.wrapping_add(i.wrapping_mul(h2)) % modulus) as usize
}

/// Lazily computed probe positions; lets `contains` stop at the first
/// unset bit without hashing twice.
#[derive(Clone, Debug)]
pub struct ProbeIter {
    h1: u64,
    h2: u64,
    modulus: u64,
    next: u64,
    end: u64,
}

impl Iterator for ProbeIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.next >= self.end {
            return None;
        }
        let index = probe(self.h1, self.h2, self.next, self.modulus);
        self.next += 1;
        Some(index)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = (self.end - self.next) as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProbeIter {}
