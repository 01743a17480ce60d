use bitvec::{bitvec, order::Lsb0, vec::BitVec};

/// Packed bit array of fixed length `m`, stored in `ceil(m / 8)` bytes.
///
/// Out-of-range positions never panic: `set_bit` skips them and `get_bit`
/// reports them unset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BitArray {
    bits: BitVec<u8, Lsb0>,
}

impl BitArray {
    pub fn new(size: usize) -> Self {
        Self {
            bits: bitvec![u8, Lsb0; 0; size],
        }
    }

    pub fn set_bit(&mut self, index: usize) {
        if index < self.bits.len() {
            self.bits.set(index, true);
        }
    }

    pub fn get_bit(&self, index: usize) -> bool {
        self.bits.get(index).is_some_and(|bit| *bit)
    }

    /// Number of set bits among the first `len()` bits. Padding in the
    /// last byte is not part of the slice and is never counted.
    pub fn count_set_bits(&self) -> usize {
        self.bits.count_ones()
    }

    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn byte_len(&self) -> usize {
        self.bits.as_raw_slice().len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    /// Bitwise OR of `other` into `self`. Both arrays must have the same
    /// length; the caller checks this.
    pub(crate) fn union_with(&mut self, other: &BitArray) {
        debug_assert_eq!(self.len(), other.len());
        for (dst, src) in self
            .bits
            .as_raw_mut_slice()
            .iter_mut()
            .zip(other.bits.as_raw_slice())
        {
            *dst |= *src;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_zeroed() {
        let bits = BitArray::new(100);
        assert_eq!(bits.len(), 100);
        assert_eq!(bits.byte_len(), 13);
        assert_eq!(bits.count_set_bits(), 0);
        assert!(bits.as_bytes().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_set_and_get() {
        let mut bits = BitArray::new(64);
        bits.set_bit(0);
        bits.set_bit(9);
        bits.set_bit(63);
        assert!(bits.get_bit(0));
        assert!(bits.get_bit(9));
        assert!(bits.get_bit(63));
        assert!(!bits.get_bit(1));
        assert_eq!(bits.count_set_bits(), 3);
    }

    #[test]
    fn test_lsb_first_layout() {
        let mut bits = BitArray::new(16);
        bits.set_bit(0);
        bits.set_bit(9);
        assert_eq!(bits.as_bytes(), &[0b0000_0001, 0b0000_0010]);
    }

    #[test]
    fn test_set_bit_idempotent() {
        let mut bits = BitArray::new(64);
        bits.set_bit(5);
        bits.set_bit(5);
        assert_eq!(bits.count_set_bits(), 1);
    }

    #[test]
    fn test_out_of_range_is_noop() {
        let mut bits = BitArray::new(10);
        bits.set_bit(10);
        bits.set_bit(usize::MAX);
        assert_eq!(bits.count_set_bits(), 0);
        assert!(!bits.get_bit(10));
        assert!(!bits.get_bit(usize::MAX));
    }

    #[test]
    fn test_count_ignores_tail_padding() {
        let mut bits = BitArray::new(10);
        for i in 0..16 {
            bits.set_bit(i);
        }
        assert_eq!(bits.count_set_bits(), 10);
        assert_eq!(bits.as_bytes()[1] & 0b1111_1100, 0);
    }

    #[test]
    fn test_clear() {
        let mut bits = BitArray::new(77);
        for i in (0..77).step_by(3) {
            bits.set_bit(i);
        }
        assert!(bits.count_set_bits() > 0);
        bits.clear();
        assert_eq!(bits.count_set_bits(), 0);
        assert_eq!(bits.len(), 77);
    }

    #[test]
    fn test_union_with() {
        let mut left = BitArray::new(20);
        let mut right = BitArray::new(20);
        left.set_bit(1);
        left.set_bit(19);
        right.set_bit(1);
        right.set_bit(7);
        left.union_with(&right);
        assert_eq!(left.count_set_bits(), 3);
        assert!(left.get_bit(7));
        assert!(!right.get_bit(19));
    }
}
