/// Membership operations shared by filter implementations.
pub trait BloomFilterOps {
    fn insert(&mut self, item: &[u8]);
    fn contains(&self, item: &[u8]) -> bool;
    fn clear(&mut self);
}

pub trait BloomFilterStats {
    fn capacity(&self) -> usize;
    fn false_positive_rate(&self) -> f64;
    fn insert_count(&self) -> usize;
    fn estimated_false_positive_rate(&self) -> f64;
}

pub trait BulkBloomFilterOps {
    fn insert_bulk(&mut self, items: &[&[u8]]);
    fn contains_bulk(&self, items: &[&[u8]]) -> Vec<bool>;
}
