use crate::error::{BloomError, BloomResult};
use crate::hash::HashSeeds;
use crate::params::{optimal_bit_array_size, optimal_hash_count};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Configuration for a filter sized from capacity and target error rate.
#[derive(Clone, Debug, PartialEq, Builder, Serialize, Deserialize)]
#[builder(pattern = "owned")]
pub struct FilterConfig {
    /// Expected number of elements
    #[builder(default = "1_000_000")]
    pub capacity: usize,

    /// Target false positive rate, strictly between 0 and 1
    #[builder(default = "0.01")]
    pub false_positive_rate: f64,

    /// Seeds of the two base hash functions
    #[builder(default)]
    #[serde(default)]
    pub seeds: HashSeeds,
}

impl FilterConfig {
    pub fn validate(&self) -> BloomResult<()> {
        if self.capacity == 0 {
            return Err(BloomError::InvalidParameter(
                "Capacity must be > 0".into(),
            ));
        }
        // Written so that NaN is rejected as well
        if !(self.false_positive_rate > 0.0 && self.false_positive_rate < 1.0) {
            return Err(BloomError::InvalidParameter(format!(
                "False positive rate must be between 0 and 1, got {}",
                self.false_positive_rate
            )));
        }
        Ok(())
    }
}

/// Derived parameters calculated from FilterConfig
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterParams {
    pub bit_array_size: usize,
    pub hash_count: usize,
}

impl From<&FilterConfig> for FilterParams {
    fn from(config: &FilterConfig) -> Self {
        let bit_array_size =
            optimal_bit_array_size(config.capacity, config.false_positive_rate);
        let hash_count = optimal_hash_count(bit_array_size, config.capacity);

        Self {
            bit_array_size,
            hash_count,
        }
    }
}
