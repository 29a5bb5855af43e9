//! Precomputation snapshot
//!
//! The lexical analysis done before the oracle is asked, and the request
//! body that carries it over the wire.

use super::distance::{edit_distance, similarity};
use super::normalizer::normalize;
use serde::{Deserialize, Serialize};

/// Normalized forms of both addresses and the distance between them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Precomputation {
    pub normalized_address1: String,
    pub normalized_address2: String,
    pub levenshtein_distance: usize,
}

impl Precomputation {
    /// Normalize both addresses and measure them
    pub fn compute(address1: &str, address2: &str) -> Self {
        let normalized_address1 = normalize(address1);
        let normalized_address2 = normalize(address2);
        let levenshtein_distance = edit_distance(&normalized_address1, &normalized_address2);

        Self {
            normalized_address1,
            normalized_address2,
            levenshtein_distance,
        }
    }

    /// Similarity percentage over the longer normalized form
    pub fn similarity(&self) -> f64 {
        similarity(
            self.levenshtein_distance,
            self.normalized_address1.chars().count(),
            self.normalized_address2.chars().count(),
        )
    }
}

/// Raw addresses plus their precomputation, as sent to the oracle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub address1: String,
    pub address2: String,
    pub precomputation: Precomputation,
}

impl VerifyRequest {
    pub fn new(address1: &str, address2: &str) -> Self {
        Self {
            address1: address1.to_string(),
            address2: address2.to_string(),
            precomputation: Precomputation::compute(address1, address2),
        }
    }
}
