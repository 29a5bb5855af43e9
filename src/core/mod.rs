//! Core comparison logic
//!
//! Address normalization, edit distance, the precomputation snapshot
//! and the oracle prompt built from it.

pub mod distance;
pub mod normalizer;
pub mod precompute;
pub mod prompt;

pub use distance::{edit_distance, similarity};
pub use normalizer::{normalize, normalize_opt};
pub use precompute::{Precomputation, VerifyRequest};
pub use prompt::build_prompt;
