//! Verification orchestrator
//!
//! validate -> normalize -> score -> oracle -> relay. No retries, no caching.

use crate::error::AddrResult;
use crate::oracle::{Oracle, VerificationResult};
use crate::session::Session;
use std::sync::Arc;
use tracing::info;

/// Runs comparisons against a single oracle client
#[derive(Debug, Clone)]
pub struct Verifier {
    oracle: Arc<dyn Oracle>,
}

impl Verifier {
    pub fn new(oracle: Arc<dyn Oracle>) -> Self {
        Self { oracle }
    }

    pub fn oracle_name(&self) -> &str {
        self.oracle.name()
    }

    /// Compare two addresses with a fresh session
    pub async fn verify(&self, address1: &str, address2: &str) -> AddrResult<VerificationResult> {
        let mut session = Session::new();
        self.run(&mut session, address1, address2).await
    }

    /// Compare two addresses, driving `session` through its states
    pub async fn run(
        &self,
        session: &mut Session,
        address1: &str,
        address2: &str,
    ) -> AddrResult<VerificationResult> {
        let request = session.submit(address1, address2)?;

        let pre = &request.precomputation;
        info!(
            "📏 Distance {} ({:.2}% similar) via {}",
            pre.levenshtein_distance,
            pre.similarity(),
            self.oracle.name()
        );

        let outcome = self.oracle.verify(&request).await;
        session.complete(outcome)
    }
}
