//! Verification session state
//!
//! One comparison at a time: Idle -> InFlight -> Succeeded | Failed.
//! A finished session can be submitted again.

use crate::core::VerifyRequest;
use crate::error::{AddrError, AddrResult};
use crate::oracle::VerificationResult;
use tracing::{debug, error, warn};

/// Lifecycle of a single comparison
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    #[default]
    Idle,
    InFlight,
    Succeeded(VerificationResult),
    Failed(String),
}

impl SessionState {
    fn label(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::InFlight => "in-flight",
            SessionState::Succeeded(_) => "succeeded",
            SessionState::Failed(_) => "failed",
        }
    }
}

#[derive(Debug, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_in_flight(&self) -> bool {
        self.state == SessionState::InFlight
    }

    /// User action: validate the pair and, if valid, move to InFlight.
    ///
    /// Blank input fails the session without producing a request.
    pub fn submit(&mut self, address1: &str, address2: &str) -> AddrResult<VerifyRequest> {
        if self.is_in_flight() {
            warn!("⚠️ Submit ignored, a verification is already in flight");
            return Err(AddrError::Busy);
        }

        if address1.trim().is_empty() || address2.trim().is_empty() {
            let err = AddrError::blank_address();
            self.transition(SessionState::Failed(err.to_string()));
            return Err(err);
        }

        self.transition(SessionState::InFlight);
        Ok(VerifyRequest::new(address1, address2))
    }

    /// Oracle completion: record the outcome.
    ///
    /// Any failure is collapsed into the generic verification error; the
    /// cause is only logged.
    pub fn complete(
        &mut self,
        outcome: AddrResult<VerificationResult>,
    ) -> AddrResult<VerificationResult> {
        if !self.is_in_flight() {
            warn!(
                "⚠️ Completion received while {}, recording anyway",
                self.state.label()
            );
        }

        match outcome {
            Ok(result) => {
                self.transition(SessionState::Succeeded(result.clone()));
                Ok(result)
            }
            Err(cause) => {
                error!("❌ Verification failed: {}", cause);
                let err = AddrError::VerificationFailed;
                self.transition(SessionState::Failed(err.to_string()));
                Err(err)
            }
        }
    }

    fn transition(&mut self, next: SessionState) {
        debug!("🔄 Session {} -> {}", self.state.label(), next.label());
        self.state = next;
    }
}
