//! Mock Oracle for Testing
//!
//! Records every request it receives and answers with a canned verdict.

use addressmatch::core::VerifyRequest;
use addressmatch::error::{AddrError, AddrResult};
use addressmatch::oracle::{Oracle, VerificationResult};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug)]
pub struct MockOracle {
    /// All requests that reached the oracle
    pub requests: Arc<Mutex<Vec<VerifyRequest>>>,
    /// Simulate failure on every call
    pub should_fail: Arc<Mutex<bool>>,
    verdict: VerificationResult,
}

impl MockOracle {
    pub fn new(are_same: bool) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            should_fail: Arc::new(Mutex::new(false)),
            verdict: VerificationResult {
                are_same,
                reasoning: "Mock verdict.".to_string(),
            },
        }
    }

    pub fn failing() -> Self {
        let mock = Self::new(false);
        *mock.should_fail.lock().unwrap() = true;
        mock
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn last_request(&self) -> Option<VerifyRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl Oracle for MockOracle {
    async fn verify(&self, request: &VerifyRequest) -> AddrResult<VerificationResult> {
        self.requests.lock().unwrap().push(request.clone());
        if *self.should_fail.lock().unwrap() {
            return Err(AddrError::Oracle("Mock oracle failure".to_string()));
        }
        Ok(self.verdict.clone())
    }

    fn name(&self) -> &str {
        "mock"
    }
}
