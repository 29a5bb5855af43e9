//! API routes for the proxy
//!
//! POST /api/verify: raw addresses plus precomputation in, verdict out.

use super::ProxyState;
use crate::core::{Precomputation, VerifyRequest};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info, warn};

type AppStateArc = Arc<ProxyState>;

pub const VERIFY_PATH: &str = "/api/verify";

const METHOD_NOT_ALLOWED: &str = "Only POST requests are allowed";
const MISSING_CREDENTIAL: &str = "API_KEY is not configured on the server.";
const MISSING_DATA: &str = "Missing address data in the request body.";
const BACKEND_FAILURE: &str = "Failed to verify addresses via the backend service.";

/// Error body for every non-200 response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Request body as received; every field may be missing.
#[derive(Debug, Deserialize)]
struct VerifyPayload {
    address1: Option<String>,
    address2: Option<String>,
    precomputation: Option<Precomputation>,
}

impl VerifyPayload {
    fn into_request(self) -> Option<VerifyRequest> {
        let address1 = self.address1.filter(|a| !a.is_empty())?;
        let address2 = self.address2.filter(|a| !a.is_empty())?;
        Some(VerifyRequest {
            address1,
            address2,
            precomputation: self.precomputation?,
        })
    }
}

pub fn verify_routes() -> Router<AppStateArc> {
    Router::new().route(VERIFY_PATH, post(verify).fallback(method_not_allowed))
}

async fn method_not_allowed() -> Response {
    error_response(StatusCode::METHOD_NOT_ALLOWED, METHOD_NOT_ALLOWED)
}

async fn verify(
    State(state): State<AppStateArc>,
    payload: Result<Json<VerifyPayload>, JsonRejection>,
) -> Response {
    let Some(oracle) = state.oracle.as_ref() else {
        error!("❌ Verify request received but no API key is configured");
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, MISSING_CREDENTIAL);
    };

    let request = match payload {
        Ok(Json(payload)) => payload.into_request(),
        Err(rejection) => {
            warn!("⚠️ Unreadable verify body: {}", rejection);
            None
        }
    };
    let Some(request) = request else {
        return error_response(StatusCode::BAD_REQUEST, MISSING_DATA);
    };

    info!(
        "📨 Verify request (distance {})",
        request.precomputation.levenshtein_distance
    );

    match oracle.verify(&request).await {
        Ok(result) => {
            info!("✅ Verdict: same={}", result.are_same);
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e) => {
            error!("❌ Error calling oracle from proxy: {}", e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, BACKEND_FAILURE)
        }
    }
}
