//! HTTP transport for the validation service.
//!
//! | Method | Path | Chain |
//! |--------|------|-------|
//! | POST | `/api/validate` | Live |
//! | POST | `/test/validate` | Test |
//! | GET | `/health` | - |
//!
//! Malformed request bodies get `400` with `{"error": "..."}`. A completed
//! validation always gets `200`; an invalid card carries error code `4000`.
//! Service errors and handler panics get `500` with code `1000`.
//!
//! Swagger UI is served at `/swagger-ui/`.

use std::any::Any;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{self, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::{CardRecord, ValidationService, ValidatorType, Verdict};

/// Error code for a card that failed validation.
pub const INVALID_CARD_CODE: u16 = 4000;

/// Error code for an unexpected server-side failure.
pub const UNEXPECTED_ERROR_CODE: u16 = 1000;

// ============================================================================
// OpenAPI Documentation
// ============================================================================

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Card Validator API",
        version = "0.1.0",
        description = "Validates card number checksum, brand length and expiration. No auth or rate limiting.",
        license(name = "MIT")
    ),
    tags(
        (name = "Validation", description = "Card validation endpoints"),
        (name = "System", description = "Health and status endpoints")
    ),
    paths(validate_live_card, validate_test_card, health),
    components(schemas(
        ValidateCardRequest,
        ValidateCardResponse,
        ResponseError,
        BadRequestResponse,
        HealthResponse,
    ))
)]
struct ApiDoc;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Card fields as sent by clients. Missing fields are treated as empty.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
#[schema(example = json!({"number": "4242424242424242", "expMonth": "02", "expYear": "2030"}))]
pub struct ValidateCardRequest {
    /// Card number, digits only. Separators are rejected, not stripped.
    pub number: String,
    /// Two-digit expiration month, 01-12
    pub exp_month: String,
    /// Four-digit expiration year
    pub exp_year: String,
}

impl From<ValidateCardRequest> for CardRecord {
    fn from(mut req: ValidateCardRequest) -> Self {
        CardRecord::new(
            std::mem::take(&mut req.number),
            std::mem::take(&mut req.exp_month),
            std::mem::take(&mut req.exp_year),
        )
    }
}

/// Result of a completed validation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[schema(example = json!({
    "valid": false,
    "error": {"code": 4000, "message": "Invalid card number"}
}))]
pub struct ValidateCardResponse {
    /// Whether every rule passed
    pub valid: bool,
    /// Present only when the card is invalid
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ResponseError>,
}

impl From<Verdict> for ValidateCardResponse {
    fn from(verdict: Verdict) -> Self {
        if verdict.is_valid() {
            return Self {
                valid: true,
                error: None,
            };
        }

        Self {
            valid: false,
            error: Some(ResponseError {
                code: INVALID_CARD_CODE,
                message: verdict.reason().to_string(),
            }),
        }
    }
}

/// Coded error body.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ResponseError {
    /// 4000 for an invalid card, 1000 for an unexpected error
    pub code: u16,
    /// Human-readable message
    pub message: String,
}

/// Body returned for a request that could not be parsed.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BadRequestResponse {
    /// Why the body was rejected
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
struct HealthResponse {
    /// Service status
    status: String,
    /// API version
    version: String,
}

// ============================================================================
// Handlers
// ============================================================================

#[derive(Clone)]
struct AppState {
    service: Arc<ValidationService>,
}

/// Validate a card with the live rule chain
#[utoipa::path(
    post,
    path = "/api/validate",
    request_body = ValidateCardRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidateCardResponse),
        (status = 400, description = "Malformed request body", body = BadRequestResponse),
        (status = 500, description = "Unexpected error", body = ResponseError)
    ),
    tag = "Validation"
)]
#[tracing::instrument(name = "validate_live_card", skip_all)]
async fn validate_live_card(
    State(state): State<AppState>,
    payload: Result<Json<ValidateCardRequest>, JsonRejection>,
) -> Response {
    validate_card(&state, ValidatorType::Live, payload)
}

/// Validate a card with the test chain (accepts only 4242424242424242)
#[utoipa::path(
    post,
    path = "/test/validate",
    request_body = ValidateCardRequest,
    responses(
        (status = 200, description = "Validation result", body = ValidateCardResponse),
        (status = 400, description = "Malformed request body", body = BadRequestResponse),
        (status = 500, description = "Unexpected error", body = ResponseError)
    ),
    tag = "Validation"
)]
#[tracing::instrument(name = "validate_test_card", skip_all)]
async fn validate_test_card(
    State(state): State<AppState>,
    payload: Result<Json<ValidateCardRequest>, JsonRejection>,
) -> Response {
    validate_card(&state, ValidatorType::Test, payload)
}

fn validate_card(
    state: &AppState,
    kind: ValidatorType,
    payload: Result<Json<ValidateCardRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            let message = rejection.body_text();
            tracing::error!(error = %message, "failed to bind json");
            return (
                StatusCode::BAD_REQUEST,
                Json(BadRequestResponse { error: message }),
            )
                .into_response();
        }
    };

    let card = CardRecord::from(request);

    match state.service.validate_card(&card, kind) {
        Ok(verdict) => {
            tracing::info!(
                validator = %kind,
                card = %card.masked(),
                valid = verdict.is_valid(),
                reason = verdict.reason(),
                "card validated successfully"
            );
            (StatusCode::OK, Json(ValidateCardResponse::from(verdict))).into_response()
        }
        Err(err) => {
            tracing::error!(validator = %kind, error = %err, "failed to validate card");
            internal_error()
        }
    }
}

fn internal_error() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ResponseError {
            code: UNEXPECTED_ERROR_CODE,
            message: "internal server error".to_string(),
        }),
    )
        .into_response()
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "handler panicked");
    internal_error()
}

/// Health check
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "System"
)]
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

// ============================================================================
// Router
// ============================================================================

/// Builds the application router around `service`.
pub fn router(service: ValidationService) -> Router {
    let state = AppState {
        service: Arc::new(service),
    };

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(cors::Any);

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/validate", post(validate_live_card))
        .route("/test/validate", post(validate_test_card))
        .route("/health", get(health))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
