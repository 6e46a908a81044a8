mod extract;
mod lenient;
mod stores;

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use storehub_core::{
    CollaboratorError, GeocodingProvider, InputSanitizer, SessionResolver, StoreDirectory,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, RequestId, ACCESS_TOKEN_HEADER};

pub const CODE_SUCCESS: u16 = 200;
pub const CODE_VALIDATION: u16 = 201;
pub const CODE_INTERNAL: u16 = 500;
pub const CODE_NOT_LOGGED_IN: u16 = 1001;

/// Page defaults applied when a list request omits `page` / `pageSize`.
#[derive(Debug, Clone, Copy)]
pub struct PageDefaults {
    pub page: i64,
    pub page_size: i64,
    pub max_page_size: i64,
}

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub sessions: Arc<dyn SessionResolver>,
    pub directory: Arc<dyn StoreDirectory>,
    pub geocoder: Arc<dyn GeocodingProvider>,
    pub sanitizer: Arc<dyn InputSanitizer>,
    pub pages: PageDefaults,
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub code: u16,
    pub message: &'static str,
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: u16,
    pub message: String,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(request_id: impl Into<String>, data: T) -> Self {
        Self {
            code: CODE_SUCCESS,
            message: "success",
            data,
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl ApiError {
    pub fn new(request_id: impl Into<String>, code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            meta: ResponseMeta::new(request_id.into()),
        }
    }

    pub fn not_logged_in(request_id: impl Into<String>) -> Self {
        Self::new(request_id, CODE_NOT_LOGGED_IN, "please log in first")
    }

    pub fn validation(request_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(request_id, CODE_VALIDATION, message)
    }

    pub fn internal(request_id: impl Into<String>) -> Self {
        Self::new(request_id, CODE_INTERNAL, "internal error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.code {
            CODE_NOT_LOGGED_IN => StatusCode::UNAUTHORIZED,
            CODE_VALIDATION => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Translate a collaborator failure into the response envelope.
///
/// Name clashes and missing stores are caller errors; anything else is logged
/// and reported as an internal error.
pub(super) fn map_collaborator_error(request_id: &str, error: &CollaboratorError) -> ApiError {
    match error {
        CollaboratorError::DuplicateName(_) => {
            ApiError::validation(request_id, "store name already exists")
        }
        CollaboratorError::StoreNotFound(_) => {
            ApiError::validation(request_id, "store does not exist")
        }
        other => {
            tracing::error!(error = %other, request_id, "collaborator call failed");
            ApiError::internal(request_id)
        }
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            HeaderName::from_static(ACCESS_TOKEN_HEADER),
            HeaderName::from_static("x-request-id"),
        ])
}

fn store_router() -> Router<AppState> {
    Router::new()
        .route("/store/list", get(stores::list_stores))
        .route("/store/searchStore", get(stores::search_stores))
        .route("/store/updateStatus", post(stores::update_status))
        .route("/store/save", post(stores::save_store))
        .route("/store/info/{id}", get(stores::get_store_info))
}

pub fn build_app(state: AppState) -> Router {
    let public_routes = Router::new().route("/health", get(health));

    Router::new()
        .merge(public_routes)
        .merge(store_router())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    match storehub_db::health_check(&state.pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::success(
                req_id.0,
                HealthData {
                    status: "ok",
                    database: "ok",
                },
            )),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    code: CODE_INTERNAL,
                    message: "degraded",
                    data: HealthData {
                        status: "degraded",
                        database: "unavailable",
                    },
                    meta: ResponseMeta::new(req_id.0),
                }),
            )
        }
    }
}
