//! Request extractors that always answer with the response envelope.
//!
//! - [`Session`] resolves the `Access-Token` header; it runs before any body or
//!   query extractor so an anonymous request is always told to log in.
//! - [`ApiJson`] and [`ApiQuery`] wrap axum's extractors and turn their
//!   rejections into a 201 envelope.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts, Query, Request,
    },
    http::{request::Parts, Extensions},
    Json,
};
use storehub_core::AccountInfo;

use super::{map_collaborator_error, ApiError, AppState};
use crate::middleware::{extract_access_token, RequestId};

fn request_id_of(extensions: &Extensions) -> String {
    extensions
        .get::<RequestId>()
        .map(|id| id.0.clone())
        .unwrap_or_default()
}

/// The account behind a valid `Access-Token` header.
#[derive(Debug, Clone)]
pub struct Session(pub AccountInfo);

impl FromRequestParts<AppState> for Session {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let request_id = request_id_of(&parts.extensions);
        let Some(token) = extract_access_token(&parts.headers) else {
            return Err(ApiError::not_logged_in(request_id));
        };

        state
            .sessions
            .resolve(token)
            .await
            .map_err(|e| map_collaborator_error(&request_id, &e))?
            .map(Session)
            .ok_or_else(|| ApiError::not_logged_in(request_id))
    }
}

/// JSON body extractor whose rejection is a validation envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let request_id = request_id_of(req.extensions());
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                tracing::debug!(
                    error = %rejection,
                    request_id = %request_id,
                    "rejected request body"
                );
                Err(ApiError::validation(
                    request_id,
                    format!("invalid request body: {}", rejection.body_text()),
                ))
            }
        }
    }
}

/// Query-string extractor whose rejection is a validation envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Query::<T>::from_request_parts(parts, state).await {
            Ok(Query(value)) => Ok(Self(value)),
            Err(rejection) => Err(ApiError::validation(
                request_id_of(&parts.extensions),
                format!("invalid query string: {}", rejection.body_text()),
            )),
        }
    }
}
