use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use storehub_core::Status;

use crate::api::lenient::{self, non_blank};
use crate::api::extract::{ApiJson, Session};
use crate::api::{map_collaborator_error, ApiError, ApiResponse, AppState};
use crate::middleware::RequestId;

use super::parse_id_param;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct UpdateStatusRequest {
    #[serde(default, deserialize_with = "lenient::text")]
    pub store_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: Option<String>,
}

/// A validated status change. An omitted store id is `0` and an omitted
/// status is [`Status::Enabled`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct StatusChange {
    store_id: i64,
    status: Status,
}

impl StatusChange {
    fn from_request(request_id: &str, body: &UpdateStatusRequest) -> Result<Self, ApiError> {
        let store_id = parse_id_param(request_id, "storeId", body.store_id.as_deref())?.unwrap_or(0);
        let status = match non_blank(body.status.as_deref()) {
            None => Status::default(),
            Some(value) => value.parse::<Status>().map_err(|_| {
                ApiError::validation(request_id, format!("unknown store status '{value}'"))
            })?,
        };
        Ok(Self { store_id, status })
    }
}

/// POST /store/updateStatus
pub(in crate::api) async fn update_status(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Session(account): Session,
    ApiJson(body): ApiJson<UpdateStatusRequest>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let rid = req_id.0.as_str();
    let change = StatusChange::from_request(rid, &body)?;

    state
        .directory
        .update_status(change.store_id, &account.account_name, change.status)
        .await
        .map_err(|e| map_collaborator_error(rid, &e))?;

    Ok(Json(ApiResponse::success(rid, true)))
}
