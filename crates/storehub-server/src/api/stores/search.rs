use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use storehub_core::{Status, Store, StoreFilter};

use crate::api::lenient::non_blank;
use crate::api::extract::{ApiQuery, Session};
use crate::api::{map_collaborator_error, ApiError, ApiResponse, AppState};
use crate::middleware::RequestId;

use super::parse_id_param;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct SearchStoresQuery {
    pub id: Option<String>,
    pub name: Option<String>,
    pub merchant_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct SearchStoresData {
    pub store_list: Vec<Store>,
}

/// GET /store/searchStore
///
/// Only enabled stores are returned; a tenant-scoped account always searches
/// its own merchant regardless of `merchantId`.
pub(in crate::api) async fn search_stores(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Session(account): Session,
    ApiQuery(query): ApiQuery<SearchStoresQuery>,
) -> Result<Json<ApiResponse<SearchStoresData>>, ApiError> {
    let rid = req_id.0.as_str();

    let filter = StoreFilter {
        id: parse_id_param(rid, "id", query.id.as_deref())?,
        name: non_blank(query.name.as_deref()).map(ToOwned::to_owned),
        status: Some(Status::Enabled),
        merchant_id: parse_id_param(rid, "merchantId", query.merchant_id.as_deref())?,
    }
    .scoped_to(&account);

    let store_list = state
        .directory
        .query_by_filter(&filter)
        .await
        .map_err(|e| map_collaborator_error(rid, &e))?;

    Ok(Json(ApiResponse::success(rid, SearchStoresData { store_list })))
}
