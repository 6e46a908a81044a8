use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Serialize;
use storehub_core::{CollaboratorError, Store, StoreDirectory};

use crate::api::{map_collaborator_error, ApiError, ApiResponse, AppState};
use crate::middleware::RequestId;

use super::parse_id_param;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct StoreInfoData {
    pub store_info: Option<Store>,
}

/// Attach the merchant name and hide the payment credential.
///
/// A non-empty `wxApiV2` is replaced by the store's own id.
async fn present(directory: &dyn StoreDirectory, mut store: Store) -> Result<Store, CollaboratorError> {
    if let Some(merchant_id) = store.merchant_id {
        if let Some(merchant) = directory.find_merchant(merchant_id).await? {
            store.merchant_name = Some(merchant.name);
        }
    }
    if !store.wx_api_v2.is_empty() {
        store.wx_api_v2 = store.id.to_string();
    }
    Ok(store)
}

/// GET /store/info/{id}
pub(in crate::api) async fn get_store_info(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<StoreInfoData>>, ApiError> {
    let rid = req_id.0.as_str();
    let Some(store_id) = parse_id_param(rid, "id", Some(id.as_str()))? else {
        return Err(ApiError::validation(rid, "id must be numeric"));
    };

    let store = state
        .directory
        .find_by_id(store_id)
        .await
        .map_err(|e| map_collaborator_error(rid, &e))?;

    let store_info = match store {
        Some(store) => match present(state.directory.as_ref(), store.clone()).await {
            Ok(presented) => Some(presented),
            Err(e) => {
                tracing::warn!(error = %e, store_id, "store detail post-processing failed");
                Some(store)
            }
        },
        None => None,
    };

    Ok(Json(ApiResponse::success(rid, StoreInfoData { store_info })))
}
