use axum::{extract::State, Extension, Json};
use serde::{Deserialize, Serialize};
use storehub_core::{Merchant, MerchantFilter, PageRequest, Paginated, Status, Store, StoreFilter};

use crate::api::lenient::non_blank;
use crate::api::extract::{ApiQuery, Session};
use crate::api::{map_collaborator_error, ApiError, ApiResponse, AppState};
use crate::middleware::RequestId;

use super::{parse_id_param, parse_status_param};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct ListStoresQuery {
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub id: Option<String>,
    pub name: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct ListStoresData {
    pub pagination_response: Paginated<Store>,
    pub merchants: Vec<Merchant>,
}

fn parse_page_param(
    request_id: &str,
    field: &str,
    raw: Option<&str>,
    default: i64,
) -> Result<i64, ApiError> {
    match non_blank(raw) {
        None => Ok(default),
        Some(value) => value
            .parse::<i64>()
            .map_err(|_| ApiError::validation(request_id, format!("{field} must be numeric"))),
    }
}

/// GET /store/list
pub(in crate::api) async fn list_stores(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Session(account): Session,
    ApiQuery(query): ApiQuery<ListStoresQuery>,
) -> Result<Json<ApiResponse<ListStoresData>>, ApiError> {
    let rid = req_id.0.as_str();

    let page = PageRequest::new(
        parse_page_param(rid, "page", query.page.as_deref(), state.pages.page)?,
        parse_page_param(rid, "pageSize", query.page_size.as_deref(), state.pages.page_size)?,
        state.pages.max_page_size,
    );

    let filter = StoreFilter {
        id: parse_id_param(rid, "id", query.id.as_deref())?,
        name: non_blank(query.name.as_deref()).map(ToOwned::to_owned),
        status: parse_status_param(rid, query.status.as_deref())?,
        merchant_id: None,
    }
    .scoped_to(&account);

    let pagination_response = state
        .directory
        .query_paginated(&filter, page)
        .await
        .map_err(|e| map_collaborator_error(rid, &e))?;

    let merchants = state
        .directory
        .list_merchants(&MerchantFilter {
            merchant_id: account.merchant_scope(),
            status: Some(Status::Enabled),
        })
        .await
        .map_err(|e| map_collaborator_error(rid, &e))?;

    Ok(Json(ApiResponse::success(
        rid,
        ListStoresData {
            pagination_response,
            merchants,
        },
    )))
}
