use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use storehub_core::{InputSanitizer, Status, StoreRecord, YesOrNo};

use crate::api::extract::{ApiJson, Session};
use crate::api::lenient;
use crate::api::{map_collaborator_error, ApiError, ApiResponse, AppState};
use crate::middleware::RequestId;

use super::parse_id_param;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(in crate::api) struct SaveStoreRequest {
    #[serde(default, deserialize_with = "lenient::text")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub contact: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub is_default: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub address: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub hours: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub latitude: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub longitude: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub wx_mch_id: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub wx_api_v2: Option<String>,
}

/// Every free-text field after sanitization; absent fields are empty.
#[derive(Debug)]
struct SanitizedStore {
    name: String,
    contact: String,
    phone: String,
    description: String,
    is_default: String,
    address: String,
    hours: String,
    latitude: String,
    longitude: String,
    status: String,
    wx_mch_id: String,
    wx_api_v2: String,
}

impl SanitizedStore {
    fn from_request(sanitizer: &dyn InputSanitizer, body: &SaveStoreRequest) -> Self {
        let clean = |value: &Option<String>| {
            sanitizer
                .sanitize(value.as_deref().unwrap_or_default())
                .trim()
                .to_owned()
        };
        Self {
            name: clean(&body.name),
            contact: clean(&body.contact),
            phone: clean(&body.phone),
            description: clean(&body.description),
            is_default: clean(&body.is_default),
            address: clean(&body.address),
            hours: clean(&body.hours),
            latitude: clean(&body.latitude),
            longitude: clean(&body.longitude),
            status: clean(&body.status),
            wx_mch_id: clean(&body.wx_mch_id),
            wx_api_v2: clean(&body.wx_api_v2),
        }
    }
}

/// POST /store/save
///
/// `id > 0` updates that store; a missing, empty or zero id inserts. Missing
/// coordinates are geocoded from the address before the write.
pub(in crate::api) async fn save_store(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Session(account): Session,
    ApiJson(body): ApiJson<SaveStoreRequest>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let rid = req_id.0.as_str();

    let store_id = parse_id_param(rid, "id", body.id.as_deref())?.filter(|id| *id > 0);
    let mut fields = SanitizedStore::from_request(state.sanitizer.as_ref(), &body);

    if fields.name.is_empty() {
        return Err(ApiError::validation(rid, "store name may not be empty"));
    }

    let is_default = if fields.is_default.is_empty() {
        YesOrNo::default()
    } else {
        fields
            .is_default
            .parse::<YesOrNo>()
            .map_err(|_| ApiError::validation(rid, "isDefault must be Y or N"))?
    };
    let status = if fields.status.is_empty() {
        Status::default()
    } else {
        fields.status.parse::<Status>().map_err(|_| {
            ApiError::validation(rid, format!("unknown store status '{}'", fields.status))
        })?
    };

    let existing = state
        .directory
        .find_by_name(&fields.name)
        .await
        .map_err(|e| map_collaborator_error(rid, &e))?;
    if existing.is_some_and(|store| Some(store.id) != store_id) {
        return Err(ApiError::validation(rid, "store name already exists"));
    }

    if (fields.latitude.is_empty() || fields.longitude.is_empty()) && !fields.address.is_empty() {
        let location = state
            .geocoder
            .resolve(&fields.address)
            .await
            .map_err(|e| map_collaborator_error(rid, &e))?;
        fields.latitude = location.lat.to_string();
        fields.longitude = location.lng.to_string();
    }

    let record = StoreRecord {
        id: store_id,
        merchant_id: account.merchant_scope(),
        name: fields.name,
        contact: fields.contact,
        phone: fields.phone,
        description: fields.description,
        is_default,
        address: fields.address,
        hours: fields.hours,
        latitude: fields.latitude,
        longitude: fields.longitude,
        status,
        wx_mch_id: fields.wx_mch_id,
        wx_api_v2: fields.wx_api_v2,
        operator: account.account_name,
    };

    state
        .directory
        .save_store(record)
        .await
        .map_err(|e| map_collaborator_error(rid, &e))?;

    Ok(Json(ApiResponse::success(rid, true)))
}
