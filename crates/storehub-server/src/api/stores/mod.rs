//! Store administration handlers.
//!
//! - `GET  /store/list`          paginated, tenant-scoped store list plus merchants
//! - `GET  /store/searchStore`   unpaginated list of enabled stores
//! - `POST /store/updateStatus`  enable, disable or soft-delete a store
//! - `POST /store/save`          create or update a store
//! - `GET  /store/info/{id}`     store detail, no session required

mod info;
mod list;
mod save;
mod search;
mod status;

pub(super) use info::get_store_info;
pub(super) use list::list_stores;
pub(super) use save::save_store;
pub(super) use search::search_stores;
pub(super) use status::update_status;

use storehub_core::Status;

use super::lenient::{non_blank, parse_id};
use super::ApiError;

/// Parse an optional id parameter, rejecting non-numeric input.
fn parse_id_param(request_id: &str, field: &str, raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    parse_id(raw)
        .map_err(|_| ApiError::validation(request_id, format!("{field} must be numeric")))
}

/// Parse an optional status code; blank is absent.
fn parse_status_param(request_id: &str, raw: Option<&str>) -> Result<Option<Status>, ApiError> {
    non_blank(raw)
        .map(|value| {
            value.parse::<Status>().map_err(|_| {
                ApiError::validation(request_id, format!("unknown store status '{value}'"))
            })
        })
        .transpose()
}

#[cfg(test)]
#[path = "stores_test.rs"]
mod tests;
