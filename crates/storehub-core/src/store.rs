//! Store, merchant and account types plus the typed query filters used at the
//! directory seam.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Lifecycle status shared by stores and merchants.
///
/// Serialized with the single-letter codes stored in the database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "A")]
    Enabled,
    #[serde(rename = "N")]
    Disabled,
    #[serde(rename = "D")]
    Deleted,
}

impl Status {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Enabled => "A",
            Status::Disabled => "N",
            Status::Deleted => "D",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" => Ok(Status::Enabled),
            "N" => Ok(Status::Disabled),
            "D" => Ok(Status::Deleted),
            other => Err(CoreError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum YesOrNo {
    #[serde(rename = "Y")]
    Yes,
    #[default]
    #[serde(rename = "N")]
    No,
}

impl YesOrNo {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            YesOrNo::Yes => "Y",
            YesOrNo::No => "N",
        }
    }
}

impl FromStr for YesOrNo {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Y" => Ok(YesOrNo::Yes),
            "N" => Ok(YesOrNo::No),
            other => Err(CoreError::InvalidFlag(other.to_string())),
        }
    }
}

/// A physical outlet owned by a merchant, as held by the directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: i64,
    pub merchant_id: Option<i64>,
    /// Joined from `merchants` for detail views; `None` in list results.
    pub merchant_name: Option<String>,
    pub name: String,
    pub contact: String,
    pub phone: String,
    pub description: String,
    pub is_default: YesOrNo,
    pub address: String,
    pub hours: String,
    pub latitude: String,
    pub longitude: String,
    pub status: Status,
    pub wx_mch_id: String,
    pub wx_api_v2: String,
    pub operator: String,
    pub create_time: Option<DateTime<Utc>>,
    pub update_time: Option<DateTime<Utc>>,
}

/// Write model passed to the directory on create or update.
///
/// `id: None` inserts a new store. `merchant_id: None` leaves the owner of an
/// existing store untouched and creates an unowned store on insert; an update
/// with `Some(merchant_id)` only applies to a store that merchant owns.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreRecord {
    pub id: Option<i64>,
    pub merchant_id: Option<i64>,
    pub name: String,
    pub contact: String,
    pub phone: String,
    pub description: String,
    pub is_default: YesOrNo,
    pub address: String,
    pub hours: String,
    pub latitude: String,
    pub longitude: String,
    pub status: Status,
    pub wx_mch_id: String,
    pub wx_api_v2: String,
    pub operator: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Merchant {
    pub id: i64,
    pub name: String,
    pub status: Status,
}

/// The identity behind an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccountInfo {
    pub id: i64,
    pub account_name: String,
    pub merchant_id: Option<i64>,
}

impl AccountInfo {
    /// The tenant this account is confined to, if any.
    ///
    /// Platform accounts carry no merchant or a non-positive id and see every
    /// tenant's stores.
    #[must_use]
    pub fn merchant_scope(&self) -> Option<i64> {
        self.merchant_id.filter(|id| *id > 0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreFilter {
    pub id: Option<i64>,
    /// Case-insensitive substring match.
    pub name: Option<String>,
    pub status: Option<Status>,
    pub merchant_id: Option<i64>,
}

impl StoreFilter {
    /// Confine the filter to the account's tenant; a scoped account always
    /// overrides any caller-supplied merchant.
    #[must_use]
    pub fn scoped_to(mut self, account: &AccountInfo) -> Self {
        if let Some(merchant_id) = account.merchant_scope() {
            self.merchant_id = Some(merchant_id);
        }
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MerchantFilter {
    pub merchant_id: Option<i64>,
    pub status: Option<Status>,
}

/// A 1-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Build a page request, clamping `page` to at least 1 and `page_size` to
    /// `1..=max_page_size`.
    #[must_use]
    pub fn new(page: i64, page_size: i64, max_page_size: i64) -> Self {
        Self {
            page: page.max(1),
            page_size: page_size.clamp(1, max_page_size.max(1)),
        }
    }

    #[must_use]
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub content: Vec<T>,
    pub total_elements: i64,
    pub total_pages: i64,
    pub current_page: i64,
    pub page_size: i64,
}

impl<T> Paginated<T> {
    #[must_use]
    pub fn new(content: Vec<T>, total_elements: i64, page: PageRequest) -> Self {
        let total_pages = if total_elements <= 0 {
            0
        } else {
            (total_elements + page.page_size - 1) / page.page_size
        };
        Self {
            content,
            total_elements,
            total_pages,
            current_page: page.page,
            page_size: page.page_size,
        }
    }
}
