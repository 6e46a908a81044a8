//! Row types for the `stores` table.

use chrono::{DateTime, Utc};
use storehub_core::{Status, Store, YesOrNo};

use crate::DbError;

/// A row from the `stores` table.
///
/// Status and flag columns are `CHAR(1)` codes; [`Store::try_from`] rejects
/// codes the domain does not know.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoreRow {
    pub id: i64,
    pub merchant_id: Option<i64>,
    pub name: String,
    pub contact: String,
    pub phone: String,
    pub description: String,
    pub is_default: String,
    pub address: String,
    pub hours: String,
    pub latitude: String,
    pub longitude: String,
    pub status: String,
    pub wx_mch_id: String,
    pub wx_api_v2: String,
    pub operator: String,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

impl TryFrom<StoreRow> for Store {
    type Error = DbError;

    fn try_from(row: StoreRow) -> Result<Self, Self::Error> {
        let status = row
            .status
            .parse::<Status>()
            .map_err(|_| DbError::InvalidValue {
                column: "stores.status",
                value: row.status.clone(),
            })?;
        let is_default = row
            .is_default
            .parse::<YesOrNo>()
            .map_err(|_| DbError::InvalidValue {
                column: "stores.is_default",
                value: row.is_default.clone(),
            })?;

        Ok(Store {
            id: row.id,
            merchant_id: row.merchant_id,
            merchant_name: None,
            name: row.name,
            contact: row.contact,
            phone: row.phone,
            description: row.description,
            is_default,
            address: row.address,
            hours: row.hours,
            latitude: row.latitude,
            longitude: row.longitude,
            status,
            wx_mch_id: row.wx_mch_id,
            wx_api_v2: row.wx_api_v2,
            operator: row.operator,
            create_time: Some(row.create_time),
            update_time: Some(row.update_time),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(status: &str, is_default: &str) -> StoreRow {
        StoreRow {
            id: 5,
            merchant_id: Some(7),
            name: "Main Branch".to_string(),
            contact: "Lee".to_string(),
            phone: "555-0100".to_string(),
            description: String::new(),
            is_default: is_default.to_string(),
            address: "1 Harbour Road".to_string(),
            hours: "09:00-21:00".to_string(),
            latitude: "22.28".to_string(),
            longitude: "114.16".to_string(),
            status: status.to_string(),
            wx_mch_id: String::new(),
            wx_api_v2: String::new(),
            operator: "admin".to_string(),
            create_time: Utc::now(),
            update_time: Utc::now(),
        }
    }

    #[test]
    fn row_converts_codes_to_domain_enums() {
        let store = Store::try_from(row("N", "Y")).expect("valid row");
        assert_eq!(store.status, Status::Disabled);
        assert_eq!(store.is_default, YesOrNo::Yes);
        assert_eq!(store.merchant_id, Some(7));
        assert!(store.merchant_name.is_none());
    }

    #[test]
    fn row_with_unknown_status_is_rejected() {
        let err = Store::try_from(row("X", "N")).unwrap_err();
        assert!(
            matches!(err, DbError::InvalidValue { column: "stores.status", ref value } if value == "X")
        );
    }
}
