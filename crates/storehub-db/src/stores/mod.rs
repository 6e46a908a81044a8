//! Database operations for the `stores` table.

mod read;
mod types;
mod write;

pub use read::{count_stores, get_store_by_id, get_store_by_name, list_stores, list_stores_page};
pub use types::StoreRow;
pub use write::{insert_store, update_store, update_store_status};

/// Shared projection for every `stores` read.
const STORE_COLUMNS: &str = "id, merchant_id, name, contact, phone, description, is_default, \
     address, hours, latitude, longitude, status, wx_mch_id, wx_api_v2, operator, \
     create_time, update_time";

/// Filter predicate bound as `$1` id, `$2` name pattern, `$3` status, `$4` merchant.
///
/// Deleted stores are hidden unless the caller asks for status `D` explicitly.
const FILTER_CLAUSE: &str = "WHERE ($1::BIGINT IS NULL OR id = $1) \
       AND ($2::TEXT IS NULL OR name ILIKE $2) \
       AND (($3::TEXT IS NULL AND status <> 'D') OR status = $3) \
       AND ($4::BIGINT IS NULL OR merchant_id = $4)";

/// Escape `LIKE` metacharacters and wrap the term for a substring match.
fn contains_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("Main"), "%Main%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }

    #[test]
    fn filter_clause_uses_four_positional_binds() {
        for placeholder in ["$1", "$2", "$3", "$4"] {
            assert!(FILTER_CLAUSE.contains(placeholder));
        }
        assert!(!FILTER_CLAUSE.contains("$5"));
    }
}
