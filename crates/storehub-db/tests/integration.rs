//! Offline unit tests for storehub-db pool configuration and row types.
//! These tests do not require a live database connection.

use storehub_core::{AppConfig, Environment, Status, Store, YesOrNo};
use storehub_db::{hash_token, MerchantRow, PoolConfig, StoreRow};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

fn app_config() -> AppConfig {
    AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        session_salt: "salt".to_string(),
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
        page_number: 1,
        page_size: 20,
        max_page_size: 100,
        geocoder_key: None,
        geocoder_base_url: "https://apis.map.qq.com/".to_string(),
        geocoder_timeout_secs: 10,
    }
}

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let pool_config = PoolConfig::from_app_config(&app_config());
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn store_row_converts_to_domain_store() {
    let row = StoreRow {
        id: 5,
        merchant_id: Some(2),
        name: "Harbour".to_string(),
        contact: "Li".to_string(),
        phone: "021-5555".to_string(),
        description: String::new(),
        is_default: "Y".to_string(),
        address: "1 Quay St".to_string(),
        hours: "08:00-20:00".to_string(),
        latitude: "31.2".to_string(),
        longitude: "121.5".to_string(),
        status: "N".to_string(),
        wx_mch_id: String::new(),
        wx_api_v2: String::new(),
        operator: "admin".to_string(),
        create_time: chrono::Utc::now(),
        update_time: chrono::Utc::now(),
    };

    let store = Store::try_from(row).expect("valid row");
    assert_eq!(store.id, 5);
    assert_eq!(store.status, Status::Disabled);
    assert_eq!(store.is_default, YesOrNo::Yes);
    assert!(store.merchant_name.is_none());
}

#[test]
fn merchant_row_rejects_unknown_status() {
    let row = MerchantRow {
        id: 1,
        name: "Acme".to_string(),
        status: "?".to_string(),
    };
    assert!(storehub_core::Merchant::try_from(row).is_err());
}

#[test]
fn token_hash_depends_on_salt() {
    let salt = app_config().session_salt;
    assert_ne!(hash_token(&salt, "abc"), hash_token("other", "abc"));
}
