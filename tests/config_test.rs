// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证 CSV 配置读取、覆写与回退默认值
// ==========================================

mod test_helpers;

use refdata_csv::config::{config_keys, load_csv_settings, ConfigManager, CsvConfigReader};
use test_helpers::{create_test_db, insert_test_config, open_test_connection};

#[tokio::test]
async fn test_config_manager_creation() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");

    let config_manager = ConfigManager::new(&db_path);
    assert!(
        config_manager.is_ok(),
        "ConfigManager should be created successfully"
    );
}

#[tokio::test]
async fn test_defaults_when_config_empty() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    let settings = load_csv_settings(&config_manager)
        .await
        .expect("Failed to load settings");

    assert_eq!(settings.chunk_size, 200);
    assert_eq!(settings.composite_separator, "|");
    assert!(settings.surrounding_spaces_need_quotes);
    assert!(!settings.accept_extra_headers);
    assert_eq!(settings.currency.code(), "USD");
    assert_eq!(settings.user_batch_size, 100);
}

#[tokio::test]
async fn test_load_settings_from_config_kv() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let conn = open_test_connection(&db_path).expect("Failed to open db");
    insert_test_config(&conn).expect("Failed to insert test config");

    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");
    let settings = load_csv_settings(&config_manager)
        .await
        .expect("Failed to load settings");

    assert_eq!(settings.chunk_size, 2);
    assert_eq!(settings.composite_separator, "#");
    assert!(!settings.surrounding_spaces_need_quotes);
    assert!(settings.accept_extra_headers);
    assert_eq!(settings.currency.code(), "EUR");
    assert_eq!(settings.user_batch_size, 25);
    assert!(!settings.preference().surrounding_spaces_need_quotes);
}

#[tokio::test]
async fn test_set_global_config_value_overrides() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    config_manager
        .set_global_config_value(config_keys::CSV_CHUNK_SIZE, "50")
        .expect("Failed to set config");
    assert_eq!(config_manager.get_chunk_size().await.unwrap(), 50);

    // 再次写入覆盖旧值
    config_manager
        .set_global_config_value(config_keys::CSV_CHUNK_SIZE, "75")
        .expect("Failed to set config");
    assert_eq!(config_manager.get_chunk_size().await.unwrap(), 75);
    assert_eq!(
        config_manager
            .get_global_config_value(config_keys::CSV_CHUNK_SIZE)
            .unwrap()
            .as_deref(),
        Some("75")
    );

    let snapshot = config_manager.get_config_snapshot().unwrap();
    assert_eq!(snapshot.len(), 1);
}

#[tokio::test]
async fn test_invalid_values_fall_back_to_defaults() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    config_manager
        .set_global_config_value(config_keys::CSV_CHUNK_SIZE, "not-a-number")
        .unwrap();
    config_manager
        .set_global_config_value(config_keys::CSV_COMPOSITE_SEPARATOR, ",")
        .unwrap();
    config_manager
        .set_global_config_value(config_keys::CSV_ACCEPT_EXTRA_HEADERS, "maybe")
        .unwrap();
    config_manager
        .set_global_config_value(config_keys::NOTIFICATION_USER_BATCH_SIZE, "0")
        .unwrap();

    let settings = load_csv_settings(&config_manager)
        .await
        .expect("Failed to load settings");

    assert_eq!(settings.chunk_size, 200);
    assert_eq!(settings.composite_separator, "|");
    assert!(!settings.accept_extra_headers);
    // 0 视为未配置
    assert_eq!(settings.user_batch_size, 100);
}

#[tokio::test]
async fn test_invalid_currency_is_an_error() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let config_manager = ConfigManager::new(&db_path).expect("Failed to create ConfigManager");

    config_manager
        .set_global_config_value(config_keys::CURRENCY_CODE, "DOLLARS")
        .unwrap();

    let result = load_csv_settings(&config_manager).await;
    assert!(result.is_err(), "Invalid currency code should be rejected");
}
