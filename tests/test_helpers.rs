// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据库、测试配置、参考数据种子
// ==========================================

#![allow(dead_code)]

use refdata_csv::config::config_keys;
use refdata_csv::repository::IdealStockAmountRepository;
use rusqlite::Connection;
use std::error::Error;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file
        .path()
        .to_str()
        .ok_or("临时文件路径不是 UTF-8")?
        .to_string();

    let conn = Connection::open(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开测试数据库连接
pub fn open_test_connection(db_path: &str) -> Result<Connection, Box<dyn Error>> {
    Ok(Connection::open(db_path)?)
}

/// 初始化数据库 schema（配置表；参考数据表由仓储自行创建）
fn init_schema(conn: &Connection) -> Result<(), Box<dyn Error>> {
    conn.execute(
        r#"
        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL DEFAULT 'global',
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        )
        "#,
        [],
    )?;
    Ok(())
}

/// 插入测试配置数据
pub fn insert_test_config(conn: &Connection) -> Result<(), Box<dyn Error>> {
    // CSV 配置
    conn.execute(
        r#"
        INSERT OR REPLACE INTO config_kv (scope_id, key, value, updated_at) VALUES
        ('global', ?1, '2', datetime('now')),
        ('global', ?2, '#', datetime('now')),
        ('global', ?3, 'false', datetime('now')),
        ('global', ?4, 'yes', datetime('now'))
        "#,
        [
            config_keys::CSV_CHUNK_SIZE,
            config_keys::CSV_COMPOSITE_SEPARATOR,
            config_keys::CSV_SURROUNDING_SPACES_NEED_QUOTES,
            config_keys::CSV_ACCEPT_EXTRA_HEADERS,
        ],
    )?;

    // 金额与通知配置
    conn.execute(
        r#"
        INSERT OR REPLACE INTO config_kv (scope_id, key, value, updated_at) VALUES
        ('global', ?1, 'EUR', datetime('now')),
        ('global', ?2, '25', datetime('now'))
        "#,
        [
            config_keys::CURRENCY_CODE,
            config_keys::NOTIFICATION_USER_BATCH_SIZE,
        ],
    )?;

    Ok(())
}

/// 写入理想库存量导入所需的参考数据
///
/// - 机构: HC01, HC02
/// - 报告期: SCH001|Jan2017, SCH001|Feb2017
/// - 商品类型: WHO|1, WHO|2
pub fn seed_reference_data(repo: &IdealStockAmountRepository) -> Result<(), Box<dyn Error>> {
    repo.insert_facility("HC01", "Comfort Health Clinic")?;
    repo.insert_facility("HC02", "Nandumbo Health Center")?;
    repo.insert_processing_period("SCH001", "Jan2017")?;
    repo.insert_processing_period("SCH001", "Feb2017")?;
    repo.insert_commodity_type("WHO", "1", "Antiretrovirals")?;
    repo.insert_commodity_type("WHO", "2", "Antimalarials")?;
    Ok(())
}
