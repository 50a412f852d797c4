// ==========================================
// 参考数据服务 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::csv_config_trait::CsvConfigReader;
use crate::config::settings::{
    DEFAULT_CHUNK_SIZE, DEFAULT_COMPOSITE_SEPARATOR, DEFAULT_CURRENCY_CODE,
    DEFAULT_USER_BATCH_SIZE,
};
use crate::db::open_sqlite_connection;
use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, Box<dyn Error>> {
        let conn = open_sqlite_connection(db_path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会确保 config_kv 表存在（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, Box<dyn Error>> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
            conn_guard.execute_batch(
                r#"
                CREATE TABLE IF NOT EXISTS config_kv (
                    scope_id TEXT NOT NULL DEFAULT 'global',
                    key TEXT NOT NULL,
                    value TEXT NOT NULL,
                    updated_at TEXT NOT NULL DEFAULT (datetime('now')),
                    PRIMARY KEY (scope_id, key)
                );
                "#,
            )?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
                params![key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    /// 读取 global scope 的配置值（公开方法，供其他模块复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, Box<dyn Error>> {
        self.get_config_value(key)
    }

    /// 写入 global scope 的配置值（存在则覆盖）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value, updated_at)
            VALUES ('global', ?1, ?2, datetime('now'))
            ON CONFLICT(scope_id, key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
            params![key, value],
        )?;

        tracing::info!(config_key = key, value = value, "配置已更新");
        Ok(())
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, Box<dyn Error>> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 读取可解析配置；格式错误时告警并回退默认值
    fn get_parsed_or_default<T>(&self, key: &str, default: T) -> Result<T, Box<dyn Error>>
    where
        T: std::str::FromStr + Copy + std::fmt::Debug,
    {
        let raw = match self.get_config_value(key)? {
            Some(v) => v,
            None => return Ok(default),
        };

        match raw.trim().parse::<T>() {
            Ok(v) => Ok(v),
            Err(_) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    default = ?default,
                    "配置格式错误，使用默认值"
                );
                Ok(default)
            }
        }
    }

    /// 获取所有 global 配置的快照
    pub fn get_config_snapshot(&self) -> Result<HashMap<String, String>, Box<dyn Error>> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map = HashMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(config_map)
    }
}

/// 解析布尔配置（true/false/1/0/yes/no）
fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" | "y" => Some(true),
        "false" | "0" | "no" | "n" => Some(false),
        _ => None,
    }
}

// ==========================================
// CsvConfigReader Trait 实现
// ==========================================
#[async_trait]
impl CsvConfigReader for ConfigManager {
    async fn get_chunk_size(&self) -> Result<usize, Box<dyn Error>> {
        self.get_parsed_or_default(config_keys::CSV_CHUNK_SIZE, DEFAULT_CHUNK_SIZE)
    }

    async fn get_composite_separator(&self) -> Result<String, Box<dyn Error>> {
        let value = self.get_config_or_default(
            config_keys::CSV_COMPOSITE_SEPARATOR,
            DEFAULT_COMPOSITE_SEPARATOR,
        )?;
        // 分隔符不能为空，也不能与列分隔符冲突
        if value.is_empty() || value == "," {
            tracing::warn!(raw_value = %value, "复合编码分隔符非法，使用默认值");
            return Ok(DEFAULT_COMPOSITE_SEPARATOR.to_string());
        }
        Ok(value)
    }

    async fn get_surrounding_spaces_need_quotes(&self) -> Result<bool, Box<dyn Error>> {
        let value =
            self.get_config_or_default(config_keys::CSV_SURROUNDING_SPACES_NEED_QUOTES, "true")?;
        Ok(parse_flag(&value).unwrap_or(true))
    }

    async fn get_accept_extra_headers(&self) -> Result<bool, Box<dyn Error>> {
        let value = self.get_config_or_default(config_keys::CSV_ACCEPT_EXTRA_HEADERS, "false")?;
        Ok(parse_flag(&value).unwrap_or(false))
    }

    async fn get_currency_code(&self) -> Result<String, Box<dyn Error>> {
        self.get_config_or_default(config_keys::CURRENCY_CODE, DEFAULT_CURRENCY_CODE)
    }

    async fn get_user_batch_size(&self) -> Result<usize, Box<dyn Error>> {
        self.get_parsed_or_default(
            config_keys::NOTIFICATION_USER_BATCH_SIZE,
            DEFAULT_USER_BATCH_SIZE,
        )
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // CSV 导入导出
    pub const CSV_CHUNK_SIZE: &str = "csv_chunk_size";
    pub const CSV_COMPOSITE_SEPARATOR: &str = "csv_composite_separator";
    pub const CSV_SURROUNDING_SPACES_NEED_QUOTES: &str = "csv_surrounding_spaces_need_quotes";
    pub const CSV_ACCEPT_EXTRA_HEADERS: &str = "csv_accept_extra_headers";

    // 金额
    pub const CURRENCY_CODE: &str = "currency_code";

    // 通知
    pub const NOTIFICATION_USER_BATCH_SIZE: &str = "notification_user_batch_size";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("0"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
