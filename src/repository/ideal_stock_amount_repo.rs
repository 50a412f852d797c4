// ==========================================
// 参考数据服务 - 理想库存量仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 表: facilities / processing_periods / commodity_types / ideal_stock_amounts
// 约束: 所有查询使用参数化
// ==========================================

use crate::domain::{IdealStockAmount, IdealStockAmountKey};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info};

/// 导出视图（按编码展开的理想库存量）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdealStockAmountRow {
    pub facility_code: String,
    pub schedule_code: String,
    pub period_name: String,
    pub classification_system: String,
    pub classification_id: String,
    pub amount: i64,
}

pub struct IdealStockAmountRepository {
    conn: Arc<Mutex<Connection>>,
}

impl IdealStockAmountRepository {
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)?;
        let repo = Self::from_connection(Arc::new(Mutex::new(conn)));
        repo.ensure_schema()?;
        Ok(repo)
    }

    /// 从已有连接创建仓储实例（不建表）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn ensure_schema(&self) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS facilities (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                code TEXT NOT NULL UNIQUE,
                name TEXT
            );
            CREATE TABLE IF NOT EXISTS processing_periods (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                schedule_code TEXT NOT NULL,
                name TEXT NOT NULL,
                UNIQUE (schedule_code, name)
            );
            CREATE TABLE IF NOT EXISTS commodity_types (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                classification_system TEXT NOT NULL,
                classification_id TEXT NOT NULL,
                name TEXT,
                UNIQUE (classification_system, classification_id)
            );
            CREATE TABLE IF NOT EXISTS ideal_stock_amounts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                facility_id INTEGER NOT NULL REFERENCES facilities(id),
                commodity_type_id INTEGER NOT NULL REFERENCES commodity_types(id),
                processing_period_id INTEGER NOT NULL REFERENCES processing_periods(id),
                amount INTEGER NOT NULL,
                updated_at TEXT NOT NULL,
                UNIQUE (facility_id, commodity_type_id, processing_period_id)
            );
            "#,
        )?;
        Ok(())
    }

    // ==========================================
    // 主数据登记（测试与初始化使用）
    // ==========================================

    pub fn insert_facility(&self, code: &str, name: &str) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO facilities (code, name) VALUES (?1, ?2)",
            params![code, name],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn insert_processing_period(&self, schedule_code: &str, name: &str) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO processing_periods (schedule_code, name) VALUES (?1, ?2)",
            params![schedule_code, name],
        )?;
        Ok(conn.last_insert_rowid())
    }

    pub fn insert_commodity_type(
        &self,
        classification_system: &str,
        classification_id: &str,
        name: &str,
    ) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO commodity_types (classification_system, classification_id, name) VALUES (?1, ?2, ?3)",
            params![classification_system, classification_id, name],
        )?;
        Ok(conn.last_insert_rowid())
    }

    // ==========================================
    // 引用解析
    // ==========================================

    pub fn find_facility_id(&self, code: &str) -> RepositoryResult<Option<i64>> {
        let conn = self.get_conn()?;
        let id = conn
            .query_row(
                "SELECT id FROM facilities WHERE code = ?1",
                params![code],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    pub fn find_processing_period_id(
        &self,
        schedule_code: &str,
        name: &str,
    ) -> RepositoryResult<Option<i64>> {
        let conn = self.get_conn()?;
        let id = conn
            .query_row(
                "SELECT id FROM processing_periods WHERE schedule_code = ?1 AND name = ?2",
                params![schedule_code, name],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    pub fn find_commodity_type_id(
        &self,
        classification_system: &str,
        classification_id: &str,
    ) -> RepositoryResult<Option<i64>> {
        let conn = self.get_conn()?;
        let id = conn
            .query_row(
                "SELECT id FROM commodity_types WHERE classification_system = ?1 AND classification_id = ?2",
                params![classification_system, classification_id],
                |row| row.get(0),
            )
            .optional()?;
        Ok(id)
    }

    // ==========================================
    // 理想库存量
    // ==========================================

    /// 按唯一键查询已有记录
    pub fn find_existing(&self, key: &IdealStockAmountKey) -> RepositoryResult<Option<IdealStockAmount>> {
        let conn = self.get_conn()?;
        let found = conn
            .query_row(
                r#"
                SELECT id, amount FROM ideal_stock_amounts
                WHERE facility_id = ?1 AND commodity_type_id = ?2 AND processing_period_id = ?3
                "#,
                params![key.facility_id, key.commodity_type_id, key.processing_period_id],
                |row| {
                    Ok(IdealStockAmount {
                        id: Some(row.get(0)?),
                        key: *key,
                        amount: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(found)
    }

    /// 单事务批量写入（按唯一键 upsert）
    pub fn save_all(&self, amounts: &[IdealStockAmount]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        let now = chrono::Utc::now().to_rfc3339();

        {
            let mut stmt = tx.prepare(
                r#"
                INSERT INTO ideal_stock_amounts (
                    facility_id, commodity_type_id, processing_period_id, amount, updated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT (facility_id, commodity_type_id, processing_period_id)
                DO UPDATE SET amount = excluded.amount, updated_at = excluded.updated_at
                "#,
            )?;
            for isa in amounts {
                stmt.execute(params![
                    isa.key.facility_id,
                    isa.key.commodity_type_id,
                    isa.key.processing_period_id,
                    isa.amount,
                    now,
                ])?;
            }
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        info!(count = amounts.len(), "理想库存量批量写入完成");
        Ok(amounts.len())
    }

    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count = conn.query_row("SELECT COUNT(*) FROM ideal_stock_amounts", [], |row| row.get(0))?;
        Ok(count)
    }

    /// 按编码查询理想库存量（不存在返回 None）
    pub fn find_amount(
        &self,
        facility_code: &str,
        schedule_code: &str,
        period_name: &str,
        classification_system: &str,
        classification_id: &str,
    ) -> RepositoryResult<Option<i64>> {
        let conn = self.get_conn()?;
        let amount = conn
            .query_row(
                r#"
                SELECT isa.amount
                FROM ideal_stock_amounts isa
                JOIN facilities f ON f.id = isa.facility_id
                JOIN processing_periods pp ON pp.id = isa.processing_period_id
                JOIN commodity_types ct ON ct.id = isa.commodity_type_id
                WHERE f.code = ?1 AND pp.schedule_code = ?2 AND pp.name = ?3
                  AND ct.classification_system = ?4 AND ct.classification_id = ?5
                "#,
                params![
                    facility_code,
                    schedule_code,
                    period_name,
                    classification_system,
                    classification_id
                ],
                |row| row.get(0),
            )
            .optional()?;
        Ok(amount)
    }

    /// 导出视图（按机构编码、排程、期间排序）
    pub fn find_all_rows(&self) -> RepositoryResult<Vec<IdealStockAmountRow>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT f.code, pp.schedule_code, pp.name,
                   ct.classification_system, ct.classification_id, isa.amount
            FROM ideal_stock_amounts isa
            JOIN facilities f ON f.id = isa.facility_id
            JOIN processing_periods pp ON pp.id = isa.processing_period_id
            JOIN commodity_types ct ON ct.id = isa.commodity_type_id
            ORDER BY f.code, pp.schedule_code, pp.name, ct.classification_system, ct.classification_id
            "#,
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(IdealStockAmountRow {
                    facility_code: row.get(0)?,
                    schedule_code: row.get(1)?,
                    period_name: row.get(2)?,
                    classification_system: row.get(3)?,
                    classification_id: row.get(4)?,
                    amount: row.get(5)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = rows.len(), "读取理想库存量导出视图");
        Ok(rows)
    }
}
