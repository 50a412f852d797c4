// ==========================================
// 参考数据服务 - 系统通知仓储
// ==========================================
// 表: system_notifications
// 约束: 所有查询使用参数化；UUID 以文本存储
// ==========================================

use crate::notification::{NotificationError, SystemNotification, SystemNotificationRepository};
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;
use uuid::Uuid;

pub struct SqliteSystemNotificationRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteSystemNotificationRepository {
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
            CREATE TABLE IF NOT EXISTS system_notifications (
                id TEXT PRIMARY KEY,
                author_id TEXT,
                title TEXT NOT NULL,
                message TEXT NOT NULL,
                start_date TEXT NOT NULL,
                expiry_date TEXT,
                created_date TEXT NOT NULL,
                active INTEGER NOT NULL DEFAULT 1
            );
            "#,
        )?;
        Ok(())
    }

    pub fn insert(&self, notification: &SystemNotification) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            r#"
            INSERT INTO system_notifications
                (id, author_id, title, message, start_date, expiry_date, created_date, active)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                notification.id.to_string(),
                notification.author_id.map(|id| id.to_string()),
                notification.title,
                notification.message,
                notification.start_date,
                notification.expiry_date,
                notification.created_date,
                notification.active,
            ],
        )?;
        debug!(id = %notification.id, "系统通知写入完成");
        Ok(())
    }

    /// 全部系统通知（按创建时间倒序）
    pub fn find_all(&self) -> RepositoryResult<Vec<SystemNotification>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, author_id, title, message, start_date, expiry_date, created_date, active
            FROM system_notifications
            ORDER BY created_date DESC
            "#,
        )?;
        let notifications = stmt
            .query_map([], map_notification)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(notifications)
    }
}

fn parse_uuid(idx: usize, text: &str) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(text)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn map_notification(row: &Row<'_>) -> rusqlite::Result<SystemNotification> {
    let id: String = row.get(0)?;
    let author_id: Option<String> = row.get(1)?;
    Ok(SystemNotification {
        id: parse_uuid(0, &id)?,
        author_id: author_id.as_deref().map(|a| parse_uuid(1, a)).transpose()?,
        title: row.get(2)?,
        message: row.get(3)?,
        start_date: row.get(4)?,
        expiry_date: row.get(5)?,
        created_date: row.get(6)?,
        active: row.get(7)?,
    })
}

#[async_trait]
impl SystemNotificationRepository for SqliteSystemNotificationRepository {
    async fn save(&self, notification: &SystemNotification) -> Result<(), NotificationError> {
        self.insert(notification)
            .map_err(|e| NotificationError::SystemNotification(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn repo() -> SqliteSystemNotificationRepository {
        SqliteSystemNotificationRepository::new(":memory:").unwrap()
    }

    fn notification(title: &str) -> SystemNotification {
        let now = Utc::now();
        SystemNotification {
            id: Uuid::new_v4(),
            author_id: Some(Uuid::new_v4()),
            title: title.to_string(),
            message: "Lot LOT-1 of Abacavir has been quarantined.".to_string(),
            start_date: now,
            expiry_date: Some(now + Duration::days(7)),
            created_date: now,
            active: true,
        }
    }

    #[tokio::test]
    async fn test_save_and_read_back() {
        let repo = repo();
        let saved = notification("Lot quarantined");

        repo.save(&saved).await.unwrap();

        let all = repo.find_all().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, saved.id);
        assert_eq!(all[0].author_id, saved.author_id);
        assert_eq!(all[0].title, "Lot quarantined");
        assert_eq!(all[0].expiry_date, saved.expiry_date);
        assert!(all[0].active);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_reported() {
        let repo = repo();
        let saved = notification("Lot quarantined");
        repo.save(&saved).await.unwrap();

        let err = repo.save(&saved).await.unwrap_err();
        assert!(matches!(err, NotificationError::SystemNotification(_)));
    }
}
