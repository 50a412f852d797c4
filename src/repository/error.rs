// ==========================================
// 参考数据服务 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 映射: rusqlite 约束失败按 UNIQUE / FOREIGN KEY 细分，其余归为查询失败
// ==========================================

use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库事务失败: {0}")]
    DatabaseTransactionError(String),

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    /// 参考数据编码或理想库存量唯一键重复
    #[error("唯一约束违反: {0}")]
    UniqueConstraintViolation(String),

    #[error("外键约束违反: {0}")]
    ForeignKeyViolation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(failure, detail)
                if failure.code == ErrorCode::ConstraintViolation =>
            {
                let text = detail.clone().unwrap_or_else(|| err.to_string());
                if text.contains("UNIQUE") {
                    RepositoryError::UniqueConstraintViolation(text)
                } else if text.contains("FOREIGN KEY") {
                    RepositoryError::ForeignKeyViolation(text)
                } else {
                    RepositoryError::DatabaseQueryError(text)
                }
            }
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn test_constraint_failures_are_classified() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             CREATE TABLE parent (id INTEGER PRIMARY KEY, code TEXT UNIQUE);
             CREATE TABLE child (parent_id INTEGER REFERENCES parent(id));
             INSERT INTO parent (id, code) VALUES (1, 'HC01');",
        )
        .unwrap();

        let dup = conn
            .execute("INSERT INTO parent (id, code) VALUES (2, 'HC01')", [])
            .unwrap_err();
        assert!(matches!(
            RepositoryError::from(dup),
            RepositoryError::UniqueConstraintViolation(_)
        ));

        let orphan = conn
            .execute("INSERT INTO child (parent_id) VALUES (99)", [])
            .unwrap_err();
        assert!(matches!(
            RepositoryError::from(orphan),
            RepositoryError::ForeignKeyViolation(_)
        ));
    }

    #[test]
    fn test_other_failures_become_query_errors() {
        let conn = Connection::open_in_memory().unwrap();
        let err = conn.execute("SELECT * FROM missing_table", []).unwrap_err();
        assert!(matches!(
            RepositoryError::from(err),
            RepositoryError::DatabaseQueryError(_)
        ));
    }
}
