// ==========================================
// 参考数据服务 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::error::ValidationError;
use crate::repository::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    /// 表头/数据行校验失败，或引用的主数据不存在
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("导入落库失败: {0}")]
    Repository(#[from] RepositoryError),
}

impl ImportError {
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            ImportError::Validation(e) => Some(e),
            ImportError::Repository(_) => None,
        }
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
