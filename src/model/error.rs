// ==========================================
// 参考数据服务 - 模型描述错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 字段描述/表头映射错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MappingError {
    #[error("表头 '{header}' 无法映射到任何字段")]
    UnknownHeader { header: String },

    #[error("外部列名重复: '{name}'")]
    DuplicateExternalName { name: String },

    #[error("字段路径非法: '{path}'（最多支持一级嵌套）")]
    InvalidPath { path: String },
}
