// ==========================================
// 参考数据服务 - 单元格处理错误
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 单元格位置上下文（由读写器提供）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellContext {
    /// 物理行号（表头为第 1 行）
    pub line_number: usize,
    /// 列号（从 1 开始）
    pub column_number: usize,
    /// 外部列名
    pub column_name: String,
}

impl CellContext {
    pub fn new(line_number: usize, column_number: usize, column_name: impl Into<String>) -> Self {
        Self {
            line_number,
            column_number,
            column_name: column_name.into(),
        }
    }

    /// 构造本单元格的转换错误
    pub fn error(&self, value: impl ToString, reason: impl Into<String>) -> CellConversionError {
        CellConversionError {
            column: self.column_name.clone(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// 单个取值的类型/格式转换失败
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("列 '{column}' 的取值 '{value}' 转换失败: {reason}")]
pub struct CellConversionError {
    pub column: String,
    pub value: String,
    pub reason: String,
}
