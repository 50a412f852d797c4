// ==========================================
// 参考数据服务 - CSV 管道错误类型
// ==========================================
// 分层:
// - CellConversionError: 单个取值转换失败（processor 层）
// - RowValidationError: 附带物理行号与列名（读写器层）
// - ValidationError: 对外唯一错误，携带可本地化消息
// ==========================================

use crate::domain::{message_keys, Message};
use crate::i18n::{I18nMessageResolver, MessageResolver};
use crate::model::MappingError;
use crate::processor::CellConversionError;
use std::error::Error as StdError;
use thiserror::Error;

/// 表头占用的物理行数（数据行号 = 物理行号 - 1）
pub const HEADER_ROW_OFFSET: usize = 1;

/// 行级校验失败
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("第 {line_number} 行（物理行）列 '{column_name}' 校验失败: {cause}")]
pub struct RowValidationError {
    /// 物理行号（表头为第 1 行）
    pub line_number: usize,
    pub column_name: String,
    #[source]
    pub cause: CellConversionError,
}

impl RowValidationError {
    /// 从 1 开始的数据行号
    pub fn data_row_number(&self) -> usize {
        self.line_number.saturating_sub(HEADER_ROW_OFFSET)
    }
}

/// 读写器内部错误
#[derive(Error, Debug)]
pub enum CsvStreamError {
    #[error(transparent)]
    Row(#[from] RowValidationError),

    #[error("第 {line_number} 行（物理行）列数不符: 期望 {expected}，实际 {found}")]
    ColumnCount {
        line_number: usize,
        expected: usize,
        found: usize,
    },

    #[error(transparent)]
    Mapping(#[from] MappingError),

    #[error("CSV 读写失败: {0}")]
    Csv(#[from] csv::Error),

    #[error("输出流写入失败: {0}")]
    Io(#[from] std::io::Error),
}

/// 对外校验错误
///
/// `Display` 按当前语言解析消息；需要指定语言时用 [`ValidationError::localized`]。
#[derive(Error, Debug)]
#[error("{}", I18nMessageResolver.resolve(.message, None))]
pub struct ValidationError {
    message: Message,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl ValidationError {
    pub fn new(message: Message) -> Self {
        Self {
            message,
            source: None,
        }
    }

    pub fn with_source(message: Message, source: impl StdError + Send + Sync + 'static) -> Self {
        Self {
            message,
            source: Some(Box::new(source)),
        }
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    pub fn key(&self) -> &str {
        &self.message.key
    }

    /// 行级错误的数据行号（从 1 开始）
    pub fn row_number(&self) -> Option<usize> {
        self.message.arg("row").and_then(|v| v.parse().ok())
    }

    /// 按指定语言解析消息
    pub fn localized(&self, locale: &str) -> String {
        I18nMessageResolver.resolve(&self.message, Some(locale))
    }

    /// 行级错误 → csv.record_invalid {row, column, cause}
    pub fn from_row(err: RowValidationError) -> Self {
        let message = Message::new(message_keys::CSV_RECORD_INVALID)
            .with_arg("row", err.data_row_number())
            .with_arg("column", &err.column_name)
            .with_arg("cause", &err.cause);
        Self::with_source(message, err)
    }

    /// 读写器错误统一翻译
    pub fn from_stream(err: CsvStreamError) -> Self {
        match err {
            CsvStreamError::Row(row) => Self::from_row(row),
            CsvStreamError::ColumnCount {
                line_number,
                expected,
                found,
            } => Self::new(
                Message::new(message_keys::CSV_COLUMN_COUNT_MISMATCH)
                    .with_arg("row", line_number.saturating_sub(HEADER_ROW_OFFSET))
                    .with_arg("expected", expected)
                    .with_arg("found", found),
            ),
            CsvStreamError::Mapping(MappingError::UnknownHeader { header }) => Self::new(
                Message::new(message_keys::CSV_HEADER_INVALID)
                    .with_arg("headers", format!("[{}]", header)),
            ),
            other => {
                let message =
                    Message::new(message_keys::CSV_STREAM_FAILED).with_arg("cause", &other);
                Self::with_source(message, other)
            }
        }
    }
}

impl From<CsvStreamError> for ValidationError {
    fn from(err: CsvStreamError) -> Self {
        Self::from_stream(err)
    }
}

impl From<RowValidationError> for ValidationError {
    fn from(err: RowValidationError) -> Self {
        Self::from_row(err)
    }
}
