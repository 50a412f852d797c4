// ==========================================
// 参考数据服务 - 可本地化消息
// ==========================================
// 职责: 错误/通知消息的键 + 参数载体
// 说明: 消息文本由 i18n 层按语言解析，本结构只负责携带数据
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 可本地化消息（消息键 + 命名参数）
///
/// 参数按插入顺序保存，解析时替换模板中的 `%{name}` 占位符。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub key: String,
    pub args: Vec<(String, String)>,
}

impl Message {
    /// 创建无参数消息
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            args: Vec::new(),
        }
    }

    /// 追加命名参数
    pub fn with_arg(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.args.push((name.into(), value.to_string()));
        self
    }

    /// 按名称读取参数值
    pub fn arg(&self, name: &str) -> Option<&str> {
        self.args
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// 参数切片（供 i18n::t_with_args 使用）
    pub fn args_as_pairs(&self) -> Vec<(&str, &str)> {
        self.args
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key)?;
        if !self.args.is_empty() {
            let joined: Vec<String> = self
                .args
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            write!(f, "({})", joined.join(", "))?;
        }
        Ok(())
    }
}

// ==========================================
// 消息键常量
// ==========================================
pub mod message_keys {
    // CSV 上传/下载
    pub const CSV_HEADER_MISSING: &str = "csv.header_missing";
    pub const CSV_HEADER_INVALID: &str = "csv.header_invalid";
    pub const CSV_MISSING_MANDATORY_COLUMNS: &str = "csv.missing_mandatory_columns";
    pub const CSV_RECORD_INVALID: &str = "csv.record_invalid";
    pub const CSV_COLUMN_COUNT_MISMATCH: &str = "csv.column_count_mismatch";
    pub const CSV_STREAM_FAILED: &str = "csv.stream_failed";

    // 理想库存量导入
    pub const ISA_FACILITY_NOT_FOUND: &str = "ideal_stock_amount.facility_not_found";
    pub const ISA_PROCESSING_PERIOD_NOT_FOUND: &str =
        "ideal_stock_amount.processing_period_not_found";
    pub const ISA_COMMODITY_TYPE_NOT_FOUND: &str = "ideal_stock_amount.commodity_type_not_found";

    // 隔离通知
    pub const LOT_QUARANTINED_EMAIL_TITLE: &str = "notification.lot_quarantined.email_title";
    pub const LOT_QUARANTINED_EMAIL_CONTENT: &str = "notification.lot_quarantined.email_content";
    pub const LOT_FREE_EMAIL_TITLE: &str = "notification.lot_free.email_title";
    pub const LOT_FREE_EMAIL_CONTENT: &str = "notification.lot_free.email_content";
    pub const ORDERABLE_QUARANTINED_EMAIL_TITLE: &str =
        "notification.orderable_quarantined.email_title";
    pub const ORDERABLE_QUARANTINED_EMAIL_CONTENT: &str =
        "notification.orderable_quarantined.email_content";
    pub const ORDERABLE_FREE_EMAIL_TITLE: &str = "notification.orderable_free.email_title";
    pub const ORDERABLE_FREE_EMAIL_CONTENT: &str = "notification.orderable_free.email_content";

    // 隔离系统通知（站内公告）
    pub const LOT_QUARANTINED_SYSTEM_TITLE: &str = "notification.lot_quarantined.system_title";
    pub const LOT_QUARANTINED_SYSTEM_MESSAGE: &str = "notification.lot_quarantined.system_message";
    pub const LOT_FREE_SYSTEM_TITLE: &str = "notification.lot_free.system_title";
    pub const LOT_FREE_SYSTEM_MESSAGE: &str = "notification.lot_free.system_message";
    pub const ORDERABLE_QUARANTINED_SYSTEM_TITLE: &str =
        "notification.orderable_quarantined.system_title";
    pub const ORDERABLE_QUARANTINED_SYSTEM_MESSAGE: &str =
        "notification.orderable_quarantined.system_message";
    pub const ORDERABLE_FREE_SYSTEM_TITLE: &str = "notification.orderable_free.system_title";
    pub const ORDERABLE_FREE_SYSTEM_MESSAGE: &str = "notification.orderable_free.system_message";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_args_keep_insertion_order() {
        let msg = Message::new("csv.record_invalid")
            .with_arg("row", 3)
            .with_arg("column", "Code");

        assert_eq!(msg.arg("row"), Some("3"));
        assert_eq!(msg.arg("column"), Some("Code"));
        assert_eq!(msg.arg("missing"), None);
        assert_eq!(msg.to_string(), "csv.record_invalid(row=3, column=Code)");
    }

    #[test]
    fn test_message_serializes_to_json() {
        let msg = Message::new("csv.header_missing").with_arg("column", 2);
        let json = serde_json::to_string(&msg).unwrap();
        let back: Message = serde_json::from_str(&json).unwrap();
        assert_eq!(back, msg);
    }
}
