// ==========================================
// 参考数据服务 - 记录类型契约
// ==========================================
// 职责: 定义可导入/导出记录的字段表与按路径读写接口
// 说明: 以手写字段表代替运行时反射
// ==========================================

use crate::domain::{CodeRef, CommodityTypeRef, Dispensable, Money, ProcessingPeriodRef};
use crate::model::field::{FieldPath, FieldSpec};
use chrono::NaiveDate;
use std::fmt;

// ==========================================
// CellValue - 单元格的类型化取值
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Boolean(bool),
    Date(NaiveDate),
    Money(Money),
    Reference(CodeRef),
    CommodityType(CommodityTypeRef),
    ProcessingPeriod(ProcessingPeriodRef),
    Dispensable(Dispensable),
}

impl CellValue {
    /// 取值类型名（用于错误信息）
    pub fn kind(&self) -> &'static str {
        match self {
            CellValue::Text(_) => "Text",
            CellValue::Integer(_) => "Integer",
            CellValue::Boolean(_) => "Boolean",
            CellValue::Date(_) => "Date",
            CellValue::Money(_) => "Money",
            CellValue::Reference(_) => "Reference",
            CellValue::CommodityType(_) => "CommodityType",
            CellValue::ProcessingPeriod(_) => "ProcessingPeriod",
            CellValue::Dispensable(_) => "Dispensable",
        }
    }

    pub fn into_text(self) -> Result<String, String> {
        match self {
            CellValue::Text(v) => Ok(v),
            other => Err(unexpected("Text", &other)),
        }
    }

    pub fn into_integer(self) -> Result<i64, String> {
        match self {
            CellValue::Integer(v) => Ok(v),
            other => Err(unexpected("Integer", &other)),
        }
    }

    pub fn into_boolean(self) -> Result<bool, String> {
        match self {
            CellValue::Boolean(v) => Ok(v),
            other => Err(unexpected("Boolean", &other)),
        }
    }

    pub fn into_date(self) -> Result<NaiveDate, String> {
        match self {
            CellValue::Date(v) => Ok(v),
            other => Err(unexpected("Date", &other)),
        }
    }

    pub fn into_money(self) -> Result<Money, String> {
        match self {
            CellValue::Money(v) => Ok(v),
            other => Err(unexpected("Money", &other)),
        }
    }

    pub fn into_reference(self) -> Result<CodeRef, String> {
        match self {
            CellValue::Reference(v) => Ok(v),
            other => Err(unexpected("Reference", &other)),
        }
    }

    pub fn into_commodity_type(self) -> Result<CommodityTypeRef, String> {
        match self {
            CellValue::CommodityType(v) => Ok(v),
            other => Err(unexpected("CommodityType", &other)),
        }
    }

    pub fn into_processing_period(self) -> Result<ProcessingPeriodRef, String> {
        match self {
            CellValue::ProcessingPeriod(v) => Ok(v),
            other => Err(unexpected("ProcessingPeriod", &other)),
        }
    }

    pub fn into_dispensable(self) -> Result<Dispensable, String> {
        match self {
            CellValue::Dispensable(v) => Ok(v),
            other => Err(unexpected("Dispensable", &other)),
        }
    }
}

fn unexpected(expected: &str, actual: &CellValue) -> String {
    format!("期望 {} 类型取值，实际为 {}", expected, actual.kind())
}

/// 纯文本形式（透传处理器的导出结果）
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(v) => write!(f, "{}", v),
            CellValue::Integer(v) => write!(f, "{}", v),
            CellValue::Boolean(v) => write!(f, "{}", v),
            CellValue::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
            CellValue::Money(v) => write!(f, "{}", v.to_amount_string()),
            CellValue::Reference(v) => write!(f, "{}", v),
            CellValue::CommodityType(v) => write!(f, "{}", v),
            CellValue::ProcessingPeriod(v) => write!(f, "{}", v),
            CellValue::Dispensable(v) => write!(f, "{}", v),
        }
    }
}

// ==========================================
// CsvRecord Trait
// ==========================================
// 实现者: dto 模块中的各 CSV 模型
pub trait CsvRecord: Default {
    /// 字段表（声明顺序即列顺序）
    fn field_table() -> &'static [FieldSpec];

    /// 按路径读取字段值（None 表示空值）
    fn read_field(&self, path: &FieldPath) -> Option<CellValue>;

    /// 按路径写入字段值
    ///
    /// # 返回
    /// - Err(String): 路径未知或取值类型不匹配
    fn write_field(&mut self, path: &FieldPath, value: CellValue) -> Result<(), String>;
}

/// 未知路径的统一错误文本
pub fn unknown_path(path: &FieldPath) -> String {
    format!("未知字段路径: {}", path)
}
