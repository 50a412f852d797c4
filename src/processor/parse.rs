// ==========================================
// 参考数据服务 - 导入单元格处理器
// ==========================================
// 职责: 外部字符串 → 类型化取值（含格式校验）
// 前置: 空白单元格已由注册表按必填/可选处理，这里只接收非空文本
// ==========================================

use crate::domain::reference::{KEY_DISPENSING_UNIT, KEY_SIZE_CODE};
use crate::domain::{CodeRef, CommodityTypeRef, Currency, Dispensable, Money, ProcessingPeriodRef};
use crate::model::CellValue;
use crate::processor::error::{CellContext, CellConversionError};
use crate::processor::format::DISPENSABLE_ATTRIBUTE_SEPARATOR;
use chrono::NaiveDate;

/// 导入处理器
pub trait ParseProcessor: Send + Sync {
    fn parse(&self, raw: &str, ctx: &CellContext) -> Result<CellValue, CellConversionError>;
}

/// 按分隔符拆成恰好两段非空文本
fn split_pair<'a>(raw: &'a str, separator: &str) -> Option<(&'a str, &'a str)> {
    let parts: Vec<&str> = raw.split(separator).map(str::trim).collect();
    match parts.as_slice() {
        [first, second] if !first.is_empty() && !second.is_empty() => Some((first, second)),
        _ => None,
    }
}

// ==========================================
// 透传（原样文本，保留引号内的首尾空白）
// ==========================================
pub struct ParsePassthrough;

impl ParseProcessor for ParsePassthrough {
    fn parse(&self, raw: &str, _ctx: &CellContext) -> Result<CellValue, CellConversionError> {
        Ok(CellValue::Text(raw.to_string()))
    }
}

// ==========================================
// 按编码引用
// ==========================================
pub struct ParseCodeReference;

impl ParseProcessor for ParseCodeReference {
    fn parse(&self, raw: &str, _ctx: &CellContext) -> Result<CellValue, CellConversionError> {
        Ok(CellValue::Reference(CodeRef::new(raw.trim())))
    }
}

// ==========================================
// 商品类型
// ==========================================
pub struct ParseCommodityType {
    separator: String,
}

impl ParseCommodityType {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

impl ParseProcessor for ParseCommodityType {
    fn parse(&self, raw: &str, ctx: &CellContext) -> Result<CellValue, CellConversionError> {
        let (system, id) = split_pair(raw, &self.separator).ok_or_else(|| {
            ctx.error(
                raw,
                format!("商品类型格式应为 '分类体系{}分类编号'", self.separator),
            )
        })?;
        Ok(CellValue::CommodityType(CommodityTypeRef::new(system, id)))
    }
}

// ==========================================
// 报告期
// ==========================================
pub struct ParseProcessingPeriod {
    separator: String,
}

impl ParseProcessingPeriod {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

impl ParseProcessor for ParseProcessingPeriod {
    fn parse(&self, raw: &str, ctx: &CellContext) -> Result<CellValue, CellConversionError> {
        let (schedule, name) = split_pair(raw, &self.separator).ok_or_else(|| {
            ctx.error(
                raw,
                format!("报告期格式应为 '排程编码{}期间名称'", self.separator),
            )
        })?;
        Ok(CellValue::ProcessingPeriod(ProcessingPeriodRef::new(
            schedule, name,
        )))
    }
}

// ==========================================
// 非负整数（int / long）
// ==========================================
pub struct ParsePositiveInteger {
    max: i64,
}

impl ParsePositiveInteger {
    pub fn int() -> Self {
        Self {
            max: i64::from(i32::MAX),
        }
    }

    pub fn long() -> Self {
        Self { max: i64::MAX }
    }
}

impl ParseProcessor for ParsePositiveInteger {
    fn parse(&self, raw: &str, ctx: &CellContext) -> Result<CellValue, CellConversionError> {
        let value = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| ctx.error(raw, "无法解析为整数"))?;

        if value < 0 {
            return Err(ctx.error(raw, "取值不能为负数"));
        }
        if value > self.max {
            return Err(ctx.error(raw, format!("取值超出上限 {}", self.max)));
        }

        Ok(CellValue::Integer(value))
    }
}

// ==========================================
// 编码（字母数字及 - _ .）
// ==========================================
pub struct ParseCode;

impl ParseProcessor for ParseCode {
    fn parse(&self, raw: &str, ctx: &CellContext) -> Result<CellValue, CellConversionError> {
        let code = raw.trim();
        let valid = code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
        if !valid {
            return Err(ctx.error(raw, "编码只能包含字母、数字及 - _ ."));
        }
        Ok(CellValue::Text(code.to_string()))
    }
}

// ==========================================
// 布尔
// ==========================================
pub struct ParseBoolean;

impl ParseProcessor for ParseBoolean {
    fn parse(&self, raw: &str, ctx: &CellContext) -> Result<CellValue, CellConversionError> {
        match raw.trim().to_lowercase().as_str() {
            "true" | "yes" | "y" | "t" | "1" => Ok(CellValue::Boolean(true)),
            "false" | "no" | "n" | "f" | "0" => Ok(CellValue::Boolean(false)),
            _ => Err(ctx.error(raw, "无法解析为布尔值")),
        }
    }
}

// ==========================================
// 发放单位
// ==========================================
pub struct ParseDispensable;

impl ParseProcessor for ParseDispensable {
    fn parse(&self, raw: &str, ctx: &CellContext) -> Result<CellValue, CellConversionError> {
        let invalid = || {
            ctx.error(
                raw,
                format!(
                    "发放单位格式应为 '{}{sep}X' 或 '{}{sep}X'",
                    KEY_DISPENSING_UNIT,
                    KEY_SIZE_CODE,
                    sep = DISPENSABLE_ATTRIBUTE_SEPARATOR
                ),
            )
        };

        let (key, value) = raw
            .trim()
            .split_once(DISPENSABLE_ATTRIBUTE_SEPARATOR)
            .ok_or_else(invalid)?;
        let value = value.trim();
        if value.is_empty() {
            return Err(invalid());
        }

        let dispensable = match key.trim() {
            KEY_DISPENSING_UNIT => Dispensable::Default {
                dispensing_unit: value.to_string(),
            },
            KEY_SIZE_CODE => Dispensable::Container {
                size_code: value.to_string(),
            },
            _ => return Err(invalid()),
        };
        Ok(CellValue::Dispensable(dispensable))
    }
}

// ==========================================
// 金额
// ==========================================
pub struct ParseMoney {
    currency: Currency,
}

impl ParseMoney {
    pub fn new(currency: Currency) -> Self {
        Self { currency }
    }
}

impl ParseProcessor for ParseMoney {
    fn parse(&self, raw: &str, ctx: &CellContext) -> Result<CellValue, CellConversionError> {
        Money::parse(raw, &self.currency)
            .map(CellValue::Money)
            .map_err(|e| ctx.error(raw, e.to_string()))
    }
}

// ==========================================
// 日期（YYYY-MM-DD）
// ==========================================
pub struct ParseLocalDate;

impl ParseProcessor for ParseLocalDate {
    fn parse(&self, raw: &str, ctx: &CellContext) -> Result<CellValue, CellConversionError> {
        NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map(CellValue::Date)
            .map_err(|_| ctx.error(raw, "日期格式错误，期望 YYYY-MM-DD"))
    }
}
