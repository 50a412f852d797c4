// ==========================================
// 参考数据服务 - 导出单元格处理器
// ==========================================
// 职责: 类型化取值 → 外部字符串
// ==========================================

use crate::domain::reference::{KEY_DISPENSING_UNIT, KEY_SIZE_CODE};
use crate::model::CellValue;
use crate::processor::error::{CellContext, CellConversionError};

/// 导出处理器
pub trait FormatProcessor: Send + Sync {
    fn format(&self, value: &CellValue, ctx: &CellContext) -> Result<String, CellConversionError>;
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

// ==========================================
// 透传（未注册类型标签的默认处理器）
// ==========================================
pub struct FormatPassthrough;

impl FormatProcessor for FormatPassthrough {
    fn format(&self, value: &CellValue, _ctx: &CellContext) -> Result<String, CellConversionError> {
        Ok(value.to_string())
    }
}

// ==========================================
// 按编码引用（机构/项目/产品/产品类别）
// ==========================================
pub struct FormatCodeReference {
    type_name: &'static str,
}

impl FormatCodeReference {
    pub fn new(type_name: &'static str) -> Self {
        Self { type_name }
    }
}

impl FormatProcessor for FormatCodeReference {
    fn format(&self, value: &CellValue, ctx: &CellContext) -> Result<String, CellConversionError> {
        match value {
            CellValue::Reference(reference) => non_blank(&reference.code)
                .map(str::to_string)
                .ok_or_else(|| {
                    ctx.error(value, format!("无法从 '{}' 获取{}编码", value, self.type_name))
                }),
            other => Err(ctx.error(
                other,
                format!("无法从 '{}' 获取{}编码", other, self.type_name),
            )),
        }
    }
}

// ==========================================
// 商品类型: 分类体系{sep}分类编号
// ==========================================
pub struct FormatCommodityType {
    separator: String,
}

impl FormatCommodityType {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

impl FormatProcessor for FormatCommodityType {
    fn format(&self, value: &CellValue, ctx: &CellContext) -> Result<String, CellConversionError> {
        if let CellValue::CommodityType(commodity) = value {
            if let (Some(system), Some(id)) = (
                non_blank(&commodity.classification_system),
                non_blank(&commodity.classification_id),
            ) {
                return Ok(format!("{}{}{}", system, self.separator, id));
            }
        }

        Err(ctx.error(
            value,
            format!("无法从 '{}' 获取分类体系与分类编号", value),
        ))
    }
}

// ==========================================
// 报告期: 排程编码{sep}期间名称
// ==========================================
pub struct FormatProcessingPeriod {
    separator: String,
}

impl FormatProcessingPeriod {
    pub fn new(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }
}

impl FormatProcessor for FormatProcessingPeriod {
    fn format(&self, value: &CellValue, ctx: &CellContext) -> Result<String, CellConversionError> {
        if let CellValue::ProcessingPeriod(period) = value {
            if let (Some(schedule), Some(name)) =
                (non_blank(&period.schedule_code), non_blank(&period.name))
            {
                return Ok(format!("{}{}{}", schedule, self.separator, name));
            }
        }

        Err(ctx.error(value, format!("无法从 '{}' 获取排程编码与期间名称", value)))
    }
}

// ==========================================
// 发放单位: dispensingUnit:X / sizeCode:X
// ==========================================
pub struct FormatDispensable;

pub const DISPENSABLE_ATTRIBUTE_SEPARATOR: char = ':';

impl FormatProcessor for FormatDispensable {
    fn format(&self, value: &CellValue, ctx: &CellContext) -> Result<String, CellConversionError> {
        if let CellValue::Dispensable(dispensable) = value {
            let (key, attribute) = dispensable.attribute();
            if !attribute.trim().is_empty() {
                return Ok(format!(
                    "{}{}{}",
                    key,
                    DISPENSABLE_ATTRIBUTE_SEPARATOR,
                    attribute.trim()
                ));
            }
        }

        Err(ctx.error(
            value,
            format!(
                "无法从 '{}' 获取 {} 或 {}",
                value, KEY_DISPENSING_UNIT, KEY_SIZE_CODE
            ),
        ))
    }
}

// ==========================================
// 金额: 按币种小数位输出
// ==========================================
pub struct FormatMoney;

impl FormatProcessor for FormatMoney {
    fn format(&self, value: &CellValue, ctx: &CellContext) -> Result<String, CellConversionError> {
        match value {
            CellValue::Money(money) => Ok(money.to_amount_string()),
            other => Err(ctx.error(other, "不是金额类型取值")),
        }
    }
}
