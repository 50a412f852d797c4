// ==========================================
// 参考数据服务 - 引用型值对象
// ==========================================
// 职责: CSV 中以"编码"形式出现的关联对象
// 说明: 只保留导入导出所需的标识字段，不含完整主数据
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// CodeRef - 按编码引用（机构/项目/产品/类别/机构类型/地理区域）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeRef {
    pub code: Option<String>,
}

impl CodeRef {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
        }
    }
}

impl fmt::Display for CodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "CodeRef(code={})", self.code.as_deref().unwrap_or("null"))
    }
}

// ==========================================
// CommodityTypeRef - 商品类型（分类体系 + 分类编号）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommodityTypeRef {
    pub classification_system: Option<String>,
    pub classification_id: Option<String>,
}

impl CommodityTypeRef {
    pub fn new(system: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            classification_system: Some(system.into()),
            classification_id: Some(id.into()),
        }
    }
}

impl fmt::Display for CommodityTypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CommodityType(classificationSystem={}, classificationId={})",
            self.classification_system.as_deref().unwrap_or("null"),
            self.classification_id.as_deref().unwrap_or("null")
        )
    }
}

// ==========================================
// ProcessingPeriodRef - 报告期（排程编码 + 期间名称）
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingPeriodRef {
    pub name: Option<String>,
    pub schedule_code: Option<String>,
}

impl ProcessingPeriodRef {
    pub fn new(schedule_code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            schedule_code: Some(schedule_code.into()),
        }
    }
}

impl fmt::Display for ProcessingPeriodRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProcessingPeriod(schedule={}, name={})",
            self.schedule_code.as_deref().unwrap_or("null"),
            self.name.as_deref().unwrap_or("null")
        )
    }
}

// ==========================================
// Dispensable - 发放单位
// ==========================================
pub const KEY_DISPENSING_UNIT: &str = "dispensingUnit";
pub const KEY_SIZE_CODE: &str = "sizeCode";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Dispensable {
    /// 按发放单位（如 EACH）
    Default { dispensing_unit: String },
    /// 按容器规格
    Container { size_code: String },
    /// 疫苗（按规格编码）
    Vaccine { size_code: String },
}

impl Dispensable {
    /// 导出用的属性键与属性值
    pub fn attribute(&self) -> (&'static str, &str) {
        match self {
            Dispensable::Default { dispensing_unit } => (KEY_DISPENSING_UNIT, dispensing_unit),
            Dispensable::Container { size_code } | Dispensable::Vaccine { size_code } => {
                (KEY_SIZE_CODE, size_code)
            }
        }
    }
}

impl fmt::Display for Dispensable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (key, value) = self.attribute();
        write!(f, "Dispensable({}={})", key, value)
    }
}
