// ==========================================
// 参考数据服务 - 理想库存量实体
// ==========================================
// 职责: 机构 × 商品类型 × 报告期 → 理想库存量
// 说明: 引用字段为已解析的数据库主键
// ==========================================

use serde::{Deserialize, Serialize};

/// 理想库存量唯一键
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdealStockAmountKey {
    pub facility_id: i64,
    pub commodity_type_id: i64,
    pub processing_period_id: i64,
}

/// 理想库存量
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdealStockAmount {
    /// 数据库主键（新建时为 None）
    pub id: Option<i64>,
    pub key: IdealStockAmountKey,
    pub amount: i64,
}

impl IdealStockAmount {
    pub fn new(key: IdealStockAmountKey, amount: i64) -> Self {
        Self {
            id: None,
            key,
            amount,
        }
    }

    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}
