// ==========================================
// 参考数据服务 - 领域模型层
// ==========================================
// 职责: 值对象（金额、引用、消息）与导入落库实体
// 红线: 不含数据访问逻辑，不含 CSV 编解码逻辑
// ==========================================

pub mod ideal_stock_amount;
pub mod message;
pub mod money;
pub mod reference;

// 重导出核心类型
pub use ideal_stock_amount::{IdealStockAmount, IdealStockAmountKey};
pub use message::{message_keys, Message};
pub use money::{Currency, Money, MoneyError};
pub use reference::{CodeRef, CommodityTypeRef, Dispensable, ProcessingPeriodRef};
