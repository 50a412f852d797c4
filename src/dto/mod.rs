// ==========================================
// 参考数据服务 - CSV 记录模型
// ==========================================
// 职责: 各记录类型的字段表与按路径读写
// ==========================================

pub mod facility;
pub mod ideal_stock_amount;
pub mod orderable;

pub use facility::FacilityCsvModel;
pub use ideal_stock_amount::IdealStockAmountCsvModel;
pub use orderable::OrderableCsvModel;

/// CLI 可用的记录类型名称
pub const RECORD_TYPE_NAMES: &[&str] = &["ideal-stock-amount", "facility", "orderable"];
