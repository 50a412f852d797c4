// ==========================================
// 参考数据服务 - 单元格处理器层
// ==========================================
// 职责: 类型标签 → 导入/导出处理器
// 说明: 注册表构造后只读，可跨线程共享
// ==========================================

pub mod error;
pub mod format;
pub mod parse;
pub mod registry;

pub use error::{CellContext, CellConversionError};
pub use format::FormatProcessor;
pub use parse::ParseProcessor;
pub use registry::CellProcessorRegistry;

// ==========================================
// 内置类型标签
// ==========================================
pub mod type_tags {
    pub const FACILITY: &str = "Facility";
    pub const COMMODITY_TYPE: &str = "CommodityType";
    pub const PROCESSING_PERIOD: &str = "ProcessingPeriod";
    pub const DISPENSABLE: &str = "Dispensable";
    pub const PROGRAM: &str = "Program";
    pub const ORDERABLE: &str = "Orderable";
    pub const ORDERABLE_DISPLAY_CATEGORY: &str = "OrderableDisplayCategory";
    pub const MONEY: &str = "Money";
    pub const CODE: &str = "Code";
    pub const BOOLEAN: &str = "Boolean";
    pub const POSITIVE_INT: &str = "int";
    pub const POSITIVE_LONG: &str = "long";
    pub const LOCAL_DATE: &str = "LocalDate";
    /// 未注册，走透传
    pub const STRING: &str = "String";
}
