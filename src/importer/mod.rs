// ==========================================
// 参考数据服务 - CSV 导入层
// ==========================================
// 流程: 表头校验 → 逐行转换 → 分块处理 → 落库
// ==========================================

pub mod error;
pub mod header_validator;
pub mod ideal_stock_amount_handler;
pub mod parser;
pub mod reader;
pub mod record_handler;

pub use error::{ImportError, ImportResult};
pub use header_validator::CsvHeaderValidator;
pub use ideal_stock_amount_handler::{IdealStockAmountProcessor, IdealStockAmountWriter};
pub use parser::CsvParser;
pub use reader::CsvBeanReader;
pub use record_handler::{RecordProcessor, RecordWriter};
