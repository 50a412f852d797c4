// ==========================================
// 参考数据服务 - CSV 导出层
// ==========================================

pub mod formatter;
pub mod writer;

pub use formatter::CsvFormatter;
pub use writer::{encode_cell, CsvBeanWriter};
