// ==========================================
// 参考数据服务 - 记录模型描述层
// ==========================================
// 职责: 字段描述、记录类型描述、记录读写契约
// ==========================================

pub mod error;
pub mod field;
pub mod model_class;
pub mod record;

pub use error::MappingError;
pub use field::{FieldDescriptor, FieldPath, FieldSpec};
pub use model_class::ModelClass;
pub use record::{unknown_path, CellValue, CsvRecord};
