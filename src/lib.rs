// ==========================================
// 参考数据服务 - CSV 导入导出核心库
// ==========================================
// 职责: 记录类型描述、单元格处理器、CSV 读写与错误翻译
// 技术栈: Rust + csv + SQLite
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 值对象与实体
pub mod domain;

// 记录模型描述层
pub mod model;

// 单元格处理器
pub mod processor;

// 对外错误类型
pub mod error;

// 导出层
pub mod exporter;

// 导入层
pub mod importer;

// CSV 记录模型
pub mod dto;

// 数据仓储层
pub mod repository;

// 隔离通知
pub mod notification;

// 配置层
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::{load_csv_settings, ConfigManager, CsvPreference, CsvSettings};
pub use domain::{Currency, Message, Money};
pub use dto::{FacilityCsvModel, IdealStockAmountCsvModel, OrderableCsvModel};
pub use error::{RowValidationError, ValidationError};
pub use exporter::{CsvBeanWriter, CsvFormatter};
pub use importer::{CsvBeanReader, CsvHeaderValidator, CsvParser, ImportError};
pub use model::{CsvRecord, FieldDescriptor, MappingError, ModelClass};
pub use processor::CellProcessorRegistry;

// ==========================================
// 版本信息
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "refdata-csv";
