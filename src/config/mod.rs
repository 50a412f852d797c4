// ==========================================
// 参考数据服务 - 配置层
// ==========================================
// 职责: CSV 管道与通知模块的配置读取
// 存储: config_kv 表
// ==========================================

pub mod config_manager;
pub mod csv_config_trait;
pub mod settings;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager};
pub use csv_config_trait::CsvConfigReader;
pub use settings::{load_csv_settings, CsvPreference, CsvSettings};
