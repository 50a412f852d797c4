// ==========================================
// 参考数据服务 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供数据访问接口，屏蔽数据库细节
// 约束: 所有查询使用参数化
// ==========================================

pub mod error;
pub mod ideal_stock_amount_repo;
pub mod system_notification_repo;

pub use error::{RepositoryError, RepositoryResult};
pub use ideal_stock_amount_repo::{IdealStockAmountRepository, IdealStockAmountRow};
pub use system_notification_repo::SqliteSystemNotificationRepository;
