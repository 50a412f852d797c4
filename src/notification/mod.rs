// ==========================================
// 参考数据服务 - 隔离通知模块
// ==========================================
// 说明: 唯一的异步部分；CSV 管道不依赖本模块
// ==========================================

pub mod dispatcher;
pub mod email_builder;
pub mod error;
pub mod model;
pub mod notifier;
pub mod service;
pub mod system_notification_builder;

pub use dispatcher::{DispatchHandle, DispatchStats, NotificationDispatcher};
pub use email_builder::QuarantineEmailBuilder;
pub use error::NotificationError;
pub use model::{Email, Page, PageRequest, QuarantineSubject, SystemNotification, User};
pub use notifier::{QuarantinedNotifier, USER_BATCH_SIZE};
pub use service::{NotificationService, SystemNotificationRepository, UserService};
pub use system_notification_builder::QuarantineSystemNotificationBuilder;
