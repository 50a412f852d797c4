// ==========================================
// 参考数据服务 - 通知外部依赖 Trait
// ==========================================
// 实现者: 用户服务客户端、邮件通知服务客户端、系统通知仓储（测试中为内存桩）
// ==========================================

use crate::notification::error::NotificationError;
use crate::notification::model::{Email, Page, PageRequest, SystemNotification, User};
use async_trait::async_trait;

#[async_trait]
pub trait UserService: Send + Sync {
    /// 分页查询活跃用户
    async fn search_active_users(&self, request: PageRequest) -> Result<Page<User>, NotificationError>;
}

#[async_trait]
pub trait NotificationService: Send + Sync {
    async fn send_email(&self, email: &Email) -> Result<(), NotificationError>;
}

#[async_trait]
pub trait SystemNotificationRepository: Send + Sync {
    async fn save(&self, notification: &SystemNotification) -> Result<(), NotificationError>;
}
