// ==========================================
// 参考数据服务 - 通知模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("用户查询失败: {0}")]
    UserSearch(String),

    #[error("邮件发送失败 (recipient={recipient}): {message}")]
    Delivery { recipient: Uuid, message: String },

    #[error("系统通知保存失败: {0}")]
    SystemNotification(String),

    #[error("通知分发器已关闭")]
    DispatcherClosed,
}
