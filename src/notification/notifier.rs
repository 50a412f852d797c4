// ==========================================
// 参考数据服务 - 隔离通知
// ==========================================
// 职责: 批次/产品隔离状态变化时，通知全部活跃用户
// 流程: 保存系统通知 → 分页查询活跃用户 → 逐个生成邮件 → 提交分发器
// ==========================================

use crate::config::CsvSettings;
use crate::notification::dispatcher::DispatchHandle;
use crate::notification::email_builder::QuarantineEmailBuilder;
use crate::notification::error::NotificationError;
use crate::notification::model::{PageRequest, QuarantineSubject};
use crate::notification::service::{SystemNotificationRepository, UserService};
use crate::notification::system_notification_builder::QuarantineSystemNotificationBuilder;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// 每页处理的用户数
pub const USER_BATCH_SIZE: usize = 100;

pub struct QuarantinedNotifier {
    user_service: Arc<dyn UserService>,
    dispatcher: DispatchHandle,
    email_builder: QuarantineEmailBuilder,
    system_notifications: Arc<dyn SystemNotificationRepository>,
    system_notification_builder: QuarantineSystemNotificationBuilder,
    batch_size: usize,
}

impl QuarantinedNotifier {
    pub fn new(
        user_service: Arc<dyn UserService>,
        dispatcher: DispatchHandle,
        email_builder: QuarantineEmailBuilder,
        system_notifications: Arc<dyn SystemNotificationRepository>,
        system_notification_builder: QuarantineSystemNotificationBuilder,
    ) -> Self {
        Self {
            user_service,
            dispatcher,
            email_builder,
            system_notifications,
            system_notification_builder,
            batch_size: USER_BATCH_SIZE,
        }
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// 按配置设置分页大小（config_kv: notification_user_batch_size）
    pub fn with_settings(self, settings: &CsvSettings) -> Self {
        self.with_batch_size(settings.user_batch_size)
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// 保存一条系统通知，再通知全部活跃用户
    ///
    /// # 参数
    /// - author_id: 触发隔离变更的用户
    ///
    /// # 返回
    /// - 已提交的邮件数（不代表已送达）
    ///
    /// # 错误
    /// - 系统通知保存失败时不发送任何邮件
    #[instrument(skip_all, fields(quarantined = subject.is_quarantined()))]
    pub async fn notify(
        &self,
        subject: &QuarantineSubject,
        author_id: Option<Uuid>,
    ) -> Result<usize, NotificationError> {
        let notification = self.system_notification_builder.build(subject, author_id);
        self.system_notifications.save(&notification).await?;
        debug!(id = %notification.id, "系统通知已保存");

        let mut request = Some(PageRequest::first(self.batch_size));
        let mut submitted = 0usize;

        while let Some(current) = request {
            let page = self.user_service.search_active_users(current).await?;
            for recipient in &page.content {
                let email = self.email_builder.build(subject, recipient);
                self.dispatcher.submit(email)?;
                submitted += 1;
            }
            request = page.next_page();
        }

        info!(submitted, "隔离通知邮件已提交");
        Ok(submitted)
    }
}
