// ==========================================
// 参考数据服务 - 异步邮件分发器
// ==========================================
// 模型: tokio 工作任务 + 无界通道
// - submit 即刻返回（不等待发送结果）
// - 发送失败只记录日志，不重试
// - shutdown 关闭通道并等待队列清空（需先释放全部 DispatchHandle）
// ==========================================

use crate::notification::error::NotificationError;
use crate::notification::model::Email;
use crate::notification::service::NotificationService;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

/// 分发统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchStats {
    pub delivered: usize,
    pub failed: usize,
}

pub struct NotificationDispatcher {
    handle: DispatchHandle,
    worker: JoinHandle<DispatchStats>,
}

/// 提交端（可克隆，供通知方持有）
#[derive(Debug, Clone)]
pub struct DispatchHandle {
    sender: mpsc::UnboundedSender<Email>,
}

impl DispatchHandle {
    /// 提交邮件（不等待发送）
    pub fn submit(&self, email: Email) -> Result<(), NotificationError> {
        self.sender
            .send(email)
            .map_err(|_| NotificationError::DispatcherClosed)
    }
}

impl NotificationDispatcher {
    /// 启动工作任务（需在 tokio 运行时内调用）
    pub fn spawn(service: Arc<dyn NotificationService>) -> Self {
        let (sender, mut receiver) = mpsc::unbounded_channel::<Email>();

        let worker = tokio::spawn(async move {
            let mut stats = DispatchStats::default();
            while let Some(email) = receiver.recv().await {
                match service.send_email(&email).await {
                    Ok(()) => {
                        stats.delivered += 1;
                        debug!(recipient = %email.recipient_id, "邮件已发送");
                    }
                    Err(e) => {
                        stats.failed += 1;
                        error!(recipient = %email.recipient_id, error = %e, "邮件发送失败");
                    }
                }
            }
            stats
        });

        Self {
            handle: DispatchHandle { sender },
            worker,
        }
    }

    pub fn handle(&self) -> DispatchHandle {
        self.handle.clone()
    }

    pub fn submit(&self, email: Email) -> Result<(), NotificationError> {
        self.handle.submit(email)
    }

    /// 关闭并等待已提交的邮件处理完毕
    pub async fn shutdown(self) -> DispatchStats {
        drop(self.handle);
        match self.worker.await {
            Ok(stats) => {
                info!(
                    delivered = stats.delivered,
                    failed = stats.failed,
                    "通知分发器已关闭"
                );
                stats
            }
            Err(e) => {
                error!(error = %e, "通知分发任务异常退出");
                DispatchStats::default()
            }
        }
    }
}
