// ==========================================
// 参考数据服务 - 通知模块数据结构
// ==========================================

use crate::domain::{message_keys, Message};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// 通知收件人
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub email: Option<String>,
    pub active: bool,
}

// ==========================================
// 分页
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn first(size: usize) -> Self {
        Self {
            page: 0,
            size: size.max(1),
        }
    }

    pub fn offset(&self) -> usize {
        self.page * self.size
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub content: Vec<T>,
    pub request: PageRequest,
    pub total_elements: usize,
}

impl<T> Page<T> {
    /// 下一页请求（已是最后一页返回 None）
    pub fn next_page(&self) -> Option<PageRequest> {
        let seen = self.request.offset() + self.content.len();
        if self.content.is_empty() || seen >= self.total_elements {
            return None;
        }
        Some(PageRequest {
            page: self.request.page + 1,
            size: self.request.size,
        })
    }
}

// ==========================================
// 邮件
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email {
    pub recipient_id: Uuid,
    pub title: String,
    pub content: String,
}

// ==========================================
// 系统通知（站内公告，先于邮件保存）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SystemNotification {
    pub id: Uuid,
    /// 触发隔离变更的用户
    pub author_id: Option<Uuid>,
    pub title: String,
    pub message: String,
    pub start_date: DateTime<Utc>,
    /// None 表示不过期
    pub expiry_date: Option<DateTime<Utc>>,
    pub created_date: DateTime<Utc>,
    pub active: bool,
}

impl SystemNotification {
    /// 当前时刻是否应展示
    pub fn is_displayed(&self, now: DateTime<Utc>) -> bool {
        self.active
            && self.start_date <= now
            && self.expiry_date.map_or(true, |expiry| expiry > now)
    }
}

// ==========================================
// QuarantineSubject - 隔离/解除隔离的对象
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuarantineSubject {
    Lot {
        lot_code: String,
        product_name: String,
        quarantined: bool,
    },
    Orderable {
        product_code: String,
        product_name: String,
        quarantined: bool,
    },
}

impl QuarantineSubject {
    pub fn is_quarantined(&self) -> bool {
        match self {
            QuarantineSubject::Lot { quarantined, .. }
            | QuarantineSubject::Orderable { quarantined, .. } => *quarantined,
        }
    }

    /// 邮件标题与正文的消息键
    pub fn message_keys(&self) -> (&'static str, &'static str) {
        use crate::domain::message_keys::*;
        match (self, self.is_quarantined()) {
            (QuarantineSubject::Lot { .. }, true) => {
                (LOT_QUARANTINED_EMAIL_TITLE, LOT_QUARANTINED_EMAIL_CONTENT)
            }
            (QuarantineSubject::Lot { .. }, false) => (LOT_FREE_EMAIL_TITLE, LOT_FREE_EMAIL_CONTENT),
            (QuarantineSubject::Orderable { .. }, true) => (
                ORDERABLE_QUARANTINED_EMAIL_TITLE,
                ORDERABLE_QUARANTINED_EMAIL_CONTENT,
            ),
            (QuarantineSubject::Orderable { .. }, false) => {
                (ORDERABLE_FREE_EMAIL_TITLE, ORDERABLE_FREE_EMAIL_CONTENT)
            }
        }
    }

    /// 系统通知标题与正文的消息键
    pub fn system_notification_keys(&self) -> (&'static str, &'static str) {
        use crate::domain::message_keys::*;
        match (self, self.is_quarantined()) {
            (QuarantineSubject::Lot { .. }, true) => {
                (LOT_QUARANTINED_SYSTEM_TITLE, LOT_QUARANTINED_SYSTEM_MESSAGE)
            }
            (QuarantineSubject::Lot { .. }, false) => (LOT_FREE_SYSTEM_TITLE, LOT_FREE_SYSTEM_MESSAGE),
            (QuarantineSubject::Orderable { .. }, true) => (
                ORDERABLE_QUARANTINED_SYSTEM_TITLE,
                ORDERABLE_QUARANTINED_SYSTEM_MESSAGE,
            ),
            (QuarantineSubject::Orderable { .. }, false) => {
                (ORDERABLE_FREE_SYSTEM_TITLE, ORDERABLE_FREE_SYSTEM_MESSAGE)
            }
        }
    }

    /// 附带主体参数的消息
    pub fn message(&self, key: &str) -> Message {
        match self {
            QuarantineSubject::Lot {
                lot_code,
                product_name,
                ..
            } => Message::new(key)
                .with_arg("lot_code", lot_code)
                .with_arg("product_name", product_name),
            QuarantineSubject::Orderable {
                product_code,
                product_name,
                ..
            } => Message::new(key)
                .with_arg("product_code", product_code)
                .with_arg("product_name", product_name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_page_stops_at_total() {
        let request = PageRequest::first(2);
        let page = Page {
            content: vec![1, 2],
            request,
            total_elements: 3,
        };
        let next = page.next_page().unwrap();
        assert_eq!(next.page, 1);
        assert_eq!(next.offset(), 2);

        let last = Page {
            content: vec![3],
            request: next,
            total_elements: 3,
        };
        assert_eq!(last.next_page(), None);
    }

    #[test]
    fn test_subject_message_keys() {
        let lot = QuarantineSubject::Lot {
            lot_code: "LOT-1".to_string(),
            product_name: "Abacavir".to_string(),
            quarantined: false,
        };
        assert_eq!(
            lot.message_keys(),
            (
                message_keys::LOT_FREE_EMAIL_TITLE,
                message_keys::LOT_FREE_EMAIL_CONTENT
            )
        );
        assert_eq!(lot.message("k").arg("lot_code"), Some("LOT-1"));
    }

    #[test]
    fn test_subject_system_notification_keys() {
        let orderable = QuarantineSubject::Orderable {
            product_code: "C100".to_string(),
            product_name: "Acetylsalicylic Acid".to_string(),
            quarantined: true,
        };
        assert_eq!(
            orderable.system_notification_keys(),
            (
                message_keys::ORDERABLE_QUARANTINED_SYSTEM_TITLE,
                message_keys::ORDERABLE_QUARANTINED_SYSTEM_MESSAGE
            )
        );
    }

    #[test]
    fn test_system_notification_display_window() {
        let now = Utc::now();
        let mut notification = SystemNotification {
            id: Uuid::new_v4(),
            author_id: None,
            title: "t".to_string(),
            message: "m".to_string(),
            start_date: now - chrono::Duration::hours(1),
            expiry_date: None,
            created_date: now,
            active: true,
        };
        assert!(notification.is_displayed(now));

        notification.expiry_date = Some(now - chrono::Duration::minutes(1));
        assert!(!notification.is_displayed(now));

        notification.expiry_date = None;
        notification.active = false;
        assert!(!notification.is_displayed(now));
    }
}
