// ==========================================
// 参考数据服务 - 隔离系统通知生成
// ==========================================
// 规则: 立即生效、不过期、默认激活
// ==========================================

use crate::i18n::MessageResolver;
use crate::notification::model::{QuarantineSubject, SystemNotification};
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct QuarantineSystemNotificationBuilder {
    resolver: Arc<dyn MessageResolver>,
    locale: Option<String>,
}

impl QuarantineSystemNotificationBuilder {
    pub fn new(resolver: Arc<dyn MessageResolver>) -> Self {
        Self {
            resolver,
            locale: None,
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn build(&self, subject: &QuarantineSubject, author_id: Option<Uuid>) -> SystemNotification {
        let (title_key, message_key) = subject.system_notification_keys();
        let locale = self.locale.as_deref();
        let now = Utc::now();

        SystemNotification {
            id: Uuid::new_v4(),
            author_id,
            title: self.resolver.resolve(&subject.message(title_key), locale),
            message: self.resolver.resolve(&subject.message(message_key), locale),
            start_date: now,
            expiry_date: None,
            created_date: now,
            active: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::I18nMessageResolver;

    #[test]
    fn test_build_lot_system_notification() {
        let builder =
            QuarantineSystemNotificationBuilder::new(Arc::new(I18nMessageResolver)).with_locale("en");
        let author = Uuid::new_v4();
        let subject = QuarantineSubject::Lot {
            lot_code: "LOT-7".to_string(),
            product_name: "Abacavir".to_string(),
            quarantined: true,
        };

        let notification = builder.build(&subject, Some(author));

        assert_eq!(notification.title, "Lot quarantined");
        assert!(notification.message.contains("LOT-7"));
        assert!(notification.message.contains("Abacavir"));
        assert_eq!(notification.author_id, Some(author));
        assert_eq!(notification.expiry_date, None);
        assert!(notification.active);
        assert!(notification.is_displayed(Utc::now()));
    }
}
