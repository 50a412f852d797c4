// ==========================================
// 参考数据服务 - 隔离通知邮件生成
// ==========================================

use crate::i18n::MessageResolver;
use crate::notification::model::{Email, QuarantineSubject, User};
use std::sync::Arc;

pub struct QuarantineEmailBuilder {
    resolver: Arc<dyn MessageResolver>,
    // None 表示当前语言
    locale: Option<String>,
}

impl QuarantineEmailBuilder {
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

    pub fn build(&self, subject: &QuarantineSubject, recipient: &User) -> Email {
        let (title_key, content_key) = subject.message_keys();
        let locale = self.locale.as_deref();

        let title = self.resolver.resolve(&subject.message(title_key), locale);
        let content = self.resolver.resolve(
            &subject
                .message(content_key)
                .with_arg("username", &recipient.username),
            locale,
        );

        Email {
            recipient_id: recipient.id,
            title,
            content,
        }
    }
}
