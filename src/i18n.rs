// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持中文（默认）和英文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use crate::domain::Message;

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"zh-CN" 或 "en"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use refdata_csv::i18n::t;
/// let msg = t("csv.stream_failed");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数，当前语言）
///
/// # 示例
/// ```no_run
/// use refdata_csv::i18n::t_with_args;
/// let msg = t_with_args("csv.header_missing", &[("column", "2")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    fill_placeholders(rust_i18n::t!(key).to_string(), args)
}

/// 翻译消息（带参数，指定语言）
pub fn t_in_locale(key: &str, locale: &str, args: &[(&str, &str)]) -> String {
    fill_placeholders(rust_i18n::t!(key, locale = locale).to_string(), args)
}

fn fill_placeholders(template: String, args: &[(&str, &str)]) -> String {
    let mut result = template;
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}

// ==========================================
// MessageResolver Trait
// ==========================================
// 用途: 错误展示、邮件正文生成
pub trait MessageResolver: Send + Sync {
    /// 解析消息文本
    ///
    /// # 参数
    /// - locale: None 表示当前语言
    fn resolve(&self, message: &Message, locale: Option<&str>) -> String;
}

/// 基于 rust-i18n 资源文件的解析器
#[derive(Debug, Clone, Copy, Default)]
pub struct I18nMessageResolver;

impl MessageResolver for I18nMessageResolver {
    fn resolve(&self, message: &Message, locale: Option<&str>) -> String {
        let args = message.args_as_pairs();
        match locale {
            Some(locale) => t_in_locale(&message.key, locale, &args),
            None => t_with_args(&message.key, &args),
        }
    }
}
