// ==========================================
// 参考数据服务 - CSV 运行参数
// ==========================================
// 职责: 汇总 CSV 管道所需配置，显式传入注册表/读写器/解析器
// 说明: 一次加载，按值传递；管道内部不再读取配置源
// ==========================================

use crate::config::csv_config_trait::CsvConfigReader;
use crate::domain::Currency;
use std::error::Error;

pub const DEFAULT_CHUNK_SIZE: usize = 200;
pub const DEFAULT_COMPOSITE_SEPARATOR: &str = "|";
pub const DEFAULT_USER_BATCH_SIZE: usize = 100;
pub const DEFAULT_CURRENCY_CODE: &str = "USD";

// ==========================================
// CsvPreference - 文本层格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvPreference {
    pub delimiter: u8,
    pub quote: u8,
    /// 首尾含空白的单元格是否加引号
    pub surrounding_spaces_need_quotes: bool,
}

impl CsvPreference {
    /// 逗号分隔 + 双引号 + 首尾空白加引号
    pub fn standard() -> Self {
        Self {
            delimiter: b',',
            quote: b'"',
            surrounding_spaces_need_quotes: true,
        }
    }

    /// 单元格是否需要加引号
    pub fn needs_quotes(&self, cell: &str) -> bool {
        let delimiter = self.delimiter as char;
        let quote = self.quote as char;
        if cell
            .chars()
            .any(|c| c == delimiter || c == quote || c == '\r' || c == '\n')
        {
            return true;
        }

        self.surrounding_spaces_need_quotes
            && (cell.starts_with(char::is_whitespace) || cell.ends_with(char::is_whitespace))
    }
}

impl Default for CsvPreference {
    fn default() -> Self {
        Self::standard()
    }
}

// ==========================================
// CsvSettings - CSV 管道配置
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct CsvSettings {
    /// 导入分块大小
    pub chunk_size: usize,
    /// 复合引用编码分隔符（商品类型、报告期）
    pub composite_separator: String,
    pub surrounding_spaces_need_quotes: bool,
    /// 导入时是否容忍未知列
    pub accept_extra_headers: bool,
    /// 金额单元格币种
    pub currency: Currency,
    /// 通知分页大小
    pub user_batch_size: usize,
}

impl Default for CsvSettings {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            composite_separator: DEFAULT_COMPOSITE_SEPARATOR.to_string(),
            surrounding_spaces_need_quotes: true,
            accept_extra_headers: false,
            currency: Currency::default(),
            user_batch_size: DEFAULT_USER_BATCH_SIZE,
        }
    }
}

impl CsvSettings {
    pub fn preference(&self) -> CsvPreference {
        CsvPreference {
            surrounding_spaces_need_quotes: self.surrounding_spaces_need_quotes,
            ..CsvPreference::standard()
        }
    }
}

/// 从配置读取器加载 CSV 配置
///
/// # 说明
/// - 分块/分页大小为 0 时回退默认值
/// - 币种代码非法时返回错误（金额单元格无法处理）
pub async fn load_csv_settings<C>(reader: &C) -> Result<CsvSettings, Box<dyn Error>>
where
    C: CsvConfigReader + ?Sized,
{
    let chunk_size = match reader.get_chunk_size().await? {
        0 => DEFAULT_CHUNK_SIZE,
        n => n,
    };
    let user_batch_size = match reader.get_user_batch_size().await? {
        0 => DEFAULT_USER_BATCH_SIZE,
        n => n,
    };
    let currency = Currency::of(&reader.get_currency_code().await?)?;

    let settings = CsvSettings {
        chunk_size,
        composite_separator: reader.get_composite_separator().await?,
        surrounding_spaces_need_quotes: reader.get_surrounding_spaces_need_quotes().await?,
        accept_extra_headers: reader.get_accept_extra_headers().await?,
        currency,
        user_batch_size,
    };

    tracing::debug!(?settings, "CSV 配置加载完成");
    Ok(settings)
}
