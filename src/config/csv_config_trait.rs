// ==========================================
// 参考数据服务 - CSV 配置读取 Trait
// ==========================================
// 职责: 定义 CSV 管道所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use async_trait::async_trait;
use std::error::Error;

// ==========================================
// CsvConfigReader Trait
// ==========================================
// 用途: CSV 导入导出 + 隔离通知所需配置
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait CsvConfigReader: Send + Sync {
    /// 获取导入分块大小
    ///
    /// # 默认值
    /// - 200
    async fn get_chunk_size(&self) -> Result<usize, Box<dyn Error>>;

    /// 获取复合引用编码分隔符
    ///
    /// # 默认值
    /// - "|"
    ///
    /// # 用途
    /// - 商品类型: `分类体系|分类编号`
    /// - 报告期: `排程编码|期间名称`
    async fn get_composite_separator(&self) -> Result<String, Box<dyn Error>>;

    /// 首尾空白单元格是否加引号
    ///
    /// # 默认值
    /// - true
    async fn get_surrounding_spaces_need_quotes(&self) -> Result<bool, Box<dyn Error>>;

    /// 导入时是否容忍未知列
    ///
    /// # 默认值
    /// - false（未知列直接拒绝）
    async fn get_accept_extra_headers(&self) -> Result<bool, Box<dyn Error>>;

    /// 获取金额币种代码
    ///
    /// # 默认值
    /// - "USD"
    async fn get_currency_code(&self) -> Result<String, Box<dyn Error>>;

    /// 获取通知分页大小（每批处理的用户数）
    ///
    /// # 默认值
    /// - 100
    async fn get_user_batch_size(&self) -> Result<usize, Box<dyn Error>>;
}
