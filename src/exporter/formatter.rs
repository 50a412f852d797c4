// ==========================================
// 参考数据服务 - CSV 导出格式化器
// ==========================================
// 职责: 组装写出器，并把行级错误翻译为对外 ValidationError
// 翻译: row = 物理行号 - 1，消息键 csv.record_invalid
// ==========================================

use crate::config::{CsvPreference, CsvSettings};
use crate::error::ValidationError;
use crate::exporter::writer::CsvBeanWriter;
use crate::model::{CsvRecord, ModelClass};
use crate::processor::CellProcessorRegistry;
use std::io::Write;
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub struct CsvFormatter {
    registry: Arc<CellProcessorRegistry>,
    preference: CsvPreference,
}

impl CsvFormatter {
    pub fn new(registry: Arc<CellProcessorRegistry>, settings: &CsvSettings) -> Self {
        Self::with_preference(registry, settings.preference())
    }

    pub fn with_preference(registry: Arc<CellProcessorRegistry>, preference: CsvPreference) -> Self {
        Self {
            registry,
            preference,
        }
    }

    /// 导出记录到输出流
    ///
    /// # 参数
    /// - sink: 输出流（调用返回后已 flush 并释放）
    /// - model: 记录类型描述
    /// - records: 按输入顺序写出
    #[instrument(skip_all, fields(records = records.len(), columns = model.len()))]
    pub fn export<T: CsvRecord, W: Write>(
        &self,
        sink: W,
        model: &ModelClass<T>,
        records: &[T],
    ) -> Result<(), ValidationError> {
        let writer = CsvBeanWriter::new(model, &self.registry, self.preference, sink);

        match writer.write(records) {
            Ok(lines) => {
                info!(lines, "CSV 导出成功");
                Ok(())
            }
            Err(e) => {
                let err = ValidationError::from_stream(e);
                warn!(key = err.key(), row = ?err.row_number(), "CSV 导出失败");
                Err(err)
            }
        }
    }

    /// 导出为字符串
    pub fn export_to_string<T: CsvRecord>(
        &self,
        model: &ModelClass<T>,
        records: &[T],
    ) -> Result<String, ValidationError> {
        let mut buffer = Vec::new();
        self.export(&mut buffer, model, records)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
