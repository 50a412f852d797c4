// ==========================================
// 参考数据服务 - CSV 分块解析器
// ==========================================
// 流程:
// 1. 读表头并校验（任何数据行之前）
// 2. 按 chunk_size 分块读取记录
// 3. 每个非空块: RecordProcessor → RecordWriter
// 4. 返回读取的数据行数
// ==========================================

use crate::config::CsvSettings;
use crate::error::ValidationError;
use crate::importer::error::ImportResult;
use crate::importer::header_validator::CsvHeaderValidator;
use crate::importer::reader::CsvBeanReader;
use crate::importer::record_handler::{RecordProcessor, RecordWriter};
use crate::model::{CsvRecord, ModelClass};
use crate::processor::CellProcessorRegistry;
use std::io::Read;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub struct CsvParser {
    registry: Arc<CellProcessorRegistry>,
    validator: CsvHeaderValidator,
    chunk_size: usize,
}

impl CsvParser {
    pub fn new(registry: Arc<CellProcessorRegistry>, settings: &CsvSettings) -> Self {
        Self {
            registry,
            validator: CsvHeaderValidator,
            chunk_size: settings.chunk_size.max(1),
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// 解析并分块落库
    ///
    /// # 返回
    /// - 读取的数据行数（不含表头与空行）
    ///
    /// # 错误
    /// - ImportError::Validation: 表头/数据行校验失败
    /// - 处理器或写入器返回的错误原样上抛；之前已写入的块不回滚
    #[instrument(skip_all, fields(chunk_size = self.chunk_size, accept_extra_headers = accept_extra_headers))]
    pub fn parse<D, E, R>(
        &self,
        input: R,
        model: &ModelClass<D>,
        accept_extra_headers: bool,
        processor: &dyn RecordProcessor<D, E>,
        writer: &dyn RecordWriter<E>,
    ) -> ImportResult<usize>
    where
        D: CsvRecord,
        R: Read,
    {
        let mut reader = self.open(input, model, accept_extra_headers)?;

        let mut chunk = Vec::with_capacity(self.chunk_size);
        let mut chunks = 0usize;
        loop {
            let next = reader.read().map_err(|e| {
                let err = ValidationError::from_stream(e);
                warn!(key = err.key(), row = ?err.row_number(), "CSV 数据行校验失败");
                err
            })?;

            match next {
                Some(record) => {
                    chunk.push(record);
                    if chunk.len() >= self.chunk_size {
                        self.flush_chunk(&mut chunk, processor, writer)?;
                        chunks += 1;
                    }
                }
                None => break,
            }
        }
        if !chunk.is_empty() {
            self.flush_chunk(&mut chunk, processor, writer)?;
            chunks += 1;
        }

        let rows = reader.data_rows_read();
        info!(rows, chunks, "CSV 导入完成");
        Ok(rows)
    }

    /// 解析全部记录到内存（不落库）
    pub fn read_all<D, R>(
        &self,
        input: R,
        model: &ModelClass<D>,
        accept_extra_headers: bool,
    ) -> Result<Vec<D>, ValidationError>
    where
        D: CsvRecord,
        R: Read,
    {
        let mut reader = self.open(input, model, accept_extra_headers)?;
        let mut records = Vec::new();
        while let Some(record) = reader.read()? {
            records.push(record);
        }
        Ok(records)
    }

    fn open<'a, D, R>(
        &'a self,
        input: R,
        model: &'a ModelClass<D>,
        accept_extra_headers: bool,
    ) -> Result<CsvBeanReader<'a, D, R>, ValidationError>
    where
        D: CsvRecord,
        R: Read,
    {
        let reader = CsvBeanReader::new(model, &self.registry, input)?;
        reader.validate_headers(&self.validator, accept_extra_headers)?;
        debug!(headers = ?reader.headers(), "CSV 表头校验通过");
        Ok(reader)
    }

    fn flush_chunk<D, E>(
        &self,
        chunk: &mut Vec<D>,
        processor: &dyn RecordProcessor<D, E>,
        writer: &dyn RecordWriter<E>,
    ) -> ImportResult<()> {
        let records = std::mem::replace(chunk, Vec::with_capacity(self.chunk_size));
        let size = records.len();
        let entities = processor.process(records)?;
        writer.write(entities)?;
        debug!(size, "CSV 数据块已处理");
        Ok(())
    }
}
