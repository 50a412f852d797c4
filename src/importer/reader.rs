// ==========================================
// 参考数据服务 - CSV 读取器
// ==========================================
// 职责: 读表头、逐行按列的导入处理器转换为记录
// 行号: 表头为第 1 行；完全空白的行跳过且不计数
// 说明: 表头按名称宽松解析，未匹配列在读取时忽略
//       （是否容忍未知列由 validate_headers 决定）
// ==========================================

use crate::error::{CsvStreamError, RowValidationError, ValidationError, HEADER_ROW_OFFSET};
use crate::importer::header_validator::CsvHeaderValidator;
use crate::model::{CsvRecord, FieldDescriptor, ModelClass};
use crate::processor::{CellContext, CellProcessorRegistry};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::io::Read;

const UTF8_BOM: char = '\u{feff}';

pub struct CsvBeanReader<'a, T, R: Read> {
    model: &'a ModelClass<T>,
    registry: &'a CellProcessorRegistry,
    reader: csv::Reader<R>,
    headers: Vec<String>,
    columns: Vec<Option<&'a FieldDescriptor>>,
    buffer: StringRecord,
    line_number: usize,
}

impl<'a, T: CsvRecord, R: Read> CsvBeanReader<'a, T, R> {
    /// 打开读取器并读取表头行
    ///
    /// 空输入得到空表头
    pub fn new(
        model: &'a ModelClass<T>,
        registry: &'a CellProcessorRegistry,
        input: R,
    ) -> Result<Self, CsvStreamError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(Trim::None)
            .from_reader(input);

        let mut buffer = StringRecord::new();
        let headers: Vec<String> = if reader.read_record(&mut buffer)? {
            buffer
                .iter()
                .enumerate()
                .map(|(idx, h)| {
                    let h = if idx == 0 { h.trim_start_matches(UTF8_BOM) } else { h };
                    h.trim().to_string()
                })
                .collect()
        } else {
            Vec::new()
        };

        let columns = headers
            .iter()
            .map(|h| model.find_field_by_external_name(h))
            .collect();
        let line_number = if headers.is_empty() { 0 } else { HEADER_ROW_OFFSET };

        Ok(Self {
            model,
            registry,
            reader,
            headers,
            columns,
            buffer,
            line_number,
        })
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// 已读取的物理行号（表头为第 1 行）
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// 已读取的数据行数
    pub fn data_rows_read(&self) -> usize {
        self.line_number.saturating_sub(HEADER_ROW_OFFSET)
    }

    /// 校验表头（应在读取任何数据行之前调用）
    pub fn validate_headers(
        &self,
        validator: &CsvHeaderValidator,
        accept_extra_headers: bool,
    ) -> Result<(), ValidationError> {
        validator.validate_headers(&self.headers, self.model, accept_extra_headers)
    }

    /// 读取下一条记录
    ///
    /// # 返回
    /// - Ok(None): 输入结束
    pub fn read(&mut self) -> Result<Option<T>, CsvStreamError> {
        // 空行由 csv 层跳过；单元格全空的行（如 `""`、`,,`）仍是一条记录
        if !self.reader.read_record(&mut self.buffer)? {
            return Ok(None);
        }

        self.line_number += 1;
        if self.buffer.len() != self.headers.len() {
            return Err(CsvStreamError::ColumnCount {
                line_number: self.line_number,
                expected: self.headers.len(),
                found: self.buffer.len(),
            });
        }

        self.map_row().map(Some).map_err(CsvStreamError::from)
    }

    fn map_row(&self) -> Result<T, RowValidationError> {
        let mut record = T::default();

        for (idx, (raw, column)) in self.buffer.iter().zip(&self.columns).enumerate() {
            let Some(field) = column else {
                continue;
            };

            let ctx = CellContext::new(self.line_number, idx + 1, field.external_name.as_str());
            let row_error = |cause| RowValidationError {
                line_number: self.line_number,
                column_name: field.external_name.clone(),
                cause,
            };

            if let Some(value) = self
                .registry
                .parse_cell(field, raw, &ctx)
                .map_err(row_error)?
            {
                record
                    .write_field(&field.internal_path, value)
                    .map_err(|reason| row_error(ctx.error(raw, reason)))?;
            }
        }

        Ok(record)
    }
}
