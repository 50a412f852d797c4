// ==========================================
// 参考数据服务 - CSV 写出器
// ==========================================
// 职责: 表头 + 数据行写出，单元格加引号规则
// 行号: 表头为第 1 行，第 n 条记录为第 n + 1 行
// 资源: 成功与失败路径都会 flush 并释放输出流
// ==========================================

use crate::config::CsvPreference;
use crate::error::{CsvStreamError, RowValidationError};
use crate::model::{CsvRecord, FieldDescriptor, ModelClass};
use crate::processor::{CellContext, CellProcessorRegistry};
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::io::Write;
use tracing::debug;

pub struct CsvBeanWriter<'a, T, W: Write> {
    model: &'a ModelClass<T>,
    registry: &'a CellProcessorRegistry,
    preference: CsvPreference,
    writer: csv::Writer<W>,
    line_number: usize,
}

impl<'a, T: CsvRecord, W: Write> CsvBeanWriter<'a, T, W> {
    pub fn new(
        model: &'a ModelClass<T>,
        registry: &'a CellProcessorRegistry,
        preference: CsvPreference,
        sink: W,
    ) -> Self {
        // 引号由 encode_cell 统一处理，csv 层原样输出
        let writer = WriterBuilder::new()
            .delimiter(preference.delimiter)
            .quote(preference.quote)
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::CRLF)
            .has_headers(false)
            .from_writer(sink);

        Self {
            model,
            registry,
            preference,
            writer,
            line_number: 0,
        }
    }

    /// 已写出的物理行数
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    /// 写出表头与全部记录，并释放输出流
    ///
    /// # 错误
    /// - 第一个失败的单元格即终止；已写出的内容不回滚
    pub fn write(mut self, records: &[T]) -> Result<usize, CsvStreamError> {
        let result = self.write_rows(records);
        let flushed = self.writer.flush();
        drop(self.writer);

        let lines = result?;
        flushed?;
        Ok(lines)
    }

    fn write_rows(&mut self, records: &[T]) -> Result<usize, CsvStreamError> {
        let model = self.model;
        let header = model.header_names();
        let fields = model.resolve_headers(&header)?;

        self.write_line(header.iter().copied())?;

        for record in records {
            let line_number = self.line_number + 1;
            let cells = self.format_record(record, &fields, line_number)?;
            self.write_line(cells.iter().map(String::as_str))?;
        }

        debug!(lines = self.line_number, "CSV 写出完成");
        Ok(self.line_number)
    }

    fn format_record(
        &self,
        record: &T,
        fields: &[&FieldDescriptor],
        line_number: usize,
    ) -> Result<Vec<String>, RowValidationError> {
        fields
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                let ctx = CellContext::new(line_number, idx + 1, field.external_name.as_str());
                let value = record.read_field(&field.internal_path);
                self.registry
                    .format_cell(field, value.as_ref(), &ctx)
                    .map_err(|cause| RowValidationError {
                        line_number,
                        column_name: field.external_name.clone(),
                        cause,
                    })
            })
            .collect()
    }

    fn write_line<'c>(&mut self, cells: impl Iterator<Item = &'c str>) -> Result<(), csv::Error> {
        let mut encoded: Vec<String> = cells.map(|c| encode_cell(&self.preference, c)).collect();
        // 单列空值写为 `""`，否则读回时会被当作空行跳过
        if let [only] = encoded.as_mut_slice() {
            if only.is_empty() {
                let quote = self.preference.quote as char;
                *only = format!("{quote}{quote}");
            }
        }
        self.writer.write_record(&encoded)?;
        self.line_number += 1;
        Ok(())
    }
}

/// 按偏好加引号，内部引号加倍
pub fn encode_cell(preference: &CsvPreference, cell: &str) -> String {
    if !preference.needs_quotes(cell) {
        return cell.to_string();
    }

    let quote = preference.quote as char;
    let mut escaped = String::with_capacity(cell.len() + 2);
    escaped.push(quote);
    for c in cell.chars() {
        if c == quote {
            escaped.push(quote);
        }
        escaped.push(c);
    }
    escaped.push(quote);
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_cell_quoting_rules() {
        let preference = CsvPreference::standard();
        assert_eq!(encode_cell(&preference, "plain"), "plain");
        assert_eq!(encode_cell(&preference, "a,b"), "\"a,b\"");
        assert_eq!(encode_cell(&preference, "say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(encode_cell(&preference, " padded "), "\" padded \"");
        assert_eq!(encode_cell(&preference, "two\nlines"), "\"two\nlines\"");
        assert_eq!(encode_cell(&preference, ""), "");
    }

    #[test]
    fn test_encode_cell_without_surrounding_space_rule() {
        let preference = CsvPreference {
            surrounding_spaces_need_quotes: false,
            ..CsvPreference::standard()
        };
        assert_eq!(encode_cell(&preference, " padded "), " padded ");
    }
}
