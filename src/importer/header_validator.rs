// ==========================================
// 参考数据服务 - CSV 表头校验
// ==========================================
// 校验顺序:
// 1. 空白表头单元格 → csv.header_missing（列号从 1 开始）
// 2. 未知表头（不容忍时）→ csv.header_invalid "[a, b]"
// 3. 缺少必填列 → csv.missing_mandatory_columns "[a, b]"
// ==========================================

use crate::domain::{message_keys, Message};
use crate::error::ValidationError;
use crate::model::ModelClass;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, Default)]
pub struct CsvHeaderValidator;

impl CsvHeaderValidator {
    pub fn validate_headers<T, S: AsRef<str>>(
        &self,
        headers: &[S],
        model: &ModelClass<T>,
        accept_extra_headers: bool,
    ) -> Result<(), ValidationError> {
        if let Some(idx) = headers.iter().position(|h| h.as_ref().trim().is_empty()) {
            return Err(ValidationError::new(
                Message::new(message_keys::CSV_HEADER_MISSING).with_arg("column", idx + 1),
            ));
        }

        if !accept_extra_headers {
            let invalid: Vec<&str> = headers
                .iter()
                .map(|h| h.as_ref())
                .filter(|h| model.find_field_by_external_name(h).is_none())
                .collect();
            if !invalid.is_empty() {
                return Err(ValidationError::new(
                    Message::new(message_keys::CSV_HEADER_INVALID)
                        .with_arg("headers", bracket_list(&invalid)),
                ));
            }
        }

        let present: HashSet<String> = headers
            .iter()
            .map(|h| h.as_ref().trim().to_lowercase())
            .collect();
        let missing: Vec<&str> = model
            .import_fields()
            .iter()
            .filter(|f| f.mandatory && !present.contains(&f.external_name.to_lowercase()))
            .map(|f| f.external_name.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(ValidationError::new(
                Message::new(message_keys::CSV_MISSING_MANDATORY_COLUMNS)
                    .with_arg("columns", bracket_list(&missing)),
            ));
        }

        Ok(())
    }
}

fn bracket_list(items: &[&str]) -> String {
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldSpec;

    struct Dummy;

    const FIELDS: &[FieldSpec] = &[
        FieldSpec::new("Mandatory String Field", "mandatoryStringField", "String", true),
        FieldSpec::new("mandatoryIntField", "mandatoryIntField", "int", true),
        FieldSpec::new("optionalStringField", "optionalStringField", "String", false),
    ];

    fn model() -> ModelClass<Dummy> {
        ModelClass::from_specs(FIELDS).unwrap()
    }

    #[test]
    fn test_valid_headers_in_any_case() {
        let headers = ["MANDATORY string field", "mandatoryintfield"];
        assert!(CsvHeaderValidator
            .validate_headers(&headers, &model(), false)
            .is_ok());
    }

    #[test]
    fn test_blank_header_reports_column_number() {
        let headers = ["Mandatory String Field", "", "mandatoryIntField"];
        let err = CsvHeaderValidator
            .validate_headers(&headers, &model(), true)
            .unwrap_err();
        assert_eq!(err.key(), message_keys::CSV_HEADER_MISSING);
        assert_eq!(err.message().arg("column"), Some("2"));
    }

    #[test]
    fn test_unknown_headers_listed() {
        let headers = [
            "Mandatory String Field",
            "mandatoryIntField",
            "extra",
            "another",
        ];
        let err = CsvHeaderValidator
            .validate_headers(&headers, &model(), false)
            .unwrap_err();
        assert_eq!(err.key(), message_keys::CSV_HEADER_INVALID);
        assert_eq!(err.message().arg("headers"), Some("[extra, another]"));
    }

    #[test]
    fn test_unknown_headers_accepted_when_allowed() {
        let headers = ["Mandatory String Field", "mandatoryIntField", "extra"];
        assert!(CsvHeaderValidator
            .validate_headers(&headers, &model(), true)
            .is_ok());
    }

    #[test]
    fn test_missing_mandatory_columns_listed() {
        let headers = ["optionalStringField"];
        let err = CsvHeaderValidator
            .validate_headers(&headers, &model(), false)
            .unwrap_err();
        assert_eq!(err.key(), message_keys::CSV_MISSING_MANDATORY_COLUMNS);
        assert_eq!(
            err.message().arg("columns"),
            Some("[Mandatory String Field, mandatoryIntField]")
        );
    }
}
