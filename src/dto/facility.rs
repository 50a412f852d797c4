// ==========================================
// 参考数据服务 - 机构 CSV 模型
// ==========================================
// 嵌套列: type.code / geographicZone.code / operator.code
// ==========================================

use crate::domain::CodeRef;
use crate::model::{unknown_path, CellValue, CsvRecord, FieldPath, FieldSpec};
use crate::processor::type_tags;
use chrono::NaiveDate;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("Code", "code", type_tags::CODE, true),
    FieldSpec::new("Name", "name", type_tags::STRING, true),
    FieldSpec::new("Description", "description", type_tags::STRING, false),
    FieldSpec::new("Facility Type", "type.code", type_tags::STRING, true),
    FieldSpec::new("Geographic Zone", "geographicZone.code", type_tags::STRING, true),
    FieldSpec::new("Operator", "operator.code", type_tags::STRING, false),
    FieldSpec::new("Active", "active", type_tags::BOOLEAN, true),
    FieldSpec::new("Enabled", "enabled", type_tags::BOOLEAN, true),
    FieldSpec::new("Go Live Date", "goLiveDate", type_tags::LOCAL_DATE, false),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacilityCsvModel {
    pub code: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub facility_type: Option<CodeRef>,
    pub geographic_zone: Option<CodeRef>,
    pub operator: Option<CodeRef>,
    pub active: Option<bool>,
    pub enabled: Option<bool>,
    pub go_live_date: Option<NaiveDate>,
}

fn nested_code(reference: &Option<CodeRef>) -> Option<CellValue> {
    reference
        .as_ref()
        .and_then(|r| r.code.clone())
        .map(CellValue::Text)
}

impl CsvRecord for FacilityCsvModel {
    fn field_table() -> &'static [FieldSpec] {
        FIELDS
    }

    fn read_field(&self, path: &FieldPath) -> Option<CellValue> {
        match (path.root(), path.nested()) {
            ("code", None) => self.code.clone().map(CellValue::Text),
            ("name", None) => self.name.clone().map(CellValue::Text),
            ("description", None) => self.description.clone().map(CellValue::Text),
            ("type", Some("code")) => nested_code(&self.facility_type),
            ("geographicZone", Some("code")) => nested_code(&self.geographic_zone),
            ("operator", Some("code")) => nested_code(&self.operator),
            ("active", None) => self.active.map(CellValue::Boolean),
            ("enabled", None) => self.enabled.map(CellValue::Boolean),
            ("goLiveDate", None) => self.go_live_date.map(CellValue::Date),
            _ => None,
        }
    }

    fn write_field(&mut self, path: &FieldPath, value: CellValue) -> Result<(), String> {
        match (path.root(), path.nested()) {
            ("code", None) => self.code = Some(value.into_text()?),
            ("name", None) => self.name = Some(value.into_text()?),
            ("description", None) => self.description = Some(value.into_text()?),
            ("type", Some("code")) => self.facility_type = Some(CodeRef::new(value.into_text()?)),
            ("geographicZone", Some("code")) => {
                self.geographic_zone = Some(CodeRef::new(value.into_text()?))
            }
            ("operator", Some("code")) => self.operator = Some(CodeRef::new(value.into_text()?)),
            ("active", None) => self.active = Some(value.into_boolean()?),
            ("enabled", None) => self.enabled = Some(value.into_boolean()?),
            ("goLiveDate", None) => self.go_live_date = Some(value.into_date()?),
            _ => return Err(unknown_path(path)),
        }
        Ok(())
    }
}
