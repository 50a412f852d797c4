// ==========================================
// 参考数据服务 - 项目产品 CSV 模型
// ==========================================

use crate::domain::{CodeRef, Dispensable, Money};
use crate::model::{unknown_path, CellValue, CsvRecord, FieldPath, FieldSpec};
use crate::processor::type_tags;

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new("Program Code", "program", type_tags::PROGRAM, true),
    FieldSpec::new("Product Code", "product", type_tags::ORDERABLE, true),
    FieldSpec::new("Dispensable", "dispensable", type_tags::DISPENSABLE, false),
    FieldSpec::new("Doses per Patient", "dosesPerPatient", type_tags::POSITIVE_INT, false),
    FieldSpec::new("Active", "active", type_tags::BOOLEAN, true),
    FieldSpec::new("Category", "orderableDisplayCategory", type_tags::ORDERABLE_DISPLAY_CATEGORY, true),
    FieldSpec::new("Full Supply", "fullSupply", type_tags::BOOLEAN, true),
    FieldSpec::new("Display Order", "displayOrder", type_tags::POSITIVE_INT, true),
    FieldSpec::new("Price per Pack", "pricePerPack", type_tags::MONEY, false),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderableCsvModel {
    pub program: Option<CodeRef>,
    pub product: Option<CodeRef>,
    pub dispensable: Option<Dispensable>,
    pub doses_per_patient: Option<i64>,
    pub active: Option<bool>,
    pub orderable_display_category: Option<CodeRef>,
    pub full_supply: Option<bool>,
    pub display_order: Option<i64>,
    pub price_per_pack: Option<Money>,
}

impl CsvRecord for OrderableCsvModel {
    fn field_table() -> &'static [FieldSpec] {
        FIELDS
    }

    fn read_field(&self, path: &FieldPath) -> Option<CellValue> {
        if path.is_nested() {
            return None;
        }
        match path.root() {
            "program" => self.program.clone().map(CellValue::Reference),
            "product" => self.product.clone().map(CellValue::Reference),
            "dispensable" => self.dispensable.clone().map(CellValue::Dispensable),
            "dosesPerPatient" => self.doses_per_patient.map(CellValue::Integer),
            "active" => self.active.map(CellValue::Boolean),
            "orderableDisplayCategory" => self
                .orderable_display_category
                .clone()
                .map(CellValue::Reference),
            "fullSupply" => self.full_supply.map(CellValue::Boolean),
            "displayOrder" => self.display_order.map(CellValue::Integer),
            "pricePerPack" => self.price_per_pack.clone().map(CellValue::Money),
            _ => None,
        }
    }

    fn write_field(&mut self, path: &FieldPath, value: CellValue) -> Result<(), String> {
        if path.is_nested() {
            return Err(unknown_path(path));
        }
        match path.root() {
            "program" => self.program = Some(value.into_reference()?),
            "product" => self.product = Some(value.into_reference()?),
            "dispensable" => self.dispensable = Some(value.into_dispensable()?),
            "dosesPerPatient" => self.doses_per_patient = Some(value.into_integer()?),
            "active" => self.active = Some(value.into_boolean()?),
            "orderableDisplayCategory" => {
                self.orderable_display_category = Some(value.into_reference()?)
            }
            "fullSupply" => self.full_supply = Some(value.into_boolean()?),
            "displayOrder" => self.display_order = Some(value.into_integer()?),
            "pricePerPack" => self.price_per_pack = Some(value.into_money()?),
            _ => return Err(unknown_path(path)),
        }
        Ok(())
    }
}
