// ==========================================
// 参考数据服务 - 理想库存量 CSV 模型
// ==========================================
// 列: Facility Code / Commodity Type / Period / Ideal Stock Amount
// ==========================================

use crate::domain::{CodeRef, CommodityTypeRef, ProcessingPeriodRef};
use crate::model::{unknown_path, CellValue, CsvRecord, FieldPath, FieldSpec};
use crate::processor::type_tags;
use crate::repository::IdealStockAmountRow;

pub const FACILITY_CODE: &str = "Facility Code";
pub const COMMODITY_TYPE: &str = "Commodity Type";
pub const PERIOD: &str = "Period";
pub const IDEAL_STOCK_AMOUNT: &str = "Ideal Stock Amount";

const FIELDS: &[FieldSpec] = &[
    FieldSpec::new(FACILITY_CODE, "facility", type_tags::FACILITY, true),
    FieldSpec::new(COMMODITY_TYPE, "commodityType", type_tags::COMMODITY_TYPE, true),
    FieldSpec::new(PERIOD, "processingPeriod", type_tags::PROCESSING_PERIOD, true),
    FieldSpec::new(IDEAL_STOCK_AMOUNT, "amount", type_tags::POSITIVE_INT, true),
];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdealStockAmountCsvModel {
    pub facility: Option<CodeRef>,
    pub commodity_type: Option<CommodityTypeRef>,
    pub processing_period: Option<ProcessingPeriodRef>,
    pub amount: Option<i64>,
}

impl IdealStockAmountCsvModel {
    pub fn new(
        facility_code: &str,
        commodity_type: CommodityTypeRef,
        processing_period: ProcessingPeriodRef,
        amount: i64,
    ) -> Self {
        Self {
            facility: Some(CodeRef::new(facility_code)),
            commodity_type: Some(commodity_type),
            processing_period: Some(processing_period),
            amount: Some(amount),
        }
    }
}

impl CsvRecord for IdealStockAmountCsvModel {
    fn field_table() -> &'static [FieldSpec] {
        FIELDS
    }

    fn read_field(&self, path: &FieldPath) -> Option<CellValue> {
        match (path.root(), path.nested()) {
            ("facility", None) => self.facility.clone().map(CellValue::Reference),
            ("commodityType", None) => self.commodity_type.clone().map(CellValue::CommodityType),
            ("processingPeriod", None) => {
                self.processing_period.clone().map(CellValue::ProcessingPeriod)
            }
            ("amount", None) => self.amount.map(CellValue::Integer),
            _ => None,
        }
    }

    fn write_field(&mut self, path: &FieldPath, value: CellValue) -> Result<(), String> {
        match (path.root(), path.nested()) {
            ("facility", None) => self.facility = Some(value.into_reference()?),
            ("commodityType", None) => self.commodity_type = Some(value.into_commodity_type()?),
            ("processingPeriod", None) => {
                self.processing_period = Some(value.into_processing_period()?)
            }
            ("amount", None) => self.amount = Some(value.into_integer()?),
            _ => return Err(unknown_path(path)),
        }
        Ok(())
    }
}

impl From<IdealStockAmountRow> for IdealStockAmountCsvModel {
    fn from(row: IdealStockAmountRow) -> Self {
        Self::new(
            &row.facility_code,
            CommodityTypeRef::new(row.classification_system, row.classification_id),
            ProcessingPeriodRef::new(row.schedule_code, row.period_name),
            row.amount,
        )
    }
}
