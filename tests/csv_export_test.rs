// ==========================================
// CSV 导出集成测试
// ==========================================
// 测试目标: 表头顺序、单元格编码、加引号规则、行级错误翻译、输出流释放
// ==========================================

mod test_helpers;

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use refdata_csv::domain::{message_keys, CodeRef, CommodityTypeRef, Dispensable, ProcessingPeriodRef};
use refdata_csv::dto::{FacilityCsvModel, IdealStockAmountCsvModel, OrderableCsvModel};
use refdata_csv::repository::IdealStockAmountRepository;
use refdata_csv::{
    CellProcessorRegistry, CsvFormatter, CsvSettings, Currency, ModelClass, Money,
};
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use test_helpers::{create_test_db, seed_reference_data};

const ISA_HEADER: &str = "Facility Code,Commodity Type,Period,Ideal Stock Amount\r\n";

fn formatter() -> CsvFormatter {
    let settings = CsvSettings::default();
    CsvFormatter::new(Arc::new(CellProcessorRegistry::new(&settings)), &settings)
}

fn isa(facility: &str, classification_id: &str, period: &str, amount: i64) -> IdealStockAmountCsvModel {
    IdealStockAmountCsvModel::new(
        facility,
        CommodityTypeRef::new("WHO", classification_id),
        ProcessingPeriodRef::new("SCH001", period),
        amount,
    )
}

fn facility(code: &str, name: &str) -> FacilityCsvModel {
    FacilityCsvModel {
        code: Some(code.to_string()),
        name: Some(name.to_string()),
        description: None,
        facility_type: Some(CodeRef::new("health_center")),
        geographic_zone: Some(CodeRef::new("Malawi-Southern")),
        operator: None,
        active: Some(true),
        enabled: Some(false),
        go_live_date: NaiveDate::from_ymd_opt(2017, 1, 1),
    }
}

/// 记录 flush 与释放的输出流
struct TrackingSink {
    buffer: Vec<u8>,
    flushed: Arc<AtomicBool>,
    dropped: Arc<AtomicBool>,
}

impl Write for TrackingSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flushed.store(true, Ordering::SeqCst);
        Ok(())
    }
}

impl Drop for TrackingSink {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

#[test]
fn test_export_ideal_stock_amounts() {
    let model = ModelClass::<IdealStockAmountCsvModel>::new().expect("Failed to build model");

    let output = formatter()
        .export_to_string(&model, &[isa("HC01", "1", "Jan2017", 100)])
        .expect("Export should succeed");

    assert_eq!(output, format!("{}HC01,WHO|1,SCH001|Jan2017,100\r\n", ISA_HEADER));
}

#[test]
fn test_export_empty_list_writes_header_only() {
    let model = ModelClass::<IdealStockAmountCsvModel>::new().unwrap();

    let output = formatter().export_to_string(&model, &[]).unwrap();

    assert_eq!(output, ISA_HEADER);
}

#[test]
fn test_export_failure_reports_record_row_and_keeps_partial_output() {
    let model = ModelClass::<IdealStockAmountCsvModel>::new().unwrap();
    let mut broken = isa("HC02", "2", "Feb2017", 30);
    broken.facility = None;
    let records = vec![
        isa("HC01", "1", "Jan2017", 10),
        isa("HC01", "2", "Jan2017", 20),
        broken,
    ];

    let mut buffer = Vec::new();
    let err = formatter()
        .export(&mut buffer, &model, &records)
        .expect_err("Third record should fail");

    // 第 3 条记录 → 数据行号 3
    assert_eq!(err.key(), message_keys::CSV_RECORD_INVALID);
    assert_eq!(err.row_number(), Some(3));
    assert_eq!(err.message().arg("column"), Some("Facility Code"));

    // 失败前写出的内容保留
    let written = String::from_utf8(buffer).unwrap();
    assert_eq!(
        written,
        format!(
            "{}HC01,WHO|1,SCH001|Jan2017,10\r\nHC01,WHO|2,SCH001|Jan2017,20\r\n",
            ISA_HEADER
        )
    );
}

#[test]
fn test_export_releases_sink_on_success_and_failure() {
    let model = ModelClass::<IdealStockAmountCsvModel>::new().unwrap();

    for records in [vec![isa("HC01", "1", "Jan2017", 1)], vec![IdealStockAmountCsvModel::default()]] {
        let flushed = Arc::new(AtomicBool::new(false));
        let dropped = Arc::new(AtomicBool::new(false));
        let sink = TrackingSink {
            buffer: Vec::new(),
            flushed: flushed.clone(),
            dropped: dropped.clone(),
        };

        let _ = formatter().export(sink, &model, &records);

        assert!(flushed.load(Ordering::SeqCst), "Sink should be flushed");
        assert!(dropped.load(Ordering::SeqCst), "Sink should be released");
    }
}

#[test]
fn test_export_facility_with_nested_columns_and_quoting() {
    let model = ModelClass::<FacilityCsvModel>::new().unwrap();
    let records = vec![
        facility("HC01", "Comfort Health Clinic"),
        facility("HC02", " Nandumbo, Zomba "),
    ];

    let output = formatter().export_to_string(&model, &records).unwrap();
    let lines: Vec<&str> = output.split("\r\n").collect();

    assert_eq!(
        lines[0],
        "Code,Name,Description,Facility Type,Geographic Zone,Operator,Active,Enabled,Go Live Date"
    );
    assert_eq!(
        lines[1],
        "HC01,Comfort Health Clinic,,health_center,Malawi-Southern,,true,false,2017-01-01"
    );
    assert_eq!(
        lines[2],
        "HC02,\" Nandumbo, Zomba \",,health_center,Malawi-Southern,,true,false,2017-01-01"
    );
    assert_eq!(lines[3], "");
}

#[test]
fn test_export_quotes_embedded_quotes() {
    let model = ModelClass::<FacilityCsvModel>::new().unwrap();
    let records = vec![facility("HC03", "The \"Central\" Clinic")];

    let output = formatter().export_to_string(&model, &records).unwrap();

    assert!(output.contains(",\"The \"\"Central\"\" Clinic\","));
}

#[test]
fn test_export_orderable_money_and_dispensable() {
    let model = ModelClass::<OrderableCsvModel>::new().unwrap();
    let record = OrderableCsvModel {
        program: Some(CodeRef::new("PRG001")),
        product: Some(CodeRef::new("C100")),
        dispensable: Some(Dispensable::Default {
            dispensing_unit: "EACH".to_string(),
        }),
        doses_per_patient: None,
        active: Some(true),
        orderable_display_category: Some(CodeRef::new("ANTIBIOTICS")),
        full_supply: Some(true),
        display_order: Some(1),
        price_per_pack: Some(Money::of(BigDecimal::from(10), Currency::default())),
    };

    let output = formatter().export_to_string(&model, &[record]).unwrap();

    assert_eq!(
        output,
        "Program Code,Product Code,Dispensable,Doses per Patient,Active,Category,Full Supply,Display Order,Price per Pack\r\n\
         PRG001,C100,dispensingUnit:EACH,,true,ANTIBIOTICS,true,1,10.00\r\n"
    );
}

#[test]
fn test_export_ideal_stock_amounts_from_repository() {
    let (_temp_file, db_path) = create_test_db().expect("Failed to create test db");
    let repo = IdealStockAmountRepository::new(&db_path).expect("Failed to create repository");
    seed_reference_data(&repo).expect("Failed to seed reference data");

    let csv = format!(
        "{}HC02,WHO|2,SCH001|Feb2017,40\r\nHC01,WHO|1,SCH001|Jan2017,100\r\n",
        ISA_HEADER
    );
    let repo = Arc::new(repo);
    let settings = CsvSettings::default();
    let registry = Arc::new(CellProcessorRegistry::new(&settings));
    let parser = refdata_csv::CsvParser::new(registry.clone(), &settings);
    let model = ModelClass::<IdealStockAmountCsvModel>::new().unwrap();
    parser
        .parse(
            csv.as_bytes(),
            &model,
            false,
            &refdata_csv::importer::IdealStockAmountProcessor::new(repo.clone()),
            &refdata_csv::importer::IdealStockAmountWriter::new(repo.clone()),
        )
        .expect("Import should succeed");

    let records: Vec<IdealStockAmountCsvModel> = repo
        .find_all_rows()
        .unwrap()
        .into_iter()
        .map(IdealStockAmountCsvModel::from)
        .collect();
    let output = CsvFormatter::new(registry, &settings)
        .export_to_string(&model, &records)
        .unwrap();

    // 按机构编码排序
    assert_eq!(
        output,
        format!(
            "{}HC01,WHO|1,SCH001|Jan2017,100\r\nHC02,WHO|2,SCH001|Feb2017,40\r\n",
            ISA_HEADER
        )
    );
}
