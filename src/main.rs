// ==========================================
// 参考数据服务 - CSV 命令行工具
// ==========================================
// 用法:
//   refdata-csv header <model>          输出记录类型的 CSV 表头
//   refdata-csv check <model> <file>    校验 CSV 文件并输出数据行数
//
// 环境变量:
//   REFDATA_DB_PATH  从该数据库的 config_kv 表读取 CSV 配置（未设置时尝试默认数据库）
//   REFDATA_LOCALE   消息语言（zh-CN / en）
// ==========================================

use anyhow::{anyhow, bail, Context};
use refdata_csv::config::{load_csv_settings, ConfigManager, CsvSettings};
use refdata_csv::dto::{
    FacilityCsvModel, IdealStockAmountCsvModel, OrderableCsvModel, RECORD_TYPE_NAMES,
};
use refdata_csv::i18n::{self, t, t_with_args};
use refdata_csv::{CellProcessorRegistry, CsvFormatter, CsvParser, CsvRecord, ModelClass};
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> ExitCode {
    refdata_csv::logging::init();

    if let Ok(locale) = std::env::var("REFDATA_LOCALE") {
        i18n::set_locale(&locale);
    }

    match run(std::env::args().skip(1).collect()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Vec<String>) -> anyhow::Result<()> {
    let settings = load_settings().await?;
    tracing::debug!(?settings, "CSV 配置已加载");
    let registry = Arc::new(CellProcessorRegistry::new(&settings));

    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["header", model] => {
            let formatter = CsvFormatter::new(registry, &settings);
            let header = dispatch_model(model, HeaderCommand { formatter: &formatter })?;
            print!("{}", header);
            Ok(())
        }
        ["check", model, file] => {
            let parser = CsvParser::new(registry, &settings);
            let command = CheckCommand {
                parser: &parser,
                path: file,
                accept_extra_headers: settings.accept_extra_headers,
            };
            let count = dispatch_model(model, command)?;
            println!(
                "{}",
                t_with_args("cli.rows_uploaded", &[("count", count.to_string().as_str())])
            );
            Ok(())
        }
        _ => bail!(t("cli.usage")),
    }
}

async fn load_settings() -> anyhow::Result<CsvSettings> {
    // 未指定时使用默认数据库（文件不存在则用内置默认值）
    let db_path = match std::env::var("REFDATA_DB_PATH") {
        Ok(path) => path,
        Err(_) => {
            let path = refdata_csv::db::default_db_path();
            if !std::path::Path::new(&path).exists() {
                return Ok(CsvSettings::default());
            }
            path
        }
    };

    let manager =
        ConfigManager::new(&db_path).map_err(|e| anyhow!("{}: {}", db_path, e))?;
    load_csv_settings(&manager)
        .await
        .map_err(|e| anyhow!("{}", e))
}

// ==========================================
// 按记录类型名分派
// ==========================================
trait ModelCommand {
    type Output;
    fn run<T: CsvRecord>(self, model: &ModelClass<T>) -> anyhow::Result<Self::Output>;
}

fn dispatch_model<C: ModelCommand>(name: &str, command: C) -> anyhow::Result<C::Output> {
    match name {
        "ideal-stock-amount" => command.run(&ModelClass::<IdealStockAmountCsvModel>::new()?),
        "facility" => command.run(&ModelClass::<FacilityCsvModel>::new()?),
        "orderable" => command.run(&ModelClass::<OrderableCsvModel>::new()?),
        other => bail!(t_with_args(
            "cli.unknown_model",
            &[("model", other), ("models", RECORD_TYPE_NAMES.join(", ").as_str())]
        )),
    }
}

struct HeaderCommand<'a> {
    formatter: &'a CsvFormatter,
}

impl ModelCommand for HeaderCommand<'_> {
    type Output = String;

    fn run<T: CsvRecord>(self, model: &ModelClass<T>) -> anyhow::Result<String> {
        Ok(self.formatter.export_to_string::<T>(model, &[])?)
    }
}

struct CheckCommand<'a> {
    parser: &'a CsvParser,
    path: &'a str,
    accept_extra_headers: bool,
}

impl ModelCommand for CheckCommand<'_> {
    type Output = usize;

    fn run<T: CsvRecord>(self, model: &ModelClass<T>) -> anyhow::Result<usize> {
        let file = File::open(self.path).with_context(|| self.path.to_string())?;
        let records =
            self.parser
                .read_all(BufReader::new(file), model, self.accept_extra_headers)?;
        Ok(records.len())
    }
}
