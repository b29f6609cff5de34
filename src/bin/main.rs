use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use commodity_dashboard::analytics::{
    build_report, format_with_commas, DashboardReport, MetricCard, ReportRequest,
};
use commodity_dashboard::cache::SeriesCache;
use commodity_dashboard::config::{self, ApplicationConfig, Environment, LogConfig};
use commodity_dashboard::data_ingestion::{write_aggregated_csv_file, CsvFileSource};
use commodity_dashboard::domain_types::Granularity;
use commodity_dashboard::utils::local_now;

/// 商品價格週期報表
#[derive(Parser, Debug)]
#[command(name = "commodity_dashboard", version, about)]
struct Cli {
    /// 配置目錄，預設讀取 CONFIG_DIR 或 ./config
    #[arg(long, global = true)]
    config_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 列出商品與資料日期範圍
    List {
        /// 價格寬表 CSV，預設為 data.path
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// 產生指標卡片與統計表
    Report {
        #[arg(long)]
        input: Option<PathBuf>,

        /// daily | weekly | monthly | quarterly
        #[arg(long)]
        granularity: Option<Granularity>,

        /// 可重複指定；未指定時使用 dashboard.default_commodities
        #[arg(long = "commodity")]
        commodities: Vec<String>,

        #[arg(long)]
        start: Option<NaiveDate>,

        #[arg(long)]
        end: Option<NaiveDate>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// 將篩選後的聚合表寫出為 CSV
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化配置
    let app_config = load_config(cli.config_dir.as_deref())?;

    // 初始化日誌系統
    init_logging(&app_config.log)?;

    match cli.command {
        Command::List { input } => run_list(&app_config, input),
        Command::Report {
            input,
            granularity,
            commodities,
            start,
            end,
            format,
            output,
        } => {
            let options = ReportOptions {
                granularity: granularity.unwrap_or_else(|| app_config.dashboard.granularity()),
                commodities: if commodities.is_empty() {
                    app_config.dashboard.default_commodities.clone()
                } else {
                    commodities
                },
                start,
                end,
                format,
                output,
            };
            run_report(&app_config, input, options)
        }
    }
}

fn load_config(config_dir: Option<&std::path::Path>) -> Result<ApplicationConfig> {
    match config_dir {
        Some(dir) => ApplicationConfig::load_from_dir(dir, Environment::from_env())
            .with_context(|| format!("無法從 {} 載入配置", dir.display())),
        None => Ok(config::init_config()?.clone()),
    }
}

// 初始化日誌系統
fn init_logging(log_config: &LogConfig) -> Result<()> {
    let level = match log_config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO, // 默認為INFO
    };

    // RUST_LOG 優先於配置檔的級別
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    let builder = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let result = if log_config.format.eq_ignore_ascii_case("json") {
        tracing::subscriber::set_global_default(builder.json().finish())
    } else {
        tracing::subscriber::set_global_default(builder.finish())
    };
    result.map_err(|e| anyhow!("設置日誌系統失敗: {}", e))?;

    info!("日誌系統初始化完成");
    Ok(())
}

fn open_cache(app_config: &ApplicationConfig, input: Option<PathBuf>) -> SeriesCache<CsvFileSource> {
    let path = input.unwrap_or_else(|| PathBuf::from(&app_config.data.path));
    let source = CsvFileSource::new(path, app_config.data.table_format());
    SeriesCache::new(source, app_config.cache.max_aggregations)
}

fn run_list(app_config: &ApplicationConfig, input: Option<PathBuf>) -> Result<()> {
    let mut cache = open_cache(app_config, input);
    let series = cache.series()?;

    match (series.start_date(), series.end_date()) {
        (Some(start), Some(end)) => println!("{} 筆記錄: {} .. {}", series.len(), start, end),
        _ => println!("沒有價格記錄"),
    }
    for name in series.commodities() {
        println!("{}", name);
    }

    Ok(())
}

struct ReportOptions {
    granularity: Granularity,
    commodities: Vec<String>,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    format: OutputFormat,
    output: Option<PathBuf>,
}

fn run_report(app_config: &ApplicationConfig, input: Option<PathBuf>, options: ReportOptions) -> Result<()> {
    let mut cache = open_cache(app_config, input);
    let series = cache.series()?;
    let aggregated = cache.aggregated(options.granularity)?;

    let request = ReportRequest {
        commodities: options.commodities,
        start: options.start,
        end: options.end,
    };
    let report = build_report(&series, &aggregated, &request, local_now())
        .with_context(|| format!("無法產生 {} 的報表", cache.source().path.display()))?;

    match options.format {
        OutputFormat::Text => print_text(&report),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    if let Some(path) = options.output {
        write_aggregated_csv_file(&report.table, &path)?;
        info!("聚合結果已寫入 {}", path.display());
    }

    Ok(())
}

fn print_text(report: &DashboardReport) {
    println!(
        "{} 報表 {} .. {}",
        report.granularity, report.start, report.end
    );

    println!("\n[全期間]");
    for card in &report.all_time {
        print_card(card);
    }

    println!("\n[選定期間]");
    for card in &report.selected {
        print_card(card);
    }

    println!("\n[統計]");
    println!(
        "{:<32} {:>6} {:>14} {:>14} {:>14} {:>14} {:>14}",
        "commodity", "count", "mean", "std", "min", "median", "max"
    );
    for row in &report.summary {
        println!(
            "{:<32} {:>6} {:>14} {:>14} {:>14} {:>14} {:>14}",
            row.commodity,
            row.count,
            optional(row.mean),
            optional(row.std),
            optional(row.min),
            optional(row.median),
            optional(row.max)
        );
    }
}

fn print_card(card: &MetricCard) {
    println!(
        "{:<32} {:>16} {}",
        card.commodity,
        format_with_commas(card.sum),
        card.delta_text
    );
    if let Some(note) = &card.note {
        println!("  {}", note);
    }
}

fn optional(value: Option<f64>) -> String {
    value.map(format_with_commas).unwrap_or_else(|| "-".to_string())
}
