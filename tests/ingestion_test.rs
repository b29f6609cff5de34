mod common;

use assert_matches::assert_matches;
use commodity_dashboard::cache::SeriesCache;
use commodity_dashboard::data_ingestion::{
    load_price_table, parse_price_table, write_aggregated_csv, CsvFileSource, IngestionError,
    PriceTableFormat,
};
use commodity_dashboard::domain_types::{Granularity, SeriesError};
use commodity_dashboard::PeriodAggregator;
use common::{ymd, WIDE_TABLE};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_load_wide_table_from_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("harga.csv");
    fs::write(&path, WIDE_TABLE).unwrap();

    let series = load_price_table(&path, &PriceTableFormat::default()).unwrap();

    assert_eq!(series.commodities(), &["Beras Kualitas Medium I", "Gula Pasir Lokal"]);
    assert_eq!(
        series.dates(),
        vec![ymd(2024, 2, 1), ymd(2024, 2, 2), ymd(2024, 2, 5), ymd(2024, 3, 1)]
    );
    assert_eq!(
        series.column("Beras Kualitas Medium I").unwrap(),
        vec![Some(12500.0), Some(12600.0), None, Some(13000.0)]
    );
    assert_eq!(
        series.column("Gula Pasir Lokal").unwrap(),
        vec![Some(17000.0), None, Some(17250.0), Some(17500.0)]
    );
}

#[test]
fn test_unordered_date_columns_are_sorted() {
    let data = "Komoditas (Rp),03/ 02/ 2024,01/ 02/ 2024\nBeras,\"3,000\",\"1,000\"\n";

    let series = parse_price_table(data, &PriceTableFormat::default()).unwrap();

    assert_eq!(series.dates(), vec![ymd(2024, 2, 1), ymd(2024, 2, 3)]);
    assert_eq!(series.column("Beras").unwrap(), vec![Some(1000.0), Some(3000.0)]);
}

#[test]
fn test_custom_table_format() {
    let format = PriceTableFormat {
        label_column: "Commodity".to_string(),
        date_format: "%Y-%m-%d".to_string(),
        thousands_separator: '.',
        delimiter: ';',
    };
    let data = "Commodity;2024-02-01;2024-02-02\nBeras;12.500;\"12.600\"\n";

    let series = parse_price_table(data, &format).unwrap();

    assert_eq!(series.column("Beras").unwrap(), vec![Some(12500.0), Some(12600.0)]);
}

#[test]
fn test_missing_label_column() {
    let data = "Nama,01/ 02/ 2024\nBeras,\"12,500\"\n";

    let result = parse_price_table(data, &PriceTableFormat::default());

    assert_matches!(result, Err(IngestionError::MissingColumn(column)) if column == "Komoditas (Rp)");
}

#[test]
fn test_invalid_date_header() {
    let data = "Komoditas (Rp),2024-02-01\nBeras,\"12,500\"\n";

    let result = parse_price_table(data, &PriceTableFormat::default());

    assert_matches!(result, Err(IngestionError::InvalidDateHeader { header, .. }) if header == "2024-02-01");
}

#[test]
fn test_unparseable_price() {
    let data = "Komoditas (Rp),01/ 02/ 2024\nBeras,abc\n";

    let result = parse_price_table(data, &PriceTableFormat::default());

    assert_matches!(
        result,
        Err(IngestionError::NumberParseError { commodity, value, .. }) if commodity == "Beras" && value == "abc"
    );
}

#[test]
fn test_negative_price_rejected() {
    let data = "Komoditas (Rp),01/ 02/ 2024\nBeras,-5\n";

    let result = parse_price_table(data, &PriceTableFormat::default());

    assert_matches!(result, Err(IngestionError::Series(SeriesError::NegativePrice { .. })));
}

#[test]
fn test_duplicate_date_columns_rejected() {
    let data = "Komoditas (Rp),01/ 02/ 2024,01/ 02/ 2024 \nBeras,1,2\n";

    let result = parse_price_table(data, &PriceTableFormat::default());

    assert_matches!(result, Err(IngestionError::Series(SeriesError::DuplicateTimestamp(_))));
}

#[test]
fn test_missing_file() {
    let dir = tempdir().unwrap();

    let result = load_price_table(dir.path().join("missing.csv"), &PriceTableFormat::default());

    assert!(result.is_err());
}

#[test]
fn test_write_monthly_csv() {
    let series = parse_price_table(WIDE_TABLE, &PriceTableFormat::default()).unwrap();
    let monthly = PeriodAggregator::aggregate(&series, Granularity::Monthly);

    let mut out = Vec::new();
    write_aggregated_csv(&monthly, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "period,start,end,Beras Kualitas Medium I,Gula Pasir Lokal");
    assert_eq!(lines[1], "2024-02,2024-02-01,2024-03-01,12550,17125");
    assert_eq!(lines[2], "2024-03,2024-03-01,2024-04-01,13000,17500");
    assert_eq!(lines.len(), 3);
}

#[test]
fn test_cache_reloads_only_on_refresh() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("harga.csv");
    fs::write(&path, WIDE_TABLE).unwrap();

    let mut cache = SeriesCache::with_source(CsvFileSource::new(&path, PriceTableFormat::default()));
    let first = cache.series().unwrap();
    let monthly = cache.aggregated(Granularity::Monthly).unwrap();
    assert_eq!(monthly.len(), 2);

    // 檔案更新後，未 refresh 前仍使用舊資料
    fs::write(&path, "Komoditas (Rp),01/ 04/ 2024\nBeras,\"9,000\"\n").unwrap();
    assert_eq!(cache.series().unwrap().len(), first.len());
    assert_eq!(cache.aggregated(Granularity::Monthly).unwrap().len(), 2);

    let reloaded = cache.refresh().unwrap();
    assert_eq!(reloaded.commodities(), &["Beras"]);
    assert_eq!(cache.aggregated(Granularity::Monthly).unwrap().len(), 1);
}
