//! 聚合結果的 CSV 輸出

use std::fs::File;
use std::io::Write;
use std::path::Path;

use super::error::IngestionResult;
use crate::domain_types::AggregatedSeries;

/// 將聚合表寫成 CSV：`period,start,end,<商品...>`，缺值輸出為空欄
pub fn write_aggregated_csv<W: Write>(aggregated: &AggregatedSeries, writer: W) -> IngestionResult<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    let mut header = vec!["period".to_string(), "start".to_string(), "end".to_string()];
    header.extend(aggregated.commodities.iter().cloned());
    wtr.write_record(&header)?;

    for bucket in &aggregated.buckets {
        let mut row = vec![
            bucket.period.label(),
            bucket.period.start.to_string(),
            bucket.period.end.to_string(),
        ];
        row.extend(
            (0..aggregated.commodities.len())
                .map(|idx| bucket.mean(idx).map(|v| v.to_string()).unwrap_or_default()),
        );
        wtr.write_record(&row)?;
    }

    wtr.flush()?;
    Ok(())
}

/// 寫出到檔案
pub fn write_aggregated_csv_file<P: AsRef<Path>>(aggregated: &AggregatedSeries, path: P) -> IngestionResult<()> {
    let file = File::create(path)?;
    write_aggregated_csv(aggregated, file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain_types::{AggregatedBucket, Granularity};
    use chrono::NaiveDate;

    #[test]
    fn test_write_aggregated_csv() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
        let aggregated = AggregatedSeries {
            commodities: vec!["Beras".into(), "Gula".into()],
            granularity: Granularity::Quarterly,
            buckets: vec![AggregatedBucket {
                period: Granularity::Quarterly.bucket_of(date),
                means: vec![Some(12500.5), None],
                record_count: 3,
            }],
        };

        let mut out = Vec::new();
        write_aggregated_csv(&aggregated, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(
            text,
            "period,start,end,Beras,Gula\n2024 Q1,2024-02-01,2024-05-01,12500.5,\n"
        );
    }
}
