//! Date-range run: fetch, normalize, merge, filter, write

use crate::writer::{write_master_csv, write_workbook};
use anyhow::{Context, Result};
use bhavcopy_core::{
    partition_by_year, CanonicalTable, PipelineConfig, SchemaNormalizer, StatisticsSummary,
};
use bhavcopy_sources::{is_weekend, BhavcopySource};
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{info, warn};

/// Per-day outcome counts of a run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ok_days: usize,
    pub no_data_days: usize,
    pub weekend_days: usize,
}

/// What a finished run produced
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub summary: RunSummary,
    pub master_records: usize,
    pub watchlist_records: usize,
    pub watchlist_days: usize,
    pub master_path: Option<PathBuf>,
    pub workbook_path: Option<PathBuf>,
    pub watchlist: CanonicalTable,
}

/// Fetch and normalize every weekday in `start..=end`, in date order.
///
/// Weekends are skipped without a request and are not counted as
/// no-data days. `pacing` is slept after each weekday fetch.
pub async fn collect_range(
    source: &BhavcopySource,
    normalizer: &SchemaNormalizer,
    start: NaiveDate,
    end: NaiveDate,
    pacing: Duration,
) -> (Vec<CanonicalTable>, RunSummary) {
    let mut tables = Vec::new();
    let mut summary = RunSummary::default();

    let mut current = Some(start);
    while let Some(date) = current.filter(|d| *d <= end) {
        current = date.succ_opt();

        if is_weekend(date) {
            info!("Skipping weekend: {}", date);
            summary.weekend_days += 1;
            continue;
        }

        let method = source.method_label(date);
        let raw = source.fetch(date).await;
        match normalizer.normalize(raw.as_ref(), date) {
            Some(table) => {
                info!("{} [{}] ... ok ({} rows)", date, method, table.len());
                summary.ok_days += 1;
                tables.push(table);
            }
            None => {
                info!("{} [{}] ... no data", date, method);
                summary.no_data_days += 1;
            }
        }

        if !pacing.is_zero() {
            tokio::time::sleep(pacing).await;
        }
    }

    (tables, summary)
}

/// Run the whole pipeline for one date range and write its artifacts
pub async fn run(
    config: &PipelineConfig,
    source: &BhavcopySource,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<RunReport> {
    info!("Fetching NSE Bhavcopy from {} to {}", start, end);
    if let Some(last_legacy) = source.live_cutoff().pred_opt() {
        info!(
            "Old archive until {}, live bhavdata from {} onwards",
            last_legacy,
            source.live_cutoff()
        );
    }
    info!("{}", "=".repeat(70));

    let normalizer = SchemaNormalizer::new();
    let (tables, summary) =
        collect_range(source, &normalizer, start, end, config.pacing_delay).await;

    let (hits, misses, hit_rate) = normalizer.plan_cache().get_cache_stats();
    info!(
        "Column plans: {} resolved, {} reused ({:.0}% reuse)",
        misses,
        hits,
        hit_rate * 100.0
    );

    let mut report = RunReport {
        summary,
        ..RunReport::default()
    };
    if tables.is_empty() {
        return Ok(report);
    }

    let master = CanonicalTable::concat(tables);
    report.master_records = master.len();

    if config.write_master_csv {
        let path = config.master_path(start, end);
        write_master_csv(&master, &path)
            .with_context(|| format!("Failed to write master CSV {}", path.display()))?;
        info!("💾 Master CSV saved: {}", path.display());
        report.master_path = Some(path);
    }

    let filtered = config.watchlist.filter(&master);
    report.watchlist_records = filtered.len();
    report.watchlist_days = filtered
        .records()
        .iter()
        .map(|r| r.date)
        .collect::<BTreeSet<_>>()
        .len();

    if !filtered.is_empty() {
        let partitions = partition_by_year(&filtered);
        let statistics = StatisticsSummary::from_table(&filtered, config.top_symbols);
        let path = config.workbook_path(start, end);
        write_workbook(&partitions, &statistics, &path)?;
        info!("💾 Excel file saved: {}", path.display());
        report.workbook_path = Some(path);
    }

    report.watchlist = filtered;
    Ok(report)
}

/// Final run report in the log
pub fn log_report(config: &PipelineConfig, report: &RunReport) {
    if report.summary.ok_days == 0 {
        warn!("❌ No data downloaded for the specified period!");
    } else if report.watchlist_records == 0 {
        warn!(
            "⚠️ No rows matched your watchlist of {} stocks!",
            config.watchlist.len()
        );
        warn!("Please check if the symbol names match NSE trading symbols.");
    } else {
        info!("🎉 SUCCESS!");
        info!("📊 Total trading days processed: {}", report.summary.ok_days);
        info!("📈 Total records in master file: {}", report.master_records);
        info!("⭐ Watchlist records: {}", report.watchlist_records);
        info!("📅 Data spans {} trading days", report.watchlist_days);

        info!("📋 Sample data:");
        let table = &report.watchlist;
        info!("{}", table.column_names().join(" | "));
        for record in table.records().iter().take(config.sample_rows) {
            let cells: Vec<String> = table
                .row_cells(record)
                .iter()
                .map(crate::writer::cell_text)
                .collect();
            info!("{}", cells.join(" | "));
        }
    }

    info!("Trading days with no data: {}", report.summary.no_data_days);
}
