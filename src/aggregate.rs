//! Directory scanning and in-memory accumulation of availability readings.
//!
//! Two accumulation modes exist, matching the two historical shapes of this
//! report: [`Mode::Period`] keys every reading by its half-day column and
//! overwrites duplicates, [`Mode::Simple`] appends every reading to a flat
//! per-key list.

use crate::parser;
use crate::period;
use crate::stats::{self, SummaryRow};
use anyhow::{Context, Result};
use clap::ValueEnum;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs;
use std::path::Path;
use tracing::info;

/// Accumulation strategy for a directory run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Only files matching the half-day filename pattern are processed; one
    /// reading per key per period, last write wins.
    Period,
    /// Every `.csv` file is processed; readings append to a per-key list.
    Simple,
}

/// Period-keyed accumulation: `key -> period label -> reading`.
#[derive(Debug, Default)]
pub struct PeriodAggregate {
    /// Keys in first-seen order; drives summary tie-breaking.
    pub(crate) keys: Vec<String>,
    pub(crate) cells: HashMap<String, BTreeMap<String, f64>>,
    /// Distinct period labels across all matched files, sorted.
    pub(crate) periods: BTreeSet<String>,
    /// Count of matched files, the averaging baseline.
    pub(crate) total_periods: usize,
}

impl PeriodAggregate {
    fn record(&mut self, key: &str, period: &str, value: f64) {
        if !self.cells.contains_key(key) {
            self.keys.push(key.to_string());
        }
        self.cells
            .entry(key.to_string())
            .or_default()
            .insert(period.to_string(), value);
    }

    fn summarize(&self) -> Vec<SummaryRow> {
        let mut rows = Vec::with_capacity(self.keys.len());
        for key in &self.keys {
            let Some(cells) = self.cells.get(key) else {
                continue;
            };
            let submitted = cells.len();
            let sum: f64 = cells.values().sum();
            rows.push(SummaryRow {
                key: key.clone(),
                average_value: stats::average_value(sum, self.total_periods, submitted),
                submitted,
            });
        }
        sort_by_average(&mut rows);
        rows
    }
}

/// List-based accumulation: `key -> readings`, duplicates retained.
#[derive(Debug, Default)]
pub struct SimpleAggregate {
    pub(crate) keys: Vec<String>,
    pub(crate) values: HashMap<String, Vec<f64>>,
    pub(crate) total_files: usize,
}

impl SimpleAggregate {
    fn record(&mut self, key: &str, value: f64) {
        if !self.values.contains_key(key) {
            self.keys.push(key.to_string());
        }
        self.values.entry(key.to_string()).or_default().push(value);
    }

    fn summarize(&self) -> Vec<SummaryRow> {
        let mut rows = Vec::with_capacity(self.keys.len());
        for key in &self.keys {
            let Some(values) = self.values.get(key) else {
                continue;
            };
            let submitted = values.len();
            let sum: f64 = values.iter().sum();
            rows.push(SummaryRow {
                key: key.clone(),
                average_value: stats::average_value(sum, self.total_files, submitted),
                submitted,
            });
        }
        sort_by_average(&mut rows);
        rows
    }
}

/// Everything accumulated from one directory scan.
#[derive(Debug)]
pub enum DirectoryData {
    Period(PeriodAggregate),
    Simple(SimpleAggregate),
}

impl DirectoryData {
    /// Summary rows sorted ascending by average, ties in key insertion order.
    pub fn summarize(&self) -> Vec<SummaryRow> {
        match self {
            DirectoryData::Period(agg) => agg.summarize(),
            DirectoryData::Simple(agg) => agg.summarize(),
        }
    }
}

// Vec::sort_by is stable, so equal averages keep insertion order.
fn sort_by_average(rows: &mut [SummaryRow]) {
    rows.sort_by(|a, b| a.average_value.total_cmp(&b.average_value));
}

/// Scans `directory` and accumulates every relevant report.
///
/// Filenames are sorted before processing so repeated runs over the same
/// directory produce identical output regardless of readdir order. Any file
/// that fails to parse aborts the whole run.
pub fn collect(directory: &Path, mode: Mode) -> Result<DirectoryData> {
    let mut names = Vec::new();
    for entry in fs::read_dir(directory)
        .with_context(|| format!("listing directory {}", directory.display()))?
    {
        let entry = entry.with_context(|| format!("listing directory {}", directory.display()))?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if name.ends_with(".csv") {
                names.push(name.to_string());
            }
        }
    }
    names.sort();

    match mode {
        Mode::Period => {
            let mut agg = PeriodAggregate::default();
            for name in &names {
                match period::period_label(name) {
                    Some(label) => {
                        info!(file = %name, period = %label, "Processing file");
                        agg.total_periods += 1;
                        agg.periods.insert(label.clone());
                        for (key, value) in parser::read_report(&directory.join(name))? {
                            agg.record(&key, &label, value);
                        }
                    }
                    None => info!(file = %name, "Skipping file"),
                }
            }
            Ok(DirectoryData::Period(agg))
        }
        Mode::Simple => {
            let mut agg = SimpleAggregate::default();
            agg.total_files = names.len();
            for name in &names {
                info!(file = %name, "Processing file");
                for (key, value) in parser::read_report(&directory.join(name))? {
                    agg.record(&key, value);
                }
            }
            Ok(DirectoryData::Simple(agg))
        }
    }
}
