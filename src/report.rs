//! Output formatting and persistence for aggregated availability data.
//!
//! Two artifacts per run: a raw partials file for eyeballing the per-key
//! readings and a proper CSV summary ranked by average availability.

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::aggregate::{DirectoryData, PeriodAggregate, SimpleAggregate};
use crate::stats::SummaryRow;

/// Subdirectory of the input directory that receives both report files.
pub const OUTPUT_SUBDIR: &str = "output";

/// Creates `<directory>/output` if missing and returns its path.
pub fn ensure_output_dir(directory: &Path) -> Result<PathBuf> {
    let output_dir = directory.join(OUTPUT_SUBDIR);
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;
    Ok(output_dir)
}

/// Writes the partials and summary files for one directory run.
///
/// Files are named after the final component of `directory`:
/// `<name>.partials.csv` and `<name>.output.csv`.
pub fn write_reports(directory: &Path, data: &DirectoryData) -> Result<()> {
    // `.` and `..` have no file name; resolve them before taking the stem
    let canonical;
    let named = match directory.file_name() {
        Some(_) => directory,
        None => {
            canonical = directory
                .canonicalize()
                .with_context(|| format!("resolving directory {}", directory.display()))?;
            canonical.as_path()
        }
    };
    let dir_name = named
        .file_name()
        .and_then(|name| name.to_str())
        .with_context(|| format!("directory {} has no usable name", directory.display()))?;

    let output_dir = ensure_output_dir(directory)?;
    let partials_path = output_dir.join(format!("{dir_name}.partials.csv"));
    let summary_path = output_dir.join(format!("{dir_name}.output.csv"));

    let rows = data.summarize();
    match data {
        DirectoryData::Period(agg) => {
            write_period_partials(&partials_path, agg)?;
            write_summary(&summary_path, &rows, true)?;
        }
        DirectoryData::Simple(agg) => {
            write_simple_partials(&partials_path, agg)?;
            write_summary(&summary_path, &rows, false)?;
        }
    }

    info!(
        partials = %partials_path.display(),
        summary = %summary_path.display(),
        keys = rows.len(),
        "Reports written"
    );
    Ok(())
}

/// Header line of sorted period columns, then per-key readings aligned to
/// that column order. Periods a key never reported in contribute no value.
fn write_period_partials(path: &Path, agg: &PeriodAggregate) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating partials file {}", path.display()))?;
    let mut out = BufWriter::new(file);

    let columns: Vec<&str> = agg.periods.iter().map(String::as_str).collect();
    writeln!(out, "BP key: {}", columns.join(","))?;

    for key in &agg.keys {
        let Some(cells) = agg.cells.get(key) else {
            continue;
        };
        let values: Vec<String> = columns
            .iter()
            .filter_map(|period| cells.get(*period))
            .map(|value| format!("{value:?}"))
            .collect();
        let line = values.join(",");
        debug!(key = %key, values = %line, "Partial values");
        writeln!(out, "{key}: {line}")?;
    }

    out.flush()?;
    Ok(())
}

/// One line per key with the raw list of readings in arrival order.
fn write_simple_partials(path: &Path, agg: &SimpleAggregate) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating partials file {}", path.display()))?;
    let mut out = BufWriter::new(file);

    for key in &agg.keys {
        let Some(values) = agg.values.get(key) else {
            continue;
        };
        debug!(key = %key, values = ?values, "Partial values");
        writeln!(out, "{key}: {values:?}")?;
    }

    out.flush()?;
    Ok(())
}

fn write_summary(path: &Path, rows: &[SummaryRow], with_header: bool) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("creating summary file {}", path.display()))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if with_header {
        writer.write_record(["BP key", "average %", "number of submissions"])?;
    }
    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}
