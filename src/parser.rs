//! Row parser for a single half-day availability report.

use anyhow::{Context, Result, bail};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Every report starts with this many free-form header lines, discarded unread.
pub const HEADER_LINES: usize = 4;

/// Reads one report file into `(key, value)` rows in file order.
///
/// Rows are semicolon-delimited; field 0 is the reporting key (used
/// verbatim), field 1 must parse as a float. Any malformed row, and any file
/// shorter than the mandatory header, is an error — there is no row-skipping
/// fallback.
pub fn read_report(path: &Path) -> Result<Vec<(String, f64)>> {
    let file =
        File::open(path).with_context(|| format!("opening report {}", path.display()))?;
    let mut reader = BufReader::new(file);

    let mut line = String::new();
    for _ in 0..HEADER_LINES {
        line.clear();
        let bytes = reader
            .read_line(&mut line)
            .with_context(|| format!("reading header of {}", path.display()))?;
        if bytes == 0 {
            bail!(
                "{}: expected {} header lines, file is shorter",
                path.display(),
                HEADER_LINES
            );
        }
    }

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.records() {
        let record = result.with_context(|| format!("reading row of {}", path.display()))?;
        let key = record
            .get(0)
            .with_context(|| format!("{}: row has no key field", path.display()))?;
        let raw = record.get(1).with_context(|| {
            format!("{}: row for {:?} has no value field", path.display(), key)
        })?;
        let value: f64 = raw.trim().parse().with_context(|| {
            format!("{}: row for {:?} has non-numeric value {:?}", path.display(), key, raw)
        })?;

        rows.push((key.to_string(), value));
    }

    Ok(rows)
}
