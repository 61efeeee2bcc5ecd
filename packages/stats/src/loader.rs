//! CSV decoding and row parsing for the yearly Opfer files.
//!
//! The files are Latin-1 encoded and semicolon delimited, with header
//! names that carry trailing whitespace. Decoding happens up front via
//! `encoding_rs`, after which the `csv` crate parses the UTF-8 text.

use std::collections::HashMap;
use std::ops::RangeInclusive;
use std::path::Path;

use opferdash_stats_models::{AgeBand, Bundesland, VictimRecord};

use crate::categories::short_label;
use crate::{StatsError, StatsStore};

/// The case-status value marking case-total rows. All other statuses
/// (per-suspect, per-clearance breakdowns) are skipped.
const CASE_TOTAL_STATUS: &str = "insg.";

/// Candidate headers for the total-victims column. The published files
/// misspell it as "Oper insgesamt"; corrected re-releases use the proper
/// spelling, so both are accepted.
const TOTAL_COLUMNS: &[&str] = &["Oper insgesamt", "Opfer insgesamt"];

/// Loads every configured year from `dir` into a [`StatsStore`].
///
/// Files are named `<year> Opfer.csv`. A missing or unreadable file for
/// any configured year is fatal.
///
/// # Errors
///
/// Returns [`StatsError`] if a file cannot be read, parsed, or lacks a
/// required column.
pub fn load_years(dir: &Path, years: RangeInclusive<u16>) -> Result<StatsStore, StatsError> {
    let mut records = Vec::new();

    for year in years {
        let path = dir.join(format!("{year} Opfer.csv"));
        let bytes = std::fs::read(&path).map_err(|source| StatsError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let parsed = parse_year(&bytes, year, &path.display().to_string())?;
        log::info!("Loaded {} case-total rows for {year}", parsed.len());
        records.extend(parsed);
    }

    Ok(StatsStore::new(records))
}

/// Parses one year's raw file bytes into case-total records.
///
/// # Errors
///
/// Returns [`StatsError`] on CSV syntax errors or when a required column
/// (`Straftat`, `Fallstatus`, `Gemeindeschluessel`, `Stadt/Landkreis`,
/// or the totals column) is absent from the header.
pub fn parse_year(bytes: &[u8], year: u16, path: &str) -> Result<Vec<VictimRecord>, StatsError> {
    let decoded = encoding_rs::mem::decode_latin1(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b';')
        .flexible(true)
        .from_reader(decoded.as_bytes());

    let columns = column_index(&mut reader)?;

    let offense_idx = require(&columns, "Straftat", path)?;
    let status_idx = require(&columns, "Fallstatus", path)?;
    let key_idx = require(&columns, "Gemeindeschluessel", path)?;
    let region_idx = require(&columns, "Stadt/Landkreis", path)?;
    let total_idx = TOTAL_COLUMNS
        .iter()
        .find_map(|name| columns.get(*name).copied())
        .ok_or_else(|| StatsError::MissingColumn {
            column: TOTAL_COLUMNS[0].to_string(),
            path: path.to_string(),
        })?;

    // Demographic columns are per-year optional: absent ones read as zero
    // rather than failing the whole load.
    let male_idx = columns.get("Opfer maennlich").copied();
    let female_idx = columns.get("Opfer weiblich").copied();
    let band_idx: Vec<Option<usize>> = AgeBand::all()
        .iter()
        .map(|band| columns.get(band.column()).copied())
        .collect();

    let mut records = Vec::new();

    for row in reader.records() {
        let row = row?;

        let status = row.get(status_idx).unwrap_or("").trim();
        if status != CASE_TOTAL_STATUS {
            continue;
        }

        let municipality_key = parse_count(row.get(key_idx));
        #[allow(clippy::cast_possible_truncation)]
        let municipality_key = municipality_key as u32;
        let state = Bundesland::from_code(municipality_key / 1000);
        if state.is_none() {
            log::debug!(
                "Unmapped Gemeindeschluessel {municipality_key} in {path}; \
                 row kept without state"
            );
        }

        let offense_raw = row.get(offense_idx).unwrap_or("").trim().to_string();

        let mut age_bands = [0u64; 5];
        for (slot, idx) in age_bands.iter_mut().zip(&band_idx) {
            *slot = idx.map_or(0, |i| parse_count(row.get(i)));
        }

        records.push(VictimRecord {
            year,
            municipality_key,
            region: row.get(region_idx).unwrap_or("").trim().to_string(),
            state,
            label: short_label(&offense_raw),
            offense_raw,
            total: parse_count(row.get(total_idx)),
            male: male_idx.map_or(0, |i| parse_count(row.get(i))),
            female: female_idx.map_or(0, |i| parse_count(row.get(i))),
            age_bands,
        });
    }

    Ok(records)
}

/// Builds a trimmed-header -> column-index map.
fn column_index<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
) -> Result<HashMap<String, usize>, StatsError> {
    let headers = reader.headers()?;
    Ok(headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim().to_string(), idx))
        .collect())
}

fn require(
    columns: &HashMap<String, usize>,
    name: &str,
    path: &str,
) -> Result<usize, StatsError> {
    columns
        .get(name)
        .copied()
        .ok_or_else(|| StatsError::MissingColumn {
            column: name.to_string(),
            path: path.to_string(),
        })
}

/// Parses a count cell. Empty or malformed cells read as zero.
fn parse_count(cell: Option<&str>) -> u64 {
    cell.map_or(0, |c| c.trim().parse().unwrap_or(0))
}
