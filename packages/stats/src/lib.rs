#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Ingestion of the yearly victim statistics CSV files.
//!
//! Each reporting year ships as one semicolon-delimited, Latin-1 encoded
//! file (`<year> Opfer.csv`). The loader decodes and parses every
//! configured year into a single in-memory [`StatsStore`] that the rest
//! of the system treats as read-only.

pub mod categories;
pub mod loader;

use opferdash_stats_models::VictimRecord;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors that can occur while loading statistics files.
#[derive(Debug, Error)]
pub enum StatsError {
    /// A configured year's file is missing or unreadable.
    #[error("Failed to read statistics file {path}: {source}")]
    Io {
        /// Path of the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// CSV parsing failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A file is missing a column the loader cannot work without.
    #[error("Missing required column '{column}' in {path}")]
    MissingColumn {
        /// The column header that was expected after trimming.
        column: String,
        /// Path of the offending file.
        path: String,
    },
}

/// The process-lifetime statistics dataset, loaded once at startup and
/// never mutated afterwards.
#[derive(Debug, Default)]
pub struct StatsStore {
    records: Vec<VictimRecord>,
}

impl StatsStore {
    /// Wraps already-parsed records.
    #[must_use]
    pub const fn new(records: Vec<VictimRecord>) -> Self {
        Self { records }
    }

    /// All case-total rows across every loaded year.
    #[must_use]
    pub fn records(&self) -> &[VictimRecord] {
        &self.records
    }

    /// Distinct years present, ascending.
    #[must_use]
    pub fn years(&self) -> Vec<u16> {
        let set: BTreeSet<u16> = self.records.iter().map(|r| r.year).collect();
        set.into_iter().collect()
    }

    /// Distinct short crime labels present, sorted.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self.records.iter().map(|r| r.label.as_str()).collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Distinct federal states present, in Gemeindeschlüssel order.
    #[must_use]
    pub fn states(&self) -> Vec<opferdash_stats_models::Bundesland> {
        let set: BTreeSet<_> = self.records.iter().filter_map(|r| r.state).collect();
        set.into_iter().collect()
    }
}
