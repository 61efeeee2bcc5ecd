#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Record types and taxonomies for the German police victim statistics
//! (Polizeiliche Kriminalstatistik, Opfer tables).
//!
//! This crate defines the canonical [`Bundesland`] taxonomy derived from
//! the leading digits of the Gemeindeschlüssel, the five reporting age
//! bands, and the [`VictimRecord`] row type that all other packages
//! aggregate over.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Reserved crime label for the aggregate "all offenses" rows.
///
/// Rows carrying this label are case totals across every offense group
/// and are excluded from per-category aggregates.
pub const TOTAL_LABEL: &str = "Straftaten insgesamt";

/// The 16 German federal states, keyed by the leading digits of the
/// Gemeindeschlüssel (municipality key).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Bundesland {
    #[strum(serialize = "Schleswig-Holstein")]
    #[serde(rename = "Schleswig-Holstein")]
    SchleswigHolstein,
    Hamburg,
    Niedersachsen,
    Bremen,
    #[strum(serialize = "Nordrhein-Westfalen")]
    #[serde(rename = "Nordrhein-Westfalen")]
    NordrheinWestfalen,
    Hessen,
    #[strum(serialize = "Rheinland-Pfalz")]
    #[serde(rename = "Rheinland-Pfalz")]
    RheinlandPfalz,
    #[strum(serialize = "Baden-Württemberg")]
    #[serde(rename = "Baden-Württemberg")]
    BadenWuerttemberg,
    Bayern,
    Saarland,
    Berlin,
    Brandenburg,
    #[strum(serialize = "Mecklenburg-Vorpommern")]
    #[serde(rename = "Mecklenburg-Vorpommern")]
    MecklenburgVorpommern,
    Sachsen,
    #[strum(serialize = "Sachsen-Anhalt")]
    #[serde(rename = "Sachsen-Anhalt")]
    SachsenAnhalt,
    #[strum(serialize = "Thüringen")]
    #[serde(rename = "Thüringen")]
    Thueringen,
}

impl Bundesland {
    /// Resolves a state from the leading digits of a Gemeindeschlüssel
    /// (`key / 1000`). Returns `None` for codes outside 1..=16.
    #[must_use]
    pub const fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(Self::SchleswigHolstein),
            2 => Some(Self::Hamburg),
            3 => Some(Self::Niedersachsen),
            4 => Some(Self::Bremen),
            5 => Some(Self::NordrheinWestfalen),
            6 => Some(Self::Hessen),
            7 => Some(Self::RheinlandPfalz),
            8 => Some(Self::BadenWuerttemberg),
            9 => Some(Self::Bayern),
            10 => Some(Self::Saarland),
            11 => Some(Self::Berlin),
            12 => Some(Self::Brandenburg),
            13 => Some(Self::MecklenburgVorpommern),
            14 => Some(Self::Sachsen),
            15 => Some(Self::SachsenAnhalt),
            16 => Some(Self::Thueringen),
            _ => None,
        }
    }

    /// Returns the numeric state code (leading Gemeindeschlüssel digits).
    #[must_use]
    pub const fn code(self) -> u32 {
        match self {
            Self::SchleswigHolstein => 1,
            Self::Hamburg => 2,
            Self::Niedersachsen => 3,
            Self::Bremen => 4,
            Self::NordrheinWestfalen => 5,
            Self::Hessen => 6,
            Self::RheinlandPfalz => 7,
            Self::BadenWuerttemberg => 8,
            Self::Bayern => 9,
            Self::Saarland => 10,
            Self::Berlin => 11,
            Self::Brandenburg => 12,
            Self::MecklenburgVorpommern => 13,
            Self::Sachsen => 14,
            Self::SachsenAnhalt => 15,
            Self::Thueringen => 16,
        }
    }

    /// Returns all 16 states in Gemeindeschlüssel order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::SchleswigHolstein,
            Self::Hamburg,
            Self::Niedersachsen,
            Self::Bremen,
            Self::NordrheinWestfalen,
            Self::Hessen,
            Self::RheinlandPfalz,
            Self::BadenWuerttemberg,
            Self::Bayern,
            Self::Saarland,
            Self::Berlin,
            Self::Brandenburg,
            Self::MecklenburgVorpommern,
            Self::Sachsen,
            Self::SachsenAnhalt,
            Self::Thueringen,
        ]
    }
}

/// The five victim age bands reported by the statistics.
///
/// Each band knows its CSV column header (after whitespace trimming)
/// and its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgeBand {
    /// Children under 14
    Children,
    /// Adolescents 14 to under 18
    Adolescents,
    /// Young adults 18 to under 21
    YoungAdults,
    /// Adults 21 to under 60
    Adults,
    /// Seniors 60 and older
    Seniors,
}

impl AgeBand {
    /// The CSV column carrying this band's victim count.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Children => "Opfer Kinder bis 14 Jahre- insgesamt",
            Self::Adolescents => "Opfer Jugendliche 14 bis unter 18 Jahre - insgesamt",
            Self::YoungAdults => "Opfer - Heranwachsende 18 bis unter 21 Jahre - insgesamt",
            Self::Adults => "Opfer Erwachsene 21 bis unter 60 Jahre - insgesamt",
            Self::Seniors => "Opfer - Erwachsene 60 Jahre und aelter - insgesamt",
        }
    }

    /// Display label for chart axes.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Children => "Kinder <14",
            Self::Adolescents => "Jugendliche 14–<18",
            Self::YoungAdults => "Heranwachsende 18–<21",
            Self::Adults => "Erwachsene 21–<60",
            Self::Seniors => "Senior:innen 60+",
        }
    }

    /// Returns all bands in ascending age order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Children,
            Self::Adolescents,
            Self::YoungAdults,
            Self::Adults,
            Self::Seniors,
        ]
    }
}

/// One case-total row of the victim statistics: a (year, municipality,
/// offense group) cell with its per-demographic victim counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VictimRecord {
    /// Reporting year the source file covers.
    pub year: u16,
    /// Gemeindeschlüssel; leading digits encode the federal state.
    pub municipality_key: u32,
    /// Free-text city/district name as printed in the source file.
    pub region: String,
    /// Federal state derived from the municipality key, `None` when the
    /// key prefix maps to no known state. Such rows are kept but excluded
    /// from state-scoped aggregates.
    pub state: Option<Bundesland>,
    /// Raw offense text from the `Straftat` column.
    pub offense_raw: String,
    /// Short canonical crime label derived from `offense_raw`.
    pub label: String,
    /// Total victims across all demographics.
    pub total: u64,
    /// Male victims.
    pub male: u64,
    /// Female victims.
    pub female: u64,
    /// Victim counts per age band, in [`AgeBand::all`] order.
    pub age_bands: [u64; 5],
}

impl VictimRecord {
    /// Victim count for one age band.
    #[must_use]
    pub const fn age_band(&self, band: AgeBand) -> u64 {
        self.age_bands[band as usize]
    }

    /// Whether this row carries the aggregate "all offenses" label.
    #[must_use]
    pub fn is_total(&self) -> bool {
        self.label == TOTAL_LABEL
    }
}

/// A sidebar filter selection. Empty vectors mean "no restriction",
/// which is equivalent to selecting every available value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    /// Selected years; empty = all years.
    pub years: Vec<u16>,
    /// Selected short crime labels; empty = all labels.
    pub labels: Vec<String>,
    /// Selected federal states; empty = all states.
    pub states: Vec<Bundesland>,
}

impl FilterSelection {
    /// Whether a record passes this selection.
    #[must_use]
    pub fn matches(&self, record: &VictimRecord) -> bool {
        if !self.years.is_empty() && !self.years.contains(&record.year) {
            return false;
        }
        if !self.labels.is_empty() && !self.labels.contains(&record.label) {
            return false;
        }
        if !self.states.is_empty() {
            match record.state {
                Some(state) if self.states.contains(&state) => {}
                _ => return false,
            }
        }
        true
    }
}
