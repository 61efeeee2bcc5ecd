#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Figure builders for the dashboard pages.
//!
//! Each builder is a stateless function from a filtered record slice (or
//! pre-joined choropleth rows) to one self-contained [`figure::Figure`].
//! Empty input always yields a labeled placeholder, never an error, so
//! the handlers can pass filter results through unconditionally.

pub mod categories;
pub mod figure;
pub mod geo;
pub mod overview;
pub mod temporal;
pub mod trends;

pub use figure::{Figure, empty_figure, no_data};

/// Named colorscales selectable via the safety-mode color control.
/// `safe` switches the sequential scales to a colorblind-safe palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Default warm scale.
    #[default]
    Standard,
    /// Colorblind-safe scale.
    Safe,
}

impl ColorMode {
    /// Parses the `colors` query value; anything but `safe` is standard.
    #[must_use]
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some("safe") => Self::Safe,
            _ => Self::Standard,
        }
    }

    /// The warm sequential colorscale name for this mode.
    #[must_use]
    pub const fn sequential(self) -> &'static str {
        match self {
            Self::Standard => "Reds",
            Self::Safe => "Viridis",
        }
    }

    /// The cool sequential colorscale (state comparison bars).
    #[must_use]
    pub const fn sequential_cool(self) -> &'static str {
        match self {
            Self::Standard => "Blues",
            Self::Safe => "Viridis",
        }
    }
}
