//! A minimal Plotly-compatible figure description.
//!
//! The frontend hands these straight to `Plotly.newPlot`, so field names
//! follow the Plotly JSON schema. Only the fields the builders use are
//! modeled; anything exotic goes through the flattened `extra` map.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Message shown in placeholder figures when a selection yields no rows.
pub const NO_DATA_MESSAGE: &str = "Keine Daten verfügbar";

/// A self-contained chart description: traces plus layout.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Figure {
    /// Traces in draw order.
    pub data: Vec<Trace>,
    /// Layout options.
    pub layout: Layout,
}

/// One Plotly trace.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Trace {
    /// Plotly trace type ("scatter", "bar", "treemap", ...).
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub orientation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parents: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub geojson: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featureidkey: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    /// Escape hatch for trace options without a dedicated field.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Trace {
    /// A trace of the given Plotly type with everything else unset.
    #[must_use]
    pub fn new(kind: &str) -> Self {
        Self {
            kind: kind.to_string(),
            ..Self::default()
        }
    }
}

/// Marker styling for bar/scatter traces.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Marker {
    /// A single color, or one color per point.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showscale: Option<bool>,
}

/// Figure layout.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Layout {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<Axis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barmode: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub annotations: Vec<Annotation>,
    /// Escape hatch for layout options without a dedicated field
    /// (e.g. the `geo` block of choropleth figures).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

/// Axis options.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Axis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visible: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tickangle: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub autorange: Option<String>,
}

/// A free-floating text annotation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Annotation {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub showarrow: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<Value>,
}

/// The "no data" placeholder: a single annotation on hidden axes.
///
/// Every builder returns this instead of erroring when its input is
/// empty, so an empty filter selection renders as labeled empty panels.
#[must_use]
pub fn empty_figure(message: &str) -> Figure {
    Figure {
        data: Vec::new(),
        layout: Layout {
            xaxis: Some(Axis {
                visible: Some(false),
                ..Axis::default()
            }),
            yaxis: Some(Axis {
                visible: Some(false),
                ..Axis::default()
            }),
            annotations: vec![Annotation {
                text: message.to_string(),
                x: 0.5,
                y: 0.5,
                showarrow: false,
                font: Some(serde_json::json!({ "size": 14 })),
            }],
            ..Layout::default()
        },
    }
}

/// [`empty_figure`] with the default message.
#[must_use]
pub fn no_data() -> Figure {
    empty_figure(NO_DATA_MESSAGE)
}
