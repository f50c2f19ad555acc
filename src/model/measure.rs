//! Measure values and the keyed measure collection for one snapshot.

use std::collections::HashMap;

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

/// A single metric's value plus formatting and trend metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Measure {
    /// Metric key this measure belongs to.
    pub key: String,
    /// Raw numeric value, as reported by the server.
    pub value: String,
    /// Display-formatted value.
    pub format_value: String,
    /// Free-text payload for multi-value metrics (distributions, profiles).
    pub data: Option<String>,
    /// Qualitative tendency: sign encodes direction, 0 means unchanged.
    pub qualitative_tendency: i32,
    /// Quantitative tendency: signed delta magnitude.
    pub quantitative_tendency: i32,
    /// Alert level attached by the server, if any.
    pub alert: Option<String>,
}

impl Measure {
    /// Create a measure with just a key and formatted value.
    pub fn new(key: impl Into<String>, format_value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            format_value: format_value.into(),
            ..Self::default()
        }
    }
}

/// All measures of one project snapshot, keyed by metric key.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Measures {
    items: HashMap<String, Measure>,
    /// Project version at the analyzed snapshot.
    pub version: Option<String>,
    /// Analysis date of the snapshot.
    pub date: Option<DateTime<FixedOffset>>,
}

impl Measures {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a measure under its own key. Last write wins on collision.
    pub fn add(&mut self, measure: Measure) {
        self.items.insert(measure.key.clone(), measure);
    }

    /// Look up a measure by metric key.
    pub fn get(&self, key: &str) -> Option<&Measure> {
        self.items.get(key)
    }

    /// The formatted value for a metric, if present.
    pub fn format_value(&self, key: &str) -> Option<&str> {
        self.items.get(key).map(|m| m.format_value.as_str())
    }

    /// Whether a metric key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.items.contains_key(key)
    }

    /// Number of measures held.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection holds no measures.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over the metric keys held.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.items.keys().map(String::as_str)
    }
}
