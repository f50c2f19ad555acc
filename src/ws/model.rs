//! Wire models for the consumed web-service endpoints.
//!
//! Only the fields the report actually reads are mapped; everything else in
//! the responses is ignored by serde.

use serde::Deserialize;

/// A server-returned record describing a project, module, or file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Resource {
    pub id: Option<i64>,
    pub key: Option<String>,
    pub name: Option<String>,
    #[serde(rename = "lname")]
    pub long_name: Option<String>,
    pub scope: Option<String>,
    pub qualifier: Option<String>,
    pub description: Option<String>,
    pub version: Option<String>,
    /// Analysis date, `yyyy-MM-ddTHH:mm:ss±ZZZZ`.
    pub date: Option<String>,
    /// Measures attached to this node.
    #[serde(default)]
    pub msr: Vec<WsMeasure>,
}

impl Resource {
    /// The measure for a metric key, if the node carries it.
    pub fn measure(&self, metric_key: &str) -> Option<&WsMeasure> {
        self.msr
            .iter()
            .find(|m| m.key.as_deref() == Some(metric_key))
    }

    /// Display name, preferring the long form when present.
    pub fn display_name(&self) -> Option<&str> {
        self.long_name
            .as_deref()
            .filter(|n| !n.is_empty())
            .or(self.name.as_deref())
    }
}

/// One measure node inside a resource (`msr` entries).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WsMeasure {
    pub key: Option<String>,
    pub val: Option<f64>,
    pub frmt_val: Option<String>,
    pub data: Option<String>,
    pub alert: Option<String>,
    /// Qualitative trend tag, absent when the server has no history.
    pub trend: Option<i32>,
    /// Quantitative variation tag.
    pub var: Option<i32>,
}

/// One reported rule violation instance.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Issue {
    pub key: Option<String>,
    pub component: Option<String>,
    pub project: Option<String>,
    pub rule: Option<String>,
    pub severity: Option<String>,
    pub message: Option<String>,
    pub line: Option<u32>,
    pub status: Option<String>,
}

/// Paging block of list envelopes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Paging {
    #[serde(rename = "pageIndex")]
    pub page_index: u32,
    #[serde(rename = "pageSize")]
    pub page_size: u32,
    pub total: u32,
}

/// Envelope of `/api/issues/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Issues {
    pub paging: Option<Paging>,
    #[serde(default)]
    pub issues: Vec<Issue>,
}

/// Rule metadata as returned by `/api/rules/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WsRule {
    pub key: Option<String>,
    pub name: Option<String>,
    pub severity: Option<String>,
    pub lang: Option<String>,
}

/// Envelope of `/api/rules/search`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Rules {
    #[serde(default)]
    pub rules: Vec<WsRule>,
}

/// One catalog entry of `/api/metrics`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metric {
    pub key: Option<String>,
    pub name: Option<String>,
}

/// Envelope of `/api/metrics`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Metrics {
    #[serde(default)]
    pub metrics: Vec<Metric>,
}
