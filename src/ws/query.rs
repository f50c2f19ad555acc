//! Typed GET queries against the web-service API.
//!
//! Each query knows its base path and renders its parameters as an ordered
//! key/value list; array values are comma-joined. The connector turns that
//! into an actual request.

use std::time::Duration;

use crate::model::Severity;

/// Scope tag marking project-level resource nodes.
pub const PROJECT_SCOPE: &str = "PRJ";
/// Scope tag marking file-level resource nodes.
pub const FILE_SCOPE: &str = "FIL";
/// Depth value meaning "recurse into all folders".
pub const DEPTH_UNLIMITED: i32 = -1;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A query the connector can execute.
pub trait WsQuery {
    /// Base path under the server URL, e.g. `/api/resources`.
    fn base_path(&self) -> &'static str;

    /// Ordered query parameters. Arrays are already comma-joined.
    fn params(&self) -> Vec<(String, String)>;

    /// Locale for the Accept-Language header, if any.
    fn locale(&self) -> Option<&str> {
        None
    }

    /// Per-request timeout.
    fn timeout(&self) -> Duration {
        DEFAULT_TIMEOUT
    }
}

fn push_opt(params: &mut Vec<(String, String)>, key: &str, value: Option<impl ToString>) {
    if let Some(v) = value {
        params.push((key.to_string(), v.to_string()));
    }
}

fn push_list(params: &mut Vec<(String, String)>, key: &str, values: &[String]) {
    if !values.is_empty() {
        params.push((key.to_string(), values.join(",")));
    }
}

/// Lookup of resource nodes by key, optionally with measures attached.
#[derive(Debug, Clone, Default)]
pub struct ResourceQuery {
    resource: String,
    depth: Option<i32>,
    metrics: Vec<String>,
    scopes: Vec<String>,
    limit: Option<u32>,
    include_trends: bool,
}

impl ResourceQuery {
    /// Plain lookup of the node itself.
    pub fn by_key(resource: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            ..Self::default()
        }
    }

    /// Lookup requesting the given metrics on each returned node.
    pub fn for_metrics<S: AsRef<str>>(resource: impl Into<String>, metrics: &[S]) -> Self {
        Self {
            resource: resource.into(),
            metrics: metrics.iter().map(|m| m.as_ref().to_string()).collect(),
            ..Self::default()
        }
    }

    /// Restrict the recursion depth; [`DEPTH_UNLIMITED`] recurses fully.
    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = Some(depth);
        self
    }

    /// Restrict results to the given scope tag.
    pub fn with_scope(mut self, scope: &str) -> Self {
        self.scopes = vec![scope.to_string()];
        self
    }

    /// Cap the number of returned nodes.
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Ask the server to attach trend data to each measure.
    pub fn with_trends(mut self) -> Self {
        self.include_trends = true;
        self
    }
}

impl WsQuery for ResourceQuery {
    fn base_path(&self) -> &'static str {
        "/api/resources"
    }

    fn params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();
        push_opt(&mut params, "depth", self.depth);
        if self.include_trends {
            params.push(("includetrends".to_string(), "true".to_string()));
        }
        push_opt(&mut params, "limit", self.limit);
        push_list(&mut params, "metrics", &self.metrics);
        params.push(("resource".to_string(), self.resource.clone()));
        push_list(&mut params, "scopes", &self.scopes);
        params
    }
}

/// Issue search filtered by component and severity, with paging.
#[derive(Debug, Clone)]
pub struct IssueQuery {
    component_key: String,
    severity: Option<Severity>,
    page: u32,
    page_size: u32,
}

impl IssueQuery {
    /// Default page size; the server caps larger requests anyway.
    pub const PAGE_SIZE: u32 = 500;

    /// Search all issues of one component.
    pub fn for_component(component_key: impl Into<String>) -> Self {
        Self {
            component_key: component_key.into(),
            severity: None,
            page: 1,
            page_size: Self::PAGE_SIZE,
        }
    }

    /// Restrict to one severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Request a specific result page (1-based).
    pub fn with_page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }
}

impl WsQuery for IssueQuery {
    fn base_path(&self) -> &'static str {
        "/api/issues/search"
    }

    fn params(&self) -> Vec<(String, String)> {
        let mut params = vec![("componentKeys".to_string(), self.component_key.clone())];
        push_opt(&mut params, "severities", self.severity.map(|s| s.as_str()));
        params.push(("p".to_string(), self.page.to_string()));
        params.push(("ps".to_string(), self.page_size.to_string()));
        params
    }
}

/// Rule metadata lookup by rule key.
#[derive(Debug, Clone)]
pub struct RuleQuery {
    rule_key: String,
}

impl RuleQuery {
    /// Look up one rule by its key.
    pub fn by_key(rule_key: impl Into<String>) -> Self {
        Self {
            rule_key: rule_key.into(),
        }
    }
}

impl WsQuery for RuleQuery {
    fn base_path(&self) -> &'static str {
        "/api/rules/search"
    }

    fn params(&self) -> Vec<(String, String)> {
        vec![("rule_key".to_string(), self.rule_key.clone())]
    }
}

/// Listing of the server's full metric catalog.
#[derive(Debug, Clone, Default)]
pub struct MetricQuery;

impl MetricQuery {
    /// Request every metric the server knows about.
    pub fn all() -> Self {
        Self
    }
}

impl WsQuery for MetricQuery {
    fn base_path(&self) -> &'static str {
        "/api/metrics"
    }

    fn params(&self) -> Vec<(String, String)> {
        Vec::new()
    }
}
