#![allow(dead_code)]

use std::cell::RefCell;
use std::rc::Rc;

use sonar_report::ws::query::WsQuery;
use sonar_report::ws::{Connector, WsClient};
use sonar_report::Result;

/// In-memory stand-in for the analysis server.
///
/// Routes match on base path plus a subset of query parameters; the most
/// specific matching route wins, and anything unmatched answers like a 404.
/// Every executed query is recorded so tests can assert on what was asked.
pub struct FakeServer {
    routes: Vec<Route>,
    calls: Rc<RefCell<Vec<String>>>,
}

#[derive(Clone)]
struct Route {
    path: &'static str,
    matches: Vec<(String, String)>,
    body: String,
}

impl FakeServer {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Register a canned response for queries against `path` whose parameters
    /// contain every `matches` pair.
    pub fn route(&mut self, path: &'static str, matches: &[(&str, &str)], body: &str) {
        self.routes.push(Route {
            path,
            matches: matches
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.to_string(),
        });
    }

    /// A client wired to this server. The server keeps seeing calls made
    /// through clients created before or after.
    pub fn client(&self) -> WsClient {
        WsClient::new(Box::new(FakeConnector {
            routes: self.routes.clone(),
            calls: Rc::clone(&self.calls),
        }))
    }

    /// All executed queries, rendered as `path?k=v&...`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// How many executed queries contain `needle`.
    pub fn calls_matching(&self, needle: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.contains(needle))
            .count()
    }
}

struct FakeConnector {
    routes: Vec<Route>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl Connector for FakeConnector {
    fn execute(&self, query: &dyn WsQuery) -> Result<Option<String>> {
        let params = query.params();
        let rendered = format!(
            "{}?{}",
            query.base_path(),
            params
                .iter()
                .map(|(k, v)| format!("{k}={v}"))
                .collect::<Vec<_>>()
                .join("&")
        );
        self.calls.borrow_mut().push(rendered);

        let best = self
            .routes
            .iter()
            .filter(|route| route.path == query.base_path())
            .filter(|route| {
                route
                    .matches
                    .iter()
                    .all(|(k, v)| params.iter().any(|(pk, pv)| pk == k && pv == v))
            })
            .max_by_key(|route| route.matches.len());
        Ok(best.map(|route| route.body.clone()))
    }
}

/// JSON body for `/api/issues/search`: `count` issues per `(rule, severity)`
/// entry, all carrying a line number.
pub fn issues_body(entries: &[(&str, &str, usize)]) -> String {
    let mut issues = Vec::new();
    for (rule, severity, count) in entries {
        for i in 0..*count {
            issues.push(serde_json::json!({
                "key": format!("{rule}-{i}"),
                "rule": rule,
                "severity": severity,
                "component": format!("com.acme:app:{rule}.java"),
                "line": 10 + i,
            }));
        }
    }
    serde_json::json!({
        "paging": {"pageIndex": 1, "pageSize": 500, "total": issues.len()},
        "issues": issues,
    })
    .to_string()
}

/// JSON body for `/api/rules/search` returning exactly one rule.
pub fn rule_body(key: &str, name: &str) -> String {
    serde_json::json!({
        "rules": [{"key": key, "name": name, "severity": "MAJOR"}],
    })
    .to_string()
}

/// JSON body for `/api/metrics` listing the given metric keys.
pub fn metrics_body(keys: &[String]) -> String {
    let metrics: Vec<_> = keys
        .iter()
        .map(|k| serde_json::json!({"key": k, "name": k}))
        .collect();
    serde_json::json!({ "metrics": metrics }).to_string()
}
