//! Ranking of the most violated rules.
//!
//! The server has no "most violated rules" endpoint, so the ranking is done
//! client side: issues are fetched per severity, most severe first, grouped
//! by rule, and sorted by severity then frequency. The details limit only
//! throttles discovery between severity passes; the final list may exceed it
//! by up to one pass's discoveries. That matches the upstream behavior the
//! report's consumers expect, so it is kept rather than hard-capped.

use std::collections::HashMap;

use tracing::{debug, error};

use crate::core::{Outcome, Result};
use crate::model::{Rule, Severity, Violation};
use crate::ws::model::{Issue, Issues, Rules, WsRule};
use crate::ws::query::{IssueQuery, RuleQuery};
use crate::ws::WsClient;

/// Issues grouped under one rule key.
#[derive(Debug, Clone)]
struct IssueGroup {
    /// Severity of the pass that first discovered the rule.
    severity: Severity,
    issues: Vec<Issue>,
}

/// Ranks rules by severity and violation frequency.
pub struct RuleRanker<'a> {
    client: &'a WsClient,
}

impl<'a> RuleRanker<'a> {
    pub fn new(client: &'a WsClient) -> Self {
        Self { client }
    }

    /// Fetch and rank the most violated rules for a project.
    ///
    /// A rule whose metadata lookup does not return exactly one match is
    /// logged and dropped, degrading the result to [`Outcome::Partial`].
    pub fn most_violated(
        &self,
        project_key: &str,
        details_limit: u32,
    ) -> Result<Outcome<Vec<Rule>>> {
        let mut groups: HashMap<String, IssueGroup> = HashMap::new();
        let mut discovery_order: Vec<String> = Vec::new();
        let mut budget = i64::from(details_limit);

        for severity in Severity::MOST_SEVERE_FIRST {
            if budget <= 0 {
                break;
            }
            let issues = self.issues_for_severity(project_key, severity)?;
            if issues.is_empty() {
                debug!(%severity, "no violations at this level");
                continue;
            }
            let discovered = group_issues(issues, severity, &mut groups, &mut discovery_order);
            debug!(count = discovered, %severity, "new rules discovered");
            budget -= discovered as i64;
        }

        if groups.is_empty() {
            return Ok(Outcome::Empty);
        }

        let ranked_keys = rank(&groups, discovery_order);

        let mut rules = Vec::with_capacity(ranked_keys.len());
        let mut skipped = false;
        for rule_key in &ranked_keys {
            match self.resolve_rule(rule_key)? {
                Some(node) => rules.push(define_rule(node, &groups[rule_key])),
                None => skipped = true,
            }
        }

        Ok(if skipped {
            Outcome::Partial(rules)
        } else {
            Outcome::Complete(rules)
        })
    }

    /// All issues of one severity, walking every result page.
    fn issues_for_severity(&self, project_key: &str, severity: Severity) -> Result<Vec<Issue>> {
        let mut all = Vec::new();
        let mut page = 1;
        loop {
            let query = IssueQuery::for_component(project_key)
                .with_severity(severity)
                .with_page(page);
            let Some(envelope) = self.client.find::<Issues>(&query)? else {
                break;
            };
            if envelope.issues.is_empty() {
                break;
            }
            let total = envelope
                .paging
                .as_ref()
                .map(|p| p.total as usize)
                .unwrap_or(envelope.issues.len());
            all.extend(envelope.issues);
            if all.len() >= total {
                break;
            }
            page += 1;
        }
        Ok(all)
    }

    /// Full metadata for one rule; `None` when the lookup is not exactly one
    /// match (a data-quality problem upstream, not a caller error).
    fn resolve_rule(&self, rule_key: &str) -> Result<Option<WsRule>> {
        let rules: Option<Rules> = self.client.find(&RuleQuery::by_key(rule_key))?;
        let mut rules = rules.map(|r| r.rules).unwrap_or_default();
        if rules.len() != 1 {
            error!(
                rule = rule_key,
                count = rules.len(),
                "rule lookup did not return exactly one rule, skipping"
            );
            return Ok(None);
        }
        Ok(rules.pop())
    }
}

/// Merge one severity pass into the running groups. Returns how many new
/// rule keys this pass discovered.
fn group_issues(
    issues: Vec<Issue>,
    pass_severity: Severity,
    groups: &mut HashMap<String, IssueGroup>,
    discovery_order: &mut Vec<String>,
) -> usize {
    let mut discovered = 0;
    for issue in issues {
        let Some(rule_key) = issue.rule.clone() else {
            continue;
        };
        if let Some(group) = groups.get_mut(&rule_key) {
            // first-discovered severity wins; passes run most severe first
            group.issues.push(issue);
        } else {
            let severity = issue
                .severity
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or(pass_severity);
            groups.insert(
                rule_key.clone(),
                IssueGroup {
                    severity,
                    issues: vec![issue],
                },
            );
            discovery_order.push(rule_key);
            discovered += 1;
        }
    }
    discovered
}

/// Order rule keys by severity descending, then issue count descending.
/// The sort is stable over discovery order, keeping ties deterministic.
fn rank(groups: &HashMap<String, IssueGroup>, mut keys: Vec<String>) -> Vec<String> {
    keys.sort_by(|a, b| {
        let (ga, gb) = (&groups[a], &groups[b]);
        gb.severity
            .cmp(&ga.severity)
            .then(gb.issues.len().cmp(&ga.issues.len()))
    });
    keys
}

/// Assemble the domain rule from its metadata and grouped issues.
fn define_rule(node: WsRule, group: &IssueGroup) -> Rule {
    let top_violations = group
        .issues
        .iter()
        .map(|issue| Violation::new(issue.line, issue.component.clone().unwrap_or_default()))
        .collect();
    Rule {
        key: node.key.unwrap_or_default(),
        name: node.name.unwrap_or_default(),
        severity: group.severity,
        violations_number: group.issues.len().to_string(),
        top_violations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(rule: &str, severity: Severity, line: Option<u32>) -> Issue {
        Issue {
            rule: Some(rule.to_string()),
            severity: Some(severity.as_str().to_string()),
            component: Some(format!("com.acme:app:{rule}.java")),
            line,
            ..Issue::default()
        }
    }

    fn grouped(passes: &[(Severity, &[(&str, usize)])]) -> (HashMap<String, IssueGroup>, Vec<String>) {
        let mut groups = HashMap::new();
        let mut order = Vec::new();
        for (severity, rules) in passes {
            let mut issues = Vec::new();
            for (rule, count) in *rules {
                for _ in 0..*count {
                    issues.push(issue(rule, *severity, Some(1)));
                }
            }
            group_issues(issues, *severity, &mut groups, &mut order);
        }
        (groups, order)
    }

    #[test]
    fn test_grouping_counts_new_rules_only() {
        let mut groups = HashMap::new();
        let mut order = Vec::new();
        let first = group_issues(
            vec![issue("r1", Severity::Blocker, Some(1)), issue("r2", Severity::Blocker, None)],
            Severity::Blocker,
            &mut groups,
            &mut order,
        );
        assert_eq!(first, 2);
        let second = group_issues(
            vec![issue("r1", Severity::Blocker, Some(7))],
            Severity::Blocker,
            &mut groups,
            &mut order,
        );
        assert_eq!(second, 0);
        assert_eq!(groups["r1"].issues.len(), 2);
    }

    #[test]
    fn test_rank_severity_before_count() {
        let (groups, order) = grouped(&[
            (Severity::Critical, &[("crit-few", 1)]),
            (Severity::Major, &[("major-many", 50)]),
        ]);
        let ranked = rank(&groups, order);
        assert_eq!(ranked, vec!["crit-few".to_string(), "major-many".to_string()]);
    }

    #[test]
    fn test_rank_count_within_severity() {
        let (groups, order) = grouped(&[(
            Severity::Major,
            &[("a", 2), ("b", 9), ("c", 5)],
        )]);
        let ranked = rank(&groups, order);
        assert_eq!(ranked, vec!["b".to_string(), "c".to_string(), "a".to_string()]);
    }

    #[test]
    fn test_rank_ties_keep_discovery_order() {
        let (groups, order) = grouped(&[(
            Severity::Minor,
            &[("x", 3), ("y", 3), ("z", 3)],
        )]);
        let ranked = rank(&groups, order);
        assert_eq!(ranked, vec!["x".to_string(), "y".to_string(), "z".to_string()]);
    }

    #[test]
    fn test_define_rule_line_sentinel() {
        let (groups, _) = grouped(&[(Severity::Blocker, &[("r", 1)])]);
        let mut group = groups["r"].clone();
        group.issues[0].line = None;
        let rule = define_rule(
            WsRule {
                key: Some("r".to_string()),
                name: Some("Rule R".to_string()),
                ..WsRule::default()
            },
            &group,
        );
        assert_eq!(rule.violations_number, "1");
        assert_eq!(rule.top_violations[0].line, crate::model::LINE_NOT_APPLICABLE);
    }
}
