use proptest::prelude::*;

use sonar_report::builder::RuleRanker;
use sonar_report::model::{Severity, Violation, LINE_NOT_APPLICABLE};

mod common;

use common::{issues_body, rule_body, FakeServer};

const SEVERITIES: [Severity; 5] = [
    Severity::Blocker,
    Severity::Critical,
    Severity::Major,
    Severity::Minor,
    Severity::Info,
];

proptest! {
    /// Ranked rules are ordered by severity first, then by violation count,
    /// no matter how the issues are distributed across severity levels.
    #[test]
    fn ranking_orders_severity_then_count(
        table in prop::collection::vec((0usize..5, 1usize..8), 1..10)
    ) {
        let mut server = FakeServer::new();
        for (level, severity) in SEVERITIES.iter().enumerate() {
            let entries: Vec<(String, usize)> = table
                .iter()
                .enumerate()
                .filter(|(_, (s, _))| *s == level)
                .map(|(i, (_, count))| (format!("rule{i}"), *count))
                .collect();
            if entries.is_empty() {
                continue;
            }
            let body_entries: Vec<(&str, &str, usize)> = entries
                .iter()
                .map(|(name, count)| (name.as_str(), severity.as_str(), *count))
                .collect();
            server.route(
                "/api/issues/search",
                &[("severities", severity.as_str())],
                &issues_body(&body_entries),
            );
        }
        for i in 0..table.len() {
            let key = format!("rule{i}");
            server.route(
                "/api/rules/search",
                &[("rule_key", key.as_str())],
                &rule_body(&key, &key),
            );
        }

        let client = server.client();
        let rules = RuleRanker::new(&client)
            .most_violated("com.acme:app", 1000)
            .unwrap()
            .into_value()
            .unwrap();

        prop_assert_eq!(rules.len(), table.len());

        // no rule may outrank a more severe or more frequent one
        for pair in rules.windows(2) {
            prop_assert!(pair[0].severity >= pair[1].severity);
            if pair[0].severity == pair[1].severity {
                let first: usize = pair[0].violations_number.parse().unwrap();
                let second: usize = pair[1].violations_number.parse().unwrap();
                prop_assert!(first >= second);
            }
        }

        // every reported issue survives the grouping
        let total: usize = rules
            .iter()
            .map(|r| r.top_violations.len())
            .sum();
        let expected: usize = table.iter().map(|(_, count)| count).sum();
        prop_assert_eq!(total, expected);
    }

    /// A violation renders its line number when known and the placeholder
    /// when the server omitted it.
    #[test]
    fn violation_line_rendering(line in prop::option::of(0u32..100_000)) {
        let violation = Violation::new(line, "com.acme:app:Foo.java");
        match line {
            Some(n) => prop_assert_eq!(violation.line, n.to_string()),
            None => prop_assert_eq!(violation.line, LINE_NOT_APPLICABLE),
        }
    }
}
