//! In-memory project model built from web-service responses.

mod measure;
pub mod metric_keys;
mod severity;

pub use measure::{Measure, Measures};
pub use severity::Severity;

use serde::Serialize;

/// Sentinel shown in place of a line number when an issue has none
/// (file-level issues, for example).
pub const LINE_NOT_APPLICABLE: &str = "N/A";

/// One rule-violation instance at a specific location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    /// Line number as a decimal string, or [`LINE_NOT_APPLICABLE`].
    pub line: String,
    /// Resource path of the violating component.
    pub resource: String,
}

impl Violation {
    /// Build a violation from an optional line number.
    pub fn new(line: Option<u32>, resource: impl Into<String>) -> Self {
        Self {
            line: line
                .map(|l| l.to_string())
                .unwrap_or_else(|| LINE_NOT_APPLICABLE.to_string()),
            resource: resource.into(),
        }
    }
}

/// A coding rule together with the issues counted against it.
#[derive(Debug, Clone, Serialize)]
pub struct Rule {
    /// Rule key.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Severity the rule was discovered at.
    pub severity: Severity,
    /// Number of issues counted against the rule, as a decimal string.
    pub violations_number: String,
    /// One entry per issue that contributed to the count.
    pub top_violations: Vec<Violation>,
}

/// Which single metric a [`FileInfo`] row carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileContent {
    Violations,
    Complexity,
    DuplicatedLines,
}

impl FileContent {
    /// The metric key this ranking queries for.
    pub fn metric_key(self) -> &'static str {
        match self {
            FileContent::Violations => metric_keys::VIOLATIONS,
            FileContent::Complexity => metric_keys::COMPLEXITY,
            FileContent::DuplicatedLines => metric_keys::DUPLICATED_LINES,
        }
    }
}

/// A file-level row in one of the three ranking tables.
///
/// Carries exactly one metric value; the `content` tag says which one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    /// Resource key of the file.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Which ranking produced this row.
    pub content: FileContent,
    /// The formatted metric value for that ranking.
    pub value: String,
}

/// A project node and everything the report needs about it.
///
/// Built once per report invocation; subprojects form a strict tree owned by
/// their parent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Project {
    /// Immutable project key.
    pub key: String,
    /// Display name.
    pub name: String,
    /// Free-text description.
    pub description: String,
    /// All measures of the analyzed snapshot.
    pub measures: Measures,
    /// Ranked rules, most severe and most frequent first.
    pub most_violated_rules: Vec<Rule>,
    /// Files ranked by violation count.
    pub most_violated_files: Vec<FileInfo>,
    /// Files ranked by complexity.
    pub most_complex_files: Vec<FileInfo>,
    /// Files ranked by duplicated lines.
    pub most_duplicated_files: Vec<FileInfo>,
    /// Child projects, in server order.
    pub subprojects: Vec<Project>,
}

impl Project {
    /// Create an empty project for the given key.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_line_sentinel() {
        let v = Violation::new(None, "com.acme:app:src/Foo.java");
        assert_eq!(v.line, LINE_NOT_APPLICABLE);

        let v = Violation::new(Some(42), "com.acme:app:src/Foo.java");
        assert_eq!(v.line, "42");
    }

    #[test]
    fn test_file_content_metric_keys() {
        assert_eq!(FileContent::Violations.metric_key(), "violations");
        assert_eq!(FileContent::Complexity.metric_key(), "complexity");
        assert_eq!(FileContent::DuplicatedLines.metric_key(), "duplicated_lines");
    }

    #[test]
    fn test_project_new() {
        let project = Project::new("com.acme:app");
        assert_eq!(project.key, "com.acme:app");
        assert!(project.subprojects.is_empty());
        assert!(project.measures.is_empty());
    }
}
