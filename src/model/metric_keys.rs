//! Metric keys consumed by the report.
//!
//! The server's metric catalog is open-ended; these are the keys the
//! rendering layer and the tendency override actually use.

pub const PROFILE: &str = "quality_profiles";
pub const DUPLICATED_LINES: &str = "duplicated_lines";
pub const DUPLICATED_BLOCKS: &str = "duplicated_blocks";
pub const DUPLICATED_FILES: &str = "duplicated_files";
pub const DUPLICATED_LINES_DENSITY: &str = "duplicated_lines_density";
pub const CLASSES: &str = "classes";
pub const COMMENT_LINES: &str = "comment_lines";
pub const COMMENT_LINES_DENSITY: &str = "comment_lines_density";
pub const COMPLEXITY: &str = "complexity";
pub const CLASS_COMPLEXITY: &str = "class_complexity";
pub const FUNCTION_COMPLEXITY: &str = "function_complexity";
pub const FILE_COMPLEXITY_DISTRIBUTION: &str = "file_complexity_distribution";
pub const FUNCTIONS: &str = "functions";
pub const NCLOC: &str = "ncloc";
pub const DIRECTORIES: &str = "directories";
pub const COVERAGE: &str = "coverage";
pub const TEST_EXECUTION_TIME: &str = "test_execution_time";
pub const SKIPPED_TESTS: &str = "skipped_tests";
pub const TESTS: &str = "tests";
pub const TEST_ERRORS: &str = "test_errors";
pub const TEST_FAILURES: &str = "test_failures";
pub const TEST_SUCCESS_DENSITY: &str = "test_success_density";
pub const VIOLATIONS: &str = "violations";
pub const TECHNICAL_DEBT: &str = "sqale_index";
pub const BLOCKER_VIOLATIONS: &str = "blocker_violations";
pub const CRITICAL_VIOLATIONS: &str = "critical_violations";
pub const MAJOR_VIOLATIONS: &str = "major_violations";
pub const MINOR_VIOLATIONS: &str = "minor_violations";
pub const INFO_VIOLATIONS: &str = "info_violations";

/// Every key the report consumes.
pub const ALL: &[&str] = &[
    PROFILE,
    DUPLICATED_LINES,
    DUPLICATED_BLOCKS,
    DUPLICATED_FILES,
    DUPLICATED_LINES_DENSITY,
    CLASSES,
    COMMENT_LINES,
    COMMENT_LINES_DENSITY,
    COMPLEXITY,
    CLASS_COMPLEXITY,
    FUNCTION_COMPLEXITY,
    FILE_COMPLEXITY_DISTRIBUTION,
    FUNCTIONS,
    NCLOC,
    DIRECTORIES,
    COVERAGE,
    TEST_EXECUTION_TIME,
    SKIPPED_TESTS,
    TESTS,
    TEST_ERRORS,
    TEST_FAILURES,
    TEST_SUCCESS_DENSITY,
    VIOLATIONS,
    TECHNICAL_DEBT,
    BLOCKER_VIOLATIONS,
    CRITICAL_VIOLATIONS,
    MAJOR_VIOLATIONS,
    MINOR_VIOLATIONS,
    INFO_VIOLATIONS,
];

/// Whether the report consumes the given metric key.
pub fn is_needed(key: &str) -> bool {
    ALL.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_needed() {
        assert!(is_needed("ncloc"));
        assert!(is_needed("sqale_index"));
        assert!(!is_needed("some_plugin_metric"));
    }
}
