//! HTML report rendering using minijinja templating.

use std::fs;
use std::io::Write;
use std::path::Path;

use flate2::write::GzEncoder;
use flate2::Compression;
use minijinja::{context, Environment};
use serde::Serialize;

use crate::core::Result;
use crate::model::{metric_keys, FileInfo, Measures, Project, Rule};

use super::ReportKind;

const EXECUTIVE_HTML: &str = include_str!("executive.html");
const WORKBOOK_HTML: &str = include_str!("workbook.html");

/// Renders a built [`Project`] tree into a report document.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    /// Create a renderer with the embedded templates.
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();
        env.add_filter("tendency_icon", tendency_icon);
        env.add_template("executive", EXECUTIVE_HTML)?;
        env.add_template("workbook", WORKBOOK_HTML)?;
        Ok(Self { env })
    }

    /// Render the report to bytes.
    pub fn render(&self, project: &Project, kind: ReportKind) -> Result<Vec<u8>> {
        let chapters: Vec<Chapter> = flatten(project).into_iter().map(Chapter::from).collect();
        let tmpl = self.env.get_template(kind.template_name())?;
        let rendered = tmpl.render(context! {
            title => project.name,
            project_key => project.key,
            generated_at => chrono::Local::now().format("%Y-%m-%d %H:%M").to_string(),
            chapters => chapters,
        })?;
        Ok(rendered.into_bytes())
    }

    /// Render to a file, also producing a `.html.gz` companion.
    pub fn render_to_file(
        &self,
        project: &Project,
        kind: ReportKind,
        output_path: &Path,
    ) -> Result<()> {
        let output = self.render(project, kind)?;

        fs::write(output_path, &output)?;

        let gz_file = fs::File::create(Self::gz_path(output_path))?;
        let mut encoder = GzEncoder::new(gz_file, Compression::best());
        encoder.write_all(&output)?;
        encoder.finish()?;

        Ok(())
    }

    /// Return the gzip companion path for a given output path.
    pub fn gz_path(output_path: &Path) -> std::path::PathBuf {
        output_path.with_extension("html.gz")
    }
}

/// Depth-first flattening: the root project first, then every subproject.
/// Each node becomes one chapter, mirroring the document structure.
fn flatten(project: &Project) -> Vec<&Project> {
    let mut nodes = Vec::new();
    let mut stack = vec![project];
    while let Some(node) = stack.pop() {
        nodes.push(node);
        stack.extend(node.subprojects.iter().rev());
    }
    nodes
}

/// View model for one chapter of the report.
#[derive(Debug, Serialize)]
struct Chapter {
    key: String,
    name: String,
    description: String,
    version: Option<String>,
    date: Option<String>,
    dashboard: Vec<DashboardRow>,
    severity_counts: Vec<SeverityRow>,
    rules: Vec<RuleRow>,
    violated_files: Vec<FileRow>,
    complex_files: Vec<FileRow>,
    duplicated_files: Vec<FileRow>,
}

#[derive(Debug, Serialize)]
struct DashboardRow {
    label: &'static str,
    value: String,
    tendency: i32,
}

#[derive(Debug, Serialize)]
struct SeverityRow {
    label: &'static str,
    color: String,
    count: String,
}

#[derive(Debug, Serialize)]
struct RuleRow {
    name: String,
    count: String,
    severity: String,
    color: String,
    violations: Vec<ViolationRow>,
}

#[derive(Debug, Serialize)]
struct ViolationRow {
    line: String,
    resource: String,
}

#[derive(Debug, Serialize)]
struct FileRow {
    name: String,
    value: String,
}

/// Placeholder shown where the server had no data. Degraded sections stay
/// visible instead of silently disappearing.
const NO_DATA: &str = "N/A";

impl From<&Project> for Chapter {
    fn from(project: &Project) -> Self {
        Self {
            key: project.key.clone(),
            name: project.name.clone(),
            description: project.description.clone(),
            version: project.measures.version.clone(),
            date: project
                .measures
                .date
                .map(|d| d.format("%Y-%m-%d").to_string()),
            dashboard: dashboard_rows(&project.measures),
            severity_counts: severity_rows(&project.measures),
            rules: project.most_violated_rules.iter().map(rule_row).collect(),
            violated_files: file_rows(&project.most_violated_files),
            complex_files: file_rows(&project.most_complex_files),
            duplicated_files: file_rows(&project.most_duplicated_files),
        }
    }
}

fn dashboard_rows(measures: &Measures) -> Vec<DashboardRow> {
    const STATIC_ANALYSIS: &[(&str, &str)] = &[
        ("Lines of code", metric_keys::NCLOC),
        ("Classes", metric_keys::CLASSES),
        ("Methods", metric_keys::FUNCTIONS),
        ("Comment lines", metric_keys::COMMENT_LINES),
        ("Comments density", metric_keys::COMMENT_LINES_DENSITY),
        ("Complexity", metric_keys::COMPLEXITY),
        ("Complexity per method", metric_keys::FUNCTION_COMPLEXITY),
        ("Duplicated lines", metric_keys::DUPLICATED_LINES_DENSITY),
        ("Coding rule violations", metric_keys::VIOLATIONS),
        ("Technical debt", metric_keys::TECHNICAL_DEBT),
        ("Code coverage", metric_keys::COVERAGE),
        ("Tests", metric_keys::TESTS),
        ("Test success", metric_keys::TEST_SUCCESS_DENSITY),
    ];

    STATIC_ANALYSIS
        .iter()
        .map(|&(label, key)| {
            let measure = measures.get(key);
            DashboardRow {
                label,
                value: measure
                    .map(|m| m.format_value.clone())
                    .filter(|v| !v.is_empty())
                    .unwrap_or_else(|| NO_DATA.to_string()),
                tendency: measure.map(|m| m.qualitative_tendency).unwrap_or(0),
            }
        })
        .collect()
}

fn severity_rows(measures: &Measures) -> Vec<SeverityRow> {
    use crate::model::Severity;

    const PER_SEVERITY: &[(Severity, &str)] = &[
        (Severity::Blocker, metric_keys::BLOCKER_VIOLATIONS),
        (Severity::Critical, metric_keys::CRITICAL_VIOLATIONS),
        (Severity::Major, metric_keys::MAJOR_VIOLATIONS),
        (Severity::Minor, metric_keys::MINOR_VIOLATIONS),
        (Severity::Info, metric_keys::INFO_VIOLATIONS),
    ];

    PER_SEVERITY
        .iter()
        .map(|&(severity, key)| SeverityRow {
            label: severity.as_str(),
            color: severity.hex_color(),
            count: measures
                .format_value(key)
                .filter(|v| !v.is_empty())
                .unwrap_or(NO_DATA)
                .to_string(),
        })
        .collect()
}

fn rule_row(rule: &Rule) -> RuleRow {
    RuleRow {
        name: rule.name.clone(),
        count: rule.violations_number.clone(),
        severity: rule.severity.as_str().to_string(),
        color: rule.severity.hex_color(),
        violations: rule
            .top_violations
            .iter()
            .map(|v| ViolationRow {
                line: v.line.clone(),
                resource: v.resource.clone(),
            })
            .collect(),
    }
}

fn file_rows(files: &[FileInfo]) -> Vec<FileRow> {
    files
        .iter()
        .map(|f| FileRow {
            name: f.name.clone(),
            value: f.value.clone(),
        })
        .collect()
}

/// Arrow glyph for a qualitative tendency value.
fn tendency_icon(tendency: i32) -> &'static str {
    match tendency.signum() {
        1 => "\u{25b2}",  // up arrow
        -1 => "\u{25bc}", // down arrow
        _ => "",
    }
}
