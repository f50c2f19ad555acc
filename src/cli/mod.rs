//! CLI implementation using clap.

use std::path::PathBuf;

use clap::Parser;

use crate::report::ReportKind;

/// Generate a quality report from a SonarQube-compatible analysis server.
#[derive(Parser)]
#[command(name = "sonar-report")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Key of the project to report on
    #[arg(short, long)]
    pub project: String,

    /// Base URL of the analysis server
    #[arg(short, long)]
    pub server: Option<String>,

    /// Username for basic authentication
    #[arg(short, long)]
    pub username: Option<String>,

    /// Password for basic authentication
    #[arg(long, env = "SONAR_REPORT_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Report flavor
    #[arg(short = 't', long = "type", value_enum)]
    pub kind: Option<ReportKind>,

    /// Output file (defaults to <project-key>.html in the working directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Default output path: the project key with path-hostile characters
    /// replaced, plus the document extension.
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| PathBuf::from(format!("{}.html", self.project.replace(':', "-"))))
    }
}
