//! Report generation: builds the project tree and renders it.

mod render;

pub use render::Renderer;

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::builder::ProjectBuilder;
use crate::config::Config;
use crate::core::Result;
use crate::ws::WsClient;

/// The two report flavors.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    /// Short management summary: overview and ranking tables only.
    Executive,
    /// Detailed rendering that adds per-rule violation-detail tables.
    #[default]
    Workbook,
}

impl ReportKind {
    pub(crate) fn template_name(self) -> &'static str {
        match self {
            ReportKind::Executive => "executive",
            ReportKind::Workbook => "workbook",
        }
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportKind::Executive => f.write_str("executive"),
            ReportKind::Workbook => f.write_str("workbook"),
        }
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "executive" => Ok(ReportKind::Executive),
            "workbook" => Ok(ReportKind::Workbook),
            other => Err(format!("unknown report type: {other}. Use 'executive' or 'workbook'")),
        }
    }
}

/// Build the project tree for `project_key` and render the configured report.
///
/// This is the single entry point the CLI uses: it returns the finished
/// document as bytes.
pub fn generate(client: &WsClient, config: &Config, project_key: &str) -> Result<Vec<u8>> {
    let builder = ProjectBuilder::new(
        client,
        config.report.table_limit,
        config.report.details_limit,
    );
    let project = builder.build(project_key)?;
    let renderer = Renderer::new()?;
    renderer.render(&project, config.report.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_kind_from_str() {
        assert_eq!("workbook".parse::<ReportKind>().unwrap(), ReportKind::Workbook);
        assert_eq!("EXECUTIVE".parse::<ReportKind>().unwrap(), ReportKind::Executive);
        assert!("summary".parse::<ReportKind>().is_err());
    }

    #[test]
    fn test_report_kind_display_round_trip() {
        for kind in [ReportKind::Executive, ReportKind::Workbook] {
            assert_eq!(kind.to_string().parse::<ReportKind>().unwrap(), kind);
        }
    }
}
