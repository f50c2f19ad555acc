//! Builders that assemble the project model from web-service responses.

mod files;
mod measures;
mod project;
mod rules;

pub use files::top_files;
pub use measures::{MeasuresBuilder, NoHistory, TrendSource, BATCH_LIMIT};
pub use project::ProjectBuilder;
pub use rules::RuleRanker;
