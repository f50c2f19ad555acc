//! File ranking queries.
//!
//! The server performs the actual ranking: the query asks for file-scoped
//! nodes sorted by one metric, and this module only maps the rows.

use tracing::debug;

use crate::core::Result;
use crate::model::{FileContent, FileInfo};
use crate::ws::model::Resource;
use crate::ws::query::{ResourceQuery, DEPTH_UNLIMITED, FILE_SCOPE};
use crate::ws::WsClient;

/// Fetch the top files for one metric, at most `table_limit` rows.
///
/// An empty response is not an error; it means no file carries the metric.
pub fn top_files(
    client: &WsClient,
    project_key: &str,
    content: FileContent,
    table_limit: u32,
) -> Result<Vec<FileInfo>> {
    let metric = content.metric_key();
    let query = ResourceQuery::for_metrics(project_key, &[metric])
        .with_scope(FILE_SCOPE)
        .with_depth(DEPTH_UNLIMITED)
        .with_limit(table_limit);
    let resources: Vec<Resource> = client.find_all(&query)?;
    if resources.is_empty() {
        debug!(metric, "no files carry this metric");
    }
    Ok(files_from_resources(&resources, content))
}

/// Map resource nodes into rows, dropping nodes that miss the metric value.
fn files_from_resources(resources: &[Resource], content: FileContent) -> Vec<FileInfo> {
    let metric = content.metric_key();
    resources
        .iter()
        .filter_map(|node| {
            let value = node.measure(metric)?.frmt_val.clone()?;
            Some(FileInfo {
                key: node.key.clone()?,
                name: node.display_name().unwrap_or_default().to_string(),
                content,
                value,
            })
        })
        .collect()
}
