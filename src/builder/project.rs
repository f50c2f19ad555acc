//! Recursive assembly of the project tree.

use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::core::{Error, Outcome, Result};
use crate::model::{FileContent, Project};
use crate::ws::model::Resource;
use crate::ws::query::{ResourceQuery, PROJECT_SCOPE};
use crate::ws::WsClient;

use super::files::top_files;
use super::measures::MeasuresBuilder;
use super::rules::RuleRanker;

/// Builds a [`Project`] tree for one report invocation.
///
/// Owns the memoized metric catalog through its [`MeasuresBuilder`], so a
/// builder is tied to one server and one caller; nothing is process-global.
pub struct ProjectBuilder<'a> {
    client: &'a WsClient,
    measures: MeasuresBuilder<'a>,
    ranker: RuleRanker<'a>,
    table_limit: u32,
    details_limit: u32,
}

impl<'a> ProjectBuilder<'a> {
    /// Create a builder with the configured table and details limits.
    pub fn new(client: &'a WsClient, table_limit: u32, details_limit: u32) -> Self {
        Self {
            client,
            measures: MeasuresBuilder::new(client),
            ranker: RuleRanker::new(client),
            table_limit,
            details_limit,
        }
    }

    /// Replace the measures builder (to attach a trend source).
    pub fn with_measures_builder(mut self, measures: MeasuresBuilder<'a>) -> Self {
        self.measures = measures;
        self
    }

    /// Build the full project tree rooted at `project_key`.
    ///
    /// Fails fatally when the root resource cannot be found (the usual
    /// causes are a bad key or missing permissions) and when the child
    /// hierarchy turns out to be cyclic.
    pub fn build(&self, project_key: &str) -> Result<Project> {
        let mut visited = HashSet::new();
        self.build_node(project_key, &mut visited)
    }

    fn build_node(&self, project_key: &str, visited: &mut HashSet<String>) -> Result<Project> {
        if !visited.insert(project_key.to_string()) {
            return Err(Error::report(format!(
                "cycle detected in project hierarchy at {project_key}"
            )));
        }

        info!(project = project_key, "retrieving project info");
        let query = ResourceQuery::by_key(project_key).with_depth(0);
        let resources: Vec<Resource> = self.client.find_all(&query)?;
        let Some(node) = resources.first() else {
            return Err(Error::report(format!(
                "can not retrieve project info for {project_key}: check the project key and \
                 the username/password settings"
            )));
        };

        let mut project = Project::new(project_key);
        project.name = node.display_name().unwrap_or_default().to_string();
        project.description = node.description.clone().unwrap_or_default();

        info!("retrieving measures");
        match self.measures.measures_for_project(project_key)? {
            Outcome::Complete(measures) => project.measures = measures,
            Outcome::Partial(measures) => {
                warn!(project = project_key, "some measure batches were skipped");
                project.measures = measures;
            }
            Outcome::Empty => warn!(project = project_key, "no measures available"),
        }

        info!("retrieving most violated rules");
        match self.ranker.most_violated(project_key, self.details_limit)? {
            Outcome::Complete(rules) => project.most_violated_rules = rules,
            Outcome::Partial(rules) => {
                warn!(project = project_key, "some rule lookups were skipped");
                project.most_violated_rules = rules;
            }
            Outcome::Empty => debug!(project = project_key, "no violated rules"),
        }

        info!("retrieving most violated files");
        project.most_violated_files = top_files(
            self.client,
            project_key,
            FileContent::Violations,
            self.table_limit,
        )?;

        info!("retrieving most complex files");
        project.most_complex_files = top_files(
            self.client,
            project_key,
            FileContent::Complexity,
            self.table_limit,
        )?;

        info!("retrieving most duplicated files");
        project.most_duplicated_files = top_files(
            self.client,
            project_key,
            FileContent::DuplicatedLines,
            self.table_limit,
        )?;

        debug!("getting child projects");
        let child_query = ResourceQuery::by_key(project_key).with_depth(1);
        let children: Vec<Resource> = self.client.find_all(&child_query)?;
        if children.is_empty() {
            debug!(project = project_key, "project has no children");
        }
        for child in children {
            if child.scope.as_deref() != Some(PROJECT_SCOPE) {
                continue;
            }
            let Some(child_key) = child.key else {
                continue;
            };
            project
                .subprojects
                .push(self.build_node(&child_key, visited)?);
        }

        Ok(project)
    }
}
