//! Measures aggregation across batched metric queries.

use chrono::DateTime;
use once_cell::unsync::OnceCell;
use tracing::{debug, error, warn};

use crate::core::{Error, Outcome, Result};
use crate::model::{metric_keys, Measure, Measures};
use crate::ws::model::{Metrics, Resource, WsMeasure};
use crate::ws::query::{MetricQuery, ResourceQuery};
use crate::ws::WsClient;

/// Metric keys per resource query, kept small to avoid oversized requests.
pub const BATCH_LIMIT: usize = 20;

/// Source of historical trend data for selected metrics.
///
/// Consulted only for the metric keys the report consumes; everything else
/// keeps the tendency the server reported inline (or 0 when absent).
pub trait TrendSource {
    /// Qualitative tendency for a metric, if history is available.
    fn tendency(&self, project_key: &str, metric_key: &str) -> Option<i32>;
}

/// Trend source used when no history backend is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHistory;

impl TrendSource for NoHistory {
    fn tendency(&self, _project_key: &str, _metric_key: &str) -> Option<i32> {
        None
    }
}

/// Aggregates a project's measures from batched resource queries.
///
/// The metric catalog is fetched once per builder lifetime and memoized on
/// the instance, so a builder must only ever talk to one server.
pub struct MeasuresBuilder<'a> {
    client: &'a WsClient,
    catalog: OnceCell<Vec<String>>,
    trends: Box<dyn TrendSource>,
}

impl<'a> MeasuresBuilder<'a> {
    /// Create a builder with no history backend.
    pub fn new(client: &'a WsClient) -> Self {
        Self {
            client,
            catalog: OnceCell::new(),
            trends: Box::new(NoHistory),
        }
    }

    /// Replace the trend source.
    pub fn with_trend_source(mut self, trends: Box<dyn TrendSource>) -> Self {
        self.trends = trends;
        self
    }

    /// Fetch and merge all measures for a project.
    ///
    /// Fails only when the metric catalog itself cannot be fetched; a batch
    /// whose response is not exactly one resource node is logged and skipped,
    /// degrading the result to [`Outcome::Partial`].
    pub fn measures_for_project(&self, project_key: &str) -> Result<Outcome<Measures>> {
        let keys = self.metric_keys()?;
        debug!(
            count = keys.len(),
            "getting metric measures by splitting requests"
        );

        let mut measures = Measures::new();
        let mut skipped = 0usize;
        for batch in keys.chunks(BATCH_LIMIT) {
            debug!(?batch, "split request");
            if !self.add_batch(&mut measures, batch, project_key)? {
                skipped += 1;
            }
        }

        Ok(if skipped == 0 {
            Outcome::Complete(measures)
        } else {
            Outcome::Partial(measures)
        })
    }

    /// The full metric-key catalog, fetched once and memoized.
    fn metric_keys(&self) -> Result<&[String]> {
        self.catalog
            .get_or_try_init(|| {
                let metrics: Option<Metrics> = self.client.find(&MetricQuery::all())?;
                let metrics = metrics
                    .ok_or_else(|| Error::report("metric catalog not available on server"))?;
                Ok(metrics
                    .metrics
                    .into_iter()
                    .filter_map(|m| m.key)
                    .collect::<Vec<_>>())
            })
            .map(Vec::as_slice)
    }

    /// Issue one batched query and merge its measures. Returns false when
    /// the batch had to be skipped.
    fn add_batch(
        &self,
        measures: &mut Measures,
        batch: &[String],
        project_key: &str,
    ) -> Result<bool> {
        let query = ResourceQuery::for_metrics(project_key, batch)
            .with_depth(0)
            .with_trends();
        let resources: Vec<Resource> = self.client.find_all(&query)?;
        if resources.len() != 1 {
            warn!(
                count = resources.len(),
                ?batch,
                "wrong response when looking for measures, skipping batch"
            );
            return Ok(false);
        }

        let resource = &resources[0];
        for node in &resource.msr {
            let Some(mut measure) = measure_from_node(node) else {
                continue;
            };
            if metric_keys::is_needed(&measure.key) {
                if let Some(tendency) = self.trends.tendency(project_key, &measure.key) {
                    measure.qualitative_tendency = tendency;
                }
            }
            measures.add(measure);
        }

        if let Some(version) = &resource.version {
            measures.version = Some(version.clone());
        }
        if let Some(date) = &resource.date {
            match DateTime::parse_from_str(date, "%Y-%m-%dT%H:%M:%S%z") {
                Ok(parsed) => measures.date = Some(parsed),
                Err(e) => error!(date, "can not parse snapshot date: {e}"),
            }
        }
        Ok(true)
    }
}

/// Map one wire measure node into a domain measure. Nodes without a key are
/// dropped; absent trend tags default to unchanged.
fn measure_from_node(node: &WsMeasure) -> Option<Measure> {
    let key = node.key.clone()?;
    Some(Measure {
        key,
        value: node.val.map(|v| v.to_string()).unwrap_or_default(),
        format_value: node.frmt_val.clone().unwrap_or_default(),
        data: node.data.clone(),
        qualitative_tendency: node.trend.unwrap_or(0),
        quantitative_tendency: node.var.unwrap_or(0),
        alert: node.alert.clone(),
    })
}
