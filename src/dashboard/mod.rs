//! Dashboard
//!
//! Every mutation invalidates the derived views. Rather than patching them,
//! the dashboard takes a fresh snapshot from the report store and reruns
//! both engines over it.

mod source;

pub use source::{InMemoryReportSource, JsonFileReportSource, ReportSource};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::clustering::{group_by_location, initial_viewport, MarkerGroup, Viewport};
use crate::config::WatchConfig;
use crate::report::{locatable, GeoPoint, Report};
use crate::stats::{aggregate_with, Statistics};

/// Everything the map and dashboard adapters render, from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub report_count: usize,
    pub located_count: usize,
    pub markers: Vec<MarkerGroup>,
    pub viewport: Viewport,
    pub statistics: Statistics,
}

#[derive(Debug, Default)]
pub struct Dashboard {
    config: WatchConfig,
    focus: Option<GeoPoint>,
}

impl Dashboard {
    pub fn new(config: WatchConfig) -> Self {
        Self { config, focus: None }
    }

    /// Open the map on a specific point instead of fitting all reports.
    pub fn with_focus(mut self, focus: GeoPoint) -> Self {
        self.focus = Some(focus);
        self
    }

    pub fn config(&self) -> &WatchConfig {
        &self.config
    }

    /// Runs clustering and aggregation over one snapshot.
    ///
    /// The two engines share nothing and run side by side.
    pub fn compute(&self, reports: &[Report]) -> DashboardView {
        let (markers, statistics) = rayon::join(
            || group_by_location(locatable(reports)),
            || aggregate_with(reports, &self.config.stats),
        );

        DashboardView {
            report_count: reports.len(),
            located_count: markers.iter().map(|m| m.count).sum(),
            viewport: initial_viewport(reports, self.focus, &self.config.map),
            markers,
            statistics,
        }
    }

    /// Re-fetches the snapshot and recomputes every view.
    #[tracing::instrument(skip_all)]
    pub async fn refresh(&self, source: &dyn ReportSource) -> Result<DashboardView> {
        let reports = source.snapshot().await?;
        let view = self.compute(&reports);
        info!(
            "Dashboard refreshed: {} reports, {} markers, {} categories",
            view.report_count,
            view.markers.len(),
            view.statistics.by_category.len()
        );
        Ok(view)
    }
}
