//! Report sources
//!
//! The seam to the external report store. Implementations hand out a
//! consistent snapshot per call; the engines never see a collection that
//! changes underneath them.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::DEFAULT_UNKNOWN_CATEGORY;
use crate::error::UpdateError;
use crate::report::{Report, ReportRecord};
use crate::workflow::{apply_update, ActorRole, ReportUpdate};

#[async_trait]
pub trait ReportSource: Send + Sync {
    /// The full current collection.
    async fn snapshot(&self) -> Result<Vec<Report>>;
}

/// Store kept in memory, mostly for tests and embedding.
#[derive(Default)]
pub struct InMemoryReportSource {
    reports: RwLock<Vec<Report>>,
}

impl InMemoryReportSource {
    pub fn new(reports: Vec<Report>) -> Self {
        Self {
            reports: RwLock::new(reports),
        }
    }

    pub async fn replace(&self, reports: Vec<Report>) {
        *self.reports.write().await = reports;
    }

    pub async fn insert(&self, report: Report) {
        self.reports.write().await.push(report);
    }

    /// Deletes a report. Gated like updates: only administrators may
    /// delete. Returns whether a report with that id existed.
    pub async fn remove(&self, report_id: &str, role: &ActorRole) -> Result<bool, UpdateError> {
        if !role.can_update_reports() {
            warn!("Rejected removal of report {} by role '{}'", report_id, role);
            return Err(UpdateError::Authorization { role: role.clone() });
        }
        let mut reports = self.reports.write().await;
        let before = reports.len();
        reports.retain(|r| r.id != report_id);
        let removed = reports.len() != before;
        if removed {
            info!("Report {} removed", report_id);
        }
        Ok(removed)
    }

    /// Runs the status workflow against the stored report and keeps the
    /// result. The write lock is held across the whole call, so concurrent
    /// updates of one report are serialised.
    ///
    /// Workflow rejections surface as an [`crate::error::UpdateError`]
    /// inside the returned error.
    pub async fn apply_update(&self, report_id: &str, changes: &ReportUpdate, role: &ActorRole) -> Result<Report> {
        let mut reports = self.reports.write().await;
        let slot = reports
            .iter_mut()
            .find(|r| r.id == report_id)
            .with_context(|| format!("Unknown report id {report_id}"))?;
        let updated = apply_update(slot, changes, role)?;
        *slot = updated.clone();
        Ok(updated)
    }
}

#[async_trait]
impl ReportSource for InMemoryReportSource {
    async fn snapshot(&self) -> Result<Vec<Report>> {
        Ok(self.reports.read().await.clone())
    }
}

/// Reads a JSON export of the legacy store.
pub struct JsonFileReportSource {
    path: PathBuf,
    unknown_category: String,
}

impl JsonFileReportSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            unknown_category: DEFAULT_UNKNOWN_CATEGORY.to_string(),
        }
    }

    /// Category given to exported records that have none, usually
    /// `SubmissionOptions::unknown_category_label`.
    pub fn with_unknown_category(mut self, label: impl Into<String>) -> Self {
        self.unknown_category = label.into();
        self
    }
}

#[async_trait]
impl ReportSource for JsonFileReportSource {
    async fn snapshot(&self) -> Result<Vec<Report>> {
        let json = fs::read_to_string(&self.path)
            .await
            .with_context(|| format!("Failed to read report export {}", self.path.display()))?;
        let reports = ReportRecord::parse_many_with(&json, &self.unknown_category)?;
        debug!("Loaded {} reports from {}", reports.len(), self.path.display());
        Ok(reports)
    }
}
