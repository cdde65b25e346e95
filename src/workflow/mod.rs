//! Status Workflow
//!
//! Validates and computes a change to a report's handling state. Only
//! administrators may change status or assignee. The workflow never
//! persists: it returns the report as it should be stored.

mod role;

pub use role::ActorRole;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{UpdateError, ValidationError};
use crate::report::{Report, ReportStatus};

/// Requested field changes, applied together or not at all.
///
/// `status` carries the raw value from the caller and is validated on apply.
/// An empty `assignee` clears the assignment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportUpdate {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
}

impl ReportUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }

    /// The "Assign" action: set the assignee and move to `Assigned` at once.
    pub fn assign(assignee: impl Into<String>) -> Self {
        Self::new()
            .with_assignee(assignee)
            .with_status(ReportStatus::Assigned.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.assignee.is_none()
    }
}

/// Applies `changes` to `report` on behalf of `role`.
///
/// The role is checked before any field is looked at. Any of the four states
/// may follow any other, `Resolved` included.
#[tracing::instrument(skip_all, fields(report_id = %report.id, role = %role))]
pub fn apply_update(report: &Report, changes: &ReportUpdate, role: &ActorRole) -> Result<Report, UpdateError> {
    if !role.can_update_reports() {
        warn!("Rejected update of report {} by role '{}'", report.id, role);
        return Err(UpdateError::Authorization { role: role.clone() });
    }

    let status = changes
        .status
        .as_deref()
        .map(ReportStatus::parse)
        .transpose()
        .map_err(|err: ValidationError| {
            warn!("Rejected update of report {}: {}", report.id, err);
            UpdateError::from(err)
        })?;

    let mut updated = report.clone();
    if let Some(status) = status {
        updated.status = status;
    }
    if let Some(assignee) = &changes.assignee {
        updated.assignee = if assignee.is_empty() { None } else { Some(assignee.clone()) };
    }

    info!(
        "Report {} updated: status {} -> {}, assignee changed: {}",
        report.id,
        report.status,
        updated.status,
        report.assignee != updated.assignee
    );
    Ok(updated)
}

/// Same as [`apply_update`] for a raw role claim string.
pub fn apply_update_for_claim(report: &Report, changes: &ReportUpdate, role_claim: &str) -> Result<Report, UpdateError> {
    apply_update(report, changes, &ActorRole::from_claim(role_claim))
}
