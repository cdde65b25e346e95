//! Report selection helpers used by the list, profile and map views.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::{Report, ReportStatus};
use crate::error::ValidationError;

/// Status filter of the report list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Only(ReportStatus),
}

impl StatusFilter {
    pub fn matches(&self, report: &Report) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(status) => report.status == *status,
        }
    }

    /// Matching reports, input order preserved.
    pub fn apply<'a>(&self, reports: &'a [Report]) -> Vec<&'a Report> {
        reports.iter().filter(|r| self.matches(r)).collect()
    }
}

impl FromStr for StatusFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "All" | "Todos" => Ok(StatusFilter::All),
            other => ReportStatus::parse(other).map(StatusFilter::Only),
        }
    }
}

/// Reports filed by one submitter, input order preserved.
pub fn reports_by_submitter<'a>(reports: &'a [Report], submitter_id: &str) -> Vec<&'a Report> {
    reports
        .iter()
        .filter(|r| r.submitter_id.as_deref() == Some(submitter_id))
        .collect()
}

/// Reports that carry a location, ready for clustering.
pub fn locatable(reports: &[Report]) -> impl Iterator<Item = &Report> {
    reports.iter().filter(|r| r.is_locatable())
}
