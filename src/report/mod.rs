//! Report Module
//!
//! The incident report entity shared by every engine, plus the boundary
//! helpers that turn raw submissions and legacy records into well-typed
//! reports.

mod status;
pub mod filter;
pub mod record;
pub mod submission;

pub use filter::{locatable, reports_by_submitter, StatusFilter};
pub use record::ReportRecord;
pub use status::ReportStatus;
pub use submission::ReportDraft;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A latitude/longitude pair, compared exactly as supplied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Range-checked constructor used at submission time.
    pub fn checked(latitude: f64, longitude: f64) -> Result<Self, ValidationError> {
        let point = Self::new(latitude, longitude);
        if point.is_valid() {
            Ok(point)
        } else {
            Err(ValidationError::CoordinateOutOfRange { latitude, longitude })
        }
    }

    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Bit pattern of both coordinates. Two points share a key iff they are
    /// co-located.
    pub fn key(&self) -> (u64, u64) {
        (self.latitude.to_bits(), self.longitude.to_bits())
    }

    pub fn is_colocated_with(&self, other: &GeoPoint) -> bool {
        self.key() == other.key()
    }
}

/// A submitted incident report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub category_labels: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub photo_ref: Option<String>,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub submitter_id: Option<String>,
    #[serde(default)]
    pub submitter_name: Option<String>,
    #[serde(default)]
    pub assignee: Option<String>,
    #[serde(default)]
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
}

impl Report {
    /// A fresh `Pending` report with no location, submitter or assignee.
    pub fn new(id: impl Into<String>, category_labels: Vec<String>) -> Self {
        Self {
            id: id.into(),
            category_labels,
            description: None,
            photo_ref: None,
            location: None,
            submitter_id: None,
            submitter_name: None,
            assignee: None,
            status: ReportStatus::Pending,
            created_at: Utc::now(),
        }
    }

    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.location = Some(GeoPoint::new(latitude, longitude));
        self
    }

    pub fn with_submitter(mut self, id: impl Into<String>, name: Option<&str>) -> Self {
        self.submitter_id = Some(id.into());
        self.submitter_name = name.map(str::to_string);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_status(mut self, status: ReportStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn is_locatable(&self) -> bool {
        self.location.is_some()
    }

    pub fn has_category(&self, label: &str) -> bool {
        self.category_labels.iter().any(|l| l == label)
    }
}

/// Splits a `", "`-delimited category string into labels.
///
/// Pieces are trimmed; empty pieces and repeated labels are dropped, first
/// occurrence wins.
pub fn parse_category_labels(raw: &str) -> Vec<String> {
    let mut labels: Vec<String> = Vec::new();
    for piece in raw.split(',') {
        let piece = piece.trim();
        if piece.is_empty() || labels.iter().any(|l| l == piece) {
            continue;
        }
        labels.push(piece.to_string());
    }
    labels
}

pub fn join_category_labels(labels: &[String]) -> String {
    labels.join(", ")
}
