//! Submission boundary
//!
//! A `ReportDraft` is what the submission form hands over. Accepting it
//! enforces the entity invariants and yields a `Pending` report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{parse_category_labels, GeoPoint, Report, ReportStatus};
use crate::config::SubmissionOptions;
use crate::error::ValidationError;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportDraft {
    /// Selected categories. Entries may themselves be delimited lists.
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub photo_ref: Option<String>,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default)]
    pub submitter_id: Option<String>,
    #[serde(default)]
    pub submitter_name: Option<String>,
}

impl ReportDraft {
    pub fn new(categories: Vec<String>) -> Self {
        Self {
            categories,
            ..Default::default()
        }
    }

    pub fn at(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    pub fn by(mut self, submitter_id: impl Into<String>, submitter_name: Option<&str>) -> Self {
        self.submitter_id = Some(submitter_id.into());
        self.submitter_name = submitter_name.map(str::to_string);
        self
    }

    pub fn accept(self, options: &SubmissionOptions) -> Result<Report, ValidationError> {
        self.accept_at(options, Utc::now())
    }

    /// Validates the draft and builds the report with an explicit creation time.
    pub fn accept_at(
        self,
        options: &SubmissionOptions,
        created_at: DateTime<Utc>,
    ) -> Result<Report, ValidationError> {
        let category_labels = parse_category_labels(&self.categories.join(","));
        if category_labels.is_empty() {
            return Err(ValidationError::NoCategories);
        }
        if options.restrict_to_catalog {
            if let Some(unknown) = category_labels
                .iter()
                .find(|label| !options.category_catalog.contains(label))
            {
                return Err(ValidationError::UnknownCategory(unknown.clone()));
            }
        }

        let location = match (self.latitude, self.longitude) {
            (Some(latitude), Some(longitude)) => GeoPoint::checked(latitude, longitude)?,
            (None, None) => return Err(ValidationError::MissingLocation),
            _ => return Err(ValidationError::PartialLocation),
        };

        let report = Report {
            id: Uuid::new_v4().to_string(),
            category_labels,
            description: self.description.filter(|d| !d.trim().is_empty()),
            photo_ref: self.photo_ref.filter(|p| !p.is_empty()),
            location: Some(location),
            submitter_id: self.submitter_id,
            submitter_name: self.submitter_name,
            assignee: None,
            status: ReportStatus::Pending,
            created_at,
        };
        debug!("Accepted report {} with {} categories", report.id, report.category_labels.len());
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> SubmissionOptions {
        SubmissionOptions::default()
    }

    #[test]
    fn test_accept_creates_pending_report() {
        let report = ReportDraft::new(vec!["Dengue".into(), "Zica".into()])
            .at(-22.5, -63.7)
            .by("u1", Some("Ana"))
            .accept(&options())
            .unwrap();

        assert_eq!(report.status, ReportStatus::Pending);
        assert_eq!(report.assignee, None);
        assert_eq!(report.category_labels, vec!["Dengue", "Zica"]);
        assert_eq!(report.location, Some(GeoPoint::new(-22.5, -63.7)));
        assert!(Uuid::parse_str(&report.id).is_ok());
    }

    #[test]
    fn test_accept_splits_delimited_selection() {
        let report = ReportDraft::new(vec!["Dengue, Zica".into(), "Dengue".into()])
            .at(0.0, 0.0)
            .accept(&options())
            .unwrap();
        assert_eq!(report.category_labels, vec!["Dengue", "Zica"]);
    }

    #[test]
    fn test_accept_requires_categories() {
        let err = ReportDraft::new(vec![" ".into()]).at(0.0, 0.0).accept(&options()).unwrap_err();
        assert_eq!(err, ValidationError::NoCategories);
    }

    #[test]
    fn test_accept_location_rules() {
        let missing = ReportDraft::new(vec!["Dengue".into()]).accept(&options());
        assert_eq!(missing.unwrap_err(), ValidationError::MissingLocation);

        let mut partial = ReportDraft::new(vec!["Dengue".into()]);
        partial.latitude = Some(1.0);
        assert_eq!(partial.accept(&options()).unwrap_err(), ValidationError::PartialLocation);

        let out_of_range = ReportDraft::new(vec!["Dengue".into()]).at(0.0, 200.0).accept(&options());
        assert!(matches!(
            out_of_range.unwrap_err(),
            ValidationError::CoordinateOutOfRange { .. }
        ));
    }

    #[test]
    fn test_accept_catalog_restriction() {
        let strict = SubmissionOptions {
            restrict_to_catalog: true,
            ..SubmissionOptions::default()
        };
        let err = ReportDraft::new(vec!["Malaria".into()]).at(0.0, 0.0).accept(&strict).unwrap_err();
        assert_eq!(err, ValidationError::UnknownCategory("Malaria".into()));

        assert!(ReportDraft::new(vec!["Malaria".into()]).at(0.0, 0.0).accept(&options()).is_ok());
        assert!(ReportDraft::new(vec!["Zica".into()]).at(0.0, 0.0).accept(&strict).is_ok());
    }
}
