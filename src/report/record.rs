//! Legacy store records
//!
//! The report store speaks the original API shape: categories as one
//! delimited string, coordinates as numbers or numeric strings, the status
//! as a display label. `ReportRecord` decodes that shape leniently and
//! converts it into a validated `Report`.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{parse_category_labels, GeoPoint, Report, ReportStatus};
use crate::config::DEFAULT_UNKNOWN_CATEGORY;
use crate::error::ValidationError;

/// A scalar that may arrive as a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(serde_json::Number),
    Text(String),
}

impl Scalar {
    pub fn to_text(&self) -> String {
        match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s.trim().to_string(),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, Scalar::Text(s) if s.trim().is_empty())
    }

    fn to_coordinate(&self) -> Result<f64, ValidationError> {
        match self {
            Scalar::Number(n) => n
                .as_f64()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ValidationError::MalformedCoordinate(n.to_string())),
            Scalar::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ValidationError::MalformedCoordinate(s.clone())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordUser {
    #[serde(default, rename = "nombre")]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: Scalar,
    #[serde(default, rename = "nombrePlaga")]
    pub categories: Option<String>,
    #[serde(default, rename = "descripcion")]
    pub description: Option<String>,
    #[serde(default, rename = "imagen")]
    pub photo: Option<String>,
    #[serde(default, rename = "latitud")]
    pub latitude: Option<Scalar>,
    #[serde(default, rename = "longitud")]
    pub longitude: Option<Scalar>,
    #[serde(default, rename = "usuarioId")]
    pub user_id: Option<Scalar>,
    #[serde(default, rename = "Usuario")]
    pub user: Option<RecordUser>,
    #[serde(default, rename = "asignadoA")]
    pub assigned_to: Option<String>,
    #[serde(default, rename = "estado")]
    pub status: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl ReportRecord {
    /// Decodes a JSON array of records and converts each one.
    pub fn parse_many(json: &str) -> Result<Vec<Report>> {
        Self::parse_many_with(json, DEFAULT_UNKNOWN_CATEGORY)
    }

    /// Like [`ReportRecord::parse_many`], filing records without a category
    /// under `unknown_category`.
    pub fn parse_many_with(json: &str, unknown_category: &str) -> Result<Vec<Report>> {
        let records: Vec<ReportRecord> =
            serde_json::from_str(json).context("Failed to decode report records")?;
        records
            .into_iter()
            .enumerate()
            .map(|(index, record)| {
                record
                    .into_report(unknown_category)
                    .with_context(|| format!("Invalid report record at index {index}"))
            })
            .collect()
    }

    /// Converts into a validated `Report`. A record with no usable category
    /// gets the single label `unknown_category`.
    pub fn into_report(self, unknown_category: &str) -> Result<Report, ValidationError> {
        let id = self.id.to_text();
        if id.is_empty() {
            return Err(ValidationError::EmptyReportId);
        }
        let status = match self.status.as_deref() {
            Some(value) => ReportStatus::parse(value)?,
            None => ReportStatus::Pending,
        };
        let location = self.location()?;

        let mut category_labels = self.categories.as_deref().map(parse_category_labels).unwrap_or_default();
        if category_labels.is_empty() {
            if unknown_category.trim().is_empty() {
                return Err(ValidationError::NoCategories);
            }
            category_labels.push(unknown_category.trim().to_string());
        }

        Ok(Report {
            id,
            category_labels,
            description: self.description,
            photo_ref: self.photo.filter(|p| !p.is_empty()),
            location,
            submitter_id: self.user_id.map(|u| u.to_text()).filter(|u| !u.is_empty()),
            submitter_name: self.user.and_then(|u| u.name),
            assignee: self.assigned_to.filter(|a| !a.is_empty()),
            status,
            created_at: self.created_at,
        })
    }

    fn location(&self) -> Result<Option<GeoPoint>, ValidationError> {
        let latitude = self.latitude.as_ref().filter(|v| !v.is_blank());
        let longitude = self.longitude.as_ref().filter(|v| !v.is_blank());
        match (latitude, longitude) {
            (Some(lat), Some(lng)) => GeoPoint::checked(lat.to_coordinate()?, lng.to_coordinate()?).map(Some),
            (None, None) => Ok(None),
            _ => Err(ValidationError::PartialLocation),
        }
    }
}

impl TryFrom<ReportRecord> for Report {
    type Error = ValidationError;

    fn try_from(record: ReportRecord) -> Result<Self, Self::Error> {
        record.into_report(DEFAULT_UNKNOWN_CATEGORY)
    }
}
