//! Report lifecycle states

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// Handling state of a report.
///
/// `Pending` is assigned at creation. `Resolved` has no outgoing transition in
/// the normal flow, but administrators may still move a report out of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReportStatus {
    #[default]
    Pending,
    Assigned,
    InProgress,
    Resolved,
}

impl ReportStatus {
    /// All states in lifecycle order.
    pub const ALL: [ReportStatus; 4] = [
        ReportStatus::Pending,
        ReportStatus::Assigned,
        ReportStatus::InProgress,
        ReportStatus::Resolved,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::Assigned => "Assigned",
            ReportStatus::InProgress => "InProgress",
            ReportStatus::Resolved => "Resolved",
        }
    }

    /// Display label used by the operations front end and the legacy store.
    pub fn label(self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pendiente",
            ReportStatus::Assigned => "Asignado",
            ReportStatus::InProgress => "En Proceso",
            ReportStatus::Resolved => "Solucionado",
        }
    }

    pub fn is_terminal(self) -> bool {
        self == ReportStatus::Resolved
    }

    /// Accepts canonical names and legacy display labels, surrounding
    /// whitespace ignored. Matching is case-sensitive.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value || status.label() == value)
            .ok_or_else(|| ValidationError::UnknownStatus(value.to_string()))
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ReportStatus {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ReportStatus> for String {
    fn from(status: ReportStatus) -> Self {
        status.as_str().to_string()
    }
}
