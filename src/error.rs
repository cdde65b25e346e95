//! Error taxonomy
//!
//! Validation failures come from boundary checks (submissions, legacy
//! records, status values). Update failures wrap them and add the
//! authorization kind so callers can tell "forbidden" from "bad value".

use thiserror::Error;

use crate::workflow::ActorRole;

/// Malformed input caught before it reaches the engines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("unknown status value '{0}'")]
    UnknownStatus(String),

    #[error("latitude and longitude must be supplied together")]
    PartialLocation,

    #[error("a location is required")]
    MissingLocation,

    #[error("coordinate '{0}' is not a number")]
    MalformedCoordinate(String),

    #[error("coordinate out of range (lat={latitude}, lng={longitude})")]
    CoordinateOutOfRange { latitude: f64, longitude: f64 },

    #[error("a report needs at least one category")]
    NoCategories,

    #[error("category '{0}' is not in the catalog")]
    UnknownCategory(String),

    #[error("report id must not be empty")]
    EmptyReportId,
}

/// Why a status workflow call was rejected.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum UpdateError {
    #[error("role '{role}' may not update reports")]
    Authorization { role: ActorRole },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl UpdateError {
    pub fn is_authorization(&self) -> bool {
        matches!(self, Self::Authorization { .. })
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
