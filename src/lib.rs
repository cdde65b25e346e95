//! Pest Report Core
//!
//! Derived data for a pest/incident reporting service:
//! - Clustering of co-located reports into map markers
//! - Status workflow with role-gated updates
//! - Per-user and per-category statistics
//!
//! Reports and role claims arrive already authenticated; persistence and
//! rendering stay with the caller.

pub mod clustering;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod report;
pub mod stats;
pub mod utils;
pub mod workflow;

// Re-exports for convenience
pub use clustering::{group_by_location, MarkerGroup};
pub use config::{ConfigManager, WatchConfig};
pub use dashboard::{Dashboard, DashboardView, ReportSource};
pub use error::{UpdateError, ValidationError};
pub use report::{GeoPoint, Report, ReportStatus};
pub use stats::{aggregate, CategoryRollup, Statistics, UserRollup};
pub use utils::init_logging;
pub use workflow::{apply_update, ActorRole, ReportUpdate};
