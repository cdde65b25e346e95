//! Clustering Engine
//!
//! Groups reports that sit on exactly the same coordinates into one map
//! marker. Coordinates are compared bit for bit: no tolerance, no snapping.
//! Pure function over a snapshot, safe to call from any thread.

pub mod viewport;

pub use viewport::{initial_viewport, Bounds, Viewport};

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, warn};

use crate::report::{GeoPoint, Report, ReportStatus};

/// One marker on the map: every report at a single coordinate pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerGroup {
    pub location: GeoPoint,
    pub reports: Vec<Report>,
    pub count: usize,
}

impl MarkerGroup {
    fn new(location: GeoPoint) -> Self {
        Self {
            location,
            reports: Vec::new(),
            count: 0,
        }
    }

    fn push(&mut self, report: Report) {
        self.reports.push(report);
        self.count = self.reports.len();
    }

    /// More than one report here; rendered as a cluster badge.
    pub fn is_cluster(&self) -> bool {
        self.count > 1
    }

    /// Status of the first member, used to colour a single pin.
    pub fn lead_status(&self) -> Option<ReportStatus> {
        self.reports.first().map(|r| r.status)
    }
}

/// Groups reports by exact location.
///
/// Callers are expected to pass only located reports (see
/// [`crate::report::locatable`]); a report without a location is skipped.
/// Members keep input order, groups are sorted by latitude then longitude.
pub fn group_by_location<'a, I>(reports: I) -> Vec<MarkerGroup>
where
    I: IntoIterator<Item = &'a Report>,
{
    let mut index: HashMap<(u64, u64), usize> = HashMap::new();
    let mut groups: Vec<MarkerGroup> = Vec::new();

    for report in reports {
        let Some(location) = report.location else {
            warn!("Report {} has no location, skipping", report.id);
            continue;
        };
        let slot = *index.entry(location.key()).or_insert_with(|| {
            groups.push(MarkerGroup::new(location));
            groups.len() - 1
        });
        groups[slot].push(report.clone());
    }

    groups.sort_by(|a, b| {
        a.location
            .latitude
            .total_cmp(&b.location.latitude)
            .then(a.location.longitude.total_cmp(&b.location.longitude))
    });

    debug!(
        "Grouped {} reports into {} markers",
        groups.iter().map(|g| g.count).sum::<usize>(),
        groups.len()
    );
    groups
}
