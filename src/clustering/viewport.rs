//! Initial map viewport derived from the located reports.

use serde::{Deserialize, Serialize};

use crate::config::MapOptions;
use crate::report::{GeoPoint, Report};

/// South-west / north-east corners of a box enclosing a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: GeoPoint,
    pub north_east: GeoPoint,
}

impl Bounds {
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = GeoPoint>,
    {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Bounds {
                    south_west: p,
                    north_east: p,
                },
                Some(b) => Bounds {
                    south_west: GeoPoint::new(b.south_west.latitude.min(p.latitude), b.south_west.longitude.min(p.longitude)),
                    north_east: GeoPoint::new(b.north_east.latitude.max(p.latitude), b.north_east.longitude.max(p.longitude)),
                },
            })
        })
    }

    pub fn contains(&self, point: &GeoPoint) -> bool {
        (self.south_west.latitude..=self.north_east.latitude).contains(&point.latitude)
            && (self.south_west.longitude..=self.north_east.longitude).contains(&point.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub center: GeoPoint,
    pub zoom: u8,
    /// When set, the renderer should fit the map to these bounds.
    pub bounds: Option<Bounds>,
}

/// Chooses where the map opens.
///
/// An explicit focus point wins. Otherwise the view centres on the first
/// located report and carries the bounds of all of them; with nothing
/// located it falls back to the configured default.
pub fn initial_viewport(reports: &[Report], focus: Option<GeoPoint>, options: &MapOptions) -> Viewport {
    if let Some(center) = focus {
        return Viewport {
            center,
            zoom: options.focus_zoom,
            bounds: None,
        };
    }

    let mut located = reports.iter().filter_map(|r| r.location).peekable();
    match located.peek().copied() {
        Some(first) => Viewport {
            center: first,
            zoom: options.default_zoom,
            bounds: Bounds::enclosing(located),
        },
        None => Viewport {
            center: options.default_center,
            zoom: options.default_zoom,
            bounds: None,
        },
    }
}
