//! Track entity: an ordered point sequence with on-demand statistics.
//!
//! Statistics are never stored on the track. Every call to
//! [`Track::statistics`] derives them from the current points, so mutating
//! the points cannot leave a stale summary behind.

use serde::{Deserialize, Serialize};

use crate::statistics::{compute_center_point, compute_statistics_with_config};
use crate::{GeodesyPoint, StatisticsConfig, TrackPoint, TrackStatistics};

/// A recorded track.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Track {
    /// Unique identifier of the track
    pub id: String,
    /// Display name
    pub name: Option<String>,
    points: Vec<TrackPoint>,
}

impl Track {
    /// Create an empty track.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            points: Vec::new(),
        }
    }

    /// Create a track from recorded points.
    pub fn with_points(id: impl Into<String>, points: Vec<TrackPoint>) -> Self {
        Self {
            id: id.into(),
            name: None,
            points,
        }
    }

    /// Points in recording order.
    pub fn points(&self) -> &[TrackPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a point to the end of the track.
    pub fn push(&mut self, point: TrackPoint) {
        self.points.push(point);
    }

    /// Append points to the end of the track.
    pub fn extend<I: IntoIterator<Item = TrackPoint>>(&mut self, points: I) {
        self.points.extend(points);
    }

    /// Remove all points.
    pub fn clear(&mut self) {
        self.points.clear();
    }

    /// Consume the track and return its points.
    pub fn into_points(self) -> Vec<TrackPoint> {
        self.points
    }

    /// Compute statistics for the current points.
    pub fn statistics(&self) -> TrackStatistics {
        self.statistics_with_config(&StatisticsConfig::default())
    }

    /// Compute statistics for the current points with a custom configuration.
    pub fn statistics_with_config(&self, config: &StatisticsConfig) -> TrackStatistics {
        compute_statistics_with_config(&self.points, config)
    }

    /// Mean position of the current points.
    pub fn center_point(&self) -> GeodesyPoint {
        compute_center_point(&self.points)
    }
}

impl AsRef<[TrackPoint]> for Track {
    fn as_ref(&self) -> &[TrackPoint] {
        &self.points
    }
}
