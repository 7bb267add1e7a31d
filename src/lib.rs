//! # Geotrack
//!
//! Geodesic calculations and track statistics for recorded GPS tracks.
//!
//! This library provides:
//! - Point-to-point geodesy on WGS84 coordinates (distance, bearing, dead reckoning)
//! - Single-pass statistics for a track (duration, length, height gain/loss,
//!   climb/sink rates, speeds, center point)
//! - A time-bounded window of recent live positions
//!
//! ## Features
//!
//! - **`parallel`** - Enable parallel batch statistics with rayon
//! - **`ffi`** - Enable FFI bindings for mobile platforms (iOS/Android)
//! - **`full`** - Enable all features
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use geotrack::{compute_statistics, TrackPoint};
//!
//! let start = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
//! let points = vec![
//!     TrackPoint::new(47.2692, 11.4041).with_altitude(100.0).with_time(start),
//!     TrackPoint::new(47.2702, 11.4041)
//!         .with_altitude(150.0)
//!         .with_time(start + chrono::Duration::seconds(10)),
//! ];
//!
//! let stats = compute_statistics(&points);
//! assert_eq!(stats.height_gain_meters, 50.0);
//! println!("Length: {:.0}m in {:.0}s", stats.length_meters, stats.duration_secs);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// Unified error handling
pub mod error;
pub use error::{GeotrackError, Result};

// Fixed constants (earth radius, time fallbacks, epsilons)
pub mod constants;

// Point-to-point geodesy on a sphere
pub mod geodesy;
pub use geodesy::{GeodesyPoint, Sphere};

// Single-pass track statistics
pub mod statistics;
pub use statistics::{
    compute_center_point, compute_statistics, compute_statistics_batch,
    compute_statistics_with_config, StatisticsConfig, TrackStatistics,
};

// Track entity (points + on-demand statistics)
pub mod track;
pub use track::Track;

// Time-bounded window of live positions
pub mod position_window;
pub use position_window::{PositionSample, PositionWindow};

// FFI bindings for mobile platforms (iOS/Android)
#[cfg(feature = "ffi")]
pub mod ffi;
#[cfg(feature = "ffi")]
pub mod ffi_types;

#[cfg(feature = "ffi")]
uniffi::setup_scaffolding!();

/// Initialize logging for Android (only used in FFI)
#[cfg(all(feature = "ffi", target_os = "android"))]
pub(crate) fn init_logging() {
    use android_logger::Config;
    use log::LevelFilter;

    android_logger::init_once(
        Config::default()
            .with_max_level(LevelFilter::Debug)
            .with_tag("GeotrackRust"),
    );
}

#[cfg(all(feature = "ffi", not(target_os = "android")))]
pub(crate) fn init_logging() {
    // No-op on non-Android platforms
}

// ============================================================================
// Core Types
// ============================================================================

/// A single recorded fix of a track.
///
/// Points of a track are expected in chronological order; nothing here sorts.
///
/// # Example
/// ```
/// use geotrack::TrackPoint;
/// let point = TrackPoint::new(47.2692, 11.4041).with_altitude(574.0);
/// assert_eq!(point.altitude, Some(574.0));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Altitude in meters
    pub altitude: Option<f64>,
    /// Heading in degrees
    pub heading: Option<i32>,
    /// Absolute time of the fix
    pub time: Option<DateTime<Utc>>,
}

impl TrackPoint {
    /// Create a point without altitude, heading or time.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
            heading: None,
            time: None,
        }
    }

    /// Set the altitude in meters.
    pub fn with_altitude(mut self, altitude: f64) -> Self {
        self.altitude = Some(altitude);
        self
    }

    /// Set the heading in degrees.
    pub fn with_heading(mut self, heading: i32) -> Self {
        self.heading = Some(heading);
        self
    }

    /// Set the time of the fix.
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }
}

impl From<&TrackPoint> for GeodesyPoint {
    fn from(p: &TrackPoint) -> Self {
        GeodesyPoint {
            latitude: p.latitude,
            longitude: p.longitude,
            altitude: p.altitude,
        }
    }
}

impl From<TrackPoint> for GeodesyPoint {
    fn from(p: TrackPoint) -> Self {
        GeodesyPoint::from(&p)
    }
}

/// Bounding box of a set of points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl Bounds {
    /// Create bounds from points. Returns `None` for an empty input.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = GeodesyPoint>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;

        let mut bounds = Self {
            min_lat: first.latitude,
            max_lat: first.latitude,
            min_lng: first.longitude,
            max_lng: first.longitude,
        };

        for p in iter {
            bounds.min_lat = bounds.min_lat.min(p.latitude);
            bounds.max_lat = bounds.max_lat.max(p.latitude);
            bounds.min_lng = bounds.min_lng.min(p.longitude);
            bounds.max_lng = bounds.max_lng.max(p.longitude);
        }

        Some(bounds)
    }

    /// Get the center point of the bounds.
    pub fn center(&self) -> GeodesyPoint {
        GeodesyPoint::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// Check whether a point lies within the bounds (inclusive).
    pub fn contains(&self, point: &GeodesyPoint) -> bool {
        point.latitude >= self.min_lat
            && point.latitude <= self.max_lat
            && point.longitude >= self.min_lng
            && point.longitude <= self.max_lng
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_track() -> Vec<GeodesyPoint> {
        vec![
            GeodesyPoint::new(47.2692, 11.4041),
            GeodesyPoint::new(47.2750, 11.3950),
            GeodesyPoint::new(47.2810, 11.4100),
        ]
    }

    #[test]
    fn test_track_point_builder() {
        let point = TrackPoint::new(47.0, 11.0)
            .with_altitude(1200.0)
            .with_heading(270);
        assert_eq!(point.altitude, Some(1200.0));
        assert_eq!(point.heading, Some(270));
        assert!(point.time.is_none());
    }

    #[test]
    fn test_track_point_to_geodesy_point() {
        let point = TrackPoint::new(47.0, 11.0).with_altitude(1200.0);
        let geo_point = GeodesyPoint::from(&point);
        assert_eq!(geo_point, GeodesyPoint::with_altitude(47.0, 11.0, 1200.0));
    }

    #[test]
    fn test_bounds_from_points() {
        let bounds = Bounds::from_points(sample_track()).unwrap();
        assert_eq!(bounds.min_lat, 47.2692);
        assert_eq!(bounds.max_lat, 47.2810);
        assert_eq!(bounds.min_lng, 11.3950);
        assert_eq!(bounds.max_lng, 11.4100);

        let center = bounds.center();
        assert!(bounds.contains(&center));
        assert!(!bounds.contains(&GeodesyPoint::new(48.0, 11.4)));
    }

    #[test]
    fn test_bounds_empty() {
        assert!(Bounds::from_points(Vec::new()).is_none());
    }

    #[test]
    fn test_track_point_json() {
        let point = TrackPoint::new(47.0, 11.0).with_altitude(1200.0);
        let json = serde_json::to_string(&point).unwrap();
        let back: TrackPoint = serde_json::from_str(&json).unwrap();
        assert_eq!(back, point);
    }
}
