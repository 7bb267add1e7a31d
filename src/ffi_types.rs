//! FFI-safe types with UniFFI derives.
//!
//! These types mirror the core types but replace chrono timestamps with
//! unix milliseconds. Conversion is done at the FFI boundary.

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::{Bounds, GeodesyPoint, GeotrackError, TrackPoint, TrackStatistics};

/// Geodesy point for FFI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct FfiGeodesyPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude: Option<f64>,
}

impl From<GeodesyPoint> for FfiGeodesyPoint {
    fn from(p: GeodesyPoint) -> Self {
        Self {
            latitude: p.latitude,
            longitude: p.longitude,
            altitude: p.altitude,
        }
    }
}

impl From<FfiGeodesyPoint> for GeodesyPoint {
    fn from(p: FfiGeodesyPoint) -> Self {
        Self {
            latitude: p.latitude,
            longitude: p.longitude,
            altitude: p.altitude,
        }
    }
}

/// Bounding box for FFI
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct FfiBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl From<Bounds> for FfiBounds {
    fn from(b: Bounds) -> Self {
        Self {
            min_lat: b.min_lat,
            max_lat: b.max_lat,
            min_lng: b.min_lng,
            max_lng: b.max_lng,
        }
    }
}

/// Track point for FFI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct FfiTrackPoint {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: Option<f64>,
    pub heading: Option<i32>,
    /// Unix timestamp in milliseconds
    pub time_ms: Option<i64>,
}

impl TryFrom<FfiTrackPoint> for TrackPoint {
    type Error = GeotrackError;

    fn try_from(p: FfiTrackPoint) -> Result<Self, Self::Error> {
        let time = match p.time_ms {
            Some(millis) => Some(
                DateTime::from_timestamp_millis(millis)
                    .ok_or(GeotrackError::InvalidTimestamp { millis })?,
            ),
            None => None,
        };

        Ok(TrackPoint {
            latitude: p.latitude,
            longitude: p.longitude,
            altitude: p.altitude,
            heading: p.heading,
            time,
        })
    }
}

/// Track statistics for FFI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, uniffi::Record)]
pub struct FfiTrackStatistics {
    pub point_count: u32,
    pub duration_secs: f64,
    /// Unix timestamp in milliseconds of the first timestamped point
    pub start_time_ms: Option<i64>,
    /// Unix timestamp in milliseconds of the last timestamped point
    pub end_time_ms: Option<i64>,
    pub length_meters: f64,
    pub height_gain_meters: f64,
    pub height_loss_meters: f64,
    pub max_height: f64,
    pub min_height: f64,
    pub max_climb_rate: f64,
    pub max_sink_rate: f64,
    pub max_speed_kmh: f64,
    pub average_speed_kmh: f64,
    pub center: FfiGeodesyPoint,
    pub bounds: Option<FfiBounds>,
}

impl From<TrackStatistics> for FfiTrackStatistics {
    fn from(s: TrackStatistics) -> Self {
        Self {
            point_count: s.point_count,
            duration_secs: s.duration_secs,
            start_time_ms: s.start_time.map(|t| t.timestamp_millis()),
            end_time_ms: s.end_time.map(|t| t.timestamp_millis()),
            length_meters: s.length_meters,
            height_gain_meters: s.height_gain_meters,
            height_loss_meters: s.height_loss_meters,
            max_height: s.max_height,
            min_height: s.min_height,
            max_climb_rate: s.max_climb_rate,
            max_sink_rate: s.max_sink_rate,
            max_speed_kmh: s.max_speed_kmh,
            average_speed_kmh: s.average_speed_kmh,
            center: s.center.into(),
            bounds: s.bounds.map(FfiBounds::from),
        }
    }
}
