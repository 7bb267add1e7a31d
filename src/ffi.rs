//! FFI bindings for mobile platforms (iOS/Android).
//!
//! This module provides the UniFFI bindings that expose geodesy and track
//! statistics to Kotlin and Swift. All FFI functions are prefixed with
//! `ffi_` to avoid naming conflicts with the internal API.

use log::{debug, info, warn};

use crate::ffi_types::{FfiGeodesyPoint, FfiTrackPoint, FfiTrackStatistics};
use crate::{compute_center_point, compute_statistics, init_logging, GeodesyPoint, TrackPoint};

// ============================================================================
// Geodesy
// ============================================================================

/// Great-circle distance between two points in meters.
#[uniffi::export]
pub fn ffi_distance(from: FfiGeodesyPoint, to: FfiGeodesyPoint) -> f64 {
    GeodesyPoint::from(from).distance_to(&GeodesyPoint::from(to))
}

/// Initial bearing from one point to another in degrees [0, 360).
#[uniffi::export]
pub fn ffi_course(from: FfiGeodesyPoint, to: FfiGeodesyPoint) -> f64 {
    GeodesyPoint::from(from).course_to(&GeodesyPoint::from(to))
}

/// Point reached after travelling a distance along a bearing.
#[uniffi::export]
pub fn ffi_polar_offset(
    from: FfiGeodesyPoint,
    distance_m: f64,
    bearing_deg: f64,
    height_m: f64,
) -> FfiGeodesyPoint {
    GeodesyPoint::from(from)
        .polar_offset(distance_m, bearing_deg, height_m)
        .into()
}

/// Point displaced by a local north/east/up offset in meters.
#[uniffi::export]
pub fn ffi_offset(
    from: FfiGeodesyPoint,
    north_m: f64,
    east_m: f64,
    height_m: f64,
) -> FfiGeodesyPoint {
    GeodesyPoint::from(from)
        .offset(north_m, east_m, height_m)
        .into()
}

// ============================================================================
// Track Statistics
// ============================================================================

/// Convert FFI points, dropping timestamps chrono cannot represent.
fn to_track_points(points: Vec<FfiTrackPoint>) -> Vec<TrackPoint> {
    points
        .into_iter()
        .map(|p| {
            let fallback = TrackPoint {
                latitude: p.latitude,
                longitude: p.longitude,
                altitude: p.altitude,
                heading: p.heading,
                time: None,
            };
            TrackPoint::try_from(p).unwrap_or_else(|e| {
                warn!("[GeotrackRust] {}, using point without time", e);
                fallback
            })
        })
        .collect()
}

/// Compute statistics for a track.
#[uniffi::export]
pub fn ffi_compute_statistics(points: Vec<FfiTrackPoint>) -> FfiTrackStatistics {
    init_logging();
    info!(
        "[GeotrackRust] ffi_compute_statistics called with {} points",
        points.len()
    );

    let points = to_track_points(points);
    compute_statistics(&points).into()
}

/// Compute statistics for a track and return them as JSON.
#[uniffi::export]
pub fn ffi_compute_statistics_json(points: Vec<FfiTrackPoint>) -> String {
    init_logging();
    let points = to_track_points(points);
    let stats = compute_statistics(&points);
    debug!(
        "[GeotrackRust] Statistics JSON for {} points",
        stats.point_count
    );
    serde_json::to_string(&stats).unwrap_or_else(|_| "{}".to_string())
}

/// Compute the mean position of a track.
#[uniffi::export]
pub fn ffi_compute_center_point(points: Vec<FfiTrackPoint>) -> FfiGeodesyPoint {
    let points = to_track_points(points);
    compute_center_point(&points).into()
}
