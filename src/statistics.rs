//! Track statistics computed in a single pass over the point sequence.
//!
//! ## Computed values
//! - Duration between the first and last timestamped point
//! - Track length (sum of great-circle step distances)
//! - Height gain/loss, min/max height
//! - Max climb and sink rate (m/s)
//! - Max and average speed (km/h)
//! - Center point and bounding box
//!
//! Degenerate input never fails: an empty or single-point track yields
//! zeroed values, missing timestamps fall back to
//! [`DEFAULT_ELAPSED_SECONDS`] per step, and steps without elapsed time get
//! a rate of zero.
//!
//! ## Example
//! ```rust
//! use geotrack::{compute_statistics, TrackPoint};
//!
//! let points = vec![
//!     TrackPoint::new(47.00, 11.0).with_altitude(100.0),
//!     TrackPoint::new(47.01, 11.0).with_altitude(150.0),
//! ];
//! let stats = compute_statistics(&points);
//! assert_eq!(stats.max_height, 150.0);
//! ```

use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::constants::{DEFAULT_ELAPSED_SECONDS, MIN_ELAPSED_SECONDS, MS_TO_KMH};
use crate::{Bounds, GeodesyPoint, Sphere, TrackPoint};

/// Configuration for statistics computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatisticsConfig {
    /// Sphere used for step distances.
    /// Default: mean Earth radius
    pub sphere: Sphere,

    /// Elapsed seconds assumed when a step lacks timestamps.
    /// Default: 1.0
    pub default_elapsed_secs: f64,

    /// Elapsed seconds below which a step's rate is zero.
    /// Default: 1e-6
    pub min_elapsed_secs: f64,
}

impl Default for StatisticsConfig {
    fn default() -> Self {
        Self {
            sphere: Sphere::EARTH,
            default_elapsed_secs: DEFAULT_ELAPSED_SECONDS,
            min_elapsed_secs: MIN_ELAPSED_SECONDS,
        }
    }
}

/// Derived statistics of a track.
///
/// `Default` is the all-zero summary of an empty track.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TrackStatistics {
    /// Number of points the statistics were computed from
    pub point_count: u32,
    /// Time between first and last timestamped point, in seconds
    pub duration_secs: f64,
    /// Time of the first timestamped point
    pub start_time: Option<DateTime<Utc>>,
    /// Time of the last timestamped point
    pub end_time: Option<DateTime<Utc>>,
    /// Track length in meters
    pub length_meters: f64,
    /// Sum of all altitude increases in meters
    pub height_gain_meters: f64,
    /// Sum of all altitude decreases in meters (positive)
    pub height_loss_meters: f64,
    /// Highest altitude, 0 when no point has altitude
    pub max_height: f64,
    /// Lowest altitude, 0 when no point has altitude
    pub min_height: f64,
    /// Highest climb rate in m/s (>= 0)
    pub max_climb_rate: f64,
    /// Strongest sink rate in m/s (<= 0)
    pub max_sink_rate: f64,
    /// Highest step speed in km/h
    pub max_speed_kmh: f64,
    /// Mean of the step speeds in km/h
    pub average_speed_kmh: f64,
    /// Mean position of all points
    pub center: GeodesyPoint,
    /// Bounding box, `None` for an empty track
    pub bounds: Option<Bounds>,
}

impl TrackStatistics {
    /// Duration as a chrono duration (millisecond precision).
    pub fn duration(&self) -> chrono::Duration {
        chrono::Duration::milliseconds((self.duration_secs * 1000.0).round() as i64)
    }
}

/// Running values of the per-step pass.
#[derive(Debug, Default)]
struct Accumulator {
    min_height: Option<f64>,
    max_height: Option<f64>,
    height_gain: f64,
    height_loss: f64,
    max_climb_rate: f64,
    max_sink_rate: f64,
    length: f64,
    max_speed: f64,
    speed_sum: f64,
    speed_count: u32,
}

impl Accumulator {
    fn add_altitude(&mut self, altitude: f64) {
        self.min_height = Some(self.min_height.map_or(altitude, |h| h.min(altitude)));
        self.max_height = Some(self.max_height.map_or(altitude, |h| h.max(altitude)));
    }

    fn add_altitude_step(&mut self, delta: f64, elapsed: f64, config: &StatisticsConfig) {
        let rate = rate_per_second(delta, elapsed, config);
        if delta > 0.0 {
            self.height_gain += delta;
            self.max_climb_rate = self.max_climb_rate.max(rate);
        } else if delta < 0.0 {
            self.height_loss += -delta;
            self.max_sink_rate = self.max_sink_rate.min(rate);
        }
    }

    fn add_distance_step(&mut self, distance: f64, elapsed: f64, config: &StatisticsConfig) {
        self.length += distance;

        // A step without elapsed time still counts, with speed 0
        let speed = if elapsed.abs() < config.min_elapsed_secs {
            0.0
        } else {
            distance / elapsed * MS_TO_KMH
        };
        self.max_speed = self.max_speed.max(speed);
        self.speed_sum += speed;
        self.speed_count += 1;
    }
}

/// Compute statistics for a point sequence with the default configuration.
pub fn compute_statistics(points: &[TrackPoint]) -> TrackStatistics {
    compute_statistics_with_config(points, &StatisticsConfig::default())
}

/// Compute statistics for a point sequence.
///
/// Pure function: the result only depends on `points` and `config`, so
/// calling it again on unchanged points gives the same summary.
pub fn compute_statistics_with_config(
    points: &[TrackPoint],
    config: &StatisticsConfig,
) -> TrackStatistics {
    if points.is_empty() {
        return TrackStatistics::default();
    }

    let start_time = points.iter().find_map(|p| p.time);
    let end_time = points.iter().rev().find_map(|p| p.time);
    let duration_secs = match (start_time, end_time) {
        (Some(start), Some(end)) => seconds_between(start, end),
        _ => 0.0,
    };

    let mut acc = Accumulator::default();
    let mut previous: Option<&TrackPoint> = None;

    for point in points {
        if let Some(altitude) = point.altitude {
            acc.add_altitude(altitude);
        }

        if let Some(prev) = previous {
            let elapsed = elapsed_seconds(prev, point, config);

            if let (Some(prev_alt), Some(alt)) = (prev.altitude, point.altitude) {
                acc.add_altitude_step(alt - prev_alt, elapsed, config);
            }

            let distance = config
                .sphere
                .distance(&GeodesyPoint::from(prev), &GeodesyPoint::from(point));
            acc.add_distance_step(distance, elapsed, config);
        }

        previous = Some(point);
    }

    let average_speed_kmh = if acc.speed_count > 0 {
        acc.speed_sum / acc.speed_count as f64
    } else {
        0.0
    };

    let stats = TrackStatistics {
        point_count: u32::try_from(points.len()).unwrap_or(u32::MAX),
        duration_secs,
        start_time,
        end_time,
        length_meters: acc.length,
        height_gain_meters: acc.height_gain,
        height_loss_meters: acc.height_loss,
        max_height: acc.max_height.unwrap_or(0.0),
        min_height: acc.min_height.unwrap_or(0.0),
        max_climb_rate: acc.max_climb_rate,
        max_sink_rate: acc.max_sink_rate,
        max_speed_kmh: acc.max_speed,
        average_speed_kmh,
        center: compute_center_point(points),
        bounds: Bounds::from_points(points.iter().map(GeodesyPoint::from)),
    };

    debug!(
        "[TrackStatistics] {} points: {:.0}m in {:.0}s, +{:.0}m/-{:.0}m, max {:.1}km/h",
        stats.point_count,
        stats.length_meters,
        stats.duration_secs,
        stats.height_gain_meters,
        stats.height_loss_meters,
        stats.max_speed_kmh
    );

    stats
}

/// Compute the mean position of a point sequence.
///
/// Latitude and longitude are averaged over all points, altitude only over
/// points that carry one. An empty sequence yields (0, 0) without altitude.
pub fn compute_center_point(points: &[TrackPoint]) -> GeodesyPoint {
    if points.is_empty() {
        return GeodesyPoint::default();
    }

    let mut sum_lat = 0.0;
    let mut sum_lng = 0.0;
    let mut sum_alt = 0.0;
    let mut alt_count = 0u32;

    for p in points {
        sum_lat += p.latitude;
        sum_lng += p.longitude;
        if let Some(alt) = p.altitude {
            sum_alt += alt;
            alt_count += 1;
        }
    }

    let n = points.len() as f64;
    GeodesyPoint {
        latitude: sum_lat / n,
        longitude: sum_lng / n,
        altitude: (alt_count > 0).then(|| sum_alt / alt_count as f64),
    }
}

/// Compute statistics for many tracks at once.
///
/// Uses rayon when the `parallel` feature is enabled.
pub fn compute_statistics_batch<T>(tracks: &[T], config: &StatisticsConfig) -> Vec<TrackStatistics>
where
    T: AsRef<[TrackPoint]> + Sync,
{
    debug!("[TrackStatistics] Computing batch of {} tracks", tracks.len());

    #[cfg(feature = "parallel")]
    let stats = tracks
        .par_iter()
        .map(|t| compute_statistics_with_config(t.as_ref(), config))
        .collect();

    #[cfg(not(feature = "parallel"))]
    let stats = tracks
        .iter()
        .map(|t| compute_statistics_with_config(t.as_ref(), config))
        .collect();

    stats
}

/// Elapsed seconds between two consecutive points, or the configured
/// fallback when either has no time.
fn elapsed_seconds(prev: &TrackPoint, current: &TrackPoint, config: &StatisticsConfig) -> f64 {
    match (prev.time, current.time) {
        (Some(start), Some(end)) => seconds_between(start, end),
        _ => config.default_elapsed_secs,
    }
}

fn seconds_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    let delta = end - start;
    match delta.num_microseconds() {
        Some(micros) => micros as f64 / 1_000_000.0,
        None => delta.num_milliseconds() as f64 / 1000.0,
    }
}

fn rate_per_second(delta: f64, elapsed: f64, config: &StatisticsConfig) -> f64 {
    if elapsed.abs() < config.min_elapsed_secs {
        0.0
    } else {
        delta / elapsed
    }
}
