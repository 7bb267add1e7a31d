//! Time-bounded window of recent live positions.
//!
//! Keeps the samples of the last `interval` (relative to the newest sample)
//! for trail display and smoothing of the live position. The window only
//! buffers; it does not filter or interpolate.
//!
//! # Example
//! ```
//! use chrono::{Duration, TimeZone, Utc};
//! use geotrack::{GeodesyPoint, PositionSample, PositionWindow};
//!
//! let mut window = PositionWindow::new(Duration::seconds(60)).unwrap();
//! let t0 = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
//! for secs in [0, 30, 65] {
//!     let location = GeodesyPoint::new(47.0, 11.0);
//!     window.add(PositionSample::new(location, t0 + Duration::seconds(secs)));
//! }
//! assert_eq!(window.len(), 2);
//! ```

use std::collections::vec_deque::{self, VecDeque};

use chrono::{DateTime, Duration, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{GeodesyPoint, GeotrackError, Result};

/// Oldest and newest sample must be further apart than this for a course.
const MIN_DISTANCE_FOR_COURSE_M: f64 = 1.0;

/// A single timestamped live position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PositionSample {
    pub location: GeodesyPoint,
    pub timestamp: DateTime<Utc>,
}

impl PositionSample {
    pub fn new(location: GeodesyPoint, timestamp: DateTime<Utc>) -> Self {
        Self {
            location,
            timestamp,
        }
    }
}

/// Samples of the last `interval`, oldest first.
///
/// The newest sample is always retained, even when it alone spans the
/// whole interval.
#[derive(Debug, Clone)]
pub struct PositionWindow {
    samples: VecDeque<PositionSample>,
    interval: Duration,
}

impl PositionWindow {
    /// Create an empty window covering `interval`.
    ///
    /// Fails with [`GeotrackError::InvalidInterval`] for a negative interval.
    pub fn new(interval: Duration) -> Result<Self> {
        if interval < Duration::zero() {
            return Err(GeotrackError::InvalidInterval {
                seconds: interval.num_milliseconds() as f64 / 1000.0,
            });
        }

        debug!(
            "[PositionWindow] Created with {}s interval",
            interval.num_seconds()
        );

        Ok(Self {
            samples: VecDeque::new(),
            interval,
        })
    }

    /// Append a sample and drop samples older than `interval` before it.
    ///
    /// Samples are expected in chronological order; the appended sample is
    /// taken as the newest.
    pub fn add(&mut self, sample: PositionSample) {
        self.samples.push_back(sample);

        // An unrepresentable cutoff lies before every sample
        let Some(cutoff) = sample.timestamp.checked_sub_signed(self.interval) else {
            return;
        };

        while self.samples.len() > 1 {
            match self.samples.front() {
                Some(front) if front.timestamp < cutoff => {
                    self.samples.pop_front();
                }
                _ => break,
            }
        }
    }

    /// Samples oldest to newest.
    pub fn samples(&self) -> vec_deque::Iter<'_, PositionSample> {
        self.samples.iter()
    }

    /// Copy of the samples, oldest to newest.
    pub fn to_vec(&self) -> Vec<PositionSample> {
        self.samples.iter().copied().collect()
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn oldest(&self) -> Option<&PositionSample> {
        self.samples.front()
    }

    pub fn latest(&self) -> Option<&PositionSample> {
        self.samples.back()
    }

    /// Time between oldest and newest sample.
    pub fn time_span(&self) -> Option<Duration> {
        match (self.samples.front(), self.samples.back()) {
            (Some(first), Some(last)) => Some(last.timestamp - first.timestamp),
            _ => None,
        }
    }

    /// Course over ground from the oldest to the newest sample, in degrees.
    ///
    /// Returns `None` with fewer than two samples or when both positions
    /// are too close for a reliable direction.
    pub fn course(&self) -> Option<f64> {
        if self.samples.len() < 2 {
            return None;
        }
        let first = self.samples.front()?;
        let last = self.samples.back()?;

        if first.location.distance_to(&last.location) < MIN_DISTANCE_FOR_COURSE_M {
            return None;
        }
        Some(first.location.course_to(&last.location))
    }
}

impl<'a> IntoIterator for &'a PositionWindow {
    type Item = &'a PositionSample;
    type IntoIter = vec_deque::Iter<'a, PositionSample>;

    fn into_iter(self) -> Self::IntoIter {
        self.samples.iter()
    }
}
