//! Fixed constants of the geodesy and statistics calculations.

/// Mean Earth radius in meters, used by [`Sphere::EARTH`](crate::Sphere::EARTH).
pub const EARTH_RADIUS_IN_METER: f64 = 6_371_000.0;

/// Elapsed time assumed for a step when either point has no timestamp.
///
/// Climb rates and speeds of untimed tracks are therefore "per step" values.
pub const DEFAULT_ELAPSED_SECONDS: f64 = 1.0;

/// Elapsed times below this are treated as zero; the step's rate is then 0.
pub const MIN_ELAPSED_SECONDS: f64 = 1e-6;

/// Coordinates with a magnitude at or below this are considered unset.
pub const COORDINATE_EPSILON: f64 = 1e-9;

/// Below this |cos(latitude)| a point is treated as sitting on a pole.
pub const POLE_EPSILON: f64 = 1e-12;

/// Conversion factor from m/s to km/h.
pub const MS_TO_KMH: f64 = 3.6;
