//! Geodesic calculations on WGS84 latitude/longitude points.
//!
//! All calculations use a spherical Earth model:
//! - Haversine great-circle distance
//! - Initial bearing (course) between two points
//! - Forward geodesic ("dead reckoning") from a distance and bearing
//!
//! The sphere radius is carried by [`Sphere`] so tests and callers can
//! substitute a different model; the [`GeodesyPoint`] methods use
//! [`Sphere::EARTH`].
//!
//! # Example
//! ```
//! use geotrack::GeodesyPoint;
//!
//! let munich = GeodesyPoint::new(48.1374, 11.5755);
//! let north = munich.polar_offset(1000.0, 0.0, 0.0);
//! assert!((munich.distance_to(&north) - 1000.0).abs() < 1e-6);
//! ```

use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

use crate::constants::{COORDINATE_EPSILON, EARTH_RADIUS_IN_METER, POLE_EPSILON};

/// A sphere model used for geodesic calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sphere {
    /// Radius in meters
    pub radius_m: f64,
}

impl Sphere {
    /// Mean Earth sphere.
    pub const EARTH: Sphere = Sphere {
        radius_m: EARTH_RADIUS_IN_METER,
    };

    /// Create a sphere with a custom radius.
    pub const fn with_radius(radius_m: f64) -> Self {
        Self { radius_m }
    }

    /// Great-circle distance between two points in meters (haversine form).
    pub fn distance(&self, from: &GeodesyPoint, to: &GeodesyPoint) -> f64 {
        let lat1 = from.latitude.to_radians();
        let lat2 = to.latitude.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (to.longitude - from.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        // Rounding can push a marginally above 1 for antipodal points
        let c = 2.0 * a.sqrt().min(1.0).asin();

        self.radius_m * c
    }

    /// Destination point after travelling `distance_m` along `bearing_deg`
    /// from `from`, changing altitude by `height_m`.
    pub fn polar_offset(
        &self,
        from: &GeodesyPoint,
        distance_m: f64,
        bearing_deg: f64,
        height_m: f64,
    ) -> GeodesyPoint {
        let lat1 = from.latitude.to_radians();
        let lon1 = from.longitude.to_radians();
        let bearing = bearing_deg.to_radians();
        let angular = distance_m / self.radius_m;

        let sin_lat2 = lat1.sin() * angular.cos() + lat1.cos() * angular.sin() * bearing.cos();
        let lat2 = sin_lat2.clamp(-1.0, 1.0).asin();
        let lon2 = lon1
            + (bearing.sin() * angular.sin() * lat1.cos())
                .atan2(angular.cos() - lat1.sin() * sin_lat2);

        let altitude = match from.altitude {
            Some(alt) => alt + height_m,
            None => height_m,
        };

        GeodesyPoint::with_altitude(
            lat2.to_degrees(),
            normalize_longitude(lon2.to_degrees()),
            altitude,
        )
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self::EARTH
    }
}

/// A WGS84 point with optional altitude.
///
/// (0, 0) is treated as "unset" rather than the equator at Greenwich,
/// see [`GeodesyPoint::is_valid`]. Invalid points still take part in all
/// calculations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeodesyPoint {
    pub latitude: f64,
    pub longitude: f64,
    /// Altitude in meters
    pub altitude: Option<f64>,
}

impl GeodesyPoint {
    /// Create a point without altitude.
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: None,
        }
    }

    /// Create a point with altitude in meters.
    pub fn with_altitude(latitude: f64, longitude: f64, altitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            altitude: Some(altitude),
        }
    }

    /// Check whether the point carries real coordinates.
    pub fn is_valid(&self) -> bool {
        self.latitude.abs() > COORDINATE_EPSILON && self.longitude.abs() > COORDINATE_EPSILON
    }

    /// Great-circle distance to `other` in meters.
    pub fn distance_to(&self, other: &GeodesyPoint) -> f64 {
        Sphere::EARTH.distance(self, other)
    }

    /// Great-circle distance to `other` on a custom sphere.
    pub fn distance_to_on(&self, other: &GeodesyPoint, sphere: &Sphere) -> f64 {
        sphere.distance(self, other)
    }

    /// Initial bearing to `other` in degrees, clockwise from true north, in [0, 360).
    pub fn course_to(&self, other: &GeodesyPoint) -> f64 {
        let lat1 = self.latitude.to_radians();

        // Longitude is undefined on a pole; every direction is south (or north)
        if lat1.cos().abs() < POLE_EPSILON {
            return if lat1 > 0.0 { 180.0 } else { 0.0 };
        }

        let lat2 = other.latitude.to_radians();
        let dlon = (other.longitude - self.longitude).to_radians();

        let y = dlon.sin() * lat2.cos();
        let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();

        let mut course = y.atan2(x).to_degrees();
        if course < 0.0 {
            course += 360.0;
        }
        if course >= 360.0 {
            course = 0.0;
        }
        course
    }

    /// Point displaced by a local north/east/up offset in meters.
    pub fn offset(&self, north_m: f64, east_m: f64, height_m: f64) -> GeodesyPoint {
        self.offset_on(north_m, east_m, height_m, &Sphere::EARTH)
    }

    /// Like [`GeodesyPoint::offset`], on a custom sphere.
    pub fn offset_on(
        &self,
        north_m: f64,
        east_m: f64,
        height_m: f64,
        sphere: &Sphere,
    ) -> GeodesyPoint {
        let distance = north_m.hypot(east_m);
        // Math angle counter-clockwise from east, converted to compass bearing
        let angle = north_m.atan2(east_m).to_degrees();
        let bearing = (90.0 - angle).rem_euclid(360.0);

        sphere.polar_offset(self, distance, bearing, height_m)
    }

    /// Point reached after travelling `distance_m` along `bearing_deg`.
    ///
    /// Altitude becomes `altitude + height_m`, or just `height_m` when this
    /// point has no altitude.
    pub fn polar_offset(&self, distance_m: f64, bearing_deg: f64, height_m: f64) -> GeodesyPoint {
        Sphere::EARTH.polar_offset(self, distance_m, bearing_deg, height_m)
    }

    /// Like [`GeodesyPoint::polar_offset`], on a custom sphere.
    pub fn polar_offset_on(
        &self,
        distance_m: f64,
        bearing_deg: f64,
        height_m: f64,
        sphere: &Sphere,
    ) -> GeodesyPoint {
        sphere.polar_offset(self, distance_m, bearing_deg, height_m)
    }
}

/// Normalize a longitude in degrees into [-180, 180).
pub fn normalize_longitude(longitude: f64) -> f64 {
    (longitude + 540.0).rem_euclid(360.0) - 180.0
}

impl From<GeodesyPoint> for Point<f64> {
    fn from(p: GeodesyPoint) -> Self {
        Point::new(p.longitude, p.latitude)
    }
}

impl From<Point<f64>> for GeodesyPoint {
    fn from(p: Point<f64>) -> Self {
        GeodesyPoint::new(p.y(), p.x())
    }
}

impl From<GeodesyPoint> for Coord<f64> {
    fn from(p: GeodesyPoint) -> Self {
        Coord {
            x: p.longitude,
            y: p.latitude,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::{Distance, Haversine};

    const CENTER: GeodesyPoint = GeodesyPoint {
        latitude: 48.2,
        longitude: 11.5,
        altitude: None,
    };

    /// Deterministic pseudo-random sequence in [0, 1).
    fn lcg(state: &mut u64) -> f64 {
        *state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (*state >> 11) as f64 / (1u64 << 53) as f64
    }

    #[test]
    fn test_validity() {
        assert!(GeodesyPoint::new(48.2, 11.5).is_valid());
        assert!(!GeodesyPoint::new(0.0, 0.0).is_valid());
        assert!(!GeodesyPoint::new(48.2, 0.0).is_valid());
        assert!(!GeodesyPoint::default().is_valid());
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        assert_eq!(CENTER.distance_to(&CENTER), 0.0);
        let p = GeodesyPoint::with_altitude(-33.86, 151.21, 40.0);
        assert_eq!(p.distance_to(&p), 0.0);
    }

    #[test]
    fn test_distance_symmetry() {
        let london = GeodesyPoint::new(51.5074, -0.1278);
        let paris = GeodesyPoint::new(48.8566, 2.3522);
        let d1 = london.distance_to(&paris);
        let d2 = paris.distance_to(&london);
        assert!((d1 - d2).abs() < 1e-6);
        // London to Paris is ~343.5 km
        assert!((d1 - 343_500.0).abs() < 1_000.0, "got {}", d1);
    }

    #[test]
    fn test_distance_symmetry_random() {
        let mut state = 11;
        for _ in 0..500 {
            let a = GeodesyPoint::new(lcg(&mut state) * 180.0 - 90.0, lcg(&mut state) * 360.0 - 180.0);
            let b = GeodesyPoint::new(lcg(&mut state) * 180.0 - 90.0, lcg(&mut state) * 360.0 - 180.0);
            let d1 = a.distance_to(&b);
            let d2 = b.distance_to(&a);
            assert!((d1 - d2).abs() < 1e-6, "{:?} {:?}: {} vs {}", a, b, d1, d2);
        }
    }

    #[test]
    fn test_distance_matches_geo_haversine() {
        let london = GeodesyPoint::new(51.5074, -0.1278);
        let paris = GeodesyPoint::new(48.8566, 2.3522);
        let ours = london.distance_to(&paris);
        let theirs = Haversine::distance(Point::from(london), Point::from(paris));
        // geo uses a slightly different mean radius (6371008.8 m)
        assert!(((ours - theirs) / theirs).abs() < 1e-5);
    }

    #[test]
    fn test_distance_scales_with_radius() {
        let a = GeodesyPoint::new(47.0, 11.0);
        let b = GeodesyPoint::new(47.5, 12.0);
        let earth = a.distance_to(&b);
        let double = a.distance_to_on(&b, &Sphere::with_radius(2.0 * EARTH_RADIUS_IN_METER));
        assert!((double - 2.0 * earth).abs() < 1e-6);
    }

    #[test]
    fn test_antipodal_distance() {
        let a = GeodesyPoint::new(10.0, 20.0);
        let b = GeodesyPoint::new(-10.0, -160.0);
        let half_circumference = std::f64::consts::PI * EARTH_RADIUS_IN_METER;
        assert!((a.distance_to(&b) - half_circumference).abs() < 1.0);
    }

    #[test]
    fn test_course_cardinal() {
        let north = GeodesyPoint::new(49.2, 11.5);
        let south = GeodesyPoint::new(47.2, 11.5);
        let east = GeodesyPoint::new(48.2, 11.6);
        let west = GeodesyPoint::new(48.2, 11.4);

        assert!(CENTER.course_to(&north).abs() < 1e-9);
        assert!((CENTER.course_to(&south) - 180.0).abs() < 1e-9);
        // Great circle heading east departs slightly north of 90°
        assert!((CENTER.course_to(&east) - 90.0).abs() < 0.1);
        assert!((CENTER.course_to(&west) - 270.0).abs() < 0.1);
    }

    #[test]
    fn test_course_range() {
        let mut state = 7;
        for _ in 0..500 {
            let a = GeodesyPoint::new(lcg(&mut state) * 170.0 - 85.0, lcg(&mut state) * 360.0 - 180.0);
            let b = GeodesyPoint::new(lcg(&mut state) * 170.0 - 85.0, lcg(&mut state) * 360.0 - 180.0);
            let course = a.course_to(&b);
            assert!((0.0..360.0).contains(&course), "course {} out of range", course);
        }
    }

    #[test]
    fn test_course_from_poles() {
        let north_pole = GeodesyPoint::new(90.0, 0.0);
        let south_pole = GeodesyPoint::new(-90.0, 45.0);
        let target = GeodesyPoint::new(48.2, 11.5);

        assert_eq!(north_pole.course_to(&target), 180.0);
        assert_eq!(south_pole.course_to(&target), 0.0);
    }

    #[test]
    fn test_polar_offset_cardinal_directions() {
        let distance_in_meter = 1000.0;
        for bearing in [0.0, 90.0, 180.0, 270.0, 71.0] {
            let target = CENTER.polar_offset(distance_in_meter, bearing, 0.0);
            let distance = CENTER.distance_to(&target);
            assert!(
                (distance - distance_in_meter).abs() < 1e-3,
                "bearing {}: distance {}",
                bearing,
                distance
            );

            let course = CENTER.course_to(&target);
            let diff = (course - bearing + 540.0).rem_euclid(360.0) - 180.0;
            assert!(diff.abs() < 1e-6, "bearing {}: course {}", bearing, course);
        }
    }

    #[test]
    fn test_polar_offset_round_trip() {
        let mut state = 42;
        for _ in 0..200 {
            let center = GeodesyPoint::new(lcg(&mut state) * 140.0 - 70.0, lcg(&mut state) * 360.0 - 180.0);
            let distance = 1.0 + lcg(&mut state) * 3_000_000.0;
            let bearing = lcg(&mut state) * 360.0;

            let target = center.polar_offset(distance, bearing, 0.0);
            let measured = center.distance_to(&target);
            assert!(
                ((measured - distance) / distance).abs() < 1e-3,
                "distance {} measured {}",
                distance,
                measured
            );
            assert!((-180.0..=180.0).contains(&target.longitude));
            assert!((-90.0..=90.0).contains(&target.latitude));
        }
    }

    #[test]
    fn test_polar_offset_normalizes_longitude() {
        let near_dateline = GeodesyPoint::new(0.5, 179.999);
        let target = near_dateline.polar_offset(10_000.0, 90.0, 0.0);
        assert!(target.longitude < 0.0);
        assert!(target.longitude > -180.0);
    }

    #[test]
    fn test_polar_offset_altitude() {
        let with_alt = GeodesyPoint::with_altitude(48.2, 11.5, 500.0);
        assert_eq!(with_alt.polar_offset(100.0, 0.0, 25.0).altitude, Some(525.0));

        // No source altitude: result carries the height delta only
        assert_eq!(CENTER.polar_offset(100.0, 0.0, 25.0).altitude, Some(25.0));
    }

    #[test]
    fn test_offset_north_east() {
        let north = CENTER.offset(1000.0, 0.0, 0.0);
        assert!(north.latitude > CENTER.latitude);
        assert!((north.longitude - CENTER.longitude).abs() < 1e-9);
        assert!((CENTER.distance_to(&north) - 1000.0).abs() < 1e-3);

        let east = CENTER.offset(0.0, 1000.0, 0.0);
        assert!(east.longitude > CENTER.longitude);
        assert!((CENTER.course_to(&east) - 90.0).abs() < 1e-6);

        let south = CENTER.offset(-1000.0, 0.0, 0.0);
        assert!((CENTER.course_to(&south) - 180.0).abs() < 1e-6);

        let west = CENTER.offset(0.0, -1000.0, 0.0);
        assert!((CENTER.course_to(&west) - 270.0).abs() < 1e-6);

        let diagonal = CENTER.offset(300.0, 400.0, 10.0);
        assert!((CENTER.distance_to(&diagonal) - 500.0).abs() < 1e-3);
        assert_eq!(diagonal.altitude, Some(10.0));
    }

    #[test]
    fn test_geo_conversion() {
        let point: Point<f64> = CENTER.into();
        assert_eq!(point.x(), 11.5);
        assert_eq!(point.y(), 48.2);

        let back = GeodesyPoint::from(point);
        assert_eq!(back, CENTER);

        let coord: Coord<f64> = CENTER.into();
        assert_eq!(coord.x, 11.5);
    }

    #[test]
    fn test_normalize_longitude() {
        assert!((normalize_longitude(181.0) + 179.0).abs() < 1e-9);
        assert!((normalize_longitude(-181.0) - 179.0).abs() < 1e-9);
        assert!((normalize_longitude(11.5) - 11.5).abs() < 1e-9);
    }
}
