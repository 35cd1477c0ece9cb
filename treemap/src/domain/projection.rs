//! Geographic to planar coordinate conversion.
//!
//! The tree register stores positions in the Polish "2000" grid (zone 7,
//! EPSG:2178). Live positions arrive as WGS84 longitude/latitude and must be
//! projected before any distance comparison.

use serde::{Deserialize, Serialize};

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Longitude in degrees, east positive.
    pub longitude: f64,
    /// Latitude in degrees, north positive.
    pub latitude: f64,
}

impl GeoPoint {
    /// Creates a point from longitude and latitude, in that order.
    #[must_use]
    pub const fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// A position in the dataset's planar grid, in metres.
///
/// `x` is the easting and `y` the northing, matching the record fields the
/// data provider delivers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanarPoint {
    pub x: f64,
    pub y: f64,
}

impl PlanarPoint {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Squared Euclidean distance; enough for ordering comparisons.
    #[must_use]
    pub fn distance_squared(self, other: Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

/// Reference ellipsoid parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ellipsoid {
    /// Semi-major axis in metres.
    pub semi_major_axis: f64,
    /// Inverse flattening (1/f).
    pub inverse_flattening: f64,
}

/// GRS80, used by ETRS89 based Polish grids.
pub const GRS80: Ellipsoid = Ellipsoid {
    semi_major_axis: 6_378_137.0,
    inverse_flattening: 298.257_222_101,
};

/// A Transverse Mercator projection definition.
///
/// # Examples
///
/// ```
/// use treemap::domain::{GeoPoint, PUWG_2000_ZONE_7};
///
/// let planar = PUWG_2000_ZONE_7.project(GeoPoint::new(21.0, 52.0));
/// assert!((planar.x - 7_500_000.0).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransverseMercator {
    pub ellipsoid: Ellipsoid,
    /// Latitude of origin in degrees.
    pub latitude_of_origin: f64,
    /// Central meridian in degrees.
    pub central_meridian: f64,
    pub scale_factor: f64,
    pub false_easting: f64,
    pub false_northing: f64,
}

/// PUWG 2000 zone 7 (EPSG:2178), the grid the tree register is published in.
///
/// `+proj=tmerc +lat_0=0 +lon_0=21 +k=0.999923 +x_0=7500000 +y_0=0 +ellps=GRS80`
pub const PUWG_2000_ZONE_7: TransverseMercator = TransverseMercator {
    ellipsoid: GRS80,
    latitude_of_origin: 0.0,
    central_meridian: 21.0,
    scale_factor: 0.999_923,
    false_easting: 7_500_000.0,
    false_northing: 0.0,
};

impl Default for TransverseMercator {
    fn default() -> Self {
        PUWG_2000_ZONE_7
    }
}

impl TransverseMercator {
    /// Projects a geographic coordinate onto the planar grid.
    ///
    /// Uses the Snyder series expansion, which stays within millimetres of
    /// the exact solution inside a 3° wide zone. Non-finite input yields
    /// non-finite output.
    #[must_use]
    pub fn project(&self, point: GeoPoint) -> PlanarPoint {
        let e2 = self.eccentricity_squared();
        let ep2 = e2 / (1.0 - e2);
        let a = self.ellipsoid.semi_major_axis;
        let k0 = self.scale_factor;

        let phi = point.latitude.to_radians();
        let lambda = (point.longitude - self.central_meridian).to_radians();

        let (sin_phi, cos_phi) = phi.sin_cos();
        let tan_phi = phi.tan();
        let n = a / (1.0 - e2 * sin_phi * sin_phi).sqrt();
        let t = tan_phi * tan_phi;
        let c = ep2 * cos_phi * cos_phi;
        let big_a = lambda * cos_phi;

        let a2 = big_a * big_a;
        let a3 = a2 * big_a;
        let a4 = a3 * big_a;
        let a5 = a4 * big_a;
        let a6 = a5 * big_a;

        let m = self.meridional_arc(phi);
        let m0 = self.meridional_arc(self.latitude_of_origin.to_radians());

        let easting = k0
            * n
            * (big_a
                + (1.0 - t + c) * a3 / 6.0
                + (5.0 - 18.0 * t + t * t + 72.0 * c - 58.0 * ep2) * a5 / 120.0);
        let northing = k0
            * (m - m0
                + n * tan_phi
                    * (a2 / 2.0
                        + (5.0 - t + 9.0 * c + 4.0 * c * c) * a4 / 24.0
                        + (61.0 - 58.0 * t + t * t + 600.0 * c - 330.0 * ep2) * a6 / 720.0));

        PlanarPoint::new(easting + self.false_easting, northing + self.false_northing)
    }

    fn eccentricity_squared(&self) -> f64 {
        let f = 1.0 / self.ellipsoid.inverse_flattening;
        f * (2.0 - f)
    }

    fn meridional_arc(&self, phi: f64) -> f64 {
        let e2 = self.eccentricity_squared();
        let e4 = e2 * e2;
        let e6 = e4 * e2;
        self.ellipsoid.semi_major_axis
            * ((1.0 - e2 / 4.0 - 3.0 * e4 / 64.0 - 5.0 * e6 / 256.0) * phi
                - (3.0 * e2 / 8.0 + 3.0 * e4 / 32.0 + 45.0 * e6 / 1024.0) * (2.0 * phi).sin()
                + (15.0 * e4 / 256.0 + 45.0 * e6 / 1024.0) * (4.0 * phi).sin()
                - (35.0 * e6 / 3072.0) * (6.0 * phi).sin())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for the PUWG 2000 projection.

    use rstest::rstest;

    use super::*;

    const TOLERANCE_M: f64 = 0.01;

    #[rstest]
    #[case(GeoPoint::new(21.0, 0.0), PlanarPoint::new(7_500_000.0, 0.0))]
    #[case(GeoPoint::new(21.0, 52.0), PlanarPoint::new(7_500_000.0, 5_762_899.773))]
    #[case(
        GeoPoint::new(21.003_30, 52.228_78),
        PlanarPoint::new(7_500_225.463, 5_788_354.060)
    )]
    #[case(GeoPoint::new(22.5, 50.0), PlanarPoint::new(7_607_533.229, 5_541_498.799))]
    fn projects_known_points(#[case] input: GeoPoint, #[case] expected: PlanarPoint) {
        let actual = PUWG_2000_ZONE_7.project(input);
        assert!(
            (actual.x - expected.x).abs() < TOLERANCE_M,
            "easting {} != {}",
            actual.x,
            expected.x
        );
        assert!(
            (actual.y - expected.y).abs() < TOLERANCE_M,
            "northing {} != {}",
            actual.y,
            expected.y
        );
    }

    #[rstest]
    fn meridian_offsets_are_symmetric() {
        let east = PUWG_2000_ZONE_7.project(GeoPoint::new(21.5, 52.2));
        let west = PUWG_2000_ZONE_7.project(GeoPoint::new(20.5, 52.2));
        assert!(((east.x - 7_500_000.0) + (west.x - 7_500_000.0)).abs() < 1e-6);
        assert!((east.y - west.y).abs() < 1e-6);
    }

    #[rstest]
    fn distance_squared_skips_the_root() {
        let a = PlanarPoint::new(0.0, 0.0);
        let b = PlanarPoint::new(3.0, 4.0);
        assert!((a.distance_squared(b) - 25.0).abs() < f64::EPSILON);
    }
}
