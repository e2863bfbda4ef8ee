//! Planar geometry helpers shared by the sweep and nearest-neighbour passes.

use geo::Coord;

/// Polar angle of `point` around `origin`, in radians as given by `atan2`.
///
/// The range is `(-pi, pi]`: the sweep starts just below the negative x axis
/// and proceeds counter-clockwise.
#[expect(
    clippy::float_arithmetic,
    reason = "polar ordering around the depot is inherently floating point"
)]
pub(crate) fn polar_angle(origin: Coord<f64>, point: Coord<f64>) -> f64 {
    (point.y - origin.y).atan2(point.x - origin.x)
}

/// Squared Euclidean distance between two coordinates.
///
/// The square root is skipped because callers only compare distances.
#[expect(
    clippy::float_arithmetic,
    reason = "distance ordering is inherently floating point"
)]
pub(crate) const fn distance_sq(a: Coord<f64>, b: Coord<f64>) -> f64 {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Coord { x: 1.0, y: 0.0 }, 0.0)]
    #[case(Coord { x: 0.0, y: 1.0 }, std::f64::consts::FRAC_PI_2)]
    #[case(Coord { x: -1.0, y: 0.0 }, std::f64::consts::PI)]
    #[expect(
        clippy::float_arithmetic,
        reason = "assertions compare angles within a tolerance"
    )]
    fn angle_measured_from_positive_x_axis(#[case] point: Coord<f64>, #[case] expected: f64) {
        let angle = polar_angle(Coord { x: 0.0, y: 0.0 }, point);
        assert!((angle - expected).abs() < 1e-12);
    }

    #[rstest]
    #[expect(
        clippy::float_arithmetic,
        reason = "assertions compare distances within a tolerance"
    )]
    fn distance_is_translation_invariant() {
        let origin = Coord { x: 2.0, y: 3.0 };
        let point = Coord { x: 5.0, y: 7.0 };
        assert!((distance_sq(origin, point) - 25.0).abs() < 1e-12);
    }
}
