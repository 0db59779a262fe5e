//! Planar geometry on normalized image coordinates.

use crate::types::Point2;

/// Unsigned angle at vertex `b` between rays `b→a` and `b→c`, in degrees.
///
/// Computed from the difference of the two rays' `atan2` headings and folded
/// into [0, 180]. Coincident points fall back to a heading of zero, so the
/// result is always finite.
pub fn angle(a: Point2, b: Point2, c: Point2) -> f64 {
    let ba = b.vector_to(&a);
    let bc = b.vector_to(&c);

    let radians = bc.y.atan2(bc.x) - ba.y.atan2(ba.x);
    let degrees = radians.to_degrees().abs();

    if degrees > 180.0 {
        360.0 - degrees
    } else {
        degrees
    }
}

/// Euclidean distance between two points
pub fn distance(a: Point2, b: Point2) -> f64 {
    nalgebra::distance(&a.to_nalgebra(), &b.to_nalgebra())
}

pub fn midpoint(a: Point2, b: Point2) -> Point2 {
    Point2::from_nalgebra(nalgebra::center(&a.to_nalgebra(), &b.to_nalgebra()))
}

/// Translate a point by `(dx, dy)`
pub fn offset(p: Point2, dx: f64, dy: f64) -> Point2 {
    Point2::new(p.x + dx, p.y + dy)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_straight_line_is_180() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(0.0, 1.0);
        let c = Point2::new(0.0, 2.0);
        assert!((angle(a, b, c) - 180.0).abs() < EPS);

        let a = Point2::new(0.1, 0.5);
        let b = Point2::new(0.4, 0.5);
        let c = Point2::new(0.9, 0.5);
        assert!((angle(a, b, c) - 180.0).abs() < EPS);
    }

    #[test]
    fn test_folded_ray_is_zero() {
        let a = Point2::new(0.3, 0.7);
        let b = Point2::new(0.1, 0.2);
        assert!(angle(a, b, a).abs() < EPS);
    }

    #[test]
    fn test_right_angle() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(0.5, 0.0);
        let c = Point2::new(0.5, 0.5);
        assert!((angle(a, b, c) - 90.0).abs() < EPS);
    }

    #[test]
    fn test_reflex_angle_is_folded() {
        // headings of 170° and -170° differ by 340°, which folds to 20°
        let b = Point2::origin();
        let a = Point2::new(170f64.to_radians().cos(), 170f64.to_radians().sin());
        let c = Point2::new((-170f64).to_radians().cos(), (-170f64).to_radians().sin());
        assert!((angle(a, b, c) - 20.0).abs() < 1e-6);
    }

    #[test]
    fn test_angle_is_symmetric() {
        let points = [
            Point2::new(0.12, 0.87),
            Point2::new(0.55, 0.31),
            Point2::new(0.93, 0.44),
            Point2::new(0.20, 0.05),
            Point2::new(0.61, 0.72),
        ];

        for a in points {
            for b in points {
                for c in points {
                    assert!((angle(a, b, c) - angle(c, b, a)).abs() < EPS);
                }
            }
        }
    }

    #[test]
    fn test_angle_stays_in_range() {
        let b = Point2::new(0.5, 0.5);
        for i in 0..36 {
            for j in 0..36 {
                let ta = (i as f64 * 10.0).to_radians();
                let tc = (j as f64 * 10.0).to_radians();
                let a = Point2::new(b.x + ta.cos(), b.y + ta.sin());
                let c = Point2::new(b.x + tc.cos(), b.y + tc.sin());
                let deg = angle(a, b, c);
                assert!((0.0..=180.0 + EPS).contains(&deg), "angle {} out of range", deg);
            }
        }
    }

    #[test]
    fn test_degenerate_points_do_not_panic() {
        let p = Point2::new(0.4, 0.4);
        let deg = angle(p, p, p);
        assert!(deg.is_finite());
        assert_eq!(deg, 0.0);
    }

    #[test]
    fn test_distance_and_midpoint() {
        let a = Point2::new(0.0, 0.0);
        let b = Point2::new(3.0, 4.0);
        assert!((distance(a, b) - 5.0).abs() < EPS);
        assert_eq!(midpoint(a, b), Point2::new(1.5, 2.0));
        assert_eq!(offset(b, 0.0, -0.5), Point2::new(3.0, 3.5));
    }
}
