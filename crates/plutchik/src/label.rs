use crate::geometry::{Point, angular_span, normalize_angle, polar_to_cartesian};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPose {
    pub position: Point,
    /// Degrees, clockwise. Applied around `position`.
    pub rotation: f64,
    pub mid_angle: f64,
}

/// Anchors a label at the angular midpoint of `[start, end]`, rotated along
/// the wedge and flipped on the lower half of the wheel so it never reads
/// upside down.
pub fn compute_label_pose(center: Point, radius: f64, start: f64, end: f64) -> LabelPose {
    let mid_angle = normalize_angle(start + angular_span(start, end) / 2.0);
    LabelPose {
        position: polar_to_cartesian(center, radius, mid_angle),
        rotation: upright_rotation(mid_angle),
        mid_angle,
    }
}

pub fn upright_rotation(mid_angle: f64) -> f64 {
    if mid_angle > 90.0 && mid_angle < 270.0 {
        mid_angle + 180.0
    } else {
        mid_angle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upper_half_is_not_flipped() {
        let pose = compute_label_pose(Point::new(500.0, 500.0), 130.0, 0.0, 45.0);
        assert_eq!(pose.mid_angle, 22.5);
        assert_eq!(pose.rotation, 22.5);

        let pose = compute_label_pose(Point::new(500.0, 500.0), 130.0, 315.0, 360.0);
        assert_eq!(pose.mid_angle, 337.5);
        assert_eq!(pose.rotation, 337.5);
    }

    #[test]
    fn test_lower_half_is_flipped() {
        for mid in [90.5, 112.5, 180.0, 247.5, 269.5] {
            assert_eq!(upright_rotation(mid) - mid, 180.0, "{mid}");
        }
        let pose = compute_label_pose(Point::new(500.0, 500.0), 130.0, 135.0, 180.0);
        assert_eq!(pose.rotation, 157.5 + 180.0);
    }

    #[test]
    fn test_boundaries_are_not_flipped() {
        assert_eq!(upright_rotation(90.0), 90.0);
        assert_eq!(upright_rotation(270.0), 270.0);
    }

    #[test]
    fn test_pose_position_on_bisector() {
        let center = Point::new(500.0, 500.0);
        let pose = compute_label_pose(center, 100.0, 60.0, 120.0);
        assert!(pose.position.distance(Point::new(600.0, 500.0)) < 1e-9);
    }

    #[test]
    fn test_wrapping_span() {
        let pose = compute_label_pose(Point::ZERO, 10.0, 350.0, 10.0);
        assert_eq!(pose.mid_angle, 0.0);
        assert_eq!(pose.rotation, 0.0);
    }
}
