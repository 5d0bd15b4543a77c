//! Polar geometry for the wheel.
//!
//! Angles are in degrees, measured clockwise from 12 o'clock, on a y-down
//! surface: angle 0 points up and angle 90 points right.

use std::fmt;
use std::ops::{Add, Mul, Sub};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn length(self) -> f64 {
        self.x.hypot(self.y)
    }

    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self::new(self.x * rhs, self.y * rhs)
    }
}

/// Folds any angle into `[0, 360)`.
pub fn normalize_angle(degrees: f64) -> f64 {
    let angle = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negative inputs up to exactly 360
    if angle >= 360.0 { 0.0 } else { angle }
}

/// Clockwise span from `start` to `end`. Spans of a full turn or more are
/// capped at 360, negative spans wrap.
pub fn angular_span(start: f64, end: f64) -> f64 {
    let span = end - start;
    if span >= 360.0 {
        360.0
    } else {
        span.rem_euclid(360.0)
    }
}

pub fn polar_to_cartesian(center: Point, radius: f64, degrees: f64) -> Point {
    let radians = (normalize_angle(degrees) - 90.0).to_radians();
    Point::new(
        center.x + radius * radians.cos(),
        center.y + radius * radians.sin(),
    )
}

/// Inverse of [`polar_to_cartesian`]: the clockwise-from-12 angle of `point`.
pub fn angle_of(center: Point, point: Point) -> f64 {
    let (dx, dy) = (point.x - center.x, point.y - center.y);
    normalize_angle(dy.atan2(dx).to_degrees() + 90.0)
}

/// Outward offset of `magnitude` along the bisector at `degrees`.
pub fn radial_offset(degrees: f64, magnitude: f64) -> Point {
    polar_to_cartesian(Point::ZERO, magnitude, degrees)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    LineTo(Point),
    Arc {
        radius: f64,
        large_arc: bool,
        sweep: bool,
        to: Point,
    },
    Close,
}

/// SVG-style path; `Display` renders the `d` attribute.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ArcPath(Vec<PathCommand>);

impl ArcPath {
    pub fn commands(&self) -> &[PathCommand] {
        &self.0
    }
}

impl fmt::Display for ArcPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match *command {
                PathCommand::MoveTo(p) => write!(f, "M {} {}", num(p.x), num(p.y))?,
                PathCommand::LineTo(p) => write!(f, "L {} {}", num(p.x), num(p.y))?,
                PathCommand::Arc {
                    radius,
                    large_arc,
                    sweep,
                    to,
                } => write!(
                    f,
                    "A {r} {r} 0 {} {} {} {}",
                    u8::from(large_arc),
                    u8::from(sweep),
                    num(to.x),
                    num(to.y),
                    r = num(radius),
                )?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

/// Three decimals, trailing zeros dropped.
pub(crate) fn num(value: f64) -> String {
    let s = format!("{:.3}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    match s {
        "-0" | "" => "0".to_string(),
        s => s.to_string(),
    }
}

/// Annular sector between two radii and two angles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sector {
    pub center: Point,
    pub inner_radius: f64,
    pub outer_radius: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl Sector {
    pub fn span(&self) -> f64 {
        angular_span(self.start_angle, self.end_angle)
    }

    pub fn mid_angle(&self) -> f64 {
        normalize_angle(self.start_angle + self.span() / 2.0)
    }

    pub fn mid_radius(&self) -> f64 {
        (self.inner_radius + self.outer_radius) / 2.0
    }

    /// Hit test with the half-open conventions `[inner, outer)` and `[start, end)`.
    pub fn contains(&self, point: Point) -> bool {
        let r = self.center.distance(point);
        if r < self.inner_radius || r >= self.outer_radius {
            return false;
        }
        let offset = (angle_of(self.center, point) - self.start_angle).rem_euclid(360.0);
        offset < self.span()
    }

    pub fn path(&self) -> ArcPath {
        describe_arc(
            self.center,
            self.inner_radius,
            self.outer_radius,
            self.start_angle,
            self.end_angle,
        )
    }
}

/// Closed path for the sector: the outer arc runs from `end` back to
/// `start`, then a connector, then the inner arc from `start` to `end`.
///
/// An inner radius of zero yields a pie slice closed through the center. A
/// full turn is drawn as two half arcs, since an SVG arc whose endpoints
/// coincide draws nothing.
pub fn describe_arc(
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> ArcPath {
    let span = angular_span(start_angle, end_angle);
    let start = normalize_angle(start_angle);
    let end = start + span;

    let waypoints: Vec<f64> = if span >= 360.0 {
        vec![end, start + span / 2.0, start]
    } else {
        vec![end, start]
    };

    let at = |radius, angle| polar_to_cartesian(center, radius, angle);
    let mut commands = vec![PathCommand::MoveTo(at(outer_radius, end))];

    commands.extend(waypoints.windows(2).map(|w| PathCommand::Arc {
        radius: outer_radius,
        large_arc: w[0] - w[1] > 180.0,
        sweep: false,
        to: at(outer_radius, w[1]),
    }));

    if inner_radius > 0.0 {
        commands.push(PathCommand::LineTo(at(inner_radius, start)));
        commands.extend(waypoints.windows(2).rev().map(|w| PathCommand::Arc {
            radius: inner_radius,
            large_arc: w[0] - w[1] > 180.0,
            sweep: true,
            to: at(inner_radius, w[0]),
        }));
    } else {
        commands.push(PathCommand::LineTo(center));
    }

    commands.push(PathCommand::Close);
    ArcPath(commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: Point, b: Point) {
        assert!(a.distance(b) < 1e-9, "{a:?} != {b:?}");
    }

    #[test]
    fn test_zero_angle_points_up() {
        let c = Point::new(500.0, 500.0);
        assert_close(polar_to_cartesian(c, 100.0, 0.0), Point::new(500.0, 400.0));
        assert_close(polar_to_cartesian(c, 100.0, 90.0), Point::new(600.0, 500.0));
        assert_close(polar_to_cartesian(c, 100.0, 180.0), Point::new(500.0, 600.0));
        assert_close(polar_to_cartesian(c, 100.0, 270.0), Point::new(400.0, 500.0));
    }

    #[test]
    fn test_angles_are_normalized() {
        assert_eq!(normalize_angle(-90.0), 270.0);
        assert_eq!(normalize_angle(720.0), 0.0);
        assert_eq!(normalize_angle(-1e-15), 0.0);
        let c = Point::new(0.0, 0.0);
        assert_close(
            polar_to_cartesian(c, 10.0, 450.0),
            polar_to_cartesian(c, 10.0, 90.0),
        );
        assert_eq!(angular_span(350.0, 10.0), 20.0);
        assert_eq!(angular_span(0.0, 360.0), 360.0);
    }

    #[test]
    fn test_angle_of_inverts_polar() {
        let c = Point::new(500.0, 500.0);
        for angle in [0.0, 15.0, 90.0, 135.0, 200.0, 359.0] {
            let p = polar_to_cartesian(c, 120.0, angle);
            let diff = ((angle_of(c, p) - angle + 180.0).rem_euclid(360.0) - 180.0).abs();
            assert!(diff < 1e-9, "{angle}");
        }
    }

    #[test]
    fn test_annular_sector_path() {
        let path = describe_arc(Point::new(100.0, 100.0), 50.0, 100.0, 0.0, 90.0);
        assert_eq!(
            path.to_string(),
            "M 200 100 A 100 100 0 0 0 100 0 L 100 50 A 50 50 0 0 1 150 100 Z"
        );
    }

    #[test]
    fn test_large_arc_flag() {
        let path = describe_arc(Point::ZERO, 10.0, 20.0, 0.0, 270.0);
        let flags: Vec<bool> = path
            .commands()
            .iter()
            .filter_map(|c| match c {
                PathCommand::Arc { large_arc, .. } => Some(*large_arc),
                _ => None,
            })
            .collect();
        assert_eq!(flags, vec![true, true]);

        let small = describe_arc(Point::ZERO, 10.0, 20.0, 0.0, 180.0);
        assert!(small.commands().iter().all(|c| !matches!(
            c,
            PathCommand::Arc {
                large_arc: true,
                ..
            }
        )));
    }

    #[test]
    fn test_pie_slice_without_inner_arc() {
        let path = describe_arc(Point::new(100.0, 100.0), 0.0, 100.0, 0.0, 90.0);
        assert_eq!(path.to_string(), "M 200 100 A 100 100 0 0 0 100 0 L 100 100 Z");
    }

    #[test]
    fn test_full_turn_is_split() {
        let path = describe_arc(Point::new(0.0, 0.0), 10.0, 20.0, 0.0, 360.0);
        let arcs = path
            .commands()
            .iter()
            .filter(|c| matches!(c, PathCommand::Arc { .. }))
            .count();
        assert_eq!(arcs, 4);
        assert!(path.commands().iter().all(|c| !matches!(
            c,
            PathCommand::Arc {
                large_arc: true,
                ..
            }
        )));
    }

    #[test]
    fn test_sector_contains() {
        let sector = Sector {
            center: Point::new(500.0, 500.0),
            inner_radius: 60.0,
            outer_radius: 200.0,
            start_angle: 0.0,
            end_angle: 45.0,
        };
        assert!(sector.contains(polar_to_cartesian(sector.center, 100.0, 20.0)));
        assert!(sector.contains(polar_to_cartesian(sector.center, 100.0, 1.0)));
        assert!(!sector.contains(polar_to_cartesian(sector.center, 100.0, 50.0)));
        assert!(!sector.contains(polar_to_cartesian(sector.center, 30.0, 20.0)));
        assert!(!sector.contains(polar_to_cartesian(sector.center, 250.0, 20.0)));
        assert_eq!(sector.mid_angle(), 22.5);
    }

    #[test]
    fn test_number_formatting() {
        assert_eq!(num(100.0000000001), "100");
        assert_eq!(num(-0.0001), "0");
        assert_eq!(num(12.5), "12.5");
        assert_eq!(num(1.23456), "1.235");
    }
}
