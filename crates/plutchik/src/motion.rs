use crate::geometry::Point;
use crate::layout::LayoutError;
use serde::{Deserialize, Serialize};

const STEP: f64 = 1.0 / 240.0;
// long frames (window hidden, debugger) are clamped instead of replayed
const MAX_FRAME: f64 = 0.25;
const REST_EPSILON: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct MotionConfig {
    pub stiffness: f64,
    pub damping: f64,
    /// Duration of a full detail panel cross-fade.
    pub fade_seconds: f64,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            stiffness: 300.0,
            damping: 20.0,
            fade_seconds: 0.3,
        }
    }
}

impl MotionConfig {
    /// Springs need positive, finite constants to come to rest.
    pub fn validate(&self) -> Result<(), LayoutError> {
        let positive = [("stiffness", self.stiffness), ("damping", self.damping)];
        if let Some(&(field, value)) = positive
            .iter()
            .find(|(_, v)| !(v.is_finite() && *v > 0.0))
        {
            return Err(LayoutError::InvalidMotion { field, value });
        }
        if !(self.fade_seconds.is_finite() && self.fade_seconds >= 0.0) {
            return Err(LayoutError::InvalidMotion {
                field: "fade_seconds",
                value: self.fade_seconds,
            });
        }
        Ok(())
    }
}

/// Unit-mass 2-D spring. Retargeting keeps position and velocity, so a hover
/// change mid-flight bends the motion instead of restarting it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    position: Point,
    velocity: Point,
    target: Point,
}

impl Spring {
    pub fn at_rest(position: Point) -> Self {
        Self {
            position,
            velocity: Point::ZERO,
            target: position,
        }
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn target(&self) -> Point {
        self.target
    }

    pub fn retarget(&mut self, target: Point) {
        self.target = target;
    }

    pub fn is_settled(&self) -> bool {
        self.position.distance(self.target) < REST_EPSILON && self.velocity.length() < REST_EPSILON
    }

    pub fn snap(&mut self) {
        *self = Self::at_rest(self.target);
    }

    /// Advances by `dt` seconds. Returns whether the spring is still moving.
    pub fn step(&mut self, dt: f64, params: &MotionConfig) -> bool {
        let mut remaining = dt.clamp(0.0, MAX_FRAME);
        while remaining > 0.0 && !self.is_settled() {
            let h = remaining.min(STEP);
            let accel =
                (self.target - self.position) * params.stiffness - self.velocity * params.damping;
            self.velocity = self.velocity + accel * h;
            self.position = self.position + self.velocity * h;
            remaining -= h;
        }

        if self.is_settled() {
            self.snap();
            false
        } else {
            true
        }
    }
}

/// Cubic ease-out on `[0, 1]`.
pub fn ease_out(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}
