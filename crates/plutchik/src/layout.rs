use crate::catalog::{Catalog, EmotionId};
use crate::geometry::{Point, Sector};
use crate::highlight::HoverRole;
use crate::label::{LabelPose, compute_label_pose};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display as StrumDisplay, EnumIter};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum Ring {
    /// Primary emotions, `[core_radius, ring1_radius]`.
    Inner,
    /// Sub-emotions, `[ring1_radius, ring2_radius]`.
    Outer,
}

/// Outward offsets for a ring: `own` for the hovered wedge itself, `family`
/// for the rest of its family.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Displacement {
    pub own: f64,
    pub family: f64,
}

impl Displacement {
    pub fn for_role(&self, role: HoverRole) -> f64 {
        match role {
            HoverRole::Own => self.own,
            HoverRole::Family => self.family,
            HoverRole::Inactive => 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WheelConfig {
    /// Side of the square logical viewport.
    pub viewport: f64,
    pub core_radius: f64,
    pub ring1_radius: f64,
    pub ring2_radius: f64,
    pub primary: Displacement,
    pub sub: Displacement,
    pub primary_font_size: f64,
    pub sub_font_size: f64,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            viewport: 1000.0,
            core_radius: 60.0,
            ring1_radius: 200.0,
            ring2_radius: 450.0,
            primary: Displacement {
                own: 20.0,
                family: 10.0,
            },
            sub: Displacement {
                own: 30.0,
                family: 15.0,
            },
            primary_font_size: 24.0,
            sub_font_size: 16.0,
        }
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum LayoutError {
    #[error("Viewport size must be positive, got {0}")]
    InvalidViewport(f64),
    #[error("The {ring} ring needs 0 <= inner < outer, got {inner}..{outer}")]
    InvalidRing { ring: Ring, inner: f64, outer: f64 },
    #[error("Displacements must be non-negative ({ring} ring)")]
    NegativeDisplacement { ring: Ring },
    #[error("Sub-emotion hover offset {sub} is smaller than the primary one {primary}")]
    SubDisplacementTooSmall { sub: f64, primary: f64 },
    #[error("Motion setting '{field}' is out of range, got {value}")]
    InvalidMotion { field: &'static str, value: f64 },
}

impl WheelConfig {
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.viewport > 0.0 && self.viewport.is_finite()) {
            return Err(LayoutError::InvalidViewport(self.viewport));
        }

        for ring in [Ring::Inner, Ring::Outer] {
            let (inner, outer) = self.ring_radii(ring);
            if !(inner >= 0.0 && inner < outer && outer.is_finite()) {
                return Err(LayoutError::InvalidRing { ring, inner, outer });
            }

            let d = self.displacement(ring);
            if !(d.own >= 0.0 && d.family >= 0.0) {
                return Err(LayoutError::NegativeDisplacement { ring });
            }
        }

        if self.sub.own < self.primary.own {
            return Err(LayoutError::SubDisplacementTooSmall {
                sub: self.sub.own,
                primary: self.primary.own,
            });
        }
        Ok(())
    }

    pub fn center(&self) -> Point {
        Point::new(self.viewport / 2.0, self.viewport / 2.0)
    }

    pub fn ring_radii(&self, ring: Ring) -> (f64, f64) {
        match ring {
            Ring::Inner => (self.core_radius, self.ring1_radius),
            Ring::Outer => (self.ring1_radius, self.ring2_radius),
        }
    }

    pub fn displacement(&self, ring: Ring) -> Displacement {
        match ring {
            Ring::Inner => self.primary,
            Ring::Outer => self.sub,
        }
    }

    pub fn font_size(&self, ring: Ring) -> f64 {
        match ring {
            Ring::Inner => self.primary_font_size,
            Ring::Outer => self.sub_font_size,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Wedge {
    pub id: EmotionId,
    /// Id of the owning primary; a primary's family is itself.
    pub family: EmotionId,
    pub ring: Ring,
    pub sector: Sector,
}

impl Wedge {
    pub fn mid_angle(&self) -> f64 {
        self.sector.mid_angle()
    }

    pub fn label_pose(&self) -> LabelPose {
        compute_label_pose(
            self.sector.center,
            self.sector.mid_radius(),
            self.sector.start_angle,
            self.sector.end_angle,
        )
    }
}

/// Angular partition of a catalog into inner and outer ring wedges.
///
/// Wedges are stored in angular order, each primary followed by its
/// sub-emotions.
#[derive(Debug, Clone)]
pub struct Layout {
    wedges: Vec<Wedge>,
    index: HashMap<EmotionId, usize>,
    primary_step: f64,
}

impl Layout {
    pub fn compute(catalog: &Catalog, config: &WheelConfig) -> Result<Self, LayoutError> {
        config.validate()?;

        let center = config.center();
        let n = catalog.len().max(1);
        let primary_step = 360.0 / n as f64;
        // i / n fractions keep boundaries shared and the last end exactly at 360
        let boundary = |i: usize| 360.0 * i as f64 / n as f64;

        let sector = |ring: Ring, start: f64, end: f64| {
            let (inner_radius, outer_radius) = config.ring_radii(ring);
            Sector {
                center,
                inner_radius,
                outer_radius,
                start_angle: start,
                end_angle: end,
            }
        };

        let mut wedges = Vec::with_capacity(catalog.node_count());
        for (i, primary) in catalog.primaries().iter().enumerate() {
            let (start, end) = (boundary(i), boundary(i + 1));
            wedges.push(Wedge {
                id: primary.id.clone(),
                family: primary.id.clone(),
                ring: Ring::Inner,
                sector: sector(Ring::Inner, start, end),
            });

            let m = primary.children.len().max(1);
            let sub_boundary = |j: usize| {
                if j == m {
                    end
                } else {
                    start + (end - start) * j as f64 / m as f64
                }
            };

            wedges.extend(primary.children.iter().enumerate().map(|(j, sub)| Wedge {
                id: sub.id.clone(),
                family: primary.id.clone(),
                ring: Ring::Outer,
                sector: sector(Ring::Outer, sub_boundary(j), sub_boundary(j + 1)),
            }));
        }

        let index = wedges
            .iter()
            .enumerate()
            .map(|(i, w)| (w.id.clone(), i))
            .collect();

        Ok(Self {
            wedges,
            index,
            primary_step,
        })
    }

    pub fn wedges(&self) -> &[Wedge] {
        &self.wedges
    }

    pub fn primary_step(&self) -> f64 {
        self.primary_step
    }

    pub fn position(&self, id: &EmotionId) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn wedge(&self, id: &EmotionId) -> Option<&Wedge> {
        self.position(id).map(|i| &self.wedges[i])
    }

    /// Wedge under `point`, with each wedge shifted by its current offset.
    /// The `preferred` wedge wins where displaced wedges overlap.
    pub fn hit_test(
        &self,
        point: Point,
        offsets: &[Point],
        preferred: Option<&EmotionId>,
    ) -> Option<&Wedge> {
        let hit = |i: usize| {
            let offset = offsets.get(i).copied().unwrap_or_default();
            self.wedges[i].sector.contains(point - offset)
        };

        preferred
            .and_then(|id| self.position(id))
            .filter(|&i| hit(i))
            .or_else(|| (0..self.wedges.len()).find(|&i| hit(i)))
            .map(|i| &self.wedges[i])
    }
}
