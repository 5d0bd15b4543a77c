use crate::catalog::{Catalog, EmotionId};
use crate::detail::{DetailContent, DetailPanel};
use crate::geometry::Point;
use crate::highlight::Highlight;
use crate::layout::{Layout, LayoutError, WheelConfig};
use crate::motion::{MotionConfig, Spring};
use crate::scene::{Scene, SceneWedge};
use std::collections::HashMap;
use std::iter::zip;

/// The interactive wheel: layout, hover state, per-wedge springs and the
/// detail panel, driven by pointer events and frame ticks from the host.
#[derive(Debug, Clone)]
pub struct Wheel {
    catalog: Catalog,
    config: WheelConfig,
    motion: MotionConfig,
    layout: Layout,
    highlight: Highlight,
    springs: Vec<Spring>,
    detail: DetailPanel,
}

impl Wheel {
    pub fn new(
        catalog: Catalog,
        config: WheelConfig,
        motion: MotionConfig,
    ) -> Result<Self, LayoutError> {
        motion.validate()?;
        let layout = Layout::compute(&catalog, &config)?;
        let springs = vec![Spring::at_rest(Point::ZERO); layout.wedges().len()];

        Ok(Self {
            catalog,
            config,
            motion,
            layout,
            highlight: Highlight::new(),
            springs,
            detail: DetailPanel::new(motion.fade_seconds),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn highlight(&self) -> &Highlight {
        &self.highlight
    }

    pub fn detail(&self) -> &DetailPanel {
        &self.detail
    }

    pub fn on_enter(&mut self, id: &EmotionId) -> bool {
        let changed = self.highlight.enter(id, &self.catalog);
        if changed {
            self.retarget();
        }
        changed
    }

    /// Leave always returns to idle; the id is only logged.
    pub fn on_leave(&mut self, id: &EmotionId) -> bool {
        log::trace!("Pointer left '{}'", id);
        self.clear_hover()
    }

    /// Translates raw pointer motion (logical coordinates) into enter/leave
    /// events. Returns whether the hover changed.
    pub fn pointer_moved(&mut self, point: Point) -> bool {
        let offsets = self.offsets();
        let current = self.highlight.hovered_id().cloned();
        let hit = self
            .layout
            .hit_test(point, &offsets, current.as_ref())
            .map(|w| w.id.clone());

        if hit == current {
            return false;
        }
        if let Some(previous) = &current {
            self.on_leave(previous);
        }
        match hit {
            Some(id) => self.on_enter(&id),
            None => true,
        }
    }

    pub fn pointer_left(&mut self) -> bool {
        self.clear_hover()
    }

    /// Back to idle, as on mount and unmount.
    pub fn reset(&mut self) -> bool {
        self.clear_hover()
    }

    fn clear_hover(&mut self) -> bool {
        let changed = self.highlight.leave();
        if changed {
            self.retarget();
        }
        changed
    }

    fn retarget(&mut self) {
        for (wedge, spring) in zip(self.layout.wedges(), &mut self.springs) {
            spring.retarget(self.highlight.displacement(wedge, &self.config));
        }
        self.detail.show(DetailContent::for_hover(
            &self.catalog,
            self.highlight.hovered_id(),
        ));
    }

    /// Advances animations by `dt` seconds. Returns whether anything is
    /// still moving, i.e. whether the host should keep requesting frames.
    pub fn tick(&mut self, dt: f64) -> bool {
        let mut moving = false;
        for spring in &mut self.springs {
            moving |= spring.step(dt, &self.motion);
        }
        moving | self.detail.tick(dt)
    }

    pub fn is_animating(&self) -> bool {
        self.detail.is_animating() || self.springs.iter().any(|s| !s.is_settled())
    }

    /// Jumps every animation to its end state.
    pub fn settle(&mut self) {
        self.springs.iter_mut().for_each(Spring::snap);
        self.detail.finish();
    }

    pub fn offsets(&self) -> Vec<Point> {
        self.springs.iter().map(Spring::position).collect()
    }

    pub fn offset(&self, id: &EmotionId) -> Option<Point> {
        self.layout.position(id).map(|i| self.springs[i].position())
    }

    pub fn target_offset(&self, id: &EmotionId) -> Option<Point> {
        self.layout.position(id).map(|i| self.springs[i].target())
    }

    /// Swaps in new data and settings. Validation happens before anything
    /// changes, so on error the wheel keeps running on the old data. A hover
    /// on a node that no longer exists falls back to idle.
    pub fn reload(
        &mut self,
        catalog: Catalog,
        config: WheelConfig,
        motion: MotionConfig,
    ) -> Result<(), LayoutError> {
        motion.validate()?;
        let layout = Layout::compute(&catalog, &config)?;

        let previous: HashMap<&EmotionId, Spring> = zip(self.layout.wedges(), &self.springs)
            .map(|(wedge, spring)| (&wedge.id, *spring))
            .collect();
        let springs = layout
            .wedges()
            .iter()
            .map(|w| {
                previous
                    .get(&w.id)
                    .copied()
                    .unwrap_or(Spring::at_rest(Point::ZERO))
            })
            .collect();

        self.springs = springs;
        self.layout = layout;
        self.catalog = catalog;
        self.config = config;
        self.motion = motion;
        self.detail.set_duration(motion.fade_seconds);
        self.highlight.revalidate(&self.catalog);
        self.retarget();

        log::debug!(
            "Wheel reloaded with {} wedges",
            self.layout.wedges().len()
        );
        Ok(())
    }

    pub fn scene(&self) -> Scene {
        let mut wedges: Vec<SceneWedge> = zip(self.layout.wedges(), &self.springs)
            .filter_map(|(wedge, spring)| {
                let node = self.catalog.get(&wedge.id)?;
                Some(SceneWedge {
                    id: wedge.id.clone(),
                    name: node.name.clone(),
                    ring: wedge.ring,
                    role: self.highlight.role_of(wedge),
                    sector: wedge.sector,
                    path: wedge.sector.path(),
                    fill: node.color,
                    offset: spring.position(),
                    label: wedge.label_pose(),
                    font_size: self.config.font_size(wedge.ring),
                })
            })
            .collect();
        // stable, so angular order holds within each role
        wedges.sort_by_key(|w| w.role);

        Scene {
            viewport: self.config.viewport,
            center: self.config.center(),
            core_radius: self.config.core_radius,
            wedges,
        }
    }
}
