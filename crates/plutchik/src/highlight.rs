use crate::catalog::{Catalog, EmotionId};
use crate::geometry::{Point, radial_offset};
use crate::layout::{Wedge, WheelConfig};
use strum::Display as StrumDisplay;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering(EmotionId),
}

/// How a wedge relates to the current hover. Ordered by drawing priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, StrumDisplay)]
#[strum(serialize_all = "lowercase")]
pub enum HoverRole {
    Inactive,
    Family,
    Own,
}

/// Hover state plus the family derived from it.
///
/// Enter always wins and leave always clears, whatever node the leave came
/// from. Wedges never overlap, so a leave can only belong to the current
/// hover.
#[derive(Debug, Clone, Default)]
pub struct Highlight {
    state: HoverState,
    active_family: Option<EmotionId>,
}

impl Highlight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &HoverState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == HoverState::Idle
    }

    pub fn hovered_id(&self) -> Option<&EmotionId> {
        match &self.state {
            HoverState::Hovering(id) => Some(id),
            HoverState::Idle => None,
        }
    }

    pub fn active_family_id(&self) -> Option<&EmotionId> {
        self.active_family.as_ref()
    }

    /// Returns whether the state changed. An id missing from `catalog` drops
    /// back to idle instead of failing.
    pub fn enter(&mut self, id: &EmotionId, catalog: &Catalog) -> bool {
        let Some(family) = catalog.family_of(id) else {
            log::warn!("Hover on unknown emotion '{}', treating as idle", id);
            return self.clear();
        };

        if self.hovered_id() == Some(id) {
            return false;
        }

        log::debug!("Hovering '{}' (family '{}')", id, family);
        self.active_family = Some(family.clone());
        self.state = HoverState::Hovering(id.clone());
        true
    }

    pub fn leave(&mut self) -> bool {
        self.clear()
    }

    fn clear(&mut self) -> bool {
        let changed = !self.is_idle();
        self.state = HoverState::Idle;
        self.active_family = None;
        changed
    }

    /// Re-derives the family against a reloaded catalog, dropping a hover
    /// whose node no longer exists.
    pub fn revalidate(&mut self, catalog: &Catalog) -> bool {
        let Some(id) = self.hovered_id().cloned() else {
            return false;
        };

        match catalog.family_of(&id) {
            Some(family) => {
                let changed = self.active_family.as_ref() != Some(family);
                self.active_family = Some(family.clone());
                changed
            }
            None => {
                log::warn!("Hovered emotion '{}' vanished on reload", id);
                self.clear()
            }
        }
    }

    pub fn role_of(&self, wedge: &Wedge) -> HoverRole {
        if self.hovered_id() == Some(&wedge.id) {
            HoverRole::Own
        } else if self.active_family.as_ref() == Some(&wedge.family) {
            HoverRole::Family
        } else {
            HoverRole::Inactive
        }
    }

    /// Target offset of `wedge`, pushed straight out along its own bisector.
    pub fn displacement(&self, wedge: &Wedge, config: &WheelConfig) -> Point {
        let magnitude = config
            .displacement(wedge.ring)
            .for_role(self.role_of(wedge));
        if magnitude == 0.0 {
            Point::ZERO
        } else {
            radial_offset(wedge.mid_angle(), magnitude)
        }
    }
}
