use crate::catalog::{Catalog, Color, EmotionId};
use crate::motion::ease_out;

pub const PLACEHOLDER: &str = "Hover over a segment";

/// Vertical travel of a panel layer while it fades, in logical units.
const SLIDE: f64 = 10.0;

#[derive(Debug, Clone, PartialEq)]
pub enum DetailContent {
    Placeholder,
    Emotion {
        id: EmotionId,
        name: String,
        color: Color,
        description: String,
        opposites: Vec<String>,
    },
}

impl DetailContent {
    pub fn for_hover(catalog: &Catalog, hovered: Option<&EmotionId>) -> Self {
        let Some(node) = hovered.and_then(|id| catalog.get(id)) else {
            return Self::Placeholder;
        };

        Self::Emotion {
            id: node.id.clone(),
            name: node.name.clone(),
            color: node.color,
            description: node.description.clone(),
            opposites: catalog
                .opposites_of(&node.id)
                .into_iter()
                .map(|o| o.name.clone())
                .collect(),
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Self::Placeholder => PLACEHOLDER,
            Self::Emotion { name, .. } => name,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetailLayer<'a> {
    pub content: &'a DetailContent,
    pub opacity: f64,
    /// Positive moves the layer down.
    pub y_offset: f64,
}

/// Detail card with a "wait" style cross-fade: the outgoing content fades
/// out sliding up, then the incoming content fades in rising from below.
#[derive(Debug, Clone)]
pub struct DetailPanel {
    current: DetailContent,
    outgoing: Option<DetailContent>,
    progress: f64,
    duration: f64,
}

impl DetailPanel {
    pub fn new(duration: f64) -> Self {
        Self {
            current: DetailContent::Placeholder,
            outgoing: None,
            progress: 1.0,
            duration,
        }
    }

    pub fn current(&self) -> &DetailContent {
        &self.current
    }

    pub fn is_animating(&self) -> bool {
        self.outgoing.is_some()
    }

    pub fn set_duration(&mut self, duration: f64) {
        self.duration = duration;
    }

    pub fn show(&mut self, content: DetailContent) {
        if content == self.current {
            return;
        }

        if self.outgoing.is_some() && self.progress < 0.5 {
            // still fading the old card out; swap what comes in after it
            self.current = content;
            return;
        }

        // a half-shown card fades out from the opacity it reached; this
        // inverts the exit curve `1 - ease_out(2p)` at that opacity
        let opacity = self.layer().opacity;
        self.progress = (1.0 - opacity.cbrt()) / 2.0;
        self.outgoing = Some(std::mem::replace(&mut self.current, content));
    }

    /// Returns whether the transition is still running.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.outgoing.is_none() {
            return false;
        }

        self.progress = if self.duration > 0.0 {
            self.progress + dt / self.duration
        } else {
            1.0
        };

        if self.progress >= 1.0 {
            self.progress = 1.0;
            self.outgoing = None;
        }
        self.is_animating()
    }

    pub fn finish(&mut self) {
        self.progress = 1.0;
        self.outgoing = None;
    }

    pub fn layer(&self) -> DetailLayer<'_> {
        match &self.outgoing {
            Some(outgoing) if self.progress < 0.5 => {
                let t = ease_out(self.progress * 2.0);
                DetailLayer {
                    content: outgoing,
                    opacity: 1.0 - t,
                    y_offset: -SLIDE * t,
                }
            }
            Some(_) => {
                let t = ease_out((self.progress - 0.5) * 2.0);
                DetailLayer {
                    content: &self.current,
                    opacity: t,
                    y_offset: SLIDE * (1.0 - t),
                }
            }
            None => DetailLayer {
                content: &self.current,
                opacity: 1.0,
                y_offset: 0.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emotion(catalog: &Catalog, id: &str) -> DetailContent {
        DetailContent::for_hover(catalog, Some(&EmotionId::new(id)))
    }

    #[test]
    fn test_content_for_hover() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(
            DetailContent::for_hover(&catalog, None),
            DetailContent::Placeholder
        );
        assert_eq!(
            DetailContent::for_hover(&catalog, Some(&EmotionId::new("missing"))),
            DetailContent::Placeholder
        );

        match emotion(&catalog, "joy") {
            DetailContent::Emotion {
                name,
                color,
                opposites,
                ..
            } => {
                assert_eq!(name, "Joy");
                assert_eq!(color.to_string(), "#FCD34D");
                assert_eq!(opposites, vec!["Sadness".to_string()]);
            }
            DetailContent::Placeholder => panic!("expected emotion content"),
        }
        assert_eq!(DetailContent::Placeholder.title(), PLACEHOLDER);
    }

    #[test]
    fn test_cross_fade_sequence() {
        let catalog = Catalog::builtin().unwrap();
        let mut panel = DetailPanel::new(0.3);
        assert_eq!(panel.layer().opacity, 1.0);

        panel.show(emotion(&catalog, "joy"));
        assert!(panel.is_animating());
        let start = panel.layer();
        assert_eq!(start.content, &DetailContent::Placeholder);
        assert_eq!(start.opacity, 1.0);

        panel.tick(0.1);
        let exiting = panel.layer();
        assert_eq!(exiting.content, &DetailContent::Placeholder);
        assert!(exiting.opacity < 1.0 && exiting.y_offset < 0.0);

        panel.tick(0.1);
        let entering = panel.layer();
        assert_eq!(entering.content.title(), "Joy");
        assert!(entering.y_offset > 0.0);

        assert!(!panel.tick(0.2));
        let done = panel.layer();
        assert_eq!(done.opacity, 1.0);
        assert_eq!(done.y_offset, 0.0);
    }

    #[test]
    fn test_retarget_during_exit() {
        let catalog = Catalog::builtin().unwrap();
        let mut panel = DetailPanel::new(0.3);

        panel.show(emotion(&catalog, "joy"));
        panel.tick(0.05);
        panel.show(emotion(&catalog, "trust"));
        assert_eq!(panel.layer().content, &DetailContent::Placeholder);

        panel.tick(1.0);
        assert_eq!(panel.current().title(), "Trust");
    }

    #[test]
    fn test_retarget_during_enter_keeps_opacity_continuous() {
        let catalog = Catalog::builtin().unwrap();
        let mut panel = DetailPanel::new(1.0);

        panel.show(emotion(&catalog, "joy"));
        panel.tick(1.0 - 1e-9);
        let before = panel.layer().opacity;

        panel.show(DetailContent::Placeholder);
        let after = panel.layer();
        assert_eq!(after.content.title(), "Joy");
        assert!((after.opacity - before).abs() < 1e-6);
    }

    #[test]
    fn test_retarget_mid_enter_keeps_opacity() {
        let catalog = Catalog::builtin().unwrap();
        let mut panel = DetailPanel::new(1.0);

        panel.show(emotion(&catalog, "joy"));
        panel.tick(0.75);
        let before = panel.layer();
        assert_eq!(before.content.title(), "Joy");
        assert!((before.opacity - 0.875).abs() < 1e-9);
        let before_opacity = before.opacity;

        panel.show(DetailContent::Placeholder);
        let after = panel.layer();
        assert_eq!(after.content.title(), "Joy");
        assert!((after.opacity - before_opacity).abs() < 1e-9);
        let after_opacity = after.opacity;

        // and it keeps fading out from there
        panel.tick(0.01);
        let next = panel.layer();
        assert_eq!(next.content.title(), "Joy");
        assert!(next.opacity < after_opacity);

        panel.tick(1.0);
        assert_eq!(panel.layer().content, &DetailContent::Placeholder);
        assert_eq!(panel.layer().opacity, 1.0);
    }

    #[test]
    fn test_same_content_is_ignored() {
        let mut panel = DetailPanel::new(0.3);
        panel.show(DetailContent::Placeholder);
        assert!(!panel.is_animating());
    }
}
