use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use plutchik::Color;
use plutchik::scene::CORE_FILL;

pub struct ThemeColors {
    pub stroke: Srgba<f64>,
    pub core: Srgba<f64>,
    pub label: Srgba<f64>,
    pub panel_bg: Srgba<f64>,
    pub panel_fg: Srgba<f64>,
    pub placeholder: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            // wedge outlines stay dark regardless of theme
            stroke: Srgba::new(0.0, 0.0, 0.0, 1.0),
            // the disc matches the exported scene on every theme
            core: scene_color(CORE_FILL, Srgba::new(0.1, 0.1, 0.1, 1.0)),
            label: Srgba::new(0.07, 0.07, 0.07, 1.0),
            panel_bg: Self::lookup_color(
                context,
                "theme_base_color",
                Srgba::new(0.12, 0.12, 0.12, 0.95),
                None,
            ),
            panel_fg: Self::lookup_color(
                context,
                "theme_text_color",
                Srgba::new(0.95, 0.95, 0.95, 1.0),
                None,
            ),
            placeholder: Self::lookup_color(
                context,
                "insensitive_fg_color",
                Srgba::new(0.6, 0.6, 0.6, 1.0),
                None,
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                Srgba::new(
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    alpha_override.unwrap_or(c.alpha() as f64),
                )
            })
            .unwrap_or(fallback)
    }
}

fn scene_color(hex: &str, fallback: Srgba<f64>) -> Srgba<f64> {
    hex.parse::<Color>()
        .map(|c| {
            let (r, g, b) = c.to_f64().into_components();
            Srgba::new(r, g, b, 1.0)
        })
        .unwrap_or(fallback)
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.emowheel-wheel {
    background: none;
    background-color: transparent;
}
.emowheel-detail {
    margin: 24px;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_disc_uses_scene_fill() {
        let fallback = Srgba::new(1.0, 0.0, 0.0, 1.0);
        let core = scene_color(CORE_FILL, fallback);
        let expected = 0x1A as f64 / 255.0;
        assert!((core.red - expected).abs() < 1e-9);
        assert!((core.green - expected).abs() < 1e-9);
        assert!((core.blue - expected).abs() < 1e-9);
        assert_eq!(core.alpha, 1.0);

        assert_eq!(scene_color("not a color", fallback), fallback);
    }
}
