use super::{BODY_SIZE, LABEL_FONT, LINE_SPACING, PANEL_PADDING, PANEL_RADIUS, SWATCH_HEIGHT, TITLE_SIZE};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use plutchik::detail::{DetailContent, DetailLayer};
use std::f64::consts::PI;

fn set_source(cr: &Context, color: Srgba<f64>, opacity: f64) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a * opacity);
}

fn rounded_rect(cr: &Context, x: f64, y: f64, w: f64, h: f64, r: f64) {
    let r = r.min(w / 2.0).min(h / 2.0).max(0.0);
    cr.new_sub_path();
    cr.arc(x + w - r, y + r, r, -PI / 2.0, 0.0);
    cr.arc(x + w - r, y + h - r, r, 0.0, PI / 2.0);
    cr.arc(x + r, y + h - r, r, PI / 2.0, PI);
    cr.arc(x + r, y + r, r, PI, 1.5 * PI);
    cr.close_path();
}

/// Greedy word wrap against the current font.
fn wrap_lines(cr: &Context, text: &str, max_width: f64) -> Result<Vec<String>, cairo::Error> {
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        let candidate = if line.is_empty() {
            word.to_string()
        } else {
            format!("{line} {word}")
        };
        if !line.is_empty() && cr.text_extents(&candidate)?.x_advance() > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }
    if !line.is_empty() {
        lines.push(line);
    }
    Ok(lines)
}

struct TextCursor<'a> {
    cr: &'a Context,
    x: f64,
    y: f64,
    max_width: f64,
}

impl TextCursor<'_> {
    fn paragraph(&mut self, text: &str, size: f64) -> Result<(), cairo::Error> {
        self.cr.set_font_size(size);
        for line in wrap_lines(self.cr, text, self.max_width)? {
            self.y += size * LINE_SPACING;
            self.cr.move_to(self.x, self.y);
            self.cr.show_text(&line)?;
        }
        Ok(())
    }

    fn gap(&mut self, height: f64) {
        self.y += height;
    }
}

/// Emotion titles take the emotion's own color; the placeholder stays muted.
fn title_color(layer: &DetailLayer<'_>, colors: &ThemeColors) -> Srgba<f64> {
    match layer.content {
        DetailContent::Emotion { color, .. } => {
            let (r, g, b) = color.to_f64().into_components();
            Srgba::new(r, g, b, layer.opacity)
        }
        DetailContent::Placeholder => {
            let mut muted = colors.placeholder;
            muted.alpha *= layer.opacity;
            muted
        }
    }
}

pub fn draw(
    cr: &Context,
    layer: DetailLayer<'_>,
    width: f64,
    height: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    rounded_rect(cr, 0.0, 0.0, width, height, PANEL_RADIUS);
    set_source(cr, colors.panel_bg, 1.0);
    cr.fill()?;

    if layer.opacity <= 0.0 {
        return Ok(());
    }

    cr.save()?;
    cr.translate(0.0, layer.y_offset);
    let mut cursor = TextCursor {
        cr,
        x: PANEL_PADDING,
        y: PANEL_PADDING,
        max_width: (width - 2.0 * PANEL_PADDING).max(0.0),
    };

    match layer.content {
        DetailContent::Placeholder => {
            cr.select_font_face(LABEL_FONT, cairo::FontSlant::Italic, cairo::FontWeight::Normal);
            set_source(cr, title_color(&layer, colors), 1.0);
            cursor.paragraph(layer.content.title(), BODY_SIZE)?;
        }
        DetailContent::Emotion {
            name,
            color,
            description,
            opposites,
            ..
        } => {
            let (r, g, b) = color.to_f64().into_components();
            cr.set_source_rgba(r, g, b, layer.opacity);
            rounded_rect(cr, cursor.x, cursor.y, cursor.max_width, SWATCH_HEIGHT, SWATCH_HEIGHT / 2.0);
            cr.fill()?;
            cursor.gap(SWATCH_HEIGHT);

            cr.select_font_face(LABEL_FONT, cairo::FontSlant::Normal, cairo::FontWeight::Bold);
            set_source(cr, title_color(&layer, colors), 1.0);
            cursor.paragraph(name, TITLE_SIZE)?;
            cursor.gap(BODY_SIZE * 0.5);

            cr.select_font_face(LABEL_FONT, cairo::FontSlant::Normal, cairo::FontWeight::Normal);
            set_source(cr, colors.panel_fg, layer.opacity);
            if !description.is_empty() {
                cursor.paragraph(description, BODY_SIZE)?;
            }
            if !opposites.is_empty() {
                cursor.gap(BODY_SIZE * 0.5);
                set_source(cr, colors.placeholder, layer.opacity);
                cursor.paragraph(&format!("Opposite: {}", opposites.join(", ")), BODY_SIZE)?;
            }
        }
    }
    cr.restore()
}

#[cfg(test)]
mod tests {
    use super::*;
    use plutchik::Color;

    fn colors() -> ThemeColors {
        let grey = Srgba::new(0.5, 0.5, 0.5, 1.0);
        ThemeColors {
            stroke: grey,
            core: grey,
            label: grey,
            panel_bg: grey,
            panel_fg: Srgba::new(1.0, 1.0, 1.0, 1.0),
            placeholder: Srgba::new(0.6, 0.6, 0.6, 0.8),
        }
    }

    #[test]
    fn test_title_uses_emotion_color() {
        let content = DetailContent::Emotion {
            id: "joy".to_string().into(),
            name: "Joy".to_string(),
            color: Color::new(0xFF, 0x00, 0x00),
            description: String::new(),
            opposites: Vec::new(),
        };
        let layer = DetailLayer {
            content: &content,
            opacity: 0.5,
            y_offset: 0.0,
        };
        assert_eq!(title_color(&layer, &colors()), Srgba::new(1.0, 0.0, 0.0, 0.5));
    }

    #[test]
    fn test_placeholder_title_is_muted() {
        let layer = DetailLayer {
            content: &DetailContent::Placeholder,
            opacity: 0.5,
            y_offset: 0.0,
        };
        assert_eq!(title_color(&layer, &colors()), Srgba::new(0.6, 0.6, 0.6, 0.4));
    }
}
