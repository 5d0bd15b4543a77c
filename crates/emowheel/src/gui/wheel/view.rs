use super::LABEL_FONT;
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::Srgba;
use plutchik::scene::{STROKE_WIDTH, SceneWedge};
use plutchik::{Ring, Scene, Viewport};

/// Cairo angles start at 3 o'clock; wheel angles start at 12.
fn to_cairo(degrees: f64) -> f64 {
    (degrees - 90.0).to_radians()
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

struct WedgeRenderer<'a> {
    wedge: &'a SceneWedge,
}

impl<'a> WedgeRenderer<'a> {
    fn new(wedge: &'a SceneWedge) -> Self {
        Self { wedge }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        cr.save()?;
        cr.translate(self.wedge.offset.x, self.wedge.offset.y);
        self.draw_sector(cr, colors)?;
        self.draw_label(cr, colors)?;
        cr.restore()
    }

    fn draw_sector(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let s = &self.wedge.sector;
        let (start, end) = (to_cairo(s.start_angle), to_cairo(s.end_angle));

        cr.new_path();
        cr.arc_negative(s.center.x, s.center.y, s.outer_radius, end, start);
        if s.inner_radius > 0.0 {
            cr.arc(s.center.x, s.center.y, s.inner_radius, start, end);
        } else {
            cr.line_to(s.center.x, s.center.y);
        }
        cr.close_path();

        let (r, g, b) = self.wedge.fill.to_f64().into_components();
        cr.set_source_rgb(r, g, b);
        cr.fill_preserve()?;

        set_source(cr, colors.stroke);
        cr.set_line_width(STROKE_WIDTH);
        cr.set_line_join(cairo::LineJoin::Round);
        cr.stroke()
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let label = &self.wedge.label;
        let weight = match self.wedge.ring {
            Ring::Inner => cairo::FontWeight::Bold,
            Ring::Outer => cairo::FontWeight::Normal,
        };

        cr.save()?;
        cr.translate(label.position.x, label.position.y);
        cr.rotate(label.rotation.to_radians());
        cr.select_font_face(LABEL_FONT, cairo::FontSlant::Normal, weight);
        cr.set_font_size(self.wedge.font_size);
        set_source(cr, colors.label);

        let ext = cr.text_extents(&self.wedge.name)?;
        cr.move_to(
            -ext.width() / 2.0 - ext.x_bearing(),
            -ext.height() / 2.0 - ext.y_bearing(),
        );
        cr.show_text(&self.wedge.name)?;
        cr.restore()
    }
}

pub fn draw(
    cr: &Context,
    scene: &Scene,
    width: f64,
    height: f64,
    colors: &ThemeColors,
) -> Result<(), cairo::Error> {
    let viewport = Viewport::fit(scene.viewport, width, height);
    if viewport.scale <= 0.0 {
        return Ok(());
    }

    cr.save()?;
    cr.translate(viewport.offset.x, viewport.offset.y);
    cr.scale(viewport.scale, viewport.scale);

    draw_core(cr, scene, colors)?;
    // scene order is back to front
    for wedge in &scene.wedges {
        WedgeRenderer::new(wedge).draw(cr, colors)?;
    }
    cr.restore()
}

fn draw_core(cr: &Context, scene: &Scene, colors: &ThemeColors) -> Result<(), cairo::Error> {
    if scene.core_radius <= 0.0 {
        return Ok(());
    }
    cr.new_path();
    cr.arc(
        scene.center.x,
        scene.center.y,
        scene.core_radius,
        0.0,
        2.0 * std::f64::consts::PI,
    );
    set_source(cr, colors.core);
    cr.fill_preserve()?;
    set_source(cr, colors.stroke);
    cr.set_line_width(STROKE_WIDTH);
    cr.stroke()
}
