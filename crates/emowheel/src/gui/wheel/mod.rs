pub mod detail;
pub mod view;

pub use detail::draw as draw_detail;
pub use view::draw as draw_wheel;

pub const LABEL_FONT: &str = "Sans";
pub const PANEL_PADDING: f64 = 24.0;
pub const PANEL_RADIUS: f64 = 12.0;
pub const SWATCH_HEIGHT: f64 = 8.0;
pub const TITLE_SIZE: f64 = 28.0;
pub const BODY_SIZE: f64 = 15.0;
pub const LINE_SPACING: f64 = 1.4;
