pub mod macros;

pub mod catalog;
pub mod detail;
pub mod geometry;
pub mod highlight;
pub mod label;
pub mod layout;
pub mod motion;
pub mod scene;
pub mod wheel;

pub use catalog::{Catalog, CatalogError, CategoryNode, Color, EmotionId};
pub use geometry::{ArcPath, Point, Sector};
pub use highlight::{Highlight, HoverRole, HoverState};
pub use layout::{Layout, LayoutError, Ring, WheelConfig};
pub use motion::MotionConfig;
pub use scene::{Scene, Viewport};
pub use wheel::Wheel;
