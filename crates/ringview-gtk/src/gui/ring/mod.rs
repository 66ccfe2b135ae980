pub mod model;
pub mod view;

pub use model::RingState;
pub use view::draw;

pub const PADDING: f64 = 16.0; // gap between ring and window edge
pub const ICON_SIZE: i32 = 256;
pub const ICON_FILL: f64 = 0.75; // icon size relative to item diameter
pub const HUB_RADIUS_FACTOR: f64 = 0.25; // center circle relative to ring radius
