//! Layout and interaction engine for a ring of selectable items.
//!
//! [`RingView`] is the control a host embeds. It pulls items from a
//! [`DataSource`], lays them out evenly on a circle, turns pointer input into
//! highlight and selection changes, and resolves each item's colors and image
//! for its current [`InteractionState`]. Painting is left to the host.

pub mod catalog;
pub mod config;
pub mod geometry;
pub mod item;
pub mod macros;
pub mod reload;
pub mod selection;
pub mod style;
pub mod view;

pub use catalog::{CatalogError, DataSource, ItemCatalog};
pub use geometry::{ItemGeometry, Point, RingLayout};
pub use item::{Item, ItemTitle};
pub use reload::{ReloadCoordinator, ReloadReport};
pub use selection::{Delegate, InteractionOutcome, Phase, SelectionController};
pub use style::{
    Attribute, AttributeKind, Color, Font, InteractionFlags, InteractionState, ItemImage,
    ResolvedAttributes, StateStyle,
};
pub use view::{RenderItem, RingView};

pub const SOCKET_PATH: &str = "/tmp/ringview.sock";
