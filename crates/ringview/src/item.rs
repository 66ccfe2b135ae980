use crate::style::StateStyle;
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(
    Debug,
    Clone,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    Deref,
    From,
    Into,
    AsRef,
)]
#[serde(transparent)]
pub struct ItemTitle(String);

crate::impl_string_newtype!(ItemTitle);

/// One entry on the ring. Items carry no identity beyond their index.
#[derive(Debug, Clone, PartialEq)]
pub struct Item {
    pub title: ItemTitle,
    pub clips_image: bool,
    pub enabled: bool,
    pub style: StateStyle,
}

impl Default for Item {
    fn default() -> Self {
        Self {
            title: ItemTitle::default(),
            clips_image: false,
            enabled: true,
            style: StateStyle::default(),
        }
    }
}

impl Item {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: ItemTitle::new(title),
            ..Default::default()
        }
    }

    pub fn with_clips_image(mut self, clips_image: bool) -> Self {
        self.clips_image = clips_image;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_style(mut self, style: StateStyle) -> Self {
        self.style = style;
        self
    }
}
