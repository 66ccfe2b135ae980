//! Per-state visual attributes.
//!
//! A [`StateStyle`] stores optional overrides for each [`InteractionState`].
//! Lookups for a state without an override fall back to [`InteractionState::Normal`];
//! if `Normal` has nothing either the attribute is absent and the renderer
//! uses its own default.

use derive_more::{AsRef, Deref, Display, From, Into};
use palette::Srgba;
use serde::{Deserialize, Serialize};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoEnumIterator};
use thiserror::Error;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive, serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum InteractionState {
    #[default]
    Normal,
    Highlighted,
    Selected,
    Disabled,
}

impl InteractionState {
    pub fn as_index(&self) -> usize {
        *self as usize
    }
}

/// Interaction conditions that can hold at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InteractionFlags {
    pub highlighted: bool,
    pub selected: bool,
    pub disabled: bool,
}

impl InteractionFlags {
    /// Collapses the flags into the single state used for styling, by priority:
    /// 1. Disabled
    /// 2. Selected
    /// 3. Highlighted
    /// 4. Normal
    pub fn state(&self) -> InteractionState {
        if self.disabled {
            InteractionState::Disabled
        } else if self.selected {
            InteractionState::Selected
        } else if self.highlighted {
            InteractionState::Highlighted
        } else {
            InteractionState::Normal
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("Color '{0}' must start with '#'")]
    MissingHash(String),
    #[error("Color '{0}' must have 6 or 8 hex digits")]
    BadLength(String),
    #[error("Color '{0}' contains invalid hex digits")]
    BadDigit(String),
}

/// sRGB color with alpha, written as `#rrggbb` or `#rrggbbaa`.
#[derive(Debug, Clone, Copy, PartialEq, Deref, From, Into, SerializeDisplay, DeserializeFromStr)]
pub struct Color(Srgba<f64>);

impl Color {
    pub fn new(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self(Srgba::new(red, green, blue, alpha))
    }

    pub fn into_components(self) -> (f64, f64, f64, f64) {
        self.0.into_components()
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(s.to_string()));
        }
        if !matches!(hex.len(), 6 | 8) {
            return Err(ColorParseError::BadLength(s.to_string()));
        }

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map(|v| v as f64 / 255.0)
                .map_err(|_| ColorParseError::BadDigit(s.to_string()))
        };
        let alpha = if hex.len() == 8 { channel(6)? } else { 1.0 };

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let to_byte = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        let (r, g, b, a) = self.into_components();
        write!(
            f,
            "#{:02x}{:02x}{:02x}",
            to_byte(r),
            to_byte(g),
            to_byte(b)
        )?;
        if to_byte(a) != 255 {
            write!(f, "{:02x}", to_byte(a))?;
        }
        Ok(())
    }
}

/// Path to an image the host decodes and draws.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Deref, From, Into, AsRef)]
#[serde(transparent)]
pub struct ItemImage(PathBuf);

impl ItemImage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef)]
#[serde(transparent)]
pub struct FontFamily(String);

crate::impl_string_newtype!(FontFamily);

/// Rendering hint handed through to the host; layout never reads it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Font {
    pub family: FontFamily,
    pub size: f64,
    pub bold: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self {
            family: FontFamily::new("Sans"),
            size: 12.0,
            bold: true,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, StrumDisplay,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AttributeKind {
    ItemColor,
    TitleColor,
    Image,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Attribute {
    ItemColor(Color),
    TitleColor(Color),
    Image(ItemImage),
}

/// Overrides stored for one state. Every field may be unset independently.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StateAttributes {
    pub item_color: Option<Color>,
    pub title_color: Option<Color>,
    pub image: Option<ItemImage>,
}

impl StateAttributes {
    fn get(&self, kind: AttributeKind) -> Option<Attribute> {
        match kind {
            AttributeKind::ItemColor => self.item_color.map(Attribute::ItemColor),
            AttributeKind::TitleColor => self.title_color.map(Attribute::TitleColor),
            AttributeKind::Image => self.image.clone().map(Attribute::Image),
        }
    }

    fn set(&mut self, attribute: Attribute) {
        match attribute {
            Attribute::ItemColor(c) => self.item_color = Some(c),
            Attribute::TitleColor(c) => self.title_color = Some(c),
            Attribute::Image(i) => self.image = Some(i),
        }
    }

    fn clear(&mut self, kind: AttributeKind) {
        match kind {
            AttributeKind::ItemColor => self.item_color = None,
            AttributeKind::TitleColor => self.title_color = None,
            AttributeKind::Image => self.image = None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "HashMap<InteractionState, StateAttributes>")]
pub struct StateStyle {
    states: [StateAttributes; 4],
}

impl From<HashMap<InteractionState, StateAttributes>> for StateStyle {
    fn from(map: HashMap<InteractionState, StateAttributes>) -> Self {
        let mut style = Self::default();
        for (state, attributes) in map {
            style.states[state.as_index()] = attributes;
        }
        style
    }
}

impl StateStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_attribute(&mut self, state: InteractionState, attribute: Attribute) {
        self.states[state.as_index()].set(attribute);
    }

    pub fn clear_attribute(&mut self, state: InteractionState, kind: AttributeKind) {
        self.states[state.as_index()].clear(kind);
    }

    /// The override stored for exactly this state, without fallback.
    pub fn explicit(&self, state: InteractionState, kind: AttributeKind) -> Option<Attribute> {
        self.states[state.as_index()].get(kind)
    }

    pub fn attribute(&self, state: InteractionState, kind: AttributeKind) -> Option<Attribute> {
        self.explicit(state, kind)
            .or_else(|| self.explicit(InteractionState::Normal, kind))
    }

    pub fn is_empty(&self) -> bool {
        self.states.iter().all(|s| *s == StateAttributes::default())
    }

    pub fn item_color(&self, state: InteractionState) -> Option<Color> {
        match self.attribute(state, AttributeKind::ItemColor) {
            Some(Attribute::ItemColor(c)) => Some(c),
            _ => None,
        }
    }

    pub fn set_item_color(&mut self, state: InteractionState, color: Color) {
        self.set_attribute(state, Attribute::ItemColor(color));
    }

    pub fn title_color(&self, state: InteractionState) -> Option<Color> {
        match self.attribute(state, AttributeKind::TitleColor) {
            Some(Attribute::TitleColor(c)) => Some(c),
            _ => None,
        }
    }

    pub fn set_title_color(&mut self, state: InteractionState, color: Color) {
        self.set_attribute(state, Attribute::TitleColor(color));
    }

    pub fn image(&self, state: InteractionState) -> Option<ItemImage> {
        match self.attribute(state, AttributeKind::Image) {
            Some(Attribute::Image(i)) => Some(i),
            _ => None,
        }
    }

    pub fn set_image(&mut self, state: InteractionState, image: ItemImage) {
        self.set_attribute(state, Attribute::Image(image));
    }

    pub fn resolved(&self, state: InteractionState) -> ResolvedAttributes {
        ResolvedAttributes::resolve(&[self], state)
    }
}

/// Resolves `kind` for `state` across stacked styles, most specific first.
///
/// An explicit override for `state` in any layer beats every layer's `Normal`
/// value, so a view-wide highlight color still applies to an item that only
/// customizes its normal color.
pub fn resolve_layered(
    layers: &[&StateStyle],
    state: InteractionState,
    kind: AttributeKind,
) -> Option<Attribute> {
    layers
        .iter()
        .find_map(|style| style.explicit(state, kind))
        .or_else(|| {
            layers
                .iter()
                .find_map(|style| style.explicit(InteractionState::Normal, kind))
        })
}

/// What the renderer paints for one item in one state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedAttributes {
    pub item_color: Option<Color>,
    pub title_color: Option<Color>,
    pub image: Option<ItemImage>,
}

impl ResolvedAttributes {
    pub fn resolve(layers: &[&StateStyle], state: InteractionState) -> Self {
        let mut resolved = Self::default();
        for kind in AttributeKind::iter() {
            match resolve_layered(layers, state, kind) {
                Some(Attribute::ItemColor(c)) => resolved.item_color = Some(c),
                Some(Attribute::TitleColor(c)) => resolved.title_color = Some(c),
                Some(Attribute::Image(i)) => resolved.image = Some(i),
                None => {}
            }
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Color {
        Color::new(1.0, 0.0, 0.0, 1.0)
    }

    fn blue() -> Color {
        Color::new(0.0, 0.0, 1.0, 1.0)
    }

    #[test]
    fn test_normal_value_is_fallback() {
        let mut style = StateStyle::new();
        style.set_item_color(InteractionState::Normal, red());

        assert_eq!(style.item_color(InteractionState::Normal), Some(red()));
        assert_eq!(style.item_color(InteractionState::Highlighted), Some(red()));
        assert_eq!(style.item_color(InteractionState::Disabled), Some(red()));
        assert_eq!(
            style.explicit(InteractionState::Highlighted, AttributeKind::ItemColor),
            None
        );
    }

    #[test]
    fn test_override_replaces_previous_value() {
        let mut style = StateStyle::new();
        style.set_title_color(InteractionState::Selected, red());
        style.set_title_color(InteractionState::Selected, blue());
        assert_eq!(style.title_color(InteractionState::Selected), Some(blue()));
    }

    #[test]
    fn test_empty_style_resolves_to_absent() {
        let style = StateStyle::new();
        for state in InteractionState::iter() {
            for kind in AttributeKind::iter() {
                assert_eq!(style.attribute(state, kind), None);
            }
        }
        assert!(style.is_empty());
    }

    #[test]
    fn test_attributes_resolve_independently() {
        let mut style = StateStyle::new();
        style.set_item_color(InteractionState::Normal, red());
        style.set_image(InteractionState::Highlighted, ItemImage::new("/tmp/a.png"));

        let normal = style.resolved(InteractionState::Normal);
        assert_eq!(normal.item_color, Some(red()));
        assert_eq!(normal.image, None);

        let highlighted = style.resolved(InteractionState::Highlighted);
        assert_eq!(highlighted.item_color, Some(red()));
        assert_eq!(highlighted.image, Some(ItemImage::new("/tmp/a.png")));
        assert_eq!(highlighted.title_color, None);
    }

    #[test]
    fn test_clear_attribute_restores_fallback() {
        let mut style = StateStyle::new();
        style.set_item_color(InteractionState::Normal, red());
        style.set_item_color(InteractionState::Selected, blue());
        style.clear_attribute(InteractionState::Selected, AttributeKind::ItemColor);
        assert_eq!(style.item_color(InteractionState::Selected), Some(red()));
    }

    #[test]
    fn test_flag_precedence() {
        let all = InteractionFlags {
            highlighted: true,
            selected: true,
            disabled: true,
        };
        assert_eq!(all.state(), InteractionState::Disabled);

        let both = InteractionFlags {
            highlighted: true,
            selected: true,
            disabled: false,
        };
        assert_eq!(both.state(), InteractionState::Selected);

        let hl = InteractionFlags {
            highlighted: true,
            ..Default::default()
        };
        assert_eq!(hl.state(), InteractionState::Highlighted);
        assert_eq!(InteractionFlags::default().state(), InteractionState::Normal);
    }

    #[test]
    fn test_layered_resolution_prefers_explicit_state() {
        let mut item = StateStyle::new();
        item.set_item_color(InteractionState::Normal, red());

        let mut view = StateStyle::new();
        view.set_item_color(InteractionState::Normal, Color::new(0.5, 0.5, 0.5, 1.0));
        view.set_item_color(InteractionState::Highlighted, blue());
        view.set_title_color(InteractionState::Normal, blue());

        let layers = [&item, &view];
        let normal = ResolvedAttributes::resolve(&layers, InteractionState::Normal);
        assert_eq!(normal.item_color, Some(red()));
        assert_eq!(normal.title_color, Some(blue()));

        let highlighted = ResolvedAttributes::resolve(&layers, InteractionState::Highlighted);
        assert_eq!(highlighted.item_color, Some(blue()));

        item.set_item_color(InteractionState::Highlighted, red());
        let layers = [&item, &view];
        assert_eq!(
            resolve_layered(&layers, InteractionState::Highlighted, AttributeKind::ItemColor),
            Some(Attribute::ItemColor(red()))
        );
    }

    #[test]
    fn test_color_parsing() {
        let c: Color = "#ff0000".parse().unwrap();
        assert_eq!(c, red());
        assert_eq!(c.to_string(), "#ff0000");

        let translucent: Color = "#00000080".parse().unwrap();
        let (_, _, _, a) = translucent.into_components();
        assert!((a - 128.0 / 255.0).abs() < 1e-9);
        assert_eq!(translucent.to_string(), "#00000080");

        assert!(matches!(
            "ff0000".parse::<Color>(),
            Err(ColorParseError::MissingHash(_))
        ));
        assert!(matches!(
            "#ff00".parse::<Color>(),
            Err(ColorParseError::BadLength(_))
        ));
        assert!(matches!(
            "#gg0000".parse::<Color>(),
            Err(ColorParseError::BadDigit(_))
        ));
        assert!(matches!(
            "#+f+f+f".parse::<Color>(),
            Err(ColorParseError::BadDigit(_))
        ));
        assert!(matches!(
            "#ff00ff0".parse::<Color>(),
            Err(ColorParseError::BadLength(_))
        ));
    }

    #[test]
    fn test_state_deserialization() {
        let cases = vec![
            ("\"normal\"", InteractionState::Normal),
            ("\"Highlighted\"", InteractionState::Highlighted),
            ("\"SELECTED\"", InteractionState::Selected),
            ("\"disabled\"", InteractionState::Disabled),
        ];

        for (json, expected) in cases {
            let deserialized: InteractionState = serde_json::from_str(json).unwrap();
            assert_eq!(deserialized, expected);
        }
    }

    #[test]
    fn test_style_deserialization() {
        let json = r##"{
            "normal": { "item_color": "#ff0000" },
            "selected": { "title_color": "#0000ff", "image": "/tmp/sel.png" }
        }"##;
        let style: StateStyle = serde_json::from_str(json).unwrap();
        assert_eq!(style.item_color(InteractionState::Selected), Some(red()));
        assert_eq!(style.title_color(InteractionState::Selected), Some(blue()));
        assert_eq!(style.title_color(InteractionState::Normal), None);
        assert_eq!(
            style.image(InteractionState::Selected),
            Some(ItemImage::new("/tmp/sel.png"))
        );
    }
}
