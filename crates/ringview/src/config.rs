use crate::catalog::DataSource;
use crate::geometry::{Point, RingLayout};
use crate::item::{Item, ItemTitle};
use crate::style::{Font, StateStyle};
use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub radius: f64,
    /// Degrees, clockwise from 3 o'clock.
    pub start_angle: f64,
    pub item_scale: f64,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            radius: 120.0,
            start_angle: -90.0,
            item_scale: 0.9,
        }
    }
}

impl LayoutConfig {
    pub fn to_layout(&self, center: Point) -> RingLayout {
        RingLayout::new(center, self.radius)
            .with_start_angle(self.start_angle.to_radians())
            .with_item_scale(self.item_scale)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ItemConfig {
    pub title: ItemTitle,
    pub clips_image: bool,
    pub enabled: bool,
    pub style: StateStyle,
    /// Shell command the host runs when the item is selected.
    pub command: Option<String>,
}

impl Default for ItemConfig {
    fn default() -> Self {
        Self {
            title: ItemTitle::default(),
            clips_image: false,
            enabled: true,
            style: StateStyle::default(),
            command: None,
        }
    }
}

impl ItemConfig {
    pub fn to_item(&self) -> Item {
        Item {
            title: self.title.clone(),
            clips_image: self.clips_image,
            enabled: self.enabled,
            style: self.style.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
#[serde(default)]
pub struct RingConfig {
    pub layout: LayoutConfig,
    pub font: Font,
    pub style: StateStyle,
    pub items: Vec<ItemConfig>,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs = ProjectDirs::from("org", "ringview", "ringview")
        .ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

fn environment() -> config::Environment {
    config::Environment::with_prefix("RINGVIEW")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

pub fn load_config() -> Result<RingConfig, ConfigError> {
    load_config_from(&get_config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<RingConfig, ConfigError> {
    let s = config::Config::builder()
        .add_source(
            config::File::from(path.to_path_buf())
                .format(config::FileFormat::Toml)
                .required(false),
        )
        .add_source(environment())
        .build()?;

    Ok(s.try_deserialize()?)
}

pub fn parse_config(toml: &str) -> Result<RingConfig, ConfigError> {
    let s = config::Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;

    Ok(s.try_deserialize()?)
}

/// Loads `path` (or the default location); falls back to the bundled
/// configuration when nothing usable is found.
pub fn load_or_default(path: Option<&Path>) -> RingConfig {
    let path = match path {
        Some(p) => {
            if !p.exists() {
                log::warn!("Config file {} not found, using bundled defaults", p.display());
            }
            Some(p.to_path_buf())
        }
        None => get_config_path().ok(),
    };

    let loaded = match path {
        Some(p) if p.exists() => load_config_from(&p).map_err(|e| {
            log::error!("Failed to load {}: {}", p.display(), e);
            e
        }),
        _ => Err(ConfigError::ConfigDirNotFound),
    };

    loaded.or_else(|_| parse_config(DEFAULT_CONFIG)).unwrap_or_else(|e| {
        log::error!("Bundled configuration is invalid: {}", e);
        RingConfig::default()
    })
}

pub fn write_default_config() -> Result<PathBuf, ConfigError> {
    let path = get_config_path()?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_CONFIG)?;
    }
    Ok(path)
}

pub const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

/// Serves the `[[items]]` of a configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigDataSource {
    items: Vec<ItemConfig>,
}

impl ConfigDataSource {
    pub fn new(items: Vec<ItemConfig>) -> Self {
        Self { items }
    }

    pub fn from_config(config: &RingConfig) -> Self {
        Self::new(config.items.clone())
    }

    pub fn command_at(&self, index: usize) -> Option<&str> {
        self.items.get(index)?.command.as_deref()
    }
}

impl DataSource for ConfigDataSource {
    fn number_of_items(&self) -> usize {
        self.items.len()
    }

    fn item_at(&self, index: usize) -> Item {
        self.items
            .get(index)
            .map(ItemConfig::to_item)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{Color, InteractionState, ItemImage};

    #[test]
    fn test_missing_explicit_path_uses_bundled_config() {
        let missing = std::env::temp_dir().join("ringview-missing-dir/ring.toml");
        assert!(!missing.exists());

        let config = load_or_default(Some(&missing));
        assert_eq!(config.items.len(), parse_config(DEFAULT_CONFIG).unwrap().items.len());
        assert!(!config.items.is_empty());
    }

    #[test]
    fn test_bundled_config_parses() {
        let config = parse_config(DEFAULT_CONFIG).unwrap();
        assert!(!config.items.is_empty());
        assert!(config.style.item_color(InteractionState::Normal).is_some());
        assert!(config.layout.item_scale > 0.0 && config.layout.item_scale <= 1.0);
    }

    #[test]
    fn test_items_and_styles() {
        let toml = r##"
[layout]
radius = 90
start_angle = 0

[style.normal]
item_color = "#202020"

[[items]]
title = "Mail"
command = "thunderbird"
clips_image = true

[items.style.normal]
image = "/usr/share/icons/mail.png"

[items.style.highlighted]
item_color = "#3366ff"

[[items]]
title = "Off"
enabled = false
"##;
        let config = parse_config(toml).unwrap();
        assert_eq!(config.layout.radius, 90.0);
        assert_eq!(config.layout.start_angle, 0.0);
        assert_eq!(config.layout.item_scale, 0.9);
        assert_eq!(config.font, Font::default());
        assert_eq!(config.items.len(), 2);

        let mail = config.items[0].to_item();
        assert_eq!(mail.title.as_str(), "Mail");
        assert!(mail.clips_image);
        assert!(mail.enabled);
        assert_eq!(
            mail.style.image(InteractionState::Selected),
            Some(ItemImage::new("/usr/share/icons/mail.png"))
        );
        assert_eq!(
            mail.style.item_color(InteractionState::Highlighted),
            Some("#3366ff".parse::<Color>().unwrap())
        );

        let off = config.items[1].to_item();
        assert!(!off.enabled);
        assert!(off.style.is_empty());

        let source = ConfigDataSource::from_config(&config);
        assert_eq!(source.number_of_items(), 2);
        assert_eq!(source.command_at(0), Some("thunderbird"));
        assert_eq!(source.command_at(1), None);
        assert_eq!(source.command_at(7), None);
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let toml = r#"
[style.normal]
item_color = "red"
"#;
        assert!(matches!(parse_config(toml), Err(ConfigError::Config(_))));
    }

    #[test]
    fn test_item_config_deserialization() {
        let json = r#"{ "title": "Files" }"#;
        let item: ItemConfig = serde_json::from_str(json).unwrap();
        assert!(item.enabled);
        assert!(!item.clips_image);
        assert_eq!(item.command, None);
    }

    #[test]
    fn test_layout_from_config() {
        let layout = LayoutConfig {
            radius: 50.0,
            start_angle: 0.0,
            item_scale: 0.5,
        }
        .to_layout(Point::default());
        assert_eq!(layout.radius(), 50.0);
        assert_eq!(layout.start_angle(), 0.0);
        assert_eq!(layout.item_scale(), 0.5);
    }
}
