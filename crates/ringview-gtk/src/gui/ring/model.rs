use super::{ICON_SIZE, PADDING};
use gdk_pixbuf::Pixbuf;
use ringview::config::{ConfigDataSource, RingConfig};
use ringview::geometry::{self, Point};
use ringview::{ItemImage, ReloadReport, RingView};
use std::collections::HashMap;
use std::rc::Rc;

/// Host-side state: the ring control plus everything it borrows from us.
pub struct RingState {
    pub view: RingView,
    pub source: Rc<ConfigDataSource>,
    max_radius: f64,
    size: (f64, f64),
    images: HashMap<ItemImage, Option<Pixbuf>>,
}

impl RingState {
    pub fn new(config: &RingConfig) -> Self {
        let source = Rc::new(ConfigDataSource::from_config(config));
        let mut view = RingView::from_config(config);
        view.set_data_source(&source);

        Self {
            view,
            source,
            max_radius: config.layout.radius,
            size: (0.0, 0.0),
            images: HashMap::new(),
        }
    }

    /// Swaps in a new configuration and reloads the ring from it.
    pub fn apply_config(&mut self, config: &RingConfig) {
        self.view.apply_config(config);
        self.max_radius = config.layout.radius;
        self.source = Rc::new(ConfigDataSource::from_config(config));
        self.view.set_data_source(&self.source);
        self.images.clear();
        self.refit();
    }

    pub fn reload(&mut self) -> ReloadReport {
        let report = self.view.reload_data();
        self.refit();
        report
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = (width, height);
        self.refit();
    }

    /// Centers the ring in the drawing area, shrinking it when the configured
    /// radius would not fit.
    fn refit(&mut self) {
        let (width, height) = self.size;
        let count = self.view.number_of_items();
        let half = (width.min(height) / 2.0 - PADDING).max(0.0);
        let item_scale = self.view.layout().item_scale();
        let radius = geometry::fit_radius(count, half, item_scale).min(self.max_radius);
        self.view
            .set_frame(Point::new(width / 2.0, height / 2.0), radius);
    }

    pub fn pixbuf(&mut self, image: &ItemImage) -> Option<Pixbuf> {
        self.images
            .entry(image.clone())
            .or_insert_with(|| load_pixbuf(image))
            .clone()
    }
}

fn load_pixbuf(image: &ItemImage) -> Option<Pixbuf> {
    Pixbuf::from_file_at_scale(image.as_path(), ICON_SIZE, ICON_SIZE, true)
        .map_err(|e| log::warn!("Failed to load image {}: {}", image.display(), e))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringview::config::parse_config;

    const TOML: &str = r#"
[layout]
radius = 60

[[items]]
title = "a"

[[items]]
title = "b"

[[items]]
title = "c"
"#;

    #[test]
    fn test_resize_centers_ring() {
        let config = parse_config(TOML).unwrap();
        let mut state = RingState::new(&config);
        state.resize(400.0, 300.0);

        let layout = state.view.layout();
        assert_eq!(layout.center(), Point::new(200.0, 150.0));
        assert_eq!(layout.radius(), 60.0);

        state.resize(100.0, 100.0);
        let radius = state.view.layout().radius();
        assert!(radius < 60.0);
        assert!((radius - geometry::fit_radius(3, 50.0 - PADDING, 0.9)).abs() < 1e-9);
    }

    #[test]
    fn test_apply_config_swaps_items() {
        let config = parse_config(TOML).unwrap();
        let mut state = RingState::new(&config);
        assert_eq!(state.view.number_of_items(), 3);

        let mut smaller = config.clone();
        smaller.items.truncate(1);
        state.apply_config(&smaller);
        assert_eq!(state.view.number_of_items(), 1);
        assert_eq!(state.source.command_at(0), None);
    }
}
