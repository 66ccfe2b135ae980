use crate::catalog::{CatalogError, DataSource, ItemCatalog};
use crate::config::RingConfig;
use crate::geometry::{ItemGeometry, Point, RingLayout};
use crate::item::{Item, ItemTitle};
use crate::reload::{ReloadCoordinator, ReloadReport};
use crate::selection::{Delegate, InteractionOutcome, Phase, SelectionController};
use crate::style::{
    Color, Font, InteractionFlags, InteractionState, ItemImage, ResolvedAttributes, StateStyle,
};
use std::fmt;
use std::rc::{Rc, Weak};

/// Everything the renderer needs to paint one item.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    pub geometry: ItemGeometry,
    pub title: ItemTitle,
    pub clips_image: bool,
    pub state: InteractionState,
    pub attributes: ResolvedAttributes,
}

/// The ring control.
///
/// Owns the item cache, the layout and the interaction state. Data source and
/// delegate belong to the host and are only referenced weakly.
pub struct RingView {
    catalog: ItemCatalog,
    layout: RingLayout,
    selection: SelectionController,
    reloader: ReloadCoordinator,
    style: StateStyle,
    font: Font,
    delegate: Option<Weak<dyn Delegate>>,
}

impl fmt::Debug for RingView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingView")
            .field("catalog", &self.catalog)
            .field("layout", &self.layout)
            .field("selection", &self.selection)
            .field("font", &self.font)
            .finish_non_exhaustive()
    }
}

impl RingView {
    pub fn new(center: Point, radius: f64) -> Self {
        Self::with_layout(RingLayout::new(center, radius))
    }

    pub fn with_layout(layout: RingLayout) -> Self {
        Self {
            catalog: ItemCatalog::new(),
            layout,
            selection: SelectionController::new(),
            reloader: ReloadCoordinator,
            style: StateStyle::default(),
            font: Font::default(),
            delegate: None,
        }
    }

    pub fn from_config(config: &RingConfig) -> Self {
        let mut view = Self::with_layout(config.layout.to_layout(Point::default()));
        view.apply_config(config);
        view
    }

    /// Takes over style, font and layout parameters from `config`. The frame
    /// (center) is left alone.
    pub fn apply_config(&mut self, config: &RingConfig) {
        self.style = config.style.clone();
        self.font = config.font.clone();
        self.layout.set_radius(config.layout.radius);
        self.layout
            .set_start_angle(config.layout.start_angle.to_radians());
        self.layout.set_item_scale(config.layout.item_scale);
    }

    pub fn set_data_source<S: DataSource + 'static>(&mut self, source: &Rc<S>) {
        self.catalog.set_data_source(source);
        self.reload_data();
    }

    pub fn set_delegate<D: Delegate + 'static>(&mut self, delegate: &Rc<D>) {
        let weak: Weak<D> = Rc::downgrade(delegate);
        self.delegate = Some(weak);
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn set_font(&mut self, font: Font) {
        self.font = font;
    }

    /// View-wide defaults, consulted after each item's own style.
    pub fn style(&self) -> &StateStyle {
        &self.style
    }

    pub fn style_mut(&mut self) -> &mut StateStyle {
        &mut self.style
    }

    pub fn item_color(&self, state: InteractionState) -> Option<Color> {
        self.style.item_color(state)
    }

    pub fn set_item_color(&mut self, state: InteractionState, color: Color) {
        self.style.set_item_color(state, color);
    }

    pub fn title_color(&self, state: InteractionState) -> Option<Color> {
        self.style.title_color(state)
    }

    pub fn set_title_color(&mut self, state: InteractionState, color: Color) {
        self.style.set_title_color(state, color);
    }

    pub fn image(&self, state: InteractionState) -> Option<ItemImage> {
        self.style.image(state)
    }

    pub fn set_image(&mut self, state: InteractionState, image: ItemImage) {
        self.style.set_image(state, image);
    }

    pub fn layout(&self) -> &RingLayout {
        &self.layout
    }

    pub fn set_frame(&mut self, center: Point, radius: f64) {
        self.layout.set_center(center);
        self.layout.set_radius(radius);
    }

    pub fn set_start_angle(&mut self, start_angle: f64) {
        self.layout.set_start_angle(start_angle);
    }

    pub fn reload_data(&mut self) -> ReloadReport {
        self.reloader
            .reload(&mut self.catalog, &mut self.layout, &mut self.selection)
    }

    pub fn generation(&self) -> u64 {
        self.catalog.generation()
    }

    pub fn number_of_items(&mut self) -> usize {
        self.catalog.count()
    }

    /// Pulls `index` into the cache, reloading once if the data source changed
    /// under us.
    fn load(&mut self, index: usize) -> bool {
        match self.catalog.item_at(index).map(|_| ()) {
            Ok(()) => true,
            Err(CatalogError::IndexOutOfRange { .. }) => false,
            Err(e @ CatalogError::InconsistentDataSource { .. }) => {
                log::warn!("{}; reloading", e);
                self.reload_data();
                self.catalog.item_at(index).is_ok()
            }
        }
    }

    pub fn item(&mut self, index: usize) -> Option<&Item> {
        if !self.load(index) {
            return None;
        }
        self.catalog.cached_item(index)
    }

    pub fn geometries(&mut self) -> &[ItemGeometry] {
        let count = self.catalog.count();
        self.layout.geometries(count)
    }

    pub fn hit_test(&mut self, point: Point) -> Option<usize> {
        crate::selection::hit_test(self.geometries(), point)
    }

    pub fn phase(&self) -> Phase {
        self.selection.phase()
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.selection.highlighted_index()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection.selected_index()
    }

    pub fn set_selected_index(&mut self, index: Option<usize>) -> bool {
        let count = self.catalog.count();
        self.selection.set_selected_index(index, count)
    }

    pub fn begin_interaction(&mut self, point: Point) -> InteractionOutcome {
        let reloaded = self
            .reloader
            .reconcile(&mut self.catalog, &mut self.layout, &mut self.selection)
            .is_some();

        let count = self.catalog.count();
        let catalog = &mut self.catalog;
        let geometries = self.layout.geometries(count);
        let mut outcome = self.selection.begin_interaction(geometries, point, |i| {
            catalog.item_at(i).is_ok_and(|item| item.enabled)
        });

        outcome.should_redraw |= reloaded;
        outcome
    }

    pub fn move_interaction(&mut self, point: Point) -> InteractionOutcome {
        let count = self.catalog.count();
        let geometries = self.layout.geometries(count);
        self.selection.move_interaction(geometries, point)
    }

    /// Finishes the interaction and tells the delegate about a selection.
    pub fn end_interaction(&mut self, point: Point) -> InteractionOutcome {
        if self
            .reloader
            .reconcile(&mut self.catalog, &mut self.layout, &mut self.selection)
            .is_some()
        {
            // the reload cancelled the interaction
            return InteractionOutcome::new(true, None);
        }

        let count = self.catalog.count();
        let geometries = self.layout.geometries(count);
        let outcome = self.selection.end_interaction(geometries, point);

        if let Some(index) = outcome.selected {
            match self.delegate.as_ref().and_then(Weak::upgrade) {
                Some(delegate) => delegate.did_select_item(index),
                None => log::warn!("Item {} selected but no delegate is attached", index),
            }
            self.selection.settle();
        }
        outcome
    }

    pub fn cancel_interaction(&mut self) -> InteractionOutcome {
        self.selection.cancel_interaction()
    }

    pub fn interaction_state(&mut self, index: usize) -> Option<InteractionState> {
        let disabled = !self.item(index)?.enabled;
        let flags = InteractionFlags {
            highlighted: self.selection.is_highlighted(index),
            selected: self.selection.is_selected(index),
            disabled,
        };
        Some(flags.state())
    }

    pub fn resolved_attributes(&mut self, index: usize) -> Option<ResolvedAttributes> {
        let state = self.interaction_state(index)?;
        let item = self.catalog.cached_item(index)?;
        Some(ResolvedAttributes::resolve(&[&item.style, &self.style], state))
    }

    pub fn render_items(&mut self) -> Vec<RenderItem> {
        let count = self.catalog.count();
        (0..count)
            .filter_map(|index| self.render_item(index))
            .collect()
    }

    fn render_item(&mut self, index: usize) -> Option<RenderItem> {
        let state = self.interaction_state(index)?;
        let count = self.catalog.count();
        let geometry = *self.layout.geometries(count).get(index)?;
        let item = self.catalog.cached_item(index)?;

        Some(RenderItem {
            geometry,
            title: item.title.clone(),
            clips_image: item.clips_image,
            state,
            attributes: ResolvedAttributes::resolve(&[&item.style, &self.style], state),
        })
    }
}
