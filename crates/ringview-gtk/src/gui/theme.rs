use gtk::gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;
use ringview::InteractionState;

/// Fallback colors taken from the GTK theme, used whenever the ring's styles
/// leave an attribute unset.
pub struct ThemeColors {
    pub normal: Srgba<f64>,
    pub highlighted: Srgba<f64>,
    pub selected: Srgba<f64>,
    pub disabled: Srgba<f64>,
    pub title: Srgba<f64>,
    pub center_circle: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            normal: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.15, 0.15, 0.15, 0.5),
                Some(0.5),
            ),
            highlighted: Self::lookup_color(
                context,
                "theme_selected_bg_color",
                Srgba::new(0.4, 0.4, 0.8, 0.9),
                Some(0.9),
            ),
            selected: Self::lookup_color(
                context,
                "accent_bg_color",
                Srgba::new(0.23, 0.48, 0.84, 0.9),
                Some(0.9),
            ),
            disabled: Self::lookup_color(
                context,
                "insensitive_bg_color",
                Srgba::new(0.15, 0.15, 0.15, 0.25),
                Some(0.25),
            ),
            title: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(1.0, 1.0, 1.0, 1.0),
                None,
            ),
            center_circle: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.2, 0.2, 0.2, 0.15),
                Some(0.1),
            ),
        }
    }

    pub fn item(&self, state: InteractionState) -> Srgba<f64> {
        match state {
            InteractionState::Normal => self.normal,
            InteractionState::Highlighted => self.highlighted,
            InteractionState::Selected => self.selected,
            InteractionState::Disabled => self.disabled,
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.ringview-window, .ringview-drawing-area {
    background: none;
    background-color: transparent;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
