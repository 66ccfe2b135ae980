use super::model::RingState;
use super::{HUB_RADIUS_FACTOR, ICON_FILL};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use ringview::geometry::{Point, Rect};
use ringview::{Font, RenderItem};
use std::f64::consts::PI;

struct ItemRenderer<'a> {
    item: &'a RenderItem,
    font: &'a Font,
    pixbuf: Option<Pixbuf>,
}

impl<'a> ItemRenderer<'a> {
    fn new(item: &'a RenderItem, font: &'a Font, pixbuf: Option<Pixbuf>) -> Self {
        Self { item, font, pixbuf }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_circle(cr, colors)?;
        self.draw_content(cr, colors)?;
        Ok(())
    }

    fn circle_path(&self, cr: &Context) {
        let g = &self.item.geometry;
        cr.arc(g.center.x, g.center.y, g.radius(), 0.0, 2.0 * PI);
    }

    fn draw_circle(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let color: Srgba<f64> = self
            .item
            .attributes
            .item_color
            .map(Into::into)
            .unwrap_or_else(|| colors.item(self.item.state));
        let (r, g, b, a) = color.into_components();
        cr.set_source_rgba(r, g, b, a);
        self.circle_path(cr);
        cr.fill()
    }

    fn draw_content(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        if let Some(pixbuf) = &self.pixbuf {
            self.draw_icon(cr, pixbuf)
        } else if !self.item.title.is_empty() {
            self.draw_text(cr, colors)
        } else {
            Ok(())
        }
    }

    fn draw_icon(&self, cr: &Context, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
        let (width, height) = (pixbuf.width() as f64, pixbuf.height() as f64);
        let (rect, icon_scale) = icon_rect(self.item.geometry.bounding_box(), width, height);

        cr.save()?;
        if self.item.clips_image {
            self.circle_path(cr);
            cr.clip();
        }
        cr.translate(rect.origin.x, rect.origin.y);
        cr.scale(icon_scale, icon_scale);
        cr.set_source_pixbuf(pixbuf, 0.0, 0.0);
        cr.paint()?;
        cr.restore()
    }

    fn draw_text(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let color: Srgba<f64> = self
            .item
            .attributes
            .title_color
            .map(Into::into)
            .unwrap_or(colors.title);
        let (r, g, b, a) = color.into_components();
        cr.set_source_rgba(r, g, b, a);

        let weight = if self.font.bold {
            cairo::FontWeight::Bold
        } else {
            cairo::FontWeight::Normal
        };
        cr.select_font_face(self.font.family.as_str(), cairo::FontSlant::Normal, weight);
        cr.set_font_size(self.font.size);

        let text = self.item.title.as_str();
        let center = self.item.geometry.center;
        if let Ok(ext) = cr.text_extents(text) {
            cr.move_to(
                center.x - ext.width() / 2.0 - ext.x_bearing(),
                center.y - ext.height() / 2.0 - ext.y_bearing(),
            );
            cr.show_text(text)?;
        }
        Ok(())
    }
}

/// Fits a `width`×`height` image into the middle of an item's bounding box.
/// Returns the target rect and the scale applied to the image.
fn icon_rect(bounds: Rect, width: f64, height: f64) -> (Rect, f64) {
    let longest = width.max(height).max(1.0);
    let scale = bounds.width.min(bounds.height) * ICON_FILL / longest;
    let (w, h) = (width * scale, height * scale);
    let origin = Point::new(
        bounds.origin.x + (bounds.width - w) / 2.0,
        bounds.origin.y + (bounds.height - h) / 2.0,
    );
    (Rect::new(origin, w, h), scale)
}

pub fn draw(cr: &Context, state: &mut RingState, colors: &ThemeColors) -> Result<(), cairo::Error> {
    draw_hub(cr, state, colors)?;

    let font = state.view.font().clone();
    for item in state.view.render_items() {
        let pixbuf = item
            .attributes
            .image
            .as_ref()
            .and_then(|image| state.pixbuf(image));
        ItemRenderer::new(&item, &font, pixbuf).draw(cr, colors)?;
    }
    Ok(())
}

fn draw_hub(cr: &Context, state: &RingState, colors: &ThemeColors) -> Result<(), cairo::Error> {
    let layout = state.view.layout();
    let (r, g, b, a) = colors.center_circle.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.arc(
        layout.center().x,
        layout.center().y,
        layout.radius() * HUB_RADIUS_FACTOR,
        0.0,
        2.0 * PI,
    );
    cr.fill()
}
