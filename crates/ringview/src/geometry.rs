//! Ring geometry.
//!
//! Item `i` of `n` sits at `start_angle + i * 2π/n` on a circle of `radius`
//! around `center`. Angles are in radians, measured clockwise from the
//! positive x axis in screen coordinates (y grows downwards), so the default
//! start angle of `-π/2` puts item 0 at the top.

use serde::Serialize;
use std::f64::consts::PI;

pub const DEFAULT_START_ANGLE: f64 = -PI / 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// The point `distance` away from `self` in direction `angle`.
    pub fn offset(&self, distance: f64, angle: f64) -> Self {
        Self::new(
            self.x + distance * angle.cos(),
            self.y + distance * angle.sin(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(origin: Point, width: f64, height: f64) -> Self {
        Self {
            origin,
            width,
            height,
        }
    }
}

/// Position and extent of one item on the ring.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemGeometry {
    pub index: usize,
    pub center: Point,
    pub angle: f64,
    pub diameter: f64,
}

impl ItemGeometry {
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Hit region: the circle inscribed in the bounding box.
    pub fn contains(&self, point: Point) -> bool {
        self.center.distance(point) <= self.radius()
    }

    pub fn bounding_box(&self) -> Rect {
        let r = self.radius();
        Rect::new(
            Point::new(self.center.x - r, self.center.y - r),
            self.diameter,
            self.diameter,
        )
    }
}

pub fn angle_step(count: usize) -> f64 {
    if count == 0 {
        0.0
    } else {
        2.0 * PI / count as f64
    }
}

pub fn angle(index: usize, count: usize, start_angle: f64) -> f64 {
    start_angle + index as f64 * angle_step(count)
}

pub fn positions(count: usize, radius: f64, center: Point, start_angle: f64) -> Vec<Point> {
    let radius = radius.max(0.0);
    (0..count)
        .map(|i| center.offset(radius, angle(i, count, start_angle)))
        .collect()
}

/// Largest item diameter that keeps neighbouring items from overlapping: the
/// chord between two adjacent centers, `2r·sin(π/n)`. A lone item may span the
/// whole ring.
pub fn item_size(count: usize, radius: f64) -> f64 {
    let radius = radius.max(0.0);
    match count {
        0 => 0.0,
        1 => 2.0 * radius,
        n => 2.0 * radius * (PI / n as f64).sin(),
    }
}

/// Largest ring radius whose items (scaled by `item_scale`) stay inside a
/// square of half-side `half_extent` centered on the ring.
pub fn fit_radius(count: usize, half_extent: f64, item_scale: f64) -> f64 {
    let half_extent = half_extent.max(0.0);
    let spread = match count {
        0 => 0.0,
        1 => 1.0,
        n => (PI / n as f64).sin(),
    };
    half_extent / (1.0 + spread * clamp_scale(item_scale))
}

fn clamp_scale(item_scale: f64) -> f64 {
    if item_scale.is_nan() {
        1.0
    } else {
        item_scale.clamp(f64::EPSILON, 1.0)
    }
}

#[derive(Debug, Clone)]
struct LayoutCache {
    count: usize,
    geometries: Vec<ItemGeometry>,
}

/// Lazily computed ring layout.
///
/// Geometry is rebuilt on the first query after the item count, the frame, the
/// start angle or the item scale changes.
#[derive(Debug, Clone)]
pub struct RingLayout {
    center: Point,
    radius: f64,
    start_angle: f64,
    item_scale: f64,
    cache: Option<LayoutCache>,
}

impl RingLayout {
    pub fn new(center: Point, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            start_angle: DEFAULT_START_ANGLE,
            item_scale: 1.0,
            cache: None,
        }
    }

    pub fn with_start_angle(mut self, start_angle: f64) -> Self {
        self.set_start_angle(start_angle);
        self
    }

    pub fn with_item_scale(mut self, item_scale: f64) -> Self {
        self.set_item_scale(item_scale);
        self
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn start_angle(&self) -> f64 {
        self.start_angle
    }

    pub fn item_scale(&self) -> f64 {
        self.item_scale
    }

    pub fn set_center(&mut self, center: Point) {
        if self.center != center {
            self.center = center;
            self.invalidate();
        }
    }

    pub fn set_radius(&mut self, radius: f64) {
        let radius = radius.max(0.0);
        if self.radius != radius {
            self.radius = radius;
            self.invalidate();
        }
    }

    pub fn set_start_angle(&mut self, start_angle: f64) {
        if self.start_angle != start_angle {
            self.start_angle = start_angle;
            self.invalidate();
        }
    }

    pub fn set_item_scale(&mut self, item_scale: f64) {
        let item_scale = clamp_scale(item_scale);
        if self.item_scale != item_scale {
            self.item_scale = item_scale;
            self.invalidate();
        }
    }

    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    pub fn is_cached(&self) -> bool {
        self.cache.is_some()
    }

    pub fn item_diameter(&self, count: usize) -> f64 {
        item_size(count, self.radius) * self.item_scale
    }

    pub fn geometries(&mut self, count: usize) -> &[ItemGeometry] {
        let stale = self.cache.as_ref().is_none_or(|c| c.count != count);
        if stale {
            log::debug!("Recomputing ring layout for {} items", count);
            let geometries = self.compute(count);
            self.cache = Some(LayoutCache { count, geometries });
        }
        self.cache
            .as_ref()
            .map(|c| c.geometries.as_slice())
            .unwrap_or_default()
    }

    fn compute(&self, count: usize) -> Vec<ItemGeometry> {
        let diameter = self.item_diameter(count);
        positions(count, self.radius, self.center, self.start_angle)
            .into_iter()
            .enumerate()
            .map(|(index, center)| ItemGeometry {
                index,
                center,
                angle: angle(index, count, self.start_angle),
                diameter,
            })
            .collect()
    }
}
