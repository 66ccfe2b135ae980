//! Highlight and selection tracking for pointer interactions.
//!
//! An interaction starts on the item under the pointer, highlights it while the
//! pointer stays inside it and selects it when the pointer is released over
//! the same item. Tap selection is momentary: once reported the controller is
//! back to [`Phase::Idle`]. A separate sticky selection can be set by the host.

use crate::geometry::{ItemGeometry, Point};

/// Host-side receiver of selection events.
pub trait Delegate {
    fn did_select_item(&self, index: usize);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Highlighting(usize),
    Selected(usize),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InteractionOutcome {
    pub should_redraw: bool,
    pub selected: Option<usize>,
}

impl InteractionOutcome {
    pub fn new(should_redraw: bool, selected: Option<usize>) -> Self {
        Self {
            should_redraw,
            selected,
        }
    }
}

/// Index of the item whose region contains `point`. Overlapping regions go to
/// the closest center.
pub fn hit_test(geometries: &[ItemGeometry], point: Point) -> Option<usize> {
    geometries
        .iter()
        .filter(|g| g.contains(point))
        .min_by(|a, b| {
            a.center
                .distance(point)
                .total_cmp(&b.center.distance(point))
        })
        .map(|g| g.index)
}

#[derive(Debug, Clone, Default)]
pub struct SelectionController {
    phase: Phase,
    pressed: Option<usize>,
    highlighted: Option<usize>,
    selected: Option<usize>,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn highlighted_index(&self) -> Option<usize> {
        self.highlighted
    }

    /// The sticky selection set by the host.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn is_tracking(&self) -> bool {
        self.pressed.is_some()
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected == Some(index) || self.phase == Phase::Selected(index)
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.highlighted == Some(index)
    }

    /// Sets the sticky selection. Rejects indices outside `[0, count)`.
    pub fn set_selected_index(&mut self, index: Option<usize>, count: usize) -> bool {
        match index {
            Some(i) if i >= count => false,
            _ => {
                self.selected = index;
                true
            }
        }
    }

    fn set_highlight(&mut self, index: Option<usize>) -> bool {
        let changed = self.highlighted != index;
        self.highlighted = index;
        changed
    }

    /// Starts tracking the item under `point`. Items rejected by `accepts`
    /// (disabled ones) are never highlighted.
    pub fn begin_interaction(
        &mut self,
        geometries: &[ItemGeometry],
        point: Point,
        accepts: impl FnOnce(usize) -> bool,
    ) -> InteractionOutcome {
        let target = hit_test(geometries, point).filter(|&i| accepts(i));

        self.pressed = target;
        self.phase = target.map_or(Phase::Idle, Phase::Highlighting);
        let changed = self.set_highlight(target);

        InteractionOutcome::new(changed, None)
    }

    /// Follows the pointer while tracking: the pressed item stays highlighted
    /// only while the pointer is inside it.
    pub fn move_interaction(
        &mut self,
        geometries: &[ItemGeometry],
        point: Point,
    ) -> InteractionOutcome {
        let Some(target) = self.pressed else {
            return InteractionOutcome::default();
        };

        let inside = geometries
            .get(target)
            .is_some_and(|g| g.contains(point));
        let changed = self.set_highlight(inside.then_some(target));

        InteractionOutcome::new(changed, None)
    }

    /// Completes the interaction. Selects the pressed item when `point` still
    /// hits it; call [`settle`](Self::settle) once the selection is reported.
    pub fn end_interaction(
        &mut self,
        geometries: &[ItemGeometry],
        point: Point,
    ) -> InteractionOutcome {
        let target = self.pressed.take();
        let changed = self.set_highlight(None);

        match target.filter(|&i| hit_test(geometries, point) == Some(i)) {
            Some(index) => {
                self.phase = Phase::Selected(index);
                InteractionOutcome::new(true, Some(index))
            }
            None => {
                self.phase = Phase::Idle;
                InteractionOutcome::new(changed, None)
            }
        }
    }

    pub fn settle(&mut self) {
        if let Phase::Selected(_) = self.phase {
            self.phase = Phase::Idle;
        }
    }

    /// Abandons any interaction without selecting.
    pub fn cancel_interaction(&mut self) -> InteractionOutcome {
        self.pressed = None;
        self.phase = Phase::Idle;
        let changed = self.set_highlight(None);
        InteractionOutcome::new(changed, None)
    }

    /// Drops every index outside `[0, count)`. Returns whether anything was
    /// cleared.
    pub fn clamp_to(&mut self, count: usize) -> bool {
        let mut cleared = false;

        if self.selected.is_some_and(|i| i >= count) {
            self.selected = None;
            cleared = true;
        }

        let stale_interaction = match self.phase {
            Phase::Highlighting(i) | Phase::Selected(i) => i >= count,
            Phase::Idle => false,
        } || self.pressed.is_some_and(|i| i >= count)
            || self.highlighted.is_some_and(|i| i >= count);

        if stale_interaction {
            self.cancel_interaction();
            cleared = true;
        }

        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RingLayout;

    fn ring(count: usize) -> Vec<ItemGeometry> {
        RingLayout::new(Point::new(100.0, 100.0), 80.0)
            .geometries(count)
            .to_vec()
    }

    #[test]
    fn test_hit_test_finds_item_centers() {
        let geometries = ring(5);
        for g in &geometries {
            assert_eq!(hit_test(&geometries, g.center), Some(g.index));
        }
        assert_eq!(hit_test(&geometries, Point::new(100.0, 100.0)), None);
        assert_eq!(hit_test(&geometries, Point::new(-500.0, 0.0)), None);
    }

    #[test]
    fn test_hit_test_empty_ring() {
        assert_eq!(hit_test(&ring(0), Point::new(100.0, 100.0)), None);
        assert_eq!(hit_test(&[], Point::default()), None);
    }

    #[test]
    fn test_hit_test_prefers_closest_center() {
        let geometries = vec![
            ItemGeometry {
                index: 0,
                center: Point::new(0.0, 0.0),
                angle: 0.0,
                diameter: 20.0,
            },
            ItemGeometry {
                index: 1,
                center: Point::new(8.0, 0.0),
                angle: 0.0,
                diameter: 20.0,
            },
        ];
        assert_eq!(hit_test(&geometries, Point::new(3.0, 0.0)), Some(0));
        assert_eq!(hit_test(&geometries, Point::new(5.0, 0.0)), Some(1));
    }

    #[test]
    fn test_tap_selects_and_returns_to_idle() {
        let geometries = ring(5);
        let p = geometries[2].center;
        let mut controller = SelectionController::new();

        let begin = controller.begin_interaction(&geometries, p, |_| true);
        assert!(begin.should_redraw);
        assert_eq!(begin.selected, None);
        assert_eq!(controller.phase(), Phase::Highlighting(2));
        assert_eq!(controller.highlighted_index(), Some(2));

        let end = controller.end_interaction(&geometries, p);
        assert_eq!(end.selected, Some(2));
        assert_eq!(controller.phase(), Phase::Selected(2));
        assert!(controller.is_selected(2));

        controller.settle();
        assert_eq!(controller.phase(), Phase::Idle);
        assert_eq!(controller.highlighted_index(), None);
        assert_eq!(controller.selected_index(), None);
    }

    #[test]
    fn test_release_elsewhere_cancels() {
        let geometries = ring(5);
        let mut controller = SelectionController::new();
        controller.begin_interaction(&geometries, geometries[1].center, |_| true);

        let end = controller.end_interaction(&geometries, geometries[3].center);
        assert_eq!(end.selected, None);
        assert!(end.should_redraw);
        assert_eq!(controller.phase(), Phase::Idle);
    }

    #[test]
    fn test_drag_off_and_back() {
        let geometries = ring(4);
        let mut controller = SelectionController::new();
        controller.begin_interaction(&geometries, geometries[0].center, |_| true);

        let off = controller.move_interaction(&geometries, Point::new(100.0, 100.0));
        assert!(off.should_redraw);
        assert_eq!(controller.highlighted_index(), None);
        assert!(controller.is_tracking());

        let back = controller.move_interaction(&geometries, geometries[0].center);
        assert!(back.should_redraw);
        assert_eq!(controller.highlighted_index(), Some(0));

        let end = controller.end_interaction(&geometries, geometries[0].center);
        assert_eq!(end.selected, Some(0));
    }

    #[test]
    fn test_move_without_interaction_is_noop() {
        let geometries = ring(4);
        let mut controller = SelectionController::new();
        let outcome = controller.move_interaction(&geometries, geometries[0].center);
        assert_eq!(outcome, InteractionOutcome::default());
    }

    #[test]
    fn test_cancel_never_selects() {
        let geometries = ring(5);
        let p = geometries[1].center;
        let mut controller = SelectionController::new();
        controller.begin_interaction(&geometries, p, |_| true);

        let cancel = controller.cancel_interaction();
        assert!(cancel.should_redraw);
        assert_eq!(controller.phase(), Phase::Idle);

        assert_eq!(hit_test(&geometries, p), Some(1));
        let end = controller.end_interaction(&geometries, p);
        assert_eq!(end.selected, None);
    }

    #[test]
    fn test_rejected_item_is_not_highlighted() {
        let geometries = ring(3);
        let mut controller = SelectionController::new();
        let outcome = controller.begin_interaction(&geometries, geometries[1].center, |i| i != 1);
        assert!(!outcome.should_redraw);
        assert_eq!(controller.phase(), Phase::Idle);

        let end = controller.end_interaction(&geometries, geometries[1].center);
        assert_eq!(end.selected, None);
    }

    #[test]
    fn test_sticky_selection_bounds() {
        let mut controller = SelectionController::new();
        assert!(controller.set_selected_index(Some(4), 5));
        assert_eq!(controller.selected_index(), Some(4));
        assert!(!controller.set_selected_index(Some(5), 5));
        assert_eq!(controller.selected_index(), Some(4));
        assert!(controller.set_selected_index(None, 0));
        assert_eq!(controller.selected_index(), None);
    }

    #[test]
    fn test_clamp_drops_out_of_range_indices() {
        let geometries = ring(5);
        let mut controller = SelectionController::new();
        controller.set_selected_index(Some(4), 5);
        controller.begin_interaction(&geometries, geometries[3].center, |_| true);

        assert!(controller.clamp_to(3));
        assert_eq!(controller.selected_index(), None);
        assert_eq!(controller.highlighted_index(), None);
        assert_eq!(controller.phase(), Phase::Idle);

        controller.set_selected_index(Some(1), 3);
        assert!(!controller.clamp_to(3));
        assert_eq!(controller.selected_index(), Some(1));
    }
}
