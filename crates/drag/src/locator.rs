//! Insertion-point locator: turn a dragged rectangle into a discrete slot.
//!
//! Placed items are scanned left to right. The dragged item lands before the
//! first placed item whose left edge lies strictly to the right of its own
//! left edge, or at the end when there is none.

use serde::{Deserialize, Serialize};
use wordweave_core::geometry::Rect;

pub const DEFAULT_SEPARATOR_MARGIN: f64 = 8.0;

/// Where a dragged item would land, and where its marker goes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Separator {
    pub index: usize,
    /// Horizontal marker position. `None` at index 0, which needs no marker.
    pub left: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InsertionPointLocator {
    margin: f64,
}

impl Default for InsertionPointLocator {
    fn default() -> Self {
        Self::new(DEFAULT_SEPARATOR_MARGIN)
    }
}

impl InsertionPointLocator {
    pub fn new(margin: f64) -> Self {
        Self { margin }
    }

    /// Insertion index for `dragged` among `placed` (the dragged item excluded).
    pub fn index(&self, dragged: &Rect, placed: &[Rect]) -> usize {
        placed
            .iter()
            .position(|r| dragged.left < r.left)
            .unwrap_or(placed.len())
    }

    /// Marker position for an insertion at `index`.
    pub fn separator_left(&self, index: usize, placed: &[Rect]) -> Option<f64> {
        if index == 0 {
            return None;
        }
        match placed.get(index) {
            Some(next) => Some(next.left - self.margin),
            None => placed.last().map(|last| last.right() + self.margin),
        }
    }

    /// Full lookup for one drag-move. `None` when the dragged item is not
    /// over the target container, which clears any marker.
    pub fn locate(&self, dragged: &Rect, target: &Rect, placed: &[Rect]) -> Option<Separator> {
        if !dragged.intersects(target) {
            return None;
        }
        let index = self.index(dragged, placed);
        Some(Separator {
            index,
            left: self.separator_left(index, placed),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(lefts: &[f64]) -> Vec<Rect> {
        lefts
            .iter()
            .map(|left| Rect::new(*left, 100.0, 40.0, 30.0))
            .collect()
    }

    fn dragged_at(left: f64) -> Rect {
        Rect::new(left, 100.0, 40.0, 30.0)
    }

    #[test]
    fn lands_before_first_item_to_the_right() {
        let locator = InsertionPointLocator::default();
        assert_eq!(locator.index(&dragged_at(60.0), &placed(&[0.0, 50.0, 100.0])), 2);
    }

    #[test]
    fn appends_past_the_last_item() {
        let locator = InsertionPointLocator::default();
        assert_eq!(locator.index(&dragged_at(150.0), &placed(&[0.0, 50.0, 100.0])), 3);
    }

    #[test]
    fn equal_left_edge_does_not_count_as_right_of() {
        let locator = InsertionPointLocator::default();
        assert_eq!(locator.index(&dragged_at(50.0), &placed(&[0.0, 50.0, 100.0])), 2);
    }

    #[test]
    fn empty_target_appends_at_zero() {
        let locator = InsertionPointLocator::default();
        assert_eq!(locator.index(&dragged_at(10.0), &[]), 0);
    }

    #[test]
    fn separator_sits_left_of_next_item() {
        let locator = InsertionPointLocator::new(8.0);
        let items = placed(&[0.0, 50.0, 100.0]);
        assert_eq!(locator.separator_left(2, &items), Some(92.0));
    }

    #[test]
    fn separator_sits_right_of_last_item_when_appending() {
        let locator = InsertionPointLocator::new(8.0);
        let items = placed(&[0.0, 50.0, 100.0]);
        // last item spans 100..140
        assert_eq!(locator.separator_left(3, &items), Some(148.0));
    }

    #[test]
    fn no_separator_at_index_zero() {
        let locator = InsertionPointLocator::default();
        let items = placed(&[20.0]);
        let sep = locator
            .locate(&dragged_at(0.0), &Rect::new(0.0, 90.0, 400.0, 60.0), &items)
            .unwrap();
        assert_eq!(sep.index, 0);
        assert_eq!(sep.left, None);
    }

    #[test]
    fn outside_target_clears_separator() {
        let locator = InsertionPointLocator::default();
        let target = Rect::new(0.0, 90.0, 400.0, 60.0);
        let far_away = Rect::new(10.0, 400.0, 40.0, 30.0);
        assert_eq!(locator.locate(&far_away, &target, &placed(&[0.0])), None);
    }
}
