//! Headless exercise board.
//!
//! An in-memory [`Surface`] with a fixed, deterministic layout: a tray row
//! with one home cell per presentation slot, an answer row that lays its
//! children out left to right, and a layer that dragged items float in.
//! Element ids are presentation slots.

use std::collections::HashMap;

use wordweave_core::geometry::{Point, Rect};
use wordweave_core::item::Mark;
use wordweave_core::response::Response;
use wordweave_core::word::Token;

use crate::controller::PointerEvent;
use crate::gesture::drag_gesture;
use crate::locator::Separator;
use crate::surface::{Container, ElementId, Surface};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub width: f64,
    pub tray_top: f64,
    pub answer_top: f64,
    pub item_height: f64,
    /// Item width per character of its label.
    pub char_width: f64,
    pub item_gap: f64,
    pub padding: f64,
}

impl Default for BoardLayout {
    fn default() -> Self {
        Self {
            width: 800.0,
            tray_top: 0.0,
            answer_top: 120.0,
            item_height: 48.0,
            char_width: 16.0,
            item_gap: 8.0,
            padding: 12.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    layout: BoardLayout,
    labels: Vec<Token>,
    draggable: bool,
    parents: Vec<Container>,
    children: HashMap<Container, Vec<ElementId>>,
    absolute: Vec<Option<Point>>,
    marks: Vec<Option<bool>>,
    separator: Option<Separator>,
}

impl Board {
    /// One item per label, each in its own tray cell.
    pub fn new(layout: BoardLayout, labels: &[Token], draggable: bool) -> Self {
        let mut children = HashMap::new();
        for slot in 0..labels.len() {
            children.insert(Container::Tray(slot), vec![ElementId(slot)]);
        }
        Self {
            layout,
            labels: labels.to_vec(),
            draggable,
            parents: (0..labels.len()).map(Container::Tray).collect(),
            children,
            absolute: vec![None; labels.len()],
            marks: vec![None; labels.len()],
            separator: None,
        }
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn label(&self, element: ElementId) -> Option<&str> {
        self.labels.get(element.0).map(String::as_str)
    }

    pub fn answer_items(&self) -> Vec<ElementId> {
        self.children(Container::Answer)
    }

    /// Labels of the answer items, in order.
    pub fn answer_tokens(&self) -> Vec<Token> {
        self.answer_items()
            .into_iter()
            .filter_map(|e| self.labels.get(e.0).cloned())
            .collect()
    }

    /// Move the response's items into the answer row, in response order.
    pub fn place(&mut self, response: &Response) {
        for slot in response.indices() {
            if slot < self.len() {
                self.insert(ElementId(slot), Container::Answer, usize::MAX);
            }
        }
    }

    /// Replace all marks. Items not listed lose theirs.
    pub fn set_marks(&mut self, marks: &[Mark]) {
        self.clear_marks();
        for mark in marks {
            if let Some(entry) = self.marks.get_mut(mark.slot) {
                *entry = Some(mark.right);
            }
        }
    }

    pub fn clear_marks(&mut self) {
        self.marks.iter_mut().for_each(|m| *m = None);
    }

    /// `Some(true)` marked right, `Some(false)` marked wrong, `None` unmarked.
    pub fn mark(&self, element: ElementId) -> Option<bool> {
        self.marks.get(element.0).copied().flatten()
    }

    pub fn separator(&self) -> Option<Separator> {
        self.separator
    }

    pub fn set_separator(&mut self, separator: Option<Separator>) {
        self.separator = separator;
    }

    /// Pointer events that drag `element` to the end of the answer row.
    pub fn plan_append(&self, element: ElementId, window: u32) -> Vec<PointerEvent> {
        let placed = self.placed_answer_rects(element);
        let left = placed
            .last()
            .map(|r| r.right() + self.layout.item_gap)
            .unwrap_or(self.layout.padding);
        self.plan_drop(element, left, window)
    }

    /// Pointer events that drag `element` into the answer row so it lands
    /// at `index` among the other answer items.
    pub fn plan_insert(&self, element: ElementId, index: usize, window: u32) -> Vec<PointerEvent> {
        let placed = self.placed_answer_rects(element);
        match placed.get(index) {
            Some(next) => self.plan_drop(element, next.left - 1.0, window),
            None => self.plan_append(element, window),
        }
    }

    /// Pointer events that drag `element` below the board and let go.
    pub fn plan_discard(&self, element: ElementId, window: u32) -> Vec<PointerEvent> {
        let Some(rect) = self.rect(element) else {
            return Vec::new();
        };
        let below = self.container_rect(Container::Answer).bottom() + self.layout.item_height * 2.0;
        drag_gesture(
            element,
            rect.center(),
            Point::new(rect.center().x, below + rect.height),
            window,
        )
    }

    /// One-line text view of both rows, for logs and the simulator.
    pub fn render(&self) -> String {
        let tray: Vec<String> = (0..self.len())
            .map(|slot| match self.children(Container::Tray(slot)).first() {
                Some(e) => format!("[{}]", self.labels[e.0]),
                None => "[  ]".to_string(),
            })
            .collect();
        let answer: Vec<String> = self
            .answer_items()
            .into_iter()
            .map(|e| {
                let suffix = match self.mark(e) {
                    Some(true) => "+",
                    Some(false) => "-",
                    None => "",
                };
                format!("[{}{}]", self.labels[e.0], suffix)
            })
            .collect();
        format!("tray: {} | answer: {}", tray.join(" "), answer.join(" "))
    }

    fn plan_drop(&self, element: ElementId, left: f64, window: u32) -> Vec<PointerEvent> {
        let Some(rect) = self.rect(element) else {
            return Vec::new();
        };
        let top = self.layout.answer_top + self.layout.padding;
        let from = rect.center();
        let to = Point::new(left + rect.width / 2.0, top + rect.height / 2.0);
        drag_gesture(element, from, to, window)
    }

    fn placed_answer_rects(&self, dragged: ElementId) -> Vec<Rect> {
        self.answer_items()
            .into_iter()
            .filter(|e| *e != dragged)
            .filter_map(|e| self.rect(e))
            .collect()
    }

    fn item_width(&self, element: ElementId) -> f64 {
        let chars = self
            .labels
            .get(element.0)
            .map(|l| l.chars().count())
            .unwrap_or(0)
            .max(1);
        chars as f64 * self.layout.char_width + self.layout.padding
    }

    fn tray_cell_left(&self, slot: usize) -> f64 {
        (0..slot).fold(self.layout.padding, |left, i| {
            left + self.item_width(ElementId(i)) + self.layout.item_gap
        })
    }

    /// Flow position of `element` among the in-flow children of `container`.
    fn flow_origin(&self, element: ElementId, container: Container) -> Point {
        let (mut left, top) = match container {
            Container::Tray(slot) => (self.tray_cell_left(slot), self.layout.tray_top),
            Container::Answer => (
                self.layout.padding,
                self.layout.answer_top + self.layout.padding,
            ),
            Container::Layer => (0.0, 0.0),
        };
        for sibling in self.children(container) {
            if sibling == element {
                break;
            }
            if self.absolute[sibling.0].is_none() {
                left += self.item_width(sibling) + self.layout.item_gap;
            }
        }
        Point::new(left, top)
    }
}

impl Surface for Board {
    fn is_draggable(&self, element: ElementId) -> bool {
        self.draggable && element.0 < self.len()
    }

    fn rect(&self, element: ElementId) -> Option<Rect> {
        let parent = *self.parents.get(element.0)?;
        let width = self.item_width(element);
        let height = self.layout.item_height;
        let origin = match self.absolute[element.0] {
            Some(offset) => {
                let layer = self.container_rect(Container::Layer);
                Point::new(layer.left + offset.x, layer.top + offset.y)
            }
            None => self.flow_origin(element, parent),
        };
        Some(Rect::new(origin.x, origin.y, width, height))
    }

    fn container_rect(&self, container: Container) -> Rect {
        let layout = &self.layout;
        match container {
            Container::Tray(slot) => Rect::new(
                self.tray_cell_left(slot),
                layout.tray_top,
                self.item_width(ElementId(slot)),
                layout.item_height,
            ),
            Container::Answer => Rect::new(
                0.0,
                layout.answer_top,
                layout.width,
                layout.item_height + layout.padding * 2.0,
            ),
            Container::Layer => Rect::new(
                0.0,
                0.0,
                layout.width,
                layout.answer_top + layout.item_height + layout.padding * 2.0,
            ),
        }
    }

    fn parent(&self, element: ElementId) -> Option<Container> {
        self.parents.get(element.0).copied()
    }

    fn children(&self, container: Container) -> Vec<ElementId> {
        self.children.get(&container).cloned().unwrap_or_default()
    }

    fn insert(&mut self, element: ElementId, container: Container, index: usize) {
        let Some(old) = self.parents.get(element.0).copied() else {
            return;
        };
        if let Some(list) = self.children.get_mut(&old) {
            list.retain(|e| *e != element);
        }
        let list = self.children.entry(container).or_default();
        let index = index.min(list.len());
        list.insert(index, element);
        self.parents[element.0] = container;
    }

    fn is_absolute(&self, element: ElementId) -> bool {
        self.absolute.get(element.0).is_some_and(Option::is_some)
    }

    fn set_absolute(&mut self, element: ElementId, left: f64, top: f64) {
        if let Some(entry) = self.absolute.get_mut(element.0) {
            *entry = Some(Point::new(left, top));
        }
    }

    fn clear_absolute(&mut self, element: ElementId) {
        if let Some(entry) = self.absolute.get_mut(element.0) {
            *entry = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wordweave_core::response::Slot;

    fn labels(tokens: &[&str]) -> Vec<Token> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn items_start_in_their_home_cells() {
        let board = Board::new(BoardLayout::default(), &labels(&["na", "ba", "na"]), true);
        for slot in 0..3 {
            assert_eq!(board.parent(ElementId(slot)), Some(Container::Tray(slot)));
            assert_eq!(
                board.rect(ElementId(slot)).unwrap(),
                board.container_rect(Container::Tray(slot))
            );
        }
        assert!(board.answer_items().is_empty());
    }

    #[test]
    fn tray_cells_do_not_overlap() {
        let board = Board::new(BoardLayout::default(), &labels(&["ta", "ble", "s"]), true);
        let a = board.rect(ElementId(0)).unwrap();
        let b = board.rect(ElementId(1)).unwrap();
        let c = board.rect(ElementId(2)).unwrap();
        assert!(a.right() < b.left);
        assert!(b.right() < c.left);
    }

    #[test]
    fn answer_row_flows_left_to_right() {
        let mut board = Board::new(BoardLayout::default(), &labels(&["na", "ba", "na"]), true);
        board.insert(ElementId(2), Container::Answer, usize::MAX);
        board.insert(ElementId(0), Container::Answer, 0);

        assert_eq!(board.answer_items(), vec![ElementId(0), ElementId(2)]);
        let first = board.rect(ElementId(0)).unwrap();
        let second = board.rect(ElementId(2)).unwrap();
        assert_eq!(first.left, board.layout().padding);
        assert_eq!(second.left, first.right() + board.layout().item_gap);
        assert!(first.intersects(&board.container_rect(Container::Answer)));
    }

    #[test]
    fn absolute_position_is_relative_to_layer() {
        let mut board = Board::new(BoardLayout::default(), &labels(&["ko"]), true);
        board.insert(ElementId(0), Container::Layer, usize::MAX);
        board.set_absolute(ElementId(0), 40.0, 70.0);
        let rect = board.rect(ElementId(0)).unwrap();
        assert_eq!((rect.left, rect.top), (40.0, 70.0));
        assert!(board.is_absolute(ElementId(0)));
    }

    #[test]
    fn place_uses_response_order() {
        let mut board = Board::new(BoardLayout::default(), &labels(&["na", "ba", "na"]), true);
        board.place(&Response::from_slots(vec![
            Slot::Resolved(1),
            Slot::Resolved(2),
            Slot::Unresolved,
        ]));
        assert_eq!(board.answer_items(), vec![ElementId(1), ElementId(2)]);
        assert_eq!(board.answer_tokens(), labels(&["ba", "na"]));
    }

    #[test]
    fn marks_replace_previous_marks() {
        let mut board = Board::new(BoardLayout::default(), &labels(&["na", "ba"]), true);
        board.set_marks(&[Mark { slot: 0, right: false }, Mark { slot: 1, right: true }]);
        assert_eq!(board.mark(ElementId(0)), Some(false));
        board.set_marks(&[Mark { slot: 1, right: true }]);
        assert_eq!(board.mark(ElementId(0)), None);
        assert_eq!(board.mark(ElementId(1)), Some(true));
    }

    #[test]
    fn planned_append_ends_over_the_answer_row() {
        let board = Board::new(BoardLayout::default(), &labels(&["na", "ba"]), true);
        let events = board.plan_append(ElementId(1), 9);
        let last_move = events[events.len() - 2];
        let answer = board.container_rect(Container::Answer);
        assert!(last_move.y > answer.top && last_move.y < answer.bottom());
    }

    #[test]
    fn render_shows_both_rows() {
        let mut board = Board::new(BoardLayout::default(), &labels(&["na", "ba"]), true);
        board.insert(ElementId(1), Container::Answer, usize::MAX);
        board.set_marks(&[Mark { slot: 1, right: true }]);
        assert_eq!(board.render(), "tray: [na] [  ] | answer: [ba+]");
    }
}
