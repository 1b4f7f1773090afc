//! Surface trait — what the drag controller needs from a rendered page.
//!
//! A surface owns the items and the containers they sit in. The controller
//! reads geometry and re-parents items through this trait only, so it runs
//! the same against a browser binding or the in-memory [`Board`].
//!
//! [`Board`]: crate::board::Board

use serde::{Deserialize, Serialize};
use wordweave_core::geometry::Rect;

/// A draggable item. For exercise boards this is the presentation slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub usize);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where an item can live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Container {
    /// The item's own home cell in the question tray.
    Tray(usize),
    /// The answer area items are assembled in.
    Answer,
    /// The absolute-positioning layer dragged items float in.
    Layer,
}

pub trait Surface: Send {
    /// Whether a drag may start on this element.
    fn is_draggable(&self, element: ElementId) -> bool;

    /// Current bounding rectangle of an element.
    fn rect(&self, element: ElementId) -> Option<Rect>;

    fn container_rect(&self, container: Container) -> Rect;

    fn parent(&self, element: ElementId) -> Option<Container>;

    /// Children of a container in order.
    fn children(&self, container: Container) -> Vec<ElementId>;

    /// Detach `element` and insert it into `container` at `index`; an index
    /// past the end appends.
    fn insert(&mut self, element: ElementId, container: Container, index: usize);

    fn is_absolute(&self, element: ElementId) -> bool;

    /// Position an element absolutely, relative to the layer origin.
    fn set_absolute(&mut self, element: ElementId, left: f64, top: f64);

    /// Return an element to normal flow.
    fn clear_absolute(&mut self, element: ElementId);

    fn index_in_parent(&self, element: ElementId) -> Option<usize> {
        let parent = self.parent(element)?;
        self.children(parent).iter().position(|e| *e == element)
    }
}
