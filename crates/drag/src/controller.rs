//! The drag controller: one pointer drag at a time.
//!
//! ```text
//! Idle ──pointer down on draggable──▶ Dragging ──pointer up / leave──▶ Idle
//!                                       │  ▲
//!                                       └──┘ pointer move (throttled)
//! ```
//!
//! The controller owns only its `Option<DragSession>`. The surface and the
//! observer are passed to every [`DragController::handle`] call, so the
//! caller keeps ownership of both between events.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;
use wordweave_core::geometry::Point;

use crate::surface::{Container, ElementId, Surface};

pub const DEFAULT_MOVE_WINDOW: u32 = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Down,
    Move,
    Up,
    Leave,
}

/// A pointer event in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    /// Element under the pointer (only meaningful for `Down`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ElementId>,
    pub x: f64,
    pub y: f64,
}

impl PointerEvent {
    pub fn down(target: ElementId, x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Down,
            target: Some(target),
            x,
            y,
        }
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Move,
            target: None,
            x,
            y,
        }
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Up,
            target: None,
            x,
            y,
        }
    }

    pub fn leave(x: f64, y: f64) -> Self {
        Self {
            kind: PointerKind::Leave,
            target: None,
            x,
            y,
        }
    }
}

/// Accepts one move in every `window`, starting with the first.
#[derive(Debug, Clone, Copy)]
struct MoveThrottle {
    window: u32,
    seen: u32,
}

impl MoveThrottle {
    fn new(window: u32) -> Self {
        Self {
            window: window.max(1),
            seen: 0,
        }
    }

    fn accept(&mut self) -> bool {
        let accepted = self.seen == 0;
        self.seen = (self.seen + 1) % self.window;
        accepted
    }
}

/// State of the drag in progress.
#[derive(Debug)]
pub struct DragSession {
    element: ElementId,
    start_parent: Container,
    start_index: usize,
    grab: Point,
    throttle: MoveThrottle,
    /// Set when an `on_end` hook positioned the element itself.
    keep_absolute: AtomicBool,
}

impl Clone for DragSession {
    fn clone(&self) -> Self {
        Self {
            element: self.element,
            start_parent: self.start_parent,
            start_index: self.start_index,
            grab: self.grab,
            throttle: self.throttle,
            keep_absolute: AtomicBool::new(self.keeps_absolute()),
        }
    }
}

impl DragSession {
    pub fn element(&self) -> ElementId {
        self.element
    }

    pub fn start_parent(&self) -> Container {
        self.start_parent
    }

    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// Where inside the element the pointer grabbed it.
    pub fn grab_offset(&self) -> Point {
        self.grab
    }

    pub fn remove_absolute<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear_absolute(self.element);
    }

    /// Put the element back where the drag picked it up.
    pub fn return_to_start<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.clear_absolute(self.element);
        surface.insert(self.element, self.start_parent, self.start_index);
    }

    /// Move the element to the end of `owner`. With `save_pos` it stays
    /// where it currently is on screen, and the controller leaves that
    /// position alone when the drag ends.
    pub fn set_owner<S: Surface + ?Sized>(&self, surface: &mut S, owner: Container, save_pos: bool) {
        let rect = surface.rect(self.element);
        surface.insert(self.element, owner, usize::MAX);
        match (save_pos, rect) {
            (true, Some(rect)) => {
                let layer = surface.container_rect(Container::Layer);
                surface.set_absolute(self.element, rect.left - layer.left, rect.top - layer.top);
                self.keep_absolute();
            }
            _ => surface.clear_absolute(self.element),
        }
    }

    /// Keep the element's absolute position once the drag ends.
    pub fn keep_absolute(&self) {
        self.keep_absolute.store(true, Ordering::Relaxed);
    }

    pub fn keeps_absolute(&self) -> bool {
        self.keep_absolute.load(Ordering::Relaxed)
    }
}

/// Hooks fired over a drag's lifetime. All default to no-ops.
///
/// `on_end` runs while the drag still counts as active; this is where the
/// drop decision belongs. An element `on_end` moves out of the layer loses
/// its absolute position afterwards unless the hook called
/// [`DragSession::keep_absolute`]. `on_after_end` runs once the controller
/// is idle.
#[async_trait]
pub trait DragObserver<S: Surface + 'static>: Send {
    async fn on_start(&mut self, _session: &DragSession, _surface: &mut S) {}

    async fn on_move(&mut self, _session: &DragSession, _surface: &mut S) {}

    async fn on_end(&mut self, _session: &DragSession, _surface: &mut S) {}

    async fn on_after_end(&mut self, _session: &DragSession, _surface: &mut S) {}
}

/// What a pointer event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Ignored,
    Started(ElementId),
    Moved,
    Throttled,
    Ended(ElementId),
}

#[derive(Debug)]
pub struct DragController {
    active: Option<DragSession>,
    move_window: u32,
}

impl Default for DragController {
    fn default() -> Self {
        Self::new(DEFAULT_MOVE_WINDOW)
    }
}

impl DragController {
    pub fn new(move_window: u32) -> Self {
        Self {
            active: None,
            move_window,
        }
    }

    /// True while a drag is in progress, including during `on_end`.
    pub fn is_busy(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&DragSession> {
        self.active.as_ref()
    }

    pub async fn handle<S, O>(
        &mut self,
        event: PointerEvent,
        surface: &mut S,
        observer: &mut O,
    ) -> DragOutcome
    where
        S: Surface + 'static,
        O: DragObserver<S> + ?Sized,
    {
        match event.kind {
            PointerKind::Down => self.start(event, surface, observer).await,
            PointerKind::Move => self.pointer_move(event, surface, observer).await,
            PointerKind::Up | PointerKind::Leave => self.end(surface, observer).await,
        }
    }

    async fn start<S, O>(&mut self, event: PointerEvent, surface: &mut S, observer: &mut O) -> DragOutcome
    where
        S: Surface + 'static,
        O: DragObserver<S> + ?Sized,
    {
        if let Some(active) = &self.active {
            debug!(element = %active.element, "Drag already in progress, ignoring pointer down");
            return DragOutcome::Ignored;
        }
        let Some(element) = event.target.filter(|e| surface.is_draggable(*e)) else {
            return DragOutcome::Ignored;
        };
        let Some(rect) = surface.rect(element) else {
            return DragOutcome::Ignored;
        };

        let start_parent = surface.parent(element).unwrap_or(Container::Layer);
        let start_index = surface.index_in_parent(element).unwrap_or(0);

        let layer = surface.container_rect(Container::Layer);
        surface.insert(element, Container::Layer, usize::MAX);
        if !surface.is_absolute(element) {
            surface.set_absolute(element, rect.left - layer.left, rect.top - layer.top);
        }

        let mut session = DragSession {
            element,
            start_parent,
            start_index,
            grab: Point::new(event.x - rect.left, event.y - rect.top),
            throttle: MoveThrottle::new(self.move_window),
            keep_absolute: AtomicBool::new(false),
        };
        session.throttle.accept();
        place(&session, event, surface);
        debug!(element = %element, parent = ?start_parent, index = start_index, "Drag started");

        let session = self.active.insert(session);
        observer.on_move(session, surface).await;
        observer.on_start(session, surface).await;
        DragOutcome::Started(element)
    }

    async fn pointer_move<S, O>(
        &mut self,
        event: PointerEvent,
        surface: &mut S,
        observer: &mut O,
    ) -> DragOutcome
    where
        S: Surface + 'static,
        O: DragObserver<S> + ?Sized,
    {
        let Some(session) = self.active.as_mut() else {
            return DragOutcome::Ignored;
        };
        if !session.throttle.accept() {
            return DragOutcome::Throttled;
        }
        place(session, event, surface);
        observer.on_move(session, surface).await;
        DragOutcome::Moved
    }

    async fn end<S, O>(&mut self, surface: &mut S, observer: &mut O) -> DragOutcome
    where
        S: Surface + 'static,
        O: DragObserver<S> + ?Sized,
    {
        let Some(session) = self.active.clone() else {
            return DragOutcome::Ignored;
        };
        let element = session.element;

        observer.on_end(&session, surface).await;

        // Dropped somewhere real: back to normal flow. Left on the layer: it
        // stays where it was released.
        if !session.keeps_absolute()
            && surface.parent(element) != Some(Container::Layer)
            && surface.is_absolute(element)
        {
            surface.clear_absolute(element);
        }
        self.active = None;
        debug!(element = %element, parent = ?surface.parent(element), "Drag ended");

        observer.on_after_end(&session, surface).await;
        DragOutcome::Ended(element)
    }
}

fn place<S: Surface + ?Sized>(session: &DragSession, event: PointerEvent, surface: &mut S) {
    let layer = surface.container_rect(Container::Layer);
    surface.set_absolute(
        session.element,
        event.x - layer.left - session.grab_offset().x,
        event.y - layer.top - session.grab_offset().y,
    );
}
