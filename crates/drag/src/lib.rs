//! # WordWeave Drag
//!
//! Pointer-driven drag and drop for exercise items.
//!
//! - [`controller`] — the single-active-drag state machine and its hooks
//! - [`locator`] — maps a dragged rectangle to an insertion index
//! - [`surface`] — what the controller needs from a rendered page
//! - [`board`] — a headless surface with a fixed layout
//! - [`gesture`] — scripted pointer sequences

pub mod board;
pub mod controller;
pub mod gesture;
pub mod locator;
pub mod surface;

pub use board::{Board, BoardLayout};
pub use controller::{
    DragController, DragObserver, DragOutcome, DragSession, PointerEvent, PointerKind,
    DEFAULT_MOVE_WINDOW,
};
pub use gesture::drag_gesture;
pub use locator::{InsertionPointLocator, Separator};
pub use surface::{Container, ElementId, Surface};
