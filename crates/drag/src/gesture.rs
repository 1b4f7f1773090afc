//! Scripted pointer gestures.

use wordweave_core::geometry::Point;

use crate::controller::PointerEvent;
use crate::surface::ElementId;

/// Press on `element` at `from`, move in `window` even steps to `to`, and
/// release there.
///
/// The controller takes the first move of every `window`, so exactly
/// `window` moves after the press make the final one land.
pub fn drag_gesture(element: ElementId, from: Point, to: Point, window: u32) -> Vec<PointerEvent> {
    let steps = window.max(1);
    let mut events = Vec::with_capacity(steps as usize + 2);
    events.push(PointerEvent::down(element, from.x, from.y));
    for step in 1..=steps {
        let t = f64::from(step) / f64::from(steps);
        events.push(PointerEvent::moved(
            from.x + (to.x - from.x) * t,
            from.y + (to.y - from.y) * t,
        ));
    }
    events.push(PointerEvent::up(to.x, to.y));
    events
}
