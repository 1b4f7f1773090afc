//! Scripted answers: pointer gestures that assemble an item on a fresh board.

use wordweave_core::item::ExerciseItem;
use wordweave_core::response::Response;
use wordweave_core::word::Token;
use wordweave_drag::board::{Board, BoardLayout};
use wordweave_drag::controller::PointerEvent;
use wordweave_drag::surface::{Container, ElementId, Surface};

/// Presentation slots in the order that spells the word.
pub fn solution(item: &ExerciseItem) -> Vec<usize> {
    Response::resolve(item.word().tokens(), item.presentation())
        .indices()
        .collect()
}

/// A wrong but complete arrangement: the solution with its first token
/// swapped for the first later token that differs. `None` when every
/// arrangement reads the same.
pub fn mistake(item: &ExerciseItem) -> Option<Vec<usize>> {
    let mut order = solution(item);
    let presentation = item.presentation();
    let first = presentation.get(*order.first()?)?;
    let other = order
        .iter()
        .position(|slot| presentation.get(*slot) != Some(first))?;
    order.swap(0, other);
    Some(order)
}

/// Drag every slot of `order` to the end of the answer row, in turn.
pub fn gestures(
    presentation: &[Token],
    order: &[usize],
    layout: BoardLayout,
    window: u32,
) -> Vec<PointerEvent> {
    let mut board = Board::new(layout, presentation, true);
    let mut events = Vec::new();
    for slot in order {
        let element = ElementId(*slot);
        events.extend(board.plan_append(element, window));
        board.insert(element, Container::Answer, usize::MAX);
    }
    events
}
