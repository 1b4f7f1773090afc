//! Interactive binding of one exercise item to the drag controller.
//!
//! The response is rebuilt from the answer row when a drag starts (the
//! dragged item has just left the row) and after it ends (the drop has been
//! applied). Nothing else writes to the response while the item is active.

use async_trait::async_trait;
use tracing::{debug, warn};
use wordweave_core::channel::MessageChannel;
use wordweave_core::item::ExerciseItem;
use wordweave_core::protocol::ChildMessage;
use wordweave_core::response::Response;
use wordweave_drag::board::Board;
use wordweave_drag::controller::{DragObserver, DragSession};
use wordweave_drag::locator::{InsertionPointLocator, Separator};
use wordweave_drag::surface::{Container, Surface};

pub struct ItemSession<'a> {
    item: &'a mut ExerciseItem,
    channel: &'a dyn MessageChannel,
    easy: bool,
    locator: InsertionPointLocator,
}

impl<'a> ItemSession<'a> {
    pub fn new(
        item: &'a mut ExerciseItem,
        channel: &'a dyn MessageChannel,
        easy: bool,
        locator: InsertionPointLocator,
    ) -> Self {
        Self {
            item,
            channel,
            easy,
            locator,
        }
    }

    pub fn item(&self) -> &ExerciseItem {
        self.item
    }

    /// Show the item: marks for what is already placed, and whether the
    /// host may advance right away.
    pub async fn activate(&mut self, board: &mut Board) {
        if self.easy {
            board.set_marks(&self.item.marks());
        }
        self.send_check(self.item.is_complete()).await;
    }

    /// Rebuild the response from the answer row.
    pub fn resync(&mut self, board: &mut Board) {
        let indices = board.answer_items().into_iter().map(|e| e.0);
        let response = Response::from_indices(indices, self.item.presentation());
        self.item.set_response(response);
        if self.easy {
            board.set_marks(&self.item.marks());
        }
    }

    async fn send_check(&self, enabled: bool) {
        if let Err(e) = self.channel.send(ChildMessage::check(enabled)).await {
            warn!(error = %e, "Failed to send check state");
        }
    }

    fn locate(&self, session: &DragSession, board: &Board) -> Option<Separator> {
        let dragged = board.rect(session.element())?;
        let target = board.container_rect(Container::Answer);
        let placed: Vec<_> = board
            .answer_items()
            .into_iter()
            .filter_map(|e| board.rect(e))
            .collect();
        self.locator.locate(&dragged, &target, &placed)
    }
}

#[async_trait]
impl<'a> DragObserver<Board> for ItemSession<'a> {
    async fn on_start(&mut self, _session: &DragSession, board: &mut Board) {
        self.resync(board);
        // A drag is in progress, so advancing is never allowed here.
        self.send_check(false).await;
    }

    async fn on_move(&mut self, session: &DragSession, board: &mut Board) {
        let separator = self.locate(session, board);
        board.set_separator(separator);
    }

    async fn on_end(&mut self, session: &DragSession, board: &mut Board) {
        if let Some(separator) = self.locate(session, board) {
            session.remove_absolute(board);
            board.insert(session.element(), Container::Answer, separator.index);
            debug!(element = %session.element(), index = separator.index, "Dropped into answer");
        }
        board.set_separator(None);
    }

    async fn on_after_end(&mut self, _session: &DragSession, board: &mut Board) {
        self.resync(board);
        self.send_check(self.item.is_complete()).await;
    }
}
