//! Progress tracking and reporting.
//!
//! `available` is a high-water mark of the items the user has reached, so
//! host navigation never loses ground. In replay mode every item is
//! available from the start.

use tracing::debug;
use wordweave_core::channel::MessageChannel;
use wordweave_core::error::ChannelError;
use wordweave_core::protocol::{ChildMessage, ProgressReport};

use crate::signal::JumpSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressState {
    /// 1-based index of the active item; 0 before the first item.
    pub current: usize,
    pub total: usize,
    pub available: usize,
    pub replay_unlocked: bool,
}

#[derive(Debug)]
pub struct ProgressReporter {
    state: ProgressState,
}

impl ProgressReporter {
    pub fn new(total: usize, replay: bool) -> Self {
        Self {
            state: ProgressState {
                current: 0,
                total,
                available: if replay { total } else { 0 },
                replay_unlocked: replay,
            },
        }
    }

    pub fn state(&self) -> ProgressState {
        self.state
    }

    pub fn set_current(&mut self, current: usize) {
        self.state.current = current;
        self.state.available = if self.state.replay_unlocked {
            self.state.total
        } else {
            self.state.available.max(current)
        };
    }

    pub fn report(&self, correctness: Option<Vec<bool>>) -> ProgressReport {
        ProgressReport {
            available: self.state.available,
            current: self.state.current,
            total: self.state.total,
            replay: correctness,
        }
    }

    /// Move to `current` and tell the host.
    pub async fn publish(
        &mut self,
        channel: &dyn MessageChannel,
        current: usize,
        correctness: Option<Vec<bool>>,
    ) -> Result<(), ChannelError> {
        self.set_current(current);
        let report = self.report(correctness);
        debug!(
            current = report.current,
            available = report.available,
            total = report.total,
            "Reporting progress"
        );
        channel.send(ChildMessage::Progress(report)).await
    }

    /// Listen for the host's jump requests.
    pub fn jumps(channel: &dyn MessageChannel) -> JumpSignal {
        JumpSignal::subscribe(channel)
    }
}
