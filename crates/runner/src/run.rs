//! The exercise run loop.
//!
//! Items are visited by position. For every item the loop reports progress,
//! activates the item, then feeds pointer events to the drag controller
//! until the host either advances (`check`) or jumps (`progress`). A jump
//! to `n` makes item `n` the next one visited. After the last item the
//! finish report goes to the host.

use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use wordweave_config::AppConfig;
use wordweave_core::channel::MessageChannel;
use wordweave_core::error::{ChannelError, ExerciseError};
use wordweave_core::item::{AnswerSummary, ExerciseItem};
use wordweave_core::protocol::{ChildMessage, FinishReport, Instance};
use wordweave_core::replay::{ReplayItem, ReplayRecord};
use wordweave_drag::board::{Board, BoardLayout};
use wordweave_drag::controller::{DragController, PointerEvent};
use wordweave_drag::locator::InsertionPointLocator;

use crate::progress::ProgressReporter;
use crate::session::ItemSession;
use crate::signal::{AdvanceSignal, Signal};

/// Tuning for run construction and interaction.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    pub reshuffle_attempts: usize,
    pub move_window: u32,
    pub separator_margin: f64,
    pub layout: BoardLayout,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            reshuffle_attempts: wordweave_core::word::DEFAULT_RESHUFFLE_ATTEMPTS,
            move_window: wordweave_drag::DEFAULT_MOVE_WINDOW,
            separator_margin: wordweave_drag::locator::DEFAULT_SEPARATOR_MARGIN,
            layout: BoardLayout::default(),
        }
    }
}

impl RunSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        let layout = &config.layout;
        Self {
            reshuffle_attempts: config.exercise.reshuffle_attempts,
            move_window: config.drag.move_window,
            separator_margin: config.drag.separator_margin,
            layout: BoardLayout {
                width: layout.width,
                tray_top: layout.tray_top,
                answer_top: layout.answer_top,
                item_height: layout.item_height,
                char_width: layout.char_width,
                item_gap: layout.item_gap,
                padding: layout.padding,
            },
        }
    }
}

#[derive(Debug)]
pub struct ExerciseRun {
    items: Vec<ExerciseItem>,
    easy: bool,
    replay: bool,
    settings: RunSettings,
}

impl ExerciseRun {
    /// A fresh run: `count` words drawn from a shuffle of the instance's
    /// word list, each with its own shuffled presentation.
    pub fn from_instance(
        instance: Instance,
        settings: RunSettings,
        rng: &mut fastrand::Rng,
    ) -> Result<Self, ExerciseError> {
        let mut words: Vec<_> = instance
            .words
            .unwrap_or_default()
            .into_iter()
            .filter(|w| !w.is_empty())
            .collect();
        if words.is_empty() {
            return Err(ExerciseError::NoWords);
        }

        rng.shuffle(&mut words);
        words.truncate(instance.count);
        if words.is_empty() {
            return Err(ExerciseError::EmptyRun);
        }

        let items = words
            .into_iter()
            .map(|word| ExerciseItem::new(word, rng, settings.reshuffle_attempts))
            .collect();
        Ok(Self {
            items,
            easy: instance.easy,
            replay: false,
            settings,
        })
    }

    /// A read-only run rebuilt from a recorded attempt.
    pub fn from_replay(record: &ReplayRecord, settings: RunSettings) -> Result<Self, ExerciseError> {
        if record.is_empty() {
            return Err(ExerciseError::EmptyRun);
        }
        Ok(Self {
            items: record.items().iter().map(ExerciseItem::from_replay).collect(),
            easy: false,
            replay: true,
            settings,
        })
    }

    pub fn items(&self) -> &[ExerciseItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_easy(&self) -> bool {
        self.easy
    }

    pub fn is_replay(&self) -> bool {
        self.replay
    }

    /// Percentage of items answered right.
    pub fn score(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        let correct = self.items.iter().filter(|i| i.is_right()).count();
        correct as f64 / self.items.len() as f64 * 100.0
    }

    pub fn to_answers(&self) -> Vec<AnswerSummary> {
        self.items.iter().map(ExerciseItem::summary).collect()
    }

    pub fn to_replay(&self) -> ReplayRecord {
        ReplayRecord(self.items.iter().map(ExerciseItem::to_replay).collect::<Vec<ReplayItem>>())
    }

    /// Per-item correctness, reported with progress in replay mode only.
    pub fn to_boolean_array(&self) -> Option<Vec<bool>> {
        self.replay
            .then(|| self.items.iter().map(ExerciseItem::is_right).collect())
    }

    pub fn finish_report(&self) -> FinishReport {
        FinishReport {
            score: self.score(),
            answers: self.to_answers(),
        }
    }

    /// Drive the run to completion.
    ///
    /// `pointer` carries the user's pointer events; without it the items
    /// keep whatever response they already have.
    pub async fn run(
        &mut self,
        channel: &dyn MessageChannel,
        mut pointer: Option<&mut mpsc::Receiver<PointerEvent>>,
    ) -> Result<FinishReport, ChannelError> {
        let total = self.items.len();
        let mut progress = ProgressReporter::new(total, self.replay);
        let locator = InsertionPointLocator::new(self.settings.separator_margin);
        let mut pointer_open = pointer.is_some();

        info!(total, easy = self.easy, replay = self.replay, "Run started");

        let mut index = 0;
        while index < total {
            let correctness = self.to_boolean_array();
            let item = &mut self.items[index];

            let mut board = Board::new(self.settings.layout, item.presentation().tokens(), !self.replay);
            board.place(item.response());
            let mut controller = DragController::new(self.settings.move_window);

            // Listen before reporting so an immediate answer is not lost.
            let mut advance = AdvanceSignal::subscribe(channel);
            let mut jump = ProgressReporter::jumps(channel);
            progress.publish(channel, index + 1, correctness).await?;

            let mut session = ItemSession::new(item, channel, self.easy, locator);
            session.activate(&mut board).await;
            debug!(current = index + 1, board = %board.render(), "Item active");

            let signal = loop {
                tokio::select! {
                    biased;

                    event = next_pointer(&mut pointer), if pointer_open => match event {
                        Some(event) => {
                            controller.handle(event, &mut board, &mut session).await;
                        }
                        None => {
                            debug!("Pointer input closed");
                            pointer_open = false;
                        }
                    },
                    result = advance.wait() => {
                        result?;
                        break Signal::Advance;
                    }
                    result = jump.wait() => {
                        break Signal::Jump(result?);
                    }
                }
            };
            drop(advance);
            drop(jump);

            if controller.is_busy() {
                debug!("Leaving item with a drag in progress");
            }
            debug!(current = index + 1, board = %board.render(), "Item left");
            channel.send(ChildMessage::check(false)).await?;

            index = match signal {
                Signal::Advance => index + 1,
                Signal::Jump(target) => {
                    let clamped = target.clamp(1, total);
                    if clamped != target {
                        warn!(target, total, "Jump target out of range, clamped");
                    }
                    info!(from = index + 1, to = clamped, "Jumping");
                    clamped - 1
                }
            };
        }

        let report = self.finish_report();
        info!(score = report.score, total, "Run finished");
        channel.send(ChildMessage::Finish(report.clone())).await?;
        Ok(report)
    }
}

async fn next_pointer(pointer: &mut Option<&mut mpsc::Receiver<PointerEvent>>) -> Option<PointerEvent> {
    match pointer {
        Some(rx) => rx.recv().await,
        None => None,
    }
}
