//! `wordweave simulate` — Play a run against a scripted in-process host.
//!
//! The host answers `load` with an instance, drags every item's syllables
//! into place as soon as the item is shown, and presses check whenever the
//! exercise enables it.

use std::path::PathBuf;

use tokio::sync::mpsc;
use tracing::{debug, info};
use wordweave_channels::{HostHandle, MemoryChannel};
use wordweave_core::protocol::{ChildMessage, FinishReport, HostMessage, Instance};
use wordweave_drag::controller::PointerEvent;
use wordweave_runner::autoplay::{gestures, mistake, solution};
use wordweave_runner::{post_load, prepare, RunSettings};

pub struct SimulateOptions {
    pub count: Option<usize>,
    pub easy: bool,
    pub words: Option<PathBuf>,
    pub mistakes: usize,
    pub seed: Option<u64>,
}

pub async fn run(options: SimulateOptions) -> Result<(), Box<dyn std::error::Error>> {
    let SimulateOptions {
        count,
        easy,
        words,
        mistakes,
        seed,
    } = options;

    let mut config = super::load_config()?;
    if let Some(words) = words {
        config.exercise.word_list = words;
    }
    let count = count.unwrap_or(config.exercise.default_count);
    let mut rng = super::rng(seed);
    let (channel, mut host) = MemoryChannel::pair();

    let answer_load = async {
        host.next_where(|m| matches!(m, ChildMessage::Load).then_some(()))
            .await;
        host.post(HostMessage::Instance(Instance {
            easy,
            count,
            words: None,
        }));
    };
    let (launch, ()) = tokio::join!(post_load(&channel), answer_load);
    let mut run = prepare(launch?, &config, &mut rng).await?;

    let settings = RunSettings::from_config(&config);
    let plans: Vec<Vec<PointerEvent>> = run
        .items()
        .iter()
        .enumerate()
        .map(|(i, item)| {
            let order = if i < mistakes {
                mistake(item).unwrap_or_else(|| solution(item))
            } else {
                solution(item)
            };
            gestures(
                item.presentation().tokens(),
                &order,
                settings.layout,
                settings.move_window,
            )
        })
        .collect();

    let (pointer_tx, mut pointer_rx) = mpsc::channel(256);
    let (result, finish) = tokio::join!(
        run.run(&channel, Some(&mut pointer_rx)),
        drive(&mut host, plans, pointer_tx)
    );
    let report = result?;
    if finish.as_ref() != Some(&report) {
        return Err("host did not receive the finish report".into());
    }

    print_report(&report);
    Ok(())
}

/// Play the host side until the finish report arrives.
async fn drive(
    host: &mut HostHandle,
    plans: Vec<Vec<PointerEvent>>,
    pointer: mpsc::Sender<PointerEvent>,
) -> Option<FinishReport> {
    let mut played = vec![false; plans.len()];
    while let Some(message) = host.next().await {
        match message {
            ChildMessage::Progress(progress) => {
                let index = progress.current.saturating_sub(1);
                info!(current = progress.current, total = progress.total, "Item shown");
                if played.get(index) == Some(&false) {
                    played[index] = true;
                    for event in &plans[index] {
                        if pointer.send(*event).await.is_err() {
                            return None;
                        }
                    }
                }
            }
            ChildMessage::Check(state) => {
                debug!(enabled = state.enabled, "Check state");
                if state.enabled {
                    host.trigger_check();
                }
            }
            ChildMessage::Finish(report) => return Some(report),
            ChildMessage::Load => {}
        }
    }
    None
}

fn print_report(report: &FinishReport) {
    println!("WordWeave — Simulated run");
    println!("=========================");
    for answer in &report.answers {
        if answer.is_right {
            println!("  ✅ {:<12} {}", answer.task, answer.user_answer);
        } else {
            println!(
                "  ❌ {:<12} {}  (expected {})",
                answer.task, answer.user_answer, answer.correct_answer
            );
        }
    }
    println!("\n  Score: {:.0}", report.score);
}
