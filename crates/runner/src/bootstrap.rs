//! Startup handshake: ask the host for data, build the run, play it.

use tokio::sync::mpsc;
use tracing::{info, warn};
use wordweave_config::AppConfig;
use wordweave_core::channel::{wait_for, MessageChannel};
use wordweave_core::error::{ChannelError, Result};
use wordweave_core::protocol::{ChildMessage, FinishReport, HostMessage, Instance};
use wordweave_core::replay::ReplayRecord;
use wordweave_drag::controller::PointerEvent;

use crate::run::{ExerciseRun, RunSettings};
use crate::words::load_word_list;

/// What the host answered `load` with.
#[derive(Debug, Clone, PartialEq)]
pub enum Launch {
    Instance(Instance),
    Replay(ReplayRecord),
}

/// Send `load` and wait for instance or replay data.
pub async fn post_load(channel: &dyn MessageChannel) -> std::result::Result<Launch, ChannelError> {
    let mut rx = channel.subscribe();
    if channel.is_standalone() {
        info!("No host attached, the run will not start");
    }
    channel.send(ChildMessage::Load).await?;
    wait_for(&mut rx, |message| match message {
        HostMessage::Instance(instance) => Some(Launch::Instance(instance)),
        HostMessage::Replay(record) => Some(Launch::Replay(record)),
        _ => None,
    })
    .await
}

/// Build the run for `launch`, filling in the configured word list when
/// the host sent no words.
pub async fn prepare(
    launch: Launch,
    config: &AppConfig,
    rng: &mut fastrand::Rng,
) -> Result<ExerciseRun> {
    let settings = RunSettings::from_config(config);
    match launch {
        Launch::Instance(mut instance) => {
            if instance.words.is_none() {
                instance.words = Some(load_word_list(&config.exercise.word_list).await?);
            }
            if config.exercise.force_easy {
                instance.easy = true;
            }
            Ok(ExerciseRun::from_instance(instance, settings, rng)?)
        }
        Launch::Replay(record) => Ok(ExerciseRun::from_replay(&record, settings)?),
    }
}

/// The whole exercise lifetime: handshake, construction, run.
///
/// A construction failure is returned without a run being played; the
/// host may send `load` data again by restarting the exercise.
pub async fn launch(
    channel: &dyn MessageChannel,
    config: &AppConfig,
    rng: &mut fastrand::Rng,
    pointer: Option<&mut mpsc::Receiver<PointerEvent>>,
) -> Result<FinishReport> {
    let launch = post_load(channel).await?;
    let mut run = match prepare(launch, config, rng).await {
        Ok(run) => run,
        Err(e) => {
            warn!(error = %e, "No run produced");
            return Err(e);
        }
    };
    Ok(run.run(channel, pointer).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use wordweave_channels::MemoryChannel;
    use wordweave_core::error::{Error, ExerciseError};
    use wordweave_core::replay::ReplayItem;
    use wordweave_core::word::Word;

    #[tokio::test]
    async fn load_is_answered_with_instance() {
        let (channel, mut host) = MemoryChannel::pair();
        let driver = async {
            assert_eq!(host.next().await, Some(ChildMessage::Load));
            host.post(HostMessage::Check);
            host.post(HostMessage::Instance(Instance {
                easy: true,
                count: 3,
                words: None,
            }));
        };
        let (launch, ()) = tokio::join!(post_load(&channel), driver);
        assert_eq!(
            launch.unwrap(),
            Launch::Instance(Instance {
                easy: true,
                count: 3,
                words: None,
            })
        );
    }

    #[tokio::test]
    async fn missing_words_fall_back_to_word_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[["ta","ble"],["ko","ra"]]"#).unwrap();
        let mut config = AppConfig::default();
        config.exercise.word_list = file.path().to_path_buf();

        let mut rng = fastrand::Rng::with_seed(3);
        let launch = Launch::Instance(Instance {
            easy: false,
            count: 5,
            words: None,
        });
        let run = prepare(launch, &config, &mut rng).await.unwrap();
        assert_eq!(run.len(), 2);
    }

    #[tokio::test]
    async fn unreadable_word_list_produces_no_run() {
        let mut config = AppConfig::default();
        config.exercise.word_list = "/nonexistent/words.json".into();
        let mut rng = fastrand::Rng::with_seed(3);
        let launch = Launch::Instance(Instance {
            easy: false,
            count: 5,
            words: None,
        });
        let err = prepare(launch, &config, &mut rng).await.unwrap_err();
        assert!(matches!(err, Error::Exercise(ExerciseError::WordSource { .. })));
    }

    #[tokio::test]
    async fn force_easy_overrides_host() {
        let mut config = AppConfig::default();
        config.exercise.force_easy = true;
        let mut rng = fastrand::Rng::with_seed(3);
        let launch = Launch::Instance(Instance {
            easy: false,
            count: 1,
            words: Some(vec![Word::new(["ta", "ble"])]),
        });
        let run = prepare(launch, &config, &mut rng).await.unwrap();
        assert!(run.is_easy());
    }

    #[tokio::test]
    async fn replay_launch_builds_replay_run() {
        let record = ReplayRecord(vec![ReplayItem {
            word: Word::new(["ta", "ble"]),
            response: vec!["ta".into(), "ble".into()],
            presentation: None,
        }]);
        let mut rng = fastrand::Rng::with_seed(3);
        let run = prepare(Launch::Replay(record), &AppConfig::default(), &mut rng)
            .await
            .unwrap();
        assert!(run.is_replay());
        assert_eq!(run.score(), 100.0);
    }
}
