//! `wordweave serve` — Run the exercise for an external host.

use tracing::info;
use wordweave_channels::{StandaloneChannel, StdioChannel};
use wordweave_runner::launch;

pub async fn run(standalone: bool, seed: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let mut rng = super::rng(seed);

    if standalone {
        let channel = StandaloneChannel::new();
        launch(&channel, &config, &mut rng, None).await?;
        return Ok(());
    }

    let (channel, reader) = StdioChannel::stdio();
    info!("Serving over stdio");

    tokio::select! {
        biased;

        result = launch(&channel, &config, &mut rng, None) => {
            let report = result?;
            info!(score = report.score, "Exercise finished");
        }
        _ = reader => {
            info!("Host went away before the run finished");
        }
    }

    Ok(())
}
