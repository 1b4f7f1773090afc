//! `wordweave replay` — Rebuild a recorded attempt and summarize it.

use std::path::PathBuf;

use wordweave_core::replay::ReplayRecord;
use wordweave_runner::{ExerciseRun, RunSettings};

pub async fn run(file: PathBuf, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = super::load_config()?;
    let content = tokio::fs::read_to_string(&file)
        .await
        .map_err(|e| format!("Failed to read {}: {e}", file.display()))?;
    let record: ReplayRecord = serde_json::from_str(&content)?;
    let run = ExerciseRun::from_replay(&record, RunSettings::from_config(&config))?;
    let report = run.finish_report();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("WordWeave — Replay of {}", file.display());
    println!("==========================");
    for (i, (item, answer)) in run.items().iter().zip(&report.answers).enumerate() {
        let mark = if answer.is_right { "✅" } else { "❌" };
        println!(
            "  {mark} {:>2}. {:<12} {}  [{}]",
            i + 1,
            answer.task,
            answer.user_answer,
            item.presentation().tokens().join(" ")
        );
    }
    println!("\n  Score: {:.0}", report.score);

    Ok(())
}
