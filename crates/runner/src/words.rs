//! Fallback word list: a JSON array of syllable arrays.
//!
//! ```json
//! [["ba", "na", "na"], ["ta", "ble"]]
//! ```

use std::path::Path;

use tracing::info;
use wordweave_core::error::ExerciseError;
use wordweave_core::word::Word;

pub async fn load_word_list(path: &Path) -> Result<Vec<Word>, ExerciseError> {
    let source_error = |reason: String| ExerciseError::WordSource {
        path: path.display().to_string(),
        reason,
    };

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| source_error(e.to_string()))?;
    let words: Vec<Word> = serde_json::from_str(&content).map_err(|e| source_error(e.to_string()))?;

    let words: Vec<Word> = words.into_iter().filter(|w| !w.is_empty()).collect();
    if words.is_empty() {
        return Err(ExerciseError::NoWords);
    }

    info!(path = %path.display(), count = words.len(), "Loaded word list");
    Ok(words)
}
