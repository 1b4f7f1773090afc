//! Replay records: a finished (or partially finished) run in serialized form.

use serde::{Deserialize, Serialize};

use crate::item::ExerciseItem;
use crate::word::{Presentation, Token, Word};

/// One item of a replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayItem {
    pub word: Word,

    /// The response projected onto tokens.
    pub response: Vec<Token>,

    /// The shuffled order the item was shown in. Older records omit it; the
    /// word order is used instead.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presentation: Option<Vec<Token>>,
}

/// A serialized run, one entry per item.
///
/// Rebuilding a run from a record and emitting it again gives the same
/// record, except for response tokens that have no slot in the
/// presentation: those stay unresolved in the rebuilt item and are left
/// out of the emitted response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReplayRecord(pub Vec<ReplayItem>);

impl ReplayRecord {
    pub fn items(&self) -> &[ReplayItem] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl ExerciseItem {
    /// Rebuild an item from a replay entry without reshuffling.
    pub fn from_replay(entry: &ReplayItem) -> Self {
        let presentation = entry
            .presentation
            .clone()
            .unwrap_or_else(|| entry.word.tokens().to_vec());
        let mut item =
            ExerciseItem::with_presentation(entry.word.clone(), Presentation::fixed(presentation));
        item.set_response_tokens(&entry.response);
        item
    }

    pub fn to_replay(&self) -> ReplayItem {
        ReplayItem {
            word: self.word().clone(),
            response: self.response_tokens(),
            presentation: Some(self.presentation().tokens().to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(word: &[&str], response: &[&str], presentation: Option<&[&str]>) -> ReplayItem {
        ReplayItem {
            word: Word::new(word.iter().copied()),
            response: response.iter().map(|t| t.to_string()).collect(),
            presentation: presentation.map(|p| p.iter().map(|t| t.to_string()).collect()),
        }
    }

    #[test]
    fn replay_keeps_stored_presentation() {
        let e = entry(&["ba", "na", "na"], &["ba", "na", "na"], Some(&["na", "na", "ba"]));
        let item = ExerciseItem::from_replay(&e);
        assert_eq!(item.presentation().tokens(), &["na", "na", "ba"]);
        assert_eq!(item.response().indices().collect::<Vec<_>>(), vec![2, 0, 1]);
        assert!(item.is_right());
    }

    #[test]
    fn old_style_entry_uses_word_order() {
        let e = entry(&["ko", "ro"], &["ro", "ko"], None);
        let item = ExerciseItem::from_replay(&e);
        assert_eq!(item.presentation().tokens(), item.word().tokens());
        assert!(!item.is_right());
    }

    #[test]
    fn replay_roundtrip_is_a_fixed_point() {
        let record = ReplayRecord(vec![
            entry(&["ba", "na", "na"], &["na", "ba"], Some(&["na", "ba", "na"])),
            entry(&["ko", "ro"], &["ko", "ro"], Some(&["ro", "ko"])),
            entry(&["la"], &[], Some(&["la"])),
        ]);
        let rebuilt: Vec<ReplayItem> = record
            .items()
            .iter()
            .map(|e| ExerciseItem::from_replay(e).to_replay())
            .collect();
        assert_eq!(ReplayRecord(rebuilt), record);
    }

    #[test]
    fn record_parses_host_json() {
        let json = r#"[{"word":["ba","na"],"response":["na","ba"]}]"#;
        let record: ReplayRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record.items()[0].presentation, None);
        assert_eq!(record.items()[0].response, vec!["na", "ba"]);
    }

    #[test]
    fn unknown_response_token_is_dropped_on_emit() {
        let e = entry(&["ko", "ra"], &["ko", "zz"], Some(&["ra", "ko"]));
        let item = ExerciseItem::from_replay(&e);
        assert!(item.response().has_unresolved());
        assert!(item.is_complete());
        assert!(!item.is_right());

        let emitted = item.to_replay();
        assert_eq!(emitted.response, vec!["ko"]);
        assert_eq!(item.summary().user_answer, "ko");
    }
}
