//! The child ⇄ host message protocol.
//!
//! Every message is a JSON object `{"message": <kind>, "value": <payload>}`;
//! payload-less messages omit `value`.
//!
//! Child → host:
//! - `load`     — request instance data
//! - `progress` — `{available, current, total, replay?}`
//! - `check`    — `{enabled}`: whether advancing is currently allowed
//! - `finish`   — `{score, answers}`
//!
//! Host → child:
//! - `instance` — `{easy, count, words?}`
//! - `replay`   — a [`ReplayRecord`]
//! - `progress` — `{current, ..}`: jump to an item
//! - `check`    — advance to the next item

use serde::{Deserialize, Serialize};

use crate::error::ChannelError;
use crate::item::AnswerSummary;
use crate::replay::ReplayRecord;
use crate::word::Word;

/// Fresh-attempt instance data sent by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instance {
    /// Live per-position feedback while assembling.
    #[serde(default)]
    pub easy: bool,

    /// How many words the run should contain.
    pub count: usize,

    /// Candidate words. When absent the configured word list is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub words: Option<Vec<Word>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub available: usize,
    pub current: usize,
    pub total: usize,

    /// Per-item correctness, only in replay mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replay: Option<Vec<bool>>,
}

/// A host-side progress message: a request to jump to `current` (1-based).
/// Other fields the host sends along are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpRequest {
    pub current: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckState {
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinishReport {
    /// Percentage of correctly answered items, `0..=100`.
    pub score: f64,
    pub answers: Vec<AnswerSummary>,
}

/// Messages the exercise sends to its host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "message", content = "value", rename_all = "snake_case")]
pub enum ChildMessage {
    Load,
    Progress(ProgressReport),
    Check(CheckState),
    Finish(FinishReport),
}

/// Messages the host sends to the exercise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "message", content = "value", rename_all = "snake_case")]
pub enum HostMessage {
    Instance(Instance),
    Replay(ReplayRecord),
    Progress(JumpRequest),
    Check,
}

impl ChildMessage {
    pub fn check(enabled: bool) -> Self {
        ChildMessage::Check(CheckState { enabled })
    }

    /// Short name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Load => "load",
            Self::Progress(_) => "progress",
            Self::Check(_) => "check",
            Self::Finish(_) => "finish",
        }
    }

    pub fn to_json(&self) -> Result<String, ChannelError> {
        serde_json::to_string(self).map_err(|e| ChannelError::InvalidPayload(e.to_string()))
    }
}

impl HostMessage {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Instance(_) => "instance",
            Self::Replay(_) => "replay",
            Self::Progress(_) => "progress",
            Self::Check => "check",
        }
    }

    pub fn parse(json: &str) -> Result<Self, ChannelError> {
        serde_json::from_str(json).map_err(|e| ChannelError::InvalidPayload(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, ChannelError> {
        serde_json::to_string(self).map_err(|e| ChannelError::InvalidPayload(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_has_no_value() {
        let json = ChildMessage::Load.to_json().unwrap();
        assert_eq!(json, r#"{"message":"load"}"#);
    }

    #[test]
    fn progress_omits_replay_in_fresh_mode() {
        let msg = ChildMessage::Progress(ProgressReport {
            available: 2,
            current: 2,
            total: 5,
            replay: None,
        });
        let json = msg.to_json().unwrap();
        assert!(json.contains(r#""message":"progress""#));
        assert!(json.contains(r#""available":2"#));
        assert!(!json.contains("replay"));
    }

    #[test]
    fn check_state_serialization() {
        let json = ChildMessage::check(true).to_json().unwrap();
        assert_eq!(json, r#"{"message":"check","value":{"enabled":true}}"#);
    }

    #[test]
    fn parse_instance_without_words() {
        let msg = HostMessage::parse(r#"{"message":"instance","value":{"easy":true,"count":3}}"#)
            .unwrap();
        assert_eq!(
            msg,
            HostMessage::Instance(Instance {
                easy: true,
                count: 3,
                words: None,
            })
        );
    }

    #[test]
    fn parse_instance_with_words() {
        let msg = HostMessage::parse(
            r#"{"message":"instance","value":{"easy":false,"count":1,"words":[["ba","na","na"]]}}"#,
        )
        .unwrap();
        let HostMessage::Instance(instance) = msg else {
            panic!("Expected instance");
        };
        assert_eq!(instance.words, Some(vec![Word::new(["ba", "na", "na"])]));
    }

    #[test]
    fn parse_jump_ignores_extra_fields() {
        let msg = HostMessage::parse(
            r#"{"message":"progress","value":{"current":3,"total":5,"available":5}}"#,
        )
        .unwrap();
        assert_eq!(msg, HostMessage::Progress(JumpRequest { current: 3 }));
    }

    #[test]
    fn parse_bare_check() {
        assert_eq!(
            HostMessage::parse(r#"{"message":"check"}"#).unwrap(),
            HostMessage::Check
        );
    }

    #[test]
    fn unknown_message_is_invalid_payload() {
        let err = HostMessage::parse(r#"{"message":"resize","value":{}}"#).unwrap_err();
        assert!(matches!(err, ChannelError::InvalidPayload(_)));
    }

    #[test]
    fn finish_report_shape() {
        let msg = ChildMessage::Finish(FinishReport {
            score: 75.0,
            answers: vec![AnswerSummary {
                is_right: true,
                task: "koro".into(),
                user_answer: "ko, ro".into(),
                correct_answer: "ko, ro".into(),
            }],
        });
        let value: serde_json::Value = serde_json::to_value(&msg).unwrap();
        assert_eq!(value["message"], "finish");
        assert_eq!(value["value"]["score"], 75.0);
        assert_eq!(value["value"]["answers"][0]["correctAnswer"], "ko, ro");
    }
}
