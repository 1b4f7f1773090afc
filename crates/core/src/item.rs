//! One exercise item: a target word, its shuffled presentation, and the
//! user's response.

use serde::{Deserialize, Serialize};

use crate::response::{Response, Slot};
use crate::word::{Presentation, Token, Word};

/// Where an item stands in the answer lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemState {
    Unanswered,
    PartiallyAnswered,
    FullyAnswered,
}

/// Easy-mode feedback for one placed item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark {
    /// Presentation slot of the placed item.
    pub slot: usize,
    /// Whether the item sits at a position where the word has its token.
    pub right: bool,
}

/// Per-item entry of the finish report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSummary {
    pub is_right: bool,
    /// The word as it reads (`"banana"`).
    pub task: String,
    /// The response as a syllable list (`"na, ba, na"`).
    pub user_answer: String,
    /// The word as a syllable list (`"ba, na, na"`).
    pub correct_answer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExerciseItem {
    word: Word,
    presentation: Presentation,
    response: Response,
}

impl ExerciseItem {
    /// A fresh item with a shuffled presentation and an empty response.
    pub fn new(word: Word, rng: &mut fastrand::Rng, reshuffle_attempts: usize) -> Self {
        let presentation = Presentation::shuffled(&word, rng, reshuffle_attempts);
        Self::with_presentation(word, presentation)
    }

    pub fn with_presentation(word: Word, presentation: Presentation) -> Self {
        Self {
            word,
            presentation,
            response: Response::new(),
        }
    }

    pub fn word(&self) -> &Word {
        &self.word
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn response(&self) -> &Response {
        &self.response
    }

    pub fn set_response(&mut self, response: Response) {
        self.response = response;
    }

    /// Set the response from a token sequence (replays).
    pub fn set_response_tokens(&mut self, tokens: &[Token]) {
        self.response = Response::resolve(tokens, &self.presentation);
    }

    pub fn response_tokens(&self) -> Vec<Token> {
        self.response
            .tokens(&self.presentation)
            .into_iter()
            .cloned()
            .collect()
    }

    pub fn state(&self) -> ItemState {
        if self.response.len() == self.presentation.len() {
            ItemState::FullyAnswered
        } else if self.response.is_empty() {
            ItemState::Unanswered
        } else {
            ItemState::PartiallyAnswered
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state() == ItemState::FullyAnswered
    }

    /// Same length as the word and the same token at every position.
    pub fn is_right(&self) -> bool {
        self.response.len() == self.word.len()
            && self
                .response
                .slots()
                .iter()
                .zip(self.word.tokens())
                .all(|(slot, expected)| self.token_at(*slot) == Some(expected))
    }

    /// Easy-mode marks for the placed items, in response order.
    pub fn marks(&self) -> Vec<Mark> {
        self.response
            .slots()
            .iter()
            .enumerate()
            .filter_map(|(position, slot)| {
                let index = slot.index()?;
                let right = self.token_at(*slot) == self.word.tokens().get(position);
                Some(Mark { slot: index, right })
            })
            .collect()
    }

    pub fn summary(&self) -> AnswerSummary {
        AnswerSummary {
            is_right: self.is_right(),
            task: self.word.joined(),
            user_answer: self.response_tokens().join(", "),
            correct_answer: self.word.delimited(),
        }
    }

    fn token_at(&self, slot: Slot) -> Option<&Token> {
        slot.index().and_then(|i| self.presentation.get(i))
    }
}
