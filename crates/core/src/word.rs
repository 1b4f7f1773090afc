//! Tokens, words, and the shuffled presentation shown to the user.

use serde::{Deserialize, Serialize};

/// A single syllable. Compared by value; duplicates within a word are allowed.
pub type Token = String;

/// How many times a presentation is reshuffled while it still reads as the
/// target word.
pub const DEFAULT_RESHUFFLE_ATTEMPTS: usize = 25;

/// The target answer: an ordered sequence of tokens.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Word(pub Vec<Token>);

impl Word {
    pub fn new<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Token>,
    {
        Self(tokens.into_iter().map(Into::into).collect())
    }

    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The word as it reads on screen: `["ba", "na", "na"]` → `"banana"`.
    pub fn joined(&self) -> String {
        self.0.concat()
    }

    /// The word as a syllable list: `"ba, na, na"`.
    pub fn delimited(&self) -> String {
        self.0.join(", ")
    }
}

impl From<Vec<Token>> for Word {
    fn from(tokens: Vec<Token>) -> Self {
        Self(tokens)
    }
}

/// A word's tokens in the order they are shown to the user.
///
/// Item identity is the slot index: two equal tokens at different slots are
/// different physical items.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Presentation(Vec<Token>);

impl Presentation {
    /// Shuffle `word` with an unbiased Fisher–Yates shuffle.
    ///
    /// For words longer than one token the shuffle is repeated, at most
    /// `attempts` times, while the result still equals the word. Words whose
    /// tokens are all equal can never differ, so this is best effort.
    pub fn shuffled(word: &Word, rng: &mut fastrand::Rng, attempts: usize) -> Self {
        let mut tokens = word.0.clone();
        rng.shuffle(&mut tokens);
        if tokens.len() > 1 {
            let mut tries = 0;
            while tries < attempts && tokens == word.0 {
                rng.shuffle(&mut tokens);
                tries += 1;
            }
        }
        Self(tokens)
    }

    /// A presentation in a known order (replays, tests).
    pub fn fixed(tokens: Vec<Token>) -> Self {
        Self(tokens)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&Token> {
        self.0.get(slot)
    }

    /// First slot at or after `from` holding `token`.
    pub fn position_from(&self, token: &str, from: usize) -> Option<usize> {
        self.0
            .iter()
            .skip(from)
            .position(|t| t == token)
            .map(|offset| offset + from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sorted(tokens: &[Token]) -> Vec<Token> {
        let mut v = tokens.to_vec();
        v.sort();
        v
    }

    #[test]
    fn joined_and_delimited() {
        let word = Word::new(["ba", "na", "na"]);
        assert_eq!(word.joined(), "banana");
        assert_eq!(word.delimited(), "ba, na, na");
    }

    #[test]
    fn word_serializes_as_plain_array() {
        let word = Word::new(["ko", "ro"]);
        assert_eq!(serde_json::to_string(&word).unwrap(), r#"["ko","ro"]"#);
    }

    #[test]
    fn single_token_word_is_left_alone() {
        let mut rng = fastrand::Rng::with_seed(7);
        let word = Word::new(["a"]);
        let p = Presentation::shuffled(&word, &mut rng, DEFAULT_RESHUFFLE_ATTEMPTS);
        assert_eq!(p.tokens(), word.tokens());
    }

    #[test]
    fn two_token_word_is_swapped() {
        // 26 identical shuffles in a row would be a 2^-26 event for an unbiased rng.
        for seed in 0..50 {
            let mut rng = fastrand::Rng::with_seed(seed);
            let word = Word::new(["mo", "ri"]);
            let p = Presentation::shuffled(&word, &mut rng, DEFAULT_RESHUFFLE_ATTEMPTS);
            assert_eq!(p.tokens(), &["ri".to_string(), "mo".to_string()]);
        }
    }

    #[test]
    fn all_equal_tokens_cannot_differ() {
        let mut rng = fastrand::Rng::with_seed(3);
        let word = Word::new(["la", "la", "la"]);
        let p = Presentation::shuffled(&word, &mut rng, DEFAULT_RESHUFFLE_ATTEMPTS);
        assert_eq!(p.tokens(), word.tokens());
    }

    #[test]
    fn position_from_skips_earlier_slots() {
        let p = Presentation::fixed(vec!["na".into(), "ba".into(), "na".into()]);
        assert_eq!(p.position_from("na", 0), Some(0));
        assert_eq!(p.position_from("na", 1), Some(2));
        assert_eq!(p.position_from("na", 3), None);
        assert_eq!(p.position_from("zz", 0), None);
    }

    proptest! {
        #[test]
        fn presentation_is_a_permutation(
            tokens in proptest::collection::vec("[a-d]{1,2}", 0..8),
            seed in any::<u64>(),
        ) {
            let word = Word(tokens);
            let mut rng = fastrand::Rng::with_seed(seed);
            let p = Presentation::shuffled(&word, &mut rng, DEFAULT_RESHUFFLE_ATTEMPTS);
            prop_assert_eq!(p.len(), word.len());
            prop_assert_eq!(sorted(p.tokens()), sorted(word.tokens()));
        }

        #[test]
        fn distinct_tokens_get_a_different_order(
            len in 3usize..7,
            seed in any::<u64>(),
        ) {
            let word = Word::new((0..len).map(|i| format!("s{i}")));
            let mut rng = fastrand::Rng::with_seed(seed);
            let p = Presentation::shuffled(&word, &mut rng, DEFAULT_RESHUFFLE_ATTEMPTS);
            prop_assert_ne!(p.tokens(), word.tokens());
        }
    }
}
