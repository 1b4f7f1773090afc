//! Response tracking: the user's arrangement as presentation slot indices.
//!
//! Tracking slots instead of tokens keeps duplicate syllables apart. In
//! `["na", "ba", "na"]` the two `na` items are slots 0 and 2, and a response
//! that uses both must refer to both slots exactly once.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::word::{Presentation, Token};

/// One position of a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slot {
    /// Index into the presentation.
    Resolved(usize),
    /// The token at this position has no free presentation slot left. Only
    /// happens when the rendered items and the word fall out of sync.
    Unresolved,
}

impl Slot {
    pub fn index(self) -> Option<usize> {
        match self {
            Slot::Resolved(i) => Some(i),
            Slot::Unresolved => None,
        }
    }
}

/// The user's current arrangement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Response {
    slots: Vec<Slot>,
}

impl Response {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slots(slots: Vec<Slot>) -> Self {
        Self { slots }
    }

    /// Map a token sequence back to presentation slots.
    ///
    /// Each token takes the first slot holding it that no earlier position
    /// has claimed. Arranging the items in exact presentation order
    /// therefore yields the identity `[0, 1, .., n-1]`.
    pub fn resolve(candidate: &[Token], presentation: &Presentation) -> Self {
        let mut slots = Vec::with_capacity(candidate.len());
        for (position, token) in candidate.iter().enumerate() {
            let mut found = presentation.position_from(token, 0);
            while let Some(i) = found {
                if !slots.contains(&Slot::Resolved(i)) {
                    break;
                }
                found = presentation.position_from(token, i + 1);
            }
            match found {
                Some(i) => slots.push(Slot::Resolved(i)),
                None => {
                    warn!(position, token = %token, "Token has no free presentation slot");
                    slots.push(Slot::Unresolved);
                }
            }
        }
        Self { slots }
    }

    /// Build a response from physical item indices, as read from the
    /// answer area. Indices outside the presentation become unresolved.
    pub fn from_indices<I>(indices: I, presentation: &Presentation) -> Self
    where
        I: IntoIterator<Item = usize>,
    {
        let slots = indices
            .into_iter()
            .map(|i| {
                if i < presentation.len() {
                    Slot::Resolved(i)
                } else {
                    warn!(index = i, len = presentation.len(), "Item index outside presentation");
                    Slot::Unresolved
                }
            })
            .collect();
        Self { slots }
    }

    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn has_unresolved(&self) -> bool {
        self.slots.contains(&Slot::Unresolved)
    }

    /// Resolved slot indices in response order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots.iter().filter_map(|s| s.index())
    }

    /// Project the response onto tokens. Unresolved positions are skipped.
    pub fn tokens<'a>(&'a self, presentation: &'a Presentation) -> Vec<&'a Token> {
        self.indices()
            .filter_map(|i| presentation.get(i))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::word::{DEFAULT_RESHUFFLE_ATTEMPTS, Word};
    use proptest::prelude::*;

    fn presentation(tokens: &[&str]) -> Presentation {
        Presentation::fixed(tokens.iter().map(|t| t.to_string()).collect())
    }

    fn tokens(tokens: &[&str]) -> Vec<Token> {
        tokens.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn resolves_distinct_tokens() {
        let p = presentation(&["ro", "ko", "ma"]);
        let r = Response::resolve(&tokens(&["ko", "ma", "ro"]), &p);
        assert_eq!(r.indices().collect::<Vec<_>>(), vec![1, 2, 0]);
    }

    #[test]
    fn duplicates_take_distinct_slots() {
        let p = presentation(&["na", "ba", "na"]);
        let r = Response::resolve(&tokens(&["ba", "na", "na"]), &p);
        assert_eq!(r.indices().collect::<Vec<_>>(), vec![1, 0, 2]);
    }

    #[test]
    fn presentation_order_yields_identity() {
        let p = presentation(&["na", "na", "ba", "na"]);
        let r = Response::resolve(p.tokens(), &p);
        assert_eq!(r.indices().collect::<Vec<_>>(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn surplus_duplicate_is_unresolved() {
        let p = presentation(&["la", "la"]);
        let r = Response::resolve(&tokens(&["la", "la", "la"]), &p);
        assert_eq!(
            r.slots(),
            &[Slot::Resolved(0), Slot::Resolved(1), Slot::Unresolved]
        );
        assert!(r.has_unresolved());
    }

    #[test]
    fn unknown_token_is_unresolved() {
        let p = presentation(&["a", "b"]);
        let r = Response::resolve(&tokens(&["c"]), &p);
        assert_eq!(r.slots(), &[Slot::Unresolved]);
        assert!(r.tokens(&p).is_empty());
    }

    #[test]
    fn token_projection_reads_presentation() {
        let p = presentation(&["ta", "ka", "na"]);
        let r = Response::from_indices([2, 0], &p);
        assert_eq!(r.tokens(&p), vec!["na", "ta"]);
    }

    #[test]
    fn out_of_range_index_is_unresolved() {
        let p = presentation(&["ta"]);
        let r = Response::from_indices([0, 4], &p);
        assert_eq!(r.slots(), &[Slot::Resolved(0), Slot::Unresolved]);
    }

    proptest! {
        #[test]
        fn shuffled_presentation_order_is_identity(
            tokens in proptest::collection::vec("[ab]", 1..8),
            seed in any::<u64>(),
        ) {
            let word = Word(tokens);
            let mut rng = fastrand::Rng::with_seed(seed);
            let p = Presentation::shuffled(&word, &mut rng, DEFAULT_RESHUFFLE_ATTEMPTS);
            let r = Response::resolve(p.tokens(), &p);
            prop_assert_eq!(r.indices().collect::<Vec<_>>(), (0..p.len()).collect::<Vec<_>>());
        }

        #[test]
        fn resolving_the_word_never_reuses_a_slot(
            tokens in proptest::collection::vec("[abc]", 1..8),
            seed in any::<u64>(),
        ) {
            let word = Word(tokens);
            let mut rng = fastrand::Rng::with_seed(seed);
            let p = Presentation::shuffled(&word, &mut rng, DEFAULT_RESHUFFLE_ATTEMPTS);
            let r = Response::resolve(word.tokens(), &p);
            let mut seen: Vec<usize> = r.indices().collect();
            prop_assert_eq!(seen.len(), word.len());
            seen.sort_unstable();
            seen.dedup();
            prop_assert_eq!(seen.len(), word.len());
        }
    }
}
