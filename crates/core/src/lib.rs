//! # WordWeave Core
//!
//! Domain types, traits, and error definitions for the WordWeave
//! syllable-assembly exercise. It holds no runtime of its own; the drag,
//! channel and runner crates build on the model defined here.
//!
//! ## Layout
//!
//! - [`word`] — tokens, words and shuffled presentations
//! - [`response`] — index-based response tracking with duplicate disambiguation
//! - [`item`] — one exercise item and its correctness rules
//! - [`replay`] — serialized attempts used for review
//! - [`protocol`] — the child ⇄ host message shapes
//! - [`channel`] — the transport trait the protocol travels over
//! - [`geometry`] — rectangles for layout and hit testing

pub mod channel;
pub mod error;
pub mod geometry;
pub mod item;
pub mod protocol;
pub mod replay;
pub mod response;
pub mod word;

// Re-export key types at crate root for ergonomics
pub use channel::MessageChannel;
pub use error::{ChannelError, Error, ExerciseError, Result};
pub use geometry::{Point, Rect};
pub use item::{AnswerSummary, ExerciseItem, ItemState, Mark};
pub use protocol::{ChildMessage, FinishReport, HostMessage, Instance, ProgressReport};
pub use replay::{ReplayItem, ReplayRecord};
pub use response::{Response, Slot};
pub use word::{Presentation, Token, Word};
