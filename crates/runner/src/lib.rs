//! The exercise run loop for WordWeave.
//!
//! A run goes through these steps:
//!
//! 1. **Load**: send `load`, wait for `instance` or `replay` data
//! 2. **Build** the items (shuffled fresh words, or a fixed replay)
//! 3. For every item: **report** progress, **activate** it, feed pointer
//!    events to the drag controller until the host advances or jumps
//! 4. **Finish**: score the run and send the per-item answers
//!
//! The host never sees `current` go backwards except through a jump it
//! asked for.

pub mod autoplay;
pub mod bootstrap;
pub mod progress;
pub mod run;
pub mod session;
pub mod signal;
pub mod words;

pub use bootstrap::{launch, post_load, prepare, Launch};
pub use progress::{ProgressReporter, ProgressState};
pub use run::{ExerciseRun, RunSettings};
pub use session::ItemSession;
pub use signal::{AdvanceSignal, JumpSignal, Signal};
pub use words::load_word_list;
