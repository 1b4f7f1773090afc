//! Host transports for WordWeave.
//!
//! Each transport implements [`MessageChannel`] and carries the child ⇄ host
//! protocol over a different medium.
//!
//! Available channels:
//! - **Memory** — in-process queue pair with a scriptable host handle
//! - **Stdio** — JSON lines on stdin/stdout
//! - **Standalone** — no host; outbound messages are only logged
//!
//! [`MessageChannel`]: wordweave_core::channel::MessageChannel

pub mod memory;
pub mod standalone;
pub mod stdio;

pub use memory::{HostHandle, MemoryChannel};
pub use standalone::StandaloneChannel;
pub use stdio::StdioChannel;
