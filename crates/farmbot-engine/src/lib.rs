//! farmbot-engine: async runtime layer of the advisory assistant.
//!
//! Hosts the pieces that need a tokio runtime: the temporal refresh task,
//! simulated image diagnostics, response synthesis and the per-session
//! worker loop that keeps replies in strict submission order.

pub mod diagnostics;
pub mod engine;
pub mod session;
pub mod synthesizer;
pub mod temporal;

pub use engine::Engine;
pub use session::{SessionHandle, SessionSnapshot};
pub use synthesizer::{Reply, Synthesizer};
pub use temporal::TemporalProvider;
