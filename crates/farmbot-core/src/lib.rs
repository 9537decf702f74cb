//! farmbot-core: domain layer of the conversational agricultural-advisory
//! engine.
//!
//! Pure types and logic with no background tasks: chat messages, diagnostic
//! reports, intent classification, the static knowledge base, temporal
//! context math, the injectable randomness seam, and configuration.

pub mod config;
pub mod context;
pub mod error;
pub mod intent;
pub mod knowledge;
pub mod message;
pub mod random;
pub mod report;
pub mod user;

// Re-export common types
pub use config::{EngineConfig, LatencyConfig, WeatherConfig};
pub use context::{Season, TemporalContext, WeatherSnapshot};
pub use error::{FarmbotError, Result};
pub use intent::{classify, Intent};
pub use knowledge::KnowledgeBase;
pub use message::{ImageRef, Message, Sender};
pub use random::{RandomSource, ScriptedRandom, SeededRandom, ThreadRandom};
pub use report::{
    AnalysisReport, HealthStatus, NutrientLevels, PestControlPlan, PestRisk, SoilHealth, WaterNeed,
};
pub use user::Role;
