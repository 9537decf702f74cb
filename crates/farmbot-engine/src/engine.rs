//! Engine facade.
//!
//! Owns the shared knowledge base and the temporal provider, and hands out
//! independent conversation sessions. One engine per process is the
//! expected shape, but nothing prevents several.

use crate::session::SessionHandle;
use crate::temporal::TemporalProvider;
use farmbot_core::config::EngineConfig;
use farmbot_core::context::{Season, TemporalContext};
use farmbot_core::knowledge::KnowledgeBase;
use farmbot_core::random::{RandomSource, ThreadRandom};
use std::sync::Arc;

pub struct Engine {
    kb: Arc<KnowledgeBase>,
    config: EngineConfig,
    temporal: TemporalProvider,
}

impl Engine {
    /// Builds an engine over the built-in knowledge base and starts the
    /// temporal refresh task.
    pub fn new(config: EngineConfig) -> Self {
        let temporal = TemporalProvider::spawn(
            config.weather.refresh_interval(),
            Box::new(ThreadRandom),
        );
        Self {
            kb: Arc::new(KnowledgeBase::builtin()),
            config,
            temporal,
        }
    }

    /// Opens a new session backed by the thread-local random source.
    pub fn create_session(&self) -> SessionHandle {
        self.create_session_with(Box::new(ThreadRandom))
    }

    /// Opens a new session driven by the given random source.
    pub fn create_session_with(&self, rng: Box<dyn RandomSource>) -> SessionHandle {
        SessionHandle::spawn(
            Arc::clone(&self.kb),
            self.config.latency.clone(),
            self.temporal.subscribe(),
            rng,
        )
    }

    /// The current season and weather snapshot.
    pub fn current_context(&self) -> TemporalContext {
        self.temporal.current()
    }

    /// Crop names recommended for planting in the given season.
    pub fn seasonal_guide(&self, season: Season) -> &[String] {
        self.kb.seasonal_guide(season)
    }

    /// Example queries to offer a new user.
    pub fn starter_queries(&self) -> &[String] {
        &self.kb.starter_queries
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn sessions_are_independent() {
        let engine = Engine::new(EngineConfig::default());
        let a = engine.create_session();
        let b = engine.create_session();
        assert_ne!(a.id(), b.id());

        a.submit_text("weather?").unwrap();
        // The other session's log is untouched.
        assert_eq!(b.snapshot().messages.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn default_sessions_answer_with_the_thread_source() {
        let engine = Engine::new(EngineConfig::default());
        let session = engine.create_session();
        session.submit_text("weather?").unwrap();

        let mut rx = session.subscribe();
        loop {
            {
                let snap = rx.borrow();
                if snap.messages.len() >= 3 && !snap.pending {
                    assert!(snap.messages[2].text.contains("Kerala Weather Report"));
                    break;
                }
            }
            rx.changed().await.unwrap();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn the_guide_covers_every_season() {
        let engine = Engine::new(EngineConfig::default());
        for season in Season::ALL {
            assert_eq!(engine.seasonal_guide(season).len(), 4);
        }
        assert_eq!(engine.starter_queries().len(), 5);
    }
}
