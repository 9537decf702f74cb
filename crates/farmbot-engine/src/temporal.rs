//! Process-wide temporal context provider.
//!
//! Owns the refresh task that recomputes the season and steps the weather
//! walk on a fixed interval, publishing each new [`TemporalContext`]
//! atomically through a watch channel. The task is spawned when the engine
//! is created and aborted when the provider is dropped, so there is no
//! ambient global state.

use chrono::Utc;
use farmbot_core::context::{TemporalContext, WeatherSnapshot};
use farmbot_core::random::RandomSource;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Handle to the running temporal refresh task.
pub struct TemporalProvider {
    rx: watch::Receiver<TemporalContext>,
    task: JoinHandle<()>,
}

impl TemporalProvider {
    /// Spawns the refresh task. The first context is observed immediately;
    /// subsequent refreshes happen every `refresh` interval.
    pub fn spawn(refresh: Duration, mut rng: Box<dyn RandomSource>) -> Self {
        let initial = TemporalContext::observe(Utc::now(), WeatherSnapshot::baseline(), rng.as_mut());
        let (tx, rx) = watch::channel(initial);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(refresh);
            // The first tick fires immediately; the initial context already
            // covers it.
            interval.tick().await;
            loop {
                interval.tick().await;
                let previous = tx.borrow().weather;
                let next = TemporalContext::observe(Utc::now(), previous, rng.as_mut());
                tracing::debug!(
                    season = %next.season,
                    temperature_c = next.weather.temperature_c,
                    rainfall_mm = next.weather.rainfall_mm,
                    "temporal context refreshed"
                );
                if tx.send(next).is_err() {
                    break;
                }
            }
        });

        Self { rx, task }
    }

    /// The current context snapshot.
    pub fn current(&self) -> TemporalContext {
        *self.rx.borrow()
    }

    /// A receiver that observes every refresh.
    pub fn subscribe(&self) -> watch::Receiver<TemporalContext> {
        self.rx.clone()
    }
}

impl Drop for TemporalProvider {
    fn drop(&mut self) {
        self.task.abort();
    }
}
