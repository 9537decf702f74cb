//! Conversation sessions.
//!
//! Each session owns an append-only message log and a single worker task
//! that drains submitted turns strictly in submission order. Submissions
//! never block the caller: they enqueue and return. Observers follow the
//! log through a watch channel carrying immutable snapshots.

use crate::diagnostics;
use crate::synthesizer::Synthesizer;
use farmbot_core::config::LatencyConfig;
use farmbot_core::context::TemporalContext;
use farmbot_core::error::{FarmbotError, Result};
use farmbot_core::intent;
use farmbot_core::knowledge::KnowledgeBase;
use farmbot_core::message::{ImageRef, Message};
use farmbot_core::random::RandomSource;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use uuid::Uuid;

const GREETING: &str = "Hello! I am your FarmAI assistant. How can I help you today? \
     You can ask me about crops, pests, or upload a plant photo for analysis.";

const IMAGE_PLACEHOLDER: &str = "Please analyze this crop image.";

const IMAGE_FAILURE: &str =
    "Sorry, I encountered an error analyzing the image. Please try again.";

/// Immutable view of a session at one point in time.
#[derive(Debug, Clone)]
pub struct SessionSnapshot {
    /// The message log, oldest first.
    pub messages: Vec<Message>,
    /// Whether at least one submitted turn has not been answered yet.
    pub pending: bool,
}

enum Turn {
    Text(String),
    Image(ImageRef),
}

/// Caller-side handle to a running session.
///
/// Dropping the handle tears the session down: the worker task is aborted
/// and any in-flight or queued turns are discarded without a reply.
pub struct SessionHandle {
    id: Uuid,
    turns: mpsc::UnboundedSender<Turn>,
    state: watch::Receiver<SessionSnapshot>,
    outstanding: Arc<AtomicUsize>,
    worker: JoinHandle<()>,
}

impl SessionHandle {
    /// Spawns a new session worker over the shared knowledge base.
    pub fn spawn(
        kb: Arc<KnowledgeBase>,
        latency: LatencyConfig,
        temporal: watch::Receiver<TemporalContext>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let id = Uuid::new_v4();
        let (turn_tx, turn_rx) = mpsc::unbounded_channel();
        let (state_tx, state_rx) = watch::channel(SessionSnapshot {
            messages: vec![Message::assistant(GREETING)],
            pending: false,
        });
        let outstanding = Arc::new(AtomicUsize::new(0));

        let worker = Worker {
            session: id,
            synthesizer: Synthesizer::new(Arc::clone(&kb)),
            kb,
            latency,
            temporal,
            rng,
            messages: vec![Message::assistant(GREETING)],
            state: state_tx,
            outstanding: Arc::clone(&outstanding),
        };
        let task = tokio::spawn(worker.run(turn_rx));
        tracing::info!(session = %id, "session started");

        Self {
            id,
            turns: turn_tx,
            state: state_rx,
            outstanding,
            worker: task,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Submits a text turn. Whitespace-only input is a silent no-op.
    pub fn submit_text(&self, text: &str) -> Result<()> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            tracing::debug!(session = %self.id, "ignoring empty input");
            return Ok(());
        }
        self.enqueue(Turn::Text(trimmed.to_string()))
    }

    /// Submits an image turn. Validation happens on the worker, so an
    /// unreadable handle still produces a chat-visible failure reply.
    pub fn submit_image(&self, image: ImageRef) -> Result<()> {
        self.enqueue(Turn::Image(image))
    }

    fn enqueue(&self, turn: Turn) -> Result<()> {
        self.outstanding.fetch_add(1, Ordering::SeqCst);
        if self.turns.send(turn).is_err() {
            self.outstanding.fetch_sub(1, Ordering::SeqCst);
            tracing::warn!(session = %self.id, "submission to closed session");
            return Err(FarmbotError::SessionClosed);
        }
        Ok(())
    }

    /// The current log snapshot.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.state.borrow().clone()
    }

    /// A receiver that observes every log change. Dropping the receiver
    /// unsubscribes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state.clone()
    }
}

impl Drop for SessionHandle {
    fn drop(&mut self) {
        self.worker.abort();
        tracing::info!(session = %self.id, "session closed");
    }
}

struct Worker {
    session: Uuid,
    kb: Arc<KnowledgeBase>,
    synthesizer: Synthesizer,
    latency: LatencyConfig,
    temporal: watch::Receiver<TemporalContext>,
    rng: Box<dyn RandomSource>,
    messages: Vec<Message>,
    state: watch::Sender<SessionSnapshot>,
    outstanding: Arc<AtomicUsize>,
}

impl Worker {
    async fn run(mut self, mut turns: mpsc::UnboundedReceiver<Turn>) {
        while let Some(turn) = turns.recv().await {
            match turn {
                Turn::Text(text) => self.answer_text(text).await,
                Turn::Image(image) => self.answer_image(image).await,
            }
            self.outstanding.fetch_sub(1, Ordering::SeqCst);
            // Re-read the counter so a turn enqueued while this one was
            // answered is reflected in the published flag.
            self.publish(self.outstanding.load(Ordering::SeqCst) > 0);
        }
    }

    async fn answer_text(&mut self, text: String) {
        self.messages.push(Message::user(text.clone()));
        self.publish(true);

        self.think(&text).await;

        let intent = intent::classify(&text);
        tracing::debug!(session = %self.session, %intent, "classified turn");
        let ctx = *self.temporal.borrow();
        let reply = self
            .synthesizer
            .synthesize(intent, &text, &ctx, self.rng.as_mut());
        self.messages
            .push(Message::assistant_with_report(reply.text, reply.report));
    }

    async fn answer_image(&mut self, image: ImageRef) {
        self.messages
            .push(Message::user_with_image(IMAGE_PLACEHOLDER, image.clone()));
        self.publish(true);

        let ctx = *self.temporal.borrow();
        let outcome = diagnostics::analyze_image(
            &image,
            &self.kb,
            &ctx,
            self.rng.as_mut(),
            &self.latency,
        )
        .await;

        match outcome {
            Ok(report) => {
                let summary = diagnostics::chat_summary(&report);
                self.messages
                    .push(Message::assistant_with_report(summary, Some(report)));
            }
            Err(err) => {
                tracing::warn!(session = %self.session, error = %err, "image analysis failed");
                self.messages.push(Message::assistant(IMAGE_FAILURE));
            }
        }
    }

    /// Simulated thinking delay: base plus a per-character component plus
    /// uniform jitter.
    async fn think(&mut self, text: &str) {
        let jitter = self.rng.next_float() * self.latency.thinking_jitter_ms as f64;
        let total = self.latency.thinking_base_ms
            + self.latency.thinking_per_char_ms * text.chars().count() as u64
            + jitter as u64;
        tokio::time::sleep(Duration::from_millis(total)).await;
    }

    fn publish(&self, pending: bool) {
        let _ = self.state.send(SessionSnapshot {
            messages: self.messages.clone(),
            pending,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use farmbot_core::context::{Season, WeatherSnapshot};
    use farmbot_core::message::Sender;
    use farmbot_core::random::SeededRandom;

    fn temporal() -> watch::Receiver<TemporalContext> {
        let (tx, rx) = watch::channel(TemporalContext {
            season: Season::SouthwestMonsoon,
            weather: WeatherSnapshot::baseline(),
        });
        // Keep the sender alive for the duration of the test process.
        std::mem::forget(tx);
        rx
    }

    fn session() -> SessionHandle {
        SessionHandle::spawn(
            Arc::new(KnowledgeBase::builtin()),
            LatencyConfig::instant(),
            temporal(),
            Box::new(SeededRandom::from_seed(42)),
        )
    }

    /// Waits until the log holds `len` messages and no turn is pending.
    async fn settled(handle: &SessionHandle, len: usize) -> SessionSnapshot {
        let mut rx = handle.subscribe();
        loop {
            {
                let snap = rx.borrow();
                if snap.messages.len() >= len && !snap.pending {
                    return snap.clone();
                }
            }
            rx.changed().await.unwrap();
        }
    }

    #[tokio::test(start_paused = true)]
    async fn new_sessions_open_with_the_greeting() {
        let handle = session();
        let snap = handle.snapshot();
        assert_eq!(snap.messages.len(), 1);
        assert_eq!(snap.messages[0].sender, Sender::Assistant);
        assert!(snap.messages[0].text.starts_with("Hello!"));
        assert!(!snap.pending);
    }

    #[tokio::test(start_paused = true)]
    async fn empty_input_is_a_silent_no_op() {
        let handle = session();
        handle.submit_text("   \n\t ").unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;

        let snap = handle.snapshot();
        assert_eq!(snap.messages.len(), 1);
        assert!(!snap.pending);
    }

    #[tokio::test(start_paused = true)]
    async fn text_turns_append_a_user_and_assistant_pair() {
        let handle = session();
        handle.submit_text("what is the weather today?").unwrap();

        let snap = settled(&handle, 3).await;
        assert_eq!(snap.messages.len(), 3);
        assert_eq!(snap.messages[1].sender, Sender::User);
        assert_eq!(snap.messages[1].text, "what is the weather today?");
        assert_eq!(snap.messages[2].sender, Sender::Assistant);
        assert!(snap.messages[2].text.contains("Kerala Weather Report"));
    }

    #[tokio::test(start_paused = true)]
    async fn pending_flag_tracks_outstanding_turns() {
        // Real latency under paused time, so the worker parks inside the
        // turn and the intermediate snapshots stay observable.
        let handle = SessionHandle::spawn(
            Arc::new(KnowledgeBase::builtin()),
            LatencyConfig::default(),
            temporal(),
            Box::new(SeededRandom::from_seed(42)),
        );
        let mut rx = handle.subscribe();

        handle.submit_text("weather?").unwrap();
        handle.submit_text("market prices?").unwrap();

        // First observable change is the optimistic user append.
        rx.changed().await.unwrap();
        assert!(rx.borrow().pending);

        // Pending holds between the first reply and the queued second turn.
        loop {
            rx.changed().await.unwrap();
            let (len, pending) = {
                let snap = rx.borrow();
                (snap.messages.len(), snap.pending)
            };
            if (3..5).contains(&len) {
                assert!(pending, "pending cleared with {} messages", len);
            }
            if len >= 4 {
                break;
            }
        }

        let snap = settled(&handle, 5).await;
        assert!(!snap.pending);
    }

    #[tokio::test(start_paused = true)]
    async fn unreadable_image_yields_a_chat_visible_failure() {
        let handle = session();
        handle
            .submit_image(ImageRef::Uri(String::new()))
            .unwrap();

        let snap = settled(&handle, 3).await;
        assert_eq!(snap.messages.len(), 3);
        assert_eq!(snap.messages[2].text, IMAGE_FAILURE);
        assert!(snap.messages[2].report.is_none());

        // The session stays serviceable afterwards.
        handle.submit_text("market prices please").unwrap();
        let snap = settled(&handle, 5).await;
        assert_eq!(snap.messages.len(), 5);
        assert!(snap.messages[4].text.contains("Market Prices"));
    }

    #[tokio::test(start_paused = true)]
    async fn readable_image_produces_a_summary_and_report() {
        let handle = session();
        handle
            .submit_image(ImageRef::Bytes(vec![0xff, 0xd8, 0xff]))
            .unwrap();

        let snap = settled(&handle, 3).await;
        assert_eq!(snap.messages.len(), 3);
        assert!(snap.messages[1].image.is_some());
        assert!(snap.messages[2].text.starts_with("Analysis complete!"));
        let report = snap.messages[2].report.as_ref().unwrap();
        assert!(report.is_valid());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_sessions_reject_submissions() {
        let handle = session();
        let turns = handle.turns.clone();
        drop(handle);

        // Give the abort a chance to land, then observe the closed channel.
        tokio::time::sleep(Duration::from_millis(10)).await;
        assert!(turns.send(Turn::Text("hello".to_string())).is_err());
    }
}
