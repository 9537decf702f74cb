//! Subcommand implementations.

pub mod analyze;
pub mod ask;
pub mod chat;
pub mod guide;

use farmbot_core::message::Message;
use farmbot_engine::SessionHandle;

/// Waits until the session has answered everything submitted so far and
/// returns the messages appended past `seen`.
pub async fn await_replies(session: &SessionHandle, seen: usize) -> Vec<Message> {
    let mut rx = session.subscribe();
    loop {
        {
            let snap = rx.borrow();
            if !snap.pending && snap.messages.len() > seen {
                return snap.messages[seen..].to_vec();
            }
        }
        if rx.changed().await.is_err() {
            return Vec::new();
        }
    }
}
