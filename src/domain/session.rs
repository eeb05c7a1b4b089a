//! Per-chat operator sessions with explicit expiry. One chat runs at most
//! one flow at a time; a session idle past the configured timeout counts
//! as cancelled.

use std::collections::HashMap;

use chrono::{Duration, NaiveDateTime};
use tokio::sync::Mutex;

use crate::domain::wizard::WizardState;

/// The multi-step flow a chat is currently in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Flow {
    AddAccount(WizardState),
    /// Awaiting the email to look up across all product tables.
    CheckEmail,
}

#[derive(Debug, Clone)]
struct Session {
    flow: Flow,
    last_activity: NaiveDateTime,
}

/// What a handler finds when it asks for a chat's session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionLookup {
    /// No flow in progress.
    Idle,
    /// A flow was in progress but sat idle past the timeout; it has been
    /// dropped, exactly as if the operator had cancelled it.
    Expired,
    /// The active flow, removed from the registry. Callers re-`put` it
    /// when the flow continues.
    Active(Flow),
}

/// Registry of in-progress flows, keyed by chat id.
pub struct Sessions {
    timeout: Duration,
    inner: Mutex<HashMap<i64, Session>>,
}

impl Sessions {
    pub fn new(timeout_secs: u64) -> Self {
        Self {
            timeout: Duration::seconds(timeout_secs as i64),
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Starts (or restarts) a flow for a chat, replacing any previous one.
    pub async fn begin(&self, chat_id: i64, flow: Flow, now: NaiveDateTime) {
        let mut inner = self.inner.lock().await;
        inner.insert(
            chat_id,
            Session {
                flow,
                last_activity: now,
            },
        );
    }

    /// Removes and returns the chat's flow, applying the idle timeout.
    pub async fn take(&self, chat_id: i64, now: NaiveDateTime) -> SessionLookup {
        let mut inner = self.inner.lock().await;
        match inner.remove(&chat_id) {
            None => SessionLookup::Idle,
            Some(session) if now - session.last_activity > self.timeout => SessionLookup::Expired,
            Some(session) => SessionLookup::Active(session.flow),
        }
    }

    /// Stores the flow back after a step that did not finish it.
    pub async fn put(&self, chat_id: i64, flow: Flow, now: NaiveDateTime) {
        self.begin(chat_id, flow, now).await;
    }

    /// Drops any flow for the chat. Returns true when one existed.
    pub async fn clear(&self, chat_id: i64) -> bool {
        let mut inner = self.inner.lock().await;
        inner.remove(&chat_id).is_some()
    }

    /// Silently drops every timed-out session. Called from the hourly
    /// job; chats notice earlier on their next message via `take`.
    pub async fn sweep_expired(&self, now: NaiveDateTime) -> usize {
        let mut inner = self.inner.lock().await;
        let before = inner.len();
        inner.retain(|_, session| now - session.last_activity <= self.timeout);
        before - inner.len()
    }
}
