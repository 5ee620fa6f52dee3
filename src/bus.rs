//! In-process message bus connecting the three surfaces.
//!
//! DESIGN
//! ======
//! The browser delivers extension messages point-to-point with a single
//! reply per message. This bus reproduces that contract in-process:
//! - One mailbox per endpoint. Registering again replaces the previous
//!   listener, the way a reloaded page takes over its tab's messages.
//! - `request` resolves with the handler's response, a structured
//!   [`Rejection`], or a transport error when nobody is listening.
//! - A handler replies at most once; the consuming methods on [`Delivery`]
//!   enforce that. Dropping a delivery unanswered resolves the caller with
//!   [`SendError::Dropped`] instead of hanging.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tokio::sync::{RwLock, mpsc, oneshot};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::message::{Message, TabId};

// =============================================================================
// CONFIG
// =============================================================================

/// Default mailbox depth per endpoint.
const DEFAULT_MAILBOX_CAPACITY: usize = 32;

fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

fn mailbox_capacity() -> usize {
    env_parse("PAGESHADE_MAILBOX_CAPACITY", DEFAULT_MAILBOX_CAPACITY).max(1)
}

// =============================================================================
// ADDRESSING
// =============================================================================

/// A reachable surface on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    /// The background coordinator.
    Background,
    /// The content listener attached to one tab.
    Tab(TabId),
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Background => write!(f, "background"),
            Endpoint::Tab(id) => write!(f, "tab {id}"),
        }
    }
}

// =============================================================================
// ERROR CODES
// =============================================================================

/// Grepable error code for structured rejections.
pub trait ErrorCode: fmt::Display {
    fn error_code(&self) -> &'static str;
}

/// Structured refusal sent back instead of a response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code}: {message}")]
pub struct Rejection {
    /// Stable, grepable code (`E_*`).
    pub code: String,
    /// Human-readable detail.
    pub message: String,
}

impl Rejection {
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self { code: code.into(), message: message.into() }
    }

    /// Build a rejection from a typed error.
    #[must_use]
    pub fn from_error(err: &(impl ErrorCode + ?Sized)) -> Self {
        Self { code: err.error_code().into(), message: err.to_string() }
    }
}

/// Why a request could not produce a response.
#[derive(Debug, thiserror::Error)]
pub enum SendError {
    #[error("no listener registered for {0}")]
    NoListener(Endpoint),
    #[error("listener for {0} dropped the request without replying")]
    Dropped(Endpoint),
    #[error("request rejected: {0}")]
    Rejected(Rejection),
}

// =============================================================================
// DELIVERY
// =============================================================================

type Reply = Result<Message, Rejection>;

/// One inbound message plus the obligation to answer it.
#[derive(Debug)]
pub struct Delivery {
    message: Message,
    reply: oneshot::Sender<Reply>,
}

impl Delivery {
    /// The message being delivered.
    #[must_use]
    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Answer with a response envelope.
    pub fn respond(self, response: Message) {
        let _ = self.reply.send(Ok(response));
    }

    /// Refuse with a structured rejection.
    pub fn reject(self, rejection: Rejection) {
        let _ = self.reply.send(Err(rejection));
    }
}

// =============================================================================
// BUS
// =============================================================================

struct Mailbox {
    connection_id: Uuid,
    tx: mpsc::Sender<Delivery>,
}

/// Point-to-point request/response bus. Clone freely; all clones share the
/// same routing table.
#[derive(Clone, Default)]
pub struct MessageBus {
    endpoints: Arc<RwLock<HashMap<Endpoint, Mailbox>>>,
}

impl MessageBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a listener at `endpoint`, replacing any previous one.
    ///
    /// The returned receiver yields every request addressed to the endpoint
    /// until the listener is replaced or unregistered.
    pub async fn register(&self, endpoint: Endpoint) -> mpsc::Receiver<Delivery> {
        let (tx, rx) = mpsc::channel(mailbox_capacity());
        let connection_id = Uuid::new_v4();
        let mut endpoints = self.endpoints.write().await;
        if let Some(previous) = endpoints.insert(endpoint, Mailbox { connection_id, tx }) {
            warn!(connection_id = %previous.connection_id, %endpoint, "bus: listener replaced");
        }
        info!(%connection_id, %endpoint, "bus: listener registered");
        rx
    }

    /// Detach the listener at `endpoint`, if any. Its mailbox closes.
    pub async fn unregister(&self, endpoint: Endpoint) {
        let mut endpoints = self.endpoints.write().await;
        if let Some(mailbox) = endpoints.remove(&endpoint) {
            info!(connection_id = %mailbox.connection_id, %endpoint, "bus: listener unregistered");
        }
    }

    /// Send `message` to `endpoint` and wait for the single reply.
    ///
    /// # Errors
    ///
    /// - [`SendError::NoListener`] when nothing is registered at `endpoint`
    ///   or its mailbox has already shut down.
    /// - [`SendError::Dropped`] when the listener discards the delivery
    ///   without answering.
    /// - [`SendError::Rejected`] when the listener answers with a
    ///   [`Rejection`].
    pub async fn request(&self, endpoint: Endpoint, message: Message) -> Result<Message, SendError> {
        let tx = {
            let endpoints = self.endpoints.read().await;
            endpoints.get(&endpoint).map(|mailbox| mailbox.tx.clone())
        };
        let Some(tx) = tx else {
            return Err(SendError::NoListener(endpoint));
        };

        debug!(%endpoint, action = message.action(), "bus: request");
        let (reply_tx, reply_rx) = oneshot::channel();
        if tx.send(Delivery { message, reply: reply_tx }).await.is_err() {
            return Err(SendError::NoListener(endpoint));
        }

        match reply_rx.await {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(rejection)) => Err(SendError::Rejected(rejection)),
            Err(_) => Err(SendError::Dropped(endpoint)),
        }
    }

    /// Request against the background coordinator.
    ///
    /// # Errors
    /// Same as [`MessageBus::request`].
    pub async fn send_to_background(&self, message: Message) -> Result<Message, SendError> {
        self.request(Endpoint::Background, message).await
    }

    /// Request against one tab's content listener.
    ///
    /// # Errors
    /// Same as [`MessageBus::request`].
    pub async fn send_to_tab(&self, tab_id: TabId, message: Message) -> Result<Message, SendError> {
        self.request(Endpoint::Tab(tab_id), message).await
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "bus_test.rs"]
mod tests;
