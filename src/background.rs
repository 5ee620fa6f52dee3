//! Background coordinator: the hub every request flows through.
//!
//! ARCHITECTURE
//! ============
//! Popup and content pages never talk to each other. The coordinator owns
//! the storage key, the toolbar badge, and the forwarding path to content
//! pages:
//! - `INIT_THEME`: resolve the stored theme, refresh the badge, write the
//!   resolved record back, answer with the theme.
//! - `APPLY_THEME`: forward to the target tab, refresh the badge, persist,
//!   answer with the content listener's acknowledgment.
//!
//! ERROR HANDLING
//! ==============
//! Every refusal is a structured rejection with a grepable `E_*` code, so
//! the popup's error arm always has something to show. Forwarding runs
//! first: when no content page confirms the theme, neither the badge nor
//! storage is touched. After a confirmed forward the badge and store are
//! updated without rollback; a failed persist rejects the request but
//! leaves the session themed.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::badge::{self, Badge};
use crate::bus::{Delivery, Endpoint, ErrorCode, MessageBus, Rejection, SendError};
use crate::message::{Message, TabId};
use crate::storage::{self, KvStore, StorageError};
use crate::tabs::TabRegistry;
use crate::theme::Theme;

// =============================================================================
// ERROR TYPE
// =============================================================================

/// Why the coordinator refused a request.
#[derive(Debug, thiserror::Error)]
pub enum HubError {
    #[error("no active tab to apply the theme to")]
    NoActiveTab,
    #[error("tab id {0} is not addressable")]
    InvalidTab(TabId),
    #[error("content page did not confirm the theme: {0}")]
    Forward(SendError),
    #[error("theme could not be persisted: {0}")]
    Storage(#[from] StorageError),
}

impl ErrorCode for HubError {
    fn error_code(&self) -> &'static str {
        match self {
            HubError::NoActiveTab => "E_NO_ACTIVE_TAB",
            HubError::InvalidTab(_) => "E_INVALID_TAB",
            HubError::Forward(_) => "E_FORWARD",
            HubError::Storage(_) => "E_STORAGE",
        }
    }
}

// =============================================================================
// LIFECYCLE
// =============================================================================

/// Start the coordinator. Its mailbox is registered before this returns,
/// so surfaces brought up afterwards can reach it immediately.
pub async fn spawn(
    bus: MessageBus,
    tabs: TabRegistry,
    store: Arc<dyn KvStore>,
    badge: Badge,
) -> JoinHandle<()> {
    let rx = bus.register(Endpoint::Background).await;
    tokio::spawn(serve(rx, bus, tabs, store, badge))
}

async fn serve(
    mut rx: mpsc::Receiver<Delivery>,
    bus: MessageBus,
    tabs: TabRegistry,
    store: Arc<dyn KvStore>,
    badge: Badge,
) {
    info!("background: coordinator ready");
    while let Some(delivery) = rx.recv().await {
        handle(&bus, &tabs, store.as_ref(), &badge, delivery).await;
    }
    info!("background: coordinator stopped");
}

// =============================================================================
// DISPATCH
// =============================================================================

async fn handle(bus: &MessageBus, tabs: &TabRegistry, store: &dyn KvStore, badge: &Badge, delivery: Delivery) {
    debug!(action = delivery.message().action(), "background: request");
    match delivery.message().clone() {
        Message::InitTheme { .. } => match resolve_theme(store, badge).await {
            Ok(theme) => delivery.respond(Message::init_response(theme)),
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "background: init failed");
                delivery.reject(Rejection::from_error(&e));
            }
        },
        Message::ApplyTheme { theme, tab_id } => {
            match apply_theme(bus, tabs, store, badge, theme, tab_id).await {
                Ok(ack) => delivery.respond(ack),
                Err(e) => {
                    warn!(error = %e, code = e.error_code(), "background: apply failed");
                    delivery.reject(Rejection::from_error(&e));
                }
            }
        }
    }
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Serve an init request: load, badge, write back, hand out.
///
/// The write-back turns first contact into a stored record, so the default
/// exists on disk instead of being implied by absence.
async fn resolve_theme(store: &dyn KvStore, badge: &Badge) -> Result<Theme, HubError> {
    let theme = storage::load_theme(store).await;
    badge::update_badge(badge, &theme).await;
    storage::save_theme(store, &theme).await?;
    Ok(theme)
}

/// Serve an apply request: forward to content first, then badge and
/// persist, then hand the content acknowledgment back to the sender.
async fn apply_theme(
    bus: &MessageBus,
    tabs: &TabRegistry,
    store: &dyn KvStore,
    badge: &Badge,
    theme: Theme,
    tab_id: Option<TabId>,
) -> Result<Message, HubError> {
    let target = resolve_target(tabs, tab_id).await?;
    let ack = bus
        .send_to_tab(target, Message::apply(theme.clone()).with_tab(target))
        .await
        .map_err(HubError::Forward)?;

    badge::update_badge(badge, &theme).await;
    storage::save_theme(store, &theme).await?;
    info!(tab_id = target, dark = theme.dark, "background: theme applied");
    Ok(ack)
}

/// Pick the tab an apply goes to: the envelope's explicit target, else the
/// active tab.
async fn resolve_target(tabs: &TabRegistry, tab_id: Option<TabId>) -> Result<TabId, HubError> {
    let target = match tab_id {
        Some(id) => id,
        None => tabs.active_tab().await.ok_or(HubError::NoActiveTab)?,
    };
    if target <= 0 {
        return Err(HubError::InvalidTab(target));
    }
    Ok(target)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "background_test.rs"]
mod tests;
