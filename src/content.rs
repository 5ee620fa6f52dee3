//! Content listener: applies themes to one page.
//!
//! LIFECYCLE
//! =========
//! 1. Register the tab's mailbox and start serving it. The listener is
//!    live before the startup query goes out; an apply forwarded to this
//!    tab mid-startup is acknowledged like any other.
//! 2. Ask the background for the current theme and apply it. A fresh page
//!    matches the persisted preference before the user touches anything.
//! 3. Keep serving until the mailbox closes.
//!
//! DESIGN
//! ======
//! - Dark means exactly one override `<style>` (fixed id) on the page;
//!   light means zero. Re-applies replace rather than stack, so the page
//!   always reflects the latest filter value.
//! - Every delivery is answered by echoing its own envelope back after the
//!   page mutation. That echo is the applied-acknowledgment the sender
//!   waits on.
//! - A failed startup query leaves the page untouched; the listener keeps
//!   serving and picks up the next apply.

use std::sync::Arc;

use tokio::sync::{RwLock, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::bus::{Delivery, Endpoint, MessageBus};
use crate::dom::{Document, StyleElement};
use crate::message::{Message, TabId};
use crate::stylesheet::{self, OVERRIDE_STYLE_ID};
use crate::theme::Theme;

/// Attach a content listener for `tab_id` over `document`.
///
/// The delivery loop serves from the moment the mailbox is registered, so
/// an instruction forwarded while the startup query is still in flight is
/// answered instead of sitting in a mailbox nobody reads. The query itself
/// completes before this returns, so callers observe the stored theme
/// already applied.
pub async fn spawn(bus: MessageBus, tab_id: TabId, document: Arc<RwLock<Document>>) -> JoinHandle<()> {
    let rx = bus.register(Endpoint::Tab(tab_id)).await;
    let listener = tokio::spawn(serve(rx, tab_id, Arc::clone(&document)));
    initialize(&bus, tab_id, &document).await;
    listener
}

/// Startup: query the background for the current theme and apply it.
async fn initialize(bus: &MessageBus, tab_id: TabId, document: &Arc<RwLock<Document>>) {
    match bus.send_to_background(Message::init_request()).await {
        Ok(Message::InitTheme { theme: Some(theme), .. }) => {
            apply_theme(&mut *document.write().await, &theme);
            info!(tab_id, dark = theme.dark, "content: startup theme applied");
        }
        Ok(response) => {
            warn!(tab_id, action = response.action(), "content: startup response carried no theme");
        }
        Err(e) => {
            warn!(tab_id, error = %e, "content: startup theme query failed, page left untouched");
        }
    }
}

async fn serve(mut rx: mpsc::Receiver<Delivery>, tab_id: TabId, document: Arc<RwLock<Document>>) {
    while let Some(delivery) = rx.recv().await {
        let echo = delivery.message().clone();
        match delivery.message() {
            Message::ApplyTheme { theme, .. } => {
                apply_theme(&mut *document.write().await, theme);
                info!(tab_id, dark = theme.dark, "content: theme applied");
            }
            Message::InitTheme { .. } => {
                debug!(tab_id, "content: acknowledging non-apply message");
            }
        }
        delivery.respond(echo);
    }
    debug!(tab_id, "content: listener stopped");
}

/// Install or remove the dark override. The previous override is always
/// cleared first, so repeat applies never stack style elements.
pub fn apply_theme(document: &mut Document, theme: &Theme) {
    document.remove_style(OVERRIDE_STYLE_ID);
    if theme.dark {
        document.append_style(StyleElement {
            id: OVERRIDE_STYLE_ID.into(),
            css: stylesheet::override_block(&theme.filter),
        });
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "content_test.rs"]
mod tests;
