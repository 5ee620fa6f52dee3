//! Tab registry: which pages are open and which one is focused.
//!
//! The host browser owns tab lifecycle; this registry mirrors the slice of
//! it the coordinator needs: the open tab ids and the single active tab
//! that untargeted apply requests resolve to.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::message::TabId;

#[derive(Default)]
struct TabsInner {
    /// Open tabs in opening order.
    open: Vec<TabId>,
    active: Option<TabId>,
    next_id: TabId,
}

/// Shared registry handle. Clones observe the same state.
#[derive(Clone, Default)]
pub struct TabRegistry {
    inner: Arc<RwLock<TabsInner>>,
}

impl TabRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a new tab, focus it, and return its id. Ids start at 1 and are
    /// never reused.
    pub async fn open(&self) -> TabId {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let id = inner.next_id;
        inner.open.push(id);
        inner.active = Some(id);
        debug!(tab_id = id, "tabs: opened");
        id
    }

    /// Focus an already open tab. Returns `false` for unknown ids, leaving
    /// the current focus untouched.
    pub async fn activate(&self, id: TabId) -> bool {
        let mut inner = self.inner.write().await;
        if !inner.open.contains(&id) {
            warn!(tab_id = id, "tabs: activate on unknown tab");
            return false;
        }
        inner.active = Some(id);
        debug!(tab_id = id, "tabs: activated");
        true
    }

    /// Close a tab. Focus falls back to the most recently opened remaining
    /// tab, or to none.
    pub async fn close(&self, id: TabId) {
        let mut inner = self.inner.write().await;
        inner.open.retain(|open| *open != id);
        if inner.active == Some(id) {
            inner.active = inner.open.last().copied();
        }
        debug!(tab_id = id, active = ?inner.active, "tabs: closed");
    }

    /// The focused tab, if any tab is open.
    pub async fn active_tab(&self) -> Option<TabId> {
        self.inner.read().await.active
    }

    /// Ids of all open tabs in opening order.
    pub async fn open_tabs(&self) -> Vec<TabId> {
        self.inner.read().await.open.clone()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "tabs_test.rs"]
mod tests;
