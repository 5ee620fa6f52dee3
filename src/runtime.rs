//! Host runtime wiring: one place that owns the shared surfaces.
//!
//! DESIGN
//! ======
//! [`Runtime`] bundles the bus, tab registry, badge, and store, and brings
//! the surfaces up in dependency order: coordinator first, then pages,
//! popup last. Every piece is an Arc-backed handle, so the bundle clones
//! cheaply and all clones observe the same session.

use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::background;
use crate::badge::Badge;
use crate::bus::{Endpoint, MessageBus};
use crate::content;
use crate::dom::Document;
use crate::message::TabId;
use crate::popup::Popup;
use crate::storage::{KvStore, MemoryStore};
use crate::tabs::TabRegistry;

/// Shared surfaces of one simulated browser profile.
#[derive(Clone)]
pub struct Runtime {
    pub bus: MessageBus,
    pub tabs: TabRegistry,
    pub badge: Badge,
    pub store: Arc<dyn KvStore>,
}

impl Runtime {
    /// Fresh profile over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Self { bus: MessageBus::new(), tabs: TabRegistry::new(), badge: Badge::new(), store }
    }

    /// Fresh profile with nothing persisted.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Start the background coordinator. Ready to serve once this returns.
    pub async fn start_background(&self) -> JoinHandle<()> {
        background::spawn(self.bus.clone(), self.tabs.clone(), Arc::clone(&self.store), self.badge.clone())
            .await
    }

    /// Open a page: register a tab, attach a content listener, and wait
    /// for the stored theme to land on the fresh document.
    pub async fn open_page(&self) -> PageHandle {
        let tab_id = self.tabs.open().await;
        let document = Arc::new(RwLock::new(Document::new()));
        let listener = content::spawn(self.bus.clone(), tab_id, Arc::clone(&document)).await;
        PageHandle { tab_id, document, listener, bus: self.bus.clone(), tabs: self.tabs.clone() }
    }

    /// Open the popup, synced with the stored theme.
    pub async fn open_popup(&self) -> Popup {
        Popup::open(self.bus.clone()).await
    }
}

/// One open page: its tab id, its document, and the listener serving it.
pub struct PageHandle {
    pub tab_id: TabId,
    pub document: Arc<RwLock<Document>>,
    listener: JoinHandle<()>,
    bus: MessageBus,
    tabs: TabRegistry,
}

impl PageHandle {
    /// Close the page: drop its mailbox, retire the tab, and wait for the
    /// listener to wind down.
    pub async fn close(self) {
        self.bus.unregister(Endpoint::Tab(self.tab_id)).await;
        self.tabs.close(self.tab_id).await;
        let _ = self.listener.await;
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================

#[cfg(test)]
pub mod test_helpers {
    use super::*;
    use crate::storage::StorageError;
    use serde_json::Value;

    /// Store that fails every operation, for exercising rejection paths.
    pub struct BrokenStore;

    #[async_trait::async_trait]
    impl KvStore for BrokenStore {
        async fn get(&self, _key: &str) -> Result<Option<Value>, StorageError> {
            Err(StorageError::Io(std::io::Error::other("store offline")))
        }

        async fn set(&self, _key: &str, _value: Value) -> Result<(), StorageError> {
            Err(StorageError::Io(std::io::Error::other("store offline")))
        }
    }

    /// Runtime over a fresh in-memory store. Coordinator not yet started.
    #[must_use]
    pub fn memory_runtime() -> Runtime {
        Runtime::in_memory()
    }

    /// Runtime with the coordinator already serving.
    pub async fn started_memory_runtime() -> Runtime {
        let runtime = Runtime::in_memory();
        runtime.start_background().await;
        runtime
    }

    /// Runtime whose store fails every read and write.
    #[must_use]
    pub fn broken_store_runtime() -> Runtime {
        Runtime::new(Arc::new(BrokenStore))
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[path = "runtime_test.rs"]
mod tests;
