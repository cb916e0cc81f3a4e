//! Application state management
//!
//! Shared handles passed to the scheduler and the processing services.

use std::sync::Arc;

use crate::clients::JudgeClients;
use crate::db::Store;
use crate::services::RoomLocks;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

/// Inner state (wrapped in Arc for cheap cloning)
struct AppStateInner {
    /// Persistence backend
    store: Arc<dyn Store>,

    /// Judge client factory
    clients: JudgeClients,

    /// Serializes volunteer selection per room
    room_locks: RoomLocks,
}

impl AppState {
    /// Create a new application state
    pub fn new(store: Arc<dyn Store>, clients: JudgeClients) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                store,
                clients,
                room_locks: RoomLocks::new(),
            }),
        }
    }

    /// Get a reference to the store
    pub fn store(&self) -> &dyn Store {
        self.inner.store.as_ref()
    }

    /// Get a reference to the judge client factory
    pub fn clients(&self) -> &JudgeClients {
        &self.inner.clients
    }

    /// Get a reference to the room locks
    pub fn room_locks(&self) -> &RoomLocks {
        &self.inner.room_locks
    }
}
