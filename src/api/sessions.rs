//! Per-session conversation memory registry.
//!
//! Each conversation session owns an isolated [`ConversationMemory`]; turns
//! within a session serialize on the session's mutex while independent
//! sessions proceed concurrently. The registry map itself is guarded by a
//! parking_lot lock that is never held across an await point.

use crate::memory::ConversationMemory;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Session-id-keyed registry of conversation memories.
pub struct SessionRegistry {
    memory_capacity: usize,
    sessions: RwLock<HashMap<String, Arc<Mutex<ConversationMemory>>>>,
}

impl SessionRegistry {
    /// Create a registry whose sessions retain `memory_capacity` lines each.
    pub fn new(memory_capacity: usize) -> Self {
        Self {
            memory_capacity,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Fetch the memory for a session, creating it on first use.
    pub fn get_or_create(&self, session_id: &str) -> Arc<Mutex<ConversationMemory>> {
        if let Some(memory) = self.sessions.read().get(session_id) {
            return memory.clone();
        }

        self.sessions
            .write()
            .entry(session_id.to_string())
            .or_insert_with(|| {
                Arc::new(Mutex::new(ConversationMemory::new(self.memory_capacity)))
            })
            .clone()
    }

    /// Number of live sessions.
    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    /// True when no session has been opened yet.
    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
