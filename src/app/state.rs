//! Shared Application State
//!
//! Cross-view data store handed explicitly to every view through its
//! render context. The store is a JSON object; its shape belongs to the
//! views that use it.

use serde_json::{Map, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cloneable handle to the shared store
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    inner: Arc<RwLock<Map<String, Value>>>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `initial`
    pub fn with_initial(initial: Map<String, Value>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(initial)),
        }
    }

    pub async fn get(&self, key: &str) -> Option<Value> {
        self.inner.read().await.get(key).cloned()
    }

    /// Set `key`, returning the previous value
    pub async fn set(&self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.inner.write().await.insert(key.into(), value)
    }

    pub async fn remove(&self, key: &str) -> Option<Value> {
        self.inner.write().await.remove(key)
    }

    /// Point-in-time copy of the whole store
    pub async fn snapshot(&self) -> Value {
        Value::Object(self.inner.read().await.clone())
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
