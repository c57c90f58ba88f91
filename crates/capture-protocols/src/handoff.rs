//! Handoff storage protocol.
//!
//! Page contexts never share memory. Everything one context needs from
//! another travels through a durable key/value backend under a small,
//! fixed set of keys.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::HandoffError;

/// Well-known keys of the handoff state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandoffKey {
    /// Business name captured from the origin trigger.
    BusinessName,
    /// Base URL of the origin application that started the lookup.
    OriginBase,
    /// Millisecond timestamp written after a successful delivery.
    RefreshToken,
}

impl HandoffKey {
    /// All keys, in storage order.
    pub const ALL: [HandoffKey; 3] = [
        HandoffKey::BusinessName,
        HandoffKey::OriginBase,
        HandoffKey::RefreshToken,
    ];

    /// Stable storage name of the key.
    pub fn as_str(&self) -> &'static str {
        match self {
            HandoffKey::BusinessName => "capture_last_business_name",
            HandoffKey::OriginBase => "capture_last_base_url",
            HandoffKey::RefreshToken => "capture_refresh_token",
        }
    }
}

impl std::fmt::Display for HandoffKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw key/value storage behind the handoff store.
///
/// Reads and writes are atomic per key. There are no transactions across
/// keys; concurrent writers resolve as last-write-wins.
#[async_trait]
pub trait HandoffBackend: Send + Sync {
    /// Read a value, `None` when the key was never written or was removed.
    async fn get(&self, key: HandoffKey) -> Result<Option<Value>, HandoffError>;

    /// Write a value.
    async fn set(&self, key: HandoffKey, value: Value) -> Result<(), HandoffError>;

    /// Remove a value.
    async fn remove(&self, key: HandoffKey) -> Result<(), HandoffError>;
}
