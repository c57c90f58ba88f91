//! Typed access to the handoff state.

use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info};

use capture_protocols::{HandoffBackend, HandoffError, HandoffKey, HandoffState, RefreshToken};

/// Typed view over a [`HandoffBackend`].
///
/// Cloning is cheap; every clone talks to the same backend.
#[derive(Clone)]
pub struct HandoffStore {
    backend: Arc<dyn HandoffBackend>,
}

impl HandoffStore {
    pub fn new(backend: Arc<dyn HandoffBackend>) -> Self {
        Self { backend }
    }

    /// Business name captured by the last trigger.
    pub async fn business_name(&self) -> Result<Option<String>, HandoffError> {
        self.get_string(HandoffKey::BusinessName).await
    }

    pub async fn set_business_name(&self, name: &str) -> Result<(), HandoffError> {
        self.backend
            .set(HandoffKey::BusinessName, Value::String(name.to_string()))
            .await
    }

    /// Base URL of the origin that started the lookup.
    pub async fn origin_base(&self) -> Result<Option<String>, HandoffError> {
        self.get_string(HandoffKey::OriginBase).await
    }

    pub async fn set_origin_base(&self, base: &str) -> Result<(), HandoffError> {
        self.backend
            .set(HandoffKey::OriginBase, Value::String(base.to_string()))
            .await
    }

    /// Pending refresh token, [`RefreshToken::NONE`] when absent.
    pub async fn refresh_token(&self) -> Result<RefreshToken, HandoffError> {
        let key = HandoffKey::RefreshToken;
        match self.backend.get(key).await? {
            None | Some(Value::Null) => Ok(RefreshToken::NONE),
            Some(Value::Number(n)) => n.as_u64().map(RefreshToken::new).ok_or_else(|| {
                HandoffError::InvalidValue {
                    key: key.to_string(),
                    message: format!("expected a non-negative integer, got {}", n),
                }
            }),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(RefreshToken::NONE),
            Some(Value::String(s)) => s.trim().parse::<u64>().map(RefreshToken::new).map_err(|e| {
                HandoffError::InvalidValue {
                    key: key.to_string(),
                    message: e.to_string(),
                }
            }),
            Some(other) => Err(HandoffError::InvalidValue {
                key: key.to_string(),
                message: format!("expected an integer, got {}", other),
            }),
        }
    }

    pub async fn set_refresh_token(&self, token: RefreshToken) -> Result<(), HandoffError> {
        debug!("Writing refresh token {}", token);
        self.backend
            .set(HandoffKey::RefreshToken, Value::from(token.value()))
            .await
    }

    /// Reset the token to zero so no other poll acts on it.
    pub async fn clear_refresh_token(&self) -> Result<(), HandoffError> {
        self.set_refresh_token(RefreshToken::NONE).await
    }

    /// Read every key at once. Not atomic across keys.
    pub async fn snapshot(&self) -> Result<HandoffState, HandoffError> {
        Ok(HandoffState {
            business_name: self.business_name().await?,
            origin_base: self.origin_base().await?,
            refresh_token: self.refresh_token().await?,
        })
    }

    /// Remove every key.
    pub async fn reset(&self) -> Result<(), HandoffError> {
        for key in HandoffKey::ALL {
            self.backend.remove(key).await?;
        }
        info!("Handoff state cleared");
        Ok(())
    }

    async fn get_string(&self, key: HandoffKey) -> Result<Option<String>, HandoffError> {
        match self.backend.get(key).await? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s)),
            Some(other) => Err(HandoffError::InvalidValue {
                key: key.to_string(),
                message: format!("expected a string, got {}", other),
            }),
        }
    }
}
