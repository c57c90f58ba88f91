//! Officials delivery to the origin application.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use capture_config::{OriginConfig, TimingConfig};
use capture_protocols::{DeliveryError, OfficialsPayload};

/// Acknowledgement from the origin endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeliveryReceipt {
    pub status: u16,
    /// Number of officials the origin stored, when it said so.
    pub count: Option<u64>,
}

/// Posts officials payloads to `{origin base}{endpoint path}`.
pub struct DeliveryClient {
    client: Client,
    endpoint_path: String,
}

impl DeliveryClient {
    pub fn new(endpoint_path: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("owner-capture/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            endpoint_path: endpoint_path.into(),
        }
    }

    pub fn from_config(origin: &OriginConfig, timing: &TimingConfig) -> Self {
        Self::new(origin.endpoint_path.clone(), timing.request_timeout())
    }

    /// Endpoint URL for an origin base. Trailing slashes of the base are ignored.
    pub fn endpoint(&self, base: &str) -> Result<Url, DeliveryError> {
        let base = base.trim().trim_end_matches('/');
        let path = if self.endpoint_path.starts_with('/') {
            self.endpoint_path.clone()
        } else {
            format!("/{}", self.endpoint_path)
        };

        let url = Url::parse(&format!("{}{}", base, path))
            .map_err(|e| DeliveryError::InvalidEndpoint(format!("{}{}: {}", base, path, e)))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(DeliveryError::InvalidEndpoint(format!(
                "unsupported scheme '{}' in {}",
                other, url
            ))),
        }
    }

    /// POST the payload as JSON.
    ///
    /// Any 2xx status is a success. A body without a numeric `count` is
    /// tolerated and logged.
    pub async fn deliver(
        &self,
        base: &str,
        payload: &OfficialsPayload,
    ) -> Result<DeliveryReceipt, DeliveryError> {
        let url = self.endpoint(base)?;
        info!(
            "Sending {} officials for {} to {}",
            payload.officials().len(),
            payload.display_name(),
            url
        );

        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(|e| DeliveryError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DeliveryError::Transport(format!("Failed to read body: {}", e)))?;
        debug!("Delivery response: {} {}", status, body);

        if !status.is_success() {
            return Err(DeliveryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let count = match serde_json::from_str::<Value>(&body) {
            Ok(value) => value.get("count").and_then(Value::as_u64),
            Err(_) => None,
        };
        match count {
            Some(n) => info!("Origin stored {} officials", n),
            None => warn!("Officials sent but the response carried no count: {}", body),
        }

        Ok(DeliveryReceipt {
            status: status.as_u16(),
            count,
        })
    }
}

#[cfg(test)]
#[path = "delivery_tests.rs"]
mod tests;
