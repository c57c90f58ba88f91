//! Workflow errors.

use thiserror::Error;

use capture_protocols::{DeliveryError, HandoffError, HostError};

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Handoff store error: {0}")]
    Handoff(#[from] HandoffError),

    #[error("Delivery error: {0}")]
    Delivery(#[from] DeliveryError),

    #[error("Page host error: {0}")]
    Host(#[from] HostError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<url::ParseError> for WorkflowError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}
