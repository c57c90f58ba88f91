//! # Capture Protocols
//!
//! Shared definitions for the owner capture workflow.
//! Contains records, keys and trait seams only - no implementations.
//!
//! ## Core Traits
//!
//! - [`HandoffBackend`] - Durable key/value storage shared between page contexts
//! - [`PageHost`] - The browser glue that opens, fills, clicks and closes pages

pub mod error;
pub mod handoff;
pub mod host;
pub mod types;

pub use error::{DeliveryError, HandoffError, HostError};
pub use handoff::{HandoffBackend, HandoffKey};
pub use host::PageHost;
pub use types::*;
