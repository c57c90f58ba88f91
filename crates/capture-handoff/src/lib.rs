//! # Capture Handoff
//!
//! Shared state between page contexts that never talk to each other
//! directly.
//!
//! ## Features
//!
//! - Typed accessors over a per-key atomic key/value backend
//! - In-memory and file-backed backends
//! - A polling watcher that consumes refresh tokens exactly once

pub mod backend;
pub mod store;
pub mod watcher;

pub use backend::{FileBackend, MemoryBackend};
pub use store::HandoffStore;
pub use watcher::{TokenWatcher, WatchOutcome, WatcherHandle};
