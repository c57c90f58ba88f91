//! Error types shared across the capture crates.

mod delivery;
mod handoff;
mod host;

pub use delivery::*;
pub use handoff::*;
pub use host::*;
