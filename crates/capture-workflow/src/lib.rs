//! # Capture Workflow
//!
//! Drives one owner lookup across the origin application and the registry:
//! stage classification by URL, per-stage handlers over a [`PageHost`], and
//! delivery of extracted officials back to the origin.
//!
//! [`PageHost`]: capture_protocols::PageHost

pub mod controller;
pub mod delivery;
pub mod error;
pub mod stage;

pub use controller::{
    ProfileOutcome, ResultsOutcome, RunOutcome, SearchOutcome, TriggerOutcome, WorkflowController,
};
pub use delivery::{DeliveryClient, DeliveryReceipt};
pub use error::WorkflowError;
pub use stage::Stage;
