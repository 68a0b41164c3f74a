//! Shared campaign-studio primitives: status and step enums, errors,
//! configuration, and the workflow event sink.

pub mod config;
pub mod error;
pub mod event_bus;
pub mod types;

pub use crate::config::{AppConfig, LockPolicy};
pub use error::{CampaignError, CampaignResult};
pub use event_bus::{WorkflowEvent, WorkflowEventKind, WorkflowEventSink};
pub use types::{CampaignStatus, WizardStep, WorkflowStep};
