//! Campaign authoring wizard state: the agentic seven-step lock workflow
//! and the legacy five-step wizard, each as an explicit in-memory store.

pub mod agentic;
pub mod models;
pub mod queries;
pub mod store;

pub use agentic::{AgenticCampaignStore, AgenticSnapshot};
pub use queries::{CampaignQueries, HasStatus};
pub use store::CampaignStore;
