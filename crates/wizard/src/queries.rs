//! Read-side surface shared by both stores.

use crate::models::{AgenticCampaign, Campaign};
use campaign_core::types::CampaignStatus;
use std::sync::Arc;
use uuid::Uuid;

/// Minimal contract a campaign record exposes to queries.
pub trait HasStatus {
    fn id(&self) -> Uuid;
    fn status(&self) -> CampaignStatus;
}

impl HasStatus for Campaign {
    fn id(&self) -> Uuid {
        self.id
    }
    fn status(&self) -> CampaignStatus {
        self.status
    }
}

impl HasStatus for AgenticCampaign {
    fn id(&self) -> Uuid {
        self.id
    }
    fn status(&self) -> CampaignStatus {
        self.status
    }
}

impl<T: HasStatus> HasStatus for Arc<T> {
    fn id(&self) -> Uuid {
        self.as_ref().id()
    }
    fn status(&self) -> CampaignStatus {
        self.as_ref().status()
    }
}

/// Queries available on any campaign store.
pub trait CampaignQueries {
    type Record: HasStatus + Clone;

    /// All records, in store order.
    fn records(&self) -> &[Self::Record];

    /// The record currently being edited, if any.
    fn active_campaign(&self) -> Option<Self::Record>;

    fn find_campaign(&self, id: Uuid) -> Option<&Self::Record> {
        self.records().iter().find(|r| r.id() == id)
    }

    /// Records with `status`, order preserved.
    fn campaigns_by_status(&self, status: CampaignStatus) -> Vec<Self::Record> {
        self.records()
            .iter()
            .filter(|r| r.status() == status)
            .cloned()
            .collect()
    }

    fn count_by_status(&self, status: CampaignStatus) -> usize {
        self.records()
            .iter()
            .filter(|r| r.status() == status)
            .count()
    }
}
