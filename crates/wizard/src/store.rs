//! Legacy campaign store: five-step linear wizard with loose selection tables.
//!
//! Selections (audiences, audience→promo mapping, creative variants) are
//! scoped to the campaign currently being edited and are wiped by
//! `complete_campaign`.

use crate::models::*;
use crate::queries::CampaignQueries;
use campaign_core::event_bus::{noop_sink, WorkflowEvent, WorkflowEventKind, WorkflowEventSink};
use campaign_core::types::{CampaignStatus, WizardStep};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

pub struct CampaignStore {
    campaigns: Vec<Campaign>,
    active_campaign: Option<Campaign>,
    current_step: WizardStep,
    selected_audiences: Vec<Audience>,
    audience_promos: HashMap<String, String>,
    creative_variants: Vec<CreativeVariant>,
    events: Arc<dyn WorkflowEventSink>,
}

impl CampaignStore {
    pub fn new() -> Self {
        Self {
            campaigns: Vec::new(),
            active_campaign: None,
            current_step: WizardStep::Context,
            selected_audiences: Vec::new(),
            audience_promos: HashMap::new(),
            creative_variants: Vec::new(),
            events: noop_sink(),
        }
    }

    pub fn with_event_sink(mut self, events: Arc<dyn WorkflowEventSink>) -> Self {
        self.events = events;
        self
    }

    // ─── Campaigns ─────────────────────────────────────────────────────────

    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    /// Prepend an existing record.
    pub fn add_campaign(&mut self, campaign: Campaign) {
        let id = campaign.id;
        self.campaigns.insert(0, campaign);
        self.emit(WorkflowEventKind::CampaignCreated, Some(id));
    }

    pub fn create_campaign(
        &mut self,
        name: impl Into<String>,
        owner: impl Into<String>,
    ) -> Campaign {
        let campaign = Campaign::new(name, owner);
        info!(campaign_id = %campaign.id, name = %campaign.name, "Campaign created");
        self.add_campaign(campaign.clone());
        campaign
    }

    /// Merge `update` into the campaign with `id`. The active copy is kept
    /// in sync when it is the same record.
    pub fn update_campaign(&mut self, id: Uuid, update: CampaignUpdate) -> Option<Campaign> {
        let updated = self.apply_update(id, update)?;
        self.emit(WorkflowEventKind::CampaignUpdated, Some(id));
        Some(updated)
    }

    pub fn delete_campaign(&mut self, id: Uuid) -> bool {
        let before = self.campaigns.len();
        self.campaigns.retain(|c| c.id != id);
        let removed = self.campaigns.len() != before;
        if removed {
            if self.active_campaign.as_ref().is_some_and(|c| c.id == id) {
                self.active_campaign = None;
            }
            info!(campaign_id = %id, "Campaign deleted");
            self.emit(WorkflowEventKind::CampaignDeleted, Some(id));
        }
        removed
    }

    pub fn get_active_campaign(&self) -> Option<&Campaign> {
        self.active_campaign.as_ref()
    }

    pub fn get_campaigns_by_status(&self, status: CampaignStatus) -> Vec<Campaign> {
        self.campaigns_by_status(status)
    }

    // ─── Edit scope ────────────────────────────────────────────────────────

    /// Start (or stop, with `None`) editing a campaign. The step pointer
    /// resumes from the campaign's own step.
    pub fn set_active_campaign(&mut self, campaign: Option<Campaign>) {
        if self.active_campaign == campaign {
            debug!("Active campaign unchanged");
            return;
        }
        let id = campaign.as_ref().map(|c| c.id);
        if let Some(c) = &campaign {
            self.current_step = c.current_step;
        }
        self.active_campaign = campaign;
        self.emit(WorkflowEventKind::CampaignSelected, id);
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub fn set_current_step(&mut self, step: WizardStep) {
        let active = self.active_campaign.as_ref().map(|c| (c.id, c.current_step));
        let unchanged = self.current_step == step
            && active.map_or(true, |(_, active_step)| active_step == step);
        if unchanged {
            return;
        }

        self.current_step = step;
        if let Some((id, _)) = active {
            let update = CampaignUpdate {
                current_step: Some(step),
                ..Default::default()
            };
            if self.apply_update(id, update.clone()).is_none() {
                // Active record that was never added to the list.
                if let Some(active) = self.active_campaign.as_mut() {
                    active.apply(update);
                }
            }
        }
        debug!(step = %step, "Wizard step changed");
        self.emit(
            WorkflowEventKind::WizardStepChanged { step },
            self.active_campaign.as_ref().map(|c| c.id),
        );
    }

    pub fn next_step(&mut self) -> WizardStep {
        let step = self.current_step.next();
        self.set_current_step(step);
        step
    }

    pub fn previous_step(&mut self) -> WizardStep {
        let step = self.current_step.previous();
        self.set_current_step(step);
        step
    }

    // ─── Selections ────────────────────────────────────────────────────────

    pub fn selected_audiences(&self) -> &[Audience] {
        &self.selected_audiences
    }

    /// Append an audience. Duplicates are kept; callers dedupe if they care.
    pub fn add_audience(&mut self, audience: Audience) {
        self.selected_audiences.push(audience);
        self.emit_selection();
    }

    /// Drop every selected audience with `audience_id`.
    pub fn remove_audience(&mut self, audience_id: &str) {
        let before = self.selected_audiences.len();
        self.selected_audiences.retain(|a| a.id != audience_id);
        if self.selected_audiences.len() != before {
            self.emit_selection();
        }
    }

    pub fn audience_promos(&self) -> &HashMap<String, String> {
        &self.audience_promos
    }

    pub fn promo_for(&self, audience_id: &str) -> Option<&str> {
        self.audience_promos.get(audience_id).map(String::as_str)
    }

    /// Map an audience to a promotion; the last write for a key wins.
    pub fn set_audience_promo(
        &mut self,
        audience_id: impl Into<String>,
        promo_id: impl Into<String>,
    ) {
        self.audience_promos.insert(audience_id.into(), promo_id.into());
        self.emit_selection();
    }

    pub fn creative_variants(&self) -> &[CreativeVariant] {
        &self.creative_variants
    }

    pub fn set_creative_variants(&mut self, variants: Vec<CreativeVariant>) {
        self.creative_variants = variants;
        self.emit_selection();
    }

    // ─── Commit ────────────────────────────────────────────────────────────

    /// Mark the active campaign live in the master list and reset all
    /// edit-scoped state. No-op without an active campaign.
    pub fn complete_campaign(&mut self) -> Option<Campaign> {
        let Some(active) = self.active_campaign.take() else {
            debug!("Complete ignored: no active campaign");
            return None;
        };
        let update = CampaignUpdate {
            status: Some(CampaignStatus::Live),
            ..Default::default()
        };
        let completed = match self.campaigns.iter_mut().find(|c| c.id == active.id) {
            Some(entry) => {
                entry.apply(update);
                entry.clone()
            }
            None => {
                let mut detached = active;
                detached.apply(update);
                detached
            }
        };

        self.clear_edit_state();
        info!(campaign_id = %completed.id, name = %completed.name, "Campaign completed");
        metrics::counter!("wizard.campaigns_completed").increment(1);
        self.emit(
            WorkflowEventKind::CampaignCompleted {
                status: completed.status,
            },
            Some(completed.id),
        );
        Some(completed)
    }

    /// Abandon the current edit without touching the master list.
    pub fn reset_wizard(&mut self) {
        let dirty = self.active_campaign.is_some()
            || self.current_step != WizardStep::Context
            || !self.selected_audiences.is_empty()
            || !self.audience_promos.is_empty()
            || !self.creative_variants.is_empty();
        if !dirty {
            return;
        }
        self.active_campaign = None;
        self.clear_edit_state();
        self.emit(WorkflowEventKind::SelectionChanged, None);
    }

    /// Merge `update` into the list entry and the matching active copy.
    fn apply_update(&mut self, id: Uuid, update: CampaignUpdate) -> Option<Campaign> {
        let entry = self.campaigns.iter_mut().find(|c| c.id == id)?;
        entry.apply(update);
        let updated = entry.clone();
        if let Some(active) = self.active_campaign.as_mut() {
            if active.id == id {
                *active = updated.clone();
            }
        }
        Some(updated)
    }

    fn clear_edit_state(&mut self) {
        self.current_step = WizardStep::Context;
        self.selected_audiences.clear();
        self.audience_promos.clear();
        self.creative_variants.clear();
    }

    fn emit_selection(&self) {
        self.emit(
            WorkflowEventKind::SelectionChanged,
            self.active_campaign.as_ref().map(|c| c.id),
        );
    }

    fn emit(&self, kind: WorkflowEventKind, campaign_id: Option<Uuid>) {
        self.events.emit(WorkflowEvent::new(kind, campaign_id));
    }
}

impl Default for CampaignStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CampaignQueries for CampaignStore {
    type Record = Campaign;

    fn records(&self) -> &[Self::Record] {
        &self.campaigns
    }

    fn active_campaign(&self) -> Option<Self::Record> {
        self.active_campaign.clone()
    }
}
