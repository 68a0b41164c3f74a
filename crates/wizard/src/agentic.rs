//! Agentic campaign store: the seven-step lock/advance workflow.
//!
//! The store owns an ordered list of `Arc<AgenticCampaign>` snapshots and a
//! separately tracked active id. Every mutation clones the active record,
//! applies the change and swaps the new `Arc` into place, so snapshots
//! handed out earlier never change underneath their holders and untouched
//! records keep their identity.

use crate::models::*;
use crate::queries::CampaignQueries;
use campaign_core::config::{LockPolicy, WizardConfig};
use campaign_core::error::{CampaignError, CampaignResult};
use campaign_core::event_bus::{noop_sink, WorkflowEvent, WorkflowEventKind, WorkflowEventSink};
use campaign_core::types::{CampaignStatus, WorkflowStep};
use serde::Serialize;
use std::io::Write;
use std::sync::Arc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Immutable view of the store handed to observers.
#[derive(Debug, Clone, Serialize)]
pub struct AgenticSnapshot {
    pub campaigns: Vec<Arc<AgenticCampaign>>,
    pub active_campaign_id: Option<Uuid>,
}

impl AgenticSnapshot {
    pub fn to_json_pretty(&self) -> CampaignResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the pretty-printed snapshot followed by a newline.
    pub fn write_json<W: Write>(&self, mut out: W) -> CampaignResult<()> {
        serde_json::to_writer_pretty(&mut out, self)?;
        writeln!(out)?;
        out.flush()?;
        Ok(())
    }
}

pub struct AgenticCampaignStore {
    campaigns: Vec<Arc<AgenticCampaign>>,
    active_campaign_id: Option<Uuid>,
    policy: LockPolicy,
    default_owner: String,
    events: Arc<dyn WorkflowEventSink>,
}

impl AgenticCampaignStore {
    /// Empty store with the permissive lock policy.
    pub fn new() -> Self {
        Self::with_config(&WizardConfig::default())
    }

    pub fn with_config(config: &WizardConfig) -> Self {
        Self {
            campaigns: Vec::new(),
            active_campaign_id: None,
            policy: config.lock_policy,
            default_owner: config.default_owner.clone(),
            events: noop_sink(),
        }
    }

    pub fn with_policy(mut self, policy: LockPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_event_sink(mut self, events: Arc<dyn WorkflowEventSink>) -> Self {
        self.events = events;
        self
    }

    pub fn policy(&self) -> LockPolicy {
        self.policy
    }

    // ─── Campaigns ─────────────────────────────────────────────────────────

    pub fn campaigns(&self) -> &[Arc<AgenticCampaign>] {
        &self.campaigns
    }

    pub fn active_campaign_id(&self) -> Option<Uuid> {
        self.active_campaign_id
    }

    /// Create a draft campaign, prepend it and make it active.
    pub fn create_campaign(&mut self, name: impl Into<String>) -> Arc<AgenticCampaign> {
        let campaign = Arc::new(AgenticCampaign::new(name, self.default_owner.clone()));
        let id = campaign.id;
        self.campaigns.insert(0, campaign.clone());
        self.active_campaign_id = Some(id);
        info!(campaign_id = %id, name = %campaign.name, "Agentic campaign created");
        self.emit(WorkflowEventKind::CampaignCreated, Some(id));
        campaign
    }

    /// Point the store at `id`. Unknown ids are accepted; the active lookup
    /// then simply resolves to nothing.
    pub fn select_campaign(&mut self, id: Uuid) {
        if self.active_campaign_id == Some(id) {
            return;
        }
        self.active_campaign_id = Some(id);
        self.emit(WorkflowEventKind::CampaignSelected, Some(id));
    }

    pub fn clear_selection(&mut self) {
        if self.active_campaign_id.take().is_some() {
            self.emit(WorkflowEventKind::CampaignSelected, None);
        }
    }

    /// Remove the campaign with `id`. Returns `false` when nothing matched.
    pub fn delete_campaign(&mut self, id: Uuid) -> bool {
        let before = self.campaigns.len();
        self.campaigns.retain(|c| c.id != id);
        let removed = self.campaigns.len() != before;
        if removed {
            if self.active_campaign_id == Some(id) {
                self.active_campaign_id = None;
            }
            info!(campaign_id = %id, "Agentic campaign deleted");
            self.emit(WorkflowEventKind::CampaignDeleted, Some(id));
        }
        removed
    }

    pub fn get_active_campaign(&self) -> Option<Arc<AgenticCampaign>> {
        let id = self.active_campaign_id?;
        self.campaigns.iter().find(|c| c.id == id).cloned()
    }

    pub fn get_campaigns_by_status(&self, status: CampaignStatus) -> Vec<Arc<AgenticCampaign>> {
        self.campaigns_by_status(status)
    }

    pub fn snapshot(&self) -> AgenticSnapshot {
        AgenticSnapshot {
            campaigns: self.campaigns.clone(),
            active_campaign_id: self.active_campaign_id,
        }
    }

    // ─── Payload setters ───────────────────────────────────────────────────

    /// Merge `update` into the active campaign's context, creating it if absent.
    pub fn update_context(&mut self, update: ContextUpdate) -> Option<Arc<AgenticCampaign>> {
        self.update_active(WorkflowStep::Context, |c| {
            c.context.get_or_insert_with(CampaignContext::default).merge(update);
            true
        })
    }

    pub fn set_segment_strategy(
        &mut self,
        strategy: SegmentStrategy,
    ) -> Option<Arc<AgenticCampaign>> {
        self.update_active(WorkflowStep::SegmentStrategy, |c| {
            c.segment_strategy = Some(strategy);
            true
        })
    }

    pub fn set_segments(&mut self, segments: Vec<CampaignSegment>) -> Option<Arc<AgenticCampaign>> {
        self.update_active(WorkflowStep::SegmentCreation, |c| {
            c.segments = segments;
            true
        })
    }

    pub fn set_product_groups(
        &mut self,
        groups: Vec<ProductGroup>,
    ) -> Option<Arc<AgenticCampaign>> {
        self.update_active(WorkflowStep::ProductLogic, |c| {
            c.product_groups = groups;
            true
        })
    }

    pub fn set_promotion_mappings(
        &mut self,
        mappings: Vec<PromotionMapping>,
    ) -> Option<Arc<AgenticCampaign>> {
        self.update_active(WorkflowStep::Promotion, |c| {
            c.promotion_mappings = mappings;
            true
        })
    }

    pub fn set_creatives(
        &mut self,
        creatives: Vec<CampaignCreative>,
    ) -> Option<Arc<AgenticCampaign>> {
        self.update_active(WorkflowStep::Creative, |c| {
            c.creatives = creatives;
            true
        })
    }

    // ─── Field-level mutators ──────────────────────────────────────────────

    pub fn approve_segment(&mut self, segment_id: &str) -> Option<Arc<AgenticCampaign>> {
        self.update_active(WorkflowStep::SegmentCreation, |c| {
            match c.segments.iter_mut().find(|s| s.id == segment_id) {
                Some(segment) => {
                    segment.is_approved = true;
                    true
                }
                None => false,
            }
        })
    }

    pub fn remove_segment(&mut self, segment_id: &str) -> Option<Arc<AgenticCampaign>> {
        self.update_active(WorkflowStep::SegmentCreation, |c| {
            let before = c.segments.len();
            c.segments.retain(|s| s.id != segment_id);
            c.segments.len() != before
        })
    }

    pub fn update_product_group_bias(
        &mut self,
        group_id: &str,
        bias: ProductBias,
    ) -> Option<Arc<AgenticCampaign>> {
        self.update_active(WorkflowStep::ProductLogic, |c| {
            match c.product_groups.iter_mut().find(|g| g.id == group_id) {
                Some(group) => {
                    group.bias = bias;
                    true
                }
                None => false,
            }
        })
    }

    /// Set the status of every creative belonging to `segment_id`.
    pub fn update_creative_status(
        &mut self,
        segment_id: &str,
        status: CreativeStatus,
    ) -> Option<Arc<AgenticCampaign>> {
        self.update_active(WorkflowStep::Creative, |c| {
            let mut changed = false;
            for creative in c.creatives.iter_mut().filter(|cr| cr.segment_id == segment_id) {
                creative.status = status;
                changed = true;
            }
            changed
        })
    }

    pub fn update_promotion_mapping(
        &mut self,
        segment_id: &str,
        update: PromotionMappingUpdate,
    ) -> Option<Arc<AgenticCampaign>> {
        self.update_active(WorkflowStep::Promotion, |c| {
            match c.promotion_mappings.iter_mut().find(|m| m.segment_id == segment_id) {
                Some(mapping) => {
                    mapping.apply(update);
                    true
                }
                None => false,
            }
        })
    }

    // ─── Transitions ───────────────────────────────────────────────────────

    pub fn lock_context(&mut self) -> CampaignResult<Option<Arc<AgenticCampaign>>> {
        self.lock_step(WorkflowStep::Context)
    }

    pub fn lock_strategy(&mut self) -> CampaignResult<Option<Arc<AgenticCampaign>>> {
        self.lock_step(WorkflowStep::SegmentStrategy)
    }

    pub fn lock_segments(&mut self) -> CampaignResult<Option<Arc<AgenticCampaign>>> {
        self.lock_step(WorkflowStep::SegmentCreation)
    }

    pub fn lock_products(&mut self) -> CampaignResult<Option<Arc<AgenticCampaign>>> {
        self.lock_step(WorkflowStep::ProductLogic)
    }

    pub fn lock_promotions(&mut self) -> CampaignResult<Option<Arc<AgenticCampaign>>> {
        self.lock_step(WorkflowStep::Promotion)
    }

    pub fn lock_creatives(&mut self) -> CampaignResult<Option<Arc<AgenticCampaign>>> {
        self.lock_step(WorkflowStep::Creative)
    }

    /// Lock `step` on the active campaign and advance to its fixed successor.
    ///
    /// `Ok(None)` when there is no active campaign. Under
    /// [`LockPolicy::Strict`] the step's payload must be populated and the
    /// preceding step locked; a rejected lock leaves the store untouched.
    pub fn lock_step(
        &mut self,
        step: WorkflowStep,
    ) -> CampaignResult<Option<Arc<AgenticCampaign>>> {
        if !step.is_lockable() {
            return Err(CampaignError::NotLockable(step));
        }
        let Some(current) = self.get_active_campaign() else {
            debug!(step = %step, "Lock ignored: no active campaign");
            return Ok(None);
        };
        if self.policy == LockPolicy::Strict {
            if let Err(e) = check_lock_preconditions(&current, step) {
                warn!(campaign_id = %current.id, step = %step, error = %e, "Lock rejected");
                metrics::counter!("wizard.lock_rejected").increment(1);
                return Err(e);
            }
        }

        let updated = self.replace_active(|c| c.lock(step).is_some());
        if let Some(campaign) = &updated {
            info!(
                campaign_id = %campaign.id,
                step = %step,
                next = %campaign.current_step,
                "Step locked"
            );
            metrics::counter!("wizard.steps_locked").increment(1);
            self.emit(
                WorkflowEventKind::StepLocked {
                    step,
                    next: campaign.current_step,
                },
                Some(campaign.id),
            );
        }
        Ok(updated)
    }

    /// Move the current-step pointer anywhere. Locks and the completed log
    /// are left alone.
    pub fn go_to_step(&mut self, step: WorkflowStep) -> Option<Arc<AgenticCampaign>> {
        let updated = self.replace_active(|c| {
            c.current_step = step;
            true
        });
        if let Some(campaign) = &updated {
            debug!(campaign_id = %campaign.id, step = %step, "Navigated to step");
            self.emit(WorkflowEventKind::StepVisited { step }, Some(campaign.id));
        }
        updated
    }

    /// Mark the active campaign live and log the review step.
    pub fn export_campaign(&mut self) -> CampaignResult<Option<Arc<AgenticCampaign>>> {
        let Some(current) = self.get_active_campaign() else {
            debug!("Export ignored: no active campaign");
            return Ok(None);
        };
        if self.policy == LockPolicy::Strict && !current.creatives_locked {
            warn!(campaign_id = %current.id, "Export rejected: creatives not locked");
            metrics::counter!("wizard.lock_rejected").increment(1);
            return Err(CampaignError::NotExportable(WorkflowStep::Creative));
        }

        let updated = self.replace_active(|c| {
            c.status = CampaignStatus::Live;
            c.completed_steps.push(WorkflowStep::Review);
            true
        });
        if let Some(campaign) = &updated {
            info!(campaign_id = %campaign.id, name = %campaign.name, "Campaign exported");
            metrics::counter!("wizard.campaigns_exported").increment(1);
            self.emit(WorkflowEventKind::CampaignExported, Some(campaign.id));
        }
        Ok(updated)
    }

    // ─── Internals ─────────────────────────────────────────────────────────

    fn update_active<F>(&mut self, step: WorkflowStep, apply: F) -> Option<Arc<AgenticCampaign>>
    where
        F: FnOnce(&mut AgenticCampaign) -> bool,
    {
        let updated = self.replace_active(apply);
        if let Some(campaign) = &updated {
            debug!(campaign_id = %campaign.id, step = %step, "Payload updated");
            self.emit(WorkflowEventKind::PayloadUpdated { step }, Some(campaign.id));
        }
        updated
    }

    /// Clone the active record, let `apply` mutate the clone and swap it in
    /// when `apply` reports a change. Returns the new snapshot.
    fn replace_active<F>(&mut self, apply: F) -> Option<Arc<AgenticCampaign>>
    where
        F: FnOnce(&mut AgenticCampaign) -> bool,
    {
        let Some(id) = self.active_campaign_id else {
            debug!("Mutation ignored: no active campaign");
            return None;
        };
        let Some(index) = self.campaigns.iter().position(|c| c.id == id) else {
            debug!(campaign_id = %id, "Mutation ignored: active campaign no longer exists");
            return None;
        };

        let mut next = AgenticCampaign::clone(&self.campaigns[index]);
        if !apply(&mut next) {
            return None;
        }
        next.touch();
        let next = Arc::new(next);
        self.campaigns[index] = next.clone();
        Some(next)
    }

    fn emit(&self, kind: WorkflowEventKind, campaign_id: Option<Uuid>) {
        self.events.emit(WorkflowEvent::new(kind, campaign_id));
    }
}

impl Default for AgenticCampaignStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CampaignQueries for AgenticCampaignStore {
    type Record = Arc<AgenticCampaign>;

    fn records(&self) -> &[Self::Record] {
        &self.campaigns
    }

    fn active_campaign(&self) -> Option<Self::Record> {
        self.get_active_campaign()
    }
}

/// Strict-policy gate: payload present and predecessor locked.
fn check_lock_preconditions(campaign: &AgenticCampaign, step: WorkflowStep) -> CampaignResult<()> {
    if let Some(prerequisite) = step.predecessor() {
        if !campaign.is_step_locked(prerequisite) {
            return Err(CampaignError::StepOutOfOrder { step, prerequisite });
        }
    }
    if !campaign.has_payload(step) {
        return Err(CampaignError::PayloadMissing { step });
    }
    Ok(())
}
