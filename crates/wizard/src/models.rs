//! Wizard domain types: legacy campaigns, agentic campaigns and the
//! per-step payloads they carry.

use campaign_core::types::{CampaignStatus, WizardStep, WorkflowStep};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ─── Legacy Campaign ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    pub id: Uuid,
    pub name: String,
    pub status: CampaignStatus,
    pub updated_at: DateTime<Utc>,
    pub owner: String,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub objective: Option<String>,
    #[serde(default)]
    pub current_step: WizardStep,
}

impl Campaign {
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: CampaignStatus::Draft,
            updated_at: Utc::now(),
            owner: owner.into(),
            channel: None,
            objective: None,
            current_step: WizardStep::Context,
        }
    }

    /// Merge the populated fields of `update` and refresh the timestamp.
    pub fn apply(&mut self, update: CampaignUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(owner) = update.owner {
            self.owner = owner;
        }
        if let Some(channel) = update.channel {
            self.channel = Some(channel);
        }
        if let Some(objective) = update.objective {
            self.objective = Some(objective);
        }
        if let Some(step) = update.current_step {
            self.current_step = step;
        }
        self.updated_at = Utc::now();
    }
}

/// Partial update for a legacy campaign. `None` fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CampaignUpdate {
    pub name: Option<String>,
    pub status: Option<CampaignStatus>,
    pub owner: Option<String>,
    pub channel: Option<String>,
    pub objective: Option<String>,
    pub current_step: Option<WizardStep>,
}

/// An audience picked in the legacy audience step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Audience {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub estimated_size: u64,
    #[serde(default)]
    pub description: Option<String>,
}

/// A creative variant produced in the legacy creative step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreativeVariant {
    pub id: String,
    pub audience_id: String,
    pub headline: String,
    pub body: String,
    pub cta: String,
    #[serde(default)]
    pub image: Option<String>,
}

// ─── Context ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignContext {
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub timeframe: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub channels: Vec<String>,
    #[serde(default)]
    pub budget: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl CampaignContext {
    pub fn is_empty(&self) -> bool {
        self == &CampaignContext::default()
    }

    /// Shallow merge: every populated field of `update` overwrites, the rest is kept.
    pub fn merge(&mut self, update: ContextUpdate) {
        if let Some(goal) = update.goal {
            self.goal = Some(goal);
        }
        if let Some(category) = update.category {
            self.category = Some(category);
        }
        if let Some(timeframe) = update.timeframe {
            self.timeframe = Some(timeframe);
        }
        if let Some(region) = update.region {
            self.region = Some(region);
        }
        if let Some(channels) = update.channels {
            self.channels = channels;
        }
        if let Some(budget) = update.budget {
            self.budget = Some(budget);
        }
        if let Some(notes) = update.notes {
            self.notes = Some(notes);
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ContextUpdate {
    pub goal: Option<String>,
    pub category: Option<String>,
    pub timeframe: Option<String>,
    pub region: Option<String>,
    pub channels: Option<Vec<String>>,
    pub budget: Option<f64>,
    pub notes: Option<String>,
}

// ─── Segment Strategy ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyApproach {
    #[default]
    RuleBased,
    Statistical,
    Hybrid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentLayer {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub criteria: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentStrategy {
    pub approach: StrategyApproach,
    #[serde(default)]
    pub layers: Vec<SegmentLayer>,
    #[serde(default)]
    pub rationale: Option<String>,
}

// ─── Segments ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignSegment {
    pub id: String,
    pub name: String,
    pub layer_id: String,
    pub size: u64,
    pub percentage: f64,
    #[serde(default)]
    pub is_approved: bool,
}

// ─── Products ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductBias {
    Premium,
    Clearance,
    #[default]
    Balanced,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductGroup {
    pub id: String,
    pub segment_id: String,
    #[serde(default)]
    pub products: Vec<String>,
    #[serde(default)]
    pub bias: ProductBias,
}

// ─── Promotions ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingStatus {
    Accepted,
    Switched,
    None,
    #[default]
    Pending,
}

/// Scoring attached to a suggested promotion.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PromotionScore {
    pub relevance: f64,
    pub margin_impact: f64,
    pub predicted_lift: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionMapping {
    pub segment_id: String,
    pub promotion_id: String,
    pub promotion_name: String,
    pub value: String,
    #[serde(default)]
    pub status: MappingStatus,
    #[serde(default)]
    pub score: Option<PromotionScore>,
}

impl PromotionMapping {
    pub fn apply(&mut self, update: PromotionMappingUpdate) {
        if let Some(id) = update.promotion_id {
            self.promotion_id = id;
        }
        if let Some(name) = update.promotion_name {
            self.promotion_name = name;
        }
        if let Some(value) = update.value {
            self.value = value;
        }
        if let Some(status) = update.status {
            self.status = status;
        }
        if let Some(score) = update.score {
            self.score = Some(score);
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PromotionMappingUpdate {
    pub promotion_id: Option<String>,
    pub promotion_name: Option<String>,
    pub value: Option<String>,
    pub status: Option<MappingStatus>,
    pub score: Option<PromotionScore>,
}

// ─── Creatives ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreativeStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
    Regenerating,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignCreative {
    pub segment_id: String,
    pub tone: String,
    pub headline: String,
    pub subcopy: String,
    pub cta: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub status: CreativeStatus,
}

// ─── Agentic Campaign ──────────────────────────────────────────────────────

/// A campaign authored through the seven-step agentic workflow.
///
/// Each lockable step owns one payload field and one lock flag. Records are
/// treated as immutable snapshots by the store; mutation happens on a clone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgenticCampaign {
    pub id: Uuid,
    pub name: String,
    pub status: CampaignStatus,
    pub owner: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub current_step: WorkflowStep,
    #[serde(default)]
    pub completed_steps: Vec<WorkflowStep>,

    #[serde(default)]
    pub context: Option<CampaignContext>,
    #[serde(default)]
    pub context_locked: bool,
    #[serde(default)]
    pub segment_strategy: Option<SegmentStrategy>,
    #[serde(default)]
    pub strategy_locked: bool,
    #[serde(default)]
    pub segments: Vec<CampaignSegment>,
    #[serde(default)]
    pub segments_locked: bool,
    #[serde(default)]
    pub product_groups: Vec<ProductGroup>,
    #[serde(default)]
    pub products_locked: bool,
    #[serde(default)]
    pub promotion_mappings: Vec<PromotionMapping>,
    #[serde(default)]
    pub promotions_locked: bool,
    #[serde(default)]
    pub creatives: Vec<CampaignCreative>,
    #[serde(default)]
    pub creatives_locked: bool,
}

impl AgenticCampaign {
    pub fn new(name: impl Into<String>, owner: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            status: CampaignStatus::Draft,
            owner: owner.into(),
            created_at: now,
            updated_at: now,
            current_step: WorkflowStep::Context,
            completed_steps: Vec::new(),
            context: None,
            context_locked: false,
            segment_strategy: None,
            strategy_locked: false,
            segments: Vec::new(),
            segments_locked: false,
            product_groups: Vec::new(),
            products_locked: false,
            promotion_mappings: Vec::new(),
            promotions_locked: false,
            creatives: Vec::new(),
            creatives_locked: false,
        }
    }

    pub fn is_step_locked(&self, step: WorkflowStep) -> bool {
        match step {
            WorkflowStep::Context => self.context_locked,
            WorkflowStep::SegmentStrategy => self.strategy_locked,
            WorkflowStep::SegmentCreation => self.segments_locked,
            WorkflowStep::ProductLogic => self.products_locked,
            WorkflowStep::Promotion => self.promotions_locked,
            WorkflowStep::Creative => self.creatives_locked,
            WorkflowStep::Review => false,
        }
    }

    /// Whether the step's payload is present and non-empty.
    pub fn has_payload(&self, step: WorkflowStep) -> bool {
        match step {
            WorkflowStep::Context => self.context.as_ref().is_some_and(|c| !c.is_empty()),
            WorkflowStep::SegmentStrategy => self.segment_strategy.is_some(),
            WorkflowStep::SegmentCreation => !self.segments.is_empty(),
            WorkflowStep::ProductLogic => !self.product_groups.is_empty(),
            WorkflowStep::Promotion => !self.promotion_mappings.is_empty(),
            WorkflowStep::Creative => !self.creatives.is_empty(),
            WorkflowStep::Review => true,
        }
    }

    pub fn is_step_completed(&self, step: WorkflowStep) -> bool {
        self.completed_steps.contains(&step)
    }

    /// Fraction of lockable steps that are locked, in `[0.0, 1.0]`.
    pub fn progress(&self) -> f64 {
        let locked = WorkflowStep::LOCKABLE
            .iter()
            .filter(|s| self.is_step_locked(**s))
            .count();
        locked as f64 / WorkflowStep::LOCKABLE.len() as f64
    }

    /// First lockable step, in workflow order, that is not locked yet.
    pub fn next_lockable_step(&self) -> Option<WorkflowStep> {
        WorkflowStep::LOCKABLE
            .into_iter()
            .find(|s| !self.is_step_locked(*s))
    }

    pub fn segment(&self, segment_id: &str) -> Option<&CampaignSegment> {
        self.segments.iter().find(|s| s.id == segment_id)
    }

    /// Set the lock flag for `step` and advance to its successor.
    ///
    /// Returns the new current step, or `None` for `Review`, which has no flag.
    pub(crate) fn lock(&mut self, step: WorkflowStep) -> Option<WorkflowStep> {
        let next = step.successor()?;
        match step {
            WorkflowStep::Context => self.context_locked = true,
            WorkflowStep::SegmentStrategy => self.strategy_locked = true,
            WorkflowStep::SegmentCreation => self.segments_locked = true,
            WorkflowStep::ProductLogic => self.products_locked = true,
            WorkflowStep::Promotion => self.promotions_locked = true,
            WorkflowStep::Creative => self.creatives_locked = true,
            WorkflowStep::Review => return None,
        }
        self.current_step = next;
        self.completed_steps.push(step);
        self.touch();
        Some(next)
    }

    pub(crate) fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
