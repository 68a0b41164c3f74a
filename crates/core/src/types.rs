use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status shared by both campaign models.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Locked,
    Live,
    Completed,
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CampaignStatus::Draft => "draft",
            CampaignStatus::Locked => "locked",
            CampaignStatus::Live => "live",
            CampaignStatus::Completed => "completed",
        };
        f.write_str(s)
    }
}

// ─── Agentic workflow steps ─────────────────────────────────────────────────

/// One stage of the seven-step agentic authoring workflow.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum WorkflowStep {
    #[default]
    Context,
    SegmentStrategy,
    SegmentCreation,
    ProductLogic,
    Promotion,
    Creative,
    Review,
}

impl WorkflowStep {
    /// Steps that carry a payload and a lock flag. `Review` is terminal.
    pub const LOCKABLE: [WorkflowStep; 6] = [
        WorkflowStep::Context,
        WorkflowStep::SegmentStrategy,
        WorkflowStep::SegmentCreation,
        WorkflowStep::ProductLogic,
        WorkflowStep::Promotion,
        WorkflowStep::Creative,
    ];

    /// Fixed successor reached by locking this step. `None` for `Review`.
    pub fn successor(self) -> Option<WorkflowStep> {
        match self {
            WorkflowStep::Context => Some(WorkflowStep::SegmentStrategy),
            WorkflowStep::SegmentStrategy => Some(WorkflowStep::SegmentCreation),
            WorkflowStep::SegmentCreation => Some(WorkflowStep::ProductLogic),
            WorkflowStep::ProductLogic => Some(WorkflowStep::Promotion),
            WorkflowStep::Promotion => Some(WorkflowStep::Creative),
            WorkflowStep::Creative => Some(WorkflowStep::Review),
            WorkflowStep::Review => None,
        }
    }

    /// The lockable step that must be locked before this one.
    pub fn predecessor(self) -> Option<WorkflowStep> {
        match self {
            WorkflowStep::Context => None,
            WorkflowStep::SegmentStrategy => Some(WorkflowStep::Context),
            WorkflowStep::SegmentCreation => Some(WorkflowStep::SegmentStrategy),
            WorkflowStep::ProductLogic => Some(WorkflowStep::SegmentCreation),
            WorkflowStep::Promotion => Some(WorkflowStep::ProductLogic),
            WorkflowStep::Creative => Some(WorkflowStep::Promotion),
            WorkflowStep::Review => Some(WorkflowStep::Creative),
        }
    }

    pub fn is_lockable(self) -> bool {
        self != WorkflowStep::Review
    }

    pub fn as_str(self) -> &'static str {
        match self {
            WorkflowStep::Context => "context",
            WorkflowStep::SegmentStrategy => "segment-strategy",
            WorkflowStep::SegmentCreation => "segment-creation",
            WorkflowStep::ProductLogic => "product-logic",
            WorkflowStep::Promotion => "promotion",
            WorkflowStep::Creative => "creative",
            WorkflowStep::Review => "review",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ─── Legacy wizard steps ────────────────────────────────────────────────────

/// One stage of the five-step legacy wizard.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    Context,
    Audience,
    Offer,
    Creative,
    Review,
}

impl WizardStep {
    /// Next step, saturating at `Review`.
    pub fn next(self) -> WizardStep {
        match self {
            WizardStep::Context => WizardStep::Audience,
            WizardStep::Audience => WizardStep::Offer,
            WizardStep::Offer => WizardStep::Creative,
            WizardStep::Creative | WizardStep::Review => WizardStep::Review,
        }
    }

    /// Previous step, saturating at `Context`.
    pub fn previous(self) -> WizardStep {
        match self {
            WizardStep::Context | WizardStep::Audience => WizardStep::Context,
            WizardStep::Offer => WizardStep::Audience,
            WizardStep::Creative => WizardStep::Offer,
            WizardStep::Review => WizardStep::Creative,
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WizardStep::Context => "context",
            WizardStep::Audience => "audience",
            WizardStep::Offer => "offer",
            WizardStep::Creative => "creative",
            WizardStep::Review => "review",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_successor_chain_reaches_review() {
        let mut step = WorkflowStep::Context;
        let mut visited = vec![step];
        while let Some(next) = step.successor() {
            visited.push(next);
            step = next;
        }
        assert_eq!(visited.len(), 7);
        assert_eq!(visited[..6], WorkflowStep::LOCKABLE);
        assert_eq!(step, WorkflowStep::Review);
    }

    #[test]
    fn test_predecessor_inverts_successor() {
        for step in WorkflowStep::LOCKABLE {
            let next = step.successor().unwrap();
            assert_eq!(next.predecessor(), Some(step));
        }
        assert_eq!(WorkflowStep::Context.predecessor(), None);
    }

    #[test]
    fn test_step_serde_names() {
        let json = serde_json::to_string(&WorkflowStep::SegmentStrategy).unwrap();
        assert_eq!(json, "\"segment-strategy\"");
        let step: WorkflowStep = serde_json::from_str("\"product-logic\"").unwrap();
        assert_eq!(step, WorkflowStep::ProductLogic);
        assert_eq!(WorkflowStep::ProductLogic.to_string(), "product-logic");
    }

    #[test]
    fn test_wizard_navigation_saturates() {
        assert_eq!(WizardStep::Review.next(), WizardStep::Review);
        assert_eq!(WizardStep::Context.previous(), WizardStep::Context);
        assert_eq!(WizardStep::Offer.next(), WizardStep::Creative);
        assert_eq!(WizardStep::Offer.previous(), WizardStep::Audience);
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(serde_json::to_string(&CampaignStatus::Live).unwrap(), "\"live\"");
        assert_eq!(CampaignStatus::default(), CampaignStatus::Draft);
    }
}
