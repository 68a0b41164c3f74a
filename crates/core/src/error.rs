use crate::types::WorkflowStep;
use thiserror::Error;

pub type CampaignResult<T> = Result<T, CampaignError>;

#[derive(Error, Debug)]
pub enum CampaignError {
    #[error("Cannot lock {step}: payload is missing or empty")]
    PayloadMissing { step: WorkflowStep },

    #[error("Cannot lock {step}: {prerequisite} is not locked yet")]
    StepOutOfOrder {
        step: WorkflowStep,
        prerequisite: WorkflowStep,
    },

    #[error("Step {0} has no lock flag")]
    NotLockable(WorkflowStep),

    #[error("Campaign cannot be exported until {0} is locked")]
    NotExportable(WorkflowStep),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<config::ConfigError> for CampaignError {
    fn from(err: config::ConfigError) -> Self {
        CampaignError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages_name_steps() {
        let err = CampaignError::StepOutOfOrder {
            step: WorkflowStep::Promotion,
            prerequisite: WorkflowStep::ProductLogic,
        };
        assert_eq!(
            err.to_string(),
            "Cannot lock promotion: product-logic is not locked yet"
        );

        let err = CampaignError::PayloadMissing {
            step: WorkflowStep::SegmentCreation,
        };
        assert!(err.to_string().contains("segment-creation"));
    }

    #[test]
    fn test_config_error_converts() {
        let err: CampaignError = config::ConfigError::Message("bad lock policy".into()).into();
        assert!(matches!(err, CampaignError::Config(_)));
        assert_eq!(err.to_string(), "Configuration error: bad lock policy");
    }
}
