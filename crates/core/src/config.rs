use crate::error::CampaignResult;
use serde::Deserialize;
use std::collections::HashMap;

/// Root application configuration. Loaded from environment variables
/// with the prefix `CAMPAIGN_STUDIO__`.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_node_id")]
    pub node_id: String,
    #[serde(default)]
    pub wizard: WizardConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// How `lock_*` treats missing payloads and out-of-order locks.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LockPolicy {
    /// Locks always succeed.
    #[default]
    Permissive,
    /// Locks require a populated payload and a locked predecessor.
    Strict,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WizardConfig {
    #[serde(default)]
    pub lock_policy: LockPolicy,
    #[serde(default = "default_owner")]
    pub default_owner: String,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Json,
    Compact,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    #[serde(default = "default_log_filter")]
    pub filter: String,
}

// Default functions
fn default_node_id() -> String {
    "studio-01".to_string()
}
fn default_owner() -> String {
    "campaign-planner".to_string()
}
fn default_log_filter() -> String {
    "campaign_studio=info,campaign_wizard=info".to_string()
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            lock_policy: LockPolicy::default(),
            default_owner: default_owner(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            filter: default_log_filter(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            node_id: default_node_id(),
            wizard: WizardConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment.
    pub fn load() -> CampaignResult<Self> {
        Self::load_from(None)
    }

    /// Load configuration from an explicit variable map instead of the
    /// process environment when `vars` is `Some`.
    pub fn load_from(vars: Option<HashMap<String, String>>) -> CampaignResult<Self> {
        let builder = config::Config::builder().add_source(
            config::Environment::with_prefix("CAMPAIGN_STUDIO")
                .separator("__")
                .try_parsing(true)
                .source(vars),
        );

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CampaignError;

    #[test]
    fn test_defaults_when_environment_empty() {
        let config = AppConfig::load_from(Some(HashMap::new())).unwrap();
        assert_eq!(config.node_id, "studio-01");
        assert_eq!(config.wizard.lock_policy, LockPolicy::Permissive);
        assert_eq!(config.wizard.default_owner, "campaign-planner");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_environment_overrides() {
        let mut vars = HashMap::new();
        vars.insert("CAMPAIGN_STUDIO__NODE_ID".to_string(), "studio-07".to_string());
        vars.insert(
            "CAMPAIGN_STUDIO__WIZARD__LOCK_POLICY".to_string(),
            "strict".to_string(),
        );
        vars.insert(
            "CAMPAIGN_STUDIO__LOGGING__FORMAT".to_string(),
            "compact".to_string(),
        );

        let config = AppConfig::load_from(Some(vars)).unwrap();
        assert_eq!(config.node_id, "studio-07");
        assert_eq!(config.wizard.lock_policy, LockPolicy::Strict);
        assert_eq!(config.logging.format, LogFormat::Compact);
        assert_eq!(config.wizard.default_owner, "campaign-planner");
    }

    #[test]
    fn test_unknown_lock_policy_is_config_error() {
        let mut vars = HashMap::new();
        vars.insert(
            "CAMPAIGN_STUDIO__WIZARD__LOCK_POLICY".to_string(),
            "lenient".to_string(),
        );

        let err = AppConfig::load_from(Some(vars)).unwrap_err();
        assert!(matches!(err, CampaignError::Config(_)));
    }
}
