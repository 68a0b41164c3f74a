//! Campaign Studio: command-line harness for the campaign authoring wizard.
//!
//! Walks one campaign through every agentic workflow step, exports it, and
//! prints the resulting store snapshot as JSON.

use anyhow::Context as _;
use campaign_core::config::{AppConfig, LockPolicy, LogFormat, LoggingConfig};
use campaign_core::error::CampaignResult;
use campaign_core::event_bus::{WorkflowEvent, WorkflowEventSink};
use campaign_core::types::WorkflowStep;
use campaign_wizard::models::*;
use campaign_wizard::AgenticCampaignStore;
use clap::{Parser, ValueEnum};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Parser, Debug)]
#[command(name = "campaign-studio")]
#[command(about = "Walk a campaign through the authoring wizard and print the result")]
#[command(version)]
struct Cli {
    /// Campaign name
    #[arg(long, default_value = "Q4 Push")]
    name: String,

    /// Campaign owner (overrides config)
    #[arg(long, env = "CAMPAIGN_STUDIO__WIZARD__DEFAULT_OWNER")]
    owner: Option<String>,

    /// Require populated payloads and in-order locking
    #[arg(long, default_value_t = false)]
    strict: bool,

    /// Log output format (overrides config)
    #[arg(long, value_enum)]
    log_format: Option<CliLogFormat>,

    /// Stop after this many locked steps instead of exporting
    #[arg(long)]
    stop_after: Option<usize>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum CliLogFormat {
    Json,
    Compact,
}

/// Forwards store events to the tracing pipeline.
struct TracingSink;

impl WorkflowEventSink for TracingSink {
    fn emit(&self, event: WorkflowEvent) {
        debug!(
            kind = ?event.kind,
            campaign_id = ?event.campaign_id,
            "Workflow event"
        );
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| logging.filter.clone().into());
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    match logging.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Compact => builder.compact().init(),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    // Apply CLI overrides
    if let Some(owner) = cli.owner {
        config.wizard.default_owner = owner;
    }
    if cli.strict {
        config.wizard.lock_policy = LockPolicy::Strict;
    }
    if let Some(format) = cli.log_format {
        config.logging.format = match format {
            CliLogFormat::Json => LogFormat::Json,
            CliLogFormat::Compact => LogFormat::Compact,
        };
    }

    init_tracing(&config.logging);
    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    let mut store =
        AgenticCampaignStore::with_config(&config.wizard).with_event_sink(Arc::new(TracingSink));
    info!(
        node_id = %config.node_id,
        lock_policy = ?store.policy(),
        owner = %config.wizard.default_owner,
        "Campaign Studio starting"
    );
    store.create_campaign(cli.name);

    let limit = cli.stop_after.unwrap_or(usize::MAX);
    walk_workflow(&mut store, limit).context("workflow walkthrough failed")?;

    store
        .snapshot()
        .write_json(std::io::stdout().lock())
        .context("failed to write snapshot")?;
    Ok(())
}

/// Populate and lock each step in order, exporting once everything is locked.
fn walk_workflow(store: &mut AgenticCampaignStore, limit: usize) -> CampaignResult<()> {
    let mut gate = LockGate { locked: 0, limit };

    store.update_context(ContextUpdate {
        goal: Some("Grow seasonal basket size".into()),
        category: Some("Home & Living".into()),
        timeframe: Some("6 weeks".into()),
        channels: Some(vec!["email".into(), "push".into()]),
        ..Default::default()
    });
    if !gate.lock(store, WorkflowStep::Context)? {
        return Ok(());
    }

    store.set_segment_strategy(SegmentStrategy {
        approach: StrategyApproach::RuleBased,
        layers: vec![SegmentLayer {
            id: "layer-recency".into(),
            name: "Purchase recency".into(),
            criteria: "Last order within 90 days".into(),
        }],
        rationale: None,
    });
    if !gate.lock(store, WorkflowStep::SegmentStrategy)? {
        return Ok(());
    }

    store.set_segments(vec![CampaignSegment {
        id: "seg-recent".into(),
        name: "Recent buyers".into(),
        layer_id: "layer-recency".into(),
        size: 25_000,
        percentage: 0.3,
        is_approved: false,
    }]);
    store.approve_segment("seg-recent");
    if !gate.lock(store, WorkflowStep::SegmentCreation)? {
        return Ok(());
    }

    store.set_product_groups(vec![ProductGroup {
        id: "grp-recent".into(),
        segment_id: "seg-recent".into(),
        products: vec!["sku-throw".into(), "sku-candle".into()],
        bias: ProductBias::Balanced,
    }]);
    if !gate.lock(store, WorkflowStep::ProductLogic)? {
        return Ok(());
    }

    store.set_promotion_mappings(vec![PromotionMapping {
        segment_id: "seg-recent".into(),
        promotion_id: "promo-bundle".into(),
        promotion_name: "Bundle and save".into(),
        value: "15%".into(),
        status: MappingStatus::Accepted,
        score: None,
    }]);
    if !gate.lock(store, WorkflowStep::Promotion)? {
        return Ok(());
    }

    store.set_creatives(vec![CampaignCreative {
        segment_id: "seg-recent".into(),
        tone: "warm".into(),
        headline: "Make it cosy".into(),
        subcopy: "Bundle two, save 15%".into(),
        cta: "Shop bundles".into(),
        image: None,
        status: CreativeStatus::Approved,
    }]);
    if !gate.lock(store, WorkflowStep::Creative)? {
        return Ok(());
    }

    store.export_campaign()?;
    Ok(())
}

/// Counts locks so the walkthrough can stop part-way.
struct LockGate {
    locked: usize,
    limit: usize,
}

impl LockGate {
    fn lock(
        &mut self,
        store: &mut AgenticCampaignStore,
        step: WorkflowStep,
    ) -> CampaignResult<bool> {
        if self.locked >= self.limit {
            info!(step = %step, "Stopping before lock");
            return Ok(false);
        }
        store.lock_step(step)?;
        self.locked += 1;
        Ok(true)
    }
}
