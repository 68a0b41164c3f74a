//! End-to-end walks through both wizard stores using only the public API.

use campaign_core::config::LockPolicy;
use campaign_core::event_bus::{capture_sink, WorkflowEventKind};
use campaign_core::types::{CampaignStatus, WizardStep, WorkflowStep};
use campaign_core::CampaignError;
use campaign_wizard::models::*;
use campaign_wizard::{AgenticCampaignStore, CampaignQueries, CampaignStore};

fn strategy() -> SegmentStrategy {
    SegmentStrategy {
        approach: StrategyApproach::Hybrid,
        layers: vec![
            SegmentLayer {
                id: "layer-value".into(),
                name: "Customer value".into(),
                criteria: "12-month spend quartile".into(),
            },
            SegmentLayer {
                id: "layer-intent".into(),
                name: "Category intent".into(),
                criteria: "Browsed outerwear in last 30 days".into(),
            },
        ],
        rationale: Some("Value tiers crossed with recent intent".into()),
    }
}

fn segments() -> Vec<CampaignSegment> {
    vec![
        CampaignSegment {
            id: "seg-loyal".into(),
            name: "Loyal high spenders".into(),
            layer_id: "layer-value".into(),
            size: 42_000,
            percentage: 0.18,
            is_approved: false,
        },
        CampaignSegment {
            id: "seg-browsers".into(),
            name: "Recent browsers".into(),
            layer_id: "layer-intent".into(),
            size: 97_500,
            percentage: 0.41,
            is_approved: false,
        },
    ]
}

fn fill_and_lock_everything(store: &mut AgenticCampaignStore) {
    store.update_context(ContextUpdate {
        goal: Some("Lift winter outerwear sell-through".into()),
        category: Some("Outerwear".into()),
        ..Default::default()
    });
    store.lock_context().unwrap();

    store.set_segment_strategy(strategy());
    store.lock_strategy().unwrap();

    store.set_segments(segments());
    store.approve_segment("seg-loyal");
    store.approve_segment("seg-browsers");
    store.lock_segments().unwrap();

    store.set_product_groups(vec![
        ProductGroup {
            id: "grp-loyal".into(),
            segment_id: "seg-loyal".into(),
            products: vec!["sku-parka".into(), "sku-boots".into()],
            bias: ProductBias::Premium,
        },
        ProductGroup {
            id: "grp-browsers".into(),
            segment_id: "seg-browsers".into(),
            products: vec!["sku-fleece".into()],
            bias: ProductBias::Balanced,
        },
    ]);
    store.update_product_group_bias("grp-browsers", ProductBias::Clearance);
    store.lock_products().unwrap();

    store.set_promotion_mappings(vec![PromotionMapping {
        segment_id: "seg-browsers".into(),
        promotion_id: "promo-20".into(),
        promotion_name: "20% off outerwear".into(),
        value: "20%".into(),
        status: MappingStatus::Pending,
        score: None,
    }]);
    store.update_promotion_mapping(
        "seg-browsers",
        PromotionMappingUpdate {
            status: Some(MappingStatus::Accepted),
            ..Default::default()
        },
    );
    store.lock_promotions().unwrap();

    store.set_creatives(vec![CampaignCreative {
        segment_id: "seg-browsers".into(),
        tone: "urgent".into(),
        headline: "Cold snap, warm deals".into(),
        subcopy: "20% off everything outerwear".into(),
        cta: "Gear up".into(),
        image: Some("hero-parka.jpg".into()),
        status: CreativeStatus::Pending,
    }]);
    store.update_creative_status("seg-browsers", CreativeStatus::Approved);
    store.lock_creatives().unwrap();
}

#[test]
fn strict_walkthrough_reaches_review_and_exports() {
    let sink = capture_sink();
    let mut store = AgenticCampaignStore::new()
        .with_policy(LockPolicy::Strict)
        .with_event_sink(sink.clone());
    store.create_campaign("Winter Outerwear");

    fill_and_lock_everything(&mut store);

    let c = store.get_active_campaign().unwrap();
    assert_eq!(c.current_step, WorkflowStep::Review);
    assert_eq!(c.completed_steps, WorkflowStep::LOCKABLE.to_vec());
    assert!(c.segments.iter().all(|s| s.is_approved));
    assert_eq!(c.product_groups[1].bias, ProductBias::Clearance);

    let exported = store.export_campaign().unwrap().unwrap();
    assert_eq!(exported.status, CampaignStatus::Live);
    assert_eq!(exported.completed_steps.last(), Some(&WorkflowStep::Review));

    let locks = sink
        .kinds()
        .into_iter()
        .filter(|k| matches!(k, WorkflowEventKind::StepLocked { .. }))
        .count();
    assert_eq!(locks, 6);
    assert_eq!(sink.kinds().last(), Some(&WorkflowEventKind::CampaignExported));
}

#[test]
fn revisiting_a_step_keeps_progress() {
    let mut store = AgenticCampaignStore::new();
    store.create_campaign("Revisit");
    fill_and_lock_everything(&mut store);

    let c = store.go_to_step(WorkflowStep::SegmentCreation).unwrap();
    assert_eq!(c.current_step, WorkflowStep::SegmentCreation);
    assert_eq!(c.progress(), 1.0);
    assert_eq!(c.completed_steps.len(), 6);
}

#[test]
fn strict_lock_out_of_order_leaves_state_unchanged() {
    let mut store = AgenticCampaignStore::new().with_policy(LockPolicy::Strict);
    store.create_campaign("Skipper");
    store.set_segments(segments());
    let before = store.snapshot();

    let err = store.lock_promotions().unwrap_err();
    assert!(matches!(err, CampaignError::StepOutOfOrder { .. }));
    let after = store.snapshot();
    assert!(std::sync::Arc::ptr_eq(&before.campaigns[0], &after.campaigns[0]));
}

#[test]
fn queries_work_across_both_stores() {
    let mut agentic = AgenticCampaignStore::new();
    agentic.create_campaign("A");
    agentic.export_campaign().unwrap();
    agentic.create_campaign("B");

    let mut legacy = CampaignStore::new();
    let c = legacy.create_campaign("Legacy", "ops");
    legacy.set_active_campaign(Some(c));
    legacy.complete_campaign();

    fn live_count<S: CampaignQueries>(store: &S) -> usize {
        store.count_by_status(CampaignStatus::Live)
    }
    assert_eq!(live_count(&agentic), 1);
    assert_eq!(live_count(&legacy), 1);
    assert_eq!(agentic.campaigns_by_status(CampaignStatus::Draft).len(), 1);
    assert!(legacy.active_campaign().is_none());
    assert_eq!(agentic.active_campaign().unwrap().name, "B");
}

#[test]
fn legacy_wizard_full_pass() {
    let mut store = CampaignStore::new();
    let c = store.create_campaign("Spring Launch", "merch-team");
    store.set_active_campaign(Some(c.clone()));

    store.next_step();
    store.add_audience(Audience {
        id: "aud-1".into(),
        name: "New subscribers".into(),
        estimated_size: 8_200,
        description: None,
    });
    store.next_step();
    store.set_audience_promo("aud-1", "promo-5");
    store.set_audience_promo("aud-1", "promo-9");
    store.next_step();
    store.set_creative_variants(vec![CreativeVariant {
        id: "var-1".into(),
        audience_id: "aud-1".into(),
        headline: "Welcome to spring".into(),
        body: "Fresh arrivals, just for you".into(),
        cta: "Explore".into(),
        image: None,
    }]);
    assert_eq!(store.next_step(), WizardStep::Review);
    assert_eq!(store.promo_for("aud-1"), Some("promo-9"));

    let done = store.complete_campaign().unwrap();
    assert_eq!(done.status, CampaignStatus::Live);
    assert_eq!(store.current_step(), WizardStep::Context);
    assert!(store.selected_audiences().is_empty());
    assert!(store.get_active_campaign().is_none());
}
