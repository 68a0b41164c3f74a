//! Workflow event bus: trait for observing store mutations.
//!
//! Stores accept an `Arc<dyn WorkflowEventSink>` and emit one event per
//! effective mutation. Observers re-read the store snapshot on receipt.

use crate::types::{CampaignStatus, WorkflowStep, WizardStep};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// What changed in a store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum WorkflowEventKind {
    CampaignCreated,
    CampaignSelected,
    CampaignDeleted,
    CampaignUpdated,
    PayloadUpdated { step: WorkflowStep },
    StepLocked { step: WorkflowStep, next: WorkflowStep },
    StepVisited { step: WorkflowStep },
    CampaignExported,
    WizardStepChanged { step: WizardStep },
    SelectionChanged,
    CampaignCompleted { status: CampaignStatus },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowEvent {
    pub event_id: Uuid,
    pub kind: WorkflowEventKind,
    pub campaign_id: Option<Uuid>,
    pub timestamp: DateTime<Utc>,
}

impl WorkflowEvent {
    pub fn new(kind: WorkflowEventKind, campaign_id: Option<Uuid>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            kind,
            campaign_id,
            timestamp: Utc::now(),
        }
    }
}

/// Receives store events. Implementations may forward to a UI, a log, or a test buffer.
pub trait WorkflowEventSink: Send + Sync {
    fn emit(&self, event: WorkflowEvent);
}

/// No-op sink for stores nobody observes.
pub struct NoOpSink;

impl WorkflowEventSink for NoOpSink {
    fn emit(&self, _event: WorkflowEvent) {}
}

/// In-memory sink that captures events for testing.
#[derive(Default)]
pub struct CaptureSink {
    events: Mutex<Vec<WorkflowEvent>>,
}

impl CaptureSink {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }

    pub fn events(&self) -> Vec<WorkflowEvent> {
        self.events.lock().expect("event bus mutex poisoned").clone()
    }

    pub fn kinds(&self) -> Vec<WorkflowEventKind> {
        self.events
            .lock()
            .expect("event bus mutex poisoned")
            .iter()
            .map(|e| e.kind.clone())
            .collect()
    }

    pub fn count(&self) -> usize {
        self.events.lock().expect("event bus mutex poisoned").len()
    }

    pub fn clear(&self) {
        self.events.lock().expect("event bus mutex poisoned").clear();
    }
}

impl WorkflowEventSink for CaptureSink {
    fn emit(&self, event: WorkflowEvent) {
        self.events.lock().expect("event bus mutex poisoned").push(event);
    }
}

/// Convenience: create a no-op sink.
pub fn noop_sink() -> Arc<dyn WorkflowEventSink> {
    Arc::new(NoOpSink)
}

/// Convenience: create a capture sink for tests.
pub fn capture_sink() -> Arc<CaptureSink> {
    Arc::new(CaptureSink::new())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_sink() {
        let sink = capture_sink();
        assert_eq!(sink.count(), 0);

        let id = Uuid::new_v4();
        sink.emit(WorkflowEvent::new(WorkflowEventKind::CampaignCreated, Some(id)));
        sink.emit(WorkflowEvent::new(
            WorkflowEventKind::StepLocked {
                step: WorkflowStep::Context,
                next: WorkflowStep::SegmentStrategy,
            },
            Some(id),
        ));

        assert_eq!(sink.count(), 2);
        let events = sink.events();
        assert_eq!(events[0].campaign_id, Some(id));
        assert!(matches!(
            events[1].kind,
            WorkflowEventKind::StepLocked { step: WorkflowStep::Context, .. }
        ));

        sink.clear();
        assert_eq!(sink.count(), 0);
    }

    #[test]
    fn test_noop_sink() {
        let sink = noop_sink();
        // Should not panic
        sink.emit(WorkflowEvent::new(WorkflowEventKind::SelectionChanged, None));
    }

    #[test]
    fn test_event_kind_serializes_tagged() {
        let kind = WorkflowEventKind::PayloadUpdated {
            step: WorkflowStep::ProductLogic,
        };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["kind"], "payload_updated");
        assert_eq!(json["step"], "product-logic");
    }
}
