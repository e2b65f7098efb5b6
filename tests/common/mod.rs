//! Shared builders for the integration tests

#![allow(dead_code)] // Test utilities may not all be used in every test file

use scanview::engine::mock::{CountingReveal, MockClock, RecordingCounter, RecordingEngine};
use scanview::engine::TargetId;
use scanview::types::PipelineItem;
use scanview::widgets::{ChartTargets, PillTargets, PipelineChart};
use std::sync::Arc;

/// The mock collaborators behind a chart under test
pub struct ChartHarness {
    pub engine: Arc<RecordingEngine>,
    pub counter: Arc<RecordingCounter>,
    pub clock: Arc<MockClock>,
    pub reveal: Arc<CountingReveal>,
}

impl ChartHarness {
    pub fn new() -> Self {
        Self {
            engine: Arc::new(RecordingEngine::new()),
            counter: Arc::new(RecordingCounter::new()),
            clock: Arc::new(MockClock::new()),
            reveal: Arc::new(CountingReveal::new()),
        }
    }

    pub fn with_counter(counter: RecordingCounter) -> Self {
        Self {
            counter: Arc::new(counter),
            ..Self::new()
        }
    }

    /// Build a chart over `items` with auto-assigned pill targets
    pub fn chart(&self, items: Vec<PipelineItem>) -> PipelineChart {
        let targets = chart_targets(items.len());
        PipelineChart::new(
            self.engine.clone(),
            self.counter.clone(),
            self.clock.clone(),
            self.reveal.clone(),
            items,
            targets,
        )
        .expect("item and target counts match by construction")
    }
}

/// Chart targets for `n` pills: chart is target 1000, pill bodies are
/// even ids, value labels odd.
pub fn chart_targets(n: usize) -> ChartTargets {
    ChartTargets {
        chart: TargetId(1000),
        pills: (0..n as u32)
            .map(|i| PillTargets {
                pill: TargetId(i * 2),
                value_label: TargetId(i * 2 + 1),
            })
            .collect(),
    }
}

/// The three-stage funnel used across tests
pub fn three_stage_items() -> Vec<PipelineItem> {
    vec![
        PipelineItem::new("a", 10.0),
        PipelineItem::new("b", 7.0),
        PipelineItem::new("c", 5.0),
    ]
}
