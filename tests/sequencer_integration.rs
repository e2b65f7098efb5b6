//! End-to-end tests for the pipeline chart sequencer
//!
//! The chart runs against the recording mocks, so these tests assert on
//! the complete ordered trace of engine calls, counter requests, and
//! clock sleeps a full run produces.

mod common;

use common::{three_stage_items, ChartHarness};
use scanview::color;
use scanview::engine::mock::{EngineEvent, RecordingCounter};
use scanview::engine::{Easing, Property, TargetId};
use scanview::widgets::pipeline_chart::{
    COLOR_DURATION, COLOR_STAGGER, COUNT_DURATION, FINAL_DELAY, INITIAL_DELAY, PILL_GAP,
    PILL_LEAD_IN, REPOSITION_DURATION, SETTLE_DELAY,
};
use scanview::widgets::Phase;
use std::time::Duration;

/// Total delay time a full run spends in the clock for `n` pills
fn expected_total_delay(n: u32) -> Duration {
    let gaps = n.saturating_sub(1);
    INITIAL_DELAY + PILL_LEAD_IN * n + PILL_GAP * gaps + SETTLE_DELAY + FINAL_DELAY
}

#[tokio::test]
async fn test_full_run_event_order() {
    let harness = ChartHarness::new();
    let mut chart = harness.chart(three_stage_items());

    chart.run().await;

    let events = harness.engine.events();

    // Setup centers the chart without animating
    assert!(matches!(
        &events[0],
        EngineEvent::SetImmediate { target: TargetId(1000), props }
            if props.contains(&Property::LeftPct(50.0))
                && props.contains(&Property::TopPct(50.0))
    ));

    // Pills get their "transformed" marker strictly in stage order
    let marked: Vec<TargetId> = events
        .iter()
        .filter_map(|e| match e {
            EngineEvent::Mark { target, marker } if marker == "transformed" => Some(*target),
            _ => None,
        })
        .collect();
    assert_eq!(marked, vec![TargetId(0), TargetId(2), TargetId(4)]);

    // Every count-up runs from zero with the fixed duration and easing
    let requests = harness.counter.requests();
    assert_eq!(requests.len(), 3);
    for request in &requests {
        assert_eq!(request.start, 0.0);
        assert_eq!(request.duration, COUNT_DURATION);
        assert_eq!(request.easing, Easing::OutCubic);
    }
    assert_eq!(
        requests.iter().map(|r| r.end).collect::<Vec<_>>(),
        vec![10.0, 7.0, 5.0]
    );

    // The colorize batch precedes the reposition batch
    let batches = harness.engine.batches();
    assert_eq!(batches.len(), 2);
    assert_eq!(batches[0].duration, COLOR_DURATION);
    assert_eq!(batches[0].stagger, COLOR_STAGGER);
    assert_eq!(batches[0].animations.len(), 3);
    assert_eq!(batches[1].duration, REPOSITION_DURATION);
    assert_eq!(batches[1].animations[0].target, TargetId(1000));

    // First pill stays green, later pills shade by stage change
    assert!(matches!(
        batches[0].animations[0].props[..],
        [Property::Background(shade)] if shade == color::GOOD
    ));
    let expected_second = color::color_for(1, Some(10.0), 7.0);
    assert!(matches!(
        batches[0].animations[1].props[..],
        [Property::Background(shade)] if shade == expected_second
    ));

    // Reposition marks the chart terminal, and the content reveal fires
    // exactly once at the very end
    assert!(events.iter().any(|e| matches!(
        e,
        EngineEvent::Mark { target: TargetId(1000), marker } if marker == "animated"
    )));
    assert_eq!(harness.reveal.count(), 1);
    assert_eq!(chart.phase(), Phase::Done);
}

#[tokio::test]
async fn test_full_run_delay_ledger() {
    let harness = ChartHarness::new();
    let mut chart = harness.chart(three_stage_items());

    chart.run().await;

    let sleeps = harness.clock.sleeps();
    assert_eq!(
        sleeps,
        vec![
            INITIAL_DELAY,
            PILL_LEAD_IN,
            PILL_GAP,
            PILL_LEAD_IN,
            PILL_GAP,
            PILL_LEAD_IN,
            SETTLE_DELAY,
            FINAL_DELAY,
        ]
    );
    assert_eq!(harness.clock.total_slept(), expected_total_delay(3));
}

#[tokio::test]
async fn test_empty_chart_still_runs_the_schedule() {
    let harness = ChartHarness::new();
    let mut chart = harness.chart(Vec::new());

    chart.run().await;

    // No pill work, no colorize batch, but the surrounding phases and
    // the reveal still happen
    assert!(harness.counter.requests().is_empty());
    let batches = harness.engine.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0].duration, REPOSITION_DURATION);

    assert_eq!(
        harness.clock.sleeps(),
        vec![INITIAL_DELAY, SETTLE_DELAY, FINAL_DELAY]
    );
    assert_eq!(harness.reveal.count(), 1);
    assert_eq!(chart.phase(), Phase::Done);
}

#[tokio::test]
async fn test_counter_failure_does_not_derail_the_run() {
    let harness = ChartHarness::with_counter(RecordingCounter::failing_on(0));
    let mut chart = harness.chart(three_stage_items());

    chart.run().await;

    // The failed pill still lands on its end value and gets a color
    assert_eq!(chart.pills()[0].visual.displayed, 10.0);
    assert!(chart.pills().iter().all(|p| p.visual.color.is_some()));

    // The schedule is unchanged by the failure
    assert_eq!(harness.clock.total_slept(), expected_total_delay(3));
    assert_eq!(harness.reveal.count(), 1);
}

#[tokio::test]
async fn test_single_pill_has_no_gap() {
    let harness = ChartHarness::new();
    let mut chart = harness.chart(vec![scanview::types::PipelineItem::new("only", 42.0)]);

    chart.run().await;

    assert_eq!(
        harness.clock.sleeps(),
        vec![INITIAL_DELAY, PILL_LEAD_IN, SETTLE_DELAY, FINAL_DELAY]
    );
    assert_eq!(harness.counter.requests().len(), 1);
}
