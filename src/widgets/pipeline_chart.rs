//! Pipeline funnel chart with a staged reveal animation
//!
//! The chart runs a fixed, strictly sequential phase pipeline over its
//! pills. Each phase:
//!
//! 1. **Setup** — pills at 0, chart centered without animation, then a
//!    fixed lead-in delay.
//! 2. **Reveal-and-count** — pills one at a time, in order: a short
//!    lead-in, the "transformed" style marker, then an awaited count-up
//!    to the stage value, with a pause between pills.
//! 3. **Colorize** — stage-change colors applied as one staggered batch;
//!    issued and not awaited, followed by a settle delay.
//! 4. **Reposition** — the chart animates from centered to top-anchored,
//!    awaited, then is marked terminal.
//! 5. **Reveal-content** — the page-level reveal hook fires.
//!
//! No two phases and no two per-pill steps ever overlap; later phases
//! read the final numeric state of earlier ones. The pipeline is not
//! configurable and its wall-clock time is deterministic for a given
//! pill count.

use crate::color;
use crate::engine::{
    Animation, AnimationBatch, AnimationEngine, Clock, ContentReveal, CounterRequest, Easing,
    NumericCounter, Property, TargetId,
};
use crate::error::{Result, WidgetError};
use crate::types::{PillVisual, PipelineItem};
use std::sync::Arc;
use std::time::Duration;

/// Delay between chart placement and the first pill
pub const INITIAL_DELAY: Duration = Duration::from_millis(1500);
/// Lead-in before each pill's count-up
pub const PILL_LEAD_IN: Duration = Duration::from_millis(150);
/// Count-up duration per pill
pub const COUNT_DURATION: Duration = Duration::from_millis(1200);
/// Pause after each pill except the last
pub const PILL_GAP: Duration = Duration::from_millis(500);
/// Background-color transition duration in the colorize phase
pub const COLOR_DURATION: Duration = Duration::from_millis(500);
/// Per-pill stagger of the colorize transitions
pub const COLOR_STAGGER: Duration = Duration::from_millis(100);
/// Settle delay after issuing the colorize batch
pub const SETTLE_DELAY: Duration = Duration::from_millis(2250);
/// Duration of the centered→top-anchored reposition
pub const REPOSITION_DURATION: Duration = Duration::from_millis(1000);
/// Delay between the reposition and the content reveal
pub const FINAL_DELAY: Duration = Duration::from_millis(500);

/// Host targets for one pill
#[derive(Debug, Clone, Copy)]
pub struct PillTargets {
    /// The pill body (style marker, background color)
    pub pill: TargetId,
    /// The numeric value label (count-up target)
    pub value_label: TargetId,
}

/// Host targets for the whole chart
#[derive(Debug, Clone)]
pub struct ChartTargets {
    pub chart: TargetId,
    pub pills: Vec<PillTargets>,
}

/// One pipeline stage with its targets and visual state
#[derive(Debug, Clone)]
pub struct Pill {
    pub item: PipelineItem,
    pub targets: PillTargets,
    pub visual: PillVisual,
}

/// Phases of the chart's animation sequence, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Setup,
    RevealAndCount,
    Colorize,
    Reposition,
    RevealContent,
    Done,
}

/// The pipeline chart widget and its sequencer
pub struct PipelineChart {
    engine: Arc<dyn AnimationEngine>,
    counter: Arc<dyn NumericCounter>,
    clock: Arc<dyn Clock>,
    reveal: Arc<dyn ContentReveal>,
    chart: TargetId,
    pills: Vec<Pill>,
    phase: Phase,
}

impl PipelineChart {
    /// Build the chart from its ordered items and host targets. The
    /// target list must match the item list pill for pill.
    pub fn new(
        engine: Arc<dyn AnimationEngine>,
        counter: Arc<dyn NumericCounter>,
        clock: Arc<dyn Clock>,
        reveal: Arc<dyn ContentReveal>,
        items: Vec<PipelineItem>,
        targets: ChartTargets,
    ) -> Result<Self> {
        if items.len() != targets.pills.len() {
            return Err(WidgetError::Config(format!(
                "{} pipeline items but {} pill targets",
                items.len(),
                targets.pills.len()
            )));
        }

        let pills = items
            .into_iter()
            .zip(targets.pills)
            .map(|(item, targets)| Pill {
                item,
                targets,
                visual: PillVisual::default(),
            })
            .collect();

        Ok(Self {
            engine,
            counter,
            clock,
            reveal,
            chart: targets.chart,
            pills,
            phase: Phase::Idle,
        })
    }

    /// Current phase of the sequence
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The chart's pills with their visual state
    pub fn pills(&self) -> &[Pill] {
        &self.pills
    }

    /// Run the full animation sequence to completion.
    ///
    /// With zero pills the per-pill phase is trivially empty but every
    /// other phase still runs on schedule, including the final content
    /// reveal.
    pub async fn run(&mut self) {
        self.setup().await;
        self.reveal_and_count().await;
        self.colorize().await;
        self.reposition().await;

        self.phase = Phase::RevealContent;
        self.reveal.reveal_content();
        self.phase = Phase::Done;
        tracing::debug!("pipeline chart sequence complete");
    }

    /// Phase 1: one-shot centered placement, then the lead-in delay
    async fn setup(&mut self) {
        self.phase = Phase::Setup;
        tracing::debug!(pills = self.pills.len(), "pipeline chart starting");

        self.engine.set_immediate(
            self.chart,
            &[
                Property::TranslateXPct(-50.0),
                Property::TranslateYPct(-50.0),
                Property::LeftPct(50.0),
                Property::TopPct(50.0),
            ],
        );
        self.clock.sleep(INITIAL_DELAY).await;
    }

    /// Phase 2: reveal pills strictly in order, each count-up awaited
    /// before the next pill starts.
    async fn reveal_and_count(&mut self) {
        self.phase = Phase::RevealAndCount;
        let last = self.pills.len().saturating_sub(1);

        for index in 0..self.pills.len() {
            self.clock.sleep(PILL_LEAD_IN).await;

            let pill = &self.pills[index];
            self.engine.mark(pill.targets.pill, "transformed");

            let request = CounterRequest {
                target: pill.targets.value_label,
                start: 0.0,
                end: pill.item.value,
                duration: COUNT_DURATION,
                easing: Easing::OutCubic,
            };
            match self.counter.start_count(request) {
                Ok(signal) => signal.wait().await,
                // Non-fatal: continue as if the count finished instantly
                Err(e) => {
                    tracing::warn!(stage = %pill.item.name, "counter failed to start: {e}");
                }
            }

            let pill = &mut self.pills[index];
            pill.visual.displayed = pill.item.value;
            pill.visual.revealed = true;

            if index < last {
                self.clock.sleep(PILL_GAP).await;
            }
        }
    }

    /// Phase 3: compute stage-change colors over the displayed values and
    /// issue them as one staggered batch. Complete on issue; the visual
    /// transitions finish during the settle delay.
    async fn colorize(&mut self) {
        self.phase = Phase::Colorize;

        let mut batch =
            AnimationBatch::new(COLOR_DURATION, Easing::Ease).with_stagger(COLOR_STAGGER);
        let mut previous: Option<f64> = None;
        for (index, pill) in self.pills.iter_mut().enumerate() {
            let shade = color::color_for(index, previous, pill.visual.displayed);
            pill.visual.color = Some(shade);
            previous = Some(pill.visual.displayed);
            batch = batch.push(Animation::new(
                pill.targets.pill,
                vec![Property::Background(shade)],
            ));
        }
        if !batch.animations.is_empty() {
            let _ = self.engine.animate(batch);
        }

        self.clock.sleep(SETTLE_DELAY).await;
    }

    /// Phase 4: animate the chart from centered to top-anchored, await
    /// it, mark the terminal style, and hold briefly.
    async fn reposition(&mut self) {
        self.phase = Phase::Reposition;

        let batch = AnimationBatch::new(REPOSITION_DURATION, Easing::OutCubic).push(
            Animation::new(
                self.chart,
                vec![
                    Property::TranslateXPct(0.0),
                    Property::TranslateYPct(0.0),
                    Property::LeftPct(0.0),
                    Property::TopPct(0.0),
                ],
            ),
        );
        self.engine.animate(batch).wait().await;
        self.engine.mark(self.chart, "animated");

        self.clock.sleep(FINAL_DELAY).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::{CountingReveal, MockClock, RecordingCounter, RecordingEngine};
    use crate::types::Rgba;

    fn chart_targets(n: usize) -> ChartTargets {
        ChartTargets {
            chart: TargetId(100),
            pills: (0..n as u32)
                .map(|i| PillTargets {
                    pill: TargetId(i * 2),
                    value_label: TargetId(i * 2 + 1),
                })
                .collect(),
        }
    }

    fn items() -> Vec<PipelineItem> {
        vec![
            PipelineItem::new("a", 10.0),
            PipelineItem::new("b", 7.0),
            PipelineItem::new("c", 5.0),
        ]
    }

    #[test]
    fn test_target_mismatch_is_config_error() {
        let engine = Arc::new(RecordingEngine::new());
        let counter = Arc::new(RecordingCounter::new());
        let clock = Arc::new(MockClock::new());
        let reveal = Arc::new(CountingReveal::new());
        let result = PipelineChart::new(engine, counter, clock, reveal, items(), chart_targets(2));
        assert!(matches!(result, Err(WidgetError::Config(_))));
    }

    #[tokio::test]
    async fn test_pills_count_in_order() {
        let engine = Arc::new(RecordingEngine::new());
        let counter = Arc::new(RecordingCounter::new());
        let clock = Arc::new(MockClock::new());
        let reveal = Arc::new(CountingReveal::new());
        let mut chart = PipelineChart::new(
            engine,
            counter.clone(),
            clock,
            reveal,
            items(),
            chart_targets(3),
        )
        .unwrap();

        chart.run().await;

        let requests = counter.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(
            requests.iter().map(|r| r.end).collect::<Vec<_>>(),
            vec![10.0, 7.0, 5.0]
        );
        for request in &requests {
            assert_eq!(request.start, 0.0);
            assert_eq!(request.duration, COUNT_DURATION);
            assert_eq!(request.easing, Easing::OutCubic);
        }
        assert!(chart.pills().iter().all(|p| p.visual.revealed));
        assert_eq!(chart.phase(), Phase::Done);
    }

    #[tokio::test]
    async fn test_second_pill_color_is_in_saturated_band() {
        let engine = Arc::new(RecordingEngine::new());
        let counter = Arc::new(RecordingCounter::new());
        let clock = Arc::new(MockClock::new());
        let reveal = Arc::new(CountingReveal::new());
        let mut chart = PipelineChart::new(
            engine,
            counter,
            clock,
            reveal,
            items(),
            chart_targets(3),
        )
        .unwrap();

        chart.run().await;

        // (10 - 7) / 10 * 100 = 30% change: saturated band, t = 12/22
        let expected = color::color_for(1, Some(10.0), 7.0);
        assert_eq!(chart.pills()[1].visual.color, Some(expected));
        assert_ne!(expected, color::GOOD);

        // First pill is always green
        assert_eq!(chart.pills()[0].visual.color, Some(color::GOOD));
    }

    #[tokio::test]
    async fn test_counter_failure_is_non_fatal() {
        let engine = Arc::new(RecordingEngine::new());
        let counter = Arc::new(RecordingCounter::failing_on(1));
        let clock = Arc::new(MockClock::new());
        let reveal = Arc::new(CountingReveal::new());
        let mut chart = PipelineChart::new(
            engine,
            counter,
            clock,
            reveal.clone(),
            items(),
            chart_targets(3),
        )
        .unwrap();

        chart.run().await;

        // All pills revealed with their end values despite the failure
        assert!(chart.pills().iter().all(|p| p.visual.revealed));
        assert_eq!(chart.pills()[1].visual.displayed, 7.0);
        assert_eq!(reveal.count(), 1);
    }

    #[tokio::test]
    async fn test_colorize_batch_is_staggered_not_awaited() {
        let engine = Arc::new(RecordingEngine::new());
        let counter = Arc::new(RecordingCounter::new());
        let clock = Arc::new(MockClock::new());
        let reveal = Arc::new(CountingReveal::new());
        let mut chart = PipelineChart::new(
            engine.clone(),
            counter,
            clock,
            reveal,
            items(),
            chart_targets(3),
        )
        .unwrap();

        chart.run().await;

        let batches = engine.batches();
        // One colorize batch and one reposition batch
        assert_eq!(batches.len(), 2);
        let colorize = &batches[0];
        assert_eq!(colorize.stagger, COLOR_STAGGER);
        assert_eq!(colorize.duration, COLOR_DURATION);
        assert_eq!(colorize.animations.len(), 3);
        assert!(matches!(
            colorize.animations[0].props[..],
            [Property::Background(Rgba { .. })]
        ));

        let reposition = &batches[1];
        assert_eq!(reposition.duration, REPOSITION_DURATION);
        assert_eq!(reposition.animations[0].target, TargetId(100));
    }
}
