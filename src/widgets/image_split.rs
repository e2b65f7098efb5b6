//! Before/after image comparison widget
//!
//! A hover-driven state machine over three states: the neutral 50/50
//! split, and one enlarged "contained" side with the other slid
//! off-canvas. Pointer moves pick a side from the horizontal offset;
//! pointer leave always resets.
//!
//! While a transition is in flight further pointer moves are dropped
//! outright. The busy guard is the transition's own completion signal
//! rather than an independent cool-down timer, so the guard can never
//! drift out of sync with the animation duration. Pointer leave is the
//! one event allowed to cut through the guard: leaving the widget must
//! never get stuck mid-transition.

use crate::config::ImageSplitConfig;
use crate::engine::{
    Animation, AnimationBatch, AnimationEngine, CompletionSignal, Easing, ImageLoader, Property,
    TargetId,
};
use crate::geometry;
use crate::types::{HoverState, Side, SplitGeometry};
use std::sync::Arc;
use std::time::Duration;

/// Transition duration for every hover animation
const TRANSITION: Duration = Duration::from_millis(800);
/// Easing family for every hover animation
const EASING: Easing = Easing::OutExpo;
/// Off-canvas left offset when the right container is deactivated
const EXIT_RIGHTWARD_PCT: f64 = 120.0;
/// Off-canvas left offset when the left container is deactivated.
/// Asymmetric with the rightward exit because the boxes differ in width;
/// both values push the box fully off-screen.
const EXIT_LEFTWARD_PCT: f64 = -70.0;

/// Host targets the widget animates
#[derive(Debug, Clone, Copy)]
pub struct SplitTargets {
    pub container: TargetId,
    pub left_container: TargetId,
    pub right_container: TargetId,
    pub blur_background: TargetId,
    pub overlay: TargetId,
    pub label_left: TargetId,
    pub label_right: TargetId,
}

/// What a pointer-move did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// A transition to the given state was issued
    Transitioned(HoverState),
    /// The event was dropped (transition already in flight, or the
    /// pointed side is already active)
    Ignored,
}

/// The before/after split widget
pub struct ImageSplit {
    engine: Arc<dyn AnimationEngine>,
    targets: SplitTargets,
    config: ImageSplitConfig,
    /// Widget box in pixels, fixed at mount
    width: f64,
    height: f64,
    left_aspect: Option<f64>,
    right_aspect: Option<f64>,
    state: HoverState,
    in_flight: Option<CompletionSignal>,
}

impl ImageSplit {
    pub fn new(
        engine: Arc<dyn AnimationEngine>,
        targets: SplitTargets,
        config: ImageSplitConfig,
        width: f64,
        height: f64,
    ) -> Self {
        Self {
            engine,
            targets,
            config,
            width,
            height,
            left_aspect: None,
            right_aspect: None,
            state: HoverState::Neutral,
            in_flight: None,
        }
    }

    /// Current interaction state
    pub fn state(&self) -> HoverState {
        self.state
    }

    /// Load both images and place the initial 50/50 layout.
    ///
    /// Loading resolves on success or failure, so a broken URL never
    /// blocks the widget; a failed image simply has no natural aspect and
    /// later fits as a full-container box.
    pub async fn mount(&mut self, loader: &dyn ImageLoader) {
        self.engine.mark(self.targets.container, "loading");

        let (left, right) = tokio::join!(
            loader.load(&self.config.left_image),
            loader.load(&self.config.right_image),
        );
        self.left_aspect = left.aspect;
        self.right_aspect = right.aspect;

        self.engine.unmark(self.targets.container, "loading");

        self.engine.set_immediate(
            self.targets.left_container,
            &[
                Property::WidthPct(50.0),
                Property::HeightPct(100.0),
                Property::LeftPct(0.0),
                Property::TopPct(0.0),
                Property::Opacity(1.0),
            ],
        );
        self.engine.set_immediate(
            self.targets.right_container,
            &[
                Property::WidthPct(50.0),
                Property::HeightPct(100.0),
                Property::LeftPct(50.0),
                Property::TopPct(0.0),
                Property::Opacity(1.0),
            ],
        );
        self.engine
            .set_image(self.targets.blur_background, &self.config.left_image);
        self.engine
            .set_immediate(self.targets.blur_background, &[Property::Opacity(1.0)]);
    }

    /// Handle a pointer move at horizontal offset `x` from the widget's
    /// left edge. Dropped entirely while a transition is in flight.
    pub fn pointer_move(&mut self, x: f64) -> PointerOutcome {
        if self.busy() {
            return PointerOutcome::Ignored;
        }

        let side = if x < self.width / 2.0 {
            Side::Left
        } else {
            Side::Right
        };
        let next = match side {
            Side::Left => HoverState::LeftActive,
            Side::Right => HoverState::RightActive,
        };
        if self.state == next {
            return PointerOutcome::Ignored;
        }

        self.activate(side);
        self.state = next;
        PointerOutcome::Transitioned(next)
    }

    /// Reset to neutral. Always honored, even mid-transition.
    pub fn pointer_leave(&mut self) {
        // Abandon the busy guard; the reset batch supersedes whatever was
        // in flight.
        self.in_flight = None;

        self.engine.unmark(self.targets.label_left, "active");
        self.engine.unmark(self.targets.label_right, "active");
        self.engine
            .set_immediate(self.targets.blur_background, &[Property::Opacity(1.0)]);
        self.engine
            .set_immediate(self.targets.overlay, &[Property::Opacity(1.0)]);

        let batch = AnimationBatch::new(TRANSITION, EASING)
            .push(Animation::new(
                self.targets.label_left,
                vec![Property::Opacity(0.0), Property::TranslateYPct(20.0)],
            ))
            .push(Animation::new(
                self.targets.label_right,
                vec![Property::Opacity(0.0), Property::TranslateYPct(20.0)],
            ))
            .push(Animation::new(
                self.targets.left_container,
                vec![
                    Property::TranslateXPct(0.0),
                    Property::WidthPct(50.0),
                    Property::HeightPct(100.0),
                    Property::TopPct(0.0),
                    Property::LeftPct(0.0),
                ],
            ))
            .push(Animation::new(
                self.targets.right_container,
                vec![
                    Property::TranslateXPct(0.0),
                    Property::WidthPct(50.0),
                    Property::HeightPct(100.0),
                    Property::TopPct(0.0),
                    Property::LeftPct(50.0),
                ],
            ));
        let _ = self.engine.animate(batch);

        self.state = HoverState::Neutral;
    }

    /// Non-blocking busy check; clears the guard once the in-flight
    /// transition has completed.
    fn busy(&mut self) -> bool {
        match &mut self.in_flight {
            Some(signal) => {
                if signal.is_complete() {
                    self.in_flight = None;
                    false
                } else {
                    true
                }
            }
            None => false,
        }
    }

    /// Contain geometry for one side's image. A failed load has no
    /// natural aspect; it falls back to the container's own aspect and
    /// fits as a full box.
    fn contain_geometry(&self, side: Side) -> SplitGeometry {
        let container_aspect = self.width / self.height;
        let image_aspect = match side {
            Side::Left => self.left_aspect,
            Side::Right => self.right_aspect,
        }
        .unwrap_or(container_aspect);
        geometry::fit(container_aspect, image_aspect)
    }

    /// Issue the activation transition for one side: blur swap first
    /// (instant, independent of the animation), then one concurrent batch
    /// over both containers and the labels, overlay hidden.
    fn activate(&mut self, side: Side) {
        let (active_url, active_container, active_label, idle_container, idle_label, exit_pct) =
            match side {
                Side::Left => (
                    &self.config.left_image,
                    self.targets.left_container,
                    self.targets.label_left,
                    self.targets.right_container,
                    self.targets.label_right,
                    EXIT_RIGHTWARD_PCT,
                ),
                Side::Right => (
                    &self.config.right_image,
                    self.targets.right_container,
                    self.targets.label_right,
                    self.targets.left_container,
                    self.targets.label_left,
                    EXIT_LEFTWARD_PCT,
                ),
            };

        self.engine.set_image(self.targets.blur_background, active_url);
        self.engine
            .set_immediate(self.targets.blur_background, &[Property::Opacity(1.0)]);
        self.engine.mark(active_label, "active");
        self.engine.unmark(idle_label, "active");

        let fitted = self.contain_geometry(side);
        let batch = AnimationBatch::new(TRANSITION, EASING)
            .push(Animation::new(
                self.targets.label_left,
                vec![Property::Opacity(1.0), Property::TranslateYPct(0.0)],
            ))
            .push(Animation::new(
                self.targets.label_right,
                vec![Property::Opacity(1.0), Property::TranslateYPct(0.0)],
            ))
            .push(Animation::new(
                active_container,
                vec![
                    Property::WidthPct(fitted.width_pct),
                    Property::HeightPct(fitted.height_pct),
                    Property::TopPct(fitted.top_pct),
                    Property::LeftPct(fitted.left_pct),
                ],
            ))
            .push(Animation::new(
                idle_container,
                vec![Property::LeftPct(exit_pct)],
            ))
            .push(Animation::new(
                self.targets.overlay,
                vec![Property::Opacity(0.0)],
            ));
        self.in_flight = Some(self.engine.animate(batch));
    }
}
