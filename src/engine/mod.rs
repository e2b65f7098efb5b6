//! Animation engine capability interface
//!
//! The widgets never touch a DOM or a rendering library directly. Every
//! visual effect goes through the traits in this module, injected per
//! widget instance:
//!
//! - [`AnimationEngine`] - eased property transitions and instant placement
//! - [`NumericCounter`] - animated integer count-up on a display target
//! - [`Clock`] - timed suspension, injectable so sequencing is testable
//!   without real timers
//! - [`ImageLoader`] - image fetch that resolves on success *or* failure
//! - [`ContentReveal`] - page-level hook fired when the chart finishes
//!
//! Completion is a single-resolution signal: it resolves exactly once,
//! never rejects, and resolves even if the producing side is dropped, so a
//! torn-down engine can never wedge a waiting widget.

pub mod headless;
#[cfg(any(test, feature = "mock-engine"))]
pub mod mock;

use crate::types::Rgba;
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::oneshot;

/// Opaque handle to one animatable element; the host maps these to actual
/// DOM nodes (or whatever it renders with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(pub u32);

/// One animatable property with its end value. Positions are in percent of
/// the parent box, matching how the widgets lay out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Property {
    WidthPct(f64),
    HeightPct(f64),
    TopPct(f64),
    LeftPct(f64),
    TranslateXPct(f64),
    TranslateYPct(f64),
    Opacity(f64),
    Background(Rgba),
}

/// Easing curve families the widgets use
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Exponential ease-out (the split widget's transitions)
    OutExpo,
    /// Cubic ease-out (counters, repositioning, entrance animations)
    OutCubic,
    /// Elastic ease-out with amplitude and period (badge reveals)
    OutElastic { amplitude: f64, period: f64 },
    /// Plain CSS `ease` (background-color transitions)
    Ease,
}

/// Property changes on a single target, with an optional per-target delay
/// on top of the batch stagger.
#[derive(Debug, Clone, PartialEq)]
pub struct Animation {
    pub target: TargetId,
    pub props: Vec<Property>,
    pub delay: Duration,
}

impl Animation {
    pub fn new(target: TargetId, props: Vec<Property>) -> Self {
        Self {
            target,
            props,
            delay: Duration::ZERO,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

/// A batch of concurrently-run animations sharing duration and easing.
/// The batch completes when its slowest member does.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationBatch {
    pub duration: Duration,
    pub easing: Easing,
    /// Extra delay added per animation index (index * stagger)
    pub stagger: Duration,
    pub animations: Vec<Animation>,
}

impl AnimationBatch {
    pub fn new(duration: Duration, easing: Easing) -> Self {
        Self {
            duration,
            easing,
            stagger: Duration::ZERO,
            animations: Vec::new(),
        }
    }

    pub fn with_stagger(mut self, stagger: Duration) -> Self {
        self.stagger = stagger;
        self
    }

    pub fn push(mut self, animation: Animation) -> Self {
        self.animations.push(animation);
        self
    }

    /// Wall-clock span of the batch: the largest delay plus the duration
    pub fn total_span(&self) -> Duration {
        let max_delay = self
            .animations
            .iter()
            .enumerate()
            .map(|(i, a)| a.delay + self.stagger * i as u32)
            .max()
            .unwrap_or(Duration::ZERO);
        max_delay + self.duration
    }
}

/// Request for an animated count-up on a numeric display target
#[derive(Debug, Clone, PartialEq)]
pub struct CounterRequest {
    pub target: TargetId,
    pub start: f64,
    pub end: f64,
    pub duration: Duration,
    pub easing: Easing,
}

/// Producer half of a completion signal. Dropping it without calling
/// [`complete`](CompletionHandle::complete) still resolves the signal.
#[derive(Debug)]
pub struct CompletionHandle {
    tx: oneshot::Sender<()>,
}

impl CompletionHandle {
    /// Resolve the paired signal
    pub fn complete(self) {
        let _ = self.tx.send(());
    }
}

/// Single-resolution completion signal from the animation engine.
///
/// Resolves exactly once and never rejects. Supports a non-blocking poll
/// for busy-guard checks and an async wait for sequencing.
#[derive(Debug)]
pub struct CompletionSignal {
    rx: Option<oneshot::Receiver<()>>,
}

impl CompletionSignal {
    /// Create a linked handle/signal pair
    pub fn pair() -> (CompletionHandle, CompletionSignal) {
        let (tx, rx) = oneshot::channel();
        (CompletionHandle { tx }, CompletionSignal { rx: Some(rx) })
    }

    /// An already-resolved signal
    pub fn completed() -> CompletionSignal {
        CompletionSignal { rx: None }
    }

    /// Non-blocking check. Once this returns true it stays true.
    pub fn is_complete(&mut self) -> bool {
        match &mut self.rx {
            None => true,
            Some(rx) => match rx.try_recv() {
                Ok(()) | Err(oneshot::error::TryRecvError::Closed) => {
                    self.rx = None;
                    true
                }
                Err(oneshot::error::TryRecvError::Empty) => false,
            },
        }
    }

    /// Wait for the signal. Resolves when the engine completes the work or
    /// drops the handle; never errors.
    pub async fn wait(self) {
        if let Some(rx) = self.rx {
            let _ = rx.await;
        }
    }
}

/// Eased property transitions and instant placement on host targets.
///
/// `animate` returns immediately with the batch's completion signal; the
/// engine runs the transition on its own time. All methods are fire-and-
/// forget from the widget's perspective and must never block.
pub trait AnimationEngine: Send + Sync {
    /// Run a batch of concurrent eased transitions; the returned signal
    /// resolves when the whole batch has finished.
    fn animate(&self, batch: AnimationBatch) -> CompletionSignal;

    /// Apply property values instantly, without animation
    fn set_immediate(&self, target: TargetId, props: &[Property]);

    /// Set an instant visual-state marker on a target (the host maps
    /// markers to style classes)
    fn mark(&self, target: TargetId, marker: &str);

    /// Clear a visual-state marker
    fn unmark(&self, target: TargetId, marker: &str);

    /// Swap an image target's source instantly; any fade is handled by
    /// adjacent opacity transitions, not by the swap itself
    fn set_image(&self, target: TargetId, url: &str);
}

/// Animated integer count-up on a display target.
///
/// Failure is reported at start time; a started count always completes.
pub trait NumericCounter: Send + Sync {
    fn start_count(&self, request: CounterRequest) -> crate::error::Result<CompletionSignal>;
}

/// Injectable time source for phase delays
#[async_trait]
pub trait Clock: Send + Sync {
    async fn sleep(&self, duration: Duration);
}

/// Production clock backed by the tokio timer
#[derive(Debug, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

/// Image fetch capability. Resolves on success or failure, never errors
/// and never blocks indefinitely, so a broken URL cannot stall a widget.
#[async_trait]
pub trait ImageLoader: Send + Sync {
    async fn load(&self, url: &str) -> LoadedImage;
}

/// Outcome of an image load
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadedImage {
    /// Natural width/height ratio; `None` when the image failed to load
    pub aspect: Option<f64>,
}

/// Page-level hook fired once the pipeline chart finishes its sequence
pub trait ContentReveal: Send + Sync {
    /// Fade in the surrounding page content. Must be idempotent.
    fn reveal_content(&self);
}

/// Wrapper making any [`ContentReveal`] idempotent: only the first call
/// reaches the inner hook.
pub struct RevealOnce<R: ContentReveal> {
    inner: R,
    fired: AtomicBool,
}

impl<R: ContentReveal> RevealOnce<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            fired: AtomicBool::new(false),
        }
    }

    /// Whether the hook has fired
    pub fn has_fired(&self) -> bool {
        self.fired.load(Ordering::SeqCst)
    }
}

impl<R: ContentReveal> ContentReveal for RevealOnce<R> {
    fn reveal_content(&self) {
        if !self.fired.swap(true, Ordering::SeqCst) {
            self.inner.reveal_content();
        }
    }
}
