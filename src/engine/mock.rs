//! Recording engine mocks for driving widgets without a rendering host
//!
//! Every capability trait gets a recording implementation that captures
//! the calls a widget makes, so tests can assert on the exact sequence of
//! issued animations, marks, counter requests, and sleeps.
//!
//! # Completion control
//!
//! [`RecordingEngine`] completes batch signals immediately by default.
//! With [`RecordingEngine::manual_completion`] the signals stay pending
//! until the test calls [`complete_pending`](RecordingEngine::complete_pending),
//! which is how the split widget's busy guard is exercised.
//!
//! # Enabling
//!
//! Available in unit tests and, for external harnesses, behind the
//! `mock-engine` feature:
//!
//! ```bash
//! cargo test --features mock-engine
//! ```

use super::{
    AnimationBatch, AnimationEngine, Clock, CompletionHandle, CompletionSignal, ContentReveal,
    CounterRequest, ImageLoader, LoadedImage, NumericCounter, Property, TargetId,
};
use crate::error::WidgetError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

/// One recorded engine call
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    Animate(AnimationBatch),
    SetImmediate {
        target: TargetId,
        props: Vec<Property>,
    },
    Mark {
        target: TargetId,
        marker: String,
    },
    Unmark {
        target: TargetId,
        marker: String,
    },
    SetImage {
        target: TargetId,
        url: String,
    },
}

/// Animation engine that records calls instead of rendering
#[derive(Debug, Default)]
pub struct RecordingEngine {
    events: Mutex<Vec<EngineEvent>>,
    manual: bool,
    pending: Mutex<Vec<CompletionHandle>>,
}

impl RecordingEngine {
    /// Engine whose batch signals resolve immediately on issue
    pub fn new() -> Self {
        Self::default()
    }

    /// Engine whose batch signals stay pending until
    /// [`complete_pending`](Self::complete_pending) is called
    pub fn manual_completion() -> Self {
        Self {
            manual: true,
            ..Self::default()
        }
    }

    /// Snapshot of all recorded calls, in issue order
    pub fn events(&self) -> Vec<EngineEvent> {
        self.events.lock().unwrap().clone()
    }

    /// Recorded animation batches only, in issue order
    pub fn batches(&self) -> Vec<AnimationBatch> {
        self.events()
            .into_iter()
            .filter_map(|e| match e {
                EngineEvent::Animate(batch) => Some(batch),
                _ => None,
            })
            .collect()
    }

    /// Resolve every pending batch signal
    pub fn complete_pending(&self) {
        for handle in self.pending.lock().unwrap().drain(..) {
            handle.complete();
        }
    }

    fn record(&self, event: EngineEvent) {
        self.events.lock().unwrap().push(event);
    }
}

impl AnimationEngine for RecordingEngine {
    fn animate(&self, batch: AnimationBatch) -> CompletionSignal {
        self.record(EngineEvent::Animate(batch));
        if self.manual {
            let (handle, signal) = CompletionSignal::pair();
            self.pending.lock().unwrap().push(handle);
            signal
        } else {
            CompletionSignal::completed()
        }
    }

    fn set_immediate(&self, target: TargetId, props: &[Property]) {
        self.record(EngineEvent::SetImmediate {
            target,
            props: props.to_vec(),
        });
    }

    fn mark(&self, target: TargetId, marker: &str) {
        self.record(EngineEvent::Mark {
            target,
            marker: marker.to_string(),
        });
    }

    fn unmark(&self, target: TargetId, marker: &str) {
        self.record(EngineEvent::Unmark {
            target,
            marker: marker.to_string(),
        });
    }

    fn set_image(&self, target: TargetId, url: &str) {
        self.record(EngineEvent::SetImage {
            target,
            url: url.to_string(),
        });
    }
}

/// Counter that records requests and completes immediately; optionally
/// fails at a chosen request index to exercise the non-fatal error path.
#[derive(Debug, Default)]
pub struct RecordingCounter {
    requests: Mutex<Vec<CounterRequest>>,
    fail_on: Option<usize>,
}

impl RecordingCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `index`-th start_count call (0-based)
    pub fn failing_on(index: usize) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_on: Some(index),
        }
    }

    /// Snapshot of all recorded requests, in issue order
    pub fn requests(&self) -> Vec<CounterRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl NumericCounter for RecordingCounter {
    fn start_count(&self, request: CounterRequest) -> crate::error::Result<CompletionSignal> {
        let mut requests = self.requests.lock().unwrap();
        let index = requests.len();
        requests.push(request);
        if self.fail_on == Some(index) {
            return Err(WidgetError::Counter(format!(
                "misconfigured counter at request {index}"
            )));
        }
        Ok(CompletionSignal::completed())
    }
}

/// Clock that records sleeps and returns instantly, accumulating virtual
/// time instead of waiting.
#[derive(Debug, Default)]
pub struct MockClock {
    sleeps: Mutex<Vec<Duration>>,
}

impl MockClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded sleeps, in order
    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().unwrap().clone()
    }

    /// Sum of all recorded sleeps (the virtual elapsed delay time)
    pub fn total_slept(&self) -> Duration {
        self.sleeps.lock().unwrap().iter().sum()
    }
}

#[async_trait]
impl Clock for MockClock {
    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

/// Reveal hook that counts invocations
#[derive(Debug, Default)]
pub struct CountingReveal {
    count: AtomicUsize,
}

impl CountingReveal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl ContentReveal for CountingReveal {
    fn reveal_content(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

/// Loader serving fixed aspect ratios; unknown URLs resolve as failed
/// loads (`aspect: None`), never as errors.
#[derive(Debug, Default)]
pub struct StaticImageLoader {
    aspects: HashMap<String, f64>,
}

impl StaticImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, url: impl Into<String>, aspect: f64) -> Self {
        self.aspects.insert(url.into(), aspect);
        self
    }
}

#[async_trait]
impl ImageLoader for StaticImageLoader {
    async fn load(&self, url: &str) -> LoadedImage {
        LoadedImage {
            aspect: self.aspects.get(url).copied(),
        }
    }
}
