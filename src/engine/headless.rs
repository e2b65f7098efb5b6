//! Headless animation engine for running widgets without a rendering host
//!
//! Logs every engine call via `tracing` and completes signals after the
//! real wall-clock span of the requested animation, so sequencing behaves
//! exactly as it would against a browser-side engine. Used by the demo
//! binary; tests use the recording mocks instead.
//!
//! Requires a tokio runtime: completions are driven by spawned timer
//! tasks.

use super::{
    AnimationBatch, AnimationEngine, CompletionSignal, ContentReveal, CounterRequest, ImageLoader,
    LoadedImage, NumericCounter, Property, TargetId,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::time::Duration;

/// Engine that narrates animations to the log instead of rendering them
#[derive(Debug, Default)]
pub struct HeadlessEngine;

impl HeadlessEngine {
    fn complete_after(span: Duration) -> CompletionSignal {
        let (handle, signal) = CompletionSignal::pair();
        tokio::spawn(async move {
            tokio::time::sleep(span).await;
            handle.complete();
        });
        signal
    }
}

impl AnimationEngine for HeadlessEngine {
    fn animate(&self, batch: AnimationBatch) -> CompletionSignal {
        let span = batch.total_span();
        tracing::info!(
            targets = batch.animations.len(),
            duration_ms = batch.duration.as_millis() as u64,
            easing = ?batch.easing,
            "animate"
        );
        for animation in &batch.animations {
            tracing::debug!(target = animation.target.0, props = ?animation.props, "  tween");
        }
        Self::complete_after(span)
    }

    fn set_immediate(&self, target: TargetId, props: &[Property]) {
        tracing::debug!(target = target.0, ?props, "set");
    }

    fn mark(&self, target: TargetId, marker: &str) {
        tracing::debug!(target = target.0, marker, "mark");
    }

    fn unmark(&self, target: TargetId, marker: &str) {
        tracing::debug!(target = target.0, marker, "unmark");
    }

    fn set_image(&self, target: TargetId, url: &str) {
        tracing::debug!(target = target.0, url, "set image");
    }
}

impl NumericCounter for HeadlessEngine {
    fn start_count(&self, request: CounterRequest) -> crate::error::Result<CompletionSignal> {
        tracing::info!(
            target = request.target.0,
            end = request.end,
            duration_ms = request.duration.as_millis() as u64,
            "count up"
        );
        Ok(Self::complete_after(request.duration))
    }
}

impl ContentReveal for HeadlessEngine {
    fn reveal_content(&self) {
        tracing::info!("revealing page content");
    }
}

/// Loader that serves aspect ratios from a fixed table; unknown URLs
/// resolve as failed loads, the same way a broken image tag would.
#[derive(Debug, Default)]
pub struct TableImageLoader {
    aspects: HashMap<String, f64>,
}

impl TableImageLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, url: impl Into<String>, aspect: f64) -> Self {
        self.aspects.insert(url.into(), aspect);
        self
    }
}

#[async_trait]
impl ImageLoader for TableImageLoader {
    async fn load(&self, url: &str) -> LoadedImage {
        match self.aspects.get(url) {
            Some(&aspect) => LoadedImage {
                aspect: Some(aspect),
            },
            None => {
                tracing::warn!(url, "image failed to load, continuing without it");
                LoadedImage { aspect: None }
            }
        }
    }
}
