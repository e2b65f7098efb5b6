//! Composite scan-result card
//!
//! Wraps the image comparison and the ingredients list together with the
//! product title and brand. The card sits hidden until the page reports
//! it scrolled into view, then plays a single staggered entrance
//! animation over whichever sub-elements are present. The visibility
//! trigger is one-shot: the page unobserves after the first hit, and the
//! widget enforces the same idempotence on its side.

use crate::config::ScanCellConfig;
use crate::engine::{Animation, AnimationBatch, AnimationEngine, Easing, Property, TargetId};
use std::sync::Arc;
use std::time::Duration;

/// Entrance animation duration
const ENTRANCE_DURATION: Duration = Duration::from_millis(600);
/// Stagger between the card's sub-elements
const ENTRANCE_STAGGER: Duration = Duration::from_millis(100);
/// Vertical offset the elements rise from, in percent
const ENTRANCE_RISE_PCT: f64 = 15.0;

/// The composite scan-result card
pub struct ScanCell {
    engine: Arc<dyn AnimationEngine>,
    config: ScanCellConfig,
    /// Present sub-elements in display order (heading, subheading, image
    /// comparison, ingredients list); absent ones are simply not listed
    elements: Vec<TargetId>,
    entered: bool,
}

impl ScanCell {
    pub fn new(
        engine: Arc<dyn AnimationEngine>,
        config: ScanCellConfig,
        elements: Vec<TargetId>,
    ) -> Self {
        Self {
            engine,
            config,
            elements,
            entered: false,
        }
    }

    pub fn config(&self) -> &ScanCellConfig {
        &self.config
    }

    /// Play the one-shot entrance animation. Returns whether an animation
    /// was issued; repeat calls (or a card with no elements) are no-ops.
    pub fn became_visible(&mut self) -> bool {
        if self.entered || self.elements.is_empty() {
            return false;
        }
        self.entered = true;

        // Pin the elements at the hidden start state before tweening in
        for &element in &self.elements {
            self.engine.set_immediate(
                element,
                &[
                    Property::Opacity(0.0),
                    Property::TranslateYPct(ENTRANCE_RISE_PCT),
                ],
            );
        }

        let mut batch = AnimationBatch::new(ENTRANCE_DURATION, Easing::OutCubic)
            .with_stagger(ENTRANCE_STAGGER);
        for &element in &self.elements {
            batch = batch.push(Animation::new(
                element,
                vec![Property::Opacity(1.0), Property::TranslateYPct(0.0)],
            ));
        }
        let _ = self.engine.animate(batch);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::RecordingEngine;

    fn config() -> ScanCellConfig {
        ScanCellConfig::from_attrs(
            Some("Shampoo"),
            Some("Acme"),
            Some("before.jpg"),
            Some("after.jpg"),
            Some(r#"[{"name": "Water", "verified": true}]"#),
        )
    }

    #[test]
    fn test_entrance_is_one_shot() {
        let engine = Arc::new(RecordingEngine::new());
        let elements: Vec<TargetId> = (0..4u32).map(TargetId).collect();
        let mut cell = ScanCell::new(engine.clone(), config(), elements);

        assert!(cell.became_visible());
        assert!(!cell.became_visible());
        assert_eq!(engine.batches().len(), 1);
    }

    #[test]
    fn test_entrance_staggers_present_elements() {
        let engine = Arc::new(RecordingEngine::new());
        // Only two sub-elements exist on this card
        let mut cell = ScanCell::new(engine.clone(), config(), vec![TargetId(0), TargetId(2)]);

        cell.became_visible();

        let batch = &engine.batches()[0];
        assert_eq!(batch.animations.len(), 2);
        assert_eq!(batch.stagger, ENTRANCE_STAGGER);
        assert_eq!(batch.duration, ENTRANCE_DURATION);
        assert_eq!(batch.easing, Easing::OutCubic);
    }

    #[test]
    fn test_empty_card_never_animates() {
        let engine = Arc::new(RecordingEngine::new());
        let mut cell = ScanCell::new(engine.clone(), config(), Vec::new());

        assert!(!cell.became_visible());
        assert!(engine.events().is_empty());
        // Still unanimated: a later visibility hit on a populated clone
        // would be a different widget instance
        assert!(!cell.became_visible());
    }
}
