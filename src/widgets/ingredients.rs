//! Animated ingredient-badge list
//!
//! Badges reveal with an elastic pop, spread across a few groups that
//! animate in parallel so long lists do not take forever: one group per
//! seven badges. Badges are dealt into groups in shuffled order and each
//! group's delays are the multiples of 70 ms, also shuffled, which makes
//! the reveal look organic rather than strictly left-to-right.
//!
//! The shuffle is a seeded xorshift so a given seed reproduces the exact
//! reveal plan; hosts that want variety pass a varying seed.

use crate::engine::{Animation, AnimationBatch, AnimationEngine, Easing, Property, TargetId};
use crate::types::Ingredient;
use std::sync::Arc;
use std::time::Duration;

/// Badge pop duration
const REVEAL_DURATION: Duration = Duration::from_millis(600);
/// Delay step between badges within one group
const DELAY_STEP: Duration = Duration::from_millis(70);
/// Badges per parallel group
const BADGES_PER_GROUP: usize = 7;
/// Elastic pop easing
const EASING: Easing = Easing::OutElastic {
    amplitude: 1.0,
    period: 0.5,
};

/// One badge's slot in the reveal plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeSlot {
    /// Index of the badge in the ingredient list
    pub index: usize,
    /// Delay from the group's start
    pub delay: Duration,
}

fn xorshift(state: &mut u64) -> u64 {
    *state ^= *state << 13;
    *state ^= *state >> 7;
    *state ^= *state << 17;
    *state
}

/// Fisher-Yates shuffle driven by a seeded xorshift
fn shuffle<T>(items: &mut [T], seed: u64) {
    // Mix the seed so 0 still produces a nonzero generator state
    let mut state = seed.wrapping_add(0x9E37_79B9_7F4A_7C15) | 1;
    for i in (1..items.len()).rev() {
        let j = (xorshift(&mut state) % (i as u64 + 1)) as usize;
        items.swap(i, j);
    }
}

/// Build the reveal plan for `count` badges: badges dealt into
/// `max(1, count/7)` groups in shuffled order, each group's delays the
/// shuffled multiples of 70 ms. Every badge appears exactly once and
/// group sizes differ by at most one.
pub fn reveal_plan(count: usize, seed: u64) -> Vec<Vec<BadgeSlot>> {
    if count == 0 {
        return Vec::new();
    }
    let group_count = (count / BADGES_PER_GROUP).max(1);

    let mut order: Vec<usize> = (0..count).collect();
    shuffle(&mut order, seed);

    let mut groups: Vec<Vec<usize>> = vec![Vec::new(); group_count];
    for (position, badge) in order.into_iter().enumerate() {
        groups[position % group_count].push(badge);
    }

    groups
        .into_iter()
        .enumerate()
        .map(|(group_index, members)| {
            let mut delays: Vec<Duration> =
                (0..members.len()).map(|i| DELAY_STEP * i as u32).collect();
            shuffle(&mut delays, seed.wrapping_add(group_index as u64 + 1));
            members
                .into_iter()
                .zip(delays)
                .map(|(index, delay)| BadgeSlot { index, delay })
                .collect()
        })
        .collect()
}

/// The ingredient-badge list widget
pub struct IngredientsList {
    engine: Arc<dyn AnimationEngine>,
    ingredients: Vec<Ingredient>,
    badges: Vec<TargetId>,
    seed: u64,
}

impl IngredientsList {
    /// Build the list; ingredient and badge-target counts are expected to
    /// match, extra entries on either side are ignored.
    pub fn new(
        engine: Arc<dyn AnimationEngine>,
        ingredients: Vec<Ingredient>,
        badges: Vec<TargetId>,
        seed: u64,
    ) -> Self {
        Self {
            engine,
            ingredients,
            badges,
            seed,
        }
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    /// Run the grouped badge reveal: hide all badges, issue one batch per
    /// group, and await the final group before clearing the inline
    /// overrides with a "revealed" marker.
    pub async fn reveal(&self) {
        let count = self.ingredients.len().min(self.badges.len());
        if count == 0 {
            return;
        }

        for &badge in &self.badges[..count] {
            self.engine.set_immediate(
                badge,
                &[Property::Opacity(0.0), Property::TranslateYPct(10.0)],
            );
        }

        let mut last_signal = None;
        for group in reveal_plan(count, self.seed) {
            let mut batch = AnimationBatch::new(REVEAL_DURATION, EASING);
            for slot in group {
                batch = batch.push(
                    Animation::new(
                        self.badges[slot.index],
                        vec![Property::Opacity(1.0), Property::TranslateYPct(0.0)],
                    )
                    .with_delay(slot.delay),
                );
            }
            last_signal = Some(self.engine.animate(batch));
        }

        if let Some(signal) = last_signal {
            signal.wait().await;
        }
        for &badge in &self.badges[..count] {
            self.engine.mark(badge, "revealed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::mock::{EngineEvent, RecordingEngine};

    #[test]
    fn test_plan_covers_every_badge_once() {
        for count in [1, 3, 7, 13, 14, 29, 50] {
            let plan = reveal_plan(count, 42);
            let mut seen: Vec<usize> = plan
                .iter()
                .flat_map(|group| group.iter().map(|slot| slot.index))
                .collect();
            seen.sort_unstable();
            assert_eq!(seen, (0..count).collect::<Vec<_>>(), "count {count}");
        }
    }

    #[test]
    fn test_plan_group_count_and_balance() {
        assert!(reveal_plan(0, 0).is_empty());
        assert_eq!(reveal_plan(6, 0).len(), 1);
        assert_eq!(reveal_plan(7, 0).len(), 1);
        assert_eq!(reveal_plan(14, 0).len(), 2);
        assert_eq!(reveal_plan(29, 0).len(), 4);

        let plan = reveal_plan(29, 7);
        let max = plan.iter().map(Vec::len).max().unwrap();
        let min = plan.iter().map(Vec::len).min().unwrap();
        assert!(max - min <= 1);
    }

    #[test]
    fn test_plan_delays_are_step_multiples() {
        let plan = reveal_plan(20, 9);
        for group in &plan {
            let mut delays: Vec<Duration> = group.iter().map(|slot| slot.delay).collect();
            delays.sort_unstable();
            let expected: Vec<Duration> =
                (0..group.len()).map(|i| DELAY_STEP * i as u32).collect();
            assert_eq!(delays, expected);
        }
    }

    #[test]
    fn test_plan_is_deterministic_per_seed() {
        assert_eq!(reveal_plan(15, 5), reveal_plan(15, 5));
        // Not a hard requirement, but distinct seeds should usually
        // produce distinct orderings for a list this size
        assert_ne!(reveal_plan(15, 5), reveal_plan(15, 6));
    }

    #[tokio::test]
    async fn test_reveal_issues_one_batch_per_group() {
        let engine = Arc::new(RecordingEngine::new());
        let ingredients: Vec<Ingredient> = (0..14)
            .map(|i| Ingredient {
                name: format!("ingredient {i}"),
                verified: i % 2 == 0,
            })
            .collect();
        let badges: Vec<TargetId> = (0..14u32).map(TargetId).collect();
        let list = IngredientsList::new(engine.clone(), ingredients, badges, 3);

        list.reveal().await;

        let batches = engine.batches();
        assert_eq!(batches.len(), 2);
        assert!(batches.iter().all(|b| b.duration == REVEAL_DURATION));

        // All badges hidden first, then marked revealed at the end
        let events = engine.events();
        let hides = events
            .iter()
            .filter(|e| matches!(e, EngineEvent::SetImmediate { .. }))
            .count();
        let marks = events
            .iter()
            .filter(|e| matches!(e, EngineEvent::Mark { .. }))
            .count();
        assert_eq!(hides, 14);
        assert_eq!(marks, 14);
    }

    #[tokio::test]
    async fn test_empty_list_is_a_noop() {
        let engine = Arc::new(RecordingEngine::new());
        let list = IngredientsList::new(engine.clone(), Vec::new(), Vec::new(), 0);
        list.reveal().await;
        assert!(engine.events().is_empty());
    }
}
