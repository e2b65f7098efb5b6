//! Core data types for the scanview widgets
//!
//! This module contains the fundamental data structures shared across
//! the widgets: colors, pipeline stages, the split widget's geometry and
//! hover states, and ingredient badges.
//!
//! # Main Types
//!
//! - [`Rgba`] - An RGBA color with integer channels and fractional alpha
//! - [`PipelineItem`] - One named numeric stage of the pipeline chart
//! - [`PillVisual`] - Per-pill visual state owned by the chart sequencer
//! - [`SplitGeometry`] - Percent-based box of one image container
//! - [`HoverState`] - The split widget's interaction state
//! - [`Ingredient`] - One badge of the ingredients list

use serde::{Deserialize, Serialize};

/// An RGBA color. Channels are integer 0-255, alpha is fractional.
///
/// Displays in CSS `rgba(r, g, b, a)` form, which is what animation hosts
/// consume for background-color transitions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// Create a new color
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl std::fmt::Display for Rgba {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// One named numeric stage of the pipeline chart.
///
/// Order is significant: each stage's value is compared against the
/// previous stage when colorizing. Immutable once loaded from the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineItem {
    /// Stage name shown on the pill
    pub name: String,
    /// Stage value the pill counts up to
    pub value: f64,
}

impl PipelineItem {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Derived per-pill visual state, owned exclusively by the chart sequencer
/// and mutated only while the animation sequence runs.
#[derive(Debug, Clone, PartialEq)]
pub struct PillVisual {
    /// Value currently shown on the pill (0 until its count-up finishes)
    pub displayed: f64,
    /// Background color applied during the colorize phase
    pub color: Option<Rgba>,
    /// Whether this pill's reveal-and-count step has completed
    pub revealed: bool,
}

impl Default for PillVisual {
    fn default() -> Self {
        Self {
            displayed: 0.0,
            color: None,
            revealed: false,
        }
    }
}

/// Percent-based box describing one image container of the split widget.
///
/// Computed fresh on every hover event; carries no persisted identity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitGeometry {
    pub width_pct: f64,
    pub height_pct: f64,
    pub top_pct: f64,
    pub left_pct: f64,
}

/// Interaction state of the image-split widget. Exactly one holds at any
/// time; reset to `Neutral` on pointer leave.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HoverState {
    /// 50/50 split, both halves visible, overlay icon shown
    #[default]
    Neutral,
    /// Left image contained and enlarged, right image slid off-screen
    LeftActive,
    /// Mirror of `LeftActive`
    RightActive,
}

impl std::fmt::Display for HoverState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HoverState::Neutral => write!(f, "neutral"),
            HoverState::LeftActive => write!(f, "left-active"),
            HoverState::RightActive => write!(f, "right-active"),
        }
    }
}

/// One side of the split widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// The opposite side
    pub fn other(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// One badge of the ingredients list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    /// Ingredient name shown on the badge
    pub name: String,
    /// Whether the ingredient comes from a trusted source
    #[serde(default)]
    pub verified: bool,
}

impl Ingredient {
    /// Tooltip text for this badge
    pub fn tooltip(&self) -> &'static str {
        if self.verified {
            "Verified ingredient from trusted source"
        } else {
            "Ingredient not yet verified"
        }
    }
}
