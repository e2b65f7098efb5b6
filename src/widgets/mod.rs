//! The scanview widgets
//!
//! Each widget owns its visual state exclusively and talks to the page
//! only through the injected engine capabilities; instances are
//! independent and may animate concurrently with each other.

pub mod image_split;
pub mod ingredients;
pub mod pipeline_chart;
pub mod scan_cell;

pub use image_split::{ImageSplit, PointerOutcome, SplitTargets};
pub use ingredients::{reveal_plan, BadgeSlot, IngredientsList};
pub use pipeline_chart::{ChartTargets, Phase, Pill, PillTargets, PipelineChart};
pub use scan_cell::ScanCell;
