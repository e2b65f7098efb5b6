//! # scanview: animated scan-result UI widgets
//!
//! Client-side widget logic for a scan-result page: a before/after image
//! comparison slider, an animated ingredient-badge list, a staged
//! pipeline funnel chart, and the composite card tying them together.
//!
//! ## Architecture
//!
//! The widgets own their interaction state and animation choreography but
//! never render anything themselves. Rendering, tweening, and timing are
//! capability traits injected per widget instance:
//!
//! - **Engine**: [`engine::AnimationEngine`] applies eased property
//!   transitions and instant placement; [`engine::NumericCounter`] runs
//!   count-ups; [`engine::Clock`] provides the phase delays
//! - **Widgets**: hover state machine ([`widgets::ImageSplit`]), phased
//!   sequencer ([`widgets::PipelineChart`]), grouped badge reveal
//!   ([`widgets::IngredientsList`]), composite card ([`widgets::ScanCell`])
//! - **Pure cores**: "contain" fitting ([`geometry::fit`]) and
//!   stage-change color interpolation ([`color::color_for`])
//!
//! Everything is single-threaded and event-driven: timed delays and
//! single-resolution completion signals are the only suspension points,
//! and no widget state is shared between instances.
//!
//! ## Failure model
//!
//! No failure is fatal to the page. Malformed payloads degrade to empty
//! widgets, broken images fit as plain boxes, and a counter that fails to
//! start is logged and skipped. See [`error`] for the taxonomy.
//!
//! ## Example
//!
//! ```ignore
//! use scanview::{
//!     config,
//!     engine::{headless::HeadlessEngine, TargetId, TokioClock},
//!     widgets::{ChartTargets, PillTargets, PipelineChart},
//! };
//! use std::sync::Arc;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let engine = Arc::new(HeadlessEngine);
//! let items = config::parse_pipeline_items_lenient(
//!     r#"[{"name": "scanned", "value": 128}, {"name": "matched", "value": 97}]"#,
//! );
//! let targets = ChartTargets {
//!     chart: TargetId(0),
//!     pills: vec![
//!         PillTargets { pill: TargetId(1), value_label: TargetId(2) },
//!         PillTargets { pill: TargetId(3), value_label: TargetId(4) },
//!     ],
//! };
//! let mut chart = PipelineChart::new(
//!     engine.clone(),
//!     engine.clone(),
//!     Arc::new(TokioClock),
//!     engine,
//!     items,
//!     targets,
//! )?;
//! chart.run().await;
//! # Ok(())
//! # }
//! ```

pub mod color;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod types;
pub mod widgets;

// Re-export commonly used types
pub use config::{ImageSplitConfig, ScanCellConfig};
pub use error::{Result, WidgetError};
pub use types::{HoverState, Ingredient, PipelineItem, Rgba, SplitGeometry};
pub use widgets::{ImageSplit, IngredientsList, PipelineChart, ScanCell};
