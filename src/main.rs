//! scanview demo - Main Entry Point
//!
//! Runs the widgets headlessly: the pipeline chart plays its full staged
//! sequence and the image-split widget walks through a hover interaction,
//! with every engine call narrated to the log instead of a DOM.

use anyhow::Result;
use scanview::{
    config::{self, ImageSplitConfig},
    engine::{
        headless::{HeadlessEngine, TableImageLoader},
        RevealOnce, TargetId, TokioClock,
    },
    widgets::{ChartTargets, ImageSplit, PillTargets, PipelineChart, SplitTargets},
};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,scanview=debug")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting scanview demo");

    run_pipeline_chart().await?;
    run_image_split().await;

    tracing::info!("Demo complete");
    Ok(())
}

/// Play the pipeline chart's full staged sequence against the headless
/// engine (real timers, so this takes a few seconds).
async fn run_pipeline_chart() -> Result<()> {
    let engine = Arc::new(HeadlessEngine);
    let items = config::parse_pipeline_items_lenient(
        r#"[
            {"name": "scanned", "value": 128},
            {"name": "matched", "value": 97},
            {"name": "verified", "value": 81}
        ]"#,
    );

    let targets = ChartTargets {
        chart: TargetId(0),
        pills: (0..items.len() as u32)
            .map(|i| PillTargets {
                pill: TargetId(1 + i * 2),
                value_label: TargetId(2 + i * 2),
            })
            .collect(),
    };

    let mut chart = PipelineChart::new(
        engine.clone(),
        engine.clone(),
        Arc::new(TokioClock),
        Arc::new(RevealOnce::new(HeadlessEngine)),
        items,
        targets,
    )?;
    chart.run().await;
    Ok(())
}

/// Walk the image-split widget through a mount and a short hover
/// interaction.
async fn run_image_split() {
    let engine = Arc::new(HeadlessEngine);
    let loader = TableImageLoader::new()
        .with_image("before.jpg", 1.78)
        .with_image("after.jpg", 1.33);

    let targets = SplitTargets {
        container: TargetId(100),
        left_container: TargetId(101),
        right_container: TargetId(102),
        blur_background: TargetId(103),
        overlay: TargetId(104),
        label_left: TargetId(105),
        label_right: TargetId(106),
    };
    let config = ImageSplitConfig::from_attrs(
        Some("before.jpg"),
        Some("after.jpg"),
        Some("Original Image"),
        Some("Reference Image"),
    );

    let mut split = ImageSplit::new(engine, targets, config, 960.0, 540.0);
    split.mount(&loader).await;

    // Hover the left half, let the transition finish, then leave
    split.pointer_move(200.0);
    tokio::time::sleep(Duration::from_millis(900)).await;
    split.pointer_move(800.0);
    tokio::time::sleep(Duration::from_millis(900)).await;
    split.pointer_leave();
}
