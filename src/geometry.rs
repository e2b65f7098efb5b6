//! "Contain" fitting for the image-split widget
//!
//! Computes the letterbox/pillarbox box of an image inside a container
//! given both aspect ratios, centering the shorter dimension. Pure and
//! deterministic; the hover state machine calls this on every activation.

use crate::types::SplitGeometry;

/// Fit an image into a container, preserving aspect ratio ("contain").
///
/// Aspect ratios are width/height. If the image is relatively wider than
/// the container it spans the full width and is centered vertically;
/// otherwise it spans the full height and is centered horizontally. The
/// unused offset stays 0.
///
/// Degenerate input (zero or infinite aspect ratios) is undefined
/// behavior; callers must guard against zero-dimension containers and
/// images before calling.
pub fn fit(container_aspect: f64, image_aspect: f64) -> SplitGeometry {
    if image_aspect > container_aspect {
        let ratio = container_aspect / image_aspect;
        SplitGeometry {
            width_pct: 100.0,
            height_pct: ratio * 100.0,
            top_pct: (1.0 - ratio) * 50.0,
            left_pct: 0.0,
        }
    } else {
        let ratio = image_aspect / container_aspect;
        SplitGeometry {
            width_pct: ratio * 100.0,
            height_pct: 100.0,
            top_pct: 0.0,
            left_pct: (1.0 - ratio) * 50.0,
        }
    }
}
