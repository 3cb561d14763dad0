//! Per-ring state.

use crate::layout::Rect;

/// One concentric progress ring.
///
/// Rings are owned by the [`ProgressController`](crate::controller::ProgressController)
/// and are only written by animation ticks or when the fill state is
/// re-derived after a structural change.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    index: usize,
    progress: f64,
    /// Width of the progress arc in dots. The guide circle is drawn at a
    /// quarter of this width.
    pub stroke_width: f32,
    /// Colour of the progress arc (hex or named colour).
    pub progress_color: String,
    /// Colour of the guide circle (hex or named colour).
    pub guide_color: String,
    /// Bounds of the circle, updated on layout.
    pub bounds: Rect,
}

impl Ring {
    /// Creates an empty ring.
    pub fn new(index: usize, stroke_width: f32, progress_color: &str, guide_color: &str) -> Self {
        Self {
            index,
            progress: 0.0,
            stroke_width,
            progress_color: progress_color.to_string(),
            guide_color: guide_color.to_string(),
            bounds: Rect::default(),
        }
    }

    /// Position of this ring, 0 being the outermost.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Current fill, from 0.0 to 100.0.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Sets the fill, clamped to `0.0..=100.0`.
    pub fn set_progress(&mut self, progress: f64) {
        self.progress = if progress.is_nan() {
            0.0
        } else {
            progress.clamp(0.0, 100.0)
        };
    }

    /// Sweep of the progress arc in degrees.
    pub fn sweep_degrees(&self) -> f64 {
        self.progress / 100.0 * 360.0
    }

    /// Width of the guide circle in dots.
    pub fn guide_width(&self) -> f32 {
        self.stroke_width / 4.0
    }
}
