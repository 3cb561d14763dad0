//! Construction options for the multi-ring component.
//!
//! Options follow the same pattern as the other widgets: build a list of
//! [`RingsOption`] values with the `with_*` helpers and pass it to
//! [`new`](crate::model::new).
//!
//! ```rust
//! use bubbletea_multiring::config::{reversed, with_animation_duration, with_ring_count};
//! use bubbletea_multiring::model::new;
//! use std::time::Duration;
//!
//! let rings = new(&[
//!     with_ring_count(3),
//!     with_animation_duration(Duration::from_millis(1500)),
//!     reversed(),
//! ]);
//! assert_eq!(rings.rings().len(), 3);
//! assert!(rings.config().reversed);
//! ```

use crate::plan::MAX_RINGS;
use std::time::Duration;

const DEFAULT_THICKNESS: f32 = 2.0;
const DEFAULT_PADDING: f32 = 3.0;
const DEFAULT_DURATION: Duration = Duration::from_millis(1000);
const DEFAULT_WIDTH: usize = 24;
const DEFAULT_HEIGHT: usize = 12;

/// Settings of one indicator.
///
/// Values set through [`RingsOption`] are normalised at construction: the
/// progress is clamped to `0..=100` and the ring count to
/// `1..=`[`MAX_RINGS`].
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Width of the progress arc, in dots.
    pub ring_thickness: f32,
    /// Colour of the progress arcs.
    pub progress_color: String,
    /// Colour of the guide circles.
    pub guide_color: String,
    /// Space between two rings, in dots.
    pub ring_padding: f32,
    /// Time budget of a full sequence.
    pub animation_duration: Duration,
    /// Angle the arcs start from, in degrees; 0 is 3 o'clock, clockwise.
    pub start_angle: f32,
    /// When true the innermost ring fills first.
    pub reversed: bool,
    /// Whether the centre readout shows the animated value.
    pub enable_value_indicator: bool,
    /// Number of rings.
    pub initial_ring_count: usize,
    /// Overall progress at construction.
    pub initial_progress: i32,
    /// Caption above the readout.
    pub top_label: String,
    /// Caption below the readout.
    pub bottom_label: String,
    /// Rendered width in terminal columns.
    pub width: usize,
    /// Rendered height in terminal rows.
    pub height: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ring_thickness: DEFAULT_THICKNESS,
            progress_color: "#7571F9".to_string(),
            guide_color: "#606060".to_string(),
            ring_padding: DEFAULT_PADDING,
            animation_duration: DEFAULT_DURATION,
            start_angle: 0.0,
            reversed: false,
            enable_value_indicator: true,
            initial_ring_count: 1,
            initial_progress: 0,
            top_label: String::new(),
            bottom_label: String::new(),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl Config {
    /// Builds a configuration from the defaults with `opts` applied in order.
    pub fn from_options(opts: &[RingsOption]) -> Self {
        let mut config = Self::default();
        for opt in opts {
            opt.apply(&mut config);
        }
        config.initial_progress = config.initial_progress.clamp(0, 100);
        if config.initial_ring_count == 0 {
            tracing::warn!("ring count 0 is not allowed, using 1");
            config.initial_ring_count = 1;
        } else if config.initial_ring_count > MAX_RINGS {
            tracing::warn!(
                count = config.initial_ring_count,
                "too many rings, using {MAX_RINGS}"
            );
            config.initial_ring_count = MAX_RINGS;
        }
        config
    }
}

/// Configuration options for the multi-ring component.
#[derive(Debug, Clone, PartialEq)]
pub enum RingsOption {
    /// Width of the progress arcs, in dots.
    WithRingThickness(f32),
    /// Colour of the progress arcs.
    WithProgressColor(String),
    /// Colour of the guide circles.
    WithGuideColor(String),
    /// Space between rings, in dots.
    WithRingPadding(f32),
    /// Time budget of a full sequence.
    WithAnimationDuration(Duration),
    /// Start angle of the arcs, in degrees.
    WithStartAngle(f32),
    /// Fill the innermost ring first.
    Reversed,
    /// Hide the animated readout.
    WithoutValueIndicator,
    /// Number of rings.
    WithRingCount(usize),
    /// Initial overall progress.
    WithProgress(i32),
    /// Captions above and below the readout.
    WithTextIndicator(String, String),
    /// Rendered size in terminal columns and rows.
    WithSize(usize, usize),
}

impl RingsOption {
    fn apply(&self, c: &mut Config) {
        match self {
            RingsOption::WithRingThickness(thickness) => c.ring_thickness = thickness.max(0.0),
            RingsOption::WithProgressColor(color) => c.progress_color = color.clone(),
            RingsOption::WithGuideColor(color) => c.guide_color = color.clone(),
            RingsOption::WithRingPadding(padding) => c.ring_padding = padding.max(0.0),
            RingsOption::WithAnimationDuration(duration) => c.animation_duration = *duration,
            RingsOption::WithStartAngle(angle) => c.start_angle = *angle,
            RingsOption::Reversed => c.reversed = true,
            RingsOption::WithoutValueIndicator => c.enable_value_indicator = false,
            RingsOption::WithRingCount(count) => c.initial_ring_count = *count,
            RingsOption::WithProgress(progress) => c.initial_progress = *progress,
            RingsOption::WithTextIndicator(top, bottom) => {
                c.top_label = top.clone();
                c.bottom_label = bottom.clone();
            }
            RingsOption::WithSize(width, height) => {
                c.width = *width;
                c.height = *height;
            }
        }
    }
}

/// Sets the width of the progress arcs, in dots. The guide circle is drawn a
/// quarter as wide.
pub fn with_ring_thickness(thickness: f32) -> RingsOption {
    RingsOption::WithRingThickness(thickness)
}

/// Sets the colour of the progress arcs.
pub fn with_progress_color(color: String) -> RingsOption {
    RingsOption::WithProgressColor(color)
}

/// Sets the colour of the guide circles.
pub fn with_guide_color(color: String) -> RingsOption {
    RingsOption::WithGuideColor(color)
}

/// Sets the space between two rings, in dots.
pub fn with_ring_padding(padding: f32) -> RingsOption {
    RingsOption::WithRingPadding(padding)
}

/// Sets the time a full sequence takes. Each ring gets an equal share.
pub fn with_animation_duration(duration: Duration) -> RingsOption {
    RingsOption::WithAnimationDuration(duration)
}

/// Sets the angle the arcs start from, in degrees (0 is 3 o'clock,
/// increasing clockwise).
pub fn with_start_angle(degrees: f32) -> RingsOption {
    RingsOption::WithStartAngle(degrees)
}

/// Fills the innermost ring first.
pub fn reversed() -> RingsOption {
    RingsOption::Reversed
}

/// Hides the animated value readout.
pub fn without_value_indicator() -> RingsOption {
    RingsOption::WithoutValueIndicator
}

/// Sets the number of rings; 0 is treated as 1 and counts above
/// [`MAX_RINGS`] as [`MAX_RINGS`].
pub fn with_ring_count(count: usize) -> RingsOption {
    RingsOption::WithRingCount(count)
}

/// Sets the overall progress the indicator animates to when first shown.
/// Values outside `0..=100` are clamped.
pub fn with_progress(progress: i32) -> RingsOption {
    RingsOption::WithProgress(progress)
}

/// Sets the captions above and below the readout.
pub fn with_text_indicator(top: String, bottom: String) -> RingsOption {
    RingsOption::WithTextIndicator(top, bottom)
}

/// Sets the rendered size in terminal columns and rows.
pub fn with_size(width: usize, height: usize) -> RingsOption {
    RingsOption::WithSize(width, height)
}
