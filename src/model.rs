//! Concentric multi-ring progress indicator component for bubbletea-rs.
//!
//! The overall progress is split across `N` concentric rings that fill one
//! after another, outermost first (or innermost first when reversed), while a
//! centre readout counts towards the value. Every change of progress is
//! animated: the running animation is cancelled and a new chain starts from
//! whatever the rings currently show.
//!
//! The component follows the Elm Architecture: setters return the command
//! for the first animation frame, [`Model::update`] handles the frames it
//! scheduled and [`Model::view`] draws the rings with braille characters.
//!
//! ```rust
//! use bubbletea_multiring::config::{with_ring_count, with_text_indicator};
//! use bubbletea_multiring::model::new;
//! use bubbletea_multiring::Lifecycle;
//!
//! let mut rings = new(&[
//!     with_ring_count(3),
//!     with_text_indicator("done".to_string(), "of 100".to_string()),
//! ]);
//!
//! // Animations only play once the component is on screen.
//! let _ = rings.attach();
//! let cmd = rings.set_progress(75).unwrap();
//! assert!(cmd.is_some());
//! assert!(rings.is_animating());
//! assert_eq!(rings.progress(), 75);
//! ```

use crate::canvas::Canvas;
use crate::config::{Config, RingsOption};
use crate::controller::ProgressController;
use crate::error::{check_progress, check_value, Result};
use crate::layout::{self, Insets, TextZones, DOTS_PER_COL, DOTS_PER_ROW};
use crate::ring::Ring;
use crate::sequencer::{FrameMsg, Sequencer};
use crate::text::{TextLabel, TextPosition, Typeface};
use crate::Lifecycle;
use bubbletea_rs::{Cmd, Model as BubbleTeaModel, Msg};
use std::time::Duration;

/// The multi-ring progress indicator.
///
/// Build one with [`new`] and a list of options. The model starts visible but
/// detached; call [`Lifecycle::attach`] (or let [`BubbleTeaModel::init`] do
/// it) to play the animation towards the initial progress.
#[derive(Debug, Clone)]
pub struct Model {
    controller: ProgressController,
    sequencer: Sequencer,
    visible: bool,
    attached: bool,
    insets: Insets,
    zones: TextZones,
}

/// Creates a new multi-ring model with the given options.
///
/// ```rust
/// use bubbletea_multiring::config::*;
/// use bubbletea_multiring::model::new;
///
/// let rings = new(&[
///     with_ring_count(2),
///     with_progress(40),
///     with_progress_color("#e74c3c".to_string()),
/// ]);
/// assert_eq!(rings.progress(), 40);
/// assert_eq!(rings.rings().len(), 2);
/// ```
pub fn new(opts: &[RingsOption]) -> Model {
    let mut m = Model {
        controller: ProgressController::new(Config::from_options(opts)),
        sequencer: Sequencer::new(),
        visible: true,
        attached: false,
        insets: Insets::default(),
        zones: TextZones::default(),
    };
    m.layout();
    m
}

impl Model {
    /// Sets the overall progress and animates the rings and the readout
    /// towards it.
    ///
    /// Returns the command for the first frame, or `None` when nothing needs
    /// to move or the component isn't shown. A model from [`new`] is not
    /// attached yet: call [`Lifecycle::attach`] first, or the progress is only
    /// recorded. A progress set while hidden or detached is kept and played
    /// once the component is shown again.
    ///
    /// # Errors
    ///
    /// [`Error::ProgressOutOfRange`](crate::Error::ProgressOutOfRange) when
    /// `percent` is outside `0..=100`; nothing is changed in that case.
    pub fn set_progress(&mut self, percent: i32) -> Result<Option<Cmd>> {
        self.set_progress_with_value(percent, percent)
    }

    /// Like [`set_progress`](Self::set_progress), with the readout counting
    /// to `value` instead of `percent`.
    ///
    /// # Errors
    ///
    /// [`Error::ProgressOutOfRange`](crate::Error::ProgressOutOfRange) or
    /// [`Error::ValueOutOfRange`](crate::Error::ValueOutOfRange) when either
    /// argument is outside `0..=100`; nothing is changed in that case.
    pub fn set_progress_with_value(&mut self, percent: i32, value: i32) -> Result<Option<Cmd>> {
        let percent = check_progress(percent)?;
        let value = check_value(value)?;

        let plan = self
            .controller
            .retarget(percent, value, self.sequencer.is_running());

        if !self.is_shown() {
            tracing::debug!(percent, value, "component not shown, progress recorded");
            return Ok(None);
        }
        Ok(self.sequencer.play(plan, &mut self.controller))
    }

    /// Rebuilds the rings with `count` rings and returns the count used.
    ///
    /// A count of 0 becomes 1. Any running animation stops and the new rings
    /// show the current overall progress right away.
    pub fn set_ring_count(&mut self, count: usize) -> usize {
        self.sequencer.cancel();
        let count = self.controller.set_ring_count(count);
        self.layout();
        count
    }

    /// Sets the static captions above and below the readout.
    pub fn set_text_indicator(&mut self, top: &str, bottom: &str) {
        self.controller.set_text_indicator(top, bottom);
    }

    /// Sets colour and typeface of the label at `position`.
    pub fn set_text_property(&mut self, color: &str, typeface: Typeface, position: TextPosition) {
        self.controller.set_text_property(color, typeface, position);
    }

    /// Changes which ring fills first. A change stops any running animation
    /// and redraws the rings at the current overall progress.
    pub fn set_reversed(&mut self, reversed: bool) {
        if self.controller.config().reversed != reversed {
            self.sequencer.cancel();
            self.controller.set_reversed(reversed);
        }
    }

    /// Shows or hides the animated readout.
    pub fn set_value_indicator_enabled(&mut self, enabled: bool) {
        self.controller.set_value_indicator_enabled(enabled);
    }

    /// Sets the time a full sequence takes; applies from the next progress
    /// change.
    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.controller.config_mut().animation_duration = duration;
    }

    /// Sets the angle the arcs start from, in degrees.
    pub fn set_start_angle(&mut self, degrees: f32) {
        self.controller.config_mut().start_angle = degrees;
    }

    /// Sets the rendered size in terminal columns and rows.
    pub fn set_size(&mut self, width: usize, height: usize) {
        let config = self.controller.config_mut();
        config.width = width;
        config.height = height;
        self.layout();
    }

    /// Sets the padding kept free around the rings, in dots.
    pub fn set_insets(&mut self, insets: Insets) {
        self.insets = insets;
        self.layout();
    }

    /// Overall progress the indicator shows or is heading to.
    pub fn progress(&self) -> i32 {
        self.controller.progress()
    }

    /// Value the readout shows or is heading to.
    pub fn value(&self) -> i32 {
        self.controller.value()
    }

    /// The rings, outermost first.
    pub fn rings(&self) -> &[Ring] {
        self.controller.rings()
    }

    /// The label at `position`.
    pub fn label(&self, position: TextPosition) -> &TextLabel {
        self.controller.label(position)
    }

    /// True while an animation is playing.
    pub fn is_animating(&self) -> bool {
        self.sequencer.is_running()
    }

    /// Current configuration.
    pub fn config(&self) -> &Config {
        self.controller.config()
    }

    /// Identifier of the sequencer driving this component's frames.
    pub fn id(&self) -> i64 {
        self.sequencer.id()
    }

    /// Recomputes ring bounds and text zones from the size and insets.
    fn layout(&mut self) {
        let config = self.controller.config();
        let width = (config.width * DOTS_PER_COL) as f32;
        let height = (config.height * DOTS_PER_ROW) as f32;
        let padding = config.ring_padding;
        let size = layout::square_size(width, height, self.insets);
        let insets = self.insets;

        let rings = self.controller.rings_mut();
        for ring in rings.iter_mut() {
            ring.bounds = layout::ring_bounds(size, insets, ring.stroke_width, padding, ring.index());
        }
        self.zones = layout::text_zones(rings.len(), padding, insets, size);
    }

    // Plays from what the rings show now towards the recorded target.
    fn resume(&mut self) -> Option<Cmd> {
        let plan = self.controller.replan();
        self.sequencer.play(plan, &mut self.controller)
    }

    /// Handles animation frames. Frames scheduled by another component or by
    /// a cancelled animation are ignored.
    pub fn update(&mut self, msg: Msg) -> Option<Cmd> {
        if let Some(frame) = msg.downcast_ref::<FrameMsg>() {
            return self.sequencer.on_frame(frame, &mut self.controller);
        }
        None
    }

    /// Renders the rings and labels.
    pub fn view(&self) -> String {
        let config = self.controller.config();
        let mut canvas = Canvas::new(config.width, config.height);

        for ring in self.controller.rings() {
            canvas.paint_ring(ring, config.start_angle);
        }
        for position in TextPosition::ALL {
            let label = self.controller.label(position);
            if !label.text.is_empty() {
                canvas.draw_label(self.zones.anchor(position), &label.text, label.style());
            }
        }

        canvas.render(self.controller.rings())
    }
}

impl Lifecycle for Model {
    fn set_visible(&mut self, visible: bool) -> Option<Cmd> {
        if self.visible == visible {
            return None;
        }
        let was_shown = self.is_shown();
        self.visible = visible;
        tracing::debug!(id = self.id(), visible, "visibility changed");
        self.transition(was_shown)
    }

    fn attach(&mut self) -> Option<Cmd> {
        if self.attached {
            return None;
        }
        let was_shown = self.is_shown();
        self.attached = true;
        tracing::debug!(id = self.id(), "attached");
        self.transition(was_shown)
    }

    fn detach(&mut self) {
        if self.attached {
            self.attached = false;
            tracing::debug!(id = self.id(), "detached");
            self.sequencer.cancel();
        }
    }

    fn is_shown(&self) -> bool {
        self.visible && self.attached
    }
}

impl Model {
    fn transition(&mut self, was_shown: bool) -> Option<Cmd> {
        match (was_shown, self.is_shown()) {
            (false, true) => self.resume(),
            (true, false) => {
                self.sequencer.cancel();
                None
            }
            _ => None,
        }
    }
}

impl BubbleTeaModel for Model {
    fn init() -> (Self, Option<Cmd>) {
        let mut model = new(&[]);
        let cmd = model.attach();
        (model, cmd)
    }

    fn update(&mut self, msg: Msg) -> Option<Cmd> {
        self.update(msg)
    }

    fn view(&self) -> String {
        self.view()
    }
}

impl Default for Model {
    fn default() -> Self {
        new(&[])
    }
}
