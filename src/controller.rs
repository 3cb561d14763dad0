//! Shared state the plans are computed from and the frames write into.

use crate::config::Config;
use crate::plan::{self, compute_plan, Plan, PlanRequest, TextTransition, MAX_RINGS};
use crate::ring::Ring;
use crate::sequencer::AnimationTarget;
use crate::text::{TextLabel, TextPosition, Typeface};

/// Rings, labels and the overall progress of one indicator.
///
/// The overall progress is only changed by [`ProgressController::retarget`];
/// ring fills and the readout text are only changed by animation frames
/// (through [`AnimationTarget`]) or when the fill is re-derived after a
/// structural change such as a new ring count.
#[derive(Debug, Clone)]
pub struct ProgressController {
    config: Config,
    rings: Vec<Ring>,
    labels: [TextLabel; 3],
    progress: i32,
    value: i32,
}

impl ProgressController {
    /// Builds the rings and labels described by `config`.
    ///
    /// The rings start empty; the first [`replan`](Self::replan) animates
    /// them to the configured initial progress.
    pub fn new(config: Config) -> Self {
        let progress = config.initial_progress.clamp(0, 100);
        let mut controller = Self {
            rings: Vec::new(),
            labels: [
                TextLabel::new(TextPosition::Top),
                TextLabel::new(TextPosition::Center),
                TextLabel::new(TextPosition::Bottom),
            ],
            progress,
            value: progress,
            config,
        };
        let top = controller.config.top_label.clone();
        let bottom = controller.config.bottom_label.clone();
        controller.set_text_indicator(&top, &bottom);
        controller.rebuild_rings(controller.config.initial_ring_count);
        controller
    }

    /// Configuration the controller was built with, including later changes.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Overall progress the indicator is heading to.
    pub fn progress(&self) -> i32 {
        self.progress
    }

    /// Value the readout is heading to.
    pub fn value(&self) -> i32 {
        self.value
    }

    /// All rings, outermost first.
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    pub(crate) fn rings_mut(&mut self) -> &mut [Ring] {
        &mut self.rings
    }

    /// The label at `position`.
    pub fn label(&self, position: TextPosition) -> &TextLabel {
        &self.labels[position.slot()]
    }

    /// Current fill of every ring.
    pub fn ring_progress(&self) -> Vec<f64> {
        self.rings.iter().map(Ring::progress).collect()
    }

    /// Overall progress implied by what the rings currently show.
    pub fn displayed_progress(&self) -> f64 {
        plan::implied_progress(&self.ring_progress(), self.config.reversed)
    }

    /// Integer currently shown by the readout.
    pub fn displayed_value(&self) -> i32 {
        self.label(TextPosition::Center).as_int()
    }

    /// Records a new target and computes the plan that reaches it.
    ///
    /// `in_flight` tells whether a sequence is still playing; if so the plan
    /// starts from what the rings currently show instead of from the
    /// previous target.
    pub fn retarget(&mut self, progress: i32, value: i32, in_flight: bool) -> Plan {
        let old = if in_flight {
            self.displayed_progress().round() as i32
        } else {
            self.progress
        };
        self.progress = progress;
        self.value = value;
        self.plan_from(old)
    }

    /// Plan from the current ring state to the recorded target.
    pub fn replan(&self) -> Plan {
        self.plan_from(self.displayed_progress().round() as i32)
    }

    fn plan_from(&self, old_progress: i32) -> Plan {
        let ring_progress = self.ring_progress();
        let text = self.config.enable_value_indicator.then(|| TextTransition {
            from: self.displayed_value(),
            to: self.value,
        });

        compute_plan(&PlanRequest {
            old_progress,
            new_progress: self.progress,
            ring_progress: &ring_progress,
            reversed: self.config.reversed,
            total: self.config.animation_duration,
            text,
        })
    }

    /// Snaps every ring to the fill implied by the overall progress.
    pub fn settle(&mut self) {
        let fills = plan::settled_fill(self.rings.len(), self.progress, self.config.reversed);
        for (ring, fill) in self.rings.iter_mut().zip(fills) {
            ring.set_progress(fill);
        }
    }

    /// Rebuilds the ring collection with `count` rings, clamped to
    /// `1..=MAX_RINGS`, and returns the count actually used.
    ///
    /// The new rings show the fill implied by the current overall progress.
    pub fn set_ring_count(&mut self, count: usize) -> usize {
        let count = self.rebuild_rings(count);
        self.settle();
        count
    }

    fn rebuild_rings(&mut self, count: usize) -> usize {
        if count == 0 {
            tracing::warn!("ring count 0 is not allowed, using 1");
        } else if count > MAX_RINGS {
            tracing::warn!(count, "too many rings, using {MAX_RINGS}");
        }
        let count = count.clamp(1, MAX_RINGS);
        self.config.initial_ring_count = count;
        self.rings = (0..count)
            .map(|index| {
                Ring::new(
                    index,
                    self.config.ring_thickness,
                    &self.config.progress_color,
                    &self.config.guide_color,
                )
            })
            .collect();
        count
    }

    /// Changes the fill order and re-derives the ring fills.
    pub fn set_reversed(&mut self, reversed: bool) {
        if self.config.reversed != reversed {
            self.config.reversed = reversed;
            self.settle();
        }
    }

    /// Enables or disables the readout. Either way the readout is cleared;
    /// it shows a value again once the next animation writes one.
    pub fn set_value_indicator_enabled(&mut self, enabled: bool) {
        self.config.enable_value_indicator = enabled;
        self.labels[TextPosition::Center.slot()].text.clear();
    }

    /// Sets the static captions above and below the readout.
    pub fn set_text_indicator(&mut self, top: &str, bottom: &str) {
        self.labels[TextPosition::Top.slot()].text = top.to_string();
        self.labels[TextPosition::Bottom.slot()].text = bottom.to_string();
        self.config.top_label = top.to_string();
        self.config.bottom_label = bottom.to_string();
    }

    /// Styles the label at `position`.
    pub fn set_text_property(&mut self, color: &str, typeface: Typeface, position: TextPosition) {
        let label = &mut self.labels[position.slot()];
        label.color = Some(color.to_string());
        label.typeface = typeface;
    }

    pub(crate) fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }
}

impl AnimationTarget for ProgressController {
    fn set_ring_progress(&mut self, index: usize, progress: f64) {
        if let Some(ring) = self.rings.get_mut(index) {
            ring.set_progress(progress);
        }
    }

    fn set_value_text(&mut self, value: i32) {
        if self.config.enable_value_indicator {
            self.labels[TextPosition::Center.slot()].text = value.to_string();
        }
    }
}
