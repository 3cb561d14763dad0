//! Chained playback of animation plans.
//!
//! The [`Sequencer`] plays the ring segments of a [`Plan`] strictly back to
//! back on a single logical clock, and the readout segment concurrently with
//! the whole chain. Every frame is a [`FrameMsg`] carrying the sequencer id
//! and the tag of the sequence that scheduled it; [`Sequencer::cancel`] bumps
//! the tag, so frames scheduled by an earlier sequence are ignored and can
//! never write state after a cancellation.
//!
//! State is written through the [`AnimationTarget`] trait, which keeps the
//! sequencer independent of where rings and labels live.
//!
//! ```rust
//! use bubbletea_multiring::plan::{compute_plan, PlanRequest};
//! use bubbletea_multiring::sequencer::{AnimationTarget, Sequencer};
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct Fills {
//!     rings: [f64; 2],
//!     value: i32,
//! }
//!
//! impl AnimationTarget for Fills {
//!     fn set_ring_progress(&mut self, index: usize, progress: f64) {
//!         self.rings[index] = progress;
//!     }
//!     fn set_value_text(&mut self, value: i32) {
//!         self.value = value;
//!     }
//! }
//!
//! let mut fills = Fills::default();
//! let plan = compute_plan(&PlanRequest {
//!     old_progress: 0,
//!     new_progress: 100,
//!     ring_progress: &fills.rings,
//!     reversed: false,
//!     total: Duration::from_millis(1000),
//!     text: None,
//! });
//!
//! let mut sequencer = Sequencer::new();
//! let first_frame = sequencer.play(plan, &mut fills);
//! assert!(first_frame.is_some());
//!
//! // Drive the clock by hand: half way through, only the first ring is full.
//! sequencer.advance(Duration::from_millis(500), &mut fills);
//! assert_eq!(fills.rings, [100.0, 0.0]);
//! ```

use crate::plan::{Plan, Segment, SegmentTarget};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, Msg};
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

// Internal ID management for sequencer instances
static LAST_ID: AtomicI64 = AtomicI64::new(0);

fn next_id() -> i64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Frames per second of the animation clock.
pub const FPS: u32 = 60;

/// Receives the values produced by running segments.
pub trait AnimationTarget {
    /// Writes the interpolated fill of ring `index`.
    fn set_ring_progress(&mut self, index: usize, progress: f64);

    /// Writes the interpolated readout value.
    fn set_value_text(&mut self, value: i32);
}

/// Message that advances a running sequence by one frame.
///
/// Produced by the commands [`Sequencer::play`] and [`Sequencer::on_frame`]
/// return. Frames are only honoured by the sequencer that scheduled them,
/// and only while the sequence that scheduled them is still current.
#[derive(Debug, Clone)]
pub struct FrameMsg {
    /// Sequencer the frame belongs to.
    id: i64,
    /// Sequence the frame belongs to.
    tag: i64,
}

#[derive(Debug, Clone)]
struct Sequence {
    chain: Vec<Segment>,
    text: Option<Segment>,
    elapsed: Duration,
    /// Index of the first chain segment that hasn't completed.
    cursor: usize,
    /// Clock time at which the segment under `cursor` started.
    segment_start: Duration,
}

impl Sequence {
    fn new(plan: Plan) -> Self {
        let chain = plan.chain().cloned().collect();
        Self {
            chain,
            text: plan.text,
            elapsed: Duration::ZERO,
            cursor: 0,
            segment_start: Duration::ZERO,
        }
    }

    fn is_finished(&self) -> bool {
        self.cursor >= self.chain.len() && self.text.is_none()
    }

    fn advance<T: AnimationTarget + ?Sized>(&mut self, dt: Duration, target: &mut T) {
        self.elapsed += dt;

        while let Some(segment) = self.chain.get(self.cursor) {
            let local = self.elapsed.saturating_sub(self.segment_start);
            if local >= segment.duration {
                write(target, segment, segment.to);
                self.segment_start += segment.duration;
                self.cursor += 1;
            } else {
                let fraction = local.as_secs_f64() / segment.duration.as_secs_f64();
                write(target, segment, segment.value_at(fraction));
                break;
            }
        }

        if let Some(text) = &self.text {
            if text.is_static() || self.elapsed >= text.duration {
                write(target, text, text.to);
                self.text = None;
            } else {
                let fraction = self.elapsed.as_secs_f64() / text.duration.as_secs_f64();
                write(target, text, text.value_at(fraction));
            }
        }
    }
}

fn write<T: AnimationTarget + ?Sized>(target: &mut T, segment: &Segment, value: f64) {
    match segment.target {
        SegmentTarget::Ring(index) => target.set_ring_progress(index, value),
        SegmentTarget::Text => target.set_value_text(value.trunc() as i32),
    }
}

/// Plays plans one at a time; a new plan supersedes the running one.
#[derive(Debug, Clone)]
pub struct Sequencer {
    /// An identifier to keep us from receiving frames intended for other
    /// sequencers.
    id: i64,
    /// Incremented on every play and cancel so that stale frames are dropped.
    tag: i64,
    frame_interval: Duration,
    sequence: Option<Sequence>,
}

impl Sequencer {
    /// Creates an idle sequencer ticking at [`FPS`].
    pub fn new() -> Self {
        Self {
            id: next_id(),
            tag: 0,
            frame_interval: Duration::from_nanos(1_000_000_000 / FPS as u64),
            sequence: None,
        }
    }

    /// Unique identifier of this sequencer.
    pub fn id(&self) -> i64 {
        self.id
    }

    /// Time between two frames.
    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    /// True while a sequence is playing.
    pub fn is_running(&self) -> bool {
        self.sequence.is_some()
    }

    /// Clock time of the running sequence.
    pub fn elapsed(&self) -> Option<Duration> {
        self.sequence.as_ref().map(|s| s.elapsed)
    }

    /// Cancels any running sequence and starts `plan`.
    ///
    /// Leading zero-duration segments are applied at once. Returns the
    /// command for the first frame, or `None` when the plan completed
    /// immediately.
    pub fn play<T: AnimationTarget + ?Sized>(&mut self, plan: Plan, target: &mut T) -> Option<Cmd> {
        self.cancel();

        tracing::debug!(
            id = self.id,
            tag = self.tag,
            segments = plan.rings.len(),
            chain_ms = plan.chain_duration().as_millis() as u64,
            "playing sequence"
        );

        let mut sequence = Sequence::new(plan);
        sequence.advance(Duration::ZERO, target);
        if sequence.is_finished() {
            return None;
        }

        self.sequence = Some(sequence);
        Some(self.next_frame())
    }

    /// Stops the running sequence, leaving every value where the last frame
    /// put it.
    pub fn cancel(&mut self) {
        self.tag += 1;
        if let Some(sequence) = self.sequence.take() {
            tracing::debug!(
                id = self.id,
                elapsed_ms = sequence.elapsed.as_millis() as u64,
                "cancelled sequence"
            );
        }
    }

    /// Advances the running sequence by `dt` and returns whether it is still
    /// running.
    pub fn advance<T: AnimationTarget + ?Sized>(&mut self, dt: Duration, target: &mut T) -> bool {
        let Some(sequence) = self.sequence.as_mut() else {
            return false;
        };

        sequence.advance(dt, target);
        tracing::trace!(
            id = self.id,
            elapsed_ms = sequence.elapsed.as_millis() as u64,
            "frame"
        );

        if sequence.is_finished() {
            self.sequence = None;
            return false;
        }
        true
    }

    /// Handles a frame message, returning the next frame command while the
    /// sequence runs.
    pub fn on_frame<T: AnimationTarget + ?Sized>(
        &mut self,
        frame: &FrameMsg,
        target: &mut T,
    ) -> Option<Cmd> {
        if frame.id != self.id || frame.tag != self.tag {
            return None;
        }

        if self.advance(self.frame_interval, target) {
            Some(self.next_frame())
        } else {
            None
        }
    }

    /// The frame message the current sequence expects next.
    pub(crate) fn frame_msg(&self) -> FrameMsg {
        FrameMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    fn next_frame(&self) -> Cmd {
        let frame = self.frame_msg();
        bubbletea_tick(self.frame_interval, move |_| Box::new(frame.clone()) as Msg)
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::{compute_plan, PlanRequest, TextTransition};

    const MS: Duration = Duration::from_millis(1);

    #[derive(Debug, Default)]
    struct Recorder {
        rings: Vec<f64>,
        value: Option<i32>,
        writes: Vec<(usize, f64)>,
    }

    impl Recorder {
        fn with_rings(rings: &[f64]) -> Self {
            Self {
                rings: rings.to_vec(),
                ..Self::default()
            }
        }

        /// Rings strictly between empty and full.
        fn partial(&self) -> usize {
            self.rings.iter().filter(|&&p| p > 0.0 && p < 100.0).count()
        }
    }

    impl AnimationTarget for Recorder {
        fn set_ring_progress(&mut self, index: usize, progress: f64) {
            self.rings[index] = progress;
            self.writes.push((index, progress));
        }

        fn set_value_text(&mut self, value: i32) {
            self.value = Some(value);
        }
    }

    fn plan_for(old: i32, new: i32, target: &Recorder, reversed: bool) -> Plan {
        compute_plan(&PlanRequest {
            old_progress: old,
            new_progress: new,
            ring_progress: &target.rings,
            reversed,
            total: Duration::from_millis(900),
            text: Some(TextTransition {
                from: target.value.unwrap_or(0),
                to: new,
            }),
        })
    }

    #[test]
    fn test_play_returns_first_frame() {
        let mut target = Recorder::with_rings(&[0.0]);
        let mut sequencer = Sequencer::new();
        let plan = plan_for(0, 50, &target, false);

        assert!(sequencer.play(plan, &mut target).is_some());
        assert!(sequencer.is_running());
        assert_eq!(target.rings, vec![0.0]);
        assert_eq!(target.value, Some(0));
    }

    #[test]
    fn test_single_ring_linear() {
        let mut target = Recorder::with_rings(&[0.0]);
        let mut sequencer = Sequencer::new();
        let plan = plan_for(0, 50, &target, false);
        std::mem::drop(sequencer.play(plan, &mut target));

        sequencer.advance(450 * MS, &mut target);
        assert!((target.rings[0] - 25.0).abs() < 1e-9);
        assert_eq!(target.value, Some(25));

        assert!(!sequencer.advance(450 * MS, &mut target));
        assert_eq!(target.rings[0], 50.0);
        assert_eq!(target.value, Some(50));
        assert!(!sequencer.is_running());
    }

    #[test]
    fn test_rings_fill_one_at_a_time() {
        let mut target = Recorder::with_rings(&[0.0, 0.0, 0.0]);
        let mut sequencer = Sequencer::new();
        let plan = plan_for(0, 100, &target, false);
        std::mem::drop(sequencer.play(plan, &mut target));

        sequencer.advance(150 * MS, &mut target);
        assert!((target.rings[0] - 50.0).abs() < 1e-9);
        assert_eq!(&target.rings[1..], &[0.0, 0.0]);
        assert!(target.writes.iter().all(|&(i, _)| i == 0));

        sequencer.advance(300 * MS, &mut target);
        assert_eq!(target.rings[0], 100.0);
        assert!((target.rings[1] - 50.0).abs() < 1e-9);
        assert_eq!(target.rings[2], 0.0);
        assert_eq!(target.value, Some(50));

        while sequencer.advance(sequencer.frame_interval(), &mut target) {
            assert!(target.partial() <= 1);
        }
        assert_eq!(target.rings, vec![100.0, 100.0, 100.0]);
        assert_eq!(target.value, Some(100));
    }

    #[test]
    fn test_decrement_empties_last_ring_first() {
        let mut target = Recorder::with_rings(&[100.0, 100.0, 100.0]);
        target.value = Some(100);
        let mut sequencer = Sequencer::new();
        let plan = plan_for(100, 0, &target, false);
        std::mem::drop(sequencer.play(plan, &mut target));

        sequencer.advance(150 * MS, &mut target);
        assert_eq!(target.rings[0], 100.0);
        assert_eq!(target.rings[1], 100.0);
        assert!((target.rings[2] - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_reversed_fills_last_ring_first() {
        let mut target = Recorder::with_rings(&[0.0, 0.0]);
        let mut sequencer = Sequencer::new();
        let plan = plan_for(0, 50, &target, true);
        std::mem::drop(sequencer.play(plan, &mut target));

        while sequencer.advance(sequencer.frame_interval(), &mut target) {}
        assert_eq!(target.rings, vec![0.0, 100.0]);
    }

    #[test]
    fn test_cancel_freezes_values() {
        let mut target = Recorder::with_rings(&[0.0, 0.0]);
        let mut sequencer = Sequencer::new();
        let plan = plan_for(0, 100, &target, false);
        std::mem::drop(sequencer.play(plan, &mut target));
        sequencer.advance(225 * MS, &mut target);

        let stale = sequencer.frame_msg();
        let frozen = target.rings.clone();
        sequencer.cancel();

        assert!(!sequencer.is_running());
        assert!(sequencer.on_frame(&stale, &mut target).is_none());
        assert!(!sequencer.advance(100 * MS, &mut target));
        assert_eq!(target.rings, frozen);
    }

    #[test]
    fn test_new_play_rejects_old_frames() {
        let mut target = Recorder::with_rings(&[0.0]);
        let mut sequencer = Sequencer::new();
        std::mem::drop(sequencer.play(plan_for(0, 80, &target, false), &mut target));
        let first = sequencer.frame_msg();

        sequencer.advance(300 * MS, &mut target);
        std::mem::drop(sequencer.play(plan_for(80, 30, &target, false), &mut target));

        let writes = target.writes.len();
        assert!(sequencer.on_frame(&first, &mut target).is_none());
        assert_eq!(target.writes.len(), writes);

        let current = sequencer.frame_msg();
        assert!(sequencer.on_frame(&current, &mut target).is_some());
    }

    #[test]
    fn test_frame_for_other_sequencer_is_ignored() {
        let mut target = Recorder::with_rings(&[0.0]);
        let mut a = Sequencer::new();
        let mut b = Sequencer::new();
        std::mem::drop(a.play(plan_for(0, 80, &target, false), &mut target));
        std::mem::drop(b.play(plan_for(0, 80, &target, false), &mut target));

        assert_ne!(a.id(), b.id());
        let frame = b.frame_msg();
        assert!(a.on_frame(&frame, &mut target).is_none());
    }

    #[test]
    fn test_zero_duration_plan_completes_instantly() {
        let mut target = Recorder::with_rings(&[0.0, 0.0]);
        let mut sequencer = Sequencer::new();
        let plan = compute_plan(&PlanRequest {
            old_progress: 0,
            new_progress: 75,
            ring_progress: &target.rings,
            reversed: false,
            total: Duration::ZERO,
            text: Some(TextTransition { from: 0, to: 75 }),
        });

        assert!(sequencer.play(plan, &mut target).is_none());
        assert!(!sequencer.is_running());
        assert_eq!(target.rings, vec![100.0, 50.0]);
        assert_eq!(target.value, Some(75));
    }

    #[test]
    fn test_big_step_completes_skipped_segments() {
        let mut target = Recorder::with_rings(&[0.0, 0.0, 0.0]);
        let mut sequencer = Sequencer::new();
        std::mem::drop(sequencer.play(plan_for(0, 100, &target, false), &mut target));

        sequencer.advance(700 * MS, &mut target);
        assert_eq!(target.rings[0], 100.0);
        assert_eq!(target.rings[1], 100.0);
        assert!((target.rings[2] - 100.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_text_value_truncates() {
        let mut target = Recorder::with_rings(&[0.0]);
        let mut sequencer = Sequencer::new();
        let plan = compute_plan(&PlanRequest {
            old_progress: 0,
            new_progress: 10,
            ring_progress: &target.rings,
            reversed: false,
            total: Duration::from_millis(1000),
            text: Some(TextTransition { from: 0, to: 10 }),
        });
        std::mem::drop(sequencer.play(plan, &mut target));

        sequencer.advance(199 * MS, &mut target);
        assert_eq!(target.value, Some(1));
    }
}
