//! Partitioning of the overall progress across rings.
//!
//! [`compute_plan`] turns one progress transition into an ordered list of
//! per-ring [`Segment`]s plus an optional segment for the value readout.
//! It is a pure function over the current ring fills; the
//! [`Sequencer`](crate::sequencer::Sequencer) plays the result.
//!
//! The progress scale is split into `100 / N` wide shares, one per ring, and
//! the total duration into `total / N` per ring. The last ring in fill order
//! absorbs the remainder of the integer division, so progress 100 always
//! fills every ring.
//!
//! ```rust
//! use bubbletea_multiring::plan::{compute_plan, PlanRequest};
//! use std::time::Duration;
//!
//! let rings = [0.0, 0.0, 0.0];
//! let plan = compute_plan(&PlanRequest {
//!     old_progress: 0,
//!     new_progress: 100,
//!     ring_progress: &rings,
//!     reversed: false,
//!     total: Duration::from_millis(900),
//!     text: None,
//! });
//!
//! assert_eq!(plan.rings.len(), 3);
//! assert!(plan.rings.iter().all(|s| s.to == 100.0));
//! assert_eq!(plan.chain_duration(), Duration::from_millis(900));
//! ```

use std::time::Duration;

/// Most rings the progress scale can be split across; with more, `100 / N`
/// shares would be empty.
pub const MAX_RINGS: usize = 100;

/// What a segment animates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentTarget {
    /// The ring with this index.
    Ring(usize),
    /// The value readout.
    Text,
}

/// One scheduled from→to animation.
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    /// What the segment writes to.
    pub target: SegmentTarget,
    /// Start value.
    pub from: f64,
    /// End value.
    pub to: f64,
    /// Play time; zero means the end value is set instantly.
    pub duration: Duration,
}

impl Segment {
    /// Linear interpolation at `fraction` (clamped to `0.0..=1.0`).
    pub fn value_at(&self, fraction: f64) -> f64 {
        let fraction = fraction.clamp(0.0, 1.0);
        self.from + (self.to - self.from) * fraction
    }

    /// True when playing the segment causes no visible change.
    pub fn is_static(&self) -> bool {
        self.from == self.to
    }
}

/// Whether a transition raises or lowers the overall progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// The new progress is greater than the old one.
    Increment,
    /// The new progress is less than or equal to the old one.
    Decrement,
}

/// The readout transition requested alongside the rings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextTransition {
    /// Integer currently displayed.
    pub from: i32,
    /// Integer to animate to.
    pub to: i32,
}

/// Inputs of [`compute_plan`].
#[derive(Debug, Clone)]
pub struct PlanRequest<'a> {
    /// Overall progress the indicator is coming from.
    pub old_progress: i32,
    /// Overall progress the indicator should reach.
    pub new_progress: i32,
    /// Current fill of every ring, indexed by ring.
    pub ring_progress: &'a [f64],
    /// When true the last ring fills first.
    pub reversed: bool,
    /// Time budget of the whole sequence.
    pub total: Duration,
    /// Readout transition, `None` when the value indicator is disabled.
    pub text: Option<TextTransition>,
}

/// The animation segments for one progress transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Plan {
    /// Whether the transition fills or empties rings.
    pub direction: Direction,
    /// One segment per ring, in fill order.
    pub rings: Vec<Segment>,
    /// Readout segment, concurrent with the ring chain.
    pub text: Option<Segment>,
}

impl Plan {
    /// Ring segments in play order: fill order when filling, reversed when
    /// emptying.
    pub fn chain(&self) -> Box<dyn Iterator<Item = &Segment> + '_> {
        match self.direction {
            Direction::Increment => Box::new(self.rings.iter()),
            Direction::Decrement => Box::new(self.rings.iter().rev()),
        }
    }

    /// Sum of the ring segment durations.
    pub fn chain_duration(&self) -> Duration {
        self.rings.iter().map(|s| s.duration).sum()
    }

    /// True when no segment, text included, changes anything visible.
    pub fn is_noop(&self) -> bool {
        self.rings.iter().all(Segment::is_static)
            && self.text.as_ref().map_or(true, Segment::is_static)
    }

    /// The ring segment targeting ring `index`.
    pub fn ring(&self, index: usize) -> Option<&Segment> {
        self.rings
            .iter()
            .find(|s| s.target == SegmentTarget::Ring(index))
    }
}

/// Ring indices in the order they receive progress.
pub fn fill_order(count: usize, reversed: bool) -> Vec<usize> {
    if reversed {
        (0..count).rev().collect()
    } else {
        (0..count).collect()
    }
}

/// Start and width of the progress share at fill `position`.
///
/// Every share is `100 / count` wide except the last, which absorbs the
/// remainder so the shares always sum to 100.
pub fn ring_share(count: usize, position: usize) -> (f64, f64) {
    let count = count.max(1);
    let share = (100 / count) as f64;
    let start = share * position as f64;
    if position + 1 >= count {
        (start, 100.0 - start)
    } else {
        (start, share)
    }
}

/// Fill a ring should reach when the overall progress is `progress` and the
/// ring owns the share `[start, start + width)`.
///
/// An empty share is only covered once the progress passes its start.
pub fn target_percent(progress: f64, start: f64, width: f64) -> f64 {
    if width <= 0.0 {
        return if progress > start { 100.0 } else { 0.0 };
    }
    if progress >= start + width {
        100.0
    } else if progress > start {
        (progress - start) / width * 100.0
    } else {
        0.0
    }
}

/// Fill of every ring, indexed by ring, for a settled overall `progress`.
pub fn settled_fill(count: usize, progress: i32, reversed: bool) -> Vec<f64> {
    let mut fills = vec![0.0; count];
    for (position, index) in fill_order(count, reversed).into_iter().enumerate() {
        let (start, width) = ring_share(count, position);
        fills[index] = target_percent(progress as f64, start, width);
    }
    fills
}

/// Overall progress implied by the current ring fills.
pub fn implied_progress(ring_progress: &[f64], reversed: bool) -> f64 {
    let count = ring_progress.len();
    fill_order(count, reversed)
        .into_iter()
        .enumerate()
        .map(|(position, index)| {
            let (_, width) = ring_share(count, position);
            ring_progress[index] / 100.0 * width
        })
        .sum()
}

fn millis(ms: f64, max_ms: f64) -> Duration {
    let ms = if ms.is_nan() { 0.0 } else { ms.clamp(0.0, max_ms) };
    Duration::from_nanos((ms * 1_000_000.0).round() as u64)
}

/// Computes the per-ring segments for one progress transition.
pub fn compute_plan(request: &PlanRequest<'_>) -> Plan {
    let count = request.ring_progress.len();
    let direction = if request.new_progress > request.old_progress {
        Direction::Increment
    } else {
        Direction::Decrement
    };

    let text = request.text.map(|t| Segment {
        target: SegmentTarget::Text,
        from: t.from as f64,
        to: t.to as f64,
        duration: request.total,
    });

    if count == 0 {
        return Plan {
            direction,
            rings: Vec::new(),
            text,
        };
    }

    let per_ring_ms = request.total.as_nanos() as f64 / 1_000_000.0 / count as f64;
    let per_percent_ms = per_ring_ms / 100.0;
    let progress = request.new_progress as f64;

    tracing::debug!(
        old = request.old_progress,
        new = request.new_progress,
        rings = count,
        ?direction,
        "computing ring plan"
    );

    let mut rings = Vec::with_capacity(count);
    for (position, index) in fill_order(count, request.reversed)
        .into_iter()
        .enumerate()
    {
        let (start, width) = ring_share(count, position);
        let to = target_percent(progress, start, width);
        let current = request.ring_progress[index];

        let (from, duration_ms) = match direction {
            Direction::Increment => {
                if current >= 100.0 {
                    (current, 0.0)
                } else if current > 0.0 {
                    (current, per_ring_ms - (to - current) * per_percent_ms)
                } else {
                    (0.0, per_ring_ms)
                }
            }
            Direction::Decrement => {
                if to == 0.0 {
                    (current, current * per_percent_ms)
                } else {
                    (current, (current - to).abs() * per_percent_ms)
                }
            }
        };

        let duration = millis(duration_ms, per_ring_ms);
        tracing::debug!(
            ring = index,
            share_start = start,
            from,
            to,
            duration_ms = duration.as_millis() as u64,
            "ring segment"
        );

        rings.push(Segment {
            target: SegmentTarget::Ring(index),
            from,
            to,
            duration,
        });
    }

    Plan {
        direction,
        rings,
        text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECOND: Duration = Duration::from_millis(1000);

    fn plan(old: i32, new: i32, rings: &[f64], reversed: bool) -> Plan {
        compute_plan(&PlanRequest {
            old_progress: old,
            new_progress: new,
            ring_progress: rings,
            reversed,
            total: SECOND,
            text: Some(TextTransition { from: old, to: new }),
        })
    }

    fn approx(a: Duration, b: Duration) -> bool {
        let diff = if a > b { a - b } else { b - a };
        diff <= Duration::from_micros(5)
    }

    #[test]
    fn test_single_ring_half() {
        // One ring, 0 -> 50
        let p = plan(0, 50, &[0.0], false);

        assert_eq!(p.direction, Direction::Increment);
        assert_eq!(p.rings.len(), 1);
        assert_eq!(p.rings[0].from, 0.0);
        assert_eq!(p.rings[0].to, 50.0);
        assert!(approx(p.rings[0].duration, SECOND));

        let text = p.text.expect("text segment");
        assert_eq!(text.from, 0.0);
        assert_eq!(text.to, 50.0);
        assert_eq!(text.duration, SECOND);
    }

    #[test]
    fn test_three_rings_full_sequential() {
        let p = plan(0, 100, &[0.0, 0.0, 0.0], false);

        let order: Vec<SegmentTarget> = p.chain().map(|s| s.target).collect();
        assert_eq!(
            order,
            vec![
                SegmentTarget::Ring(0),
                SegmentTarget::Ring(1),
                SegmentTarget::Ring(2)
            ]
        );
        for segment in &p.rings {
            assert_eq!(segment.from, 0.0);
            assert_eq!(segment.to, 100.0);
            assert!(approx(segment.duration, SECOND / 3));
        }
        assert_eq!(p.text.map(|t| t.duration), Some(SECOND));
    }

    #[test]
    fn test_two_rings_reversed_half() {
        let p = plan(0, 50, &[0.0, 0.0], true);

        assert_eq!(p.rings[0].target, SegmentTarget::Ring(1));
        assert_eq!(p.ring(1).map(|s| s.to), Some(100.0));
        assert_eq!(p.ring(0).map(|s| s.to), Some(0.0));
    }

    #[test]
    fn test_every_ring_full_at_hundred() {
        for count in 1..=12 {
            for reversed in [false, true] {
                let fills = settled_fill(count, 100, reversed);
                assert!(
                    fills.iter().all(|&f| f == 100.0),
                    "count {count} reversed {reversed}: {fills:?}"
                );
            }
        }
    }

    #[test]
    fn test_last_ring_absorbs_remainder() {
        // 7 rings -> shares of 14, the last one 16 wide
        assert_eq!(ring_share(7, 0), (0.0, 14.0));
        assert_eq!(ring_share(7, 5), (70.0, 14.0));
        assert_eq!(ring_share(7, 6), (84.0, 16.0));

        let fills = settled_fill(7, 98, false);
        assert_eq!(&fills[..6], &[100.0; 6]);
        assert!((fills[6] - 87.5).abs() < 1e-9);
    }

    #[test]
    fn test_durations_stay_within_budget() {
        for count in 1..=12 {
            let per_ring = SECOND / count as u32;
            for reversed in [false, true] {
                for old in (0..=100).step_by(5) {
                    let rings = settled_fill(count, old, reversed);
                    for new in 0..=100 {
                        let p = plan(old, new, &rings, reversed);
                        for s in &p.rings {
                            assert!(
                                s.duration <= per_ring + Duration::from_micros(1),
                                "count {count} reversed {reversed} {old}->{new}: {s:?}"
                            );
                        }
                        assert!(p.chain_duration() <= SECOND + Duration::from_micros(12));

                        // The segments end exactly on the settled fill.
                        let mut end = vec![0.0; count];
                        for s in &p.rings {
                            if let SegmentTarget::Ring(index) = s.target {
                                end[index] = s.to;
                            }
                        }
                        assert_eq!(end, settled_fill(count, new, reversed));
                    }
                }
            }
        }
    }

    #[test]
    fn test_partial_states_stay_within_budget() {
        let states: [&[f64]; 3] = [
            &[100.0, 40.0, 0.0],
            &[100.0, 100.0, 12.5],
            &[0.0, 70.0, 100.0],
        ];
        for rings in states {
            for reversed in [false, true] {
                for old in (0..=100).step_by(10) {
                    for new in (0..=100).step_by(5) {
                        let p = plan(old, new, rings, reversed);
                        let per_ring = SECOND / 3 + Duration::from_micros(1);
                        assert!(p.rings.iter().all(|s| s.duration <= per_ring));
                        assert!(p.chain_duration() <= SECOND + Duration::from_micros(3));
                    }
                }
            }
        }
    }

    #[test]
    fn test_empty_share_is_not_covered_at_its_start() {
        assert_eq!(target_percent(0.0, 0.0, 0.0), 0.0);
        assert_eq!(target_percent(1.0, 0.0, 0.0), 100.0);

        // Past the cap every share but the last is empty
        let fills = settled_fill(101, 0, false);
        assert!(fills.iter().all(|&f| f == 0.0));
        let p = plan(0, 0, &fills, false);
        assert!(p.is_noop());
    }

    #[test]
    fn test_partial_ring_increment_duration() {
        // Ring at 50 moving to 80 plays for per_ring - 30% of per_ring
        let p = plan(25, 40, &[50.0, 0.0], false);
        let ring0 = p.ring(0).expect("ring 0");
        assert_eq!(ring0.from, 50.0);
        assert_eq!(ring0.to, 80.0);
        assert!(approx(ring0.duration, Duration::from_millis(350)));
    }

    #[test]
    fn test_full_ring_increment_is_instant() {
        let p = plan(50, 75, &[100.0, 0.0], false);
        let ring0 = p.ring(0).expect("ring 0");
        assert_eq!(ring0.duration, Duration::ZERO);
        assert_eq!(ring0.to, 100.0);
        assert_eq!(p.ring(1).map(|s| s.to), Some(50.0));
    }

    #[test]
    fn test_decrement_chain_runs_backwards() {
        let p = plan(100, 0, &[100.0, 100.0, 100.0], false);
        assert_eq!(p.direction, Direction::Decrement);

        let order: Vec<SegmentTarget> = p.chain().map(|s| s.target).collect();
        assert_eq!(
            order,
            vec![
                SegmentTarget::Ring(2),
                SegmentTarget::Ring(1),
                SegmentTarget::Ring(0)
            ]
        );
        for s in &p.rings {
            assert_eq!(s.to, 0.0);
            assert!(approx(s.duration, SECOND / 3));
        }
    }

    #[test]
    fn test_decrement_scales_with_delta() {
        // Single ring from 80 down to 30
        let p = plan(80, 30, &[80.0], false);
        assert!(approx(p.rings[0].duration, Duration::from_millis(500)));

        // Down to zero scales with the current fill
        let p = plan(40, 0, &[40.0], false);
        assert!(approx(p.rings[0].duration, Duration::from_millis(400)));
    }

    #[test]
    fn test_same_progress_is_noop() {
        let fills = settled_fill(4, 60, false);
        let p = plan(60, 60, &fills, false);

        assert_eq!(p.direction, Direction::Decrement);
        assert!(p.is_noop());
        assert!(p.rings.iter().all(|s| s.duration == Duration::ZERO));
    }

    #[test]
    fn test_forward_fill_order_is_monotonic() {
        let p = plan(0, 70, &[0.0; 4], false);
        let targets: Vec<f64> = p.chain().map(|s| s.to).collect();
        // A ring only gets a nonzero target when every earlier ring is full
        for window in targets.windows(2) {
            if window[1] > 0.0 {
                assert_eq!(window[0], 100.0);
            }
        }
    }

    #[test]
    fn test_zero_duration_plan() {
        let p = compute_plan(&PlanRequest {
            old_progress: 0,
            new_progress: 100,
            ring_progress: &[0.0, 0.0],
            reversed: false,
            total: Duration::ZERO,
            text: None,
        });
        assert!(p.rings.iter().all(|s| s.duration == Duration::ZERO));
        assert!(p.text.is_none());
    }

    #[test]
    fn test_empty_ring_list() {
        let p = plan(0, 10, &[], false);
        assert!(p.rings.is_empty());
        assert_eq!(p.chain_duration(), Duration::ZERO);
    }

    #[test]
    fn test_implied_progress_inverts_settled_fill() {
        for count in 1..=6 {
            for progress in [0, 13, 50, 77, 100] {
                let fills = settled_fill(count, progress, count % 2 == 0);
                let implied = implied_progress(&fills, count % 2 == 0);
                assert!((implied - progress as f64).abs() < 1e-9);
            }
        }
    }
}
