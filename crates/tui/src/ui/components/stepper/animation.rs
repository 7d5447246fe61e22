//! Slide animation primitives for the stepper.
//!
//! A step change produces a [`SlideTransition`]: the indicator glides from the
//! previously active label to the new one while the outgoing panel leaves
//! toward one edge and the incoming panel arrives from another. Offsets are
//! signed fractions of the panel extent along the stepper's axis (`-1.0` is a
//! full panel toward the start edge, `1.0` toward the end edge).

use std::time::{Duration, Instant};

use super::layout::IndicatorGeometry;

/// Default duration of a step transition.
pub const DEFAULT_TRANSITION: Duration = Duration::from_millis(300);

/// Easing curves applied to normalized progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Easing {
    EaseIn,
    EaseOut,
}

impl Easing {
    /// Maps progress `t` in `0.0..=1.0` onto the curve. Out-of-range input is clamped.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::EaseIn => t * t,
            Easing::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
        }
    }
}

/// Edge of the stepper along its axis: left/right when horizontal, top/bottom
/// when vertical.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    Start,
    End,
}

impl Edge {
    /// Signed unit offset of a panel parked off-screen on this edge.
    pub fn sign(self) -> f32 {
        match self {
            Edge::Start => -1.0,
            Edge::End => 1.0,
        }
    }
}

/// Where the incoming panel enters from and where the outgoing one exits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnimationHint {
    pub incoming_from: Edge,
    pub outgoing_to: Edge,
}

impl Default for AnimationHint {
    fn default() -> Self {
        Self {
            incoming_from: Edge::End,
            outgoing_to: Edge::End,
        }
    }
}

impl AnimationHint {
    /// Hint for moving from `from` to `to`; `None` when the index is unchanged.
    pub fn between(from: usize, to: usize) -> Option<Self> {
        match to.cmp(&from) {
            std::cmp::Ordering::Less => Some(Self {
                incoming_from: Edge::End,
                outgoing_to: Edge::End,
            }),
            std::cmp::Ordering::Greater => Some(Self {
                incoming_from: Edge::Start,
                outgoing_to: Edge::Start,
            }),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Panel offsets for one frame. `outgoing` is absent when no transition runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelFrame {
    pub incoming: (usize, f32),
    pub outgoing: Option<(usize, f32)>,
}

/// An in-flight change of the active step.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideTransition {
    pub from_index: usize,
    pub to_index: usize,
    pub from_indicator: IndicatorGeometry,
    /// Offset of the outgoing panel when the transition started; non-zero
    /// when it interrupted a slide that had not settled.
    pub from_offset: f32,
    pub hint: AnimationHint,
    pub started_at: Instant,
    pub duration: Duration,
}

impl SlideTransition {
    /// Linear progress in `0.0..=1.0`.
    pub fn progress(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return 1.0;
        }
        let elapsed = now.saturating_duration_since(self.started_at);
        (elapsed.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now) >= 1.0
    }

    /// Indicator geometry between the previous position and `target`.
    pub fn indicator_at(&self, now: Instant, target: IndicatorGeometry) -> IndicatorGeometry {
        self.from_indicator.lerp(target, Easing::EaseOut.apply(self.progress(now)))
    }

    /// Signed offsets of the incoming and outgoing panels.
    pub fn panel_frame(&self, now: Instant) -> PanelFrame {
        let progress = self.progress(now);
        let incoming = self.hint.incoming_from.sign() * (1.0 - Easing::EaseOut.apply(progress));
        let exit = self.hint.outgoing_to.sign() - self.from_offset;
        let outgoing = self.from_offset + exit * Easing::EaseIn.apply(progress);
        PanelFrame {
            incoming: (self.to_index, incoming),
            outgoing: Some((self.from_index, outgoing)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(hint: AnimationHint) -> SlideTransition {
        SlideTransition {
            from_index: 0,
            to_index: 2,
            from_indicator: IndicatorGeometry { offset: 0, size: 10 },
            from_offset: 0.0,
            hint,
            started_at: Instant::now(),
            duration: Duration::from_millis(300),
        }
    }

    #[test]
    fn easing_curves_hit_endpoints() {
        for easing in [Easing::EaseIn, Easing::EaseOut] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
            assert_eq!(easing.apply(7.0), 1.0);
        }
        assert!(Easing::EaseIn.apply(0.5) < 0.5);
        assert!(Easing::EaseOut.apply(0.5) > 0.5);
    }

    #[test]
    fn hint_inverts_with_direction_of_travel() {
        let backward = AnimationHint::between(2, 0).unwrap();
        let forward = AnimationHint::between(0, 2).unwrap();
        assert_eq!(backward.incoming_from, Edge::End);
        assert_eq!(backward.outgoing_to, Edge::End);
        assert_eq!(forward.incoming_from, Edge::Start);
        assert_eq!(forward.outgoing_to, Edge::Start);
        assert!(AnimationHint::between(1, 1).is_none());
    }

    #[test]
    fn panels_start_off_screen_and_settle() {
        let slide = transition(AnimationHint::between(0, 2).unwrap());
        let start = slide.panel_frame(slide.started_at);
        assert_eq!(start.incoming, (2, -1.0));
        assert_eq!(start.outgoing, Some((0, -0.0)));

        let end = slide.panel_frame(slide.started_at + slide.duration);
        assert_eq!(end.incoming.1, 0.0);
        assert_eq!(end.outgoing.map(|(_, offset)| offset), Some(-1.0));
        assert!(slide.is_finished(slide.started_at + slide.duration));
    }

    #[test]
    fn interrupted_panel_leaves_from_where_it_was() {
        let mut slide = transition(AnimationHint::between(2, 0).unwrap());
        slide.from_offset = -0.4;
        assert_eq!(slide.panel_frame(slide.started_at).outgoing, Some((0, -0.4)));

        let midway = slide.panel_frame(slide.started_at + Duration::from_millis(150)).outgoing.unwrap().1;
        assert!(midway > -0.4 && midway < 1.0);
        let (index, settled) = slide.panel_frame(slide.started_at + slide.duration).outgoing.unwrap();
        assert_eq!(index, 0);
        assert!((settled - 1.0).abs() < 1e-6);
    }

    #[test]
    fn indicator_interpolates_toward_target() {
        let slide = transition(AnimationHint::default());
        let target = IndicatorGeometry { offset: 20, size: 6 };
        assert_eq!(slide.indicator_at(slide.started_at, target), slide.from_indicator);
        assert_eq!(slide.indicator_at(slide.started_at + Duration::from_secs(1), target), target);

        let midway = slide.indicator_at(slide.started_at + Duration::from_millis(150), target);
        assert!(midway.offset > 0 && midway.offset < 20);
    }

    #[test]
    fn zero_duration_completes_immediately() {
        let mut slide = transition(AnimationHint::default());
        slide.duration = Duration::ZERO;
        assert_eq!(slide.progress(slide.started_at), 1.0);
    }
}
