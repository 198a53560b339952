// Pinch gesture interpreter.
//
// Each tracker result is reduced to a pinch distance (thumb tip <-> index tip,
// normalized image space). The pinch drives a display scale and a color, and
// a tight pinch fires a one-shot trigger gated by a cooldown.

use std::time::{Duration, Instant};

use tracing::{debug, info};

use crate::color::pinch_color;
use crate::config::GestureConfig;
use crate::types::{GestureSample, HandResults};

/// Idle: no hand in the last result. Tracking: a hand is being followed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TrackingState {
    #[default]
    Idle,
    Tracking,
}

/// What one tracked frame means for the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureReading {
    pub pinch: f32,
    pub scale: f32,
    pub color: [f32; 3],
    /// True on the frame a debounced pinch trigger fires.
    pub trigger: bool,
}

/// Euclidean distance between index tip and thumb tip.
pub fn pinch_distance(sample: &GestureSample) -> f32 {
    let dx = sample.index_tip.0 - sample.thumb_tip.0;
    let dy = sample.index_tip.1 - sample.thumb_tip.1;
    (dx * dx + dy * dy).sqrt()
}

/// Inverse of the pinch, held inside [min, max]. A zero pinch maps to `max`.
pub fn display_scale(pinch: f32, min: f32, max: f32) -> f32 {
    // max/min rather than clamp so a NaN pinch lands on `min` instead of propagating.
    (1.0 / pinch).max(min).min(max)
}

pub struct GestureInterpreter {
    trigger_pinch: f32,
    cooldown: Duration,
    min_scale: f32,
    max_scale: f32,
    state: TrackingState,
    last_trigger: Option<Instant>,
}

impl GestureInterpreter {
    pub fn new(cfg: &GestureConfig) -> Self {
        Self {
            trigger_pinch: cfg.trigger_pinch,
            cooldown: Duration::from_millis(cfg.cooldown_ms),
            min_scale: cfg.min_scale,
            max_scale: cfg.max_scale,
            state: TrackingState::Idle,
            last_trigger: None,
        }
    }

    pub fn state(&self) -> TrackingState {
        self.state
    }

    pub fn last_trigger(&self) -> Option<Instant> {
        self.last_trigger
    }

    /// Interpret one tracker result. `None` means no hand: nothing changes
    /// except the Idle/Tracking state.
    pub fn interpret(&mut self, results: &HandResults, now: Instant) -> Option<GestureReading> {
        let Some(hand) = results.hands.first() else {
            if self.state == TrackingState::Tracking {
                info!("hand lost");
                self.state = TrackingState::Idle;
            }
            return None;
        };
        if self.state == TrackingState::Idle {
            info!("hand acquired");
            self.state = TrackingState::Tracking;
        }

        let pinch = pinch_distance(&hand.sample());
        let scale = display_scale(pinch, self.min_scale, self.max_scale);
        let trigger = pinch < self.trigger_pinch && self.cooled_down(now);
        if trigger {
            self.last_trigger = Some(now);
        } else if pinch < self.trigger_pinch {
            debug!(pinch, "pinch held inside cooldown");
        }

        Some(GestureReading { pinch, scale, color: pinch_color(pinch), trigger })
    }

    fn cooled_down(&self, now: Instant) -> bool {
        self.last_trigger
            .map_or(true, |t| now.saturating_duration_since(t) >= self.cooldown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HandLandmarks, Landmark, INDEX_TIP, LANDMARK_COUNT, THUMB_TIP};

    fn hand(thumb: (f32, f32), index: (f32, f32)) -> HandResults {
        let mut points = [Landmark::new(0.5, 0.5, 0.0); LANDMARK_COUNT];
        points[THUMB_TIP] = Landmark::new(thumb.0, thumb.1, 0.0);
        points[INDEX_TIP] = Landmark::new(index.0, index.1, 0.0);
        HandResults { hands: vec![HandLandmarks { points }] }
    }

    fn pinched() -> HandResults {
        hand((0.50, 0.50), (0.52, 0.50)) // pinch = 0.02
    }

    #[test]
    fn pinch_distance_is_euclidean() {
        let s = GestureSample { index_tip: (0.3, 0.4), thumb_tip: (0.0, 0.0) };
        assert!((pinch_distance(&s) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn scale_always_within_bounds() {
        for pinch in [1e-9, 0.001, 0.02, 0.3, 0.5, 1.0, 1.4, 10.0] {
            let s = display_scale(pinch, 0.6, 2.2);
            assert!((0.6..=2.2).contains(&s), "pinch={pinch} scale={s}");
            // re-clamping is a no-op
            assert_eq!(s.clamp(0.6, 2.2), s);
        }
        assert_eq!(display_scale(0.0, 0.6, 2.2), 2.2);
        assert_eq!(display_scale(0.02, 0.6, 2.2), 2.2);
        assert!((display_scale(1.0, 0.6, 2.2) - 1.0).abs() < 1e-6);
        assert_eq!(display_scale(f32::NAN, 0.6, 2.2), 0.6);
    }

    #[test]
    fn no_hand_changes_nothing() {
        let mut g = GestureInterpreter::new(&GestureConfig::default());
        let now = Instant::now();
        assert!(g.interpret(&HandResults::default(), now).is_none());
        assert_eq!(g.state(), TrackingState::Idle);
        assert_eq!(g.last_trigger(), None);
    }

    #[test]
    fn idle_tracking_follows_hand_presence() {
        let mut g = GestureInterpreter::new(&GestureConfig::default());
        let now = Instant::now();
        g.interpret(&hand((0.2, 0.2), (0.5, 0.5)), now);
        assert_eq!(g.state(), TrackingState::Tracking);
        g.interpret(&HandResults::default(), now);
        assert_eq!(g.state(), TrackingState::Idle);
    }

    #[test]
    fn first_tight_pinch_triggers() {
        let mut g = GestureInterpreter::new(&GestureConfig::default());
        let now = Instant::now();
        let r = g.interpret(&pinched(), now).unwrap();
        assert!(r.trigger);
        assert_eq!(r.scale, 2.2);
        assert_eq!(g.last_trigger(), Some(now));
    }

    #[test]
    fn debounce_blocks_inside_cooldown() {
        let mut g = GestureInterpreter::new(&GestureConfig::default());
        let t0 = Instant::now();
        assert!(g.interpret(&pinched(), t0).unwrap().trigger);
        let r = g.interpret(&pinched(), t0 + Duration::from_millis(999)).unwrap();
        assert!(!r.trigger);
        assert_eq!(g.last_trigger(), Some(t0));
    }

    #[test]
    fn debounce_allows_after_cooldown() {
        let mut g = GestureInterpreter::new(&GestureConfig::default());
        let t0 = Instant::now();
        assert!(g.interpret(&pinched(), t0).unwrap().trigger);
        let t1 = t0 + Duration::from_millis(1000);
        assert!(g.interpret(&pinched(), t1).unwrap().trigger);
        assert_eq!(g.last_trigger(), Some(t1));
    }

    #[test]
    fn open_hand_never_triggers() {
        let mut g = GestureInterpreter::new(&GestureConfig::default());
        let r = g.interpret(&hand((0.2, 0.5), (0.5, 0.5)), Instant::now()).unwrap();
        assert!(!r.trigger);
        assert!((r.pinch - 0.3).abs() < 1e-6);
        assert_eq!(r.color, pinch_color(r.pinch));
    }

    #[test]
    fn only_first_hand_is_read() {
        let mut g = GestureInterpreter::new(&GestureConfig::default());
        let mut results = hand((0.2, 0.5), (0.5, 0.5));
        results.hands.extend(pinched().hands);
        let r = g.interpret(&results, Instant::now()).unwrap();
        assert!(!r.trigger);
    }
}
