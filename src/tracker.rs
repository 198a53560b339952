// Hand-landmark sources.
//
// The landmark model itself lives outside this crate; anything that can turn a
// camera frame into 21-point hands plugs in through `HandTracker`. The
// built-in `PointerTracker` synthesizes a hand from the window pointer so the
// whole pipeline runs without a model (or without a camera at all).

use tracing::debug;

use crate::config::TrackerOptions;
use crate::error::Error;
use crate::types::{
    FrameBuffer, HandLandmarks, HandResults, Landmark, INDEX_TIP, LANDMARK_COUNT, THUMB_TIP,
};

pub trait HandTracker {
    /// Apply detection options; called once before the first frame.
    fn configure(&mut self, options: &TrackerOptions) -> Result<(), Error>;

    /// Detect hands in one frame. `None` when no camera frame is available.
    fn process(&mut self, frame: Option<&FrameBuffer>) -> Result<HandResults, Error>;
}

/// Pointer input sampled from the window once per loop iteration.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerInput {
    /// Pointer position normalized to [0,1]x[0,1]; `None` when outside the window.
    pub pos: Option<(f32, f32)>,
    /// Left button held: close the pinch.
    pub pressed: bool,
    /// Scroll delta since the last sample (positive = up).
    pub scroll: f32,
}

pub const PINCHED_SPREAD: f32 = 0.02;
pub const MAX_SPREAD: f32 = 0.6;
const SCROLL_STEP: f32 = 0.01; // spread change per scroll unit

/// Simulated hand: thumb tip under the pointer, index tip `spread` to its right
/// on screen. Landmarks come out in mirrored image coordinates, the same
/// frame a selfie camera + landmark model would report.
pub struct PointerTracker {
    input: PointerInput,
    spread: f32, // resting thumb-index distance
    max_hands: usize,
}

impl PointerTracker {
    pub fn new() -> Self {
        Self { input: PointerInput::default(), spread: 0.15, max_hands: 1 }
    }

    /// Latest pointer state; scroll accumulates into the resting spread.
    pub fn update(&mut self, input: PointerInput) {
        if input.scroll != 0.0 {
            self.spread = (self.spread + input.scroll * SCROLL_STEP).clamp(PINCHED_SPREAD, MAX_SPREAD);
            debug!(spread = self.spread, "pointer spread");
        }
        self.input = input;
    }

    pub fn spread(&self) -> f32 {
        self.spread
    }

    /// `(x, y)` is already in image coordinates.
    fn synth_hand(&self, (x, y): (f32, f32)) -> HandLandmarks {
        let spread = if self.input.pressed { PINCHED_SPREAD } else { self.spread };

        // Fan the five fingers (4 joints each) up from a wrist below the pointer.
        let wrist = Landmark::new(x, y + 0.2, 0.0);
        let mut points = [wrist; LANDMARK_COUNT];
        for finger in 0..5 {
            let dx = (1.0 - finger as f32) * spread * 0.5;
            for joint in 0..4 {
                let t = (joint + 1) as f32 / 4.0;
                points[1 + finger * 4 + joint] =
                    Landmark::new(x + dx * t, y + 0.2 - 0.2 * t, -0.01 * t);
            }
        }
        points[THUMB_TIP] = Landmark::new(x, y, 0.0);
        points[INDEX_TIP] = Landmark::new(x - spread, y, 0.0);
        HandLandmarks { points }
    }
}

impl Default for PointerTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl HandTracker for PointerTracker {
    fn configure(&mut self, options: &TrackerOptions) -> Result<(), Error> {
        options.validate().map_err(|e| Error::Tracker(e.to_string()))?;
        self.max_hands = options.max_hands;
        Ok(())
    }

    fn process(&mut self, _frame: Option<&FrameBuffer>) -> Result<HandResults, Error> {
        // window x grows rightwards; mirrored image x grows leftwards
        let mut hands: Vec<HandLandmarks> = self
            .input
            .pos
            .map(|(x, y)| self.synth_hand((1.0 - x, y)))
            .into_iter()
            .collect();
        hands.truncate(self.max_hands);
        Ok(HandResults { hands })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::pinch_distance;

    fn tracker_at(pos: Option<(f32, f32)>, pressed: bool) -> PointerTracker {
        let mut t = PointerTracker::new();
        t.configure(&TrackerOptions::default()).unwrap();
        t.update(PointerInput { pos, pressed, scroll: 0.0 });
        t
    }

    #[test]
    fn pointer_outside_window_means_no_hand() {
        let mut t = tracker_at(None, false);
        assert!(t.process(None).unwrap().hands.is_empty());
    }

    #[test]
    fn resting_pinch_equals_spread() {
        let mut t = tracker_at(Some((0.3, 0.4)), false);
        let res = t.process(None).unwrap();
        assert_eq!(res.hands.len(), 1);
        let pinch = pinch_distance(&res.hands[0].sample());
        assert!((pinch - t.spread()).abs() < 1e-6);
    }

    #[test]
    fn pressed_button_closes_the_pinch() {
        let mut t = tracker_at(Some((0.5, 0.5)), true);
        let res = t.process(None).unwrap();
        let pinch = pinch_distance(&res.hands[0].sample());
        assert!(pinch < 0.04);
    }

    #[test]
    fn scroll_is_clamped() {
        let mut t = PointerTracker::new();
        t.update(PointerInput { pos: None, pressed: false, scroll: 1000.0 });
        assert_eq!(t.spread(), MAX_SPREAD);
        t.update(PointerInput { pos: None, pressed: false, scroll: -1000.0 });
        assert_eq!(t.spread(), PINCHED_SPREAD);
    }

    #[test]
    fn configure_rejects_bad_options() {
        let mut t = PointerTracker::new();
        let opts = TrackerOptions { max_hands: 0, ..TrackerOptions::default() };
        assert!(matches!(t.configure(&opts), Err(Error::Tracker(_))));
    }
}
