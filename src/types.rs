// Core types shared by the camera, the hand tracker and the gesture interpreter.

#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the frame is on screen (pixels)
    pub height: usize,     // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A black frame of the given size.
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![0u32; width * height] }
    }
}

/// Points per detected hand (standard 21-point hand topology).
pub const LANDMARK_COUNT: usize = 21;
/// Landmark index of the thumb tip.
pub const THUMB_TIP: usize = 4;
/// Landmark index of the index fingertip.
pub const INDEX_TIP: usize = 8;

/// One tracked point on a hand, in normalized image coordinates ([0,1] on x and y).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

/// All 21 landmarks of one detected hand.
#[derive(Clone, Debug, PartialEq)]
pub struct HandLandmarks {
    pub points: [Landmark; LANDMARK_COUNT],
}

impl HandLandmarks {
    /// The two points the pinch gesture cares about.
    pub fn sample(&self) -> GestureSample {
        let tip = |l: &Landmark| (l.x, l.y);
        GestureSample {
            index_tip: tip(&self.points[INDEX_TIP]),
            thumb_tip: tip(&self.points[THUMB_TIP]),
        }
    }
}

/// Everything the tracker found in one camera frame (zero or more hands).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandResults {
    pub hands: Vec<HandLandmarks>,
}

/// Per-frame pinch input; consumed immediately, never stored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSample {
    pub index_tip: (f32, f32),
    pub thumb_tip: (f32, f32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_reads_thumb_and_index_tips() {
        let mut points = [Landmark::default(); LANDMARK_COUNT];
        points[THUMB_TIP] = Landmark::new(0.1, 0.2, 0.0);
        points[INDEX_TIP] = Landmark::new(0.4, 0.6, -0.1);
        let s = HandLandmarks { points }.sample();
        assert_eq!(s.thumb_tip, (0.1, 0.2));
        assert_eq!(s.index_tip, (0.4, 0.6));
    }
}
