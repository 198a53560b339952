// The visualization session: all mutable scene state in one place, driven by
// two handlers with independent cadences:
//   on_gesture_frame  (once per tracker result)
//   on_render_tick    (once per displayed frame)
// Both run on the same thread, so a trigger's buffer rewrite is always
// complete before the next render reads it.

use std::time::Instant;

use rand::Rng;
use tracing::info;

use crate::color::{apply_uniform, base_color};
use crate::config::VizConfig;
use crate::gesture::{GestureInterpreter, TrackingState};
use crate::mode::ModeCycle;
use crate::particles::ParticleBuffer;
use crate::shapes::Shape;
use crate::types::HandResults;

/// What a gesture frame did, for logging and the HUD.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureOutcome {
    /// No hand; nothing changed.
    Idle,
    /// Hand tracked; scale and color updated.
    Tracked { pinch: f32, scale: f32 },
    /// Hand tracked and the pinch trigger fired.
    Triggered { from: Shape, to: Shape, pinch: f32, scale: f32 },
}

/// Everything the renderer needs for one frame.
pub struct DrawList<'a> {
    pub rotation_y: f32,
    pub scale: f32,
    pub positions: &'a [f32],
    pub colors: &'a [f32],
    /// Buffer contents changed since the previous draw list.
    pub dirty: bool,
}

pub struct Session<R: Rng> {
    buffer: ParticleBuffer,
    mode: ModeCycle,
    gesture: GestureInterpreter,
    scale: f32,
    rotation_y: f32,
    rotation_step: f32,
    last_pinch: Option<f32>,
    rng: R,
}

impl<R: Rng> Session<R> {
    /// Allocate the buffer and show the first shape in its base color.
    pub fn new(cfg: &VizConfig, rng: R) -> Self {
        let mut session = Self {
            buffer: ParticleBuffer::allocate(cfg.particles.count),
            mode: ModeCycle::new(),
            gesture: GestureInterpreter::new(&cfg.gesture),
            scale: 1.0,
            rotation_y: 0.0,
            rotation_step: cfg.particles.rotation_step,
            last_pinch: None,
            rng,
        };
        session.regenerate();
        session
    }

    /// Handle one tracker result.
    pub fn on_gesture_frame(&mut self, hands: &HandResults, now: Instant) -> GestureOutcome {
        let Some(reading) = self.gesture.interpret(hands, now) else {
            return GestureOutcome::Idle;
        };

        self.scale = reading.scale;
        self.last_pinch = Some(reading.pinch);
        let [r, g, b] = reading.color;
        apply_uniform(&mut self.buffer, r, g, b);
        self.buffer.mark_dirty();

        if !reading.trigger {
            return GestureOutcome::Tracked { pinch: reading.pinch, scale: reading.scale };
        }

        let from = self.mode.shape();
        self.mode.advance();
        self.regenerate();
        let to = self.mode.shape();
        info!(from = from.name(), to = to.name(), mode = self.mode.current(), pinch = reading.pinch, "shape trigger");
        GestureOutcome::Triggered { from, to, pinch: reading.pinch, scale: reading.scale }
    }

    /// Advance the idle rotation and hand the buffers to the renderer.
    pub fn on_render_tick(&mut self) -> DrawList<'_> {
        self.rotation_y = (self.rotation_y + self.rotation_step) % std::f32::consts::TAU;
        let dirty = self.buffer.take_dirty();
        DrawList {
            rotation_y: self.rotation_y,
            scale: self.scale,
            positions: self.buffer.positions(),
            colors: self.buffer.colors(),
            dirty,
        }
    }

    /// Run the current mode's generator and paint it in the mode's base color.
    fn regenerate(&mut self) {
        let shape = self.mode.shape();
        shape.generate(&mut self.buffer, &mut self.rng);
        let [r, g, b] = base_color(shape);
        apply_uniform(&mut self.buffer, r, g, b);
        self.buffer.mark_dirty();
    }

    pub fn shape(&self) -> Shape {
        self.mode.shape()
    }

    pub fn mode(&self) -> usize {
        self.mode.current()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn last_pinch(&self) -> Option<f32> {
        self.last_pinch
    }

    pub fn tracking(&self) -> TrackingState {
        self.gesture.state()
    }

    pub fn last_trigger(&self) -> Option<Instant> {
        self.gesture.last_trigger()
    }

    pub fn buffer(&self) -> &ParticleBuffer {
        &self.buffer
    }
}
