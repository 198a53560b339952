// Runtime settings. Everything has a default; an optional TOML file named by
// $PARTICLE_MORPH_CONFIG overrides any subset of fields.

use std::path::Path;

use serde::Deserialize;

use crate::error::Error;

/// Env var holding the path of an optional TOML config file.
pub const CONFIG_ENV: &str = "PARTICLE_MORPH_CONFIG";

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct VizConfig {
    pub particles: ParticleConfig,
    pub gesture: GestureConfig,
    pub tracker: TrackerOptions,
    pub camera: CameraConfig,
    pub window: WindowConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct ParticleConfig {
    pub count: usize,
    /// World-space point size (attenuated by depth when drawn).
    pub point_size: f32,
    /// Radians added to the group's Y rotation every render tick.
    pub rotation_step: f32,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl Default for ParticleConfig {
    fn default() -> Self {
        Self { count: 6000, point_size: 1.8, rotation_step: 0.002, seed: None }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct GestureConfig {
    /// Pinch distance below which a trigger is eligible.
    pub trigger_pinch: f32,
    /// Minimum time between two triggers.
    pub cooldown_ms: u64,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self { trigger_pinch: 0.04, cooldown_ms: 1000, min_scale: 0.6, max_scale: 2.2 }
    }
}

/// Options handed to the hand-landmark source.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TrackerOptions {
    pub max_hands: usize,
    pub model_complexity: u8,
    pub min_detection_confidence: f32,
    pub min_tracking_confidence: f32,
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self {
            max_hands: 1,
            model_complexity: 1,
            min_detection_confidence: 0.7,
            min_tracking_confidence: 0.7,
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraConfig {
    pub enabled: bool,
    pub index: u32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    /// Draw the (dimmed) camera image behind the particles.
    pub show_feed: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self { enabled: true, index: 0, width: 640, height: 480, fps: 30, show_feed: false }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: usize,
    pub height: usize,
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    /// Distance of the viewer from the origin along +Z.
    pub camera_z: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self { width: 1280, height: 720, fov_deg: 75.0, near: 0.1, far: 1000.0, camera_z: 120.0 }
    }
}

impl VizConfig {
    /// Parse a TOML document; missing fields keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, Error> {
        let cfg: Self = toml::from_str(text).map_err(|e| Error::Config(format!("Parse: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// Defaults, or the file named by $PARTICLE_MORPH_CONFIG if set.
    pub fn from_env() -> Result<Self, Error> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), Error> {
        let bad = |msg: &str| Err(Error::Config(msg.to_string()));

        if self.particles.count == 0 {
            return bad("particles.count must be > 0");
        }
        if self.particles.point_size <= 0.0 {
            return bad("particles.point_size must be > 0");
        }
        let g = &self.gesture;
        if g.trigger_pinch <= 0.0 {
            return bad("gesture.trigger_pinch must be > 0");
        }
        if g.min_scale <= 0.0 || g.min_scale > g.max_scale {
            return bad("gesture scale range must satisfy 0 < min_scale <= max_scale");
        }
        self.tracker.validate()?;
        if self.camera.enabled && (self.camera.width == 0 || self.camera.height == 0) {
            return bad("camera resolution must be non-zero");
        }
        let w = &self.window;
        if w.width == 0 || w.height == 0 {
            return bad("window size must be non-zero");
        }
        if !(w.fov_deg > 0.0 && w.fov_deg < 180.0) {
            return bad("window.fov_deg must be in (0, 180)");
        }
        if w.near <= 0.0 || w.near >= w.far {
            return bad("window clip planes must satisfy 0 < near < far");
        }
        Ok(())
    }
}

impl TrackerOptions {
    pub fn validate(&self) -> Result<(), Error> {
        if self.max_hands == 0 {
            return Err(Error::Config("tracker.max_hands must be >= 1".into()));
        }
        if self.model_complexity > 1 {
            return Err(Error::Config("tracker.model_complexity must be 0 or 1".into()));
        }
        for (name, v) in [
            ("min_detection_confidence", self.min_detection_confidence),
            ("min_tracking_confidence", self.min_tracking_confidence),
        ] {
            if !(0.0..=1.0).contains(&v) {
                return Err(Error::Config(format!("tracker.{name} must be in [0, 1], got {v}")));
            }
        }
        Ok(())
    }
}
