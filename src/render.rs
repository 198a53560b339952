// Software point renderer: projects the particle cloud through a perspective
// camera and splats each particle as a soft additive disc.
// Visual outcomes:
// - The cloud sits at the origin, seen from +Z, slowly spinning about Y.
// - Particles grow/shrink with the group scale and with distance (size attenuation).
// - Overlapping particles add up towards white, like a glow.

use glam::{Mat4, Vec3};

use crate::config::{ParticleConfig, WindowConfig};
use crate::session::DrawList;
use crate::types::FrameBuffer;

// ----------------------------- linear -> sRGB encoding ---------------------------------

/// Linear float channel -> sRGB byte via a 4096-step table.
/// Clamps to [0,1] first; this is where out-of-range colors are tamed.
pub struct SrgbEncoder {
    table: [u8; 4096],
}

impl SrgbEncoder {
    pub fn new() -> Self {
        let mut table = [0u8; 4096];
        for (i, slot) in table.iter_mut().enumerate() {
            let l = i as f32 / 4095.0;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }
        Self { table }
    }

    #[inline]
    pub fn encode(&self, l: f32) -> u8 {
        // NaN clamps to NaN and casts to 0.
        let idx = (l.clamp(0.0, 1.0) * 4095.0).round() as usize;
        self.table[idx.min(4095)]
    }

    pub fn encode_rgb(&self, rgb: &[f32]) -> [u8; 3] {
        [self.encode(rgb[0]), self.encode(rgb[1]), self.encode(rgb[2])]
    }
}

impl Default for SrgbEncoder {
    fn default() -> Self {
        Self::new()
    }
}

// ----------------------------- additive drawing helpers --------------------------------

/// Additive blend one RGB triplet at (x,y) with saturation to 255.
#[inline]
fn add_rgb_saturating(fb: &mut FrameBuffer, x: i32, y: i32, [r, g, b]: [u8; 3]) {
    if x < 0 || y < 0 { return; }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height { return; }

    let idx = y * fb.width + x;
    let old = fb.pixels[idx];

    let nr = (((old >> 16) & 0xFF) + r as u32).min(255);
    let ng = (((old >> 8) & 0xFF) + g as u32).min(255);
    let nb = ((old & 0xFF) + b as u32).min(255);

    fb.pixels[idx] = (nr << 16) | (ng << 8) | nb;
}

/// Soft round disc with Gaussian falloff, added onto the frame.
/// Visual: a fuzzy dot of light; sub-pixel radii collapse to a single pixel.
fn draw_additive_disc(fb: &mut FrameBuffer, cx: f32, cy: f32, radius: f32, rgb: [u8; 3], strength: f32) {
    if radius < 1.0 {
        let s = |c: u8| (c as f32 * strength).round().clamp(0.0, 255.0) as u8;
        add_rgb_saturating(fb, cx as i32, cy as i32, [s(rgb[0]), s(rgb[1]), s(rgb[2])]);
        return;
    }
    let r2 = radius * radius;
    let sigma = radius * 0.5;
    let denom = 2.0 * sigma * sigma;
    let reach = radius.ceil() as i32;
    let (ix, iy) = (cx as i32, cy as i32);

    for y in (iy - reach)..=(iy + reach) {
        for x in (ix - reach)..=(ix + reach) {
            let dx = x as f32 + 0.5 - cx;
            let dy = y as f32 + 0.5 - cy;
            let d2 = dx * dx + dy * dy;
            if d2 > r2 { continue; }

            let w = (-d2 / denom).exp() * strength;
            let s = |c: u8| (c as f32 * w).round().clamp(0.0, 255.0) as u8;
            add_rgb_saturating(fb, x, y, [s(rgb[0]), s(rgb[1]), s(rgb[2])]);
        }
    }
}

// ----------------------------- renderer ------------------------------------------------

const SPLAT_STRENGTH: f32 = 0.7;

pub struct Renderer {
    frame: FrameBuffer,
    fov_y: f32, // radians
    near: f32,
    far: f32,
    view: Mat4,
    proj: Mat4,
    point_size: f32,
    encoder: SrgbEncoder,
    encoded: Vec<[u8; 3]>, // per-particle colors, refreshed when the buffer is dirty
}

impl Renderer {
    pub fn new(window: &WindowConfig, particles: &ParticleConfig) -> Self {
        let fov_y = window.fov_deg.to_radians();
        let mut r = Self {
            frame: FrameBuffer::new(window.width, window.height),
            fov_y,
            near: window.near,
            far: window.far,
            view: Mat4::look_at_rh(Vec3::new(0.0, 0.0, window.camera_z), Vec3::ZERO, Vec3::Y),
            proj: Mat4::IDENTITY,
            point_size: particles.point_size,
            encoder: SrgbEncoder::new(),
            encoded: Vec::new(),
        };
        r.update_projection();
        r
    }

    pub fn size(&self) -> (usize, usize) {
        (self.frame.width, self.frame.height)
    }

    fn aspect(&self) -> f32 {
        self.frame.width as f32 / self.frame.height.max(1) as f32
    }

    fn update_projection(&mut self) {
        self.proj = Mat4::perspective_rh_gl(self.fov_y, self.aspect(), self.near, self.far);
    }

    /// Match a new window size: new aspect ratio and a new frame.
    /// Returns true if anything changed.
    pub fn resize(&mut self, width: usize, height: usize) -> bool {
        if (width, height) == self.size() || width == 0 || height == 0 {
            return false;
        }
        self.frame = FrameBuffer::new(width, height);
        self.update_projection();
        true
    }

    /// Clear, or paint the dimmed + mirrored camera image when one is given.
    pub fn clear(&mut self, background: Option<&FrameBuffer>) {
        let Some(bg) = background.filter(|b| b.width > 0 && b.height > 0) else {
            self.frame.pixels.fill(0);
            return;
        };
        let (w, h) = self.size();
        for y in 0..h {
            let sy = y * bg.height / h;
            for x in 0..w {
                let sx = bg.width - 1 - x * bg.width / w; // selfie view
                let p = bg.pixels[sy * bg.width + sx];
                self.frame.pixels[y * w + x] = (p >> 2) & 0x003F_3F3F;
            }
        }
    }

    /// Project and splat every particle.
    pub fn draw(&mut self, list: &DrawList<'_>) {
        let count = list.positions.len() / 3;
        if list.dirty || self.encoded.len() != count {
            self.encoded = list.colors.chunks_exact(3).map(|c| self.encoder.encode_rgb(c)).collect();
        }

        let model = Mat4::from_rotation_y(list.rotation_y) * Mat4::from_scale(Vec3::splat(list.scale));
        let model_view = self.view * model;
        let (w, h) = (self.frame.width as f32, self.frame.height as f32);
        // Size attenuation: diameter_px = size * (h / 2) / depth.
        let size_px = self.point_size * h * 0.5;

        for (i, p) in list.positions.chunks_exact(3).enumerate() {
            let v = model_view.transform_point3(Vec3::new(p[0], p[1], p[2]));
            let depth = -v.z;
            if depth < self.near || depth > self.far {
                continue;
            }
            let clip = self.proj * v.extend(1.0);
            let ndc = clip.truncate() / clip.w;
            if ndc.x.abs() > 1.1 || ndc.y.abs() > 1.1 {
                continue;
            }
            let sx = (ndc.x + 1.0) * 0.5 * w;
            let sy = (1.0 - ndc.y) * 0.5 * h;
            let radius = size_px / depth * 0.5;
            draw_additive_disc(&mut self.frame, sx, sy, radius, self.encoded[i], SPLAT_STRENGTH);
        }
    }

    /// Normalized [0,1] image point -> frame pixel, mirrored like the background.
    pub fn to_screen(&self, (x, y): (f32, f32)) -> (i32, i32) {
        let (w, h) = self.size();
        (((1.0 - x) * w as f32) as i32, (y * h as f32) as i32)
    }

    pub fn frame(&self) -> &FrameBuffer {
        &self.frame
    }

    pub fn frame_mut(&mut self) -> &mut FrameBuffer {
        &mut self.frame
    }
}
