// Window + software drawing utilities.
// Visual effects provided here:
// 1) A resizable window that shows the particle frame.
// 2) Crosshairs marking the tracked thumb and index tips.
// 3) A tiny 5x7 bitmap font to render HUD text on top of the scene.

use crate::error::Error;
use crate::tracker::PointerInput;
use crate::types::FrameBuffer;
use minifb::{Key, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window, // the on-screen window you see
}

impl Drawer {
    /// Create a resizable window.
    /// Visual: a new empty window appears with your chosen title.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let options = WindowOptions { resize: true, ..WindowOptions::default() };
        let mut window = Window::new(title, width, height, options)
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// True while ESC is held down (we'll exit when this is pressed).
    pub fn esc_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape)
    }

    /// Current client-area size; changes when the user resizes the window.
    pub fn size(&self) -> (usize, usize) {
        self.window.get_size()
    }

    /// Pointer state for the simulated hand, normalized to the window.
    /// `pos` is None while the pointer is outside the window.
    pub fn pointer(&self) -> PointerInput {
        let (w, h) = self.size();
        let pos = self
            .window
            .get_mouse_pos(MouseMode::Discard)
            .filter(|_| w > 0 && h > 0)
            .map(|(x, y)| (x / w as f32, y / h as f32));
        PointerInput {
            pos,
            pressed: self.window.get_mouse_down(MouseButton::Left),
            scroll: self.window.get_scroll_wheel().map_or(0.0, |(_, dy)| dy),
        }
    }
}

/* ---------- Software drawing: pixels, crosshair, tiny bitmap font ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
pub fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Draw a thin line between (x0,y0) and (x1,y1) using Bresenham.
fn draw_line(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (mut x0, mut y0, x1, y1) = (x0, y0, x1, y1);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        put_pixel(fb, x0, y0, color);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Draw a small crosshair centered at (cx,cy).
/// Visual: a "+" shape with a tiny gap at the center.
pub fn draw_crosshair(fb: &mut FrameBuffer, cx: i32, cy: i32, size: i32, color: u32) {
    draw_line(fb, cx - size, cy, cx - 2, cy, color);
    draw_line(fb, cx + 2, cy, cx + size, cy, color);
    draw_line(fb, cx, cy - size, cx, cy - 2, color);
    draw_line(fb, cx, cy + 2, cx, cy + size, color);
    put_pixel(fb, cx, cy, color);
}

/* ---------- 5x7 bitmap font (uppercase ASCII subset used by the HUD) ---------- */

/// Return a 5x7 glyph bitmap. Lowercase input is drawn as uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y) with a 1-pixel black shadow.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (offset, c) in [(1, 0x00000000), (0, color)] {
            for (ry, rowbits) in rows.iter().enumerate() {
                for rx in 0..5 {
                    if (rowbits & (1 << (4 - rx))) != 0 {
                        put_pixel(fb, x + rx as i32 + offset, y + ry as i32 + offset, c);
                    }
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs (5 px glyph + 1 px spacing).
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_pixel_ignores_out_of_bounds() {
        let mut fb = FrameBuffer::new(4, 4);
        put_pixel(&mut fb, -1, 0, 0xFFFFFF);
        put_pixel(&mut fb, 4, 0, 0xFFFFFF);
        put_pixel(&mut fb, 0, 4, 0xFFFFFF);
        assert!(fb.pixels.iter().all(|&p| p == 0));
        put_pixel(&mut fb, 3, 3, 0xABCDEF);
        assert_eq!(fb.pixels[15], 0xABCDEF);
    }

    #[test]
    fn hud_strings_have_glyphs() {
        for text in ["HEART RING BURST", "SCALE PINCH TRACKING IDLE FPS: 0.9", "LMB WHEEL ESC QUIT -"] {
            for ch in text.chars() {
                assert!(glyph5x7(ch).is_some(), "missing glyph {ch:?}");
            }
        }
    }

    #[test]
    fn crosshair_leaves_gap_around_center() {
        let mut fb = FrameBuffer::new(32, 32);
        draw_crosshair(&mut fb, 16, 16, 6, 0x00FF00);
        assert_eq!(fb.pixels[16 * 32 + 16], 0x00FF00);
        assert_eq!(fb.pixels[16 * 32 + 17], 0);
        assert_eq!(fb.pixels[16 * 32 + 22], 0x00FF00);
    }
}
