// Color applicator + the two color sources (mode base colors, pinch colors).
// Components are NOT clamped here; the renderer clamps when it encodes pixels.

use crate::particles::ParticleBuffer;
use crate::shapes::Shape;

/// Write the same rgb triple into every particle's color slot.
pub fn apply_uniform(buf: &mut ParticleBuffer, r: f32, g: f32, b: f32) {
    for rgb in buf.colors_mut().chunks_exact_mut(3) {
        rgb[0] = r;
        rgb[1] = g;
        rgb[2] = b;
    }
}

/// Color a shape is painted with right after it is generated.
pub fn base_color(shape: Shape) -> [f32; 3] {
    match shape {
        Shape::Heart => [1.0, 0.2, 0.4],
        Shape::Ring => [1.0, 0.8, 0.35],
        Shape::Burst => [0.35, 0.75, 1.0],
    }
}

/// Continuous color driven by pinch distance: red when pinched, green when open.
/// Leaves [0,1] for pinch > 0.5.
pub fn pinch_color(pinch: f32) -> [f32; 3] {
    [1.0 - pinch * 2.0, pinch * 2.0, 0.8]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_uniform_fills_every_slot() {
        let mut buf = ParticleBuffer::allocate(100);
        apply_uniform(&mut buf, 0.1, 0.2, 0.3);
        for i in 0..buf.len() {
            assert_eq!(buf.color(i), [0.1, 0.2, 0.3]);
        }
    }

    #[test]
    fn apply_uniform_keeps_out_of_range_values() {
        let mut buf = ParticleBuffer::allocate(4);
        apply_uniform(&mut buf, -0.5, 1.7, 0.8);
        assert_eq!(buf.color(3), [-0.5, 1.7, 0.8]);
    }

    #[test]
    fn pinch_color_is_unclamped() {
        assert_eq!(pinch_color(0.0), [1.0, 0.0, 0.8]);
        let wide = pinch_color(0.9);
        assert!(wide[0] < 0.0);
        assert!(wide[1] > 1.0);
    }

    #[test]
    fn each_shape_has_a_distinct_base_color() {
        assert_ne!(base_color(Shape::Heart), base_color(Shape::Ring));
        assert_ne!(base_color(Shape::Ring), base_color(Shape::Burst));
        assert_eq!(base_color(Shape::Heart), [1.0, 0.2, 0.4]);
    }
}
