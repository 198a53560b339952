// Fixed-size particle storage: flat xyz positions and rgb colors, 3 floats each.
// The renderer reads these slices directly; the dirty flag tells it when to
// re-encode the colors it caches.

use glam::Vec3;

pub struct ParticleBuffer {
    count: usize,
    positions: Vec<f32>, // len = count * 3
    colors: Vec<f32>,    // len = count * 3
    dirty: bool,
}

impl ParticleBuffer {
    /// Zero-initialized buffer with `count` position/color slots.
    /// The length never changes afterwards; only contents do.
    pub fn allocate(count: usize) -> Self {
        Self {
            count,
            positions: vec![0.0; count * 3],
            colors: vec![0.0; count * 3],
            dirty: false,
        }
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Contents changed; the renderer must refresh before the next draw.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Read and clear the dirty flag (the renderer's "upload" step).
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    #[inline]
    pub fn position(&self, i: usize) -> Vec3 {
        Vec3::from_slice(&self.positions[i * 3..i * 3 + 3])
    }

    #[inline]
    pub fn set_position(&mut self, i: usize, p: Vec3) {
        p.write_to_slice(&mut self.positions[i * 3..i * 3 + 3]);
    }

    #[inline]
    pub fn color(&self, i: usize) -> [f32; 3] {
        [self.colors[i * 3], self.colors[i * 3 + 1], self.colors[i * 3 + 2]]
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        &self.colors
    }

    pub(crate) fn colors_mut(&mut self) -> &mut [f32] {
        &mut self.colors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_is_zeroed_and_sized() {
        let buf = ParticleBuffer::allocate(10);
        assert_eq!(buf.len(), 10);
        assert_eq!(buf.positions().len(), 30);
        assert_eq!(buf.colors().len(), 30);
        assert!(buf.positions().iter().all(|&v| v == 0.0));
        assert!(buf.colors().iter().all(|&v| v == 0.0));
        assert!(!buf.is_dirty());
    }

    #[test]
    fn take_dirty_clears_flag() {
        let mut buf = ParticleBuffer::allocate(1);
        buf.mark_dirty();
        assert!(buf.take_dirty());
        assert!(!buf.take_dirty());
    }

    #[test]
    fn set_position_writes_one_slot() {
        let mut buf = ParticleBuffer::allocate(3);
        buf.set_position(1, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(buf.position(1), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(buf.position(0), Vec3::ZERO);
        assert_eq!(buf.position(2), Vec3::ZERO);
    }
}
