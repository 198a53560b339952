// Three-state rotation Heart -> Ring -> Burst -> Heart, advanced by pinch triggers.

use crate::shapes::Shape;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ModeCycle {
    mode: usize, // always in 0..3
}

impl ModeCycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Step to the next mode (mod 3) and return it.
    pub fn advance(&mut self) -> usize {
        self.mode = (self.mode + 1) % Shape::ALL.len();
        self.mode
    }

    pub fn current(&self) -> usize {
        self.mode
    }

    pub fn shape(&self) -> Shape {
        Shape::from_index(self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_advances_wrap_to_zero() {
        let mut m = ModeCycle::new();
        assert_eq!(m.current(), 0);
        assert_eq!(m.advance(), 1);
        assert_eq!(m.advance(), 2);
        assert_eq!(m.advance(), 0);
    }

    #[test]
    fn current_does_not_mutate() {
        let mut m = ModeCycle::new();
        m.advance();
        assert_eq!(m.current(), 1);
        assert_eq!(m.current(), 1);
        assert_eq!(m.shape(), Shape::Ring);
    }
}
