//! Window and monitor geometry.
use serde::{Deserialize, Serialize};

/// A rectangle, x and y from the top left.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Xyhw {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl Xyhw {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn right(&self) -> i32 {
        self.x + self.w
    }

    pub const fn bottom(&self) -> i32 {
        self.y + self.h
    }

    #[must_use]
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_half_open() {
        let area = Xyhw::new(10, 20, 100, 50);
        assert!(area.contains_point(10, 20));
        assert!(area.contains_point(109, 69));
        assert!(!area.contains_point(110, 20));
        assert!(!area.contains_point(10, 70));
        assert_eq!(area.right(), 110);
        assert_eq!(area.bottom(), 70);
    }
}
