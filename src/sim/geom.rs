//! Axis-aligned boxes in screen space
//!
//! Origin is the top-left corner and +y points down, so `bottom() > top()`.
//! Anchor setters move the box without resizing it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(center: Vec2, size: (f32, f32)) -> Self {
        Self::new(center.x - size.0 / 2.0, center.y - size.1 / 2.0, size.0, size.1)
    }

    pub fn from_midbottom(midbottom: Vec2, size: (f32, f32)) -> Self {
        Self::new(midbottom.x - size.0 / 2.0, midbottom.y - size.1, size.0, size.1)
    }

    pub fn from_midtop(midtop: Vec2, size: (f32, f32)) -> Self {
        Self::new(midtop.x - size.0 / 2.0, midtop.y, size.0, size.1)
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    #[inline]
    pub fn midbottom(&self) -> Vec2 {
        Vec2::new(self.x + self.w / 2.0, self.bottom())
    }

    pub fn set_left(&mut self, left: f32) {
        self.x = left;
    }

    pub fn set_right(&mut self, right: f32) {
        self.x = right - self.w;
    }

    pub fn set_top(&mut self, top: f32) {
        self.y = top;
    }

    pub fn set_bottom(&mut self, bottom: f32) {
        self.y = bottom - self.h;
    }

    pub fn set_center(&mut self, center: Vec2) {
        self.x = center.x - self.w / 2.0;
        self.y = center.y - self.h / 2.0;
    }

    pub fn set_midbottom(&mut self, midbottom: Vec2) {
        self.x = midbottom.x - self.w / 2.0;
        self.y = midbottom.y - self.h;
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Same center, size changed by `(dw, dh)` in total (negative shrinks)
    pub fn inflate(&self, dw: f32, dh: f32) -> Self {
        Self::new(self.x - dw / 2.0, self.y - dh / 2.0, self.w + dw, self.h + dh)
    }

    /// Same center, new size
    pub fn resized(&self, size: (f32, f32)) -> Self {
        Self::from_center(self.center(), size)
    }

    /// Strict overlap: boxes that only share an edge do not overlap
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && self.right() > other.left()
            && self.top() < other.bottom()
            && self.bottom() > other.top()
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchors() {
        let r = Rect::from_midbottom(Vec2::new(100.0, 680.0), (48.0, 72.0));
        assert_eq!(r.left(), 76.0);
        assert_eq!(r.right(), 124.0);
        assert_eq!(r.top(), 608.0);
        assert_eq!(r.bottom(), 680.0);
        assert_eq!(r.center(), Vec2::new(100.0, 644.0));
    }

    #[test]
    fn test_overlap_is_strict() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let touching = Rect::new(10.0, 0.0, 10.0, 10.0);
        let inside = Rect::new(5.0, 5.0, 2.0, 2.0);
        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(inside.overlaps(&a));
    }

    #[test]
    fn test_inflate_keeps_center() {
        let r = Rect::new(10.0, 20.0, 48.0, 72.0);
        let shrunk = r.inflate(-16.0, -12.0);
        assert_eq!(shrunk.center(), r.center());
        assert_eq!(shrunk.w, 32.0);
        assert_eq!(shrunk.h, 60.0);
        assert!(r.inflate(-60.0, 0.0).is_empty());
    }

    #[test]
    fn test_setters_preserve_size() {
        let mut r = Rect::new(0.0, 0.0, 20.0, 10.0);
        r.set_bottom(100.0);
        assert_eq!(r.top(), 90.0);
        r.set_right(50.0);
        assert_eq!(r.left(), 30.0);
        r.set_midbottom(Vec2::new(0.0, 0.0));
        assert_eq!((r.w, r.h), (20.0, 10.0));
        assert_eq!(r.center(), Vec2::new(0.0, -5.0));
    }
}
