//! Axis-aligned rectangle geometry on the pixel grid
//!
//! Every simulated object is a box centered on an integer cell. A box of
//! width `w` centered on `x` covers the half-open span `[x - w/2, x - w/2 + w)`,
//! the same footprint a sprite of that size drawn centered on its cell has.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An integer rectangle described by its center cell and full size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    pub center: IVec2,
    pub size: IVec2,
}

impl Rect {
    pub const fn new(center: IVec2, size: IVec2) -> Self {
        Self { center, size }
    }

    /// Build a rectangle from its top-left corner, the way walls are authored
    pub fn from_corner(x: i32, y: i32, width: i32, height: i32) -> Self {
        let size = IVec2::new(width, height);
        Self {
            center: IVec2::new(x, y) + size / 2,
            size,
        }
    }

    /// Inclusive top-left cell
    #[inline]
    pub fn min(&self) -> IVec2 {
        self.center - self.half_extents()
    }

    /// Exclusive bottom-right cell
    #[inline]
    pub fn max(&self) -> IVec2 {
        self.min() + self.size
    }

    /// Half extents (rounded down for odd sizes)
    #[inline]
    pub fn half_extents(&self) -> IVec2 {
        self.size / 2
    }

    /// True when both dimensions are strictly positive
    pub fn has_area(&self) -> bool {
        self.size.x > 0 && self.size.y > 0
    }
}

/// Strict overlap test: shared edges do not count.
#[inline]
pub fn intersects(a: &Rect, b: &Rect) -> bool {
    let (a_min, a_max) = (a.min(), a.max());
    let (b_min, b_max) = (b.min(), b.max());
    a_min.x < b_max.x && b_min.x < a_max.x && a_min.y < b_max.y && b_min.y < a_max.y
}

/// The playable cell grid `[0, width-1] x [0, height-1]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldBounds {
    pub width: i32,
    pub height: i32,
}

impl WorldBounds {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Largest valid cell
    #[inline]
    pub fn last_cell(&self) -> IVec2 {
        IVec2::new(self.width - 1, self.height - 1)
    }

    /// Range of centers that keep a box of `size` inside the grid
    #[inline]
    pub fn center_range(&self, size: IVec2) -> (IVec2, IVec2) {
        let lo = size / 2;
        let hi = IVec2::new(self.width, self.height) - size + lo;
        (lo, hi.max(lo))
    }

    /// Clamp a box center so the whole box stays inside the grid. Idempotent.
    #[inline]
    pub fn clamp_box(&self, pos: IVec2, size: IVec2) -> IVec2 {
        let (lo, hi) = self.center_range(size);
        pos.clamp(lo, hi)
    }

    pub fn contains(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    /// True when every cell of `rect` is inside the grid
    pub fn contains_rect(&self, rect: &Rect) -> bool {
        let (min, max) = (rect.min(), rect.max());
        min.x >= 0 && min.y >= 0 && max.x <= self.width && max.y <= self.height
    }

    /// True when a box touches (or crosses) any outer edge
    pub fn at_edge(&self, rect: &Rect) -> bool {
        self.near_edge(rect, 0)
    }

    /// True when a box comes within `margin` cells of any edge
    pub fn near_edge(&self, rect: &Rect, margin: i32) -> bool {
        let (min, max) = (rect.min(), rect.max());
        min.x <= margin
            || min.y <= margin
            || max.x >= self.width - margin
            || max.y >= self.height - margin
    }
}
