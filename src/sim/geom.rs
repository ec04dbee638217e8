//! Axis-aligned bounding boxes
//!
//! Every combat entity is a center point plus half extents. The arena is
//! just another box that entities get clamped into.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{ARENA_HEIGHT, ARENA_WIDTH};

/// An axis-aligned rectangle stored as center + half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half_extents: size * 0.5,
        }
    }

    /// Box from its top-left corner, the way screen layouts are written
    pub fn from_min_size(min: Vec2, size: Vec2) -> Self {
        Self::from_center_size(min + size * 0.5, size)
    }

    /// The 800x800 play area
    pub fn arena() -> Self {
        Self::from_center_size(
            Vec2::new(ARENA_WIDTH / 2.0, ARENA_HEIGHT / 2.0),
            Vec2::new(ARENA_WIDTH, ARENA_HEIGHT),
        )
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    /// Overlap test. Touching edges do not count as a hit.
    pub fn intersects(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half_extents + other.half_extents;
        d.x < reach.x && d.y < reach.y
    }

    /// Half-open containment: the max edges are outside
    pub fn contains_point(&self, p: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        p.x >= min.x && p.y >= min.y && p.x < max.x && p.y < max.y
    }

    /// Clamp a center point so a box of these half extents stays inside `region`.
    ///
    /// On an axis where the box is wider than the region it gets centered instead.
    pub fn clamp_center(center: Vec2, half_extents: Vec2, region: &Aabb) -> Vec2 {
        let lo = region.min() + half_extents;
        let hi = region.max() - half_extents;
        let axis = |c: f32, lo: f32, hi: f32, mid: f32| if lo > hi { mid } else { c.clamp(lo, hi) };
        Vec2::new(
            axis(center.x, lo.x, hi.x, region.center.x),
            axis(center.y, lo.y, hi.y, region.center.y),
        )
    }

    /// Move this box so it lies inside `region`
    pub fn clamp_inside(&mut self, region: &Aabb) {
        self.center = Self::clamp_center(self.center, self.half_extents, region);
    }

    /// Which walls of `region` this box pokes through, as (x, y) flags
    pub fn escapes(&self, region: &Aabb) -> (bool, bool) {
        let min = self.min();
        let max = self.max();
        let rmin = region.min();
        let rmax = region.max();
        (
            min.x < rmin.x || max.x > rmax.x,
            min.y < rmin.y || max.y > rmax.y,
        )
    }
}
