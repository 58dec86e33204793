//! Spatial primitives: axis-aligned boxes, rays, and view-space helpers
//!
//! Everything in the arena is an axis-aligned box, so the only queries the
//! simulation needs are box/box overlap and ray/box entry distance.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// An axis-aligned bounding box stored as center + half extents
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl Aabb {
    pub fn new(center: Vec3, half_extents: Vec3) -> Self {
        Self {
            center,
            half_extents: half_extents.abs(),
        }
    }

    /// Build a box from its full size rather than half size
    pub fn from_size(center: Vec3, size: Vec3) -> Self {
        Self::new(center, size * 0.5)
    }

    #[inline]
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }

    /// Strict overlap test; boxes that only touch faces do not overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_min, a_max) = (self.min(), self.max());
        let (b_min, b_max) = (other.min(), other.max());
        a_min.x < b_max.x
            && a_max.x > b_min.x
            && a_min.y < b_max.y
            && a_max.y > b_min.y
            && a_min.z < b_max.z
            && a_max.z > b_min.z
    }

    /// Distance along `ray` where it enters this box, if it does.
    ///
    /// A ray starting inside the box reports distance 0.
    pub fn ray_entry(&self, ray: &Ray) -> Option<f32> {
        ray_aabb_intersection(ray.origin, ray.dir, self.min(), self.max())
    }
}

/// A half-line with a unit direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Always normalized
    pub dir: Vec3,
}

impl Ray {
    /// Create a ray; returns `None` for a degenerate (zero-length) direction
    pub fn new(origin: Vec3, dir: Vec3) -> Option<Self> {
        let dir = dir.try_normalize()?;
        Some(Self { origin, dir })
    }

    /// Ray from `from` aimed at `to`, plus the distance between them
    pub fn between(from: Vec3, to: Vec3) -> Option<(Self, f32)> {
        let delta = to - from;
        let dist = delta.length();
        Self::new(from, delta).map(|ray| (ray, dist))
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// Slab test for a ray against a box given by its corners
fn ray_aabb_intersection(origin: Vec3, dir: Vec3, aabb_min: Vec3, aabb_max: Vec3) -> Option<f32> {
    let mut tmin = 0.0_f32;
    let mut tmax = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = dir[axis];
        let min = aabb_min[axis];
        let max = aabb_max[axis];

        if d.abs() < 1e-8 {
            // Parallel to this slab: must already be inside it
            if o < min || o > max {
                return None;
            }
            continue;
        }

        let inv_d = 1.0 / d;
        let mut t1 = (min - o) * inv_d;
        let mut t2 = (max - o) * inv_d;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }

        tmin = tmin.max(t1);
        tmax = tmax.min(t2);

        if tmin > tmax {
            return None;
        }
    }

    Some(tmin)
}

/// Unit view direction for a yaw/pitch pair (yaw 0 looks down -Z)
pub fn view_direction(yaw: f32, pitch: f32) -> Vec3 {
    let (sy, cy) = yaw.sin_cos();
    let (sp, cp) = pitch.sin_cos();
    Vec3::new(-sy * cp, sp, -cy * cp)
}

/// Horizontal forward axis for a yaw
#[inline]
pub fn forward_axis(yaw: f32) -> Vec3 {
    let (s, c) = yaw.sin_cos();
    Vec3::new(-s, 0.0, -c)
}

/// Horizontal right axis for a yaw
#[inline]
pub fn right_axis(yaw: f32) -> Vec3 {
    let (s, c) = yaw.sin_cos();
    Vec3::new(c, 0.0, -s)
}
