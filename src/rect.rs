//! Axis-aligned rectangle primitives.
//!
//! One variant per axis pair. A rectangle lives in the plane where its fixed
//! axis equals k, bounded by two ranges on the remaining axes. Rays parallel
//! to the plane produce a non-finite crossing parameter which fails the
//! range test, so they report no hit.

use std::sync::Arc;

use glam::Vec3A;

use crate::aabb::Aabb;
use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Half-thickness used to keep rectangle bounding boxes non-degenerate.
const PAD: f32 = 0.0001;

/// Rectangle in the z = k plane, spanning [x0,x1] x [y0,y1].
pub struct XyRect {
    /// Lower x bound
    pub x0: f32,
    /// Upper x bound
    pub x1: f32,
    /// Lower y bound
    pub y0: f32,
    /// Upper y bound
    pub y1: f32,
    /// Fixed z coordinate of the plane
    pub k: f32,
    /// Material properties determining light interaction.
    pub material: Arc<Material>,
}

impl XyRect {
    /// Create a rectangle in the z = k plane.
    pub fn new(x0: f32, x1: f32, y0: f32, y1: f32, k: f32, material: Arc<Material>) -> Self {
        Self {
            x0,
            x1,
            y0,
            y1,
            k,
            material,
        }
    }
}

impl Hittable for XyRect {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let t = (self.k - r.origin.z) / r.direction.z;
        if !ray_t.surrounds(t) {
            return None;
        }

        let x = r.origin.x + t * r.direction.x;
        let y = r.origin.y + t * r.direction.y;
        if x < self.x0 || x > self.x1 || y < self.y0 || y > self.y1 {
            return None;
        }

        let u = (x - self.x0) / (self.x1 - self.x0);
        let v = (y - self.y0) / (self.y1 - self.y0);
        Some(HitRecord::new(
            r,
            r.at(t),
            Vec3A::new(0.0, 0.0, 1.0),
            t,
            u,
            v,
            Arc::clone(&self.material),
        ))
    }

    fn bounding_box(&self, _time: Interval) -> Aabb {
        Aabb::from_points(
            Vec3A::new(self.x0, self.y0, self.k - PAD),
            Vec3A::new(self.x1, self.y1, self.k + PAD),
        )
    }
}

/// Rectangle in the y = k plane, spanning [x0,x1] x [z0,z1].
pub struct XzRect {
    /// Lower x bound
    pub x0: f32,
    /// Upper x bound
    pub x1: f32,
    /// Lower z bound
    pub z0: f32,
    /// Upper z bound
    pub z1: f32,
    /// Fixed y coordinate of the plane
    pub k: f32,
    /// Material properties determining light interaction.
    pub material: Arc<Material>,
}

impl XzRect {
    /// Create a rectangle in the y = k plane.
    pub fn new(x0: f32, x1: f32, z0: f32, z1: f32, k: f32, material: Arc<Material>) -> Self {
        Self {
            x0,
            x1,
            z0,
            z1,
            k,
            material,
        }
    }
}

impl Hittable for XzRect {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let t = (self.k - r.origin.y) / r.direction.y;
        if !ray_t.surrounds(t) {
            return None;
        }

        let x = r.origin.x + t * r.direction.x;
        let z = r.origin.z + t * r.direction.z;
        if x < self.x0 || x > self.x1 || z < self.z0 || z > self.z1 {
            return None;
        }

        let u = (x - self.x0) / (self.x1 - self.x0);
        let v = (z - self.z0) / (self.z1 - self.z0);
        Some(HitRecord::new(
            r,
            r.at(t),
            Vec3A::new(0.0, 1.0, 0.0),
            t,
            u,
            v,
            Arc::clone(&self.material),
        ))
    }

    fn bounding_box(&self, _time: Interval) -> Aabb {
        Aabb::from_points(
            Vec3A::new(self.x0, self.k - PAD, self.z0),
            Vec3A::new(self.x1, self.k + PAD, self.z1),
        )
    }
}

/// Rectangle in the x = k plane, spanning [y0,y1] x [z0,z1].
pub struct YzRect {
    /// Lower y bound
    pub y0: f32,
    /// Upper y bound
    pub y1: f32,
    /// Lower z bound
    pub z0: f32,
    /// Upper z bound
    pub z1: f32,
    /// Fixed x coordinate of the plane
    pub k: f32,
    /// Material properties determining light interaction.
    pub material: Arc<Material>,
}

impl YzRect {
    /// Create a rectangle in the x = k plane.
    pub fn new(y0: f32, y1: f32, z0: f32, z1: f32, k: f32, material: Arc<Material>) -> Self {
        Self {
            y0,
            y1,
            z0,
            z1,
            k,
            material,
        }
    }
}

impl Hittable for YzRect {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let t = (self.k - r.origin.x) / r.direction.x;
        if !ray_t.surrounds(t) {
            return None;
        }

        let y = r.origin.y + t * r.direction.y;
        let z = r.origin.z + t * r.direction.z;
        if y < self.y0 || y > self.y1 || z < self.z0 || z > self.z1 {
            return None;
        }

        let u = (y - self.y0) / (self.y1 - self.y0);
        let v = (z - self.z0) / (self.z1 - self.z0);
        Some(HitRecord::new(
            r,
            r.at(t),
            Vec3A::new(1.0, 0.0, 0.0),
            t,
            u,
            v,
            Arc::clone(&self.material),
        ))
    }

    fn bounding_box(&self, _time: Interval) -> Aabb {
        Aabb::from_points(
            Vec3A::new(self.k - PAD, self.y0, self.z0),
            Vec3A::new(self.k + PAD, self.y1, self.z1),
        )
    }
}
