//! Axis-aligned bounding boxes.
//!
//! Every primitive reports a box enclosing it over a time span. No spatial
//! acceleration structure is built on top of these yet; the query itself is
//! the contract each primitive must satisfy.

use glam::Vec3A;

use crate::interval::Interval;
use crate::ray::Ray;

/// Axis-aligned bounding box described by one interval per axis.
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    /// Extent along the X axis
    pub x: Interval,
    /// Extent along the Y axis
    pub y: Interval,
    /// Extent along the Z axis
    pub z: Interval,
}

impl Aabb {
    /// Create an AABB from two corner points, in any order.
    pub fn from_points(a: Vec3A, b: Vec3A) -> Self {
        Self {
            x: Interval::new(a.x.min(b.x), a.x.max(b.x)),
            y: Interval::new(a.y.min(b.y), a.y.max(b.y)),
            z: Interval::new(a.z.min(b.z), a.z.max(b.z)),
        }
    }

    /// Create an AABB that encloses two other boxes.
    pub fn surrounding(a: &Aabb, b: &Aabb) -> Self {
        Self {
            x: Interval::surrounding(a.x, b.x),
            y: Interval::surrounding(a.y, b.y),
            z: Interval::surrounding(a.z, b.z),
        }
    }

    /// Minimum corner of the box.
    pub fn min(&self) -> Vec3A {
        Vec3A::new(self.x.min, self.y.min, self.z.min)
    }

    /// Maximum corner of the box.
    pub fn max(&self) -> Vec3A {
        Vec3A::new(self.x.max, self.y.max, self.z.max)
    }

    /// Test if a ray passes through this box within the given parameter range.
    ///
    /// Slab method: intersect the ray's parameter range against the three
    /// axis slabs, shrinking it as we go.
    pub fn hit(&self, r: &Ray, mut ray_t: Interval) -> bool {
        for axis in 0..3 {
            let slab = match axis {
                0 => self.x,
                1 => self.y,
                _ => self.z,
            };
            let adinv = 1.0 / r.direction[axis];
            let mut t0 = (slab.min - r.origin[axis]) * adinv;
            let mut t1 = (slab.max - r.origin[axis]) * adinv;
            if adinv < 0.0 {
                std::mem::swap(&mut t0, &mut t1);
            }
            ray_t.min = t0.max(ray_t.min);
            ray_t.max = t1.min(ray_t.max);
            if ray_t.max <= ray_t.min {
                return false;
            }
        }
        true
    }

    /// Box containing nothing.
    pub const EMPTY: Aabb = Aabb {
        x: Interval::EMPTY,
        y: Interval::EMPTY,
        z: Interval::EMPTY,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_orders_corners() {
        let aabb = Aabb::from_points(Vec3A::new(10.0, 0.0, 5.0), Vec3A::new(0.0, 10.0, -5.0));
        assert_eq!(aabb.min(), Vec3A::new(0.0, 0.0, -5.0));
        assert_eq!(aabb.max(), Vec3A::new(10.0, 10.0, 5.0));
    }

    #[test]
    fn surrounding_encloses_both() {
        let a = Aabb::from_points(Vec3A::ZERO, Vec3A::splat(5.0));
        let b = Aabb::from_points(Vec3A::splat(3.0), Vec3A::splat(10.0));
        let merged = Aabb::surrounding(&a, &b);
        assert_eq!(merged.min(), Vec3A::ZERO);
        assert_eq!(merged.max(), Vec3A::splat(10.0));
    }

    #[test]
    fn slab_hit() {
        let aabb = Aabb::from_points(Vec3A::splat(-1.0), Vec3A::splat(1.0));

        // Ray pointing at the center
        let r = Ray::new(Vec3A::new(0.0, 0.0, -5.0), Vec3A::new(0.0, 0.0, 1.0), 0.0);
        assert!(aabb.hit(&r, Interval::new(0.0, 100.0)));

        // Ray pointing away
        let r = Ray::new(Vec3A::new(0.0, 0.0, -5.0), Vec3A::new(0.0, 0.0, -1.0), 0.0);
        assert!(!aabb.hit(&r, Interval::new(0.0, 100.0)));

        // Ray missing the box
        let r = Ray::new(Vec3A::new(10.0, 0.0, 0.0), Vec3A::new(0.0, 0.0, 1.0), 0.0);
        assert!(!aabb.hit(&r, Interval::new(0.0, 100.0)));
    }
}
