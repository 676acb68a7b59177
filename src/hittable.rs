//! Ray-object intersection system.
//!
//! Defines the Hittable trait for geometric primitives, HitRecord for
//! intersection data, the linear-scan scene aggregate and the normal
//! flipping wrapper.

use std::sync::Arc;

use glam::Vec3A;

use crate::aabb::Aabb;
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Ray-object intersection information.
///
/// Contains intersection point, surface normal, distance, texture
/// coordinates and the material encountered. Lives only for the duration of
/// one intersection query.
#[derive(Clone)]
pub struct HitRecord {
    /// Point where the ray intersects the object
    pub p: Vec3A,
    /// Surface normal at the intersection point (unit vector, always
    /// pointing against the incident ray)
    pub normal: Vec3A,
    /// Distance along the ray to the intersection point
    pub t: f32,
    /// Surface parametrization coordinate u in [0, 1]
    pub u: f32,
    /// Surface parametrization coordinate v in [0, 1]
    pub v: f32,
    /// True if ray hits the front face, false if hits the back face
    pub front_face: bool,
    /// Material of the object at the hit point
    pub material: Arc<Material>,
}

impl HitRecord {
    /// Build a record from an outward normal, orienting the stored normal
    /// against the incident ray and remembering which face was hit.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        r: &Ray,
        p: Vec3A,
        outward_normal: Vec3A,
        t: f32,
        u: f32,
        v: f32,
        material: Arc<Material>,
    ) -> Self {
        let front_face = r.direction.dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };
        Self {
            p,
            normal,
            t,
            u,
            v,
            front_face,
            material,
        }
    }
}

/// Trait for objects that can be intersected by rays.
///
/// Core abstraction for geometric primitives. Must be thread-safe
/// (Sync + Send) for the parallel render loop.
pub trait Hittable: Sync + Send {
    /// Test for ray intersection within the given parameter range.
    ///
    /// Returns the closest hit strictly inside the range, if any.
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord>;

    /// Box enclosing the object over the given time span.
    fn bounding_box(&self, time: Interval) -> Aabb;
}

/// Collection of objects forming a scene.
///
/// Uses linear search for intersection testing. Supports polymorphic
/// objects through Box<dyn Hittable>.
pub struct HittableList {
    /// Vector of boxed hittable objects
    pub objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the scene.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest_so_far = ray_t.max;
        let mut hit_anything = None;

        // Test each object, narrowing the range to the best hit so far
        for object in &self.objects {
            if let Some(rec) = object.hit(r, Interval::new(ray_t.min, closest_so_far)) {
                closest_so_far = rec.t;
                hit_anything = Some(rec);
            }
        }

        hit_anything
    }

    fn bounding_box(&self, time: Interval) -> Aabb {
        self.objects
            .iter()
            .fold(Aabb::EMPTY, |acc, object| {
                Aabb::surrounding(&acc, &object.bounding_box(time))
            })
    }
}

/// Wrapper that inverts the orientation of a child object's surface.
///
/// Delegates intersection, then negates the reported normal and flips the
/// front-face flag. Used for light panels and walls that should face the
/// opposite way.
pub struct FlipNormals {
    object: Box<dyn Hittable>,
}

impl FlipNormals {
    /// Wrap an object, flipping its normals.
    pub fn new(object: Box<dyn Hittable>) -> Self {
        Self { object }
    }
}

impl Hittable for FlipNormals {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        self.object.hit(r, ray_t).map(|mut rec| {
            rec.normal = -rec.normal;
            rec.front_face = !rec.front_face;
            rec
        })
    }

    fn bounding_box(&self, time: Interval) -> Aabb {
        self.object.bounding_box(time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::Material;
    use crate::sphere::Sphere;

    fn gray() -> Arc<Material> {
        Arc::new(Material::lambertian_color(Vec3A::splat(0.5)))
    }

    fn shutter() -> Interval {
        Interval::new(0.0, 1.0)
    }

    #[test]
    fn list_returns_closest_hit() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Vec3A::new(0.0, 0.0, -10.0), 1.0, gray())));
        world.add(Box::new(Sphere::new(Vec3A::new(0.0, 0.0, -5.0), 1.0, gray())));

        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0), 0.0);
        let rec = world.hit(&r, Interval::new(0.001, f32::INFINITY)).unwrap();
        assert!((rec.t - 4.0).abs() < 1e-4);
    }

    #[test]
    fn list_misses_cleanly() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Vec3A::new(0.0, 0.0, -5.0), 1.0, gray())));

        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0), 0.0);
        assert!(world.hit(&r, Interval::new(0.001, f32::INFINITY)).is_none());
    }

    #[test]
    fn list_bounding_box_encloses_members() {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Vec3A::new(-3.0, 0.0, 0.0), 1.0, gray())));
        world.add(Box::new(Sphere::new(Vec3A::new(3.0, 0.0, 0.0), 1.0, gray())));

        let bbox = world.bounding_box(shutter());
        assert_eq!(bbox.min().x, -4.0);
        assert_eq!(bbox.max().x, 4.0);
    }

    #[test]
    fn flip_normals_negates_normal() {
        let sphere = Sphere::new(Vec3A::new(0.0, 0.0, -5.0), 1.0, gray());
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0), 0.0);

        let plain = sphere.hit(&r, Interval::new(0.001, f32::INFINITY)).unwrap();
        let flipped = FlipNormals::new(Box::new(Sphere::new(
            Vec3A::new(0.0, 0.0, -5.0),
            1.0,
            gray(),
        )))
        .hit(&r, Interval::new(0.001, f32::INFINITY))
        .unwrap();

        assert!((plain.normal + flipped.normal).length() < 1e-6);
        assert_eq!(plain.front_face, !flipped.front_face);
        assert_eq!(plain.t, flipped.t);
    }
}
