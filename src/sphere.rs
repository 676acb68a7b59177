//! Sphere primitives.
//!
//! Implements efficient ray-sphere intersection using an optimized quadratic
//! formula, for both static spheres and spheres whose center moves linearly
//! during the shutter interval.

use std::sync::Arc;

use glam::Vec3A;

use crate::aabb::Aabb;
use crate::hittable::{HitRecord, Hittable};
use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;

/// Sphere primitive defined by center, radius, and material.
pub struct Sphere {
    /// Center point of the sphere in world coordinates.
    pub center: Vec3A,

    /// Radius of the sphere (always non-negative).
    ///
    /// Negative radius values are clamped to 0.0 in the constructor.
    pub radius: f32,

    /// Material properties determining light interaction.
    pub material: Arc<Material>,
}

impl Sphere {
    /// Create a new sphere.
    ///
    /// Negative radius values are clamped to 0.0.
    pub fn new(center: Vec3A, radius: f32, material: Arc<Material>) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
            material,
        }
    }
}

/// Map a point on the unit sphere to (u, v) surface coordinates.
///
/// u wraps around the Y axis from the -X meridian, v runs pole to pole.
fn sphere_uv(p: Vec3A) -> (f32, f32) {
    use std::f32::consts::PI;
    let phi = p.z.atan2(p.x);
    let theta = p.y.asin();
    let u = 1.0 - (phi + PI) / (2.0 * PI);
    let v = (theta + PI / 2.0) / PI;
    (u, v)
}

/// Solve the sphere quadratic and build a hit record for the nearest root
/// strictly inside the range.
///
/// Uses the half-b form: a = D.D, h = D.(C-O), c = |C-O|^2 - r^2, with
/// discriminant h^2 - a*c. The nearer root always wins.
fn hit_sphere(
    r: &Ray,
    center: Vec3A,
    radius: f32,
    material: &Arc<Material>,
    ray_t: Interval,
) -> Option<HitRecord> {
    let oc = center - r.origin;
    let a = r.direction.length_squared();
    let h = r.direction.dot(oc);
    let c = oc.length_squared() - radius * radius;

    let discriminant = h * h - a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrtd = discriminant.sqrt();

    // Find the nearest root that lies in the acceptable range
    let mut root = (h - sqrtd) / a;
    if !ray_t.surrounds(root) {
        root = (h + sqrtd) / a;
        if !ray_t.surrounds(root) {
            return None;
        }
    }

    let p = r.at(root);
    let outward_normal = (p - center) / radius;
    let (u, v) = sphere_uv(outward_normal);
    Some(HitRecord::new(
        r,
        p,
        outward_normal,
        root,
        u,
        v,
        Arc::clone(material),
    ))
}

impl Hittable for Sphere {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        hit_sphere(r, self.center, self.radius, &self.material, ray_t)
    }

    fn bounding_box(&self, _time: Interval) -> Aabb {
        let rvec = Vec3A::splat(self.radius);
        Aabb::from_points(self.center - rvec, self.center + rvec)
    }
}

/// Sphere whose center moves linearly between two points over a time span.
///
/// The center is interpolated by the ray's time, giving motion blur when the
/// camera jitters ray times across the shutter interval.
pub struct MovingSphere {
    /// Center at the start of the motion span
    pub center0: Vec3A,
    /// Center at the end of the motion span
    pub center1: Vec3A,
    /// Start of the motion span
    pub time0: f32,
    /// End of the motion span
    pub time1: f32,
    /// Radius of the sphere
    pub radius: f32,
    /// Material properties determining light interaction.
    pub material: Arc<Material>,
}

impl MovingSphere {
    /// Create a sphere moving from center0 at time0 to center1 at time1.
    pub fn new(
        center0: Vec3A,
        center1: Vec3A,
        time0: f32,
        time1: f32,
        radius: f32,
        material: Arc<Material>,
    ) -> Self {
        Self {
            center0,
            center1,
            time0,
            time1,
            radius: radius.max(0.0),
            material,
        }
    }

    /// Center position at the given time.
    pub fn center(&self, time: f32) -> Vec3A {
        self.center0
            + ((time - self.time0) / (self.time1 - self.time0)) * (self.center1 - self.center0)
    }
}

impl Hittable for MovingSphere {
    fn hit(&self, r: &Ray, ray_t: Interval) -> Option<HitRecord> {
        hit_sphere(r, self.center(r.time), self.radius, &self.material, ray_t)
    }

    fn bounding_box(&self, time: Interval) -> Aabb {
        let rvec = Vec3A::splat(self.radius);
        let box0 = Aabb::from_points(self.center(time.min) - rvec, self.center(time.min) + rvec);
        let box1 = Aabb::from_points(self.center(time.max) - rvec, self.center(time.max) + rvec);
        Aabb::surrounding(&box0, &box1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray() -> Arc<Material> {
        Arc::new(Material::lambertian_color(Vec3A::splat(0.5)))
    }

    fn full_range() -> Interval {
        Interval::new(0.0, f32::INFINITY)
    }

    #[test]
    fn roots_are_symmetric_about_center_projection() {
        // Origin outside the sphere, aimed at its center: the center projects
        // onto the ray at t = 5, so the two roots are 5 -+ radius.
        let sphere = Sphere::new(Vec3A::new(0.0, 0.0, -5.0), 1.0, gray());
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0), 0.0);

        let near = sphere.hit(&r, full_range()).unwrap();
        assert!((near.t - 4.0).abs() < 1e-4);

        // Excluding the near root exposes the far one
        let far = sphere.hit(&r, Interval::new(4.5, f32::INFINITY)).unwrap();
        assert!((far.t - 6.0).abs() < 1e-4);

        assert!(((near.t + far.t) / 2.0 - 5.0).abs() < 1e-4);
    }

    #[test]
    fn both_roots_outside_range_is_a_miss() {
        let sphere = Sphere::new(Vec3A::new(0.0, 0.0, -5.0), 1.0, gray());
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0), 0.0);
        assert!(sphere.hit(&r, Interval::new(0.0, 3.0)).is_none());
        assert!(sphere.hit(&r, Interval::new(7.0, 100.0)).is_none());
    }

    #[test]
    fn normals_are_unit_length_and_face_the_ray() {
        let sphere = Sphere::new(Vec3A::new(0.0, 0.0, -5.0), 1.0, gray());
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0), 0.0);
        let rec = sphere.hit(&r, full_range()).unwrap();
        assert!((rec.normal.length() - 1.0).abs() < 1e-5);
        assert!(rec.normal.dot(r.direction) < 0.0);
        assert!(rec.front_face);

        // From inside the sphere the stored normal still faces the ray
        let r = Ray::new(Vec3A::new(0.0, 0.0, -5.0), Vec3A::new(0.0, 0.0, -1.0), 0.0);
        let rec = sphere.hit(&r, full_range()).unwrap();
        assert!((rec.normal.length() - 1.0).abs() < 1e-5);
        assert!(rec.normal.dot(r.direction) < 0.0);
        assert!(!rec.front_face);
    }

    #[test]
    fn uv_covers_the_poles_and_equator() {
        let (u, v) = sphere_uv(Vec3A::new(0.0, 1.0, 0.0));
        assert!((v - 1.0).abs() < 1e-5);
        assert!((0.0..=1.0).contains(&u));

        let (u, v) = sphere_uv(Vec3A::new(0.0, -1.0, 0.0));
        assert!(v.abs() < 1e-5);
        assert!((0.0..=1.0).contains(&u));

        let (_, v) = sphere_uv(Vec3A::new(1.0, 0.0, 0.0));
        assert!((v - 0.5).abs() < 1e-5);
    }

    #[test]
    fn moving_sphere_follows_ray_time() {
        let sphere = MovingSphere::new(
            Vec3A::new(-2.0, 0.0, -5.0),
            Vec3A::new(2.0, 0.0, -5.0),
            0.0,
            1.0,
            1.0,
            gray(),
        );

        // At t=0 the sphere sits at x=-2: a ray down -Z at x=0 misses
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0), 0.0);
        assert!(sphere.hit(&r, full_range()).is_none());

        // At shutter midpoint the center crosses x=0 and the same ray hits
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0), 0.5);
        let rec = sphere.hit(&r, full_range()).unwrap();
        assert!((rec.t - 4.0).abs() < 1e-4);
    }

    #[test]
    fn moving_sphere_box_spans_both_endpoints() {
        let sphere = MovingSphere::new(
            Vec3A::new(-2.0, 0.0, 0.0),
            Vec3A::new(2.0, 0.0, 0.0),
            0.0,
            1.0,
            1.0,
            gray(),
        );
        let bbox = sphere.bounding_box(Interval::new(0.0, 1.0));
        assert_eq!(bbox.min().x, -3.0);
        assert_eq!(bbox.max().x, 3.0);
    }
}
