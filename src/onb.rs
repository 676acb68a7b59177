//! Orthonormal basis for oriented sampling.
//!
//! Used by the importance-sampled diffuse material to transform directions
//! drawn around +Z into the frame of a surface normal.

use glam::Vec3A;

/// Right-handed orthonormal frame with `w` along a chosen direction.
#[derive(Debug, Clone, Copy)]
pub struct Onb {
    u: Vec3A,
    v: Vec3A,
    w: Vec3A,
}

impl Onb {
    /// Build a frame whose `w` axis points along `n`.
    ///
    /// The helper axis is picked away from `w` so the cross product never
    /// degenerates.
    pub fn from_w(n: Vec3A) -> Self {
        let w = n.normalize();
        let a = if w.x.abs() > 0.9 {
            Vec3A::new(0.0, 1.0, 0.0)
        } else {
            Vec3A::new(1.0, 0.0, 0.0)
        };
        let v = w.cross(a).normalize();
        let u = w.cross(v);
        Self { u, v, w }
    }

    /// Frame axis aligned with the construction direction.
    pub fn w(&self) -> Vec3A {
        self.w
    }

    /// Transform a vector from local (u,v,w) coordinates into world space.
    pub fn local(&self, a: Vec3A) -> Vec3A {
        a.x * self.u + a.y * self.v + a.z * self.w
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: f32, b: f32) {
        assert!((a - b).abs() < 1e-5, "{a} vs {b}");
    }

    #[test]
    fn axes_are_orthonormal() {
        for n in [
            Vec3A::new(0.0, 1.0, 0.0),
            Vec3A::new(1.0, 0.0, 0.0),
            Vec3A::new(-3.0, 2.0, 0.5),
        ] {
            let onb = Onb::from_w(n);
            assert_close(onb.u.length(), 1.0);
            assert_close(onb.v.length(), 1.0);
            assert_close(onb.w.length(), 1.0);
            assert_close(onb.u.dot(onb.v), 0.0);
            assert_close(onb.u.dot(onb.w), 0.0);
            assert_close(onb.v.dot(onb.w), 0.0);
        }
    }

    #[test]
    fn local_maps_z_to_w() {
        let onb = Onb::from_w(Vec3A::new(0.0, 1.0, 0.0));
        let mapped = onb.local(Vec3A::new(0.0, 0.0, 1.0));
        assert!((mapped - onb.w()).length() < 1e-5);
    }
}
