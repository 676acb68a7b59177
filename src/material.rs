//! Material system for ray tracing.
//!
//! Implements four material types: Lambertian (diffuse, with a choice of
//! sampling strategy), Metal (specular with roughness), Dielectric
//! (transparent) and DiffuseLight (emissive, non-scattering). Closed enum
//! dispatched by match.

use std::sync::Arc;

use glam::Vec3A;
use rand::{Rng, RngCore};

use crate::hittable::HitRecord;
use crate::onb::Onb;
use crate::random;
use crate::ray::Ray;
use crate::texture::Texture;

/// RGB color type using Vec3A for SIMD optimization.
pub type Color = Vec3A;

/// How a Lambertian surface draws its outgoing direction.
#[derive(Debug, Clone, Copy)]
pub enum DiffuseSampling {
    /// Normal plus a uniform point inside the unit ball
    UniformSphere,
    /// Cosine-weighted hemisphere draw through an orthonormal basis,
    /// reported with its density so the integrator can divide it out
    CosineHemisphere,
}

/// Result of a scattering event.
pub struct Scatter {
    /// Reflectance weight applied to the light carried back along the
    /// scattered ray
    pub attenuation: Color,
    /// The outgoing ray
    pub scattered: Ray,
    /// Density of the sampled direction, present only when the material
    /// drew it from a known distribution
    pub pdf: Option<f32>,
}

/// Material types for ray tracing.
///
/// Surface behavior over a hit: scattering, emission, and the sampling
/// density of drawn directions.
pub enum Material {
    /// Lambertian diffuse material for matte surfaces.
    Lambertian {
        /// Surface reflectance field.
        albedo: Arc<Texture>,
        /// Direction sampling strategy.
        sampling: DiffuseSampling,
    },

    /// Metallic material with specular reflection.
    Metal {
        /// Metal color.
        albedo: Color,
        /// Surface roughness (0.0 = mirror, 1.0 = rough).
        fuzz: f32,
    },

    /// Dielectric (transparent) material with refraction.
    Dielectric {
        /// Index of refraction (1.0 = air, 1.5 = glass, etc.).
        refraction_index: f32,
    },

    /// Emissive surface that never scatters.
    DiffuseLight {
        /// Emitted radiance field.
        emit: Arc<Texture>,
    },
}

impl Material {
    /// Diffuse material over a texture, sampled with the unit-ball offset.
    pub fn lambertian(albedo: Arc<Texture>) -> Self {
        Self::Lambertian {
            albedo,
            sampling: DiffuseSampling::UniformSphere,
        }
    }

    /// Diffuse material over a constant color.
    pub fn lambertian_color(albedo: Color) -> Self {
        Self::lambertian(Arc::new(Texture::solid(albedo)))
    }

    /// Diffuse material drawing cosine-weighted directions and reporting
    /// their density.
    pub fn lambertian_cosine(albedo: Arc<Texture>) -> Self {
        Self::Lambertian {
            albedo,
            sampling: DiffuseSampling::CosineHemisphere,
        }
    }

    /// Light source emitting a constant radiance.
    pub fn light_color(emit: Color) -> Self {
        Self::DiffuseLight {
            emit: Arc::new(Texture::solid(emit)),
        }
    }

    /// Compute ray scattering for this material.
    ///
    /// Returns the scattered ray with its reflectance weight, or None if the
    /// ray was absorbed.
    pub fn scatter(&self, r_in: &Ray, rec: &HitRecord, rng: &mut dyn RngCore) -> Option<Scatter> {
        match self {
            Material::Lambertian { albedo, sampling } => {
                scatter_lambertian(albedo, *sampling, r_in, rec, rng)
            }
            Material::Metal { albedo, fuzz } => scatter_metal(*albedo, *fuzz, r_in, rec, rng),
            Material::Dielectric { refraction_index } => {
                scatter_dielectric(*refraction_index, r_in, rec, rng)
            }
            // Lights don't scatter rays
            Material::DiffuseLight { .. } => None,
        }
    }

    /// Density with which this material would have scattered into the given
    /// direction.
    ///
    /// Strictly positive whenever the scattering event can actually produce
    /// the direction; zero for directions the material never emits.
    pub fn scattering_pdf(&self, rec: &HitRecord, scattered: &Ray) -> f32 {
        match self {
            Material::Lambertian { .. } => {
                let cosine = rec.normal.dot(scattered.direction.normalize());
                (cosine / std::f32::consts::PI).max(0.0)
            }
            _ => 0.0,
        }
    }

    /// Radiance emitted by the surface itself. Zero for all non-emissive
    /// materials.
    pub fn emitted(&self, u: f32, v: f32, p: Vec3A) -> Color {
        match self {
            Material::DiffuseLight { emit } => emit.value(u, v, p),
            _ => Color::ZERO,
        }
    }
}

/// Lambertian diffuse scattering.
///
/// The uniform variant offsets the normal by a point inside the unit ball;
/// the cosine variant draws through an orthonormal basis aligned to the
/// normal and reports the cos(theta)/pi density of the draw.
fn scatter_lambertian(
    albedo: &Arc<Texture>,
    sampling: DiffuseSampling,
    r_in: &Ray,
    rec: &HitRecord,
    rng: &mut dyn RngCore,
) -> Option<Scatter> {
    let attenuation = albedo.value(rec.u, rec.v, rec.p);

    match sampling {
        DiffuseSampling::UniformSphere => {
            let mut scatter_direction = rec.normal + random::random_in_unit_sphere(rng);

            // Catch degenerate scatter direction (very close to zero)
            if scatter_direction.length_squared() < 1e-8 {
                scatter_direction = rec.normal;
            }

            Some(Scatter {
                attenuation,
                scattered: Ray::new(rec.p, scatter_direction, r_in.time),
                pdf: None,
            })
        }
        DiffuseSampling::CosineHemisphere => {
            let onb = Onb::from_w(rec.normal);
            let direction = onb.local(random::random_cosine_direction(rng)).normalize();
            let pdf = onb.w().dot(direction) / std::f32::consts::PI;

            Some(Scatter {
                attenuation,
                scattered: Ray::new(rec.p, direction, r_in.time),
                pdf: Some(pdf),
            })
        }
    }
}

/// Metallic reflection with optional surface roughness.
fn scatter_metal(
    albedo: Color,
    fuzz: f32,
    r_in: &Ray,
    rec: &HitRecord,
    rng: &mut dyn RngCore,
) -> Option<Scatter> {
    let reflected = reflect(r_in.direction.normalize(), rec.normal);
    let scattered_direction = reflected + fuzz.min(1.0) * random::random_in_unit_sphere(rng);

    // A perturbed reflection pointing into the surface is absorbed
    if scattered_direction.dot(rec.normal) <= 0.0 {
        return None;
    }

    Some(Scatter {
        attenuation: albedo,
        scattered: Ray::new(rec.p, scattered_direction, r_in.time),
        pdf: None,
    })
}

/// Dielectric scattering: refract when Snell's law allows it, otherwise
/// reflect; among refractable hits, reflect with the Schlick probability.
fn scatter_dielectric(
    refraction_index: f32,
    r_in: &Ray,
    rec: &HitRecord,
    rng: &mut dyn RngCore,
) -> Option<Scatter> {
    let ri = if rec.front_face {
        1.0 / refraction_index
    } else {
        refraction_index
    };

    let unit_direction = r_in.direction.normalize();
    let cos_theta = (-unit_direction).dot(rec.normal).min(1.0);

    let direction = match refract(unit_direction, rec.normal, ri) {
        Some(refracted) if rng.random::<f32>() >= reflectance(cos_theta, ri) => refracted,
        // Total internal reflection, or the Schlick draw chose reflection
        _ => reflect(unit_direction, rec.normal),
    };

    Some(Scatter {
        // Glass doesn't attenuate light
        attenuation: Color::ONE,
        scattered: Ray::new(rec.p, direction, r_in.time),
        pdf: None,
    })
}

/// Reflect a vector off a surface using the law of reflection.
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Refract a vector through an interface using Snell's law.
///
/// Returns None when the refracted direction does not exist (total internal
/// reflection).
pub fn refract(uv: Vec3A, n: Vec3A, etai_over_etat: f32) -> Option<Vec3A> {
    let cos_theta = (-uv).dot(n).min(1.0);
    let r_out_perp = etai_over_etat * (uv + cos_theta * n);
    let k = 1.0 - r_out_perp.length_squared();
    if k <= 0.0 {
        return None;
    }
    Some(r_out_perp - k.sqrt() * n)
}

/// Compute Fresnel reflectance using Schlick's approximation.
fn reflectance(cosine: f32, refraction_index: f32) -> f32 {
    let r0 = (1.0 - refraction_index) / (1.0 + refraction_index);
    let r0 = r0 * r0;
    r0 + (1.0 - r0) * (1.0 - cosine).powi(5)
}
