//! Camera for ray generation and scene rendering.

use glam::Vec3A;
use image::{ImageBuffer, Rgb};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;
use rand::RngCore;
use rayon::prelude::*;

use crate::hittable::Hittable;
use crate::interval::Interval;
use crate::random;
use crate::ray::Ray;

/// RGB color type using Vec3A for SIMD optimization.
type Color = Vec3A;

/// Radiance returned by rays that leave the scene.
#[derive(Debug, Clone, Copy)]
pub enum Background {
    /// Vertical white-to-blue gradient driven by the ray direction
    Sky,
    /// A constant radiance, black for enclosed emissive scenes
    Solid(Vec3A),
}

impl Background {
    /// Background radiance for a ray that hit nothing.
    fn color(&self, r: &Ray) -> Color {
        match self {
            Background::Sky => {
                let unit_direction = r.direction.normalize();
                // Blend factor from the Y component: -1 (down) gives a = 0,
                // +1 (up) gives a = 1
                let a = 0.5 * (unit_direction.y + 1.0);
                (1.0 - a) * Color::new(1.0, 1.0, 1.0) + a * Color::new(0.5, 0.7, 1.0)
            }
            Background::Solid(c) => *c,
        }
    }
}

/// Camera for ray generation and scene rendering.
///
/// Uses a pinhole camera model with support for depth of field, a shutter
/// interval for motion blur, and anti-aliasing via multi-sampling.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Rendered image width in pixel count
    pub image_width: u32,
    /// Rendered image height in pixel count
    pub image_height: u32,
    /// Number of random samples for each pixel (for anti-aliasing)
    pub samples_per_pixel: u32,
    /// Maximum number of ray bounces (recursion depth limit)
    pub max_depth: u32,
    /// Vertical field of view in degrees (default: 90)
    pub vfov: f32,
    /// Point camera is looking from (camera position)
    pub lookfrom: Vec3A,
    /// Point camera is looking at (look target)
    pub lookat: Vec3A,
    /// Camera-relative "up" direction vector
    pub vup: Vec3A,
    /// Variation angle of rays through each pixel (defocus blur control)
    pub defocus_angle: f32,
    /// Distance from camera lookfrom point to plane of perfect focus
    pub focus_dist: f32,
    /// Shutter open time
    pub time0: f32,
    /// Shutter close time
    pub time1: f32,
    /// Radiance for rays that leave the scene
    pub background: Background,
    /// Base seed for the per-pixel random streams; the same seed always
    /// reproduces the same image
    pub seed: u64,

    /// Camera position in world space (same as lookfrom)
    center: Vec3A,
    /// World position of the top-left pixel (pixel 0,0)
    pixel00_loc: Vec3A,
    /// Offset vector from pixel to pixel horizontally (right direction)
    pixel_delta_u: Vec3A,
    /// Offset vector from pixel to pixel vertically (down direction)
    pixel_delta_v: Vec3A,
    /// Color scale factor for a sum of pixel samples (1.0 / samples_per_pixel)
    pixel_samples_scale: f32,
    /// Camera frame basis vector pointing right (u)
    u: Vec3A,
    /// Camera frame basis vector pointing up (v)
    v: Vec3A,
    /// Camera frame basis vector pointing opposite view direction (w)
    w: Vec3A,
    /// Defocus disk horizontal radius vector
    defocus_disk_u: Vec3A,
    /// Defocus disk vertical radius vector
    defocus_disk_v: Vec3A,
    /// Flag to track whether camera parameters have been calculated
    initialized: bool,
}

impl Camera {
    /// Creates a new camera with default settings.
    ///
    /// Default: 100x100 image, 50 samples per pixel, 90 degree FOV, no
    /// defocus blur, instantaneous shutter, sky background.
    pub fn new() -> Self {
        Self {
            image_width: 100,
            image_height: 100,
            samples_per_pixel: 50,
            max_depth: 50,
            vfov: 90.0,
            lookfrom: Vec3A::new(0.0, 0.0, 0.0),
            lookat: Vec3A::new(0.0, 0.0, -1.0),
            vup: Vec3A::new(0.0, 1.0, 0.0),
            defocus_angle: 0.0,
            focus_dist: 10.0,
            time0: 0.0,
            time1: 0.0,
            background: Background::Sky,
            seed: 0,
            center: Vec3A::ZERO,
            pixel00_loc: Vec3A::ZERO,
            pixel_delta_u: Vec3A::ZERO,
            pixel_delta_v: Vec3A::ZERO,
            pixel_samples_scale: 0.1,
            u: Vec3A::ZERO,
            v: Vec3A::ZERO,
            w: Vec3A::ZERO,
            defocus_disk_u: Vec3A::ZERO,
            defocus_disk_v: Vec3A::ZERO,
            initialized: false,
        }
    }

    /// Renders the scene using CPU path tracing.
    ///
    /// Generates rays through each pixel, traces them through the scene,
    /// and accumulates color samples. Pixels render in parallel, each
    /// consuming its own deterministic random stream.
    ///
    /// Returns an HDR image buffer with linear f32 RGB values.
    pub fn render(&mut self, world: &dyn Hittable) -> ImageBuffer<Rgb<f32>, Vec<f32>> {
        self.initialize();
        let cam = &*self;

        let mut image: ImageBuffer<Rgb<f32>, Vec<f32>> =
            ImageBuffer::new(cam.image_width, cam.image_height);

        info!(
            "Generating image using {} CPU cores...",
            rayon::current_num_threads()
        );
        let generation_start = std::time::Instant::now();
        let pb = ProgressBar::new((cam.image_width * cam.image_height) as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{bar:40} {pos}/{len} ETA: {eta}")
                .unwrap(),
        );

        // Parallel pixel processing using Rayon with anti-aliasing
        image.enumerate_pixels_mut().par_bridge().for_each(|(i, j, pixel)| {
            let mut rng = random::pixel_stream(cam.seed, (j * cam.image_width + i) as u64);
            let mut pixel_color = Color::ZERO;

            // Sample multiple rays per pixel for anti-aliasing
            for _sample in 0..cam.samples_per_pixel {
                let r = cam.get_ray(i, j, &mut rng);
                pixel_color += cam.ray_color(&r, world, cam.max_depth, &mut rng);
            }

            // Average the samples
            pixel_color *= cam.pixel_samples_scale;
            *pixel = Rgb([pixel_color.x, pixel_color.y, pixel_color.z]);
            pb.inc(1);
        });

        pb.finish();
        let generation_time = generation_start.elapsed();
        info!("Image generated in {:.2?}", generation_time);

        image
    }

    /// Initialize camera parameters based on current settings.
    ///
    /// Sets up the camera coordinate system and viewport for ray generation.
    /// Automatically called by render().
    fn initialize(&mut self) {
        if self.initialized {
            return;
        }

        self.image_height = if self.image_height < 1 { 1 } else { self.image_height };

        self.pixel_samples_scale = 1.0 / self.samples_per_pixel as f32;

        // Set camera center to lookfrom position
        self.center = self.lookfrom;

        // Determine viewport dimensions
        let theta = self.vfov.to_radians();
        let h = (theta / 2.0).tan();
        let viewport_height = 2.0 * h * self.focus_dist;
        let viewport_width =
            viewport_height * (self.image_width as f32 / self.image_height as f32);

        // Calculate the u,v,w unit basis vectors for the camera coordinate frame
        self.w = (self.lookfrom - self.lookat).normalize(); // Points opposite view direction
        self.u = self.vup.cross(self.w).normalize(); // Points to camera right
        self.v = self.w.cross(self.u); // Points to camera up

        // Calculate the vectors across the horizontal and down the vertical viewport edges
        let viewport_u = viewport_width * self.u; // Vector across viewport horizontal edge
        let viewport_v = viewport_height * -self.v; // Vector down viewport vertical edge

        // Calculate the horizontal and vertical delta vectors from pixel to pixel
        self.pixel_delta_u = viewport_u / self.image_width as f32;
        self.pixel_delta_v = viewport_v / self.image_height as f32;

        // Calculate the location of the upper left pixel
        let viewport_upper_left =
            self.center - (self.focus_dist * self.w) - viewport_u / 2.0 - viewport_v / 2.0;
        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);

        // Calculate the camera defocus disk basis vectors
        let defocus_radius = self.focus_dist * (self.defocus_angle.to_radians() / 2.0).tan();
        self.defocus_disk_u = self.u * defocus_radius;
        self.defocus_disk_v = self.v * defocus_radius;

        self.initialized = true;
    }

    /// Generate a ray through a pixel with random sampling.
    ///
    /// Jitters the image-plane coordinate within the pixel footprint,
    /// optionally samples the defocus disk for depth-of-field blur, and
    /// draws the ray time from the shutter interval.
    fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);
        let pixel_sample = self.pixel00_loc
            + ((i as f32 + offset.x) * self.pixel_delta_u)
            + ((j as f32 + offset.y) * self.pixel_delta_v);

        let ray_origin = if self.defocus_angle <= 0.0 {
            self.center
        } else {
            self.defocus_disk_sample(rng)
        };
        let ray_direction = pixel_sample - ray_origin;
        let ray_time = if self.time1 > self.time0 {
            random::random_range(rng, self.time0, self.time1)
        } else {
            self.time0
        };

        Ray::new(ray_origin, ray_direction, ray_time)
    }

    /// Sample random point on the defocus disk for depth-of-field blur.
    fn defocus_disk_sample(&self, rng: &mut dyn RngCore) -> Vec3A {
        let p = random::random_in_unit_disk(rng);
        self.center + (p.x * self.defocus_disk_u) + (p.y * self.defocus_disk_v)
    }

    /// Trace a ray and compute its radiance.
    ///
    /// Recursively follows ray bounces through the scene. Each hit
    /// contributes its own emission plus the attenuated radiance arriving
    /// along the scattered ray; when the material drew its direction from a
    /// known density, the contribution is weighted by scattering_pdf / pdf
    /// to keep the estimator unbiased. Rays that hit nothing return the
    /// background term; reaching the bounce cutoff returns emission alone.
    pub fn ray_color(
        &self,
        r: &Ray,
        world: &dyn Hittable,
        depth: u32,
        rng: &mut dyn RngCore,
    ) -> Color {
        // The lower bound avoids self-intersection at the origin of a
        // just-scattered ray
        match world.hit(r, Interval::new(0.001, f32::INFINITY)) {
            Some(rec) => {
                let emitted = rec.material.emitted(rec.u, rec.v, rec.p);

                // Ray bounce limit reached: no more light is gathered
                if depth == 0 {
                    return emitted;
                }

                match rec.material.scatter(r, &rec, rng) {
                    Some(scatter) => {
                        let incoming = self.ray_color(&scatter.scattered, world, depth - 1, rng);
                        let weight = match scatter.pdf {
                            Some(pdf) => {
                                scatter.attenuation
                                    * rec.material.scattering_pdf(&rec, &scatter.scattered)
                                    / pdf
                            }
                            None => scatter.attenuation,
                        };
                        emitted + weight * incoming
                    }
                    None => emitted,
                }
            }
            None => self.background.color(r),
        }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate random offset within [-0.5, 0.5] square for pixel sampling.
fn sample_square(rng: &mut dyn RngCore) -> Vec3A {
    use rand::Rng;
    Vec3A::new(rng.random::<f32>() - 0.5, rng.random::<f32>() - 0.5, 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hittable::HittableList;
    use crate::material::Material;
    use crate::sphere::Sphere;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::sync::Arc;

    /// A scene that scatters every ray forever: the camera sits inside a
    /// huge diffuse sphere.
    fn enclosing_diffuse_world() -> HittableList {
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(
            Vec3A::ZERO,
            1000.0,
            Arc::new(Material::lambertian_color(Vec3A::splat(0.5))),
        )));
        world
    }

    #[test]
    fn exhausted_depth_returns_emitted_term_only() {
        let camera = Camera::new();
        let world = enclosing_diffuse_world();
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 0.0, -1.0), 0.0);

        // Lambertian surfaces emit nothing, so the cutoff yields black
        let mut rng = ChaCha20Rng::seed_from_u64(31);
        assert_eq!(camera.ray_color(&r, &world, 0, &mut rng), Vec3A::ZERO);

        // An emissive enclosure yields exactly its emission at the cutoff
        let mut world = HittableList::new();
        let glow = Vec3A::new(2.0, 3.0, 4.0);
        world.add(Box::new(Sphere::new(
            Vec3A::ZERO,
            1000.0,
            Arc::new(Material::light_color(glow)),
        )));
        assert_eq!(camera.ray_color(&r, &world, 0, &mut rng), glow);
        assert_eq!(camera.ray_color(&r, &world, 50, &mut rng), glow);
    }

    #[test]
    fn miss_returns_background() {
        let camera = Camera::new();
        let world = HittableList::new();
        let mut rng = ChaCha20Rng::seed_from_u64(32);

        // Sky gradient: straight up blends fully to blue
        let r = Ray::new(Vec3A::ZERO, Vec3A::new(0.0, 1.0, 0.0), 0.0);
        let c = camera.ray_color(&r, &world, 50, &mut rng);
        assert!((c - Vec3A::new(0.5, 0.7, 1.0)).length() < 1e-5);

        // Solid background returns its constant
        let mut camera = Camera::new();
        camera.background = Background::Solid(Vec3A::ZERO);
        let c = camera.ray_color(&r, &world, 50, &mut rng);
        assert_eq!(c, Vec3A::ZERO);
    }

    #[test]
    fn render_is_reproducible_for_a_fixed_seed() {
        // Two small spheres with the camera aimed between them
        let mut world = HittableList::new();
        let gray = Arc::new(Material::lambertian_color(Vec3A::splat(0.5)));
        world.add(Box::new(Sphere::new(
            Vec3A::new(-3.0, 0.0, -5.0),
            1.0,
            Arc::clone(&gray),
        )));
        world.add(Box::new(Sphere::new(Vec3A::new(3.0, 0.0, -5.0), 1.0, gray)));

        let mut camera = Camera::new();
        camera.image_width = 2;
        camera.image_height = 2;
        camera.samples_per_pixel = 1;
        camera.seed = 7;

        let first = camera.clone().render(&world);
        let second = camera.render(&world);
        assert_eq!(first.as_raw(), second.as_raw());

        // The encoded output reproduces byte for byte
        assert_eq!(
            crate::output::ppm_string(&first),
            crate::output::ppm_string(&second)
        );
    }
}
