use std::sync::Arc;

use clap::Parser;
use glam::Vec3A;
use log::info;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;

mod cli;
mod logger;

use cli::{Args, SceneKind};
use logger::init_logger;
use lumapath::camera::{Background, Camera};
use lumapath::hittable::{FlipNormals, HittableList};
use lumapath::material::Material;
use lumapath::montecarlo;
use lumapath::output::{save_image_as_png, save_image_as_ppm};
use lumapath::random;
use lumapath::rect::{XyRect, XzRect, YzRect};
use lumapath::sphere::{MovingSphere, Sphere};
use lumapath::texture::{NoiseStyle, Texture};

/// Create the cover scene: random small spheres over a checkered ground,
/// the diffuse ones bouncing during the shutter interval.
fn cover_scene(rng: &mut ChaCha20Rng) -> (HittableList, Camera) {
    let mut world = HittableList::new();

    // Checkered ground sphere
    let checker = Arc::new(Texture::checker_colors(
        Vec3A::new(0.9, 0.9, 0.9),
        Vec3A::new(0.2, 0.3, 0.1),
    ));
    let ground_material = Arc::new(Material::lambertian(checker));
    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, -1000.0, 0.0),
        1000.0,
        ground_material,
    )));

    // Generate 22x22 grid of small spheres
    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random::random_range(rng, 0.0, 1.0);
            let center = Vec3A::new(
                a as f32 + 0.9 * random::random_range(rng, 0.0, 1.0),
                0.2,
                b as f32 + 0.9 * random::random_range(rng, 0.0, 1.0),
            );

            // Don't place spheres too close to the large feature spheres
            if (center - Vec3A::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            if choose_mat < 0.8 {
                // Diffuse spheres drift upward while the shutter is open
                let albedo = random::random_color(rng) * random::random_color(rng);
                let material = Arc::new(Material::lambertian_color(albedo));
                let center1 = center + Vec3A::new(0.0, random::random_range(rng, 0.0, 0.5), 0.0);
                world.add(Box::new(MovingSphere::new(
                    center, center1, 0.0, 1.0, 0.2, material,
                )));
            } else if choose_mat < 0.95 {
                let albedo = random::random_color_range(rng, 0.5, 1.0);
                let fuzz = random::random_range(rng, 0.0, 0.5);
                let material = Arc::new(Material::Metal { albedo, fuzz });
                world.add(Box::new(Sphere::new(center, 0.2, material)));
            } else {
                let material = Arc::new(Material::Dielectric {
                    refraction_index: 1.5,
                });
                world.add(Box::new(Sphere::new(center, 0.2, material)));
            }
        }
    }

    // Three large feature spheres
    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::Dielectric {
            refraction_index: 1.5,
        }),
    )));
    world.add(Box::new(Sphere::new(
        Vec3A::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::lambertian_color(Vec3A::new(0.4, 0.2, 0.1))),
    )));
    world.add(Box::new(Sphere::new(
        Vec3A::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Material::Metal {
            albedo: Vec3A::new(0.7, 0.6, 0.5),
            fuzz: 0.0,
        }),
    )));

    let mut camera = Camera::new();
    camera.vfov = 20.0;
    camera.lookfrom = Vec3A::new(13.0, 2.0, 3.0);
    camera.lookat = Vec3A::new(0.0, 0.0, 0.0);
    camera.vup = Vec3A::new(0.0, 1.0, 0.0);
    camera.defocus_angle = 0.6;
    camera.focus_dist = 10.0;
    camera.time0 = 0.0;
    camera.time1 = 1.0;

    (world, camera)
}

/// Two large checkered spheres facing each other.
fn checker_scene() -> (HittableList, Camera) {
    let mut world = HittableList::new();
    let checker = Arc::new(Texture::checker_colors(
        Vec3A::new(0.9, 0.9, 0.9),
        Vec3A::new(0.2, 0.3, 0.1),
    ));

    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, -10.0, 0.0),
        10.0,
        Arc::new(Material::lambertian(Arc::clone(&checker))),
    )));
    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, 10.0, 0.0),
        10.0,
        Arc::new(Material::lambertian(checker)),
    )));

    let mut camera = Camera::new();
    camera.vfov = 20.0;
    camera.lookfrom = Vec3A::new(13.0, 2.0, 3.0);
    camera.lookat = Vec3A::ZERO;

    (world, camera)
}

/// Marble-noise ground and sphere under the sky.
fn perlin_scene(rng: &mut ChaCha20Rng) -> (HittableList, Camera) {
    let mut world = HittableList::new();
    let marble = Arc::new(Texture::noise(rng, 4.0, NoiseStyle::Marble));

    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Material::lambertian(Arc::clone(&marble))),
    )));
    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, 2.0, 0.0),
        2.0,
        Arc::new(Material::lambertian(marble)),
    )));

    let mut camera = Camera::new();
    camera.vfov = 20.0;
    camera.lookfrom = Vec3A::new(13.0, 2.0, 3.0);
    camera.lookat = Vec3A::ZERO;

    (world, camera)
}

/// A globe wrapped in an image texture.
fn earth_scene(texture_path: &str) -> (HittableList, Camera) {
    let mut world = HittableList::new();
    let earth = Arc::new(Texture::image(texture_path));
    world.add(Box::new(Sphere::new(
        Vec3A::ZERO,
        2.0,
        Arc::new(Material::lambertian(earth)),
    )));

    let mut camera = Camera::new();
    camera.vfov = 20.0;
    camera.lookfrom = Vec3A::new(13.0, 2.0, 3.0);
    camera.lookat = Vec3A::ZERO;

    (world, camera)
}

/// Marble spheres lit by a rectangular lamp and a glowing sphere, in the
/// dark.
fn light_scene(rng: &mut ChaCha20Rng) -> (HittableList, Camera) {
    let mut world = HittableList::new();
    let marble = Arc::new(Texture::noise(rng, 4.0, NoiseStyle::Marble));

    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Material::lambertian(Arc::clone(&marble))),
    )));
    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, 2.0, 0.0),
        2.0,
        Arc::new(Material::lambertian(marble)),
    )));

    let lamp = Arc::new(Material::light_color(Vec3A::new(4.0, 4.0, 4.0)));
    world.add(Box::new(Sphere::new(
        Vec3A::new(0.0, 7.0, 0.0),
        2.0,
        Arc::clone(&lamp),
    )));
    world.add(Box::new(XyRect::new(3.0, 5.0, 1.0, 3.0, -2.0, lamp)));

    let mut camera = Camera::new();
    camera.vfov = 20.0;
    camera.lookfrom = Vec3A::new(26.0, 3.0, 6.0);
    camera.lookat = Vec3A::new(0.0, 2.0, 0.0);
    camera.background = Background::Solid(Vec3A::ZERO);

    (world, camera)
}

/// Empty Cornell-style box with a ceiling light.
///
/// The diffuse walls use the cosine-weighted sampling path; walls facing
/// into the box are wrapped to flip their normals inward.
fn cornell_scene() -> (HittableList, Camera) {
    let mut world = HittableList::new();

    let red = Arc::new(Material::lambertian_cosine(Arc::new(Texture::solid(
        Vec3A::new(0.65, 0.05, 0.05),
    ))));
    let white = Arc::new(Material::lambertian_cosine(Arc::new(Texture::solid(
        Vec3A::new(0.73, 0.73, 0.73),
    ))));
    let green = Arc::new(Material::lambertian_cosine(Arc::new(Texture::solid(
        Vec3A::new(0.12, 0.45, 0.15),
    ))));
    let light = Arc::new(Material::light_color(Vec3A::new(15.0, 15.0, 15.0)));

    world.add(Box::new(FlipNormals::new(Box::new(YzRect::new(
        0.0, 555.0, 0.0, 555.0, 555.0, green,
    )))));
    world.add(Box::new(YzRect::new(0.0, 555.0, 0.0, 555.0, 0.0, red)));
    world.add(Box::new(FlipNormals::new(Box::new(XzRect::new(
        213.0, 343.0, 227.0, 332.0, 554.0, light,
    )))));
    world.add(Box::new(FlipNormals::new(Box::new(XzRect::new(
        0.0,
        555.0,
        0.0,
        555.0,
        555.0,
        Arc::clone(&white),
    )))));
    world.add(Box::new(XzRect::new(
        0.0,
        555.0,
        0.0,
        555.0,
        0.0,
        Arc::clone(&white),
    )));
    world.add(Box::new(FlipNormals::new(Box::new(XyRect::new(
        0.0, 555.0, 0.0, 555.0, 555.0, white,
    )))));

    let mut camera = Camera::new();
    camera.vfov = 40.0;
    camera.lookfrom = Vec3A::new(278.0, 278.0, -800.0);
    camera.lookat = Vec3A::new(278.0, 278.0, 0.0);
    camera.background = Background::Solid(Vec3A::ZERO);

    (world, camera)
}

/// Run the Monte Carlo estimator demonstrations.
///
/// Prints the pi and x^2-integral estimates under the different sampling
/// strategies so their convergence behavior can be compared side by side.
fn run_estimators(seed: u64) {
    let mut rng = ChaCha20Rng::seed_from_u64(seed);

    info!("Monte Carlo estimator demonstrations (seed {})", seed);
    info!("---------------------------------------------");

    let plain = montecarlo::estimate_pi(10_000, &mut rng);
    let stratified = montecarlo::estimate_pi_stratified(100, &mut rng);
    info!("pi, 10000 uniform samples:        {:.6}", plain);
    info!("pi, 100x100 stratified samples:   {:.6}", stratified);

    // Integral of x^2 over [0, 2]; exact value 8/3
    let uniform = montecarlo::estimate_integral(
        1_000_000,
        |x| x * x,
        |_| 0.5,
        |rng| 2.0 * rng.random::<f64>(),
        &mut rng,
    );
    let linear = montecarlo::estimate_integral(
        1_000_000,
        |x| x * x,
        |x| 0.5 * x,
        |rng| (4.0 * rng.random::<f64>()).sqrt(),
        &mut rng,
    );
    let matched = montecarlo::estimate_integral(
        1,
        |x| x * x,
        |x| 3.0 * x * x / 8.0,
        |rng| (8.0 * rng.random::<f64>()).cbrt(),
        &mut rng,
    );
    info!("integral x^2, uniform density:    {:.6}", uniform);
    info!("integral x^2, linear density:     {:.6}", linear);
    info!("integral x^2, matched density,");
    info!("  a single sample:                {:.6}", matched);
    info!("exact value:                      {:.6}", 8.0 / 3.0);
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.into());

    info!(
        "Lumapath - Git Version {} ({})",
        env!("GIT_HASH"),
        env!("GIT_DATE")
    );

    if args.estimators {
        run_estimators(args.seed);
        return;
    }

    info!(
        "Image resolution: {}x{}, samples per pixel: {}",
        args.width, args.height, args.samples_per_pixel
    );

    // Scene construction draws from its own stream so layouts reproduce
    let mut scene_rng = ChaCha20Rng::seed_from_u64(args.seed);
    let (world, mut camera) = match args.scene {
        SceneKind::Cover => cover_scene(&mut scene_rng),
        SceneKind::Checker => checker_scene(),
        SceneKind::Perlin => perlin_scene(&mut scene_rng),
        SceneKind::Earth => earth_scene(&args.texture),
        SceneKind::Light => light_scene(&mut scene_rng),
        SceneKind::Cornell => cornell_scene(),
    };

    camera.image_width = args.width;
    camera.image_height = args.height;
    camera.samples_per_pixel = args.samples_per_pixel;
    camera.max_depth = args.max_depth;
    camera.seed = args.seed;

    let image = camera.render(&world);

    // Save image based on file extension
    if args.output.ends_with(".ppm") {
        save_image_as_ppm(&image, &args.output);
    } else if args.output.ends_with(".png") {
        save_image_as_png(&image, &args.output);
    } else {
        log::error!(
            "Unsupported file extension '{}'. Only .ppm and .png formats are supported.",
            std::path::Path::new(&args.output)
                .extension()
                .unwrap_or_default()
                .to_string_lossy()
        );
        std::process::exit(1);
    }
}
