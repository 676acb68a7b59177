//! Standalone Monte Carlo estimators.
//!
//! The same machinery the renderer applies per pixel, reduced to 1D and 2D
//! so the variance-reduction techniques can be demonstrated and tested
//! against closed-form integrals: plain uniform estimation, stratified
//! (jittered) sampling, and importance sampling with a chosen proposal
//! density. Computed in f64 since these are precision benchmarks.

use rand::{Rng, RngCore};

/// Estimate a 1D integral by averaging integrand / density over draws from
/// the proposal density.
///
/// `draw` samples the proposal (typically by inverse CDF) and `density`
/// evaluates it; the identity E[f(x)/p(x)] = integral of f holds for any
/// density that is non-zero wherever the integrand is. The closer the
/// density's shape follows the integrand, the lower the variance.
pub fn estimate_integral(
    samples: u32,
    integrand: impl Fn(f64) -> f64,
    density: impl Fn(f64) -> f64,
    mut draw: impl FnMut(&mut dyn RngCore) -> f64,
    rng: &mut dyn RngCore,
) -> f64 {
    let mut sum = 0.0;
    for _ in 0..samples {
        let x = draw(&mut *rng);
        sum += integrand(x) / density(x);
    }
    sum / samples as f64
}

/// Estimate pi by uniformly sampling the [-1,1]^2 square and counting hits
/// inside the unit circle.
///
/// (area of circle) / (area of square) = pi / 4.
pub fn estimate_pi(samples: u32, rng: &mut dyn RngCore) -> f64 {
    let mut inside_circle = 0u32;
    for _ in 0..samples {
        let x = 2.0 * rng.random::<f64>() - 1.0;
        let y = 2.0 * rng.random::<f64>() - 1.0;
        if x * x + y * y < 1.0 {
            inside_circle += 1;
        }
    }
    4.0 * inside_circle as f64 / samples as f64
}

/// Estimate pi with a stratified grid: one jittered sample per cell of a
/// sqrt_n x sqrt_n partition of the square.
///
/// Uses the same total sample count as `estimate_pi` with
/// `samples = sqrt_n * sqrt_n`, but converges with lower variance because
/// no region of the domain is left unsampled by chance.
pub fn estimate_pi_stratified(sqrt_n: u32, rng: &mut dyn RngCore) -> f64 {
    let mut inside_circle = 0u32;
    for i in 0..sqrt_n {
        for j in 0..sqrt_n {
            let x = 2.0 * ((i as f64 + rng.random::<f64>()) / sqrt_n as f64) - 1.0;
            let y = 2.0 * ((j as f64 + rng.random::<f64>()) / sqrt_n as f64) - 1.0;
            if x * x + y * y < 1.0 {
                inside_circle += 1;
            }
        }
    }
    4.0 * inside_circle as f64 / (sqrt_n as u64 * sqrt_n as u64) as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use std::f64::consts::PI;

    /// Exact value of the integral of x^2 over [0, 2].
    const X_SQUARED_INTEGRAL: f64 = 8.0 / 3.0;

    fn sample_variance(values: &[f64]) -> f64 {
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        values.iter().map(|v| (v - mean) * (v - mean)).sum::<f64>() / (values.len() - 1) as f64
    }

    #[test]
    fn uniform_density_estimates_the_integral() {
        let mut rng = ChaCha20Rng::seed_from_u64(41);
        let estimate = estimate_integral(
            100_000,
            |x| x * x,
            |_| 0.5,
            |rng| 2.0 * rng.random::<f64>(),
            &mut rng,
        );
        assert!((estimate - X_SQUARED_INTEGRAL).abs() < 0.05, "{estimate}");
    }

    #[test]
    fn linear_density_estimates_the_integral() {
        // p(x) = x/2 on [0,2], inverse CDF x = sqrt(4u)
        let mut rng = ChaCha20Rng::seed_from_u64(42);
        let estimate = estimate_integral(
            100_000,
            |x| x * x,
            |x| 0.5 * x,
            |rng| (4.0 * rng.random::<f64>()).sqrt(),
            &mut rng,
        );
        assert!((estimate - X_SQUARED_INTEGRAL).abs() < 0.05, "{estimate}");
    }

    #[test]
    fn matched_density_is_exact_with_a_single_sample() {
        // p(x) = 3x^2/8 is proportional to the integrand, so every weight
        // f(x)/p(x) equals the integral itself: zero variance, one sample
        // suffices on every trial.
        let mut rng = ChaCha20Rng::seed_from_u64(43);
        for _ in 0..100 {
            let estimate = estimate_integral(
                1,
                |x| x * x,
                |x| 3.0 * x * x / 8.0,
                |rng| (8.0 * rng.random::<f64>()).cbrt(),
                &mut rng,
            );
            assert!((estimate - X_SQUARED_INTEGRAL).abs() < 1e-12, "{estimate}");
        }
    }

    #[test]
    fn pi_estimators_converge() {
        let mut rng = ChaCha20Rng::seed_from_u64(44);
        let plain = estimate_pi(10_000, &mut rng);
        assert!((plain - PI).abs() < 0.1, "{plain}");

        let stratified = estimate_pi_stratified(100, &mut rng);
        assert!((stratified - PI).abs() < 0.05, "{stratified}");
    }

    #[test]
    fn stratification_reduces_variance() {
        // Same total sample count (100 x 100) per run; the stratified
        // estimator must spread strictly less across repeated runs.
        let runs = 30;
        let plain: Vec<f64> = (0..runs)
            .map(|i| {
                let mut rng = ChaCha20Rng::seed_from_u64(1000 + i);
                estimate_pi(10_000, &mut rng)
            })
            .collect();
        let stratified: Vec<f64> = (0..runs)
            .map(|i| {
                let mut rng = ChaCha20Rng::seed_from_u64(2000 + i);
                estimate_pi_stratified(100, &mut rng)
            })
            .collect();

        let plain_var = sample_variance(&plain);
        let stratified_var = sample_variance(&stratified);
        assert!(
            stratified_var < plain_var,
            "stratified {stratified_var} vs plain {plain_var}"
        );
    }
}
