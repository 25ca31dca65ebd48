//! Gaussian noise from uniform draws.

use std::f64::consts::TAU;

use rand::Rng;

/// Standard normal sample by the Box–Muller transform.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // u1 must stay away from zero for the logarithm
    let u1: f64 = rng.gen_range(f64::MIN_POSITIVE..1.0);
    let u2: f64 = rng.gen_range(0.0..1.0);
    (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
}

/// `1 + sigma·N(0,1)`, never below `floor`.
pub fn multiplicative_factor<R: Rng + ?Sized>(rng: &mut R, sigma: f64, floor: f64) -> f64 {
    (1.0 + sigma * standard_normal(rng)).max(floor)
}
