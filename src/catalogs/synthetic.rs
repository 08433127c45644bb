//! Synthetic star field
//!
//! Generates a reproducible random sky for when no catalog is available.
//! Stars are spread uniformly over the celestial sphere, with a magnitude
//! distribution skewed toward bright stars and a spectral class drawn from
//! five temperature bands. The output is ordinary [`StarRecord`]s, so
//! synthetic stars are placed and colored exactly like catalog stars.

use rand::distributions::{Distribution, Uniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f64::consts::TAU;

use super::stars::StarRecord;

/// Faintest magnitude a synthetic star can have
pub const SYNTHETIC_MAX_MAGNITUDE: f64 = 6.0;

/// Spectral bands as (cumulative probability upper bound, class, representative B-V)
const SPECTRAL_BANDS: [(f64, &str, f64); 5] = [
    (0.10, "O", -0.30),
    (0.30, "A", 0.00),
    (0.60, "F", 0.40),
    (0.85, "G", 0.65),
    (1.00, "M", 1.60),
];

/// Spectral class and B-V for a uniform sample in `[0, 1)`
fn spectral_band(sample: f64) -> (&'static str, f64) {
    SPECTRAL_BANDS
        .iter()
        .find(|(upper, _, _)| sample < *upper)
        .map(|&(_, class, b_v)| (class, b_v))
        .unwrap_or(("M", 1.60))
}

/// Generate `count` synthetic star records from `seed`
pub fn generate_star_records(count: usize, seed: u64) -> Vec<StarRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let unit = Uniform::from(0.0_f64..1.0);
    let angle = Uniform::from(0.0..TAU);

    (1..=count)
        .map(|index| {
            let theta: f64 = angle.sample(&mut rng);
            let phi = (2.0 * unit.sample(&mut rng) - 1.0).acos();
            let u: f64 = unit.sample(&mut rng);
            let (class, b_v) = spectral_band(unit.sample(&mut rng));

            StarRecord {
                id: format!("SYN{:05}", index),
                ra: Some(theta.to_degrees()),
                dec: Some(phi.to_degrees() - 90.0),
                mag: u * u * SYNTHETIC_MAX_MAGNITUDE,
                name: None,
                bv: Some(b_v),
                sp: Some(class.to_string()),
            }
        })
        .collect()
}
