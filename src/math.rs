use nalgebra as na;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Lower bound of the visible margin, in percent of the frame.
pub const MARGIN_MIN: f32 = 5.0;

/// Upper bound of the visible margin, in percent of the frame.
pub const MARGIN_MAX: f32 = 95.0;

/// One generator for a whole run: fixed by `seed` when set, otherwise
/// seeded from the thread RNG.
pub fn run_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    }
}

/// Uniform draw in `[-scale / 2, scale / 2)`.
#[inline]
pub fn centered<R: Rng>(rng: &mut R, scale: f32) -> f32 {
    (rng.random::<f32>() - 0.5) * scale
}

/// Uniform draw in `[base, base + span)`.
#[inline]
pub fn spread<R: Rng>(rng: &mut R, base: f32, span: f32) -> f32 {
    base + rng.random::<f32>() * span
}

#[inline]
pub fn random_vector<R: Rng>(rng: &mut R, scale: f32) -> na::Vector2<f32> {
    na::Vector2::new(centered(rng, scale), centered(rng, scale))
}

/// Clamps both coordinates into `[MARGIN_MIN, MARGIN_MAX]`.
#[inline]
pub fn clamp_to_margin(p: na::Point2<f32>) -> na::Point2<f32> {
    na::Point2::new(
        p.x.clamp(MARGIN_MIN, MARGIN_MAX),
        p.y.clamp(MARGIN_MIN, MARGIN_MAX),
    )
}

/// Maps a percentage coordinate onto a canvas axis of `size` pixels.
#[inline(always)]
pub fn to_pixels(pct: f32, size: f32) -> f32 {
    pct / 100.0 * size
}
