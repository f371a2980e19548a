//! Random constraint sets (random bands around an interior point + replay tokens).
//!
//! Model
//! - Each of the `N` bands gets a random normal direction in [0, π), a random
//!   normal length, and lower/upper half-widths measured along the normal.
//! - Every band contains `center` with margin, so two non-parallel bands
//!   already bound a parallelogram and the drawn set has positive area.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.
//!
//! Code cross-refs: `ConstraintSet`, `enumerate`, benches, `cli sample`

use super::types::{Constraint, ConstraintSet, N};
use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Band sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct BandCfg {
    /// Normal length range `[min, max]`; normals are not unit.
    pub norm_min: f64,
    pub norm_max: f64,
    /// Half-width range (distance from `center` to each boundary line).
    pub width_min: f64,
    pub width_max: f64,
    /// Interior point shared by all bands.
    pub center: Vector2<f64>,
}

impl Default for BandCfg {
    fn default() -> Self {
        Self {
            norm_min: 0.5,
            norm_max: 2.0,
            width_min: 0.2,
            width_max: 1.5,
            center: Vector2::zeros(),
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Draw a random constraint set whose polygon contains `cfg.center` strictly.
pub fn draw_constraint_set(cfg: BandCfg, tok: ReplayToken) -> ConstraintSet {
    let mut rng = tok.to_std_rng();
    let (n_lo, n_hi) = ordered_range(cfg.norm_min.max(1e-6), cfg.norm_max);
    let (w_lo, w_hi) = ordered_range(cfg.width_min.max(1e-6), cfg.width_max);
    let mut cs = [Constraint::new(Vector2::zeros(), 0.0, 0.0); N];
    for c in cs.iter_mut() {
        let th: f64 = rng.gen::<f64>() * std::f64::consts::PI;
        let len = rng.gen_range(n_lo..=n_hi);
        let h = Vector2::new(th.cos(), th.sin()) * len;
        let s0 = h.dot(&cfg.center);
        let below = rng.gen_range(w_lo..=w_hi) * len;
        let above = rng.gen_range(w_lo..=w_hi) * len;
        *c = Constraint::new(h, s0 - below, s0 + above);
    }
    ConstraintSet::new(cs)
}

#[inline]
fn ordered_range(lo: f64, hi: f64) -> (f64, f64) {
    if hi < lo {
        (lo, lo)
    } else {
        (lo, hi)
    }
}
