use std::time::Duration;

use criterion::{Criterion, Throughput};
use field_tiler::geometry::Rect;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

fn rand01(rng: &mut StdRng) -> f64 {
    (rng.next_u32() as f64) / ((u32::MAX as f64) + 1.0)
}

/// `side * side` care areas on a lattice of `pitch`, each with a jittered extent that may
/// reach into its neighbours.
pub fn lattice_care_areas(side: usize, pitch: f64, seed: u64) -> Vec<Rect> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(side * side);
    for i in 0..side {
        for j in 0..side {
            let x0 = i as f64 * pitch;
            let y0 = j as f64 * pitch;
            let w = pitch * (0.5 + rand01(&mut rng) * 0.7);
            let h = pitch * (0.5 + rand01(&mut rng) * 0.7);
            out.push(Rect::new(x0, x0 + w, y0, y0 + h));
        }
    }
    out
}
