use crate::constants::{FIREFLY_MAX_HEIGHT, FIREFLY_SPREAD_XZ};
use glam::Vec3;
use rand::prelude::*;

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Firefly {
    pub position: [f32; 3],
    /// Per-particle size multiplier in [0, 1).
    pub scale: f32,
}

/// Scatter `count` fireflies over the diorama footprint.
pub fn scatter(count: usize, rng: &mut impl Rng) -> Vec<Firefly> {
    (0..count)
        .map(|_| {
            let p = Vec3::new(
                (rng.gen::<f32>() - 0.5) * FIREFLY_SPREAD_XZ,
                rng.gen::<f32>() * FIREFLY_MAX_HEIGHT,
                (rng.gen::<f32>() - 0.5) * FIREFLY_SPREAD_XZ,
            );
            Firefly {
                position: p.to_array(),
                scale: rng.gen::<f32>(),
            }
        })
        .collect()
}

pub fn scatter_seeded(count: usize, seed: u64) -> Vec<Firefly> {
    scatter(count, &mut StdRng::seed_from_u64(seed))
}
