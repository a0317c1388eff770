//! Password seeded pixel orders.
//!
//! Every order is built by its own generator instance, so the global order and
//! the adaptive pool never share generator state even though both are seeded
//! from the same password.

use fastrand::Rng;

use super::capacity;
use super::BitDepth;
use crate::password::Seed;

/// Deterministic pseudo-random bijection over `0..length`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    indices: Vec<usize>,
}

impl Permutation {
    /// Shuffles the identity `0..length` with a generator seeded by `seed`.
    /// Same seed and length always give the same order.
    pub fn from_seed(seed: Seed, length: usize) -> Self {
        let mut indices: Vec<usize> = (0..length).collect();
        shuffle(seed, &mut indices);

        Permutation { indices }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.indices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[usize] {
        &self.indices
    }

    pub fn into_vec(self) -> Vec<usize> {
        self.indices
    }
}

/// Fisher-Yates shuffle driven by a fresh generator seeded with `seed`.
pub fn shuffle<T>(seed: Seed, items: &mut [T]) {
    let mut rng = Rng::with_seed(u64::from(seed.value()));

    for i in (1..items.len()).rev() {
        let j = rng.usize(0..=i);
        items.swap(i, j);
    }
}

/// Order used for the header, covering the whole plane.
pub fn global_order(seed: Seed, length: usize) -> Permutation {
    Permutation::from_seed(seed, length)
}

/// Candidate pool for the payload.
///
/// Up to [`BitDepth::ADAPTIVE_THRESHOLD`] the pixels are ranked by
/// [`capacity::score`], cut to [`capacity::pool_size`] and shuffled. Above the
/// threshold the global order is returned as is, which is the very same order the
/// header used; the payload codec then walks past the header pixels via the
/// occupancy map.
pub fn adaptive_order(
    seed: Seed,
    pixels: &[u8],
    stride: usize,
    bit_depth: BitDepth,
    required_pixels: usize,
) -> Vec<usize> {
    if !bit_depth.is_adaptive() {
        return global_order(seed, pixels.len()).into_vec();
    }

    let pool_size = capacity::pool_size(required_pixels, pixels.len());
    let mut pool: Vec<usize> = capacity::score(pixels, stride, bit_depth)
        .into_iter()
        .take(pool_size)
        .map(|scored| scored.index)
        .collect();
    shuffle(seed, &mut pool);

    pool
}
