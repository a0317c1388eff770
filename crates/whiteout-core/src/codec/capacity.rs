//! Ranking of pixels by local discontinuity.
//!
//! Edges and texture hide LSB changes better than flat areas, so pixels that
//! differ a lot from their predecessor are used first. Only the bits above the
//! bit depth are compared, which keeps the ranking identical before and after
//! the payload was written.

use super::BitDepth;

/// Score of a single pixel index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scored {
    pub score: u8,
    pub index: usize,
}

/// Scores every index of `pixels` against the sample `stride` bytes before it
/// and returns them stable-sorted by descending score.
///
/// The first `stride` indices have no predecessor and score 0.
pub fn score(pixels: &[u8], stride: usize, bit_depth: BitDepth) -> Vec<Scored> {
    let stride = stride.max(1);
    let mask = bit_depth.high_mask();

    let mut scored: Vec<Scored> = pixels
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let score = if index < stride {
                0
            } else {
                (value & mask).abs_diff(pixels[index - stride] & mask)
            };
            Scored { score, index }
        })
        .collect();
    // `sort_by` is stable, equal scores keep their index order
    scored.sort_by(|a, b| b.score.cmp(&a.score));

    scored
}

/// Size of the candidate pool: twice the required pixels, capped by the plane.
pub fn pool_size(required_pixels: usize, plane_len: usize) -> usize {
    required_pixels.saturating_mul(2).min(plane_len)
}
