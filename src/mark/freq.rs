// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stillmark

//! Frequency-domain codec: one bit per 8×8 DCT block.
//!
//! Biasing policy: coefficient-pair difference thresholding. Each block's
//! mid-frequency coefficients at (2,3) and (3,2) form a signed difference;
//! embedding pushes the difference past `+delta` for a 1 bit and past
//! `-delta` for a 0 bit, where `delta = 2 + 0.8 × strength`. Extraction is
//! blind: the recovered bit is the sign of the recomputed difference.
//!
//! Blocks are consumed in raster order over the luma plane; remainder rows
//! and columns smaller than 8 carry nothing. Each block is read, modified
//! and written back independently of its neighbors, so the per-block work
//! parallelizes under the `parallel` feature.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::pixel::PixelBuffer;
use crate::transform::dct::{dct2, idct2, BLOCK};

/// Biased coefficient position (row, column) raised for 1 bits.
const POS_A: (usize, usize) = (2, 3);
/// Paired coefficient position raised for 0 bits.
const POS_B: (usize, usize) = (3, 2);

/// Difference threshold for the given strength.
fn bias_delta(strength: f64) -> f64 {
    2.0 + 0.8 * strength
}

#[inline]
fn read_block(luma: &[f64], width: usize, bx: usize, by: usize) -> [f64; 64] {
    let mut block = [0.0f64; 64];
    for r in 0..BLOCK {
        let row = (by * BLOCK + r) * width + bx * BLOCK;
        block[r * BLOCK..r * BLOCK + BLOCK].copy_from_slice(&luma[row..row + BLOCK]);
    }
    block
}

#[inline]
fn write_block(luma: &mut [f64], width: usize, bx: usize, by: usize, block: &[f64; 64]) {
    for r in 0..BLOCK {
        let row = (by * BLOCK + r) * width + bx * BLOCK;
        luma[row..row + BLOCK].copy_from_slice(&block[r * BLOCK..r * BLOCK + BLOCK]);
    }
}

/// Embed up to one bit per full block; returns the number of bits embedded.
///
/// Fewer blocks than bits means the trailing bits are never written — the
/// caller is responsible for surfacing the shortfall as a capacity warning.
pub fn embed(buf: &mut PixelBuffer, bits: &[u8], strength: f64) -> usize {
    let (width, height) = (buf.width(), buf.height());
    let blocks_x = width / BLOCK;
    let blocks_y = height / BLOCK;
    let embedded = bits.len().min(blocks_x * blocks_y);
    if embedded == 0 {
        return 0;
    }

    let base = buf.luma();
    let mut luma = base.clone();
    let delta = bias_delta(strength);

    let rebias = |i: usize| -> [f64; 64] {
        let (bx, by) = (i % blocks_x, i / blocks_x);
        let block = read_block(&luma, width, bx, by);
        let mut coeffs = dct2(&block);

        let a = coeffs[POS_A.0 * BLOCK + POS_A.1];
        let b = coeffs[POS_B.0 * BLOCK + POS_B.1];
        let diff = a - b;
        if bits[i] == 1 {
            if diff < delta {
                coeffs[POS_A.0 * BLOCK + POS_A.1] += delta - diff;
            }
        } else if diff > -delta {
            coeffs[POS_B.0 * BLOCK + POS_B.1] += diff + delta;
        }

        idct2(&coeffs)
    };

    #[cfg(feature = "parallel")]
    let rebuilt: Vec<[f64; 64]> = (0..embedded).into_par_iter().map(rebias).collect();
    #[cfg(not(feature = "parallel"))]
    let rebuilt: Vec<[f64; 64]> = (0..embedded).map(rebias).collect();

    for (i, block) in rebuilt.iter().enumerate() {
        write_block(&mut luma, width, i % blocks_x, i / blocks_x, block);
    }

    buf.apply_luma_delta(&luma, &base);
    embedded
}

/// Extract up to `max_bits` bits in block-raster order.
pub fn extract(buf: &PixelBuffer, max_bits: usize) -> Vec<u8> {
    let (width, height) = (buf.width(), buf.height());
    let blocks_x = width / BLOCK;
    let blocks_y = height / BLOCK;
    let count = max_bits.min(blocks_x * blocks_y);
    if count == 0 {
        return Vec::new();
    }

    let luma = buf.luma();

    let read_bit = |i: usize| -> u8 {
        let block = read_block(&luma, width, i % blocks_x, i / blocks_x);
        let coeffs = dct2(&block);
        let diff = coeffs[POS_A.0 * BLOCK + POS_A.1] - coeffs[POS_B.0 * BLOCK + POS_B.1];
        u8::from(diff > 0.0)
    };

    #[cfg(feature = "parallel")]
    let bits: Vec<u8> = (0..count).into_par_iter().map(read_bit).collect();
    #[cfg(not(feature = "parallel"))]
    let bits: Vec<u8> = (0..count).map(read_bit).collect();

    bits
}
