// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stillmark

//! Orthonormal 8×8 two-dimensional DCT-II and its inverse.
//!
//! Both transforms are separable passes over a precomputed cosine table.
//! Scaling: 1/√2 on the zero frequency of each axis, 0.25 overall, which
//! makes [`idct2`] the exact inverse of [`dct2`] up to f64 rounding.

use std::sync::OnceLock;

/// Transform block edge length.
pub const BLOCK: usize = 8;

/// Pre-computed cosine table.
/// `COSINE[u][x] = cos((2*x + 1) * u * PI / 16)`
static COSINE: OnceLock<[[f64; BLOCK]; BLOCK]> = OnceLock::new();

/// Per-axis normalization: C(0) = 1/sqrt(8), C(u>0) = 1/2.
/// Applied once per pass, the two passes together give the orthonormal
/// 0.25 * c(u) * c(v) scaling.
static NORM: OnceLock<[f64; BLOCK]> = OnceLock::new();

fn cosine_table() -> &'static [[f64; BLOCK]; BLOCK] {
    COSINE.get_or_init(|| {
        let mut table = [[0.0f64; BLOCK]; BLOCK];
        for u in 0..BLOCK {
            for x in 0..BLOCK {
                table[u][x] =
                    ((2 * x + 1) as f64 * u as f64 * std::f64::consts::PI / 16.0).cos();
            }
        }
        table
    })
}

fn norm_table() -> &'static [f64; BLOCK] {
    NORM.get_or_init(|| {
        let mut n = [0.5f64; BLOCK];
        n[0] = 1.0 / (8.0f64).sqrt();
        n
    })
}

/// Forward 8×8 2D DCT-II of a row-major block.
pub fn dct2(block: &[f64; 64]) -> [f64; 64] {
    let cos = cosine_table();
    let c = norm_table();

    // Separable forward DCT: rows then columns.
    let mut temp = [0.0f64; 64];
    for row in 0..BLOCK {
        for u in 0..BLOCK {
            let mut sum = 0.0;
            for x in 0..BLOCK {
                sum += block[row * BLOCK + x] * cos[u][x];
            }
            temp[row * BLOCK + u] = c[u] * sum;
        }
    }

    let mut coeffs = [0.0f64; 64];
    for col in 0..BLOCK {
        for v in 0..BLOCK {
            let mut sum = 0.0;
            for y in 0..BLOCK {
                sum += temp[y * BLOCK + col] * cos[v][y];
            }
            coeffs[v * BLOCK + col] = c[v] * sum;
        }
    }
    coeffs
}

/// Inverse 8×8 2D DCT of a row-major coefficient block.
pub fn idct2(coeffs: &[f64; 64]) -> [f64; 64] {
    let cos = cosine_table();
    let c = norm_table();

    // Separable inverse: columns then rows.
    let mut temp = [0.0f64; 64];
    for col in 0..BLOCK {
        for y in 0..BLOCK {
            let mut sum = 0.0;
            for v in 0..BLOCK {
                sum += c[v] * coeffs[v * BLOCK + col] * cos[v][y];
            }
            temp[y * BLOCK + col] = sum;
        }
    }

    let mut block = [0.0f64; 64];
    for row in 0..BLOCK {
        for x in 0..BLOCK {
            let mut sum = 0.0;
            for u in 0..BLOCK {
                sum += c[u] * temp[row * BLOCK + u] * cos[u][x];
            }
            block[row * BLOCK + x] = sum;
        }
    }
    block
}
