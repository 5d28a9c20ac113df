// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stillmark

//! Wavelet-domain codec: bits in the diagonal-detail quadrant of a
//! single-level Haar decomposition.
//!
//! Biasing policy: direct additive bias. Each diagonal-detail coefficient
//! targeted in raster order is shifted by `±0.75 × strength` according to
//! its bit; extraction reads the coefficient's sign. Natural images carry
//! near-zero diagonal detail, so the bias dominates the sign.
//!
//! Odd dimensions are trimmed by one row/column before the transform; the
//! trimmed edge is written back unchanged and carries no watermark.
//! Capacity is one quarter of the trimmed pixel count.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::pixel::PixelBuffer;
use crate::transform::haar;

/// Fraction of the strength used as coefficient bias.
const BIAS_PER_STRENGTH: f64 = 0.75;

/// Even-trimmed dimensions, or `None` when no 2×2 transform unit fits.
fn trimmed_dims(buf: &PixelBuffer) -> Option<(usize, usize)> {
    let w = buf.width() - buf.width() % 2;
    let h = buf.height() - buf.height() % 2;
    (w >= 2 && h >= 2).then_some((w, h))
}

/// Copy the even-trimmed region of a full-width plane.
fn trim_plane(full: &[f64], width: usize, w: usize, h: usize) -> Vec<f64> {
    let mut plane = vec![0.0f64; w * h];
    for y in 0..h {
        plane[y * w..(y + 1) * w].copy_from_slice(&full[y * width..y * width + w]);
    }
    plane
}

/// Embed up to capacity bits; returns the number of bits embedded.
///
/// As with the frequency codec, trailing bits beyond capacity are never
/// written and the caller surfaces the shortfall.
pub fn embed(buf: &mut PixelBuffer, bits: &[u8], strength: f64) -> usize {
    let Some((w, h)) = trimmed_dims(buf) else {
        return 0;
    };
    let embedded = bits.len().min((w / 2) * (h / 2));
    if embedded == 0 {
        return 0;
    }

    let width = buf.width();
    let base = buf.luma();
    let mut coeffs = haar::forward(&trim_plane(&base, width, w, h), w, h);

    let delta = BIAS_PER_STRENGTH * strength;
    let half_w = w / 2;
    for (i, &bit) in bits[..embedded].iter().enumerate() {
        let y = h / 2 + i / half_w;
        let x = half_w + i % half_w;
        coeffs[y * w + x] += if bit == 1 { delta } else { -delta };
    }

    let rebuilt = haar::inverse(&coeffs, w, h);
    let mut luma = base.clone();
    for y in 0..h {
        luma[y * width..y * width + w].copy_from_slice(&rebuilt[y * w..(y + 1) * w]);
    }
    buf.apply_luma_delta(&luma, &base);
    embedded
}

/// Extract up to `max_bits` bits from the diagonal-detail quadrant.
pub fn extract(buf: &PixelBuffer, max_bits: usize) -> Vec<u8> {
    let Some((w, h)) = trimmed_dims(buf) else {
        return Vec::new();
    };
    let count = max_bits.min((w / 2) * (h / 2));
    if count == 0 {
        return Vec::new();
    }

    let coeffs = haar::forward(&trim_plane(&buf.luma(), buf.width(), w, h), w, h);
    let half_w = w / 2;

    let read_bit = |i: usize| -> u8 {
        let y = h / 2 + i / half_w;
        let x = half_w + i % half_w;
        u8::from(coeffs[y * w + x] > 0.0)
    };

    #[cfg(feature = "parallel")]
    let bits: Vec<u8> = (0..count).into_par_iter().map(read_bit).collect();
    #[cfg(not(feature = "parallel"))]
    let bits: Vec<u8> = (0..count).map(read_bit).collect();

    bits
}
