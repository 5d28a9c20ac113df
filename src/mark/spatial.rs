// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stillmark

//! Spatial spread-spectrum codec.
//!
//! Each message bit is spread over many pseudo-randomly chosen pixels: the
//! sampler draws a pixel index and a ±1 polarity per repetition, and the
//! R, G and B channels are nudged by `amplitude × polarity × (bit ? +1 : −1)`.
//! Extraction regenerates the identical draw sequence and accumulates a
//! signed vote per bit from the luma deviation around mid-level (128),
//! weighted by the same polarity; the bit is the sign of the vote.
//!
//! The sampler is seeded from `"{seed}-spatial"`, keeping this codec's draw
//! stream disjoint from any other use of the same user seed.
//!
//! When the bit count is unknown, extraction is two-pass: decode the 16-bit
//! length header first, then redraw the full stream from the same seed for
//! the complete message. The spread factor must match between embedding and
//! each pass for the votes to align; an explicit `repeat` in the parameters
//! guarantees that, while the derived factor depends on the bit count being
//! decoded and the header pass may degrade. Callers wanting reliable
//! unknown-length extraction set `repeat` or pass a forced length.

use crate::mark::message;
use crate::mark::sampler::Sampler;
use crate::mark::MarkParams;
use crate::pixel::PixelBuffer;

/// Lower bound on the derived spread factor.
pub const MIN_SPREAD: usize = 12;

/// Divisor keeping derived total positions within the pixel budget.
pub const SPREAD_DIVISOR: usize = 6;

/// Fraction of the strength used as perturbation amplitude.
const AMPLITUDE_PER_STRENGTH: f64 = 0.8;

/// Spread factor (positions per bit): the explicit repeat when given,
/// otherwise derived from the pixel budget and payload length.
pub fn spread_factor(pixels: usize, bit_count: usize, explicit: Option<u32>) -> usize {
    match explicit {
        Some(r) => r as usize,
        None => (pixels / bit_count.max(1) / SPREAD_DIVISOR).max(MIN_SPREAD),
    }
}

fn sampler_for(params: &MarkParams) -> Sampler {
    Sampler::from_seed_str(&format!("{}-spatial", params.seed))
}

/// Embed a bit sequence by perturbing sampled pixels.
///
/// Consumes two draws (position, polarity) per repetition per bit, in bit
/// order. Later draws may land on already-perturbed pixels; the nudges
/// accumulate, which the majority vote absorbs.
pub fn embed(buf: &mut PixelBuffer, bits: &[u8], params: &MarkParams) {
    let pixels = buf.pixel_count();
    if pixels == 0 || bits.is_empty() {
        return;
    }
    debug_assert!(pixels <= u32::MAX as usize);

    let mut sampler = sampler_for(params);
    let amplitude = AMPLITUDE_PER_STRENGTH * params.strength;
    let count = spread_factor(pixels, bits.len(), params.repeat);

    for &bit in bits {
        let bit_sign = if bit == 1 { 1.0 } else { -1.0 };
        for _ in 0..count {
            let pos = sampler.next_index(pixels as u32) as usize;
            let polarity = sampler.next_sign() as f64;
            buf.perturb_rgb(pos, amplitude * polarity * bit_sign);
        }
    }
}

/// Extract `bit_count` bits by majority vote over the regenerated draws.
pub fn extract(buf: &PixelBuffer, bit_count: usize, params: &MarkParams) -> Vec<u8> {
    let pixels = buf.pixel_count();
    if pixels == 0 || bit_count == 0 {
        return Vec::new();
    }

    let mut sampler = sampler_for(params);
    let count = spread_factor(pixels, bit_count, params.repeat);

    let mut bits = Vec::with_capacity(bit_count);
    for _ in 0..bit_count {
        let mut vote = 0.0f64;
        for _ in 0..count {
            let pos = sampler.next_index(pixels as u32) as usize;
            let polarity = sampler.next_sign() as f64;
            vote += (buf.luma_at(pos) - 128.0) * polarity;
        }
        bits.push(u8::from(vote > 0.0));
    }
    bits
}

/// Extract with unknown length: decode the header first, then redraw the
/// full stream from the same seed for the complete frame.
pub fn extract_auto(buf: &PixelBuffer, params: &MarkParams) -> Vec<u8> {
    let header = extract(buf, message::HEADER_BITS, params);
    let total = message::declared_bit_count(&header);
    if total == 0 {
        return header;
    }
    extract(buf, total, params)
}
