// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stillmark

//! Per-codec capacity estimation.
//!
//! Capacities are in bits of the framed message (16-bit length header
//! included). The orchestrator compares these against the message frame to
//! emit truncation warnings; callers can use them for pre-flight checks
//! before embedding.

use crate::mark::spatial::{MIN_SPREAD, SPREAD_DIVISOR};
use crate::transform::dct::BLOCK;

/// Frequency-codec capacity: one bit per full 8×8 block, remainder rows and
/// columns excluded.
pub fn freq_capacity_bits(width: usize, height: usize) -> usize {
    (width / BLOCK) * (height / BLOCK)
}

/// Wavelet-codec capacity: one bit per diagonal-detail coefficient of the
/// dimension-trimmed plane — a quarter of the trimmed pixel count.
pub fn wavelet_capacity_bits(width: usize, height: usize) -> usize {
    let w = width - width % 2;
    let h = height - height % 2;
    (w / 2) * (h / 2)
}

/// Spatial-codec capacity: the payload size at which the derived spread
/// factor reaches its floor, keeping total sampled positions within the
/// pixel budget. Larger messages still embed, with degraded redundancy.
pub fn spatial_capacity_bits(width: usize, height: usize) -> usize {
    width * height / (MIN_SPREAD * SPREAD_DIVISOR)
}
