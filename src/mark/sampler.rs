// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stillmark

//! Deterministic sampling stream for repeatable pixel and polarity draws.
//!
//! Two-stage construction: a non-cryptographic 32-bit string hash
//! (order-sensitive, full-string dependent) seeds a ChaCha20 counter-based
//! stream generator. Identical seed ⇒ byte-identical infinite stream.
//!
//! The stream is consumed strictly in call order. Embed and extract must
//! issue the exact same draws in the exact same order, or they desynchronize
//! silently — there is no resynchronization mechanism. Every call therefore
//! owns a private [`Sampler`] instance; none is ever shared or global.
//!
//! # Cross-platform portability
//!
//! Index draws use `u32` ranges (not `usize`) so the generator consumes the
//! same amount of entropy per draw on 32-bit and 64-bit targets, producing
//! identical streams everywhere.

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

/// Hash a seed string into a 32-bit generator state.
///
/// xmur3-style avalanche: multiply/rotate absorption over the bytes, then a
/// final mix. Order-sensitive and dependent on every byte.
fn hash_seed_str(seed: &str) -> u32 {
    let mut h: u32 = 1_779_033_703 ^ seed.len() as u32;
    for byte in seed.bytes() {
        h = (h ^ byte as u32).wrapping_mul(3_432_918_353);
        h = h.rotate_left(13);
    }
    h = (h ^ (h >> 16)).wrapping_mul(2_246_822_507);
    h = (h ^ (h >> 13)).wrapping_mul(3_266_489_909);
    h ^ (h >> 16)
}

/// An owned, injectable deterministic draw stream.
pub struct Sampler {
    rng: ChaCha20Rng,
}

impl Sampler {
    /// Construct from a string seed via the 32-bit string hash.
    pub fn from_seed_str(seed: &str) -> Self {
        Self::from_state(hash_seed_str(seed))
    }

    /// Construct directly from a 32-bit integer state.
    pub fn from_state(state: u32) -> Self {
        let mut seed = [0u8; 32];
        for chunk in seed.chunks_exact_mut(4) {
            chunk.copy_from_slice(&state.to_le_bytes());
        }
        Self {
            rng: ChaCha20Rng::from_seed(seed),
        }
    }

    /// Next uniform value in [0, 1).
    pub fn next_unit(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Next uniform index in [0, bound). `bound` must be nonzero.
    pub fn next_index(&mut self, bound: u32) -> u32 {
        debug_assert!(bound > 0);
        self.rng.gen_range(0..bound)
    }

    /// Next polarity value, +1 or −1.
    pub fn next_sign(&mut self) -> i32 {
        if self.next_unit() > 0.5 {
            1
        } else {
            -1
        }
    }
}
