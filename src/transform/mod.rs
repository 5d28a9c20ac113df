// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stillmark

//! Shared numeric transform primitives.
//!
//! Pure functions over real-valued planes: the 8×8 two-dimensional DCT used
//! by the frequency codec, and the single-level two-dimensional Haar wavelet
//! used by the wavelet codec. No side effects, no shared state.

pub mod dct;
pub mod haar;
