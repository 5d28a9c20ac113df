// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stillmark

//! # stillmark
//!
//! Blind watermark codec engine for still images. Embeds a short UTF-8 text
//! message imperceptibly into a raw pixel buffer and recovers it later from
//! the watermarked pixels alone, using three independent codecs:
//!
//! - **Spatial** (spread-spectrum): each bit nudges many pseudo-randomly
//!   chosen pixels by a polarity-masked amplitude. Extraction accumulates a
//!   signed vote per bit.
//! - **DCT** (frequency): one bit per 8×8 luma block, encoded in the sign of
//!   a mid-frequency coefficient-pair difference.
//! - **DWT** (wavelet): one bit per diagonal-detail coefficient of a
//!   single-level Haar decomposition, encoded as an additive bias.
//!
//! The engine is the codec core only: image file decoding, rendering and
//! persistence are the caller's job. Callers pass a [`PixelBuffer`] plus
//! [`MarkParams`] in, and get the watermarked buffer (embed) or per-codec
//! [`ExtractionResult`]s with a plausibility verdict (extract) back. This is
//! not a cryptographic scheme and survives only mild amplitude perturbation;
//! geometric transforms (rotation, crop, resize) defeat it.
//!
//! # Quick start
//!
//! ```rust
//! use stillmark::{embed, extract, fuse, CodecSet, MarkParams, PixelBuffer};
//!
//! let cover = PixelBuffer::filled(64, 64, 128);
//! let mut params = MarkParams::new("rbwm");
//! params.codecs = CodecSet::only_dct();
//!
//! let report = embed(cover, "hi", &params).unwrap();
//! let results = extract(&report.buffer, &params, None).unwrap();
//! assert_eq!(fuse(&results).as_deref(), Some("hi"));
//! ```

pub mod mark;
pub mod pixel;
pub mod transform;

pub use mark::error::MarkError;
pub use mark::capacity::{freq_capacity_bits, spatial_capacity_bits, wavelet_capacity_bits};
pub use mark::pipeline::{
    embed, extract, fuse, EmbedReport, ExtractOutcome, ExtractionResult, Warning,
};
pub use mark::quality::is_likely_noise;
pub use mark::sampler::Sampler;
pub use mark::{Codec, CodecSet, MarkParams, DEFAULT_STRENGTH};
pub use pixel::PixelBuffer;
