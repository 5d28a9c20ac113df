// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stillmark

//! Error types for the watermark engine.
//!
//! [`MarkError`] covers every fatal failure mode. Recoverable conditions —
//! capacity truncation, per-codec dimension skips — are surfaced as
//! [`Warning`](crate::mark::pipeline::Warning) values instead, and
//! malformed or truncated bit sequences decode to the empty string rather
//! than erroring.

use core::fmt;

/// Errors that can occur during watermark embedding or extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkError {
    /// The message exceeds the 16-bit length header (65 535 bytes).
    MessageTooLong,
    /// The seed string is empty; a seed is mandatory.
    EmptySeed,
    /// The embedding strength must be positive and finite.
    InvalidStrength,
    /// The repeat (spread) factor must be at least 1 when given.
    InvalidRepeat,
    /// No codec is enabled in the parameter set.
    NoCodecSelected,
    /// The pixel data length does not match width × height × channels.
    BufferSizeMismatch { expected: usize, actual: usize },
    /// The image is smaller than one transform unit for every enabled codec.
    ImageTooSmall,
}

impl fmt::Display for MarkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MessageTooLong => write!(f, "message too long (max 65535 bytes)"),
            Self::EmptySeed => write!(f, "seed must not be empty"),
            Self::InvalidStrength => write!(f, "strength must be a positive number"),
            Self::InvalidRepeat => write!(f, "repeat factor must be at least 1"),
            Self::NoCodecSelected => write!(f, "no codec enabled"),
            Self::BufferSizeMismatch { expected, actual } => {
                write!(f, "pixel data length {actual} does not match dimensions (expected {expected})")
            }
            Self::ImageTooSmall => write!(f, "image too small for every enabled codec"),
        }
    }
}

impl std::error::Error for MarkError {}
