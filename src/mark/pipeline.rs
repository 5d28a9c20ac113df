// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stillmark

//! Orchestration: run the enabled codecs against one buffer and fuse their
//! results.
//!
//! Embedding runs the codecs in sequence (dct, dwt, spatial) against the
//! same buffer. Each operates independently and may overwrite pixels a
//! previous codec touched — enabling several codecs at once trades mutual
//! interference for redundancy, and no cross-codec conflict resolution is
//! performed. Codecs whose transform unit does not fit the image are
//! skipped with a warning; capacity shortfalls are reported as warnings,
//! never silently dropped.
//!
//! Extraction runs every enabled codec independently; a codec that cannot
//! run is marked skipped in the result set and never aborts its siblings.
//! [`fuse`] picks the consensus text by highest multiplicity of exact
//! agreement.

use core::fmt;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::mark::capacity::{freq_capacity_bits, spatial_capacity_bits, wavelet_capacity_bits};
use crate::mark::error::MarkError;
use crate::mark::message;
use crate::mark::quality;
use crate::mark::{freq, spatial, wavelet};
use crate::mark::{Codec, MarkParams};
use crate::pixel::PixelBuffer;

/// A recoverable condition reported alongside a successful embed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// The message frame exceeds the codec's capacity; only the leading
    /// `embedded_bits` of `message_bits` were written.
    CapacityTruncated {
        codec: Codec,
        embedded_bits: usize,
        message_bits: usize,
    },
    /// The image is smaller than one transform unit for this codec; the
    /// codec did not run.
    CodecSkipped {
        codec: Codec,
        width: usize,
        height: usize,
    },
    /// The spatial codec embedded every bit, but the message is large
    /// enough that the derived spread factor sits at its floor and sampled
    /// positions exceed the pixel budget; decoding reliability degrades.
    SpreadOversubscribed {
        message_bits: usize,
        capacity_bits: usize,
    },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityTruncated {
                codec,
                embedded_bits,
                message_bits,
            } => write!(
                f,
                "{codec}: capacity exceeded, embedded {embedded_bits} of {message_bits} bits"
            ),
            Self::CodecSkipped {
                codec,
                width,
                height,
            } => write!(f, "{codec}: image {width}x{height} below one transform unit, skipped"),
            Self::SpreadOversubscribed {
                message_bits,
                capacity_bits,
            } => write!(
                f,
                "spatial: {message_bits} bits exceed the comfortable {capacity_bits}-bit budget, redundancy degraded"
            ),
        }
    }
}

/// Outcome of one embed call: the watermarked buffer plus any warnings.
#[derive(Debug)]
pub struct EmbedReport {
    pub buffer: PixelBuffer,
    pub warnings: Vec<Warning>,
}

/// Per-codec extraction outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractOutcome {
    /// The codec ran; `plausible` is the noise-screening verdict.
    Decoded {
        text: String,
        bits: Vec<u8>,
        plausible: bool,
    },
    /// The image is smaller than one transform unit for this codec.
    Skipped { width: usize, height: usize },
}

/// One codec's extraction result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionResult {
    pub codec: Codec,
    pub outcome: ExtractOutcome,
}

impl ExtractionResult {
    /// The decoded text, if the codec ran.
    pub fn text(&self) -> Option<&str> {
        match &self.outcome {
            ExtractOutcome::Decoded { text, .. } => Some(text),
            ExtractOutcome::Skipped { .. } => None,
        }
    }
}

/// Embed a message into the buffer with every enabled codec.
///
/// Takes the buffer by value; the watermarked buffer is returned inside the
/// report. Runs dct, then dwt, then spatial — each against the output of
/// the previous one.
///
/// # Errors
/// - Parameter errors from [`MarkParams::validate`].
/// - [`MarkError::MessageTooLong`] if the message exceeds the frame format.
/// - [`MarkError::ImageTooSmall`] if every enabled codec had to be skipped.
pub fn embed(
    buffer: PixelBuffer,
    message_text: &str,
    params: &MarkParams,
) -> Result<EmbedReport, MarkError> {
    params.validate()?;
    let bits = message::encode_message(message_text)?;

    let mut buf = buffer;
    let (width, height) = (buf.width(), buf.height());
    let mut warnings = Vec::new();
    let mut ran_any = false;

    for codec in params.codecs.enabled() {
        match codec {
            Codec::Dct => {
                if freq_capacity_bits(width, height) == 0 {
                    skip(&mut warnings, codec, width, height);
                    continue;
                }
                ran_any = true;
                let embedded = freq::embed(&mut buf, &bits, params.strength);
                tracing::debug!(codec = %codec, bits = embedded, "embedded");
                if embedded < bits.len() {
                    truncated(&mut warnings, codec, embedded, bits.len());
                }
            }
            Codec::Dwt => {
                if wavelet_capacity_bits(width, height) == 0 {
                    skip(&mut warnings, codec, width, height);
                    continue;
                }
                ran_any = true;
                let embedded = wavelet::embed(&mut buf, &bits, params.strength);
                tracing::debug!(codec = %codec, bits = embedded, "embedded");
                if embedded < bits.len() {
                    truncated(&mut warnings, codec, embedded, bits.len());
                }
            }
            Codec::Spatial => {
                if buf.pixel_count() == 0 {
                    skip(&mut warnings, codec, width, height);
                    continue;
                }
                ran_any = true;
                spatial::embed(&mut buf, &bits, params);
                tracing::debug!(codec = %codec, bits = bits.len(), "embedded");
                let capacity = spatial_capacity_bits(width, height);
                if params.repeat.is_none() && bits.len() > capacity {
                    let warning = Warning::SpreadOversubscribed {
                        message_bits: bits.len(),
                        capacity_bits: capacity,
                    };
                    tracing::warn!(%warning, "spread factor at floor");
                    warnings.push(warning);
                }
            }
        }
    }

    if !ran_any {
        return Err(MarkError::ImageTooSmall);
    }

    Ok(EmbedReport {
        buffer: buf,
        warnings,
    })
}

fn skip(warnings: &mut Vec<Warning>, codec: Codec, width: usize, height: usize) {
    let warning = Warning::CodecSkipped {
        codec,
        width,
        height,
    };
    tracing::warn!(%warning, "codec skipped");
    warnings.push(warning);
}

fn truncated(warnings: &mut Vec<Warning>, codec: Codec, embedded_bits: usize, message_bits: usize) {
    let warning = Warning::CapacityTruncated {
        codec,
        embedded_bits,
        message_bits,
    };
    tracing::warn!(%warning, "capacity exceeded");
    warnings.push(warning);
}

/// Extract with every enabled codec against one buffer.
///
/// `forced_len` overrides the length header of every codec (used when the
/// header region itself may be corrupted). Per-codec failures to fit the
/// image are marked [`ExtractOutcome::Skipped`] and never abort siblings.
///
/// # Errors
/// Parameter errors from [`MarkParams::validate`] only.
pub fn extract(
    buffer: &PixelBuffer,
    params: &MarkParams,
    forced_len: Option<u16>,
) -> Result<Vec<ExtractionResult>, MarkError> {
    params.validate()?;

    let codecs = params.codecs.enabled();

    #[cfg(feature = "parallel")]
    let results: Vec<ExtractionResult> = codecs
        .par_iter()
        .map(|&codec| extract_one(codec, buffer, params, forced_len))
        .collect();
    #[cfg(not(feature = "parallel"))]
    let results: Vec<ExtractionResult> = codecs
        .iter()
        .map(|&codec| extract_one(codec, buffer, params, forced_len))
        .collect();

    Ok(results)
}

fn extract_one(
    codec: Codec,
    buffer: &PixelBuffer,
    params: &MarkParams,
    forced_len: Option<u16>,
) -> ExtractionResult {
    let (width, height) = (buffer.width(), buffer.height());
    let forced_bits = forced_len.map(|len| len as usize * 8 + message::HEADER_BITS);

    let bits = match codec {
        Codec::Dct => {
            if freq_capacity_bits(width, height) == 0 {
                return skipped(codec, width, height);
            }
            match forced_bits {
                Some(budget) => freq::extract(buffer, budget),
                None => {
                    let header = freq::extract(buffer, message::HEADER_BITS);
                    freq::extract(buffer, message::declared_bit_count(&header))
                }
            }
        }
        Codec::Dwt => {
            if wavelet_capacity_bits(width, height) == 0 {
                return skipped(codec, width, height);
            }
            match forced_bits {
                Some(budget) => wavelet::extract(buffer, budget),
                None => {
                    let header = wavelet::extract(buffer, message::HEADER_BITS);
                    wavelet::extract(buffer, message::declared_bit_count(&header))
                }
            }
        }
        Codec::Spatial => {
            if buffer.pixel_count() == 0 {
                return skipped(codec, width, height);
            }
            match forced_bits {
                Some(budget) => spatial::extract(buffer, budget, params),
                None => spatial::extract_auto(buffer, params),
            }
        }
    };

    let text = message::decode_message(&bits, forced_len);
    let plausible = !quality::is_likely_noise(&text);
    tracing::debug!(codec = %codec, chars = text.chars().count(), plausible, "extracted");

    ExtractionResult {
        codec,
        outcome: ExtractOutcome::Decoded {
            text,
            bits,
            plausible,
        },
    }
}

fn skipped(codec: Codec, width: usize, height: usize) -> ExtractionResult {
    tracing::debug!(codec = %codec, width, height, "extraction skipped");
    ExtractionResult {
        codec,
        outcome: ExtractOutcome::Skipped { width, height },
    }
}

/// Fuse per-codec results into a consensus answer.
///
/// Picks the non-empty decoded text with the highest multiplicity of exact
/// agreement across codecs. A tie for the highest multiplicity, or no
/// non-empty text at all, means no reliable decode (`None`).
pub fn fuse(results: &[ExtractionResult]) -> Option<String> {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for result in results {
        if let Some(text) = result.text() {
            if text.is_empty() {
                continue;
            }
            match counts.iter_mut().find(|(t, _)| *t == text) {
                Some((_, n)) => *n += 1,
                None => counts.push((text, 1)),
            }
        }
    }

    let best = counts.iter().map(|&(_, n)| n).max()?;
    let mut leaders = counts.iter().filter(|&&(_, n)| n == best);
    let (text, _) = leaders.next()?;
    if leaders.next().is_some() {
        return None; // tie between distinct texts
    }
    Some((*text).to_string())
}
