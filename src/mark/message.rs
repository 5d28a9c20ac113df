// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stillmark

//! Message framing: UTF-8 text to and from a length-prefixed bit sequence.
//!
//! Wire layout, most significant bit first throughout:
//!
//! ```text
//! [16 bits] payload byte length (big-endian, 0–65535)
//! [8 bits ] payload byte 0
//! [8 bits ] payload byte 1
//! ...
//! ```
//!
//! Decoding is lossy-recovery by contract: fewer than 16 bits, or a payload
//! that is not valid UTF-8, yields the empty string rather than an error —
//! extraction from an unwatermarked image must degrade quietly.

use crate::mark::error::MarkError;

/// Bit length of the payload-length header.
pub const HEADER_BITS: usize = 16;

/// Encode a text message into a bit sequence (one 0/1 value per element).
///
/// # Errors
/// [`MarkError::MessageTooLong`] if the UTF-8 payload exceeds 65 535 bytes.
pub fn encode_message(text: &str) -> Result<Vec<u8>, MarkError> {
    let bytes = text.as_bytes();
    if bytes.len() > u16::MAX as usize {
        return Err(MarkError::MessageTooLong);
    }
    let len = bytes.len() as u16;

    let mut bits = Vec::with_capacity(HEADER_BITS + bytes.len() * 8);
    for i in (0..HEADER_BITS).rev() {
        bits.push(((len >> i) & 1) as u8);
    }
    for &byte in bytes {
        for i in (0..8).rev() {
            bits.push((byte >> i) & 1);
        }
    }
    Ok(bits)
}

/// Read the length header and return the total frame bit count,
/// `16 + 8 * declared_length`. Returns 0 if fewer than 16 bits are present.
pub fn declared_bit_count(bits: &[u8]) -> usize {
    if bits.len() < HEADER_BITS {
        return 0;
    }
    HEADER_BITS + 8 * header_length(bits)
}

/// Declared payload length in bytes from the first 16 bits.
fn header_length(bits: &[u8]) -> usize {
    let mut length = 0usize;
    for &bit in &bits[..HEADER_BITS] {
        length = (length << 1) | bit as usize;
    }
    length
}

/// Decode a bit sequence back into text.
///
/// `forced_len` (when `Some` and nonzero) overrides the header length — used
/// when the header itself may be corrupted by noise. Bytes are reassembled
/// MSB-first after the header, stopping at the declared length or the end of
/// the available bits, whichever comes first; a trailing partial byte is
/// zero-padded. Invalid UTF-8 decodes to the empty string.
pub fn decode_message(bits: &[u8], forced_len: Option<u16>) -> String {
    if bits.len() < HEADER_BITS {
        return String::new();
    }

    let mut length = header_length(bits);
    match forced_len {
        Some(forced) if forced > 0 => length = forced as usize,
        _ => {}
    }

    let total_bits = length * 8;
    let mut bytes = Vec::with_capacity(length);
    let mut i = 0;
    while i < total_bits && HEADER_BITS + i < bits.len() {
        let mut val = 0u8;
        for j in 0..8 {
            let bit = bits.get(HEADER_BITS + i + j).copied().unwrap_or(0);
            val = (val << 1) | bit;
        }
        bytes.push(val);
        i += 8;
    }

    String::from_utf8(bytes).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_ascii() {
        let bits = encode_message("hello").unwrap();
        assert_eq!(bits.len(), 16 + 5 * 8);
        assert_eq!(decode_message(&bits, None), "hello");
    }

    #[test]
    fn roundtrip_unicode() {
        for msg in ["Ünïcödé 🎉", "水印测试", ""] {
            let bits = encode_message(msg).unwrap();
            assert_eq!(decode_message(&bits, None), msg, "message {msg:?}");
        }
    }

    #[test]
    fn header_is_big_endian_byte_length() {
        let bits = encode_message("hi").unwrap();
        // length 2 = 0b0000000000000010
        let header: Vec<u8> = bits[..16].to_vec();
        let mut expected = vec![0u8; 16];
        expected[14] = 1;
        assert_eq!(header, expected);
        assert_eq!(declared_bit_count(&bits), 16 + 16);
    }

    #[test]
    fn payload_bits_are_msb_first() {
        let bits = encode_message("h").unwrap(); // 'h' = 0x68 = 0b01101000
        assert_eq!(&bits[16..24], &[0, 1, 1, 0, 1, 0, 0, 0]);
    }

    #[test]
    fn too_short_sequence_is_empty() {
        assert_eq!(decode_message(&[], None), "");
        assert_eq!(decode_message(&[1; 15], None), "");
        assert_eq!(declared_bit_count(&[1; 15]), 0);
    }

    #[test]
    fn truncated_payload_stops_at_available_bits() {
        let mut bits = encode_message("hi").unwrap();
        bits.truncate(16 + 8); // only 'h' survives in full
        assert_eq!(decode_message(&bits, None), "h");
    }

    #[test]
    fn forced_length_overrides_header() {
        let mut bits = encode_message("hi").unwrap();
        // Corrupt the header to declare a huge length.
        for bit in bits[..16].iter_mut() {
            *bit = 1;
        }
        assert_eq!(decode_message(&bits, Some(2)), "hi");
        // Forced zero falls back to the (corrupted) header.
        assert_ne!(decode_message(&bits, Some(0)), "hi");
    }

    #[test]
    fn invalid_utf8_decodes_to_empty() {
        // Length 1, payload byte 0xFF — not valid UTF-8.
        let mut bits = vec![0u8; 16];
        bits[15] = 1;
        bits.extend_from_slice(&[1; 8]);
        assert_eq!(decode_message(&bits, None), "");
    }

    #[test]
    fn oversized_message_rejected() {
        let big = "a".repeat(u16::MAX as usize + 1);
        assert_eq!(encode_message(&big), Err(MarkError::MessageTooLong));
        let just_fits = "a".repeat(u16::MAX as usize);
        assert!(encode_message(&just_fits).is_ok());
    }
}
