// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stillmark

//! Plausibility screening for recovered text.
//!
//! Extraction always produces *some* bit sequence, watermark or not. This
//! heuristic flags a decoded string that is statistically more likely to be
//! noise than a real message, so callers can hide it behind a diagnostic
//! surface instead of presenting it as the answer. Advisory only — it never
//! prevents decoding.

/// Noise fraction at or above which a string is flagged. Inclusive.
const NOISE_RATIO: f64 = 0.35;

/// Minimum length for the degenerate-repetition check.
const REPETITION_MIN_LEN: usize = 6;

/// Maximum distinct characters considered degenerate repetition.
const REPETITION_MAX_DISTINCT: usize = 2;

/// Classify a decoded string as likely noise.
///
/// A character counts as noisy when it is a control character (below 0x20,
/// or 0x7F–0x9F), the replacement character U+FFFD, or outside the common
/// text class (ASCII word characters, whitespace, standard Latin and CJK
/// punctuation, CJK unified ideographs). The string is flagged when the
/// noisy fraction reaches [`NOISE_RATIO`], or when at least six characters
/// are drawn from at most two distinct ones. Empty and whitespace-only
/// strings are not flagged.
pub fn is_likely_noise(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }

    let chars: Vec<char> = trimmed.chars().collect();
    let noisy = chars.iter().filter(|&&ch| is_noisy_char(ch)).count();

    if noisy as f64 / chars.len() as f64 >= NOISE_RATIO {
        return true;
    }

    if chars.len() >= REPETITION_MIN_LEN {
        let mut distinct = chars.clone();
        distinct.sort_unstable();
        distinct.dedup();
        if distinct.len() <= REPETITION_MAX_DISTINCT {
            return true;
        }
    }

    false
}

#[inline]
fn is_noisy_char(ch: char) -> bool {
    let code = ch as u32;
    let is_control = code < 0x20 || (0x7F..=0x9F).contains(&code);
    is_control || ch == '\u{FFFD}' || !is_common_char(ch)
}

/// The broad "common text" character class.
fn is_common_char(ch: char) -> bool {
    if ch.is_ascii_alphanumeric() || ch == '_' || ch.is_whitespace() {
        return true;
    }
    // Latin punctuation.
    if matches!(
        ch,
        '.' | ','
            | ';'
            | ':'
            | '!'
            | '?'
            | '"'
            | '\''
            | '`'
            | '~'
            | '-'
            | '('
            | ')'
            | '['
            | ']'
            | '{'
            | '}'
    ) {
        return true;
    }
    // Common CJK punctuation.
    if matches!(
        ch,
        '…' | '，'
            | '。'
            | '！'
            | '？'
            | '【'
            | '】'
            | '（'
            | '）'
            | '《'
            | '》'
            | '、'
            | '“'
            | '”'
            | '‘'
            | '’'
            | '·'
    ) {
        return true;
    }
    // CJK unified ideographs.
    ('\u{4E00}'..='\u{9FA5}').contains(&ch)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_passes() {
        assert!(!is_likely_noise("Hello, world!"));
        assert!(!is_likely_noise("The quick brown fox."));
    }

    #[test]
    fn cjk_text_passes() {
        assert!(!is_likely_noise("水印测试，这是一条消息。"));
    }

    #[test]
    fn empty_and_whitespace_pass() {
        assert!(!is_likely_noise(""));
        assert!(!is_likely_noise("   \t\n"));
    }

    #[test]
    fn ratio_boundary_is_inclusive() {
        // 20 characters, 7 of them control: 0.35 exactly — flagged.
        let at_boundary = format!("{}{}", "abcdefghijklm", "\u{1}".repeat(7));
        assert_eq!(at_boundary.chars().count(), 20);
        assert!(is_likely_noise(&at_boundary));

        // 20 characters, 6 control: 0.30 — not flagged.
        let below = format!("{}{}", "abcdefghijklmn", "\u{1}".repeat(6));
        assert_eq!(below.chars().count(), 20);
        assert!(!is_likely_noise(&below));
    }

    #[test]
    fn forty_percent_control_is_noise() {
        // 10 characters, 4 control.
        let s = format!("abcdef{}", "\u{2}".repeat(4));
        assert!(is_likely_noise(&s));
    }

    #[test]
    fn thirty_percent_control_is_not_noise() {
        // 10 characters, 3 control.
        let s = format!("abcdefg{}", "\u{2}".repeat(3));
        assert!(!is_likely_noise(&s));
    }

    #[test]
    fn replacement_chars_count_as_noise() {
        assert!(is_likely_noise("ab\u{FFFD}\u{FFFD}c"));
    }

    #[test]
    fn degenerate_repetition_is_noise() {
        assert!(is_likely_noise("aaaaaa"));
        assert!(is_likely_noise("ababababab"));
        // Five repeated characters are below the length threshold.
        assert!(!is_likely_noise("aaaaa"));
        // Three distinct characters are fine.
        assert!(!is_likely_noise("abcabcabc"));
    }

    #[test]
    fn exotic_symbols_count_as_noise() {
        // Box-drawing and dingbat soup typical of misdecoded bits.
        assert!(is_likely_noise("╬╬▓▓◊◊☼☼"));
    }
}
