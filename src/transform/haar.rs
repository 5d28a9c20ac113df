// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/stillmark

//! Single-level two-dimensional Haar wavelet transform.
//!
//! One averaging/differencing pass along rows, then along columns, over a
//! flat row-major plane with even width and height. The result holds four
//! quadrants of size (h/2)×(w/2):
//!
//! ```text
//! +----+----+
//! | LL | LH |   LL approximation   LH horizontal detail
//! +----+----+
//! | HL | HH |   HL vertical detail HH diagonal detail
//! +----+----+
//! ```
//!
//! [`inverse`] reconstructs the original plane exactly up to f64 rounding.
//! Callers are responsible for trimming odd dimensions beforehand.

/// Forward single-level 2D Haar transform of a row-major `w`×`h` plane.
///
/// `w` and `h` must be even and nonzero.
pub fn forward(plane: &[f64], w: usize, h: usize) -> Vec<f64> {
    debug_assert_eq!(plane.len(), w * h);
    debug_assert!(w >= 2 && h >= 2 && w % 2 == 0 && h % 2 == 0);

    // Horizontal pass: (avg | diff) halves per row.
    let mut temp = vec![0.0f64; w * h];
    for y in 0..h {
        let row = y * w;
        for k in 0..w / 2 {
            let a = plane[row + 2 * k];
            let b = plane[row + 2 * k + 1];
            temp[row + k] = (a + b) / 2.0;
            temp[row + k + w / 2] = (a - b) / 2.0;
        }
    }

    // Vertical pass: (avg | diff) halves per column.
    let mut out = vec![0.0f64; w * h];
    for x in 0..w {
        for k in 0..h / 2 {
            let a = temp[(2 * k) * w + x];
            let b = temp[(2 * k + 1) * w + x];
            out[k * w + x] = (a + b) / 2.0;
            out[(k + h / 2) * w + x] = (a - b) / 2.0;
        }
    }
    out
}

/// Inverse single-level 2D Haar transform.
///
/// Exact inverse of [`forward`]: columns are recombined first, then rows.
pub fn inverse(coeffs: &[f64], w: usize, h: usize) -> Vec<f64> {
    debug_assert_eq!(coeffs.len(), w * h);
    debug_assert!(w >= 2 && h >= 2 && w % 2 == 0 && h % 2 == 0);

    let mut temp = vec![0.0f64; w * h];
    for x in 0..w {
        for k in 0..h / 2 {
            let avg = coeffs[k * w + x];
            let diff = coeffs[(k + h / 2) * w + x];
            temp[(2 * k) * w + x] = avg + diff;
            temp[(2 * k + 1) * w + x] = avg - diff;
        }
    }

    let mut out = vec![0.0f64; w * h];
    for y in 0..h {
        let row = y * w;
        for k in 0..w / 2 {
            let avg = temp[row + k];
            let diff = temp[row + k + w / 2];
            out[row + 2 * k] = avg + diff;
            out[row + 2 * k + 1] = avg - diff;
        }
    }
    out
}
