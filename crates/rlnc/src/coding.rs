//! Coding vectors and the bulk vector arithmetic shared by the encoder, recoder and decoder.

use rand::Rng;

use crate::primitives::field::Field;

/// Draws `n` uniformly random coefficients. The all-zero vector is not rejected.
///
/// # Panics
/// If `n` is zero.
pub fn generate_coding_vector<F: Field, R: Rng + ?Sized>(rng: &mut R, n: usize) -> Vec<F> {
    assert!(n > 0, "coding vector length must be greater than 0");

    (0..n).map(|_| F::random(rng)).collect()
}

/// Returns the standard basis vector of length `n` with a one at `index`.
///
/// # Panics
/// If `n` is zero or `index >= n`.
pub fn generate_systematic_vector<F: Field>(index: usize, n: usize) -> Vec<F> {
    assert!(index < n, "systematic index {index} out of range for length {n}");

    let mut vector = vec![F::ZERO; n];
    vector[index] = F::ONE;
    vector
}

/// Returns the position of the single unit entry if `vector` is a standard basis vector.
pub fn is_systematic<F: Field>(vector: &[F]) -> Option<usize> {
    let mut position = None;

    for (i, coefficient) in vector.iter().enumerate() {
        if coefficient.is_zero() {
            continue;
        }

        if !coefficient.is_one() || position.is_some() {
            return None;
        }

        position = Some(i);
    }

    position
}

/// Computes `dst += src * scalar`.
///
/// # Panics
/// If the slices differ in length.
#[inline]
pub fn scale_add<F: Field>(dst: &mut [F], src: &[F], scalar: F) {
    assert_eq!(dst.len(), src.len(), "vector length mismatch");

    if scalar.is_zero() {
        return;
    }

    for (d, &s) in dst.iter_mut().zip(src) {
        *d += s * scalar;
    }
}

/// Computes `dst -= src * scalar`.
#[inline]
pub(crate) fn scale_sub<F: Field>(dst: &mut [F], src: &[F], scalar: F) {
    scale_add(dst, src, -scalar);
}

/// Computes `dst *= scalar`.
#[inline]
pub(crate) fn scale<F: Field>(dst: &mut [F], scalar: F) {
    for d in dst {
        *d *= scalar;
    }
}

/// Returns `Σ coefficients[i] * rows[i]`, where every row has length `len`.
///
/// # Panics
/// If the number of rows and coefficients differ, or a row is not `len` long.
pub fn linear_combination<'a, F, I>(rows: I, coefficients: &[F], len: usize) -> Vec<F>
where
    F: Field,
    I: IntoIterator<Item = &'a [F]>,
{
    let mut result = vec![F::ZERO; len];
    let mut count = 0;

    for (row, &coefficient) in rows.into_iter().zip(coefficients) {
        scale_add(&mut result, row, coefficient);
        count += 1;
    }

    assert_eq!(count, coefficients.len(), "row count does not match coefficient count");
    result
}
