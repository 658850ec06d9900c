//! Field elements.
use std::{
    fmt::Debug,
    ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign},
};

pub use blstrs::Scalar;
use group::ff::Field as FiniteField;
use rand::Rng;

/// A finite field element, as used for both the coded symbols and the coding coefficients.
///
/// Besides arithmetic, a field knows how to pack raw bytes into elements (see
/// [`SAFE_CAPACITY`](Field::SAFE_CAPACITY)) and how to encode itself canonically on the wire
/// (see [`ENCODED_LEN`](Field::ENCODED_LEN)).
pub trait Field:
    Copy
    + Debug
    + Eq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    /// The additive identity.
    const ZERO: Self;
    /// The multiplicative identity.
    const ONE: Self;
    /// The maximum number of bytes that can be safely stored in a field element.
    const SAFE_CAPACITY: usize;
    /// The length of the canonical wire encoding.
    const ENCODED_LEN: usize;

    /// Returns true if this is the additive identity.
    fn is_zero(&self) -> bool;

    /// Returns true if this is the multiplicative identity.
    fn is_one(&self) -> bool {
        *self == Self::ONE
    }

    /// Computes the multiplicative inverse. Returns `None` for zero.
    fn inverse(&self) -> Option<Self>;

    /// Samples a uniformly random element.
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Packs at most [`SAFE_CAPACITY`](Field::SAFE_CAPACITY) bytes into a field element.
    fn from_bytes(bytes: &[u8]) -> Self;

    /// Unpacks the element into exactly [`SAFE_CAPACITY`](Field::SAFE_CAPACITY) bytes.
    fn to_bytes(&self) -> Vec<u8>;

    /// Canonical wire encoding, [`ENCODED_LEN`](Field::ENCODED_LEN) bytes long.
    fn to_canonical_bytes(&self) -> Vec<u8>;

    /// Decodes a canonical wire encoding. Returns `None` if the bytes are not a valid element.
    fn from_canonical_bytes(bytes: &[u8]) -> Option<Self>;
}

impl Field for Scalar {
    const ZERO: Self = <Self as FiniteField>::ZERO;
    const ONE: Self = <Self as FiniteField>::ONE;
    const SAFE_CAPACITY: usize = 31;
    const ENCODED_LEN: usize = 32;

    fn is_zero(&self) -> bool {
        FiniteField::is_zero_vartime(self)
    }

    fn inverse(&self) -> Option<Self> {
        FiniteField::invert(self).into()
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        // Rejection sampling over 255-bit values, the modulus is a bit more than 2^254.
        loop {
            let mut bytes: [u8; 32] = rng.random();
            bytes[31] &= 0x7f;

            if let Some(scalar) = Option::<Self>::from(Self::from_bytes_le(&bytes)) {
                return scalar;
            }
        }
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        assert!(bytes.len() <= Self::SAFE_CAPACITY, "too many bytes for a scalar");

        let mut buf = [0u8; 32];
        buf[..bytes.len()].copy_from_slice(bytes);
        Option::from(Self::from_bytes_le(&buf)).expect("31 bytes are always below the modulus")
    }

    fn to_bytes(&self) -> Vec<u8> {
        self.to_bytes_le()[..Self::SAFE_CAPACITY].to_vec()
    }

    fn to_canonical_bytes(&self) -> Vec<u8> {
        self.to_bytes_le().to_vec()
    }

    fn from_canonical_bytes(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; 32] = bytes.try_into().ok()?;
        Self::from_bytes_le(&bytes).into()
    }
}
