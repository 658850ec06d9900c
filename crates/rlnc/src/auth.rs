//! Authentication traits. A homomorphic signature scheme plugs into the encoder, recoder and
//! decoder through these.
//!
//! The signing side ([`Signer`]) is only needed by the encoder. Recoders and decoders only hold a
//! [`Verifier`], which can check pieces and combine signatures without any secret material.
use std::{fmt::Debug, marker::PhantomData};

use rand::Rng;

use crate::primitives::{field::Field, packet::CodedPiece};

/// A signature value that travels with a coded piece.
pub trait Signature: Clone + Debug + PartialEq + Send + Sync {
    /// Length of the wire encoding in bytes.
    const ENCODED_LEN: usize;

    /// Serializes the signature.
    fn to_bytes(&self) -> Vec<u8>;

    /// Deserializes a signature. Returns `None` if the bytes do not encode a valid signature.
    fn from_bytes(bytes: &[u8]) -> Option<Self>;
}

/// The public side of a homomorphic signature scheme.
pub trait Verifier {
    /// The field the coded data lives in.
    type Field: Field;
    /// The signature type.
    type Signature: Signature;

    /// Returns true if the signature of `piece` is valid for its payload and coding vector.
    ///
    /// A `false` result is an expected outcome for corrupted or forged pieces.
    fn verify(&self, piece: &CodedPiece<Self::Field, Self::Signature>) -> bool;

    /// Combines signatures with the given coefficients. The result is a valid signature on the
    /// same linear combination of the signed pieces.
    fn combine(
        &self,
        signatures: &[Self::Signature],
        coefficients: &[Self::Field],
    ) -> Self::Signature;
}

/// The secret side of a homomorphic signature scheme.
pub trait Signer {
    /// The field the coded data lives in.
    type Field: Field;
    /// The signature type.
    type Signature: Signature;
    /// The matching public verifier.
    type Verifier: Verifier<Field = Self::Field, Signature = Self::Signature>;

    /// Signs a payload together with its coding vector.
    fn sign<R: Rng + ?Sized>(
        &self,
        piece: &[Self::Field],
        coding_vector: &[Self::Field],
        rng: &mut R,
    ) -> Self::Signature;

    /// Returns the public verifier for signatures produced by this signer.
    fn verifier(&self) -> &Self::Verifier;
}

impl<V: Verifier + ?Sized> Verifier for &V {
    type Field = V::Field;
    type Signature = V::Signature;

    fn verify(&self, piece: &CodedPiece<Self::Field, Self::Signature>) -> bool {
        (**self).verify(piece)
    }

    fn combine(
        &self,
        signatures: &[Self::Signature],
        coefficients: &[Self::Field],
    ) -> Self::Signature {
        (**self).combine(signatures, coefficients)
    }
}

/// The empty signature used when authentication is disabled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Unsigned;

impl Signature for Unsigned {
    const ENCODED_LEN: usize = 0;

    fn to_bytes(&self) -> Vec<u8> {
        Vec::new()
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        bytes.is_empty().then_some(Self)
    }
}

/// Disables authentication: every piece verifies, and nothing is signed.
pub struct NoAuth<F>(PhantomData<F>);

impl<F> NoAuth<F> {
    /// Creates a new no-op scheme.
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<F> Default for NoAuth<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> Clone for NoAuth<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F> Copy for NoAuth<F> {}

impl<F> Debug for NoAuth<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("NoAuth")
    }
}

impl<F: Field> Verifier for NoAuth<F> {
    type Field = F;
    type Signature = Unsigned;

    fn verify(&self, _piece: &CodedPiece<F, Unsigned>) -> bool {
        true
    }

    fn combine(&self, _signatures: &[Unsigned], _coefficients: &[F]) -> Unsigned {
        Unsigned
    }
}

impl<F: Field> Signer for NoAuth<F> {
    type Field = F;
    type Signature = Unsigned;
    type Verifier = Self;

    fn sign<R: Rng + ?Sized>(&self, _piece: &[F], _coding_vector: &[F], _rng: &mut R) -> Unsigned {
        Unsigned
    }

    fn verifier(&self) -> &Self {
        self
    }
}
