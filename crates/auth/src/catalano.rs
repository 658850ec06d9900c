//! The Catalano et al. homomorphic signature scheme.
//!
//! A signature is a pair `(X, s)`. The aggregate hash is blinded by the fresh random scalar `s`,
//! `AggregateHash(s) = s · h + Σ cv_i · h_i + Σ piece_j · g_j`, and
//! `X = AggregateHash(s) / (fid + z)`. Both components combine linearly.
use std::fmt;

use blstrs::{G1Projective, G2Projective, Scalar};
use hc_rlnc::{CodedPiece, Field, Signer, Verifier};
use rand::Rng;
use tracing::debug;

use crate::{
    hash::{hash_to_scalar, msm, pairing_eq, random_g1, random_g2},
    signature::CatalanoSignature,
};

/// The domain separation tag for hashing file identifiers to scalars.
const DST: &[u8] = b"HC_RLNC_CATALANO_FID_SHA-512";

/// The public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    /// The file identifier as a scalar.
    fid: Scalar,
    g_prime: G2Projective,
    /// `z · g'`.
    big_z: G2Projective,
    h: G1Projective,
    /// One generator per coding-vector slot.
    h_vec: Vec<G1Projective>,
    /// One generator per payload position.
    g_vec: Vec<G1Projective>,
}

impl PublicKey {
    /// Returns the number of original pieces this key signs for.
    pub fn piece_count(&self) -> usize {
        self.h_vec.len()
    }

    /// Returns the number of payload symbols this key signs.
    pub fn piece_size(&self) -> usize {
        self.g_vec.len()
    }

    /// Computes `s · h + Σ coding_vector[i] · h_i + Σ piece[j] · g_j`.
    ///
    /// # Panics
    /// If the lengths do not match the key.
    pub fn aggregate_hash(
        &self,
        s: Scalar,
        piece: &[Scalar],
        coding_vector: &[Scalar],
    ) -> G1Projective {
        self.h * s + msm(&self.h_vec, coding_vector) + msm(&self.g_vec, piece)
    }
}

impl Verifier for PublicKey {
    type Field = Scalar;
    type Signature = CatalanoSignature;

    fn verify(&self, piece: &CodedPiece<Scalar, CatalanoSignature>) -> bool {
        if piece.piece.len() != self.piece_size()
            || piece.coding_vector.len() != self.piece_count()
        {
            return false;
        }

        let hashed = self.aggregate_hash(piece.signature.s, &piece.piece, &piece.coding_vector);
        let verify_point = self.big_z + self.g_prime * self.fid;
        pairing_eq(&piece.signature.x, &verify_point, &hashed, &self.g_prime)
    }

    fn combine(
        &self,
        signatures: &[CatalanoSignature],
        coefficients: &[Scalar],
    ) -> CatalanoSignature {
        CatalanoSignature::combine(signatures, coefficients)
    }
}

/// The secret key `z`, bundled with its public key.
#[derive(Clone)]
pub struct SecretKey {
    /// `1 / (fid + z)`.
    exponent: Scalar,
    public: PublicKey,
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey").field("public", &self.public).finish_non_exhaustive()
    }
}

impl SecretKey {
    /// Generates a key for `piece_count` pieces of `piece_size` symbols of the file `file_id`.
    pub fn keygen<R: Rng + ?Sized>(
        piece_count: usize,
        piece_size: usize,
        file_id: &[u8],
        rng: &mut R,
    ) -> Self {
        let fid = hash_to_scalar(file_id, DST);

        // `fid + z` must be invertible.
        let (z, exponent) = loop {
            let z = Scalar::random(rng);
            if let Some(exponent) = Field::inverse(&(fid + z)) {
                break (z, exponent);
            }
        };

        let g_prime = random_g2(rng);
        let big_z = g_prime * z;
        let h = random_g1(rng);
        let h_vec = (0..piece_count).map(|_| random_g1(rng)).collect();
        let g_vec = (0..piece_size).map(|_| random_g1(rng)).collect();

        debug!(piece_count, piece_size, "generated catalano key");

        Self { exponent, public: PublicKey { fid, g_prime, big_z, h, h_vec, g_vec } }
    }

    /// Returns the public key.
    pub const fn public_key(&self) -> &PublicKey {
        &self.public
    }
}

impl Signer for SecretKey {
    type Field = Scalar;
    type Signature = CatalanoSignature;
    type Verifier = PublicKey;

    fn sign<R: Rng + ?Sized>(
        &self,
        piece: &[Scalar],
        coding_vector: &[Scalar],
        rng: &mut R,
    ) -> CatalanoSignature {
        let s = Scalar::random(rng);
        let x = self.public.aggregate_hash(s, piece, coding_vector) * self.exponent;

        CatalanoSignature { x, s }
    }

    fn verifier(&self) -> &PublicKey {
        &self.public
    }
}
