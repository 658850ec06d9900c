//! The Chang et al. variant of the Boneh scheme. The coding-vector generators are hashed together
//! with the public key, binding the hash family to the signer.
use std::fmt;

use blstrs::{G1Projective, G2Projective, Scalar};
use hc_rlnc::{CodedPiece, Field, Signer, Verifier};
use rand::Rng;
use tracing::debug;

use crate::{
    hash::{g2_bytes, indexed_g1, msm, pairing_eq, random_g1, random_g2},
    signature::G1Signature,
};

/// The domain separation tag for the coding-vector generators.
const DST: &[u8] = b"HC_RLNC_CHANG_BLS12381G1_XMD:SHA-256_SSWU_RO_";

/// The public key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    id: Vec<u8>,
    h: G2Projective,
    u: G2Projective,
    generators: Vec<G1Projective>,
    piece_count: usize,
}

impl PublicKey {
    /// Returns the number of payload symbols this key signs.
    pub fn piece_size(&self) -> usize {
        self.generators.len()
    }

    /// Returns the number of original pieces, i.e. the coding vector length.
    pub const fn piece_count(&self) -> usize {
        self.piece_count
    }

    /// Computes the aggregate hash `Σ piece[i] · g_i + Σ coding_vector[j] · H(id ‖ j ‖ u)`.
    ///
    /// # Panics
    /// If `piece` is not [`piece_size`](Self::piece_size) long or `coding_vector` is not
    /// [`piece_count`](Self::piece_count) long.
    pub fn aggregate_hash(&self, piece: &[Scalar], coding_vector: &[Scalar]) -> G1Projective {
        assert_eq!(piece.len(), self.generators.len(), "piece size mismatch");
        assert_eq!(coding_vector.len(), self.piece_count, "piece count mismatch");

        let mut points = self.generators.clone();
        points.extend(indexed_g1(&self.id, &g2_bytes(&self.u), coding_vector.len(), DST));

        msm(&points, &[piece, coding_vector].concat())
    }
}

impl Verifier for PublicKey {
    type Field = Scalar;
    type Signature = G1Signature;

    fn verify(&self, piece: &CodedPiece<Scalar, G1Signature>) -> bool {
        if piece.piece.len() != self.piece_size() || piece.coding_vector.len() != self.piece_count {
            return false;
        }

        let hashed = self.aggregate_hash(&piece.piece, &piece.coding_vector);
        pairing_eq(&piece.signature.0, &self.h, &hashed, &self.u)
    }

    fn combine(&self, signatures: &[G1Signature], coefficients: &[Scalar]) -> G1Signature {
        G1Signature::combine(signatures, coefficients)
    }
}

/// The secret key.
#[derive(Clone)]
pub struct SecretKey {
    alpha: Scalar,
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
        let mut nonce = [0u8; 16];
        rng.fill(&mut nonce);

        let h = random_g2(rng);
        let alpha = Scalar::random(rng);
        let generators = (0..piece_size).map(|_| random_g1(rng)).collect();

        debug!(piece_count, piece_size, "generated chang key");

        Self {
            alpha,
            public: PublicKey {
                id: [file_id, &nonce].concat(),
                h,
                u: h * alpha,
                generators,
                piece_count,
            },
        }
    }

    /// Returns the public key.
    pub const fn public_key(&self) -> &PublicKey {
        &self.public
    }
}

impl Signer for SecretKey {
    type Field = Scalar;
    type Signature = G1Signature;
    type Verifier = PublicKey;

    fn sign<R: Rng + ?Sized>(
        &self,
        piece: &[Scalar],
        coding_vector: &[Scalar],
        _rng: &mut R,
    ) -> G1Signature {
        G1Signature(self.public.aggregate_hash(piece, coding_vector) * self.alpha)
    }

    fn verifier(&self) -> &PublicKey {
        &self.public
    }
}
