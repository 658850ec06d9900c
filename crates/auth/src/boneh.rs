//! The Boneh et al. homomorphic signature scheme for network coding.
//!
//! # Idea
//! Payload positions get random G1 generators, coding-vector slots get generators hashed from a
//! per-session identifier. The aggregate hash of a piece is the multi-exponentiation of these
//! generators by `piece ‖ coding_vector`, so it is linear in the piece, and so is the signature
//! `σ = α · AggregateHash`. Verification checks `e(σ, h) == e(AggregateHash, u)` with `u = α · h`.
use std::fmt;

use blstrs::{G1Projective, G2Projective, Scalar};
use hc_rlnc::{CodedPiece, Field, Signer, Verifier};
use rand::Rng;
use tracing::debug;

use crate::{
    hash::{indexed_g1, msm, pairing_eq, random_g1, random_g2},
    signature::G1Signature,
};

/// The domain separation tag for the coding-vector generators.
const DST: &[u8] = b"HC_RLNC_BONEH_BLS12381G1_XMD:SHA-256_SSWU_RO_";

/// The public key. Verifies and combines signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    /// File identifier followed by a random session nonce.
    id: Vec<u8>,
    h: G2Projective,
    /// `α · h`.
    u: G2Projective,
    /// One generator per payload position.
    generators: Vec<G1Projective>,
    /// The coding vector length.
    piece_count: usize,
}

impl PublicKey {
    /// Returns the session identifier the coding-vector generators are derived from.
    pub fn id(&self) -> &[u8] {
        &self.id
    }

    /// Returns the number of payload symbols this key signs.
    pub fn piece_size(&self) -> usize {
        self.generators.len()
    }

    /// Returns the number of original pieces, i.e. the coding vector length.
    pub const fn piece_count(&self) -> usize {
        self.piece_count
    }

    /// Computes the aggregate hash `Σ piece[i] · g_i + Σ coding_vector[j] · H(id ‖ j)`.
    ///
    /// # Panics
    /// If `piece` is not [`piece_size`](Self::piece_size) long or `coding_vector` is not
    /// [`piece_count`](Self::piece_count) long.
    pub fn aggregate_hash(&self, piece: &[Scalar], coding_vector: &[Scalar]) -> G1Projective {
        assert_eq!(piece.len(), self.generators.len(), "piece size mismatch");
        assert_eq!(coding_vector.len(), self.piece_count, "piece count mismatch");

        let mut points = self.generators.clone();
        points.extend(indexed_g1(&self.id, &[], coding_vector.len(), DST));

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

/// The secret key `α`, bundled with its public key.
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
    /// Generates a key for `piece_count` pieces of `piece_size` symbols of the file `file_id`. A
    /// random nonce is appended to the identifier, so that signatures from different sessions do
    /// not mix.
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

        debug!(piece_count, piece_size, "generated boneh key");

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{arb_shape, check_homomorphism, check_scheme, scalars};
    use proptest::prelude::*;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_boneh_scheme() {
        let key = SecretKey::keygen(3, 6, b"file.bin", &mut StdRng::seed_from_u64(1));
        check_scheme(&key, 6, 3, 2);
    }

    #[test]
    fn test_boneh_sessions_are_independent() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = SecretKey::keygen(1, 2, b"file.bin", &mut rng);
        let b = SecretKey::keygen(1, 2, b"file.bin", &mut rng);
        assert_ne!(a.public_key().id(), b.public_key().id());

        let piece = vec![Scalar::from(1u64), Scalar::from(2u64)];
        let cv = vec![Scalar::ONE];
        let signature = a.sign(&piece, &cv, &mut rng);

        assert!(a.verifier().verify(&CodedPiece::new(piece.clone(), cv.clone(), signature)));
        assert!(!b.verifier().verify(&CodedPiece::new(piece, cv, signature)));
    }

    #[test]
    fn test_boneh_rejects_wrong_piece_size() {
        let mut rng = StdRng::seed_from_u64(4);
        let key = SecretKey::keygen(1, 2, b"file.bin", &mut rng);
        let signature = G1Signature(random_g1(&mut rng));

        let piece = CodedPiece::new(vec![Scalar::ONE; 3], vec![Scalar::ONE], signature);
        assert!(!key.verifier().verify(&piece));
    }

    #[test]
    fn test_boneh_rejects_zero_padded_coding_vector() {
        let mut rng = StdRng::seed_from_u64(5);
        let key = SecretKey::keygen(2, 2, b"file.bin", &mut rng);

        let piece = vec![Scalar::from(4u64), Scalar::from(9u64)];
        let cv = vec![Scalar::ONE, Scalar::from(2u64)];
        let signature = key.sign(&piece, &cv, &mut rng);

        // The extra generator has a zero coefficient, so the aggregate hash is unchanged.
        let mut padded = CodedPiece::new(piece, cv, signature);
        assert!(key.verifier().verify(&padded));
        padded.coding_vector.push(Scalar::ZERO);
        assert!(!key.verifier().verify(&padded));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn test_boneh_homomorphism(
            seed in any::<u64>(),
            (size, count, coefficients) in arb_shape(),
        ) {
            let key = SecretKey::keygen(count, size, b"file.bin", &mut StdRng::seed_from_u64(seed));
            check_homomorphism(&key, size, &scalars(&coefficients), seed);
        }
    }
}
