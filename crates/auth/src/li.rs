//! The Li et al. identity-based homomorphic signature scheme.
//!
//! A trusted authority holds the master secret `s` and publishes `mpk = s · h`. It extracts a
//! key `sk = r + s · h0(node, R)` with `R = r · h` for each node. Anyone can derive the node's
//! verification point `R + h0(node, R) · mpk = sk · h` from public data.
use std::fmt;

use blstrs::{G1Projective, G2Projective, Scalar};
use hc_rlnc::{CodedPiece, Field, Signer, Verifier};
use rand::Rng;
use tracing::debug;

use crate::{
    Shape,
    error::AuthError,
    hash::{
        encode_parts, g2_bytes, hash_to_scalar, indexed_g1, msm, pairing_eq, random_g1, random_g2,
    },
    signature::G1Signature,
};

/// The domain separation tag for the `h1` generators.
const DST: &[u8] = b"HC_RLNC_LI_BLS12381G1_XMD:SHA-256_SSWU_RO_";
const H0_DST: &[u8] = b"HC_RLNC_LI_H0_SHA-512";
const H2_DST: &[u8] = b"HC_RLNC_LI_H2_SHA-512";

/// Public system parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    g: G1Projective,
    h: G2Projective,
    /// The master public key `s · h`.
    mpk: G2Projective,
}

/// The master secret of the key authority.
#[derive(Clone)]
pub struct MasterKey {
    s: Scalar,
    params: Params,
}

impl fmt::Debug for MasterKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MasterKey").field("params", &self.params).finish_non_exhaustive()
    }
}

impl MasterKey {
    /// Samples a new master secret and the public parameters.
    pub fn setup<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let g = random_g1(rng);
        let h = random_g2(rng);
        let s = Scalar::random(rng);

        Self { s, params: Params { g, h, mpk: h * s } }
    }

    /// Returns the public parameters.
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// Extracts the signing key of `node_id` for the file `file_id`, split into `piece_count`
    /// pieces of `piece_size` symbols, and checks it against the master public key.
    pub fn extract<R: Rng + ?Sized>(
        &self,
        node_id: &[u8],
        file_id: &[u8],
        piece_count: usize,
        piece_size: usize,
        rng: &mut R,
    ) -> Result<SecretKey, AuthError> {
        if node_id.is_empty() || file_id.is_empty() {
            return Err(AuthError::EmptyIdentifier);
        }

        let r = Scalar::random(rng);
        let big_r = self.params.h * r;
        let sk = r + self.s * h0(node_id, &g2_bytes(&big_r));

        let shape = Shape { piece_count, piece_size };
        let public = PublicKey::new(self.params.clone(), node_id, file_id, shape, big_r);
        let key = SecretKey { sk, public };

        if !key.verify_private_key() {
            return Err(AuthError::InvalidNodeKey(String::from_utf8_lossy(node_id).into_owned()));
        }

        debug!(node = %String::from_utf8_lossy(node_id), "extracted li node key");
        Ok(key)
    }
}

fn h0(node_id: &[u8], big_r: &[u8]) -> Scalar {
    hash_to_scalar(&encode_parts(&[node_id, big_r]), H0_DST)
}

fn h2(node_id: &[u8], index: usize, file_id: &[u8], big_r: &[u8]) -> Scalar {
    let index = (index as u64).to_le_bytes();
    hash_to_scalar(&encode_parts(&[node_id, &index, file_id, big_r]), H2_DST)
}

/// The public key of one node for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    params: Params,
    shape: Shape,
    big_r: G2Projective,
    /// `R + h0(node, R) · mpk`.
    node_point: G2Projective,
    /// `h1(file, i)` for every position of `piece ‖ coding_vector`.
    generators: Vec<G1Projective>,
    /// `h2(node, j, file, R)` for every payload position.
    weights: Vec<Scalar>,
}

impl PublicKey {
    /// Derives the public key of `node_id` from the system parameters and the node's `R`.
    pub fn new(
        params: Params,
        node_id: &[u8],
        file_id: &[u8],
        shape: Shape,
        big_r: G2Projective,
    ) -> Self {
        let big_r_bytes = g2_bytes(&big_r);
        let node_point = big_r + params.mpk * h0(node_id, &big_r_bytes);
        let generators = indexed_g1(file_id, &[], shape.piece_size + shape.piece_count, DST);
        let weights =
            (0..shape.piece_size).map(|j| h2(node_id, j, file_id, &big_r_bytes)).collect();

        Self { params, shape, big_r, node_point, generators, weights }
    }

    /// Returns the node's public commitment `R`.
    pub const fn big_r(&self) -> &G2Projective {
        &self.big_r
    }

    /// Returns the dimensions of the pieces this key signs.
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Computes the aggregate hash `Σ x_i · h1(file, i) + g · Σ_j h2(node, j, file, R) · piece_j`
    /// where `x = piece ‖ coding_vector`.
    ///
    /// # Panics
    /// If the lengths do not match the key's [`Shape`].
    pub fn aggregate_hash(&self, piece: &[Scalar], coding_vector: &[Scalar]) -> G1Projective {
        assert_eq!(piece.len(), self.shape.piece_size, "piece size mismatch");
        assert_eq!(coding_vector.len(), self.shape.piece_count, "piece count mismatch");

        let exponent =
            piece.iter().zip(&self.weights).fold(Scalar::ZERO, |acc, (&x, &w)| acc + w * x);

        msm(&self.generators, &[piece, coding_vector].concat()) + self.params.g * exponent
    }
}

impl Verifier for PublicKey {
    type Field = Scalar;
    type Signature = G1Signature;

    fn verify(&self, piece: &CodedPiece<Scalar, G1Signature>) -> bool {
        if piece.piece.len() != self.shape.piece_size
            || piece.coding_vector.len() != self.shape.piece_count
        {
            return false;
        }

        let hashed = self.aggregate_hash(&piece.piece, &piece.coding_vector);
        pairing_eq(&piece.signature.0, &self.params.h, &hashed, &self.node_point)
    }

    fn combine(&self, signatures: &[G1Signature], coefficients: &[Scalar]) -> G1Signature {
        G1Signature::combine(signatures, coefficients)
    }
}

/// The signing key of one node.
#[derive(Clone)]
pub struct SecretKey {
    sk: Scalar,
    public: PublicKey,
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey").field("public", &self.public).finish_non_exhaustive()
    }
}

impl SecretKey {
    /// Returns true if `e(g · sk, h) == e(g, R + h0(node, R) · mpk)`.
    pub fn verify_private_key(&self) -> bool {
        let params = &self.public.params;
        pairing_eq(&(params.g * self.sk), &params.h, &params.g, &self.public.node_point)
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
        G1Signature(self.public.aggregate_hash(piece, coding_vector) * self.sk)
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

    const FILE: &[u8] = b"file.bin";

    #[test]
    fn test_li_scheme() {
        let mut rng = StdRng::seed_from_u64(1);
        let master = MasterKey::setup(&mut rng);
        let key = master.extract(b"node-1", FILE, 3, 4, &mut rng).unwrap();

        assert!(key.verify_private_key());
        check_scheme(&key, 4, 3, 2);
    }

    #[test]
    fn test_li_public_key_is_derivable() {
        let mut rng = StdRng::seed_from_u64(3);
        let master = MasterKey::setup(&mut rng);
        let key = master.extract(b"node-1", FILE, 2, 3, &mut rng).unwrap();

        let big_r = *key.public_key().big_r();
        let shape = key.public_key().shape();
        let derived = PublicKey::new(master.params().clone(), b"node-1", FILE, shape, big_r);
        assert_eq!(&derived, key.public_key());
    }

    #[test]
    fn test_li_node_keys_are_not_interchangeable() {
        let mut rng = StdRng::seed_from_u64(4);
        let master = MasterKey::setup(&mut rng);
        let alice = master.extract(b"alice", FILE, 1, 1, &mut rng).unwrap();
        let bob = master.extract(b"bob", FILE, 1, 1, &mut rng).unwrap();

        let piece = vec![Scalar::from(7u64)];
        let cv = vec![Scalar::ONE];
        let signature = alice.sign(&piece, &cv, &mut rng);

        assert!(!bob.verifier().verify(&CodedPiece::new(piece, cv, signature)));
    }

    #[test]
    fn test_li_forged_node_key_fails_validation() {
        let mut rng = StdRng::seed_from_u64(5);
        let master = MasterKey::setup(&mut rng);
        let mut key = master.extract(b"node-1", FILE, 2, 2, &mut rng).unwrap();

        key.sk += Scalar::ONE;
        assert!(!key.verify_private_key());
    }

    #[test]
    fn test_li_empty_identifier() {
        let master = MasterKey::setup(&mut StdRng::seed_from_u64(6));
        assert_eq!(
            master.extract(b"", FILE, 2, 2, &mut StdRng::seed_from_u64(7)).unwrap_err(),
            AuthError::EmptyIdentifier
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn test_li_homomorphism(seed in any::<u64>(), (size, count, coefficients) in arb_shape()) {
            let mut rng = StdRng::seed_from_u64(seed);
            let master = MasterKey::setup(&mut rng);
            let key = master.extract(b"node-1", FILE, count, size, &mut rng).unwrap();

            check_homomorphism(&key, size, &scalars(&coefficients), seed);
        }
    }
}
