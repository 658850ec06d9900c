//! The Zhang et al. identity-based homomorphic signature scheme.
//!
//! The authority publishes `hz = msk · h` and hands each node `y = r + msk · h0(hr, node)` with
//! `hr = r · h`. Signatures are `σ = y · AggregateHash` and verify against
//! `hr + h0(hr, node) · hz = y · h`.
use std::fmt;

use blstrs::{G1Projective, G2Projective, Scalar};
use group::Group;
use hc_rlnc::{CodedPiece, Field, Signer, Verifier};
use rand::Rng;
use tracing::debug;

use crate::{
    Shape,
    error::AuthError,
    hash::{encode_parts, g2_bytes, hash_to_scalar, indexed_g1, msm, pairing_eq, random_g2},
    signature::G1Signature,
};

/// The domain separation tag for the `h1` generators.
const DST: &[u8] = b"HC_RLNC_ZHANG_BLS12381G1_XMD:SHA-256_SSWU_RO_";
const H0_DST: &[u8] = b"HC_RLNC_ZHANG_H0_SHA-512";

/// Public system parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Params {
    h: G2Projective,
    /// `msk · h`.
    hz: G2Projective,
}

/// The master secret of the key authority.
#[derive(Clone)]
pub struct MasterKey {
    msk: Scalar,
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
        let h = random_g2(rng);
        let msk = Scalar::random(rng);

        Self { msk, params: Params { h, hz: h * msk } }
    }

    /// Returns the public parameters.
    pub const fn params(&self) -> &Params {
        &self.params
    }

    /// Extracts the signing key of `node_id` for the file `file_id`, split into `piece_count`
    /// pieces of `piece_size` symbols.
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
        let hr = self.params.h * r;
        let y = r + self.msk * h0(&hr, node_id);

        let shape = Shape { piece_count, piece_size };
        let public = PublicKey::new(self.params.clone(), node_id, file_id, shape, hr);
        let key = SecretKey { y, public };

        if !key.verify_private_key() {
            return Err(AuthError::InvalidNodeKey(String::from_utf8_lossy(node_id).into_owned()));
        }

        debug!(node = %String::from_utf8_lossy(node_id), "extracted zhang node key");
        Ok(key)
    }
}

fn h0(hr: &G2Projective, node_id: &[u8]) -> Scalar {
    hash_to_scalar(&encode_parts(&[&g2_bytes(hr), node_id]), H0_DST)
}

/// The public key of one node for one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKey {
    params: Params,
    shape: Shape,
    hr: G2Projective,
    /// `hr + h0(hr, node) · hz`.
    node_point: G2Projective,
    /// `h1(file, i)` for every position of `piece ‖ coding_vector`.
    generators: Vec<G1Projective>,
}

impl PublicKey {
    /// Derives the public key of `node_id` from the system parameters and the node's `hr`.
    pub fn new(
        params: Params,
        node_id: &[u8],
        file_id: &[u8],
        shape: Shape,
        hr: G2Projective,
    ) -> Self {
        let node_point = hr + params.hz * h0(&hr, node_id);
        let generators = indexed_g1(file_id, &[], shape.piece_size + shape.piece_count, DST);

        Self { params, shape, hr, node_point, generators }
    }

    /// Returns the node's public commitment `hr`.
    pub const fn hr(&self) -> &G2Projective {
        &self.hr
    }

    /// Returns the dimensions of the pieces this key signs.
    pub const fn shape(&self) -> Shape {
        self.shape
    }

    /// Computes the aggregate hash `Σ x_i · h1(file, i)` where `x = piece ‖ coding_vector`.
    ///
    /// # Panics
    /// If the lengths do not match the key's [`Shape`].
    pub fn aggregate_hash(&self, piece: &[Scalar], coding_vector: &[Scalar]) -> G1Projective {
        assert_eq!(piece.len(), self.shape.piece_size, "piece size mismatch");
        assert_eq!(coding_vector.len(), self.shape.piece_count, "piece count mismatch");

        msm(&self.generators, &[piece, coding_vector].concat())
    }
}

impl Verifier for PublicKey {
    type Field = Scalar;
    type Signature = G1Signature;

    fn verify(&self, piece: &CodedPiece<Scalar, G1Signature>) -> bool {
        // The aggregate hash does not see where the payload ends and the coding vector begins.
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
    y: Scalar,
    public: PublicKey,
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey").field("public", &self.public).finish_non_exhaustive()
    }
}

impl SecretKey {
    /// Returns true if `e(g · y, h) == e(g, hr + h0(hr, node) · hz)` for the G1 generator `g`.
    pub fn verify_private_key(&self) -> bool {
        let g = G1Projective::generator();
        pairing_eq(&(g * self.y), &self.public.params.h, &g, &self.public.node_point)
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
        G1Signature(self.public.aggregate_hash(piece, coding_vector) * self.y)
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
    fn test_zhang_scheme() {
        let mut rng = StdRng::seed_from_u64(1);
        let master = MasterKey::setup(&mut rng);
        let key = master.extract(b"node-1", FILE, 3, 3, &mut rng).unwrap();

        assert!(key.verify_private_key());
        check_scheme(&key, 3, 3, 2);
    }

    #[test]
    fn test_zhang_public_key_is_derivable() {
        let mut rng = StdRng::seed_from_u64(3);
        let master = MasterKey::setup(&mut rng);
        let key = master.extract(b"node-1", FILE, 1, 1, &mut rng).unwrap();

        let hr = *key.public_key().hr();
        let shape = key.public_key().shape();
        let derived = PublicKey::new(master.params().clone(), b"node-1", FILE, shape, hr);
        assert_eq!(&derived, key.public_key());

        let impostor = PublicKey::new(master.params().clone(), b"node-2", FILE, shape, hr);
        let piece = vec![Scalar::from(3u64)];
        let cv = vec![Scalar::ONE];
        let signature = key.sign(&piece, &cv, &mut rng);
        assert!(!impostor.verify(&CodedPiece::new(piece, cv, signature)));
    }

    #[test]
    fn test_zhang_forged_node_key_fails_validation() {
        let mut rng = StdRng::seed_from_u64(5);
        let master = MasterKey::setup(&mut rng);
        let mut key = master.extract(b"node-1", FILE, 2, 2, &mut rng).unwrap();

        key.y += Scalar::ONE;
        assert!(!key.verify_private_key());
    }

    #[test]
    fn test_zhang_rejects_shifted_boundary() {
        let mut rng = StdRng::seed_from_u64(6);
        let master = MasterKey::setup(&mut rng);
        let key = master.extract(b"node-1", FILE, 2, 3, &mut rng).unwrap();

        let piece = vec![Scalar::from(5u64), Scalar::from(6u64), Scalar::from(7u64)];
        let cv = vec![Scalar::ONE, Scalar::from(2u64)];
        let signature = key.sign(&piece, &cv, &mut rng);
        let signed = CodedPiece::new(piece, cv, signature);
        assert!(key.verifier().verify(&signed));

        // Same `piece ‖ coding_vector` sequence, last payload symbol moved into the vector.
        let mut shifted = signed;
        let last = shifted.piece.pop().unwrap();
        shifted.coding_vector.insert(0, last);
        assert_eq!(shifted.data_len(), 5);
        assert!(!key.verifier().verify(&shifted));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn test_zhang_homomorphism(
            seed in any::<u64>(),
            (size, count, coefficients) in arb_shape(),
        ) {
            let mut rng = StdRng::seed_from_u64(seed);
            let master = MasterKey::setup(&mut rng);
            let key = master.extract(b"node-1", FILE, count, size, &mut rng).unwrap();

            check_homomorphism(&key, size, &scalars(&coefficients), seed);
        }
    }
}
