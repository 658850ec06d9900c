//! Hashing into the pairing groups and the scalar field, and deterministic generator derivation.
use blstrs::{G1Affine, G1Projective, G2Affine, G2Projective, Scalar};
use group::Group;
use hc_rlnc::Field;
use rand::Rng;
#[cfg(feature = "parallel")]
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use sha2::{Digest, Sha512};

/// Hashes a message to G1.
pub fn hash_to_g1(msg: &[u8], dst: &[u8]) -> G1Projective {
    G1Projective::hash_to_curve(msg, dst, &[])
}

/// Hashes a message to G2.
pub fn hash_to_g2(msg: &[u8], dst: &[u8]) -> G2Projective {
    G2Projective::hash_to_curve(msg, dst, &[])
}

/// Hashes a message to a scalar. The 512-bit SHA-512 digest is reduced modulo the group order,
/// which makes the bias negligible.
pub fn hash_to_scalar(msg: &[u8], dst: &[u8]) -> Scalar {
    let digest = Sha512::new_with_prefix(dst).chain_update(msg).finalize();

    // 2^64 in the scalar field.
    let base = Scalar::from(u64::MAX) + Scalar::ONE;

    digest.chunks_exact(8).fold(Scalar::ZERO, |acc, limb| {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(limb);
        acc * base + Scalar::from(u64::from_be_bytes(buf))
    })
}

/// Concatenates the parts of a hash input, each prefixed by its length, so that distinct inputs
/// never encode to the same bytes.
pub fn encode_parts(parts: &[&[u8]]) -> Vec<u8> {
    let mut out = Vec::with_capacity(parts.iter().map(|p| p.len() + 8).sum());
    for part in parts {
        out.extend_from_slice(&(part.len() as u64).to_le_bytes());
        out.extend_from_slice(part);
    }
    out
}

/// Derives `n` generators as `H(prefix ‖ i ‖ suffix)`. Every verifier recomputes the same points
/// from public data.
pub fn indexed_g1(prefix: &[u8], suffix: &[u8], n: usize, dst: &[u8]) -> Vec<G1Projective> {
    let derive = |i: usize| {
        let index = (i as u64).to_le_bytes();
        hash_to_g1(&encode_parts(&[prefix, &index, suffix]), dst)
    };

    #[cfg(feature = "parallel")]
    let generators = (0..n).into_par_iter().map(derive).collect();

    #[cfg(not(feature = "parallel"))]
    let generators = (0..n).map(derive).collect();

    generators
}

/// Returns a uniformly random G1 point, `g · r` for a random scalar `r`.
pub fn random_g1<R: Rng + ?Sized>(rng: &mut R) -> G1Projective {
    G1Projective::generator() * Scalar::random(rng)
}

/// Returns a uniformly random G2 point, `g · r` for a random scalar `r`.
pub fn random_g2<R: Rng + ?Sized>(rng: &mut R) -> G2Projective {
    G2Projective::generator() * Scalar::random(rng)
}

/// Compressed encoding of a G2 point, used when a public element is bound into a hash.
pub fn g2_bytes(point: &G2Projective) -> [u8; 96] {
    G2Affine::from(point).to_compressed()
}

/// Multi-scalar multiplication `Σ scalars[i] · points[i]`.
///
/// # Panics
/// If the slices differ in length.
pub fn msm(points: &[G1Projective], scalars: &[Scalar]) -> G1Projective {
    assert_eq!(points.len(), scalars.len(), "point and scalar count mismatch");

    if points.is_empty() {
        return G1Projective::identity();
    }

    G1Projective::multi_exp(points, scalars)
}

/// Returns true if `e(a1, b1) == e(a2, b2)`.
pub fn pairing_eq(
    a1: &G1Projective,
    b1: &G2Projective,
    a2: &G1Projective,
    b2: &G2Projective,
) -> bool {
    let lhs = blstrs::pairing(&G1Affine::from(a1), &G2Affine::from(b1));
    let rhs = blstrs::pairing(&G1Affine::from(a2), &G2Affine::from(b2));
    lhs == rhs
}
