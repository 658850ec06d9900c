//! Signature values carried by coded pieces.
use blstrs::{G1Affine, G1Projective, Scalar};
use hc_rlnc::{Field, Signature};

use crate::hash::msm;

/// A signature that is a single G1 point. Used by the Boneh, Chang, Li and Zhang schemes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct G1Signature(pub G1Projective);

impl G1Signature {
    /// Returns `Σ coefficients[i] · signatures[i]`.
    ///
    /// # Panics
    /// If the slices differ in length.
    pub fn combine(signatures: &[Self], coefficients: &[Scalar]) -> Self {
        let points: Vec<_> = signatures.iter().map(|s| s.0).collect();
        Self(msm(&points, coefficients))
    }
}

impl Signature for G1Signature {
    const ENCODED_LEN: usize = 48;

    fn to_bytes(&self) -> Vec<u8> {
        G1Affine::from(self.0).to_compressed().to_vec()
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let bytes: [u8; 48] = bytes.try_into().ok()?;
        let point: G1Affine = Option::from(G1Affine::from_compressed(&bytes))?;
        Some(Self(point.into()))
    }
}

/// A Catalano signature: a G1 point together with the random scalar it was blinded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalanoSignature {
    /// The signature point.
    pub x: G1Projective,
    /// The blinding scalar. Combines linearly along with the point.
    pub s: Scalar,
}

impl CatalanoSignature {
    /// Returns the linear combination of the given signatures.
    ///
    /// # Panics
    /// If the slices differ in length.
    pub fn combine(signatures: &[Self], coefficients: &[Scalar]) -> Self {
        let points: Vec<_> = signatures.iter().map(|s| s.x).collect();
        let s = signatures
            .iter()
            .zip(coefficients)
            .fold(Scalar::ZERO, |acc, (signature, &c)| acc + signature.s * c);

        Self { x: msm(&points, coefficients), s }
    }
}

impl Signature for CatalanoSignature {
    const ENCODED_LEN: usize = 48 + 32;

    fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(Self::ENCODED_LEN);
        out.extend_from_slice(&G1Affine::from(self.x).to_compressed());
        out.extend_from_slice(&self.s.to_canonical_bytes());
        out
    }

    fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != Self::ENCODED_LEN {
            return None;
        }

        let (x, s) = bytes.split_at(48);
        let G1Signature(x) = G1Signature::from_bytes(x)?;
        let s = Scalar::from_canonical_bytes(s)?;

        Some(Self { x, s })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::random_g1;
    use rand::{SeedableRng, rngs::StdRng};

    #[test]
    fn test_g1_signature_wire() {
        let mut rng = StdRng::seed_from_u64(1);
        let signature = G1Signature(random_g1(&mut rng));
        let bytes = signature.to_bytes();

        assert_eq!(bytes.len(), G1Signature::ENCODED_LEN);
        assert_eq!(G1Signature::from_bytes(&bytes), Some(signature));
        assert_eq!(G1Signature::from_bytes(&bytes[1..]), None);
        assert_eq!(G1Signature::from_bytes(&[0xff; 48]), None);
    }

    #[test]
    fn test_catalano_signature_wire() {
        let mut rng = StdRng::seed_from_u64(2);
        let signature =
            CatalanoSignature { x: random_g1(&mut rng), s: Scalar::random(&mut rng) };
        let bytes = signature.to_bytes();

        assert_eq!(bytes.len(), 80);
        assert_eq!(CatalanoSignature::from_bytes(&bytes), Some(signature));

        let mut bad = bytes;
        bad[48..].fill(0xff);
        assert_eq!(CatalanoSignature::from_bytes(&bad), None);
    }

    #[test]
    fn test_catalano_combine() {
        let mut rng = StdRng::seed_from_u64(3);
        let a = CatalanoSignature { x: random_g1(&mut rng), s: Scalar::from(2u64) };
        let b = CatalanoSignature { x: random_g1(&mut rng), s: Scalar::from(3u64) };

        let combined =
            CatalanoSignature::combine(&[a, b], &[Scalar::from(10u64), Scalar::from(100u64)]);
        assert_eq!(combined.s, Scalar::from(320u64));
        assert_eq!(combined.x, a.x * Scalar::from(10u64) + b.x * Scalar::from(100u64));
    }
}
