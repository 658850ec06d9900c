//! GF(2^8), with the irreducible polynomial x^8 + x^4 + x^3 + x^2 + 1.
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand::{
    Rng,
    distr::{Distribution, StandardUniform},
};

use super::field::Field;

/// Order of the GF(2^8) field (aka number of elements in the field).
const GF256_ORDER: usize = u8::MAX as usize + 1;

/// Logarithm lookup table for GF(2^8) field.
const GF256_LOG_TABLE: [u8; GF256_ORDER] = [
    0, 0, 1, 25, 2, 50, 26, 198, 3, 223, 51, 238, 27, 104, 199, 75, 4, 100, 224, 14, 52, 141, 239,
    129, 28, 193, 105, 248, 200, 8, 76, 113, 5, 138, 101, 47, 225, 36, 15, 33, 53, 147, 142, 218,
    240, 18, 130, 69, 29, 181, 194, 125, 106, 39, 249, 185, 201, 154, 9, 120, 77, 228, 114, 166, 6,
    191, 139, 98, 102, 221, 48, 253, 226, 152, 37, 179, 16, 145, 34, 136, 54, 208, 148, 206, 143,
    150, 219, 189, 241, 210, 19, 92, 131, 56, 70, 64, 30, 66, 182, 163, 195, 72, 126, 110, 107, 58,
    40, 84, 250, 133, 186, 61, 202, 94, 155, 159, 10, 21, 121, 43, 78, 212, 229, 172, 115, 243,
    167, 87, 7, 112, 192, 247, 140, 128, 99, 13, 103, 74, 222, 237, 49, 197, 254, 24, 227, 165,
    153, 119, 38, 184, 180, 124, 17, 68, 146, 217, 35, 32, 137, 46, 55, 63, 209, 91, 149, 188, 207,
    205, 144, 135, 151, 178, 220, 252, 190, 97, 242, 86, 211, 171, 20, 42, 93, 158, 132, 60, 57,
    83, 71, 109, 65, 162, 31, 45, 67, 216, 183, 123, 164, 118, 196, 23, 73, 236, 127, 12, 111, 246,
    108, 161, 59, 82, 41, 157, 85, 170, 251, 96, 134, 177, 187, 204, 62, 90, 203, 89, 95, 176, 156,
    169, 160, 81, 11, 245, 22, 235, 122, 117, 44, 215, 79, 174, 213, 233, 230, 231, 173, 232, 116,
    214, 244, 234, 168, 80, 88, 175,
];

/// Exponentiation lookup table for GF(2^8) field.
const GF256_EXP_TABLE: [u8; 2 * GF256_ORDER - 2] = [
    1, 2, 4, 8, 16, 32, 64, 128, 29, 58, 116, 232, 205, 135, 19, 38, 76, 152, 45, 90, 180, 117,
    234, 201, 143, 3, 6, 12, 24, 48, 96, 192, 157, 39, 78, 156, 37, 74, 148, 53, 106, 212, 181,
    119, 238, 193, 159, 35, 70, 140, 5, 10, 20, 40, 80, 160, 93, 186, 105, 210, 185, 111, 222, 161,
    95, 190, 97, 194, 153, 47, 94, 188, 101, 202, 137, 15, 30, 60, 120, 240, 253, 231, 211, 187,
    107, 214, 177, 127, 254, 225, 223, 163, 91, 182, 113, 226, 217, 175, 67, 134, 17, 34, 68, 136,
    13, 26, 52, 104, 208, 189, 103, 206, 129, 31, 62, 124, 248, 237, 199, 147, 59, 118, 236, 197,
    151, 51, 102, 204, 133, 23, 46, 92, 184, 109, 218, 169, 79, 158, 33, 66, 132, 21, 42, 84, 168,
    77, 154, 41, 82, 164, 85, 170, 73, 146, 57, 114, 228, 213, 183, 115, 230, 209, 191, 99, 198,
    145, 63, 126, 252, 229, 215, 179, 123, 246, 241, 255, 227, 219, 171, 75, 150, 49, 98, 196, 149,
    55, 110, 220, 165, 87, 174, 65, 130, 25, 50, 100, 200, 141, 7, 14, 28, 56, 112, 224, 221, 167,
    83, 166, 81, 162, 89, 178, 121, 242, 249, 239, 195, 155, 43, 86, 172, 69, 138, 9, 18, 36, 72,
    144, 61, 122, 244, 245, 247, 243, 251, 235, 203, 139, 11, 22, 44, 88, 176, 125, 250, 233, 207,
    131, 27, 54, 108, 216, 173, 71, 142, 1, 2, 4, 8, 16, 32, 64, 128, 29, 58, 116, 232, 205, 135,
    19, 38, 76, 152, 45, 90, 180, 117, 234, 201, 143, 3, 6, 12, 24, 48, 96, 192, 157, 39, 78, 156,
    37, 74, 148, 53, 106, 212, 181, 119, 238, 193, 159, 35, 70, 140, 5, 10, 20, 40, 80, 160, 93,
    186, 105, 210, 185, 111, 222, 161, 95, 190, 97, 194, 153, 47, 94, 188, 101, 202, 137, 15, 30,
    60, 120, 240, 253, 231, 211, 187, 107, 214, 177, 127, 254, 225, 223, 163, 91, 182, 113, 226,
    217, 175, 67, 134, 17, 34, 68, 136, 13, 26, 52, 104, 208, 189, 103, 206, 129, 31, 62, 124, 248,
    237, 199, 147, 59, 118, 236, 197, 151, 51, 102, 204, 133, 23, 46, 92, 184, 109, 218, 169, 79,
    158, 33, 66, 132, 21, 42, 84, 168, 77, 154, 41, 82, 164, 85, 170, 73, 146, 57, 114, 228, 213,
    183, 115, 230, 209, 191, 99, 198, 145, 63, 126, 252, 229, 215, 179, 123, 246, 241, 255, 227,
    219, 171, 75, 150, 49, 98, 196, 149, 55, 110, 220, 165, 87, 174, 65, 130, 25, 50, 100, 200,
    141, 7, 14, 28, 56, 112, 224, 221, 167, 83, 166, 81, 162, 89, 178, 121, 242, 249, 239, 195,
    155, 43, 86, 172, 69, 138, 9, 18, 36, 72, 144, 61, 122, 244, 245, 247, 243, 251, 235, 203, 139,
    11, 22, 44, 88, 176, 125, 250, 233, 207, 131, 27, 54, 108, 216, 173, 71, 142,
];

/// An element of GF(2^8). Every byte is a valid element, so a byte packs into exactly one
/// symbol.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GF256 {
    p: u8,
}

impl GF256 {
    /// Returns the primitive element x.
    #[cfg(test)]
    const fn primitive_element() -> Self {
        Self { p: 2 }
    }

    /// Returns the log table index of a non-zero element.
    #[inline]
    const fn log(self) -> usize {
        GF256_LOG_TABLE[self.p as usize] as usize
    }
}

impl Add for GF256 {
    type Output = Self;

    /// Addition is XOR.
    fn add(self, rhs: Self) -> Self::Output {
        Self { p: self.p ^ rhs.p }
    }
}

impl AddAssign for GF256 {
    fn add_assign(&mut self, rhs: Self) {
        self.p ^= rhs.p;
    }
}

impl Neg for GF256 {
    type Output = Self;

    /// XOR is self-inverse.
    fn neg(self) -> Self::Output {
        self
    }
}

impl Sub for GF256 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self { p: self.p ^ rhs.p }
    }
}

impl SubAssign for GF256 {
    fn sub_assign(&mut self, rhs: Self) {
        self.p ^= rhs.p;
    }
}

impl Mul for GF256 {
    type Output = Self;

    /// Multiplication through the logarithm and exponentiation tables.
    fn mul(self, rhs: Self) -> Self::Output {
        if self.p == 0 || rhs.p == 0 {
            return Self { p: 0 };
        }

        Self { p: GF256_EXP_TABLE[self.log() + rhs.log()] }
    }
}

impl MulAssign for GF256 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Distribution<GF256> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> GF256 {
        GF256 { p: rng.random() }
    }
}

impl From<u8> for GF256 {
    fn from(value: u8) -> Self {
        Self { p: value }
    }
}

impl From<GF256> for u8 {
    fn from(value: GF256) -> Self {
        value.p
    }
}

impl Field for GF256 {
    const ZERO: Self = Self { p: 0 };
    const ONE: Self = Self { p: 1 };
    const SAFE_CAPACITY: usize = 1;
    const ENCODED_LEN: usize = 1;

    fn is_zero(&self) -> bool {
        self.p == 0
    }

    fn inverse(&self) -> Option<Self> {
        if self.p == 0 {
            return None;
        }

        Some(Self { p: GF256_EXP_TABLE[(GF256_ORDER - 1) - self.log()] })
    }

    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        rng.random()
    }

    fn from_bytes(bytes: &[u8]) -> Self {
        assert!(bytes.len() <= Self::SAFE_CAPACITY, "too many bytes for a GF(2^8) element");
        Self { p: bytes.first().copied().unwrap_or(0) }
    }

    fn to_bytes(&self) -> Vec<u8> {
        vec![self.p]
    }

    fn to_canonical_bytes(&self) -> Vec<u8> {
        vec![self.p]
    }

    fn from_canonical_bytes(bytes: &[u8]) -> Option<Self> {
        match bytes {
            [p] => Some(Self { p: *p }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_gf256() -> impl Strategy<Value = GF256> {
        any::<u8>().prop_map(GF256::from)
    }

    proptest! {
        #[test]
        fn test_addition_associativity(a in arb_gf256(), b in arb_gf256(), c in arb_gf256()) {
            prop_assert_eq!((a + b) + c, a + (b + c));
        }

        #[test]
        fn test_addition_inverse(a in arb_gf256()) {
            prop_assert_eq!(a + (-a), GF256::ZERO);
        }

        #[test]
        fn test_multiplication_associativity(a in arb_gf256(), b in arb_gf256(), c in arb_gf256()) {
            prop_assert_eq!((a * b) * c, a * (b * c));
        }

        #[test]
        fn test_multiplication_commutativity(a in arb_gf256(), b in arb_gf256()) {
            prop_assert_eq!(a * b, b * a);
        }

        #[test]
        fn test_multiplication_identity_and_zero(a in arb_gf256()) {
            prop_assert_eq!(a * GF256::ONE, a);
            prop_assert_eq!(a * GF256::ZERO, GF256::ZERO);
        }

        #[test]
        fn test_multiplicative_inverse(a in arb_gf256()) {
            match a.inverse() {
                Some(inv) => prop_assert_eq!(a * inv, GF256::ONE),
                None => prop_assert!(a.is_zero()),
            }
        }

        #[test]
        fn test_distributivity(a in arb_gf256(), b in arb_gf256(), c in arb_gf256()) {
            prop_assert_eq!(a * (b + c), (a * b) + (a * c));
        }

        #[test]
        fn test_mul_assign_matches_mul(a in arb_gf256(), b in arb_gf256()) {
            let mut c = a;
            c *= b;
            prop_assert_eq!(c, a * b);
        }
    }

    #[test]
    fn test_primitive_element_order() {
        let primitive = GF256::primitive_element();
        let mut current = primitive;

        for _ in 1..255 {
            current = current * primitive;
        }

        assert_eq!(current, GF256::ONE);
    }

    #[test]
    fn test_canonical_encoding() {
        assert_eq!(GF256::from_canonical_bytes(&[0x53]), Some(GF256::from(0x53)));
        assert_eq!(GF256::from_canonical_bytes(&[]), None);
        assert_eq!(GF256::from_canonical_bytes(&[1, 2]), None);
    }
}
