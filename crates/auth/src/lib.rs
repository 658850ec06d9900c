//! # HC-Auth - homomorphic signatures for RLNC
//!
//! Pairing-based (BLS12-381) homomorphic signature schemes that plug into the `hc-rlnc` encoder,
//! recoder and decoder through its [`Signer`](hc_rlnc::Signer) and
//! [`Verifier`](hc_rlnc::Verifier) traits. Signing is linear in the signed piece, so a recoder
//! can derive a valid signature for any linear combination of pieces it received without the
//! secret key, and every hop can reject forged or corrupted pieces.
//!
//! Schemes:
//! - [`boneh`]: random payload generators, hashed coding-vector generators.
//! - [`chang`]: as [`boneh`], with coding-vector generators bound to the public key.
//! - [`li`]: identity based, node keys extracted by an authority.
//! - [`zhang`]: identity based, with a simpler aggregate hash.
//! - [`catalano`]: randomized signatures `(X, s)`.
//!
//! ```
//! use hc_auth::boneh::SecretKey;
//! use hc_rlnc::{Decoder, Encoder};
//!
//! let mut rng = rand::rng();
//! let data = b"authenticated network coding";
//!
//! let key = SecretKey::keygen(2, 1, b"file.bin", &mut rng);
//! let mut encoder = Encoder::from_bytes(data, 2, key).unwrap();
//! let verifier = encoder.verifier().clone();
//! let mut decoder = Decoder::new(encoder.piece_size(), encoder.piece_count(), verifier).unwrap();
//!
//! while !decoder.is_decoded() {
//!     decoder.add_piece(encoder.get_coded_piece(&mut rng)).unwrap();
//! }
//!
//! assert_eq!(decoder.get_data().unwrap(), data);
//! ```

pub mod boneh;
pub mod catalano;
pub mod chang;
mod error;
pub mod hash;
pub mod li;
mod signature;
#[cfg(test)]
mod testing;
pub mod zhang;

pub use error::AuthError;
pub use signature::{CatalanoSignature, G1Signature};

/// The dimensions of the pieces an identity-based node key signs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    /// The number of original pieces, i.e. the coding vector length.
    pub piece_count: usize,
    /// The number of symbols in each piece.
    pub piece_size: usize,
}
