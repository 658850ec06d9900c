//! # HC-RLNC - Random Linear Network Coding with homomorphic signatures
//!
//! This library provides an implementation of Random Linear Network Coding (RLNC) over a generic
//! finite field, with pluggable homomorphic signatures so that coded pieces can be authenticated
//! at every hop, including after recoding by untrusted intermediate nodes.
//!
//! Two fields are provided: the BLS12-381 scalar field ([`Scalar`]), which the pairing based
//! signature schemes in `hc-auth` operate over, and GF(2^8) ([`GF256`]) for unauthenticated use.
//!
//! ```
//! use hc_rlnc::{Decoder, Encoder, NoAuth, GF256};
//!
//! let data = b"Hello, world!";
//! let mut encoder = Encoder::from_bytes(data, 4, NoAuth::<GF256>::new()).unwrap();
//! let mut decoder =
//!     Decoder::new(encoder.piece_size(), encoder.piece_count(), NoAuth::new()).unwrap();
//!
//! let mut rng = rand::rng();
//! while !decoder.is_decoded() {
//!     decoder.add_piece(encoder.get_coded_piece(&mut rng)).unwrap();
//! }
//!
//! assert_eq!(decoder.get_data().unwrap(), data);
//! ```

pub mod auth;
pub mod coding;
mod common;
pub mod decode;
pub mod encode;
pub mod matrix;
pub mod primitives;
pub mod recode;

pub use auth::{NoAuth, Signature, Signer, Unsigned, Verifier};
pub use common::{BOUNDARY_MARKER, RLNCError};
pub use decode::{Decoder, DecoderState, PieceOutcome};
pub use encode::Encoder;
pub use primitives::{
    field::{Field, Scalar},
    galois::GF256,
    packet::CodedPiece,
};
pub use recode::Recoder;
