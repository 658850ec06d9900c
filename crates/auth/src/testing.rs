//! Checks shared by the scheme tests.
use blstrs::Scalar;
use hc_rlnc::{
    CodedPiece, Field, Signer, Verifier,
    coding::{generate_coding_vector, generate_systematic_vector, linear_combination},
};
use proptest::{collection::vec, prelude::*};
use rand::{SeedableRng, rngs::StdRng};

/// Generates `(piece_size, piece_count, coefficients)` with one coefficient per piece.
pub(crate) fn arb_shape() -> impl Strategy<Value = (usize, usize, Vec<u64>)> {
    (1usize..5, 1usize..5).prop_flat_map(|(piece_size, piece_count)| {
        (Just(piece_size), Just(piece_count), vec(any::<u64>(), piece_count))
    })
}

/// Signs `piece_count` systematic pieces and checks that they verify, that any modification is
/// rejected, and that combined signatures verify on the combined piece.
pub(crate) fn check_scheme<K>(signer: &K, piece_size: usize, piece_count: usize, seed: u64)
where
    K: Signer<Field = Scalar>,
{
    assert!(piece_count >= 2);

    let mut rng = StdRng::seed_from_u64(seed);
    let verifier = signer.verifier();

    let signed: Vec<_> = (0..piece_count)
        .map(|i| {
            let piece: Vec<Scalar> = (0..piece_size).map(|_| Scalar::random(&mut rng)).collect();
            let coding_vector = generate_systematic_vector(i, piece_count);
            let signature = signer.sign(&piece, &coding_vector, &mut rng);
            CodedPiece::new(piece, coding_vector, signature)
        })
        .collect();

    for piece in &signed {
        assert!(verifier.verify(piece));
    }

    let mut tampered = signed[0].clone();
    tampered.piece[0] += Scalar::ONE;
    assert!(!verifier.verify(&tampered), "modified payload must not verify");

    let mut tampered = signed[0].clone();
    tampered.coding_vector[piece_count - 1] += Scalar::ONE;
    assert!(!verifier.verify(&tampered), "modified coding vector must not verify");

    let mut tampered = signed[0].clone();
    tampered.signature = signed[1].signature.clone();
    assert!(!verifier.verify(&tampered), "foreign signature must not verify");

    let mut tampered = signed[0].clone();
    tampered.piece.pop();
    assert!(!verifier.verify(&tampered), "truncated payload must not verify");

    check_shape(verifier, &signed[0]);

    let coefficients: Vec<Scalar> = generate_coding_vector(&mut rng, piece_count);
    check_homomorphism(signer, piece_size, &coefficients, seed);
}

/// Checks that a correctly signed piece stops verifying once its dimensions change, even when
/// the symbols hashed are the same.
pub(crate) fn check_shape<V>(verifier: &V, signed: &CodedPiece<Scalar, V::Signature>)
where
    V: Verifier<Field = Scalar>,
{
    assert!(verifier.verify(signed));

    let mut padded = signed.clone();
    padded.coding_vector.push(Scalar::ZERO);
    assert!(!verifier.verify(&padded), "zero-padded coding vector must not verify");

    let mut padded = signed.clone();
    padded.piece.push(Scalar::ZERO);
    assert!(!verifier.verify(&padded), "zero-padded payload must not verify");

    // Move the payload/coding-vector boundary one symbol to the left.
    let mut shifted = signed.clone();
    if let Some(last) = shifted.piece.pop() {
        shifted.coding_vector.insert(0, last);
        assert!(!verifier.verify(&shifted), "shifted boundary must not verify");
    }

    let mut shortened = signed.clone();
    shortened.coding_vector.pop();
    assert!(!verifier.verify(&shortened), "truncated coding vector must not verify");
}

/// Signs random pieces under random coding vectors, combines them with `coefficients`, and
/// checks that the combined signature verifies on the combined piece.
pub(crate) fn check_homomorphism<K>(
    signer: &K,
    piece_size: usize,
    coefficients: &[Scalar],
    seed: u64,
) where
    K: Signer<Field = Scalar>,
{
    let mut rng = StdRng::seed_from_u64(seed);
    let verifier = signer.verifier();
    let piece_count = coefficients.len();

    let signed: Vec<_> = (0..piece_count)
        .map(|_| {
            let piece: Vec<Scalar> = (0..piece_size).map(|_| Scalar::random(&mut rng)).collect();
            let coding_vector = generate_coding_vector(&mut rng, piece_count);
            let signature = signer.sign(&piece, &coding_vector, &mut rng);
            CodedPiece::new(piece, coding_vector, signature)
        })
        .collect();

    // Signing commutes with linear combination.
    let flattened: Vec<_> = signed.iter().map(CodedPiece::flatten).collect();
    let mut piece = linear_combination(
        flattened.iter().map(Vec::as_slice),
        coefficients,
        piece_size + piece_count,
    );
    let coding_vector = piece.split_off(piece_size);

    let signatures: Vec<_> = signed.iter().map(|p| p.signature.clone()).collect();
    let signature = verifier.combine(&signatures, coefficients);
    assert!(verifier.verify(&CodedPiece::new(piece, coding_vector, signature)));
}

/// Converts raw coefficients drawn by proptest into scalars.
pub(crate) fn scalars(values: &[u64]) -> Vec<Scalar> {
    values.iter().copied().map(Scalar::from).collect()
}
