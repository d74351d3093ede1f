//! Binds a ciphertext to the unlock condition it is released under.
//!
//! The binding is the Keccak-256 digest of the Solidity ABI encoding of
//! `(uint256 id, (G1[] f_i, G1[] a_i, G2[] y_i))`, so that a ledger contract
//! can recompute it from the calldata it receives. The 256-bit digest is
//! split into two 128-bit halves, each of which fits a scalar without
//! reduction and can be exposed as a public input of the proving circuit.

use crate::*;
use digest::Digest;
use sha3::Keccak256;

/// Identifies the unlock condition a secret is bound to
pub type ConditionId = Word;

/// The two halves of the binding digest, as scalars
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Commitment<E: PairingEngine> {
    pub half1: E::Fr,
    pub half2: E::Fr,
}

const HALF_BYTES: usize = 16;

fn push_word(out: &mut Vec<u8>, word: &Word) {
    out.extend_from_slice(&word.0);
}

fn push_usize(out: &mut Vec<u8>, value: usize) {
    push_word(out, &Word::from(value as u64));
}

/// ABI encoding of `(id, ciphertext)` as a contract would receive it
pub fn abi_encode<E: CurveEncoding>(
    id: &ConditionId,
    ciphertext: &Ciphertext<E>,
) -> Vec<u8> {
    let f_words = 2 * ciphertext.f_i.len();
    let a_words = 2 * ciphertext.a_i.len();
    let y_words = 4 * ciphertext.y_i.len();
    let mut out = Vec::with_capacity(
        WORD_BYTES * (8 + f_words + a_words + y_words),
    );

    // head
    push_word(&mut out, id);
    push_usize(&mut out, 2 * WORD_BYTES);

    // tuple head: offsets of the three arrays relative to the tuple
    let offset_f = 3 * WORD_BYTES;
    let offset_a = offset_f + WORD_BYTES * (1 + f_words);
    let offset_y = offset_a + WORD_BYTES * (1 + a_words);
    push_usize(&mut out, offset_f);
    push_usize(&mut out, offset_a);
    push_usize(&mut out, offset_y);

    push_usize(&mut out, ciphertext.f_i.len());
    for point in &ciphertext.f_i {
        for word in E::g1_to_words(point).words().iter() {
            push_word(&mut out, word);
        }
    }
    push_usize(&mut out, ciphertext.a_i.len());
    for point in &ciphertext.a_i {
        for word in E::g1_to_words(point).words().iter() {
            push_word(&mut out, word);
        }
    }
    push_usize(&mut out, ciphertext.y_i.len());
    for point in &ciphertext.y_i {
        for word in E::g2_to_words(point).words().iter() {
            push_word(&mut out, word);
        }
    }
    out
}

/// Keccak-256 of [`abi_encode`]
pub fn binding_digest<E: CurveEncoding>(
    id: &ConditionId,
    ciphertext: &Ciphertext<E>,
) -> [u8; 32] {
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&Keccak256::digest(&abi_encode(id, ciphertext)));
    digest
}

/// Commit to `ciphertext` under the unlock condition `id`. Deterministic:
/// the same inputs always give the same commitment
pub fn bind<E: CurveEncoding>(
    id: &ConditionId,
    ciphertext: &Ciphertext<E>,
) -> Commitment<E> {
    Commitment::from_digest(&binding_digest(id, ciphertext))
}

impl<E: PairingEngine> Commitment<E> {
    /// Splits a digest into its big-endian halves
    pub fn from_digest(digest: &[u8; 32]) -> Self {
        Self {
            half1: E::Fr::from_be_bytes_mod_order(&digest[..HALF_BYTES]),
            half2: E::Fr::from_be_bytes_mod_order(&digest[HALF_BYTES..]),
        }
    }
}

impl<E: CurveEncoding> Commitment<E> {
    /// The halves as words, in the order the ledger stores them
    pub fn to_words(&self) -> [Word; 2] {
        [E::scalar_to_word(&self.half1), E::scalar_to_word(&self.half2)]
    }
}
