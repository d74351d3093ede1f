//! Canonical fixed-width encoding of scalars and curve points.
//!
//! Every value is a sequence of 32-byte big-endian words, the layout an EVM
//! ledger consumes: a scalar is one word, a G1 point is `(x, y)` and a G2 point
//! is `([x.c1, x.c0], [y.c1, y.c0])` (the EIP-197 coefficient order). The point
//! at infinity encodes as all zero words. The textual form of a word is `0x`
//! followed by 64 lowercase hex digits.

use ark_ec::PairingEngine;
use ark_ff::{BigInteger, PrimeField, Zero};
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const WORD_BYTES: usize = 32;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EncodingError {
    #[error("expected a 0x-prefixed hex string")]
    MissingPrefix,
    #[error("invalid hex string: {0}")]
    InvalidHex(String),
    #[error("expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("value is not a canonical field element")]
    NonCanonical,
    #[error("point is not on the curve")]
    NotOnCurve,
    #[error("point is not in the prime order subgroup")]
    NotInSubgroup,
}

/// A 32-byte big-endian word
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Word(pub [u8; WORD_BYTES]);

impl Word {
    pub fn zero() -> Self {
        Word([0u8; WORD_BYTES])
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|b| *b == 0)
    }

    /// Left-pads a big-endian byte string of at most 32 bytes
    pub fn from_be_slice(bytes: &[u8]) -> Result<Self, EncodingError> {
        if bytes.len() > WORD_BYTES {
            return Err(EncodingError::InvalidLength {
                expected: WORD_BYTES,
                actual: bytes.len(),
            });
        }
        let mut word = [0u8; WORD_BYTES];
        word[WORD_BYTES - bytes.len()..].copy_from_slice(bytes);
        Ok(Word(word))
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    pub fn from_hex(s: &str) -> Result<Self, EncodingError> {
        let digits = s
            .strip_prefix("0x")
            .ok_or(EncodingError::MissingPrefix)?;
        let bytes = hex::decode(digits)
            .map_err(|e| EncodingError::InvalidHex(e.to_string()))?;
        if bytes.len() != WORD_BYTES {
            return Err(EncodingError::InvalidLength {
                expected: WORD_BYTES,
                actual: bytes.len(),
            });
        }
        let mut word = [0u8; WORD_BYTES];
        word.copy_from_slice(&bytes);
        Ok(Word(word))
    }
}

impl From<u64> for Word {
    fn from(value: u64) -> Self {
        let mut word = [0u8; WORD_BYTES];
        word[WORD_BYTES - 8..].copy_from_slice(&value.to_be_bytes());
        Word(word)
    }
}

/// An EVM address, left-padded
impl From<[u8; 20]> for Word {
    fn from(address: [u8; 20]) -> Self {
        let mut word = [0u8; WORD_BYTES];
        word[WORD_BYTES - 20..].copy_from_slice(&address);
        Word(word)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Word {
    type Err = EncodingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Word::from_hex(s)
    }
}

impl Serialize for Word {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Word {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct WordVisitor;

        impl<'de> Visitor<'de> for WordVisitor {
            type Value = Word;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a 0x-prefixed 32 byte hex string")
            }

            fn visit_str<E>(self, value: &str) -> Result<Word, E>
            where
                E: de::Error,
            {
                Word::from_hex(value).map_err(E::custom)
            }
        }

        deserializer.deserialize_str(WordVisitor)
    }
}

/// A G1 point as two base field words
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct G1Words {
    pub x: Word,
    pub y: Word,
}

/// A G2 point as two pairs of base field words, each pair ordered `[c1, c0]`
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct G2Words {
    pub x: [Word; 2],
    pub y: [Word; 2],
}

impl G1Words {
    pub fn words(&self) -> [Word; 2] {
        [self.x, self.y]
    }
}

impl G2Words {
    pub fn words(&self) -> [Word; 4] {
        [self.x[0], self.x[1], self.y[0], self.y[1]]
    }
}

/// Pairing engines whose scalars and points have a canonical word encoding
pub trait CurveEncoding: PairingEngine {
    fn scalar_to_word(scalar: &Self::Fr) -> Word;
    fn scalar_from_word(word: &Word) -> Result<Self::Fr, EncodingError>;
    fn g1_to_words(point: &Self::G1Affine) -> G1Words;
    fn g1_from_words(words: &G1Words) -> Result<Self::G1Affine, EncodingError>;
    fn g2_to_words(point: &Self::G2Affine) -> G2Words;
    fn g2_from_words(words: &G2Words) -> Result<Self::G2Affine, EncodingError>;
}

/// Encodes a field element whose representation is exactly one word
pub fn field_to_word<F>(element: &F) -> Word
where
    F: PrimeField<BigInt = ark_ff::BigInteger256>,
{
    let mut word = [0u8; WORD_BYTES];
    word.copy_from_slice(&element.into_repr().to_bytes_be());
    Word(word)
}

/// Decodes a field element, rejecting words at or above the modulus
pub fn field_from_word<F>(word: &Word) -> Result<F, EncodingError>
where
    F: PrimeField<BigInt = ark_ff::BigInteger256>,
{
    let element = F::from_be_bytes_mod_order(&word.0);
    if field_to_word(&element) != *word {
        return Err(EncodingError::NonCanonical);
    }
    Ok(element)
}

mod bn254 {
    use super::*;
    use ark_bn254::{Bn254, Fq, Fq2, Fr, G1Affine, G2Affine};

    fn fq2_to_words(element: &Fq2) -> [Word; 2] {
        [field_to_word(&element.c1), field_to_word(&element.c0)]
    }

    fn fq2_from_words(words: &[Word; 2]) -> Result<Fq2, EncodingError> {
        let c1: Fq = field_from_word(&words[0])?;
        let c0: Fq = field_from_word(&words[1])?;
        Ok(Fq2::new(c0, c1))
    }

    impl CurveEncoding for Bn254 {
        fn scalar_to_word(scalar: &Fr) -> Word {
            field_to_word(scalar)
        }

        fn scalar_from_word(word: &Word) -> Result<Fr, EncodingError> {
            field_from_word(word)
        }

        fn g1_to_words(point: &G1Affine) -> G1Words {
            if point.infinity {
                return G1Words::default();
            }
            G1Words {
                x: field_to_word(&point.x),
                y: field_to_word(&point.y),
            }
        }

        fn g1_from_words(words: &G1Words) -> Result<G1Affine, EncodingError> {
            if words.x.is_zero() && words.y.is_zero() {
                return Ok(G1Affine::zero());
            }
            let point = G1Affine::new(
                field_from_word(&words.x)?,
                field_from_word(&words.y)?,
                false,
            );
            if !point.is_on_curve() {
                return Err(EncodingError::NotOnCurve);
            }
            if !point.is_in_correct_subgroup_assuming_on_curve() {
                return Err(EncodingError::NotInSubgroup);
            }
            Ok(point)
        }

        fn g2_to_words(point: &G2Affine) -> G2Words {
            if point.infinity {
                return G2Words::default();
            }
            G2Words {
                x: fq2_to_words(&point.x),
                y: fq2_to_words(&point.y),
            }
        }

        fn g2_from_words(words: &G2Words) -> Result<G2Affine, EncodingError> {
            if words.words().iter().all(Word::is_zero) {
                return Ok(G2Affine::zero());
            }
            let point = G2Affine::new(
                fq2_from_words(&words.x)?,
                fq2_from_words(&words.y)?,
                false,
            );
            if !point.is_on_curve() {
                return Err(EncodingError::NotOnCurve);
            }
            // G2 has a non-trivial cofactor on BN254
            if !point.is_in_correct_subgroup_assuming_on_curve() {
                return Err(EncodingError::NotInSubgroup);
            }
            Ok(point)
        }
    }
}
