//! JSON-facing shapes of the scheme's values, built on the canonical word
//! encoding. Only curves with a [`CurveEncoding`] can be serialized this way.
//!
//! Decoding validates every point, so a deserialized [`Ciphertext`] or
//! [`DecryptedShare`] always holds subgroup elements.

use crate::*;
use serde::de::Error as _;
use serde::{Deserializer, Serializer};
use std::convert::TryFrom;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CiphertextWire {
    pub f_i: Vec<G1Words>,
    pub a_i: Vec<G1Words>,
    pub y_i: Vec<G2Words>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SecretsWire {
    pub f_0: Word,
    pub h_f_0: G2Words,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DecryptedShareWire {
    pub i: usize,
    pub share: G2Words,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeySetWire {
    pub sks: Vec<Word>,
    pub pks: Vec<G2Words>,
}

fn decode_all<T, W>(
    name: &str,
    words: &[W],
    decode: impl Fn(&W) -> std::result::Result<T, EncodingError>,
) -> Result<Vec<T>> {
    words
        .iter()
        .enumerate()
        .map(|(k, w)| {
            decode(w).map_err(|e| {
                PvssError::MalformedCiphertext(format!("{}[{}]: {}", name, k, e))
            })
        })
        .collect()
}

impl<E: CurveEncoding> From<&Ciphertext<E>> for CiphertextWire {
    fn from(c: &Ciphertext<E>) -> Self {
        Self {
            f_i: c.f_i.iter().map(E::g1_to_words).collect(),
            a_i: c.a_i.iter().map(E::g1_to_words).collect(),
            y_i: c.y_i.iter().map(E::g2_to_words).collect(),
        }
    }
}

impl<E: CurveEncoding> TryFrom<CiphertextWire> for Ciphertext<E> {
    type Error = PvssError;

    fn try_from(wire: CiphertextWire) -> Result<Self> {
        Ok(Self {
            f_i: decode_all("f_i", &wire.f_i, E::g1_from_words)?,
            a_i: decode_all("a_i", &wire.a_i, E::g1_from_words)?,
            y_i: decode_all("y_i", &wire.y_i, E::g2_from_words)?,
        })
    }
}

impl<E: CurveEncoding> From<&Secrets<E>> for SecretsWire {
    fn from(s: &Secrets<E>) -> Self {
        Self {
            f_0: E::scalar_to_word(&s.f_0),
            h_f_0: E::g2_to_words(&s.h_f_0),
        }
    }
}

impl<E: CurveEncoding> TryFrom<SecretsWire> for Secrets<E> {
    type Error = PvssError;

    fn try_from(wire: SecretsWire) -> Result<Self> {
        Ok(Self {
            f_0: E::scalar_from_word(&wire.f_0)?,
            h_f_0: E::g2_from_words(&wire.h_f_0)?,
        })
    }
}

impl<E: CurveEncoding> From<&DecryptedShare<E>> for DecryptedShareWire {
    fn from(s: &DecryptedShare<E>) -> Self {
        Self {
            i: s.index,
            share: E::g2_to_words(&s.share),
        }
    }
}

impl<E: CurveEncoding> TryFrom<DecryptedShareWire> for DecryptedShare<E> {
    type Error = PvssError;

    fn try_from(wire: DecryptedShareWire) -> Result<Self> {
        let share = E::g2_from_words(&wire.share).map_err(|e| {
            PvssError::MalformedShare(format!("share {}: {}", wire.i, e))
        })?;
        Ok(Self {
            index: wire.i,
            share,
        })
    }
}

impl<E: CurveEncoding> From<&KeySet<E>> for KeySetWire {
    fn from(keys: &KeySet<E>) -> Self {
        Self {
            sks: keys
                .keypairs
                .iter()
                .map(|k| E::scalar_to_word(&k.decryption_key))
                .collect(),
            pks: keys
                .public_keys
                .iter()
                .map(|pk| E::g2_to_words(&pk.encryption_key))
                .collect(),
        }
    }
}

impl<E: CurveEncoding> TryFrom<KeySetWire> for KeySet<E> {
    type Error = PvssError;

    /// Points are validated here. Whether each public key matches its
    /// secret key depends on the generator, see [`KeySet::check`]
    fn try_from(wire: KeySetWire) -> Result<Self> {
        if wire.sks.len() != wire.pks.len() {
            return Err(PvssError::InvalidParameter(format!(
                "{} secret keys but {} public keys",
                wire.sks.len(),
                wire.pks.len()
            )));
        }
        let mut keypairs = Vec::with_capacity(wire.sks.len());
        let mut public_keys = Vec::with_capacity(wire.pks.len());
        for (k, (sk, pk)) in wire.sks.iter().zip(wire.pks.iter()).enumerate() {
            let keypair = Keypair::<E> {
                decryption_key: E::scalar_from_word(sk)?,
            };
            if keypair.decryption_key.is_zero() {
                return Err(PvssError::InvalidParameter(format!(
                    "secret key {} is zero",
                    k
                )));
            }
            let public_key = PublicKey::<E> {
                encryption_key: E::g2_from_words(pk)?,
            };
            keypairs.push(keypair);
            public_keys.push(public_key);
        }
        Ok(Self {
            keypairs,
            public_keys,
        })
    }
}

macro_rules! serde_via_wire {
    ($ty:ident, $wire:ident) => {
        impl<E: CurveEncoding> Serialize for $ty<E> {
            fn serialize<S: Serializer>(
                &self,
                serializer: S,
            ) -> std::result::Result<S::Ok, S::Error> {
                $wire::from(self).serialize(serializer)
            }
        }

        impl<'de, E: CurveEncoding> Deserialize<'de> for $ty<E> {
            fn deserialize<D: Deserializer<'de>>(
                deserializer: D,
            ) -> std::result::Result<Self, D::Error> {
                let wire = $wire::deserialize(deserializer)?;
                $ty::try_from(wire).map_err(D::Error::custom)
            }
        }
    };
}

serde_via_wire!(Ciphertext, CiphertextWire);
serde_via_wire!(Secrets, SecretsWire);
serde_via_wire!(DecryptedShare, DecryptedShareWire);
serde_via_wire!(KeySet, KeySetWire);
