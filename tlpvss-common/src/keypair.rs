use ark_ec::PairingEngine;
use ark_ec::{AffineCurve, ProjectiveCurve};
use ark_ff::Zero;
use ark_serialize::{
    CanonicalDeserialize, CanonicalSerialize, Read, SerializationError, Write,
};
use serde::*;

#[derive(Clone, Debug)]
pub struct PreparedPublicKey<E: PairingEngine> {
    pub encryption_key: E::G2Prepared,
}

impl<E: PairingEngine> From<PublicKey<E>> for PreparedPublicKey<E> {
    fn from(value: PublicKey<E>) -> Self {
        PreparedPublicKey::<E> {
            encryption_key: E::G2Prepared::from(value.encryption_key),
        }
    }
}

/// The public half of a participant's key, `h^{sk}` in G2
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Serialize,
    Deserialize,
    CanonicalSerialize,
    CanonicalDeserialize,
)]
pub struct PublicKey<E: PairingEngine> {
    #[serde(with = "crate::ark_serde")]
    pub encryption_key: E::G2Affine,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Keypair<E: PairingEngine> {
    #[serde(with = "crate::ark_serde")]
    pub decryption_key: E::Fr,
}

impl<E: PairingEngine> Keypair<E> {
    /// Returns the public key `h^{sk}` that dealers encrypt this
    /// participant's share to. `h` must be the G2 generator the dealing and
    /// share verification use
    pub fn public(&self, h: E::G2Affine) -> PublicKey<E> {
        PublicKey::<E> {
            encryption_key: h.mul(self.decryption_key).into_affine(),
        }
    }

    /// Creates a new participant key. The decryption key is never zero,
    /// since decryption inverts it
    pub fn new<R: crate::Rng>(rng: &mut R) -> Self {
        use ark_std::UniformRand;
        loop {
            let decryption_key = E::Fr::rand(rng);
            if !decryption_key.is_zero() {
                return Self { decryption_key };
            }
        }
    }
}
