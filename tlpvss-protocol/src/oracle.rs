use ark_ec::PairingEngine;
use serde::{Deserialize, Serialize};
use tlpvss::Commitment;

/// An opaque proof, as produced by the proving system
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proof(#[serde(with = "hex::serde")] pub Vec<u8>);

/// Private input of the binding proof: knowledge of the dealt secret behind
/// a commitment
#[derive(Clone, Debug, PartialEq)]
pub struct BindingWitness<E: PairingEngine> {
    pub f_0: E::Fr,
    pub commitment: Commitment<E>,
}

/// What a verifier of the binding proof sees
#[derive(Clone, Debug, PartialEq)]
pub struct PublicInputs<E: PairingEngine> {
    pub commitment: Commitment<E>,
}

impl<E: PairingEngine> From<&BindingWitness<E>> for PublicInputs<E> {
    fn from(witness: &BindingWitness<E>) -> Self {
        Self {
            commitment: witness.commitment,
        }
    }
}

/// The prover and verifier of the binding circuit
pub trait ProofOracle<E: PairingEngine> {
    fn prove(&self, witness: &BindingWitness<E>) -> anyhow::Result<Proof>;

    /// `Ok(false)` is a rejected proof, `Err` a failure to decide
    fn verify(
        &self,
        proof: &Proof,
        public_inputs: &PublicInputs<E>,
    ) -> anyhow::Result<bool>;
}
