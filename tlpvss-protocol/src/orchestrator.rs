use crate::*;
use ark_ec::PairingEngine;
use tlpvss::{
    bind, combine_shares, deal_with_params, decrypt_share, Ciphertext,
    Commitment, ConditionId, CurveEncoding, DecryptedShare, Keypair,
    PairingConfig, PublicKey, PvssParams, Rng, Secrets,
};

/// Everything the dealer holds after a secret has been shared
#[derive(Clone, Debug)]
pub struct DealtSecret<E: PairingEngine> {
    pub record_id: RecordId,
    pub ciphertext: Ciphertext<E>,
    pub commitment: Commitment<E>,
    pub secrets: Secrets<E>,
}

/// Drives the PVSS operations against a proof oracle and a ledger.
///
/// Collaborator failures are passed through once, tagged with the
/// collaborator's name. Nothing is retried
pub struct Orchestrator<E: PairingEngine, O, L> {
    pub params: PvssParams,
    pub config: PairingConfig<E>,
    pub oracle: O,
    pub ledger: L,
}

impl<E: CurveEncoding, O: ProofOracle<E>, L: Ledger<E>> Orchestrator<E, O, L> {
    /// `config` must be the one the ledger verifies with
    pub fn new(
        params: PvssParams,
        config: PairingConfig<E>,
        oracle: O,
        ledger: L,
    ) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            params,
            config,
            oracle,
            ledger,
        })
    }

    /// Deal a fresh secret to `public_keys`, bind it to `condition_id`,
    /// prove the binding and submit it to the ledger
    pub fn share_secret<R: Rng>(
        &mut self,
        public_keys: &[PublicKey<E>],
        condition_id: ConditionId,
        rng: &mut R,
    ) -> Result<DealtSecret<E>> {
        let dealing =
            deal_with_params(&self.config, &self.params, public_keys, rng)?;
        let commitment = bind(&condition_id, &dealing.ciphertext);
        log::debug!("bound dealing to {}", condition_id);

        let proof = self
            .oracle
            .prove(&BindingWitness {
                f_0: dealing.secrets.f_0,
                commitment,
            })
            .map_err(ProtocolError::oracle)?;
        let record_id = self
            .ledger
            .submit(
                condition_id,
                dealing.ciphertext.clone(),
                commitment,
                proof,
            )
            .map_err(ProtocolError::ledger)?;
        log::debug!("dealing accepted as record {}", record_id);

        Ok(DealtSecret {
            record_id,
            ciphertext: dealing.ciphertext,
            commitment,
            secrets: dealing.secrets,
        })
    }

    /// Present `witness` for the record's unlock condition
    pub fn claim(&mut self, record_id: RecordId, witness: &Witness) -> Result<()> {
        self.ledger
            .unlock(record_id, witness)
            .map_err(ProtocolError::ledger)?;
        log::debug!("claimed record {}", record_id);
        Ok(())
    }

    /// Decrypt participant `index`'s share of a record and submit it
    pub fn submit_share(
        &mut self,
        record_id: RecordId,
        index: usize,
        keypair: &Keypair<E>,
    ) -> Result<DecryptedShare<E>> {
        let record = self
            .ledger
            .read_record(record_id)
            .map_err(ProtocolError::ledger)?;
        let share = DecryptedShare {
            index,
            share: decrypt_share(
                index,
                &record.ciphertext,
                &keypair.decryption_key,
            )?,
        };
        self.ledger
            .append_share(record_id, share)
            .map_err(ProtocolError::ledger)?;
        log::debug!("submitted share {} of record {}", index, record_id);
        Ok(share)
    }

    /// Combine the shares submitted so far. Below the threshold this is
    /// some element other than the secret
    pub fn reconstruct(&self, record_id: RecordId) -> Result<E::G2Affine> {
        let record = self
            .ledger
            .read_record(record_id)
            .map_err(ProtocolError::ledger)?;
        Ok(combine_shares(&record.decrypted_shares())?)
    }

    /// Reconstruct and compare against the expected `h^{f_0}`
    pub fn check_reconstruction(
        &self,
        record_id: RecordId,
        expected: &E::G2Affine,
    ) -> Result<()> {
        if self.reconstruct(record_id)? == *expected {
            Ok(())
        } else {
            Err(ProtocolError::VerificationFailed(format!(
                "record {} does not reconstruct to the expected secret",
                record_id
            )))
        }
    }
}
