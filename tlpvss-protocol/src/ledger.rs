use crate::*;
use anyhow::{anyhow, Result};
use ark_ec::PairingEngine;
use std::collections::BTreeMap;
use std::convert::TryFrom;
use tlpvss::{
    bind, verify_ciphertext, verify_share, Ciphertext, Commitment,
    ConditionId, CurveEncoding, DecryptedShare, PairingConfig, PublicKey,
};

/// Sequential, starting from zero
pub type RecordId = u64;

/// Where a record is in its lifecycle. Derived from the record, never stored
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RecordState {
    /// Locked behind its unlock condition, with no shares
    Dealt,
    /// Unlocked, with fewer shares than the threshold
    SharesAccumulating,
    /// At least the threshold of shares has been submitted
    Reconstructable,
}

/// A dealt secret as the ledger keeps it
#[derive(Clone, Debug)]
pub struct SecretRecord<E: PairingEngine> {
    pub condition_id: ConditionId,
    pub ciphertext: Ciphertext<E>,
    pub commitment: Commitment<E>,
    pub unlocked: bool,
    /// Decrypted shares keyed by participant index
    pub shares: BTreeMap<usize, E::G2Affine>,
}

impl<E: PairingEngine> SecretRecord<E> {
    pub fn threshold(&self) -> usize {
        self.ciphertext.threshold()
    }

    pub fn state(&self) -> RecordState {
        if !self.unlocked {
            RecordState::Dealt
        } else if self.shares.len() < self.threshold() {
            RecordState::SharesAccumulating
        } else {
            RecordState::Reconstructable
        }
    }

    /// The submitted shares in index order
    pub fn decrypted_shares(&self) -> Vec<DecryptedShare<E>> {
        self.shares
            .iter()
            .map(|(index, share)| DecryptedShare {
                index: *index,
                share: *share,
            })
            .collect()
    }
}

/// The state keeper that admits dealings and shares
pub trait Ledger<E: PairingEngine> {
    fn submit(
        &mut self,
        condition_id: ConditionId,
        ciphertext: Ciphertext<E>,
        commitment: Commitment<E>,
        proof: Proof,
    ) -> Result<RecordId>;

    /// Claim that the record's unlock condition is met, opening it for shares
    fn unlock(&mut self, record_id: RecordId, witness: &Witness) -> Result<()>;

    fn append_share(
        &mut self,
        record_id: RecordId,
        share: DecryptedShare<E>,
    ) -> Result<()>;

    fn read_record(&self, record_id: RecordId) -> Result<SecretRecord<E>>;
}

/// A ledger kept in memory, applying the same admission rules as the
/// on-chain contract for one committee
pub struct MemoryLedger<E: PairingEngine, O> {
    config: PairingConfig<E>,
    public_keys: Vec<PublicKey<E>>,
    threshold: usize,
    oracle: O,
    conditions: BTreeMap<ConditionId, UnlockCondition>,
    records: Vec<SecretRecord<E>>,
    context: ChainContext,
}

impl<E: CurveEncoding, O: ProofOracle<E>> MemoryLedger<E, O> {
    /// A ledger for the committee holding `public_keys`, any `threshold` of
    /// whom can reconstruct
    pub fn new(
        config: PairingConfig<E>,
        public_keys: Vec<PublicKey<E>>,
        threshold: usize,
        oracle: O,
    ) -> Result<Self> {
        tlpvss::PvssParams::new(threshold, public_keys.len())?;
        Ok(Self {
            config,
            public_keys,
            threshold,
            oracle,
            conditions: BTreeMap::new(),
            records: vec![],
            context: ChainContext::default(),
        })
    }

    pub fn public_keys(&self) -> &[PublicKey<E>] {
        &self.public_keys
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn context(&self) -> ChainContext {
        self.context
    }

    /// Move the chain forward. Heights never decrease
    pub fn advance_to(&mut self, height: u64) {
        if height > self.context.height {
            log::debug!("ledger height {} -> {}", self.context.height, height);
            self.context.height = height;
        }
    }

    pub fn register_condition(
        &mut self,
        condition_id: ConditionId,
        condition: UnlockCondition,
    ) {
        log::debug!("registered unlock condition {}", condition_id);
        self.conditions.insert(condition_id, condition);
    }

    pub fn record_state(&self, record_id: RecordId) -> Result<RecordState> {
        Ok(self.record(record_id)?.state())
    }

    fn record(&self, record_id: RecordId) -> Result<&SecretRecord<E>> {
        usize::try_from(record_id)
            .ok()
            .and_then(|i| self.records.get(i))
            .ok_or_else(|| anyhow!("Secret does not exist"))
    }

    fn record_mut(
        &mut self,
        record_id: RecordId,
    ) -> Result<&mut SecretRecord<E>> {
        usize::try_from(record_id)
            .ok()
            .and_then(move |i| self.records.get_mut(i))
            .ok_or_else(|| anyhow!("Secret does not exist"))
    }
}

fn rejected<T>(message: &str) -> Result<T> {
    log::warn!("ledger rejected: {}", message);
    Err(anyhow!(message.to_string()))
}

impl<E: CurveEncoding, O: ProofOracle<E>> Ledger<E> for MemoryLedger<E, O> {
    fn submit(
        &mut self,
        condition_id: ConditionId,
        ciphertext: Ciphertext<E>,
        commitment: Commitment<E>,
        proof: Proof,
    ) -> Result<RecordId> {
        if !self.conditions.contains_key(&condition_id) {
            return rejected("unknown unlock condition");
        }
        if let Err(e) = verify_ciphertext(
            &self.config,
            &self.public_keys,
            self.threshold,
            &ciphertext,
            &mut rand::thread_rng(),
        ) {
            log::debug!("ciphertext check: {}", e);
            return rejected("invalid ciphertext");
        }
        if bind(&condition_id, &ciphertext) != commitment {
            return rejected("commitment mismatch");
        }
        if !self.oracle.verify(&proof, &PublicInputs { commitment })? {
            return rejected("invalid proof");
        }

        let record_id = self.records.len() as RecordId;
        self.records.push(SecretRecord {
            condition_id,
            ciphertext,
            commitment,
            unlocked: false,
            shares: BTreeMap::new(),
        });
        log::debug!("record {} dealt under {}", record_id, condition_id);
        Ok(record_id)
    }

    fn unlock(&mut self, record_id: RecordId, witness: &Witness) -> Result<()> {
        let condition_id = self.record(record_id)?.condition_id;
        let condition = self
            .conditions
            .get(&condition_id)
            .ok_or_else(|| anyhow!("unknown unlock condition"))?;
        if !condition.check_witness(&self.context, witness) {
            return rejected("Witness invalid");
        }
        self.record_mut(record_id)?.unlocked = true;
        log::debug!("record {} unlocked", record_id);
        Ok(())
    }

    fn append_share(
        &mut self,
        record_id: RecordId,
        share: DecryptedShare<E>,
    ) -> Result<()> {
        let record = self.record(record_id)?;
        if share.index >= record.ciphertext.participants() {
            return rejected("Index out of bounds");
        }
        if !record.unlocked {
            return rejected("Not yet time to submit shares");
        }
        if record.shares.contains_key(&share.index) {
            return rejected("Share already submitted");
        }
        if verify_share(
            &self.config,
            &record.ciphertext,
            share.index,
            &share.share,
        )
        .is_err()
        {
            return rejected("Invalid share");
        }

        let record = self.record_mut(record_id)?;
        record.shares.insert(share.index, share.share);
        log::debug!(
            "record {} has {} of {} shares",
            record_id,
            record.shares.len(),
            record.threshold()
        );
        Ok(())
    }

    fn read_record(&self, record_id: RecordId) -> Result<SecretRecord<E>> {
        self.record(record_id).map(Clone::clone)
    }
}

#[cfg(test)]
mod test_ledger {
    use super::*;
    use crate::oracle::test_oracle::EchoOracle;
    use ark_bn254::Bn254 as EllipticCurve;
    use tlpvss::{decrypt_share, deal, generate_keys, Dealing, KeySet};

    fn setup() -> (
        KeySet<EllipticCurve>,
        MemoryLedger<EllipticCurve, EchoOracle>,
    ) {
        let rng = &mut ark_std::test_rng();
        let keys = generate_keys(&PairingConfig::default(), 4, rng)
            .expect("Setup failed");
        let mut ledger = MemoryLedger::new(
            PairingConfig::default(),
            keys.public_keys.clone(),
            2,
            EchoOracle,
        )
        .expect("Setup failed");
        ledger.register_condition(
            ConditionId::from(1u64),
            UnlockCondition::Timelock { unlock_height: 5 },
        );
        (keys, ledger)
    }

    fn submit_dealing(
        keys: &KeySet<EllipticCurve>,
        ledger: &mut MemoryLedger<EllipticCurve, EchoOracle>,
    ) -> (RecordId, Dealing<EllipticCurve>) {
        let rng = &mut ark_std::test_rng();
        let dealing =
            deal(&PairingConfig::default(), &keys.public_keys, 2, rng)
                .expect("Dealing failed");
        let id = ConditionId::from(1u64);
        let commitment = bind(&id, &dealing.ciphertext);
        let proof = EchoOracle
            .prove(&BindingWitness {
                f_0: dealing.secrets.f_0,
                commitment,
            })
            .unwrap();
        let record_id = ledger
            .submit(id, dealing.ciphertext.clone(), commitment, proof)
            .unwrap();
        (record_id, dealing)
    }

    fn share(
        keys: &KeySet<EllipticCurve>,
        dealing: &Dealing<EllipticCurve>,
        index: usize,
    ) -> DecryptedShare<EllipticCurve> {
        DecryptedShare {
            index,
            share: decrypt_share(
                index,
                &dealing.ciphertext,
                &keys.keypairs[index].decryption_key,
            )
            .unwrap(),
        }
    }

    /// Test the record moves through its states as shares arrive
    #[test]
    fn test_record_lifecycle() {
        let (keys, mut ledger) = setup();
        let (record_id, dealing) = submit_dealing(&keys, &mut ledger);
        assert_eq!(record_id, 0);
        assert_eq!(ledger.record_state(0).unwrap(), RecordState::Dealt);

        ledger.advance_to(5);
        ledger.unlock(0, &Witness::empty()).unwrap();
        assert_eq!(
            ledger.record_state(0).unwrap(),
            RecordState::SharesAccumulating
        );

        ledger.append_share(0, share(&keys, &dealing, 3)).unwrap();
        assert_eq!(
            ledger.record_state(0).unwrap(),
            RecordState::SharesAccumulating
        );
        ledger.append_share(0, share(&keys, &dealing, 1)).unwrap();
        assert_eq!(
            ledger.record_state(0).unwrap(),
            RecordState::Reconstructable
        );
        // still accepting new participants
        ledger.append_share(0, share(&keys, &dealing, 0)).unwrap();

        let record = ledger.read_record(0).unwrap();
        let indices = record
            .decrypted_shares()
            .iter()
            .map(|s| s.index)
            .collect::<Vec<_>>();
        assert_eq!(indices, vec![0, 1, 3]);
    }

    /// Test the share guards apply in order
    #[test]
    fn test_share_guards() {
        let (keys, mut ledger) = setup();
        let (record_id, dealing) = submit_dealing(&keys, &mut ledger);
        let first = share(&keys, &dealing, 0);

        let message = |r: Result<()>| r.unwrap_err().to_string();
        assert_eq!(
            message(ledger.append_share(7, first)),
            "Secret does not exist"
        );
        let mut out_of_range = first;
        out_of_range.index = 4;
        assert_eq!(
            message(ledger.append_share(record_id, out_of_range)),
            "Index out of bounds"
        );
        assert_eq!(
            message(ledger.append_share(record_id, first)),
            "Not yet time to submit shares"
        );
        assert_eq!(
            message(ledger.unlock(record_id, &Witness::empty())),
            "Witness invalid"
        );
        ledger.advance_to(6);
        ledger.unlock(record_id, &Witness::empty()).unwrap();

        let mut wrong = share(&keys, &dealing, 1);
        wrong.index = 2;
        assert_eq!(
            message(ledger.append_share(record_id, wrong)),
            "Invalid share"
        );
        ledger.append_share(record_id, first).unwrap();
        assert_eq!(
            message(ledger.append_share(record_id, first)),
            "Share already submitted"
        );
    }

    /// Test heights only move forward
    #[test]
    fn test_advance_is_monotonic() {
        let (_, mut ledger) = setup();
        ledger.advance_to(10);
        ledger.advance_to(3);
        assert_eq!(ledger.context().height, 10);
    }
}
