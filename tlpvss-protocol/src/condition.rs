use serde::{Deserialize, Serialize};
use sha3::{Digest, Keccak256};

/// What a condition can observe about the chain
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainContext {
    pub height: u64,
}

/// Evidence offered to satisfy an unlock condition
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Witness(pub Vec<u8>);

impl Witness {
    /// The witness for conditions that need no data
    pub fn empty() -> Self {
        Witness(vec![])
    }
}

impl From<&[u8]> for Witness {
    fn from(bytes: &[u8]) -> Self {
        Witness(bytes.to_vec())
    }
}

/// A condition that gates share submission for a secret
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockCondition {
    /// Met once the chain reaches `unlock_height`
    Timelock { unlock_height: u64 },
    /// Met by any witness whose Keccak-256 digest is `digest`
    Preimage {
        #[serde(with = "hex::serde")]
        digest: [u8; 32],
    },
}

impl UnlockCondition {
    pub fn preimage_of(preimage: &[u8]) -> Self {
        UnlockCondition::Preimage {
            digest: keccak256(preimage),
        }
    }

    pub fn check_witness(
        &self,
        context: &ChainContext,
        witness: &Witness,
    ) -> bool {
        match self {
            UnlockCondition::Timelock { unlock_height } => {
                context.height >= *unlock_height
            }
            UnlockCondition::Preimage { digest } => {
                keccak256(&witness.0) == *digest
            }
        }
    }
}

fn keccak256(bytes: &[u8]) -> [u8; 32] {
    let mut digest = [0u8; 32];
    digest.copy_from_slice(&Keccak256::digest(bytes));
    digest
}
