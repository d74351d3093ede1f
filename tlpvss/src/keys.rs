use crate::*;

/// The keys of a committee, in participant index order
#[derive(Clone, Debug, PartialEq)]
pub struct KeySet<E: PairingEngine> {
    pub keypairs: Vec<Keypair<E>>,
    pub public_keys: Vec<PublicKey<E>>,
}

impl<E: PairingEngine> KeySet<E> {
    pub fn len(&self) -> usize {
        self.keypairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keypairs.is_empty()
    }

    pub fn secret_keys(&self) -> Vec<E::Fr> {
        self.keypairs.iter().map(|k| k.decryption_key).collect()
    }

    /// Checks that every public key is `h^{sk}` under the generator of
    /// `config`
    pub fn check(&self, config: &PairingConfig<E>) -> Result<()> {
        if self.keypairs.len() != self.public_keys.len() {
            return Err(PvssError::InvalidParameter(format!(
                "{} keypairs but {} public keys",
                self.keypairs.len(),
                self.public_keys.len()
            )));
        }
        for (k, (keypair, public_key)) in
            self.keypairs.iter().zip(&self.public_keys).enumerate()
        {
            if keypair.public(config.h) != *public_key {
                return Err(PvssError::InvalidParameter(format!(
                    "public key {} does not match its secret key",
                    k
                )));
            }
        }
        Ok(())
    }
}

/// Generates `n` independent participant keypairs, with public keys
/// under `config.h`. Nothing is retained between calls
pub fn generate_keys<E: PairingEngine, R: Rng>(
    config: &PairingConfig<E>,
    n: usize,
    rng: &mut R,
) -> Result<KeySet<E>> {
    if n < 1 {
        return Err(PvssError::InvalidParameter(
            "at least one participant is required".into(),
        ));
    }
    let keypairs = (0..n).map(|_| Keypair::<E>::new(rng)).collect::<Vec<_>>();
    let public_keys = keypairs.iter().map(|k| k.public(config.h)).collect();
    Ok(KeySet {
        keypairs,
        public_keys,
    })
}
