use crate::*;
use rayon::prelude::*;

/// A share recovered by participant `index`: `h^{f(x_index)}`
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DecryptedShare<E: PairingEngine> {
    pub index: usize,
    pub share: E::G2Affine,
}

/// Decrypt the share of participant `index` from `ciphertext` with its
/// decryption key: `Y_index^{1/sk}`
pub fn decrypt_share<E: PairingEngine>(
    index: usize,
    ciphertext: &Ciphertext<E>,
    decryption_key: &E::Fr,
) -> Result<E::G2Affine> {
    ciphertext.check_shape()?;
    if index >= ciphertext.participants() {
        return Err(PvssError::InvalidParameter(format!(
            "participant {} of {}",
            index,
            ciphertext.participants()
        )));
    }
    let inverse_key = decryption_key.inverse().ok_or_else(|| {
        PvssError::InvalidParameter("decryption key is zero".into())
    })?;
    Ok(ciphertext.y_i[index].mul(inverse_key).into_affine())
}

/// Decrypt the shares of several participants at once, each with their own
/// key
pub fn decrypt_shares<E: PairingEngine>(
    ciphertext: &Ciphertext<E>,
    keys: &[(usize, E::Fr)],
) -> Result<Vec<DecryptedShare<E>>> {
    print_time!("decrypt shares");
    keys.par_iter()
        .map(|(index, key)| {
            decrypt_share(*index, ciphertext, key).map(|share| {
                DecryptedShare {
                    index: *index,
                    share,
                }
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    type E = ark_bls12_381::Bls12_381;
    type Fr = <E as PairingEngine>::Fr;

    fn dealt(n: usize, t: usize) -> (KeySet<E>, Dealing<E>) {
        let rng = &mut ark_std::test_rng();
        let keys = generate_keys(&PairingConfig::default(), n, rng).unwrap();
        let dealing =
            deal(&PairingConfig::default(), &keys.public_keys, t, rng).unwrap();
        (keys, dealing)
    }

    #[test]
    fn test_decrypted_share_is_committed_evaluation() {
        let (keys, dealing) = dealt(4, 2);
        let config = PairingConfig::<E>::default();
        for (i, sk) in keys.secret_keys().iter().enumerate() {
            let share = decrypt_share(i, &dealing.ciphertext, sk).unwrap();
            assert_eq!(
                E::pairing(config.g, share),
                E::pairing(dealing.ciphertext.a_i[i], config.h)
            );
        }
    }

    #[test]
    fn test_decrypt_rejects_bad_index_and_key() {
        let (keys, dealing) = dealt(3, 2);
        let sk = keys.secret_keys()[0];
        assert!(matches!(
            decrypt_share(3, &dealing.ciphertext, &sk),
            Err(PvssError::InvalidParameter(_))
        ));
        assert!(matches!(
            decrypt_share(0, &dealing.ciphertext, &Fr::zero()),
            Err(PvssError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_decrypt_rejects_malformed_ciphertext() {
        let (keys, mut dealing) = dealt(3, 2);
        dealing.ciphertext.y_i.truncate(1);
        assert!(matches!(
            decrypt_share(0, &dealing.ciphertext, &keys.secret_keys()[0]),
            Err(PvssError::MalformedCiphertext(_))
        ));
    }

    #[test]
    fn test_decrypt_shares_matches_single() {
        let (keys, dealing) = dealt(5, 3);
        let sks = keys.secret_keys();
        let wanted = [(4, sks[4]), (1, sks[1]), (2, sks[2])];
        let shares = decrypt_shares(&dealing.ciphertext, &wanted).unwrap();
        for (share, (index, sk)) in shares.iter().zip(wanted.iter()) {
            assert_eq!(share.index, *index);
            assert_eq!(
                share.share,
                decrypt_share(*index, &dealing.ciphertext, sk).unwrap()
            );
        }
        assert!(
            decrypt_shares(&dealing.ciphertext, &[(5, sks[0])]).is_err()
        );
    }
}
