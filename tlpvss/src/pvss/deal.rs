use crate::*;
use ark_serialize::{Read, SerializationError, Write};

/// The public output of a dealing. Anyone holding the participants' public
/// keys can check it with [`verify_ciphertext`] without learning the secret
#[derive(CanonicalSerialize, CanonicalDeserialize, Clone, Debug, PartialEq)]
pub struct Ciphertext<E: PairingEngine> {
    /// Feldman commitment to the polynomial, F_k = g^{f_k}
    pub f_i: Vec<E::G1Affine>,

    /// Commitments to the shares, A_i = g^{f(x_i)}
    pub a_i: Vec<E::G1Affine>,

    /// Shares encrypted to each participant, Y_i = pk_i^{f(x_i)}
    pub y_i: Vec<E::G2Affine>,
}

/// Dealer-side secret material. Never sent to participants
#[derive(Clone, Debug, PartialEq)]
pub struct Secrets<E: PairingEngine> {
    /// the secret constant coefficient
    pub f_0: E::Fr,

    /// h^{f_0}, the value participants reconstruct
    pub h_f_0: E::G2Affine,
}

#[derive(Clone, Debug)]
pub struct Dealing<E: PairingEngine> {
    pub ciphertext: Ciphertext<E>,
    pub secrets: Secrets<E>,
}

impl<E: PairingEngine> Ciphertext<E> {
    /// The reconstruction threshold, one more than the degree of the dealt
    /// polynomial
    pub fn threshold(&self) -> usize {
        self.f_i.len()
    }

    pub fn participants(&self) -> usize {
        self.a_i.len()
    }

    /// Checks the lengths are consistent with some committee, as any
    /// ciphertext must be before a share can be taken out of it
    pub fn check_shape(&self) -> Result<()> {
        if self.f_i.is_empty() {
            return Err(PvssError::MalformedCiphertext(
                "no coefficient commitments".into(),
            ));
        }
        if self.a_i.len() != self.y_i.len() {
            return Err(PvssError::MalformedCiphertext(format!(
                "{} share commitments but {} encrypted shares",
                self.a_i.len(),
                self.y_i.len()
            )));
        }
        if self.f_i.len() > self.a_i.len() {
            return Err(PvssError::MalformedCiphertext(format!(
                "threshold {} exceeds {} participants",
                self.f_i.len(),
                self.a_i.len()
            )));
        }
        Ok(())
    }
}

/// Samples a uniformly random integer of `bits` bits as a field element
fn sample_secret<F: PrimeField, R: Rng>(bits: u32, rng: &mut R) -> Result<F> {
    if bits < 1 || bits as usize >= F::size_in_bits() {
        return Err(PvssError::InvalidParameter(format!(
            "secret of {} bits does not fit the scalar field",
            bits
        )));
    }
    let mut bytes = vec![0u8; (bits as usize + 7) / 8];
    rng.fill_bytes(&mut bytes);
    let excess = bytes.len() * 8 - bits as usize;
    bytes[0] &= 0xff >> excess;
    Ok(F::from_be_bytes_mod_order(&bytes))
}

/// Deal a fresh secret to the holders of `public_keys` so that any
/// `threshold` of them can reconstruct `h^{f_0}`
/// `config`: the group generators
/// `rng` a cryptographic random number generator
pub fn deal<E: PairingEngine, R: Rng>(
    config: &PairingConfig<E>,
    public_keys: &[PublicKey<E>],
    threshold: usize,
    rng: &mut R,
) -> Result<Dealing<E>> {
    let params = PvssParams::new(threshold, public_keys.len())?;
    deal_with_params(config, &params, public_keys, rng)
}

/// As [`deal`], with the committee size and secret width taken from `params`
pub fn deal_with_params<E: PairingEngine, R: Rng>(
    config: &PairingConfig<E>,
    params: &PvssParams,
    public_keys: &[PublicKey<E>],
    rng: &mut R,
) -> Result<Dealing<E>> {
    print_time!("PVSS dealing");
    params.validate()?;
    if public_keys.len() != params.participants {
        return Err(PvssError::InvalidParameter(format!(
            "expected {} public keys, got {}",
            params.participants,
            public_keys.len()
        )));
    }

    let f_0 = sample_secret::<E::Fr, _>(params.secret_bits, rng)?;
    let coeffs = std::iter::once(f_0)
        .chain((1..params.threshold).map(|_| E::Fr::rand(rng)))
        .collect::<Vec<_>>();
    let phi = DensePolynomial::from_coefficients_slice(&coeffs);

    let evals = (0..params.participants)
        .map(|i| phi.evaluate(&participant_node::<E::Fr>(i)))
        .collect::<Vec<_>>();

    // commitment to coeffs
    let f_i = fast_multiexp(&coeffs, config.g.into_projective());
    let a_i = fast_multiexp(&evals, config.g.into_projective());

    let y_i = public_keys
        .iter()
        .zip_eq(evals.iter())
        .map(|(pk, eval)| pk.encryption_key.mul(*eval))
        .collect::<Vec<E::G2Projective>>();
    let y_i = E::G2Projective::batch_normalization_into_affine(&y_i);

    let h_f_0 = config.h.mul(f_0).into_affine();

    log::debug!(
        "dealt a secret to {} participants with threshold {}",
        params.participants,
        params.threshold
    );

    Ok(Dealing {
        ciphertext: Ciphertext { f_i, a_i, y_i },
        secrets: Secrets { f_0, h_f_0 },
    })
}

#[cfg(test)]
mod test_dealing {
    use super::*;
    use ark_bls12_381::Bls12_381 as EllipticCurve;
    type Fr = <EllipticCurve as PairingEngine>::Fr;

    fn setup(n: usize) -> KeySet<EllipticCurve> {
        let rng = &mut ark_std::test_rng();
        generate_keys(&PairingConfig::default(), n, rng).expect("Setup failed")
    }

    /// Test that the ciphertext has one commitment per
    /// coefficient and one share per participant
    #[test]
    fn test_ciphertext_shape() {
        let rng = &mut ark_std::test_rng();
        let keys = setup(6);
        let config = PairingConfig::default();
        let dealing = deal(&config, &keys.public_keys, 4, rng).unwrap();
        let ciphertext = &dealing.ciphertext;
        assert_eq!(ciphertext.threshold(), 4);
        assert_eq!(ciphertext.participants(), 6);
        assert_eq!(ciphertext.y_i.len(), 6);
        assert!(ciphertext.check_shape().is_ok());
        // the first commitment is to the secret itself
        assert_eq!(
            ciphertext.f_i[0],
            config.g.mul(dealing.secrets.f_0).into_affine()
        );
        assert_eq!(
            dealing.secrets.h_f_0,
            config.h.mul(dealing.secrets.f_0).into_affine()
        );
    }

    /// Test that every share commitment and encrypted share
    /// is formed from the same evaluation
    #[test]
    fn test_shares_are_consistent() {
        let rng = &mut ark_std::test_rng();
        let keys = setup(3);
        let config = PairingConfig::<EllipticCurve>::default();
        let dealing = deal(&config, &keys.public_keys, 2, rng).unwrap();
        let ciphertext = &dealing.ciphertext;
        for (i, sk) in keys.secret_keys().iter().enumerate() {
            let share = ciphertext.y_i[i].mul(sk.inverse().unwrap());
            assert_eq!(
                EllipticCurve::pairing(config.g, share),
                EllipticCurve::pairing(ciphertext.a_i[i], config.h)
            );
        }
    }

    /// Test that the secret respects the configured bit width
    #[test]
    fn test_secret_width() {
        let rng = &mut ark_std::test_rng();
        for bits in [1u32, 8, 9, 128, 250] {
            for _ in 0..8 {
                let s = sample_secret::<Fr, _>(bits, rng).unwrap();
                let repr = s.into_repr();
                assert!(ark_ff::BigInteger::num_bits(&repr) <= bits);
            }
        }
        assert!(sample_secret::<Fr, _>(0, rng).is_err());
        assert!(sample_secret::<Fr, _>(Fr::size_in_bits() as u32, rng).is_err());
    }

    /// Test that the compact binary form restores the ciphertext
    #[test]
    fn test_ciphertext_bytes() {
        let rng = &mut ark_std::test_rng();
        let keys = setup(4);
        let dealing =
            deal(&PairingConfig::default(), &keys.public_keys, 3, rng).unwrap();
        let mut bytes = vec![];
        CanonicalSerialize::serialize(&dealing.ciphertext, &mut bytes).unwrap();
        let restored = <Ciphertext<EllipticCurve> as CanonicalDeserialize>::deserialize(
            bytes.as_slice(),
        )
        .unwrap();
        assert_eq!(restored, dealing.ciphertext);
    }

    /// Test that dealing rejects thresholds outside [1, n]
    #[test]
    fn test_invalid_threshold() {
        let rng = &mut ark_std::test_rng();
        let keys = setup(3);
        let config = PairingConfig::default();
        for t in [0, 4] {
            assert!(matches!(
                deal(&config, &keys.public_keys, t, rng),
                Err(PvssError::InvalidParameter(_))
            ));
        }
        assert!(matches!(
            deal::<EllipticCurve, _>(&config, &[], 1, rng),
            Err(PvssError::InvalidParameter(_))
        ));
    }

    /// Test that the number of public keys must match the parameters
    #[test]
    fn test_public_key_count_mismatch() {
        let rng = &mut ark_std::test_rng();
        let keys = setup(3);
        let params = PvssParams::new(2, 4).unwrap();
        assert!(matches!(
            deal_with_params(
                &PairingConfig::default(),
                &params,
                &keys.public_keys,
                rng
            ),
            Err(PvssError::InvalidParameter(_))
        ));
    }

    /// Test that malformed shapes are detected
    #[test]
    fn test_check_shape() {
        let rng = &mut ark_std::test_rng();
        let keys = setup(3);
        let dealing =
            deal(&PairingConfig::default(), &keys.public_keys, 2, rng).unwrap();

        let mut c = dealing.ciphertext.clone();
        c.y_i.pop();
        assert!(matches!(
            c.check_shape(),
            Err(PvssError::MalformedCiphertext(_))
        ));

        let mut c = dealing.ciphertext.clone();
        c.f_i.clear();
        assert!(c.check_shape().is_err());

        let mut c = dealing.ciphertext;
        c.f_i.extend_from_slice(&c.a_i.clone());
        assert!(c.check_shape().is_err());
    }
}
