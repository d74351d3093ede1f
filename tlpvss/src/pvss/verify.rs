use crate::*;
use std::ops::Neg;

/// Publicly check that `ciphertext` is a correct sharing among the holders of
/// `public_keys` with the given threshold. Needs no secrets.
///
/// Two randomized checks are made, both with a fresh challenge `alpha`:
/// the share commitments `a_i` interpolated at `alpha` must agree with the
/// coefficient commitments `f_i` evaluated at `alpha`, and each encrypted
/// share `y_i` must carry the same exponent as `a_i` under `pk_i`
pub fn verify_ciphertext<E: PairingEngine, R: Rng>(
    config: &PairingConfig<E>,
    public_keys: &[PublicKey<E>],
    threshold: usize,
    ciphertext: &Ciphertext<E>,
    rng: &mut R,
) -> Result<()> {
    print_time!("verify ciphertext");
    ciphertext.check_shape()?;
    if ciphertext.threshold() != threshold {
        return Err(PvssError::MalformedCiphertext(format!(
            "{} coefficient commitments for threshold {}",
            ciphertext.threshold(),
            threshold
        )));
    }
    if ciphertext.participants() != public_keys.len() {
        return Err(PvssError::MalformedCiphertext(format!(
            "{} shares for {} public keys",
            ciphertext.participants(),
            public_keys.len()
        )));
    }

    let alpha = E::Fr::rand(rng);
    let n = public_keys.len();

    // sum L_i(alpha) a_i - sum alpha^k f_k
    let nodes = (0..n).map(participant_node::<E::Fr>).collect::<Vec<_>>();
    let scalars = lagrange_coefficients(&nodes, alpha)?
        .into_iter()
        .chain(powers_of(alpha, threshold).into_iter().map(|p| p.neg()))
        .map(|s| s.into_repr())
        .collect::<Vec<_>>();
    let bases = ciphertext
        .a_i
        .iter()
        .chain(ciphertext.f_i.iter())
        .copied()
        .collect::<Vec<_>>();
    if !VariableBaseMSM::multi_scalar_mul(&bases, &scalars).is_zero() {
        log::warn!("share commitments do not match coefficient commitments");
        return Err(PvssError::VerificationFailed(
            "share commitments do not lie on the committed polynomial",
        ));
    }

    // e(-g, sum alpha^i y_i) * prod e(alpha^i a_i, pk_i) == 1
    let powers = powers_of(alpha, n)
        .into_iter()
        .map(|p| p.into_repr())
        .collect::<Vec<_>>();
    let batched_y = VariableBaseMSM::multi_scalar_mul(&ciphertext.y_i, &powers)
        .into_affine();
    let batched_a = ciphertext
        .a_i
        .iter()
        .zip_eq(powers.iter())
        .map(|(a, p)| a.mul(*p))
        .collect::<Vec<_>>();
    let batched_a = E::G1Projective::batch_normalization_into_affine(&batched_a);

    let mut pairs = Vec::with_capacity(n + 1);
    pairs.push((
        E::G1Prepared::from(config.g.neg()),
        E::G2Prepared::from(batched_y),
    ));
    for (a, pk) in batched_a.into_iter().zip_eq(public_keys.iter()) {
        let pk = PreparedPublicKey::from(*pk);
        pairs.push((E::G1Prepared::from(a), pk.encryption_key));
    }
    if !E::product_of_pairings(&pairs).is_one() {
        log::warn!("encrypted shares do not match share commitments");
        return Err(PvssError::VerificationFailed(
            "encrypted shares do not match share commitments",
        ));
    }
    Ok(())
}

/// Check that `share` is the correct decryption of participant `index`'s
/// encrypted share: `e(g, share) == e(a_index, h)`
pub fn verify_share<E: PairingEngine>(
    config: &PairingConfig<E>,
    ciphertext: &Ciphertext<E>,
    index: usize,
    share: &E::G2Affine,
) -> Result<()> {
    let a = ciphertext.a_i.get(index).ok_or_else(|| {
        PvssError::InvalidParameter(format!(
            "participant {} of {}",
            index,
            ciphertext.participants()
        ))
    })?;
    let pairs = [
        (
            E::G1Prepared::from(config.g.neg()),
            E::G2Prepared::from(*share),
        ),
        (E::G1Prepared::from(*a), E::G2Prepared::from(config.h)),
    ];
    if E::product_of_pairings(&pairs).is_one() {
        Ok(())
    } else {
        Err(PvssError::VerificationFailed("share does not match commitment"))
    }
}
