use crate::*;

/// Reconstruct `h^{f_0}` from decrypted shares by interpolating in the
/// exponent at zero.
///
/// Shares are used as given. Fewer than `t` shares, or a share that was not
/// decrypted correctly, yields some unrelated element rather than an error;
/// use [`verify_share`] to screen shares beforehand
pub fn combine_shares<E: PairingEngine>(
    shares: &[DecryptedShare<E>],
) -> Result<E::G2Affine> {
    print_time!("combine shares");
    if shares.is_empty() {
        return Err(PvssError::InvalidParameter(
            "no shares to combine".into(),
        ));
    }
    if !shares.iter().map(|s| s.index).all_unique() {
        return Err(PvssError::InvalidParameter(
            "shares must come from distinct participants".into(),
        ));
    }
    let nodes = shares
        .iter()
        .map(|s| participant_node::<E::Fr>(s.index))
        .collect::<Vec<_>>();
    let lagrange = lagrange_coefficients(&nodes, E::Fr::zero())?
        .iter()
        .map(|c| c.into_repr())
        .collect::<Vec<_>>();
    let bases = shares.iter().map(|s| s.share).collect::<Vec<_>>();
    Ok(VariableBaseMSM::multi_scalar_mul(&bases, &lagrange).into_affine())
}
