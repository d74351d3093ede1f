use crate::*;

/// The interpolation node of participant `index`. Node zero carries the
/// secret, so participants are shifted by one
pub fn participant_node<F: PrimeField>(index: usize) -> F {
    F::from(index as u64) + F::one()
}

/// Evaluates every Lagrange basis polynomial of `nodes` at `point`:
/// `L_k(point) = prod_{j != k} (point - x_j) / (x_k - x_j)`.
///
/// Fails if two nodes coincide
pub fn lagrange_coefficients<F: Field>(nodes: &[F], point: F) -> Result<Vec<F>> {
    let mut numerators = Vec::with_capacity(nodes.len());
    let mut denominators = Vec::with_capacity(nodes.len());
    for (k, x_k) in nodes.iter().enumerate() {
        let mut numerator = F::one();
        let mut denominator = F::one();
        for (j, x_j) in nodes.iter().enumerate() {
            if j == k {
                continue;
            }
            numerator *= point - x_j;
            denominator *= *x_k - x_j;
        }
        if denominator.is_zero() {
            return Err(PvssError::InvalidParameter(
                "interpolation nodes must be distinct".into(),
            ));
        }
        numerators.push(numerator);
        denominators.push(denominator);
    }
    ark_ff::batch_inversion(&mut denominators);
    Ok(numerators
        .into_iter()
        .zip(denominators)
        .map(|(n, d)| n * d)
        .collect())
}
