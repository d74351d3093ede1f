use crate::*;

pub fn batch_to_projective<A: AffineCurve>(p: &[A]) -> Vec<A::Projective> {
    p.iter().map(|a| a.into_projective()).collect::<Vec<_>>()
}

/// Computes `base^{s}` for every scalar `s` with a shared window table
pub fn fast_multiexp<Projective: ProjectiveCurve>(
    scalars: &[Projective::ScalarField],
    base: Projective,
) -> Vec<Projective::Affine> {
    let window_size = FixedBaseMSM::get_mul_window_size(scalars.len());
    let scalar_bits =
        <Projective::ScalarField as PrimeField>::size_in_bits();
    let base_table =
        FixedBaseMSM::get_window_table(scalar_bits, window_size, base);
    let exp = FixedBaseMSM::multi_scalar_mul::<Projective>(
        scalar_bits,
        window_size,
        &base_table,
        scalars,
    );
    Projective::batch_normalization_into_affine(&exp)
}

/// `[1, x, x^2, ..., x^{n-1}]`
pub fn powers_of<F: Field>(x: F, n: usize) -> Vec<F> {
    let mut powers = Vec::with_capacity(n);
    let mut current = F::one();
    for _ in 0..n {
        powers.push(current);
        current *= x;
    }
    powers
}
