use crate::*;

/// Secrets are drawn below 2^250 so that they fit the scalar field of the
/// proving circuit without reduction
pub const DEFAULT_SECRET_BITS: u32 = 250;

fn default_secret_bits() -> u32 {
    DEFAULT_SECRET_BITS
}

/// The generators of both source groups. Public keys, encrypted shares and
/// the reconstructed secret live in G2 (generated by `h`), commitments in G1
/// (generated by `g`)
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PairingConfig<E: PairingEngine> {
    pub g: E::G1Affine,
    pub h: E::G2Affine,
}

impl<E: PairingEngine> Default for PairingConfig<E> {
    fn default() -> Self {
        Self {
            g: E::G1Affine::prime_subgroup_generator(),
            h: E::G2Affine::prime_subgroup_generator(),
        }
    }
}

/// Parameters of a sharing: any `threshold` of the `participants` can
/// reconstruct
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PvssParams {
    pub threshold: usize,
    pub participants: usize,
    /// bit length of the dealt secret `f_0`
    #[serde(default = "default_secret_bits")]
    pub secret_bits: u32,
}

impl PvssParams {
    pub fn new(threshold: usize, participants: usize) -> Result<Self> {
        let params = Self {
            threshold,
            participants,
            secret_bits: DEFAULT_SECRET_BITS,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.participants < 1 {
            return Err(PvssError::InvalidParameter(
                "at least one participant is required".into(),
            ));
        }
        if self.threshold < 1 || self.threshold > self.participants {
            return Err(PvssError::InvalidParameter(format!(
                "threshold {} is not in [1, {}]",
                self.threshold, self.participants
            )));
        }
        if self.secret_bits < 1 {
            return Err(PvssError::InvalidParameter(
                "secret must have at least one bit".into(),
            ));
        }
        Ok(())
    }

    /// Read parameters from a JSON document such as
    /// `{"threshold": 3, "participants": 5}`
    pub fn from_json(json: &str) -> Result<Self> {
        let params: Self = serde_json::from_str(json)
            .map_err(|e| PvssError::InvalidParameter(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_bounds() {
        assert!(PvssParams::new(1, 1).is_ok());
        assert!(PvssParams::new(5, 5).is_ok());
        for (t, n) in [(0, 5), (6, 5), (1, 0), (0, 0)] {
            assert!(matches!(
                PvssParams::new(t, n),
                Err(PvssError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn test_params_from_json() {
        let params =
            PvssParams::from_json(r#"{"threshold": 3, "participants": 5}"#)
                .unwrap();
        assert_eq!(params, PvssParams::new(3, 5).unwrap());
        assert_eq!(params.secret_bits, DEFAULT_SECRET_BITS);

        let params = PvssParams::from_json(
            r#"{"threshold": 1, "participants": 2, "secret_bits": 128}"#,
        )
        .unwrap();
        assert_eq!(params.secret_bits, 128);

        assert!(
            PvssParams::from_json(r#"{"threshold": 4, "participants": 3}"#)
                .is_err()
        );
        assert!(PvssParams::from_json("{").is_err());
    }
}
