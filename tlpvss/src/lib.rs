#![allow(clippy::many_single_char_names)]

pub mod binding;
pub mod error;
pub mod keys;
pub mod lagrange;
pub mod params;
pub mod primitives;
pub mod pvss;
pub mod wire;

pub use binding::*;
pub use error::*;
pub use keys::*;
pub use lagrange::*;
pub use params::*;
pub use primitives::*;
pub use pvss::*;
pub use wire::*;

pub use tlpvss_common::{
    ark_serde, CurveEncoding, EncodingError, G1Words, G2Words, Keypair,
    PreparedPublicKey, PublicKey, Rng, Word, WORD_BYTES,
};

use ark_ec::msm::{FixedBaseMSM, VariableBaseMSM};
use ark_ec::{AffineCurve, PairingEngine, ProjectiveCurve};
use ark_ff::{Field, One, PrimeField, UniformRand, Zero};
use ark_poly::{
    polynomial::univariate::DensePolynomial, polynomial::UVPolynomial,
    Polynomial,
};
use ark_serialize::{CanonicalDeserialize, CanonicalSerialize};
use itertools::Itertools;
use measure_time::print_time;
use serde::{Deserialize, Serialize};
