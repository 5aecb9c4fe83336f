use num::Float;
use serde::{Deserialize, Serialize};

use crate::math::interp_at;

/// And operator (t-norm) for combining the propositions of a rule premise.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AndOp {
    #[default]
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
}

impl AndOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if v == F::one() {
                    u
                } else if u == F::one() {
                    v
                } else {
                    F::zero()
                }
            },
        }
    }
}

/// Or operator (t-conorm) for combining the propositions of a rule premise,
/// also used to aggregate clipped consequences.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OrOp {
    #[default]
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
}

impl OrOp {
    pub fn call<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
        }
    }
}

/// Method for defuzzificating the aggregated membership function.
///
/// Every method yields `None` when the curve carries no membership at all.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DefuzzificationOp {
    /// Discrete center of gravity: `Σ(x·μ(x)) / Σμ(x)` over the sample points
    #[default]
    Centroid,
    /// Bisector of area
    Bisector,
    /// Mean of the values for which the membership function is maximum
    MeanOfMaximum,
    /// Smallest value for which the membership function is maximum
    SmallestOfMaximum,
    /// Largest value for which the membership function is maximum
    LargestOfMaximum,
}

impl DefuzzificationOp {
    pub fn call<F: Float>(self, universe: &[F], membership: &[F]) -> Option<F> {
        debug_assert_eq!(universe.len(), membership.len());

        if universe.is_empty() || membership.is_empty() {
            return None;
        }

        match self {
            Self::Centroid => {
                let den = membership.iter().fold(F::zero(), |acc, &m| acc + m);

                if den == F::zero() {
                    return None;
                }

                let num = universe
                    .iter()
                    .zip(membership)
                    .fold(F::zero(), |acc, (&x, &m)| acc + x * m);

                Some(num / den)
            },
            Self::Bisector => {
                let two = F::one() + F::one();

                // Single sample point: no area, but the point itself is the answer
                if universe.len() == 1 {
                    return (membership[0] > F::zero()).then_some(universe[0]);
                }

                let areas: Vec<F> = universe
                    .windows(2)
                    .zip(membership.windows(2))
                    .map(|(u, m)| (m[0] + m[1]) * (u[1] - u[0]) / two)
                    .collect();
                let total_area = areas.iter().fold(F::zero(), |acc, &a| acc + a);

                if total_area == F::zero() {
                    return None;
                }

                let target = total_area / two;
                let mut cum_area = F::zero();
                let mut i_area = areas.len() - 1;

                for (i, &area) in areas.iter().enumerate() {
                    cum_area = cum_area + area;
                    if cum_area >= target {
                        i_area = i;
                        break;
                    }
                }

                let coords = [
                    (cum_area - areas[i_area], universe[i_area]),
                    (cum_area, universe[i_area + 1]),
                ];

                Some(interp_at(target, &coords))
            },
            Self::MeanOfMaximum | Self::SmallestOfMaximum | Self::LargestOfMaximum => {
                let maximum = membership.iter().copied().fold(F::zero(), F::max);

                if maximum == F::zero() {
                    return None;
                }

                let mut at_max = universe
                    .iter()
                    .zip(membership)
                    .filter_map(|(&u, &m)| (m == maximum).then_some(u));

                match self {
                    Self::SmallestOfMaximum => at_max.next(),
                    Self::LargestOfMaximum => at_max.last(),
                    _ => {
                        let (len, sum) = at_max.fold((0usize, F::zero()), |(n, acc), u| (n + 1, acc + u));

                        F::from(len).map(|len| sum / len)
                    },
                }
            },
        }
    }
}
