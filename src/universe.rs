use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, FuzzyResult};
use crate::linspace::Linspace;

/// The discretized domain of a variable: finite, strictly increasing sample points.
///
/// Resolution is the caller's call; a coarser universe trades centroid accuracy
/// for speed.
#[derive(Clone, Debug, PartialEq)]
pub struct Universe(Vec<f64>);

impl Universe {
    /// Upper bound on the sample points of one universe.
    pub const MAX_POINTS: usize = 1 << 24;

    pub fn from_points(points: Vec<f64>) -> FuzzyResult<Self> {
        if points.is_empty() {
            return Err(FuzzyError::InvalidUniverse("universe has no sample points".into()));
        }

        if let Some(bad) = points.iter().find(|p| !p.is_finite()) {
            return Err(FuzzyError::InvalidUniverse(format!("sample point {bad} is not finite")));
        }

        if let Some(pair) = points.windows(2).find(|w| w[0] >= w[1]) {
            return Err(FuzzyError::InvalidUniverse(format!(
                "sample points must be strictly increasing, found {} then {}",
                pair[0], pair[1]
            )));
        }

        Ok(Universe(points))
    }

    /// `n` evenly spaced points from `min` to `max` inclusive.
    pub fn linspace(min: f64, max: f64, n: usize) -> FuzzyResult<Self> {
        if n > Self::MAX_POINTS {
            return Err(FuzzyError::InvalidUniverse(format!(
                "{n} sample points exceed the limit of {}",
                Self::MAX_POINTS
            )));
        }

        if n > 1 && min >= max {
            return Err(FuzzyError::InvalidUniverse(format!("empty range {min}..={max}")));
        }

        Self::from_points(Linspace::new(min, max, n).collect())
    }

    /// Points `start, start + step, ...` strictly below `stop`.
    pub fn arange(start: f64, stop: f64, step: f64) -> FuzzyResult<Self> {
        if !(step > 0.) || !step.is_finite() {
            return Err(FuzzyError::InvalidUniverse(format!("step must be positive, got {step}")));
        }

        let points = Linspace::arange(start, stop, step, Self::MAX_POINTS).ok_or_else(|| {
            FuzzyError::InvalidUniverse(format!(
                "range {start}..{stop} with step {step} exceeds the limit of {} sample points",
                Self::MAX_POINTS
            ))
        })?;

        Self::from_points(points.collect())
    }

    pub fn points(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    // Never true for a constructed universe, kept for the len/is_empty pair.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn min(&self) -> f64 {
        self.0[0]
    }

    pub fn max(&self) -> f64 {
        self.0[self.0.len() - 1]
    }

    /// Pulls `x` onto the nearest bound when it falls outside the universe.
    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.min(), self.max())
    }

    pub fn midpoint(&self) -> f64 {
        (self.min() + self.max()) / 2.
    }
}

/// Serializable description of a universe.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UniverseDef {
    Arange { start: f64, stop: f64, step: f64 },
    Linspace { min: f64, max: f64, num: usize },
    Points(Vec<f64>),
}

impl UniverseDef {
    pub fn build(&self) -> FuzzyResult<Universe> {
        match self {
            Self::Arange { start, stop, step } => Universe::arange(*start, *stop, *step),
            Self::Linspace { min, max, num } => Universe::linspace(*min, *max, *num),
            Self::Points(points) => Universe::from_points(points.clone()),
        }
    }
}

#[test]
fn test_universe_bounds() {
    let universe = Universe::arange(0., 101., 1.).unwrap();

    assert_eq!(universe.len(), 101);
    assert_eq!(universe.min(), 0.);
    assert_eq!(universe.max(), 100.);
    assert_eq!(universe.clamp(-20.), 0.);
    assert_eq!(universe.clamp(140.), 100.);
    assert_eq!(universe.clamp(42.5), 42.5);
    assert_eq!(universe.midpoint(), 50.);
}

#[test]
fn test_universe_rejects_bad_points() {
    assert!(matches!(Universe::from_points(vec![]), Err(FuzzyError::InvalidUniverse(_))));
    assert!(matches!(
        Universe::from_points(vec![0., 1., 1.]),
        Err(FuzzyError::InvalidUniverse(_))
    ));
    assert!(matches!(
        Universe::from_points(vec![0., f64::NAN]),
        Err(FuzzyError::InvalidUniverse(_))
    ));
    assert!(matches!(Universe::arange(0., 10., 0.), Err(FuzzyError::InvalidUniverse(_))));
    assert!(matches!(Universe::arange(10., 0., 1.), Err(FuzzyError::InvalidUniverse(_))));
    assert!(matches!(Universe::linspace(1., 0., 5), Err(FuzzyError::InvalidUniverse(_))));

    // Non-uniform spacing is fine
    assert!(Universe::from_points(vec![0., 0.5, 2., 10.]).is_ok());
}

#[test]
fn test_universe_rejects_oversized_ranges() {
    assert!(matches!(Universe::arange(0., 1e30, 1.), Err(FuzzyError::InvalidUniverse(_))));
    assert!(matches!(
        Universe::arange(0., f64::INFINITY, 1.),
        Err(FuzzyError::InvalidUniverse(_))
    ));
    assert!(matches!(
        Universe::linspace(0., 1., usize::MAX),
        Err(FuzzyError::InvalidUniverse(_))
    ));
    assert!(matches!(
        Universe::linspace(0., 1., Universe::MAX_POINTS + 1),
        Err(FuzzyError::InvalidUniverse(_))
    ));

    let def: UniverseDef = serde_json::from_str(r#"{"arange": {"start": 0, "stop": 1e30, "step": 1}}"#).unwrap();

    assert!(matches!(def.build(), Err(FuzzyError::InvalidUniverse(_))));
}
