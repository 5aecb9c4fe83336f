use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, FuzzyResult};
use crate::math::interp_at;

/// A fuzzy set's shape: maps any crisp value to a degree in `[0, 1]`.
///
/// The engine only ever calls [`Membership::degree`], so new shapes plug in
/// without touching inference.
pub trait Membership: Debug + Send + Sync {
    fn degree(&self, x: f64) -> f64;
}

/// Triangle rising from 0 at `a` to 1 at `b` and falling back to 0 at `c`.
///
/// `a == b` or `b == c` gives a vertical edge (a ramp), so the degree jumps
/// straight to 1 instead of dividing by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangular {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangular {
    pub fn new(a: f64, b: f64, c: f64) -> FuzzyResult<Self> {
        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            return Err(FuzzyError::InvalidMembership(format!(
                "triangle ({a}, {b}, {c}) has non-finite parameters"
            )));
        }

        if !(a <= b && b <= c) {
            return Err(FuzzyError::InvalidMembership(format!(
                "triangle ({a}, {b}, {c}) must satisfy a <= b <= c"
            )));
        }

        Ok(Triangular { a, b, c })
    }

    pub fn params(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }
}

impl Membership for Triangular {
    fn degree(&self, x: f64) -> f64 {
        let Triangular { a, b, c } = *self;

        let y = if x == b {
            1.
        } else if x <= a || x >= c {
            0.
        } else if x < b {
            (x - a) / (b - a)
        } else {
            (c - x) / (c - b)
        };

        y.clamp(0., 1.)
    }
}

/// Shape given by ordered `(x, degree)` breakpoints, linearly interpolated in
/// between and held flat past either end.
#[derive(Clone, Debug, PartialEq)]
pub struct PiecewiseLinear(Vec<(f64, f64)>);

impl PiecewiseLinear {
    pub fn new(points: Vec<(f64, f64)>) -> FuzzyResult<Self> {
        if points.is_empty() {
            return Err(FuzzyError::InvalidMembership("piecewise shape has no points".into()));
        }

        for &(x, y) in &points {
            if !x.is_finite() || !(0. ..=1.).contains(&y) {
                return Err(FuzzyError::InvalidMembership(format!(
                    "breakpoint ({x}, {y}) needs a finite x and a degree in [0, 1]"
                )));
            }
        }

        if points.windows(2).any(|w| w[0].0 > w[1].0) {
            return Err(FuzzyError::InvalidMembership(
                "piecewise breakpoints must be ordered by x".into(),
            ));
        }

        Ok(PiecewiseLinear(points))
    }

    pub fn points(&self) -> &[(f64, f64)] {
        &self.0
    }
}

impl Membership for PiecewiseLinear {
    fn degree(&self, x: f64) -> f64 {
        interp_at(x, &self.0).clamp(0., 1.)
    }
}

/// Serializable shape description, see [`Shape::build`].
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// `[a, b, c]`
    Triangular([f64; 3]),
    Piecewise(Vec<(f64, f64)>),
}

impl Shape {
    pub fn build(&self) -> FuzzyResult<Box<dyn Membership>> {
        let shape: Box<dyn Membership> = match self {
            Self::Triangular([a, b, c]) => Box::new(Triangular::new(*a, *b, *c)?),
            Self::Piecewise(points) => Box::new(PiecewiseLinear::new(points.clone())?),
        };

        Ok(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triangle_degrees() {
        let medium = Triangular::new(25., 50., 75.).unwrap();

        assert_eq!(medium.degree(0.), 0.);
        assert_eq!(medium.degree(25.), 0.);
        assert_eq!(medium.degree(37.5), 0.5);
        assert_eq!(medium.degree(50.), 1.);
        assert_eq!(medium.degree(62.5), 0.5);
        assert_eq!(medium.degree(75.), 0.);
        assert_eq!(medium.degree(1e9), 0.);
    }

    #[test]
    fn triangle_vertical_edges() {
        let low = Triangular::new(0., 0., 50.).unwrap();
        let high = Triangular::new(50., 100., 100.).unwrap();

        assert_eq!(low.degree(0.), 1.);
        assert_eq!(low.degree(25.), 0.5);
        assert_eq!(low.degree(-1.), 0.);
        assert_eq!(high.degree(100.), 1.);
        assert_eq!(high.degree(75.), 0.5);
        assert_eq!(high.degree(101.), 0.);

        let spike = Triangular::new(3., 3., 3.).unwrap();

        assert_eq!(spike.degree(3.), 1.);
        assert_eq!(spike.degree(3.0001), 0.);
    }

    #[test]
    fn triangle_bounds_and_peak() {
        let shapes = [(0., 0., 50.), (25., 50., 75.), (50., 100., 100.), (-3., 0.5, 0.75)];

        for (a, b, c) in shapes {
            let tri = Triangular::new(a, b, c).unwrap();

            assert_eq!(tri.degree(b), 1.);

            for i in -200..=200 {
                let d = tri.degree(i as f64 * 0.75);

                assert!((0. ..=1.).contains(&d), "degree {d} out of bounds for {a},{b},{c}");
            }
        }
    }

    #[test]
    fn triangle_rejects_unordered() {
        assert!(matches!(Triangular::new(10., 5., 20.), Err(FuzzyError::InvalidMembership(_))));
        assert!(matches!(
            Triangular::new(0., f64::INFINITY, 20.),
            Err(FuzzyError::InvalidMembership(_))
        ));
    }

    #[test]
    fn piecewise_shape() {
        let high = PiecewiseLinear::new(vec![(175., 0.), (180., 0.2), (185., 0.7), (190., 1.)]).unwrap();

        assert_eq!(high.degree(150.), 0.);
        assert_eq!(high.degree(180.), 0.2);
        assert_eq!(high.degree(200.), 1.);
        assert!((high.degree(182.5) - 0.45).abs() < 1e-12);

        assert!(PiecewiseLinear::new(vec![]).is_err());
        assert!(PiecewiseLinear::new(vec![(1., 0.), (0., 1.)]).is_err());
        assert!(PiecewiseLinear::new(vec![(1., 1.5)]).is_err());
    }

    #[test]
    fn shape_builds_trait_objects() {
        let tri = Shape::Triangular([0., 0., 50.]).build().unwrap();

        assert_eq!(tri.degree(25.), 0.5);
        assert!(Shape::Triangular([5., 0., 1.]).build().is_err());
    }
}
