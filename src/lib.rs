//! Mamdani fuzzy inference.
//!
//! Register linguistic variables with their universes and terms, write rules
//! over them, and build an immutable [`ControlSystem`]. Each evaluation
//! fuzzifies the crisp inputs, fires every rule, clips and aggregates the
//! consequent sets and defuzzifies each output back to a crisp value.
//!
//! ```
//! use fuzzy_control::{ControlSystem, Inputs, Rules, Triangular, Universe, Variables};
//!
//! # fn main() -> fuzzy_control::FuzzyResult<()> {
//! let mut vars = Variables::new();
//! let temperature = vars.antecedent("temperature", Universe::arange(0., 101., 1.)?)?;
//! let fan_speed = vars.consequent("fan_speed", Universe::arange(0., 101., 1.)?)?;
//!
//! vars.add_term(temperature, "Cold", Triangular::new(0., 0., 50.)?)?;
//! vars.add_term(temperature, "Hot", Triangular::new(50., 100., 100.)?)?;
//! vars.add_term(fan_speed, "Low", Triangular::new(0., 0., 50.)?)?;
//! vars.add_term(fan_speed, "High", Triangular::new(50., 100., 100.)?)?;
//!
//! let mut rules = Rules::new();
//! rules.add(temperature.is("Cold"), fan_speed.term("Low"));
//! rules.add(temperature.is("Hot"), fan_speed.term("High"));
//!
//! let system = ControlSystem::new(vars, rules)?;
//! let outputs = system.evaluate(&Inputs::new().with(temperature, 90.))?;
//!
//! assert!(outputs.value(fan_speed)? > 50.);
//! # Ok(())
//! # }
//! ```

mod config;
pub mod definition;
mod dsl;
mod error;
mod grid;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
mod ops;
mod outputs;
mod rules;
mod universe;
mod variable;

pub use config::InferenceConfig;
pub use definition::SystemDefinition;
pub use dsl::{Expr, Proposition};
pub use error::{ErrorKind, FuzzyError, FuzzyResult};
pub use grid::{Axis, GridEvaluator, GridFailure, Surface};
pub use inference::{ControlSystem, EvaluationContext};
pub use inputs::Inputs;
pub use membership::{Membership, PiecewiseLinear, Shape, Triangular};
pub use ops::{AndOp, DefuzzificationOp, OrOp};
pub use outputs::Outputs;
pub use rules::{Rule, Rules};
pub use universe::{Universe, UniverseDef};
pub use variable::{Aggregation, LinguisticVariable, Role, Variable, VariableKey, Variables};
