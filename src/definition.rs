//! Already-parsed descriptions of a control system.
//!
//! Reading these from a file is up to the caller; any serde format works.
//!
//! ```json
//! {
//!   "variables": [
//!     { "name": "temperature", "role": "antecedent",
//!       "universe": { "arange": { "start": 0, "stop": 101, "step": 1 } },
//!       "terms": [{ "name": "Cold", "shape": { "triangular": [0, 0, 50] } }] }
//!   ],
//!   "rules": [
//!     { "when": { "is": { "variable": "temperature", "term": "Cold" } },
//!       "then": [{ "variable": "fan_speed", "term": "Low" }] }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::config::InferenceConfig;
use crate::dsl::{Expr, Proposition};
use crate::error::{FuzzyError, FuzzyResult};
use crate::inference::ControlSystem;
use crate::membership::Shape;
use crate::rules::{Rule, Rules};
use crate::universe::UniverseDef;
use crate::variable::{Role, Variables};

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct SystemDefinition {
    pub variables: Vec<VariableDef>,
    pub rules: Vec<RuleDef>,
    #[serde(default)]
    pub config: InferenceConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct VariableDef {
    pub name: String,
    pub role: Role,
    pub universe: UniverseDef,
    #[serde(default)]
    pub terms: Vec<TermDef>,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct TermDef {
    pub name: String,
    pub shape: Shape,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct RuleDef {
    pub when: ExprDef,
    pub then: Vec<PropositionDef>,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct PropositionDef {
    pub variable: String,
    pub term: String,
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprDef {
    Is(PropositionDef),
    And(Box<ExprDef>, Box<ExprDef>),
    Or(Box<ExprDef>, Box<ExprDef>),
    Not(Box<ExprDef>),
}

impl SystemDefinition {
    pub fn build(&self) -> FuzzyResult<ControlSystem> {
        let mut vars = Variables::new();

        for def in &self.variables {
            let var = vars.add(def.name.clone(), def.role, def.universe.build()?)?;

            for term in &def.terms {
                vars.add_boxed_term(var, term.name.clone(), term.shape.build()?)?;
            }
        }

        let rules = self
            .rules
            .iter()
            .map(|def| {
                let premise = def.when.resolve(&vars)?;
                let consequences = def
                    .then
                    .iter()
                    .map(|prop| prop.resolve(&vars))
                    .collect::<FuzzyResult<Vec<_>>>()?;

                Ok(Rule::new(premise, consequences).with_weight(def.weight))
            })
            .collect::<FuzzyResult<Rules>>()?;

        ControlSystem::with_config(vars, rules, self.config)
    }
}

impl PropositionDef {
    fn resolve(&self, vars: &Variables) -> FuzzyResult<Proposition> {
        let var = vars.lookup(&self.variable).ok_or_else(|| {
            FuzzyError::InvalidRuleBase(format!("rule references unknown variable `{}`", self.variable))
        })?;

        Ok(var.term(self.term.clone()))
    }
}

impl ExprDef {
    fn resolve(&self, vars: &Variables) -> FuzzyResult<Expr> {
        Ok(match self {
            Self::Is(prop) => Expr::Is(prop.resolve(vars)?),
            Self::And(lhs, rhs) => lhs.resolve(vars)?.and(rhs.resolve(vars)?),
            Self::Or(lhs, rhs) => lhs.resolve(vars)?.or(rhs.resolve(vars)?),
            Self::Not(expr) => !expr.resolve(vars)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::ops::DefuzzificationOp;

    const HEATER: &str = r#"{
        "variables": [
            {
                "name": "temperature",
                "role": "antecedent",
                "universe": { "linspace": { "min": 0, "max": 40, "num": 41 } },
                "terms": [
                    { "name": "Cold", "shape": { "triangular": [0, 0, 20] } },
                    { "name": "Hot", "shape": { "piecewise": [[15, 0], [30, 1]] } }
                ]
            },
            {
                "name": "power",
                "role": "consequent",
                "universe": { "arange": { "start": 0, "stop": 11, "step": 1 } },
                "terms": [
                    { "name": "Off", "shape": { "triangular": [0, 0, 5] } },
                    { "name": "Full", "shape": { "triangular": [5, 10, 10] } }
                ]
            }
        ],
        "rules": [
            {
                "when": { "is": { "variable": "temperature", "term": "Cold" } },
                "then": [{ "variable": "power", "term": "Full" }]
            },
            {
                "when": { "not": { "is": { "variable": "temperature", "term": "Cold" } } },
                "then": [{ "variable": "power", "term": "Off" }],
                "weight": 0.5
            }
        ],
        "config": { "defuzzification": "largest_of_maximum" }
    }"#;

    #[test]
    fn builds_from_json() {
        let def: SystemDefinition = serde_json::from_str(HEATER).unwrap();

        assert_eq!(def.rules[0].weight, 1.);
        assert_eq!(def.config.defuzzification, DefuzzificationOp::LargestOfMaximum);

        let system = def.build().unwrap();
        let temperature = system.variable("temperature").unwrap();
        let power = system.variable("power").unwrap();
        let outputs = system.evaluate(&system.inputs([("temperature", 0.)]).unwrap()).unwrap();

        assert_eq!(outputs.firing_strengths(), [1., 0.]);
        assert_eq!(outputs.value(power), Ok(10.));
        assert_eq!(system.variables().get(temperature).unwrap().fuzzify("Hot", 22.5), Ok(0.5));
    }

    #[test]
    fn dangling_names_are_invalid() {
        let mut def: SystemDefinition = serde_json::from_str(HEATER).unwrap();

        def.rules[0].then[0].variable = "fan".into();
        assert_eq!(def.build().unwrap_err().kind(), ErrorKind::InvalidRuleBase);

        let mut def: SystemDefinition = serde_json::from_str(HEATER).unwrap();

        def.rules[1].when = ExprDef::Is(PropositionDef {
            variable: "temperature".into(),
            term: "Mild".into(),
        });
        assert_eq!(def.build().unwrap_err().kind(), ErrorKind::InvalidRuleBase);
    }

    #[test]
    fn duplicate_terms_are_rejected() {
        let mut def: SystemDefinition = serde_json::from_str(HEATER).unwrap();
        let dup = def.variables[0].terms[0].clone();

        def.variables[0].terms.push(dup);
        assert_eq!(def.build().unwrap_err().kind(), ErrorKind::DuplicateTerm);
    }
}
