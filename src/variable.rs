use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use slotmap::{new_key_type, SlotMap};

use crate::error::{FuzzyError, FuzzyResult};
use crate::membership::Membership;
use crate::ops::{DefuzzificationOp, OrOp};
use crate::universe::Universe;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// Handle to a registered variable. Cheap to copy into rules and inputs.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Variable(pub(crate) VariableKey);

/// Whether a variable is read from the inputs or produced by the rules.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Antecedent,
    Consequent,
}

#[derive(Debug)]
struct Term {
    name: String,
    shape: Box<dyn Membership>,
    // Degree at every universe sample point
    sampled: Vec<f64>,
}

/// A named quantity described by a universe and its fuzzy terms.
#[derive(Debug)]
pub struct LinguisticVariable {
    name: String,
    role: Role,
    universe: Universe,
    terms: Vec<Term>,
}

impl LinguisticVariable {
    pub fn new(name: impl Into<String>, role: Role, universe: Universe) -> Self {
        Self {
            name: name.into(),
            role,
            universe,
            terms: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    pub fn term_names(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|t| t.name.as_str())
    }

    pub fn has_term(&self, term: &str) -> bool {
        self.term_index(term).is_some()
    }

    pub(crate) fn term_index(&self, term: &str) -> Option<usize> {
        self.terms.iter().position(|t| t.name == term)
    }

    pub fn register_term(&mut self, name: impl Into<String>, shape: impl Membership + 'static) -> FuzzyResult<()> {
        self.register_boxed(name, Box::new(shape))
    }

    pub fn register_boxed(&mut self, name: impl Into<String>, shape: Box<dyn Membership>) -> FuzzyResult<()> {
        let name = name.into();

        if self.has_term(&name) {
            return Err(FuzzyError::DuplicateTerm {
                variable: self.name.clone(),
                term: name,
            });
        }

        let sampled = self.universe.points().iter().map(|&x| shape.degree(x)).collect();

        self.terms.push(Term { name, shape, sampled });

        Ok(())
    }

    pub fn membership(&self, term: &str) -> FuzzyResult<&dyn Membership> {
        self.term_index(term)
            .map(|i| &*self.terms[i].shape)
            .ok_or_else(|| self.unknown_term(term))
    }

    /// Degree to which crisp `x` belongs to `term`.
    pub fn fuzzify(&self, term: &str, x: f64) -> FuzzyResult<f64> {
        Ok(self.membership(term)?.degree(x))
    }

    /// The term's membership sampled at each universe point.
    pub fn sampled(&self, term: &str) -> FuzzyResult<&[f64]> {
        self.term_index(term)
            .map(|i| self.sampled_at(i))
            .ok_or_else(|| self.unknown_term(term))
    }

    pub(crate) fn sampled_at(&self, index: usize) -> &[f64] {
        &self.terms[index].sampled
    }

    /// Clip `term` at `strength` and max it into `aggregation`.
    pub fn accumulate(&self, aggregation: &mut Aggregation, term: &str, strength: f64) -> FuzzyResult<()> {
        let sampled = self.sampled(term)?;

        aggregation.accumulate(sampled, strength, OrOp::Max);

        Ok(())
    }

    /// Center of mass of `aggregation` over this variable's universe.
    pub fn centroid(&self, aggregation: &Aggregation) -> FuzzyResult<f64> {
        self.defuzzify(aggregation, DefuzzificationOp::Centroid)
    }

    pub fn defuzzify(&self, aggregation: &Aggregation, op: DefuzzificationOp) -> FuzzyResult<f64> {
        op.call(self.universe.points(), aggregation.curve())
            .ok_or_else(|| FuzzyError::NoActiveRules {
                variable: self.name.clone(),
            })
    }

    fn unknown_term(&self, term: &str) -> FuzzyError {
        FuzzyError::UnknownTerm {
            variable: self.name.clone(),
            term: term.to_owned(),
        }
    }
}

/// Working output fuzzy set: one degree per universe sample point.
///
/// Lives in the per-call evaluation context, not in the variable, so a shared
/// variable registry stays read-only.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Aggregation(Vec<f64>);

impl Aggregation {
    pub fn new(len: usize) -> Self {
        Aggregation(vec![0.; len])
    }

    pub fn reset(&mut self) {
        self.0.iter_mut().for_each(|v| *v = 0.);
    }

    pub fn curve(&self) -> &[f64] {
        &self.0
    }

    /// `curve[i] = link(curve[i], min(strength, membership[i]))`
    pub fn accumulate(&mut self, membership: &[f64], strength: f64, link: OrOp) {
        debug_assert_eq!(self.0.len(), membership.len());

        for (current, &m) in self.0.iter_mut().zip(membership) {
            *current = link.call(*current, f64::min(strength, m));
        }
    }
}

#[derive(Debug, Default)]
pub struct Variables {
    pub(crate) vars: SlotMap<VariableKey, LinguisticVariable>,
    names: HashMap<String, VariableKey>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: impl Into<String>, role: Role, universe: Universe) -> FuzzyResult<Variable> {
        let name = name.into();

        if self.names.contains_key(&name) {
            return Err(FuzzyError::DuplicateVariable(name));
        }

        let key = self.vars.insert(LinguisticVariable::new(name.clone(), role, universe));

        self.names.insert(name, key);

        Ok(Variable(key))
    }

    pub fn antecedent(&mut self, name: impl Into<String>, universe: Universe) -> FuzzyResult<Variable> {
        self.add(name, Role::Antecedent, universe)
    }

    pub fn consequent(&mut self, name: impl Into<String>, universe: Universe) -> FuzzyResult<Variable> {
        self.add(name, Role::Consequent, universe)
    }

    pub fn add_term(
        &mut self,
        var: Variable,
        name: impl Into<String>,
        shape: impl Membership + 'static,
    ) -> FuzzyResult<()> {
        self.add_boxed_term(var, name, Box::new(shape))
    }

    pub fn add_boxed_term(
        &mut self,
        var: Variable,
        name: impl Into<String>,
        shape: Box<dyn Membership>,
    ) -> FuzzyResult<()> {
        self.vars
            .get_mut(var.0)
            .ok_or(FuzzyError::ForeignVariable)?
            .register_boxed(name, shape)
    }

    pub fn get(&self, var: Variable) -> Option<&LinguisticVariable> {
        self.vars.get(var.0)
    }

    pub fn lookup(&self, name: &str) -> Option<Variable> {
        self.names.get(name).copied().map(Variable)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, &LinguisticVariable)> {
        self.vars.iter().map(|(key, var)| (Variable(key), var))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::Triangular;

    fn fan_speed() -> LinguisticVariable {
        let mut var = LinguisticVariable::new("fan_speed", Role::Consequent, Universe::arange(0., 101., 1.).unwrap());

        var.register_term("Low", Triangular::new(0., 0., 50.).unwrap()).unwrap();
        var.register_term("Medium", Triangular::new(25., 50., 75.).unwrap()).unwrap();
        var.register_term("High", Triangular::new(50., 100., 100.).unwrap()).unwrap();
        var
    }

    #[test]
    fn fuzzify_known_and_unknown_terms() {
        let var = fan_speed();

        assert_eq!(var.fuzzify("Medium", 50.).unwrap(), 1.);
        assert_eq!(var.fuzzify("Low", 25.).unwrap(), 0.5);
        assert_eq!(
            var.fuzzify("Blazing", 10.),
            Err(FuzzyError::UnknownTerm {
                variable: "fan_speed".into(),
                term: "Blazing".into(),
            })
        );
        assert_eq!(var.term_names().collect::<Vec<_>>(), ["Low", "Medium", "High"]);
    }

    #[test]
    fn duplicate_term_rejected() {
        let mut var = fan_speed();
        let err = var.register_term("Low", Triangular::new(0., 10., 20.).unwrap());

        assert_eq!(
            err,
            Err(FuzzyError::DuplicateTerm {
                variable: "fan_speed".into(),
                term: "Low".into(),
            })
        );
    }

    #[test]
    fn accumulate_clips_then_maxes() {
        let var = fan_speed();
        let mut agg = Aggregation::new(var.universe().len());

        var.accumulate(&mut agg, "Low", 0.5).unwrap();
        assert_eq!(agg.curve()[0], 0.5);
        assert_eq!(agg.curve()[25], 0.5);
        assert_eq!(agg.curve()[40], 0.2);

        var.accumulate(&mut agg, "Medium", 0.25).unwrap();
        assert_eq!(agg.curve()[40], 0.25);
        assert_eq!(agg.curve()[0], 0.5);

        agg.reset();
        assert!(agg.curve().iter().all(|&v| v == 0.));
        assert!(var.accumulate(&mut agg, "Nope", 1.).is_err());
    }

    #[test]
    fn centroid_of_unclipped_low() {
        let var = fan_speed();
        let mut agg = Aggregation::new(var.universe().len());

        var.accumulate(&mut agg, "Low", 1.).unwrap();

        let centroid = var.centroid(&agg).unwrap();

        assert!((centroid - 50. / 3.).abs() < 1., "centroid was {centroid}");
    }

    #[test]
    fn centroid_of_empty_aggregation() {
        let var = fan_speed();
        let agg = Aggregation::new(var.universe().len());

        assert_eq!(
            var.centroid(&agg),
            Err(FuzzyError::NoActiveRules {
                variable: "fan_speed".into(),
            })
        );
    }

    #[test]
    fn registry_names_are_unique() {
        let mut vars = Variables::new();
        let universe = Universe::arange(0., 101., 1.).unwrap();
        let temperature = vars.antecedent("temperature", universe.clone()).unwrap();

        assert_eq!(vars.lookup("temperature"), Some(temperature));
        assert_eq!(vars.lookup("humidity"), None);
        assert_eq!(
            vars.consequent("temperature", universe),
            Err(FuzzyError::DuplicateVariable("temperature".into()))
        );

        vars.add_term(temperature, "Cold", Triangular::new(0., 0., 50.).unwrap()).unwrap();
        assert_eq!(vars.get(temperature).unwrap().role(), Role::Antecedent);
        assert!(vars.get(temperature).unwrap().has_term("Cold"));

        let mut other = Variables::new();

        assert_eq!(
            other.add_term(temperature, "Cold", Triangular::new(0., 0., 50.).unwrap()),
            Err(FuzzyError::ForeignVariable)
        );
    }
}
