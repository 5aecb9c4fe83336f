use crate::error::{FuzzyError, FuzzyResult};
use crate::variable::{Variable, VariableKey};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Output {
    pub(crate) var: VariableKey,
    pub(crate) name: String,
    pub(crate) value: FuzzyResult<f64>,
    pub(crate) aggregated: Vec<f64>,
}

/// Crisp results of one evaluation, one entry per consequent variable.
///
/// Each output carries its own status: an output no rule fired for holds
/// [`FuzzyError::NoActiveRules`] while the others still hold values.
#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    pub(crate) outputs: Vec<Output>,
    pub(crate) firing_strengths: Vec<f64>,
}

impl Outputs {
    pub fn get(&self, var: Variable) -> Option<&FuzzyResult<f64>> {
        self.find(var).map(|o| &o.value)
    }

    pub fn get_by_name(&self, name: &str) -> Option<&FuzzyResult<f64>> {
        self.outputs.iter().find(|o| o.name == name).map(|o| &o.value)
    }

    /// The crisp value, or the output's error.
    pub fn value(&self, var: Variable) -> FuzzyResult<f64> {
        match self.find(var) {
            Some(output) => output.value.clone(),
            None => Err(FuzzyError::NotAnOutput),
        }
    }

    /// Like [`Outputs::value`] but substitutes `fallback` when no rule fired.
    /// Any other error is still returned.
    pub fn value_or(&self, var: Variable, fallback: f64) -> FuzzyResult<f64> {
        match self.value(var) {
            Err(FuzzyError::NoActiveRules { .. }) => Ok(fallback),
            other => other,
        }
    }

    /// Aggregated output fuzzy set, one degree per universe sample point.
    pub fn aggregated(&self, var: Variable) -> Option<&[f64]> {
        self.find(var).map(|o| &*o.aggregated)
    }

    /// Clamped strength of every rule, in rule-base order.
    pub fn firing_strengths(&self) -> &[f64] {
        &self.firing_strengths
    }

    pub fn iter(&self) -> impl Iterator<Item = (Variable, &str, &FuzzyResult<f64>)> {
        self.outputs.iter().map(|o| (Variable(o.var), o.name.as_str(), &o.value))
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    fn find(&self, var: Variable) -> Option<&Output> {
        self.outputs.iter().find(|o| o.var == var.0)
    }
}
