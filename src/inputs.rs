use std::collections::HashMap;

use crate::variable::{Variable, VariableKey};

/// Crisp values for one evaluation, keyed by variable.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Inputs(pub(crate) HashMap<VariableKey, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add(&mut self, var: Variable, val: f64) {
        self.0.insert(var.0, val);
    }

    pub fn with(mut self, var: Variable, val: f64) -> Self {
        self.add(var, val);
        self
    }

    pub fn get(&self, var: Variable) -> Option<f64> {
        self.0.get(&var.0).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(Variable, f64)> for Inputs {
    fn from_iter<I: IntoIterator<Item = (Variable, f64)>>(iter: I) -> Self {
        Inputs(iter.into_iter().map(|(var, val)| (var.0, val)).collect())
    }
}
