use std::collections::{HashMap, HashSet};

use tracing::{debug, trace};

use crate::config::InferenceConfig;
use crate::dsl::Proposition;
use crate::error::{FuzzyError, FuzzyResult};
use crate::inputs::Inputs;
use crate::outputs::{Output, Outputs};
use crate::rules::Rules;
use crate::variable::{Aggregation, LinguisticVariable, Role, Variable, VariableKey, Variables};

/// A closed rule base plus the variables it references.
///
/// Immutable once built and safe to share between threads; all per-call
/// scratch space lives in an [`EvaluationContext`].
#[derive(Debug)]
pub struct ControlSystem {
    vars: Variables,
    rules: Rules,
    config: InferenceConfig,
    // Antecedents read by at least one premise, in first-use order
    inputs: Vec<VariableKey>,
    // Every consequent variable, used by a rule or not
    outputs: Vec<VariableKey>,
    // Per rule: (output slot, term index) of each consequence
    targets: Vec<Vec<(usize, usize)>>,
}

impl ControlSystem {
    pub fn new(vars: Variables, rules: Rules) -> FuzzyResult<Self> {
        Self::with_config(vars, rules, InferenceConfig::default())
    }

    /// Checks that every proposition names a registered variable and term, that
    /// premises only read antecedents and consequences only write consequents,
    /// and that weights lie in `[0, 1]`.
    pub fn with_config(vars: Variables, rules: Rules, config: InferenceConfig) -> FuzzyResult<Self> {
        let outputs: Vec<VariableKey> = vars
            .vars
            .iter()
            .filter(|(_, var)| var.role() == Role::Consequent)
            .map(|(key, _)| key)
            .collect();
        let mut inputs = Vec::new();
        let mut seen_inputs = HashSet::new();
        let mut targets = Vec::with_capacity(rules.len());

        for (i, rule) in rules.iter().enumerate() {
            if !(0. ..=1.).contains(&rule.weight) {
                return Err(FuzzyError::InvalidRuleBase(format!(
                    "rule {i} has weight {} outside [0, 1]",
                    rule.weight
                )));
            }

            if rule.consequences.is_empty() {
                return Err(FuzzyError::InvalidRuleBase(format!("rule {i} has no consequences")));
            }

            for prop in rule.premise.propositions() {
                resolve(&vars, prop, Role::Antecedent, i)?;

                if seen_inputs.insert(prop.var) {
                    inputs.push(prop.var);
                }
            }

            let mut rule_targets = Vec::with_capacity(rule.consequences.len());

            for prop in &rule.consequences {
                let term = resolve(&vars, prop, Role::Consequent, i)?;
                // resolve() guarantees a consequent, and every consequent has a slot
                let slot = outputs
                    .iter()
                    .position(|key| *key == prop.var)
                    .ok_or_else(|| FuzzyError::InvalidRuleBase(format!("rule {i} targets a non-output")))?;

                rule_targets.push((slot, term));
            }

            targets.push(rule_targets);
        }

        debug!(
            variables = vars.len(),
            rules = rules.len(),
            inputs = inputs.len(),
            outputs = outputs.len(),
            "built control system"
        );

        Ok(Self {
            vars,
            rules,
            config,
            inputs,
            outputs,
            targets,
        })
    }

    pub fn variables(&self) -> &Variables {
        &self.vars
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    pub fn variable(&self, name: &str) -> Option<Variable> {
        self.vars.lookup(name)
    }

    /// Antecedent variables that rules actually read, i.e. the required inputs.
    pub fn input_variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.inputs.iter().map(|key| Variable(*key))
    }

    pub fn output_variables(&self) -> impl Iterator<Item = Variable> + '_ {
        self.outputs.iter().map(|key| Variable(*key))
    }

    /// Builds [`Inputs`] from variable names.
    pub fn inputs<'n>(&self, values: impl IntoIterator<Item = (&'n str, f64)>) -> FuzzyResult<Inputs> {
        values
            .into_iter()
            .map(|(name, val)| {
                self.variable(name)
                    .map(|var| (var, val))
                    .ok_or_else(|| FuzzyError::UnknownVariable(name.to_owned()))
            })
            .collect()
    }

    pub fn context(&self) -> EvaluationContext {
        EvaluationContext::default()
    }

    /// Runs one inference with fresh scratch space.
    pub fn evaluate(&self, inputs: &Inputs) -> FuzzyResult<Outputs> {
        self.evaluate_with(&mut self.context(), inputs)
    }

    /// Runs one inference reusing `ctx`'s buffers, which are reset first.
    ///
    /// Inputs outside a variable's universe are clamped to the nearest bound
    /// rather than rejected. A missing or non-finite input aborts the call; an
    /// output no rule fired for reports [`FuzzyError::NoActiveRules`] on its own
    /// without affecting the others.
    pub fn evaluate_with(&self, ctx: &mut EvaluationContext, inputs: &Inputs) -> FuzzyResult<Outputs> {
        ctx.prepare(self);

        let EvaluationContext {
            crisp,
            firing_strengths,
            aggregations,
        } = ctx;

        // Validate
        for &key in &self.inputs {
            let var = &self.vars.vars[key];
            let value = inputs.0.get(&key).copied().ok_or_else(|| FuzzyError::MissingInput {
                variable: var.name().to_owned(),
            })?;

            if !value.is_finite() {
                return Err(FuzzyError::NonFiniteInput {
                    variable: var.name().to_owned(),
                    value,
                });
            }

            let clamped = var.universe().clamp(value);

            if clamped != value {
                trace!(variable = var.name(), value, clamped, "clamped input to universe");
            }

            crisp.insert(key, clamped);
        }

        // Fire rules
        let mut degree = |prop: &Proposition| -> FuzzyResult<f64> {
            let var = &self.vars.vars[prop.var];
            let x = crisp.get(&prop.var).copied().ok_or_else(|| FuzzyError::MissingInput {
                variable: var.name().to_owned(),
            })?;

            var.fuzzify(&prop.term, x)
        };

        for (i, (rule, targets)) in self.rules.iter().zip(&self.targets).enumerate() {
            let strength = rule.fire(self.config.and_op, self.config.or_op, &mut degree)?;

            trace!(rule = i, strength, "fired rule");
            firing_strengths.push(strength);

            // Zero is the identity of every aggregation operator
            if strength == 0. {
                continue;
            }

            for &(slot, term) in targets {
                let var = &self.vars.vars[self.outputs[slot]];

                aggregations[slot].accumulate(var.sampled_at(term), strength, self.config.aggregation);
            }
        }

        // Defuzzify
        let outputs = self
            .outputs
            .iter()
            .zip(aggregations.iter())
            .map(|(&key, aggregation)| {
                let var: &LinguisticVariable = &self.vars.vars[key];
                let value = var.defuzzify(aggregation, self.config.defuzzification);

                debug!(output = var.name(), ?value, "defuzzified");

                Output {
                    var: key,
                    name: var.name().to_owned(),
                    value,
                    aggregated: aggregation.curve().to_vec(),
                }
            })
            .collect();

        Ok(Outputs {
            outputs,
            firing_strengths: firing_strengths.clone(),
        })
    }
}

/// Looks up a proposition's variable and term, checking the variable's role.
/// Returns the term index.
fn resolve(vars: &Variables, prop: &Proposition, role: Role, rule: usize) -> FuzzyResult<usize> {
    let var = vars.vars.get(prop.var).ok_or_else(|| {
        FuzzyError::InvalidRuleBase(format!("rule {rule} references a variable missing from the registry"))
    })?;

    if var.role() != role {
        let place = match role {
            Role::Antecedent => "premise",
            Role::Consequent => "consequence",
        };

        return Err(FuzzyError::InvalidRuleBase(format!(
            "rule {rule} uses {:?} variable `{}` in its {place}",
            var.role(),
            var.name()
        )));
    }

    var.term_index(&prop.term).ok_or_else(|| {
        FuzzyError::InvalidRuleBase(format!(
            "rule {rule} references unknown term `{}` of `{}`",
            prop.term,
            var.name()
        ))
    })
}

/// Per-call scratch space: clamped inputs, rule strengths and one aggregation
/// buffer per output. Never share one between concurrent evaluations; give each
/// thread its own.
#[derive(Clone, Debug, Default)]
pub struct EvaluationContext {
    crisp: HashMap<VariableKey, f64>,
    firing_strengths: Vec<f64>,
    aggregations: Vec<Aggregation>,
}

impl EvaluationContext {
    /// Clears everything left over from a previous call and sizes the buffers
    /// for `system`.
    fn prepare(&mut self, system: &ControlSystem) {
        self.crisp.clear();
        self.firing_strengths.clear();
        self.aggregations
            .resize_with(system.outputs.len(), Aggregation::default);

        for (aggregation, &key) in self.aggregations.iter_mut().zip(&system.outputs) {
            let len = system.vars.vars[key].universe().len();

            if aggregation.curve().len() == len {
                aggregation.reset();
            } else {
                *aggregation = Aggregation::new(len);
            }
        }
    }
}
