use crate::dsl::{Expr, Proposition};
use crate::error::FuzzyResult;
use crate::ops::{AndOp, OrOp};

#[derive(Clone, Debug, Default)]
pub struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    pub fn add(&mut self, premise: Expr, consequence: Proposition) {
        self.push(Rule::new(premise, [consequence]));
    }

    pub fn push(&mut self, rule: Rule) {
        self.0.push(rule);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.0.iter()
    }
}

impl FromIterator<Rule> for Rules {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        Rules(iter.into_iter().collect())
    }
}

/// `if premise then every consequence`, scaled by `weight`.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    pub(crate) premise: Expr,
    pub(crate) consequences: Vec<Proposition>,
    pub(crate) weight: f64,
}

impl Rule {
    pub fn new(premise: Expr, consequences: impl IntoIterator<Item = Proposition>) -> Self {
        Rule {
            premise,
            consequences: consequences.into_iter().collect(),
            weight: 1.,
        }
    }

    /// Weight in `[0, 1]`; checked when the control system is built.
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn premise(&self) -> &Expr {
        &self.premise
    }

    pub fn consequences(&self) -> &[Proposition] {
        &self.consequences
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Premise strength times weight, clamped to `[0, 1]`.
    pub fn fire<D>(&self, and_op: AndOp, or_op: OrOp, degree: &mut D) -> FuzzyResult<f64>
    where
        D: FnMut(&Proposition) -> FuzzyResult<f64>,
    {
        let strength = self.premise.evaluate(and_op, or_op, degree)?;

        Ok((strength * self.weight).clamp(0., 1.))
    }
}

#[test]
fn test_fire_scales_by_weight() {
    use slotmap::SlotMap;

    use crate::variable::{Variable, VariableKey};

    let mut keys = SlotMap::<VariableKey, ()>::with_key();
    let temperature = Variable(keys.insert(()));
    let fan_speed = Variable(keys.insert(()));
    let mut degree = |_: &Proposition| -> FuzzyResult<f64> { Ok(0.8) };

    let rule = Rule::new(temperature.is("Hot"), [fan_speed.term("High")]);

    assert_eq!(rule.weight(), 1.);
    assert_eq!(rule.fire(AndOp::Min, OrOp::Max, &mut degree).unwrap(), 0.8);

    let rule = rule.with_weight(0.5);

    assert_eq!(rule.fire(AndOp::Min, OrOp::Max, &mut degree).unwrap(), 0.4);
    assert_eq!(rule.consequences()[0].term(), "High");

    let mut rules = Rules::new();

    rules.add(temperature.is("Cold"), fan_speed.term("Low"));
    rules.push(rule);
    assert_eq!(rules.len(), 2);
}
