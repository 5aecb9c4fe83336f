use serde::{Deserialize, Serialize};

use crate::ops::{AndOp, DefuzzificationOp, OrOp};

/// Operators used by a [`ControlSystem`](crate::ControlSystem).
///
/// The default is classic Mamdani inference: Zadeh min/max connectives,
/// max aggregation of the clipped consequences and centroid defuzzification.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default)]
pub struct InferenceConfig {
    pub and_op: AndOp,
    pub or_op: OrOp,
    pub aggregation: OrOp,
    pub defuzzification: DefuzzificationOp,
}

impl InferenceConfig {
    /// Product t-norm with probabilistic sum, aggregation left at max.
    pub fn product() -> Self {
        Self {
            and_op: AndOp::Prod,
            or_op: OrOp::ProbOr,
            ..Self::default()
        }
    }

    pub fn with_defuzzification(mut self, op: DefuzzificationOp) -> Self {
        self.defuzzification = op;
        self
    }
}

#[test]
fn test_partial_config_uses_defaults() {
    let config: InferenceConfig = serde_json::from_str(r#"{ "defuzzification": "mean_of_maximum" }"#).unwrap();

    assert_eq!(config.and_op, AndOp::Min);
    assert_eq!(config.or_op, OrOp::Max);
    assert_eq!(config.aggregation, OrOp::Max);
    assert_eq!(config.defuzzification, DefuzzificationOp::MeanOfMaximum);
    assert_eq!(
        InferenceConfig::product().with_defuzzification(DefuzzificationOp::Bisector),
        InferenceConfig {
            and_op: AndOp::Prod,
            or_op: OrOp::ProbOr,
            aggregation: OrOp::Max,
            defuzzification: DefuzzificationOp::Bisector,
        }
    );
}
