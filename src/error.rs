use thiserror::Error;

/// Errors raised while building or evaluating a fuzzy control system.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum FuzzyError {
    #[error("variable `{variable}` has no term named `{term}`")]
    UnknownTerm { variable: String, term: String },

    #[error("variable `{variable}` already has a term named `{term}`")]
    DuplicateTerm { variable: String, term: String },

    #[error("no crisp input supplied for variable `{variable}`")]
    MissingInput { variable: String },

    #[error("invalid rule base: {0}")]
    InvalidRuleBase(String),

    /// No rule produced positive membership for this output. Recoverable:
    /// the caller picks a fallback value.
    #[error("no rule produced any membership for output `{variable}`")]
    NoActiveRules { variable: String },

    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    #[error("a variable named `{0}` is already registered")]
    DuplicateVariable(String),

    /// A handle from another registry, or one already removed.
    #[error("variable handle is not registered here")]
    ForeignVariable,

    #[error("variable is not an output of this system")]
    NotAnOutput,

    #[error("invalid universe: {0}")]
    InvalidUniverse(String),

    #[error("invalid membership function: {0}")]
    InvalidMembership(String),

    #[error("input for `{variable}` is not a finite number ({value})")]
    NonFiniteInput { variable: String, value: f64 },
}

pub type FuzzyResult<T> = Result<T, FuzzyError>;

/// Fieldless classification of a [`FuzzyError`], cheap to store per grid point.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ErrorKind {
    UnknownTerm,
    DuplicateTerm,
    MissingInput,
    InvalidRuleBase,
    NoActiveRules,
    UnknownVariable,
    DuplicateVariable,
    ForeignVariable,
    NotAnOutput,
    InvalidUniverse,
    InvalidMembership,
    NonFiniteInput,
}

impl FuzzyError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnknownTerm { .. } => ErrorKind::UnknownTerm,
            Self::DuplicateTerm { .. } => ErrorKind::DuplicateTerm,
            Self::MissingInput { .. } => ErrorKind::MissingInput,
            Self::InvalidRuleBase(_) => ErrorKind::InvalidRuleBase,
            Self::NoActiveRules { .. } => ErrorKind::NoActiveRules,
            Self::UnknownVariable(_) => ErrorKind::UnknownVariable,
            Self::DuplicateVariable(_) => ErrorKind::DuplicateVariable,
            Self::ForeignVariable => ErrorKind::ForeignVariable,
            Self::NotAnOutput => ErrorKind::NotAnOutput,
            Self::InvalidUniverse(_) => ErrorKind::InvalidUniverse,
            Self::InvalidMembership(_) => ErrorKind::InvalidMembership,
            Self::NonFiniteInput { .. } => ErrorKind::NonFiniteInput,
        }
    }
}

#[test]
fn test_kind_and_display() {
    let err = FuzzyError::NoActiveRules {
        variable: "fan_speed".into(),
    };

    assert_eq!(err.kind(), ErrorKind::NoActiveRules);
    assert_eq!(err.to_string(), "no rule produced any membership for output `fan_speed`");

    let err = FuzzyError::MissingInput {
        variable: "humidity".into(),
    };

    assert_eq!(err.kind(), ErrorKind::MissingInput);
    assert_eq!(FuzzyError::NotAnOutput.to_string(), "variable is not an output of this system");
}
