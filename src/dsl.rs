use std::ops::{BitAnd, BitOr, Not};

use crate::error::FuzzyResult;
use crate::ops::{AndOp, OrOp};
use crate::variable::{Variable, VariableKey};

/// "`variable` is `term`"
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Proposition {
    pub(crate) var: VariableKey,
    pub(crate) term: String,
}

impl Proposition {
    pub fn variable(&self) -> Variable {
        Variable(self.var)
    }

    pub fn term(&self) -> &str {
        &self.term
    }
}

/// Rule premise: a finite tree of propositions joined by fuzzy connectives.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Is(Proposition),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

impl Expr {
    pub fn and(self, rhs: Expr) -> Self {
        Expr::And(Box::new(self), Box::new(rhs))
    }

    pub fn or(self, rhs: Expr) -> Self {
        Expr::Or(Box::new(self), Box::new(rhs))
    }

    pub fn propositions(&self) -> Vec<&Proposition> {
        let mut props = Vec::new();

        fn parse<'p>(expr: &'p Expr, out: &mut Vec<&'p Proposition>) {
            match expr {
                Expr::Is(prop) => out.push(prop),
                Expr::And(lhs, rhs) | Expr::Or(lhs, rhs) => {
                    parse(lhs, out);
                    parse(rhs, out);
                },
                Expr::Not(expr) => parse(expr, out),
            }
        }

        parse(self, &mut props);

        props
    }

    /// Firing strength of the premise. `degree` fuzzifies a single proposition
    /// against the current inputs; the connectives decide how they combine.
    pub fn evaluate<D>(&self, and_op: AndOp, or_op: OrOp, degree: &mut D) -> FuzzyResult<f64>
    where
        D: FnMut(&Proposition) -> FuzzyResult<f64>,
    {
        Ok(match self {
            Expr::Is(prop) => degree(prop)?,
            Expr::And(lhs, rhs) => {
                let left = lhs.evaluate(and_op, or_op, degree)?;
                let right = rhs.evaluate(and_op, or_op, degree)?;

                and_op.call(left, right)
            },
            Expr::Or(lhs, rhs) => {
                let left = lhs.evaluate(and_op, or_op, degree)?;
                let right = rhs.evaluate(and_op, or_op, degree)?;

                or_op.call(left, right)
            },
            Expr::Not(expr) => 1. - expr.evaluate(and_op, or_op, degree)?,
        })
    }
}

impl BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Expr) -> Expr {
        self.and(rhs)
    }
}

impl BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Expr) -> Expr {
        self.or(rhs)
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        Expr::Not(Box::new(self))
    }
}

impl From<Proposition> for Expr {
    fn from(prop: Proposition) -> Self {
        Expr::Is(prop)
    }
}

impl Variable {
    pub fn term(self, term: impl Into<String>) -> Proposition {
        Proposition {
            var: self.0,
            term: term.into(),
        }
    }

    pub fn is(self, term: impl Into<String>) -> Expr {
        Expr::Is(self.term(term))
    }
}
