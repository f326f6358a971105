//! Operator catalog for condition builders.
//!
//! The set of supported names is fixed. Parsing an unknown name fails with
//! `DispatchError::UnsupportedOperator` instead of producing a no-op.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::errors::DispatchError;

/// A named comparison used to build a condition predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Eq,
    Ne,
    Gt,
    Ge,
    Lt,
    Le,
    /// Half-open range: `lo <= x < hi`.
    InRange,
}

impl Operator {
    pub const ALL: [Operator; 7] = [
        Operator::Eq,
        Operator::Ne,
        Operator::Gt,
        Operator::Ge,
        Operator::Lt,
        Operator::Le,
        Operator::InRange,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Gt => "gt",
            Operator::Ge => "ge",
            Operator::Lt => "lt",
            Operator::Le => "le",
            Operator::InRange => "inrange",
        }
    }

    pub fn takes_range(self) -> bool {
        matches!(self, Operator::InRange)
    }

    /// Check that `operand` has the shape this operator needs.
    pub fn check_operand<V>(self, operand: &Operand<V>) -> Result<(), DispatchError> {
        match (self.takes_range(), operand) {
            (true, Operand::Range(..)) | (false, Operand::Single(_)) => Ok(()),
            (true, Operand::Single(_)) => Err(DispatchError::OperandMismatch {
                operator: self,
                expected: "a (lower, upper) range",
            }),
            (false, Operand::Range(..)) => Err(DispatchError::OperandMismatch {
                operator: self,
                expected: "a single value",
            }),
        }
    }

    /// Evaluate `value <op> operand` over already-normalized values.
    ///
    /// A mismatched operand shape never matches; `check_operand` rejects
    /// those at registration time.
    pub fn evaluate<N: PartialOrd>(self, value: &N, operand: &Operand<N>) -> bool {
        match (self, operand) {
            (Operator::Eq, Operand::Single(v)) => value == v,
            (Operator::Ne, Operand::Single(v)) => value != v,
            (Operator::Gt, Operand::Single(v)) => value > v,
            (Operator::Ge, Operand::Single(v)) => value >= v,
            (Operator::Lt, Operand::Single(v)) => value < v,
            (Operator::Le, Operand::Single(v)) => value <= v,
            (Operator::InRange, Operand::Range(lo, hi)) => lo <= value && value < hi,
            _ => false,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operator {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| DispatchError::UnsupportedOperator(s.to_string()))
    }
}

/// Right-hand side of an operator condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand<V> {
    Single(V),
    Range(V, V),
}

impl<V> Operand<V> {
    pub fn range(lo: V, hi: V) -> Self {
        Operand::Range(lo, hi)
    }

    pub fn map<N>(&self, mut f: impl FnMut(&V) -> N) -> Operand<N> {
        match self {
            Operand::Single(v) => Operand::Single(f(v)),
            Operand::Range(lo, hi) => Operand::Range(f(lo), f(hi)),
        }
    }
}
