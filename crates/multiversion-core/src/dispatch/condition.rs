//! Condition - predicate と実装の組
//!
//! Operator predicates are assembled here from the `Operator` catalog and the
//! dispatcher's normalizer.

use std::fmt;
use std::sync::Arc;

use super::normalizer::Normalizer;
use crate::domain::{DispatchError, Operand, Operator};

pub type Predicate<V> = Arc<dyn Fn(&V) -> bool + Send + Sync>;

/// An implementation body. Free functions use `T = ()`.
pub type Implementation<T, A, R> = Arc<dyn Fn(&T, A) -> R + Send + Sync>;

/// How a condition's predicate was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionKind {
    Predicate,
    Operator(Operator),
}

impl fmt::Display for ConditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionKind::Predicate => f.write_str("predicate"),
            ConditionKind::Operator(op) => write!(f, "{op}"),
        }
    }
}

pub struct Condition<T, V, A, R> {
    kind: ConditionKind,
    predicate: Predicate<V>,
    implementation: Implementation<T, A, R>,
}

impl<T, V, A, R> Condition<T, V, A, R> {
    pub fn new(
        kind: ConditionKind,
        predicate: Predicate<V>,
        implementation: Implementation<T, A, R>,
    ) -> Self {
        Self {
            kind,
            predicate,
            implementation,
        }
    }

    pub fn kind(&self) -> ConditionKind {
        self.kind
    }

    pub fn matches(&self, value: &V) -> bool {
        (self.predicate)(value)
    }

    pub fn implementation(&self) -> &Implementation<T, A, R> {
        &self.implementation
    }
}

impl<T, V, A, R> fmt::Debug for Condition<T, V, A, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Condition").field("kind", &self.kind).finish_non_exhaustive()
    }
}

/// Build `x -> op(normalize(x), normalize(operand))`.
///
/// The operand is kept raw and normalized on each evaluation together with
/// the selection value.
pub fn operator_predicate<V, N>(
    operator: Operator,
    operand: Operand<V>,
    normalizer: Normalizer<V, N>,
) -> Result<Predicate<V>, DispatchError>
where
    V: Send + Sync + 'static,
    N: PartialOrd + 'static,
{
    operator.check_operand(&operand)?;
    Ok(build_operator_predicate(operator, operand, normalizer))
}

/// Same as [`operator_predicate`] without the operand shape check. Callers
/// pass an operand whose shape already fits `operator`.
pub(crate) fn build_operator_predicate<V, N>(
    operator: Operator,
    operand: Operand<V>,
    normalizer: Normalizer<V, N>,
) -> Predicate<V>
where
    V: Send + Sync + 'static,
    N: PartialOrd + 'static,
{
    Arc::new(move |value: &V| {
        let value = normalizer.normalize(value);
        let operand = operand.map(|v| normalizer.normalize(v));
        operator.evaluate(&value, &operand)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Version, VersionScheme};

    #[test]
    fn inrange_over_versions() {
        let normalizer = Normalizer::<&str, Version>::version(VersionScheme::Loose);
        let predicate = operator_predicate(
            Operator::InRange,
            Operand::range("3.8.2", "3.8.6"),
            normalizer,
        )
        .unwrap();

        assert!(!predicate(&"3.8.1"));
        assert!(predicate(&"3.8.2"));
        assert!(predicate(&"3.8.5"));
        assert!(!predicate(&"3.8.6"));
    }

    #[test]
    fn mismatched_operand_builds_nothing() {
        let result = operator_predicate(Operator::Eq, Operand::range(1, 2), Normalizer::identity());
        assert!(matches!(
            result,
            Err(DispatchError::OperandMismatch { operator: Operator::Eq, .. })
        ));
    }

    #[test]
    fn condition_reports_its_kind() {
        let condition: Condition<(), i32, (), &str> = Condition::new(
            ConditionKind::Operator(Operator::Gt),
            Arc::new(|v: &i32| *v > 10),
            Arc::new(|_: &(), ()| "value > 10"),
        );
        assert!(condition.matches(&11));
        assert!(!condition.matches(&10));
        assert_eq!(condition.kind().to_string(), "gt");
        assert_eq!((condition.implementation())(&(), ()), "value > 10");
    }
}
