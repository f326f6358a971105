//! Dispatcher - 条件に応じて実装を切り替える
//!
//! # 解決の流れ
//! 1. Probe から raw selection value を取得
//! 2. 登録順に predicate を評価し、最初に true になった条件の実装を選ぶ
//! 3. どれも一致しなければ既定実装を選ぶ
//! 4. instance と引数を渡して呼び出し、結果をそのまま返す
//!
//! The instance is an explicit parameter of every call. A dispatcher holds no
//! per-call state, so one value can be shared by all instances of an owning
//! type and across threads.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use super::bound::Bound;
use super::condition::{
    Condition, ConditionKind, Implementation, Predicate, build_operator_predicate,
    operator_predicate,
};
use super::normalizer::Normalizer;
use super::probe::Probe;
use crate::domain::{DispatchError, Operand, Operator, Signature};

/// A callable that resolves to one of several implementations per call.
///
/// # Type parameters
/// - `T`: instance the callable is a member of (`()` for free functions)
/// - `V`: raw selection value produced by the probe
/// - `A`: argument tuple passed to implementations
/// - `R`: return type of every implementation
/// - `N`: normalized type used by operator conditions
pub struct Dispatcher<T, V, A, R, N = V> {
    signature: Signature,
    default: Implementation<T, A, R>,
    probe: Probe<T, V>,
    normalizer: Normalizer<V, N>,
    conditions: Vec<Condition<T, V, A, R>>,
}

impl<T, V, A, R, N> Dispatcher<T, V, A, R, N> {
    /// Name of the wrapped default implementation.
    pub fn name(&self) -> &str {
        &self.signature.name
    }

    pub fn doc(&self) -> Option<&str> {
        self.signature.doc.as_deref()
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn probe(&self) -> &Probe<T, V> {
        &self.probe
    }

    pub fn normalizer(&self) -> &Normalizer<V, N> {
        &self.normalizer
    }

    /// Registered conditions in priority order.
    pub fn conditions(&self) -> &[Condition<T, V, A, R>] {
        &self.conditions
    }
}

impl<T, V, A, R, N> Dispatcher<T, V, A, R, N>
where
    V: Send + Sync + 'static,
    N: PartialOrd + 'static,
{
    pub fn new<F>(
        signature: Signature,
        default: F,
        probe: Probe<T, V>,
        normalizer: Normalizer<V, N>,
    ) -> Self
    where
        F: Fn(&T, A) -> R + Send + Sync + 'static,
    {
        Self {
            signature,
            default: Arc::new(default),
            probe,
            normalizer,
            conditions: Vec::new(),
        }
    }

    /// Append a condition guarded by a hand-written predicate.
    ///
    /// The predicate receives the raw selection value.
    pub fn condition<P, F>(&mut self, predicate: P, implementation: F) -> &mut Self
    where
        P: Fn(&V) -> bool + Send + Sync + 'static,
        F: Fn(&T, A) -> R + Send + Sync + 'static,
    {
        self.push(ConditionKind::Predicate, Arc::new(predicate), Arc::new(implementation));
        self
    }

    /// Append an operator condition looked up by name.
    ///
    /// Unknown names and mismatched operands register nothing.
    pub fn condition_op<F>(
        &mut self,
        operator: &str,
        operand: Operand<V>,
        implementation: F,
    ) -> Result<&mut Self, DispatchError>
    where
        F: Fn(&T, A) -> R + Send + Sync + 'static,
    {
        let operator = operator.parse::<Operator>().inspect_err(|err| {
            warn!(dispatcher = %self.signature, error = %err, "rejected operator condition");
        })?;
        self.condition_with(operator, operand, implementation)
    }

    pub fn condition_with<F>(
        &mut self,
        operator: Operator,
        operand: Operand<V>,
        implementation: F,
    ) -> Result<&mut Self, DispatchError>
    where
        F: Fn(&T, A) -> R + Send + Sync + 'static,
    {
        let predicate = operator_predicate(operator, operand, self.normalizer.clone())?;
        self.push(ConditionKind::Operator(operator), predicate, Arc::new(implementation));
        Ok(self)
    }

    pub fn condition_eq<F>(&mut self, value: V, implementation: F) -> &mut Self
    where
        F: Fn(&T, A) -> R + Send + Sync + 'static,
    {
        self.single(Operator::Eq, value, implementation)
    }

    pub fn condition_ne<F>(&mut self, value: V, implementation: F) -> &mut Self
    where
        F: Fn(&T, A) -> R + Send + Sync + 'static,
    {
        self.single(Operator::Ne, value, implementation)
    }

    pub fn condition_gt<F>(&mut self, value: V, implementation: F) -> &mut Self
    where
        F: Fn(&T, A) -> R + Send + Sync + 'static,
    {
        self.single(Operator::Gt, value, implementation)
    }

    pub fn condition_ge<F>(&mut self, value: V, implementation: F) -> &mut Self
    where
        F: Fn(&T, A) -> R + Send + Sync + 'static,
    {
        self.single(Operator::Ge, value, implementation)
    }

    pub fn condition_lt<F>(&mut self, value: V, implementation: F) -> &mut Self
    where
        F: Fn(&T, A) -> R + Send + Sync + 'static,
    {
        self.single(Operator::Lt, value, implementation)
    }

    pub fn condition_le<F>(&mut self, value: V, implementation: F) -> &mut Self
    where
        F: Fn(&T, A) -> R + Send + Sync + 'static,
    {
        self.single(Operator::Le, value, implementation)
    }

    /// Half-open: matches `lo <= x < hi` after normalization.
    pub fn condition_inrange<F>(&mut self, lo: V, hi: V, implementation: F) -> &mut Self
    where
        F: Fn(&T, A) -> R + Send + Sync + 'static,
    {
        let predicate = build_operator_predicate(
            Operator::InRange,
            Operand::range(lo, hi),
            self.normalizer.clone(),
        );
        self.push(
            ConditionKind::Operator(Operator::InRange),
            predicate,
            Arc::new(implementation),
        );
        self
    }

    /// Raw selection value for a call on `instance`.
    pub fn resolve(&self, instance: &T) -> V {
        self.probe.select(instance)
    }

    /// Index of the first condition matching `value`.
    pub fn position(&self, value: &V) -> Option<usize> {
        self.conditions.iter().position(|c| c.matches(value))
    }

    /// Implementation chosen for `value`: first match, else the default.
    pub fn select(&self, value: &V) -> &Implementation<T, A, R> {
        match self.position(value) {
            Some(index) => {
                let condition = &self.conditions[index];
                debug!(
                    dispatcher = %self.signature,
                    index,
                    kind = %condition.kind(),
                    "condition matched"
                );
                condition.implementation()
            }
            None => {
                debug!(dispatcher = %self.signature, "no condition matched, using default");
                &self.default
            }
        }
    }

    /// Resolve, select and invoke for `instance`. The result is returned as is.
    pub fn dispatch(&self, instance: &T, args: A) -> R {
        let value = self.resolve(instance);
        let implementation = self.select(&value);
        implementation(instance, args)
    }

    /// Per-access handle that carries `instance` into every call.
    pub fn bind<'a>(&'a self, instance: &'a T) -> Bound<'a, T, V, A, R, N> {
        Bound::new(self, instance)
    }

    fn single<F>(&mut self, operator: Operator, value: V, implementation: F) -> &mut Self
    where
        F: Fn(&T, A) -> R + Send + Sync + 'static,
    {
        let predicate =
            build_operator_predicate(operator, Operand::Single(value), self.normalizer.clone());
        self.push(ConditionKind::Operator(operator), predicate, Arc::new(implementation));
        self
    }

    fn push(
        &mut self,
        kind: ConditionKind,
        predicate: Predicate<V>,
        implementation: Implementation<T, A, R>,
    ) {
        self.conditions.push(Condition::new(kind, predicate, implementation));
        debug!(
            dispatcher = %self.signature,
            position = self.conditions.len() - 1,
            %kind,
            "registered condition"
        );
    }
}

impl<V, A, R, N> Dispatcher<(), V, A, R, N>
where
    V: Send + Sync + 'static,
    N: PartialOrd + 'static,
{
    /// Call a free-function dispatcher.
    pub fn call(&self, args: A) -> R {
        self.dispatch(&(), args)
    }
}

impl<T, V, A, R, N> fmt::Debug for Dispatcher<T, V, A, R, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher")
            .field("signature", &self.signature)
            .field("probe", &self.probe)
            .field("normalizer", &self.normalizer)
            .field("conditions", &self.conditions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

    type Function = Dispatcher<(), i64, (), &'static str>;

    fn counter_dispatcher(target: Arc<AtomicI64>) -> Function {
        Dispatcher::new(
            Signature::new("my_function").with_doc("Returns a label for the target."),
            |_, ()| "fallback",
            Probe::function(move || target.load(Ordering::SeqCst)),
            Normalizer::identity(),
        )
    }

    #[test]
    fn first_registered_match_wins() {
        let target = Arc::new(AtomicI64::new(1));
        let mut f = counter_dispatcher(Arc::clone(&target));
        f.condition(|v| *v == 2, |_, ()| "value 2")
            .condition(|v| *v == 3, |_, ()| "value 3")
            .condition(|v| *v > 10, |_, ()| "value > 10")
            .condition(|v| *v > 20, |_, ()| "value > 20");

        let cases = [(1, "fallback"), (2, "value 2"), (3, "value 3"), (50, "value > 10"), (8, "fallback")];
        for (value, expected) in cases {
            target.store(value, Ordering::SeqCst);
            assert_eq!(f.call(()), expected, "target = {value}");
        }
    }

    #[test]
    fn registration_appends_without_reordering() {
        let mut f = counter_dispatcher(Arc::new(AtomicI64::new(0)));
        f.condition_gt(10, |_, ()| "a");
        f.condition(|_| true, |_, ()| "b");
        f.condition_gt(10, |_, ()| "c");

        let kinds: Vec<_> = f.conditions().iter().map(|c| c.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                ConditionKind::Operator(Operator::Gt),
                ConditionKind::Predicate,
                ConditionKind::Operator(Operator::Gt),
            ]
        );
        assert_eq!(f.position(&11), Some(0));
        assert_eq!(f.position(&0), Some(1));
    }

    #[test]
    fn unsupported_operator_registers_nothing() {
        let mut f = counter_dispatcher(Arc::new(AtomicI64::new(0)));
        let result = f.condition_op("whatever", Operand::Single(1), |_, ()| "never");
        assert!(matches!(result, Err(DispatchError::UnsupportedOperator(name)) if name == "whatever"));
        assert!(f.conditions().is_empty());
        assert_eq!(f.call(()), "fallback");
    }

    #[test]
    fn mismatched_operand_registers_nothing() {
        let mut f = counter_dispatcher(Arc::new(AtomicI64::new(0)));
        assert!(f.condition_op("inrange", Operand::Single(1), |_, ()| "x").is_err());
        assert!(f.condition_op("eq", Operand::range(1, 2), |_, ()| "x").is_err());
        assert!(f.conditions().is_empty());
    }

    #[test]
    fn signature_survives_registration() {
        let mut f = counter_dispatcher(Arc::new(AtomicI64::new(0)));
        for i in 0..5 {
            f.condition_eq(i, |_, ()| "eq");
        }
        assert_eq!(f.name(), "my_function");
        assert_eq!(f.doc(), Some("Returns a label for the target."));
    }

    #[test]
    fn probe_runs_on_every_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let f: Function = {
            let calls = Arc::clone(&calls);
            Dispatcher::new(
                Signature::new("counted"),
                |_, ()| "fallback",
                Probe::function(move || calls.fetch_add(1, Ordering::SeqCst) as i64),
                Normalizer::identity(),
            )
        };
        f.call(());
        f.call(());
        f.call(());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn operator_conditions_normalize_value_and_operand() {
        let mut f = Dispatcher::new(
            Signature::new("abs"),
            |_: &(), ()| "other",
            Probe::function(|| -7_i64),
            Normalizer::new(|v: &i64| v.abs()),
        );
        f.condition_eq(7, |_, ()| "seven");
        assert_eq!(f.call(()), "seven");
    }

    #[test]
    fn predicates_see_the_raw_value() {
        let abs = || {
            Dispatcher::new(
                Signature::new("abs"),
                |_: &(), ()| "other",
                Probe::function(|| -7_i64),
                Normalizer::new(|v: &i64| v.abs()),
            )
        };

        let mut raw = abs();
        raw.condition(|v| *v == -7, |_, ()| "raw");
        assert_eq!(raw.call(()), "raw");

        let mut normalized = abs();
        normalized.condition_eq(7, |_, ()| "normalized");
        assert_eq!(normalized.call(()), "normalized");

        assert_eq!(raw.resolve(&()), -7);
    }

    #[test]
    fn shorthand_operators_always_register() {
        let mut f = counter_dispatcher(Arc::new(AtomicI64::new(4)));
        f.condition_eq(1, |_, ()| "eq")
            .condition_ne(1, |_, ()| "ne")
            .condition_gt(1, |_, ()| "gt")
            .condition_ge(1, |_, ()| "ge")
            .condition_lt(1, |_, ()| "lt")
            .condition_le(1, |_, ()| "le")
            .condition_inrange(3, 5, |_, ()| "inrange");

        let kinds: Vec<_> = f.conditions().iter().map(|c| c.kind()).collect();
        let expected: Vec<_> = Operator::ALL.iter().copied().map(ConditionKind::Operator).collect();
        assert_eq!(kinds, expected);
        assert_eq!(f.position(&4), Some(1));
        assert_eq!(f.position(&1), Some(0));
    }

    #[test]
    fn arguments_and_results_pass_through() {
        let mut f: Dispatcher<(), i64, (i64, i64), Result<i64, String>> = Dispatcher::new(
            Signature::new("divide"),
            |_, (a, b)| Ok(a + b),
            Probe::function(|| 2),
            Normalizer::identity(),
        );
        f.condition_eq(2, |_, (a, b)| {
            if b == 0 {
                Err(format!("cannot divide {a} by zero"))
            } else {
                Ok(a / b)
            }
        });
        assert_eq!(f.call((9, 3)), Ok(3));
        assert_eq!(f.call((9, 0)), Err("cannot divide 9 by zero".to_string()));
    }
}
