//! DispatcherBuilder - Dispatcher の構築
//!
//! # 学習ポイント
//! - Builder パターンでの型の切り替え（normalizer を設定すると `N` が変わる）
//! - probe の種類はメソッド名で明示（function / method / static_method）

use std::fmt::Display;

use crate::dispatch::{Dispatcher, Normalizer, Probe};
use crate::domain::{Signature, Version, VersionScheme};

/// DispatcherBuilder は Dispatcher を組み立てる
///
/// # 使用例
/// ```ignore
/// let mut my_method = DispatcherBuilder::new("my_method")
///     .doc("Picks an implementation from the account tier.")
///     .method(|a: &Account| a.tier, |_, ()| "fallback");
/// my_method.condition_ge(2, |_, ()| "premium");
/// ```
pub struct DispatcherBuilder<V, N = V> {
    signature: Signature,
    normalizer: Normalizer<V, N>,
}

impl<V> DispatcherBuilder<V, V>
where
    V: Clone + Send + Sync + 'static,
{
    /// 新しい builder を作成（normalizer は identity）
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            signature: Signature::new(name),
            normalizer: Normalizer::identity(),
        }
    }
}

impl<V, N> DispatcherBuilder<V, N>
where
    V: Send + Sync + 'static,
    N: PartialOrd + 'static,
{
    /// Start from an existing signature, e.g. one loaded from config.
    pub fn with_signature(signature: Signature, normalizer: Normalizer<V, N>) -> Self {
        Self {
            signature,
            normalizer,
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.signature.doc = Some(doc.into());
        self
    }

    /// normalizer を差し替える
    pub fn normalizer<M>(self, normalizer: Normalizer<V, M>) -> DispatcherBuilder<V, M>
    where
        M: PartialOrd + 'static,
    {
        DispatcherBuilder {
            signature: self.signature,
            normalizer,
        }
    }

    pub fn version_normalizer(self, scheme: VersionScheme) -> DispatcherBuilder<V, Version>
    where
        V: Display,
    {
        self.normalizer(Normalizer::version(scheme))
    }

    /// Free function: the probe takes no arguments.
    pub fn function<A, R, P, F>(self, probe: P, default: F) -> Dispatcher<(), V, A, R, N>
    where
        P: Fn() -> V + Send + Sync + 'static,
        F: Fn(&(), A) -> R + Send + Sync + 'static,
    {
        Dispatcher::new(self.signature, default, Probe::function(probe), self.normalizer)
    }

    /// Member of `T`: the probe is called with the bound instance.
    pub fn method<T, A, R, P, F>(self, probe: P, default: F) -> Dispatcher<T, V, A, R, N>
    where
        P: Fn(&T) -> V + Send + Sync + 'static,
        F: Fn(&T, A) -> R + Send + Sync + 'static,
    {
        Dispatcher::new(self.signature, default, Probe::method(probe), self.normalizer)
    }

    /// Member of `T` whose probe is static: called with no arguments.
    pub fn static_method<T, A, R, P, F>(self, probe: P, default: F) -> Dispatcher<T, V, A, R, N>
    where
        P: Fn() -> V + Send + Sync + 'static,
        F: Fn(&T, A) -> R + Send + Sync + 'static,
    {
        Dispatcher::new(self.signature, default, Probe::static_fn(probe), self.normalizer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        value: i32,
    }

    #[test]
    fn builds_function_with_doc() {
        let f = DispatcherBuilder::new("answer")
            .doc("The answer.")
            .function(|| 42, |_, ()| "default");
        assert_eq!(f.name(), "answer");
        assert_eq!(f.doc(), Some("The answer."));
        assert!(!f.probe().is_method());
        assert_eq!(f.normalizer().label(), "identity");
        assert_eq!(f.call(()), "default");
    }

    #[test]
    fn builds_method_and_static_method() {
        let mut m = DispatcherBuilder::new("m").method(|c: &Counter| c.value, |_, ()| "low");
        m.condition_gt(5, |_, ()| "high");
        assert!(m.probe().is_method());
        assert_eq!(m.bind(&Counter { value: 9 }).call(()), "high");

        let mut s = DispatcherBuilder::new("s").static_method(|| 9, |_: &Counter, ()| "low");
        s.condition_gt(5, |_, ()| "high");
        assert!(!s.probe().is_method());
        assert_eq!(s.bind(&Counter { value: 0 }).call(()), "high");
    }

    #[test]
    fn version_normalizer_changes_comparison_type() {
        let mut f = DispatcherBuilder::new("v")
            .version_normalizer(VersionScheme::Strict)
            .function(|| "6.7".to_string(), |_, ()| "default");
        f.condition_eq("6.7.0".to_string(), |_, ()| "same release");
        assert_eq!(f.normalizer().label(), "strict_version");
        assert_eq!(f.call(()), "same release");
    }
}
