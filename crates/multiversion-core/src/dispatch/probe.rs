//! Probe - selection value の取得方法
//!
//! The shape is fixed at construction; nothing is inferred from the instance.

use std::fmt;
use std::sync::Arc;

/// Produces the raw selection value for a call.
pub enum Probe<T, V> {
    /// Free function, called with no arguments.
    Function(Arc<dyn Fn() -> V + Send + Sync>),
    /// Called with the instance the dispatcher is bound to.
    Method(Arc<dyn Fn(&T) -> V + Send + Sync>),
    /// Declared on the owning type but called with no arguments.
    Static(Arc<dyn Fn() -> V + Send + Sync>),
}

impl<T, V> Probe<T, V> {
    pub fn function(f: impl Fn() -> V + Send + Sync + 'static) -> Self {
        Probe::Function(Arc::new(f))
    }

    pub fn method(f: impl Fn(&T) -> V + Send + Sync + 'static) -> Self {
        Probe::Method(Arc::new(f))
    }

    pub fn static_fn(f: impl Fn() -> V + Send + Sync + 'static) -> Self {
        Probe::Static(Arc::new(f))
    }

    pub fn is_method(&self) -> bool {
        matches!(self, Probe::Method(_))
    }

    /// Invoke the probe for `instance`. Only `Method` probes look at it.
    pub fn select(&self, instance: &T) -> V {
        match self {
            Probe::Function(f) | Probe::Static(f) => f(),
            Probe::Method(f) => f(instance),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Probe::Function(_) => "function",
            Probe::Method(_) => "method",
            Probe::Static(_) => "static",
        }
    }
}

impl<T, V> Clone for Probe<T, V> {
    fn clone(&self) -> Self {
        match self {
            Probe::Function(f) => Probe::Function(Arc::clone(f)),
            Probe::Method(f) => Probe::Method(Arc::clone(f)),
            Probe::Static(f) => Probe::Static(Arc::clone(f)),
        }
    }
}

impl<T, V> fmt::Debug for Probe<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Probe").field(&self.kind()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Widget {
        level: u32,
    }

    #[test]
    fn method_probe_reads_the_instance() {
        let probe = Probe::method(|w: &Widget| w.level);
        assert!(probe.is_method());
        assert_eq!(probe.select(&Widget { level: 3 }), 3);
        assert_eq!(probe.select(&Widget { level: 7 }), 7);
    }

    #[test]
    fn static_probe_ignores_the_instance() {
        let probe: Probe<Widget, u32> = Probe::static_fn(|| 9);
        assert!(!probe.is_method());
        assert_eq!(probe.select(&Widget { level: 3 }), 9);
    }

    #[test]
    fn function_probe_takes_no_arguments() {
        let probe: Probe<(), &str> = Probe::function(|| "3.8.4");
        assert_eq!(probe.select(&()), "3.8.4");
        assert_eq!(format!("{probe:?}"), "Probe(\"function\")");
    }
}
