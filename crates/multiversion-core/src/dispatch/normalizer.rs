//! Normalizer - 比較前に値を変換する
//!
//! Operator conditions run both the selection value and their operand(s)
//! through the dispatcher's normalizer on every evaluation. Hand-written
//! predicates see the raw value and may call the normalizer themselves.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::{DispatchError, Version, VersionScheme};

/// Cloneable handle around a `&V -> N` transform.
pub struct Normalizer<V, N = V> {
    transform: Arc<dyn Fn(&V) -> N + Send + Sync>,
    label: &'static str,
}

impl<V, N> Normalizer<V, N> {
    pub fn new<F>(transform: F) -> Self
    where
        F: Fn(&V) -> N + Send + Sync + 'static,
    {
        Self {
            transform: Arc::new(transform),
            label: "custom",
        }
    }

    pub fn normalize(&self, value: &V) -> N {
        (self.transform)(value)
    }

    pub fn label(&self) -> &'static str {
        self.label
    }
}

impl<V: Clone + 'static> Normalizer<V, V> {
    pub fn identity() -> Self {
        Self {
            transform: Arc::new(V::clone),
            label: "identity",
        }
    }
}

impl<V: fmt::Display + 'static> Normalizer<V, Version> {
    /// Render the value with `Display` and parse it as a version.
    pub fn version(scheme: VersionScheme) -> Self {
        let label = match scheme {
            VersionScheme::Loose => "loose_version",
            VersionScheme::Strict => "strict_version",
        };
        Self {
            transform: Arc::new(move |value: &V| scheme.parse_version(&value.to_string())),
            label,
        }
    }

    /// Build from a configured kind. `Identity` orders the rendered text
    /// as a plain string.
    pub fn from_kind(kind: NormalizerKind) -> Self {
        match kind {
            NormalizerKind::Identity => Self {
                transform: Arc::new(|value: &V| Version::literal(&value.to_string())),
                label: "identity",
            },
            NormalizerKind::Version(scheme) => Self::version(scheme),
        }
    }
}

impl<V, N> Clone for Normalizer<V, N> {
    fn clone(&self) -> Self {
        Self {
            transform: Arc::clone(&self.transform),
            label: self.label,
        }
    }
}

impl<V, N> fmt::Debug for Normalizer<V, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer").field("label", &self.label).finish()
    }
}

/// Named normalizers accepted by configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum NormalizerKind {
    #[default]
    Identity,
    Version(VersionScheme),
}

impl FromStr for NormalizerKind {
    type Err = DispatchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "identity" => Ok(NormalizerKind::Identity),
            other => other.parse().map(NormalizerKind::Version).inspect_err(|_| {
                tracing::warn!(normalizer = other, "rejected unknown normalizer name");
            }),
        }
    }
}

impl TryFrom<String> for NormalizerKind {
    type Error = DispatchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<NormalizerKind> for String {
    fn from(kind: NormalizerKind) -> Self {
        match kind {
            NormalizerKind::Identity => "identity",
            NormalizerKind::Version(VersionScheme::Loose) => "version",
            NormalizerKind::Version(VersionScheme::Strict) => "strictversion",
        }
        .to_string()
    }
}
