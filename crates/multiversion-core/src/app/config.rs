//! Dispatcher configuration loaded from JSON.
//!
//! ```json
//! { "name": "witty_comment", "doc": "...", "normalizer": "version" }
//! ```
//!
//! `normalizer` accepts `identity` (the default) or a version scheme name
//! (`version`, `looseversion`, `loose_version`, `strictversion`,
//! `strict_version`). Anything else fails at load time.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use super::builder::DispatcherBuilder;
use crate::dispatch::{Normalizer, NormalizerKind};
use crate::domain::{Signature, Version};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatcherConfig {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,

    #[serde(default)]
    pub normalizer: NormalizerKind,
}

/// ConfigError は設定読み込み時のエラー
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid dispatcher config: {0}")]
    Json(#[from] serde_json::Error),
}

impl DispatcherConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            doc: None,
            normalizer: NormalizerKind::default(),
        }
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        tracing::debug!(name = %config.name, normalizer = ?config.normalizer, "loaded dispatcher config");
        Ok(config)
    }

    pub fn signature(&self) -> Signature {
        Signature {
            name: self.name.clone(),
            doc: self.doc.clone(),
        }
    }

    /// Builder for selection values compared through their `Display` text.
    pub fn builder<V>(&self) -> DispatcherBuilder<V, Version>
    where
        V: Display + Send + Sync + 'static,
    {
        DispatcherBuilder::with_signature(self.signature(), Normalizer::from_kind(self.normalizer))
    }
}
