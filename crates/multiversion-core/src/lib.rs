//! multiversion-core
//!
//! Conditional multi-implementation dispatch: one callable name resolves, per
//! call, to the first registered implementation whose predicate accepts the
//! current selection value, or to its default implementation.
//!
//! # モジュール構成
//! - **domain**: データ型（Signature, Operator, Operand, Version, DispatchError）
//! - **dispatch**: エンジン本体（Normalizer, Probe, Condition, Dispatcher, Bound）
//! - **app**: 構築 API（DispatcherBuilder, DispatcherConfig）
//!
//! # 使用例
//! ```
//! use multiversion_core::app::DispatcherBuilder;
//! use multiversion_core::domain::VersionScheme;
//!
//! let mut witty = DispatcherBuilder::new("witty_comment")
//!     .version_normalizer(VersionScheme::Loose)
//!     .function(|| "3.8.4".to_string(), |_, ()| "'Tis but a flesh wound!");
//! witty
//!     .condition_inrange("3.8.2".into(), "3.8.6".into(), |_, ()| "38x: Don't panic!")
//!     .condition_gt("3.7.0".into(), |_, ()| "gt37: Here we go again!");
//!
//! assert_eq!(witty.call(()), "38x: Don't panic!");
//! assert_eq!(witty.name(), "witty_comment");
//! ```

pub mod app;
pub mod dispatch;
pub mod domain;

pub use self::app::{ConfigError, DispatcherBuilder, DispatcherConfig};
pub use self::dispatch::{Bound, Dispatcher, Normalizer, NormalizerKind, Probe};
pub use self::domain::{DispatchError, Operand, Operator, Signature, Version, VersionScheme};
