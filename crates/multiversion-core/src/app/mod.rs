//! App - 構築 API
//!
//! # 主要コンポーネント
//! - **DispatcherBuilder**: Dispatcher の組み立て（名前、説明、正規化、probe の種類）
//! - **DispatcherConfig**: JSON から読み込む設定

pub mod builder;
pub mod config;

pub use self::builder::DispatcherBuilder;
pub use self::config::{ConfigError, DispatcherConfig};
