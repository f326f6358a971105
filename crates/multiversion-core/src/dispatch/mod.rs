//! Dispatch - 条件付きディスパッチエンジン
//!
//! # 構成
//! - **Normalizer**: 比較前の値変換（既定は identity）
//! - **Probe**: selection value の取得（function / method / static）
//! - **Condition**: predicate と実装の組（登録順が優先順位）
//! - **Dispatcher**: 解決と呼び出し
//! - **Bound**: instance に束縛されたアクセスごとのハンドル

pub mod bound;
pub mod condition;
pub mod dispatcher;
pub mod normalizer;
pub mod probe;

pub use self::bound::Bound;
pub use self::condition::{Condition, ConditionKind, Implementation, Predicate};
pub use self::dispatcher::Dispatcher;
pub use self::normalizer::{Normalizer, NormalizerKind};
pub use self::probe::Probe;
