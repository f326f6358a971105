//! Domain model (signature, operators, versions, errors).
//!
//! ディスパッチエンジンが扱う素のデータ型をまとめたモジュール:
//! - signature: 既定実装の名前と説明（passthrough 用）
//! - operator: 比較演算子カタログ（eq, ne, gt, ge, lt, le, inrange）
//! - version: バージョン文字列の正規化と順序
//! - errors: エンジンが生成する唯一のエラー型

pub mod errors;
pub mod operator;
pub mod signature;
pub mod version;

pub use self::errors::DispatchError;
pub use self::operator::{Operand, Operator};
pub use self::signature::Signature;
pub use self::version::{Component, Version, VersionScheme};
