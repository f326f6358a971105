//! Errors - ディスパッチエンジン自身が生成するエラー
//!
//! Probe / predicate / implementation の失敗はエンジンを素通りするので、
//! ここに定義されるのは登録・設定時のエラーのみです。

use super::operator::Operator;

/// DispatchError は条件登録や設定の誤りを表す
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    #[error("unsupported operator '{0}' (expected one of eq, ne, gt, ge, lt, le, inrange)")]
    UnsupportedOperator(String),

    #[error("operator '{operator}' expects {expected}")]
    OperandMismatch {
        operator: Operator,
        expected: &'static str,
    },

    #[error("unknown normalizer '{0}' (expected identity, version, looseversion or strictversion)")]
    UnknownNormalizer(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = DispatchError::UnsupportedOperator("whatever".to_string());
        assert!(err.to_string().contains("'whatever'"));

        let err = DispatchError::OperandMismatch {
            operator: Operator::InRange,
            expected: "a (lower, upper) range",
        };
        assert_eq!(
            err.to_string(),
            "operator 'inrange' expects a (lower, upper) range"
        );
    }
}
