//! ライブラリ全体のエラー型
//!
//! コンポーネントごとに型付きエラーを持ち、`Error` で束ねる。
//! 失敗した操作は状態を一切変更しない。

use thiserror::Error;

use crate::skeleton::Role;

pub type Result<T> = std::result::Result<T, Error>;

/// スケルトンカタログのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("unknown skeleton definition '{name}' (available: {available})")]
    UnknownSkeleton { name: String, available: String },
    #[error("skeleton '{skeleton}' references undefined joint '{joint}'")]
    InvalidLayout { skeleton: String, joint: String },
}

/// 床平面キャリブレーションのエラー
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalibrationError {
    #[error("floor plane ({a}, {b}, {c}, {d}) is degenerate or not finite")]
    InvalidPlane { a: f64, b: f64, c: f64, d: f64 },
    #[error("{name} axis {axis:?} is not finite")]
    InvalidAxis { name: &'static str, axis: [f64; 3] },
}

/// トラックストアのエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackError {
    #[error(
        "frame {frame} person {person}: expected {expected} keypoints, found {found}"
    )]
    Validation {
        frame: i64,
        person: i64,
        expected: usize,
        found: usize,
    },
    #[error("sample for frame {frame} person {person} already exists")]
    DuplicateSample { frame: i64, person: i64 },
    #[error(
        "cannot merge {sources:?} into {target}: identities overlap in frames {frames:?}"
    )]
    IdentityConflict {
        target: i64,
        sources: Vec<i64>,
        frames: Vec<i64>,
    },
    #[error("person id {0} is already in use")]
    PersonIdInUse(i64),
    #[error("no sample for frame {frame} person {person}")]
    UnknownSample { frame: i64, person: i64 },
}

/// 1フレーム分の姿勢評価のエラー（バッチ処理では行単位でスキップされる）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AssessmentError {
    #[error("skeleton has no joint for role {0:?}")]
    MissingRole(Role),
    #[error("geometric degeneracy: {0}")]
    GeometricDegeneracy(&'static str),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
    #[error(transparent)]
    Track(#[from] TrackError),
    #[error(transparent)]
    Assessment(#[from] AssessmentError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_conflict_display() {
        let err = TrackError::IdentityConflict {
            target: 1,
            sources: vec![2, 3],
            frames: vec![4],
        };
        assert_eq!(
            err.to_string(),
            "cannot merge [2, 3] into 1: identities overlap in frames [4]"
        );
    }

    #[test]
    fn test_error_from_component() {
        let err: Error = CalibrationError::InvalidPlane { a: 0.0, b: 0.0, c: 0.0, d: 1.0 }.into();
        assert!(matches!(err, Error::Calibration(_)));
        assert!(err.to_string().contains("degenerate"));
    }
}
