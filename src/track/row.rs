//! インポータ／エクスポータとの境界で使う行データ
//!
//! インポータが生成し TrackStore が取り込む形式。JSON でそのまま読み書きできる。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::sample::{BoundingBox, KeypointSample};

/// 1行 = (frame, person) の観測
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeypointRow {
    pub frame: i64,
    pub person: i64,
    /// 関節位置 [N][3]
    #[serde(default)]
    pub keypoints_3d: Option<Vec<[f64; 3]>>,
    /// 関節の向き [N][4] (w, x, y, z)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keypoints_quat: Option<Vec<[f64; 4]>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub w: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub h: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keypoint_confidence: Option<Vec<f64>>,
    /// 派生メトリクス（エクスポート時のみ）
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metrics: BTreeMap<String, f64>,
}

impl From<KeypointRow> for KeypointSample {
    fn from(row: KeypointRow) -> Self {
        let bbox = match (row.x, row.y, row.w, row.h) {
            (Some(x), Some(y), Some(w), Some(h)) => Some(BoundingBox { x, y, w, h }),
            _ => None,
        };
        Self {
            frame: row.frame,
            person: row.person,
            keypoints_3d: row.keypoints_3d,
            keypoints_quat: row.keypoints_quat,
            bbox,
            confidence: row.keypoint_confidence,
            metrics: row.metrics,
        }
    }
}

impl From<&KeypointSample> for KeypointRow {
    fn from(sample: &KeypointSample) -> Self {
        let bbox = sample.bbox;
        Self {
            frame: sample.frame,
            person: sample.person,
            keypoints_3d: sample.keypoints_3d.clone(),
            keypoints_quat: sample.keypoints_quat.clone(),
            x: bbox.map(|b| b.x),
            y: bbox.map(|b| b.y),
            w: bbox.map(|b| b.w),
            h: bbox.map(|b| b.h),
            keypoint_confidence: sample.confidence.clone(),
            metrics: sample.metrics.clone(),
        }
    }
}

/// `attach_metrics` の入力。値が None のカラムは削除される
#[derive(Debug, Clone, PartialEq)]
pub struct MetricsRow {
    pub frame: i64,
    pub person: i64,
    pub values: BTreeMap<String, Option<f64>>,
}

/// 行データのファイル形式
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackDocument {
    /// 登録済みスケルトン名（プロジェクトメタデータ）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skeleton: Option<String>,
    /// モーキャプ等から取り込んだ関節名（スケルトン推定用）
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub joint_names: Vec<String>,
    pub rows: Vec<KeypointRow>,
}
