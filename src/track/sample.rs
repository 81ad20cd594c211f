use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// 2Dバウンディングボックス（画像座標）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// 1つの (frame, person) 観測
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeypointSample {
    pub frame: i64,
    pub person: i64,
    /// ロール順の関節位置。欠損フレームは None
    pub keypoints_3d: Option<Vec<[f64; 3]>>,
    /// 関節の向き (w, x, y, z)
    pub keypoints_quat: Option<Vec<[f64; 4]>>,
    pub bbox: Option<BoundingBox>,
    /// 関節ごとの信頼度
    pub confidence: Option<Vec<f64>>,
    /// 姿勢評価などの派生カラム
    pub metrics: BTreeMap<String, f64>,
}

impl KeypointSample {
    pub fn new(frame: i64, person: i64, keypoints_3d: Vec<[f64; 3]>) -> Self {
        Self {
            frame,
            person,
            keypoints_3d: Some(keypoints_3d),
            ..Self::default()
        }
    }

    pub fn key(&self) -> (i64, i64) {
        (self.frame, self.person)
    }
}

/// 1人の人物が毎フレーム存在する最大連続区間 `[start, end]`（両端含む）
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Event {
    pub start: i64,
    pub end: i64,
}

impl Event {
    pub fn frame_count(&self) -> usize {
        (self.end - self.start + 1) as usize
    }
}

/// 昇順のフレーム番号列を連続区間に分割
///
/// 次のフレームが直前 +1 でなければ新しい区間を始める。
pub fn contiguous_events<I: IntoIterator<Item = i64>>(frames: I) -> Vec<Event> {
    let mut events: Vec<Event> = Vec::new();
    for frame in frames {
        if let Some(event) = events.last_mut() {
            if frame <= event.end + 1 {
                event.end = event.end.max(frame);
                continue;
            }
        }
        events.push(Event { start: frame, end: frame });
    }
    events
}
