//! TrackStore 全体への一括評価
//!
//! 行ごとに独立に計算し、結果を1回の `attach_metrics` でまとめて反映する。
//! 評価できない行は派生カラムを消去した行として扱う（前回の値を残さない）。

use std::collections::BTreeMap;

use tracing::{debug, info};

use super::engine::{AssessmentEngine, METRIC_COLUMNS};
use crate::error::TrackError;
use crate::skeleton::SkeletonDefinition;
use crate::track::{KeypointSample, MetricsRow, SharedTrackStore, TrackStore};

/// 1行分の評価結果と、評価できたかどうか
type Outcome = (MetricsRow, bool);

/// 一括評価の結果件数
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssessmentSummary {
    pub assessed: usize,
    pub skipped: usize,
}

impl AssessmentEngine {
    /// 全サンプルを評価して派生カラムとして付与
    ///
    /// 座標を持たない行、評価に失敗した行はスキップされ、バッチ全体は中断しない。
    /// 再実行しても同じ結果になる。
    pub fn apply_to_store(
        &self,
        store: &mut TrackStore,
        skeleton: &SkeletonDefinition,
    ) -> Result<AssessmentSummary, TrackError> {
        let outcomes = self.evaluate(store, skeleton);

        let mut summary = AssessmentSummary::default();
        let mut rows = Vec::with_capacity(outcomes.len());
        for (row, assessed) in outcomes {
            if assessed {
                summary.assessed += 1;
            } else {
                summary.skipped += 1;
            }
            rows.push(row);
        }
        store.attach_metrics(rows)?;

        info!(
            skeleton = skeleton.name(),
            assessed = summary.assessed,
            skipped = summary.skipped,
            "assessment applied"
        );
        Ok(summary)
    }

    /// 共有ストアに対して評価し、結果を一度に公開
    pub fn apply_to_shared(
        &self,
        shared: &SharedTrackStore,
        skeleton: &SkeletonDefinition,
    ) -> Result<AssessmentSummary, TrackError> {
        shared.update(|store| self.apply_to_store(store, skeleton))
    }

    #[cfg(feature = "parallel")]
    fn evaluate(&self, store: &TrackStore, skeleton: &SkeletonDefinition) -> Vec<Outcome> {
        use rayon::prelude::*;

        if !self.config().parallel {
            return self.evaluate_sequential(store, skeleton);
        }
        let samples: Vec<&KeypointSample> = store.iter().collect();
        samples
            .par_iter()
            .map(|sample| self.assess_sample(skeleton, sample))
            .collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn evaluate(&self, store: &TrackStore, skeleton: &SkeletonDefinition) -> Vec<Outcome> {
        self.evaluate_sequential(store, skeleton)
    }

    fn evaluate_sequential(
        &self,
        store: &TrackStore,
        skeleton: &SkeletonDefinition,
    ) -> Vec<Outcome> {
        store
            .iter()
            .map(|sample| self.assess_sample(skeleton, sample))
            .collect()
    }

    fn assess_sample(&self, skeleton: &SkeletonDefinition, sample: &KeypointSample) -> Outcome {
        let result = match sample.keypoints_3d.as_deref() {
            Some(positions) => match self.compute_frame(skeleton, positions) {
                Ok(result) => Some(result),
                Err(e) => {
                    debug!(
                        frame = sample.frame,
                        person = sample.person,
                        error = %e,
                        "assessment skipped"
                    );
                    None
                }
            },
            None => {
                debug!(
                    frame = sample.frame,
                    person = sample.person,
                    "no keypoints, assessment skipped"
                );
                None
            }
        };

        let assessed = result.is_some();
        let values: BTreeMap<String, Option<f64>> = match result {
            Some(result) => result
                .metrics()
                .iter()
                .map(|(column, value)| (column.to_string(), *value))
                .collect(),
            None => METRIC_COLUMNS.iter().map(|c| (c.to_string(), None)).collect(),
        };
        let row = MetricsRow {
            frame: sample.frame,
            person: sample.person,
            values,
        };
        (row, assessed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::engine::fixtures::{standing, standing_with};
    use crate::config::AssessmentConfig;
    use crate::skeleton::{Role, SkeletonCatalog};

    fn setup() -> (std::sync::Arc<SkeletonDefinition>, TrackStore) {
        let def = SkeletonCatalog::builtin().unwrap().get("xsens").unwrap();
        let mut store = TrackStore::with_keypoint_count(def.num_keypoints());
        for frame in 0..4 {
            store.append(KeypointSample::new(frame, 1, standing(&def))).unwrap();
        }
        (def, store)
    }

    fn sequential() -> AssessmentEngine {
        AssessmentEngine::new(AssessmentConfig {
            parallel: false,
            ..AssessmentConfig::default()
        })
    }

    #[test]
    fn test_apply_to_store() {
        let (def, mut store) = setup();
        let summary = AssessmentEngine::default().apply_to_store(&mut store, &def).unwrap();
        assert_eq!(summary, AssessmentSummary { assessed: 4, skipped: 0 });
        for sample in store.iter() {
            assert_eq!(sample.metrics.len(), METRIC_COLUMNS.len());
            assert!(sample.metrics["trunk_bending"].abs() < 10.0);
        }
    }

    #[test]
    fn test_missing_keypoints_are_skipped() {
        let (def, mut store) = setup();
        store
            .append(KeypointSample {
                frame: 9,
                person: 2,
                ..KeypointSample::default()
            })
            .unwrap();
        let summary = sequential().apply_to_store(&mut store, &def).unwrap();
        assert_eq!(summary, AssessmentSummary { assessed: 4, skipped: 1 });
        assert!(store.metrics_at(9, 2).unwrap().is_empty());
    }

    #[test]
    fn test_degenerate_row_does_not_abort_batch() {
        let (def, mut store) = setup();
        let hips = [(Role::LeftHip, [0.0, 0.0, 1.0]), (Role::RightHip, [0.0, 0.0, 1.0])];
        store.append(KeypointSample::new(2, 7, standing_with(&def, &hips))).unwrap();
        let summary = sequential().apply_to_store(&mut store, &def).unwrap();
        assert_eq!(summary.skipped, 1);
        assert!(!store.metrics_at(2, 7).unwrap().contains_key("trunk_bending"));
        assert!(store.metrics_at(2, 1).unwrap().contains_key("trunk_bending"));
    }

    #[test]
    fn test_rerun_clears_stale_metrics() {
        let (def, mut store) = setup();
        let engine = sequential();
        engine.apply_to_store(&mut store, &def).unwrap();
        let first = store.clone();
        engine.apply_to_store(&mut store, &def).unwrap();
        assert_eq!(store, first);

        // 座標が壊れた行は前回の値を残さない
        let mut broken = store.clone();
        broken.remove_persons(&[1]);
        let mut sample = KeypointSample::new(0, 1, standing(&def));
        sample.metrics.insert("trunk_bending".to_string(), 12.0);
        if let Some(kps) = sample.keypoints_3d.as_mut() {
            kps.iter_mut().for_each(|p| *p = [0.0; 3]);
        }
        broken.append(sample).unwrap();
        engine.apply_to_store(&mut broken, &def).unwrap();
        assert!(broken.metrics_at(0, 1).unwrap().is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let (def, mut a) = setup();
        let mut b = a.clone();
        sequential().apply_to_store(&mut a, &def).unwrap();
        AssessmentEngine::default().apply_to_store(&mut b, &def).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_apply_to_shared() {
        let (def, store) = setup();
        let shared = SharedTrackStore::new(store);
        let before = shared.snapshot();
        let summary = AssessmentEngine::default().apply_to_shared(&shared, &def).unwrap();
        assert_eq!(summary.assessed, 4);
        assert!(!before.has_metrics());
        assert!(shared.snapshot().has_metrics());
    }
}
