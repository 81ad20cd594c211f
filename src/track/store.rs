use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use super::row::MetricsRow;
use super::sample::{contiguous_events, BoundingBox, Event, KeypointSample};
use crate::error::TrackError;

/// 人物ごとのサマリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonTrack {
    pub id: i64,
    pub events: Vec<Event>,
    pub frame_count: usize,
}

/// (frame, person) をキーとするキーポイント観測の集合
///
/// 不変条件: 1つの (frame, person) に対してサンプルは高々1つ。
/// 変更操作はすべて検査してから適用するため、失敗時に状態は変わらない。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackStore {
    samples: BTreeMap<(i64, i64), KeypointSample>,
    /// person → その人物が存在するフレーム
    frames_by_person: BTreeMap<i64, BTreeSet<i64>>,
    /// 期待する関節数（スケルトン定義の幅）
    keypoint_count: Option<usize>,
}

impl TrackStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 関節数を検証するストア
    pub fn with_keypoint_count(keypoint_count: usize) -> Self {
        Self {
            keypoint_count: Some(keypoint_count),
            ..Self::default()
        }
    }

    pub fn keypoint_count(&self) -> Option<usize> {
        self.keypoint_count
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    fn validate(&self, sample: &KeypointSample) -> Result<(), TrackError> {
        let Some(expected) = self.keypoint_count else {
            return Ok(());
        };
        let widths = [
            sample.keypoints_3d.as_ref().map(Vec::len),
            sample.keypoints_quat.as_ref().map(Vec::len),
            sample.confidence.as_ref().map(Vec::len),
        ];
        match widths.into_iter().flatten().find(|&n| n != expected) {
            Some(found) => Err(TrackError::Validation {
                frame: sample.frame,
                person: sample.person,
                expected,
                found,
            }),
            None => Ok(()),
        }
    }

    fn insert_unchecked(&mut self, sample: KeypointSample) {
        self.frames_by_person
            .entry(sample.person)
            .or_default()
            .insert(sample.frame);
        self.samples.insert(sample.key(), sample);
    }

    fn take(&mut self, frame: i64, person: i64) -> Option<KeypointSample> {
        let sample = self.samples.remove(&(frame, person))?;
        if let Some(frames) = self.frames_by_person.get_mut(&person) {
            frames.remove(&frame);
            if frames.is_empty() {
                self.frames_by_person.remove(&person);
            }
        }
        Some(sample)
    }

    /// 1サンプルを追加。既存の (frame, person) は `DuplicateSample` で拒否
    pub fn append(&mut self, sample: KeypointSample) -> Result<(), TrackError> {
        self.validate(&sample)?;
        if self.samples.contains_key(&sample.key()) {
            return Err(TrackError::DuplicateSample {
                frame: sample.frame,
                person: sample.person,
            });
        }
        self.insert_unchecked(sample);
        Ok(())
    }

    /// 一括追加
    ///
    /// バッチ全体（バッチ内の重複を含む）を検証してから挿入する。
    pub fn load<I>(&mut self, samples: I) -> Result<usize, TrackError>
    where
        I: IntoIterator,
        I::Item: Into<KeypointSample>,
    {
        let samples: Vec<KeypointSample> = samples.into_iter().map(Into::into).collect();
        let mut seen = BTreeSet::new();
        for sample in &samples {
            self.validate(sample)?;
            if self.samples.contains_key(&sample.key()) || !seen.insert(sample.key()) {
                return Err(TrackError::DuplicateSample {
                    frame: sample.frame,
                    person: sample.person,
                });
            }
        }
        let count = samples.len();
        for sample in samples {
            self.insert_unchecked(sample);
        }
        info!(count, persons = self.frames_by_person.len(), "loaded keypoint samples");
        Ok(count)
    }

    pub fn get(&self, frame: i64, person: i64) -> Option<&KeypointSample> {
        self.samples.get(&(frame, person))
    }

    /// 全サンプル（frame, person 順）
    pub fn iter(&self) -> impl Iterator<Item = &KeypointSample> + '_ {
        self.samples.values()
    }

    fn samples_at_frame(&self, frame: i64) -> impl Iterator<Item = (i64, &KeypointSample)> + '_ {
        self.samples
            .range((frame, i64::MIN)..=(frame, i64::MAX))
            .map(|(&(_, person), sample)| (person, sample))
    }

    /// 指定フレームで座標を持つ person → サンプル。フレームがなければ空
    pub fn keypoints_at_frame(&self, frame: i64) -> BTreeMap<i64, &KeypointSample> {
        self.samples_at_frame(frame)
            .filter(|(_, sample)| sample.keypoints_3d.is_some())
            .collect()
    }

    pub fn bounding_boxes_at_frame(&self, frame: i64) -> BTreeMap<i64, BoundingBox> {
        self.samples_at_frame(frame)
            .filter_map(|(person, sample)| sample.bbox.map(|b| (person, b)))
            .collect()
    }

    /// 人物のサンプルをフレーム順に列挙（何度でも呼べる）。未知の id なら空
    pub fn samples_for_person(&self, id: i64) -> impl Iterator<Item = &KeypointSample> + '_ {
        self.frames_by_person
            .get(&id)
            .into_iter()
            .flatten()
            .filter_map(move |&frame| self.samples.get(&(frame, id)))
    }

    /// frame → bbox
    pub fn bounding_boxes_for_person(&self, id: i64) -> BTreeMap<i64, BoundingBox> {
        self.samples_for_person(id)
            .filter_map(|s| s.bbox.map(|b| (s.frame, b)))
            .collect()
    }

    pub fn frame_count_for_person(&self, id: i64) -> usize {
        self.frames_by_person.get(&id).map_or(0, BTreeSet::len)
    }

    /// 現存する人物 id（昇順）
    pub fn person_ids(&self) -> Vec<i64> {
        self.frames_by_person.keys().copied().collect()
    }

    pub fn contains_person(&self, id: i64) -> bool {
        self.frames_by_person.contains_key(&id)
    }

    pub fn events_for_person(&self, id: i64) -> Vec<Event> {
        self.frames_by_person
            .get(&id)
            .map(|frames| contiguous_events(frames.iter().copied()))
            .unwrap_or_default()
    }

    pub fn persons(&self) -> Vec<PersonTrack> {
        self.frames_by_person
            .iter()
            .map(|(&id, frames)| PersonTrack {
                id,
                events: contiguous_events(frames.iter().copied()),
                frame_count: frames.len(),
            })
            .collect()
    }

    /// (最小フレーム, 最大フレーム)
    pub fn frame_range(&self) -> Option<(i64, i64)> {
        let first = self.samples.keys().next()?.0;
        let last = self.samples.keys().next_back()?.0;
        Some((first, last))
    }

    /// 指定した人物のサンプルをすべて削除。存在しない id は無視（冪等）
    pub fn remove_persons(&mut self, ids: &[i64]) -> usize {
        let mut removed = 0;
        for id in ids {
            let Some(frames) = self.frames_by_person.remove(id) else {
                continue;
            };
            for frame in frames {
                if self.samples.remove(&(frame, *id)).is_some() {
                    removed += 1;
                }
            }
        }
        if removed > 0 {
            info!(?ids, removed, "removed persons");
        }
        removed
    }

    /// `sources` の全サンプルを `target` に付け替える
    ///
    /// 関係する id のいずれか2つが同じフレームに存在する場合は
    /// `IdentityConflict` を返し、何も変更しない。`sources` 中の `target` と重複 id は無視。
    pub fn merge_persons(&mut self, target: i64, sources: &[i64]) -> Result<usize, TrackError> {
        let sources: Vec<i64> = sources
            .iter()
            .copied()
            .filter(|&s| s != target)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let mut occurrences: BTreeMap<i64, usize> = BTreeMap::new();
        for id in std::iter::once(&target).chain(sources.iter()) {
            for &frame in self.frames_by_person.get(id).into_iter().flatten() {
                *occurrences.entry(frame).or_default() += 1;
            }
        }
        let conflicts: Vec<i64> = occurrences
            .into_iter()
            .filter(|&(_, n)| n > 1)
            .map(|(frame, _)| frame)
            .collect();
        if !conflicts.is_empty() {
            debug!(target_id = target, ?sources, frames = conflicts.len(), "merge rejected");
            return Err(TrackError::IdentityConflict {
                target,
                sources,
                frames: conflicts,
            });
        }

        let mut moved = 0;
        for source in &sources {
            let frames = self.frames_by_person.remove(source).unwrap_or_default();
            for frame in frames {
                if let Some(mut sample) = self.samples.remove(&(frame, *source)) {
                    sample.person = target;
                    self.insert_unchecked(sample);
                    moved += 1;
                }
            }
        }
        info!(target_id = target, ?sources, moved, "merged persons");
        Ok(moved)
    }

    /// `id` の `at_frame` 以降のサンプルを新しい `new_id` に分離
    pub fn split_person(
        &mut self,
        id: i64,
        at_frame: i64,
        new_id: i64,
    ) -> Result<usize, TrackError> {
        if self.contains_person(new_id) {
            return Err(TrackError::PersonIdInUse(new_id));
        }
        let frames: Vec<i64> = self
            .frames_by_person
            .get(&id)
            .map(|frames| frames.range(at_frame..).copied().collect())
            .unwrap_or_default();
        for &frame in &frames {
            if let Some(mut sample) = self.take(frame, id) {
                sample.person = new_id;
                self.insert_unchecked(sample);
            }
        }
        if !frames.is_empty() {
            info!(id, at_frame, new_id, moved = frames.len(), "split person");
        }
        Ok(frames.len())
    }

    /// 既存キーへ派生カラムを上書きで付与
    ///
    /// 未知のキーを含む場合は `UnknownSample` で全体を拒否する。
    pub fn attach_metrics<I>(&mut self, rows: I) -> Result<usize, TrackError>
    where
        I: IntoIterator<Item = MetricsRow>,
    {
        let rows: Vec<MetricsRow> = rows.into_iter().collect();
        if let Some(row) = rows.iter().find(|r| !self.samples.contains_key(&(r.frame, r.person))) {
            return Err(TrackError::UnknownSample {
                frame: row.frame,
                person: row.person,
            });
        }
        let count = rows.len();
        for row in rows {
            if let Some(sample) = self.samples.get_mut(&(row.frame, row.person)) {
                for (column, value) in row.values {
                    match value {
                        Some(v) => {
                            sample.metrics.insert(column, v);
                        }
                        None => {
                            sample.metrics.remove(&column);
                        }
                    }
                }
            }
        }
        Ok(count)
    }

    pub fn metrics_at(&self, frame: i64, person: i64) -> Option<&BTreeMap<String, f64>> {
        self.get(frame, person).map(|s| &s.metrics)
    }

    /// いずれかのサンプルが派生カラムを持つか
    pub fn has_metrics(&self) -> bool {
        self.samples.values().any(|s| !s.metrics.is_empty())
    }
}
