//! 取り込み（書き手）と表示・エクスポート（読み手）が並行する環境向けの共有ハンドル
//!
//! 読み手は完全で不変なスナップショット (`Arc<TrackStore>`) を受け取る。
//! 書き手は現在の状態を複製して変更し、成功したときだけ丸ごと差し替える。
//! 読み手が変更途中の状態を観測することはない。

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use super::row::MetricsRow;
use super::sample::KeypointSample;
use super::store::TrackStore;
use crate::error::TrackError;

#[derive(Debug, Default)]
pub struct SharedTrackStore {
    current: RwLock<Arc<TrackStore>>,
    /// 書き手を1つに直列化する
    writer: Mutex<()>,
}

impl SharedTrackStore {
    pub fn new(store: TrackStore) -> Self {
        Self {
            current: RwLock::new(Arc::new(store)),
            writer: Mutex::new(()),
        }
    }

    /// 現在の状態のスナップショット
    pub fn snapshot(&self) -> Arc<TrackStore> {
        Arc::clone(&self.current.read())
    }

    /// 複製に対して `f` を適用し、成功したら公開する
    ///
    /// `f` が失敗した場合は何も公開しない。
    pub fn update<T, E>(&self, f: impl FnOnce(&mut TrackStore) -> Result<T, E>) -> Result<T, E> {
        let _writer = self.writer.lock();
        let mut next = TrackStore::clone(&self.snapshot());
        let out = f(&mut next)?;
        *self.current.write() = Arc::new(next);
        Ok(out)
    }

    /// 状態を丸ごと置き換える
    pub fn replace(&self, store: TrackStore) {
        let _writer = self.writer.lock();
        *self.current.write() = Arc::new(store);
    }

    pub fn append(&self, sample: KeypointSample) -> Result<(), TrackError> {
        self.update(|store| store.append(sample))
    }

    pub fn remove_persons(&self, ids: &[i64]) -> usize {
        let _writer = self.writer.lock();
        let mut next = TrackStore::clone(&self.snapshot());
        let removed = next.remove_persons(ids);
        if removed > 0 {
            *self.current.write() = Arc::new(next);
        }
        removed
    }

    pub fn merge_persons(&self, target: i64, sources: &[i64]) -> Result<usize, TrackError> {
        self.update(|store| store.merge_persons(target, sources))
    }

    pub fn split_person(&self, id: i64, at_frame: i64, new_id: i64) -> Result<usize, TrackError> {
        self.update(|store| store.split_person(id, at_frame, new_id))
    }

    pub fn attach_metrics(&self, rows: Vec<MetricsRow>) -> Result<usize, TrackError> {
        self.update(|store| store.attach_metrics(rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn sample(frame: i64, person: i64) -> KeypointSample {
        KeypointSample::new(frame, person, vec![[0.0, 0.0, 0.0]])
    }

    #[test]
    fn test_snapshot_is_isolated_from_later_writes() {
        let shared = SharedTrackStore::new(TrackStore::new());
        shared.append(sample(0, 1)).unwrap();
        let before = shared.snapshot();
        shared.append(sample(1, 1)).unwrap();
        assert_eq!(before.len(), 1);
        assert_eq!(shared.snapshot().len(), 2);
    }

    #[test]
    fn test_failed_update_publishes_nothing() {
        let shared = SharedTrackStore::new(TrackStore::new());
        shared.append(sample(0, 1)).unwrap();
        shared.append(sample(0, 2)).unwrap();
        let before = shared.snapshot();
        assert!(shared.merge_persons(1, &[2]).is_err());
        assert!(Arc::ptr_eq(&before, &shared.snapshot()));
    }

    #[test]
    fn test_replace_swaps_whole_store() {
        let shared = SharedTrackStore::new(TrackStore::new());
        shared.append(sample(0, 1)).unwrap();
        let before = shared.snapshot();

        let mut next = TrackStore::new();
        next.append(sample(5, 9)).unwrap();
        next.append(sample(6, 9)).unwrap();
        shared.replace(next);

        assert_eq!(before.person_ids(), vec![1]);
        let after = shared.snapshot();
        assert_eq!(after.person_ids(), vec![9]);
        assert_eq!(after.frame_range(), Some((5, 6)));
    }

    #[test]
    fn test_readers_never_see_partial_merge() {
        let mut store = TrackStore::new();
        for frame in 0..200 {
            store.append(sample(frame, 1 + frame % 2)).unwrap();
        }
        let shared = Arc::new(SharedTrackStore::new(store));

        let reader = {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for _ in 0..500 {
                    let snap = shared.snapshot();
                    let ids = snap.person_ids();
                    // 付け替え前 [1, 2] か後 [1] のどちらか
                    assert!(ids == vec![1, 2] || ids == vec![1], "torn state: {ids:?}");
                    assert_eq!(snap.len(), 200);
                }
            })
        };
        shared.merge_persons(1, &[2]).unwrap();
        reader.join().unwrap();
        assert_eq!(shared.snapshot().frame_count_for_person(1), 200);
    }
}
