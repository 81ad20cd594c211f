use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use super::definition::{normalize_joint_name, SkeletonDefinition};
use super::layouts;
use crate::error::CatalogError;

/// `detect` の既定しきい値: 定義の関節名のうち一致が必要な割合
pub const DEFAULT_MIN_COVERAGE: f64 = 0.6;

/// 名前付きスケルトン定義の読み取り専用レジストリ
///
/// 起動時に一度構築し、参照を呼び出し側へ明示的に渡す。
#[derive(Debug, Clone, Default)]
pub struct SkeletonCatalog {
    definitions: BTreeMap<String, Arc<SkeletonDefinition>>,
}

impl SkeletonCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// 組み込みレイアウトをすべて登録したカタログ
    pub fn builtin() -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for layout in layouts::BUILTIN {
            catalog.register(SkeletonDefinition::from_layout(layout)?);
        }
        Ok(catalog)
    }

    /// 定義を登録（同名は置き換え）
    pub fn register(&mut self, definition: SkeletonDefinition) {
        let key = definition.name().trim().to_lowercase();
        self.definitions.insert(key, Arc::new(definition));
    }

    pub fn get(&self, name: &str) -> Result<Arc<SkeletonDefinition>, CatalogError> {
        let key = name.trim().to_lowercase();
        self.definitions
            .get(&key)
            .cloned()
            .ok_or_else(|| CatalogError::UnknownSkeleton {
                name: name.to_string(),
                available: self.names().join(", "),
            })
    }

    /// 登録名（ソート済み）
    pub fn names(&self) -> Vec<&str> {
        self.definitions.keys().map(String::as_str).collect()
    }

    /// 外部から与えられた関節名リストに最も合うスケルトンを推定
    pub fn detect<S: AsRef<str>>(&self, observed: &[S]) -> Option<&str> {
        self.detect_with(observed, DEFAULT_MIN_COVERAGE)
    }

    /// しきい値指定版
    ///
    /// 順位付け: 一致数 → 定義側の被覆率 → 総関節数（多い方が具体的）。
    /// 被覆率が `min_coverage` 未満の定義は候補にしない。
    pub fn detect_with<S: AsRef<str>>(&self, observed: &[S], min_coverage: f64) -> Option<&str> {
        let observed: HashSet<String> = observed
            .iter()
            .map(|n| normalize_joint_name(n.as_ref()))
            .filter(|n| !n.is_empty())
            .collect();

        let mut best: Option<(usize, f64, usize, &str)> = None;
        for (name, definition) in &self.definitions {
            let expected = definition.num_keypoints();
            if expected == 0 {
                continue;
            }
            let matched = definition
                .normalized_name_set()
                .filter(|n| observed.contains(*n))
                .count();
            let coverage = matched as f64 / expected as f64;
            debug!(skeleton = %name, matched, coverage, "skeleton detection candidate");
            if matched == 0 || coverage < min_coverage {
                continue;
            }

            let better = match best {
                None => true,
                Some((m, c, e, _)) => {
                    (matched, coverage, expected).partial_cmp(&(m, c, e))
                        == Some(std::cmp::Ordering::Greater)
                }
            };
            if better {
                best = Some((matched, coverage, expected, name.as_str()));
            }
        }
        best.map(|(_, _, _, name)| name)
    }
}
