//! 行ファイルの読み込みから評価結果の書き出しまで

use std::fs;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::assessment::{AssessmentEngine, AssessmentSummary};
use crate::calibration::compute_floor_frame_with;
use crate::config::Config;
use crate::skeleton::{SkeletonCatalog, SkeletonDefinition};
use crate::track::{KeypointRow, TrackDocument, TrackStore};

pub fn read_document<P: AsRef<Path>>(path: P) -> Result<TrackDocument> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read keypoint rows {}", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse keypoint rows {}", path.display()))
}

pub fn write_document<P: AsRef<Path>>(path: P, document: &TrackDocument) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(document)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))
}

/// 使用するスケルトンを決める
///
/// 設定 → ドキュメントのメタデータ → 関節名からの推定 の順。
pub fn select_skeleton(
    catalog: &SkeletonCatalog,
    config: &Config,
    document: &TrackDocument,
) -> Result<Arc<SkeletonDefinition>> {
    let named = config
        .pipeline
        .skeleton
        .as_deref()
        .or(document.skeleton.as_deref());
    if let Some(name) = named {
        return Ok(catalog.get(name)?);
    }
    let detected = catalog
        .detect_with(&document.joint_names, config.detection.min_coverage)
        .context("No skeleton configured and none detected from joint names")?;
    info!(skeleton = detected, "detected skeleton");
    Ok(catalog.get(detected)?)
}

/// ドキュメント1つを評価し、メトリクス付きのドキュメントを返す
pub fn assess_document(
    config: &Config,
    mut document: TrackDocument,
) -> Result<(TrackDocument, AssessmentSummary)> {
    let catalog = SkeletonCatalog::builtin()?;
    let skeleton = select_skeleton(&catalog, config, &document)?;

    match config.pipeline.floor_plane {
        Some(plane) => {
            let frame = compute_floor_frame_with(plane, &config.calibration)?;
            for row in &mut document.rows {
                frame.transform_row(row);
            }
        }
        None => warn!("No floor plane configured, assuming rows are already in world space"),
    }

    let mut store = TrackStore::with_keypoint_count(skeleton.num_keypoints());
    store.load(document.rows)?;

    let engine = AssessmentEngine::new(config.assessment.clone());
    let summary = engine.apply_to_store(&mut store, &skeleton)?;

    let output = TrackDocument {
        skeleton: Some(skeleton.name().to_string()),
        joint_names: skeleton.joint_names().to_vec(),
        rows: store.iter().map(KeypointRow::from).collect(),
    };
    Ok((output, summary))
}

/// 設定に従って入力ファイルを評価し、出力ファイルへ書き出す
pub fn run(config: &Config) -> Result<AssessmentSummary> {
    let document = read_document(&config.pipeline.input_path)?;
    info!(rows = document.rows.len(), path = %config.pipeline.input_path, "read keypoint rows");
    let (output, summary) = assess_document(config, document)?;
    write_document(&config.pipeline.output_path, &output)?;
    info!(path = %config.pipeline.output_path, "wrote assessment");
    Ok(summary)
}
