use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::skeleton::DEFAULT_MIN_COVERAGE;

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub calibration: CalibrationConfig,
    #[serde(default)]
    pub assessment: AssessmentConfig,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub logging: LogConfig,
}

/// 入出力とプロジェクトメタデータ
#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    /// キーポイント行ファイル（JSON）
    #[serde(default = "default_input_path")]
    pub input_path: String,
    /// 評価結果の出力先（JSON）
    #[serde(default = "default_output_path")]
    pub output_path: String,
    /// スケルトン名。未指定なら入力の関節名から推定
    #[serde(default)]
    pub skeleton: Option<String>,
    /// 床平面 [a, b, c, d]。指定時は行をワールド座標へ変換してから取り込む
    #[serde(default)]
    pub floor_plane: Option<[f64; 4]>,
}

fn default_input_path() -> String { "keypoints.json".to_string() }
fn default_output_path() -> String { "assessment.json".to_string() }

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_path: default_output_path(),
            skeleton: None,
            floor_plane: None,
        }
    }
}

/// 床平面キャリブレーション
#[derive(Debug, Deserialize, Clone)]
pub struct CalibrationConfig {
    /// カメラ前方の参照軸（ZED RIGHT_HANDED_Z_UP では +Y）
    #[serde(default = "default_forward_axis")]
    pub forward_axis: [f64; 3],
    /// 前方軸が使えない場合のカメラ右軸
    #[serde(default = "default_right_axis")]
    pub right_axis: [f64; 3],
    /// 射影長がこれ未満なら退化とみなす
    #[serde(default = "default_degenerate_epsilon")]
    pub degenerate_epsilon: f64,
}

fn default_forward_axis() -> [f64; 3] { [0.0, 1.0, 0.0] }
fn default_right_axis() -> [f64; 3] { [1.0, 0.0, 0.0] }
fn default_degenerate_epsilon() -> f64 { 1e-6 }

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            forward_axis: default_forward_axis(),
            right_axis: default_right_axis(),
            degenerate_epsilon: default_degenerate_epsilon(),
        }
    }
}

/// 腕メトリクスの符号規約
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SignConvention {
    /// 条件成立（肘が肩より上など）で正
    #[default]
    PositiveAbove,
    /// 条件成立で負
    PositiveBelow,
}

impl SignConvention {
    pub fn factor(self) -> f64 {
        match self {
            SignConvention::PositiveAbove => 1.0,
            SignConvention::PositiveBelow => -1.0,
        }
    }
}

/// 姿勢評価
#[derive(Debug, Deserialize, Clone)]
pub struct AssessmentConfig {
    /// 遠方リーチ判定のしきい値（肩幅の何倍か）
    #[serde(default = "default_far_reach_threshold")]
    pub far_reach_threshold: f64,
    #[serde(default)]
    pub sign_convention: SignConvention,
    /// バッチ評価を並列化するか
    #[serde(default = "default_parallel")]
    pub parallel: bool,
}

fn default_far_reach_threshold() -> f64 { 1.0 }
fn default_parallel() -> bool { true }

impl Default for AssessmentConfig {
    fn default() -> Self {
        Self {
            far_reach_threshold: default_far_reach_threshold(),
            sign_convention: SignConvention::default(),
            parallel: default_parallel(),
        }
    }
}

/// スケルトン推定
#[derive(Debug, Deserialize, Clone)]
pub struct DetectionConfig {
    /// 定義の関節名のうち一致が必要な割合
    #[serde(default = "default_min_coverage")]
    pub min_coverage: f64,
}

fn default_min_coverage() -> f64 { DEFAULT_MIN_COVERAGE }

impl Default for DetectionConfig {
    fn default() -> Self {
        Self { min_coverage: default_min_coverage() }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct LogConfig {
    /// tracing の EnvFilter 書式（`RUST_LOG` が優先）
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String { "info".to_string() }

impl Default for LogConfig {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// 読めなければ警告してデフォルト
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!("{e:#}, using defaults");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.pipeline.input_path, "keypoints.json");
        assert_eq!(config.calibration.forward_axis, [0.0, 1.0, 0.0]);
        assert_eq!(config.assessment.far_reach_threshold, 1.0);
        assert_eq!(config.assessment.sign_convention, SignConvention::PositiveAbove);
        assert_eq!(config.detection.min_coverage, DEFAULT_MIN_COVERAGE);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_sections() {
        let config: Config = toml::from_str(
            r#"
            [pipeline]
            skeleton = "xsens"
            floor_plane = [0.0, 0.0, 1.0, -1.0]

            [assessment]
            sign_convention = "positive_below"
            "#,
        )
        .unwrap();
        assert_eq!(config.pipeline.skeleton.as_deref(), Some("xsens"));
        assert_eq!(config.pipeline.floor_plane, Some([0.0, 0.0, 1.0, -1.0]));
        assert_eq!(config.pipeline.output_path, "assessment.json");
        assert_eq!(config.assessment.sign_convention.factor(), -1.0);
        assert!(config.assessment.parallel);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[detection]\nmin_coverage = 0.9").unwrap();
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.detection.min_coverage, 0.9);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = Config::load_or_default("/nonexistent/ergo-tracker.toml");
        assert_eq!(config.pipeline.input_path, "keypoints.json");
    }
}
