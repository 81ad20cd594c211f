//! 1フレーム分の姿勢評価
//!
//! 入力はワールド座標（Z-up、床は z=0）を前提とする。

use nalgebra::Vector3;

use super::plane::{angle_between, angle_signed, to_degrees, Plane, EPS};
use crate::config::AssessmentConfig;
use crate::error::AssessmentError;
use crate::skeleton::{Role, Side, SkeletonDefinition};

/// 出力カラム名（TrackStore に付与される順）
pub const METRIC_COLUMNS: [&str; 9] = [
    "trunk_bending",
    "trunk_side_bending",
    "trunk_twist",
    "left_elbow_above_shoulder",
    "right_elbow_above_shoulder",
    "left_hand_above_head_level",
    "right_hand_above_head_level",
    "left_far_reach",
    "right_far_reach",
];

/// 身体平面（すべて骨盤中心または床上の骨盤直下を通る）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BodyPlanes {
    pub transverse: Plane,
    pub coronal: Plane,
    pub sagittal: Plane,
    pub ground: Plane,
    pub ground_coronal: Plane,
    pub ground_sagittal: Plane,
}

/// 片腕の挙上メトリクス
///
/// 正の値は名前の条件が成立していることを表す（符号規約が `PositiveAbove` の場合）。
/// 必要な関節が解決できない項目は None。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ArmMetrics {
    /// 肘の高さ - 肩の高さ [m]
    pub elbow_above_shoulder: Option<f64>,
    /// 手首の高さ - 頭の高さ [m]
    pub hand_above_head_level: Option<f64>,
    /// 肩から手首までの水平距離 / 肩幅 - しきい値
    pub far_reach: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AssessmentResult {
    /// 前屈が正 [deg]
    pub trunk_bending: f64,
    /// 側屈 0..=180 [deg]
    pub trunk_side_bending: f64,
    /// 腰と肩のねじれ、正対で 0 [deg]
    pub trunk_twist: f64,
    pub left: ArmMetrics,
    pub right: ArmMetrics,
    planes: BodyPlanes,
}

impl AssessmentResult {
    pub fn planes(&self) -> &BodyPlanes {
        &self.planes
    }

    pub fn arm(&self, side: Side) -> &ArmMetrics {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// `METRIC_COLUMNS` の順に (カラム名, 値)
    pub fn metrics(&self) -> [(&'static str, Option<f64>); 9] {
        let [bending, side_bending, twist, l_elbow, r_elbow, l_hand, r_hand, l_reach, r_reach] =
            METRIC_COLUMNS;
        [
            (bending, Some(self.trunk_bending)),
            (side_bending, Some(self.trunk_side_bending)),
            (twist, Some(self.trunk_twist)),
            (l_elbow, self.left.elbow_above_shoulder),
            (r_elbow, self.right.elbow_above_shoulder),
            (l_hand, self.left.hand_above_head_level),
            (r_hand, self.right.hand_above_head_level),
            (l_reach, self.left.far_reach),
            (r_reach, self.right.far_reach),
        ]
    }
}

/// 姿勢評価エンジン
///
/// 状態を持たないので、行ごとの評価はどの順序・並列度で行ってもよい。
#[derive(Debug, Clone, Default)]
pub struct AssessmentEngine {
    config: AssessmentConfig,
}

impl AssessmentEngine {
    pub fn new(config: AssessmentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssessmentConfig {
        &self.config
    }

    /// 1サンプルの関節位置から体幹角度と腕メトリクスを計算
    pub fn compute_frame(
        &self,
        skeleton: &SkeletonDefinition,
        positions: &[[f64; 3]],
    ) -> Result<AssessmentResult, AssessmentError> {
        let require = |role: Role| {
            skeleton
                .resolve(role, positions)
                .ok_or(AssessmentError::MissingRole(role))
        };
        let l_hip = require(Role::LeftHip)?;
        let r_hip = require(Role::RightHip)?;
        let neck = require(Role::Neck)?;
        let l_shoulder = require(Side::Left.shoulder())?;
        let r_shoulder = require(Side::Right.shoulder())?;

        let hip_center = (l_hip + r_hip) / 2.0;
        let spine = neck - hip_center;
        let hip_line = r_hip - l_hip;
        let up = Vector3::z();

        // 身体基準の平面
        let coronal_normal = spine.cross(&hip_line);
        let sagittal_normal = spine.cross(&coronal_normal);
        let transverse = Plane::new(hip_center, spine, "spine has zero length")?;
        let coronal = Plane::new(hip_center, coronal_normal, "spine is parallel to hip line")?;
        let sagittal = Plane::new(hip_center, sagittal_normal, "sagittal normal vanished")?;

        // 床基準の平面
        let ground_point = Vector3::new(hip_center.x, hip_center.y, 0.0);
        let ground_coronal_normal = up.cross(&hip_line);
        let ground = Plane::new(ground_point, up, "world up")?;
        let ground_coronal =
            Plane::new(hip_center, ground_coronal_normal, "hip line is vertical")?;
        let ground_sagittal_normal = up.cross(&ground_coronal.normal);
        let ground_sagittal =
            Plane::new(hip_center, ground_sagittal_normal, "ground sagittal normal vanished")?;

        let bending = angle_signed(
            &ground_sagittal.project_vector(&spine),
            &up,
            &-ground_sagittal.normal,
            "spine is perpendicular to the sagittal plane",
        )?;
        let side_bending = angle_between(
            &ground_coronal.project_vector(&spine),
            &up,
            "spine is perpendicular to the coronal plane",
        )?;
        let twist = angle_between(
            &ground.project_vector(&hip_line),
            &ground.project_vector(&(l_shoulder - r_shoulder)),
            "shoulder line is vertical",
        )?;

        let head = skeleton.resolve(Role::Head, positions);
        let shoulder_width = (l_shoulder - r_shoulder).norm();
        let arm = |side: Side, shoulder: Vector3<f64>| {
            self.arm_metrics(skeleton, positions, side, shoulder, head, shoulder_width)
        };

        Ok(AssessmentResult {
            trunk_bending: to_degrees(bending),
            trunk_side_bending: to_degrees(side_bending),
            trunk_twist: to_degrees(twist) - 180.0,
            left: arm(Side::Left, l_shoulder),
            right: arm(Side::Right, r_shoulder),
            planes: BodyPlanes {
                transverse,
                coronal,
                sagittal,
                ground,
                ground_coronal,
                ground_sagittal,
            },
        })
    }

    fn arm_metrics(
        &self,
        skeleton: &SkeletonDefinition,
        positions: &[[f64; 3]],
        side: Side,
        shoulder: Vector3<f64>,
        head: Option<Vector3<f64>>,
        shoulder_width: f64,
    ) -> ArmMetrics {
        let s = self.config.sign_convention.factor();
        let elbow = skeleton.resolve(side.elbow(), positions);
        let wrist = skeleton.resolve(side.wrist(), positions);

        let far_reach = wrist.filter(|_| shoulder_width >= EPS).map(|w| {
            let mut reach = w - shoulder;
            reach.z = 0.0;
            s * (reach.norm() / shoulder_width - self.config.far_reach_threshold)
        });

        ArmMetrics {
            elbow_above_shoulder: elbow.map(|e| s * (e.z - shoulder.z)),
            hand_above_head_level: wrist.zip(head).map(|(w, h)| s * (w.z - h.z)),
            far_reach,
        }
    }
}
