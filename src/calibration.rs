//! 床平面キャリブレーション
//!
//! 外部の床検出が出力した平面方程式 `ax + by + cz + d = 0` から
//! カメラ座標 → ワールド座標の剛体変換を求める。
//! ワールド座標系: z-up（床法線）、y-forward（カメラ前方を床に射影）、x-right、床は z=0。

use nalgebra::{Matrix3, Quaternion, UnitQuaternion, Vector3};
use tracing::warn;

use crate::config::CalibrationConfig;
use crate::error::CalibrationError;
use crate::track::KeypointRow;

/// 法線の大きさがこれ未満なら平面として不正
const MIN_NORMAL_NORM: f64 = 1e-9;

/// カメラ → ワールドの剛体変換 (`p_world = R * p_camera + t`)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorFrame {
    /// 行が [worldX; worldY; worldZ] の回転行列
    pub rotation: Matrix3<f64>,
    pub translation: Vector3<f64>,
}

impl FloorFrame {
    pub fn identity() -> Self {
        Self {
            rotation: Matrix3::identity(),
            translation: Vector3::zeros(),
        }
    }

    pub fn transform_point(&self, p: &[f64; 3]) -> [f64; 3] {
        let v = self.rotation * Vector3::new(p[0], p[1], p[2]) + self.translation;
        [v.x, v.y, v.z]
    }

    pub fn transform_points(&self, points: &[[f64; 3]]) -> Vec<[f64; 3]> {
        points.iter().map(|p| self.transform_point(p)).collect()
    }

    /// 関節の向き (w, x, y, z) をワールド座標系へ回転
    pub fn transform_quaternion(&self, q: &[f64; 4]) -> [f64; 4] {
        let r = rotation_to_quaternion(&self.rotation);
        let out = r.into_inner() * Quaternion::new(q[0], q[1], q[2], q[3]);
        [out.w, out.i, out.j, out.k]
    }

    /// インポータが出力した行をワールド座標へ変換（位置と向き）
    pub fn transform_row(&self, row: &mut KeypointRow) {
        row.keypoints_3d = row.keypoints_3d.as_deref().map(|points| self.transform_points(points));
        if let Some(quats) = row.keypoints_quat.as_mut() {
            for q in quats.iter_mut() {
                *q = self.transform_quaternion(q);
            }
        }
    }
}

/// 既定の参照軸で床平面から変換を計算
pub fn compute_floor_frame(plane: [f64; 4]) -> Result<FloorFrame, CalibrationError> {
    compute_floor_frame_with(plane, &CalibrationConfig::default())
}

/// 床平面 `[a, b, c, d]` からカメラ → ワールド変換を計算
///
/// - worldZ = 正規化した法線
/// - worldY = カメラ前方軸を床平面に射影して正規化
/// - 射影長が `degenerate_epsilon` 未満（カメラが法線方向を向いている）場合は
///   カメラ右軸を射影して worldX とし、worldY = worldZ × worldX
/// - それ以外は worldX = worldY × worldZ
///
/// 並進は `(0, 0, d / |n|)`。単位法線なら `(0, 0, d)` と同じ。
pub fn compute_floor_frame_with(
    plane: [f64; 4],
    config: &CalibrationConfig,
) -> Result<FloorFrame, CalibrationError> {
    let [a, b, c, d] = plane;
    let normal = Vector3::new(a, b, c);
    let norm = normal.norm();
    if !norm.is_finite() || norm < MIN_NORMAL_NORM || !d.is_finite() {
        return Err(CalibrationError::InvalidPlane { a, b, c, d });
    }
    for (name, axis) in [("forward", config.forward_axis), ("right", config.right_axis)] {
        if axis.iter().any(|v| !v.is_finite()) {
            return Err(CalibrationError::InvalidAxis { name, axis });
        }
    }
    let world_z = normal / norm;

    let forward = Vector3::from(config.forward_axis);
    let projected = forward - forward.dot(&world_z) * world_z;
    let projected_norm = projected.norm();

    let (world_x, world_y) = if projected_norm < config.degenerate_epsilon {
        warn!(
            ?plane,
            "camera forward axis is parallel to the floor normal, falling back to right axis"
        );
        let right = Vector3::from(config.right_axis);
        let x = right - right.dot(&world_z) * world_z;
        let x_norm = x.norm();
        if x_norm < config.degenerate_epsilon {
            return Err(CalibrationError::InvalidPlane { a, b, c, d });
        }
        let x = x / x_norm;
        (x, world_z.cross(&x))
    } else {
        let y = projected / projected_norm;
        (y.cross(&world_z), y)
    };

    let rotation = Matrix3::from_rows(&[
        world_x.transpose(),
        world_y.transpose(),
        world_z.transpose(),
    ]);
    Ok(FloorFrame {
        rotation,
        translation: Vector3::new(0.0, 0.0, d / norm),
    })
}

/// 回転行列 → 単位クォータニオン
///
/// トレースと対角成分のうち最大のものを基準に分岐し、
/// 0 に近い値での除算を避ける。w >= 0 に正規化して返す。
pub fn rotation_to_quaternion(r: &Matrix3<f64>) -> UnitQuaternion<f64> {
    let (m00, m11, m22) = (r[(0, 0)], r[(1, 1)], r[(2, 2)]);
    let trace = m00 + m11 + m22;

    let (w, x, y, z) = if trace >= m00 && trace >= m11 && trace >= m22 {
        let s = (trace + 1.0).sqrt() * 2.0; // s = 4w
        (
            0.25 * s,
            (r[(2, 1)] - r[(1, 2)]) / s,
            (r[(0, 2)] - r[(2, 0)]) / s,
            (r[(1, 0)] - r[(0, 1)]) / s,
        )
    } else if m00 >= m11 && m00 >= m22 {
        let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0; // s = 4x
        (
            (r[(2, 1)] - r[(1, 2)]) / s,
            0.25 * s,
            (r[(0, 1)] + r[(1, 0)]) / s,
            (r[(0, 2)] + r[(2, 0)]) / s,
        )
    } else if m11 >= m22 {
        let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0; // s = 4y
        (
            (r[(0, 2)] - r[(2, 0)]) / s,
            (r[(0, 1)] + r[(1, 0)]) / s,
            0.25 * s,
            (r[(1, 2)] + r[(2, 1)]) / s,
        )
    } else {
        let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0; // s = 4z
        (
            (r[(1, 0)] - r[(0, 1)]) / s,
            (r[(0, 2)] + r[(2, 0)]) / s,
            (r[(1, 2)] + r[(2, 1)]) / s,
            0.25 * s,
        )
    };

    let q = if w < 0.0 {
        Quaternion::new(-w, -x, -y, -z)
    } else {
        Quaternion::new(w, x, y, z)
    };
    UnitQuaternion::from_quaternion(q)
}

/// クォータニオン → 回転行列
#[rustfmt::skip]
pub fn quaternion_to_rotation(q: &UnitQuaternion<f64>) -> Matrix3<f64> {
    let (w, x, y, z) = (q.w, q.i, q.j, q.k);
    Matrix3::new(
        1.0 - 2.0 * (y * y + z * z), 2.0 * (x * y - w * z),       2.0 * (x * z + w * y),
        2.0 * (x * y + w * z),       1.0 - 2.0 * (x * x + z * z), 2.0 * (y * z - w * x),
        2.0 * (x * z - w * y),       2.0 * (y * z + w * x),       1.0 - 2.0 * (x * x + y * y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn assert_matrix_close(a: &Matrix3<f64>, b: &Matrix3<f64>, tol: f64) {
        let diff = (a - b).abs().max();
        assert!(diff < tol, "max diff {diff}\n{a}\n{b}");
    }

    #[test]
    fn test_flat_floor_is_identity() {
        let frame = compute_floor_frame([0.0, 0.0, 1.0, -1.0]).unwrap();
        assert_matrix_close(&frame.rotation, &Matrix3::identity(), 1e-12);
        assert!((frame.translation - Vector3::new(0.0, 0.0, -1.0)).norm() < 1e-12);
        // z=1 の床上の点は z=0 へ
        let p = frame.transform_point(&[0.3, 2.0, 1.0]);
        assert!(p[2].abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_normal() {
        let err = compute_floor_frame([0.0, 0.0, 0.0, 1.0]).unwrap_err();
        assert_eq!(err, CalibrationError::InvalidPlane { a: 0.0, b: 0.0, c: 0.0, d: 1.0 });
        assert!(compute_floor_frame([1e-12, 0.0, 0.0, 0.0]).is_err());
    }

    #[test]
    fn test_non_finite_offset_rejected() {
        for d in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = compute_floor_frame([0.0, 0.0, 1.0, d]).unwrap_err();
            assert!(matches!(err, CalibrationError::InvalidPlane { .. }), "d = {d}");
        }
        assert!(compute_floor_frame([f64::NAN, 0.0, 1.0, 0.0]).is_err());
    }

    #[test]
    fn test_non_finite_axis_rejected() {
        let config = CalibrationConfig {
            forward_axis: [0.0, f64::NAN, 0.0],
            ..CalibrationConfig::default()
        };
        let err = compute_floor_frame_with([0.0, 0.0, 1.0, 0.0], &config).unwrap_err();
        assert!(matches!(err, CalibrationError::InvalidAxis { name: "forward", .. }));

        let config = CalibrationConfig {
            right_axis: [f64::INFINITY, 0.0, 0.0],
            ..CalibrationConfig::default()
        };
        let err = compute_floor_frame_with([0.0, 0.0, 1.0, 0.0], &config).unwrap_err();
        assert!(matches!(err, CalibrationError::InvalidAxis { name: "right", .. }));
    }

    #[test]
    fn test_camera_looking_along_normal_uses_right_axis() {
        // 法線 = カメラ前方 (0,1,0)
        let frame = compute_floor_frame([0.0, 1.0, 0.0, 0.5]).unwrap();
        let r = frame.rotation;
        // 正規直交かつ det = +1
        assert_matrix_close(&(r * r.transpose()), &Matrix3::identity(), 1e-12);
        assert!((r.determinant() - 1.0).abs() < 1e-12);
        // worldX = カメラ右軸
        assert!((r.row(0).transpose() - Vector3::new(1.0, 0.0, 0.0)).norm() < 1e-12);
        assert!((r.row(2).transpose() - Vector3::new(0.0, 1.0, 0.0)).norm() < 1e-12);
    }

    #[test]
    fn test_tilted_floor_points_land_on_zero() {
        // 法線 (0, -0.5, 1) を持つ床上の点を生成
        let plane = [0.0, -0.5, 1.0, 2.0];
        let frame = compute_floor_frame(plane).unwrap();
        assert!((frame.rotation.determinant() - 1.0).abs() < 1e-12);
        for (x, y) in [(0.0, 0.0), (1.0, 3.0), (-2.0, 5.0)] {
            // c*z = -(a*x + b*y + d)
            let z = -(plane[0] * x + plane[1] * y + plane[3]) / plane[2];
            let p = frame.transform_point(&[x, y, z]);
            assert!(p[2].abs() < 1e-9, "z = {}", p[2]);
        }
    }

    #[test]
    fn test_quaternion_round_trip_special_cases() {
        let cases = [
            Matrix3::identity(),
            // x軸まわり180°
            Matrix3::new(1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, -1.0),
            // y軸まわり180°
            Matrix3::new(-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, -1.0),
            // z軸まわり180°
            Matrix3::new(-1.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0),
            *nalgebra::Rotation3::from_axis_angle(&Vector3::x_axis(), PI / 3.0).matrix(),
            *nalgebra::Rotation3::from_euler_angles(0.3, -1.2, 2.9).matrix(),
        ];
        for r in &cases {
            let q = rotation_to_quaternion(r);
            assert!((q.quaternion().norm() - 1.0).abs() < 1e-12);
            assert_matrix_close(&quaternion_to_rotation(&q), r, 1e-6);
        }
    }

    #[test]
    fn test_transform_row_rotates_positions_and_orientations() {
        let frame = compute_floor_frame([0.0, 0.0, 1.0, -1.0]).unwrap();
        let mut row = KeypointRow {
            frame: 0,
            person: 1,
            keypoints_3d: Some(vec![[1.0, 2.0, 3.0]]),
            keypoints_quat: Some(vec![[1.0, 0.0, 0.0, 0.0]]),
            ..KeypointRow::default()
        };
        frame.transform_row(&mut row);
        assert_eq!(row.keypoints_3d.unwrap()[0], [1.0, 2.0, 2.0]);
        let q = row.keypoints_quat.unwrap()[0];
        assert!((q[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_transform_points_matches_single_point() {
        let frame = compute_floor_frame([0.0, -0.5, 1.0, 2.0]).unwrap();
        let points = [[0.0, 0.0, -2.0], [1.0, 3.0, -0.5], [0.4, -1.0, 7.0]];
        let out = frame.transform_points(&points);
        assert_eq!(out.len(), points.len());
        for (p, w) in points.iter().zip(&out) {
            assert_eq!(frame.transform_point(p), *w);
        }
        assert!(frame.transform_points(&[]).is_empty());
    }
}
