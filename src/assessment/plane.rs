//! 平面とベクトルの幾何ユーティリティ

use nalgebra::Vector3;

use crate::error::AssessmentError;

/// ノルムがこれ未満のベクトルは方向を持たないとみなす
pub const EPS: f64 = 1e-9;

/// 点と単位法線で表した平面
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub point: Vector3<f64>,
    pub normal: Vector3<f64>,
}

impl Plane {
    /// 法線は正規化される。ゼロ法線は退化
    pub fn new(
        point: Vector3<f64>,
        normal: Vector3<f64>,
        what: &'static str,
    ) -> Result<Self, AssessmentError> {
        Ok(Self {
            point,
            normal: unit(normal, what)?,
        })
    }

    /// ベクトルの平面への射影（法線成分を除去）
    pub fn project_vector(&self, v: &Vector3<f64>) -> Vector3<f64> {
        v - self.normal * v.dot(&self.normal)
    }
}

fn unit(v: Vector3<f64>, what: &'static str) -> Result<Vector3<f64>, AssessmentError> {
    let n = v.norm();
    if !n.is_finite() || n < EPS {
        return Err(AssessmentError::GeometricDegeneracy(what));
    }
    Ok(v / n)
}

/// 2ベクトルのなす角 [rad]、0..=π
pub fn angle_between(
    a: &Vector3<f64>,
    b: &Vector3<f64>,
    what: &'static str,
) -> Result<f64, AssessmentError> {
    let a = unit(*a, what)?;
    let b = unit(*b, what)?;
    Ok(a.dot(&b).clamp(-1.0, 1.0).acos())
}

/// 符号付きの角度 [rad]
///
/// `a × b` が `direction` 側を向くとき正。
pub fn angle_signed(
    a: &Vector3<f64>,
    b: &Vector3<f64>,
    direction: &Vector3<f64>,
    what: &'static str,
) -> Result<f64, AssessmentError> {
    let angle = angle_between(a, b, what)?;
    if a.cross(b).dot(direction) < 0.0 {
        Ok(-angle)
    } else {
        Ok(angle)
    }
}

/// rad → deg。`rad / 2π * 360` のまま計算する
pub fn to_degrees(rad: f64) -> f64 {
    rad / (std::f64::consts::PI * 2.0) * 360.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_plane_normalizes() {
        let p = Plane::new(Vector3::zeros(), Vector3::new(0.0, 0.0, 5.0), "n").unwrap();
        assert!((p.normal - Vector3::z()).norm() < 1e-12);
    }

    #[test]
    fn test_zero_normal_is_degenerate() {
        let err = Plane::new(Vector3::zeros(), Vector3::zeros(), "ground").unwrap_err();
        assert_eq!(err, AssessmentError::GeometricDegeneracy("ground"));
    }

    #[test]
    fn test_project_vector_removes_normal_component() {
        let p = Plane::new(Vector3::zeros(), Vector3::z(), "n").unwrap();
        let v = p.project_vector(&Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(v, Vector3::new(1.0, 2.0, 0.0));
    }

    #[test]
    fn test_angle_signed() {
        let x = Vector3::x();
        let y = Vector3::y();
        let a = angle_signed(&x, &y, &Vector3::z(), "a").unwrap();
        assert!((a - FRAC_PI_2).abs() < 1e-12);
        let b = angle_signed(&x, &y, &-Vector3::z(), "a").unwrap();
        assert!((b + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_angle_of_zero_vector_is_degenerate() {
        assert!(angle_between(&Vector3::zeros(), &Vector3::x(), "a").is_err());
    }

    #[test]
    fn test_to_degrees() {
        assert!((to_degrees(FRAC_PI_2) - 90.0).abs() < 1e-12);
    }
}
