use std::collections::{BTreeSet, HashMap};

use nalgebra::Vector3;

use super::layouts::Layout;
use super::Role;
use crate::error::CatalogError;

/// ベンダー別スケルトン定義（不変）
///
/// 関節名の並びが配列インデックス `0..N-1` を決める。
/// 構築時にロール・名前の索引とボーンのインデックス対を一度だけ作る。
#[derive(Debug, Clone)]
pub struct SkeletonDefinition {
    name: String,
    joint_names: Vec<String>,
    roles: HashMap<Role, usize>,
    normalized_names: HashMap<String, usize>,
    bones: BTreeSet<(usize, usize)>,
}

impl SkeletonDefinition {
    /// 関節リストとボーン（関節名ペア）から定義を構築
    pub fn new<S: AsRef<str>>(
        name: &str,
        joints: &[(S, Option<Role>)],
        bones: &[(S, S)],
    ) -> Result<Self, CatalogError> {
        let joint_names: Vec<String> = joints.iter().map(|(n, _)| n.as_ref().to_string()).collect();

        let mut roles = HashMap::new();
        let mut normalized_names = HashMap::new();
        for (index, (joint, role)) in joints.iter().enumerate() {
            if let Some(role) = role {
                roles.entry(*role).or_insert(index);
            }
            normalized_names
                .entry(normalize_joint_name(joint.as_ref()))
                .or_insert(index);
        }

        let lookup = |joint: &str| -> Result<usize, CatalogError> {
            joint_names
                .iter()
                .position(|n| n == joint)
                .ok_or_else(|| CatalogError::InvalidLayout {
                    skeleton: name.to_string(),
                    joint: joint.to_string(),
                })
        };
        let mut bone_set = BTreeSet::new();
        for (a, b) in bones {
            bone_set.insert((lookup(a.as_ref())?, lookup(b.as_ref())?));
        }

        Ok(Self {
            name: name.to_string(),
            joint_names,
            roles,
            normalized_names,
            bones: bone_set,
        })
    }

    pub(crate) fn from_layout(layout: &Layout) -> Result<Self, CatalogError> {
        Self::new(layout.name, layout.joints, layout.bones)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn num_keypoints(&self) -> usize {
        self.joint_names.len()
    }

    /// ロールに対応する配列インデックス（専用関節がない場合は None）
    pub fn role_index(&self, role: Role) -> Option<usize> {
        self.roles.get(&role).copied()
    }

    /// ボーンのインデックス対
    pub fn bones(&self) -> &BTreeSet<(usize, usize)> {
        &self.bones
    }

    pub fn joint_names(&self) -> &[String] {
        &self.joint_names
    }

    pub fn joint_name(&self, index: usize) -> Option<&str> {
        self.joint_names.get(index).map(String::as_str)
    }

    /// 関節名からインデックスを引く（大文字小文字・名前空間接頭辞を無視）
    pub fn index_of(&self, joint: &str) -> Option<usize> {
        self.normalized_names.get(&normalize_joint_name(joint)).copied()
    }

    pub(crate) fn normalized_name_set(&self) -> impl Iterator<Item = &String> {
        self.normalized_names.keys()
    }

    /// ロールの3D位置を解決
    ///
    /// 専用関節を持たないレイアウトでは派生位置を使う:
    /// Neck = 両肩の中点、Head = Nose → Neck、Pelvis = 両腰の中点。
    /// 非有限値の座標は欠損扱い。
    pub fn resolve(&self, role: Role, positions: &[[f64; 3]]) -> Option<Vector3<f64>> {
        if let Some(index) = self.role_index(role) {
            let p = positions.get(index)?;
            let v = Vector3::new(p[0], p[1], p[2]);
            return v.iter().all(|c| c.is_finite()).then_some(v);
        }
        match role {
            Role::Neck => self.midpoint(Role::LeftShoulder, Role::RightShoulder, positions),
            Role::Head => self
                .resolve(Role::Nose, positions)
                .or_else(|| self.resolve(Role::Neck, positions)),
            Role::Pelvis => self.midpoint(Role::LeftHip, Role::RightHip, positions),
            _ => None,
        }
    }

    fn midpoint(&self, a: Role, b: Role, positions: &[[f64; 3]]) -> Option<Vector3<f64>> {
        let a = self.resolve(a, positions)?;
        let b = self.resolve(b, positions)?;
        Some((a + b) / 2.0)
    }
}

/// 関節名の正規化
///
/// 名前空間（`mixamorig:Hips`, `Armature|Hips`）を落とし、
/// 英数字のみを小文字で残す。
pub fn normalize_joint_name(name: &str) -> String {
    let base = name.rsplit(|c: char| c == ':' || c == '|').next().unwrap_or(name);
    base.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::layouts;

    #[test]
    fn test_normalize_joint_name() {
        assert_eq!(normalize_joint_name("mixamorig:LeftArm"), "leftarm");
        assert_eq!(normalize_joint_name("LEFT_SHOULDER"), "leftshoulder");
        assert_eq!(normalize_joint_name("Armature|Hips"), "hips");
        assert_eq!(normalize_joint_name(" left-eye "), "lefteye");
    }

    #[test]
    fn test_coco_definition() {
        let coco = SkeletonDefinition::from_layout(&layouts::COCO).unwrap();
        assert_eq!(coco.num_keypoints(), 17);
        assert_eq!(coco.role_index(Role::LeftHip), Some(11));
        assert_eq!(coco.role_index(Role::Neck), None);
        assert_eq!(coco.bones().len(), 16);
        assert!(coco.bones().contains(&(11, 12)));
        assert_eq!(coco.index_of("RIGHT_ANKLE"), Some(16));
    }

    #[test]
    fn test_invalid_bone_rejected() {
        let joints = [("a", None), ("b", None)];
        let bones = [("a", "c")];
        let err = SkeletonDefinition::new("broken", &joints, &bones).unwrap_err();
        assert_eq!(
            err,
            CatalogError::InvalidLayout { skeleton: "broken".into(), joint: "c".into() }
        );
    }

    #[test]
    fn test_resolve_derived_neck() {
        let coco = SkeletonDefinition::from_layout(&layouts::COCO).unwrap();
        let mut positions = vec![[0.0; 3]; 17];
        positions[5] = [0.2, 0.0, 1.4];
        positions[6] = [-0.2, 0.0, 1.5];
        let neck = coco.resolve(Role::Neck, &positions).unwrap();
        assert!((neck - Vector3::new(0.0, 0.0, 1.45)).norm() < 1e-12);
        // COCO の Head は Nose にフォールバック
        positions[0] = [0.0, 0.1, 1.6];
        let head = coco.resolve(Role::Head, &positions).unwrap();
        assert!((head.z - 1.6).abs() < 1e-12);
    }

    #[test]
    fn test_resolve_missing_or_nan() {
        let coco = SkeletonDefinition::from_layout(&layouts::COCO).unwrap();
        let mut positions = vec![[0.0; 3]; 17];
        positions[11] = [f64::NAN, 0.0, 0.0];
        assert!(coco.resolve(Role::LeftHip, &positions).is_none());
        assert!(coco.resolve(Role::LeftHip, &positions[..5]).is_none());
        assert!(coco.resolve(Role::LeftHeel, &positions).is_none());
    }
}
