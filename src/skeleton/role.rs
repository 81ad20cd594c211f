use serde::{Deserialize, Serialize};

/// ベンダー共通の解剖学的関節ロール
///
/// 各スケルトン定義はこのロールを自分の配列インデックスに対応付ける。
/// 評価コードはロールだけを参照し、生のインデックスには触れない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    // 体幹
    Pelvis,
    SpineNaval,
    SpineChest,
    Neck,
    // 頭部
    Head,
    Nose,
    LeftEye,
    RightEye,
    LeftEar,
    RightEar,
    // 上肢
    LeftClavicle,
    RightClavicle,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHand,
    RightHand,
    // 下肢
    LeftHip,
    RightHip,
    LeftKnee,
    RightKnee,
    LeftAnkle,
    RightAnkle,
    LeftFoot,
    RightFoot,
    LeftHeel,
    RightHeel,
    LeftToe,
    RightToe,
}

impl Role {
    pub const COUNT: usize = 32;

    pub fn all() -> &'static [Role] {
        use Role::*;
        &[
            Pelvis, SpineNaval, SpineChest, Neck,
            Head, Nose, LeftEye, RightEye, LeftEar, RightEar,
            LeftClavicle, RightClavicle, LeftShoulder, RightShoulder,
            LeftElbow, RightElbow, LeftWrist, RightWrist, LeftHand, RightHand,
            LeftHip, RightHip, LeftKnee, RightKnee, LeftAnkle, RightAnkle,
            LeftFoot, RightFoot, LeftHeel, RightHeel, LeftToe, RightToe,
        ]
    }
}

/// 左右
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn both() -> [Side; 2] {
        [Side::Left, Side::Right]
    }

    pub fn shoulder(self) -> Role {
        match self {
            Side::Left => Role::LeftShoulder,
            Side::Right => Role::RightShoulder,
        }
    }

    pub fn elbow(self) -> Role {
        match self {
            Side::Left => Role::LeftElbow,
            Side::Right => Role::RightElbow,
        }
    }

    pub fn wrist(self) -> Role {
        match self {
            Side::Left => Role::LeftWrist,
            Side::Right => Role::RightWrist,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_role_count() {
        assert_eq!(Role::all().len(), Role::COUNT);
        let unique: HashSet<_> = Role::all().iter().collect();
        assert_eq!(unique.len(), Role::COUNT);
    }

    #[test]
    fn test_side_roles() {
        assert_eq!(Side::Left.elbow(), Role::LeftElbow);
        assert_eq!(Side::Right.wrist(), Role::RightWrist);
        assert_eq!(Side::Left.shoulder(), Role::LeftShoulder);
    }
}
