//! ベンダー別の組み込みスケルトンレイアウト
//!
//! 関節の並びがそのまま配列インデックスになる。
//! ボーンは関節名のペアで記述し、カタログ構築時にインデックスへ解決する。

use super::Role;

/// 静的レイアウト表
pub struct Layout {
    pub name: &'static str,
    /// (関節名, ロール)。ロールを持たない関節（指など）は None
    pub joints: &'static [(&'static str, Option<Role>)],
    pub bones: &'static [(&'static str, &'static str)],
}

use Role::*;

/// COCO 17キーポイント
pub const COCO: Layout = Layout {
    name: "coco",
    joints: &[
        ("nose", Some(Nose)),
        ("left_eye", Some(LeftEye)),
        ("right_eye", Some(RightEye)),
        ("left_ear", Some(LeftEar)),
        ("right_ear", Some(RightEar)),
        ("left_shoulder", Some(LeftShoulder)),
        ("right_shoulder", Some(RightShoulder)),
        ("left_elbow", Some(LeftElbow)),
        ("right_elbow", Some(RightElbow)),
        ("left_wrist", Some(LeftWrist)),
        ("right_wrist", Some(RightWrist)),
        ("left_hip", Some(LeftHip)),
        ("right_hip", Some(RightHip)),
        ("left_knee", Some(LeftKnee)),
        ("right_knee", Some(RightKnee)),
        ("left_ankle", Some(LeftAnkle)),
        ("right_ankle", Some(RightAnkle)),
    ],
    bones: &[
        // 顔
        ("nose", "left_eye"),
        ("nose", "right_eye"),
        ("left_eye", "left_ear"),
        ("right_eye", "right_ear"),
        // 上半身
        ("left_shoulder", "right_shoulder"),
        ("left_shoulder", "left_elbow"),
        ("left_elbow", "left_wrist"),
        ("right_shoulder", "right_elbow"),
        ("right_elbow", "right_wrist"),
        // 胴体
        ("left_shoulder", "left_hip"),
        ("right_shoulder", "right_hip"),
        ("left_hip", "right_hip"),
        // 下半身
        ("left_hip", "left_knee"),
        ("left_knee", "left_ankle"),
        ("right_hip", "right_knee"),
        ("right_knee", "right_ankle"),
    ],
};

/// Stereolabs ZED BODY_18
pub const STEREOLABS_BODY18: Layout = Layout {
    name: "stereolabs_body18",
    joints: &[
        ("NOSE", Some(Nose)),
        ("NECK", Some(Neck)),
        ("RIGHT_SHOULDER", Some(RightShoulder)),
        ("RIGHT_ELBOW", Some(RightElbow)),
        ("RIGHT_WRIST", Some(RightWrist)),
        ("LEFT_SHOULDER", Some(LeftShoulder)),
        ("LEFT_ELBOW", Some(LeftElbow)),
        ("LEFT_WRIST", Some(LeftWrist)),
        ("RIGHT_HIP", Some(RightHip)),
        ("RIGHT_KNEE", Some(RightKnee)),
        ("RIGHT_ANKLE", Some(RightAnkle)),
        ("LEFT_HIP", Some(LeftHip)),
        ("LEFT_KNEE", Some(LeftKnee)),
        ("LEFT_ANKLE", Some(LeftAnkle)),
        ("RIGHT_EYE", Some(RightEye)),
        ("LEFT_EYE", Some(LeftEye)),
        ("RIGHT_EAR", Some(RightEar)),
        ("LEFT_EAR", Some(LeftEar)),
    ],
    bones: &[
        ("NOSE", "NECK"),
        ("NECK", "RIGHT_SHOULDER"),
        ("RIGHT_SHOULDER", "RIGHT_ELBOW"),
        ("RIGHT_ELBOW", "RIGHT_WRIST"),
        ("NECK", "LEFT_SHOULDER"),
        ("LEFT_SHOULDER", "LEFT_ELBOW"),
        ("LEFT_ELBOW", "LEFT_WRIST"),
        ("RIGHT_SHOULDER", "RIGHT_HIP"),
        ("RIGHT_HIP", "RIGHT_KNEE"),
        ("RIGHT_KNEE", "RIGHT_ANKLE"),
        ("LEFT_SHOULDER", "LEFT_HIP"),
        ("LEFT_HIP", "LEFT_KNEE"),
        ("LEFT_KNEE", "LEFT_ANKLE"),
        ("RIGHT_HIP", "LEFT_HIP"),
        ("NOSE", "RIGHT_EYE"),
        ("RIGHT_EYE", "RIGHT_EAR"),
        ("NOSE", "LEFT_EYE"),
        ("LEFT_EYE", "LEFT_EAR"),
    ],
};

/// Stereolabs ZED BODY_34
pub const STEREOLABS_BODY34: Layout = Layout {
    name: "stereolabs_body34",
    joints: &[
        ("PELVIS", Some(Pelvis)),
        ("NAVAL_SPINE", Some(SpineNaval)),
        ("CHEST_SPINE", Some(SpineChest)),
        ("NECK", Some(Neck)),
        ("LEFT_CLAVICLE", Some(LeftClavicle)),
        ("LEFT_SHOULDER", Some(LeftShoulder)),
        ("LEFT_ELBOW", Some(LeftElbow)),
        ("LEFT_WRIST", Some(LeftWrist)),
        ("LEFT_HAND", Some(LeftHand)),
        ("LEFT_HANDTIP", None),
        ("LEFT_THUMB", None),
        ("RIGHT_CLAVICLE", Some(RightClavicle)),
        ("RIGHT_SHOULDER", Some(RightShoulder)),
        ("RIGHT_ELBOW", Some(RightElbow)),
        ("RIGHT_WRIST", Some(RightWrist)),
        ("RIGHT_HAND", Some(RightHand)),
        ("RIGHT_HANDTIP", None),
        ("RIGHT_THUMB", None),
        ("LEFT_HIP", Some(LeftHip)),
        ("LEFT_KNEE", Some(LeftKnee)),
        ("LEFT_ANKLE", Some(LeftAnkle)),
        ("LEFT_FOOT", Some(LeftFoot)),
        ("RIGHT_HIP", Some(RightHip)),
        ("RIGHT_KNEE", Some(RightKnee)),
        ("RIGHT_ANKLE", Some(RightAnkle)),
        ("RIGHT_FOOT", Some(RightFoot)),
        ("HEAD", Some(Head)),
        ("NOSE", Some(Nose)),
        ("LEFT_EYE", Some(LeftEye)),
        ("LEFT_EAR", Some(LeftEar)),
        ("RIGHT_EYE", Some(RightEye)),
        ("RIGHT_EAR", Some(RightEar)),
        ("LEFT_HEEL", Some(LeftHeel)),
        ("RIGHT_HEEL", Some(RightHeel)),
    ],
    bones: &[
        ("PELVIS", "NAVAL_SPINE"),
        ("NAVAL_SPINE", "CHEST_SPINE"),
        ("CHEST_SPINE", "NECK"),
        ("NECK", "HEAD"),
        ("HEAD", "NOSE"),
        ("NOSE", "LEFT_EYE"),
        ("LEFT_EYE", "LEFT_EAR"),
        ("NOSE", "RIGHT_EYE"),
        ("RIGHT_EYE", "RIGHT_EAR"),
        ("CHEST_SPINE", "LEFT_CLAVICLE"),
        ("LEFT_CLAVICLE", "LEFT_SHOULDER"),
        ("LEFT_SHOULDER", "LEFT_ELBOW"),
        ("LEFT_ELBOW", "LEFT_WRIST"),
        ("LEFT_WRIST", "LEFT_HAND"),
        ("LEFT_HAND", "LEFT_HANDTIP"),
        ("LEFT_WRIST", "LEFT_THUMB"),
        ("CHEST_SPINE", "RIGHT_CLAVICLE"),
        ("RIGHT_CLAVICLE", "RIGHT_SHOULDER"),
        ("RIGHT_SHOULDER", "RIGHT_ELBOW"),
        ("RIGHT_ELBOW", "RIGHT_WRIST"),
        ("RIGHT_WRIST", "RIGHT_HAND"),
        ("RIGHT_HAND", "RIGHT_HANDTIP"),
        ("RIGHT_WRIST", "RIGHT_THUMB"),
        ("PELVIS", "LEFT_HIP"),
        ("LEFT_HIP", "LEFT_KNEE"),
        ("LEFT_KNEE", "LEFT_ANKLE"),
        ("LEFT_ANKLE", "LEFT_HEEL"),
        ("LEFT_ANKLE", "LEFT_FOOT"),
        ("LEFT_HEEL", "LEFT_FOOT"),
        ("PELVIS", "RIGHT_HIP"),
        ("RIGHT_HIP", "RIGHT_KNEE"),
        ("RIGHT_KNEE", "RIGHT_ANKLE"),
        ("RIGHT_ANKLE", "RIGHT_HEEL"),
        ("RIGHT_ANKLE", "RIGHT_FOOT"),
        ("RIGHT_HEEL", "RIGHT_FOOT"),
    ],
};

/// Azure Kinect Body Tracking SDK (32関節)
pub const KINECT_AZURE: Layout = Layout {
    name: "kinect_azure",
    joints: &[
        ("PELVIS", Some(Pelvis)),
        ("SPINE_NAVAL", Some(SpineNaval)),
        ("SPINE_CHEST", Some(SpineChest)),
        ("NECK", Some(Neck)),
        ("CLAVICLE_LEFT", Some(LeftClavicle)),
        ("SHOULDER_LEFT", Some(LeftShoulder)),
        ("ELBOW_LEFT", Some(LeftElbow)),
        ("WRIST_LEFT", Some(LeftWrist)),
        ("HAND_LEFT", Some(LeftHand)),
        ("HANDTIP_LEFT", None),
        ("THUMB_LEFT", None),
        ("CLAVICLE_RIGHT", Some(RightClavicle)),
        ("SHOULDER_RIGHT", Some(RightShoulder)),
        ("ELBOW_RIGHT", Some(RightElbow)),
        ("WRIST_RIGHT", Some(RightWrist)),
        ("HAND_RIGHT", Some(RightHand)),
        ("HANDTIP_RIGHT", None),
        ("THUMB_RIGHT", None),
        ("HIP_LEFT", Some(LeftHip)),
        ("KNEE_LEFT", Some(LeftKnee)),
        ("ANKLE_LEFT", Some(LeftAnkle)),
        ("FOOT_LEFT", Some(LeftFoot)),
        ("HIP_RIGHT", Some(RightHip)),
        ("KNEE_RIGHT", Some(RightKnee)),
        ("ANKLE_RIGHT", Some(RightAnkle)),
        ("FOOT_RIGHT", Some(RightFoot)),
        ("HEAD", Some(Head)),
        ("NOSE", Some(Nose)),
        ("EYE_LEFT", Some(LeftEye)),
        ("EAR_LEFT", Some(LeftEar)),
        ("EYE_RIGHT", Some(RightEye)),
        ("EAR_RIGHT", Some(RightEar)),
    ],
    bones: &[
        ("PELVIS", "SPINE_NAVAL"),
        ("SPINE_NAVAL", "SPINE_CHEST"),
        ("SPINE_CHEST", "NECK"),
        ("NECK", "HEAD"),
        ("HEAD", "NOSE"),
        ("HEAD", "EYE_LEFT"),
        ("HEAD", "EYE_RIGHT"),
        ("HEAD", "EAR_LEFT"),
        ("HEAD", "EAR_RIGHT"),
        ("SPINE_CHEST", "CLAVICLE_LEFT"),
        ("CLAVICLE_LEFT", "SHOULDER_LEFT"),
        ("SHOULDER_LEFT", "ELBOW_LEFT"),
        ("ELBOW_LEFT", "WRIST_LEFT"),
        ("WRIST_LEFT", "HAND_LEFT"),
        ("HAND_LEFT", "HANDTIP_LEFT"),
        ("WRIST_LEFT", "THUMB_LEFT"),
        ("SPINE_CHEST", "CLAVICLE_RIGHT"),
        ("CLAVICLE_RIGHT", "SHOULDER_RIGHT"),
        ("SHOULDER_RIGHT", "ELBOW_RIGHT"),
        ("ELBOW_RIGHT", "WRIST_RIGHT"),
        ("WRIST_RIGHT", "HAND_RIGHT"),
        ("HAND_RIGHT", "HANDTIP_RIGHT"),
        ("WRIST_RIGHT", "THUMB_RIGHT"),
        ("PELVIS", "HIP_LEFT"),
        ("HIP_LEFT", "KNEE_LEFT"),
        ("KNEE_LEFT", "ANKLE_LEFT"),
        ("ANKLE_LEFT", "FOOT_LEFT"),
        ("PELVIS", "HIP_RIGHT"),
        ("HIP_RIGHT", "KNEE_RIGHT"),
        ("KNEE_RIGHT", "ANKLE_RIGHT"),
        ("ANKLE_RIGHT", "FOOT_RIGHT"),
    ],
};

/// OptiTrack (Mixamo 互換のリグ名)
///
/// Mixamo の `*Shoulder` は鎖骨、`*Arm` が肩関節にあたる。
pub const OPTITRACK: Layout = Layout {
    name: "optitrack",
    joints: &[
        ("Hips", Some(Pelvis)),
        ("Spine", Some(SpineNaval)),
        ("Spine1", Some(SpineChest)),
        ("Neck", Some(Neck)),
        ("Head", Some(Head)),
        ("LeftShoulder", Some(LeftClavicle)),
        ("LeftArm", Some(LeftShoulder)),
        ("LeftForeArm", Some(LeftElbow)),
        ("LeftHand", Some(LeftWrist)),
        ("LeftHandThumb1", None),
        ("LeftHandThumb2", None),
        ("LeftHandThumb3", None),
        ("LeftHandIndex1", None),
        ("LeftHandIndex2", None),
        ("LeftHandIndex3", None),
        ("LeftHandMiddle1", None),
        ("LeftHandMiddle2", None),
        ("LeftHandMiddle3", None),
        ("LeftHandRing1", None),
        ("LeftHandRing2", None),
        ("LeftHandRing3", None),
        ("LeftHandPinky1", None),
        ("LeftHandPinky2", None),
        ("LeftHandPinky3", None),
        ("RightShoulder", Some(RightClavicle)),
        ("RightArm", Some(RightShoulder)),
        ("RightForeArm", Some(RightElbow)),
        ("RightHand", Some(RightWrist)),
        ("RightHandThumb1", None),
        ("RightHandThumb2", None),
        ("RightHandThumb3", None),
        ("RightHandIndex1", None),
        ("RightHandIndex2", None),
        ("RightHandIndex3", None),
        ("RightHandMiddle1", None),
        ("RightHandMiddle2", None),
        ("RightHandMiddle3", None),
        ("RightHandRing1", None),
        ("RightHandRing2", None),
        ("RightHandRing3", None),
        ("RightHandPinky1", None),
        ("RightHandPinky2", None),
        ("RightHandPinky3", None),
        ("LeftUpLeg", Some(LeftHip)),
        ("LeftLeg", Some(LeftKnee)),
        ("LeftFoot", Some(LeftAnkle)),
        ("LeftToeBase", Some(LeftToe)),
        ("RightUpLeg", Some(RightHip)),
        ("RightLeg", Some(RightKnee)),
        ("RightFoot", Some(RightAnkle)),
        ("RightToeBase", Some(RightToe)),
    ],
    bones: &[
        // 背骨
        ("Hips", "Spine"),
        ("Spine", "Spine1"),
        ("Spine1", "Neck"),
        ("Neck", "Head"),
        // 左腕
        ("Spine1", "LeftShoulder"),
        ("LeftShoulder", "LeftArm"),
        ("LeftArm", "LeftForeArm"),
        ("LeftForeArm", "LeftHand"),
        ("LeftHand", "LeftHandThumb1"),
        ("LeftHandThumb1", "LeftHandThumb2"),
        ("LeftHandThumb2", "LeftHandThumb3"),
        ("LeftHand", "LeftHandIndex1"),
        ("LeftHandIndex1", "LeftHandIndex2"),
        ("LeftHandIndex2", "LeftHandIndex3"),
        ("LeftHand", "LeftHandMiddle1"),
        ("LeftHandMiddle1", "LeftHandMiddle2"),
        ("LeftHandMiddle2", "LeftHandMiddle3"),
        ("LeftHand", "LeftHandRing1"),
        ("LeftHandRing1", "LeftHandRing2"),
        ("LeftHandRing2", "LeftHandRing3"),
        ("LeftHand", "LeftHandPinky1"),
        ("LeftHandPinky1", "LeftHandPinky2"),
        ("LeftHandPinky2", "LeftHandPinky3"),
        // 右腕
        ("Spine1", "RightShoulder"),
        ("RightShoulder", "RightArm"),
        ("RightArm", "RightForeArm"),
        ("RightForeArm", "RightHand"),
        ("RightHand", "RightHandThumb1"),
        ("RightHandThumb1", "RightHandThumb2"),
        ("RightHandThumb2", "RightHandThumb3"),
        ("RightHand", "RightHandIndex1"),
        ("RightHandIndex1", "RightHandIndex2"),
        ("RightHandIndex2", "RightHandIndex3"),
        ("RightHand", "RightHandMiddle1"),
        ("RightHandMiddle1", "RightHandMiddle2"),
        ("RightHandMiddle2", "RightHandMiddle3"),
        ("RightHand", "RightHandRing1"),
        ("RightHandRing1", "RightHandRing2"),
        ("RightHandRing2", "RightHandRing3"),
        ("RightHand", "RightHandPinky1"),
        ("RightHandPinky1", "RightHandPinky2"),
        ("RightHandPinky2", "RightHandPinky3"),
        // 脚
        ("Hips", "LeftUpLeg"),
        ("LeftUpLeg", "LeftLeg"),
        ("LeftLeg", "LeftFoot"),
        ("LeftFoot", "LeftToeBase"),
        ("Hips", "RightUpLeg"),
        ("RightUpLeg", "RightLeg"),
        ("RightLeg", "RightFoot"),
        ("RightFoot", "RightToeBase"),
    ],
};

/// Xsens MVN (23セグメント)
pub const XSENS: Layout = Layout {
    name: "xsens",
    joints: &[
        ("Pelvis", Some(Pelvis)),
        ("L5", None),
        ("L3", Some(SpineNaval)),
        ("T12", None),
        ("T8", Some(SpineChest)),
        ("Neck", Some(Neck)),
        ("Head", Some(Head)),
        ("RightShoulder", Some(RightClavicle)),
        ("RightUpperArm", Some(RightShoulder)),
        ("RightForeArm", Some(RightElbow)),
        ("RightHand", Some(RightWrist)),
        ("LeftShoulder", Some(LeftClavicle)),
        ("LeftUpperArm", Some(LeftShoulder)),
        ("LeftForeArm", Some(LeftElbow)),
        ("LeftHand", Some(LeftWrist)),
        ("RightUpperLeg", Some(RightHip)),
        ("RightLowerLeg", Some(RightKnee)),
        ("RightFoot", Some(RightAnkle)),
        ("RightToe", Some(RightToe)),
        ("LeftUpperLeg", Some(LeftHip)),
        ("LeftLowerLeg", Some(LeftKnee)),
        ("LeftFoot", Some(LeftAnkle)),
        ("LeftToe", Some(LeftToe)),
    ],
    bones: &[
        ("Pelvis", "L5"),
        ("L5", "L3"),
        ("L3", "T12"),
        ("T12", "T8"),
        ("T8", "Neck"),
        ("Neck", "Head"),
        ("T8", "RightShoulder"),
        ("RightShoulder", "RightUpperArm"),
        ("RightUpperArm", "RightForeArm"),
        ("RightForeArm", "RightHand"),
        ("T8", "LeftShoulder"),
        ("LeftShoulder", "LeftUpperArm"),
        ("LeftUpperArm", "LeftForeArm"),
        ("LeftForeArm", "LeftHand"),
        ("Pelvis", "RightUpperLeg"),
        ("RightUpperLeg", "RightLowerLeg"),
        ("RightLowerLeg", "RightFoot"),
        ("RightFoot", "RightToe"),
        ("Pelvis", "LeftUpperLeg"),
        ("LeftUpperLeg", "LeftLowerLeg"),
        ("LeftLowerLeg", "LeftFoot"),
        ("LeftFoot", "LeftToe"),
    ],
};

pub const BUILTIN: [&Layout; 6] = [
    &COCO,
    &STEREOLABS_BODY18,
    &STEREOLABS_BODY34,
    &KINECT_AZURE,
    &OPTITRACK,
    &XSENS,
];
