//! 姿勢評価（体幹角度と腕の挙上）

mod batch;
mod engine;
mod plane;

pub use batch::AssessmentSummary;
pub use engine::{ArmMetrics, AssessmentEngine, AssessmentResult, BodyPlanes, METRIC_COLUMNS};
pub use plane::{angle_between, angle_signed, to_degrees, Plane};
