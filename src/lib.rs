pub mod assessment;
pub mod calibration;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod skeleton;
pub mod track;

pub use assessment::{AssessmentEngine, AssessmentResult, AssessmentSummary};
pub use calibration::{compute_floor_frame, FloorFrame};
pub use error::{Error, Result};
pub use skeleton::{Role, SkeletonCatalog, SkeletonDefinition};
pub use track::{KeypointSample, SharedTrackStore, TrackStore};
