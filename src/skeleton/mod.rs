pub mod catalog;
pub mod definition;
pub mod layouts;
pub mod role;

pub use catalog::{SkeletonCatalog, DEFAULT_MIN_COVERAGE};
pub use definition::{normalize_joint_name, SkeletonDefinition};
pub use role::{Role, Side};
