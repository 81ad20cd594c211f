pub mod row;
pub mod sample;
pub mod shared;
pub mod store;

pub use row::{KeypointRow, MetricsRow, TrackDocument};
pub use sample::{contiguous_events, BoundingBox, Event, KeypointSample};
pub use shared::SharedTrackStore;
pub use store::{PersonTrack, TrackStore};
