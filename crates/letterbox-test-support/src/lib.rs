//! Shared test doubles for the Letterbox digital letter service.

mod clock;
mod repository;

pub use clock::FixedClock;
pub use repository::{
    AppendCall, ConflictingEventRepository, EmptyEventRepository, FailingEventRepository,
    RecordingEventRepository,
};
