//! In-memory implementation of the `EventRepository` trait.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::{debug, warn};
use uuid::Uuid;

use letterbox_core::error::DomainError;
use letterbox_core::repository::{EventRepository, StoredEvent};

type Streams = HashMap<Uuid, Vec<StoredEvent>>;

/// Event streams held in process memory, keyed by aggregate.
///
/// Appends are checked against the stream's last sequence number, so two
/// writers that loaded the same version cannot both succeed.
#[derive(Debug, Default)]
pub struct InMemoryEventRepository {
    streams: Mutex<Streams>,
}

impl InMemoryEventRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of aggregates with at least one event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store lock is poisoned.
    pub fn stream_count(&self) -> Result<usize, DomainError> {
        Ok(self.lock()?.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Streams>, DomainError> {
        self.streams
            .lock()
            .map_err(|e| DomainError::Infrastructure(format!("event store lock poisoned: {e}")))
    }
}

#[async_trait]
impl EventRepository for InMemoryEventRepository {
    async fn load_events(&self, aggregate_id: Uuid) -> Result<Vec<StoredEvent>, DomainError> {
        let streams = self.lock()?;
        Ok(streams.get(&aggregate_id).cloned().unwrap_or_default())
    }

    async fn append_events(
        &self,
        aggregate_id: Uuid,
        expected_version: i64,
        events: &[StoredEvent],
    ) -> Result<(), DomainError> {
        if events.is_empty() {
            return Ok(());
        }

        if let Some(stray) = events.iter().find(|e| e.aggregate_id != aggregate_id) {
            return Err(DomainError::Infrastructure(format!(
                "event {} belongs to aggregate {}, not {aggregate_id}",
                stray.event_id, stray.aggregate_id
            )));
        }

        let mut streams = self.lock()?;
        let actual = streams
            .get(&aggregate_id)
            .and_then(|stream| stream.last())
            .map_or(0, |e| e.sequence_number);

        if actual != expected_version {
            warn!(
                %aggregate_id,
                expected_version,
                actual,
                "rejecting append on stale version"
            );
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id,
                expected: expected_version,
                actual,
            });
        }

        let contiguous = events
            .iter()
            .zip(expected_version + 1..)
            .all(|(event, sequence_number)| event.sequence_number == sequence_number);
        if !contiguous {
            return Err(DomainError::ConcurrencyConflict {
                aggregate_id,
                expected: expected_version + 1,
                actual: events[0].sequence_number,
            });
        }

        streams
            .entry(aggregate_id)
            .or_default()
            .extend_from_slice(events);
        debug!(
            %aggregate_id,
            appended = events.len(),
            version = events.last().map_or(actual, |e| e.sequence_number),
            "appended events"
        );
        Ok(())
    }
}
