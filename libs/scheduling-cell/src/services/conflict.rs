// libs/scheduling-cell/src/services/conflict.rs
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{debug, error, warn};
use uuid::Uuid;

use shared_store::AppointmentStore;

use crate::models::{ConflictCheck, ScheduleError};

pub struct ConflictDetectionService {
    store: Arc<dyn AppointmentStore>,
}

impl ConflictDetectionService {
    pub fn new(store: Arc<dyn AppointmentStore>) -> Self {
        Self { store }
    }

    /// Check whether a candidate interval collides with a booked
    /// appointment. Cancelled appointments have released their slot and
    /// never conflict; `exclude_id` skips the appointment being
    /// rescheduled against itself. Of several colliding appointments the
    /// earliest-starting one is reported.
    pub async fn check_conflict(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<Uuid>,
    ) -> Result<ConflictCheck, ScheduleError> {
        debug!("Checking conflicts from {} to {}", start, end);

        let candidates = self
            .store
            .find_overlapping(start, end, exclude_id)
            .await
            .map_err(|e| {
                error!("Conflict lookup failed for {} to {}: {:#}", start, end, e);
                ScheduleError::Storage
            })?;

        // Two half-open intervals overlap if:
        // start1 < end2 AND start2 < end1
        let mut blocking: Vec<_> = candidates
            .into_iter()
            .filter(|a| Some(a.id) != exclude_id)
            .filter(|a| a.status.occupies_slot())
            .filter(|a| a.overlaps(start, end))
            .collect();
        blocking.sort_by_key(|a| a.start_time);

        let conflicting_appointment = blocking.into_iter().next();
        if let Some(existing) = &conflicting_appointment {
            warn!(
                "Conflict detected: appointment {} occupies {} to {}",
                existing.id, existing.start_time, existing.end_time
            );
        }

        Ok(ConflictCheck {
            has_conflict: conflicting_appointment.is_some(),
            conflicting_appointment,
        })
    }
}
