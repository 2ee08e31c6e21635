pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use shared_models::appointment::{Appointment, AppointmentStatus, ConsultationType};

/// Payload for inserting a new appointment. The store assigns the id and
/// both audit timestamps.
#[derive(Debug, Clone)]
pub struct NewAppointment {
    pub patient_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub consultation_type: ConsultationType,
    pub notes: Option<String>,
}

/// Partial update applied to an existing appointment. `None` fields are
/// left untouched; the store refreshes `updated_at`.
#[derive(Debug, Clone, Default)]
pub struct AppointmentPatch {
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
    pub consultation_type: Option<ConsultationType>,
    pub notes: Option<Option<String>>,
}

/// Persistence collaborator contract for the single-tenant appointment
/// store. Status filtering is left to callers: range queries return every
/// matching row regardless of status unless the flag says otherwise.
#[async_trait]
pub trait AppointmentStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>>;

    /// All appointments whose `[start_time, end_time)` interval intersects
    /// `[start, end)`, regardless of status, minus the excluded id.
    async fn find_overlapping(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<Uuid>,
    ) -> Result<Vec<Appointment>>;

    /// Appointments intersecting the window, ascending by start time.
    async fn find_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        include_cancelled: bool,
    ) -> Result<Vec<Appointment>>;

    async fn create(&self, new: NewAppointment) -> Result<Appointment>;

    async fn update(&self, id: Uuid, patch: AppointmentPatch) -> Result<Appointment>;

    async fn delete(&self, id: Uuid) -> Result<()>;
}
