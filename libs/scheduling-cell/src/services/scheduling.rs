// libs/scheduling-cell/src/services/scheduling.rs
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use std::sync::Arc;
use tracing::{debug, error, info};
use uuid::Uuid;

use shared_models::appointment::{Appointment, AppointmentStatus};
use shared_models::auth::{AuthProvider, User};
use shared_store::{AppointmentPatch, AppointmentStore, NewAppointment};

use crate::models::{
    CreateAppointmentRequest, ScheduleError, UpdateAppointmentRequest, ValidationRules,
};
use crate::services::conflict::ConflictDetectionService;
use crate::services::lifecycle::AppointmentLifecycleService;

/// Orchestrates appointment mutations against the store, enforcing the
/// no-double-booking rule and the status lifecycle. The conflict check is
/// read-then-write without transactional isolation; deployments with
/// concurrent writers need a storage-level exclusion constraint on top.
pub struct SchedulingService {
    store: Arc<dyn AppointmentStore>,
    auth: Arc<dyn AuthProvider>,
    conflict_service: ConflictDetectionService,
    lifecycle_service: AppointmentLifecycleService,
    validation_rules: ValidationRules,
}

impl SchedulingService {
    pub fn new(store: Arc<dyn AppointmentStore>, auth: Arc<dyn AuthProvider>) -> Self {
        Self::with_rules(store, auth, ValidationRules::default())
    }

    pub fn with_rules(
        store: Arc<dyn AppointmentStore>,
        auth: Arc<dyn AuthProvider>,
        validation_rules: ValidationRules,
    ) -> Self {
        let conflict_service = ConflictDetectionService::new(Arc::clone(&store));

        Self {
            store,
            auth,
            conflict_service,
            lifecycle_service: AppointmentLifecycleService::new(),
            validation_rules,
        }
    }

    /// Book a new appointment. The slot must be free of non-cancelled
    /// appointments; on success the record is persisted as pending and the
    /// caller should drop any cached calendar windows.
    pub async fn create(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, ScheduleError> {
        let user = self.require_user()?;
        debug!(
            "Booking appointment for patient {} requested by {}",
            request.patient_id, user.id
        );

        self.validate_duration(request.duration_minutes)?;
        self.validate_notes(request.notes.as_deref())?;

        let end_time = request.start_time + ChronoDuration::minutes(request.duration_minutes);

        let check = self
            .conflict_service
            .check_conflict(request.start_time, end_time, None)
            .await?;
        if let Some(existing) = check.conflicting_appointment {
            return Err(conflict_error(existing));
        }

        let appointment = self
            .store
            .create(NewAppointment {
                patient_id: request.patient_id,
                start_time: request.start_time,
                end_time,
                status: AppointmentStatus::Pending,
                consultation_type: request.consultation_type,
                notes: request.notes,
            })
            .await
            .map_err(|e| self.storage_error("create", e))?;

        info!(
            "Appointment {} booked from {} to {}",
            appointment.id, appointment.start_time, appointment.end_time
        );
        Ok(appointment)
    }

    /// Reschedule and/or amend an existing appointment. Unset time fields
    /// keep their current values; the resulting window is conflict-checked
    /// against everything except the appointment itself.
    pub async fn update(
        &self,
        appointment_id: Uuid,
        request: UpdateAppointmentRequest,
    ) -> Result<Appointment, ScheduleError> {
        self.require_user()?;
        debug!("Updating appointment {}", appointment_id);

        let current = self.fetch(appointment_id).await?;

        self.validate_notes(request.notes.as_deref())?;

        let new_start = request.new_start_time.unwrap_or(current.start_time);
        let new_duration = request
            .new_duration_minutes
            .unwrap_or_else(|| current.duration_minutes());
        self.validate_duration(new_duration)?;
        let new_end = new_start + ChronoDuration::minutes(new_duration);

        let check = self
            .conflict_service
            .check_conflict(new_start, new_end, Some(appointment_id))
            .await?;
        if let Some(existing) = check.conflicting_appointment {
            return Err(conflict_error(existing));
        }

        let patch = AppointmentPatch {
            start_time: Some(new_start),
            end_time: Some(new_end),
            consultation_type: request.consultation_type,
            notes: request.notes.map(Some),
            ..Default::default()
        };
        let updated = self
            .store
            .update(appointment_id, patch)
            .await
            .map_err(|e| self.storage_error("update", e))?;

        info!(
            "Appointment {} rescheduled to {} ({} minutes)",
            appointment_id, new_start, new_duration
        );
        Ok(updated)
    }

    /// Apply a status transition, enforcing the lifecycle table. Terminal
    /// statuses reject every further change.
    pub async fn set_status(
        &self,
        appointment_id: Uuid,
        new_status: AppointmentStatus,
    ) -> Result<Appointment, ScheduleError> {
        self.require_user()?;

        let current = self.fetch(appointment_id).await?;
        self.lifecycle_service
            .validate_status_transition(&current.status, &new_status)?;

        let patch = AppointmentPatch {
            status: Some(new_status),
            ..Default::default()
        };
        let updated = self
            .store
            .update(appointment_id, patch)
            .await
            .map_err(|e| self.storage_error("status update", e))?;

        info!(
            "Appointment {} moved from {} to {}",
            appointment_id, current.status, updated.status
        );
        Ok(updated)
    }

    /// Cancelling releases the slot so it can be rebooked.
    pub async fn cancel(&self, appointment_id: Uuid) -> Result<Appointment, ScheduleError> {
        self.set_status(appointment_id, AppointmentStatus::Cancelled)
            .await
    }

    /// Hard delete; there is no soft-delete trail.
    pub async fn delete(&self, appointment_id: Uuid) -> Result<(), ScheduleError> {
        self.require_user()?;

        let current = self.fetch(appointment_id).await?;
        self.store
            .delete(current.id)
            .await
            .map_err(|e| self.storage_error("delete", e))?;

        info!("Appointment {} deleted", appointment_id);
        Ok(())
    }

    pub async fn get(&self, appointment_id: Uuid) -> Result<Appointment, ScheduleError> {
        self.require_user()?;
        self.fetch(appointment_id).await
    }

    /// Appointments whose interval intersects the window, even partially,
    /// ascending by start time. Cancelled appointments are filtered out
    /// unless requested.
    pub async fn list_in_range(
        &self,
        window_start: DateTime<Utc>,
        window_end: DateTime<Utc>,
        include_cancelled: bool,
    ) -> Result<Vec<Appointment>, ScheduleError> {
        self.require_user()?;
        debug!(
            "Listing appointments from {} to {}",
            window_start, window_end
        );

        let mut rows = self
            .store
            .find_in_range(window_start, window_end, include_cancelled)
            .await
            .map_err(|e| self.storage_error("range query", e))?;

        rows.retain(|a| {
            a.overlaps(window_start, window_end)
                && (include_cancelled || a.status.occupies_slot())
        });
        rows.sort_by_key(|a| a.start_time);

        Ok(rows)
    }

    // ==============================================================================
    // PRIVATE HELPER METHODS
    // ==============================================================================

    fn require_user(&self) -> Result<User, ScheduleError> {
        self.auth.current_user().ok_or(ScheduleError::Unauthorized)
    }

    async fn fetch(&self, appointment_id: Uuid) -> Result<Appointment, ScheduleError> {
        self.store
            .find_by_id(appointment_id)
            .await
            .map_err(|e| self.storage_error("lookup", e))?
            .ok_or(ScheduleError::NotFound)
    }

    fn validate_duration(&self, duration_minutes: i64) -> Result<(), ScheduleError> {
        if duration_minutes <= 0 {
            return Err(ScheduleError::Validation(
                "appointment duration must be positive".to_string(),
            ));
        }
        if duration_minutes > self.validation_rules.max_duration_minutes {
            return Err(ScheduleError::Validation(format!(
                "appointment duration cannot exceed {} minutes",
                self.validation_rules.max_duration_minutes
            )));
        }
        Ok(())
    }

    fn validate_notes(&self, notes: Option<&str>) -> Result<(), ScheduleError> {
        if let Some(notes) = notes {
            if notes.len() > self.validation_rules.max_notes_length {
                return Err(ScheduleError::Validation(format!(
                    "notes cannot exceed {} characters",
                    self.validation_rules.max_notes_length
                )));
            }
        }
        Ok(())
    }

    fn storage_error(&self, operation: &str, source: anyhow::Error) -> ScheduleError {
        error!("Storage failure during appointment {}: {:#}", operation, source);
        ScheduleError::Storage
    }
}

fn conflict_error(existing: Appointment) -> ScheduleError {
    ScheduleError::Conflict {
        appointment_id: existing.id,
        patient_id: existing.patient_id,
        start: existing.start_time,
        end: existing.end_time,
    }
}
