// libs/scheduling-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_config::AppConfig;
use shared_models::appointment::{Appointment, AppointmentStatus, ConsultationType};

// ==============================================================================
// BOOKING REQUEST MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAppointmentRequest {
    pub patient_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub duration_minutes: i64,
    pub consultation_type: ConsultationType,
    pub notes: Option<String>,
}

/// Partial reschedule request. Fields left as `None` keep the current
/// value; the time window is re-validated either way.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAppointmentRequest {
    pub new_start_time: Option<DateTime<Utc>>,
    pub new_duration_minutes: Option<i64>,
    pub consultation_type: Option<ConsultationType>,
    pub notes: Option<String>,
}

// ==============================================================================
// CONFLICT DETECTION MODELS
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConflictCheck {
    pub has_conflict: bool,
    pub conflicting_appointment: Option<Appointment>,
}

// ==============================================================================
// VALIDATION RULES
// ==============================================================================

#[derive(Debug, Clone)]
pub struct ValidationRules {
    pub max_duration_minutes: i64,
    pub max_notes_length: usize,
}

impl ValidationRules {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            max_duration_minutes: config.max_appointment_minutes,
            max_notes_length: config.max_notes_length,
        }
    }
}

impl Default for ValidationRules {
    fn default() -> Self {
        Self {
            max_duration_minutes: 240,
            max_notes_length: 1000,
        }
    }
}

// ==============================================================================
// ERROR TYPES
// ==============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, thiserror::Error)]
pub enum ScheduleError {
    #[error("no authenticated user for this operation")]
    Unauthorized,

    #[error("appointment not found")]
    NotFound,

    #[error("validation error: {0}")]
    Validation(String),

    #[error("the slot from {start} to {end} is already booked for patient {patient_id}")]
    Conflict {
        appointment_id: Uuid,
        patient_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    #[error("appointment status cannot change from {from} to {to}")]
    InvalidStatusTransition {
        from: AppointmentStatus,
        to: AppointmentStatus,
    },

    #[error("storage operation failed")]
    Storage,
}
