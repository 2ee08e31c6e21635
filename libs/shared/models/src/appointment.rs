// libs/shared/models/src/appointment.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: AppointmentStatus,
    pub consultation_type: ConsultationType,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Appointment {
    /// Scheduled length in whole minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end_time - self.start_time).num_minutes()
    }

    /// Half-open interval test: `[start_time, end_time)` intersects
    /// `[start, end)`. Back-to-back appointments do not overlap.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start_time < end && start < self.end_time
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    /// Terminal statuses accept no further transitions.
    pub fn is_terminal(&self) -> bool {
        matches!(self, AppointmentStatus::Cancelled | AppointmentStatus::Completed)
    }

    /// A cancelled appointment releases its slot; every other status
    /// keeps the interval booked.
    pub fn occupies_slot(&self) -> bool {
        !matches!(self, AppointmentStatus::Cancelled)
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppointmentStatus::Pending => write!(f, "pending"),
            AppointmentStatus::Confirmed => write!(f, "confirmed"),
            AppointmentStatus::Cancelled => write!(f, "cancelled"),
            AppointmentStatus::Completed => write!(f, "completed"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ConsultationType {
    #[serde(alias = "initial", alias = "new_patient")]
    InitialConsultation,

    #[serde(alias = "followup", alias = "follow_up_consultation")]
    FollowUp,

    #[serde(alias = "checkup", alias = "annual_physical")]
    RoutineCheckup,

    #[serde(alias = "urgent")]
    UrgentCare,

    #[serde(alias = "prescription", alias = "medication_renewal")]
    PrescriptionRenewal,

    #[serde(alias = "telehealth", alias = "remote")]
    Telehealth,
}

impl fmt::Display for ConsultationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConsultationType::InitialConsultation => write!(f, "initial_consultation"),
            ConsultationType::FollowUp => write!(f, "follow_up"),
            ConsultationType::RoutineCheckup => write!(f, "routine_checkup"),
            ConsultationType::UrgentCare => write!(f, "urgent_care"),
            ConsultationType::PrescriptionRenewal => write!(f, "prescription_renewal"),
            ConsultationType::Telehealth => write!(f, "telehealth"),
        }
    }
}
