pub mod models;
pub mod services;

pub use models::{
    ConflictCheck, CreateAppointmentRequest, ScheduleError, UpdateAppointmentRequest,
    ValidationRules,
};
pub use services::{AppointmentLifecycleService, ConflictDetectionService, SchedulingService};
