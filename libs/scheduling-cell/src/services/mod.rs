pub mod conflict;
pub mod lifecycle;
pub mod scheduling;

pub use conflict::ConflictDetectionService;
pub use lifecycle::AppointmentLifecycleService;
pub use scheduling::SchedulingService;
