use std::sync::Arc;

use anyhow::anyhow;
use assert_matches::assert_matches;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use mockall::mock;
use uuid::Uuid;

use scheduling_cell::models::{CreateAppointmentRequest, ScheduleError};
use scheduling_cell::services::{ConflictDetectionService, SchedulingService};
use shared_models::appointment::{Appointment, AppointmentStatus, ConsultationType};
use shared_models::auth::{SessionAuth, User};
use shared_store::{AppointmentPatch, AppointmentStore, NewAppointment};

mock! {
    Store {}

    #[async_trait]
    impl AppointmentStore for Store {
        async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<Appointment>>;
        async fn find_overlapping(
            &self,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
            exclude_id: Option<Uuid>,
        ) -> anyhow::Result<Vec<Appointment>>;
        async fn find_in_range(
            &self,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
            include_cancelled: bool,
        ) -> anyhow::Result<Vec<Appointment>>;
        async fn create(&self, new: NewAppointment) -> anyhow::Result<Appointment>;
        async fn update(&self, id: Uuid, patch: AppointmentPatch) -> anyhow::Result<Appointment>;
        async fn delete(&self, id: Uuid) -> anyhow::Result<()>;
    }
}

fn at(hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 27, hour, minute, 0).unwrap()
}

fn appointment(start_hour: u32, end_hour: u32, status: AppointmentStatus) -> Appointment {
    let now = Utc::now();
    Appointment {
        id: Uuid::new_v4(),
        patient_id: Uuid::new_v4(),
        start_time: at(start_hour, 0),
        end_time: at(end_hour, 0),
        status,
        consultation_type: ConsultationType::FollowUp,
        notes: None,
        created_at: now,
        updated_at: now,
    }
}

fn staff() -> User {
    User {
        id: Uuid::new_v4().to_string(),
        email: Some("reception@example.com".to_string()),
        role: Some("staff".to_string()),
        metadata: None,
        created_at: None,
    }
}

#[tokio::test]
async fn earliest_conflicting_appointment_is_reported() {
    let earlier = appointment(9, 11, AppointmentStatus::Pending);
    let later = appointment(10, 12, AppointmentStatus::Confirmed);
    let expected = earlier.id;

    let mut store = MockStore::new();
    store
        .expect_find_overlapping()
        .returning(move |_, _, _| Ok(vec![later.clone(), earlier.clone()]));

    let detector = ConflictDetectionService::new(Arc::new(store));
    let check = detector
        .check_conflict(at(9, 30), at(11, 30), None)
        .await
        .unwrap();

    assert!(check.has_conflict);
    assert_eq!(check.conflicting_appointment.unwrap().id, expected);
}

#[tokio::test]
async fn cancelled_rows_never_conflict() {
    let cancelled = appointment(9, 10, AppointmentStatus::Cancelled);

    let mut store = MockStore::new();
    store
        .expect_find_overlapping()
        .returning(move |_, _, _| Ok(vec![cancelled.clone()]));

    let detector = ConflictDetectionService::new(Arc::new(store));
    let check = detector
        .check_conflict(at(9, 0), at(10, 0), None)
        .await
        .unwrap();

    assert!(!check.has_conflict);
    assert!(check.conflicting_appointment.is_none());
}

#[tokio::test]
async fn excluded_id_is_skipped_even_when_the_store_returns_it() {
    let own = appointment(9, 10, AppointmentStatus::Confirmed);
    let own_id = own.id;

    let mut store = MockStore::new();
    store
        .expect_find_overlapping()
        .returning(move |_, _, _| Ok(vec![own.clone()]));

    let detector = ConflictDetectionService::new(Arc::new(store));
    let check = detector
        .check_conflict(at(9, 15), at(9, 45), Some(own_id))
        .await
        .unwrap();

    assert!(!check.has_conflict);
}

#[tokio::test]
async fn touching_intervals_are_not_conflicts() {
    let neighbour = appointment(9, 10, AppointmentStatus::Confirmed);

    let mut store = MockStore::new();
    store
        .expect_find_overlapping()
        .returning(move |_, _, _| Ok(vec![neighbour.clone()]));

    let detector = ConflictDetectionService::new(Arc::new(store));
    let check = detector
        .check_conflict(at(10, 0), at(11, 0), None)
        .await
        .unwrap();

    assert!(!check.has_conflict);
}

#[tokio::test]
async fn storage_failure_surfaces_as_a_generic_error() {
    let mut store = MockStore::new();
    store
        .expect_find_overlapping()
        .returning(|_, _, _| Err(anyhow!("connection reset by peer")));

    let detector = ConflictDetectionService::new(Arc::new(store));
    let error = detector
        .check_conflict(at(9, 0), at(10, 0), None)
        .await
        .unwrap_err();

    assert_matches!(error, ScheduleError::Storage);
    assert!(!error.to_string().contains("connection reset"));
}

#[tokio::test]
async fn booking_collapses_storage_failures_to_a_generic_error() {
    let mut store = MockStore::new();
    store
        .expect_find_overlapping()
        .returning(|_, _, _| Err(anyhow!("relation appointments does not exist")));

    let service = SchedulingService::new(
        Arc::new(store),
        Arc::new(SessionAuth::authenticated(staff())),
    );

    let request = CreateAppointmentRequest {
        patient_id: Uuid::new_v4(),
        start_time: at(9, 0),
        duration_minutes: 30,
        consultation_type: ConsultationType::InitialConsultation,
        notes: None,
    };
    let error = service.create(request).await.unwrap_err();

    assert_matches!(error, ScheduleError::Storage);
}
