// libs/shared/store/src/memory.rs
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use shared_models::appointment::{Appointment, AppointmentStatus};

use crate::{AppointmentPatch, AppointmentStore, NewAppointment};

/// Reference store backed by process memory. Serves tests and local
/// single-session deployments; a transactional backend is expected to
/// replace it anywhere concurrent writers exist.
pub struct InMemoryAppointmentStore {
    rows: RwLock<Vec<Appointment>>,
}

impl InMemoryAppointmentStore {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl Default for InMemoryAppointmentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AppointmentStore for InMemoryAppointmentStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>> {
        let rows = self.rows.read().await;
        Ok(rows.iter().find(|a| a.id == id).cloned())
    }

    async fn find_overlapping(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        exclude_id: Option<Uuid>,
    ) -> Result<Vec<Appointment>> {
        let rows = self.rows.read().await;
        let mut hits: Vec<Appointment> = rows
            .iter()
            .filter(|a| Some(a.id) != exclude_id)
            .filter(|a| a.overlaps(start, end))
            .cloned()
            .collect();
        hits.sort_by_key(|a| a.start_time);
        Ok(hits)
    }

    async fn find_in_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        include_cancelled: bool,
    ) -> Result<Vec<Appointment>> {
        let rows = self.rows.read().await;
        let mut hits: Vec<Appointment> = rows
            .iter()
            .filter(|a| a.overlaps(start, end))
            .filter(|a| include_cancelled || a.status != AppointmentStatus::Cancelled)
            .cloned()
            .collect();
        hits.sort_by_key(|a| a.start_time);
        Ok(hits)
    }

    async fn create(&self, new: NewAppointment) -> Result<Appointment> {
        let now = Utc::now();
        let appointment = Appointment {
            id: Uuid::new_v4(),
            patient_id: new.patient_id,
            start_time: new.start_time,
            end_time: new.end_time,
            status: new.status,
            consultation_type: new.consultation_type,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        };

        let mut rows = self.rows.write().await;
        rows.push(appointment.clone());
        Ok(appointment)
    }

    async fn update(&self, id: Uuid, patch: AppointmentPatch) -> Result<Appointment> {
        let mut rows = self.rows.write().await;
        let row = rows
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or_else(|| anyhow!("appointment {} not found", id))?;

        if let Some(start_time) = patch.start_time {
            row.start_time = start_time;
        }
        if let Some(end_time) = patch.end_time {
            row.end_time = end_time;
        }
        if let Some(status) = patch.status {
            row.status = status;
        }
        if let Some(consultation_type) = patch.consultation_type {
            row.consultation_type = consultation_type;
        }
        if let Some(notes) = patch.notes {
            row.notes = notes;
        }
        row.updated_at = Utc::now();

        Ok(row.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<()> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|a| a.id != id);
        if rows.len() == before {
            return Err(anyhow!("appointment {} not found", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use shared_models::appointment::ConsultationType;

    fn new_appointment(hour: u32, end_hour: u32) -> NewAppointment {
        NewAppointment {
            patient_id: Uuid::new_v4(),
            start_time: Utc.with_ymd_and_hms(2026, 1, 27, hour, 0, 0).unwrap(),
            end_time: Utc.with_ymd_and_hms(2026, 1, 27, end_hour, 0, 0).unwrap(),
            status: AppointmentStatus::Pending,
            consultation_type: ConsultationType::FollowUp,
            notes: None,
        }
    }

    #[tokio::test]
    async fn create_assigns_id_and_audit_timestamps() {
        let store = InMemoryAppointmentStore::new();
        let created = store.create(new_appointment(9, 10)).await.unwrap();

        assert_eq!(created.created_at, created.updated_at);
        let found = store.find_by_id(created.id).await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn update_refreshes_updated_at_only() {
        let store = InMemoryAppointmentStore::new();
        let created = store.create(new_appointment(9, 10)).await.unwrap();

        let patch = AppointmentPatch {
            status: Some(AppointmentStatus::Confirmed),
            ..Default::default()
        };
        let updated = store.update(created.id, patch).await.unwrap();

        assert_eq!(updated.status, AppointmentStatus::Confirmed);
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);
    }

    #[tokio::test]
    async fn find_overlapping_excludes_requested_id_and_neighbours() {
        let store = InMemoryAppointmentStore::new();
        let first = store.create(new_appointment(9, 10)).await.unwrap();
        store.create(new_appointment(10, 11)).await.unwrap();

        let window_start = Utc.with_ymd_and_hms(2026, 1, 27, 9, 30, 0).unwrap();
        let window_end = Utc.with_ymd_and_hms(2026, 1, 27, 10, 0, 0).unwrap();

        let hits = store
            .find_overlapping(window_start, window_end, None)
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, first.id);

        let hits = store
            .find_overlapping(window_start, window_end, Some(first.id))
            .await
            .unwrap();
        assert!(hits.is_empty());
    }

    #[tokio::test]
    async fn find_in_range_honours_cancelled_flag() {
        let store = InMemoryAppointmentStore::new();
        let victim = store.create(new_appointment(9, 10)).await.unwrap();
        store.create(new_appointment(11, 12)).await.unwrap();

        let patch = AppointmentPatch {
            status: Some(AppointmentStatus::Cancelled),
            ..Default::default()
        };
        store.update(victim.id, patch).await.unwrap();

        let day_start = Utc.with_ymd_and_hms(2026, 1, 27, 0, 0, 0).unwrap();
        let day_end = Utc.with_ymd_and_hms(2026, 1, 28, 0, 0, 0).unwrap();

        let visible = store.find_in_range(day_start, day_end, false).await.unwrap();
        assert_eq!(visible.len(), 1);

        let all = store.find_in_range(day_start, day_end, true).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn delete_missing_row_errors() {
        let store = InMemoryAppointmentStore::new();
        assert!(store.delete(Uuid::new_v4()).await.is_err());
    }
}
