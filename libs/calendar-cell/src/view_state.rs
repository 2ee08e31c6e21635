// libs/calendar-cell/src/view_state.rs
use chrono::{DateTime, Duration, Months, NaiveDate, Utc};
use std::collections::HashMap;
use tracing::debug;

use shared_models::appointment::Appointment;

use crate::models::{ViewGranularity, ViewPreferences};
use crate::view_key::{view_key, window_bounds};

/// Session-scoped calendar view: the pivot date the display is centred
/// on, the granularity, the cancelled filter, and a cache of fetched
/// appointment windows keyed by view key. Owned by the session context
/// and handed to consumers explicitly rather than shared as a global.
pub struct CalendarViewState {
    pivot_date: NaiveDate,
    granularity: ViewGranularity,
    show_cancelled: bool,
    window_cache: HashMap<String, Vec<Appointment>>,
}

impl CalendarViewState {
    /// Fresh session state: today, week view, cancellations hidden.
    pub fn new() -> Self {
        Self::with_preferences(ViewPreferences::default())
    }

    /// Session state carrying over persisted preferences. The pivot date
    /// and the cache always start fresh.
    pub fn with_preferences(preferences: ViewPreferences) -> Self {
        Self {
            pivot_date: Utc::now().date_naive(),
            granularity: preferences.granularity,
            show_cancelled: preferences.show_cancelled,
            window_cache: HashMap::new(),
        }
    }

    pub fn pivot_date(&self) -> NaiveDate {
        self.pivot_date
    }

    pub fn granularity(&self) -> &ViewGranularity {
        &self.granularity
    }

    pub fn show_cancelled(&self) -> bool {
        self.show_cancelled
    }

    /// The settings worth persisting across sessions.
    pub fn preferences(&self) -> ViewPreferences {
        ViewPreferences {
            granularity: self.granularity.clone(),
            show_cancelled: self.show_cancelled,
        }
    }

    /// Advance the pivot by one unit of the current granularity. Month
    /// stepping lands on the same day-of-month, clamped when the target
    /// month is shorter.
    pub fn go_to_next(&mut self) {
        self.step(1);
    }

    /// Retreat the pivot by one unit of the current granularity.
    pub fn go_to_previous(&mut self) {
        self.step(-1);
    }

    fn step(&mut self, direction: i64) {
        self.pivot_date = match self.granularity {
            ViewGranularity::Day => self.pivot_date + Duration::days(direction),
            ViewGranularity::Week => self.pivot_date + Duration::weeks(direction),
            ViewGranularity::Month => {
                let months = Months::new(1);
                let stepped = if direction >= 0 {
                    self.pivot_date.checked_add_months(months)
                } else {
                    self.pivot_date.checked_sub_months(months)
                };
                stepped.unwrap_or(self.pivot_date)
            }
        };
        debug!("Calendar pivot moved to {}", self.pivot_date);
    }

    /// Reset the pivot to the current day, whatever the granularity.
    pub fn go_to_today(&mut self) {
        self.pivot_date = Utc::now().date_naive();
    }

    /// Jump the pivot to the given day.
    pub fn set_date(&mut self, date: NaiveDate) {
        self.pivot_date = date;
    }

    /// Change the granularity; the pivot date stays put.
    pub fn set_granularity(&mut self, granularity: ViewGranularity) {
        self.granularity = granularity;
    }

    /// Flip the cancelled filter. Cached windows hold the raw fetched
    /// rows including cancelled ones, so the cache stays valid and
    /// filtering happens at read time.
    pub fn toggle_show_cancelled(&mut self) -> bool {
        self.show_cancelled = !self.show_cancelled;
        self.show_cancelled
    }

    pub fn current_view_key(&self) -> String {
        view_key(self.pivot_date, &self.granularity)
    }

    /// Half-open UTC fetch window for the current pivot and granularity.
    pub fn window_range(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        window_bounds(self.pivot_date, &self.granularity)
    }

    /// Raw cached window. `None` means "never fetched", distinct from a
    /// cached empty window, so callers know when to fetch.
    pub fn get_appointments(&self, key: &str) -> Option<&[Appointment]> {
        self.window_cache.get(key).map(|rows| rows.as_slice())
    }

    /// Cached window filtered for display by the cancelled flag.
    pub fn visible_appointments(&self, key: &str) -> Option<Vec<&Appointment>> {
        self.window_cache.get(key).map(|rows| {
            rows.iter()
                .filter(|a| self.show_cancelled || a.status.occupies_slot())
                .collect()
        })
    }

    /// Store a fetched window snapshot. A newer fetch for the same key
    /// simply overwrites the older one.
    pub fn set_appointments(&mut self, key: impl Into<String>, appointments: Vec<Appointment>) {
        self.window_cache.insert(key.into(), appointments);
    }

    /// Drop every cached window. Must be called after any appointment
    /// mutation so the next read re-fetches fresh data; entries have no
    /// TTL and no partial invalidation.
    pub fn clear_cache(&mut self) {
        if !self.window_cache.is_empty() {
            debug!("Clearing {} cached calendar windows", self.window_cache.len());
        }
        self.window_cache.clear();
    }
}

impl Default for CalendarViewState {
    fn default() -> Self {
        Self::new()
    }
}
