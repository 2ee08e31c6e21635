// libs/calendar-cell/src/time_grid.rs
use chrono::{DateTime, Timelike, Utc};

use shared_config::AppConfig;

/// Fixed display window mapping times of day onto a percentage grid for
/// the renderer. Pure and total: every input produces a value in
/// `[0, 100]`.
#[derive(Debug, Clone)]
pub struct GridWindow {
    open_hour: u32,
    close_hour: u32,
}

impl GridWindow {
    /// An inverted or out-of-range window falls back to the standard
    /// 8 to 20 display.
    pub fn new(open_hour: u32, close_hour: u32) -> Self {
        if open_hour >= close_hour || close_hour > 24 {
            return Self::default();
        }
        Self {
            open_hour,
            close_hour,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.clinic_open_hour, config.clinic_close_hour)
    }

    fn total_minutes(&self) -> f64 {
        ((self.close_hour - self.open_hour) * 60) as f64
    }

    /// Vertical offset of a time within the display window as a
    /// percentage. Times before opening map to 0, times at or past
    /// closing map to 100.
    pub fn top_percent(&self, time: DateTime<Utc>) -> f64 {
        let minutes_from_open =
            (time.hour() as f64 - self.open_hour as f64) * 60.0 + time.minute() as f64;
        (minutes_from_open / self.total_minutes() * 100.0).clamp(0.0, 100.0)
    }

    /// Rendered height of a duration as a percentage of the display
    /// window. Durations longer than the window are capped visually, not
    /// rejected.
    pub fn height_percent(&self, duration_minutes: i64) -> f64 {
        (duration_minutes.max(0) as f64 / self.total_minutes() * 100.0).clamp(0.0, 100.0)
    }
}

impl Default for GridWindow {
    fn default() -> Self {
        Self {
            open_hour: 8,
            close_hour: 20,
        }
    }
}

/// Whole minutes between two instants, rounded to the nearest minute and
/// floored at zero. A span of 30 minutes 30 seconds rounds to 31.
pub fn duration_minutes(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
    let millis = (end - start).num_milliseconds();
    if millis <= 0 {
        return 0;
    }
    (millis as f64 / 60_000.0).round() as i64
}
