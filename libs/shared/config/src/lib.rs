use std::env;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// First hour shown on the day grid (inclusive).
    pub clinic_open_hour: u32,
    /// Last hour shown on the day grid (exclusive).
    pub clinic_close_hour: u32,
    pub max_appointment_minutes: i64,
    pub max_notes_length: usize,
    pub preferences_path: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let config = Self {
            clinic_open_hour: parse_env("CLINIC_OPEN_HOUR", 8),
            clinic_close_hour: parse_env("CLINIC_CLOSE_HOUR", 20),
            max_appointment_minutes: parse_env("MAX_APPOINTMENT_MINUTES", 240),
            max_notes_length: parse_env("MAX_NOTES_LENGTH", 1000),
            preferences_path: env::var("CALENDAR_PREFERENCES_PATH")
                .unwrap_or_else(|_| "calendar_prefs.json".to_string()),
        };

        if config.clinic_close_hour <= config.clinic_open_hour {
            warn!(
                "CLINIC_CLOSE_HOUR ({}) must be after CLINIC_OPEN_HOUR ({}), using defaults",
                config.clinic_close_hour, config.clinic_open_hour
            );
            return Self {
                clinic_open_hour: 8,
                clinic_close_hour: 20,
                ..config
            };
        }

        config
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            clinic_open_hour: 8,
            clinic_close_hour: 20,
            max_appointment_minutes: 240,
            max_notes_length: 1000,
            preferences_path: "calendar_prefs.json".to_string(),
        }
    }
}

fn parse_env<T: std::str::FromStr + std::fmt::Display + Copy>(key: &str, default: T) -> T {
    match env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("{} has unparseable value {:?}, using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}
