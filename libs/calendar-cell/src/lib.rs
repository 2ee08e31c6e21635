pub mod models;
pub mod preferences;
pub mod time_grid;
pub mod view_key;
pub mod view_state;

pub use models::{ViewGranularity, ViewPreferences};
pub use preferences::{JsonFilePreferences, PreferenceStore};
pub use time_grid::GridWindow;
pub use view_state::CalendarViewState;
