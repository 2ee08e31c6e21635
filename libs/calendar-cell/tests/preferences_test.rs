use calendar_cell::models::{ViewGranularity, ViewPreferences};
use calendar_cell::preferences::{JsonFilePreferences, PreferenceStore};

#[test]
fn saved_preferences_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFilePreferences::new(dir.path().join("prefs.json"));

    let preferences = ViewPreferences {
        granularity: ViewGranularity::Day,
        show_cancelled: true,
    };
    store.save(&preferences).unwrap();

    assert_eq!(store.load(), Some(preferences));
}

#[test]
fn missing_file_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFilePreferences::new(dir.path().join("absent.json"));

    assert_eq!(store.load(), None);
}

#[test]
fn corrupt_file_is_discarded() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("prefs.json");
    std::fs::write(&path, "{ not json").unwrap();

    let store = JsonFilePreferences::new(path);

    assert_eq!(store.load(), None);
}
