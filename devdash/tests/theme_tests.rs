//! Theme persistence against a real settings file

use devdash::theme::{Theme, ThemeContext, ThemeStore};
use tempfile::TempDir;

fn store(dir: &TempDir) -> ThemeStore {
    ThemeStore::new(dir.path().join("devdash").join("settings.json"))
}

#[test]
fn test_no_persisted_value_uses_system_preference() {
    let dir = TempDir::new().unwrap();
    let ctx = ThemeContext::load(Some(store(&dir)), Some(Theme::Dark));
    assert_eq!(ctx.theme(), Theme::Dark);
}

#[test]
fn test_no_persisted_value_and_no_preference_is_light() {
    let dir = TempDir::new().unwrap();
    let ctx = ThemeContext::load(Some(store(&dir)), None);
    assert_eq!(ctx.theme(), Theme::Light);
}

#[test]
fn test_toggle_persists_and_is_returned_on_next_load() {
    let dir = TempDir::new().unwrap();

    let mut ctx = ThemeContext::load(Some(store(&dir)), Some(Theme::Dark));
    assert_eq!(ctx.toggle().unwrap(), Theme::Light);

    let raw = std::fs::read_to_string(store(&dir).path()).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["theme"], "light");

    // Persisted value wins over the system preference
    let reloaded = ThemeContext::load(Some(store(&dir)), Some(Theme::Dark));
    assert_eq!(reloaded.theme(), Theme::Light);
}

#[test]
fn test_corrupt_settings_fall_back() {
    let dir = TempDir::new().unwrap();
    let store = store(&dir);
    std::fs::create_dir_all(store.path().parent().unwrap()).unwrap();
    std::fs::write(store.path(), "{not json").unwrap();

    assert_eq!(store.load(), None);
    let ctx = ThemeContext::load(Some(store), Some(Theme::Dark));
    assert_eq!(ctx.theme(), Theme::Dark);
}

#[test]
fn test_unwritable_store_still_switches_in_memory() {
    let dir = TempDir::new().unwrap();
    // A directory where the file should be makes every write fail
    let path = dir.path().join("settings.json");
    std::fs::create_dir_all(&path).unwrap();

    let mut ctx = ThemeContext::load(Some(ThemeStore::new(&path)), None);
    assert!(ctx.set(Theme::Dark).is_err());
    assert_eq!(ctx.theme(), Theme::Dark);
}
