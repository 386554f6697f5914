use std::{fs, path::PathBuf, time::Duration};

use snake_arcade_adapter_persistence::{
    PersistenceError, Profile, ProfileStore, TomlFileStore, PROFILE_FILE_NAME,
};
use snake_arcade_core::{Collision, Event, GameSummary};
use snake_arcade_system_achievements::Achievements;

fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "snake-arcade-{}-{name}",
        std::process::id()
    ));
    let _ = fs::remove_dir_all(&dir);
    dir
}

#[test]
fn missing_file_loads_default_profile() {
    let dir = scratch_dir("missing");
    let store = TomlFileStore::new(&dir);
    assert_eq!(store.path(), dir.join(PROFILE_FILE_NAME));
    assert_eq!(store.load().expect("load"), Profile::default());
}

#[test]
fn saved_profile_loads_back_unchanged() {
    let dir = scratch_dir("round-trip");
    let mut store = TomlFileStore::new(dir.join("nested"));

    let mut achievements = Achievements::new();
    let summary = GameSummary {
        cause: Collision::Wall,
        score: 1_150,
        new_high_score: true,
        level: 6,
        length: 19,
        foods_eaten: 27,
        special_foods_eaten: 11,
        best_combo: 7,
        duration: Duration::from_secs(210),
    };
    let mut unlocked = Vec::new();
    achievements.handle(&[Event::GameOver { summary }], &mut unlocked);
    assert!(!unlocked.is_empty());

    let profile = Profile::capture(summary.score, &achievements);
    store.save(&profile).expect("save");
    let loaded = store.load().expect("load");

    assert_eq!(loaded, profile);
    assert_eq!(loaded.achievements(), achievements);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn corrupt_file_is_a_parse_error() {
    let dir = scratch_dir("corrupt");
    fs::create_dir_all(&dir).expect("create scratch dir");
    fs::write(dir.join(PROFILE_FILE_NAME), "high_score = \"lots\"\n").expect("write");

    let store = TomlFileStore::new(&dir);
    let error = store.load().expect_err("corrupt profile");
    assert!(matches!(error, PersistenceError::Parse { .. }));
    assert!(error.to_string().contains("malformed"));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn partial_file_fills_missing_fields_with_defaults() {
    let dir = scratch_dir("partial");
    fs::create_dir_all(&dir).expect("create scratch dir");
    fs::write(dir.join(PROFILE_FILE_NAME), "high_score = 77\n").expect("write");

    let profile = TomlFileStore::new(&dir).load().expect("load");
    assert_eq!(profile.high_score, 77);
    assert_eq!(profile.stats.games_played, 0);
    assert!(profile.achievements.is_empty());

    let _ = fs::remove_dir_all(&dir);
}
