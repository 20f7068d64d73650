#![cfg(feature = "std")]

use std::fs;

use tea5767_rs::data_types::{Emphasis, MuteState, NoiseCancel, Preset, StereoMode, Tone};
use tea5767_rs::persist::{PersistError, PresetEntry, StateFile, load_presets};
use tea5767_rs::presets::{FrequencyTable, TableError};
use tea5767_rs::state::{SavedState, StateStore};

#[test]
fn save_then_load_restores_record() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = StateFile::new(dir.path().join("tea5767.json"));
    let state = SavedState {
        preset_index: 7,
        stereo: StereoMode::Mono,
        mute: MuteState::Muted,
        emphasis: Emphasis::Off,
        tone: Tone::Clipped,
        noise: NoiseCancel::On,
    };
    file.save(&state).unwrap();
    assert_eq!(file.load(), state);
}

#[test]
fn file_uses_flag_words() {
    let dir = tempfile::tempdir().unwrap();
    let file = StateFile::new(dir.path().join("state.json"));
    file.write(&SavedState::default()).unwrap();

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(file.path()).unwrap()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "preset": 0,
            "stereo": "stereo-mode",
            "mute": "unmuted",
            "emphasis": "emphasis-on",
            "tone": "tone-full",
            "noise": "noise-cancel-off",
        })
    );
}

#[test]
fn missing_file_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let file = StateFile::new(dir.path().join("absent.json"));
    assert!(matches!(file.read(), Err(PersistError::Io { .. })));
    assert_eq!(file.load(), SavedState::default());
}

#[test]
fn missing_fields_default_individually() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.json");
    fs::write(&path, r#"{"preset": 3, "mute": "muted"}"#).unwrap();

    let state = StateFile::new(&path).load();
    assert_eq!(state.preset_index, 3);
    assert_eq!(state.mute, MuteState::Muted);
    assert_eq!(state.stereo, StereoMode::Stereo);
    assert_eq!(state.noise, NoiseCancel::Off);
}

#[test]
fn garbage_loads_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, "[last state]\npreset = 3\n").unwrap();

    let file = StateFile::new(&path);
    assert!(matches!(file.read(), Err(PersistError::Parse { .. })));
    assert_eq!(file.load(), SavedState::default());
}

#[test]
fn unwritable_path_reports_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let mut file = StateFile::new(dir.path().join("no-such-dir").join("state.json"));
    let err = file.save(&SavedState::default()).unwrap_err();
    assert!(matches!(err, PersistError::Io { .. }));
    assert!(err.to_string().contains("no-such-dir"));
}

#[test]
fn preset_file_builds_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("presets.json");
    fs::write(
        &path,
        r#"[{"ident": "CBC1", "frequency_hz": 88100000}, {"ident": "CJSF", "frequency_hz": 90100000}]"#,
    )
    .unwrap();

    let entries = load_presets(&path).unwrap();
    assert_eq!(
        entries[1],
        PresetEntry {
            ident: "CJSF".into(),
            frequency_hz: 90_100_000
        }
    );
    let presets: Vec<Preset<'_>> = entries.iter().map(PresetEntry::as_preset).collect();
    let table = FrequencyTable::new(&presets).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.get(1).map(|p| p.ident), Some("CJSF"));
}

#[test]
fn unsorted_preset_file_is_rejected_by_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("presets.json");
    fs::write(
        &path,
        r#"[{"ident": "CJSF", "frequency_hz": 90100000}, {"ident": "CBC1", "frequency_hz": 88100000}]"#,
    )
    .unwrap();

    let entries = load_presets(&path).unwrap();
    let presets: Vec<Preset<'_>> = entries.iter().map(PresetEntry::as_preset).collect();
    assert_eq!(
        FrequencyTable::new(&presets).unwrap_err(),
        TableError::Unordered { index: 1 }
    );
}

#[test]
fn encode_failure_is_not_reported_as_malformed_file() {
    let source = serde_json::from_str::<u8>("x").unwrap_err();
    let err = PersistError::Serialize {
        path: "tea5767.json".into(),
        source,
    };
    let message = err.to_string();
    assert!(message.starts_with("cannot encode state for tea5767.json"));
    assert!(!message.contains("malformed"));
}
