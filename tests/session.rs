use std::collections::VecDeque;

use embedded_hal::i2c::ErrorKind;
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTrans};
use tea5767_rs::command::{Command, CommandSource};
use tea5767_rs::data_types::MuteState;
use tea5767_rs::driver::Tea5767;
use tea5767_rs::error::SessionError;
use tea5767_rs::presets::FrequencyTable;
use tea5767_rs::session;
use tea5767_rs::state::{SavedState, StateStore};
use tea5767_rs::tuner::TunerController;

/// Keys typed in advance.
struct Script(VecDeque<char>);

impl Script {
    fn new(keys: &str) -> Self {
        Self(keys.chars().collect())
    }
}

impl CommandSource for Script {
    type Error = &'static str;

    fn next_command(&mut self) -> Result<Option<Command>, Self::Error> {
        let key = self.0.pop_front().ok_or("script exhausted")?;
        Ok(Command::from_key(key))
    }
}

#[derive(Default)]
struct MemoryStore(Vec<SavedState>);

impl StateStore for MemoryStore {
    type Error = &'static str;

    fn save(&mut self, state: &SavedState) -> Result<(), Self::Error> {
        self.0.push(*state);
        Ok(())
    }
}

const STATUS: [u8; 5] = [0xAA, 0x1D, 0xB1, 0x7C, 0x00];

#[test]
fn preset_up_then_quit() {
    let expectations = [
        // 88.1 MHz
        I2cTrans::write(0x60, vec![0x2A, 0x1D, 0x10, 0x10, 0x00]),
        I2cTrans::write_read(0x60, vec![0x2A], STATUS.to_vec()),
        // 'x' is ignored without bus traffic, 'u' moves to 90.1 MHz
        I2cTrans::write(0x60, vec![0x2B, 0x12, 0x10, 0x10, 0x00]),
        I2cTrans::write_read(0x60, vec![0x2B], STATUS.to_vec()),
        // 'q': standby + mute
        I2cTrans::write(0x60, vec![0x2B, 0x12, 0x16, 0x50, 0x00]),
    ];
    let mut tuner = TunerController::new(Tea5767::new(I2cMock::new(&expectations)), FrequencyTable::builtin());
    let mut keys = Script::new("xuq");
    let mut store = MemoryStore::default();
    let mut lines = Vec::new();

    session::run(&mut tuner, &mut keys, &mut store, |line| lines.push(line.to_string())).unwrap();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("88.1 MHz - CBC1 "));
    assert!(lines[1].starts_with("90.1 MHz - CJSF "));
    assert_eq!(store.0.len(), 1);
    assert_eq!(store.0[0].preset_index, 1);
    assert_eq!(store.0[0].mute, MuteState::Unmuted);
    tuner.free().done();
}

#[test]
fn toggles_take_effect_on_next_write() {
    let expectations = [
        I2cTrans::write(0x60, vec![0x2A, 0x1D, 0x10, 0x10, 0x00]),
        I2cTrans::write_read(0x60, vec![0x2A], STATUS.to_vec()),
        // 'm' mutes
        I2cTrans::write(0x60, vec![0x2A, 0x1D, 0x16, 0x10, 0x00]),
        I2cTrans::write_read(0x60, vec![0x2A], STATUS.to_vec()),
        // '+' tunes 88.15 MHz -> PLL 10787 (0x2A23)
        I2cTrans::write(0x60, vec![0x2A, 0x23, 0x16, 0x10, 0x00]),
        I2cTrans::write_read(0x60, vec![0x2A], STATUS.to_vec()),
        I2cTrans::write(0x60, vec![0x2A, 0x23, 0x16, 0x50, 0x00]),
    ];
    let mut tuner = TunerController::new(Tea5767::new(I2cMock::new(&expectations)), FrequencyTable::builtin());
    let mut store = MemoryStore::default();

    session::run(&mut tuner, &mut Script::new("m+q"), &mut store, |_| {}).unwrap();

    assert_eq!(store.0[0].mute, MuteState::Muted);
    assert_eq!(tuner.frequency_hz(), 88_150_000);
    tuner.free().done();
}

#[test]
fn bus_failure_ends_session_without_saving() {
    let expectations = [I2cTrans::write(0x60, vec![0x2A, 0x1D, 0x10, 0x10, 0x00]).with_error(ErrorKind::Other)];
    let mut tuner = TunerController::new(Tea5767::new(I2cMock::new(&expectations)), FrequencyTable::builtin());
    let mut store = MemoryStore::default();
    let mut shown = 0;

    let err = session::run(&mut tuner, &mut Script::new("q"), &mut store, |_| shown += 1).unwrap_err();

    assert!(matches!(err, SessionError::Bus(_)));
    assert_eq!(shown, 0);
    assert!(store.0.is_empty());
    tuner.free().done();
}

#[test]
fn input_failure_is_reported() {
    let expectations = [
        I2cTrans::write(0x60, vec![0x2A, 0x1D, 0x10, 0x10, 0x00]),
        I2cTrans::write_read(0x60, vec![0x2A], STATUS.to_vec()),
    ];
    let mut tuner = TunerController::new(Tea5767::new(I2cMock::new(&expectations)), FrequencyTable::builtin());
    let mut store = MemoryStore::default();

    let err = session::run(&mut tuner, &mut Script::new(""), &mut store, |_| {}).unwrap_err();

    assert!(matches!(err, SessionError::Input("script exhausted")));
    assert!(store.0.is_empty());
    tuner.free().done();
}
