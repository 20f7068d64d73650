//! Single-key command surface.

/// Manual tuning step for `+` / `-` (Hz).
pub const MANUAL_STEP_HZ: i32 = 50_000;

/// One user action.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    PresetUp,
    PresetDown,
    /// Retune by this many Hz.
    Tune(i32),
    ToggleMute,
    ToggleStereo,
    ToggleEmphasis,
    ToggleNoiseCancel,
    ToggleTone,
    /// Enter standby and stop.
    Quit,
}

impl Command {
    /// Map a keypress. Anything unrecognized yields `None` and is ignored by the loop.
    pub fn from_key(key: char) -> Option<Self> {
        Some(match key {
            'u' | 'U' => Command::PresetUp,
            'd' | 'D' => Command::PresetDown,
            '+' => Command::Tune(MANUAL_STEP_HZ),
            '-' => Command::Tune(-MANUAL_STEP_HZ),
            'm' | 'M' => Command::ToggleMute,
            's' | 'S' => Command::ToggleStereo,
            'e' | 'E' => Command::ToggleEmphasis,
            'n' | 'N' => Command::ToggleNoiseCancel,
            't' | 'T' => Command::ToggleTone,
            'q' => Command::Quit,
            _ => return None,
        })
    }
}

/// Blocking supplier of user commands.
pub trait CommandSource {
    type Error;

    /// Block until the next input arrives. `Ok(None)` means the input was not a command.
    fn next_command(&mut self) -> Result<Option<Command>, Self::Error>;
}

/// Help text listing the keys.
pub const KEY_HELP: &str = "q = quit | u = up | d = down | + / - = fine tune | s = stereo/mono | m = mute\n\
n = noise-cancel | e = emphasis | t = tone full/clipped";
