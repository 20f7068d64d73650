//! Data types for the TEA5767 driver and tuner state.

/// Local oscillator injection side.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Injection {
    /// LO above the wanted signal (HLSI = 1).
    #[default]
    High,
    /// LO below the wanted signal (HLSI = 0).
    Low,
}

/// Preset stepping direction.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
}

/// Named station frequency.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Preset<'a> {
    pub ident: &'a str,
    pub frequency_hz: u32,
}

impl<'a> Preset<'a> {
    pub const fn new(ident: &'a str, frequency_hz: u32) -> Self {
        Self { ident, frequency_hz }
    }
}

/// Stereo decoder state (MS bit).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum StereoMode {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "stereo-mode"))]
    Stereo,
    #[cfg_attr(feature = "serde", serde(rename = "mono-mode"))]
    Mono,
}

/// Audio mute state (ML/MR bits).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum MuteState {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "unmuted"))]
    Unmuted,
    #[cfg_attr(feature = "serde", serde(rename = "muted"))]
    Muted,
}

/// De-emphasis state (DTC bit; set means "off").
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Emphasis {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "emphasis-on"))]
    On,
    #[cfg_attr(feature = "serde", serde(rename = "emphasis-off"))]
    Off,
}

/// Treble handling.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum Tone {
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "tone-full"))]
    Full,
    #[cfg_attr(feature = "serde", serde(rename = "tone-clipped"))]
    Clipped,
}

/// Stereo noise cancelling (SNC bit).
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum NoiseCancel {
    #[cfg_attr(feature = "serde", serde(rename = "noise-cancel-on"))]
    On,
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "noise-cancel-off"))]
    Off,
}

impl StereoMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            StereoMode::Stereo => "stereo-mode",
            StereoMode::Mono => "mono-mode",
        }
    }
}

impl MuteState {
    pub const fn as_str(self) -> &'static str {
        match self {
            MuteState::Unmuted => "unmuted",
            MuteState::Muted => "muted",
        }
    }
}

impl Emphasis {
    pub const fn as_str(self) -> &'static str {
        match self {
            Emphasis::On => "emphasis-on",
            Emphasis::Off => "emphasis-off",
        }
    }
}

impl Tone {
    pub const fn as_str(self) -> &'static str {
        match self {
            Tone::Full => "tone-full",
            Tone::Clipped => "tone-clipped",
        }
    }
}

impl NoiseCancel {
    pub const fn as_str(self) -> &'static str {
        match self {
            NoiseCancel::On => "noise-cancel-on",
            NoiseCancel::Off => "noise-cancel-off",
        }
    }
}

/// All user-facing control flags at once.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ControlFlags {
    pub stereo: StereoMode,
    pub mute: MuteState,
    pub emphasis: Emphasis,
    pub tone: Tone,
    pub noise: NoiseCancel,
    pub standby: bool,
}

/// Decoded read image.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Status {
    /// A station was found or the band limit reached (RF).
    pub ready: bool,
    /// Band limit reached during search (BLF).
    pub band_limit: bool,
    /// PLL word reported by the chip.
    pub pll: u16,
    /// Stereo pilot detected.
    pub stereo: bool,
    /// IF counter result, 7 bits.
    pub if_count: u8,
    /// ADC signal level, 0-15.
    pub level: u8,
    /// Chip identification, 3 bits.
    pub chip_id: u8,
}

impl Status {
    /// Frequency the chip reports it is tuned to, within one PLL step below the request.
    pub fn tuned_hz(&self, injection: Injection) -> u32 {
        crate::registers::pll_to_frequency(self.pll, injection)
    }
}
