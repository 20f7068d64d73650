//! In-memory copy of the TEA5767 write and read images.

use crate::data_types::{ControlFlags, Emphasis, Injection, MuteState, NoiseCancel, Status, StereoMode, Tone};
use crate::registers::{
    Control0Bits, Control2Bits, Control3Bits, Control4Bits, IMAGE_LEN, POWER_ON_CONTROL, Status0Bits, Status2Bits,
    Status3Bits, split_pll,
};

/// Control bytes to be written and the last status bytes read.
///
/// The chip has no register addressing, so the image is always transferred whole.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RegisterImage {
    control: [u8; IMAGE_LEN],
    status: [u8; IMAGE_LEN],
}

impl Default for RegisterImage {
    fn default() -> Self {
        Self::new()
    }
}

impl RegisterImage {
    /// Power-on image: high-side injection, 32.768 kHz crystal, everything else clear.
    pub const fn new() -> Self {
        Self {
            control: POWER_ON_CONTROL,
            status: [0; IMAGE_LEN],
        }
    }

    /// Build an image from raw control bytes.
    pub const fn from_control(control: [u8; IMAGE_LEN]) -> Self {
        Self {
            control,
            status: [0; IMAGE_LEN],
        }
    }

    pub fn control(&self) -> &[u8; IMAGE_LEN] {
        &self.control
    }

    pub fn status(&self) -> &[u8; IMAGE_LEN] {
        &self.status
    }

    pub fn set_status(&mut self, status: [u8; IMAGE_LEN]) {
        self.status = status;
    }

    /// Write PLL[13:8] (masked to 6 bits) and PLL[7:0]. Mute and search bits of byte 0 are kept.
    pub fn set_pll_bits(&mut self, msb6: u8, lsb8: u8) {
        let pll = Control0Bits::PLL.bits();
        self.control[0] = (self.control[0] & !pll) | (msb6 & pll);
        self.control[1] = lsb8;
    }

    pub fn set_pll_word(&mut self, word: u16) {
        let (msb, lsb) = split_pll(word);
        self.set_pll_bits(msb, lsb);
    }

    pub fn pll_word(&self) -> u16 {
        (u16::from(self.control[0] & Control0Bits::PLL.bits()) << 8) | u16::from(self.control[1])
    }

    fn is_set(&self, byte: usize, mask: u8) -> bool {
        self.control[byte] & mask != 0
    }

    fn toggle(&mut self, byte: usize, mask: u8) {
        self.control[byte] ^= mask;
    }

    fn set(&mut self, byte: usize, mask: u8) {
        self.control[byte] |= mask;
    }

    pub fn is_muted(&self) -> bool {
        self.is_set(2, Control2Bits::MUTE.bits())
    }

    pub fn toggle_mute(&mut self) {
        self.toggle(2, Control2Bits::MUTE.bits());
    }

    /// Force both channel mutes on (not a toggle).
    pub fn force_mute(&mut self) {
        self.set(2, Control2Bits::MUTE.bits());
    }

    pub fn is_mono(&self) -> bool {
        self.is_set(2, Control2Bits::MS.bits())
    }

    pub fn toggle_mono(&mut self) {
        self.toggle(2, Control2Bits::MS.bits());
    }

    pub fn is_emphasis_off(&self) -> bool {
        self.is_set(4, Control4Bits::DTC.bits())
    }

    pub fn toggle_emphasis(&mut self) {
        self.toggle(4, Control4Bits::DTC.bits());
    }

    pub fn is_noise_cancel_on(&self) -> bool {
        self.is_set(3, Control3Bits::SNC.bits())
    }

    pub fn toggle_noise_cancel(&mut self) {
        self.toggle(3, Control3Bits::SNC.bits());
    }

    pub fn is_tone_clipped(&self) -> bool {
        self.is_set(3, Control3Bits::TONE.bits())
    }

    pub fn toggle_tone(&mut self) {
        self.toggle(3, Control3Bits::TONE.bits());
    }

    pub fn is_standby(&self) -> bool {
        self.is_set(3, Control3Bits::STBY.bits())
    }

    pub fn toggle_standby(&mut self) {
        self.toggle(3, Control3Bits::STBY.bits());
    }

    /// Set the standby bit (not a toggle).
    pub fn force_standby(&mut self) {
        self.set(3, Control3Bits::STBY.bits());
    }

    pub fn injection(&self) -> Injection {
        if self.is_set(2, Control2Bits::HLSI.bits()) {
            Injection::High
        } else {
            Injection::Low
        }
    }

    pub fn set_injection(&mut self, injection: Injection) {
        match injection {
            Injection::High => self.control[2] |= Control2Bits::HLSI.bits(),
            Injection::Low => self.control[2] &= !Control2Bits::HLSI.bits(),
        }
    }

    /// Current flag states as enums.
    pub fn flags(&self) -> ControlFlags {
        ControlFlags {
            stereo: if self.is_mono() { StereoMode::Mono } else { StereoMode::Stereo },
            mute: if self.is_muted() { MuteState::Muted } else { MuteState::Unmuted },
            emphasis: if self.is_emphasis_off() { Emphasis::Off } else { Emphasis::On },
            tone: if self.is_tone_clipped() { Tone::Clipped } else { Tone::Full },
            noise: if self.is_noise_cancel_on() { NoiseCancel::On } else { NoiseCancel::Off },
            standby: self.is_standby(),
        }
    }

    /// Decode the last read image.
    pub fn status_fields(&self) -> Status {
        decode_status(&self.status)
    }
}

/// Decode a 5-byte read image.
pub fn decode_status(raw: &[u8; IMAGE_LEN]) -> Status {
    let b0 = Status0Bits::from_bits_retain(raw[0]);
    let b2 = Status2Bits::from_bits_retain(raw[2]);
    Status {
        ready: b0.contains(Status0Bits::RF),
        band_limit: b0.contains(Status0Bits::BLF),
        pll: (u16::from(raw[0] & Status0Bits::PLL.bits()) << 8) | u16::from(raw[1]),
        stereo: b2.contains(Status2Bits::STEREO),
        if_count: raw[2] & Status2Bits::IF.bits(),
        level: (raw[3] & Status3Bits::LEV.bits()) >> 4,
        chip_id: (raw[3] & Status3Bits::CI.bits()) >> 1,
    }
}
