//! Register layout and PLL math for the TEA5767.
//! Bit positions are copied from the datasheet; both transfer directions move all 5 bytes.

use crate::data_types::Injection;

/// Fixed 7-bit I2C address of the TEA5767.
pub const DEFAULT_I2C_ADDRESS: u8 = 0x60;

/// Number of bytes in either transfer direction.
pub const IMAGE_LEN: usize = 5;

/// Intermediate frequency of the receiver (Hz).
pub const IF_HZ: u32 = 225_000;
/// Reference crystal (Hz). The XTAL bit in byte 3 selects this clock.
pub const REF_HZ: u32 = 32_768;
/// Frequency covered by one PLL count (`REF_HZ / 4`).
pub const PLL_STEP_HZ: u32 = REF_HZ / 4;

/// FM band limits (US/Europe band, Hz).
pub const BAND_MIN_HZ: u32 = 87_500_000;
pub const BAND_MAX_HZ: u32 = 107_900_000;

/// The PLL divider is 14 bits wide.
pub const PLL_MASK: u16 = 0x3FFF;

/// Control image after power-on: high-side injection and the 32.768 kHz crystal selected.
pub const POWER_ON_CONTROL: [u8; IMAGE_LEN] = [
    0x00,
    0x00,
    Control2Bits::HLSI.bits(),
    Control3Bits::XTAL.bits(),
    0x00,
];

bitflags::bitflags! {
    /// Write byte 0: mute, search mode, PLL[13:8].
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Control0Bits: u8 {
        /// Bit 7: mute both channels (not used; the per-channel bits in byte 2 are).
        const MUTE = 1 << 7;
        /// Bit 6: search mode.
        const SM   = 1 << 6;
        /// Bits 5-0: PLL[13:8].
        const PLL  = 0x3F;
    }

    /// Write byte 2: search direction, stop level, injection, stereo, per-channel mute, port 1.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Control2Bits: u8 {
        const SUD  = 1 << 7;
        const SSL1 = 1 << 6;
        const SSL0 = 1 << 5;
        /// Bit 4: high side LO injection.
        const HLSI = 1 << 4;
        /// Bit 3: forced mono.
        const MS   = 1 << 3;
        const MR   = 1 << 2;
        const ML   = 1 << 1;
        const SWP1 = 1 << 0;
        /// Both channel mutes; toggled together.
        const MUTE = Self::MR.bits() | Self::ML.bits();
    }

    /// Write byte 3: port 2, standby, band limits, crystal, soft mute, high cut, noise cancel, SW port flag.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Control3Bits: u8 {
        const SWP2 = 1 << 7;
        /// Bit 6: standby.
        const STBY = 1 << 6;
        /// Bit 5: Japanese band limits.
        const BL   = 1 << 5;
        /// Bit 4: 32.768 kHz clock.
        const XTAL = 1 << 4;
        /// Bit 3: soft mute.
        const SMUTE = 1 << 3;
        /// Bit 2: high cut control.
        const HCC  = 1 << 2;
        /// Bit 1: stereo noise cancelling.
        const SNC  = 1 << 1;
        const SI   = 1 << 0;
        /// Tone clip switch. Deployed units drive bit 3 (soft mute) for it, not HCC.
        const TONE = Self::SMUTE.bits();
    }

    /// Write byte 4: PLL reference, de-emphasis time constant, bits 5-0 unused.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Control4Bits: u8 {
        /// Bit 7: 6.5 MHz PLL reference. Must stay clear with the 32.768 kHz crystal.
        const PLLREF = 1 << 7;
        /// Bit 6: 75 us de-emphasis. Reported as "emphasis off".
        const DTC    = 1 << 6;
    }

    /// Read byte 0: ready flag, band limit flag, PLL[13:8].
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Status0Bits: u8 {
        const RF  = 1 << 7;
        const BLF = 1 << 6;
        const PLL = 0x3F;
    }

    /// Read byte 2: stereo indicator, IF counter.
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Status2Bits: u8 {
        const STEREO = 1 << 7;
        const IF     = 0x7F;
    }

    /// Read byte 3: ADC level[3:0], chip id[3:1].
    #[derive(Clone, Copy, Debug, Eq, PartialEq)]
    pub struct Status3Bits: u8 {
        const LEV = 0xF0;
        const CI  = 0x0E;
    }
}

/// Keep a frequency inside the FM band. Out-of-band values wrap to the opposite edge.
pub fn band_wrap(hz: u32) -> u32 {
    if hz < BAND_MIN_HZ {
        BAND_MAX_HZ
    } else if hz > BAND_MAX_HZ {
        BAND_MIN_HZ
    } else {
        hz
    }
}

/// Compute the 14-bit PLL divider for `hz` with the given LO injection side.
pub fn pll_word(hz: u32, injection: Injection) -> u16 {
    let hz = band_wrap(hz);
    let lo = match injection {
        Injection::High => hz + IF_HZ,
        Injection::Low => hz - IF_HZ,
    };
    ((4 * lo / REF_HZ) as u16) & PLL_MASK
}

/// High-side PLL word split into PLL[13:8] and PLL[7:0].
pub fn to_pll_bytes(hz: u32) -> (u8, u8) {
    split_pll(pll_word(hz, Injection::High))
}

/// Split a PLL word into its 6-bit high and 8-bit low parts.
pub fn split_pll(word: u16) -> (u8, u8) {
    let word = word & PLL_MASK;
    ((word >> 8) as u8 & Control0Bits::PLL.bits(), word as u8)
}

/// Recover the tuned frequency from a PLL word.
pub fn pll_to_frequency(word: u16, injection: Injection) -> u32 {
    let lo = u32::from(word & PLL_MASK) * PLL_STEP_HZ;
    match injection {
        Injection::High => lo.saturating_sub(IF_HZ),
        Injection::Low => lo + IF_HZ,
    }
}
