//! Tuning state machine on top of the TEA5767 transport.
//!
//! The controller owns the register image and is the only thing that mutates it. Every
//! operation here only changes the image; [`TunerController::refresh`] is what moves it to
//! the chip. A failed transfer leaves the image as intended so the next refresh retries the
//! same state (the controller itself never retries).

use core::fmt;

use crate::command::Command;
use crate::data_types::{ControlFlags, Direction, Injection, Preset, Status};
use crate::driver::Tea5767;
use crate::error::{Error, StandbyError};
use crate::image::RegisterImage;
use crate::presets::FrequencyTable;
use crate::registers::{IMAGE_LEN, band_wrap, pll_word};
use crate::state::{SavedState, StateStore};

/// What the control loop should do after a command.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Flow {
    Continue,
    /// Enter standby and stop.
    Quit,
}

/// Preset navigation, manual tuning and flag toggles for one tuner.
pub struct TunerController<'a, I2C> {
    driver: Tea5767<I2C>,
    image: RegisterImage,
    table: FrequencyTable<'a>,
    frequency_hz: u32,
    preset_index: usize,
}

impl<'a, I2C> TunerController<'a, I2C> {
    /// Start on the first preset with the power-on register image.
    pub fn new(driver: Tea5767<I2C>, table: FrequencyTable<'a>) -> Self {
        let mut tuner = Self {
            driver,
            image: RegisterImage::new(),
            table,
            frequency_hz: 0,
            preset_index: 0,
        };
        tuner.retune(tuner.indexed_frequency());
        tuner
    }

    /// Start from a saved record. An index past the end of `table` falls back to the first preset.
    pub fn from_saved(driver: Tea5767<I2C>, table: FrequencyTable<'a>, saved: &SavedState) -> Self {
        let mut tuner = Self::new(driver, table);
        if saved.preset_index < table.len() {
            tuner.preset_index = saved.preset_index;
        } else {
            log::warn!(
                "saved preset {} is out of range (0..{}), using preset 0",
                saved.preset_index,
                table.len()
            );
        }
        tuner.retune(tuner.indexed_frequency());

        let defaults = ControlFlags::default();
        if saved.stereo != defaults.stereo {
            tuner.image.toggle_mono();
        }
        if saved.mute != defaults.mute {
            tuner.image.toggle_mute();
        }
        if saved.emphasis != defaults.emphasis {
            tuner.image.toggle_emphasis();
        }
        if saved.tone != defaults.tone {
            tuner.image.toggle_tone();
        }
        if saved.noise != defaults.noise {
            tuner.image.toggle_noise_cancel();
        }
        tuner
    }

    pub fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    pub fn preset_index(&self) -> usize {
        self.preset_index
    }

    pub fn image(&self) -> &RegisterImage {
        &self.image
    }

    pub fn table(&self) -> &FrequencyTable<'a> {
        &self.table
    }

    pub fn flags(&self) -> ControlFlags {
        self.image.flags()
    }

    pub fn injection(&self) -> Injection {
        self.image.injection()
    }

    /// Preset the tuner sits exactly on, if any.
    pub fn current_preset(&self) -> Option<Preset<'a>> {
        self.table
            .get(self.preset_index)
            .filter(|p| p.frequency_hz == self.frequency_hz)
            .copied()
    }

    /// Release the bus.
    pub fn free(self) -> I2C {
        self.driver.free()
    }

    fn indexed_frequency(&self) -> u32 {
        self.table.frequency(self.preset_index).unwrap_or(self.frequency_hz)
    }

    /// Move the PLL to `hz` (band-wrapped) and keep the preset index next to it.
    fn retune(&mut self, hz: u32) {
        let hz = band_wrap(hz);
        self.frequency_hz = hz;
        self.image.set_pll_word(pll_word(hz, self.image.injection()));
        self.sync_preset_index();
        log::debug!("tuned {} Hz, pll {:#06x}, preset {}", hz, self.image.pll_word(), self.preset_index);
    }

    // Snap onto an adjacent preset only when landing exactly on it.
    fn sync_preset_index(&mut self) {
        let indexed = self.indexed_frequency();
        let index = self.preset_index;
        if self.frequency_hz < indexed {
            if index > 0 && self.table.frequency(index - 1) == Some(self.frequency_hz) {
                self.preset_index = index - 1;
            }
        } else if self.frequency_hz > indexed
            && index + 1 < self.table.len()
            && self.table.frequency(index + 1) == Some(self.frequency_hz)
        {
            self.preset_index = index + 1;
        }
    }

    /// Step to the neighbouring preset, wrapping at both ends, and return its frequency.
    ///
    /// The index only moves when the tuner is already at or past the indexed preset in the
    /// requested direction; otherwise the tuner returns to the indexed preset first.
    pub fn step_preset(&mut self, direction: Direction) -> u32 {
        let indexed = self.indexed_frequency();
        let last = self.table.last_index();
        match direction {
            Direction::Down if self.frequency_hz <= indexed => {
                self.preset_index = if self.preset_index == 0 { last } else { self.preset_index - 1 };
            }
            Direction::Up if self.frequency_hz >= indexed => {
                self.preset_index = if self.preset_index >= last { 0 } else { self.preset_index + 1 };
            }
            _ => {}
        }
        self.retune(self.indexed_frequency());
        self.frequency_hz
    }

    /// Nudge the frequency by `delta_hz`, wrapping at the band edges.
    pub fn tune_manual(&mut self, delta_hz: i32) -> u32 {
        self.retune(self.frequency_hz.saturating_add_signed(delta_hz));
        self.frequency_hz
    }

    /// Tune straight to `hz`. Out-of-band input wraps like manual tuning does.
    pub fn tune_to(&mut self, hz: u32) -> u32 {
        self.retune(hz);
        self.frequency_hz
    }

    pub fn toggle_mute(&mut self) {
        self.image.toggle_mute();
    }

    pub fn toggle_stereo(&mut self) {
        self.image.toggle_mono();
    }

    pub fn toggle_emphasis(&mut self) {
        self.image.toggle_emphasis();
    }

    pub fn toggle_noise_cancel(&mut self) {
        self.image.toggle_noise_cancel();
    }

    pub fn toggle_tone(&mut self) {
        self.image.toggle_tone();
    }

    /// Select the LO injection side. The PLL word is recomputed with the matching formula.
    pub fn set_injection(&mut self, injection: Injection) {
        self.image.set_injection(injection);
        self.retune(self.frequency_hz);
    }

    /// Record to persist for the current state.
    pub fn saved_state(&self) -> SavedState {
        SavedState::new(self.preset_index, self.image.flags())
    }

    /// Apply one command to the image. `Quit` changes nothing; the caller enters standby.
    pub fn apply(&mut self, command: Command) -> Flow {
        match command {
            Command::PresetUp => {
                self.step_preset(Direction::Up);
            }
            Command::PresetDown => {
                self.step_preset(Direction::Down);
            }
            Command::Tune(delta) => {
                self.tune_manual(delta);
            }
            Command::ToggleMute => self.toggle_mute(),
            Command::ToggleStereo => self.toggle_stereo(),
            Command::ToggleEmphasis => self.toggle_emphasis(),
            Command::ToggleNoiseCancel => self.toggle_noise_cancel(),
            Command::ToggleTone => self.toggle_tone(),
            Command::Quit => return Flow::Quit,
        }
        Flow::Continue
    }

    /// One-line summary of the intended state and the last status bytes read.
    ///
    /// Flag words describe the control image, which the chip may not have accepted.
    pub fn render_status(&self) -> StatusLine<'a> {
        StatusLine {
            frequency_hz: self.frequency_hz,
            preset: self.current_preset(),
            flags: self.image.flags(),
            status: *self.image.status(),
        }
    }

    // Snapshot taken before the standby and mute bits are forced, so the record keeps the
    // user's mute setting.
    fn prepare_standby(&mut self) -> SavedState {
        let snapshot = self.saved_state();
        self.image.force_standby();
        self.image.force_mute();
        log::info!("entering standby at {} Hz (preset {})", self.frequency_hz, self.preset_index);
        snapshot
    }
}

impl<'a, I2C> TunerController<'a, I2C>
where
    I2C: embedded_hal::i2c::I2c,
{
    /// Write the control image.
    pub fn write_control(&mut self) -> Result<(), Error<I2C::Error>> {
        self.driver.write_control(self.image.control())
    }

    /// Read the status image into the register image and decode it.
    pub fn read_status(&mut self) -> Result<Status, Error<I2C::Error>> {
        let raw = self.driver.read_status(self.image.control()[0])?;
        self.image.set_status(raw);
        let status = self.image.status_fields();
        log::trace!("status {:02x?}, chip at {} Hz", raw, status.tuned_hz(self.injection()));
        Ok(status)
    }

    /// Exactly one write followed by one read.
    pub fn refresh(&mut self) -> Result<Status, Error<I2C::Error>> {
        self.write_control()?;
        self.read_status()
    }

    /// Save state, then put the chip in standby with audio muted.
    ///
    /// The standby image is written even when `store` fails. A bus failure is reported in
    /// preference to a store failure.
    pub fn enter_standby<S: StateStore>(&mut self, store: &mut S) -> Result<(), StandbyError<I2C::Error, S::Error>> {
        let snapshot = self.prepare_standby();
        let saved = store.save(&snapshot);
        if let Err(e) = self.write_control() {
            if saved.is_err() {
                log::warn!("state was not saved either");
            }
            return Err(StandbyError::Bus(e));
        }
        saved.map_err(StandbyError::Store)
    }
}

#[cfg(feature = "async")]
impl<'a, I2C> TunerController<'a, I2C>
where
    I2C: embedded_hal_async::i2c::I2c,
{
    /// Async version of [`TunerController::refresh`].
    pub async fn refresh_async(&mut self) -> Result<Status, Error<I2C::Error>> {
        self.driver.write_control_async(self.image.control()).await?;
        let raw = self.driver.read_status_async(self.image.control()[0]).await?;
        self.image.set_status(raw);
        let status = self.image.status_fields();
        log::trace!("status {:02x?}, chip at {} Hz", raw, status.tuned_hz(self.injection()));
        Ok(status)
    }

    /// Async version of [`TunerController::enter_standby`].
    pub async fn enter_standby_async<S: StateStore>(
        &mut self,
        store: &mut S,
    ) -> Result<(), StandbyError<I2C::Error, S::Error>> {
        let snapshot = self.prepare_standby();
        let saved = store.save(&snapshot);
        if let Err(e) = self.driver.write_control_async(self.image.control()).await {
            if saved.is_err() {
                log::warn!("state was not saved either");
            }
            return Err(StandbyError::Bus(e));
        }
        saved.map_err(StandbyError::Store)
    }
}

/// Printable status, see [`TunerController::render_status`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StatusLine<'a> {
    pub frequency_hz: u32,
    /// Set when the tuner sits exactly on its indexed preset.
    pub preset: Option<Preset<'a>>,
    pub flags: ControlFlags,
    pub status: [u8; IMAGE_LEN],
}

impl fmt::Display for StatusLine<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} MHz", Mhz(self.frequency_hz))?;
        if let Some(preset) = self.preset {
            write!(f, " - {}", preset.ident)?;
        }
        write!(
            f,
            " {} {} {} {} {} stat:",
            self.flags.mute.as_str(),
            self.flags.stereo.as_str(),
            self.flags.emphasis.as_str(),
            self.flags.noise.as_str(),
            self.flags.tone.as_str()
        )?;
        for byte in self.status {
            write!(f, " {:#x}", byte)?;
        }
        Ok(())
    }
}

/// Hz printed as MHz with trailing zeros trimmed (`90.1`, `88.15`, `100.0`).
struct Mhz(u32);

impl fmt::Display for Mhz {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / 1_000_000;
        let mut frac = self.0 % 1_000_000;
        if frac == 0 {
            return write!(f, "{}.0", whole);
        }
        let mut width = 6;
        while frac % 10 == 0 {
            frac /= 10;
            width -= 1;
        }
        write!(f, "{}.{:0width$}", whole, frac, width = width)
    }
}

#[cfg(test)]
mod tests {
    use super::Mhz;

    #[test]
    fn mhz_trims_trailing_zeros() {
        assert_eq!(Mhz(90_100_000).to_string(), "90.1");
        assert_eq!(Mhz(88_150_000).to_string(), "88.15");
        assert_eq!(Mhz(100_000_000).to_string(), "100.0");
        assert_eq!(Mhz(87_500_001).to_string(), "87.500001");
        assert_eq!(Mhz(98_305_000).to_string(), "98.305");
    }
}
