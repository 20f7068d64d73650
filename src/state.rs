//! Record saved at standby and restored at startup.

use crate::data_types::{ControlFlags, Emphasis, MuteState, NoiseCancel, StereoMode, Tone};

/// Last known tuner state.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SavedState {
    #[cfg_attr(feature = "serde", serde(rename = "preset"))]
    pub preset_index: usize,
    pub stereo: StereoMode,
    pub mute: MuteState,
    pub emphasis: Emphasis,
    pub tone: Tone,
    pub noise: NoiseCancel,
}

impl SavedState {
    pub fn new(preset_index: usize, flags: ControlFlags) -> Self {
        Self {
            preset_index,
            stereo: flags.stereo,
            mute: flags.mute,
            emphasis: flags.emphasis,
            tone: flags.tone,
            noise: flags.noise,
        }
    }
}

/// Somewhere to flush [`SavedState`] on standby.
pub trait StateStore {
    type Error;

    fn save(&mut self, state: &SavedState) -> Result<(), Self::Error>;
}

impl<T: StateStore + ?Sized> StateStore for &mut T {
    type Error = T::Error;

    fn save(&mut self, state: &SavedState) -> Result<(), Self::Error> {
        (**self).save(state)
    }
}
