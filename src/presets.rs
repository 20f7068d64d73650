//! Station preset table.

use crate::data_types::Preset;
use crate::registers::{BAND_MAX_HZ, BAND_MIN_HZ};

/// Built-in presets (Vancouver area).
pub static DEFAULT_STATIONS: [Preset<'static>; 19] = [
    Preset::new("CBC1", 88_100_000),
    Preset::new("CJSF", 90_100_000),
    Preset::new("KISM", 92_900_000),
    Preset::new("CFBT", 94_500_000),
    Preset::new("CKZZ", 95_300_000),
    Preset::new("CHKG", 96_100_000),
    Preset::new("CJAX", 96_900_000),
    Preset::new("CIRH", 98_300_000),
    Preset::new("CFOX", 99_300_000),
    Preset::new("CKKQ", 100_300_000),
    Preset::new("CFRO", 100_500_000),
    Preset::new("CFMI", 101_100_000),
    Preset::new("CHLY", 101_700_000),
    Preset::new("CITR", 101_900_000),
    Preset::new("CKPK", 102_700_000),
    Preset::new("CHQM", 103_500_000),
    Preset::new("CHLG", 104_300_000),
    Preset::new("CKKS", 104_900_000),
    Preset::new("CBC2", 105_700_000),
];

/// Reasons a preset list cannot be used.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TableError {
    /// No presets at all.
    Empty,
    /// Entry `index` is not above its predecessor.
    Unordered { index: usize },
    /// Entry `index` lies outside the FM band.
    OutOfBand { index: usize },
}

impl core::fmt::Display for TableError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            TableError::Empty => write!(f, "preset table is empty"),
            TableError::Unordered { index } => write!(f, "preset {} is not above the previous one", index),
            TableError::OutOfBand { index } => write!(f, "preset {} is outside the FM band", index),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TableError {}

/// Non-empty, strictly ascending list of in-band presets.
#[derive(Clone, Copy, Debug)]
pub struct FrequencyTable<'a> {
    presets: &'a [Preset<'a>],
}

impl<'a> FrequencyTable<'a> {
    pub fn new(presets: &'a [Preset<'a>]) -> Result<Self, TableError> {
        if presets.is_empty() {
            return Err(TableError::Empty);
        }
        for (index, preset) in presets.iter().enumerate() {
            if !(BAND_MIN_HZ..=BAND_MAX_HZ).contains(&preset.frequency_hz) {
                return Err(TableError::OutOfBand { index });
            }
            if index > 0 && presets[index - 1].frequency_hz >= preset.frequency_hz {
                return Err(TableError::Unordered { index });
            }
        }
        Ok(Self { presets })
    }

    /// Table over [`DEFAULT_STATIONS`].
    pub fn builtin() -> FrequencyTable<'static> {
        FrequencyTable {
            presets: &DEFAULT_STATIONS,
        }
    }

    pub fn len(&self) -> usize {
        self.presets.len()
    }

    /// Always false; kept for the `len`/`is_empty` pair.
    pub fn is_empty(&self) -> bool {
        self.presets.is_empty()
    }

    pub fn last_index(&self) -> usize {
        self.presets.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&Preset<'a>> {
        self.presets.get(index)
    }

    pub fn frequency(&self, index: usize) -> Option<u32> {
        self.get(index).map(|p| p.frequency_hz)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Preset<'a>> {
        self.presets.iter()
    }

    /// Index of the preset tuned to exactly `hz`.
    pub fn position(&self, hz: u32) -> Option<usize> {
        self.presets.binary_search_by_key(&hz, |p| p.frequency_hz).ok()
    }
}
