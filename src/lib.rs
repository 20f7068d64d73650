//! TEA5767 FM tuner driver
//!
//! `no_std` register layer and tuning state machine for the NXP TEA5767 over `embedded-hal`
//! I2C, with optional async transport, defmt support, and a `std` persistence layer used by
//! the `fmtuner` console binary.

#![cfg_attr(not(any(test, feature = "std")), no_std)]

pub mod command;
pub mod data_types;
pub mod driver;
pub mod error;
pub mod image;
#[cfg(feature = "std")]
pub mod persist;
pub mod presets;
pub mod registers;
pub mod session;
pub mod state;
pub mod tuner;

pub use driver::Tea5767;
pub use error::Error;
pub use presets::FrequencyTable;
pub use registers::DEFAULT_I2C_ADDRESS;
pub use tuner::TunerController;
