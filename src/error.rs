//! Error definitions for the TEA5767 driver and tuner.

/// Bus-level failure. Every transaction is single-shot; nothing is retried.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug)]
pub enum Error<I2cError> {
    /// Underlying I2C transaction failed.
    I2c(I2cError),
}

impl<I2cError: core::fmt::Debug> core::fmt::Display for Error<I2cError> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Error::I2c(e) => write!(f, "I2C error: {:?}", e),
        }
    }
}

/// Failure while entering standby. The control image is written even when saving fails.
#[derive(Debug)]
pub enum StandbyError<I2cError, StoreError> {
    /// The standby image could not be written.
    Bus(Error<I2cError>),
    /// State was not saved; the tuner did enter standby.
    Store(StoreError),
}

impl<I2cError: core::fmt::Debug, StoreError: core::fmt::Display> core::fmt::Display
    for StandbyError<I2cError, StoreError>
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            StandbyError::Bus(e) => write!(f, "standby write failed: {}", e),
            StandbyError::Store(e) => write!(f, "saving state failed: {}", e),
        }
    }
}

/// Failure that ends the interactive control loop.
#[derive(Debug)]
pub enum SessionError<I2cError, InputError, StoreError> {
    Bus(Error<I2cError>),
    /// The command source failed.
    Input(InputError),
    Store(StoreError),
}

impl<I2cError, InputError, StoreError> From<StandbyError<I2cError, StoreError>>
    for SessionError<I2cError, InputError, StoreError>
{
    fn from(e: StandbyError<I2cError, StoreError>) -> Self {
        match e {
            StandbyError::Bus(e) => SessionError::Bus(e),
            StandbyError::Store(e) => SessionError::Store(e),
        }
    }
}

impl<I2cError, InputError, StoreError> core::fmt::Display for SessionError<I2cError, InputError, StoreError>
where
    I2cError: core::fmt::Debug,
    InputError: core::fmt::Display,
    StoreError: core::fmt::Display,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            SessionError::Bus(e) => write!(f, "{}", e),
            SessionError::Input(e) => write!(f, "input error: {}", e),
            SessionError::Store(e) => write!(f, "saving state failed: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl<I2cError: core::fmt::Debug> std::error::Error for Error<I2cError> {}

#[cfg(feature = "std")]
impl<I2cError, StoreError> std::error::Error for StandbyError<I2cError, StoreError>
where
    I2cError: core::fmt::Debug,
    StoreError: std::error::Error,
{
}

#[cfg(feature = "std")]
impl<I2cError, InputError, StoreError> std::error::Error for SessionError<I2cError, InputError, StoreError>
where
    I2cError: core::fmt::Debug,
    InputError: std::error::Error,
    StoreError: std::error::Error,
{
}
