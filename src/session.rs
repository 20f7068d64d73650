//! Interactive control loop.

use crate::command::CommandSource;
use crate::error::SessionError;
use crate::state::StateStore;
use crate::tuner::{Flow, StatusLine, TunerController};

/// Drive the tuner from `commands` until quit.
///
/// Each pass writes the control image, reads the status back, hands the status line to `show`
/// and blocks for the next command. Input that is not a command is skipped without touching
/// the bus. On quit the tuner enters standby, which also flushes state to `store`.
pub fn run<I2C, C, S, F>(
    tuner: &mut TunerController<'_, I2C>,
    commands: &mut C,
    store: &mut S,
    mut show: F,
) -> Result<(), SessionError<I2C::Error, C::Error, S::Error>>
where
    I2C: embedded_hal::i2c::I2c,
    C: CommandSource,
    S: StateStore,
    F: FnMut(&StatusLine<'_>),
{
    loop {
        tuner.refresh().map_err(SessionError::Bus)?;
        show(&tuner.render_status());

        let command = loop {
            if let Some(command) = commands.next_command().map_err(SessionError::Input)? {
                break command;
            }
        };
        log::trace!("command {:?}", command);

        if tuner.apply(command) == Flow::Quit {
            tuner.enter_standby(store)?;
            return Ok(());
        }
    }
}
