//! Console front-end for a TEA5767 on a Linux I2C bus.
//!
//! Reads single keypresses (raw terminal mode is held only for the duration of one read),
//! writes the tuner after every command and prints the status line. `q` puts the tuner in
//! standby and saves the last state.
//!
//! Bus transfers use the i2c-dev adapter's own timeout; nothing is retried.
//!
//! Run: `cargo run --release --features cli --bin fmtuner -- --bus /dev/i2c-1`
//! Logs: `RUST_LOG=debug` (stderr).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use linux_embedded_hal::I2cdev;

use tea5767_rs::command::{Command, CommandSource, KEY_HELP};
use tea5767_rs::data_types::{Injection, Preset};
use tea5767_rs::error::SessionError;
use tea5767_rs::persist::{DEFAULT_STATE_FILE, PresetEntry, StateFile, load_presets};
use tea5767_rs::{DEFAULT_I2C_ADDRESS, FrequencyTable, Tea5767, TunerController, session};

#[derive(Parser, Debug)]
#[command(name = "fmtuner", version, about = "TEA5767 FM tuner console")]
struct Args {
    /// I2C bus device.
    #[arg(long, default_value = "/dev/i2c-1")]
    bus: PathBuf,

    /// 7-bit device address (decimal or 0x-prefixed hex).
    #[arg(long, value_parser = parse_address, default_value_t = DEFAULT_I2C_ADDRESS)]
    address: u8,

    /// State file read at startup and written on quit.
    #[arg(long, default_value = DEFAULT_STATE_FILE)]
    state: PathBuf,

    /// JSON preset list replacing the built-in stations.
    #[arg(long)]
    presets: Option<PathBuf>,

    /// Local oscillator injection side.
    #[arg(long, value_enum, default_value_t = InjectionArg::High)]
    injection: InjectionArg,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum InjectionArg {
    High,
    Low,
}

impl From<InjectionArg> for Injection {
    fn from(arg: InjectionArg) -> Self {
        match arg {
            InjectionArg::High => Injection::High,
            InjectionArg::Low => Injection::Low,
        }
    }
}

fn parse_address(s: &str) -> Result<u8, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u8::from_str_radix(hex, 16),
        None => s.parse(),
    };
    match parsed {
        Ok(addr) if addr <= 0x7F => Ok(addr),
        Ok(addr) => Err(format!("{:#x} is not a 7-bit address", addr)),
        Err(e) => Err(e.to_string()),
    }
}

/// Keypresses from the controlling terminal.
struct RawKeys;

impl CommandSource for RawKeys {
    type Error = std::io::Error;

    fn next_command(&mut self) -> Result<Option<Command>, Self::Error> {
        terminal::enable_raw_mode()?;
        let event = event::read();
        terminal::disable_raw_mode()?;
        Ok(match event? {
            // Ctrl-C cannot interrupt in raw mode; treat it as quit so standby still runs.
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers,
                kind: KeyEventKind::Press,
                ..
            }) if modifiers.contains(KeyModifiers::CONTROL) => Some(Command::Quit),
            Event::Key(KeyEvent {
                code: KeyCode::Char(c),
                kind: KeyEventKind::Press,
                ..
            }) => Command::from_key(c),
            _ => None,
        })
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let args = Args::parse();

    let entries = match &args.presets {
        Some(path) => load_presets(path)?,
        None => Vec::new(),
    };
    let custom: Vec<Preset<'_>> = entries.iter().map(PresetEntry::as_preset).collect();
    let table = match &args.presets {
        Some(path) => FrequencyTable::new(&custom)
            .with_context(|| format!("invalid presets in {}", path.display()))?,
        None => FrequencyTable::builtin(),
    };

    let i2c = I2cdev::new(&args.bus).with_context(|| format!("opening {}", args.bus.display()))?;
    let mut store = StateFile::new(&args.state);
    let saved = store.load();
    let mut tuner = TunerController::from_saved(Tea5767::with_address(i2c, args.address), table, &saved);
    tuner.set_injection(args.injection.into());
    log::info!(
        "tuner at {:#04x} on {}, {} presets, {:?} injection",
        args.address,
        args.bus.display(),
        tuner.table().len(),
        tuner.injection()
    );

    println!("\nTEA5767 FM Tuner - {} station presets", tuner.table().len());
    println!("{}\n", KEY_HELP);

    match session::run(&mut tuner, &mut RawKeys, &mut store, |line| println!("{}", line)) {
        Ok(()) => {
            println!("\nTEA5767, out!\n");
            Ok(())
        }
        Err(SessionError::Input(e)) => {
            log::error!("input failed: {}; putting tuner in standby", e);
            if let Err(standby) = tuner.enter_standby(&mut store) {
                log::error!("{}", standby);
            }
            Err(e).context("reading keyboard")
        }
        Err(e) => Err(e).context("tuner session failed"),
    }
}
