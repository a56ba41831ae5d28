//! Lather washing machine simulator
//!
//! Interactive mode reads keys from stdin (`a`, `b`, `c`, `q` then Enter)
//! and prints a status line per tick. Headless mode runs one program on a
//! virtual clock as fast as it can and fails if the program ends in error.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::sync::mpsc::{self, TryRecvError};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::Parser;
use lather_core::program::builtin_presets;
use lather_core::time_remaining_sec;
use lather_drivers::Button;
use lather_sim::console::{key_button, status_line, Keypad, LogTunes};
use lather_sim::{
    find_preset, load_presets, menu_selection, App, Clock, MonotonicClock, Selector, UiState,
    VirtualClock,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Main loop period (ms)
const LOOP_MS: u32 = 10;

/// Gap between scripted presses in headless mode (ms)
const SCRIPT_PRESS_MS: u32 = 200;

#[derive(Parser, Debug)]
#[command(author, version, about = "Washing machine controller simulator")]
struct Cli {
    /// Preset catalog (TOML); the built-in presets are used otherwise
    #[arg(long)]
    config: Option<PathBuf>,

    /// Preset to select first
    #[arg(long)]
    preset: Option<String>,

    /// Use the program / level / power menu instead of presets
    #[arg(long)]
    menu: bool,

    /// Menu wash program (Normal, Short, Express)
    #[arg(long)]
    program: Option<String>,

    /// Menu water level (Low, Med, High)
    #[arg(long)]
    level: Option<String>,

    /// Menu agitation power (Normal, Strong)
    #[arg(long)]
    power: Option<String>,

    /// Run the selected program to the end on a virtual clock
    #[arg(long)]
    headless: bool,

    /// Give up after this many controller ticks
    #[arg(long, default_value_t = 1_000_000)]
    max_ticks: u64,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let selector = build_selector(&cli)?;
    info!(choice = %selector.current_label(), "selector ready");

    if cli.headless {
        run_headless(selector, cli.max_ticks)
    } else {
        run_interactive(selector)
    }
}

fn build_selector(cli: &Cli) -> Result<Selector> {
    let wants_menu =
        cli.menu || cli.program.is_some() || cli.level.is_some() || cli.power.is_some();
    if wants_menu {
        let selection = menu_selection(
            cli.program.as_deref(),
            cli.level.as_deref(),
            cli.power.as_deref(),
        );
        return Ok(Selector::menu(selection));
    }

    let presets = match &cli.config {
        Some(path) => load_presets(path)
            .with_context(|| format!("failed to load presets from {}", path.display()))?,
        None => builtin_presets().into_iter().collect(),
    };
    let index = match &cli.preset {
        Some(name) => find_preset(&presets, name)?,
        None => 0,
    };

    Ok(Selector::Presets { presets, index })
}

fn run_interactive(selector: Selector) -> Result<()> {
    println!("Keys: a = A (ok / start / pause), b = B (next), c = C (abort), q = quit");

    let (tx, rx) = mpsc::channel();
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            for key in line.chars() {
                if tx.send(key).is_err() {
                    return;
                }
            }
        }
    });

    let clock = MonotonicClock::new();
    let mut keypad = Keypad::new();
    let mut app = App::new(selector, LogTunes::new());
    let mut stdout = io::stdout();

    loop {
        let now = clock.now_ms();
        loop {
            match rx.try_recv() {
                Ok('q') | Ok('Q') | Err(TryRecvError::Disconnected) => {
                    println!();
                    info!(ticks = app.ticks(), "quit");
                    return Ok(());
                }
                Ok(key) => {
                    if let Some(button) = key_button(key) {
                        keypad.press(button, now);
                    }
                }
                Err(TryRecvError::Empty) => break,
            }
        }

        let before = app.ui_state();
        app.scan_buttons(|button| keypad.is_down(button, now), now);

        if let Some(report) = app.poll(now) {
            print!(
                "\r{}",
                status_line(&report.status, &report.sensors, &report.actuators)
            );
            stdout.flush().context("failed to write status")?;
        }
        if before != app.ui_state() && app.ui_state() == UiState::Sleep {
            println!();
        }

        thread::sleep(Duration::from_millis(u64::from(LOOP_MS)));
    }
}

fn run_headless(selector: Selector, max_ticks: u64) -> Result<()> {
    let clock = VirtualClock::new();
    let mut keypad = Keypad::new();
    let mut app = App::new(selector, LogTunes::new());
    let mut next_press = 0;

    loop {
        let now = clock.now_ms();

        // Keep confirming until a program starts
        if app.ui_state() == UiState::Startup && now >= next_press {
            keypad.press(Button::A, now);
            next_press = now + SCRIPT_PRESS_MS;
        }
        app.scan_buttons(|button| keypad.is_down(button, now), now);

        if let Some(report) = app.poll(now) {
            if report.transition.is_some() {
                println!(
                    "{}",
                    status_line(&report.status, &report.sensors, &report.actuators)
                );
            }
        }

        if app.ui_state() == UiState::Sleep {
            break;
        }
        if app.ticks() >= max_ticks {
            bail!("program still running after {max_ticks} ticks");
        }
        clock.advance(LOOP_MS);
    }

    let Some(ctrl) = app.controller() else {
        bail!("no program was started");
    };
    let label = app.session_label().unwrap_or_default();
    let simulated_sec = clock.now_ms() / 1000;

    if let Some(error) = app.fault() {
        warn!(label, error = %error, "program failed");
        bail!("{label} ended in error: {error}");
    }

    info!(
        label,
        ticks = app.ticks(),
        simulated_sec,
        remaining = time_remaining_sec(ctrl),
        tunes = app.outputs().player().played(),
        "program complete"
    );
    Ok(())
}
