//! Terminal detection utilities.

use std::env;
use std::sync::atomic::{AtomicU8, Ordering};

const AUTO: u8 = 0;
const ALWAYS: u8 = 1;
const NEVER: u8 = 2;

static COLOR_OVERRIDE: AtomicU8 = AtomicU8::new(AUTO);

/// Returns `true` if stdout is connected to a terminal (TTY).
pub fn is_tty() -> bool {
    crossterm::tty::IsTty::is_tty(&std::io::stdout())
}

/// Forces color on (`Some(true)`), off (`Some(false)`), or back to
/// environment detection (`None`) for the rest of the process.
pub fn force_color(choice: Option<bool>) {
    let value = match choice {
        None => AUTO,
        Some(true) => ALWAYS,
        Some(false) => NEVER,
    };
    COLOR_OVERRIDE.store(value, Ordering::Relaxed);
}

/// Determines if ANSI color codes should be used.
///
/// An override set with [`force_color`] wins. Otherwise:
/// - `NO_COLOR` (any value): disables color (<https://no-color.org/>)
/// - `CLICOLOR=0`: disables color
/// - `TERM=dumb`: disables color
/// - `CLICOLOR_FORCE` (any value): forces color even in non-TTY
/// - Falls back to TTY detection
pub fn supports_color() -> bool {
    match COLOR_OVERRIDE.load(Ordering::Relaxed) {
        ALWAYS => return true,
        NEVER => return false,
        _ => {}
    }

    if env::var_os("NO_COLOR").is_some() {
        return false;
    }
    if env::var("CLICOLOR").as_deref() == Ok("0") {
        return false;
    }
    if env::var("TERM").as_deref() == Ok("dumb") {
        return false;
    }
    if env::var_os("CLICOLOR_FORCE").is_some() {
        return true;
    }

    is_tty()
}
