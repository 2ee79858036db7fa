//! Terminal setup and restoration

use std::io::Write;

use crossterm::{cursor, terminal, ExecutableCommand};
use termenu_core::prelude::*;

/// RAII guard for raw terminal mode.
/// Ensures the terminal is restored on every exit path, panics included.
#[derive(Debug)]
pub struct RawModeGuard {
    was_raw: bool,
}

impl RawModeGuard {
    pub fn new() -> Result<Self> {
        let was_raw = terminal::is_raw_mode_enabled().unwrap_or(false);
        if !was_raw {
            terminal::enable_raw_mode().map_err(|e| Error::terminal(e.to_string()))?;
            debug!("Raw mode enabled");
        }
        Ok(Self { was_raw })
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if !self.was_raw {
            let _ = terminal::disable_raw_mode();
            let _ = std::io::stdout().execute(cursor::Show);
            debug!("Raw mode disabled");
        }
    }
}

/// Leave raw mode and show the cursor, ignoring failures
pub fn restore() {
    let _ = terminal::disable_raw_mode();
    let mut stdout = std::io::stdout();
    let _ = stdout.execute(cursor::Show);
    let _ = stdout.write_all(b"\r\n");
    let _ = stdout.flush();
}

/// Install a panic hook that restores the terminal
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore();
        original_hook(panic_info);
    }));
}
