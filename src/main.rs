//! termenu - keyboard-driven menus for plain text terminals
//!
//! This is the binary entry point. It runs a demo settings menu on the
//! current terminal; all menu logic lives in the workspace crates.

mod demo;

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use termenu_engine::config::{
    init_config_dir, load_settings, load_settings_file, CONFIG_FILENAME, TERMENU_DIR,
};
use termenu_tui::{install_panic_hook, CrosstermPort, RawModeGuard};

use crate::demo::Outcome;

/// termenu - keyboard-driven menus for plain text terminals
#[derive(Parser, Debug)]
#[command(name = "termenu")]
#[command(about = "Keyboard-driven menus for plain text terminals", long_about = None)]
struct Args {
    /// Settings file [default: .termenu/config.toml in the current directory]
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Show at most N items at once; negative for no limit
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    max_visible: Option<i64>,

    /// Ignore the escape key instead of leaving the menu
    #[arg(long)]
    no_escape: bool,

    /// Write a log file to the termenu log directory
    #[arg(long)]
    log: bool,

    /// Create .termenu/config.toml with commented defaults and exit
    #[arg(long)]
    init_config: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    if args.log {
        termenu_core::logging::init().wrap_err("failed to initialise logging")?;
    }

    if args.init_config {
        let cwd = std::env::current_dir()?;
        init_config_dir(&cwd).wrap_err("failed to create the config file")?;
        println!(
            "Settings file: {}",
            cwd.join(TERMENU_DIR).join(CONFIG_FILENAME).display()
        );
        return Ok(());
    }

    let mut settings = match &args.config {
        Some(path) => load_settings_file(path)
            .wrap_err_with(|| format!("failed to load settings from {}", path.display()))?,
        None => load_settings(&std::env::current_dir()?),
    };
    if let Some(max_visible) = args.max_visible {
        settings.scroll.max_visible = max_visible;
    }
    if args.no_escape {
        settings.display.allow_escape = false;
    }

    install_panic_hook();
    let mut demo = demo::build(&settings);
    let outcome = {
        let _guard = RawModeGuard::new()?;
        let mut port = CrosstermPort::stdout();
        demo.menu.run(&mut port)
    }?;

    println!();
    match outcome {
        Some(Outcome::Save) => println!("Saved:"),
        Some(Outcome::Discard) => println!("Discarded:"),
        None => println!("Left without choosing:"),
    }
    for line in demo.report() {
        println!("  {}", line);
    }
    Ok(())
}
