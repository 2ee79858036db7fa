//! Configuration file parsing for termenu
//!
//! Supports `.termenu/config.toml` with four sections:
//! - `[keys]` - physical keys for the six menu actions
//! - `[scroll]` - window size, margins and indicator lines
//! - `[cursor]` - selected/unselected cursor glyphs
//! - `[display]` - clear text, escape handling, escaping permission

pub mod settings;
pub mod types;

pub use settings::{
    init_config_dir, load_settings, load_settings_file, CONFIG_FILENAME, TERMENU_DIR,
};
pub use types::*;
