//! Loading, initialising and saving `.termenu/config.toml`

use std::path::Path;

use termenu_core::prelude::*;

use super::types::Settings;

pub const TERMENU_DIR: &str = ".termenu";
pub const CONFIG_FILENAME: &str = "config.toml";

// ─────────────────────────────────────────────────────────────────────────────
// Settings Loading
// ─────────────────────────────────────────────────────────────────────────────

/// Load settings from `<dir>/.termenu/config.toml`
///
/// Returns default settings if the file doesn't exist or can't be parsed.
pub fn load_settings(dir: &Path) -> Settings {
    let config_path = dir.join(TERMENU_DIR).join(CONFIG_FILENAME);

    if !config_path.exists() {
        debug!("No config file at {:?}, using defaults", config_path);
        return Settings::default();
    }

    match load_settings_file(&config_path) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("Failed to load {:?}: {}", config_path, e);
            Settings::default()
        }
    }
}

/// Load settings from an explicit file, reporting every failure
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {:?}", path))?;
    let settings: Settings = toml::from_str(&content)
        .with_context(|| format!("Failed to parse settings file {:?}", path))?;
    debug!("Loaded settings from {:?}", path);
    Ok(settings)
}

/// Create `.termenu/config.toml` with commented defaults if it is missing
pub fn init_config_dir(dir: &Path) -> Result<()> {
    let termenu_dir = dir.join(TERMENU_DIR);

    if !termenu_dir.exists() {
        std::fs::create_dir_all(&termenu_dir)
            .map_err(|e| Error::config(format!("Failed to create .termenu dir: {}", e)))?;
    }

    let config_path = termenu_dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        std::fs::write(&config_path, generate_default_config())
            .map_err(|e| Error::config(format!("Failed to write config.toml: {}", e)))?;
        info!("Created {:?}", config_path);
    }

    Ok(())
}

fn generate_default_config() -> String {
    r#"# termenu configuration

[keys]
# Key names: Up, Down, Left, Right, Enter, Esc, Tab, BackTab, Backspace,
# Delete, Home, End, PageUp, PageDown, Space, F1-F12, Ctrl+<c>, or any
# single character
escape = ["Esc"]
up = ["Up"]
down = ["Down"]
left = ["Left"]
right = ["Right"]
enter = ["Enter"]

[scroll]
max_visible = -1        # Negative = show every item
up_margin = 1
down_margin = 1
# top_continued = "  ^"
# top_ended = ""
# bottom_continued = "  v"
# bottom_ended = ""

[cursor]
selected_left = "> "
selected_right = ""
unselected_left = "  "
unselected_right = ""

[display]
# clear_text = ""       # Unset = clear the screen before each frame
escape_codes = true
allow_escape = true
"#
    .to_string()
}
