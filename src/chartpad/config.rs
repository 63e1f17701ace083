use crate::error::{ChartpadError, Result};
use crate::notify::CmdMessage;
use crate::sizing::CssSize;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Overrides the config directory.
pub const HOME_ENV: &str = "CHARTPAD_HOME";

pub const KEYS: [&str; 6] = [
    "root",
    "default_division",
    "input_min_width",
    "input_max_width",
    "textarea_max_height",
    "osc52_fallback",
];

/// Configuration for chartpad, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChartpadConfig {
    /// Directory holding `divisions.json` and `templates/`. Defaults to the working
    /// directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,

    /// Folder selected when none is given on the command line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_division: Option<String>,

    #[serde(default = "default_input_min_width")]
    pub input_min_width: String,

    #[serde(default = "default_input_max_width")]
    pub input_max_width: String,

    #[serde(default = "default_textarea_max_height")]
    pub textarea_max_height: String,

    /// Fall back to an OSC 52 terminal escape when no clipboard tool works.
    #[serde(default = "default_osc52_fallback")]
    pub osc52_fallback: bool,
}

fn default_input_min_width() -> String {
    "8".to_string()
}

fn default_input_max_width() -> String {
    "100%".to_string()
}

fn default_textarea_max_height() -> String {
    "12".to_string()
}

fn default_osc52_fallback() -> bool {
    true
}

impl Default for ChartpadConfig {
    fn default() -> Self {
        Self {
            root: None,
            default_division: None,
            input_min_width: default_input_min_width(),
            input_max_width: default_input_max_width(),
            textarea_max_height: default_textarea_max_height(),
            osc52_fallback: default_osc52_fallback(),
        }
    }
}

impl ChartpadConfig {
    /// `CHARTPAD_HOME` if set, otherwise the platform config directory.
    pub fn dir() -> Result<PathBuf> {
        if let Some(home) = std::env::var_os(HOME_ENV) {
            return Ok(PathBuf::from(home));
        }
        ProjectDirs::from("com", "chartpad", "chartpad")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .ok_or_else(|| ChartpadError::Config("Could not determine config dir".to_string()))
    }

    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)?;
        let config: ChartpadConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(config_dir.join(CONFIG_FILENAME), content)?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "root" => Some(
                self.root
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            ),
            "default_division" => Some(self.default_division.clone().unwrap_or_default()),
            "input_min_width" => Some(self.input_min_width.clone()),
            "input_max_width" => Some(self.input_max_width.clone()),
            "textarea_max_height" => Some(self.textarea_max_height.clone()),
            "osc52_fallback" => Some(self.osc52_fallback.to_string()),
            _ => None,
        }
    }

    /// Sets a key from its text form. An empty value clears optional keys.
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "root" => {
                self.root = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            "default_division" => {
                self.default_division = (!value.is_empty()).then(|| value.to_string());
            }
            "input_min_width" | "input_max_width" | "textarea_max_height" => {
                value
                    .parse::<CssSize>()
                    .map_err(|e| format!("{} for {}", e, key))?;
                let slot = match key {
                    "input_min_width" => &mut self.input_min_width,
                    "input_max_width" => &mut self.input_max_width,
                    _ => &mut self.textarea_max_height,
                };
                *slot = value.to_string();
            }
            "osc52_fallback" => {
                self.osc52_fallback = match value {
                    "true" | "yes" | "on" | "1" => true,
                    "false" | "no" | "off" | "0" => false,
                    other => return Err(format!("Expected true or false, got {}", other)),
                };
            }
            _ => return Err(format!("Unknown config key: {}", key)),
        }
        Ok(())
    }

    pub fn input_min_width(&self) -> CssSize {
        parse_or(&self.input_min_width, CssSize::Auto)
    }

    pub fn input_max_width(&self) -> CssSize {
        parse_or(&self.input_max_width, CssSize::Unbounded)
    }

    pub fn textarea_max_height(&self) -> CssSize {
        parse_or(&self.textarea_max_height, CssSize::Unbounded)
    }
}

fn parse_or(raw: &str, fallback: CssSize) -> CssSize {
    raw.parse().unwrap_or_else(|e| {
        tracing::warn!(value = raw, error = %e, "ignoring invalid size in config");
        fallback
    })
}

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

/// Runs a `config` command against the config stored in `dir`.
pub fn run(dir: &Path, action: ConfigAction) -> Result<Vec<CmdMessage>> {
    let mut config = ChartpadConfig::load(dir)?;
    match action {
        ConfigAction::ShowAll => Ok(KEYS
            .iter()
            .map(|key| CmdMessage::info(format!("{} = {}", key, config.get(key).unwrap_or_default())))
            .collect()),
        ConfigAction::ShowKey(key) => match config.get(&key) {
            Some(value) => Ok(vec![CmdMessage::info(value)]),
            None => Ok(vec![CmdMessage::error(format!("Unknown config key: {}", key))]),
        },
        ConfigAction::Set(key, value) => {
            if let Err(e) = config.set(&key, &value) {
                return Ok(vec![CmdMessage::error(e)]);
            }
            config.save(dir)?;
            let display = config.get(&key).unwrap_or(value);
            Ok(vec![CmdMessage::success(format!("{} set to {}", key, display))])
        }
    }
}
