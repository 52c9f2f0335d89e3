use crate::consts;
use crate::game::{Grid, GridError, Settings, SettingsError};
use crate::render::Palette;
use log::LevelFilter;
use ratatui::style::Color;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Program configuration read from a configuration file
#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
pub(crate) struct Config {
    /// Gameplay parameters
    #[serde(default)]
    pub(crate) game: GameConfig,

    /// Colours for drawing the game
    #[serde(default)]
    pub(crate) colors: ColorConfig,

    /// Where & how much to log
    #[serde(default)]
    pub(crate) logging: LoggingConfig,
}

impl Config {
    /// Return the default configuration file path
    pub(crate) fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_local_dir()
            .map(|p| p.join("blocksnake").join("config.toml"))
            .ok_or(ConfigError::NoPath)
    }

    /// Read configuration from a file on disk.  If the file does not exist and
    /// `allow_missing` is true, a default `Config` value is returned.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the file could not be read or if the file's contents
    /// could not be deserialized.
    pub(crate) fn load(path: &Path, allow_missing: bool) -> Result<Config, ConfigError> {
        let content = match fs_err::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound && allow_missing => {
                return Ok(Config::default())
            }
            Err(e) => return Err(ConfigError::Read(e)),
        };
        toml::from_str(&content).map_err(Into::into)
    }

    /// Build the gameplay settings described by the configuration
    pub(crate) fn settings(&self) -> Result<Settings, ConfigError> {
        let game = &self.game;
        let grid = Grid::from_canvas(game.canvas_width, game.canvas_height, game.cell_size)?;
        let settings = Settings::new(
            grid,
            Duration::from_millis(game.initial_tick_ms),
            Duration::from_millis(game.speedup_ms),
            game.min_tick_ms.map(Duration::from_millis),
        )?;
        Ok(settings)
    }
}

#[derive(Clone, Copy, Deserialize, Debug, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
pub(crate) struct GameConfig {
    /// Width of the virtual canvas the grid is cut from
    pub(crate) canvas_width: u16,

    /// Height of the virtual canvas the grid is cut from
    pub(crate) canvas_height: u16,

    /// Edge length of a grid cell on the canvas
    pub(crate) cell_size: u16,

    /// Milliseconds between ticks at the start of a game
    pub(crate) initial_tick_ms: u64,

    /// Milliseconds taken off the tick interval each time the snake eats
    pub(crate) speedup_ms: u64,

    /// If set, the tick interval never drops below this many milliseconds
    pub(crate) min_tick_ms: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            canvas_width: consts::CANVAS_WIDTH,
            canvas_height: consts::CANVAS_HEIGHT,
            cell_size: consts::CELL_SIZE,
            initial_tick_ms: duration_ms(consts::INITIAL_TICK_INTERVAL),
            speedup_ms: duration_ms(consts::SPEEDUP_STEP),
            min_tick_ms: None,
        }
    }
}

fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

#[derive(Clone, Copy, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(try_from = "RawColorConfig")]
pub(crate) struct ColorConfig {
    pub(crate) palette: Palette,
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawColorConfig {
    head: Option<String>,
    body_odd: Option<String>,
    body_even: Option<String>,
    food: Option<String>,
    border: Option<String>,
    text: Option<String>,
}

impl TryFrom<RawColorConfig> for ColorConfig {
    type Error = ColorError;

    fn try_from(value: RawColorConfig) -> Result<ColorConfig, ColorError> {
        let mut palette = Palette::default();
        for (key, raw, slot) in [
            ("head", value.head, &mut palette.head),
            ("body-odd", value.body_odd, &mut palette.body_odd),
            ("body-even", value.body_even, &mut palette.body_even),
            ("food", value.food, &mut palette.food),
            ("border", value.border, &mut palette.border),
            ("text", value.text, &mut palette.text),
        ] {
            if let Some(raw) = raw {
                *slot = Color::from_str(&raw).map_err(|_| ColorError { key, value: raw })?;
            }
        }
        Ok(ColorConfig { palette })
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("invalid color {value:?} for {key:?}")]
pub(crate) struct ColorError {
    key: &'static str,
    value: String,
}

#[derive(Clone, Deserialize, Debug, Eq, PartialEq)]
#[serde(try_from = "RawLoggingConfig")]
pub(crate) struct LoggingConfig {
    /// File to write log messages to; no logging is done if this is unset
    pub(crate) file: Option<PathBuf>,

    /// Most verbose level of message to log
    pub(crate) level: LevelFilter,
}

impl Default for LoggingConfig {
    fn default() -> LoggingConfig {
        LoggingConfig {
            file: None,
            level: LevelFilter::Info,
        }
    }
}

#[derive(Clone, Deserialize, Debug, Default, Eq, PartialEq)]
#[serde(default, rename_all = "kebab-case")]
struct RawLoggingConfig {
    file: Option<String>,
    level: Option<String>,
}

impl TryFrom<RawLoggingConfig> for LoggingConfig {
    type Error = log::ParseLevelError;

    fn try_from(value: RawLoggingConfig) -> Result<LoggingConfig, log::ParseLevelError> {
        Ok(LoggingConfig {
            file: value.file.map(PathBuf::from),
            level: value
                .level
                .as_deref()
                .map(LevelFilter::from_str)
                .transpose()?
                .unwrap_or(LevelFilter::Info),
        })
    }
}

#[derive(Debug, Error)]
pub(crate) enum ConfigError {
    #[error("failed to determine path to local configuration directory")]
    NoPath,
    #[error("failed to read configuration file")]
    Read(#[from] std::io::Error),
    #[error("failed to parse configuration file")]
    Parse(#[from] toml::de::Error),
    #[error("invalid grid dimensions")]
    Grid(#[from] GridError),
    #[error("invalid game settings")]
    Settings(#[from] SettingsError),
}
