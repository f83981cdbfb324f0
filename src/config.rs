use std::path::Path;

use tracing::warn;

use crate::error::{BoardError, ConfigError};
use crate::game::{Board, MAX_PLAYERS, MAX_SIDE, MIN_PLAYERS, MIN_SIDE};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
}

/// Shape of newly created boards.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    pub num_players: usize,
    /// Seed the standard two-player opening after construction.
    pub default_start: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            width: 8,
            height: 8,
            num_players: 2,
            default_start: true,
        }
    }
}

impl BoardConfig {
    /// Construct a board of this shape, seeding the opening if requested.
    pub fn build(&self) -> Result<Board, BoardError> {
        let mut board = Board::new(self.width, self.height, self.num_players)?;
        if self.default_start {
            board.default_start()?;
        }
        Ok(board)
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!(path = %path.display(), "config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let board = &self.board;
        if !(MIN_SIDE..=MAX_SIDE).contains(&board.width) {
            return Err(ConfigError::Validation(format!(
                "board.width must be in [{MIN_SIDE}, {MAX_SIDE}]"
            )));
        }
        if !(MIN_SIDE..=MAX_SIDE).contains(&board.height) {
            return Err(ConfigError::Validation(format!(
                "board.height must be in [{MIN_SIDE}, {MAX_SIDE}]"
            )));
        }
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&board.num_players) {
            return Err(ConfigError::Validation(format!(
                "board.num_players must be in [{MIN_PLAYERS}, {MAX_PLAYERS}]"
            )));
        }
        if board.default_start && board.num_players != 2 {
            return Err(ConfigError::Validation(
                "board.default_start requires board.num_players = 2".into(),
            ));
        }
        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
