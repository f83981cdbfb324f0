use std::path::PathBuf;

/// Broad classification of engine errors, for callers that translate them
/// into transport-level responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Range,
    InvalidPlayer,
}

/// Errors raised by board construction, queries and moves.
///
/// All of these are detected before any state is touched. An illegal but
/// well-formed move is not an error; see [`crate::game::MoveOutcome`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid {field}: {value} (expected {min}..={max})")]
    Configuration {
        field: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("the standard opening needs exactly 2 players, board has {0}")]
    UnsupportedOpening(usize),

    #[error("coordinate ({x}, {y}) is outside the {width}x{height} board")]
    OutOfRange {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("invalid direction ({dx}, {dy})")]
    InvalidDirection { dx: i32, dy: i32 },

    #[error("player is not seated at this board")]
    InvalidPlayer,
}

impl BoardError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BoardError::Configuration { .. } | BoardError::UnsupportedOpening(_) => {
                ErrorKind::Configuration
            }
            BoardError::OutOfRange { .. } | BoardError::InvalidDirection { .. } => ErrorKind::Range,
            BoardError::InvalidPlayer => ErrorKind::InvalidPlayer,
        }
    }
}

/// Errors that can occur when reading a board back from its text form.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("board text is empty")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown cell mark {mark:?} at row {row}, column {col}")]
    UnknownMark { row: usize, col: usize, mark: char },

    #[error("owner {owner} at row {row}, column {col} exceeds {num_players} players")]
    OwnerOutOfRange {
        row: usize,
        col: usize,
        owner: usize,
        num_players: usize,
    },

    #[error(transparent)]
    Board(#[from] BoardError),
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}
