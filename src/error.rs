//! Error types for the fallible edges of the game.
//!
//! The simulation itself never fails: running out of hull is a transition to
//! the game-over screen, and a missing sound clip is simply not played.  The
//! only thing that can go wrong is loading `assets/game.toml`, so that is all
//! this module describes.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crate::error::GameResult;
//!
//! fn load(contents: &str) -> GameResult<GameConfig> {
//!     let config = GameConfig::from_toml_str(contents)?;
//!     Ok(config)
//! }
//! ```

use std::fmt;

/// Top-level error enum for configuration loading.
#[derive(Debug)]
pub enum GameError {
    /// The TOML text could not be parsed into a [`crate::config::GameConfig`].
    ConfigParse {
        /// Parser message, including line and column.
        message: String,
    },

    /// The file parsed but a value is outside the range the game can run with.
    InvalidConfig {
        /// Name of the offending key.
        field: &'static str,
        /// The value that was rejected.
        value: f32,
        /// Human-readable description of the accepted range.
        expected: &'static str,
    },
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::ConfigParse { message } => {
                write!(f, "failed to parse game config: {}", message)
            }
            GameError::InvalidConfig {
                field,
                value,
                expected,
            } => write!(
                f,
                "config value '{}' = {} is invalid (expected {})",
                field, value, expected
            ),
        }
    }
}

impl std::error::Error for GameError {}

impl From<toml::de::Error> for GameError {
    fn from(err: toml::de::Error) -> Self {
        GameError::ConfigParse {
            message: err.to_string(),
        }
    }
}

/// Convenience alias: a `Result` using `GameError` as the error type.
pub type GameResult<T> = Result<T, GameError>;

// ── Validation helpers ────────────────────────────────────────────────────────

/// Returns an error unless `value` is strictly positive.
pub fn require_positive(field: &'static str, value: f32) -> GameResult<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            field,
            value,
            expected: "(0.0, ∞)",
        })
    }
}

/// Returns an error if `value` is negative.
pub fn require_non_negative(field: &'static str, value: f32) -> GameResult<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(GameError::InvalidConfig {
            field,
            value,
            expected: "[0.0, ∞)",
        })
    }
}
