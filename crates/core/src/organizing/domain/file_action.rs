use std::fmt;
use std::str::FromStr;

use crate::shared::config::ConfigError;

/// What happens to a source photo when it is organized.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileAction {
    /// Keep the original; the copy carries its timestamps.
    Copy,
    /// Relocate the original.
    Move,
}

impl FromStr for FileAction {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "copy" => Ok(FileAction::Copy),
            "move" => Ok(FileAction::Move),
            other => Err(ConfigError::FileAction(other.to_string())),
        }
    }
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileAction::Copy => write!(f, "copy"),
            FileAction::Move => write!(f, "move"),
        }
    }
}
