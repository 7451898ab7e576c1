//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: animation error (bad dimensions, bad scene, tick failure)
//! - 11: I/O error (scene read, snapshot write)
//! - 12: input error (bad JSON params, bad color)
//! - 13: serialization error

use plexus_core::AnimationError;
use std::fmt;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
pub enum CliError {
    /// An animation-level error (bad dimensions, tick failure).
    Animation(AnimationError),
    /// An I/O error (scene file read, snapshot write).
    Io(String),
    /// A user input error (bad JSON params, bad background color).
    Input(String),
    /// A serialization error (scene parse, JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Animation(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Animation(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<AnimationError> for CliError {
    fn from(e: AnimationError) -> Self {
        match e {
            AnimationError::Io(msg) => CliError::Io(msg),
            other => CliError::Animation(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_codes_are_distinct_per_class() {
        assert_eq!(
            CliError::Animation(AnimationError::InvalidDimensions).exit_code(),
            10
        );
        assert_eq!(CliError::Io("write failed".into()).exit_code(), 11);
        assert_eq!(CliError::Input("bad color".into()).exit_code(), 12);
        assert_eq!(CliError::Serialization("bad json".into()).exit_code(), 13);
    }

    #[test]
    fn from_animation_error_routes_io_to_cli_io() {
        let err = CliError::from(AnimationError::Io("disk full".into()));
        assert_eq!(err.exit_code(), 11);
        assert!(err.to_string().contains("disk full"));
    }

    #[test]
    fn from_animation_error_keeps_other_variants() {
        let err = CliError::from(AnimationError::InvalidDimensions);
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad = serde_json::from_str::<serde_json::Value>("{nope").unwrap_err();
        let err = CliError::from(bad);
        assert_eq!(err.exit_code(), 13);
    }
}
