//! Error types for the simulation core.

use thiserror::Error;

/// Errors raised while building the simulation or placing obstacles.
///
/// Nothing in the per-tick path returns these to the frame loop: a failed
/// placement is logged and skipped where it happens.
#[derive(Debug, Error)]
pub enum SimError {
    /// The obstacle factory was asked for a kind it does not know.
    #[error("unknown obstacle kind: {0}")]
    UnknownObstacleKind(String),

    /// Configuration values the simulation cannot run with.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// Configuration override was not valid JSON for [`crate::SimConfig`].
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
