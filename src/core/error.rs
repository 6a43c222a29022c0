//! Error types for the voxrig studio core

use thiserror::Error;

use crate::animation::TimelineError;
use crate::rig::RigError;

/// Main error type for the studio core
#[derive(Debug, Error)]
pub enum Error {
    #[error("Rig error: {0}")]
    Rig(#[from] RigError),

    #[error("Timeline error: {0}")]
    Timeline(#[from] TimelineError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Credential error: {0}")]
    Credential(String),

    #[error("Export error: {0}")]
    Export(String),
}
