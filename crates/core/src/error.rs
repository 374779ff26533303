//! Error types for the colonization simulation
//!
//! Only caller mistakes surface as errors. Numeric corner cases (empty demand,
//! zero carrying capacity, an extinct population) are handled inside the model
//! and never reach this type.

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, SimulationError>;

/// Errors returned by the simulation handle and its inputs
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    /// `step()` was called before a successful `start()`
    #[error("simulation is not initialized; call start() first")]
    Uninitialized,

    /// `start()` was called before any landscape was loaded
    #[error("no landscape loaded; call load() first")]
    NoLandscape,

    /// Release location lies outside the loaded grid
    #[error("start cell ({row}, {col}) is outside the {height}x{width} grid")]
    StartOutOfBounds {
        row: usize,
        col: usize,
        height: usize,
        width: usize,
    },

    /// Landscape dimensions, data length or cell size are unusable
    #[error("invalid landscape: {0}")]
    InvalidLandscape(String),

    /// A configuration parameter is out of its valid range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
