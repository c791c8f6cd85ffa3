use thiserror::Error;

/// Failure taxonomy for the stationary-wave model.
///
/// Errors are detected at the boundary of the component that receives the
/// invalid input and surfaced immediately; there is no local recovery and no
/// defaulting, since a numeric result computed from invalid input would be
/// worse than a loud failure.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Invalid static parameters: odd or zero grid size, mismatched array
    /// lengths between topography and grid, degenerate latitude circle.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Physically invalid parameter combinations that would produce
    /// undefined or infinite results.
    #[error("parameter outside physical domain: {0}")]
    Domain(String),

    /// External topography source missing, unreadable, or missing the
    /// expected coordinates.
    #[error("topography data unavailable: {0}")]
    DataUnavailable(String),
}
