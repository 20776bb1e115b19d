//! Error types for the multi-yield-surface models

use thiserror::Error;

/// Result type alias using the crate [Error]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the constitutive models
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid material parameters (detected before any instance is created)
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The return mapping or the surface motion has no valid solution
    ///
    /// The state of the instance is left at the last committed state; the caller may
    /// reduce the load step and try again.
    #[error("consistency failure: {0}")]
    Consistency(String),

    /// The strain vector does not match the strain order of the instance
    #[error("strain vector has {found} components but {expected} are required")]
    InvalidStrainSize { expected: usize, found: usize },

    /// The key given to `update_parameter` is not recognized or its value is invalid
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
