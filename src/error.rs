//! Error types for wallcal

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for library operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating calendar images
#[derive(Error, Debug)]
pub enum Error {
    /// The requested year is outside the supported range
    #[error("Year must be between {min} and {max} (got {year})")]
    InvalidYear { year: i32, min: i32, max: i32 },

    /// A month number outside 1..=12
    #[error("invalid month: {month} (must be 1..=12)")]
    InvalidMonth { month: u32 },

    /// A day that does not exist in its month
    #[error("invalid date: {year}-{month:02}-{day:02}")]
    InvalidDate { year: i32, month: u32, day: u32 },

    /// The configuration is well-formed but unusable
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The configuration file exists but could not be read or written
    #[error("Configuration I/O failed: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// The configuration file is not valid YAML for this schema
    #[error("Configuration parse failed: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// The output directory could not be created
    #[error("Cannot create output directory {}: {source}", path.display())]
    OutputDir {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The rendered canvas could not be encoded or written
    #[error("Cannot write image {}: {source}", path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
}
