//! Input/output operations, configuration and error handling

/// Command-line interface and driver loop
pub mod cli;
/// Constants and validated grid configuration
pub mod configuration;
/// Error types
pub mod error;
/// PNG export of lock maps
pub mod image;
/// Progress display for driver runs
pub mod progress;
/// Text rendering of lock maps
pub mod visualization;
