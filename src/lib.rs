//! Procedural tile grids that resize in place
//!
//! A grid manager keeps a rectangular board of tile objects in step with a
//! polled configuration. Rows and columns are added or removed without
//! discarding the tiles that stay, and tiles on the outer boundary are kept
//! locked after every structural change.

#![forbid(unsafe_code)]

/// Grid lifecycle, reconciliation and boundary locking
pub mod grid;
/// Input/output operations, configuration and error handling
pub mod io;
/// Scene host, tile entity and transform math
pub mod scene;

pub use io::error::{GridError, Result};
