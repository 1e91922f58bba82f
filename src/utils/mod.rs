//! Filesystem and logging helpers shared by the super-match pipeline.

pub mod io;
pub mod logging;
