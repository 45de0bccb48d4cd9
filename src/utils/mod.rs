//! Shared filesystem and logging helpers

pub mod file;
pub mod logging;

pub use file::{ensure_directory_exists, files_in, safe_move_file, subdirectories};
pub use logging::log;
