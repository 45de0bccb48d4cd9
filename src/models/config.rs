use std::path::PathBuf;

/// Configuration for a pipeline run
#[derive(Clone)]
pub struct Config {
    /// Directory containing the source font families
    pub source_dir: PathBuf,
    /// Directory receiving the converted font tree
    pub dest_dir: PathBuf,
    /// Directory receiving the generated CSS files
    pub css_dir: PathBuf,
    /// Enable debug output
    pub debug_mode: bool,
}

impl Config {
    /// Create a configuration with explicit directories
    pub fn new(source_dir: PathBuf, dest_dir: PathBuf, css_dir: PathBuf, debug_mode: bool) -> Self {
        Self {
            source_dir,
            dest_dir,
            css_dir,
            debug_mode,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("src/fonts"),
            dest_dir: PathBuf::from("dist/fonts"),
            css_dir: PathBuf::from("generated-css"),
            debug_mode: false,
        }
    }
}
