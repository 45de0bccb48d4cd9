use std::fs;
use std::path::Path;

use crate::error::{Error, Result};
use crate::models::Config;
use crate::utils::{files_in, log, safe_move_file, subdirectories};

/// Counters reported by the restructure stage
#[derive(Debug, Default, Clone, Copy)]
pub struct RestructureReport {
    /// Style directories whose nested level was flattened
    pub flattened: usize,
    /// Style directories left untouched because their shape was unexpected
    pub unexpected: usize,
}

/// Flatten the nested `src/fonts/<subfolder>` level that conversion tooling
/// leaves inside each style directory.
///
/// Style directories without the nesting are left alone; unexpected shapes
/// (zero or several subfolders under `src/fonts`) are reported and skipped.
pub fn restructure_tree(config: &Config) -> Result<RestructureReport> {
    let mut report = RestructureReport::default();

    let families = match subdirectories(&config.dest_dir) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!(
                "Failed to read destination directory: {} {}",
                config.dest_dir.display(),
                e
            );
            return Ok(report);
        }
    };

    for family_dir in families {
        let styles = match subdirectories(&family_dir) {
            Ok(styles) => styles,
            Err(e) => {
                eprintln!("Failed to read directory: {} {}", family_dir.display(), e);
                continue;
            }
        };

        for style_dir in styles {
            match flatten_style_dir(&style_dir, config) {
                Ok(true) => report.flattened += 1,
                Ok(false) => {}
                Err(Error::Structure(msg)) => {
                    println!("{}", msg);
                    report.unexpected += 1;
                }
                Err(e) => {
                    eprintln!("Failed to restructure {}: {}", style_dir.display(), e);
                    report.unexpected += 1;
                }
            }
        }
    }

    println!("Restructure summary:");
    println!("  - {} style directories flattened", report.flattened);
    Ok(report)
}

/// Move the contents of `src/fonts/<single subfolder>` up into the style
/// directory and delete the emptied nesting.
///
/// # Arguments
/// * `style_dir` - a `<dest>/<Family>/<Style>` directory
///
/// # Returns
/// * `Ok(true)` when a nested level was flattened, `Ok(false)` when there
///   was nothing to do
fn flatten_style_dir(style_dir: &Path, config: &Config) -> Result<bool> {
    let src_fonts = style_dir.join("src").join("fonts");
    if !src_fonts.is_dir() {
        log(
            config,
            format!("src/fonts directory not found in {}", style_dir.display()),
        );
        return Ok(false);
    }

    let subfolders = subdirectories(&src_fonts)?;
    if subfolders.len() != 1 {
        return Err(Error::Structure(format!(
            "Unexpected structure in {}. Expected a single folder inside 'src/fonts'.",
            style_dir.display()
        )));
    }

    for file in files_in(&subfolders[0])? {
        if let Some(name) = file.file_name() {
            safe_move_file(&file, &style_dir.join(name), config)?;
        }
    }

    fs::remove_dir_all(style_dir.join("src"))?;
    log(config, format!("Flattened {}", style_dir.display()));
    Ok(true)
}
