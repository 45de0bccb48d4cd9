use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::models::Config;
use crate::utils::logging::log;

/// Create a directory if it doesn't exist
pub fn ensure_directory_exists(dir: &Path, config: &Config) -> Result<()> {
    if !dir.exists() {
        log(
            config,
            format!("Directory {} does not exist. Creating it now.", dir.display()),
        );
        fs::create_dir_all(dir)?;
    }
    Ok(())
}

/// Safely move a file with fallback to copy+delete if rename fails
pub fn safe_move_file(src: &Path, dest: &Path, config: &Config) -> Result<()> {
    match fs::rename(src, dest) {
        Ok(_) => Ok(()),
        Err(e) => {
            log(
                config,
                format!("Rename failed for {}, trying copy+delete: {}", src.display(), e),
            );

            fs::copy(src, dest)?;

            match fs::remove_file(src) {
                Ok(_) => Ok(()),
                Err(e) => {
                    log(
                        config,
                        format!(
                            "Warning: Could not delete source file {} after copying: {}",
                            src.display(),
                            e
                        ),
                    );
                    // The file was copied, so the move still counts
                    Ok(())
                }
            }
        }
    }
}

/// List the immediate subdirectories of a directory, sorted by name
pub fn subdirectories(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut dirs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs.sort();
    Ok(dirs)
}

/// List the files directly inside a directory, sorted by name
pub fn files_in(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn listings_are_sorted_and_typed() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("b")).unwrap();
        fs::create_dir(dir.path().join("a")).unwrap();
        fs::write(dir.path().join("z.txt"), b"z").unwrap();
        fs::write(dir.path().join("y.txt"), b"y").unwrap();

        let dirs = subdirectories(dir.path()).unwrap();
        let names: Vec<_> = dirs
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, ["a", "b"]);

        let files = files_in(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, ["y.txt", "z.txt"]);
    }

    #[test]
    fn safe_move_replaces_the_source() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.ttf");
        let dest = dir.path().join("b.ttf");
        fs::write(&src, b"payload").unwrap();

        safe_move_file(&src, &dest, &Config::default()).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read(&dest).unwrap(), b"payload");
    }
}
