use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::font::{is_valid_font_file, is_valid_svg_file};
use crate::models::{Config, FontFormat, TARGET_FORMATS};
use crate::pipeline::transcode::Transcode;
use crate::utils::{ensure_directory_exists, files_in, log, subdirectories};

/// Counters reported by the conversion stage
#[derive(Debug, Default, Clone, Copy)]
pub struct ConvertReport {
    /// Source files that passed validation and were fanned out
    pub converted: usize,
    /// Source files rejected by validation or unreadable
    pub skipped: usize,
    /// Individual format outputs written
    pub outputs: usize,
}

/// Convert every valid style file under the source tree into the
/// destination tree, one output per target format.
///
/// Families are processed in parallel; all files of a family complete
/// before its report is folded in. Per-file and per-format failures are
/// logged and skipped, never fatal.
pub fn convert_fonts(config: &Config, transcoder: &(impl Transcode + Sync)) -> Result<ConvertReport> {
    let families = match subdirectories(&config.source_dir) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!(
                "Failed to read source directory: {} {}",
                config.source_dir.display(),
                e
            );
            return Ok(ConvertReport::default());
        }
    };

    let reports: Vec<ConvertReport> = families
        .par_iter()
        .map(|family_dir| convert_family(family_dir, config, transcoder))
        .collect();

    let mut report = ConvertReport::default();
    for family_report in &reports {
        report.converted += family_report.converted;
        report.skipped += family_report.skipped;
        report.outputs += family_report.outputs;
    }

    println!("Font conversion summary:");
    println!(
        "  - {} files converted ({} outputs written)",
        report.converted, report.outputs
    );
    println!("  - {} files skipped", report.skipped);
    Ok(report)
}

fn convert_family(
    family_dir: &Path,
    config: &Config,
    transcoder: &(impl Transcode + Sync),
) -> ConvertReport {
    let mut report = ConvertReport::default();

    let family_name = match family_dir.file_name() {
        Some(name) => name,
        None => return report,
    };

    log(config, format!("Processing family directory: {}", family_dir.display()));

    let files = match files_in(family_dir) {
        Ok(files) => files,
        Err(e) => {
            eprintln!("Failed to read family directory: {} {}", family_dir.display(), e);
            return report;
        }
    };

    for file in files {
        match convert_style_file(&file, family_name, config, transcoder) {
            Ok(Some(outputs)) => {
                report.converted += 1;
                report.outputs += outputs;
            }
            Ok(None) => report.skipped += 1,
            Err(e) => {
                eprintln!("Failed to convert {}: {}", file.display(), e);
                report.skipped += 1;
            }
        }
    }

    report
}

/// Validate one style file and fan it out to every target format.
///
/// Returns the number of outputs written, or `None` when the file was
/// skipped (unrecognized extension or failed validation).
fn convert_style_file(
    path: &Path,
    family_name: &OsStr,
    config: &Config,
    transcoder: &(impl Transcode + Sync),
) -> Result<Option<usize>> {
    let source_format = match FontFormat::from_path(path) {
        Some(format) => format,
        None => {
            log(config, format!("Skipping unsupported file: {}", path.display()));
            return Ok(None);
        }
    };

    match source_format {
        FontFormat::Svg => {
            if !is_valid_svg_file(path, config) {
                return Ok(None);
            }
        }
        FontFormat::Ttf | FontFormat::Otf => {
            if !is_valid_font_file(path, config) {
                eprintln!("Font {} is not valid.", path.display());
                return Ok(None);
            }
        }
        _ => {
            // eot/woff/woff2 are produced by this stage, not consumed
            log(config, format!("Skipping non-source format file: {}", path.display()));
            return Ok(None);
        }
    }

    let stem = match path.file_stem().and_then(|stem| stem.to_str()) {
        Some(stem) => stem,
        None => {
            log(config, format!("Skipping file with unusable name: {}", path.display()));
            return Ok(None);
        }
    };
    let style_name = stem.to_lowercase();

    let data = fs::read(path)?;
    let style_dir = config.dest_dir.join(family_name).join(&style_name);
    ensure_directory_exists(&style_dir, config)?;

    let mut outputs = 0;
    for target in TARGET_FORMATS {
        match transcoder.transcode(&data, source_format, target) {
            Ok(bytes) => {
                let out_path = style_dir.join(format!("{}.{}", stem, target.extension()));
                match fs::write(&out_path, bytes) {
                    Ok(()) => {
                        outputs += 1;
                        log(config, format!("Wrote {}", out_path.display()));
                    }
                    Err(e) => eprintln!("Failed to write {}: {}", out_path.display(), e),
                }
            }
            Err(Error::Unsupported(msg)) => {
                log(config, format!("No {} output for {}: {}", target, path.display(), msg));
            }
            Err(e) => eprintln!("Failed to convert {} to {}: {}", path.display(), target, e),
        }
    }

    Ok(Some(outputs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::transcode::SfntPackager;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config(source: &Path, dest: &Path) -> Config {
        Config::new(
            source.to_path_buf(),
            dest.to_path_buf(),
            PathBuf::from("unused"),
            false,
        )
    }

    #[test]
    fn invalid_fonts_are_skipped_entirely() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let family = source.path().join("Junk");
        fs::create_dir(&family).unwrap();
        fs::write(family.join("Broken.ttf"), b"not a font").unwrap();

        let report =
            convert_fonts(&config(source.path(), dest.path()), &SfntPackager).unwrap();
        assert_eq!(report.converted, 0);
        assert_eq!(report.skipped, 1);
        assert!(!dest.path().join("Junk").exists());
    }

    #[test]
    fn svg_sources_pass_through_to_the_svg_target() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let family = source.path().join("Icons");
        fs::create_dir(&family).unwrap();
        let markup = "<svg xmlns=\"http://www.w3.org/2000/svg\"/>";
        fs::write(family.join("Logo.svg"), markup).unwrap();

        let report =
            convert_fonts(&config(source.path(), dest.path()), &SfntPackager).unwrap();
        assert_eq!(report.converted, 1);
        assert_eq!(report.outputs, 1);

        let style_dir = dest.path().join("Icons").join("logo");
        assert_eq!(fs::read_to_string(style_dir.join("Logo.svg")).unwrap(), markup);
        assert_eq!(fs::read_dir(&style_dir).unwrap().count(), 1);
    }

    #[test]
    fn unrecognized_extensions_are_skipped() {
        let source = TempDir::new().unwrap();
        let dest = TempDir::new().unwrap();
        let family = source.path().join("Inter");
        fs::create_dir(&family).unwrap();
        fs::write(family.join("notes.txt"), b"readme").unwrap();

        let report =
            convert_fonts(&config(source.path(), dest.path()), &SfntPackager).unwrap();
        assert_eq!(report.converted, 0);
        assert_eq!(report.skipped, 1);
    }

    #[test]
    fn missing_source_directory_is_not_fatal() {
        let dest = TempDir::new().unwrap();
        let report = convert_fonts(
            &config(Path::new("does/not/exist"), dest.path()),
            &SfntPackager,
        )
        .unwrap();
        assert_eq!(report.converted, 0);
        assert_eq!(report.skipped, 0);
    }
}
