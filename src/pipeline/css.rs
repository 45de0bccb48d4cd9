use std::fs;
use std::path::Path;

use rayon::prelude::*;

use crate::error::Result;
use crate::font::infer_weight;
use crate::models::{Config, FontFormat};
use crate::utils::{ensure_directory_exists, files_in, log, subdirectories};

/// Counters reported by the CSS generation stage
#[derive(Debug, Default, Clone, Copy)]
pub struct CssReport {
    /// CSS files written
    pub written: usize,
    /// Families that yielded no recognized format files
    pub empty: usize,
}

/// Build one `@font-face` block for a style directory.
///
/// Files whose extension has no `format()` token are silently dropped; the
/// block is omitted entirely when none remain. Pure string construction,
/// all I/O stays with the caller.
///
/// # Arguments
/// * `family` - family directory name, used verbatim as the CSS font-family
/// * `style` - style directory name, lowercased into the URL and fed to
///   weight inference
/// * `files` - file names inside the style directory
pub fn generate_font_face(family: &str, style: &str, files: &[String]) -> Option<String> {
    let weight = infer_weight(style);

    let entries: Vec<String> = files
        .iter()
        .filter_map(|file| {
            let format = FontFormat::from_path(Path::new(file))?;
            Some(format!(
                "url(\"../fonts/{}/{}/{}\") format('{}')",
                family.to_lowercase(),
                style.to_lowercase(),
                file,
                format.css_format()
            ))
        })
        .collect();

    if entries.is_empty() {
        return None;
    }

    Some(format!(
        "\n@font-face {{\n    font-family: \"{}\";\n    font-weight: {};\n    src: {};\n    font-display: swap;\n    font-style: normal;\n}}\n",
        family,
        weight,
        entries.join(",\n    ")
    ))
}

/// Generate one CSS file per family under the destination tree.
///
/// Families are processed in parallel, but every style of a family is
/// collected in memory before its single output write, so a CSS file is
/// never observed half-populated.
pub fn generate_css(config: &Config) -> Result<CssReport> {
    let families = match subdirectories(&config.dest_dir) {
        Ok(dirs) => dirs,
        Err(e) => {
            eprintln!(
                "Failed to read base directory: {} {}",
                config.dest_dir.display(),
                e
            );
            return Ok(CssReport::default());
        }
    };

    ensure_directory_exists(&config.css_dir, config)?;

    let results: Vec<Option<bool>> = families
        .par_iter()
        .map(|family_dir| process_family(family_dir, config))
        .collect();

    let mut report = CssReport::default();
    for written in results.into_iter().flatten() {
        if written {
            report.written += 1;
        } else {
            report.empty += 1;
        }
    }

    println!("CSS generation summary:");
    println!("  - {} CSS files written", report.written);
    Ok(report)
}

/// Accumulate every style's block for one family, then write the file once.
///
/// Returns `Some(true)` when a CSS file was written, `Some(false)` when the
/// family had nothing to declare, `None` when the branch failed and was
/// abandoned.
fn process_family(family_dir: &Path, config: &Config) -> Option<bool> {
    let family_name = match family_dir.file_name().and_then(|name| name.to_str()) {
        Some(name) => name.to_string(),
        None => {
            eprintln!("Skipping family with unusable name: {}", family_dir.display());
            return None;
        }
    };

    log(config, format!("Processing directory: {}", family_dir.display()));

    let styles = match subdirectories(family_dir) {
        Ok(styles) => styles,
        Err(e) => {
            eprintln!("Failed to read directory: {} {}", family_dir.display(), e);
            return None;
        }
    };

    let mut css_content = String::new();
    for style_dir in styles {
        let style_name = match style_dir.file_name().and_then(|name| name.to_str()) {
            Some(name) => name,
            None => continue,
        };

        log(config, format!("Processing style directory: {}", style_dir.display()));

        let files = match files_in(&style_dir) {
            Ok(files) => files,
            Err(e) => {
                eprintln!("Failed to read style directory: {} {}", style_dir.display(), e);
                continue;
            }
        };

        let names: Vec<String> = files
            .iter()
            .filter_map(|file| file.file_name().and_then(|name| name.to_str()))
            .map(String::from)
            .collect();

        if let Some(block) = generate_font_face(&family_name, style_name, &names) {
            css_content.push_str(&block);
        }
    }

    if css_content.is_empty() {
        log(
            config,
            format!("No recognized font files under {}", family_dir.display()),
        );
        return Some(false);
    }

    let css_path = config.css_dir.join(format!("{}.css", family_name.to_lowercase()));
    match fs::write(&css_path, css_content.trim()) {
        Ok(()) => {
            println!("Generated CSS file for {}: {}", family_name, css_path.display());
            Some(true)
        }
        Err(e) => {
            eprintln!("Failed to write CSS file: {} {}", css_path.display(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn config(dest: &Path, out: &Path) -> Config {
        Config::new(
            PathBuf::from("unused"),
            dest.to_path_buf(),
            out.to_path_buf(),
            false,
        )
    }

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn unrecognized_extensions_are_dropped_from_src() {
        let block =
            generate_font_face("Inter", "Regular", &names(&["Roman.ttf", "Roman.woff2", "Roman.xyz"]))
                .unwrap();
        assert_eq!(block.matches("url(").count(), 2);
        assert!(block.contains("format('truetype')"));
        assert!(block.contains("format('woff2')"));
        assert!(!block.contains("xyz"));
    }

    #[test]
    fn block_is_omitted_without_recognized_files() {
        assert!(generate_font_face("Inter", "Regular", &names(&["Roman.xyz"])).is_none());
        assert!(generate_font_face("Inter", "Regular", &[]).is_none());
    }

    #[test]
    fn block_carries_family_weight_and_urls() {
        let block = generate_font_face("Inter", "Bold", &names(&["Bold.woff2"])).unwrap();
        assert!(block.contains("font-family: \"Inter\";"));
        assert!(block.contains("font-weight: 600;"));
        assert!(block.contains("url(\"../fonts/inter/bold/Bold.woff2\") format('woff2')"));
        assert!(block.contains("font-display: swap;"));
        assert!(block.contains("font-style: normal;"));
    }

    #[test]
    fn family_round_trip_writes_one_block() {
        let dest = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let bold = dest.path().join("Inter").join("Bold");
        fs::create_dir_all(&bold).unwrap();
        fs::write(bold.join("Bold.woff2"), b"stub").unwrap();

        let report = generate_css(&config(dest.path(), out.path())).unwrap();
        assert_eq!(report.written, 1);
        assert_eq!(report.empty, 0);

        let css = fs::read_to_string(out.path().join("inter.css")).unwrap();
        assert_eq!(css.matches("@font-face").count(), 1);
        assert!(css.contains("font-weight: 600;"));
        assert!(css.contains("/inter/bold/Bold.woff2"));
        assert!(css.starts_with("@font-face"));
    }

    #[test]
    fn families_without_recognized_files_write_nothing() {
        let dest = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let style = dest.path().join("Inter").join("Regular");
        fs::create_dir_all(&style).unwrap();
        fs::write(style.join("README.md"), b"docs").unwrap();

        let report = generate_css(&config(dest.path(), out.path())).unwrap();
        assert_eq!(report.written, 0);
        assert_eq!(report.empty, 1);
        assert!(!out.path().join("inter.css").exists());
    }

    #[test]
    fn styles_accumulate_into_a_single_sorted_file() {
        let dest = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        for (style, file) in [("Bold", "Bold.woff2"), ("Light", "Light.woff2")] {
            let style_dir = dest.path().join("Inter").join(style);
            fs::create_dir_all(&style_dir).unwrap();
            fs::write(style_dir.join(file), b"stub").unwrap();
        }

        let report = generate_css(&config(dest.path(), out.path())).unwrap();
        assert_eq!(report.written, 1);

        let css = fs::read_to_string(out.path().join("inter.css")).unwrap();
        assert_eq!(css.matches("@font-face").count(), 2);
        let bold_at = css.find("font-weight: 600;").unwrap();
        let light_at = css.find("font-weight: 300;").unwrap();
        assert!(bold_at < light_at);
    }

    #[test]
    fn empty_families_do_not_block_siblings() {
        let dest = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        // A family whose name survives but contains no style directories
        fs::create_dir_all(dest.path().join("Empty")).unwrap();
        let bold = dest.path().join("Inter").join("Bold");
        fs::create_dir_all(&bold).unwrap();
        fs::write(bold.join("Bold.ttf"), b"stub").unwrap();

        let report = generate_css(&config(dest.path(), out.path())).unwrap();
        assert_eq!(report.written, 1);
        assert!(out.path().join("inter.css").exists());
    }
}
