use std::fs;
use std::io::Read;
use std::path::Path;

use ttf_parser::Face;

use crate::models::Config;
use crate::utils::log;

/// Check if a file is a structurally valid font file
pub fn is_valid_font_file(path: &Path, config: &Config) -> bool {
    if let Some(ext) = path.extension() {
        let ext = ext.to_str().unwrap_or("").to_lowercase();
        if ext == "ttf" || ext == "otf" {
            if let Ok(mut file) = fs::File::open(path) {
                let mut header = [0u8; 4];
                if file.read_exact(&mut header).is_ok() {
                    let is_valid_magic =
                        header == [0x00, 0x01, 0x00, 0x00] || // TTF
                        header == [0x4F, 0x54, 0x54, 0x4F];   // OTF

                    if is_valid_magic {
                        if let Ok(_face) = Face::parse(&fs::read(path).unwrap_or_default(), 0) {
                            log(config, format!("Valid font file: {}", path.display()));
                            return true;
                        }
                    }
                }
            }
        }
    }
    log(config, format!("Invalid font file: {}", path.display()));
    false
}

/// Check if a file parses as well-formed SVG markup
pub fn is_valid_svg_file(path: &Path, config: &Config) -> bool {
    let data = match fs::read_to_string(path) {
        Ok(data) => data,
        Err(e) => {
            eprintln!("Error reading SVG file {}: {}", path.display(), e);
            return false;
        }
    };

    match roxmltree::Document::parse(&data) {
        Ok(_) => {
            log(config, format!("Valid SVG file: {}", path.display()));
            true
        }
        Err(e) => {
            eprintln!("SVG file {} is not valid: {}", path.display(), e);
            false
        }
    }
}
