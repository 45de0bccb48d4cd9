use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use lazy_static::lazy_static;

/// Web font formats handled by the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontFormat {
    Eot,
    Otf,
    Svg,
    Ttf,
    Woff,
    Woff2,
}

/// Every format the conversion stage fans out to, in fixed order
pub const TARGET_FORMATS: [FontFormat; 6] = [
    FontFormat::Eot,
    FontFormat::Otf,
    FontFormat::Svg,
    FontFormat::Ttf,
    FontFormat::Woff,
    FontFormat::Woff2,
];

lazy_static! {
    static ref EXTENSION_TABLE: HashMap<&'static str, FontFormat> = {
        let mut table = HashMap::new();
        table.insert("eot", FontFormat::Eot);
        table.insert("otf", FontFormat::Otf);
        table.insert("svg", FontFormat::Svg);
        table.insert("ttf", FontFormat::Ttf);
        table.insert("woff", FontFormat::Woff);
        table.insert("woff2", FontFormat::Woff2);
        table
    };
}

impl FontFormat {
    /// Look up a format from a file extension, case-insensitively
    pub fn from_extension(extension: &str) -> Option<FontFormat> {
        EXTENSION_TABLE.get(extension.to_lowercase().as_str()).copied()
    }

    /// Look up the format of a file from its extension
    pub fn from_path(path: &Path) -> Option<FontFormat> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(FontFormat::from_extension)
    }

    /// File extension used when writing this format
    pub fn extension(&self) -> &'static str {
        match self {
            FontFormat::Eot => "eot",
            FontFormat::Otf => "otf",
            FontFormat::Svg => "svg",
            FontFormat::Ttf => "ttf",
            FontFormat::Woff => "woff",
            FontFormat::Woff2 => "woff2",
        }
    }

    /// Token used inside the CSS `format()` clause
    pub fn css_format(&self) -> &'static str {
        match self {
            FontFormat::Eot => "embedded-opentype",
            FontFormat::Otf => "opentype",
            FontFormat::Svg => "svg",
            FontFormat::Ttf => "truetype",
            FontFormat::Woff => "woff",
            FontFormat::Woff2 => "woff2",
        }
    }

}

impl fmt::Display for FontFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
