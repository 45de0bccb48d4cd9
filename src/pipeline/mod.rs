//! The three pipeline stages, run in order: convert, restructure, css

pub mod convert;
pub mod css;
pub mod restructure;
pub mod transcode;

pub use convert::{convert_fonts, ConvertReport};
pub use css::{generate_css, generate_font_face, CssReport};
pub use restructure::{restructure_tree, RestructureReport};
pub use transcode::{SfntPackager, Transcode};
