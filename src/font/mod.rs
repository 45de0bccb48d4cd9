//! Font validation and weight inference

pub mod validate;
pub mod weight;

pub use validate::{is_valid_font_file, is_valid_svg_file};
pub use weight::infer_weight;
