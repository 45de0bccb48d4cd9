use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::models::Config;

/// Which pipeline stages to run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageSelection {
    pub convert: bool,
    pub restructure: bool,
    pub css: bool,
}

impl StageSelection {
    /// The full pipeline, in order
    pub fn all() -> Self {
        Self {
            convert: true,
            restructure: true,
            css: true,
        }
    }
}

/// Parsed command-line options
pub struct CliOptions {
    pub config: Config,
    pub stages: StageSelection,
    pub batch_file: Option<PathBuf>,
    pub show_help: bool,
}

/// Parse command line arguments
pub fn parse_args() -> Result<CliOptions> {
    let args: Vec<String> = env::args().skip(1).collect();
    parse_arg_list(&args)
}

fn parse_arg_list(args: &[String]) -> Result<CliOptions> {
    let mut source_dir = None;
    let mut dest_dir = None;
    let mut css_dir = None;
    let mut debug_mode = false;
    let mut convert = false;
    let mut restructure = false;
    let mut css = false;
    let mut batch_file = None;
    let mut show_help = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => show_help = true,
            "--debug" => debug_mode = true,
            "--convert" => convert = true,
            "--restructure" => restructure = true,
            "--css" => css = true,
            "--dest" => {
                i += 1;
                dest_dir = Some(args.get(i).map(PathBuf::from).ok_or_else(|| {
                    Error::Config("--dest option requires a directory".to_string())
                })?);
            }
            "--out" => {
                i += 1;
                css_dir = Some(args.get(i).map(PathBuf::from).ok_or_else(|| {
                    Error::Config("--out option requires a directory".to_string())
                })?);
            }
            "--batch" => {
                i += 1;
                batch_file = Some(args.get(i).map(PathBuf::from).ok_or_else(|| {
                    Error::Config("--batch option requires a file path".to_string())
                })?);
            }
            arg if !arg.starts_with('-') => source_dir = Some(PathBuf::from(arg)),
            arg => return Err(Error::Config(format!("Unknown option: {}", arg))),
        }
        i += 1;
    }

    let defaults = Config::default();
    let config = Config::new(
        source_dir.unwrap_or(defaults.source_dir),
        dest_dir.unwrap_or(defaults.dest_dir),
        css_dir.unwrap_or(defaults.css_dir),
        debug_mode,
    );

    // No stage flag selects the whole pipeline
    let stages = if convert || restructure || css {
        StageSelection {
            convert,
            restructure,
            css,
        }
    } else {
        StageSelection::all()
    };

    Ok(CliOptions {
        config,
        stages,
        batch_file,
        show_help,
    })
}

/// Get the help message for command-line usage
pub fn get_help_message() -> String {
    r#"FontPipe - a web font conversion and CSS generation tool

USAGE:
    FontPipe [OPTIONS] [SOURCE_DIR]

ARGS:
    <SOURCE_DIR>    Directory containing the font families (default: src/fonts)

OPTIONS:
    -h, --help        Show this help message
    --debug           Enable debug output
    --convert         Run the font conversion stage
    --restructure     Run the directory restructure stage
    --css             Run the CSS generation stage
    --dest <DIR>      Destination for converted fonts (default: dist/fonts)
    --out <DIR>       Output directory for generated CSS (default: generated-css)
    --batch <FILE>    Process multiple source trees listed in a file

When no stage option is given, all three stages run in order: convert,
restructure, css. Stage options select a subset; the order between the
selected stages is always the same.
"#
    .to_string()
}
