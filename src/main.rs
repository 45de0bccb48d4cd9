use std::fs;
use std::path::Path;

mod cli;
mod error;
mod font;
mod models;
mod pipeline;
mod utils;

use cli::{get_help_message, parse_args, StageSelection};
use error::{Error, Result};
use models::Config;
use pipeline::{convert_fonts, generate_css, restructure_tree, SfntPackager};

fn main() -> Result<()> {
    let options = match parse_args() {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(e);
        }
    };

    if options.show_help {
        println!("{}", get_help_message());
        return Ok(());
    }

    if options.config.debug_mode {
        println!("Debug mode enabled");
    }

    if let Some(batch_file) = &options.batch_file {
        return batch_process(&options.config, options.stages, batch_file);
    }

    run_pipeline(&options.config, options.stages)
}

/// Run the selected stages, in pipeline order, against one configuration
fn run_pipeline(config: &Config, stages: StageSelection) -> Result<()> {
    if stages.convert {
        convert_fonts(config, &SfntPackager)?;
    }
    if stages.restructure {
        restructure_tree(config)?;
    }
    if stages.css {
        generate_css(config)?;
    }
    Ok(())
}

/// Process multiple source trees listed in a batch file
fn batch_process(config: &Config, stages: StageSelection, batch_file: &Path) -> Result<()> {
    if !batch_file.is_file() {
        eprintln!("Error: Batch file '{}' not found", batch_file.display());
        return Err(Error::InvalidPath(batch_file.to_path_buf()));
    }

    println!(
        "Batch processing enabled. Reading directories from {}",
        batch_file.display()
    );

    let content = fs::read_to_string(batch_file)?;
    let dirs: Vec<&str> = content
        .lines()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .collect();

    println!("Found {} directories to process", dirs.len());

    for (i, dir_str) in dirs.iter().enumerate() {
        let dir_path = Path::new(dir_str);
        if !dir_path.is_dir() {
            println!("Warning: '{}' is not a valid directory, skipping", dir_str);
            continue;
        }

        println!("\nProcessing directory {}/{}: {}", i + 1, dirs.len(), dir_str);

        let mut batch_config = config.clone();
        batch_config.source_dir = dir_path.to_path_buf();
        run_pipeline(&batch_config, stages)?;
    }

    println!("\nBatch processing complete!");
    Ok(())
}
