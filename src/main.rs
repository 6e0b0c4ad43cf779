//! brickify CLI - Convert logo images into Breakout levels

use brickify::{batch, level, BrickifyError, Converter, ProcessorConfig};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "brickify", about = "Convert logo images into Breakout brick levels")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert every image in a directory into level files
    Convert {
        /// Directory containing logo images
        #[arg(default_value = "images")]
        images_dir: PathBuf,
        /// Directory to write level JSON files into
        #[arg(default_value = "assets/levels")]
        output_dir: PathBuf,
        #[command(flatten)]
        processing: ProcessingArgs,
    },
    /// Convert a single image and print its preview
    Image {
        /// Input image file
        input: PathBuf,
        /// Service name (defaults to the uppercased file stem)
        #[arg(short, long)]
        name: Option<String>,
        /// Also write the level JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        processing: ProcessingArgs,
    },
    /// Write the built-in sample levels
    Samples {
        #[arg(default_value = "assets/levels")]
        output_dir: PathBuf,
    },
}

#[derive(Args)]
struct ProcessingArgs {
    /// JSON processor config file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Brick columns
    #[arg(long)]
    grid_width: Option<u32>,
    /// Brick rows
    #[arg(long)]
    grid_height: Option<u32>,
    /// Alpha threshold (0-255) for brick placement
    #[arg(short, long)]
    threshold: Option<u8>,
}

impl ProcessingArgs {
    fn converter(&self) -> Result<Converter, BrickifyError> {
        let mut config = match &self.config {
            Some(path) => ProcessorConfig::read_config(path)?,
            None => ProcessorConfig::default(),
        };
        if let Some(w) = self.grid_width {
            config.grid_width = w;
        }
        if let Some(h) = self.grid_height {
            config.grid_height = h;
        }
        if let Some(t) = self.threshold {
            config.threshold = t;
        }
        config.validate()?;
        Ok(Converter::new(config))
    }
}

fn main() -> Result<(), BrickifyError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Convert { images_dir, output_dir, processing } => {
            if !images_dir.is_dir() {
                log::error!("Images directory '{}' not found.", images_dir.display());
                return Err(BrickifyError::NotFound(images_dir));
            }
            let converter = processing.converter()?;
            let report = batch::convert_directory(&converter, &images_dir, &output_dir)?;

            println!("\nGenerated {} level files:", report.generated.len());
            for path in &report.generated {
                println!("  - {}", path.file_name().unwrap_or_default().to_string_lossy());
            }
            if !report.skipped.is_empty() {
                println!("Skipped {} images:", report.skipped.len());
                for skipped in &report.skipped {
                    println!("  - {} ({})", skipped.path.display(), skipped.reason);
                }
            }
        }
        Command::Image { input, name, output, processing } => {
            let converter = processing.converter()?;
            let name = name.unwrap_or_else(|| batch::service_name(&input));
            let level = converter.convert(&input, &name)?;
            print!("{}", level.render_preview());
            if let Some(path) = output {
                level.write(&path)?;
                println!("Wrote {}", path.display());
            }
        }
        Command::Samples { output_dir } => {
            let written = level::write_sample_levels(&output_dir)?;
            println!("Created {} sample levels in {}", written.len(), output_dir.display());
        }
    }

    Ok(())
}
