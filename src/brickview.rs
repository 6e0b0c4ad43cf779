//! brickview - Inspect generated level files

use brickify::{level, BrickifyError, LevelDescription};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "brickview", about = "Show previews of Breakout level files")]
struct Args {
    /// Level JSON files or directories of them
    #[arg(default_value = "assets/levels")]
    paths: Vec<PathBuf>,
    /// Only list names and brick counts
    #[arg(short, long)]
    summary: bool,
}

fn main() -> Result<(), BrickifyError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut levels: Vec<LevelDescription> = Vec::new();
    for path in &args.paths {
        if path.is_dir() {
            levels.extend(level::load_levels(path));
        } else {
            let level = LevelDescription::read(path)?;
            level.validate()?;
            levels.push(level);
        }
    }

    println!("Found {} levels:", levels.len());
    for (i, level) in levels.iter().enumerate() {
        println!(
            "{}. {} - {} ({} bricks)",
            i + 1,
            level.name,
            level.description,
            level.bricks.len()
        );
        if args.summary {
            continue;
        }
        let counts: Vec<String> = level
            .color_counts()
            .iter()
            .map(|(color, n)| format!("{}: {}", color, n))
            .collect();
        println!("   {}", counts.join(", "));
        print!("{}", level.render_preview());
    }

    Ok(())
}
