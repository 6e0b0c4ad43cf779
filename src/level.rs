//! Level file model: bricks, JSON persistence, validation and previews.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH};
use crate::palette::ColorName;
use crate::{BrickifyError, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brick {
    #[serde(default)]
    pub x: u32,
    #[serde(default)]
    pub y: u32,
    #[serde(default)]
    pub color: ColorName,
    #[serde(default = "default_durability")]
    pub durability: u32,
}

impl Brick {
    /// Single-hit brick at grid position (x, y).
    pub fn new(x: u32, y: u32, color: ColorName) -> Self {
        Self { x, y, color, durability: 1 }
    }
}

fn default_durability() -> u32 {
    1
}

fn default_name() -> String {
    "Unknown".to_string()
}

fn default_grid_width() -> u32 {
    DEFAULT_GRID_WIDTH
}

fn default_grid_height() -> u32 {
    DEFAULT_GRID_HEIGHT
}

/// A named brick layout. Bricks are stored row-major.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDescription {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_grid_width")]
    pub grid_width: u32,
    #[serde(default = "default_grid_height")]
    pub grid_height: u32,
    #[serde(default)]
    pub bricks: Vec<Brick>,
    #[serde(default)]
    pub source_image: String,
}

impl LevelDescription {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    /// Write the level as a whole file, replacing any existing one.
    ///
    /// The JSON goes to a sibling temp file first and is renamed into place,
    /// so readers never see a half-written level.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        let tmp = path.with_extension("json.tmp");

        let fail = |source| {
            let _ = fs::remove_file(&tmp);
            BrickifyError::WriteFailure { path: path.to_path_buf(), source }
        };
        fs::write(&tmp, json).map_err(fail)?;
        fs::rename(&tmp, path).map_err(fail)
    }

    /// Check grid size, brick bounds, durability and (x, y) uniqueness.
    pub fn validate(&self) -> Result<()> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(BrickifyError::InvalidLevel(format!(
                "{}: empty grid {}x{}",
                self.name, self.grid_width, self.grid_height
            )));
        }

        let mut seen = HashSet::with_capacity(self.bricks.len());
        for brick in &self.bricks {
            if brick.x >= self.grid_width || brick.y >= self.grid_height {
                return Err(BrickifyError::InvalidLevel(format!(
                    "{}: brick ({}, {}) outside {}x{} grid",
                    self.name, brick.x, brick.y, self.grid_width, self.grid_height
                )));
            }
            if brick.durability == 0 {
                return Err(BrickifyError::InvalidLevel(format!(
                    "{}: brick ({}, {}) has zero durability",
                    self.name, brick.x, brick.y
                )));
            }
            if !seen.insert((brick.x, brick.y)) {
                return Err(BrickifyError::InvalidLevel(format!(
                    "{}: duplicate brick at ({}, {})",
                    self.name, brick.x, brick.y
                )));
            }
        }
        Ok(())
    }

    /// Bricks keyed by position.
    pub fn brick_map(&self) -> BTreeMap<(u32, u32), (ColorName, u32)> {
        self.bricks.iter().map(|b| ((b.x, b.y), (b.color, b.durability))).collect()
    }

    /// Same grid and bricks, regardless of brick order.
    pub fn same_layout(&self, other: &LevelDescription) -> bool {
        self.grid_width == other.grid_width
            && self.grid_height == other.grid_height
            && self.bricks.len() == other.bricks.len()
            && self.brick_map() == other.brick_map()
    }

    /// Number of bricks of each color, in palette order.
    pub fn color_counts(&self) -> BTreeMap<ColorName, usize> {
        let mut counts = BTreeMap::new();
        for brick in &self.bricks {
            *counts.entry(brick.color).or_insert(0) += 1;
        }
        counts
    }

    /// ASCII picture of the grid, framed with `=`, plus the brick count.
    pub fn render_preview(&self) -> String {
        let (w, h) = (self.grid_width as usize, self.grid_height as usize);
        let mut grid = vec![vec!['.'; w]; h];
        for brick in &self.bricks {
            let slot = grid
                .get_mut(brick.y as usize)
                .and_then(|row| row.get_mut(brick.x as usize));
            if let Some(slot) = slot {
                *slot = brick.color.symbol();
            }
        }

        let border = "=".repeat(w + 2);
        let mut preview = format!("\n{} Logo Preview:\n{}\n", self.name, border);
        for row in grid {
            preview.push('|');
            preview.extend(row);
            preview.push_str("|\n");
        }
        preview.push_str(&border);
        preview.push('\n');
        preview.push_str(&format!("Total bricks: {}\n", self.bricks.len()));
        preview
    }
}

fn pattern_level(
    name: &str,
    description: &str,
    color: ColorName,
    rows: std::ops::Range<u32>,
    cols: std::ops::Range<u32>,
    keep: impl Fn(u32, u32) -> bool,
) -> LevelDescription {
    let bricks = rows
        .flat_map(|row| cols.clone().map(move |col| (col, row)))
        .filter(|&(col, row)| keep(col, row))
        .map(|(col, row)| Brick::new(col, row, color))
        .collect();

    LevelDescription {
        name: name.to_string(),
        description: description.to_string(),
        grid_width: DEFAULT_GRID_WIDTH,
        grid_height: DEFAULT_GRID_HEIGHT,
        bricks,
        source_image: String::new(),
    }
}

/// Built-in EC2 checkerboard used when no level files load.
pub fn default_level() -> LevelDescription {
    pattern_level(
        "EC2",
        "Default EC2 Server Pattern",
        ColorName::Orange,
        3..8,
        6..14,
        |col, row| row % 2 == col % 2,
    )
}

/// Hand-drawn starter levels with their file names.
pub fn sample_levels() -> Vec<(&'static str, LevelDescription)> {
    let ec2 = pattern_level(
        "EC2",
        "Elastic Compute Cloud - Server Infrastructure",
        ColorName::Orange,
        2..10,
        4..16,
        |col, row| (row - 2) % 3 == 0 || col == 4 || col == 15,
    );
    let s3 = pattern_level(
        "S3",
        "Simple Storage Service - Scalable Storage",
        ColorName::Green,
        3..12,
        6..14,
        |col, row| {
            row == 3
                || row == 11
                || col == 6
                || col == 13
                || ((7..=9).contains(&row) && (8..=11).contains(&col))
        },
    );
    let lambda = pattern_level(
        "Lambda",
        "AWS Lambda - Serverless Computing",
        ColorName::Purple,
        2..13,
        7..13,
        |col, row| {
            col == 7
                || (col, row) == (8, 7)
                || (col, row) == (9, 8)
                || (col, row) == (10, 9)
                || (col, row) == (11, 10)
                || (col == 12 && row >= 11)
        },
    );

    vec![("ec2_logo.json", ec2), ("s3_logo.json", s3), ("lambda_logo.json", lambda)]
}

/// Write the sample levels into `dir`, creating it if needed.
pub fn write_sample_levels(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)
        .map_err(|source| BrickifyError::WriteFailure { path: dir.to_path_buf(), source })?;

    let mut written = Vec::new();
    for (file_name, level) in sample_levels() {
        let path = dir.join(file_name);
        level.write(&path)?;
        log::info!("Created sample level: {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// `*.json` files directly inside `dir`, sorted by path.
pub fn discover_levels(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
        .collect();
    files.sort();
    Ok(files)
}

/// Load every valid level in `dir`, skipping broken files.
/// Falls back to [`default_level`] when nothing loads.
pub fn load_levels(dir: impl AsRef<Path>) -> Vec<LevelDescription> {
    let dir = dir.as_ref();
    let files = discover_levels(dir).unwrap_or_else(|e| {
        log::warn!("Levels directory '{}' not readable: {}", dir.display(), e);
        Vec::new()
    });
    log::info!("Found {} level files", files.len());

    let mut levels: Vec<LevelDescription> = files
        .iter()
        .filter_map(|path| {
            match LevelDescription::read(path).and_then(|l| l.validate().map(|_| l)) {
                Ok(level) => {
                    log::info!("Loaded level: {} ({} bricks)", level.name, level.bricks.len());
                    Some(level)
                }
                Err(e) => {
                    log::warn!("Error loading level file {}: {}", path.display(), e);
                    None
                }
            }
        })
        .collect();

    if levels.is_empty() {
        let level = default_level();
        log::info!("Created default level with {} bricks", level.bricks.len());
        levels.push(level);
    }
    levels
}
