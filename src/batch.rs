//! Directory batch conversion.

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{BrickifyError, Converter, LevelDescription, Result};

/// Image extensions picked up by [`convert_directory`], compared case-insensitively.
pub const SUPPORTED_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "bmp"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedImage {
    pub path: PathBuf,
    pub reason: String,
}

/// Outcome of a batch run.
#[derive(Debug, Default)]
pub struct BatchReport {
    /// Level files written, in processing order.
    pub generated: Vec<PathBuf>,
    pub skipped: Vec<SkippedImage>,
}

pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| SUPPORTED_EXTENSIONS.iter().any(|s| s.eq_ignore_ascii_case(ext)))
}

/// Uppercased file stem, e.g. `ec2.png` -> `EC2`.
pub fn service_name(path: &Path) -> String {
    path.file_stem().map(|s| s.to_string_lossy().to_uppercase()).unwrap_or_default()
}

/// `<service>_logo.json`, lowercased.
pub fn level_file_name(service_name: &str) -> String {
    format!("{}_logo.json", service_name.to_lowercase())
}

/// Supported images directly inside `images_dir`, sorted by path.
pub fn find_images(images_dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let mut images: Vec<PathBuf> = fs::read_dir(images_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_supported_image(path))
        .collect();
    images.sort();
    Ok(images)
}

/// Convert every supported image in `images_dir` into a level file in
/// `output_dir`.
///
/// Images that fail to load or produce no bricks are logged and skipped.
/// Conversion runs in parallel; files are written one at a time in sorted
/// image order, so a later image wins if two map to the same file name.
pub fn convert_directory(
    converter: &Converter,
    images_dir: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
) -> Result<BatchReport> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)
        .map_err(|source| BrickifyError::WriteFailure { path: output_dir.to_path_buf(), source })?;

    let images = find_images(images_dir)?;

    let results: Vec<(PathBuf, Result<LevelDescription>)> = images
        .into_par_iter()
        .map(|path| {
            let name = service_name(&path);
            log::info!("Processing {} logo...", name);
            let level = converter.convert(&path, &name);
            (path, level)
        })
        .collect();

    let mut report = BatchReport::default();
    for (path, result) in results {
        let level = match result {
            Ok(level) if !level.bricks.is_empty() => level,
            Ok(level) => {
                log::warn!("No bricks generated for {}", level.name);
                report.skipped.push(SkippedImage { path, reason: "no bricks".into() });
                continue;
            }
            Err(e) => {
                log::warn!("Error loading image {}: {}", path.display(), e);
                report.skipped.push(SkippedImage { path, reason: e.to_string() });
                continue;
            }
        };

        let out_path = output_dir.join(level_file_name(&level.name));
        match level.write(&out_path) {
            Ok(()) => {
                log::info!(
                    "Generated level file: {} ({} bricks)",
                    out_path.file_name().unwrap_or_default().to_string_lossy(),
                    level.bricks.len()
                );
                report.generated.push(out_path);
            }
            Err(e) => {
                log::warn!("Failed to write {}: {}", out_path.display(), e);
                report.skipped.push(SkippedImage { path, reason: e.to_string() });
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_filter_is_case_insensitive() {
        assert!(is_supported_image(Path::new("a/EC2.PNG")));
        assert!(is_supported_image(Path::new("lambda.JpEg")));
        assert!(is_supported_image(Path::new("s3.bmp")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("png")));
    }

    #[test]
    fn names_follow_file_stem() {
        assert_eq!(service_name(Path::new("imgs/ec2.png")), "EC2");
        assert_eq!(service_name(Path::new("Api-Gateway.jpeg")), "API-GATEWAY");
        assert_eq!(level_file_name("API-GATEWAY"), "api-gateway_logo.json");
    }

    #[test]
    fn missing_images_dir_is_an_error() {
        let out = tempfile::tempdir().unwrap();
        let converter = Converter::default();
        assert!(convert_directory(&converter, out.path().join("nope"), out.path()).is_err());
    }
}
