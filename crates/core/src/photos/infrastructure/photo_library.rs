//! Photo discovery under an input directory.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Recursively lists image files under `directory`, sorted by path.
///
/// `extensions` are matched case-insensitively and may be given with or
/// without a leading dot. A missing directory yields an empty list.
pub fn list_images(directory: &Path, extensions: &[String]) -> Vec<PathBuf> {
    if !directory.is_dir() {
        log::warn!("Directory does not exist: {}", directory.display());
        return Vec::new();
    }

    let wanted: Vec<String> = extensions
        .iter()
        .map(|e| e.trim_start_matches('.').to_lowercase())
        .collect();

    let mut images: Vec<PathBuf> = WalkDir::new(directory)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                log::warn!("Skipping unreadable entry: {e}");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_extension(path, &wanted))
        .collect();

    images.sort();
    images
}

fn has_extension(path: &Path, wanted: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| wanted.iter().any(|w| w == &ext.to_lowercase()))
        .unwrap_or(false)
}
