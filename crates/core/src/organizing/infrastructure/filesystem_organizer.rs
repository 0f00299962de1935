use std::collections::BTreeMap;
use std::fs::{self, FileTimes};
use std::io;
use std::path::{Path, PathBuf};

use crate::organizing::domain::file_action::FileAction;
use crate::organizing::domain::label_sanitizer::sanitize_label;
use crate::organizing::domain::photo_organizer::{OrganizeError, PhotoOrganizer};

/// Copies or moves photos into `output_root/<label>/`.
///
/// Existing directories are reused and existing files are never
/// overwritten; clashing names get a `_<n>` suffix.
pub struct FilesystemOrganizer {
    output_root: PathBuf,
    action: FileAction,
}

impl FilesystemOrganizer {
    pub fn new(output_root: impl Into<PathBuf>, action: FileAction) -> Self {
        Self {
            output_root: output_root.into(),
            action,
        }
    }

    fn place(&self, src: &Path, dir: &Path) -> Result<PathBuf, OrganizeError> {
        let name = src
            .file_name()
            .ok_or_else(|| OrganizeError::NoFileName(src.to_path_buf()))?;
        let dst = unique_destination(&dir.join(name));

        let transfer_err = |source| OrganizeError::Transfer {
            action: match self.action {
                FileAction::Copy => "copy",
                FileAction::Move => "move",
            },
            from: src.to_path_buf(),
            to: dst.clone(),
            source,
        };

        match self.action {
            FileAction::Copy => {
                copy_preserving_times(src, &dst).map_err(transfer_err)?;
                log::debug!("Copied {} -> {}", src.display(), dst.display());
            }
            FileAction::Move => {
                move_file(src, &dst).map_err(transfer_err)?;
                log::debug!("Moved {} -> {}", src.display(), dst.display());
            }
        }
        Ok(dst)
    }
}

impl PhotoOrganizer for FilesystemOrganizer {
    fn organize(
        &self,
        groups: &BTreeMap<String, Vec<PathBuf>>,
    ) -> Result<BTreeMap<String, PathBuf>, OrganizeError> {
        create_dir(&self.output_root)?;

        let mut created = BTreeMap::new();
        for (label, photos) in groups {
            let dir = self.output_root.join(sanitize_label(label));
            create_dir(&dir)?;

            for src in photos {
                self.place(src, &dir)?;
            }

            log::info!(
                "Organized {} photo(s) into '{}'",
                photos.len(),
                dir.display()
            );
            created.insert(label.clone(), dir);
        }
        Ok(created)
    }
}

fn create_dir(path: &Path) -> Result<(), OrganizeError> {
    fs::create_dir_all(path).map_err(|source| OrganizeError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

/// First of `path`, `stem_1.ext`, `stem_2.ext`, … that does not exist.
pub fn unique_destination(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let suffix = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    (1u64..)
        .map(|n| path.with_file_name(format!("{stem}_{n}{suffix}")))
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| path.to_path_buf())
}

/// Copies contents and permissions, then carries over access and
/// modification times.
fn copy_preserving_times(src: &Path, dst: &Path) -> io::Result<()> {
    let meta = fs::metadata(src)?;
    fs::copy(src, dst)?;

    let mut times = FileTimes::new();
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    if let Ok(modified) = meta.modified() {
        times = times.set_modified(modified);
    }
    fs::OpenOptions::new().write(true).open(dst)?.set_times(times)
}

/// Renames when possible; across filesystems falls back to copy, removing
/// the source only after the copy is complete.
fn move_file(src: &Path, dst: &Path) -> io::Result<()> {
    if fs::rename(src, dst).is_ok() {
        return Ok(());
    }
    if !src.is_file() {
        // Report the real reason rather than a failed copy.
        return fs::rename(src, dst);
    }
    copy_preserving_times(src, dst)?;
    fs::remove_file(src)
}
