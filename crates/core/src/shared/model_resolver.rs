use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelResolveError {
    #[error("model file not found: {0}")]
    MissingOverride(PathBuf),
    #[error("failed to create cache directory: {0}")]
    CacheDir(#[source] std::io::Error),
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// An ONNX model known by file name and download location.
#[derive(Clone, Copy, Debug)]
pub struct ModelSource<'a> {
    pub name: &'a str,
    pub url: &'a str,
}

/// Locates a model file.
///
/// An explicit `override_path` wins and must exist. Otherwise the user
/// cache is checked, and the model is downloaded into it on a miss.
pub fn resolve(
    source: ModelSource<'_>,
    override_path: Option<&Path>,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    if let Some(path) = override_path {
        return if path.is_file() {
            Ok(path.to_path_buf())
        } else {
            Err(ModelResolveError::MissingOverride(path.to_path_buf()))
        };
    }

    let cache_dir = model_cache_dir()?;
    resolve_in(source, &cache_dir, progress)
}

fn resolve_in(
    source: ModelSource<'_>,
    cache_dir: &Path,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelResolveError> {
    let cached_path = cache_dir.join(source.name);
    if cached_path.is_file() {
        log::debug!("Using cached model {}", cached_path.display());
        return Ok(cached_path);
    }

    fs::create_dir_all(cache_dir).map_err(ModelResolveError::CacheDir)?;
    log::info!("Downloading {} from {}", source.name, source.url);
    download(source.url, &cached_path, progress)?;
    Ok(cached_path)
}

/// Per-user model cache.
///
/// - macOS: `~/Library/Application Support/FaceSort/models/`
/// - elsewhere: `$XDG_CACHE_HOME/FaceSort/models/` or the platform cache dir
pub fn model_cache_dir() -> Result<PathBuf, ModelResolveError> {
    #[cfg(target_os = "macos")]
    let base = dirs::data_dir();
    #[cfg(not(target_os = "macos"))]
    let base = dirs::cache_dir();

    base.map(|d| d.join("FaceSort").join("models"))
        .ok_or(ModelResolveError::NoCacheDir)
}

fn download(url: &str, dest: &Path, progress: Option<ProgressFn>) -> Result<(), ModelResolveError> {
    let download_err = |source| ModelResolveError::Download {
        url: url.to_string(),
        source,
    };

    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(download_err)?;
    let total = response.content_length().unwrap_or(0);
    let bytes = response.bytes().map_err(download_err)?;

    // Renamed into place only once fully written.
    let temp_path = dest.with_extension("part");
    let write_err = |source| ModelResolveError::Write {
        path: temp_path.clone(),
        source,
    };
    let mut file = fs::File::create(&temp_path).map_err(write_err)?;

    let mut written: u64 = 0;
    for chunk in bytes.chunks(1024 * 1024) {
        if let Err(e) = file.write_all(chunk) {
            let _ = fs::remove_file(&temp_path);
            return Err(write_err(e));
        }
        written += chunk.len() as u64;
        if let Some(ref cb) = progress {
            cb(written, total);
        }
    }
    file.flush().map_err(write_err)?;
    drop(file);

    fs::rename(&temp_path, dest).map_err(|e| ModelResolveError::Write {
        path: dest.to_path_buf(),
        source: e,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const UNREACHABLE: ModelSource<'static> = ModelSource {
        name: "test_model.onnx",
        url: "http://invalid.nonexistent.example.com/model.onnx",
    };

    #[test]
    fn test_override_path_is_returned_as_is() {
        let tmp = TempDir::new().unwrap();
        let model = tmp.path().join("custom.onnx");
        fs::write(&model, b"model").unwrap();

        let resolved = resolve(UNREACHABLE, Some(&model), None).unwrap();
        assert_eq!(resolved, model);
    }

    #[test]
    fn test_missing_override_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let missing = tmp.path().join("missing.onnx");
        let err = resolve(UNREACHABLE, Some(&missing), None).unwrap_err();
        assert!(matches!(err, ModelResolveError::MissingOverride(p) if p == missing));
    }

    #[test]
    fn test_cached_file_skips_download() {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join(UNREACHABLE.name), b"cached").unwrap();

        let resolved = resolve_in(UNREACHABLE, tmp.path(), None).unwrap();
        assert_eq!(resolved, tmp.path().join(UNREACHABLE.name));
    }

    #[test]
    fn test_cache_miss_with_bad_url_leaves_no_partial_file() {
        let tmp = TempDir::new().unwrap();
        let cache = tmp.path().join("cache");

        let result = resolve_in(UNREACHABLE, &cache, None);
        assert!(matches!(result, Err(ModelResolveError::Download { .. })));
        assert!(!cache.join(UNREACHABLE.name).exists());
        assert!(!cache.join("test_model.part").exists());
    }

    #[test]
    fn test_model_cache_dir_is_app_specific() {
        let path = model_cache_dir().unwrap();
        assert!(path.ends_with("FaceSort/models"));
    }
}
